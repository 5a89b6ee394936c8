//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::action::{Action, Effect, update};
use crate::core::controller::perform;
use crate::core::state::App;
use crate::gateway::{Answer, FileEntry, Gateway, GatewayError, UploadFile, UploadReceipt};

type Scripted<T> = Mutex<VecDeque<Result<T, GatewayError>>>;

/// A gateway that replays scripted results and records every call.
///
/// When a queue runs dry the call succeeds with an empty/default payload.
#[derive(Default)]
pub struct MockGateway {
    files: Scripted<Vec<FileEntry>>,
    uploads: Scripted<UploadReceipt>,
    answers: Scripted<Answer>,
    resets: Scripted<()>,
    calls: Mutex<Vec<String>>,
    asked: Mutex<Vec<String>>,
    uploaded: Mutex<Vec<String>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_files(&self, result: Result<Vec<FileEntry>, GatewayError>) {
        self.files.lock().unwrap().push_back(result);
    }

    pub fn push_upload(&self, result: Result<UploadReceipt, GatewayError>) {
        self.uploads.lock().unwrap().push_back(result);
    }

    pub fn push_ask(&self, result: Result<Answer, GatewayError>) {
        self.answers.lock().unwrap().push_back(result);
    }

    pub fn push_reset(&self, result: Result<(), GatewayError>) {
        self.resets.lock().unwrap().push_back(result);
    }

    /// Names of the gateway operations invoked, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    pub fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn list_files(&self) -> Result<Vec<FileEntry>, GatewayError> {
        self.record("list_files");
        self.files.lock().unwrap().pop_front().unwrap_or(Ok(Vec::new()))
    }

    async fn upload_file(&self, file: UploadFile) -> Result<UploadReceipt, GatewayError> {
        self.record("upload_file");
        self.uploaded.lock().unwrap().push(file.name);
        self.uploads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(UploadReceipt::default()))
    }

    async fn ask(&self, question: &str) -> Result<Answer, GatewayError> {
        self.record("ask");
        self.asked.lock().unwrap().push(question.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or_else(|| {
            Ok(Answer {
                answer: "ok".to_string(),
                citations: None,
            })
        })
    }

    async fn reset_all(&self) -> Result<(), GatewayError> {
        self.record("reset_all");
        self.resets.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

/// Creates a test App pointed at a placeholder backend.
pub fn test_app() -> App {
    App::new("http://127.0.0.1:8000")
}

/// Applies `action`, then keeps performing dispatched requests against
/// `gateway` until the chain settles. Returns the last non-dispatch effect.
pub async fn drive(app: &mut App, gateway: &dyn Gateway, action: Action) -> Effect {
    let mut effect = update(app, action);
    while let Effect::Dispatch(request) = effect {
        let settled = perform(gateway, request).await;
        effect = update(app, settled);
    }
    effect
}
