//! # Request Execution
//!
//! The asynchronous half of the interaction controller. `update()` decides
//! *what* to call; `perform()` awaits the gateway and hands the outcome back
//! as the matching settled `Action`. Failures are values here, never panics,
//! so every exit path reaches the reducer.

use std::path::Path;

use log::{debug, warn};

use crate::core::action::{Action, Request};
use crate::gateway::{Gateway, GatewayError, UploadFile};

pub async fn perform(gateway: &dyn Gateway, request: Request) -> Action {
    debug!("Performing {:?}", request);
    match request {
        Request::ListFiles => Action::FilesLoaded(gateway.list_files().await),
        Request::Upload { note, name, path } => {
            let result = match read_upload(&path, &name).await {
                Ok(file) => gateway.upload_file(file).await,
                Err(e) => Err(e),
            };
            Action::UploadSettled { note, name, result }
        }
        Request::Ask(question) => Action::AskSettled(gateway.ask(&question).await),
        Request::Reset => Action::ResetSettled(gateway.reset_all().await),
    }
}

/// Reads a picked file. A local read failure surfaces like a transport failure.
async fn read_upload(path: &Path, name: &str) -> Result<UploadFile, GatewayError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(UploadFile {
            name: name.to_string(),
            bytes,
        }),
        Err(e) => {
            warn!("Could not read {}: {}", path.display(), e);
            Err(GatewayError::Transport(format!("could not read {name}: {e}")))
        }
    }
}
