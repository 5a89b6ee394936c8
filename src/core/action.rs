//! # Actions
//!
//! Everything that can happen in docchat becomes an `Action`.
//! User presses Enter? That's `Action::SubmitQuestion`.
//! Backend answers? That's `Action::AskSettled(result)`.
//!
//! `update()` applies the view changes for an action and returns the single
//! `Effect` the runtime must carry out. Network I/O never happens here; it is
//! requested through `Effect::Dispatch` and its outcome comes back as another
//! action (see `controller::perform`).
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Optimistic changes (upload note, "Deleting..." row) are applied when the
//! request is dispatched. The matching `*Settled` action either commits them
//! (nothing left to do) or compensates by re-fetching the file list.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::core::state::{App, AskState, Confirmation};
use crate::core::suggestions::chip_labels;
use crate::core::transcript::{CustomContent, EntryId, Role};
use crate::gateway::{Answer, FileEntry, GatewayError, UploadReceipt};

pub const ASK_SERVER_FAILURE: &str = "Sorry, something went wrong.";
pub const ASK_TRANSPORT_FAILURE: &str = "Network error.";
pub const RESET_SUCCESS: &str = "✅ System reset successfully.";
pub const RESET_FAILURE: &str = "Failed to reset system.";
pub const ASK_PENDING_STATUS: &str = "Waiting for answer...";

#[derive(Debug)]
pub enum Action {
    /// Application start: load the initial file list.
    Init,
    /// Send the question currently in the input field.
    SubmitQuestion,
    /// A suggestion chip was clicked.
    SelectSuggestion(String),
    /// The file picker closed; `None` means nothing was chosen.
    FileChosen(Option<PathBuf>),
    /// The reset control was activated; asks for confirmation first.
    RequestReset,
    /// Answer to the open confirmation dialog.
    ResolveConfirmation(bool),
    DismissAlert,
    FilesLoaded(Result<Vec<FileEntry>, GatewayError>),
    UploadSettled {
        note: EntryId,
        name: String,
        result: Result<UploadReceipt, GatewayError>,
    },
    AskSettled(Result<Answer, GatewayError>),
    ResetSettled(Result<(), GatewayError>),
    Quit,
}

/// A network call for the runtime to run. Its outcome returns as an `Action`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ListFiles,
    Upload {
        note: EntryId,
        name: String,
        path: PathBuf,
    },
    Ask(String),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Return keyboard focus to the question field.
    FocusInput,
    Dispatch(Request),
}

/// Display name of a picked file.
pub fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Init => {
            info!("Loading initial file list from {}", app.backend_url);
            Effect::Dispatch(Request::ListFiles)
        }

        Action::SubmitQuestion => submit_question(app),

        Action::SelectSuggestion(label) => {
            debug!("Suggestion selected: {}", label);
            app.input = label;
            submit_question(app)
        }

        Action::FileChosen(None) => Effect::None,

        Action::FileChosen(Some(path)) => {
            let name = upload_name(&path);
            let note = app
                .transcript
                .append_system_note(format!("Uploading {name}..."));
            info!("Upload started: {}", path.display());
            Effect::Dispatch(Request::Upload { note, name, path })
        }

        Action::UploadSettled { note, name, result } => match result {
            Ok(receipt) => {
                app.transcript
                    .update_note(note, format!("✅ Uploaded {name} successfully!"));
                let labels = chip_labels(receipt.suggestions.as_deref().unwrap_or_default());
                if !labels.is_empty() {
                    app.transcript
                        .append_custom_content(CustomContent::Suggestions(labels));
                }
                Effect::Dispatch(Request::ListFiles)
            }
            Err(e) => {
                warn!("Upload of {} failed: {}", name, e);
                let text = match &e {
                    GatewayError::Server { detail, .. } => format!("❌ Upload failed: {detail}"),
                    GatewayError::Transport(reason) => format!("❌ Upload error: {reason}"),
                };
                app.transcript.update_note(note, text);
                Effect::None
            }
        },

        Action::AskSettled(result) => {
            match std::mem::replace(&mut app.ask, AskState::Idle) {
                AskState::Sending { placeholder } => {
                    app.transcript.remove_placeholder(placeholder);
                }
                AskState::Idle => warn!("Answer arrived with no question in flight"),
            }

            match result {
                Ok(Answer { answer, citations }) => {
                    let message = app.transcript.append_message(Role::Ai, answer);
                    if let Some(citations) = citations.filter(|c| !c.is_empty()) {
                        app.transcript.append_citations(message, &citations);
                    }
                }
                Err(GatewayError::Server { status, detail }) => {
                    warn!("Ask failed (HTTP {}): {}", status, detail);
                    app.transcript.append_message(Role::Ai, ASK_SERVER_FAILURE);
                }
                Err(GatewayError::Transport(reason)) => {
                    warn!("Ask failed: {}", reason);
                    app.transcript.append_message(Role::Ai, ASK_TRANSPORT_FAILURE);
                }
            }
            // Leave other statuses (a failed file load) in place
            if app.status_message == ASK_PENDING_STATUS {
                app.status_message.clear();
            }
            Effect::FocusInput
        }

        Action::RequestReset => {
            app.pending_confirmation = Some(Confirmation::ResetAll);
            Effect::None
        }

        Action::ResolveConfirmation(accepted) => match app.pending_confirmation.take() {
            Some(Confirmation::ResetAll) if accepted => {
                info!("Reset confirmed");
                app.files.show_deleting();
                Effect::Dispatch(Request::Reset)
            }
            Some(Confirmation::ResetAll) => {
                debug!("Reset declined");
                Effect::None
            }
            None => Effect::None,
        },

        Action::ResetSettled(Ok(())) => {
            app.transcript.append_system_note(RESET_SUCCESS);
            app.files.render(&[]);
            Effect::None
        }

        Action::ResetSettled(Err(e)) => {
            warn!("Reset failed: {}", e);
            // Compensate now; the refetch below replaces this with ground truth
            app.files.restore_before_delete();
            app.alert = Some(match e {
                GatewayError::Server { .. } => RESET_FAILURE.to_string(),
                GatewayError::Transport(reason) => format!("Failed to reset system: {reason}"),
            });
            Effect::Dispatch(Request::ListFiles)
        }

        Action::DismissAlert => {
            app.alert = None;
            Effect::None
        }

        Action::FilesLoaded(Ok(snapshot)) => {
            debug!("Rendering {} files", snapshot.len());
            app.files.render(&snapshot);
            Effect::None
        }

        Action::FilesLoaded(Err(e)) => {
            warn!("Failed to load files: {}", e);
            app.status_message = format!("Could not load files: {}", e.detail());
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

fn submit_question(app: &mut App) -> Effect {
    let question = app.input.trim().to_string();
    if question.is_empty() {
        return Effect::None;
    }
    if !app.controls_enabled() {
        debug!("Question rejected: another question is in flight");
        return Effect::None;
    }

    app.transcript.append_message(Role::User, question.as_str());
    app.input.clear();
    let placeholder = app.transcript.append_loading_placeholder();
    app.ask = AskState::Sending { placeholder };
    app.status_message = String::from(ASK_PENDING_STATUS);
    Effect::Dispatch(Request::Ask(question))
}
