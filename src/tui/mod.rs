//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Requests
//!
//! `update()` never touches the network. When it returns
//! `Effect::Dispatch(request)`, the loop spawns a tokio task that runs
//! `controller::perform` against the shared gateway and sends the settled
//! Action back over an mpsc channel. Settled actions are applied in the
//! order they arrive, so concurrent uploads may finish in any order.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (an answer is pending): draws every ~80ms so the
//!   placeholder animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize, or
//!   settled requests.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, Request, update};
use crate::core::config::ResolvedConfig;
use crate::core::controller::perform;
use crate::core::state::{App, AskState};
use crate::core::transcript::EntryId;
use crate::gateway::{Gateway, HttpGateway};
use crate::tui::component::EventHandler;
use crate::tui::components::dialog::{ConfirmEvent, PickerEvent};
use crate::tui::components::{
    AlertDialog, ConfirmDialog, FilePickerState, InputBox, InputCursor, InputEvent,
    MessageListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_cursor: InputCursor,
    /// Path prompt overlay (None = hidden)
    pub file_picker: Option<FilePickerState>,
    /// Keyboard-highlighted suggestion chip: (suggestion entry, chip index)
    pub highlighted_chip: Option<(EntryId, usize)>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_cursor: InputCursor::new(),
            file_picker: None,
            highlighted_chip: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty protocol is harmlessly ignored by terminals that lack it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // blinking cursors stutter under continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let gateway: Arc<dyn Gateway> = Arc::new(HttpGateway::new(&config.base_url));
    let mut app = App::new(config.base_url.clone());
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for settled requests from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    let init = update(&mut app, Action::Init);
    apply_effect(init, &mut tui, &gateway, &tx);

    while !should_quit {
        let animating = matches!(app.ask, AskState::Sending { .. });
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 4.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &mut app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before the next draw
        let frame_area = terminal.get_frame().area();
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&mut app, &mut tui, event, frame_area) {
                let effect = reduce(&mut app, &mut tui, action);
                if apply_effect(effect, &mut tui, &gateway, &tx) {
                    should_quit = true;
                    break;
                }
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = reduce(&mut app, &mut tui, action);
            if apply_effect(effect, &mut tui, &gateway, &tx) {
                should_quit = true;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Run the reducer, then put the cursor at the end of the question field if
/// the reducer replaced its text (a selected suggestion, a sent question).
fn reduce(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    let before = app.input.len();
    let replaced = matches!(action, Action::SelectSuggestion(_) | Action::SubmitQuestion);
    let effect = update(app, action);
    if replaced || app.input.len() != before {
        tui.input_cursor.move_to_end(&app.input);
    }
    effect
}

/// Carry out an Effect. Returns true when the app should quit.
fn apply_effect(
    effect: Effect,
    tui: &mut TuiState,
    gateway: &Arc<dyn Gateway>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::FocusInput => {
            tui.highlighted_chip = None;
            false
        }
        Effect::Dispatch(request) => {
            spawn_request(request, gateway.clone(), tx.clone());
            false
        }
    }
}

fn spawn_request(request: Request, gateway: Arc<dyn Gateway>, tx: mpsc::Sender<Action>) {
    info!("Spawning request: {:?}", request);
    tokio::spawn(async move {
        let action = perform(gateway.as_ref(), request).await;
        if tx.send(action).is_err() {
            warn!("Failed to deliver settled request: receiver dropped");
        }
    });
}

/// Translate one terminal event into at most one Action, updating
/// presentation state (overlays, highlight, scroll) along the way.
///
/// Modals capture input in priority order: alert, confirmation, file picker.
fn route_event(app: &mut App, tui: &mut TuiState, event: TuiEvent, frame_area: Rect) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }

    if let Some(message) = app.alert.as_deref() {
        return AlertDialog::new(message)
            .handle_event(&event)
            .map(|()| Action::DismissAlert);
    }

    if let Some(confirmation) = app.pending_confirmation {
        return ConfirmDialog::new(confirmation.prompt())
            .handle_event(&event)
            .map(|answer| Action::ResolveConfirmation(answer == ConfirmEvent::Accept));
    }

    if let Some(picker) = tui.file_picker.as_mut() {
        let PickerEvent::Closed(path) = picker.handle_event(&event)?;
        // Dropping the state clears the prompt for next time
        tui.file_picker = None;
        return Some(Action::FileChosen(path));
    }

    match event {
        TuiEvent::OpenFilePicker => {
            tui.file_picker = Some(FilePickerState::new());
            None
        }
        TuiEvent::RequestReset => Some(Action::RequestReset),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::CursorUp
        | TuiEvent::CursorDown => {
            tui.message_list.handle_event(&event);
            None
        }
        TuiEvent::MouseClick(col, row) => {
            ui::hit_test_chip(app, tui, frame_area, col, row).map(Action::SelectSuggestion)
        }
        TuiEvent::NextChip => {
            cycle_chip(app, tui, true);
            None
        }
        TuiEvent::PrevChip => {
            cycle_chip(app, tui, false);
            None
        }
        TuiEvent::Escape if tui.highlighted_chip.is_some() => {
            tui.highlighted_chip = None;
            None
        }
        TuiEvent::Escape => Some(Action::Quit),
        TuiEvent::Submit if app.input.trim().is_empty() => {
            highlighted_label(app, tui).map(|label| {
                tui.highlighted_chip = None;
                Action::SelectSuggestion(label)
            })
        }
        other => {
            if !matches!(other, TuiEvent::Submit) {
                tui.highlighted_chip = None;
            }
            let enabled = app.controls_enabled();
            match InputBox::new(&mut app.input, &mut tui.input_cursor, enabled, true)
                .handle_event(&other)?
            {
                InputEvent::Submit => Some(Action::SubmitQuestion),
                InputEvent::ContentChanged => None,
            }
        }
    }
}

/// Move the chip highlight within the newest suggestion block.
fn cycle_chip(app: &App, tui: &mut TuiState, forward: bool) {
    let Some((id, labels)) = app.transcript.latest_suggestions() else {
        return;
    };
    if labels.is_empty() {
        return;
    }
    let count = labels.len();
    let next = match tui.highlighted_chip {
        Some((current, index)) if current == id => {
            if forward {
                (index + 1) % count
            } else {
                (index + count - 1) % count
            }
        }
        _ if forward => 0,
        _ => count - 1,
    };
    tui.highlighted_chip = Some((id, next));
}

fn highlighted_label(app: &App, tui: &TuiState) -> Option<String> {
    let (id, index) = tui.highlighted_chip?;
    let (latest, labels) = app.transcript.latest_suggestions()?;
    if latest != id {
        return None;
    }
    labels.get(index).cloned()
}
