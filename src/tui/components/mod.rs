//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: Top status line with backend address and status
//! - `Message`: One transcript entry as a bordered bubble
//! - `FilePanel`: The uploaded document list
//! - `ConfirmDialog`, `AlertDialog`: modal overlays
//!
//! ### Stateful Components (Event-Driven)
//!
//! Transient wrappers created each frame around persistent state:
//! - `InputBox` over `App::input` and an `InputCursor`
//! - `MessageList` over `MessageListState`
//! - `FilePicker` over `FilePickerState`
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── message.rs       (Single entry renderer)
//! ├── message_list.rs  (Scrollable transcript)
//! ├── file_panel.rs    (Document list)
//! ├── input_box.rs     (Question field)
//! └── dialog.rs        (Confirm, alert, path prompt overlays)
//! ```

pub mod dialog;
pub mod file_panel;
pub mod input_box;
pub mod message;
pub mod message_list;
mod title_bar;

pub use dialog::{AlertDialog, ConfirmDialog, FilePicker, FilePickerState};
pub use file_panel::FilePanel;
pub use input_box::{InputBox, InputCursor, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
