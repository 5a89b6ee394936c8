//! # Core Application Logic
//!
//! This module contains docchat's interaction logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • perform() (requests) │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Gateway   │
//!     │  Adapter   │                          │  (reqwest) │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`controller`]: Runs dispatched requests against a `Gateway`
//! - [`transcript`], [`file_list`]: view models the TUI draws from
//! - [`suggestions`]: chip label derivation
//! - [`config`]: layered settings

pub mod action;
pub mod config;
pub mod controller;
pub mod file_list;
pub mod state;
pub mod suggestions;
pub mod transcript;
