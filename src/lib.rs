//! # Introduction
//!
//! bankdesk is a terminal data-entry client for a REST customer record
//! service. It keeps a local form, validates it, and synchronizes a list of
//! records with the service through four calls (list, create, update,
//! delete). The screen is a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Data flow
//!
//! ```text
//! Keys → RecordEditor ──submit──▶ SyncRequest ──task──▶ Backend
//!            ▲                                            │
//!            └──────────── apply(SyncOutcome) ◀───────────┘
//! ```
//!
//! 1. [`editor`] — the state container: form fields, validation errors, the
//!    record list and the Idle/Editing mode, plus the sync controller that
//!    turns requests into backend calls.
//! 2. [`backend`] — the [`backend::Backend`] port and its reqwest adapter.
//! 3. [`record`] — wire types shared by both.
//! 4. [`ui`] — ratatui-based TUI; not part of the stable library API.
//! 5. [`config`] and [`logging`] — process setup for the binary.

pub mod backend;
pub mod config;
pub mod editor;
pub mod logging;
pub mod record;
pub mod ui;
