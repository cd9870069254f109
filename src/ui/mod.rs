//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! Widgets read the view-model and application state and turn them into
//! cells on the terminal.  No network I/O happens here.

pub mod catalog_widget;
pub mod form_widget;
pub mod layout;
pub mod popup;
pub mod spinner;
pub mod theme;
