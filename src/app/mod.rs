//! Application orchestration: state, commands, event loop plumbing and
//! input handling.

pub mod event;
pub mod handler;
pub mod runtime;
pub mod state;
pub mod sync;
