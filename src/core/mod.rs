//! Catalog data, service client and view-model derivation.
//!
//! Nothing in this module depends on any TUI or rendering crate.
//! Every type is `Send + Sync` so it can be shared across async tasks.

pub mod api;
pub mod car;
pub mod form;
pub mod markup;
pub mod view;
