//! Core types and pure operations for the Rankboard profile dashboard.
//!
//! This crate is deliberately free of HTTP and storage dependencies. It turns
//! a caller-supplied [`profile::Profile`] into display projections and merges
//! profile edits; it never fetches, stores, or originates data itself.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod edit;
pub mod error;
pub mod history;
pub mod profile;
pub mod progression;
pub mod session;

pub use edit::{ProfileEdit, apply_edit};
pub use error::{Error, InvalidProgressionError, Result, ValidationError};
pub use history::{HistoryView, aggregate};
pub use progression::{ProgressView, compute_progress};
