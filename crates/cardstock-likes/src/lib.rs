//! # Cardstock Likes
//!
//! Per-document like reconciliation: combines a remote count service
//! with a client-local liked cache, applying optimistic updates with
//! caller-driven rollback.
//!
//! The crate is split into three layers:
//!
//! - [`snapshot`]: pure state functions (optimistic step, confirmation,
//!   failure revert, local-only fallback); no I/O, directly unit-tested
//! - [`store`]: the injected [`LikeStore`] capability with in-memory
//!   and best-effort file-backed implementations
//! - [`client`]: the `reqwest` effect layer speaking the remote wire
//!   contract
//!
//! Failure never escapes this crate as an error: a dead remote reads as
//! "zero likes, locally cached flag", and a failed toggle reports
//! `None` so the caller can revert whatever it showed optimistically.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cardstock_likes::{LikeClient, MemoryLikeStore};
//! use std::sync::Arc;
//!
//! # async fn run() {
//! let client = LikeClient::new("https://example.com", Arc::new(MemoryLikeStore::new()));
//!
//! let snapshots = client.fetch_snapshots(&["hello-world"]).await;
//! let current = &snapshots["hello-world"];
//!
//! if client.toggle("hello-world", !current.liked_by_me).await.is_none() {
//!     // revert the optimistic UI state
//! }
//! # }
//! ```

pub mod client;
pub mod snapshot;
pub mod store;

pub use client::LikeClient;
pub use store::{FileLikeStore, KEY_PREFIX, LikeStore, MemoryLikeStore};
