//! # Platform Lifecycle
//!
//! Starts the three actors, wires them together and shuts them down again.
//!
//! Dependencies are injected when an actor starts running, not when it is built, so the
//! actors can be created in any order and then started with each other's clients:
//!
//! ```text
//! product  <-  user  <-  order
//! ```
//!
//! The user actor asks the catalog whether a product exists before carting it. The order
//! actor talks to both. No actor holds a client of the order actor, so the graph is
//! acyclic and shutdown needs no extra signalling: dropping the [`Platform`]'s clients
//! closes the order actor's channel, the order actor drops its context, and the rest
//! follows.
//!
//! ## Logging
//!
//! [`setup_tracing`] installs a subscriber filtered by `RUST_LOG` (default `warn`).
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! ```
//!
//! Logs go to stderr; stdout only carries what the caller prints.

pub mod config;
pub mod platform;
pub mod tracing;

pub use config::*;
pub use platform::*;
pub use self::tracing::setup_tracing;
