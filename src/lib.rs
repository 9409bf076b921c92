//! # Palisade Faults
//!
//! Structured, data-rich error values with an explicit trust boundary.
//!
//! ## Design Philosophy
//!
//! 1. **Errors are data**: a [`Fault`] carries a kind, a templated message,
//!    machine-readable codes, key-value labels and an optional cause
//! 2. **Enrich, don't wrap**: each layer adds context to the same Fault
//!    instead of wrapping it into yet another error
//! 3. **Public is a decision**: only Faults built as public may cross a trust
//!    boundary; everything else is redacted or converted first
//! 4. **Nothing leaks by accident**: serialization redacts non-public Faults
//!    and conversion keeps only the labels a public message needs
//!
//! ## Quick Start
//!
//! ```rust
//! use palisade_faults::{Fault, FaultKind, SerializationOptions, definitions};
//!
//! fn load_user(id: u64) -> Result<String, Fault> {
//!     Err(Fault::builder(FaultKind::ResourceNotFound)
//!         .with_message_template("user {userId} not found in {table}")
//!         .with_message_template_for_audience(definitions::MSGAUDIENCE_USER, "No such user")
//!         .with_label("userId", id)
//!         .with_label("table", "users_v2")
//!         .with_source(["repo", "load_user"])
//!         .build())
//! }
//!
//! fn handler() -> Result<String, Fault> {
//!     load_user(7).map_err(|mut f| {
//!         f.add_caller_to_call_stack(["api", "handler"]);
//!         f
//!     })
//! }
//!
//! let err = handler().unwrap_err();
//! assert_eq!(err.message(), "user 7 not found in users_v2");
//!
//! // Internal Faults never reach the wire as they are.
//! let redacted = err.to_natural_json("", &SerializationOptions::new()).unwrap();
//! assert!(!redacted.contains("users_v2"));
//! ```
//!
//! ## Crossing the Boundary
//!
//! ```rust
//! use palisade_faults::{ConversionOptions, Fault, FaultKind, RpcCode};
//!
//! let internal = Fault::builder(FaultKind::IllegalState)
//!     .with_message_template("pool {pool} exhausted")
//!     .with_label("pool", "pg-main")
//!     .build();
//!
//! let public = internal.into_public("tx-81", None, &ConversionOptions::new());
//! assert!(public.is_public());
//! assert_eq!(public.rpc_status(), RpcCode::Internal);
//! assert!(public.label("pool").is_none());
//! ```
//!
//! ## Modules
//!
//! - [`codes`]: kinds and RPC status codes
//! - [`definitions`]: predefined error codes and audiences
//! - [`template`]: `{name}` placeholder resolution
//! - [`models`] and [`builder`]: the Fault and how it is made
//! - [`serialization`], [`status`], [`conversion`]: the boundary toolkit
//! - [`logging`]: where conversion diagnostics go

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::result;

pub mod builder;
pub mod codes;
pub mod context;
pub mod convenience;
pub mod conversion;
pub mod definitions;
pub mod logging;
pub mod models;
pub mod serialization;
pub mod status;
pub mod template;

pub use builder::*;
pub use codes::*;
pub use context::*;
pub use conversion::*;
pub use definitions::*;
pub use logging::*;
pub use models::*;
pub use serialization::*;
pub use status::*;

/// Type alias for Results of the fallible rendering operations.
pub type Result<T> = result::Result<T, SerializationError>;
