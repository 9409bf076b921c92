//! Context carried by a Fault: labels and the causal chain.
//!
//! # Labels
//!
//! Labels are key-value pairs attached to a Fault. Values are
//! [`serde_json::Value`], a closed sum type that renders deterministically
//! in JSON and in message templates. The map is ordered by key so every
//! rendering of the same labels is byte-identical.
//!
//! # Cause
//!
//! [`FaultCause`] is the closed variant a Fault keeps as its cause: either
//! another [`Fault`] (forming a chain) or an opaque error. Causes are shared
//! behind `Arc` because they are never mutated through the wrapping Fault,
//! and a converted public Fault keeps its original as cause without copying.
//!
//! ```rust
//! use palisade_faults::{FaultCause, FaultKind, Fault};
//! use std::io;
//!
//! let io_err = io::Error::new(io::ErrorKind::Other, "disk on fire");
//! let cause = FaultCause::from_error(io_err);
//! assert!(cause.as_fault().is_none());
//!
//! let fault = Fault::builder(FaultKind::Runtime).build();
//! let cause = FaultCause::from_error(fault);
//! assert!(cause.as_fault().is_some());
//! ```

use crate::Fault;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Write as _};
use std::sync::Arc;

// ============================================================================
// Labels
// ============================================================================

/// A label value.
pub type LabelValue = Value;

/// Ordered label map.
pub type Labels = BTreeMap<String, LabelValue>;

/// Append the textual form of a label value: strings verbatim, anything
/// else as its JSON text.
pub(crate) fn write_label_text(out: &mut String, value: &LabelValue) {
    match value {
        Value::String(s) => out.push_str(s),
        other => {
            let _ = write!(out, "{other}");
        }
    }
}

/// Write labels as a compact JSON object.
pub(crate) fn write_labels(f: &mut impl fmt::Write, labels: &Labels) -> fmt::Result {
    match serde_json::to_string(labels) {
        Ok(rendered) => f.write_str(&rendered),
        Err(_) => f.write_str("{}"),
    }
}

// ============================================================================
// Cause
// ============================================================================

/// The upstream error a Fault wraps.
#[derive(Clone)]
pub enum FaultCause {
    /// The cause is itself a Fault.
    Fault(Arc<Fault>),
    /// Any other error, kept opaque.
    Error(Arc<dyn Error + Send + Sync + 'static>),
}

impl FaultCause {
    /// Wrap any error, recognising Faults by downcast.
    pub fn from_error<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(err))
    }

    /// Wrap an already boxed error, recognising Faults by downcast.
    pub fn from_boxed(err: Box<dyn Error + Send + Sync + 'static>) -> Self {
        match err.downcast::<Fault>() {
            Ok(fault) => Self::Fault(Arc::from(fault)),
            Err(other) => Self::Error(Arc::from(other)),
        }
    }

    /// The cause as a Fault, if it is one.
    #[inline]
    pub fn as_fault(&self) -> Option<&Fault> {
        match self {
            Self::Fault(fault) => Some(fault),
            Self::Error(_) => None,
        }
    }

    /// The cause as a plain error trait object.
    #[inline]
    pub fn as_error(&self) -> &(dyn Error + 'static) {
        match self {
            Self::Fault(fault) => fault.as_ref() as &(dyn Error + 'static),
            Self::Error(err) => err.as_ref() as &(dyn Error + 'static),
        }
    }

    /// Whether both handles point at the same cause allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fault(a), Self::Fault(b)) => Arc::ptr_eq(a, b),
            (Self::Error(a), Self::Error(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Fault> for FaultCause {
    fn from(fault: Fault) -> Self {
        Self::Fault(Arc::new(fault))
    }
}

impl From<Arc<Fault>> for FaultCause {
    fn from(fault: Arc<Fault>) -> Self {
        Self::Fault(fault)
    }
}

impl From<Box<dyn Error + Send + Sync + 'static>> for FaultCause {
    fn from(err: Box<dyn Error + Send + Sync + 'static>) -> Self {
        Self::from_boxed(err)
    }
}

impl PartialEq for FaultCause {
    /// Faults compare structurally; opaque errors only by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Fault(a), Self::Fault(b)) => a == b,
            (Self::Error(a), Self::Error(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for FaultCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fault(fault) => fmt::Display::fmt(fault, f),
            Self::Error(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl fmt::Debug for FaultCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fault(fault) => f.debug_tuple("Fault").field(fault).finish(),
            Self::Error(err) => f.debug_tuple("Error").field(&err.to_string()).finish(),
        }
    }
}

/// Fault-or-not capability test over a borrowed error.
///
/// An absent error is not a Fault.
#[inline]
pub fn downcast_fault<'a>(err: Option<&'a (dyn Error + 'static)>) -> Option<&'a Fault> {
    err?.downcast_ref::<Fault>()
}
