//! Fault classification and transport status codes.
//!
//! A [`FaultKind`] is the fixed classification of a [`Fault`](crate::Fault).
//! It is chosen when the builder is created and never changes afterwards.
//!
//! [`RpcCode`] is the closed subset of gRPC status codes the status mapper
//! can produce. Numeric values match the canonical gRPC codes so callers can
//! hand them to any RPC framework without a lookup table.
//!
//! # Wire Names
//!
//! Kinds serialize as `snake_case` strings:
//!
//! ```rust
//! use palisade_faults::FaultKind;
//!
//! assert_eq!(FaultKind::IllegalState.as_str(), "illegal_state");
//! assert_eq!(FaultKind::ResourceNotFound.to_string(), "resource_not_found");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Fault Kind
// ============================================================================

/// Classification tag of a Fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// Generic failure without telling too much about what happened.
    Runtime,
    /// The code found itself in an unexpected state.
    IllegalState,
    /// The requested functionality does not exist (yet).
    NotImplemented,
    /// Received input or data is not fully valid.
    Validation,
    /// An assumed state does not hold (conflicts, missing preconditions).
    ConstraintViolation,
    /// The resource expected to be there is not.
    ResourceNotFound,
    /// Authentication data is missing or wrong.
    Authentication,
    /// The actor is not allowed to do this.
    Authorization,
}

impl FaultKind {
    /// Every kind, in declaration order.
    pub const ALL: [FaultKind; 8] = [
        FaultKind::Runtime,
        FaultKind::IllegalState,
        FaultKind::NotImplemented,
        FaultKind::Validation,
        FaultKind::ConstraintViolation,
        FaultKind::ResourceNotFound,
        FaultKind::Authentication,
        FaultKind::Authorization,
    ];

    /// Stable wire name of the kind.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Runtime => "runtime",
            Self::IllegalState => "illegal_state",
            Self::NotImplemented => "not_implemented",
            Self::Validation => "validation",
            Self::ConstraintViolation => "constraint_violation",
            Self::ResourceNotFound => "resource_not_found",
            Self::Authentication => "authentication",
            Self::Authorization => "authorization",
        }
    }

    /// Whether Faults of this kind may ever be marked retryable.
    ///
    /// Not-implemented, validation and not-found failures will not change
    /// by asking again, so the retryable flag is pinned to `false` for them.
    #[inline]
    pub const fn allows_retry(self) -> bool {
        !matches!(
            self,
            Self::NotImplemented | Self::Validation | Self::ResourceNotFound
        )
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// RPC Status Code
// ============================================================================

/// RPC status codes produced by [`rpc_status`](crate::rpc_status).
///
/// Discriminants are the canonical gRPC numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum RpcCode {
    /// Not an error.
    Ok = 0,
    /// The client sent an invalid argument.
    InvalidArgument = 3,
    /// Some requested entity was not found.
    NotFound = 5,
    /// The entity the client tried to create already exists.
    AlreadyExists = 6,
    /// The caller lacks permission for the operation.
    PermissionDenied = 7,
    /// Some resource has been exhausted.
    ResourceExhausted = 8,
    /// The system is not in a state required for the operation.
    FailedPrecondition = 9,
    /// The operation is not implemented.
    Unimplemented = 12,
    /// Internal error; details are not exposed.
    Internal = 13,
    /// The service is currently unavailable.
    Unavailable = 14,
    /// The request lacks valid authentication credentials.
    Unauthenticated = 16,
}

impl RpcCode {
    /// Canonical numeric value.
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Canonical upper-case name (e.g. `FAILED_PRECONDITION`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::NotFound => "NOT_FOUND",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Self::FailedPrecondition => "FAILED_PRECONDITION",
            Self::Unimplemented => "UNIMPLEMENTED",
            Self::Internal => "INTERNAL",
            Self::Unavailable => "UNAVAILABLE",
            Self::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl fmt::Display for RpcCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RpcCode> for i32 {
    fn from(code: RpcCode) -> Self {
        code.as_i32()
    }
}
