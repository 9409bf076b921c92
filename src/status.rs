//! HTTP and RPC status derivation.
//!
//! Only public Faults are mapped by kind. A non-public Fault always maps to
//! a generic server error so nothing about its nature leaks through the
//! status line. An absent Fault is success.
//!
//! | Kind | HTTP | RPC | Refinements (first match wins) |
//! |---|---|---|---|
//! | Runtime | 500 | `INTERNAL` | |
//! | Authentication | 401 | `UNAUTHENTICATED` | |
//! | Authorization | 403 | `PERMISSION_DENIED` | |
//! | ResourceNotFound | 404 | `NOT_FOUND` | |
//! | Validation | 400 | `INVALID_ARGUMENT` | |
//! | NotImplemented | 501 | `UNIMPLEMENTED` | |
//! | ConstraintViolation | 412 | `FAILED_PRECONDITION` | `id_already_taken`, `already_exists` → 409 / `ALREADY_EXISTS`; `not_exists` → 404 / `NOT_FOUND` |
//! | IllegalState | 500 | `INTERNAL` | `unavailable_dependency`, `timed_out` → 503 / `UNAVAILABLE`; `exhausted` → 503 / `RESOURCE_EXHAUSTED`; `expectation_failed` → 412 / `FAILED_PRECONDITION` |

use crate::{Fault, FaultKind, RpcCode, definitions};

/// Combined transport status of a Fault.
fn status_pair(fault: Option<&Fault>) -> (u16, RpcCode) {
    let Some(fault) = fault else {
        return (200, RpcCode::Ok);
    };
    if !fault.is_public() {
        return (500, RpcCode::Internal);
    }

    match fault.kind() {
        FaultKind::Runtime => (500, RpcCode::Internal),
        FaultKind::Authentication => (401, RpcCode::Unauthenticated),
        FaultKind::Authorization => (403, RpcCode::PermissionDenied),
        FaultKind::ResourceNotFound => (404, RpcCode::NotFound),
        FaultKind::Validation => (400, RpcCode::InvalidArgument),
        FaultKind::NotImplemented => (501, RpcCode::Unimplemented),
        FaultKind::ConstraintViolation => {
            if fault.has_error_code([
                definitions::CONSTRAINTVIOLATION_ID_ALREADY_TAKEN,
                definitions::CONSTRAINTVIOLATION_ALREADY_EXISTS,
            ]) {
                (409, RpcCode::AlreadyExists)
            } else if fault.has_error_code([definitions::CONSTRAINTVIOLATION_DOES_NOT_EXIST]) {
                (404, RpcCode::NotFound)
            } else {
                (412, RpcCode::FailedPrecondition)
            }
        }
        FaultKind::IllegalState => {
            if fault.has_error_code([
                definitions::ILLEGALSTATE_DEPENDENCY_UNAVAILABLE,
                definitions::ILLEGALSTATE_TIMED_OUT,
            ]) {
                (503, RpcCode::Unavailable)
            } else if fault.has_error_code([definitions::ILLEGALSTATE_EXHAUSTED]) {
                (503, RpcCode::ResourceExhausted)
            } else if fault.has_error_code([definitions::ILLEGALSTATE_EXPECTATION_FAILED]) {
                (412, RpcCode::FailedPrecondition)
            } else {
                (500, RpcCode::Internal)
            }
        }
    }
}

/// HTTP status code for a possibly absent Fault.
#[inline]
pub fn http_status(fault: Option<&Fault>) -> u16 {
    status_pair(fault).0
}

/// RPC status code for a possibly absent Fault.
#[inline]
pub fn rpc_status(fault: Option<&Fault>) -> RpcCode {
    status_pair(fault).1
}

impl Fault {
    /// See [`http_status`].
    #[inline]
    pub fn http_status(&self) -> u16 {
        http_status(Some(self))
    }

    /// See [`rpc_status`].
    #[inline]
    pub fn rpc_status(&self) -> RpcCode {
        rpc_status(Some(self))
    }
}
