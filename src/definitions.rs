//! Predefined error codes and audience names.
//!
//! # Taxonomy
//!
//! Error codes are plain strings that refine a [`FaultKind`](crate::FaultKind).
//! Any string works, but the constants below are the shared vocabulary the
//! status mapper and the boundary converter understand. They are grouped by
//! the kind they are meant to refine:
//!
//! - generic: [`ERRCODE_INTERNAL_ERROR`]
//! - `IllegalState`: `ILLEGALSTATE_*`
//! - `Validation`: `VALIDATION_*`
//! - `ConstraintViolation`: `CONSTRAINTVIOLATION_*`
//! - `Authentication`: `AUTHENTICATION_*`
//! - `Authorization`: `AUTHORIZATION_*`
//!
//! # Stability
//!
//! The string values are part of the JSON wire shape consumers match on.
//! They must never change once released.

// -----------------------------------------------------------------------------
// Generic
// -----------------------------------------------------------------------------

/// Something failed internally; added by the boundary converter when the
/// original kind is hidden.
pub const ERRCODE_INTERNAL_ERROR: &str = "internal";

// -----------------------------------------------------------------------------
// IllegalState
// -----------------------------------------------------------------------------

/// The service configuration is wrong and caused a bad state.
pub const ILLEGALSTATE_CONFIG_ERROR: &str = "config_error";
/// A dependency is permanently missing.
pub const ILLEGALSTATE_DEPENDENCY_MISSING: &str = "missing_dependency";
/// A dependency cannot be reached right now. Maps to 503 / `UNAVAILABLE`.
pub const ILLEGALSTATE_DEPENDENCY_UNAVAILABLE: &str = "unavailable_dependency";
/// What was expected did not happen. Maps to 412 / `FAILED_PRECONDITION`.
pub const ILLEGALSTATE_EXPECTATION_FAILED: &str = "expectation_failed";
/// Something timed out. Maps to 503 / `UNAVAILABLE`.
pub const ILLEGALSTATE_TIMED_OUT: &str = "timed_out";
/// Something reached its limits. Maps to 503 / `RESOURCE_EXHAUSTED`.
pub const ILLEGALSTATE_EXHAUSTED: &str = "exhausted";
/// Serializing into JSON/YAML/binary failed.
pub const ILLEGALSTATE_SERIALIZATION_FAILED: &str = "serialization_failed";
/// Deserializing from JSON/YAML/binary failed.
pub const ILLEGALSTATE_DESERIALIZATION_FAILED: &str = "deserialization_failed";
/// The code path is only reachable through a bug.
pub const ILLEGALSTATE_CODE_BUG: &str = "code_bug";

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

/// A different data type was expected.
pub const VALIDATION_WRONG_DATATYPE: &str = "wrong_datatype";
/// A specific format was expected.
pub const VALIDATION_WRONG_FORMAT: &str = "wrong_format";
/// A mandatory value was not provided.
// Wire value keeps its historical spelling.
pub const VALIDATION_MISSING_MANDATORY: &str = "mandatoy_info_missing";
/// A value was provided where none is allowed.
pub const VALIDATION_SHOULD_NOT_BE_PROVIDED: &str = "should_not_be_provided";
/// The provided value is invalid content-wise.
pub const VALIDATION_INVALID_VALUE: &str = "invalid_value";
/// The request tries to change a read-only value.
pub const VALIDATION_READONLY_VALUE_CHANGED: &str = "readonly_value_changed";

// -----------------------------------------------------------------------------
// ConstraintViolation
// -----------------------------------------------------------------------------

/// The primary key or id is already in use. Maps to 409 / `ALREADY_EXISTS`.
pub const CONSTRAINTVIOLATION_ID_ALREADY_TAKEN: &str = "id_already_taken";
/// Something already exists. Maps to 409 / `ALREADY_EXISTS`.
pub const CONSTRAINTVIOLATION_ALREADY_EXISTS: &str = "already_exists";
/// The expected object is not there. Maps to 404 / `NOT_FOUND`.
pub const CONSTRAINTVIOLATION_DOES_NOT_EXIST: &str = "not_exists";
/// A generic precondition is not met.
pub const CONSTRAINTVIOLATION_PRECONDITION_FAILED: &str = "precondition_failed";
/// Assumed and real resource versions conflict.
pub const CONSTRAINTVIOLATION_VERSION_CONFLICT: &str = "resource_version_conflict";

// -----------------------------------------------------------------------------
// Authentication
// -----------------------------------------------------------------------------

/// Authentication data was expected but is absent. Never retryable.
pub const AUTHENTICATION_MISSING: &str = "auth_data_missing";
/// The authentication method is not supported. Never retryable.
pub const AUTHENTICATION_NOT_SUPPORTED: &str = "auth_method_not_supported";
/// Authentication ran and did not succeed.
pub const AUTHENTICATION_FAILED: &str = "authentication_failed";

// -----------------------------------------------------------------------------
// Authorization
// -----------------------------------------------------------------------------

/// The actor has no permission. Never retryable.
pub const AUTHORIZATION_NO_PERMISSION: &str = "no_permission";
/// The authorization process itself failed this time.
pub const AUTHORIZATION_FAILED: &str = "authorization_failed";

// -----------------------------------------------------------------------------
// Audiences
// -----------------------------------------------------------------------------

/// Reserved audience for end-user facing messages.
///
/// The boundary converter promotes this audience's template to the default
/// message of the public Fault it produces.
pub const MSGAUDIENCE_USER: &str = "user";
