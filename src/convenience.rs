//! Convenience macros for creating Faults in one expression.
//!
//! # Rules
//!
//! 1. **Templates MUST be string literals** so placeholders are visible at
//!    the call site and never come from runtime data.
//! 2. **Label keys are identifiers**, written as `name = value`. The key is
//!    the identifier's text, so it matches a `{name}` placeholder.
//! 3. Values are any expression convertible into a label value.
//!
//! # Usage
//!
//! ```rust
//! use palisade_faults::{fault, public_fault, FaultKind, definitions};
//!
//! let attempts = 3;
//! let f = fault!(FaultKind::IllegalState, "gave up after {attempts} attempts", attempts = attempts);
//! assert_eq!(f.message(), "gave up after 3 attempts");
//! assert!(!f.is_public());
//!
//! let p = public_fault!(
//!     FaultKind::ConstraintViolation,
//!     "user {name} exists",
//!     name = "alice";
//!     codes = [definitions::CONSTRAINTVIOLATION_ALREADY_EXISTS]
//! );
//! assert_eq!(p.http_status(), 409);
//! ```
//!
//! ```rust,compile_fail
//! # use palisade_faults::{fault, FaultKind};
//! let template = String::from("dynamic {x}");
//! // Templates must be literals
//! let f = fault!(FaultKind::Runtime, template);
//! ```

/// Build a non-public Fault from a kind, a literal template and labels.
///
/// An optional `; codes = [...]` tail adds error codes.
#[macro_export]
macro_rules! fault {
    ($kind:expr, $template:literal $(, $key:ident = $value:expr)* $(,)? $(; codes = [$($code:expr),* $(,)?])?) => {
        $crate::Fault::builder($kind)
            .with_message_template($template)
            $(.with_label(stringify!($key), $value))*
            $(.with_error_codes([$($code),*]))?
            .build()
    };
}

/// Same as [`fault!`], producing a public Fault.
#[macro_export]
macro_rules! public_fault {
    ($kind:expr, $template:literal $(, $key:ident = $value:expr)* $(,)? $(; codes = [$($code:expr),* $(,)?])?) => {
        $crate::Fault::public_builder($kind)
            .with_message_template($template)
            $(.with_label(stringify!($key), $value))*
            $(.with_error_codes([$($code),*]))?
            .build()
    };
}
