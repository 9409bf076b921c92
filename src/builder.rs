//! Accumulator producing Fault snapshots.
//!
//! The builder owns a private prototype Fault. [`FaultBuilder::build`]
//! clones it, so builder and built Fault never share storage and the same
//! builder can stamp out any number of independent Faults.
//!
//! ```rust
//! use palisade_faults::{Fault, FaultKind, definitions};
//!
//! let builder = Fault::public_builder(FaultKind::ConstraintViolation)
//!     .with_message_template("user {name} already exists")
//!     .with_error_codes([definitions::CONSTRAINTVIOLATION_ALREADY_EXISTS])
//!     .with_label("name", "alice");
//!
//! let mut first = builder.build();
//! let second = builder.build();
//! first.add_label("name", "bob");
//!
//! assert_eq!(first.message(), "user bob already exists");
//! assert_eq!(second.message(), "user alice already exists");
//! ```

use crate::context::{FaultCause, LabelValue, Labels};
use crate::models::{insert_codes, join_dotted};
use crate::{Fault, FaultKind, definitions};
use std::collections::BTreeMap;
use std::error::Error;

/// Chained configuration of a Fault before it exists.
#[derive(Clone, Debug)]
#[must_use = "builders do nothing until `build` is called"]
pub struct FaultBuilder {
    proto: Fault,
}

impl FaultBuilder {
    /// Builder for a non-public Fault of `kind`.
    #[inline]
    pub fn new(kind: FaultKind) -> Self {
        Self {
            proto: Fault::new(kind, false),
        }
    }

    /// Builder for a public Fault of `kind`.
    #[inline]
    pub fn new_public(kind: FaultKind) -> Self {
        Self {
            proto: Fault::new(kind, true),
        }
    }

    /// Request the retryable flag.
    ///
    /// Ignored for kinds that never allow retry and for permanent
    /// authentication or authorization failures, see [`build`](Self::build).
    #[inline]
    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.proto.retryable = retryable;
        self
    }

    /// Default message template. May reference labels as `{name}`.
    pub fn with_message_template(mut self, template: impl Into<String>) -> Self {
        self.proto.message_template = template.into();
        self
    }

    /// Template for one audience. Empty audience names are ignored.
    pub fn with_message_template_for_audience(
        mut self,
        audience: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        let audience = audience.into();
        if !audience.is_empty() {
            self.proto
                .message_templates_by_audience
                .insert(audience, template.into());
        }
        self
    }

    /// Drop the templates of the listed audiences.
    pub fn without_message_template_for_audiences<I, S>(mut self, audiences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for audience in audiences {
            self.proto
                .message_templates_by_audience
                .remove(audience.as_ref());
        }
        self
    }

    /// Merge audience templates, overwriting existing audiences.
    pub fn with_message_templates_by_audience<I, K, V>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (audience, template) in templates {
            self = self.with_message_template_for_audience(audience, template);
        }
        self
    }

    /// Replace all audience templates.
    pub fn with_exact_message_templates_by_audience<I, K, V>(mut self, templates: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.proto.message_templates_by_audience = BTreeMap::new();
        self.with_message_templates_by_audience(templates)
    }

    /// Wrap an upstream error. A [`Fault`] passed here is kept as a Fault
    /// cause, anything else stays opaque.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.proto.cause = Some(FaultCause::from_error(cause));
        self
    }

    /// Wrap an already classified cause.
    pub fn with_fault_cause(mut self, cause: impl Into<FaultCause>) -> Self {
        self.proto.cause = Some(cause.into());
        self
    }

    /// Clear the cause.
    pub fn without_cause(mut self) -> Self {
        self.proto.cause = None;
        self
    }

    /// Record where the Fault is born. Parts are joined with `.` and become
    /// a call-stack entry.
    pub fn with_source<I, S>(mut self, parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.proto.call_stack.push(join_dotted(parts));
        self
    }

    /// Add error codes. Empty and duplicate codes are ignored.
    pub fn with_error_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        insert_codes(&mut self.proto.error_codes, codes);
        self
    }

    /// Remove error codes.
    pub fn without_error_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for code in codes {
            self.proto.error_codes.remove(code.as_ref());
        }
        self
    }

    /// Set one label. Empty keys are ignored.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<LabelValue>) -> Self {
        self.proto.add_label(key, value);
        self
    }

    /// Merge labels, overwriting on key collision.
    pub fn with_labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<LabelValue>,
    {
        self.proto.add_labels(labels);
        self
    }

    /// Remove labels by key.
    pub fn without_labels<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.proto.labels.remove(key.as_ref());
        }
        self
    }

    /// Replace all labels.
    pub fn with_exact_labels<I, K, V>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<LabelValue>,
    {
        self.proto.labels = Labels::new();
        self.proto.add_labels(labels);
        self
    }

    /// Produce an independent Fault.
    ///
    /// The retryable flag is forced to `false` when the kind never allows
    /// retry, for Authentication Faults carrying
    /// [`AUTHENTICATION_MISSING`](definitions::AUTHENTICATION_MISSING) or
    /// [`AUTHENTICATION_NOT_SUPPORTED`](definitions::AUTHENTICATION_NOT_SUPPORTED),
    /// and for Authorization Faults carrying
    /// [`AUTHORIZATION_NO_PERMISSION`](definitions::AUTHORIZATION_NO_PERMISSION).
    pub fn build(&self) -> Fault {
        let mut fault = self.proto.clone();
        if fault.retryable && is_permanent(&fault) {
            fault.retryable = false;
        }
        fault
    }
}

fn is_permanent(fault: &Fault) -> bool {
    if !fault.kind.allows_retry() {
        return true;
    }
    match fault.kind {
        FaultKind::Authentication => fault.has_error_code([
            definitions::AUTHENTICATION_MISSING,
            definitions::AUTHENTICATION_NOT_SUPPORTED,
        ]),
        FaultKind::Authorization => {
            fault.has_error_code([definitions::AUTHORIZATION_NO_PERMISSION])
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io;

    #[test]
    fn builds_are_independent() {
        let builder = FaultBuilder::new(FaultKind::Runtime)
            .with_label("a", 1)
            .with_error_codes(["x"]);
        let mut one = builder.build();
        let two = builder.build();
        one.add_label("a", 2);
        one.add_error_codes(["y"]);
        assert_eq!(two.label("a"), Some(&json!(1)));
        assert_eq!(two.error_codes(), vec!["x"]);
        assert_ne!(one, two);
    }

    #[test]
    fn builder_changes_after_build_do_not_leak() {
        let builder = FaultBuilder::new(FaultKind::Runtime).with_label("a", 1);
        let built = builder.build();
        let builder = builder.with_label("a", 2).with_error_codes(["late"]);
        assert_eq!(built.label("a"), Some(&json!(1)));
        assert!(built.error_codes().is_empty());
        assert_eq!(builder.build().label("a"), Some(&json!(2)));
    }

    #[test]
    fn kind_and_visibility_are_fixed_at_creation() {
        let f = FaultBuilder::new_public(FaultKind::Authorization).build();
        assert_eq!(f.kind(), FaultKind::Authorization);
        assert!(f.is_public());
        assert!(!FaultBuilder::new(FaultKind::Authorization).build().is_public());
    }

    #[test]
    fn retry_is_ignored_for_permanent_kinds() {
        for kind in [
            FaultKind::NotImplemented,
            FaultKind::Validation,
            FaultKind::ResourceNotFound,
        ] {
            assert!(!FaultBuilder::new(kind).with_retryable(true).build().is_retryable());
        }
        assert!(
            FaultBuilder::new(FaultKind::IllegalState)
                .with_retryable(true)
                .build()
                .is_retryable()
        );
    }

    #[test]
    fn retry_is_ignored_for_permanent_auth_failures() {
        let missing = FaultBuilder::new(FaultKind::Authentication)
            .with_retryable(true)
            .with_error_codes([definitions::AUTHENTICATION_MISSING])
            .build();
        assert!(!missing.is_retryable());

        let failed = FaultBuilder::new(FaultKind::Authentication)
            .with_retryable(true)
            .with_error_codes([definitions::AUTHENTICATION_FAILED])
            .build();
        assert!(failed.is_retryable());

        let denied = FaultBuilder::new(FaultKind::Authorization)
            .with_retryable(true)
            .with_error_codes([definitions::AUTHORIZATION_NO_PERMISSION])
            .build();
        assert!(!denied.is_retryable());

        // The code only matters for the kind it refines.
        let other = FaultBuilder::new(FaultKind::Runtime)
            .with_retryable(true)
            .with_error_codes([definitions::AUTHORIZATION_NO_PERMISSION])
            .build();
        assert!(other.is_retryable());
    }

    #[test]
    fn audience_templates_merge_replace_and_remove() {
        let f = FaultBuilder::new(FaultKind::Runtime)
            .with_message_template_for_audience("user", "u")
            .with_message_templates_by_audience([("ops", "o"), ("user", "u2")])
            .with_message_template_for_audience("", "ignored")
            .build();
        assert_eq!(f.message_templates_by_audience().len(), 2);
        assert_eq!(f.message_template_for_audience("user"), "u2");

        let f = FaultBuilder::new(FaultKind::Runtime)
            .with_message_templates_by_audience([("ops", "o"), ("user", "u")])
            .with_exact_message_templates_by_audience([("dev", "d")])
            .build();
        assert_eq!(f.message_templates_by_audience().len(), 1);
        assert_eq!(f.message_template_for_audience("dev"), "d");

        let f = FaultBuilder::new(FaultKind::Runtime)
            .with_message_templates_by_audience([("ops", "o"), ("user", "u")])
            .without_message_template_for_audiences(["ops", "missing"])
            .build();
        assert_eq!(f.message_template_for_audience("ops"), "");
        assert_eq!(f.message_template_for_audience("user"), "u");
    }

    #[test]
    fn labels_merge_replace_and_remove() {
        let f = FaultBuilder::new(FaultKind::Runtime)
            .with_labels([("a", json!(1)), ("b", json!(2))])
            .with_label("", "ignored")
            .without_labels(["b"])
            .build();
        assert_eq!(f.labels().len(), 1);
        assert!(f.label("b").is_none());

        let f = FaultBuilder::new(FaultKind::Runtime)
            .with_labels([("a", json!(1)), ("b", json!(2))])
            .with_exact_labels([("c", json!(3))])
            .build();
        assert_eq!(f.labels().keys().collect::<Vec<_>>(), vec!["c"]);
    }

    #[test]
    fn codes_add_and_remove() {
        let f = FaultBuilder::new(FaultKind::Runtime)
            .with_error_codes(["b", "a", "", "a"])
            .without_error_codes(["b"])
            .build();
        assert_eq!(f.error_codes(), vec!["a"]);
    }

    #[test]
    fn cause_is_classified() {
        let inner = FaultBuilder::new(FaultKind::Validation).build();
        let f = FaultBuilder::new(FaultKind::Runtime).with_cause(inner.clone()).build();
        assert_eq!(f.cause().and_then(FaultCause::as_fault), Some(&inner));

        let f = FaultBuilder::new(FaultKind::Runtime)
            .with_cause(io::Error::other("io"))
            .build();
        assert!(f.cause().is_some_and(|c| c.as_fault().is_none()));

        let f = FaultBuilder::new(FaultKind::Runtime)
            .with_cause(io::Error::other("io"))
            .without_cause()
            .build();
        assert!(f.cause().is_none());
    }

    #[test]
    fn source_joins_parts() {
        let f = FaultBuilder::new(FaultKind::Runtime)
            .with_source(["pkg", "mod", "func"])
            .build();
        assert_eq!(f.origin(), "pkg.mod.func");
        assert_eq!(f.call_stack(), vec!["pkg.mod.func"]);
    }
}
