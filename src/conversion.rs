//! Boundary conversion of arbitrary errors into public Faults.
//!
//! At a trust boundary every error must become something safe to send to
//! the other side. [`to_public_fault`] does that:
//!
//! - an already public Fault passes through untouched, as the very same
//!   shared instance
//! - anything else becomes a new public Fault whose cause is the original,
//!   with a generic message pointing at the logs via a transaction id
//! - the full verbose rendering of the original is logged once at warning
//!   level, so the details are kept on the inside
//!
//! A non-public Fault may still contribute what it declared as shareable:
//! its retryable flag, its audience templates (the `user` template becomes
//! the public default message) and exactly those labels the surviving
//! templates reference. Every other label is dropped.
//!
//! ```rust
//! use palisade_faults::{ConversionOptions, Fault, FaultKind, definitions};
//!
//! let internal = Fault::builder(FaultKind::Validation)
//!     .with_message_template("row {row} failed check {check} on table {table}")
//!     .with_message_template_for_audience(definitions::MSGAUDIENCE_USER, "Row {row} is invalid")
//!     .with_labels([("row", "17"), ("check", "fk_owner"), ("table", "accounts")])
//!     .build();
//!
//! let public = internal.into_public("tx-1", None, &ConversionOptions::default());
//!
//! assert!(public.is_public());
//! assert_eq!(public.kind(), FaultKind::Runtime);
//! assert_eq!(public.message(), "Row 17 is invalid");
//! assert!(public.label("table").is_none());
//! ```

use crate::context::FaultCause;
use crate::logging::{FaultLogger, LogLabel, default_logger};
use crate::{Fault, FaultBuilder, FaultKind, definitions, template};
use std::collections::BTreeSet;
use std::sync::Arc;
use zeroize::Zeroize;

/// Label carrying the transaction id on converted Faults and log events.
pub const TRANSACTION_ID_LABEL: &str = "transactionId";

const MSG_WITH_TRANSACTION_ID: &str =
    "Error occured during processing, details are logged with transactionId '{transactionId}'";
const MSG_WITHOUT_TRANSACTION_ID: &str = "Error occured during processing, details are logged";

// ============================================================================
// Options
// ============================================================================

/// Options of a boundary conversion.
#[derive(Debug, Clone, Default)]
pub struct ConversionOptions {
    /// Extra labels decorating the diagnostic log event.
    pub log_labels: Vec<LogLabel>,
    /// Kinds safe to keep on the public Fault.
    pub whitelisted_kinds: BTreeSet<FaultKind>,
    /// Copy the original Fault's error codes to the public one.
    pub inherit_error_codes: bool,
}

impl ConversionOptions {
    /// No log labels, no whitelisted kinds.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decorate the diagnostic log event with `labels`.
    pub fn with_log_labels(mut self, labels: impl IntoIterator<Item = LogLabel>) -> Self {
        self.log_labels.extend(labels);
        self
    }

    /// Keep the original kind when it is one of `kinds`, optionally
    /// inheriting the original error codes as well.
    pub fn whitelisted_kinds(
        mut self,
        inherit_error_codes: bool,
        kinds: impl IntoIterator<Item = FaultKind>,
    ) -> Self {
        self.inherit_error_codes = inherit_error_codes;
        self.whitelisted_kinds.extend(kinds);
        self
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Turn any error into a Fault that is safe to expose.
///
/// Returns `None` only for `None` input. A public Fault is returned as the
/// same `Arc` it came in, so it compares pointer-equal to the caller's
/// handle. Anything else is converted into a new Fault.
///
/// The diagnostic event hands the full verbose rendering of the original
/// to `logger`. When `logger` is `None` the [`default_logger`] is used,
/// which caps the message at 16 KiB.
pub fn to_public_fault(
    original: Option<FaultCause>,
    transaction_id: &str,
    logger: Option<&dyn FaultLogger>,
    opts: &ConversionOptions,
) -> Option<Arc<Fault>> {
    let original = match original? {
        FaultCause::Fault(fault) if fault.is_public() => return Some(fault),
        other => other,
    };
    Some(Arc::new(convert(original, transaction_id, logger, opts)))
}

impl Fault {
    /// Owned form of [`to_public_fault`]. A public Fault is returned as is,
    /// without being copied.
    pub fn into_public(
        self,
        transaction_id: &str,
        logger: Option<&dyn FaultLogger>,
        opts: &ConversionOptions,
    ) -> Fault {
        if self.is_public() {
            return self;
        }
        convert(FaultCause::from(self), transaction_id, logger, opts)
    }
}

fn convert(
    original: FaultCause,
    transaction_id: &str,
    logger: Option<&dyn FaultLogger>,
    opts: &ConversionOptions,
) -> Fault {
    let source = original.as_fault();
    let kind_kept = source.is_some_and(|f| opts.whitelisted_kinds.contains(&f.kind()));
    let kind = match source {
        Some(f) if kind_kept => f.kind(),
        _ => FaultKind::Runtime,
    };

    let mut builder = FaultBuilder::new_public(kind).with_fault_cause(original.clone());
    if !kind_kept {
        builder = builder.with_error_codes([definitions::ERRCODE_INTERNAL_ERROR]);
    }
    if opts.inherit_error_codes {
        if let Some(f) = source {
            builder = builder.with_error_codes(f.error_codes.iter().cloned());
        }
    }

    builder = if transaction_id.is_empty() {
        builder.with_message_template(MSG_WITHOUT_TRANSACTION_ID)
    } else {
        builder.with_message_template(MSG_WITH_TRANSACTION_ID)
    };

    if let Some(f) = source {
        builder = inherit_shareable(builder, f);
    }

    if !transaction_id.is_empty() {
        builder = builder.with_label(TRANSACTION_ID_LABEL, transaction_id);
    }

    log_original(&original, kind_kept, transaction_id, logger, opts);
    builder.build()
}

/// Carry over what a non-public Fault declared as shareable.
fn inherit_shareable(mut builder: FaultBuilder, original: &Fault) -> FaultBuilder {
    builder = builder.with_retryable(original.is_retryable());

    let mut audiences = original.message_templates_by_audience();
    let mut needed = BTreeSet::new();
    if let Some(user) = audiences.remove(definitions::MSGAUDIENCE_USER) {
        if user.is_empty() {
            audiences.insert(definitions::MSGAUDIENCE_USER.to_owned(), user);
        } else {
            needed.extend(template::extract_variable_names(&user));
            builder = builder.with_message_template(user);
        }
    }
    for audience_template in audiences.values() {
        needed.extend(template::extract_variable_names(audience_template));
    }

    builder
        .with_exact_message_templates_by_audience(audiences)
        .with_labels(
            original
                .labels
                .iter()
                .filter(|(key, _)| needed.contains(key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone())),
        )
}

fn log_original(
    original: &FaultCause,
    kind_kept: bool,
    transaction_id: &str,
    logger: Option<&dyn FaultLogger>,
    opts: &ConversionOptions,
) {
    let logger: &dyn FaultLogger = match logger {
        Some(logger) => logger,
        None => default_logger(),
    };

    let mut labels = opts.log_labels.clone();
    if !transaction_id.is_empty() && !labels.iter().any(|l| l.value() == transaction_id) {
        labels.push(LogLabel::new(TRANSACTION_ID_LABEL, transaction_id.to_owned()));
    }

    let mut rendered = match original {
        FaultCause::Fault(fault) => fault.verbose().to_string(),
        FaultCause::Error(err) => err.to_string(),
    };
    match original {
        FaultCause::Fault(_) => logger.warn(
            &labels,
            format_args!(
                "unsafe error turned into a public fault (kindKept: {kind_kept}, inheritErrorCodes: {}), original error: {rendered}",
                opts.inherit_error_codes
            ),
        ),
        FaultCause::Error(_) => logger.warn(
            &labels,
            format_args!("unsafe error turned into a public fault, original error: {rendered}"),
        ),
    }
    rendered.zeroize();
}
