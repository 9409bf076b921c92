//! JSON rendering of Faults with leak-prevention redaction.
//!
//! # Shapes
//!
//! - Natural form: `kind`, `message`, `isRetryable`, `errorCodes`, `labels`.
//!   The message is the default one or the one of a requested audience.
//! - Full form: `kind`, `message`, `messagesByAudience`, `isRetryable`,
//!   `errorCodes`, `labels`.
//!
//! Every field is always present (empty array/object, never missing). The
//! cause and the call stack are never serialized.
//!
//! # Redaction
//!
//! A non-public Fault renders as a bare runtime failure unless
//! [`SerializationOptions::allow_non_public_serialization`] is set. Only the
//! retryable flag survives. An absent Fault renders the same way.
//!
//! # Pruning
//!
//! With [`SerializationOptions::resolve_messages`] the placeholders are
//! substituted and the labels they consumed are dropped from `labels`, unless
//! [`SerializationOptions::leave_message_vars_in_labels`] is also set.
//! Pruning works on copies; the Fault itself is never touched.
//!
//! ```rust
//! use palisade_faults::{Fault, FaultKind, SerializationOptions};
//!
//! let fault = Fault::public_builder(FaultKind::Validation)
//!     .with_message_template("field {field} is invalid")
//!     .with_label("field", "email")
//!     .with_label("hint", "use a valid address")
//!     .build();
//!
//! let json = fault
//!     .to_natural_json("", &SerializationOptions::new().resolve_messages(true))
//!     .unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"kind":"validation","message":"field email is invalid","isRetryable":false,"errorCodes":[],"labels":{"hint":"use a valid address"}}"#
//! );
//! ```

use crate::context::Labels;
use crate::{Fault, FaultKind, Result, template};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Failure to render a Fault as JSON.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerializationError {
    /// `serde_json` rejected the value.
    #[error("failed to render fault as JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The rendered bytes were not UTF-8.
    #[error("rendered fault is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// ============================================================================
// Options
// ============================================================================

/// Independent, combinable serialization flags. All off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializationOptions {
    /// Substitute placeholders before emitting messages.
    pub resolve_messages: bool,
    /// Keep labels consumed by resolved placeholders.
    pub leave_message_vars_in_labels: bool,
    /// Tab-indented output.
    pub pretty_print: bool,
    /// Expose non-public Faults instead of redacting them.
    pub allow_non_public_serialization: bool,
}

impl SerializationOptions {
    /// All flags off.
    #[inline]
    pub const fn new() -> Self {
        Self {
            resolve_messages: false,
            leave_message_vars_in_labels: false,
            pretty_print: false,
            allow_non_public_serialization: false,
        }
    }

    /// Set [`resolve_messages`](Self::resolve_messages).
    #[inline]
    pub const fn resolve_messages(mut self, on: bool) -> Self {
        self.resolve_messages = on;
        self
    }

    /// Set [`leave_message_vars_in_labels`](Self::leave_message_vars_in_labels).
    #[inline]
    pub const fn leave_message_vars_in_labels(mut self, on: bool) -> Self {
        self.leave_message_vars_in_labels = on;
        self
    }

    /// Set [`pretty_print`](Self::pretty_print).
    #[inline]
    pub const fn pretty_print(mut self, on: bool) -> Self {
        self.pretty_print = on;
        self
    }

    /// Set [`allow_non_public_serialization`](Self::allow_non_public_serialization).
    #[inline]
    pub const fn allow_non_public_serialization(mut self, on: bool) -> Self {
        self.allow_non_public_serialization = on;
        self
    }

    #[inline]
    const fn prunes(&self) -> bool {
        self.resolve_messages && !self.leave_message_vars_in_labels
    }
}

// ============================================================================
// Wire shapes
// ============================================================================

/// Natural form of a Fault as it goes on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct NaturalFault {
    pub kind: FaultKind,
    pub message: String,
    pub is_retryable: bool,
    pub error_codes: Vec<String>,
    pub labels: Labels,
}

/// Full form of a Fault as it goes on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct FullFault {
    pub kind: FaultKind,
    pub message: String,
    pub messages_by_audience: BTreeMap<String, String>,
    pub is_retryable: bool,
    pub error_codes: Vec<String>,
    pub labels: Labels,
}

/// The Fault to expose, or `None` when it must be redacted.
fn exposable<'a>(fault: Option<&'a Fault>, opts: &SerializationOptions) -> Option<&'a Fault> {
    fault.filter(|f| f.is_public() || opts.allow_non_public_serialization)
}

fn prune(labels: &mut Labels, vars: &BTreeSet<String>) {
    for var in vars {
        labels.remove(var);
    }
}

/// Build the natural form of `fault` for `audience` (empty = default message).
pub fn natural_form(
    fault: Option<&Fault>,
    audience: &str,
    opts: &SerializationOptions,
) -> NaturalFault {
    let Some(f) = exposable(fault, opts) else {
        return NaturalFault {
            kind: FaultKind::Runtime,
            message: String::new(),
            is_retryable: fault.is_some_and(Fault::is_retryable),
            error_codes: Vec::new(),
            labels: Labels::new(),
        };
    };

    let raw = if audience.is_empty() {
        f.message_template()
    } else {
        f.message_template_for_audience(audience)
    };

    let mut labels = f.labels();
    let message = if opts.resolve_messages {
        if opts.prunes() {
            prune(&mut labels, &template::extract_variable_names(raw));
        }
        template::resolve(raw, &f.labels)
    } else {
        raw.to_owned()
    };

    NaturalFault {
        kind: f.kind(),
        message,
        is_retryable: f.is_retryable(),
        error_codes: f.error_codes(),
        labels,
    }
}

/// Build the full form of `fault`.
pub fn full_form(fault: Option<&Fault>, opts: &SerializationOptions) -> FullFault {
    let Some(f) = exposable(fault, opts) else {
        return FullFault {
            kind: FaultKind::Runtime,
            message: String::new(),
            messages_by_audience: BTreeMap::new(),
            is_retryable: fault.is_some_and(Fault::is_retryable),
            error_codes: Vec::new(),
            labels: Labels::new(),
        };
    };

    let mut labels = f.labels();
    let (message, messages_by_audience) = if opts.resolve_messages {
        let mut vars = template::extract_variable_names(f.message_template());
        let resolved = f
            .message_templates_by_audience
            .iter()
            .map(|(audience, raw)| {
                vars.extend(template::extract_variable_names(raw));
                (audience.clone(), template::resolve(raw, &f.labels))
            })
            .collect();
        if opts.prunes() {
            prune(&mut labels, &vars);
        }
        (f.message(), resolved)
    } else {
        (
            f.message_template().to_owned(),
            f.message_templates_by_audience(),
        )
    };

    FullFault {
        kind: f.kind(),
        message,
        messages_by_audience,
        is_retryable: f.is_retryable(),
        error_codes: f.error_codes(),
        labels,
    }
}

fn render<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    if !pretty {
        return Ok(serde_json::to_string(value)?);
    }
    let mut buf = Vec::with_capacity(256);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Natural-form JSON of a possibly absent Fault.
pub fn fault_as_natural_json(
    fault: Option<&Fault>,
    audience: &str,
    opts: &SerializationOptions,
) -> Result<String> {
    render(&natural_form(fault, audience, opts), opts.pretty_print)
}

/// Full-form JSON of a possibly absent Fault.
pub fn fault_as_full_json(fault: Option<&Fault>, opts: &SerializationOptions) -> Result<String> {
    render(&full_form(fault, opts), opts.pretty_print)
}

impl Fault {
    /// Natural-form JSON. `audience` selects the message; empty means the
    /// default message, an unknown audience yields an empty message.
    pub fn to_natural_json(&self, audience: &str, opts: &SerializationOptions) -> Result<String> {
        fault_as_natural_json(Some(self), audience, opts)
    }

    /// Full-form JSON with every audience message.
    pub fn to_full_json(&self, opts: &SerializationOptions) -> Result<String> {
        fault_as_full_json(Some(self), opts)
    }
}
