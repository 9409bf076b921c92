//! Logging contract used by the boundary converter.
//!
//! The converter only needs three things from a logger: a name, a way to
//! attach labels to an event, and a warning-level formatted message. That is
//! the whole [`FaultLogger`] trait, so any sink can be plugged in.
//! [`TracingLogger`] is the default sink and forwards to `tracing`.
//!
//! # Sensitive Data
//!
//! The converter logs the verbose rendering of an internal error, which is
//! exactly what must never leave the trust boundary. Owned [`LogLabel`]
//! values are zeroized on drop, and the converter zeroizes its own rendered
//! text after the logger returns. Whatever a sink stores or forwards is its
//! own copy and is not covered by this.
//!
//! # Message Size
//!
//! [`FaultLogger::warn`] receives the message unbounded. [`TracingLogger`]
//! caps it at 16 KiB and appends a visible truncation marker, so the verbose
//! rendering of a Fault with very large labels loses its tail there. Plug in
//! a custom sink when the full text must be kept.

use std::borrow::Cow;
use std::fmt;
use zeroize::Zeroize;

/// Maximum length of a logged message (DoS prevention).
pub(crate) const MAX_MESSAGE_LEN: usize = 16 * 1024;

/// Maximum length of a single logged label value.
pub(crate) const MAX_LABEL_VALUE_LEN: usize = 1024;

/// Truncation indicator appended to truncated strings
const TRUNCATION_INDICATOR: &str = "...[TRUNCATED]";

// ============================================================================
// Labels
// ============================================================================

/// Key-value decoration of a log event.
///
/// Borrowed values are assumed static and are not zeroized.
#[derive(Clone, PartialEq, Eq)]
pub struct LogLabel {
    key: Cow<'static, str>,
    value: Cow<'static, str>,
}

impl LogLabel {
    /// New label.
    pub fn new(key: impl Into<Cow<'static, str>>, value: impl Into<Cow<'static, str>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Label key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Label value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Debug for LogLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:?}", self.key, self.value)
    }
}

impl Zeroize for LogLabel {
    fn zeroize(&mut self) {
        if let Cow::Owned(ref mut s) = self.value {
            s.zeroize();
        }
    }
}

impl Drop for LogLabel {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// `key=value` list rendering of log labels, values truncated.
pub struct DisplayLabels<'a>(pub &'a [LogLabel]);

impl fmt::Display for DisplayLabels<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(
                f,
                "{}={}",
                label.key,
                truncate_with_indicator(&label.value, MAX_LABEL_VALUE_LEN)
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Logger contract
// ============================================================================

/// Minimal logging capability: a named warning emitter.
pub trait FaultLogger: Send + Sync {
    /// Name of the logger, emitted with every event.
    fn name(&self) -> &str;

    /// Emit one warning-level event decorated with `labels`.
    fn warn(&self, labels: &[LogLabel], message: fmt::Arguments<'_>);
}

/// [`FaultLogger`] forwarding to `tracing::warn!`.
///
/// The event carries `logger` and `labels` fields. Messages longer than
/// 16 KiB and label values longer than 1 KiB are truncated with a
/// `...[TRUNCATED]` marker.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    name: Cow<'static, str>,
}

impl TracingLogger {
    /// Logger with a runtime name.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }

    /// Logger with a static name, usable in `static` items.
    pub const fn from_static(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }
}

impl FaultLogger for TracingLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn warn(&self, labels: &[LogLabel], message: fmt::Arguments<'_>) {
        let mut rendered = message.to_string();
        tracing::warn!(
            logger = %self.name,
            labels = %DisplayLabels(labels),
            "{}",
            truncate_with_indicator(&rendered, MAX_MESSAGE_LEN)
        );
        rendered.zeroize();
    }
}

static DEFAULT_LOGGER: TracingLogger = TracingLogger::from_static("palisade_faults.conversion");

/// The logger used by the boundary converter when none is given.
#[inline]
pub fn default_logger() -> &'static TracingLogger {
    &DEFAULT_LOGGER
}

/// Truncate a string for display to prevent DoS via extremely long messages.
///
/// If the string exceeds `max_len`, it's truncated on a char boundary with an
/// indicator so the truncation is visible to operators.
pub(crate) fn truncate_with_indicator(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.len() <= max_len {
        return Cow::Borrowed(s);
    }

    let max_content_len = max_len.saturating_sub(TRUNCATION_INDICATOR.len());

    let mut idx = max_content_len;
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }

    if idx == 0 {
        return Cow::Borrowed(TRUNCATION_INDICATOR);
    }

    let mut result = String::with_capacity(idx + TRUNCATION_INDICATOR.len());
    result.push_str(&s[..idx]);
    result.push_str(TRUNCATION_INDICATOR);
    Cow::Owned(result)
}
