//! The Fault value and its controlled mutation surface.
//!
//! # Immutability Boundaries
//!
//! A Fault is born through [`FaultBuilder::build`](crate::FaultBuilder::build).
//! Its kind and public flag never change afterwards. Everything else is
//! either read-only or may only grow through the `add_*` operations, which
//! exist so each layer an error bubbles through can enrich it in place
//! instead of wrapping it in yet another error.
//!
//! Accessors that expose a collection (labels, codes, audience templates,
//! call stack) return an owned copy. Nothing handed out by a Fault can be
//! used to change it.
//!
//! # Two Renderings
//!
//! - `Display` is the short, human-readable line. Labels are only included
//!   for public Faults.
//! - [`Fault::verbose`] exposes every field, including the raw templates,
//!   the call stack and the full cause chain. It is meant for internal logs.
//!
//! ```rust
//! use palisade_faults::{Fault, FaultKind, definitions};
//!
//! let mut fault = Fault::builder(FaultKind::IllegalState)
//!     .with_message_template("cache {cache} is cold")
//!     .with_label("cache", "sessions")
//!     .with_error_codes([definitions::ILLEGALSTATE_CONFIG_ERROR])
//!     .with_source(["store", "load"])
//!     .build();
//!
//! fault.add_context_to_message("login failed: ");
//! fault.add_caller_to_call_stack(["api", "login"]);
//!
//! assert_eq!(fault.message(), "login failed: cache sessions is cold");
//! assert_eq!(fault.call_stack(), vec!["api.login", "store.load"]);
//! assert_eq!(fault.origin(), "store.load");
//! assert_eq!(
//!     fault.to_string(),
//!     "illegal_state: login failed: cache sessions is cold (retryable: false, errorCodes: ['config_error'])"
//! );
//! ```

use crate::context::{FaultCause, LabelValue, Labels, write_labels};
use crate::{FaultBuilder, FaultKind, template};
use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt;

/// Structured, data-rich error value.
///
/// See the [module documentation](self) for the mutation rules.
#[derive(Clone, PartialEq)]
#[must_use = "faults should be returned, converted or logged"]
pub struct Fault {
    pub(crate) kind: FaultKind,
    pub(crate) message_template: String,
    pub(crate) message_templates_by_audience: BTreeMap<String, String>,
    pub(crate) retryable: bool,
    pub(crate) error_codes: BTreeSet<String>,
    pub(crate) labels: Labels,
    pub(crate) public: bool,
    pub(crate) cause: Option<FaultCause>,
    /// Oldest first: index 0 is where the Fault was born.
    pub(crate) call_stack: SmallVec<[String; 4]>,
}

impl Fault {
    #[inline]
    pub(crate) fn new(kind: FaultKind, public: bool) -> Self {
        Self {
            kind,
            message_template: String::new(),
            message_templates_by_audience: BTreeMap::new(),
            retryable: false,
            error_codes: BTreeSet::new(),
            labels: Labels::new(),
            public,
            cause: None,
            call_stack: SmallVec::new(),
        }
    }

    /// Start building a non-public Fault.
    #[inline]
    pub fn builder(kind: FaultKind) -> FaultBuilder {
        FaultBuilder::new(kind)
    }

    /// Start building a public Fault.
    #[inline]
    pub fn public_builder(kind: FaultKind) -> FaultBuilder {
        FaultBuilder::new_public(kind)
    }

    // ------------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------------

    /// Classification of this Fault.
    #[inline]
    pub const fn kind(&self) -> FaultKind {
        self.kind
    }

    /// Default message template, unresolved.
    #[inline]
    pub fn message_template(&self) -> &str {
        &self.message_template
    }

    /// Default message with placeholders resolved from the labels.
    pub fn message(&self) -> String {
        template::resolve(&self.message_template, &self.labels)
    }

    /// Template for `audience`, unresolved. Empty if there is none.
    pub fn message_template_for_audience(&self, audience: &str) -> &str {
        self.message_templates_by_audience
            .get(audience)
            .map_or("", String::as_str)
    }

    /// Message for `audience` with placeholders resolved. Empty if there is
    /// no template for that audience.
    pub fn message_for_audience(&self, audience: &str) -> String {
        match self.message_templates_by_audience.get(audience) {
            Some(t) => template::resolve(t, &self.labels),
            None => String::new(),
        }
    }

    /// Copy of all audience templates.
    pub fn message_templates_by_audience(&self) -> BTreeMap<String, String> {
        self.message_templates_by_audience.clone()
    }

    /// Whether this Fault is certified safe to cross a trust boundary.
    #[inline]
    pub const fn is_public(&self) -> bool {
        self.public
    }

    /// Whether retrying the failed operation may succeed.
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        self.retryable
    }

    /// Copy of the error codes, lexically ordered.
    pub fn error_codes(&self) -> Vec<String> {
        self.error_codes.iter().cloned().collect()
    }

    /// True if this Fault carries ANY of `codes`.
    pub fn has_error_code<I, S>(&self, codes: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes
            .into_iter()
            .any(|code| self.error_codes.contains(code.as_ref()))
    }

    /// The wrapped upstream error, if any.
    #[inline]
    pub fn cause(&self) -> Option<&FaultCause> {
        self.cause.as_ref()
    }

    /// Copy of all labels.
    pub fn labels(&self) -> Labels {
        self.labels.clone()
    }

    /// A single label. `None` when not found or `key` is empty.
    pub fn label(&self, key: &str) -> Option<&LabelValue> {
        if key.is_empty() {
            return None;
        }
        self.labels.get(key)
    }

    /// Copy of the call stack, most recent caller first.
    pub fn call_stack(&self) -> Vec<String> {
        self.call_stack.iter().rev().cloned().collect()
    }

    /// Where the Fault was born: the earliest call-stack entry, or empty.
    pub fn origin(&self) -> &str {
        self.call_stack.first().map_or("", String::as_str)
    }

    // ------------------------------------------------------------------------
    // Context enrichment
    // ------------------------------------------------------------------------

    /// Record a caller. Parts are joined with `.`.
    pub fn add_caller_to_call_stack<I, S>(&mut self, parts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.call_stack.push(join_dotted(parts));
    }

    /// Prepend `prefix` verbatim to the default message template.
    ///
    /// This is a plain concatenation; include your own separator.
    pub fn add_context_to_message(&mut self, prefix: &str) {
        if prefix.is_empty() {
            return;
        }
        self.message_template.insert_str(0, prefix);
    }

    /// Prepend `prefix` to the template of `audience`.
    ///
    /// If the audience has no template yet, one is created from `prefix`
    /// with trailing whitespace, `-` and `:` trimmed.
    pub fn add_context_to_audience_message(&mut self, audience: &str, prefix: &str) {
        if audience.is_empty() || prefix.is_empty() {
            return;
        }
        match self.message_templates_by_audience.get_mut(audience) {
            Some(existing) => existing.insert_str(0, prefix),
            None => {
                let trimmed =
                    prefix.trim_end_matches(|c: char| c.is_whitespace() || c == '-' || c == ':');
                self.message_templates_by_audience
                    .insert(audience.to_owned(), trimmed.to_owned());
            }
        }
    }

    /// Add error codes. Empty and duplicate codes are ignored.
    pub fn add_error_codes<I, S>(&mut self, codes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        insert_codes(&mut self.error_codes, codes);
    }

    /// Set a label, overwriting an existing one. Empty keys are ignored.
    pub fn add_label(&mut self, key: impl Into<String>, value: impl Into<LabelValue>) {
        let key = key.into();
        if key.is_empty() {
            return;
        }
        self.labels.insert(key, value.into());
    }

    /// Merge labels, overwriting on key collision. Empty keys are ignored.
    pub fn add_labels<I, K, V>(&mut self, labels: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<LabelValue>,
    {
        for (key, value) in labels {
            self.add_label(key, value);
        }
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Full rendering of every field, recursing into Fault causes.
    ///
    /// Reveals internal details; keep it inside the trust boundary.
    #[inline]
    pub fn verbose(&self) -> Verbose<'_> {
        Verbose(self)
    }
}

pub(crate) fn join_dotted<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for (i, part) in parts.into_iter().enumerate() {
        if i > 0 {
            joined.push('.');
        }
        joined.push_str(part.as_ref());
    }
    joined
}

pub(crate) fn insert_codes<I, S>(set: &mut BTreeSet<String>, codes: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for code in codes {
        let code = code.into();
        if !code.is_empty() {
            set.insert(code);
        }
    }
}

fn write_quoted_list<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = &'a String>,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "'{item}'")?;
    }
    f.write_str("]")
}

impl fmt::Display for Fault {
    /// `{kind}: {message} (retryable: {bool}, errorCodes: [...])`, with
    /// `, labels: {...}` appended inside the parentheses for public Faults.
    ///
    /// The alternate flag (`{:#}`) switches to the verbose rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return fmt::Display::fmt(&self.verbose(), f);
        }
        write!(
            f,
            "{}: {} (retryable: {}, errorCodes: ",
            self.kind,
            self.message(),
            self.retryable
        )?;
        write_quoted_list(f, &self.error_codes)?;
        if self.public {
            f.write_str(", labels: ")?;
            write_labels(f, &self.labels)?;
        }
        f.write_str(")")
    }
}

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fault")
            .field("kind", &self.kind)
            .field("message_template", &self.message_template)
            .field("message_templates_by_audience", &self.message_templates_by_audience)
            .field("retryable", &self.retryable)
            .field("error_codes", &self.error_codes)
            .field("labels", &self.labels)
            .field("public", &self.public)
            .field("cause", &self.cause)
            .field("call_stack", &self.call_stack)
            .finish()
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(FaultCause::as_error)
    }
}

/// Verbose rendering returned by [`Fault::verbose`].
pub struct Verbose<'a>(&'a Fault);

impl fmt::Display for Verbose<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fault = self.0;
        write!(
            f,
            "Fault{{type: '{}', msgTemplate: '{}', retryable: {}, public: {}, codes: ",
            fault.kind, fault.message_template, fault.retryable, fault.public
        )?;
        write_quoted_list(f, &fault.error_codes)?;
        f.write_str(", callStack: ")?;
        write_quoted_list(f, fault.call_stack.iter().rev())?;
        f.write_str(", cause: ")?;
        match &fault.cause {
            None => f.write_str("nil")?,
            Some(FaultCause::Fault(inner)) => write!(f, "{{{}}}", inner.verbose())?,
            Some(FaultCause::Error(err)) => write!(f, "'{err}'")?,
        }
        f.write_str(", audienceMsgs: ")?;
        match serde_json::to_string(&fault.message_templates_by_audience) {
            Ok(rendered) => f.write_str(&rendered)?,
            Err(_) => f.write_str("{}")?,
        }
        f.write_str(", labels: ")?;
        write_labels(f, &fault.labels)?;
        f.write_str("}")
    }
}

// ============================================================================
// Absent-safe access
// ============================================================================

/// Accessors over a possibly absent Fault.
///
/// Every operation degrades to an empty value instead of failing:
///
/// ```rust
/// use palisade_faults::{Fault, MaybeFault};
///
/// let nothing: Option<&Fault> = None;
/// assert_eq!(nothing.message(), "");
/// assert!(!nothing.is_public());
/// assert!(nothing.labels().is_empty());
/// ```
pub trait MaybeFault<'a> {
    /// Kind, if a Fault is present.
    fn kind(&self) -> Option<FaultKind>;
    /// See [`Fault::message_template`].
    fn message_template(&self) -> &'a str;
    /// See [`Fault::message`].
    fn message(&self) -> String;
    /// See [`Fault::message_template_for_audience`].
    fn message_template_for_audience(&self, audience: &str) -> &'a str;
    /// See [`Fault::message_for_audience`].
    fn message_for_audience(&self, audience: &str) -> String;
    /// See [`Fault::message_templates_by_audience`].
    fn message_templates_by_audience(&self) -> BTreeMap<String, String>;
    /// See [`Fault::is_public`].
    fn is_public(&self) -> bool;
    /// See [`Fault::is_retryable`].
    fn is_retryable(&self) -> bool;
    /// See [`Fault::error_codes`].
    fn error_codes(&self) -> Vec<String>;
    /// See [`Fault::has_error_code`].
    fn has_error_code(&self, codes: &[&str]) -> bool;
    /// See [`Fault::cause`].
    fn cause(&self) -> Option<&'a FaultCause>;
    /// See [`Fault::labels`].
    fn labels(&self) -> Labels;
    /// See [`Fault::label`].
    fn label(&self, key: &str) -> Option<&'a LabelValue>;
    /// See [`Fault::call_stack`].
    fn call_stack(&self) -> Vec<String>;
    /// See [`Fault::origin`].
    fn origin(&self) -> &'a str;
}

impl<'a> MaybeFault<'a> for Option<&'a Fault> {
    fn kind(&self) -> Option<FaultKind> {
        self.map(Fault::kind)
    }
    fn message_template(&self) -> &'a str {
        self.map_or("", Fault::message_template)
    }
    fn message(&self) -> String {
        self.map(Fault::message).unwrap_or_default()
    }
    fn message_template_for_audience(&self, audience: &str) -> &'a str {
        self.map_or("", |f| f.message_template_for_audience(audience))
    }
    fn message_for_audience(&self, audience: &str) -> String {
        self.map(|f| f.message_for_audience(audience))
            .unwrap_or_default()
    }
    fn message_templates_by_audience(&self) -> BTreeMap<String, String> {
        self.map(Fault::message_templates_by_audience)
            .unwrap_or_default()
    }
    fn is_public(&self) -> bool {
        self.is_some_and(Fault::is_public)
    }
    fn is_retryable(&self) -> bool {
        self.is_some_and(Fault::is_retryable)
    }
    fn error_codes(&self) -> Vec<String> {
        self.map(Fault::error_codes).unwrap_or_default()
    }
    fn has_error_code(&self, codes: &[&str]) -> bool {
        self.is_some_and(|f| f.has_error_code(codes))
    }
    fn cause(&self) -> Option<&'a FaultCause> {
        self.and_then(Fault::cause)
    }
    fn labels(&self) -> Labels {
        self.map(Fault::labels).unwrap_or_default()
    }
    fn label(&self, key: &str) -> Option<&'a LabelValue> {
        self.and_then(|f| f.label(key))
    }
    fn call_stack(&self) -> Vec<String> {
        self.map(Fault::call_stack).unwrap_or_default()
    }
    fn origin(&self) -> &'a str {
        self.map_or("", Fault::origin)
    }
}

/// Context enrichment over a possibly absent Fault. Absent means no-op.
pub trait MaybeFaultMut {
    /// See [`Fault::add_caller_to_call_stack`].
    fn add_caller_to_call_stack(&mut self, parts: &[&str]);
    /// See [`Fault::add_context_to_message`].
    fn add_context_to_message(&mut self, prefix: &str);
    /// See [`Fault::add_context_to_audience_message`].
    fn add_context_to_audience_message(&mut self, audience: &str, prefix: &str);
    /// See [`Fault::add_error_codes`].
    fn add_error_codes(&mut self, codes: &[&str]);
    /// See [`Fault::add_label`].
    fn add_label(&mut self, key: &str, value: LabelValue);
    /// See [`Fault::add_labels`].
    fn add_labels(&mut self, labels: Labels);
}

impl MaybeFaultMut for Option<&mut Fault> {
    fn add_caller_to_call_stack(&mut self, parts: &[&str]) {
        if let Some(fault) = self.as_deref_mut() {
            fault.add_caller_to_call_stack(parts);
        }
    }
    fn add_context_to_message(&mut self, prefix: &str) {
        if let Some(fault) = self.as_deref_mut() {
            fault.add_context_to_message(prefix);
        }
    }
    fn add_context_to_audience_message(&mut self, audience: &str, prefix: &str) {
        if let Some(fault) = self.as_deref_mut() {
            fault.add_context_to_audience_message(audience, prefix);
        }
    }
    fn add_error_codes(&mut self, codes: &[&str]) {
        if let Some(fault) = self.as_deref_mut() {
            fault.add_error_codes(codes.iter().copied());
        }
    }
    fn add_label(&mut self, key: &str, value: LabelValue) {
        if let Some(fault) = self.as_deref_mut() {
            fault.add_label(key, value);
        }
    }
    fn add_labels(&mut self, labels: Labels) {
        if let Some(fault) = self.as_deref_mut() {
            fault.add_labels(labels);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions;
    use serde_json::json;
    use std::io;

    fn sample() -> Fault {
        Fault::builder(FaultKind::IllegalState)
            .with_message_template("message with var={var1} and unknown {unknown_var}")
            .with_message_template_for_audience(
                definitions::MSGAUDIENCE_USER,
                "user message with var={var1}",
            )
            .with_error_codes([definitions::ILLEGALSTATE_CONFIG_ERROR])
            .with_label("var1", "value1")
            .with_source(["mymodule", "myfunction"])
            .with_cause(io::Error::other("cause error"))
            .build()
    }

    #[test]
    fn resolved_and_raw_messages() {
        let f = sample();
        assert_eq!(
            f.message_template(),
            "message with var={var1} and unknown {unknown_var}"
        );
        assert_eq!(f.message(), "message with var=value1 and unknown {unknown_var}");
        assert_eq!(
            f.message_for_audience(definitions::MSGAUDIENCE_USER),
            "user message with var=value1"
        );
        assert_eq!(f.message_for_audience("not-set"), "");
        assert_eq!(f.message_template_for_audience("not-set"), "");
    }

    #[test]
    fn accessors_return_independent_copies() {
        let f = sample();
        let mut labels = f.labels();
        labels.insert("injected".into(), json!(true));
        labels.remove("var1");
        assert_eq!(f.labels().len(), 1);
        assert!(f.label("var1").is_some());

        let mut codes = f.error_codes();
        codes.push("injected".into());
        assert_eq!(f.error_codes().len(), 1);

        let mut audiences = f.message_templates_by_audience();
        audiences.clear();
        assert_eq!(f.message_templates_by_audience().len(), 1);

        let mut stack = f.call_stack();
        stack.push("injected".into());
        assert_eq!(f.call_stack().len(), 1);
    }

    #[test]
    fn call_stack_is_reported_most_recent_first() {
        let mut f = sample();
        f.add_caller_to_call_stack(["mycallermodule", "mycallerfunction"]);
        assert_eq!(
            f.call_stack(),
            vec!["mycallermodule.mycallerfunction", "mymodule.myfunction"]
        );
        assert_eq!(f.origin(), "mymodule.myfunction");
    }

    #[test]
    fn origin_is_empty_without_call_stack() {
        let f = Fault::builder(FaultKind::Runtime).build();
        assert_eq!(f.origin(), "");
        assert!(f.call_stack().is_empty());
    }

    #[test]
    fn context_prefix_is_not_trimmed() {
        let mut f = sample();
        let before = f.message_template().to_owned();
        f.add_context_to_message("X - ");
        assert_eq!(f.message_template(), format!("X - {before}"));
        f.add_context_to_message("");
        assert_eq!(f.message_template(), format!("X - {before}"));
    }

    #[test]
    fn audience_context_creates_trimmed_template() {
        let mut f = sample();
        f.add_context_to_audience_message("operator", "Storage failed - : \t");
        assert_eq!(f.message_template_for_audience("operator"), "Storage failed");

        f.add_context_to_audience_message(definitions::MSGAUDIENCE_USER, "Sorry - ");
        assert_eq!(
            f.message_template_for_audience(definitions::MSGAUDIENCE_USER),
            "Sorry - user message with var={var1}"
        );
    }

    #[test]
    fn audience_context_ignores_empty_arguments() {
        let mut f = sample();
        f.add_context_to_audience_message("", "prefix");
        f.add_context_to_audience_message("operator", "");
        assert_eq!(f.message_templates_by_audience().len(), 1);
    }

    #[test]
    fn error_codes_deduplicate_and_skip_empty() {
        let mut f = sample();
        f.add_error_codes(["", definitions::ILLEGALSTATE_CONFIG_ERROR, "extra", "extra"]);
        assert_eq!(f.error_codes(), vec!["config_error", "extra"]);
        assert!(f.has_error_code(["nope", "extra"]));
        assert!(!f.has_error_code(["nope"]));
        assert!(!f.has_error_code(Vec::<String>::new()));
    }

    #[test]
    fn labels_merge_and_overwrite() {
        let mut f = sample();
        f.add_label("", "ignored");
        f.add_labels([("var1", json!("changed")), ("n", json!(7))]);
        assert_eq!(f.label("var1"), Some(&json!("changed")));
        assert_eq!(f.label("n"), Some(&json!(7)));
        assert_eq!(f.label(""), None);
        assert_eq!(f.labels().len(), 2);
    }

    #[test]
    fn display_hides_labels_for_non_public() {
        let f = sample();
        assert_eq!(
            f.to_string(),
            "illegal_state: message with var=value1 and unknown {unknown_var} (retryable: false, errorCodes: ['config_error'])"
        );
    }

    #[test]
    fn display_shows_labels_for_public() {
        let f = Fault::public_builder(FaultKind::IllegalState)
            .with_message_template("message with var={var1}")
            .with_retryable(true)
            .with_error_codes(["internal_error"])
            .with_label("var1", "value1")
            .build();
        assert_eq!(
            f.to_string(),
            r#"illegal_state: message with var=value1 (retryable: true, errorCodes: ['internal_error'], labels: {"var1":"value1"})"#
        );
    }

    #[test]
    fn verbose_exposes_every_field() {
        let mut f = sample();
        f.add_caller_to_call_stack(["mycallermodule", "mycallerfunction"]);
        assert_eq!(
            f.verbose().to_string(),
            "Fault{type: 'illegal_state', msgTemplate: 'message with var={var1} and unknown {unknown_var}', \
             retryable: false, public: false, codes: ['config_error'], \
             callStack: ['mycallermodule.mycallerfunction','mymodule.myfunction'], cause: 'cause error', \
             audienceMsgs: {\"user\":\"user message with var={var1}\"}, labels: {\"var1\":\"value1\"}}"
        );
        assert_eq!(format!("{f:#}"), f.verbose().to_string());
    }

    #[test]
    fn verbose_of_empty_fault() {
        let f = Fault::public_builder(FaultKind::Runtime).build();
        assert_eq!(
            f.verbose().to_string(),
            "Fault{type: 'runtime', msgTemplate: '', retryable: false, public: true, codes: [], \
             callStack: [], cause: nil, audienceMsgs: {}, labels: {}}"
        );
    }

    #[test]
    fn verbose_recurses_into_fault_cause() {
        let inner = sample();
        let expected = format!("cause: {{{}}}", inner.verbose());
        let outer = Fault::builder(FaultKind::Runtime).with_cause(inner).build();
        assert!(outer.verbose().to_string().contains(&expected));
    }

    #[test]
    fn error_source_exposes_cause() {
        let f = sample();
        let source = f.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("cause error"));
        assert!(Fault::builder(FaultKind::Runtime).build().source().is_none());
    }

    #[test]
    fn absent_fault_degrades_gracefully() {
        let none: Option<&Fault> = None;
        assert_eq!(none.kind(), None);
        assert_eq!(none.message_template(), "");
        assert_eq!(none.message(), "");
        assert_eq!(none.message_for_audience("user"), "");
        assert!(none.message_templates_by_audience().is_empty());
        assert!(!none.is_public());
        assert!(!none.is_retryable());
        assert!(none.error_codes().is_empty());
        assert!(!none.has_error_code(&["x"]));
        assert!(none.cause().is_none());
        assert!(none.labels().is_empty());
        assert!(none.label("x").is_none());
        assert!(none.call_stack().is_empty());
        assert_eq!(none.origin(), "");

        let mut none_mut: Option<&mut Fault> = None;
        none_mut.add_caller_to_call_stack(&["a"]);
        none_mut.add_context_to_message("x");
        none_mut.add_context_to_audience_message("a", "b");
        none_mut.add_error_codes(&["x"]);
        none_mut.add_label("k", json!(1));
        none_mut.add_labels(Labels::new());
    }

    #[test]
    fn present_fault_through_option_traits() {
        let mut f = sample();
        {
            let mut some = Some(&mut f);
            some.add_error_codes(&["via_option"]);
        }
        let some = Some(&f);
        assert!(some.has_error_code(&["via_option"]));
        assert_eq!(some.kind(), Some(FaultKind::IllegalState));
    }
}
