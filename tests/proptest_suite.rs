//! Property-based tests for palisade_faults
//!
//! These tests use proptest to generate random inputs and verify invariants hold.

use palisade_faults::{
    ConversionOptions, Fault, FaultCause, FaultKind, FaultLogger, Labels, LogLabel,
    SerializationOptions, definitions, template, to_public_fault,
};
use proptest::prelude::*;
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts warnings, keeps nothing.
#[derive(Default)]
struct CountingLogger(AtomicUsize);

impl CountingLogger {
    fn count(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

impl FaultLogger for CountingLogger {
    fn name(&self) -> &str {
        "counting"
    }

    fn warn(&self, _labels: &[LogLabel], _message: fmt::Arguments<'_>) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

fn any_kind() -> impl Strategy<Value = FaultKind> {
    prop::sample::select(FaultKind::ALL.to_vec())
}

fn label_map() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z]{1,8}", "\\PC{0,16}"), 0..6)
}

fn build(kind: FaultKind, public: bool, template: &str, labels: &[(String, String)]) -> Fault {
    let builder = if public {
        Fault::public_builder(kind)
    } else {
        Fault::builder(kind)
    };
    builder
        .with_message_template(template)
        .with_labels(labels.iter().map(|(k, v)| (k.clone(), Value::from(v.as_str()))))
        .build()
}

// ============================================================================
// TEMPLATE PROPERTIES
// ============================================================================

proptest! {
    /// Resolution never panics and is deterministic
    #[test]
    fn resolve_is_deterministic(t in "\\PC{0,200}", labels in label_map()) {
        let labels: Labels = labels.into_iter().map(|(k, v)| (k, json!(v))).collect();
        prop_assert_eq!(template::resolve(&t, &labels), template::resolve(&t, &labels));
    }

    /// Unknown placeholders survive verbatim
    #[test]
    fn unknown_placeholders_survive(name in "[a-z]{1,10}", prefix in "[^{}]{0,20}") {
        let t = format!("{prefix}{{{name}}}");
        prop_assert_eq!(template::resolve(&t, &Labels::new()), t.clone());
        let mut other = Labels::new();
        other.insert(format!("{name}_other"), json!("x"));
        prop_assert_eq!(template::resolve(&t, &other), t);
    }

    /// Every extracted name is a real `{name}` token of the template
    #[test]
    fn extracted_names_are_tokens(t in "[a-z{} ]{0,60}") {
        for name in template::extract_variable_names(&t) {
            let token = format!("{{{name}}}");
            prop_assert!(t.contains(&token));
            let brace_free = !name.contains(['{', '}']);
            prop_assert!(brace_free, "name {:?} contains a brace", name);
        }
    }

    /// A resolved known placeholder is gone from the output
    #[test]
    fn known_placeholders_resolve(name in "[a-z]{1,10}", value in "[A-Z0-9]{0,10}") {
        let mut labels = Labels::new();
        labels.insert(name.clone(), json!(value.clone()));
        prop_assert_eq!(template::resolve(&format!("<{{{name}}}>"), &labels), format!("<{value}>"));
    }
}

// ============================================================================
// COPY SEMANTICS
// ============================================================================

proptest! {
    /// Accessors hand out independent copies
    #[test]
    fn label_copies_are_independent(kind in any_kind(), labels in label_map()) {
        let fault = build(kind, false, "", &labels);
        let before = fault.labels();
        let mut copy = fault.labels();
        copy.insert("__injected".into(), json!(1));
        copy.clear();
        prop_assert_eq!(fault.labels(), before);

        let mut codes = fault.error_codes();
        codes.push("__injected".into());
        prop_assert!(!fault.has_error_code(["__injected"]));
    }

    /// Two builds from one builder never share storage
    #[test]
    fn builds_do_not_share_storage(kind in any_kind(), labels in label_map(), extra in "[a-z]{1,8}") {
        let builder = Fault::builder(kind).with_labels(
            labels.iter().map(|(k, v)| (k.clone(), Value::from(v.as_str()))),
        );
        let mut one = builder.build();
        let two = builder.build();
        let two_before = two.clone();

        one.add_label(format!("{extra}_new"), 1);
        one.add_error_codes([extra.clone()]);
        one.add_context_to_message(&extra);
        prop_assert_eq!(two, two_before);
    }

    /// Retry is pinned for permanent kinds whatever is requested
    #[test]
    fn retry_pinned(kind in any_kind(), requested in any::<bool>()) {
        let fault = Fault::builder(kind).with_retryable(requested).build();
        if kind.allows_retry() {
            prop_assert_eq!(fault.is_retryable(), requested);
        } else {
            prop_assert!(!fault.is_retryable());
        }
    }
}

// ============================================================================
// SERIALIZATION PROPERTIES
// ============================================================================

proptest! {
    /// Non-public Faults serialize to the redacted shape
    #[test]
    fn non_public_is_redacted(
        kind in any_kind(),
        retry in any::<bool>(),
        t in "\\PC{0,40}",
        labels in label_map(),
        resolve in any::<bool>(),
    ) {
        let fault = Fault::builder(kind)
            .with_retryable(retry)
            .with_message_template(t)
            .with_error_codes([definitions::ILLEGALSTATE_CODE_BUG])
            .with_labels(labels.iter().map(|(k, v)| (k.clone(), Value::from(v.as_str()))))
            .build();
        let opts = SerializationOptions::new().resolve_messages(resolve);
        let parsed: Value = serde_json::from_str(&fault.to_natural_json("", &opts).unwrap()).unwrap();
        prop_assert_eq!(
            parsed,
            json!({
                "kind": "runtime",
                "message": "",
                "isRetryable": fault.is_retryable(),
                "errorCodes": [],
                "labels": {}
            })
        );
    }

    /// Serialization never changes the Fault
    #[test]
    fn serialization_is_pure(
        kind in any_kind(),
        public in any::<bool>(),
        t in "[a-z{} ]{0,40}",
        labels in label_map(),
        flags in any::<[bool; 4]>(),
    ) {
        let fault = build(kind, public, &t, &labels);
        let before = fault.clone();
        let opts = SerializationOptions {
            resolve_messages: flags[0],
            leave_message_vars_in_labels: flags[1],
            pretty_print: flags[2],
            allow_non_public_serialization: flags[3],
        };
        let _ = fault.to_natural_json("", &opts).unwrap();
        let _ = fault.to_full_json(&opts).unwrap();
        prop_assert_eq!(fault, before);
    }

    /// Pruned labels are exactly the resolved placeholder names
    #[test]
    fn pruning_removes_only_placeholders(labels in label_map(), used in prop::collection::vec("[a-z]{1,8}", 0..4)) {
        let t: String = used.iter().map(|n| format!("{{{n}}} ")).collect();
        let fault = build(FaultKind::Runtime, true, &t, &labels);
        let out = palisade_faults::natural_form(
            Some(&fault),
            "",
            &SerializationOptions::new().resolve_messages(true),
        );
        for key in fault.labels().keys() {
            prop_assert_eq!(out.labels.contains_key(key), !used.contains(key));
        }
    }
}

// ============================================================================
// STATUS AND CONVERSION PROPERTIES
// ============================================================================

proptest! {
    /// Non-public Faults always map to a generic server error
    #[test]
    fn non_public_status_is_internal(kind in any_kind(), code in "[a-z_]{0,20}") {
        let fault = Fault::builder(kind).with_error_codes([code]).build();
        prop_assert_eq!(fault.http_status(), 500);
        prop_assert_eq!(fault.rpc_status(), palisade_faults::RpcCode::Internal);
    }

    /// Converted Faults are public and leak no unreferenced label
    #[test]
    fn conversion_drops_unreferenced_labels(
        kind in any_kind(),
        labels in label_map(),
        tx in "[a-z0-9-]{0,12}",
    ) {
        let fault = build(kind, false, "{secret}", &labels);
        let sink = CountingLogger::default();
        let public = fault.into_public(&tx, Some(&sink), &ConversionOptions::new());

        prop_assert!(public.is_public());
        prop_assert_eq!(public.kind(), FaultKind::Runtime);
        let keys: Vec<String> = public.labels().into_keys().collect();
        if tx.is_empty() {
            prop_assert!(keys.is_empty());
        } else {
            prop_assert_eq!(keys, vec!["transactionId".to_owned()]);
        }
        prop_assert_eq!(sink.count(), 1);
    }

    /// Conversion of a public Fault hands back the very same instance
    #[test]
    fn conversion_of_public_is_identity(kind in any_kind(), labels in label_map()) {
        let fault = Arc::new(build(kind, true, "{a}", &labels));
        let sink = CountingLogger::default();
        let opts = ConversionOptions::new().with_log_labels([LogLabel::new("k", "v")]);

        let out = to_public_fault(Some(FaultCause::from(Arc::clone(&fault))), "tx", Some(&sink), &opts);
        prop_assert!(out.is_some_and(|out| Arc::ptr_eq(&out, &fault)));

        let owned = (*fault).clone();
        prop_assert_eq!(owned.into_public("tx", Some(&sink), &opts), (*fault).clone());
        prop_assert_eq!(sink.count(), 0);
    }
}
