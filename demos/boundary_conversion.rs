use palisade_faults::{
    ConversionOptions, Fault, FaultCause, FaultKind, FaultLogger, LogLabel, SerializationOptions,
    definitions, to_public_fault,
};
use std::fmt;
use std::io;
use std::sync::Mutex;

/// Keeps diagnostics in memory so they can be shown at the end.
#[derive(Default)]
struct InsideLog {
    lines: Mutex<Vec<String>>,
}

impl FaultLogger for InsideLog {
    fn name(&self) -> &str {
        "demo.inside"
    }

    fn warn(&self, labels: &[LogLabel], message: fmt::Arguments<'_>) {
        let tx = labels
            .iter()
            .find(|l| l.key() == "transactionId")
            .map_or("-", LogLabel::value);
        let line = format!("[{}] tx={tx} {message}", self.name());
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }
}

fn respond(fault: &Fault) {
    let opts = SerializationOptions::new().resolve_messages(true);
    let body = fault
        .to_natural_json("", &opts)
        .unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"));
    println!(
        "   HTTP {} / RPC {} -> {body}",
        fault.http_status(),
        fault.rpc_status()
    );
}

fn main() {
    println!("--- Boundary Conversion Example ---\n");

    let sink = InsideLog::default();
    let opts = ConversionOptions::new()
        .with_log_labels([LogLabel::new("service", "orders")])
        .whitelisted_kinds(true, [FaultKind::ConstraintViolation, FaultKind::Validation]);

    println!("1. Public Fault passes through unchanged:");
    let public = Fault::public_builder(FaultKind::ResourceNotFound)
        .with_message_template("order {orderId} not found")
        .with_label("orderId", 991)
        .build();
    respond(&public.into_public("tx-100", Some(&sink), &opts));

    println!("\n2. Internal Fault with a user message:");
    let internal = Fault::builder(FaultKind::IllegalState)
        .with_retryable(true)
        .with_message_template("pool {pool} exhausted after {waitMs}ms")
        .with_message_template_for_audience(definitions::MSGAUDIENCE_USER, "Please retry in a moment")
        .with_error_codes([definitions::ILLEGALSTATE_EXHAUSTED])
        .with_labels([("pool", "pg-main"), ("waitMs", "5000")])
        .build();
    respond(&internal.into_public("tx-101", Some(&sink), &opts));

    println!("\n3. Whitelisted kind keeps kind and codes:");
    let conflict = Fault::builder(FaultKind::ConstraintViolation)
        .with_message_template("unique index orders_pk violated by {orderId}")
        .with_message_template_for_audience(definitions::MSGAUDIENCE_USER, "Order {orderId} already exists")
        .with_error_codes([definitions::CONSTRAINTVIOLATION_ALREADY_EXISTS])
        .with_label("orderId", 991)
        .build();
    respond(&conflict.into_public("tx-102", Some(&sink), &opts));

    println!("\n4. Foreign error without transaction id:");
    let foreign = FaultCause::from_error(io::Error::other("connection refused by 10.0.4.2:5432"));
    if let Some(converted) = to_public_fault(Some(foreign), "", Some(&sink), &opts) {
        respond(&converted);
    }

    println!("\n5. What stayed inside:");
    if let Ok(lines) = sink.lines.lock() {
        for line in lines.iter() {
            println!("   {line}");
        }
    }
}
