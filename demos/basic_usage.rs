use palisade_faults::{
    Fault, FaultKind, MaybeFault, SerializationOptions, definitions, fault,
};

fn read_config(path: &str) -> Result<String, Fault> {
    if path.ends_with(".toml") {
        return Err(Fault::builder(FaultKind::IllegalState)
            .with_message_template("config {path} has a syntax error at line {line}")
            .with_message_template_for_audience(definitions::MSGAUDIENCE_USER, "The service is misconfigured")
            .with_error_codes([definitions::ILLEGALSTATE_CONFIG_ERROR])
            .with_label("path", path)
            .with_label("line", 42)
            .with_source(["config", "read_config"])
            .build());
    }
    Ok(String::new())
}

fn start_service() -> Result<(), Fault> {
    read_config("/etc/orders/service.toml").map_err(|mut f| {
        f.add_caller_to_call_stack(["service", "start"]);
        f.add_context_to_message("startup aborted: ");
        f
    })?;
    Ok(())
}

fn main() {
    println!("--- Basic Usage Example ---\n");

    let Err(err) = start_service() else {
        println!("Service started");
        return;
    };

    println!("1. Display (safe for internal logs):");
    println!("   {err}\n");

    println!("2. Verbose (every field, never send outside):");
    println!("   {:#}\n", err);

    println!("3. Call stack, most recent first:");
    for frame in err.call_stack() {
        println!("   - {frame}");
    }

    println!("\n4. Audience message:");
    println!("   {}", err.message_for_audience(definitions::MSGAUDIENCE_USER));

    println!("\n5. Wire form of a non-public Fault is redacted:");
    let opts = SerializationOptions::new().resolve_messages(true);
    match err.to_natural_json("", &opts) {
        Ok(json) => println!("   {json}"),
        Err(e) => println!("   serialization failed: {e}"),
    }

    println!("\n6. Same Fault serialized on purpose, pretty printed:");
    let opts = opts.allow_non_public_serialization(true).pretty_print(true);
    match err.to_full_json(&opts) {
        Ok(json) => println!("{json}"),
        Err(e) => println!("   serialization failed: {e}"),
    }

    println!("\n7. Macro shorthand and absent Faults:");
    let quick = fault!(FaultKind::Validation, "{field} is required", field = "email");
    println!("   {quick}");
    let nothing: Option<&Fault> = None;
    println!("   absent fault message: {:?}", nothing.message());
}
