use gateway_errors::{args, define_error_codes, resolve_coded, seal, Wrapped};
use std::sync::LazyLock;

define_error_codes! {
    USER_NOT_FOUND   = (100, 404, "No such user %v"),
    FIELD_INVALID    = (101, 400, "Invalid %v"),
    UPSTREAM_TIMEOUT = (102, 504, "Upstream %v timed out after %vms"),
}

/// Simulated repository layer.
fn repo_find_user(name: &str) -> Result<(), Wrapped> {
    Err(Wrapped::new(
        "repo",
        USER_NOT_FOUND.with_arg(name.to_string()),
    ))
}

/// Simulated service layer, adding its own context on the way up.
fn service_find_user(name: &str) -> Result<(), Wrapped> {
    repo_find_user(name).map_err(|e| Wrapped::new("service", e))
}

/// Simulated response writer at the process boundary.
fn write_response(err: &(dyn std::error::Error + 'static)) -> (u16, String) {
    match resolve_coded(err) {
        Some(coded) => (coded.status_code(), coded.message().into_owned()),
        None => (500, String::from("internal error")),
    }
}

fn main() {
    // Startup: force the definition table, then close the registry.
    for definition in [&USER_NOT_FOUND, &FIELD_INVALID, &UPSTREAM_TIMEOUT] {
        LazyLock::force(definition);
    }
    seal();

    println!("--- HTTP Boundary Example ---\n");

    // SCENARIO 1: a structured error travels up through two layers.
    let err = service_find_user("ada").unwrap_err();
    println!("1. Internal diagnostic view (full wrap context):");
    println!("   {}", err);

    let (status, message) = write_response(&err);
    println!("\n2. Client response (structure recovered at the boundary):");
    println!("   HTTP {} - {}", status, message);

    // SCENARIO 2: incremental argument binding across layers.
    let timeout = UPSTREAM_TIMEOUT.with_arg("billing").with_args(args![2500]);
    println!("\n3. Incrementally bound definition:");
    println!("   {}", timeout);

    // SCENARIO 3: a plain error falls back to a generic response.
    let plain = std::fmt::Error;
    let (status, message) = write_response(&plain);
    println!("\n4. Plain failure fallback:");
    println!("   HTTP {} - {}", status, message);
}
