use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use gprovider::{FunctionCall, FunctionDeclaration, Schema};
use gtooling::prelude::*;
use serde_json::json;

fn events_declaration() -> FunctionDeclaration {
    FunctionDeclaration::new("getEvents", "List the events on a day").with_parameters(
        Schema::object()
            .with_required_property("year", Schema::integer())
            .with_required_property("month", Schema::integer())
            .with_required_property("day", Schema::integer()),
    )
}

#[tokio::test]
async fn async_handler_receives_coerced_arguments() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    let mut registry = FunctionRegistry::new();
    registry.register_fn(events_declaration(), move |args| {
        let seen = Arc::clone(&seen);
        async move {
            seen.fetch_add(1, Ordering::SeqCst);
            let year = parse_arg::<i32>(&args, "year")?;
            let month = parse_arg::<u32>(&args, "month")?;
            let day = parse_arg::<u32>(&args, "day")?;
            json_output(json!({
                "events": [format!("{year}-{month:02}-{day:02} planning")]
            }))
        }
    });

    let runtime = DefaultFunctionRuntime::new();
    let call = FunctionCall::new("getEvents")
        .with_arg("year", "2024")
        .with_arg("month", "3")
        .with_arg("day", "9");

    let response = runtime
        .execute(&registry, call)
        .await
        .expect("execution should succeed");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(response.name, "getEvents");
    assert_eq!(response.response["events"], json!(["2024-03-09 planning"]));
}

#[tokio::test]
async fn handler_argument_errors_surface_as_invalid_arguments() {
    let mut registry = FunctionRegistry::new();
    registry.register_sync_fn(events_declaration(), |args| {
        let year = parse_arg::<i32>(&args, "year")?;
        json_output(json!({ "year": year }))
    });

    let error = DefaultFunctionRuntime::new()
        .execute(&registry, FunctionCall::new("getEvents").with_arg("year", "soon"))
        .await
        .expect_err("non-numeric year must fail");

    assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
    assert_eq!(error.function_name.as_deref(), Some("getEvents"));
}

#[test]
fn declarations_follow_registration_order() {
    let mut registry = FunctionRegistry::new();
    registry.register_sync_fn(FunctionDeclaration::new("b", "second letter"), |_| {
        json_output(json!({}))
    });
    registry.register_sync_fn(events_declaration(), |_| json_output(json!({})));
    registry.register_sync_fn(FunctionDeclaration::new("a", "first letter"), |_| {
        json_output(json!({}))
    });

    let names = registry
        .declarations()
        .into_iter()
        .map(|declaration| declaration.name)
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["b", "getEvents", "a"]);
}
