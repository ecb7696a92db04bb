//! Integration tests for transformer dispatch as a host would drive it.

use hyper::StatusCode;
use proptest::prelude::*;
use reshape::transformers::{GreetingTransformer, SelfNamedTransformer, SuffixTransformer};
use reshape::{
    LoggedRequest, Response, ResponseTransformer, ServeEvent, StubMapping, TransformerRegistry,
};
use std::sync::Arc;

fn registry() -> TransformerRegistry {
    let mut registry = TransformerRegistry::new();
    registry
        .register(Arc::new(GreetingTransformer::default()))
        .unwrap();
    registry.register(Arc::new(SelfNamedTransformer)).unwrap();
    registry
        .register(Arc::new(SuffixTransformer::new("stamp", " #")))
        .unwrap();
    registry
}

fn event(path: &str, transformers: &[&str]) -> ServeEvent {
    ServeEvent::new(
        LoggedRequest::new("GET", path),
        StubMapping::with_transformers(transformers.iter().copied()),
    )
}

#[test]
fn test_stub_opting_into_greeting() {
    let input = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain")
        .body("from stub")
        .build();

    let output = registry().dispatch(
        &input,
        &event("/hello", &["MyResponseTransformerExtensionJava"]),
    );

    assert_eq!(
        output.body_text(),
        "Hey from MyResponseTransformerExtensionJava"
    );
    assert_eq!(output.status(), StatusCode::OK);
    assert_eq!(output.headers(), input.headers());
}

#[test]
fn test_stub_without_references_is_untouched() {
    let input = Response::builder().body("plain").build();
    let output = registry().dispatch(&input, &event("/plain", &[]));
    assert_eq!(output, input);
}

#[test]
fn test_chained_transformers() {
    let input = Response::builder().body("ignored").build();
    let output = registry().dispatch(
        &input,
        &event("/chain", &["stamp", "SelfNamedTransformer"]),
    );
    assert_eq!(output.body_text(), "Response from SelfNamedTransformer #");
}

#[test]
fn test_transformed_response_converts_to_hyper() {
    let input = Response::builder()
        .status(StatusCode::SERVICE_UNAVAILABLE)
        .header("Retry-After", "5")
        .build();

    let output = registry()
        .dispatch(&input, &event("/down", &["SelfNamedTransformer"]))
        .into_hyper();

    assert_eq!(output.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(output.headers().get("retry-after").unwrap(), "5");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_dispatch_does_not_cross_contaminate() {
    let registry = Arc::new(registry());

    let mut handles = Vec::new();
    for i in 0..64u16 {
        let registry = Arc::clone(&registry);
        handles.push(tokio::task::spawn_blocking(move || {
            let input = Response::builder()
                .status(StatusCode::from_u16(200 + (i % 5)).unwrap())
                .header("X-Request", &i.to_string())
                .body(format!("request-{i}"))
                .build();
            let output = registry.dispatch(&input, &event(&format!("/r/{i}"), &["stamp"]));
            (i, input, output)
        }));
    }

    for handle in handles {
        let (i, input, output) = handle.await.unwrap();
        assert_eq!(output.body_text(), format!("request-{i} #"));
        assert_eq!(output.status(), input.status());
        assert_eq!(
            output.headers().get("x-request").unwrap(),
            i.to_string().as_str()
        );
    }
}

fn arb_status() -> impl Strategy<Value = StatusCode> {
    (100u16..=599).prop_map(|code| StatusCode::from_u16(code).unwrap())
}

proptest! {
    #[test]
    fn prop_examples_keep_status_and_headers(
        status in arb_status(),
        body in ".{0,64}",
        header_value in "[a-zA-Z0-9]{1,16}",
    ) {
        let input = Response::builder()
            .status(status)
            .header("X-Value", &header_value)
            .body(body)
            .build();
        let event = event("/prop", &[]);

        let transformers: Vec<Box<dyn ResponseTransformer>> = vec![
            Box::new(GreetingTransformer::default()),
            Box::new(SelfNamedTransformer),
            Box::new(SuffixTransformer::new("s", "!")),
        ];

        for transformer in &transformers {
            let output = transformer.transform(&input, &event);
            prop_assert_eq!(output.status(), input.status());
            prop_assert_eq!(output.headers(), input.headers());
            prop_assert!(!output.body().is_empty());
        }
    }

    #[test]
    fn prop_name_and_flag_are_deterministic(name in "[A-Za-z]{1,24}") {
        let transformer = GreetingTransformer::named(name.clone());
        prop_assert_eq!(transformer.name(), name.as_str());
        prop_assert_eq!(transformer.name(), transformer.name());
        prop_assert_eq!(transformer.apply_globally(), transformer.apply_globally());
    }
}
