//! Tests for running pipelines across tasks and threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use propgate::{
    Document, DocumentSchema, DocumentValidator, HandlerRegistry, PropertyContext, PropertyError,
    PropertyPath, PropertySchema, TypeHandler, Validated, ValidationFault, ValidationSession,
};
use serde_json::{json, Value};

/// A handler that yields to the runtime and tracks peak concurrency.
#[derive(Clone, Default)]
struct SlowHandler {
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    finished: Arc<AtomicUsize>,
}

#[async_trait]
impl TypeHandler for SlowHandler {
    fn type_name(&self) -> &str {
        "slow"
    }

    async fn validate(&self, ctx: &PropertyContext) -> Result<Value, PropertyError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(10)).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(ctx.value().clone())
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_contexts_validate_on_spawned_tasks() {
    let session = Arc::new(ValidationSession::new(
        HandlerRegistry::with_builtin_handlers(),
    ));
    let schema = Arc::new(PropertySchema::new("number").min_value(0));
    let document = Document::new(json!({}));

    let mut handles = vec![];
    for i in 0..32 {
        let ctx = PropertyContext::new(
            document.clone(),
            json!(i - 16),
            PropertyPath::new(format!("n{}", i)),
            Arc::clone(&schema),
            Arc::new(DocumentSchema::new()),
            false,
            session.clone(),
        );
        handles.push(tokio::spawn(ctx.validate()));
    }

    let mut accepted = 0;
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        if outcome.is_success() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shared_registry_across_tasks() {
    let registry = HandlerRegistry::with_builtin_handlers();
    let schema = DocumentSchema::new()
        .property("name", PropertySchema::new("string").min_size(1))
        .property("active", PropertySchema::new("boolean"));
    let validator = Arc::new(DocumentValidator::new(
        schema,
        Arc::new(ValidationSession::new(registry.clone())),
    ));

    let mut handles = vec![];
    for i in 0..10 {
        let validator = Arc::clone(&validator);
        handles.push(tokio::spawn(async move {
            let input = json!({"name": format!("user{}", i), "active": "TRUE"});
            validator.validate(&input).await
        }));
    }

    for handle in handles {
        let output = handle.await.unwrap().unwrap().into_result().unwrap();
        assert_eq!(output["active"], json!(true));
    }
    assert_eq!(registry.type_names().len(), 4);
}

#[tokio::test]
async fn test_concurrency_limit_is_respected() {
    let slow = SlowHandler::default();
    let registry = HandlerRegistry::new();
    registry.register(slow.clone()).unwrap();

    let mut schema = DocumentSchema::new();
    let mut input = serde_json::Map::new();
    for i in 0..12 {
        schema = schema.property(format!("p{}", i), PropertySchema::new("slow"));
        input.insert(format!("p{}", i), json!(i));
    }

    let validator = DocumentValidator::new(schema, Arc::new(ValidationSession::new(registry)))
        .with_concurrency(3);
    let output = validator
        .validate(&Value::Object(input))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    assert_eq!(output.len(), 12);
    assert!(slow.peak.load(Ordering::SeqCst) <= 3);
    assert!(slow.peak.load(Ordering::SeqCst) > 1);
}

#[tokio::test]
async fn test_fault_drops_pipelines_in_flight() {
    let slow = SlowHandler::default();
    let registry = HandlerRegistry::new();
    registry.register(slow.clone()).unwrap();

    let schema = DocumentSchema::new()
        .property("broken", PropertySchema::new("nope"))
        .property("a", PropertySchema::new("slow"))
        .property("b", PropertySchema::new("slow"));
    let validator = DocumentValidator::new(schema, Arc::new(ValidationSession::new(registry)));

    let fault = validator
        .validate(&json!({"broken": 1, "a": 2, "b": 3}))
        .await
        .unwrap_err();
    assert!(matches!(fault, ValidationFault::HandlerNotFound { .. }));

    // Sibling pipelines are dropped, not awaited
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(slow.finished.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_writes_to_shared_document_are_visible() {
    let document = Document::new(json!({}));
    let schema = Arc::new(PropertySchema::new("string").after_with(|ctx| {
        ctx.document().set("seen", ctx.value().clone());
        Ok(ctx.value().clone())
    }));

    let ctx = PropertyContext::new(
        document.clone(),
        json!("hello"),
        PropertyPath::new("greeting"),
        schema,
        Arc::new(DocumentSchema::new()),
        false,
        Arc::new(ValidationSession::new(
            HandlerRegistry::with_builtin_handlers(),
        )),
    );

    let outcome = ctx.validate().await.unwrap().into_result().unwrap();

    assert_eq!(outcome, Validated::Value(json!("hello")));
    assert_eq!(document.get("seen"), Some(json!("hello")));
}
