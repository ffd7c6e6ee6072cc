//! Tests for the stream translator.

use std::time::Duration;

use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;

use plume::error::PlumeError;
use plume::stream::StreamTranslator;
use plume::types::{AgentUpdate, ContentItem, OutputEvent, ToolStatus};

fn reasoning(text: &str) -> AgentUpdate {
    AgentUpdate::from_content(ContentItem::TextReasoning {
        text: text.to_string(),
    })
}

fn text(text: &str) -> AgentUpdate {
    AgentUpdate::from_content(ContentItem::Text {
        text: text.to_string(),
    })
}

fn function_call(name: &str, call_id: &str) -> AgentUpdate {
    AgentUpdate::from_content(ContentItem::FunctionCall {
        name: Some(name.to_string()),
        call_id: Some(call_id.to_string()),
    })
}

fn function_result(call_id: &str) -> AgentUpdate {
    AgentUpdate::from_content(ContentItem::FunctionResult {
        name: None,
        call_id: Some(call_id.to_string()),
    })
}

async fn collect_events(
    translator: StreamTranslator,
    updates: Vec<Result<AgentUpdate, PlumeError>>,
) -> Vec<Result<OutputEvent, PlumeError>> {
    translator
        .translate(futures::stream::iter(updates).boxed())
        .collect()
        .await
}

#[tokio::test]
async fn output_order_matches_input_order() {
    let events = collect_events(
        StreamTranslator::new(),
        vec![
            Ok(text("a")),
            Ok(function_call("x", "call_1")),
            Ok(text("b")),
        ],
    )
    .await;

    let events: Vec<OutputEvent> = events.into_iter().map(|e| e.unwrap()).collect();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], OutputEvent::Text { text: "a".to_string() });
    match &events[1] {
        OutputEvent::Tool(tool) => {
            assert_eq!(tool.tool, "x");
            assert_eq!(tool.status, ToolStatus::Started);
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(events[2], OutputEvent::Text { text: "b".to_string() });
}

#[tokio::test]
async fn end_to_end_scenario() {
    let events = collect_events(
        StreamTranslator::new(),
        vec![
            Ok(reasoning("Thinking...")),
            Ok(function_call("generate_content", "1")),
            Ok(function_result("1")),
            Ok(text("Here is your post.")),
        ],
    )
    .await;

    let events: Vec<OutputEvent> = events.into_iter().map(|e| e.unwrap()).collect();
    assert_eq!(events.len(), 5);
    assert_eq!(
        events[0],
        OutputEvent::ReasoningReplace { text: "Thinking...".to_string() }
    );
    match (&events[1], &events[2]) {
        (OutputEvent::Tool(started), OutputEvent::Tool(completed)) => {
            assert_eq!(started.tool, "generate_content");
            assert_eq!(started.status, ToolStatus::Started);
            // Anonymous completion resolves the name its start carried.
            assert_eq!(completed.tool, "generate_content");
            assert_eq!(completed.status, ToolStatus::Completed);
        }
        other => panic!("unexpected events: {other:?}"),
    }
    assert_eq!(
        events[3],
        OutputEvent::Text { text: "Here is your post.".to_string() }
    );
    // Terminal flush re-emits the full reasoning text.
    assert_eq!(
        events[4],
        OutputEvent::ReasoningReplace { text: "Thinking...".to_string() }
    );
}

#[tokio::test]
async fn tool_lifecycle_dedups_across_raw_shapes() {
    // The same web search reported via the typed "item added" event, a
    // typed progress event, a dict-shaped fallback, and a typed
    // completion plus a fallback completion.
    let updates = vec![
        Ok(AgentUpdate::from_raw(json!({
            "type": "response.output_item.added",
            "item": {"type": "web_search_call", "id": "ws_1"},
        }))),
        Ok(AgentUpdate::from_raw(json!({
            "type": "response.web_search_call.searching",
            "item_id": "ws_1",
        }))),
        Ok(AgentUpdate::from_raw(json!({
            "type": "web_search_call.progress",
            "id": "ws_1",
        }))),
        Ok(AgentUpdate::from_raw(json!({
            "type": "response.web_search_call.completed",
            "item_id": "ws_1",
        }))),
        Ok(AgentUpdate::from_raw(json!({
            "type": "web_search_call.done",
            "id": "ws_1",
        }))),
    ];

    let events = collect_events(StreamTranslator::new(), updates).await;
    let events: Vec<OutputEvent> = events.into_iter().map(|e| e.unwrap()).collect();

    let statuses: Vec<ToolStatus> = events
        .iter()
        .map(|event| match event {
            OutputEvent::Tool(tool) => {
                assert_eq!(tool.tool, "web_search");
                tool.status
            }
            other => panic!("unexpected event: {other:?}"),
        })
        .collect();
    assert_eq!(statuses, vec![ToolStatus::Started, ToolStatus::Completed]);
}

#[tokio::test]
async fn reasoning_is_throttled_but_always_flushed() {
    let mut updates: Vec<Result<AgentUpdate, PlumeError>> = Vec::new();
    for i in 0..50 {
        updates.push(Ok(reasoning(&format!("w{i} "))));
    }

    let events = collect_events(
        StreamTranslator::with_throttle(Duration::from_secs(60)),
        updates,
    )
    .await;
    let events: Vec<OutputEvent> = events.into_iter().map(|e| e.unwrap()).collect();

    // First fragment emits immediately; the rest are throttled until the
    // terminal flush.
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], OutputEvent::ReasoningReplace { text: "w0 ".to_string() });
    let expected: String = (0..50).map(|i| format!("w{i} ")).collect();
    assert_eq!(events[1], OutputEvent::ReasoningReplace { text: expected });
}

#[tokio::test]
async fn upstream_error_emits_one_event_then_propagates() {
    let events = collect_events(
        StreamTranslator::new(),
        vec![
            Ok(text("partial")),
            Err(PlumeError::Stream("connection reset".to_string())),
            Ok(text("never seen")),
        ],
    )
    .await;

    assert_eq!(events.len(), 3);
    assert_eq!(
        *events[0].as_ref().unwrap(),
        OutputEvent::Text { text: "partial".to_string() }
    );
    match events[1].as_ref().unwrap() {
        OutputEvent::Error { message } => assert!(message.contains("connection reset")),
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(events[2].is_err());
}

#[tokio::test]
async fn no_reasoning_means_no_terminal_flush() {
    let events = collect_events(StreamTranslator::new(), vec![Ok(text("done"))]).await;
    let events: Vec<OutputEvent> = events.into_iter().map(|e| e.unwrap()).collect();
    assert_eq!(events, vec![OutputEvent::Text { text: "done".to_string() }]);
}

#[tokio::test]
async fn channel_fed_stream_preserves_order() {
    let (tx, rx) = tokio::sync::mpsc::channel::<Result<AgentUpdate, PlumeError>>(8);
    let updates = tokio_stream::wrappers::ReceiverStream::new(rx).boxed();
    let mut events = StreamTranslator::new().translate(updates);

    tokio::spawn(async move {
        tx.send(Ok(text("first"))).await.unwrap();
        tx.send(Ok(function_call("web_search", "ws_1"))).await.unwrap();
        tx.send(Ok(text("second"))).await.unwrap();
    });

    let first = events.next().await.unwrap().unwrap();
    assert_eq!(first, OutputEvent::Text { text: "first".to_string() });
    let second = events.next().await.unwrap().unwrap();
    assert!(matches!(second, OutputEvent::Tool(_)));
    let third = events.next().await.unwrap().unwrap();
    assert_eq!(third, OutputEvent::Text { text: "second".to_string() });
    assert!(events.next().await.is_none());
}
