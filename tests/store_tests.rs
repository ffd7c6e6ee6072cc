//! Tests for the in-memory conversation store.

use std::time::Duration;

use pretty_assertions::assert_eq;

use plume::store::ConversationStore;
use plume::types::ChatMessage;

#[test]
fn save_and_retrieve() {
    let store = ConversationStore::new();
    store.save("conv-1", "First Chat", vec![ChatMessage::user("hi")], None);
    let conversation = store.get("conv-1").unwrap();
    assert_eq!(conversation.id, "conv-1");
    assert_eq!(conversation.title, "First Chat");
    assert_eq!(conversation.messages.len(), 1);
}

#[test]
fn get_nonexistent_returns_none() {
    let store = ConversationStore::new();
    assert!(store.get("does-not-exist").is_none());
}

#[test]
fn update_preserves_created_at() {
    let store = ConversationStore::new();
    store.save("conv-2", "Chat 2", vec![ChatMessage::user("msg1")], None);
    let first = store.get("conv-2").unwrap();

    std::thread::sleep(Duration::from_millis(5));

    store.save(
        "conv-2",
        "Chat 2 Updated",
        vec![ChatMessage::user("msg1"), ChatMessage::assistant("reply")],
        None,
    );
    let updated = store.get("conv-2").unwrap();
    assert_eq!(updated.created_at, first.created_at);
    assert!(updated.updated_at > first.updated_at);
    assert_eq!(updated.title, "Chat 2 Updated");
    assert_eq!(updated.messages.len(), 2);
}

#[test]
fn list_empty_store() {
    let store = ConversationStore::new();
    assert!(store.list(None).is_empty());
}

#[test]
fn list_ordered_by_updated_at_desc() {
    let store = ConversationStore::new();
    store.save("c1", "Old", vec![], None);
    std::thread::sleep(Duration::from_millis(5));
    store.save("c2", "New", vec![], None);

    let listing = store.list(None);
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].id, "c2");
    assert_eq!(listing[1].id, "c1");

    // Touching the older conversation moves it to the front.
    std::thread::sleep(Duration::from_millis(5));
    store.save("c1", "Old", vec![ChatMessage::user("hi")], None);
    let listing = store.list(None);
    assert_eq!(listing[0].id, "c1");
}

#[test]
fn list_filters_by_user() {
    let store = ConversationStore::new();
    store.save("c1", "User A chat", vec![], Some("user-a"));
    store.save("c2", "User B chat", vec![], Some("user-b"));

    let for_a = store.list(Some("user-a"));
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].id, "c1");

    let for_b = store.list(Some("user-b"));
    assert_eq!(for_b.len(), 1);
    assert_eq!(for_b[0].id, "c2");
}

#[test]
fn delete_returns_whether_record_existed() {
    let store = ConversationStore::new();
    store.save("c1", "To Delete", vec![], None);
    assert!(store.delete("c1"));
    assert!(!store.delete("c1"));
    assert!(store.get("c1").is_none());
}

#[test]
fn delete_does_not_affect_others() {
    let store = ConversationStore::new();
    store.save("c1", "Keep", vec![], None);
    store.save("c2", "Delete", vec![], None);
    store.delete("c2");
    assert!(store.get("c1").is_some());
    assert!(store.get("c2").is_none());
}

#[test]
fn record_serializes_camel_case() {
    let store = ConversationStore::new();
    let conversation = store.save("c1", "Title", vec![], None);
    let json = serde_json::to_value(&conversation).unwrap();
    assert!(json.get("createdAt").is_some());
    assert!(json.get("updatedAt").is_some());
    assert!(json.get("created_at").is_none());
}
