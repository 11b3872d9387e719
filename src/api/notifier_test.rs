//! Tests for ChangeNotifier pub/sub system.

use super::notifier::ChangeNotifier;
use crate::content::{ChangeEvent, ChangeKind, CollectionKind};

#[tokio::test]
async fn test_multiple_subscribers_receive_same_message() {
    let notifier = ChangeNotifier::new();
    let mut sub1 = notifier.subscribe();
    let mut sub2 = notifier.subscribe();

    let event = ChangeEvent::new(CollectionKind::Projects, ChangeKind::Created, "p1");
    notifier.notify(event.clone());

    assert_eq!(sub1.recv().await.unwrap(), event);
    assert_eq!(sub2.recv().await.unwrap(), event);
}

#[tokio::test]
async fn test_notify_with_no_subscribers_does_not_panic() {
    let notifier = ChangeNotifier::new();
    notifier.notify(ChangeEvent::batch(
        CollectionKind::Techstack,
        ChangeKind::Updated,
    ));
}

#[tokio::test]
async fn test_subscriber_receives_messages_in_order() {
    let notifier = ChangeNotifier::new();
    let mut sub = notifier.subscribe();

    let events = [
        ChangeEvent::new(CollectionKind::Blogs, ChangeKind::Created, "b1"),
        ChangeEvent::new(CollectionKind::Blogs, ChangeKind::Updated, "b1"),
        ChangeEvent::new(CollectionKind::Blogs, ChangeKind::Deleted, "b1"),
    ];
    for event in &events {
        notifier.notify(event.clone());
    }

    for event in &events {
        assert_eq!(&sub.recv().await.unwrap(), event);
    }
}

#[tokio::test]
async fn test_late_subscriber_does_not_receive_old_messages() {
    let notifier = ChangeNotifier::new();
    notifier.notify(ChangeEvent::new(
        CollectionKind::Projects,
        ChangeKind::Created,
        "old",
    ));

    let mut sub = notifier.subscribe();
    let fresh = ChangeEvent::new(CollectionKind::Projects, ChangeKind::Updated, "new");
    notifier.notify(fresh.clone());

    assert_eq!(sub.recv().await.unwrap(), fresh);
    assert!(sub.try_recv().is_err());
}

#[tokio::test]
async fn test_lagging_subscriber_skips_backlog() {
    let notifier = ChangeNotifier::new();
    let mut sub = notifier.subscribe();

    for i in 0..150 {
        notifier.notify(ChangeEvent::new(
            CollectionKind::Techstack,
            ChangeKind::Created,
            format!("t{}", i),
        ));
    }

    let skipped = match sub.recv().await {
        Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => n,
        other => panic!("expected lag, got {:?}", other),
    };
    let next = sub.recv().await.unwrap();
    assert_eq!(next.id, Some(format!("t{}", skipped)));
}

#[test]
fn test_event_wire_format() {
    let event = ChangeEvent::new(CollectionKind::Techstack, ChangeKind::Deleted, "Rust");
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "collection": "techstack", "change": "deleted", "id": "Rust" })
    );

    let batch = serde_json::to_value(ChangeEvent::batch(
        CollectionKind::Techstack,
        ChangeKind::Updated,
    ))
    .unwrap();
    assert!(batch.get("id").is_none());
}
