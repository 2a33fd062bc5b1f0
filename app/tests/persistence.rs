//! Restart survival.
//!
//! The durable store is written through on every mutation and read exactly
//! once at startup, so a second process over the same directory must see
//! the catalog and session the first one left behind.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can unwrap

use slotbook_app::App;
use slotbook_auth::{AuthAction, Role};
use slotbook_inventory::{EventDraft, EventPatch, InventoryAction};
use slotbook_storage::JsonFileStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("slotbook-app-{}", Uuid::new_v4()))
}

fn draft(name: &str, total_slots: u32) -> EventDraft {
    EventDraft {
        name: name.to_owned(),
        description: "Persisted across restarts".to_owned(),
        date: "2026-12-01".to_owned(),
        primary_image: "https://img.example/persist.jpg".to_owned(),
        gallery: vec!["https://img.example/g1.jpg".to_owned()],
        total_slots,
    }
}

#[tokio::test]
async fn catalog_and_session_survive_a_restart() {
    let dir = scratch_dir();

    // First process: log in, build a catalog, book a slot
    {
        let app = App::new(Arc::new(JsonFileStore::new(&dir)));
        app.hydrate().await.unwrap();

        app.auth
            .send(AuthAction::LoginAdmin {
                email: "admin@example.com".to_owned(),
                password: "demo".to_owned(),
            })
            .await
            .unwrap()
            .wait()
            .await;

        app.inventory
            .send(InventoryAction::CreateEvent {
                draft: draft("Winter Gala", 3),
            })
            .await
            .unwrap()
            .wait()
            .await;

        let id = app
            .inventory
            .state(|s| s.events[0].id)
            .await;

        app.inventory
            .send(InventoryAction::BookSlot {
                correlation_id: Uuid::new_v4(),
                id,
            })
            .await
            .unwrap()
            .wait()
            .await;

        app.shutdown(Duration::from_secs(5)).await.unwrap();
    }

    // Second process over the same directory
    let app = App::new(Arc::new(JsonFileStore::new(&dir)));
    app.hydrate().await.unwrap();

    let events = app.inventory.state(|s| s.events.clone()).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "Winter Gala");
    assert_eq!(events[0].total_slots, 3);
    assert_eq!(events[0].remaining_slots, 2);
    assert_eq!(events[0].gallery, vec!["https://img.example/g1.jpg"]);

    let session = app.auth.state(|s| s.session.clone()).await.unwrap();
    assert_eq!(session.email, "admin@example.com");
    assert_eq!(session.role, Role::Admin);

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn logout_clears_the_persisted_session() {
    let dir = scratch_dir();

    {
        let app = App::new(Arc::new(JsonFileStore::new(&dir)));
        app.auth
            .send(AuthAction::LoginUser {
                email: "user@example.com".to_owned(),
                password: "demo".to_owned(),
            })
            .await
            .unwrap()
            .wait()
            .await;
        app.auth.send(AuthAction::Logout).await.unwrap().wait().await;
        app.shutdown(Duration::from_secs(5)).await.unwrap();
    }

    let app = App::new(Arc::new(JsonFileStore::new(&dir)));
    app.hydrate().await.unwrap();
    assert!(!app.auth.state(slotbook_auth::AuthState::is_authenticated).await);

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn updates_and_deletes_are_written_through() {
    let dir = scratch_dir();

    {
        let app = App::new(Arc::new(JsonFileStore::new(&dir)));

        app.inventory
            .send(InventoryAction::CreateEvent {
                draft: draft("Keeper", 5),
            })
            .await
            .unwrap()
            .wait()
            .await;
        app.inventory
            .send(InventoryAction::CreateEvent {
                draft: draft("Goner", 5),
            })
            .await
            .unwrap()
            .wait()
            .await;

        let (keeper, goner) = app
            .inventory
            .state(|s| (s.events[0].id, s.events[1].id))
            .await;

        app.inventory
            .send(InventoryAction::UpdateEvent {
                id: keeper,
                patch: EventPatch {
                    total_slots: Some(8),
                    ..EventPatch::default()
                },
            })
            .await
            .unwrap()
            .wait()
            .await;
        app.inventory
            .send(InventoryAction::DeleteEvent { id: goner })
            .await
            .unwrap()
            .wait()
            .await;

        app.shutdown(Duration::from_secs(5)).await.unwrap();
    }

    let app = App::new(Arc::new(JsonFileStore::new(&dir)));
    app.hydrate().await.unwrap();

    let events = app.inventory.state(|s| s.events.clone()).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].name, "Keeper");
    assert_eq!(events[0].total_slots, 8);
    assert_eq!(events[0].remaining_slots, 8);

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn empty_directory_hydrates_empty() {
    let dir = scratch_dir();

    let app = App::new(Arc::new(JsonFileStore::new(&dir)));
    app.hydrate().await.unwrap();

    assert_eq!(app.inventory.state(slotbook_inventory::InventoryState::count).await, 0);
    assert!(!app.auth.state(slotbook_auth::AuthState::is_authenticated).await);
}
