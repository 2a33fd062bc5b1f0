//! Slotbook demo binary.
//!
//! Walks the full flow against a JSON-file durable store with simulated
//! latency: hydrate, log in, manage events, book slots until sold out,
//! log out. Run it twice to see the catalog survive a restart.

use anyhow::Context;
use slotbook_app::routes::{self, Route};
use slotbook_app::App;
use slotbook_auth::AuthAction;
use slotbook_inventory::{parse_gallery_input, EventDraft, InventoryAction};
use slotbook_storage::{JsonFileStore, SimulatedLatency};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slotbook=info,slotbook_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Slotbook: event booking demo ===\n");

    let records = SimulatedLatency::new(JsonFileStore::new("slotbook-data"));
    let app = App::new(Arc::new(records));

    // Read at start, never again
    app.hydrate().await.context("hydration failed")?;
    let existing = app.inventory.state(slotbook_inventory::InventoryState::count).await;
    println!("Hydrated {existing} event(s) from slotbook-data/");

    // Route guard before login
    let auth_state = app.auth.state(Clone::clone).await;
    println!(
        "Guard sends us to {} while logged out",
        routes::resolve_fully(Route::Root, &auth_state).path()
    );

    println!("\n>>> Logging in as admin");
    app.auth
        .send(AuthAction::LoginAdmin {
            email: "admin@slotbook.dev".to_owned(),
            password: "demo".to_owned(),
        })
        .await?
        .wait()
        .await;

    let auth_state = app.auth.state(Clone::clone).await;
    println!(
        "Guard now allows {}",
        routes::resolve_fully(Route::Admin, &auth_state).path()
    );

    println!("\n>>> Creating an event with 2 slots");
    app.inventory
        .send(InventoryAction::CreateEvent {
            draft: EventDraft {
                name: "Rust Belt Conf".to_owned(),
                description: "Two days of systems talks".to_owned(),
                date: "2026-10-03".to_owned(),
                primary_image: "https://img.example/conf.jpg".to_owned(),
                gallery: parse_gallery_input("https://img.example/a.jpg, https://img.example/b.jpg"),
                total_slots: 2,
            },
        })
        .await?
        .wait()
        .await;

    let event = app
        .inventory
        .state(|s| s.events.last().cloned())
        .await
        .context("event was not created")?;
    println!(
        "Created \"{}\" ({}/{} slots free)",
        event.name, event.remaining_slots, event.total_slots
    );

    // Book until sold out, then once more
    for attempt in 1..=3 {
        println!("\n>>> Booking attempt {attempt}");
        let correlation_id = Uuid::new_v4();
        let outcome = app
            .inventory
            .send_and_wait_for(
                InventoryAction::BookSlot {
                    correlation_id,
                    id: event.id,
                },
                |action| {
                    matches!(
                        action,
                        InventoryAction::SlotBooked { correlation_id: c, .. }
                        | InventoryAction::BookingRejected { correlation_id: c, .. }
                        if *c == correlation_id
                    )
                },
                Duration::from_secs(10),
            )
            .await?;

        match outcome {
            InventoryAction::SlotBooked {
                remaining_slots, ..
            } => println!("Booked! {remaining_slots} slot(s) left"),
            InventoryAction::BookingRejected { error, .. } => println!("{error}"),
            _ => {},
        }
    }

    println!("\n>>> Logging out");
    app.auth.send(AuthAction::Logout).await?.wait().await;

    app.shutdown(Duration::from_secs(10))
        .await
        .context("shutdown failed")?;

    println!("\n=== Demo complete, state persisted under slotbook-data/ ===");
    Ok(())
}
