// crux-client/tests/booking_desk.rs
// Booking desk and admin calls against the mock backend

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use common::{Backend, MockServer, ctx};
use crux_client::{BookingDesk, ClientError};
use shared::booking::{BookingCommand, BookingForm, SlotContact};
use shared::error::ErrorCode;
use shared::models::{
    AvailabilityQuery, AvailabilitySlot, Booking, BookingStatus, MenuItem, Role, SessionContext, Store,
    StoreRoleAssignment, User,
};

fn ny_ctx() -> SessionContext {
    ctx().with_store_role(StoreRoleAssignment {
        store_name: Some("downtown".into()),
        timezone: Some("America/New_York".into()),
        ..Default::default()
    })
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn slot(start: &str, available: bool) -> AvailabilitySlot {
    AvailabilitySlot {
        start: start.into(),
        minutes: Some(90),
        available_seats: if available { 4 } else { 0 },
        is_available: available,
    }
}

fn booking(id: &str, status: BookingStatus) -> Booking {
    Booking {
        id: Some(id.into()),
        customer_name: "Grace".into(),
        customer_phone_number: "5551234567".into(),
        guests_count: 2,
        start_time: Utc.with_ymd_and_hms(2025, 6, 2, 17, 0, 0).unwrap(),
        end_time: Utc.with_ymd_and_hms(2025, 6, 2, 18, 0, 0).unwrap(),
        status,
        notes: String::new(),
        org_name: "acme".into(),
        store_name: "downtown".into(),
        created_by: String::new(),
        updated_by: String::new(),
        created_at: None,
        updated_at: None,
    }
}

#[tokio::test]
async fn test_availability_keeps_first_five_available() {
    let slots = (0..8)
        .map(|i| slot(&format!("2025-06-02T{:02}:00:00Z", 14 + i), i % 3 != 2))
        .collect::<Vec<_>>();
    let server = MockServer::start(Backend {
        slots,
        ..Default::default()
    })
    .await;
    let desk = BookingDesk::new(server.api(), ny_ctx()).unwrap();

    let found = desk
        .check_availability(&AvailabilityQuery::new("2025-06-02", 4))
        .await
        .unwrap();
    assert_eq!(found.len(), 5);
    assert!(found.iter().all(|s| s.is_available));
    assert_eq!(found[0].start, "2025-06-02T14:00:00Z");
    assert_eq!(found[2].start, "2025-06-02T17:00:00Z");
    assert_eq!(desk.slots(), found);

    let request = &server.requests()[0];
    assert_eq!(request.path, "/api/booking/availability");
    assert_eq!(request.query["date"], "2025-06-02");
    assert_eq!(request.query["partySize"], "4");
    assert_eq!(request.query["storeName"], "downtown");
    assert_eq!(request.query["orgName"], "acme");
}

#[tokio::test]
async fn test_invalid_query_is_not_sent() {
    let server = MockServer::start(Backend::default()).await;
    let desk = BookingDesk::new(server.api(), ny_ctx()).unwrap();

    let err = desk
        .check_availability(&AvailabilityQuery::new("06/02/2025", 0))
        .await
        .unwrap_err();
    let fields = err.field_errors().unwrap();
    assert!(fields.contains("date"));
    assert!(fields.contains("partySize"));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_slot_pick_drafts_then_submit_creates_once() {
    let server = MockServer::start(Backend::default()).await;
    let desk = BookingDesk::new(server.api(), ny_ctx()).unwrap();
    let contact = SlotContact {
        customer_name: "Grace".into(),
        customer_phone_number: "+1 555 123 4567".into(),
        party_size: 3,
        notes: "window".into(),
    };

    let form = desk
        .pick_slot(&slot("2025-06-02T22:00:00Z", true), &contact, now())
        .unwrap();
    assert_eq!(form.start_time, "2025-06-02T18:00");
    assert_eq!(form.end_time, "2025-06-02T19:30");
    assert_eq!(form.guests_count, 3);
    // picking alone sends nothing
    assert!(server.requests().is_empty());

    desk.submit(form, now()).await.unwrap();

    let writes = server.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].path, "/api/booking/create");
    assert_eq!(writes[0].body["startTime"], "2025-06-02T22:00:00.000Z");
    assert_eq!(writes[0].body["endTime"], "2025-06-02T23:30:00.000Z");
    assert_eq!(writes[0].body["status"], "booked");
    assert_eq!(writes[0].body["createdBy"], "ada@example.com");
    assert_eq!(writes[0].body["storeName"], "downtown");

    // refreshed after the create
    assert_eq!(desk.bookings().len(), 1);
}

#[tokio::test]
async fn test_past_slot_and_range_are_refused() {
    let server = MockServer::start(Backend::default()).await;
    let desk = BookingDesk::new(server.api(), ny_ctx()).unwrap();

    let err = desk
        .pick_slot(&slot("2025-06-01T11:59:59Z", true), &SlotContact::default(), now())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::BookingInPast);

    let err = desk
        .pick_slot(&slot("2025-06-02T22:00:00Z", false), &SlotContact::default(), now())
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::SlotUnavailable);

    let start = Utc.with_ymd_and_hms(2025, 6, 1, 11, 0, 0).unwrap();
    assert!(desk.select_range(start, now(), now()).is_none());
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 13, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 6, 1, 14, 0, 0).unwrap();
    let draft = desk.select_range(start, end, now()).unwrap();
    assert_eq!(draft.start_time, "2025-06-01T09:00");
}

#[tokio::test]
async fn test_form_errors_block_submit() {
    let server = MockServer::start(Backend::default()).await;
    let desk = BookingDesk::new(server.api(), ny_ctx()).unwrap();

    let form = BookingForm {
        customer_name: String::new(),
        customer_phone_number: "5551234567".into(),
        guests_count: 2,
        start_time: "2025-06-02T18:00".into(),
        end_time: "2025-06-02T19:00".into(),
        ..Default::default()
    };
    let err = desk.submit(form.clone(), now()).await.unwrap_err();
    let fields = err.field_errors().unwrap();
    assert_eq!(fields.len(), 1);
    assert!(fields.contains("customerName"));

    let past = BookingForm {
        customer_name: "Grace".into(),
        start_time: "2025-06-01T07:00".into(),
        end_time: "2025-06-01T08:00".into(),
        ..form
    };
    let err = desk.submit(past, now()).await.unwrap_err();
    assert!(err.field_errors().unwrap().contains("startTime"));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_booking_actions_follow_lifecycle() {
    let server = MockServer::start(Backend {
        bookings: vec![booking("b-1", BookingStatus::Booked), booking("b-2", BookingStatus::Completed)],
        ..Default::default()
    })
    .await;
    let desk = BookingDesk::new(server.api(), ny_ctx()).unwrap();
    desk.refresh().await.unwrap();

    desk.act("b-1", BookingCommand::Seat).await.unwrap();
    let writes = server.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].path, "/api/booking/b-1/seat");
    assert_eq!(writes[0].body["updatedBy"], "ada@example.com");
    assert_eq!(desk.bookings()[0].status, BookingStatus::Seated);

    let err = desk.act("b-2", BookingCommand::Cancel).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidBookingTransition);
    let err = desk.act("b-9", BookingCommand::Seat).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::BookingNotFound);
    assert_eq!(server.writes().len(), 1);
}

#[tokio::test]
async fn test_unknown_store_zone_is_refused() {
    let server = MockServer::start(Backend::default()).await;
    let ctx = ctx().with_store_role(StoreRoleAssignment {
        store_name: Some("downtown".into()),
        timezone: Some("Mars/Olympus".into()),
        ..Default::default()
    });
    match BookingDesk::new(server.api(), ctx) {
        Err(err) => assert_eq!(err.code(), ErrorCode::UnknownTimezone),
        Ok(_) => panic!("zone should be rejected"),
    }
}

#[tokio::test]
async fn test_closed_desk_discards_late_bookings() {
    let server = MockServer::start(Backend {
        bookings: vec![booking("b-1", BookingStatus::Booked)],
        delay: Some(std::time::Duration::from_millis(200)),
        ..Default::default()
    })
    .await;
    let desk = std::sync::Arc::new(BookingDesk::new(server.api(), ny_ctx()).unwrap());

    let pending = {
        let desk = desk.clone();
        tokio::spawn(async move { desk.refresh().await })
    };
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    desk.close();

    assert!(matches!(pending.await.unwrap(), Err(ClientError::Closed)));
    assert!(desk.bookings().is_empty());
}

#[tokio::test]
async fn test_menu_and_user_calls() {
    let server = MockServer::start(Backend::default()).await;
    let api = server.api();
    let admin = ctx().with_permission("org_admin");

    api.list_menu_items(&admin).await.ok();
    let request = &server.requests()[0];
    assert_eq!(request.path, "/api/menu-items");
    assert_eq!(request.query["storeName"], "");

    api.delete_menu_item(&admin, "Green Tea", "downtown").await.unwrap();
    let request = server.requests().pop().unwrap();
    assert_eq!(request.path, "/api/menu-items/delete/Green%20Tea");
    assert_eq!(request.query["storeName"], "downtown");

    let free = MenuItem {
        item_name: "Water".into(),
        item_price: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        api.create_menu_item(&admin, free).await,
        Err(ClientError::Validation(_))
    ));

    let user = User {
        email_id: "bob@example.com".into(),
        first_name: "Bob".into(),
        password: "s3cret".into(),
        ..Default::default()
    };
    api.create_user(&admin, user).await.unwrap();
    let request = server.requests().pop().unwrap();
    assert_eq!(request.path, "/api/user/create");
    assert_eq!(request.query["orgName"], "acme");
    assert_eq!(request.body["userId"], "bob@example.com");
    assert_eq!(request.body["createdBy"], "ada@example.com");

    let staff = ctx();
    let err = api
        .create_user(
            &staff,
            User {
                email_id: "eve@example.com".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::PermissionDenied);

    let switched = api.switch_current_store(&staff, "airport").await.unwrap();
    assert_eq!(switched.current_store, "airport");
    let request = server.requests().pop().unwrap();
    assert_eq!(request.path, "/api/user/currentstore/update");
    assert_eq!(
        request.body,
        json!({ "userId": "ada@example.com", "orgName": "acme", "storeName": "airport" })
    );
}

#[tokio::test]
async fn test_edit_keeps_status_and_stamps_identity() {
    let server = MockServer::start(Backend {
        bookings: vec![booking("b-1", BookingStatus::Booked)],
        ..Default::default()
    })
    .await;
    let desk = BookingDesk::new(server.api(), ny_ctx()).unwrap();
    desk.refresh().await.unwrap();

    let form = BookingForm {
        guests_count: 5,
        status: BookingStatus::Cancelled,
        ..BookingForm::from_booking(&desk.bookings()[0], desk.timezone())
    };
    desk.edit("b-1", form).await.unwrap();

    let writes = server.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].path, "/api/booking/update");
    assert_eq!(writes[0].body["id"], "b-1");
    assert_eq!(writes[0].body["guestsCount"], 5);
    assert_eq!(writes[0].body["status"], "booked");
    assert_eq!(writes[0].body["startTime"], "2025-06-02T17:00:00.000Z");
    assert_eq!(writes[0].body["updatedBy"], "ada@example.com");
    assert_eq!(writes[0].body["storeName"], "downtown");

    let bookings = desk.bookings();
    assert_eq!(bookings[0].guests_count, 5);
    assert_eq!(bookings[0].status, BookingStatus::Booked);
}

#[tokio::test]
async fn test_finished_booking_cannot_be_edited() {
    let server = MockServer::start(Backend {
        bookings: vec![booking("b-2", BookingStatus::Completed)],
        ..Default::default()
    })
    .await;
    let desk = BookingDesk::new(server.api(), ny_ctx()).unwrap();
    desk.refresh().await.unwrap();

    let form = BookingForm {
        status: BookingStatus::Booked,
        ..BookingForm::from_booking(&desk.bookings()[0], desk.timezone())
    };
    let err = desk.edit("b-2", form).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidBookingTransition);
    assert!(server.writes().is_empty());
    assert_eq!(desk.bookings()[0].status, BookingStatus::Completed);
}

#[tokio::test]
async fn test_store_calls() {
    let server = MockServer::start(Backend {
        stores: vec![Store {
            store_name: "downtown".into(),
            timezone: "America/New_York".into(),
            ..Default::default()
        }],
        ..Default::default()
    })
    .await;
    let api = server.api();
    let admin = ctx().with_permission("org_admin");

    let stores = api.list_stores(&admin).await.unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0].store_name, "downtown");
    let request = server.requests().pop().unwrap();
    assert_eq!(request.path, "/api/store");
    assert_eq!(request.query["orgName"], "acme");

    let airport = Store {
        store_name: "airport".into(),
        timezone: "EST".into(),
        ..Default::default()
    };
    api.create_store(&admin, airport.clone()).await.unwrap();
    let request = server.requests().pop().unwrap();
    assert_eq!(request.path, "/api/store/create");
    assert_eq!(request.body["timezone"], "America/New_York");
    assert_eq!(request.body["orgName"], "acme");
    assert_eq!(request.body["createdBy"], "ada@example.com");

    let renamed = Store {
        timezone: "PST".into(),
        phone_number: "5551234567".into(),
        ..airport
    };
    api.update_store(&admin, renamed).await.unwrap();
    let request = server.requests().pop().unwrap();
    assert_eq!(request.path, "/api/store/update");
    assert_eq!(request.body["timezone"], "America/Los_Angeles");
    assert_eq!(request.body["updatedBy"], "ada@example.com");

    let unknown = Store {
        store_name: "moon".into(),
        timezone: "Mars/Olympus".into(),
        ..Default::default()
    };
    let err = api.create_store(&admin, unknown).await.unwrap_err();
    assert!(err.field_errors().unwrap().contains("timezone"));

    api.set_store_active(&admin, "airport", true).await.unwrap();
    let request = server.requests().pop().unwrap();
    assert_eq!(request.path, "/api/store/activate");
    assert_eq!(request.query["orgName"], "acme");
    assert_eq!(request.query["storeName"], "airport");

    api.set_store_active(&admin, "airport", false).await.unwrap();
    assert_eq!(server.requests().pop().unwrap().path, "/api/store/deactivate");
    assert_eq!(server.writes().len(), 4);
}

#[tokio::test]
async fn test_missing_resources_name_the_resource() {
    let server = MockServer::start(Backend::default()).await;
    let api = server.api();
    let admin = ctx().with_permission("org_admin");

    server.backend.lock().fail_next = Some((StatusCode::NOT_FOUND, json!({})));
    let err = api.set_store_active(&admin, "gone", false).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::StoreNotFound);

    server.backend.lock().fail_next = Some((StatusCode::NOT_FOUND, json!({})));
    let err = api.delete_menu_item(&admin, "Green Tea", "downtown").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::MenuItemNotFound);

    server.backend.lock().fail_next = Some((StatusCode::NOT_FOUND, json!({})));
    let err = api.get_user("nobody@example.com").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserNotFound);
    assert_eq!(err.user_message(), "User not found");

    // other failures keep their own code
    server.backend.lock().fail_next = Some((StatusCode::FORBIDDEN, json!({})));
    let err = api.set_store_active(&admin, "gone", true).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PermissionDenied);
}

#[tokio::test]
async fn test_roles_are_unwrapped_from_the_envelope() {
    let server = MockServer::start(Backend {
        roles: vec![
            Role {
                role_name: "manager".into(),
                role_id: "r-1".into(),
                label: Some("Manager".into()),
                value: None,
            },
            Role {
                role_name: "host".into(),
                role_id: "r-2".into(),
                label: None,
                value: None,
            },
        ],
        ..Default::default()
    })
    .await;

    let roles = server.api().list_roles().await.unwrap();
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[0].label.as_deref(), Some("Manager"));
    assert_eq!(roles[1].role_id, "r-2");
    assert_eq!(server.requests()[0].path, "/api/role");
}
