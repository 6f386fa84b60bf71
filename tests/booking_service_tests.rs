use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio_test::{assert_err, assert_ok};

use motor_rental::dto::booking_dto::CreateBookingRequest;
use motor_rental::models::booking::{Booking, BookingStatus};
use motor_rental::models::motorcycle::{
    CreateMotorcycleRequest, Motorcycle, MotorcycleStatus, UpdateMotorcycleRequest,
};
use motor_rental::repositories::{BookingStore, InMemoryStore, MotorcycleStore};
use motor_rental::services::{BookingService, ExpiryPolicy};
use motor_rental::utils::errors::AppError;

struct Fixture {
    store: InMemoryStore,
    service: BookingService,
}

fn fixture() -> Fixture {
    fixture_with(ExpiryPolicy::disabled())
}

fn fixture_with(expiry: ExpiryPolicy) -> Fixture {
    let store = InMemoryStore::new();
    let service = BookingService::new(Arc::new(store.clone()), expiry);
    Fixture { store, service }
}

async fn add_motorcycle(store: &InMemoryStore, status: MotorcycleStatus) -> Motorcycle {
    store
        .create_motorcycle(CreateMotorcycleRequest {
            name: "Vario 125".to_string(),
            brand: "Honda".to_string(),
            category: "Matic".to_string(),
            price_per_day: Decimal::new(100000, 0),
            image_url: None,
            status,
            description: None,
        })
        .await
        .unwrap()
}

fn request(motorcycle_id: i64, start: &str, end: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        motorcycle_id: Some(motorcycle_id),
        customer_name: "Budi Santoso".to_string(),
        customer_phone: "081234567890".to_string(),
        customer_address: "Jl. Kaliurang KM 5, Yogyakarta".to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_shared_boundary_day_conflicts_and_next_day_is_priced() {
    let fx = fixture();
    let motorcycle = add_motorcycle(&fx.store, MotorcycleStatus::Available).await;

    let existing = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-10", "2025-06-12"))
        .await
        .unwrap();
    assert_eq!(existing.status, BookingStatus::Pending);

    let conflict = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-12", "2025-06-14"))
        .await;
    assert!(matches!(conflict, Err(AppError::DateConflict)));

    let booking = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-13", "2025-06-15"))
        .await
        .unwrap();
    assert_eq!(booking.total_price, Decimal::new(300000, 0));
    assert_eq!(booking.start_date, date(2025, 6, 13));
    assert_eq!(booking.end_date, date(2025, 6, 15));
    assert_eq!(booking.status, BookingStatus::Pending);
}

#[tokio::test]
async fn test_single_day_booking_costs_one_day() {
    let fx = fixture();
    let motorcycle = add_motorcycle(&fx.store, MotorcycleStatus::Available).await;

    let booking = fx
        .service
        .create_booking(request(motorcycle.id, "2025-08-01", "2025-08-01"))
        .await
        .unwrap();
    assert_eq!(booking.total_price, motorcycle.price_per_day);
}

#[tokio::test]
async fn test_completed_requires_approved() {
    let fx = fixture();
    let motorcycle = add_motorcycle(&fx.store, MotorcycleStatus::Available).await;
    let booking = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-10", "2025-06-12"))
        .await
        .unwrap();

    let result = fx.service.update_status(booking.id, "Completed").await;
    assert!(matches!(
        result,
        Err(AppError::InvalidTransition {
            from: BookingStatus::Pending,
            to: BookingStatus::Completed
        })
    ));

    let approved = fx.service.update_status(booking.id, "Approved").await.unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    let completed = fx.service.update_status(booking.id, "Completed").await.unwrap();
    assert_eq!(completed.status, BookingStatus::Completed);
}

#[tokio::test]
async fn test_repeating_applied_status_is_invalid_transition() {
    let fx = fixture();
    let motorcycle = add_motorcycle(&fx.store, MotorcycleStatus::Available).await;
    let booking = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-10", "2025-06-12"))
        .await
        .unwrap();

    assert_ok!(fx.service.update_status(booking.id, "Approved").await);
    let again = fx.service.update_status(booking.id, "Approved").await;
    assert!(matches!(
        again,
        Err(AppError::InvalidTransition {
            from: BookingStatus::Approved,
            to: BookingStatus::Approved
        })
    ));
}

#[tokio::test]
async fn test_unknown_status_literal_is_invalid_status() {
    let fx = fixture();
    let motorcycle = add_motorcycle(&fx.store, MotorcycleStatus::Available).await;
    let booking = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-10", "2025-06-12"))
        .await
        .unwrap();

    for literal in ["approved", "Cancelled", "Expired", ""] {
        let result = fx.service.update_status(booking.id, literal).await;
        assert!(matches!(result, Err(AppError::InvalidStatus(_))), "{literal:?}");
    }

    let unchanged = fx.store.find_booking(booking.id).await.unwrap().unwrap();
    assert_eq!(unchanged.status, BookingStatus::Pending);
}

#[tokio::test]
async fn test_update_status_of_missing_booking_is_not_found() {
    let fx = fixture();
    let result = fx.service.update_status(404, "Approved").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_deleted_booking_frees_its_dates() {
    let fx = fixture();
    let motorcycle = add_motorcycle(&fx.store, MotorcycleStatus::Available).await;
    let booking = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-10", "2025-06-12"))
        .await
        .unwrap();

    assert_err!(
        fx.service
            .create_booking(request(motorcycle.id, "2025-06-11", "2025-06-11"))
            .await
    );

    fx.service.delete_booking(booking.id).await.unwrap();
    assert!(matches!(
        fx.service.delete_booking(booking.id).await,
        Err(AppError::NotFound(_))
    ));

    assert_ok!(
        fx.service
            .create_booking(request(motorcycle.id, "2025-06-10", "2025-06-12"))
            .await
    );
}

#[tokio::test]
async fn test_rejected_and_completed_bookings_do_not_block() {
    let fx = fixture();
    let motorcycle = add_motorcycle(&fx.store, MotorcycleStatus::Available).await;

    let rejected = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-01", "2025-06-05"))
        .await
        .unwrap();
    fx.service.update_status(rejected.id, "Rejected").await.unwrap();

    let completed = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-01", "2025-06-05"))
        .await
        .unwrap();
    fx.service.update_status(completed.id, "Approved").await.unwrap();
    assert!(matches!(
        fx.service
            .create_booking(request(motorcycle.id, "2025-06-03", "2025-06-04"))
            .await,
        Err(AppError::DateConflict)
    ));
    fx.service.update_status(completed.id, "Completed").await.unwrap();

    assert_ok!(
        fx.service
            .create_booking(request(motorcycle.id, "2025-06-03", "2025-06-04"))
            .await
    );
}

#[tokio::test]
async fn test_unavailable_motorcycle_is_refused_without_conflict() {
    let fx = fixture();
    let motorcycle = add_motorcycle(&fx.store, MotorcycleStatus::Unavailable).await;

    let result = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-10", "2025-06-12"))
        .await;
    assert!(matches!(result, Err(AppError::VehicleUnavailable(id)) if id == motorcycle.id));
    assert!(fx.store.active_for_motorcycle(motorcycle.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_motorcycle_is_not_found() {
    let fx = fixture();
    let result = fx.service.create_booking(request(99, "2025-06-10", "2025-06-12")).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_unrepresentable_total_is_refused_without_panic() {
    let fx = fixture();
    let motorcycle = add_motorcycle(&fx.store, MotorcycleStatus::Available).await;
    // el store no revalida: el precio llega tal cual a la admisión
    fx.store
        .update_motorcycle(
            motorcycle.id,
            UpdateMotorcycleRequest {
                price_per_day: Some(Decimal::MAX),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let result = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-10", "2025-06-11"))
        .await;
    match result {
        Err(AppError::Validation { errors, .. }) => {
            assert!(errors.field_errors().contains_key("total_price"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(fx.store.active_for_motorcycle(motorcycle.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_validation_runs_before_lookup() {
    let fx = fixture();
    let mut invalid = request(99, "2025-06-12", "2025-06-10");
    invalid.customer_name = "   ".to_string();

    match fx.service.create_booking(invalid).await {
        Err(AppError::Validation { message, errors }) => {
            assert_eq!(message, "The customer name field is required.");
            let fields = errors.field_errors();
            assert!(fields.contains_key("customer_name"));
            assert!(fields.contains_key("end_date"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_concurrent_admissions_for_same_dates_admit_one() {
    let fx = fixture();
    let motorcycle = add_motorcycle(&fx.store, MotorcycleStatus::Available).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = fx.service.clone();
        let req = request(motorcycle.id, "2025-07-01", "2025-07-03");
        handles.push(tokio::spawn(async move { service.create_booking(req).await }));
    }

    let mut admitted = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => admitted += 1,
            Err(AppError::DateConflict) => conflicts += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
    assert_eq!(admitted, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(fx.store.active_for_motorcycle(motorcycle.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_stale_pending_expires_on_admission() {
    let fx = fixture_with(ExpiryPolicy::after(Duration::hours(24)));
    let motorcycle = add_motorcycle(&fx.store, MotorcycleStatus::Available).await;
    let created_at = Utc::now() - Duration::hours(48);
    fx.store
        .seed_booking(Booking {
            id: 1,
            motorcycle_id: motorcycle.id,
            customer_name: "Sari".to_string(),
            customer_phone: "0813".to_string(),
            customer_address: "Bantul".to_string(),
            start_date: date(2025, 9, 1),
            end_date: date(2025, 9, 3),
            total_price: Decimal::new(300000, 0),
            status: BookingStatus::Pending,
            created_at,
            updated_at: created_at,
        })
        .await;

    let booking = fx
        .service
        .create_booking(request(motorcycle.id, "2025-09-02", "2025-09-02"))
        .await
        .unwrap();
    assert_eq!(booking.status, BookingStatus::Pending);

    let stale = fx.store.find_booking(1).await.unwrap().unwrap();
    assert_eq!(stale.status, BookingStatus::Expired);
    assert!(matches!(
        fx.service.update_status(1, "Approved").await,
        Err(AppError::InvalidTransition {
            from: BookingStatus::Expired,
            ..
        })
    ));
}

#[tokio::test]
async fn test_list_bookings_filters_by_status() {
    let fx = fixture();
    let motorcycle = add_motorcycle(&fx.store, MotorcycleStatus::Available).await;
    let first = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-01", "2025-06-02"))
        .await
        .unwrap();
    let second = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-05", "2025-06-06"))
        .await
        .unwrap();
    fx.service.update_status(first.id, "Approved").await.unwrap();

    let all = fx.service.list_bookings(None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].booking.id, second.id);
    assert_eq!(all[0].motorcycle.id, motorcycle.id);

    let approved = fx.service.list_bookings(Some("Approved")).await.unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].booking.id, first.id);

    assert!(fx.service.list_bookings(Some("Expired")).await.unwrap().is_empty());
    assert_eq!(fx.service.list_bookings(Some("")).await.unwrap().len(), 2);
    assert!(matches!(
        fx.service.list_bookings(Some("pending")).await,
        Err(AppError::InvalidStatus(_))
    ));
}

#[tokio::test]
async fn test_active_bookings_exclude_terminal_states() {
    let fx = fixture();
    let motorcycle = add_motorcycle(&fx.store, MotorcycleStatus::Available).await;
    let kept = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-01", "2025-06-02"))
        .await
        .unwrap();
    let rejected = fx
        .service
        .create_booking(request(motorcycle.id, "2025-06-05", "2025-06-06"))
        .await
        .unwrap();
    fx.service.update_status(rejected.id, "Rejected").await.unwrap();

    let active = fx.service.get_active_bookings(motorcycle.id).await.unwrap();
    assert_eq!(active.iter().map(|b| b.id).collect::<Vec<_>>(), vec![kept.id]);

    let detail = fx.service.get_booking(rejected.id).await.unwrap();
    assert_eq!(detail.booking.status, BookingStatus::Rejected);
    assert!(matches!(fx.service.get_booking(999).await, Err(AppError::NotFound(_))));
}
