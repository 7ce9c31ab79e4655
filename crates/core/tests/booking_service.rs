//! Integration tests for the booking write path.
//!
//! Exercises `BookingService` against in-memory ports: conflict rejection,
//! per-room serialization under concurrent requests, reschedule and cancel,
//! booking policy, optional lecture enforcement and status cache invalidation.

mod support;

use std::sync::Arc;
use std::time::Duration;

use chrono::Weekday;
use chrono_tz::Asia::Seoul;
use futures::future::join_all;
use roomkeeper_core::{BookingService, Clock, RoomStatusCache, RoomStatusService};
use roomkeeper_domain::{
    BookingConfig, BookingOutcome, LectureSchedule, ReservationChange, RoomKeeperError, RoomStatus,
};
use support::clock::TestClock;
use support::fixtures::{date, lecture, request, reservation};
use support::repositories::{MockLectureCatalog, MockReservationStore};

const DAY: &str = "2024-12-20";

fn clock() -> TestClock {
    TestClock::at_local(Seoul, 2024, 12, 20, 8, 0)
}

fn service_with(
    store: &MockReservationStore,
    lectures: Vec<LectureSchedule>,
    config: BookingConfig,
) -> BookingService {
    BookingService::new(
        Arc::new(store.clone()),
        Arc::new(MockLectureCatalog::new(lectures)),
        Arc::new(clock()),
        config,
    )
}

fn service(store: &MockReservationStore) -> BookingService {
    service_with(store, Vec::new(), BookingConfig::default())
}

#[tokio::test]
async fn books_a_free_slot() {
    let store = MockReservationStore::default();
    let outcome = service(&store).book(request("101-2", DAY, "09:00", 2)).await.unwrap();

    let booked = outcome.reservation().expect("slot should be booked").clone();
    assert!(booked.id.starts_with("res_"));
    assert_eq!(booked.created_at, clock().now().await);
    assert_eq!(store.snapshot(), vec![booked]);
}

#[tokio::test]
async fn overlapping_request_is_returned_as_conflict() {
    let store = MockReservationStore::new(vec![reservation("R1", "101-2", DAY, "09:00", 2)]);

    let outcome = service(&store).book(request("101-2", DAY, "10:00", 1)).await.unwrap();

    let BookingOutcome::Conflict(report) = outcome else {
        panic!("expected a conflict, got {outcome:?}");
    };
    assert!(report.has_conflict);
    assert_eq!(report.conflicts[0].id, "R1");
    assert_eq!(report.describe(), "09:00-11:00 (Team meeting, Kim)");
    assert_eq!(store.snapshot().len(), 1);
}

#[tokio::test]
async fn back_to_back_bookings_are_allowed() {
    let store = MockReservationStore::new(vec![reservation("R1", "101-2", DAY, "09:00", 2)]);
    let service = service(&store);

    assert!(service.book(request("101-2", DAY, "11:00", 1)).await.unwrap().is_booked());
    assert!(service.book(request("101-2", DAY, "08:00", 1)).await.unwrap().is_booked());
    assert_eq!(store.snapshot().len(), 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_for_one_slot_book_once() {
    let store = MockReservationStore::default().with_read_delay(Duration::from_millis(20));
    let service = Arc::new(service(&store));

    let attempts = (0..8).map(|_| {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.book(request("101-2", DAY, "09:00", 2)).await })
    });
    let outcomes: Vec<BookingOutcome> =
        join_all(attempts).await.into_iter().map(|joined| joined.unwrap().unwrap()).collect();

    assert_eq!(outcomes.iter().filter(|o| o.is_booked()).count(), 1);
    assert_eq!(outcomes.iter().filter(|o| !o.is_booked()).count(), 7);
    assert_eq!(store.snapshot().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_rooms_do_not_block_each_other() {
    let store = MockReservationStore::default().with_read_delay(Duration::from_millis(10));
    let service = Arc::new(service(&store));

    let attempts = ["101-1", "101-2", "236", "105"].map(|room| {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.book(request(room, DAY, "09:00", 2)).await })
    });
    for joined in join_all(attempts).await {
        assert!(joined.unwrap().unwrap().is_booked());
    }
    assert_eq!(store.snapshot().len(), 4);
}

#[tokio::test]
async fn reschedule_ignores_its_own_slot() {
    let store = MockReservationStore::new(vec![
        reservation("R1", "101-2", DAY, "09:00", 2),
        reservation("R2", "101-2", DAY, "14:00", 1),
    ]);
    let service = service(&store);

    let change = ReservationChange { date: date(DAY), time: "10:00".parse().unwrap(), duration: 2 };
    let moved = service.reschedule("R1", change).await.unwrap();
    let moved = moved.reservation().expect("reschedule should succeed");
    assert_eq!(moved.time.to_string(), "10:00");
    assert_eq!(moved.room_id, "101-2");

    let onto_r2 = ReservationChange { date: date(DAY), time: "13:00".parse().unwrap(), duration: 2 };
    let outcome = service.reschedule("R1", onto_r2).await.unwrap();
    assert!(!outcome.is_booked());
    let stored = store.snapshot().into_iter().find(|r| r.id == "R1").unwrap();
    assert_eq!(stored.time.to_string(), "10:00");
}

#[tokio::test]
async fn reschedule_and_cancel_unknown_ids_fail() {
    let store = MockReservationStore::default();
    let service = service(&store);
    let change = ReservationChange { date: date(DAY), time: "10:00".parse().unwrap(), duration: 1 };

    assert!(matches!(service.reschedule("missing", change).await, Err(RoomKeeperError::NotFound(_))));
    assert!(matches!(service.cancel("missing").await, Err(RoomKeeperError::NotFound(_))));
}

#[tokio::test]
async fn cancel_frees_the_slot() {
    let store = MockReservationStore::new(vec![reservation("R1", "101-2", DAY, "09:00", 2)]);
    let service = service(&store);

    let removed = service.cancel("R1").await.unwrap();
    assert_eq!(removed.id, "R1");
    assert!(store.snapshot().is_empty());
    assert!(service.book(request("101-2", DAY, "09:00", 2)).await.unwrap().is_booked());
}

#[tokio::test]
async fn policy_violations_are_errors_and_write_nothing() {
    let store = MockReservationStore::default();
    let service = service(&store);

    let too_long = service.book(request("101-2", DAY, "09:00", 9)).await;
    assert!(matches!(too_long, Err(RoomKeeperError::InvalidInput(_))));

    let misaligned = service.book(request("101-2", DAY, "09:10", 1)).await;
    assert!(matches!(misaligned, Err(RoomKeeperError::InvalidInput(_))));

    let zero = service.book(request("101-2", DAY, "09:00", 0)).await;
    assert!(matches!(zero, Err(RoomKeeperError::InvalidDuration(_))));

    let mut anonymous = request("101-2", DAY, "09:00", 1);
    anonymous.guest_name = "   ".to_string();
    assert!(matches!(service.book(anonymous).await, Err(RoomKeeperError::InvalidInput(_))));

    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn lecture_overlap_is_allowed_unless_configured() {
    // 2024-12-20 is a Friday.
    let lectures = vec![lecture(2, "101-2", &[(Weekday::Fri, "10:30", 1.5)])];

    let store = MockReservationStore::default();
    let lenient = service_with(&store, lectures.clone(), BookingConfig::default());
    assert!(lenient.book(request("101-2", DAY, "11:00", 1)).await.unwrap().is_booked());

    let store = MockReservationStore::default();
    let strict = service_with(
        &store,
        lectures,
        BookingConfig { reject_lecture_overlap: true, ..BookingConfig::default() },
    );
    let BookingOutcome::Conflict(report) = strict.book(request("101-2", DAY, "11:00", 1)).await.unwrap()
    else {
        panic!("lecture overlap should be rejected");
    };
    assert!(!report.has_conflict);
    assert_eq!(report.lecture_clashes.len(), 1);
    assert_eq!(report.describe(), "10:30-12:00 (Lecture 2, lecture)");
    assert!(strict.book(request("101-2", DAY, "12:00", 1)).await.unwrap().is_booked());
}

#[tokio::test]
async fn check_reports_without_writing() {
    let store = MockReservationStore::new(vec![reservation("R1", "101-2", DAY, "09:00", 2)]);
    let service = service(&store);

    let report = service.check("101-2", DAY, "10:00", 1, None).await.unwrap();
    assert!(report.has_conflict);
    assert!(!service.check("101-2", DAY, "10:00", 1, Some("R1")).await.unwrap().has_conflict);

    assert!(matches!(
        service.check("101-2", DAY, "7pm", 1, None).await,
        Err(RoomKeeperError::InvalidFormat(_))
    ));
    assert!(matches!(
        service.check("101-2", DAY, "10:00", -2, None).await,
        Err(RoomKeeperError::InvalidDuration(_))
    ));
    assert_eq!(store.snapshot().len(), 1);
}

#[tokio::test]
async fn successful_writes_invalidate_cached_status() {
    let store = MockReservationStore::default();
    let lectures = Arc::new(MockLectureCatalog::default());
    let clock = Arc::new(TestClock::at_local(Seoul, 2024, 12, 20, 10, 30));
    let cache = Arc::new(RoomStatusCache::new(clock.clone(), Duration::from_secs(30)));

    let status = RoomStatusService::new(Arc::new(store.clone()), lectures.clone(), clock.clone())
        .with_cache(Arc::clone(&cache));
    let booking =
        BookingService::new(Arc::new(store.clone()), lectures, clock, BookingConfig::default())
            .with_status_cache(Arc::clone(&cache));

    assert_eq!(status.status("101-2").await.unwrap().status, RoomStatus::Available);

    booking.book(request("101-2", DAY, "10:00", 1)).await.unwrap();
    assert_eq!(status.status("101-2").await.unwrap().status, RoomStatus::Occupied);

    let id = store.snapshot()[0].id.clone();
    booking.cancel(&id).await.unwrap();
    assert_eq!(status.status("101-2").await.unwrap().status, RoomStatus::Available);
}
