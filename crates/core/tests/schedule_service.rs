//! Integration tests for `ScheduleService` against the in-memory repository.

mod support;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use support::repositories::MockScheduleItemRepository;
use support::{date, draft, owner, stored, time};
use timegrid_core::ScheduleService;
use timegrid_domain::{OverlapScope, ScheduleItemType, TimeGridError};

fn service(repo: &MockScheduleItemRepository) -> ScheduleService {
    ScheduleService::new(Arc::new(repo.clone()))
}

#[tokio::test]
async fn create_persists_valid_item() {
    let repo = MockScheduleItemRepository::default();
    let alice = owner("alice");

    let saved = service(&repo)
        .create(
            &alice,
            draft("Algebra", date(2024, 3, 11), time(9, 0), 90).with_type(ScheduleItemType::Classes),
        )
        .await
        .unwrap();

    assert!(saved.is_persisted());
    assert!(saved.created_at.is_some());
    assert_eq!(saved.owner_id, alice);
    assert_eq!(repo.items().len(), 1);
}

#[tokio::test]
async fn create_rejects_overlap_without_persisting() {
    let alice = owner("alice");
    let existing = stored("a", &alice, draft("Standup", date(2024, 3, 11), time(9, 0), 60));
    let repo = MockScheduleItemRepository::new(vec![existing]);

    let err = service(&repo)
        .create(&alice, draft("Lecture", date(2024, 3, 11), time(9, 30), 30))
        .await
        .unwrap_err();

    assert_eq!(err, TimeGridError::OverlapConflict { conflicting_id: "a".into() });
    assert_eq!(repo.save_count(), 0);
    assert_eq!(repo.items().len(), 1);
}

#[tokio::test]
async fn touching_items_are_accepted() {
    let alice = owner("alice");
    let existing = stored("a", &alice, draft("Standup", date(2024, 3, 11), time(9, 0), 60));
    let repo = MockScheduleItemRepository::new(vec![existing]);

    service(&repo)
        .create(&alice, draft("Lecture", date(2024, 3, 11), time(10, 0), 60))
        .await
        .unwrap();

    assert_eq!(repo.items().len(), 2);
}

#[tokio::test]
async fn other_owners_items_never_conflict() {
    let bob = owner("bob");
    let existing = stored("b", &bob, draft("Shift", date(2024, 3, 11), time(9, 0), 240));
    let repo = MockScheduleItemRepository::new(vec![existing]);

    service(&repo)
        .create(&owner("alice"), draft("Lecture", date(2024, 3, 11), time(10, 0), 60))
        .await
        .unwrap();

    assert_eq!(repo.save_count(), 1);
}

#[tokio::test]
async fn zero_duration_and_blank_title_are_rejected() {
    let repo = MockScheduleItemRepository::default();
    let svc = service(&repo);
    let alice = owner("alice");

    let err =
        svc.create(&alice, draft("Nap", date(2024, 3, 11), time(9, 0), 0)).await.unwrap_err();
    assert_eq!(err, TimeGridError::InvalidDuration { minutes: 0 });

    let err =
        svc.create(&alice, draft("   ", date(2024, 3, 11), time(9, 0), 30)).await.unwrap_err();
    assert!(matches!(err, TimeGridError::InvalidInput(_)));

    assert_eq!(repo.save_count(), 0);
    assert_eq!(repo.find_count() + repo.find_by_date_count(), 0);
}

#[tokio::test]
async fn item_ending_past_last_representable_date_is_rejected() {
    let repo = MockScheduleItemRepository::default();
    let svc = service(&repo);

    let err = svc
        .create(&owner("alice"), draft("Late", NaiveDate::MAX, time(23, 0), 120))
        .await
        .unwrap_err();

    assert_eq!(err, TimeGridError::InvalidDuration { minutes: 120 });
    assert_eq!(repo.save_count(), 0);
}

#[tokio::test]
async fn adjacent_days_catches_item_running_past_midnight() {
    let alice = owner("alice");
    let late = stored("late", &alice, draft("Night shift", date(2024, 3, 10), time(23, 0), 120));
    let repo = MockScheduleItemRepository::new(vec![late]);

    let err = service(&repo)
        .create(&alice, draft("Early class", date(2024, 3, 11), time(0, 30), 30))
        .await
        .unwrap_err();

    assert_eq!(err, TimeGridError::OverlapConflict { conflicting_id: "late".into() });
    assert_eq!(repo.find_count(), 1);
}

#[tokio::test]
async fn same_date_scope_ignores_previous_day() {
    let alice = owner("alice");
    let late = stored("late", &alice, draft("Night shift", date(2024, 3, 10), time(23, 0), 120));
    let repo = MockScheduleItemRepository::new(vec![late]);

    service(&repo)
        .with_overlap_scope(OverlapScope::SameDate)
        .create(&alice, draft("Early class", date(2024, 3, 11), time(0, 30), 30))
        .await
        .unwrap();

    assert_eq!(repo.find_by_date_count(), 1);
    assert_eq!(repo.find_count(), 0);
    assert_eq!(repo.items().len(), 2);
}

#[tokio::test]
async fn replace_does_not_conflict_with_itself() {
    let alice = owner("alice");
    let original = stored("a", &alice, draft("Standup", date(2024, 3, 11), time(9, 0), 60));
    let created_at = original.created_at;
    let repo = MockScheduleItemRepository::new(vec![original]);

    let updated = service(&repo)
        .replace(&alice, "a", draft("Standup (long)", date(2024, 3, 11), time(9, 15), 90))
        .await
        .unwrap();

    assert_eq!(updated.id.as_deref(), Some("a"));
    assert_eq!(updated.title, "Standup (long)");
    assert_eq!(updated.duration_minutes, 90);
    assert_eq!(updated.created_at, created_at);
    assert_eq!(repo.items().len(), 1);
}

#[tokio::test]
async fn replace_rejects_overlap_and_keeps_stored_copy() {
    let alice = owner("alice");
    let a = stored("a", &alice, draft("Standup", date(2024, 3, 11), time(9, 0), 60));
    let b = stored("b", &alice, draft("Lecture", date(2024, 3, 11), time(11, 0), 60));
    let repo = MockScheduleItemRepository::new(vec![a.clone(), b]);

    let err = service(&repo)
        .replace(&alice, "a", draft("Standup", date(2024, 3, 11), time(10, 30), 60))
        .await
        .unwrap_err();

    assert_eq!(err, TimeGridError::OverlapConflict { conflicting_id: "b".into() });
    let stored_a = repo.items().into_iter().find(|item| item.id.as_deref() == Some("a")).unwrap();
    assert_eq!(stored_a, a);
}

#[tokio::test]
async fn non_owner_cannot_see_replace_or_delete() {
    let alice = owner("alice");
    let mallory = owner("mallory");
    let item = stored("a", &alice, draft("Standup", date(2024, 3, 11), time(9, 0), 60));
    let repo = MockScheduleItemRepository::new(vec![item]);
    let svc = service(&repo);

    assert!(matches!(svc.get(&mallory, "a").await, Err(TimeGridError::NotFound(_))));
    assert!(matches!(
        svc.replace(&mallory, "a", draft("Mine", date(2024, 3, 12), time(9, 0), 30)).await,
        Err(TimeGridError::NotFound(_))
    ));
    assert!(matches!(svc.delete(&mallory, "a").await, Err(TimeGridError::NotFound(_))));
    assert_eq!(repo.items().len(), 1);
    assert_eq!(repo.save_count(), 0);
}

#[tokio::test]
async fn delete_removes_owned_item() {
    let alice = owner("alice");
    let item = stored("a", &alice, draft("Standup", date(2024, 3, 11), time(9, 0), 60));
    let repo = MockScheduleItemRepository::new(vec![item]);
    let svc = service(&repo);

    svc.delete(&alice, "a").await.unwrap();
    assert!(repo.items().is_empty());
    assert!(matches!(svc.delete(&alice, "a").await, Err(TimeGridError::NotFound(_))));
}

#[tokio::test]
async fn upcoming_is_ordered_and_limited() {
    let alice = owner("alice");
    let items = vec![
        stored("c", &alice, draft("C", date(2024, 3, 12), time(8, 0), 30)),
        stored("b", &alice, draft("B", date(2024, 3, 11), time(14, 0), 30)),
        stored("a", &alice, draft("A", date(2024, 3, 11), time(9, 0), 30)),
        stored("x", &owner("bob"), draft("X", date(2024, 3, 1), time(9, 0), 30)),
    ];
    let repo = MockScheduleItemRepository::new(items);

    let upcoming = service(&repo).with_upcoming_limit(2).upcoming(&alice).await.unwrap();

    let ids: Vec<_> = upcoming.iter().filter_map(|item| item.id.as_deref()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_overlapping_creates_store_exactly_one() {
    let repo = MockScheduleItemRepository::default().with_save_delay(Duration::from_millis(20));
    let svc = Arc::new(service(&repo));
    let alice = owner("alice");

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let svc = Arc::clone(&svc);
            let alice = alice.clone();
            tokio::spawn(async move {
                svc.create(&alice, draft(&format!("Race {n}"), date(2024, 3, 11), time(9, 0), 60))
                    .await
            })
        })
        .collect();

    let mut accepted = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(TimeGridError::OverlapConflict { .. }) => rejected += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(rejected, 7);
    assert_eq!(repo.items().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn different_owners_are_not_serialised_against_each_other() {
    let repo = MockScheduleItemRepository::default().with_save_delay(Duration::from_millis(10));
    let svc = Arc::new(service(&repo));

    let handles: Vec<_> = ["alice", "bob", "carol"]
        .into_iter()
        .map(|name| {
            let svc = Arc::clone(&svc);
            tokio::spawn(async move {
                svc.create(&owner(name), draft("Standup", date(2024, 3, 11), time(9, 0), 60)).await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(repo.items().len(), 3);
}
