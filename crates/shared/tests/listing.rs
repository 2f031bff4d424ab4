mod common;

use chrono::{Duration, Utc};

use shared::domain::event::{EventSearch, EventStatus, NewEvent};
use shared::repo::EventRepo;

use common::{draft, lifecycle, register, stores};

#[tokio::test]
async fn public_search_never_returns_pending_events() {
    let (users, events) = stores();
    register(users.as_ref(), "ana@example.com").await;
    let lc = lifecycle(&users, &events);

    let approved = lc.create("ana@example.com", draft("Robotics fest", 5)).await.unwrap();
    lc.create("ana@example.com", draft("Secret draft", 5)).await.unwrap();
    lc.approve(approved).await.unwrap();

    let listed = events.search_approved(&EventSearch::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, approved);

    // Filters never widen the result past approved.
    let listed = events
        .search_approved(&EventSearch {
            title_pattern: Some("draft".into()),
            category: None,
        })
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn search_matches_title_case_insensitively_and_filters_category() {
    let (users, events) = stores();
    register(users.as_ref(), "ana@example.com").await;
    let lc = lifecycle(&users, &events);

    let fest = lc.create("ana@example.com", draft("Robotics Fest", 5)).await.unwrap();
    let mut exam = draft("Final exam", 5);
    exam.category = "exam".into();
    let exam = lc.create("ana@example.com", exam).await.unwrap();
    lc.approve(fest).await.unwrap();
    lc.approve(exam).await.unwrap();

    let listed = events
        .search_approved(&EventSearch {
            title_pattern: Some("robotics".into()),
            category: None,
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, fest);

    let listed = events
        .search_approved(&EventSearch {
            title_pattern: None,
            category: Some("exam".into()),
        })
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, exam);

    // An unknown category matches nothing rather than erroring.
    let listed = events
        .search_approved(&EventSearch {
            title_pattern: None,
            category: Some("concert".into()),
        })
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn upcoming_returns_at_most_six_future_approved_newest_first() {
    let (users, events) = stores();
    register(users.as_ref(), "ana@example.com").await;
    let lc = lifecycle(&users, &events);

    for day in 1..=8 {
        let id = lc
            .create("ana@example.com", draft(&format!("Event {day}"), day))
            .await
            .unwrap();
        lc.approve(id).await.unwrap();
    }
    // A past approved event and a future pending one never qualify.
    let past = lc.create("ana@example.com", draft("Yesterday", -1)).await.unwrap();
    lc.approve(past).await.unwrap();
    lc.create("ana@example.com", draft("Unreviewed", 4)).await.unwrap();

    let now = Utc::now();
    let upcoming = events.upcoming_approved(now, 6).await.unwrap();
    assert_eq!(upcoming.len(), 6);
    assert!(upcoming
        .iter()
        .all(|e| e.status == EventStatus::Approved && e.date > now));
    assert!(upcoming.windows(2).all(|pair| pair[0].date >= pair[1].date));
    // The furthest-out events win the cut.
    assert_eq!(upcoming[0].title, "Event 8");
    assert_eq!(upcoming[5].title, "Event 3");
}

#[tokio::test]
async fn status_counts_split_on_the_date_cutoff() {
    let (users, events) = stores();
    register(users.as_ref(), "ana@example.com").await;
    let lc = lifecycle(&users, &events);

    let future = lc.create("ana@example.com", draft("Ahead", 5)).await.unwrap();
    let past = lc.create("ana@example.com", draft("Behind", -5)).await.unwrap();
    lc.approve(future).await.unwrap();
    lc.approve(past).await.unwrap();
    lc.create("ana@example.com", draft("Pending", 5)).await.unwrap();

    let now = Utc::now();
    assert_eq!(events.count_by_status(EventStatus::Approved).await.unwrap(), 2);
    assert_eq!(
        events
            .count_with_status_after(EventStatus::Approved, now)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn author_listing_is_sorted_by_most_recent_update() {
    let (_users, events) = stores();

    let base = Utc::now();
    for (title, minutes) in [("oldest", 0), ("newest", 20), ("middle", 10)] {
        let content = draft(title, 5).into_content().unwrap();
        let new = NewEvent::pending("ana@example.com", content, base + Duration::minutes(minutes));
        events.insert(&new).await.unwrap();
    }

    let listed = events.list_by_author("ana@example.com").await.unwrap();
    let titles: Vec<&str> = listed.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["newest", "middle", "oldest"]);
}
