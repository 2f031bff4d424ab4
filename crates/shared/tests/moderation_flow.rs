//! End-to-end moderation scenarios wiring the gate chains and the
//! lifecycle manager together, the way the HTTP handlers do.

mod common;

use std::sync::Arc;

use shared::auth::gate::{
    authorize_chain, AdminGate, Gate, GateContext, IdentityGate, OwnershipGate, TokenGate,
};
use shared::auth::token::SessionTokens;
use shared::domain::event::{EventSearch, EventStatus};
use shared::repo::{EventRepo, UserRepo};

use common::{draft, lifecycle, register, register_admin, stores};

#[tokio::test]
async fn submission_approval_and_public_visibility() {
    let (users, events) = stores();
    let tokens = Arc::new(SessionTokens::new("flow-secret"));
    let lc = lifecycle(&users, &events);
    register(users.as_ref(), "ana@example.com").await;
    register_admin(users.as_ref(), "boss@example.com").await;

    // Ana submits an event: pending, and her totalPosts moves to 1.
    let id = lc.create("ana@example.com", draft("Open day", 7)).await.unwrap();
    let ana = users.find_by_email("ana@example.com").await.unwrap().unwrap();
    assert_eq!(ana.total_posts, 1);

    // Ana cannot reach the admin surface.
    let admin_gates: Vec<Arc<dyn Gate>> = vec![
        Arc::new(TokenGate::new(tokens.clone())) as Arc<dyn Gate>,
        Arc::new(IdentityGate),
        Arc::new(AdminGate::new(users.clone())),
    ];
    let ana_token = tokens.issue("ana@example.com").unwrap();
    let mut ctx = GateContext::new(Some(&ana_token), Some("ana@example.com"), None);
    assert!(authorize_chain(&admin_gates, &mut ctx).await.is_err());

    // The admin can, and approval credits the author, not the actor.
    let boss_token = tokens.issue("boss@example.com").unwrap();
    let mut ctx = GateContext::new(Some(&boss_token), Some("boss@example.com"), None);
    authorize_chain(&admin_gates, &mut ctx).await.unwrap();
    lc.approve(id).await.unwrap();

    let event = events.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(event.status, EventStatus::Approved);
    let ana = users.find_by_email("ana@example.com").await.unwrap().unwrap();
    assert_eq!(ana.approved, 1);
    let boss = users.find_by_email("boss@example.com").await.unwrap().unwrap();
    assert_eq!(boss.approved, 0);

    // And the public listing now carries it.
    let listed = events.search_approved(&EventSearch::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
}

#[tokio::test]
async fn strangers_cannot_delete_but_admins_can() {
    let (users, events) = stores();
    let tokens = Arc::new(SessionTokens::new("flow-secret"));
    let lc = lifecycle(&users, &events);
    register(users.as_ref(), "ana@example.com").await;
    register(users.as_ref(), "carl@example.com").await;
    register_admin(users.as_ref(), "boss@example.com").await;

    let id = lc.create("ana@example.com", draft("Movie night", 3)).await.unwrap();

    let delete_gates: Vec<Arc<dyn Gate>> = vec![
        Arc::new(TokenGate::new(tokens.clone())) as Arc<dyn Gate>,
        Arc::new(IdentityGate),
        Arc::new(OwnershipGate::new(users.clone(), events.clone())),
    ];

    // Carl holds a perfectly valid session and still gets stopped.
    let carl_token = tokens.issue("carl@example.com").unwrap();
    let mut ctx = GateContext::new(Some(&carl_token), Some("carl@example.com"), Some(id));
    assert!(authorize_chain(&delete_gates, &mut ctx).await.is_err());
    assert!(events.find_by_id(id).await.unwrap().is_some());

    // The admin passes the gate and the deletion settles Ana's counter.
    let boss_token = tokens.issue("boss@example.com").unwrap();
    let mut ctx = GateContext::new(Some(&boss_token), Some("boss@example.com"), Some(id));
    authorize_chain(&delete_gates, &mut ctx).await.unwrap();
    lc.delete(id).await.unwrap();

    assert!(events.find_by_id(id).await.unwrap().is_none());
    let ana = users.find_by_email("ana@example.com").await.unwrap().unwrap();
    assert_eq!(ana.total_posts, 0);
}

#[tokio::test]
async fn a_submission_round_trips_unchanged() {
    let (users, events) = stores();
    let lc = lifecycle(&users, &events);
    register(users.as_ref(), "ana@example.com").await;

    let mut submitted = draft("Poetry slam", 12);
    submitted.photo = Some("https://example.com/slam.png".into());
    submitted.description = "Bring your own verses".into();
    let expected = submitted.clone().into_content().unwrap();

    let id = lc.create("ana@example.com", submitted).await.unwrap();
    let stored = events.find_by_id(id).await.unwrap().unwrap();

    assert_eq!(stored.title, expected.title);
    assert_eq!(stored.description, expected.description);
    assert_eq!(stored.photo, expected.photo);
    assert_eq!(stored.category, expected.category);
    assert_eq!(stored.location, expected.location);
    assert_eq!(stored.participant, expected.participant);
    assert_eq!(stored.date, expected.date);
}
