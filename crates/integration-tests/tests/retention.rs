//! The deferred deletion path, end to end: creation enqueues, the sweeper
//! fires, every repeat or early fire is a no-op. Time is compressed by
//! backdating rows instead of waiting.

use chrono::{Duration, Utc};
use integration_tests::{create_post, post_ttl, signup, test_app, TestApp};
use uuid::Uuid;

/// Ages a post and its pending job as if `hours` had passed.
fn backdate(app: &TestApp, post_id: Uuid, hours: i64) {
    if let Some(mut post) = app.db.posts.get_mut(&post_id) {
        post.created_at = post.created_at - Duration::hours(hours);
    }
    for mut job in app.db.jobs.iter_mut() {
        if job.post_id == post_id {
            job.run_at = job.run_at - Duration::hours(hours);
        }
    }
}

#[tokio::test]
async fn creating_a_post_schedules_its_deletion_a_day_out() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;
    let post_id = create_post(&app, &token, "T").await;

    let jobs: Vec<_> = app.db.jobs.iter().map(|j| j.clone()).collect();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].post_id, post_id);
    assert!(jobs[0].completed_at.is_none());

    let created_at = app.db.posts.get(&post_id).unwrap().created_at;
    assert_eq!(jobs[0].run_at, created_at + post_ttl());
}

#[tokio::test]
async fn sweeper_leaves_unripe_jobs_alone() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;
    let post_id = create_post(&app, &token, "T").await;

    let deleted = app.sweeper.run_once(Utc::now()).await.unwrap();
    assert_eq!(deleted, 0);
    assert!(app.db.posts.get(&post_id).is_some());
    assert!(app.db.jobs.iter().all(|j| j.completed_at.is_none()));
}

#[tokio::test]
async fn expired_post_is_deleted_with_its_comments() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;
    let post_id = create_post(&app, &token, "T").await;
    integration_tests::create_comment(&app, &token, post_id, "doomed").await;

    backdate(&app, post_id, 25);
    let deleted = app.sweeper.run_once(Utc::now()).await.unwrap();
    assert_eq!(deleted, 1);
    assert!(app.db.posts.get(&post_id).is_none());
    assert!(app.db.comments.is_empty());
}

#[tokio::test]
async fn firing_after_the_owner_already_deleted_is_a_no_op() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;
    let post_id = create_post(&app, &token, "T").await;

    integration_tests::request(
        &app,
        "DELETE",
        &format!("/posts/{post_id}"),
        Some(&token),
        None,
    )
    .await;

    // The queue entry is still pending; only the fire-time re-check
    // cancels it.
    backdate(&app, post_id, 25);
    let deleted = app.sweeper.run_once(Utc::now()).await.unwrap();
    assert_eq!(deleted, 0);
    assert!(app.db.jobs.iter().all(|j| j.completed_at.is_some()));
}

#[tokio::test]
async fn double_fire_for_the_same_post_never_errors() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;
    let post_id = create_post(&app, &token, "T").await;
    backdate(&app, post_id, 25);

    assert_eq!(app.sweeper.run_once(Utc::now()).await.unwrap(), 1);

    // A manually re-enqueued job for the already-deleted post.
    let job_id = Uuid::new_v4();
    app.db.jobs.insert(
        job_id,
        domains::ScheduledDeletion {
            id: job_id,
            post_id,
            run_at: Utc::now() - Duration::minutes(1),
            completed_at: None,
        },
    );
    assert_eq!(app.sweeper.run_once(Utc::now()).await.unwrap(), 0);
}

#[tokio::test]
async fn a_job_that_fires_early_does_not_delete_or_reschedule() {
    let app = test_app();
    let (_, token) = signup(&app, "a@x.com", "123456").await;
    let post_id = create_post(&app, &token, "T").await;

    // Make only the job due; the post itself stays young.
    for mut job in app.db.jobs.iter_mut() {
        job.run_at = Utc::now() - Duration::minutes(1);
    }
    let jobs_before = app.db.jobs.len();

    let deleted = app.sweeper.run_once(Utc::now()).await.unwrap();
    assert_eq!(deleted, 0);
    assert!(app.db.posts.get(&post_id).is_some());
    // Consumed, not re-queued.
    assert_eq!(app.db.jobs.len(), jobs_before);
    assert!(app.db.jobs.iter().all(|j| j.completed_at.is_some()));
}
