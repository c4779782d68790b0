//! Integration tests for monthly report submission, locking and review.
//!
//! These tests run against a real PostgreSQL database (TEST_DATABASE_URL).

mod common;

use axum::http::{Method, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use common::*;

fn june(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
}

/// Seed a trainer's June: 12 completed pt/inside, 3 no_show_deducted
/// ot/outside, 5 reserved pt/inside.
async fn seed_june_month(pool: &PgPool, trainer_id: Uuid, gym_id: Uuid) -> Vec<Uuid> {
    let mut ids = Vec::new();
    for day in 1..=12 {
        ids.push(
            insert_schedule(pool, trainer_id, gym_id, None, june(day, 10), "completed", "pt", "inside")
                .await,
        );
    }
    for day in 13..=15 {
        ids.push(
            insert_schedule(pool, trainer_id, gym_id, None, june(day, 10), "no_show_deducted", "ot", "outside")
                .await,
        );
    }
    for day in 16..=20 {
        ids.push(
            insert_schedule(pool, trainer_id, gym_id, None, june(day, 10), "reserved", "pt", "inside")
                .await,
        );
    }
    ids
}

#[tokio::test]
async fn test_submit_snapshots_stats_and_locks_entries() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let gym_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let trainer_id = insert_staff(&pool, "trainer", gym_id, company_id, true).await;
    let entry_ids = seed_june_month(&pool, trainer_id, gym_id).await;

    let token = auth_token(&config, trainer_id);
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/reports/submit",
        serde_json::json!({"year_month": "2025-06"}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["locked_entries"], 20);
    assert_eq!(body["report"]["status"], "submitted");
    assert_eq!(body["report"]["year_month"], "2025-06");

    let stats = &body["report"]["stats"];
    assert_eq!(stats["total"], 20);
    assert_eq!(stats["status_completed"], 12);
    assert_eq!(stats["status_no_show_deducted"], 3);
    assert_eq!(stats["status_reserved"], 5);
    assert_eq!(stats["pt_inside"], 17);
    assert_eq!(stats["ot_outside"], 3);
    assert_eq!(stats["pt_outside"], 0);

    for id in entry_ids {
        assert!(schedule_is_locked(&pool, id).await);
    }
}

#[tokio::test]
async fn test_reject_unlocks_and_resubmission_resets_review() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let gym_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let trainer_id = insert_staff(&pool, "trainer", gym_id, company_id, true).await;
    let manager_id = insert_staff(&pool, "manager", gym_id, company_id, true).await;
    let entry_ids = seed_june_month(&pool, trainer_id, gym_id).await;

    let trainer_token = auth_token(&config, trainer_id);
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/reports/submit",
        serde_json::json!({"year_month": "2025-06"}),
        &trainer_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    let report_id = body["report"]["id"].as_str().unwrap().to_string();

    // Manager rejects with a memo; entries unlock for correction
    let manager_token = auth_token(&config, manager_id);
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/reports/{}/review", report_id),
        serde_json::json!({"approved": false, "admin_memo": "June 14 looks wrong"}),
        &manager_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["unlocked_entries"], 20);
    assert_eq!(body["reviewed_by"], manager_id.to_string());

    // Trainer can now edit and resubmit
    assert!(!schedule_is_locked(&pool, entry_ids[0]).await);
    let request = json_request_with_auth(
        Method::PATCH,
        &format!("/api/v1/schedules/{}/status", entry_ids[13]),
        serde_json::json!({"status": "no_show"}),
        &trainer_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/reports/submit",
        serde_json::json!({"year_month": "2025-06"}),
        &trainer_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    // Same report row, fresh review state, recomputed stats
    assert_eq!(body["report"]["id"], report_id);
    assert_eq!(body["report"]["status"], "submitted");
    assert!(body["report"].get("reviewed_at").is_none());
    assert!(body["report"].get("admin_memo").is_none());
    assert_eq!(body["report"]["stats"]["status_no_show_deducted"], 2);
    assert_eq!(body["report"]["stats"]["status_no_show"], 1);
}

#[tokio::test]
async fn test_approve_keeps_locks_and_review_is_final() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let gym_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let trainer_id = insert_staff(&pool, "trainer", gym_id, company_id, true).await;
    let manager_id = insert_staff(&pool, "manager", gym_id, company_id, true).await;
    let entry_ids = seed_june_month(&pool, trainer_id, gym_id).await;

    let trainer_token = auth_token(&config, trainer_id);
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/reports/submit",
        serde_json::json!({"year_month": "2025-06"}),
        &trainer_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    let report_id = body["report"]["id"].as_str().unwrap().to_string();

    let manager_token = auth_token(&config, manager_id);
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/reports/{}/review", report_id),
        serde_json::json!({"approved": true}),
        &manager_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "approved");
    assert_eq!(body["unlocked_entries"], 0);

    // Approval leaves entries locked
    assert!(schedule_is_locked(&pool, entry_ids[0]).await);
    let request = json_request_with_auth(
        Method::PATCH,
        &format!("/api/v1/schedules/{}/status", entry_ids[0]),
        serde_json::json!({"status": "cancelled"}),
        &trainer_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A second review of the same report conflicts
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/reports/{}/review", report_id),
        serde_json::json!({"approved": false}),
        &manager_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_review_scope_trainer_denied_owner_spans_company() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let gym_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let trainer_id = insert_staff(&pool, "trainer", gym_id, company_id, true).await;
    seed_june_month(&pool, trainer_id, gym_id).await;

    let trainer_token = auth_token(&config, trainer_id);
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/reports/submit",
        serde_json::json!({"year_month": "2025-06"}),
        &trainer_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    let report_id = body["report"]["id"].as_str().unwrap().to_string();

    // Trainers never review, not even their own report
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/reports/{}/review", report_id),
        serde_json::json!({"approved": true}),
        &trainer_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A manager from another gym is out of scope
    let other_gym_manager =
        insert_staff(&pool, "manager", Uuid::new_v4(), company_id, true).await;
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/reports/{}/review", report_id),
        serde_json::json!({"approved": true}),
        &auth_token(&config, other_gym_manager),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // An owner reviews any gym within the company
    let owner_id = insert_staff(&pool, "owner", Uuid::new_v4(), company_id, true).await;
    let request = json_request_with_auth(
        Method::POST,
        &format!("/api/v1/reports/{}/review", report_id),
        serde_json::json!({"approved": true}),
        &auth_token(&config, owner_id),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_get_report_visible_to_submitter_and_reviewers_only() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let gym_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let trainer_id = insert_staff(&pool, "trainer", gym_id, company_id, true).await;
    seed_june_month(&pool, trainer_id, gym_id).await;

    let trainer_token = auth_token(&config, trainer_id);
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/reports/submit",
        serde_json::json!({"year_month": "2025-06"}),
        &trainer_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let body = parse_response_body(response).await;
    let report_id = body["report"]["id"].as_str().unwrap().to_string();

    // Submitter sees their own report
    let request = get_request_with_auth(&format!("/api/v1/reports/{}", report_id), &trainer_token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["staff_id"], trainer_id.to_string());

    // Another trainer in the same gym does not
    let other_trainer = insert_staff(&pool, "trainer", gym_id, company_id, true).await;
    let request = get_request_with_auth(
        &format!("/api/v1/reports/{}", report_id),
        &auth_token(&config, other_trainer),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // A manager from a different company does not
    let foreign_manager =
        insert_staff(&pool, "manager", Uuid::new_v4(), Uuid::new_v4(), true).await;
    let request = get_request_with_auth(
        &format!("/api/v1/reports/{}", report_id),
        &auth_token(&config, foreign_manager),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_own_report_lookup_by_month() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let gym_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let trainer_id = insert_staff(&pool, "trainer", gym_id, company_id, true).await;
    let token = auth_token(&config, trainer_id);

    // An unsubmitted month reads as not found
    let request = get_request_with_auth("/api/v1/reports?year_month=2025-06", &token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    seed_june_month(&pool, trainer_id, gym_id).await;
    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/reports/submit",
        serde_json::json!({"year_month": "2025-06"}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let request = get_request_with_auth("/api/v1/reports?year_month=2025-06", &token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["staff_id"], trainer_id.to_string());
    assert_eq!(body["year_month"], "2025-06");
    assert_eq!(body["status"], "submitted");
}

#[tokio::test]
async fn test_concurrent_submissions_converge_to_one_report() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let gym_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let trainer_id = insert_staff(&pool, "trainer", gym_id, company_id, true).await;
    let entry_ids = seed_june_month(&pool, trainer_id, gym_id).await;

    let token = auth_token(&config, trainer_id);
    let mut handles = Vec::new();
    for _ in 0..5 {
        let app = app.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            let request = json_request_with_auth(
                Method::POST,
                "/api/v1/reports/submit",
                serde_json::json!({"year_month": "2025-06"}),
                &token,
            );
            app.oneshot(request).await.unwrap().status()
        }));
    }

    // Losers of the serialization race surface as conflicts; at least one
    // submission must win
    let mut succeeded = 0;
    for handle in handles {
        let status = handle.await.unwrap();
        assert!(
            status == StatusCode::OK || status == StatusCode::CONFLICT,
            "unexpected status {}",
            status
        );
        if status == StatusCode::OK {
            succeeded += 1;
        }
    }
    assert!(succeeded >= 1);

    let reports: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM monthly_reports WHERE staff_id = $1 AND year_month = '2025-06'",
    )
    .bind(trainer_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(reports, 1);

    // Whichever submission won, the stats snapshot and the locked set agree
    let stats_total: i64 =
        sqlx::query_scalar("SELECT (stats->>'total')::bigint FROM monthly_reports WHERE staff_id = $1")
            .bind(trainer_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(stats_total, 20);
    for id in entry_ids {
        assert!(schedule_is_locked(&pool, id).await);
    }
}

#[tokio::test]
async fn test_submit_rejects_malformed_period() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let gym_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let trainer_id = insert_staff(&pool, "trainer", gym_id, company_id, true).await;
    let token = auth_token(&config, trainer_id);

    for bad in ["2025-13", "2025-6", "June 2025"] {
        let request = json_request_with_auth(
            Method::POST,
            "/api/v1/reports/submit",
            serde_json::json!({"year_month": bad}),
            &token,
        );
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "period {}", bad);
    }
}

#[tokio::test]
async fn test_submitting_an_empty_month_locks_nothing() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    let config = test_config();
    let app = create_test_app(config.clone(), pool.clone());

    let gym_id = Uuid::new_v4();
    let company_id = Uuid::new_v4();
    let trainer_id = insert_staff(&pool, "trainer", gym_id, company_id, true).await;
    let token = auth_token(&config, trainer_id);

    let request = json_request_with_auth(
        Method::POST,
        "/api/v1/reports/submit",
        serde_json::json!({"year_month": "2025-02"}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["locked_entries"], 0);
    assert_eq!(body["report"]["stats"]["total"], 0);
}
