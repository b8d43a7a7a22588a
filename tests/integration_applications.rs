mod common;

use axum::http::StatusCode;
use common::{
    application_body, headmaster_token, json_request, register_student, secretary_token, send,
    setup_test_app, submit_application, token_for,
};
use serde_json::json;
use shule::modules::applications::service::ApplicationService;
use shule::shule_config::DatabaseConfig;
use shule::shule_core::{AuthContext, Role};
use shule::shule_models::{CompletePaymentDto, EducationLevel, SubmitApplicationDto};
use sqlx::SqlitePool;

async fn row_counts(pool: &SqlitePool) -> (i64, i64, i64) {
    sqlx::query_as(
        "SELECT (SELECT COUNT(*) FROM applications),
                (SELECT COUNT(*) FROM students),
                (SELECT COUNT(*) FROM registration_counters)",
    )
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_application_is_pending_with_control_number(pool: SqlitePool) {
    let app = setup_test_app(pool);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/applications/primary",
            None,
            Some(application_body("Juma Ali")),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "Pending");
    assert_eq!(body["level"], "PRIMARY");
    assert_eq!(body["student_name"], "Juma Ali");
    assert!(body["payment_proof"].is_null());
    assert!(body["notes"].is_null());

    let control_number = body["control_number"].as_str().unwrap();
    assert!(control_number.starts_with("PL"));
    assert_eq!(control_number.len(), 16);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_accepts_level_aliases(pool: SqlitePool) {
    let app = setup_test_app(pool);

    for (alias, level) in [
        ("KG", "KG"),
        ("nursery", "KG"),
        ("o-level", "OLEVEL"),
        ("A_LEVEL", "ALEVEL"),
    ] {
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                &format!("/api/applications/{alias}"),
                None,
                Some(application_body("Mwanaisha Said")),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "alias {alias}");
        assert_eq!(body["level"], level);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_unknown_level_is_bad_request(pool: SqlitePool) {
    let app = setup_test_app(pool.clone());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/applications/university",
            None,
            Some(application_body("Juma Ali")),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("university"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_missing_or_blank_field_is_unprocessable(pool: SqlitePool) {
    let app = setup_test_app(pool.clone());

    let mut missing = application_body("Juma Ali");
    missing.as_object_mut().unwrap().remove("parent_phone");
    let (status, _) = send(
        &app,
        json_request("POST", "/api/applications/kg", None, Some(missing)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/applications/kg",
            None,
            Some(application_body("   ")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/applications/kg",
            None,
            Some(application_body(&"x".repeat(101))),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM applications")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_staff_cannot_submit_applications(pool: SqlitePool) {
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/applications/kg",
            Some(&secretary_token()),
            Some(application_body("Juma Ali")),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_token_is_rejected_not_downgraded(pool: SqlitePool) {
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/applications/kg",
            Some("not-a-token"),
            Some(application_body("Juma Ali")),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_payment_instructions_show_fee_and_channels(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let id = submit_application(&app, "olevel", "Hamisi Omar").await;

    let (status, body) = send(
        &app,
        json_request("GET", &format!("/api/payments/{id}"), None, None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["application_id"], id);
    assert_eq!(body["amount_tzs"], 70_000);
    assert_eq!(body["level"], "OLEVEL");
    assert_eq!(body["channels"][0]["name"], "NMB");
    assert_eq!(body["channels"][0]["account_name"], "Test School");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_payment_instructions_unknown_application(pool: SqlitePool) {
    let app = setup_test_app(pool);

    let (status, _) = send(&app, json_request("GET", "/api/payments/999", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_complete_payment_without_body(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let id = submit_application(&app, "kg", "Zuhura Ali").await;

    let (status, body) = send(
        &app,
        json_request("POST", &format!("/api/payments/{id}/complete"), None, None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Completed");
    assert!(body["payment_proof"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_complete_payment_is_idempotent_and_keeps_proof(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let id = submit_application(&app, "kg", "Zuhura Ali").await;
    let uri = format!("/api/payments/{id}/complete");

    let (status, body) = send(
        &app,
        json_request("POST", &uri, None, Some(json!({ "payment_proof": "MPESA-8812" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_proof"], "MPESA-8812");

    let (status, body) = send(&app, json_request("POST", &uri, None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Completed");
    assert_eq!(body["payment_proof"], "MPESA-8812");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_complete_payment_unknown_application(pool: SqlitePool) {
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/payments/42/complete", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_complete_payment_after_decision_is_conflict(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let id = submit_application(&app, "primary", "Said Bakari").await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/secretary/applications/{id}/reject"),
            Some(&secretary_token()),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        json_request("POST", &format!("/api/payments/{id}/complete"), None, None),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reject_with_and_without_reason(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let token = secretary_token();

    let first = submit_application(&app, "kg", "Amina Hassan").await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/secretary/applications/{first}/reject"),
            Some(&token),
            Some(json!({ "reason": "Age requirement not met" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Rejected");
    assert_eq!(body["notes"], "Age requirement not met");
    assert!(body["reviewed_at"].is_string());

    let second = submit_application(&app, "kg", "Ali Mussa").await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/secretary/applications/{second}/reject"),
            Some(&token),
            Some(json!({ "reason": "   " })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notes"], "Maombi yamekataliwa bila maelezo");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_reject_twice_is_conflict_and_keeps_first_note(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let token = secretary_token();
    let id = submit_application(&app, "alevel", "Fatma Khamis").await;
    let uri = format!("/api/secretary/applications/{id}/reject");

    let (status, _) = send(
        &app,
        json_request("POST", &uri, Some(&token), Some(json!({ "reason": "first" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        json_request("POST", &uri, Some(&token), Some(json!({ "reason": "second" }))),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(
        &app,
        json_request(
            "GET",
            &format!("/api/secretary/applications/{id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(body["notes"], "first");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_approved_application_cannot_be_rejected(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let id = submit_application(&app, "primary", "Rehema Issa").await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/secretary/applications/{id}/approve"),
            Some(&secretary_token()),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/secretary/applications/{id}/reject"),
            Some(&secretary_token()),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_review_unknown_application_is_not_found(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let token = secretary_token();

    for (method, uri) in [
        ("GET", "/api/secretary/applications/77"),
        ("POST", "/api/secretary/applications/77/approve"),
        ("POST", "/api/secretary/applications/77/reject"),
    ] {
        let (status, _) = send(&app, json_request(method, uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_decisions_on_unknown_application_leave_store_unchanged(pool: SqlitePool) {
    let app = setup_test_app(pool.clone());
    let token = secretary_token();
    let id = submit_application(&app, "primary", "Bakari Said").await;
    let before = row_counts(&pool).await;
    assert_eq!(before, (1, 0, 0));

    for uri in [
        "/api/secretary/applications/9999/approve",
        "/api/secretary/applications/9999/reject",
    ] {
        let (status, _) = send(&app, json_request("POST", uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }

    assert_eq!(row_counts(&pool).await, before);
    let (status, body) = send(
        &app,
        json_request(
            "GET",
            &format!("/api/secretary/applications/{id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Pending");
    assert!(body["notes"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_review_requires_secretary(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let id = submit_application(&app, "kg", "Juma Ali").await;
    let uri = format!("/api/secretary/applications/{id}/approve");

    let (status, _) = send(&app, json_request("POST", &uri, None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request("POST", &uri, Some(&headmaster_token()), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let parent = token_for(Role::Parent, "25KG001");
    let (status, _) = send(&app, json_request("POST", &uri, Some(&parent), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        json_request("GET", "/api/secretary/applications", Some(&headmaster_token()), None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_applications_filters_and_paginates(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let token = secretary_token();

    submit_application(&app, "kg", "Kid One").await;
    submit_application(&app, "kg", "Kid Two").await;
    let primary = submit_application(&app, "primary", "Pupil One").await;
    send(
        &app,
        json_request("POST", &format!("/api/payments/{primary}/complete"), None, None),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request("GET", "/api/secretary/applications", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["data"][0]["id"], primary);

    let (_, body) = send(
        &app,
        json_request(
            "GET",
            "/api/secretary/applications?level=kg",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(body["meta"]["total"], 2);

    let (_, body) = send(
        &app,
        json_request(
            "GET",
            "/api/secretary/applications?status=completed",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["student_name"], "Pupil One");

    let (_, body) = send(
        &app,
        json_request(
            "GET",
            "/api/secretary/applications?limit=1&page=2",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["page"], 2);
    assert_eq!(body["meta"]["has_more"], true);

    let (status, _) = send(
        &app,
        json_request(
            "GET",
            "/api/secretary/applications?status=archived",
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_approve_returns_student_without_password(pool: SqlitePool) {
    let app = setup_test_app(pool);

    let student = register_student(&app, "alevel", "Khadija Salim").await;

    assert_eq!(student["full_name"], "Khadija Salim");
    assert_eq!(student["level"], "ALEVEL");
    assert_eq!(student["status"], "Active");
    assert!(student.get("password").is_none());
    let reg = student["registration_number"].as_str().unwrap();
    assert_eq!(&reg[2..], "AL001");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_approved_student_copies_application_fields(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let token = secretary_token();
    let id = submit_application(&app, "olevel", "Rehema Mussa").await;

    let (_, application) = send(
        &app,
        json_request(
            "GET",
            &format!("/api/secretary/applications/{id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    let (status, student) = send(
        &app,
        json_request(
            "POST",
            &format!("/api/secretary/applications/{id}/approve"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    assert_eq!(student["full_name"], application["student_name"]);
    for field in [
        "birth_date",
        "address",
        "level",
        "parent_name",
        "parent_phone",
        "parent_email",
    ] {
        assert_eq!(student[field], application[field], "{field}");
    }
    assert_eq!(student["application_id"], id);
    assert_eq!(student["birth_date"], "2016-04-12");
    assert_eq!(student["parent_email"], "asha@example.com");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_huge_page_and_offset_return_empty_page(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let token = secretary_token();
    submit_application(&app, "kg", "Kid One").await;

    for uri in [
        "/api/secretary/applications?page=9223372036854775807",
        "/api/secretary/applications?offset=9223372036854775807",
        "/api/secretary/students?page=9223372036854775807",
    ] {
        let (status, body) = send(&app, json_request("GET", uri, Some(&token), None)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert!(body["data"].as_array().unwrap().is_empty(), "{uri}");
        assert_eq!(body["meta"]["has_more"], false, "{uri}");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_checks_level_and_caller_before_body(pool: SqlitePool) {
    let app = setup_test_app(pool);
    let bad_body = json!({ "student_name": "" });

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/applications/kg",
            Some(&secretary_token()),
            Some(bad_body.clone()),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/applications/college", None, Some(bad_body.clone())),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/applications/kg", None, Some(bad_body)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn test_repeated_payment_confirmation_counted_once() {
    let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    metrics::with_local_recorder(&recorder, || {
        runtime.block_on(async {
            let config = DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            };
            let pool = shule::shule_db::init_db_pool(&config).await.unwrap();
            shule::shule_db::run_migrations(&pool).await.unwrap();

            let parent = AuthContext::anonymous();
            let dto = SubmitApplicationDto {
                student_name: "Zuhura Ali".to_string(),
                birth_date: "2012-06-01".to_string(),
                address: "Chake Chake".to_string(),
                parent_name: "Ali Omar".to_string(),
                parent_phone: "0777123456".to_string(),
                parent_email: "ali@example.com".to_string(),
            };
            let id = ApplicationService::submit(&pool, &parent, EducationLevel::OLevel, dto)
                .await
                .unwrap()
                .id;

            for proof in [None, Some("receipt-1.jpg"), Some("receipt-2.jpg")] {
                let dto = CompletePaymentDto {
                    payment_proof: proof.map(str::to_string),
                };
                ApplicationService::mark_payment_completed(&pool, &parent, id, dto)
                    .await
                    .unwrap();
            }
        })
    });

    let rendered = handle.render();
    assert!(
        rendered.contains(r#"applications_payment_completed_total{level="OLEVEL"} 1"#),
        "{rendered}"
    );
}
