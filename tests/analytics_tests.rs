use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

use portal::database::models::{
    ActivityType, AnnouncementInput, CreateActivityInput, DailyCount, ServiceInput, TopService,
};
use portal::middleware::RequestInfo;

#[macro_use]
mod common;

use common::{auth_header, data_as, read_envelope};

fn click_on_service(service_id: i64) -> CreateActivityInput {
    CreateActivityInput {
        activity_type: ActivityType::CLICK.to_string(),
        service_id: Some(service_id),
        ..Default::default()
    }
}

async fn seed_service(ctx: &common::TestContext, name: &str) -> i64 {
    ctx.state
        .service_repository
        .create_service(ServiceInput {
            name: name.to_string(),
            description: format!("{} description", name),
            status: "Active".to_string(),
            file_path: String::new(),
            image_path: String::new(),
            user_id: None,
            category_id: None,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_track_visit_records_client_details() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();

    let info = RequestInfo {
        user_agent: Some("Mozilla/5.0".to_string()),
        ip_address: Some("203.0.113.9".to_string()),
        method: "POST".to_string(),
        path: "/api/analytics/visit".to_string(),
    };

    let activity = ctx
        .state
        .activity_tracker
        .track_visit(Some("/services".to_string()), &info)
        .await
        .unwrap();

    assert_eq!(activity.activity_type, "visit");
    assert_eq!(activity.page.as_deref(), Some("/services"));
    assert_eq!(activity.ip_address.as_deref(), Some("203.0.113.9"));
    assert_eq!(activity.user_agent.as_deref(), Some("Mozilla/5.0"));
}

#[tokio::test]
async fn test_top_services_counts_clicks_inside_window() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let permits = seed_service(&ctx, "Business Permit").await;
    let cedula = seed_service(&ctx, "Cedula").await;
    let repo = portal::database::repositories::ActivityRepository::new(ctx.pool.clone());

    for _ in 0..3 {
        repo.log_activity(click_on_service(permits)).await.unwrap();
    }
    repo.log_activity(click_on_service(cedula)).await.unwrap();
    // Outside a 30 day window
    for _ in 0..5 {
        repo.log_activity_at(click_on_service(cedula), Utc::now() - Duration::days(45))
            .await
            .unwrap();
    }
    // Visits are not clicks
    repo.log_activity(CreateActivityInput {
        activity_type: ActivityType::VISIT.to_string(),
        service_id: Some(cedula),
        ..Default::default()
    })
    .await
    .unwrap();

    let top = ctx
        .state
        .activity_tracker
        .top_services(None, None)
        .await
        .unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].service_name, "Business Permit");
    assert_eq!(top[0].clicks, 3);
    assert_eq!(top[1].clicks, 1);

    let wide = ctx
        .state
        .activity_tracker
        .top_services(Some(60), Some(1))
        .await
        .unwrap();
    assert_eq!(wide.len(), 1);
    assert_eq!(wide[0].service_id, cedula);
    assert_eq!(wide[0].clicks, 6);
}

#[tokio::test]
async fn test_daily_visits_are_grouped_by_day() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let repo = portal::database::repositories::ActivityRepository::new(ctx.pool.clone());

    let visit = || CreateActivityInput {
        activity_type: ActivityType::VISIT.to_string(),
        page: Some("/".to_string()),
        ..Default::default()
    };

    let two_days_ago = Utc::now() - Duration::days(2);
    let yesterday = Utc::now() - Duration::days(1);
    repo.log_activity_at(visit(), two_days_ago).await.unwrap();
    repo.log_activity_at(visit(), yesterday).await.unwrap();
    repo.log_activity_at(visit(), yesterday).await.unwrap();
    repo.log_activity_at(visit(), Utc::now() - Duration::days(90))
        .await
        .unwrap();

    let daily = ctx
        .state
        .activity_tracker
        .daily_activity(Some(7))
        .await
        .unwrap();

    assert_eq!(
        daily,
        vec![
            DailyCount {
                date: two_days_ago.format("%Y-%m-%d").to_string(),
                count: 1,
            },
            DailyCount {
                date: yesterday.format("%Y-%m-%d").to_string(),
                count: 2,
            },
        ]
    );
}

#[actix_web::test]
async fn test_analytics_endpoints() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let (user, token) = ctx.create_user_with_token().await;
    let service_id = seed_service(&ctx, "Health Certificate").await;
    let announcement = ctx
        .state
        .announcement_service
        .create(AnnouncementInput {
            name: "Blood Drive".to_string(),
            description: "Saturday at the plaza".to_string(),
            is_urgent: false,
            platform: "website".to_string(),
            user_id: user.id,
            links: None,
            image: None,
        })
        .await
        .unwrap();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/analytics/visit")
        .insert_header(("user-agent", "integration-test"))
        .set_json(json!({ "page": "/announcements" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let envelope = read_envelope(resp).await;
    assert_eq!(envelope.data, Some(json!({ "status": "success" })));

    for body in [
        json!({ "announcement_id": announcement.id }),
        json!({ "announcement_id": announcement.id }),
        json!({ "activity_type": "click", "service_id": service_id }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/analytics/interaction")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri("/api/analytics/top-announcements?days=7")
        .insert_header(auth_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let envelope = read_envelope(resp).await;
    let top = envelope.data.unwrap();
    assert_eq!(top[0]["announcement_name"], "Blood Drive");
    assert_eq!(top[0]["clicks"], 2);

    let req = test::TestRequest::get()
        .uri("/api/analytics/top-services")
        .insert_header(auth_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let services: Vec<TopService> = data_as(&read_envelope(resp).await);
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].service_id, service_id);

    let req = test::TestRequest::get()
        .uri("/api/analytics/daily")
        .insert_header(auth_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let daily: Vec<DailyCount> = data_as(&read_envelope(resp).await);
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0].count, 1);

    let req = test::TestRequest::get()
        .uri("/api/analytics/daily?days=0")
        .insert_header(auth_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_reports_reject_windows_beyond_the_calendar() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let (_, token) = ctx.create_user_with_token().await;
    let app = test_app!(ctx);

    let err = ctx
        .state
        .activity_tracker
        .daily_activity(Some(100_000_000))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "days is out of range");

    for uri in [
        "/api/analytics/daily?days=100000000",
        "/api/analytics/top-services?days=100000000",
        "/api/analytics/top-announcements?days=9223372036854775807",
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(auth_header(&token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}
