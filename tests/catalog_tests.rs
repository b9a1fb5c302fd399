use actix_web::{http::StatusCode, test};
use pretty_assertions::assert_eq;
use serde_json::json;

use portal::database::models::{
    BusinessInfo, Category, Faq, RequirementDetail, Service, ServiceCategoryDetail,
    ServiceCategoryInput, ServiceDetail, ServiceInput,
};

#[macro_use]
mod common;

use common::{auth_header, data_as, read_envelope};

fn service_input(name: &str) -> ServiceInput {
    ServiceInput {
        name: name.to_string(),
        description: format!("{} description", name),
        status: "Active".to_string(),
        file_path: String::new(),
        image_path: String::new(),
        user_id: None,
        category_id: None,
    }
}

#[actix_web::test]
async fn test_service_crud_flow() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let (user, token) = ctx.create_user_with_token().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/services")
        .insert_header(auth_header(&token))
        .set_json(json!({
            "name": "Business Permit",
            "description": "Apply for or renew a business permit",
            "user_id": user.id,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let envelope = read_envelope(resp).await;
    assert_eq!(envelope.message, "Service Created Successfully");
    let service: Service = data_as(&envelope);
    assert_eq!(service.status, "Active");
    assert_eq!(service.user_id, Some(user.id));
    assert_eq!(service.category_id, None);

    // Same name again
    let req = test::TestRequest::post()
        .uri("/api/services")
        .insert_header(auth_header(&token))
        .set_json(json!({ "name": "Business Permit", "description": "dup" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_envelope(resp).await.message, "Service already exists");

    let req = test::TestRequest::get()
        .uri(&format!("/api/services/{}", service.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let detail: ServiceDetail = data_as(&read_envelope(resp).await);
    assert_eq!(detail.service.name, "Business Permit");
    assert!(detail.categories.is_empty());

    let req = test::TestRequest::put()
        .uri(&format!("/api/services/{}", service.id))
        .insert_header(auth_header(&token))
        .set_json(json!({
            "name": "Business Permit Renewal",
            "description": "Renew an existing permit",
            "status": "Inactive",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Service = data_as(&read_envelope(resp).await);
    assert_eq!(updated.name, "Business Permit Renewal");
    assert_eq!(updated.status, "Inactive");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/services/{}", service.id))
        .insert_header(auth_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(read_envelope(resp).await.message, "Service Deleted Successfully");

    let req = test::TestRequest::get()
        .uri(&format!("/api/services/{}", service.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_envelope(resp).await.message, "Service not found");
}

#[actix_web::test]
async fn test_service_references_must_exist() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let (_, token) = ctx.create_user_with_token().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/services")
        .insert_header(auth_header(&token))
        .set_json(json!({ "name": "Cedula", "description": "Community tax", "user_id": 999 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_envelope(resp).await.message, "User not found");

    let req = test::TestRequest::post()
        .uri("/api/services")
        .insert_header(auth_header(&token))
        .set_json(json!({ "name": "Cedula", "description": "Community tax", "category_id": 42 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_envelope(resp).await.message, "Category not found");

    common::assert_record_count(&ctx.pool, "services", 0).await;
}

#[actix_web::test]
async fn test_category_crud_flow() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let (_, token) = ctx.create_user_with_token().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::get().uri("/api/categories").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_envelope(resp).await.message, "No categories found");

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(auth_header(&token))
        .set_json(json!({ "name": "Health", "description": "Health services" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: Category = data_as(&read_envelope(resp).await);
    assert_eq!(category.status, "active");

    let req = test::TestRequest::post()
        .uri("/api/categories")
        .insert_header(auth_header(&token))
        .set_json(json!({ "name": "Health", "description": "again" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_envelope(resp).await.message, "Category already exists");

    let req = test::TestRequest::put()
        .uri(&format!("/api/categories/{}", category.id))
        .insert_header(auth_header(&token))
        .set_json(json!({ "name": "Health", "description": "Clinics", "status": "archived" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Category = data_as(&read_envelope(resp).await);
    assert_eq!(updated.description, "Clinics");
    assert_eq!(updated.status, "archived");

    let req = test::TestRequest::put()
        .uri("/api/categories/999")
        .insert_header(auth_header(&token))
        .set_json(json!({ "name": "Nope", "description": "missing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_envelope(resp).await.message, "Category not found");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/categories/{}", category.id))
        .insert_header(auth_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    common::assert_record_count(&ctx.pool, "categories", 0).await;
}

#[tokio::test]
async fn test_count_existing_checks_ids_in_one_pass() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let services = &ctx.state.service_repository;
    let categories = &ctx.state.service_category_repository;

    let first = services.create_service(service_input("Cedula")).await.unwrap();
    let second = services
        .create_service(service_input("Barangay Clearance"))
        .await
        .unwrap();

    assert_eq!(services.count_existing(&[]).await.unwrap(), 0);
    assert_eq!(
        services.count_existing(&[first.id, second.id]).await.unwrap(),
        2
    );
    assert_eq!(
        services
            .count_existing(&[first.id, second.id, 9_999])
            .await
            .unwrap(),
        2
    );

    let category = categories
        .create_service_category(ServiceCategoryInput {
            name: "Civil Registry".to_string(),
            service_ids: vec![first.id],
        })
        .await
        .unwrap();
    assert_eq!(categories.count_existing(&[category.id]).await.unwrap(), 1);
    assert_eq!(categories.count_existing(&[category.id + 1]).await.unwrap(), 0);
}

#[actix_web::test]
async fn test_service_categories_and_requirements() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let (_, token) = ctx.create_user_with_token().await;
    let permit = ctx
        .state
        .service_repository
        .create_service(service_input("Building Permit"))
        .await
        .unwrap();
    let app = test_app!(ctx);

    // Unknown service ids are rejected
    let req = test::TestRequest::post()
        .uri("/api/service-categories")
        .insert_header(auth_header(&token))
        .set_json(json!({ "name": "New Applicants", "service_ids": [permit.id, 999] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_envelope(resp).await.message, "One or more services not found");

    let req = test::TestRequest::post()
        .uri("/api/service-categories")
        .insert_header(auth_header(&token))
        .set_json(json!({ "name": "New Applicants", "service_ids": [permit.id, permit.id] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let category: ServiceCategoryDetail = data_as(&read_envelope(resp).await);
    assert_eq!(category.service_ids, vec![permit.id]);

    // Requirements need at least one existing category
    let req = test::TestRequest::post()
        .uri("/api/requirements")
        .insert_header(auth_header(&token))
        .set_json(json!({ "name": "Barangay Clearance", "description": "Original copy", "category_ids": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_envelope(resp).await.message, "One or more categories not found");

    let req = test::TestRequest::post()
        .uri("/api/requirements")
        .insert_header(auth_header(&token))
        .set_json(json!({
            "name": "Barangay Clearance",
            "description": "Original copy",
            "category_ids": [category.id],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let requirement: RequirementDetail = data_as(&read_envelope(resp).await);
    assert_eq!(requirement.category_ids, vec![category.id]);

    let req = test::TestRequest::post()
        .uri("/api/requirements")
        .insert_header(auth_header(&token))
        .set_json(json!({
            "name": "Barangay Clearance",
            "description": "dup",
            "category_ids": [category.id],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_envelope(resp).await.message, "Requirement already exists");

    // Blank fields keep their old values
    let req = test::TestRequest::put()
        .uri(&format!("/api/requirements/{}", requirement.requirement.id))
        .insert_header(auth_header(&token))
        .set_json(json!({ "name": "", "description": "Certified true copy", "category_ids": [category.id] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: RequirementDetail = data_as(&read_envelope(resp).await);
    assert_eq!(updated.requirement.name, "Barangay Clearance");
    assert_eq!(updated.requirement.description, "Certified true copy");

    // The service detail now nests the category and its requirement
    let req = test::TestRequest::get()
        .uri(&format!("/api/services/{}", permit.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let detail: ServiceDetail = data_as(&read_envelope(resp).await);
    assert_eq!(detail.categories.len(), 1);
    assert_eq!(detail.categories[0].name, "New Applicants");
    assert_eq!(detail.categories[0].requirements.len(), 1);
    assert_eq!(detail.categories[0].requirements[0].name, "Barangay Clearance");

    // Replacing the service links with an empty list detaches the service
    let req = test::TestRequest::put()
        .uri(&format!("/api/service-categories/{}", category.id))
        .insert_header(auth_header(&token))
        .set_json(json!({ "name": "New Applicants", "service_ids": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let category: ServiceCategoryDetail = data_as(&read_envelope(resp).await);
    assert!(category.service_ids.is_empty());
    assert_eq!(category.requirements.len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/service-categories/{}", category.id))
        .insert_header(auth_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    common::assert_record_count(&ctx.pool, "requirement_categories", 0).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/requirements/{}", requirement.requirement.id))
        .insert_header(auth_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/requirements").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_envelope(resp).await.message, "No requirements found");
}

#[actix_web::test]
async fn test_faq_flow() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let (_, token) = ctx.create_user_with_token().await;
    let service = ctx
        .state
        .service_repository
        .create_service(service_input("Marriage License"))
        .await
        .unwrap();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/faqs")
        .insert_header(auth_header(&token))
        .set_json(json!({ "question": "How long?", "answer": "Ten days", "service_id": 999 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/faqs")
        .insert_header(auth_header(&token))
        .set_json(json!({ "question": "How long?", "answer": "Ten days", "service_id": service.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let faq: Faq = data_as(&read_envelope(resp).await);

    let req = test::TestRequest::post()
        .uri("/api/faqs")
        .insert_header(auth_header(&token))
        .set_json(json!({ "question": "How long?", "answer": "Again", "service_id": service.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_envelope(resp).await.message, "FAQ already exists");

    let req = test::TestRequest::put()
        .uri(&format!("/api/faqs/{}", faq.id))
        .insert_header(auth_header(&token))
        .set_json(json!({ "question": "How long?", "answer": "Ten working days", "service_id": service.id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Faq = data_as(&read_envelope(resp).await);
    assert_eq!(updated.answer, "Ten working days");

    let req = test::TestRequest::get().uri("/api/faqs").to_request();
    let resp = test::call_service(&app, req).await;
    let faqs: Vec<Faq> = data_as(&read_envelope(resp).await);
    assert_eq!(faqs.len(), 1);

    let req = test::TestRequest::delete()
        .uri("/api/faqs/999")
        .insert_header(auth_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_envelope(resp).await.message, "FAQ not found");
}

#[actix_web::test]
async fn test_business_info_flow() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let (_, token) = ctx.create_user_with_token().await;
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/business-info")
        .insert_header(auth_header(&token))
        .set_json(json!({
            "name": "Municipality of San Isidro",
            "logo": "uploads/logo.png",
            "description": "Official portal",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let info: BusinessInfo = data_as(&read_envelope(resp).await);

    let req = test::TestRequest::put()
        .uri(&format!("/api/business-info/{}", info.id))
        .insert_header(auth_header(&token))
        .set_json(json!({
            "name": "Municipality of San Isidro",
            "logo": "uploads/logo-2025.png",
            "description": "Official portal",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: BusinessInfo = data_as(&read_envelope(resp).await);
    assert_eq!(updated.logo, "uploads/logo-2025.png");

    let req = test::TestRequest::put()
        .uri("/api/business-info/999")
        .insert_header(auth_header(&token))
        .set_json(json!({ "name": "x", "logo": "y", "description": "z" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_envelope(resp).await.message, "BusinessInfo not found");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/business-info/{}", info.id))
        .insert_header(auth_header(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    common::assert_record_count(&ctx.pool, "business_info", 0).await;
}
