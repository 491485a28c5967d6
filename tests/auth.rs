use actix_web::{test, web, App};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

use taskboard::auth::{verify_password, AuthMiddleware};
use taskboard::config::{Config, RetryPolicy};
use taskboard::routes;
use taskboard::store::{MemoryStore, Store};

const SECRET: &str = "integration-test-secret";

fn test_config() -> Config {
    Config {
        database_url: String::new(),
        server_port: 0,
        server_host: "127.0.0.1".to_string(),
        jwt_secret: SECRET.to_string(),
        strict_status: false,
        connect_retry: RetryPolicy::default(),
    }
}

fn shared_store() -> (Arc<MemoryStore>, web::Data<dyn Store>) {
    let store = Arc::new(MemoryStore::new());
    let data = web::Data::from(store.clone() as Arc<dyn Store>);
    (store, data)
}

macro_rules! init_app {
    ($store_data:expr) => {
        test::init_service(
            App::new()
                .app_data($store_data.clone())
                .app_data(web::Data::new(test_config()))
                .service(routes::health::health)
                .service(
                    web::scope("/api")
                        .wrap(AuthMiddleware::new(SECRET))
                        .configure(routes::config),
                ),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_register_and_login_flow() {
    let (_, store_data) = shared_store();
    let app = init_app!(store_data);

    // Register a new user
    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "username": "alice",
            "email": "a@x.com",
            "password": "pw1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User created");

    // Login with the same credentials
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": "a@x.com", "password": "pw1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["token"].as_str().unwrap().contains('.'));
    assert_eq!(body["user"]["id"], 1);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["email"], "a@x.com");
    assert_eq!(body["user"]["role"], "Developper");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[actix_rt::test]
async fn test_login_failure_messages_are_distinct() {
    let (_, store_data) = shared_store();
    let app = init_app!(store_data);

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "username": "bob",
            "email": "b@x.com",
            "password": "hunter2"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    // Wrong password: 400 with its own message
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": "b@x.com", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Incorrect password");

    // Unknown email: same status, different message
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": "nobody@x.com", "password": "hunter2" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Unknown user");
}

#[actix_rt::test]
async fn test_duplicate_email_rejected_generically() {
    let (_, store_data) = shared_store();
    let app = init_app!(store_data);

    let payload = json!({
        "username": "carol",
        "email": "c@x.com",
        "password": "secret"
    });

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(&payload)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let conflict_body: serde_json::Value = test::read_body_json(resp).await;

    // A validation failure produces the exact same error as the conflict.
    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "username": "dave",
            "email": "not-an-email",
            "password": "secret"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let validation_body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(conflict_body, validation_body);
}

#[actix_rt::test]
async fn test_password_stored_only_as_hash() {
    let (store, store_data) = shared_store();
    let app = init_app!(store_data);

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "username": "erin",
            "email": "e@x.com",
            "password": "plaintext-password"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let user = store
        .find_user_by_email("e@x.com")
        .await
        .unwrap()
        .expect("user should be persisted");

    assert_ne!(user.password_hash, "plaintext-password");
    assert!(verify_password("plaintext-password", &user.password_hash).unwrap());
}

#[actix_rt::test]
async fn test_profile_update_requires_ownership() {
    let (_, store_data) = shared_store();
    let app = init_app!(store_data);

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "username": "frank",
            "email": "f@x.com",
            "password": "pw"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": "f@x.com", "password": "pw" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().unwrap().to_string();
    let user_id = body["user"]["id"].as_i64().unwrap();

    // No token: rejected by the middleware
    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", user_id))
        .set_json(json!({ "username": "franklin", "role": "Lead" }))
        .to_request();
    let resp = test::try_call_service(&app, req).await;
    assert_eq!(resp.unwrap_err().error_response().status(), 401);

    // Someone else's profile: forbidden
    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", user_id + 1))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "username": "franklin", "role": "Lead" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    // Own profile: username and role overwritten, email untouched
    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", user_id))
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "username": "franklin", "role": "Lead" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "franklin");
    assert_eq!(body["role"], "Lead");
    assert_eq!(body["email"], "f@x.com");
    assert!(body.get("password_hash").is_none());
}
