// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/health", get(crate::handlers::health::health_handler))
        .route("/api/auth/login", post(crate::handlers::auth::login_handler))
        .route("/api/categories", get(crate::handlers::categories::list_handler))

        // Users
        .route("/api/users", get(crate::handlers::users::list_handler))
        .route("/api/users", post(crate::handlers::users::create_handler))
        .route("/api/users/{id}", get(crate::handlers::users::get_handler))
        .route("/api/users/{id}", put(crate::handlers::users::update_handler))
        .route("/api/users/{id}", delete(crate::handlers::users::delete_handler))
        .route("/api/users/email/{email}", get(crate::handlers::users::get_by_email_handler))

        // Products (mutations require a bearer token and close the menu
        // to edits during operating hours)
        .route("/api/products", get(crate::handlers::products::list_handler))
        .route("/api/products", post(crate::handlers::products::create_handler))
        .route("/api/products/{id}", get(crate::handlers::products::get_handler))
        .route("/api/products/{id}", put(crate::handlers::products::update_handler))
        .route("/api/products/{id}", delete(crate::handlers::products::delete_handler))
        .route("/api/products/{id}/image", get(crate::handlers::products::image_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{
        CatalogConfig, Config, HoursConfig, JwtConfig, LoggingConfig, ServerConfig,
    };
    use crate::models::auth::TokenResponse;
    use crate::models::product::ProductResponse;
    use crate::models::user::UserResponse;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    use chrono::{Local, NaiveTime};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Operating hours guaranteed not to contain the current local time,
    /// so mutation requests in these tests always pass the hour guard
    fn hours_avoiding_now() -> HoursConfig {
        let now = Local::now().time();
        let afternoon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();

        if now < afternoon {
            HoursConfig {
                opening: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
                closing: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            }
        } else {
            HoursConfig {
                opening: NaiveTime::from_hms_opt(2, 0, 0).unwrap(),
                closing: NaiveTime::from_hms_opt(3, 0, 0).unwrap(),
            }
        }
    }

    /// Operating hours that always contain the current local time,
    /// so the hour guard always rejects
    fn hours_containing_now() -> HoursConfig {
        HoursConfig {
            opening: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            closing: NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
        }
    }

    fn test_config(hours: HoursConfig) -> Config {
        Config {
            server: ServerConfig {
                port: 3000,
                num_threads: 1,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-for-jwt-testing-minimum-32-chars".to_string(),
                issuer: "burguer-api".to_string(),
                audience: "burguer-clients".to_string(),
                expires_minutes: 30,
            },
            hours,
            catalog: CatalogConfig {
                categories: vec!["Burgers".to_string(), "Drinks".to_string()],
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "console".to_string(),
                console: true,
            },
        }
    }

    fn test_app(hours: HoursConfig) -> Router {
        build_router(Arc::new(AppState::new(test_config(hours))))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn authed_json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn register_and_login(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/users",
                json!({"name": "Staff", "email": "staff@burguer.com", "password": "s3cret"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({"email": "staff@burguer.com", "password": "s3cret"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let token: TokenResponse = body_json(response).await;
        token.token
    }

    fn product_body(name: &str) -> Value {
        json!({
            "name": name,
            "price": "19.90",
            "description": "Smashed patty, cheddar, house sauce",
            "image": BASE64.encode([0xffu8, 0xd8, 0xff, 0xe0]),
            "category_ids": [1]
        })
    }

    #[tokio::test]
    async fn test_register_login_and_create_product() {
        let app = test_app(hours_avoiding_now());
        let token = register_and_login(&app).await;

        let response = app
            .clone()
            .oneshot(authed_json_request(
                "POST",
                "/api/products",
                &token,
                product_body("Classic Burger"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let product: ProductResponse = body_json(response).await;
        assert_eq!(product.name, "Classic Burger");
        assert_eq!(product.user_id, 1);
        assert_eq!(product.categories.len(), 1);
        assert_eq!(product.categories[0].name, "Burgers");

        // Visible in the listing
        let response = app
            .clone()
            .oneshot(Request::get("/api/products").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let products: Vec<ProductResponse> = body_json(response).await;
        assert_eq!(products.len(), 1);

        // Image served with the right content type
        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/api/products/{}/image", product.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/jpeg"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.as_ref(), [0xff, 0xd8, 0xff, 0xe0]);
    }

    #[tokio::test]
    async fn test_product_mutations_require_token() {
        let app = test_app(hours_avoiding_now());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/products",
                product_body("Classic Burger"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(
                Request::delete("/api/products/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_product_mutations_rejected_during_operating_hours() {
        let app = test_app(hours_containing_now());
        let token = register_and_login(&app).await;

        let response = app
            .clone()
            .oneshot(authed_json_request(
                "POST",
                "/api/products",
                &token,
                product_body("Classic Burger"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: Value = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("outside operating hours"));
    }

    #[tokio::test]
    async fn test_product_update_and_delete() {
        let app = test_app(hours_avoiding_now());
        let token = register_and_login(&app).await;

        let response = app
            .clone()
            .oneshot(authed_json_request(
                "POST",
                "/api/products",
                &token,
                product_body("Classic Burger"),
            ))
            .await
            .unwrap();
        let created: ProductResponse = body_json(response).await;

        let response = app
            .clone()
            .oneshot(authed_json_request(
                "PUT",
                &format!("/api/products/{}", created.id),
                &token,
                json!({
                    "name": "Double Burger",
                    "price": "24.50",
                    "description": "Two patties",
                    "active": false,
                    "category_ids": [1, 2]
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let updated: ProductResponse = body_json(response).await;
        assert_eq!(updated.name, "Double Burger");
        assert!(!updated.active);
        assert_eq!(updated.categories.len(), 2);

        // Image was not in the update payload, so it is kept
        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/api/products/{}/image", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(
                Request::delete(format!("/api/products/{}", created.id))
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/api/products/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_product_validation_errors() {
        let app = test_app(hours_avoiding_now());
        let token = register_and_login(&app).await;

        // Unknown category
        let mut body = product_body("Classic Burger");
        body["category_ids"] = json!([99]);
        let response = app
            .clone()
            .oneshot(authed_json_request("POST", "/api/products", &token, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Negative price
        let mut body = product_body("Classic Burger");
        body["price"] = json!("-1.00");
        let response = app
            .clone()
            .oneshot(authed_json_request("POST", "/api/products", &token, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Duplicate name
        let response = app
            .clone()
            .oneshot(authed_json_request(
                "POST",
                "/api/products",
                &token,
                product_body("Classic Burger"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(authed_json_request(
                "POST",
                "/api/products",
                &token,
                product_body("Classic Burger"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials_identically() {
        let app = test_app(hours_avoiding_now());
        register_and_login(&app).await;

        let missing = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({"email": "missing@x.com", "password": "anything"}),
            ))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        let missing_body: Value = body_json(missing).await;

        let wrong = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                json!({"email": "staff@burguer.com", "password": "wrongpass"}),
            ))
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        let wrong_body: Value = body_json(wrong).await;

        assert_eq!(missing_body["error"], wrong_body["error"]);
    }

    #[tokio::test]
    async fn test_user_crud() {
        let app = test_app(hours_avoiding_now());

        // Duplicate email rejected
        let first = json!({"name": "Ana", "email": "ana@x.com", "password": "pw1"});
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/users", first.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: UserResponse = body_json(response).await;

        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/users", first))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Invalid email rejected
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/users",
                json!({"name": "Bob", "email": "not-an-email", "password": "pw"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Lookup by email
        let response = app
            .clone()
            .oneshot(
                Request::get("/api/users/email/ana@x.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Update
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/users/{}", created.id),
                json!({"name": "Ana Maria", "email": "ana@x.com", "password": "pw2"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated: UserResponse = body_json(response).await;
        assert_eq!(updated.name, "Ana Maria");

        // Delete deactivates but keeps the record
        let response = app
            .clone()
            .oneshot(
                Request::delete(format!("/api/users/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/api/users/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let after: UserResponse = body_json(response).await;
        assert!(!after.active);

        // The email is still taken by the deactivated account
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/users",
                json!({"name": "Ana 2", "email": "ana@x.com", "password": "pw"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_categories_listing() {
        let app = test_app(hours_avoiding_now());

        let response = app
            .clone()
            .oneshot(Request::get("/api/categories").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let categories: Vec<crate::models::category::Category> = body_json(response).await;
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "Burgers");
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let app = test_app(hours_avoiding_now());

        let response = app
            .clone()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body: Value = body_json(response).await;
        assert_eq!(body["success"], json!(false));
    }
}
