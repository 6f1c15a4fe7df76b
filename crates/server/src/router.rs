//! Router configuration and server setup.

use std::future::Future;

use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::auth::require_api_key;
use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        // Buildings
        .route("/buildings", get(handlers::list_buildings))
        .route(
            "/buildings/:id/organizations",
            get(handlers::organizations_in_building),
        )
        // Activities
        .route("/activities/tree", get(handlers::activity_tree))
        .route(
            "/activities/:id/organizations",
            get(handlers::organizations_by_activity),
        )
        .route(
            "/activities/:id/tree/organizations",
            get(handlers::organizations_by_activity_tree),
        )
        // Organizations
        .route(
            "/organizations/nearby/radius",
            post(handlers::organizations_in_radius),
        )
        .route(
            "/organizations/nearby/rectangle",
            post(handlers::organizations_in_rectangle),
        )
        .route(
            "/organizations/search/name",
            get(handlers::search_organizations_by_name),
        )
        .route("/organizations/:id", get(handlers::get_organization))
        // Health
        .route("/health", get(handlers::health))
        // Every matched route requires the API key
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    info!("Directory API listening on {}", listener.local_addr()?);
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Directory API stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_API_KEY, ServerConfig};
    use axum::http::{HeaderName, StatusCode};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    fn make_server() -> TestServer {
        let state = AppState::open(ServerConfig::default()).unwrap();
        TestServer::new(create_router(state)).unwrap()
    }

    fn api_key() -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static("x-api-key"),
            HeaderValue::from_static(DEFAULT_API_KEY),
        )
    }

    fn ids(body: &Value) -> Vec<i64> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|org| org["id"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let server = make_server();
        let response = server.get("/buildings").await;
        response.assert_status(StatusCode::UNAUTHORIZED);

        let body: Value = response.json();
        assert_eq!(body, json!({"detail": "Invalid API Key"}));
    }

    #[tokio::test]
    async fn test_wrong_api_key() {
        let server = make_server();
        let response = server
            .get("/organizations/1")
            .add_header(
                HeaderName::from_static("x-api-key"),
                HeaderValue::from_static("wrong"),
            )
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_buildings() {
        let server = make_server();
        let (name, value) = api_key();
        let response = server.get("/buildings").add_header(name, value).await;
        response.assert_status_ok();

        let body: Value = response.json();
        let buildings = body.as_array().unwrap();
        assert_eq!(buildings.len(), 3);
        assert_eq!(buildings[2]["address"], "г. Санкт-Петербург, Невский пр. 10");
        assert!(buildings[0]["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_organizations_in_building() {
        let server = make_server();
        let (name, value) = api_key();
        let response = server
            .get("/buildings/1/organizations")
            .add_header(name, value)
            .await;
        response.assert_status_ok();
        assert_eq!(ids(&response.json()), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_empty_building_is_not_found() {
        let server = make_server();
        let (name, value) = api_key();
        let response = server
            .get("/buildings/99/organizations")
            .add_header(name, value)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);

        let body: Value = response.json();
        assert_eq!(body["detail"], "No organizations found in this building");
    }

    #[tokio::test]
    async fn test_activity_vs_activity_tree() {
        let server = make_server();

        let (name, value) = api_key();
        let single = server
            .get("/activities/1/organizations")
            .add_header(name, value)
            .await;
        single.assert_status(StatusCode::NOT_FOUND);
        let body: Value = single.json();
        assert_eq!(body["detail"], "No organizations found for this activity");

        let (name, value) = api_key();
        let tree = server
            .get("/activities/1/tree/organizations")
            .add_header(name, value)
            .await;
        tree.assert_status_ok();
        assert_eq!(ids(&tree.json()), vec![1, 2, 3]);

        let (name, value) = api_key();
        let missing = server
            .get("/activities/3/tree/organizations")
            .add_header(name, value)
            .await;
        missing.assert_status(StatusCode::NOT_FOUND);
        let body: Value = missing.json();
        assert_eq!(body["detail"], "No organizations found in this activity tree");
    }

    #[tokio::test]
    async fn test_radius_and_rectangle() {
        let server = make_server();

        let (name, value) = api_key();
        let response = server
            .post("/organizations/nearby/radius")
            .add_header(name, value)
            .json(&json!({"latitude": 55.7558, "longitude": 37.6173, "radius_km": 5.0}))
            .await;
        response.assert_status_ok();
        assert_eq!(ids(&response.json()), vec![1, 2, 3]);

        let (name, value) = api_key();
        let response = server
            .post("/organizations/nearby/rectangle")
            .add_header(name, value)
            .json(&json!({"min_lat": 59.0, "max_lat": 60.0, "min_lon": 30.0, "max_lon": 31.0}))
            .await;
        response.assert_status_ok();
        assert_eq!(ids(&response.json()), vec![4]);

        // Empty regions are not an error.
        let (name, value) = api_key();
        let response = server
            .post("/organizations/nearby/radius")
            .add_header(name, value)
            .json(&json!({"latitude": 0.0, "longitude": 0.0, "radius_km": 1.0}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!([]));
    }

    #[tokio::test]
    async fn test_get_organization_shape() {
        let server = make_server();
        let (name, value) = api_key();
        let response = server.get("/organizations/1").add_header(name, value).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["name"], "ООО \"Рога и Копыта\"");
        assert_eq!(body["building_id"], 1);
        assert_eq!(body["building"]["latitude"], 55.7558);
        assert_eq!(
            body["phones"],
            json!([{"phone_number": "2-222-222"}, {"phone_number": "3-333-333"}])
        );

        let activities = body["activities"].as_array().unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0]["name"], "Мясная продукция");
        assert_eq!(activities[0]["parent_id"], 1);
        assert_eq!(activities[0]["children"], json!([]));
    }

    #[tokio::test]
    async fn test_organization_activities_carry_subtree() {
        let server = make_server();
        let (name, value) = api_key();
        let response = server.get("/organizations/4").add_header(name, value).await;
        let body: Value = response.json();
        assert_eq!(body["activities"][0]["id"], 9);
        assert_eq!(body["activities"][0]["level"], 3);
    }

    #[tokio::test]
    async fn test_unknown_organization() {
        let server = make_server();
        let (name, value) = api_key();
        let response = server.get("/organizations/404").add_header(name, value).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body, json!({"detail": "Organization not found"}));
    }

    #[tokio::test]
    async fn test_search_by_name() {
        let server = make_server();

        let (name, value) = api_key();
        let response = server
            .get("/organizations/search/name")
            .add_query_param("name", "молочн")
            .add_header(name, value)
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body[0]["name"], "ИП \"Молочные реки\"");
        assert_eq!(ids(&body), vec![3]);

        let (name, value) = api_key();
        let response = server
            .get("/organizations/search/name")
            .add_query_param("name", "пекарня")
            .add_header(name, value)
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!([]));
    }

    #[tokio::test]
    async fn test_search_name_too_long() {
        let server = make_server();
        let (name, value) = api_key();
        let response = server
            .get("/organizations/search/name")
            .add_query_param("name", "я".repeat(257))
            .add_header(name, value)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_activity_tree() {
        let server = make_server();
        let (name, value) = api_key();
        let response = server.get("/activities/tree").add_header(name, value).await;
        response.assert_status_ok();

        let body: Value = response.json();
        let roots: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|node| node["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(roots, vec!["Еда", "Автомобили", "Одежда"]);
        assert_eq!(body[1]["children"][1]["children"][0]["name"], "Запчасти");
        assert_eq!(body[0]["parent_id"], Value::Null);
    }

    #[tokio::test]
    async fn test_health() {
        let server = make_server();
        let (name, value) = api_key();
        let response = server.get("/health").add_header(name, value).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["organizations"], 4);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let server = make_server();
        let response = server.get("/nowhere").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let server = make_server();
        let (name, value) = api_key();
        let response = server
            .get("/buildings")
            .add_header(name, value)
            .add_header(
                HeaderName::from_static("origin"),
                HeaderValue::from_static("http://localhost:3000"),
            )
            .await;
        assert!(response.headers().contains_key("access-control-allow-origin"));
    }

    #[test]
    fn test_cors_layer_with_explicit_origins() {
        // Invalid entries are skipped rather than failing startup.
        let _ = cors_layer(&["http://localhost:3000".to_string(), "bad\norigin".to_string()]);
    }
}
