#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use axum::http::StatusCode;
use common::{app_for, get_json, mount_forecast, mount_localities, mount_weather_types};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn names(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_returns_ok() {
    let mock_server = MockServer::start().await;
    let app = app_for(&mock_server);

    let (status, body) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_localities_filter_keeps_upstream_order() {
    let mock_server = MockServer::start().await;
    mount_localities(&mock_server, 1).await;
    let app = app_for(&mock_server);

    let (status, body) = get_json(&app, "/v1/localities?q=a&district_id=11").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(names(&body["data"]), vec!["Amadora", "Lisboa"]);

    let (_, body) = get_json(&app, "/v1/localities?q=FUNCHAL").await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["district_name"], "Madeira");
    assert_eq!(body["data"][0]["coordinates"]["latitude"], 32.6485);

    let (_, body) = get_json(&app, "/v1/localities").await;
    assert_eq!(body["count"], 5);
}

#[tokio::test]
async fn test_daily_forecast_by_name_is_enriched() {
    let mock_server = MockServer::start().await;
    mount_localities(&mock_server, 1).await;
    mount_weather_types(&mock_server, 1).await;
    mount_forecast(&mock_server, 1110600, 1).await;
    let app = app_for(&mock_server);

    let (status, body) = get_json(&app, "/v1/forecast/daily?locality=%20lisboa%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["global_id_local"], 1110600);
    assert_eq!(body["data_update"], "2026-10-19T10:31:02");
    assert_eq!(body["count"], 3);

    let rainy = &body["data"][1];
    assert_eq!(rainy["forecast_date"], "2026-10-20");
    assert_eq!(rainy["precipitation_probability"], 92.0);
    assert_eq!(rainy["precipitation_intensity_class"], 2);
    assert_eq!(rainy["weather"]["description_en"], "Rain");
    assert_eq!(rainy["wind"]["direction"], "SW");
    assert_eq!(rainy["wind"]["speed_class"], 3);

    let unlabelled = &body["data"][2];
    assert_eq!(unlabelled["weather"]["id"], 30);
    assert_eq!(unlabelled["weather"]["description_pt"], "Desconhecido");
    assert_eq!(unlabelled["weather"]["description_en"], "Unknown");
}

#[tokio::test]
async fn test_daily_forecast_by_id_skips_locality_list() {
    let mock_server = MockServer::start().await;
    mount_localities(&mock_server, 0).await;
    mount_weather_types(&mock_server, 1).await;
    mount_forecast(&mock_server, 1110600, 1).await;
    let app = app_for(&mock_server);

    let (status, body) =
        get_json(&app, "/v1/forecast/daily?global_id_local=1110600&locality=Porto").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["global_id_local"], 1110600);
}

#[tokio::test]
async fn test_daily_forecast_by_single_locality_district() {
    let mock_server = MockServer::start().await;
    mount_localities(&mock_server, 1).await;
    mount_weather_types(&mock_server, 1).await;
    mount_forecast(&mock_server, 1131200, 1).await;
    let app = app_for(&mock_server);

    let (status, body) = get_json(&app, "/v1/forecast/daily?district_id=13").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["global_id_local"], 1131200);
}

#[tokio::test]
async fn test_ambiguous_locality_lists_candidates() {
    let mock_server = MockServer::start().await;
    mount_localities(&mock_server, 1).await;
    let app = app_for(&mock_server);

    let (status, body) = get_json(&app, "/v1/forecast/daily?locality=a").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "ambiguous_locality");
    assert_eq!(
        names(&body["candidates"]),
        vec!["Aveiro", "Amadora", "Lisboa", "Funchal"]
    );

    let (status, body) = get_json(&app, "/v1/forecast/daily?district_id=11").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(names(&body["candidates"]), vec!["Amadora", "Lisboa"]);
}

#[tokio::test]
async fn test_unknown_locality_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_localities(&mock_server, 1).await;
    let app = app_for(&mock_server);

    let (status, body) = get_json(&app, "/v1/forecast/daily?locality=Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "locality_not_found");
    assert!(body["message"].as_str().unwrap().contains("Atlantis"));
    assert!(body.get("candidates").is_none());
}

#[tokio::test]
async fn test_missing_selector_is_bad_request() {
    let mock_server = MockServer::start().await;
    mount_localities(&mock_server, 0).await;
    let app = app_for(&mock_server);

    let (status, body) = get_json(&app, "/v1/forecast/daily").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "missing_locality");

    let (status, _) = get_json(&app, "/v1/forecast/daily?locality=%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_day_forecast_selects_one_entry() {
    let mock_server = MockServer::start().await;
    mount_weather_types(&mock_server, 1).await;
    mount_forecast(&mock_server, 1110600, 1).await;
    let app = app_for(&mock_server);

    let (status, body) = get_json(
        &app,
        "/v1/forecast/day?forecast_date=2026-10-20&global_id_local=1110600",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["forecast_date"], "2026-10-20");
    assert_eq!(body["temperature_max"], 18.5);
    assert_eq!(body["weather"]["description_pt"], "Chuva");
}

#[tokio::test]
async fn test_day_forecast_outside_window_is_not_found() {
    let mock_server = MockServer::start().await;
    mount_weather_types(&mock_server, 0).await;
    mount_forecast(&mock_server, 1110600, 1).await;
    let app = app_for(&mock_server);

    let (status, body) = get_json(
        &app,
        "/v1/forecast/day?forecast_date=2026-11-02&global_id_local=1110600",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "forecast_date_not_found");
    assert!(body["detail"].as_str().unwrap().contains("2026-11-02"));
}

#[tokio::test]
async fn test_malformed_query_is_bad_request() {
    let mock_server = MockServer::start().await;
    let app = app_for(&mock_server);

    let (status, body) =
        get_json(&app, "/v1/forecast/day?forecast_date=20-10-2026&global_id_local=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_query");

    let (status, _) = get_json(&app, "/v1/forecast/day?global_id_local=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&app, "/v1/localities?district_id=eleven").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upstream_failure_is_bad_gateway() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/distrits-islands.json"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;
    let app = app_for(&mock_server);

    let (status, body) = get_json(&app, "/v1/localities?q=porto").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "upstream_unavailable");
}

#[tokio::test]
async fn test_repeated_requests_are_served_from_cache() {
    let mock_server = MockServer::start().await;
    mount_localities(&mock_server, 1).await;
    mount_weather_types(&mock_server, 1).await;
    mount_forecast(&mock_server, 1131200, 1).await;
    let app = app_for(&mock_server);

    let uri = "/v1/forecast/daily?locality=Porto";
    let (_, first) = get_json(&app, uri).await;
    let (_, second) = get_json(&app, uri).await;
    assert_eq!(first, second);

    let (status, day) = get_json(&app, "/v1/forecast/day?forecast_date=2026-10-19&locality=porto").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(day, first["data"][0]);
}
