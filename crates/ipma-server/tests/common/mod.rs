use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use ipma_server::{router, AppState};
use ipma_weather::{CacheTtls, ForecastService, IpmaClient};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn app_for(server: &MockServer) -> Router {
    let client = IpmaClient::new(&server.uri(), Duration::from_secs(5), CacheTtls::default())
        .unwrap();
    router(AppState::new(ForecastService::new(client)))
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn mount_localities(server: &MockServer, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/distrits-islands.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "owner": "IPMA",
            "country": "PT",
            "data": [
                {"idRegiao": 1, "idAreaAviso": "AVR", "idConcelho": 5, "globalIdLocal": 1010500,
                 "latitude": "40.6413", "idDistrito": 1, "local": "Aveiro", "longitude": "-8.6535"},
                {"idRegiao": 1, "idAreaAviso": "LSB", "idConcelho": 15, "globalIdLocal": 1111500,
                 "latitude": "38.7538", "idDistrito": 11, "local": "Amadora", "longitude": "-9.2308"},
                {"idRegiao": 1, "idAreaAviso": "LSB", "idConcelho": 6, "globalIdLocal": 1110600,
                 "latitude": "38.7660", "idDistrito": 11, "local": "Lisboa", "longitude": "-9.1286"},
                {"idRegiao": 1, "idAreaAviso": "PRT", "idConcelho": 12, "globalIdLocal": 1131200,
                 "latitude": "41.1580", "idDistrito": 13, "local": "Porto", "longitude": "-8.6294"},
                {"idRegiao": 2, "idAreaAviso": "MCS", "idConcelho": 3, "globalIdLocal": 2310300,
                 "latitude": "32.6485", "idDistrito": 31, "local": "Funchal", "longitude": "-16.9084"}
            ]
        })))
        .expect(calls)
        .mount(server)
        .await;
}

pub async fn mount_weather_types(server: &MockServer, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/weather-type-classe.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "owner": "IPMA",
            "country": "PT",
            "data": [
                {"descWeatherTypeEN": "Clear sky", "descWeatherTypePT": "Céu limpo", "idWeatherType": 1},
                {"descWeatherTypeEN": "Rain", "descWeatherTypePT": "Chuva", "idWeatherType": 9}
            ]
        })))
        .expect(calls)
        .mount(server)
        .await;
}

/// Three days from 2026-10-19; the last uses a code with no label.
pub async fn mount_forecast(server: &MockServer, global_id_local: i64, calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/forecast/meteorology/cities/daily/{global_id_local}.json"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "owner": "IPMA",
            "country": "PT",
            "globalIdLocal": global_id_local,
            "dataUpdate": "2026-10-19T10:31:02",
            "data": [
                {"precipitaProb": "0.0", "tMin": "13.2", "tMax": "23.1", "predWindDir": "N",
                 "idWeatherType": 1, "classWindSpeed": 1, "longitude": "-9.1286",
                 "forecastDate": "2026-10-19", "latitude": "38.7660"},
                {"precipitaProb": "92.0", "tMin": "14.0", "tMax": "18.5", "predWindDir": "SW",
                 "idWeatherType": 9, "classWindSpeed": 3, "classPrecInt": 2,
                 "longitude": "-9.1286", "forecastDate": "2026-10-20", "latitude": "38.7660"},
                {"precipitaProb": "10.0", "tMin": "12.1", "tMax": "20.0", "predWindDir": "W",
                 "idWeatherType": 30, "classWindSpeed": 2, "longitude": "-9.1286",
                 "forecastDate": "2026-10-21", "latitude": "38.7660"}
            ]
        })))
        .expect(calls)
        .mount(server)
        .await;
}
