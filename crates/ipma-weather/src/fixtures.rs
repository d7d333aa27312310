//! Canned IPMA payloads for unit tests.

use serde_json::{json, Value};

pub fn localities_json() -> Value {
    json!({
        "owner": "IPMA",
        "country": "PT",
        "data": [
            {"idRegiao": 1, "idAreaAviso": "AVR", "idConcelho": 5, "globalIdLocal": 1010500,
             "latitude": "40.6413", "idDistrito": 1, "local": "Aveiro", "longitude": "-8.6535"},
            {"idRegiao": 1, "idAreaAviso": "LSB", "idConcelho": 6, "globalIdLocal": 1110600,
             "latitude": "38.7660", "idDistrito": 11, "local": "Lisboa", "longitude": "-9.1286"},
            {"idRegiao": 1, "idAreaAviso": "LSB", "idConcelho": 15, "globalIdLocal": 1111500,
             "latitude": "38.7538", "idDistrito": 11, "local": "Amadora", "longitude": "-9.2308"},
            {"idRegiao": 1, "idAreaAviso": "PRT", "idConcelho": 12, "globalIdLocal": 1131200,
             "latitude": "41.1580", "idDistrito": 13, "local": "Porto", "longitude": "-8.6294"},
            {"idRegiao": 1, "idAreaAviso": "PTG", "idConcelho": 14, "globalIdLocal": 1121400,
             "latitude": "39.2967", "idDistrito": 12, "local": "Portalegre", "longitude": "-7.4285"}
        ]
    })
}

pub fn weather_types_json() -> Value {
    json!({
        "owner": "IPMA",
        "country": "PT",
        "data": [
            {"descWeatherTypeEN": "No information", "descWeatherTypePT": "---", "idWeatherType": -99},
            {"descWeatherTypeEN": "Clear sky", "descWeatherTypePT": "Céu limpo", "idWeatherType": 1},
            {"descWeatherTypeEN": "Partly cloudy", "descWeatherTypePT": "Céu pouco nublado", "idWeatherType": 2},
            {"descWeatherTypeEN": "Showers", "descWeatherTypePT": "Aguaceiros", "idWeatherType": 6}
        ]
    })
}

/// Five days starting 2026-10-19; the fourth day uses a code missing from
/// [`weather_types_json`].
pub fn forecast_json(global_id_local: i64) -> Value {
    let days = [
        ("2026-10-19", 1, "13.2", "23.1", "0.0"),
        ("2026-10-20", 2, "14.0", "22.0", "5.0"),
        ("2026-10-21", 6, "15.1", "19.4", "80.0"),
        ("2026-10-22", 27, "12.8", "18.0", "61.0"),
        ("2026-10-23", 1, "11.9", "20.7", "2.0"),
    ];
    let data: Vec<Value> = days
        .iter()
        .map(|(date, id, t_min, t_max, prob)| {
            json!({
                "precipitaProb": prob,
                "tMin": t_min,
                "tMax": t_max,
                "predWindDir": "NW",
                "idWeatherType": id,
                "classWindSpeed": 2,
                "longitude": "-9.1286",
                "forecastDate": date,
                "latitude": "38.7660"
            })
        })
        .collect();

    json!({
        "owner": "IPMA",
        "country": "PT",
        "data": data,
        "globalIdLocal": global_id_local,
        "dataUpdate": "2026-10-19T10:31:02"
    })
}
