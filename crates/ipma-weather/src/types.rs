//! IPMA data types.
//!
//! `Api*` structs mirror the provider's JSON and are the only place where
//! upstream field names appear. Everything else in the crate works with the
//! domain types, which serialize in snake_case for API clients.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// PT label used when a weather type id is missing from the label table.
pub const UNKNOWN_LABEL_PT: &str = "Desconhecido";
/// EN label used when a weather type id is missing from the label table.
pub const UNKNOWN_LABEL_EN: &str = "Unknown";

/// Decimal-degree position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A reference locality (district capitals and islands).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Locality {
    /// IPMA `globalIdLocal`, the key used for forecast lookups
    pub global_id_local: i64,
    pub name: String,
    pub district_id: i64,
    pub district_name: String,
    pub region_id: i64,
    pub municipality_id: i64,
    pub warning_area_id: String,
    pub coordinates: Option<Coordinates>,
}

/// PT/EN description of one weather type code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherTypeLabel {
    pub id: i64,
    pub description_pt: String,
    pub description_en: String,
}

impl WeatherTypeLabel {
    /// Placeholder label for codes the provider's table does not know.
    pub fn unknown(id: i64) -> Self {
        Self {
            id,
            description_pt: UNKNOWN_LABEL_PT.to_string(),
            description_en: UNKNOWN_LABEL_EN.to_string(),
        }
    }
}

/// Weather type labels keyed by `idWeatherType`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeatherTypeTable {
    labels: HashMap<i64, WeatherTypeLabel>,
}

impl WeatherTypeTable {
    pub fn get(&self, id: i64) -> Option<&WeatherTypeLabel> {
        self.labels.get(&id)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl FromIterator<WeatherTypeLabel> for WeatherTypeTable {
    fn from_iter<I: IntoIterator<Item = WeatherTypeLabel>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(|label| (label.id, label)).collect(),
        }
    }
}

/// One day of forecast for one locality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecastEntry {
    pub forecast_date: NaiveDate,
    pub global_id_local: i64,
    pub id_weather_type: i64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub precipitation_probability: f64,
    /// Predominant wind direction (N, NE, ...)
    pub wind_direction: String,
    pub wind_speed_class: i64,
    pub precipitation_intensity_class: Option<i64>,
    pub coordinates: Option<Coordinates>,
}

/// Multi-day forecast document for one locality, chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub owner: String,
    pub country: String,
    pub global_id_local: i64,
    /// Provider timestamp of the forecast run, passed through verbatim
    pub data_update: String,
    pub entries: Vec<DailyForecastEntry>,
}

/// Compact wind summary attached to enriched entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wind {
    pub speed_class: i64,
    pub direction: String,
}

/// Forecast entry with human-readable weather labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedForecastEntry {
    #[serde(flatten)]
    pub entry: DailyForecastEntry,
    pub weather: WeatherTypeLabel,
    pub wind: Wind,
}

/// Response body for the multi-day forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedDailyForecast {
    pub owner: String,
    pub country: String,
    pub global_id_local: i64,
    pub data_update: String,
    pub count: usize,
    pub data: Vec<EnrichedForecastEntry>,
}

/// Human name for an IPMA district, falling back to the region for islands.
pub fn district_name(district_id: i64, region_id: i64) -> String {
    let name = match district_id {
        1 => "Aveiro",
        2 => "Beja",
        3 => "Braga",
        4 => "Bragança",
        5 => "Castelo Branco",
        6 => "Coimbra",
        7 => "Évora",
        8 => "Faro",
        9 => "Guarda",
        10 => "Leiria",
        11 => "Lisboa",
        12 => "Portalegre",
        13 => "Porto",
        14 => "Santarém",
        15 => "Setúbal",
        16 => "Viana do Castelo",
        17 => "Vila Real",
        18 => "Viseu",
        _ => match region_id {
            2 => "Madeira",
            3 => "Açores",
            _ => UNKNOWN_LABEL_PT,
        },
    };
    name.to_string()
}

// ---- Upstream payloads ----

/// `{"owner": .., "country": .., "data": [...]}` wrapper used by list endpoints.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLocality {
    pub global_id_local: i64,
    pub local: String,
    pub id_regiao: i64,
    pub id_distrito: i64,
    pub id_concelho: i64,
    pub id_area_aviso: String,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub longitude: Option<f64>,
}

impl From<ApiLocality> for Locality {
    fn from(api: ApiLocality) -> Self {
        Self {
            global_id_local: api.global_id_local,
            district_name: district_name(api.id_distrito, api.id_regiao),
            name: api.local,
            district_id: api.id_distrito,
            region_id: api.id_regiao,
            municipality_id: api.id_concelho,
            warning_area_id: api.id_area_aviso,
            coordinates: coordinates(api.latitude, api.longitude),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiWeatherType {
    #[serde(rename = "idWeatherType")]
    pub id_weather_type: i64,
    #[serde(rename = "descWeatherTypePT")]
    pub desc_pt: String,
    #[serde(rename = "descWeatherTypeEN")]
    pub desc_en: String,
}

impl From<ApiWeatherType> for WeatherTypeLabel {
    fn from(api: ApiWeatherType) -> Self {
        Self {
            id: api.id_weather_type,
            description_pt: api.desc_pt,
            description_en: api.desc_en,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiForecastDocument {
    pub owner: String,
    pub country: String,
    pub global_id_local: i64,
    pub data_update: String,
    pub data: Vec<ApiForecastEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiForecastEntry {
    pub forecast_date: NaiveDate,
    pub id_weather_type: i64,
    #[serde(deserialize_with = "de_decimal")]
    pub t_min: f64,
    #[serde(deserialize_with = "de_decimal")]
    pub t_max: f64,
    #[serde(deserialize_with = "de_decimal")]
    pub precipita_prob: f64,
    pub pred_wind_dir: String,
    pub class_wind_speed: i64,
    #[serde(default)]
    pub class_prec_int: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub longitude: Option<f64>,
}

impl From<ApiForecastDocument> for DailyForecast {
    fn from(api: ApiForecastDocument) -> Self {
        let global_id_local = api.global_id_local;
        let mut entries: Vec<DailyForecastEntry> = api
            .data
            .into_iter()
            .map(|e| DailyForecastEntry {
                forecast_date: e.forecast_date,
                global_id_local,
                id_weather_type: e.id_weather_type,
                temperature_min: e.t_min,
                temperature_max: e.t_max,
                precipitation_probability: e.precipita_prob,
                wind_direction: e.pred_wind_dir,
                wind_speed_class: e.class_wind_speed,
                precipitation_intensity_class: e.class_prec_int,
                coordinates: coordinates(e.latitude, e.longitude),
            })
            .collect();
        // The provider already sends days in order; keep that a guarantee.
        entries.sort_by_key(|e| e.forecast_date);

        Self {
            owner: api.owner,
            country: api.country,
            global_id_local,
            data_update: api.data_update,
            entries,
        }
    }
}

fn coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinates> {
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        _ => None,
    }
}

/// IPMA encodes most decimals as strings ("12.4"); accept either form.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("expected a decimal number, got {s:?}"))),
        }
    }
}

fn de_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(deserializer)?.into_f64()
}

fn de_opt_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(NumberOrString::into_f64)
        .transpose()
}
