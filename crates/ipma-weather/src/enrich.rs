//! Attach weather-type labels to forecast entries.

use chrono::NaiveDate;

use crate::error::WeatherError;
use crate::types::{DailyForecastEntry, EnrichedForecastEntry, WeatherTypeLabel, WeatherTypeTable, Wind};

/// Join one entry with its label. Unknown codes get the placeholder label
/// instead of failing the whole forecast.
pub fn enrich(entry: &DailyForecastEntry, labels: &WeatherTypeTable) -> EnrichedForecastEntry {
    let weather = match labels.get(entry.id_weather_type) {
        Some(label) => label.clone(),
        None => {
            tracing::debug!(id = entry.id_weather_type, "Unknown weather type");
            WeatherTypeLabel::unknown(entry.id_weather_type)
        }
    };

    EnrichedForecastEntry {
        wind: Wind {
            speed_class: entry.wind_speed_class,
            direction: entry.wind_direction.clone(),
        },
        weather,
        entry: entry.clone(),
    }
}

pub fn enrich_all(entries: &[DailyForecastEntry], labels: &WeatherTypeTable) -> Vec<EnrichedForecastEntry> {
    entries.iter().map(|e| enrich(e, labels)).collect()
}

/// Pick the entry for `date`.
///
/// # Errors
/// `ForecastDateNotFound` when the date is outside the provider's window.
pub fn select_day(entries: &[DailyForecastEntry], date: NaiveDate) -> Result<&DailyForecastEntry, WeatherError> {
    entries
        .iter()
        .find(|e| e.forecast_date == date)
        .ok_or(WeatherError::ForecastDateNotFound(date))
}
