//! Locality resolution.
//!
//! Matching is case-insensitive and two-phase: an exact name match wins;
//! otherwise a substring match in either direction is used (the query
//! inside the name, or the name inside the query). Candidates always keep
//! the order of the provider's locality list, so results do not depend on
//! hash ordering or scoring.

use crate::error::WeatherError;
use crate::types::Locality;

/// Listing filter: every field is optional and they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalityFilter {
    pub query: Option<String>,
    pub district_id: Option<i64>,
}

/// What a forecast request says about the locality it wants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalitySelector {
    pub global_id_local: Option<i64>,
    pub locality: Option<String>,
    pub district_id: Option<i64>,
}

impl LocalitySelector {
    pub fn by_id(global_id_local: i64) -> Self {
        Self {
            global_id_local: Some(global_id_local),
            ..Self::default()
        }
    }

    pub fn by_name(locality: impl Into<String>) -> Self {
        Self {
            locality: Some(locality.into()),
            ..Self::default()
        }
    }

    pub fn in_district(mut self, district_id: i64) -> Self {
        self.district_id = Some(district_id);
        self
    }
}

/// Trimmed, lowercased query; blank strings count as no query.
fn normalize(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase)
}

fn in_district(locality: &Locality, district_id: Option<i64>) -> bool {
    district_id.map_or(true, |id| locality.district_id == id)
}

/// Substring match in either direction. Blank names never match.
fn contains_either_way(name: &str, query: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && (name.contains(query) || query.contains(name))
}

/// All localities matching `filter`, in upstream order.
///
/// Unlike [`resolve_one`] there is no exact-match short-circuit: every
/// locality that matches by substring (which includes exact matches) is
/// returned. No query and no district returns the full list.
pub fn list_matches(localities: &[Locality], filter: &LocalityFilter) -> Vec<Locality> {
    let query = normalize(filter.query.as_deref());

    localities
        .iter()
        .filter(|l| in_district(l, filter.district_id))
        .filter(|l| {
            query
                .as_deref()
                .map_or(true, |q| contains_either_way(&l.name.to_lowercase(), q))
        })
        .cloned()
        .collect()
}

/// Resolve a name and/or district to exactly one locality.
///
/// # Errors
/// `LocalityNotFound` when nothing matches, `AmbiguousLocality` when more
/// than one locality survives both phases, `MissingLocality` when neither a
/// query nor a district is given.
pub fn resolve_one<'a>(
    localities: &'a [Locality],
    query: Option<&str>,
    district_id: Option<i64>,
) -> Result<&'a Locality, WeatherError> {
    let candidates: Vec<&Locality> = localities
        .iter()
        .filter(|l| in_district(l, district_id))
        .collect();

    let Some(q) = normalize(query) else {
        let Some(id) = district_id else {
            return Err(WeatherError::MissingLocality);
        };
        return single(candidates, || format!("district {id}"));
    };

    let (exact, partial): (Vec<&Locality>, Vec<&Locality>) = candidates
        .into_iter()
        .filter(|l| contains_either_way(&l.name.to_lowercase(), &q))
        .partition(|l| l.name.to_lowercase() == q);

    let label = || query.unwrap_or_default().trim().to_string();
    if exact.is_empty() {
        single(partial, label)
    } else {
        single(exact, label)
    }
}

fn single<'a>(
    candidates: Vec<&'a Locality>,
    label: impl Fn() -> String,
) -> Result<&'a Locality, WeatherError> {
    match candidates.as_slice() {
        [] => Err(WeatherError::LocalityNotFound(label())),
        [one] => Ok(*one),
        many => {
            tracing::debug!(query = %label(), matches = many.len(), "Ambiguous locality");
            Err(WeatherError::AmbiguousLocality {
                query: label(),
                candidates: many.iter().map(|l| (*l).clone()).collect(),
            })
        }
    }
}
