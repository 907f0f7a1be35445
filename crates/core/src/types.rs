//! Core data types for City Explorer
//!
//! Provider payloads are decoded into the `*Result`/`Yelp*`/`Hiking*` structs
//! and turned into the public response records by the mapping functions in
//! this module.

use crate::{ExplorerError, Result};
use serde::{Deserialize, Serialize};

/// Number of restaurants returned per page
pub const RESTAURANTS_PER_PAGE: u32 = 5;

/// Highest page whose offset plus limit stays inside the listing provider's
/// 1000 result window
pub const MAX_RESTAURANT_PAGE: u32 = 199;

/// Search radius handed to the trail provider
pub const TRAIL_SEARCH_RADIUS: u32 = 60;

/// Cached geocoding result for a search query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// The city string exactly as the caller supplied it
    pub search_query: String,
    /// Provider display name
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Build a location record from the first geocoding match
    pub fn from_geocode(search_query: &str, result: &GeocodeResult) -> Result<Self> {
        Ok(Self {
            search_query: search_query.to_string(),
            formatted_query: result.display_name.clone(),
            latitude: result.lat.as_f64("lat")?,
            longitude: result.lon.as_f64("lon")?,
        })
    }
}

/// Restaurant listing entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub url: String,
    pub name: String,
    pub rating: f64,
    pub price: Option<String>,
    pub image_url: String,
}

impl From<YelpBusiness> for Restaurant {
    fn from(business: YelpBusiness) -> Self {
        Self {
            url: business.url,
            name: business.name,
            rating: business.rating,
            price: business.price,
            image_url: business.image_url,
        }
    }
}

/// Hiking trail entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub name: String,
    pub location: String,
    pub length: f64,
    pub stars: f64,
    pub star_votes: u32,
    pub summary: String,
    pub trail_url: String,
    pub conditions: String,
    pub condition_date: String,
    pub condition_time: String,
}

impl From<HikingTrail> for Trail {
    fn from(trail: HikingTrail) -> Self {
        let (condition_date, condition_time) = split_condition_timestamp(&trail.condition_date);

        Self {
            name: trail.name,
            location: trail.location,
            length: trail.length,
            stars: trail.stars,
            star_votes: trail.star_votes,
            summary: trail.summary,
            trail_url: trail.url,
            conditions: trail.condition_status,
            condition_date,
            condition_time,
        }
    }
}

/// Split a provider timestamp such as `2020-05-01 14:30:00` into its date
/// (first 10 characters) and time (character 12 onward) parts.
///
/// Slicing is by character and yields empty strings for short input.
pub fn split_condition_timestamp(timestamp: &str) -> (String, String) {
    let date = timestamp.chars().take(10).collect();
    let time = timestamp.chars().skip(12).collect();
    (date, time)
}

/// 1-based page of restaurant results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
}

impl PageRequest {
    /// Create a page request, rejecting pages outside `1..=MAX_RESTAURANT_PAGE`
    pub fn new(page: u32) -> Result<Self> {
        if page == 0 {
            return Err(ExplorerError::validation("page must be 1 or greater"));
        }
        if page > MAX_RESTAURANT_PAGE {
            return Err(ExplorerError::validation(format!(
                "page must be {} or less, got {}",
                MAX_RESTAURANT_PAGE, page
            )));
        }
        Ok(Self { page })
    }

    /// Parse a raw query parameter, defaulting to the first page
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        match raw.map(str::trim) {
            None | Some("") => Self::new(1),
            Some(value) => {
                let page = value.parse::<u32>().map_err(|_| {
                    ExplorerError::validation(format!(
                        "page must be a positive integer, got '{}'",
                        value
                    ))
                })?;
                Self::new(page)
            }
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Number of results requested from the provider
    pub fn limit(&self) -> u32 {
        RESTAURANTS_PER_PAGE
    }

    /// Provider offset, `(page - 1) * 5 + 1`
    pub fn offset(&self) -> u32 {
        (self.page - 1) * RESTAURANTS_PER_PAGE + 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1 }
    }
}

/// Coordinate as returned by the geocoding provider
///
/// LocationIQ sends coordinates as strings; numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn as_f64(&self, field: &str) -> Result<f64> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                ExplorerError::provider(
                    "geocoding",
                    format!("invalid {} coordinate '{}'", field, text),
                )
            }),
        }
    }
}

/// Single match from the geocoding search API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub display_name: String,
    pub lat: Coordinate,
    pub lon: Coordinate,
}

/// Business search response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YelpSearchResponse {
    #[serde(default)]
    pub businesses: Vec<YelpBusiness>,
}

/// Business entry from the listing provider
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YelpBusiness {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default, alias = "price_range")]
    pub price: Option<String>,
    #[serde(default)]
    pub image_url: String,
}

/// Trail search response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HikingTrailsResponse {
    #[serde(default)]
    pub trails: Vec<HikingTrail>,
}

/// Trail entry from the trail provider
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HikingTrail {
    pub name: String,
    pub location: String,
    pub length: f64,
    pub stars: f64,
    pub star_votes: u32,
    pub summary: String,
    pub url: String,
    pub condition_status: String,
    pub condition_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_geocode() {
        let result: GeocodeResult = serde_json::from_str(
            r#"{"display_name":"Seattle, King County, Washington, USA","lat":"47.6038321","lon":"-122.3300624"}"#,
        )
        .unwrap();

        let location = Location::from_geocode("seattle", &result).unwrap();
        assert_eq!(location.search_query, "seattle");
        assert_eq!(
            location.formatted_query,
            "Seattle, King County, Washington, USA"
        );
        assert!((location.latitude - 47.6038321).abs() < f64::EPSILON);
        assert!((location.longitude + 122.3300624).abs() < f64::EPSILON);
    }

    #[test]
    fn test_location_rejects_bad_coordinates() {
        let result = GeocodeResult {
            display_name: "Nowhere".to_string(),
            lat: Coordinate::Text("north".to_string()),
            lon: Coordinate::Number(1.0),
        };

        let err = Location::from_geocode("nowhere", &result).unwrap_err();
        assert!(matches!(err, ExplorerError::Provider { .. }));
    }

    #[test]
    fn test_restaurant_mapping_accepts_price_range_alias() {
        let business: YelpBusiness = serde_json::from_str(
            r#"{"url":"https://yelp.com/biz/a","name":"A","rating":4.5,"price_range":"$$","image_url":"https://img/a.jpg","phone":"555"}"#,
        )
        .unwrap();

        let restaurant = Restaurant::from(business);
        assert_eq!(restaurant.name, "A");
        assert_eq!(restaurant.price.as_deref(), Some("$$"));
        assert_eq!(restaurant.rating, 4.5);

        let json = serde_json::to_value(&restaurant).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["image_url", "name", "price", "rating", "url"]);
    }

    #[test]
    fn test_trail_mapping_splits_condition_date() {
        let trail: HikingTrail = serde_json::from_str(
            r#"{
                "name": "Rattlesnake Ledge",
                "location": "North Bend, Washington",
                "length": 4.3,
                "stars": 4.4,
                "starVotes": 82,
                "summary": "A short climb to a viewpoint.",
                "url": "https://www.hikingproject.com/trail/1",
                "conditionStatus": "All Clear",
                "conditionDate": "2020-05-01T14:30:00"
            }"#,
        )
        .unwrap();

        let trail = Trail::from(trail);
        assert_eq!(trail.star_votes, 82);
        assert_eq!(trail.trail_url, "https://www.hikingproject.com/trail/1");
        assert_eq!(trail.conditions, "All Clear");
        assert_eq!(trail.condition_date, "2020-05-01");
        assert_eq!(trail.condition_time, "4:30:00");
    }

    #[test]
    fn test_split_condition_timestamp_short_input() {
        assert_eq!(
            split_condition_timestamp("2020-05"),
            ("2020-05".to_string(), String::new())
        );
        assert_eq!(split_condition_timestamp(""), (String::new(), String::new()));
    }

    #[test]
    fn test_page_request_offsets() {
        assert_eq!(PageRequest::new(1).unwrap().offset(), 1);
        assert_eq!(PageRequest::new(2).unwrap().offset(), 6);
        assert_eq!(PageRequest::new(3).unwrap().offset(), 11);
        assert_eq!(PageRequest::new(2).unwrap().limit(), 5);
    }

    #[test]
    fn test_page_request_parse() {
        assert_eq!(PageRequest::parse(None).unwrap().page(), 1);
        assert_eq!(PageRequest::parse(Some("4")).unwrap().page(), 4);
        assert!(matches!(
            PageRequest::parse(Some("abc")).unwrap_err(),
            ExplorerError::Validation { .. }
        ));
        assert!(PageRequest::parse(Some("0")).is_err());
        assert!(PageRequest::parse(Some("-1")).is_err());
    }

    #[test]
    fn test_page_request_upper_bound() {
        let last = PageRequest::new(MAX_RESTAURANT_PAGE).unwrap();
        assert!(last.offset() + last.limit() <= 1000);

        assert!(matches!(
            PageRequest::new(MAX_RESTAURANT_PAGE + 1).unwrap_err(),
            ExplorerError::Validation { .. }
        ));
        assert!(matches!(
            PageRequest::parse(Some("4294967295")).unwrap_err(),
            ExplorerError::Validation { .. }
        ));
    }
}
