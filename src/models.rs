use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog item as served by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: u64,
    pub steam_id: String,
    pub title: String,
    pub description: String,
    pub short_description: Option<String>,
    pub header_image: String,
    pub background_image: Option<String>,
    /// `None` means the release date has not been announced
    pub release_date: Option<String>,
    pub developer: String,
    pub publisher: String,
    pub metacritic_score: Option<u8>,
    pub metacritic_url: Option<String>,
    pub is_free: bool,
    pub price: String,
    pub original_price: String,
    pub discount_percent: u8,
    pub categories: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub system_requirements: Option<SystemRequirements>,
    pub platforms: Option<Vec<String>>,
    pub last_updated: DateTime<Utc>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub prices: Vec<Price>,
}

impl Game {
    pub fn is_discounted(&self) -> bool {
        self.discount_percent > 0
    }

    /// Developer name without the `Developer:` label some records carry
    pub fn developer_name(&self) -> Option<&str> {
        strip_label(&self.developer, "Developer:")
    }

    /// Publisher name without the `Publisher:` label some records carry
    pub fn publisher_name(&self) -> Option<&str> {
        strip_label(&self.publisher, "Publisher:")
    }
}

fn strip_label<'a>(value: &'a str, label: &str) -> Option<&'a str> {
    let trimmed = value.trim();
    let stripped = trimmed.strip_prefix(label).unwrap_or(trimmed).trim();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped)
    }
}

/// Point-in-time price observation for a game in one currency/region
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub id: u64,
    pub game_id: u64,
    pub price: String,
    pub original_price: String,
    pub discount_percent: u8,
    pub currency: String,
    pub region: String,
    pub is_on_sale: bool,
    pub sale_end_date: Option<DateTime<Utc>>,
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Loosely structured requirements object; every field is optional upstream
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemRequirements {
    pub minimum: Option<RequirementTier>,
    pub recommended: Option<RequirementTier>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementTier {
    pub os: Option<String>,
    pub processor: Option<String>,
    pub memory: Option<String>,
    pub graphics: Option<String>,
}

impl RequirementTier {
    /// Labelled lines for the fields that are present
    pub fn lines(&self) -> Vec<(&'static str, &str)> {
        [
            ("OS", &self.os),
            ("Processor", &self.processor),
            ("Memory", &self.memory),
            ("Graphics", &self.graphics),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| (label, v))
        })
        .collect()
    }
}

/// One page of games
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GamesResponse {
    pub games: Vec<Game>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Optional `limit`/`offset` pair sent with list endpoints
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaginationParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PaginationParams {
    pub fn new(limit: u64, offset: u64) -> Self {
        PaginationParams {
            limit: Some(limit),
            offset: Some(offset),
        }
    }

    /// Query pairs for the set, non-zero values. Zero is treated as unset,
    /// so the first page is requested without an `offset` parameter.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset.filter(|o| *o > 0) {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

/// A non-empty, trimmed search term
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Blank terms are rejected; anything else is kept exactly as typed
    pub fn new(term: &str) -> Option<Self> {
        if term.trim().is_empty() {
            None
        } else {
            Some(SearchQuery(term.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Which listing fills the catalog view
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Feed {
    #[default]
    All,
    Free,
    OnSale,
    Search(SearchQuery),
    Category(String),
}

impl Feed {
    pub fn title(&self) -> String {
        match self {
            Feed::All => String::from("Featured Games"),
            Feed::Free => String::from("Free Games"),
            Feed::OnSale => String::from("Deals & Sales"),
            Feed::Search(q) => format!("Search: {}", q.as_str()),
            Feed::Category(c) => format!("Category: {}", c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAME_JSON: &str = r#"{
        "id": 42,
        "steamId": "570",
        "title": "Dota 2",
        "description": "A competitive game of action and strategy.",
        "shortDescription": null,
        "headerImage": "https://cdn.example.com/570/header.jpg",
        "backgroundImage": null,
        "releaseDate": "2013-07-09",
        "developer": "Developer: Valve",
        "publisher": "Publisher:  Valve ",
        "metacriticScore": 90,
        "metacriticUrl": null,
        "isFree": true,
        "price": "0.00",
        "originalPrice": "0.00",
        "discountPercent": 0,
        "categories": ["Multi-player"],
        "languages": null,
        "systemRequirements": {"minimum": {"os": "Windows 7", "memory": "4 GB RAM"}},
        "platforms": ["windows", "linux"],
        "lastUpdated": "2024-05-01T10:00:00.000Z",
        "isActive": true,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z",
        "prices": [{
            "id": 1,
            "gameId": 42,
            "price": "0.00",
            "originalPrice": "0.00",
            "discountPercent": 0,
            "currency": "USD",
            "region": "US",
            "isOnSale": false,
            "saleEndDate": null,
            "recordedAt": "2024-05-01T10:00:00Z",
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-01T10:00:00Z"
        }]
    }"#;

    #[test]
    fn test_decode_game() {
        let game: Game = serde_json::from_str(GAME_JSON).unwrap();
        assert_eq!(game.id, 42);
        assert_eq!(game.steam_id, "570");
        assert!(game.is_free);
        assert_eq!(game.prices.len(), 1);
        assert_eq!(game.prices[0].currency, "USD");
        let minimum = game.system_requirements.unwrap().minimum.unwrap();
        assert_eq!(minimum.lines(), vec![("OS", "Windows 7"), ("Memory", "4 GB RAM")]);
    }

    #[test]
    fn test_label_prefix_stripped() {
        let game: Game = serde_json::from_str(GAME_JSON).unwrap();
        assert_eq!(game.developer_name(), Some("Valve"));
        assert_eq!(game.publisher_name(), Some("Valve"));

        let mut unknown = game.clone();
        unknown.developer = String::from("Developer:");
        assert_eq!(unknown.developer_name(), None);
    }

    #[test]
    fn test_empty_page_decodes() {
        let page: GamesResponse =
            serde_json::from_str(r#"{"games":[],"total":0,"limit":20,"offset":0}"#).unwrap();
        assert!(page.games.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.limit, 20);
    }

    #[test]
    fn test_query_pairs_omit_zero() {
        assert_eq!(
            PaginationParams::new(20, 40).query_pairs(),
            vec![("limit", "20".to_string()), ("offset", "40".to_string())]
        );
        assert_eq!(
            PaginationParams::new(20, 0).query_pairs(),
            vec![("limit", "20".to_string())]
        );
        assert!(PaginationParams::default().query_pairs().is_empty());
    }

    #[test]
    fn test_search_query_requires_term() {
        assert!(SearchQuery::new("   ").is_none());
        assert_eq!(SearchQuery::new(" portal ").unwrap().as_str(), " portal ");
    }
}
