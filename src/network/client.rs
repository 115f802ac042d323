//! Game API client - typed calls over the catalog REST endpoints

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::models::{Game, GamesResponse, PaginationParams, SearchQuery};
use crate::network::error::{ApiError, UNKNOWN_ERROR};

/// Stateless client for the game-listing backend. Cloning shares the
/// underlying connection pool.
#[derive(Clone, Debug)]
pub struct GameService {
    client: reqwest::Client,
    base_url: String,
    headers: Vec<(String, String)>,
}

impl GameService {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        GameService {
            client: create_client(None),
            base_url: base_url.trim_end_matches('/').to_string(),
            headers: Vec::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut service = GameService::new(config.base_url.as_str());
        service.client = create_client(config.request_timeout_secs.map(Duration::from_secs));
        service.headers = config
            .headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        service
    }

    /// Add a header sent with every request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Replace the transport, e.g. to set a timeout
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /games`
    pub async fn get_games(&self, params: PaginationParams) -> Result<GamesResponse, ApiError> {
        self.make_request("/games", &params.query_pairs()).await
    }

    /// `GET /games/{id}`
    pub async fn get_game(&self, id: u64) -> Result<Game, ApiError> {
        self.make_request(&format!("/games/{}", id), &[]).await
    }

    /// `GET /games/search?q=`
    pub async fn search_games(
        &self,
        query: &SearchQuery,
        params: PaginationParams,
    ) -> Result<GamesResponse, ApiError> {
        let mut pairs = vec![("q", query.as_str().to_string())];
        pairs.extend(params.query_pairs());
        self.make_request("/games/search", &pairs).await
    }

    /// `GET /games/category?category=`
    pub async fn get_games_by_category(
        &self,
        category: &str,
        params: PaginationParams,
    ) -> Result<GamesResponse, ApiError> {
        let mut pairs = vec![("category", category.to_string())];
        pairs.extend(params.query_pairs());
        self.make_request("/games/category", &pairs).await
    }

    /// `GET /games/free`
    pub async fn get_free_games(&self, params: PaginationParams) -> Result<GamesResponse, ApiError> {
        self.make_request("/games/free", &params.query_pairs()).await
    }

    /// `GET /games/sale`
    pub async fn get_on_sale_games(
        &self,
        params: PaginationParams,
    ) -> Result<GamesResponse, ApiError> {
        self.make_request("/games/sale", &params.query_pairs()).await
    }

    /// JSON content type plus configured headers; configured values win
    fn request_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (key, value) in &self.headers {
            match (HeaderName::from_bytes(key.as_bytes()), HeaderValue::from_str(value)) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %key, "Skipping invalid header"),
            }
        }
        headers
    }

    /// Shared request path: every failure is classified and logged here
    async fn make_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut req_builder = self.client.get(&url).headers(self.request_headers());
        if !query.is_empty() {
            req_builder = req_builder.query(query);
        }

        tracing::debug!(endpoint, "Sending API request");

        let response = match req_builder.send().await {
            Ok(resp) => resp,
            Err(e) => {
                let err = ApiError::from_transport(&e);
                tracing::error!(endpoint, error = %e, code = err.code(), "API request failed");
                return Err(err);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let phrase = response
                .extensions()
                .get::<hyper::ext::ReasonPhrase>()
                .map(|reason| reason.as_bytes());
            let err = ApiError::Http {
                status: status.as_u16(),
                status_text: status_text(status, phrase),
            };
            tracing::error!(endpoint, error = %err, code = err.code(), "API request failed");
            return Err(err);
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                let err = ApiError::from_transport(&e);
                tracing::error!(endpoint, error = %e, code = err.code(), "Reading response body failed");
                return Err(err);
            }
        };

        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(endpoint, error = %e, "Decoding response body failed");
            ApiError::Decode {
                status: status.as_u16(),
                detail: e.to_string(),
            }
        })
    }
}

/// Reason phrase the server sent, else the standard one for the status
fn status_text(status: reqwest::StatusCode, phrase: Option<&[u8]>) -> String {
    phrase
        .map(|bytes| String::from_utf8_lossy(bytes).trim().to_string())
        .filter(|text| !text.is_empty())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}

/// Create an HTTP client; `timeout` of `None` leaves the transport unbounded
pub fn create_client(timeout: Option<Duration>) -> reqwest::Client {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const EMPTY_PAGE: &str = r#"{"games":[],"total":0,"limit":20,"offset":0}"#;

    const GAME: &str = r#"{
        "id": 42, "steamId": "620", "title": "Portal 2",
        "description": "Sequel.", "shortDescription": "Puzzles.",
        "headerImage": "https://cdn.example.com/620.jpg", "backgroundImage": null,
        "releaseDate": null, "developer": "Valve", "publisher": "Valve",
        "metacriticScore": null, "metacriticUrl": null, "isFree": false,
        "price": "9.99", "originalPrice": "19.99", "discountPercent": 50,
        "categories": null, "languages": null, "systemRequirements": null,
        "platforms": null, "lastUpdated": "2024-03-01T00:00:00Z", "isActive": true,
        "createdAt": "2024-03-01T00:00:00Z", "updatedAt": "2024-03-01T00:00:00Z",
        "prices": []
    }"#;

    fn service_for(server: &MockServer) -> GameService {
        GameService::new(format!("{}/api", server.uri()))
    }

    fn json(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json")
    }

    #[tokio::test]
    async fn test_get_games_sends_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/games"))
            .and(query_param("limit", "20"))
            .and(query_param("offset", "40"))
            .and(header("content-type", "application/json"))
            .respond_with(json(EMPTY_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let page = service_for(&server)
            .get_games(PaginationParams::new(20, 40))
            .await
            .unwrap();
        assert!(page.games.is_empty());
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_zero_offset_is_omitted() {
        let server = MockServer::start().await;
        Mock::given(path("/api/games/free"))
            .and(query_param("limit", "20"))
            .and(query_param_is_missing("offset"))
            .respond_with(json(EMPTY_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        service_for(&server)
            .get_free_games(PaginationParams::new(20, 0))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_search_and_category_params() {
        let server = MockServer::start().await;
        Mock::given(path("/api/games/search"))
            .and(query_param("q", "half life"))
            .and(query_param_is_missing("limit"))
            .respond_with(json(EMPTY_PAGE))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/api/games/category"))
            .and(query_param("category", "Action"))
            .and(query_param("offset", "20"))
            .respond_with(json(EMPTY_PAGE))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/api/games/sale"))
            .respond_with(json(EMPTY_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let service = service_for(&server);
        let query = SearchQuery::new("half life").unwrap();
        service
            .search_games(&query, PaginationParams::default())
            .await
            .unwrap();
        service
            .get_games_by_category("Action", PaginationParams::new(20, 20))
            .await
            .unwrap();
        service
            .get_on_sale_games(PaginationParams::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_game_returns_body_unchanged() {
        let server = MockServer::start().await;
        Mock::given(path("/api/games/42"))
            .respond_with(json(GAME))
            .mount(&server)
            .await;

        let service = service_for(&server);
        let game = service.get_game(42).await.unwrap();
        let expected: Game = serde_json::from_str(GAME).unwrap();
        assert_eq!(game, expected);

        let again = service.get_game(42).await.unwrap();
        assert_eq!(game, again);
    }

    #[tokio::test]
    async fn test_not_found_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(path("/api/games/7"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = service_for(&server).get_game(7).await.unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(err.code(), "Not Found");
        assert_eq!(err.message(), "HTTP error! status: 404");
    }

    #[tokio::test]
    async fn test_malformed_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(path("/api/games"))
            .respond_with(json("{\"games\": ["))
            .mount(&server)
            .await;

        let err = service_for(&server)
            .get_games(PaginationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode { status: 200, .. }));
        assert_eq!(err.code(), "DECODE_ERROR");
    }

    #[tokio::test]
    async fn test_transport_timeout_is_classified() {
        let server = MockServer::start().await;
        Mock::given(path("/api/games"))
            .respond_with(json(EMPTY_PAGE).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let service = service_for(&server)
            .with_client(create_client(Some(Duration::from_millis(50))));
        let err = service
            .get_games(PaginationParams::default())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Timeout);
        assert_eq!(err.status(), 408);
        assert_eq!(err.code(), "TIMEOUT");
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let service = GameService::new(format!("http://127.0.0.1:{}/api", port));
        let err = service
            .get_games(PaginationParams::default())
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Network);
        assert_eq!(err.status(), 0);
        assert_eq!(err.code(), "NETWORK_ERROR");
    }

    #[tokio::test]
    async fn test_extra_headers_are_sent() {
        let server = MockServer::start().await;
        Mock::given(path("/api/games"))
            .and(header("x-client", "gamedeck"))
            .and(header("content-type", "application/json"))
            .respond_with(json(EMPTY_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        service_for(&server)
            .with_header("X-Client", "gamedeck")
            .get_games(PaginationParams::default())
            .await
            .unwrap();
    }

    /// Serve a single raw HTTP/1.1 status line, for reason phrases wiremock cannot set
    async fn raw_status_server(status_line: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "{}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                status_line
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/api", addr)
    }

    #[tokio::test]
    async fn test_custom_reason_phrase_is_code() {
        let base = raw_status_server("HTTP/1.1 404 Game Missing").await;
        let err = GameService::new(base).get_game(7).await.unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(err.code(), "Game Missing");
        assert_eq!(err.message(), "HTTP error! status: 404");
    }

    #[tokio::test]
    async fn test_nonstandard_status_keeps_phrase() {
        let base = raw_status_server("HTTP/1.1 599 Network Connect Timeout Error").await;
        let err = GameService::new(base)
            .get_games(PaginationParams::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), 599);
        assert_eq!(err.code(), "Network Connect Timeout Error");
    }

    #[test]
    fn test_status_text_fallbacks() {
        let not_found = reqwest::StatusCode::NOT_FOUND;
        let odd = reqwest::StatusCode::from_u16(599).unwrap();
        assert_eq!(status_text(not_found, Some(b"Gone Fishing")), "Gone Fishing");
        assert_eq!(status_text(not_found, None), "Not Found");
        assert_eq!(status_text(not_found, Some(b"  ")), "Not Found");
        assert_eq!(status_text(odd, None), "UNKNOWN_ERROR");
    }

    #[tokio::test]
    async fn test_configured_content_type_replaces_default() {
        let server = MockServer::start().await;
        Mock::given(path("/api/games"))
            .respond_with(json(EMPTY_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        service_for(&server)
            .with_header("Content-Type", "application/vnd.games+json")
            .get_games(PaginationParams::default())
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let values: Vec<_> = requests[0].headers.get_all("content-type").iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "application/vnd.games+json");
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        assert_eq!(
            GameService::new("http://localhost:120/api/").base_url(),
            "http://localhost:120/api"
        );
    }
}
