use async_trait::async_trait;
use tracing::debug;

use super::types::{DisplayList, ResultPage, SearchQuery};
use super::{MovieSource, TmdbError};
use crate::config::TmdbConfig;

const DISCOVER_PATH: &str = "/3/discover/movie";
const SEARCH_PATH: &str = "/3/search/movie";

pub struct TmdbClient {
    http: reqwest::Client,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, TmdbError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(TmdbError::Client)?;

        Ok(Self { http, config })
    }

    pub fn discover_url(&self) -> String {
        let mut url = format!(
            "{}{}?sort_by=popularity.desc&api_key={}&page=1",
            self.config.api_url,
            DISCOVER_PATH,
            urlencoding::encode(&self.config.api_key),
        );
        self.push_language(&mut url);
        url
    }

    pub fn search_url(&self, query: &SearchQuery) -> String {
        let mut url = format!(
            "{}{}?api_key={}&query={}",
            self.config.api_url,
            SEARCH_PATH,
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(query.as_str()),
        );
        self.push_language(&mut url);
        url
    }

    fn push_language(&self, url: &mut String) {
        if let Some(ref language) = self.config.language {
            url.push_str("&language=");
            url.push_str(&urlencoding::encode(language));
        }
    }

    /// The url with the `api_key` parameter value blanked out, for logging.
    fn redact(&self, url: &str) -> String {
        let (base, query) = match url.split_once('?') {
            Some(parts) => parts,
            None => return url.to_string(),
        };
        let params: Vec<&str> = query
            .split('&')
            .map(|param| {
                if param.starts_with("api_key=") {
                    "api_key=<redacted>"
                } else {
                    param
                }
            })
            .collect();
        format!("{}?{}", base, params.join("&"))
    }

    async fn get_page(&self, url: &str) -> Result<ResultPage, TmdbError> {
        debug!(url = %self.redact(url), "Catalog request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(TmdbError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TmdbError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(TmdbError::Network)?;
        let page: ResultPage = serde_json::from_slice(&body)?;

        debug!(
            results = page.results.len(),
            total_results = page.total_results,
            "Catalog response"
        );
        Ok(page)
    }
}

#[async_trait]
impl MovieSource for TmdbClient {
    async fn fetch_popular(&self) -> Result<DisplayList, TmdbError> {
        let url = self.discover_url();
        Ok(self.get_page(&url).await?.results)
    }

    async fn fetch_search(&self, query: &SearchQuery) -> Result<DisplayList, TmdbError> {
        let url = self.search_url(query);
        Ok(self.get_page(&url).await?.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Query, RawQuery, State},
        http::StatusCode,
        response::IntoResponse,
        routing::get,
        Router,
    };
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<String>>>;

    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn catalog_stub(seen: Seen) -> Router {
        async fn discover(State(seen): State<Seen>, RawQuery(q): RawQuery) -> impl IntoResponse {
            seen.lock().unwrap().push(q.unwrap_or_default());
            axum::Json(serde_json::json!({
                "page": 1,
                "results": [
                    {"id": 1, "title": "X", "vote_average": 8, "overview": "o", "poster_path": "/p.jpg"},
                    {"id": 2, "title": "Y", "vote_average": 6.1, "overview": "", "poster_path": null}
                ]
            }))
        }

        async fn search(
            State(seen): State<Seen>,
            RawQuery(raw): RawQuery,
            Query(params): Query<HashMap<String, String>>,
        ) -> axum::response::Response {
            seen.lock().unwrap().push(raw.unwrap_or_default());
            if params.get("api_key").map(String::as_str) == Some("bad") {
                return StatusCode::UNAUTHORIZED.into_response();
            }
            let term = params.get("query").cloned().unwrap_or_default();
            axum::Json(serde_json::json!({
                "results": [{"id": 7, "title": term, "vote_average": 7.0, "overview": "found"}]
            }))
            .into_response()
        }

        Router::new()
            .route("/3/discover/movie", get(discover))
            .route("/3/search/movie", get(search))
            .with_state(seen)
    }

    fn client_for(api_url: &str, key: &str) -> TmdbClient {
        let mut config = TmdbConfig::new(key);
        config.api_url = api_url.to_string();
        config.timeout_secs = 5;
        TmdbClient::new(config).unwrap()
    }

    #[test]
    fn test_discover_url() {
        let client = client_for("https://api.example.org", "k3y");
        assert_eq!(
            client.discover_url(),
            "https://api.example.org/3/discover/movie?sort_by=popularity.desc&api_key=k3y&page=1"
        );
    }

    #[test]
    fn test_search_url_encodes_term() {
        let client = client_for("https://api.example.org", "k3y");
        assert_eq!(
            client.search_url(&SearchQuery::from("star wars&more")),
            "https://api.example.org/3/search/movie?api_key=k3y&query=star%20wars%26more"
        );
        assert!(client.search_url(&SearchQuery::default()).ends_with("&query="));
    }

    #[test]
    fn test_language_is_appended() {
        let mut config = TmdbConfig::new("k3y");
        config.language = Some("nl-NL".to_string());
        let client = TmdbClient::new(config).unwrap();
        assert!(client.discover_url().ends_with("&page=1&language=nl-NL"));
        assert!(client.search_url(&"a".into()).ends_with("&query=a&language=nl-NL"));
    }

    #[test]
    fn test_redact_hides_key() {
        let client = client_for("https://api.example.org", "k3y");
        let logged = client.redact(&client.discover_url());
        assert!(!logged.contains("k3y"));
        assert!(logged.contains("api_key=<redacted>"));
    }

    #[test]
    fn test_redact_leaves_other_params_alone() {
        let client = client_for("https://api.example.org", "ab");
        let logged = client.redact(&client.search_url(&"abba".into()));
        assert_eq!(
            logged,
            "https://api.example.org/3/search/movie?api_key=<redacted>&query=abba"
        );
    }

    #[tokio::test]
    async fn test_fetch_popular_keeps_upstream_order() {
        let seen = Seen::default();
        let base = spawn_stub(catalog_stub(seen.clone())).await;
        let client = client_for(&base, "k3y");

        let movies = client.fetch_popular().await.unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "X");
        assert_eq!(movies[1].title, "Y");
        assert_eq!(movies[1].poster_path, None);

        let requests = seen.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].contains("sort_by=popularity.desc"));
        assert!(requests[0].contains("page=1"));
    }

    #[tokio::test]
    async fn test_fetch_search_sends_term() {
        let seen = Seen::default();
        let base = spawn_stub(catalog_stub(seen.clone())).await;
        let client = client_for(&base, "k3y");

        let movies = client.fetch_search(&"batman".into()).await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "batman");
        assert!(seen.lock().unwrap()[0].contains("query=batman"));

        let movies = client.fetch_search(&"the dark knight".into()).await.unwrap();
        assert_eq!(movies[0].title, "the dark knight");
    }

    #[tokio::test]
    async fn test_upstream_status_error() {
        let base = spawn_stub(catalog_stub(Seen::default())).await;
        let client = client_for(&base, "bad");

        let err = client.fetch_search(&"batman".into()).await.unwrap_err();
        assert!(matches!(err, TmdbError::Status(401)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let app = Router::new().route("/3/discover/movie", get(|| async { "<html>oops</html>" }));
        let base = spawn_stub(app).await;
        let client = client_for(&base, "k3y");

        let err = client.fetch_popular().await.unwrap_err();
        assert!(matches!(err, TmdbError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client_for(&format!("http://{}", addr), "k3y");

        let err = client.fetch_popular().await.unwrap_err();
        assert!(matches!(err, TmdbError::Network(_)));
    }
}
