use chrono::NaiveDate;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const STATSAPI_BASE: &str = "https://statsapi.mlb.com";

/// Hard ceiling on a single upstream call so an expired cache entry can never
/// block a request indefinitely.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(20);

/// MLB Stats API client.
///
/// Fetches raw JSON documents. Decoding happens later, against the cached
/// copy, so the cache layer can persist exactly what the upstream returned.
#[derive(Debug, Clone)]
pub struct StatsApi {
    client: Client,
    base: String,
    timeout: Duration,
}

impl Default for StatsApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("dugout/0.1 (schedule and bracket service)")
                .build()
                .unwrap_or_default(),
            base: STATSAPI_BASE.to_owned(),
            timeout: UPSTREAM_TIMEOUT,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Status(u16, String),
    EmptyBody(String),
    InvalidJson(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Status(code, url) => write!(f, "Upstream returned {code} for {url}"),
            ApiError::EmptyBody(url) => write!(f, "Empty body from {url}"),
            ApiError::InvalidJson(url) => write!(f, "Invalid JSON from {url}"),
        }
    }
}

impl StatsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different base URL (tests, mirrors).
    pub fn with_base(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_owned(),
            ..Self::default()
        }
    }

    /// Three-day schedule window with everything the schedule view consumes
    /// hydrated in one call.
    pub async fn fetch_schedule(
        &self,
        sport_id: u32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ApiResult<String> {
        let url = format!(
            "{}/api/v1/schedule?sportId={sport_id}&startDate={start}&endDate={end}\
             &hydrate=broadcasts(all),linescore,team,decisions,probablePitcher,person",
            self.base
        );
        self.get_document(&url).await
    }

    /// Full live feed for a single game (line score, box score, plays).
    pub async fn fetch_game_feed(&self, game_pk: u64) -> ApiResult<String> {
        let url = format!("{}/api/v1.1/game/{game_pk}/feed/live", self.base);
        self.get_document(&url).await
    }

    pub async fn fetch_postseason_series(&self, season: i32, sport_id: u32) -> ApiResult<String> {
        let url = format!(
            "{}/api/v1/schedule/postseason/series?season={season}&sportId={sport_id}",
            self.base
        );
        self.get_document(&url).await
    }

    /// Regular-season standings for both top-level leagues; seeds are derived
    /// from this snapshot.
    pub async fn fetch_standings(&self, season: i32) -> ApiResult<String> {
        let url = format!(
            "{}/api/v1/standings?leagueId=103,104&season={season}\
             &standingsTypes=regularSeason&hydrate=team",
            self.base
        );
        self.get_document(&url).await
    }

    pub async fn fetch_wild_card_standings(&self, season: i32) -> ApiResult<String> {
        let url = format!(
            "{}/api/v1/standings?leagueId=103,104&season={season}\
             &standingsTypes=wildCard&hydrate=team",
            self.base
        );
        self.get_document(&url).await
    }

    /// Standings grouped by division for a non-MLB sport level.
    pub async fn fetch_division_standings(&self, sport_id: u32, season: i32) -> ApiResult<String> {
        let url = format!(
            "{}/api/v1/standings?sportId={sport_id}&season={season}\
             &standingsTypes=regularSeason&hydrate=team",
            self.base
        );
        self.get_document(&url).await
    }

    pub async fn fetch_team(&self, team_id: u32) -> ApiResult<String> {
        let url = format!("{}/api/v1/teams/{team_id}", self.base);
        self.get_document(&url).await
    }

    pub async fn fetch_roster(&self, team_id: u32) -> ApiResult<String> {
        let url = format!(
            "{}/api/v1/teams/{team_id}/roster?rosterType=active\
             &hydrate=person(stats(type=season))",
            self.base
        );
        self.get_document(&url).await
    }

    /// Fetch a raw document. Transport failures, non-2xx responses, empty
    /// bodies, and bodies that are not JSON all fail — a document that makes
    /// it past here is safe to cache and decode later.
    async fn get_document(&self, url: &str) -> ApiResult<String> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16(), url.to_owned()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        if body.trim().is_empty() {
            return Err(ApiError::EmptyBody(url.to_owned()));
        }
        if serde_json::from_str::<serde::de::IgnoredAny>(&body).is_err() {
            return Err(ApiError::InvalidJson(url.to_owned()));
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn valid_json_body_is_returned_verbatim() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1.1/game/717626/feed/live")
            .with_status(200)
            .with_body(r#"{"gameData":{}}"#)
            .create_async()
            .await;

        let api = StatsApi::with_base(&server.url());
        let body = api.fetch_game_feed(717626).await.expect("document");
        assert_eq!(body, r#"{"gameData":{}}"#);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_2xx_is_a_status_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1.1/game/1/feed/live")
            .with_status(503)
            .with_body("upstream down")
            .create_async()
            .await;

        let api = StatsApi::with_base(&server.url());
        match api.fetch_game_feed(1).await {
            Err(ApiError::Status(503, _)) => {}
            other => panic!("expected Status(503), got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_body_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1.1/game/2/feed/live")
            .with_status(200)
            .with_body("  ")
            .create_async()
            .await;

        let api = StatsApi::with_base(&server.url());
        assert!(matches!(
            api.fetch_game_feed(2).await,
            Err(ApiError::EmptyBody(_))
        ));
    }

    #[tokio::test]
    async fn invalid_json_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1.1/game/3/feed/live")
            .with_status(200)
            .with_body("curl: (7) connection refused")
            .create_async()
            .await;

        let api = StatsApi::with_base(&server.url());
        assert!(matches!(
            api.fetch_game_feed(3).await,
            Err(ApiError::InvalidJson(_))
        ));
    }

    #[tokio::test]
    async fn schedule_request_carries_window_and_hydration() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/schedule")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("sportId".into(), "1".into()),
                mockito::Matcher::UrlEncoded("startDate".into(), "2025-06-01".into()),
                mockito::Matcher::UrlEncoded("endDate".into(), "2025-06-03".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"dates":[]}"#)
            .create_async()
            .await;

        let api = StatsApi::with_base(&server.url());
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        api.fetch_schedule(1, start, end).await.expect("document");
        mock.assert_async().await;
    }
}
