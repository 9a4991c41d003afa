use crate::TransportError;
use doudizhu_core::{GameSnapshot, StartRequest, StartResponse};
use tracing::debug;

/// HTTP side of the server: the start trigger and the state resync endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// `POST /api/start_game`. The authoritative install still happens via
    /// the broadcast `game_started` event.
    pub async fn start_match(&self, request: &StartRequest) -> Result<StartResponse, TransportError> {
        let url = format!("{}/api/start_game", self.base_url);
        debug!(%url, "requesting match start");
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<StartResponse>()
            .await?;
        if !response.success {
            return Err(TransportError::StartRejected(
                "server reported start failure".to_string(),
            ));
        }
        Ok(response)
    }

    /// `GET /api/game_state`, used to resync after joining late.
    pub async fn fetch_state(&self) -> Result<GameSnapshot, TransportError> {
        let url = format!("{}/api/game_state", self.base_url);
        debug!(%url, "fetching game state");
        let snapshot = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<GameSnapshot>()
            .await?;
        Ok(snapshot)
    }
}
