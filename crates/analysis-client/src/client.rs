//! HTTP client for the external analysis service.

use std::future::Future;

use board_overlay::Orientation;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::OverlayConfig;
use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub fen: String,
    pub player_color: String,
}

impl AnalysisRequest {
    /// The player sits at the bottom of the board, so orientation decides
    /// the colour we ask about.
    pub fn new(fen: impl Into<String>, orientation: Orientation) -> Self {
        Self {
            fen: fen.into(),
            player_color: orientation.player_color().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMove {
    /// From and to squares, e.g. `e2e4`
    pub uci: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub san: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub moves: Vec<CandidateMove>,
}

impl AnalysisResponse {
    /// Only the best-ranked candidate is ever used.
    pub fn best(&self) -> Option<&CandidateMove> {
        self.moves.first()
    }
}

/// Anything that can answer an analysis request.
pub trait AnalysisService {
    fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> impl Future<Output = Result<AnalysisResponse, ClientError>>;
}

pub struct HttpAnalysisClient {
    client: Client,
    analysis_url: String,
    health_url: String,
}

impl HttpAnalysisClient {
    pub fn new(config: &OverlayConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent("BoardOverlay/1.0")
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            analysis_url: config.analysis_url.clone(),
            health_url: config.health_url.clone(),
        })
    }

    pub fn health_url(&self) -> &str {
        &self.health_url
    }

    /// POST `body` as JSON and check only the status; the reply body is
    /// never read.
    pub(crate) async fn post_status<B>(&self, url: &str, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        let resp = self.client.post(url).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status(status.as_u16(), text));
        }
        Ok(())
    }

    /// POST `body` as JSON and decode a JSON reply, treating any non-2xx
    /// status as an error.
    pub(crate) async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let resp = self.client.post(url).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status(status.as_u16(), text));
        }

        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl AnalysisService for HttpAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, ClientError> {
        debug!(fen = %request.fen, player_color = %request.player_color, "Requesting analysis");
        let response: AnalysisResponse = self.post_json(&self.analysis_url, request).await?;
        debug!(candidates = response.moves.len(), "Analysis response");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let req = AnalysisRequest::new("8/8/8/8/8/8/8/8 w - - 0 1", Orientation::Black);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "fen": "8/8/8/8/8/8/8/8 w - - 0 1", "player_color": "black" })
        );
    }

    #[test]
    fn test_response_decoding() {
        let resp: AnalysisResponse = serde_json::from_str(
            r#"{"moves":[{"uci":"e2e4","san":"e4","score":35.0},{"uci":"d2d4","score":30}]}"#,
        )
        .unwrap();
        assert_eq!(resp.moves.len(), 2);
        assert_eq!(resp.best().unwrap().uci, "e2e4");
        assert_eq!(resp.moves[1].san, None);
    }

    #[test]
    fn test_missing_moves_is_empty() {
        let resp: AnalysisResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.best().is_none());
    }

    #[test]
    fn test_malformed_candidate_rejected() {
        let result = serde_json::from_str::<AnalysisResponse>(r#"{"moves":[{"uci":"e2e4"}]}"#);
        assert!(result.is_err());
    }
}
