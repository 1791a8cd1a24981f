//! Connectivity probe and the analysis on/off toggle.

use chess_core::STANDARD_START_FEN;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::HttpAnalysisClient;

#[derive(Serialize)]
struct ProbeRequest<'a> {
    fen: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected { reason: String },
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }

    pub fn status_text(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "Connected to engine",
            ConnectionStatus::Disconnected { .. } => {
                "Engine not connected. Please start the local server."
            }
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "status connected",
            ConnectionStatus::Disconnected { .. } => "status disconnected",
        }
    }
}

impl HttpAnalysisClient {
    /// POST the starting position to the health endpoint. Any 2xx reply
    /// counts as connected; the body is ignored.
    pub async fn check_connection(&self) -> ConnectionStatus {
        let result = self
            .post_status(
                self.health_url(),
                &ProbeRequest {
                    fen: STANDARD_START_FEN,
                },
            )
            .await;

        match result {
            Ok(()) => {
                info!(url = self.health_url(), "Engine reachable");
                ConnectionStatus::Connected
            }
            Err(e) => {
                warn!(url = self.health_url(), error = %e, "Engine not reachable");
                ConnectionStatus::Disconnected {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleAction {
    StartAnalysis,
    StopAnalysis,
}

/// Message sent from the popup to the content pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleMessage {
    pub action: ToggleAction,
}

/// Popup toggle state. Disabled until a probe reports the engine as
/// connected.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisToggle {
    analyzing: bool,
    enabled: bool,
}

impl AnalysisToggle {
    pub fn new(status: &ConnectionStatus) -> Self {
        Self {
            analyzing: false,
            enabled: status.is_connected(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn button_label(&self) -> &'static str {
        if self.analyzing {
            "Stop Analysis"
        } else {
            "Start Analysis"
        }
    }

    /// Flip the state. Returns the message for the content pipeline, or
    /// `None` while the control is disabled.
    pub fn toggle(&mut self) -> Option<ToggleMessage> {
        if !self.enabled {
            return None;
        }
        self.analyzing = !self.analyzing;
        let action = if self.analyzing {
            ToggleAction::StartAnalysis
        } else {
            ToggleAction::StopAnalysis
        };
        Some(ToggleMessage { action })
    }
}
