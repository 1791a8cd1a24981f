//! Analysis round trip for the board overlay.
//!
//! Collects the move list, rebuilds the position, asks the external
//! analysis service for a move, and draws it on the board. Also carries
//! the connectivity probe and the popup toggle the page shell uses.

pub mod client;
pub mod config;
pub mod error;
pub mod page;
pub mod pipeline;
pub mod probe;

pub use client::{AnalysisRequest, AnalysisResponse, AnalysisService, CandidateMove, HttpAnalysisClient};
pub use config::OverlayConfig;
pub use error::{ClientError, ConfigError, WaitError};
pub use page::{
    is_chess_game_page, wait_for_board, MoveListNodes, MoveListText, MoveSource, NavigationWatcher,
    PieceGrid, PiecePlacement,
};
pub use pipeline::{recommendation_text, AnalysisOutcome, OverlayPipeline, NO_RECOMMENDATION_TEXT};
pub use probe::{AnalysisToggle, ConnectionStatus, ToggleAction, ToggleMessage};
