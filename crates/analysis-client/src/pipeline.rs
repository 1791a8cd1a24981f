//! Analysis pipeline: moves -> FEN -> service -> arrow.
//!
//! Every failure past reconstruction ends in the same neutral state: no
//! arrow on the board and the "No recommended moves" status line.

use board_overlay::{
    parse_uci_squares, place_after_settle, AnnotationSlot, AnnotationSurface, ArrowStyle,
    BoardHost, PlacementOutcome, PlacementTiming,
};
use chess_core::grid::approximate_fen_from_grid;
use chess_core::{replay_with_mode, Reconstruction, ReplayMode};
use tracing::{info, warn};

use crate::client::{AnalysisRequest, AnalysisService, CandidateMove};
use crate::config::OverlayConfig;
use crate::error::ClientError;
use crate::page::{MoveSource, NavigationWatcher};
use crate::probe::{ToggleAction, ToggleMessage};

pub const NO_RECOMMENDATION_TEXT: &str = "No recommended moves";

/// Status line for a recommended move, e.g. `Best move: e2-e4 (Score: 35)`.
pub fn recommendation_text(best: &CandidateMove) -> String {
    let from = best.uci.get(0..2).unwrap_or_default();
    let to = best.uci.get(2..4).unwrap_or_default();
    format!("Best move: {from}-{to} (Score: {})", best.score)
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Recommended {
        fen: String,
        best: CandidateMove,
        placement: PlacementOutcome,
    },
    NoRecommendation {
        fen: String,
        reason: String,
    },
    /// The page navigated while the request was in flight; the response
    /// was dropped without touching the board.
    Stale { started: u64, current: u64 },
}

pub struct OverlayPipeline<A, H, M, S> {
    service: A,
    host: H,
    moves: M,
    surface: S,
    slot: AnnotationSlot,
    navigation: NavigationWatcher,
    style: ArrowStyle,
    timing: PlacementTiming,
    mode: ReplayMode,
}

impl<A, H, M, S> OverlayPipeline<A, H, M, S>
where
    A: AnalysisService,
    H: BoardHost,
    M: MoveSource,
    S: AnnotationSurface,
{
    pub fn new(
        config: &OverlayConfig,
        service: A,
        host: H,
        moves: M,
        surface: S,
        navigation: NavigationWatcher,
    ) -> Self {
        Self {
            service,
            host,
            moves,
            surface,
            slot: AnnotationSlot::new(),
            navigation,
            style: config.arrow_style.clone(),
            timing: config.placement,
            mode: config.replay_mode,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn slot(&self) -> &AnnotationSlot {
        &self.slot
    }

    /// Rebuild the position from the current move list. With no moves
    /// and a piece grid on offer, fall back to the approximate FEN.
    pub fn reconstruct(&self) -> Reconstruction {
        let tokens = self.moves.collect_moves();
        if tokens.is_empty() {
            if let Some(grid) = self.moves.piece_grid() {
                match approximate_fen_from_grid(&grid) {
                    Ok(fen) => {
                        warn!(fen = %fen, "No move list, using approximate position from the board");
                        return Reconstruction::Approximate(fen);
                    }
                    Err(e) => warn!(error = %e, "Unusable piece grid, replaying empty move list"),
                }
            }
        }

        let report = replay_with_mode(&tokens, self.mode);
        let skipped = report.skipped().count();
        if skipped > 0 {
            warn!(skipped, applied = report.applied_count(), "Some moves were not applied");
        }
        Reconstruction::Replayed(report)
    }

    /// One full analysis round trip.
    pub async fn analyze(&mut self) -> AnalysisOutcome {
        let started = self.navigation.epoch();
        let fen = self.reconstruct().fen().to_string();
        let orientation = self
            .host
            .locate()
            .map(|frame| frame.orientation)
            .unwrap_or_default();

        info!(fen = %fen, player_color = orientation.player_color(), "Starting position analysis");
        let request = AnalysisRequest::new(fen.clone(), orientation);
        let result = self.service.analyze(&request).await;

        let current = self.navigation.epoch();
        if current != started {
            info!(started, current, "Discarding analysis from previous page");
            return AnalysisOutcome::Stale { started, current };
        }

        let best = match result.and_then(|resp| resp.best().cloned().ok_or(ClientError::NoCandidates)) {
            Ok(best) => best,
            Err(e) => return self.no_recommendation(fen, e),
        };
        let (from, to) = match parse_uci_squares(&best.uci) {
            Ok(squares) => squares,
            Err(e) => return self.no_recommendation(fen, e.into()),
        };

        // The old arrow must not sit under the new status line if this
        // placement never lands.
        self.slot.clear(&mut self.surface);
        self.surface.show_status(&recommendation_text(&best));
        let placement = place_after_settle(
            &mut self.slot,
            &self.host,
            &mut self.surface,
            from,
            to,
            &self.style,
            &self.timing,
        )
        .await;

        AnalysisOutcome::Recommended {
            fen,
            best,
            placement,
        }
    }

    /// React to the popup toggle. Starting runs one analysis; stopping
    /// removes the arrow.
    pub async fn handle_toggle(&mut self, message: ToggleMessage) -> Option<AnalysisOutcome> {
        match message.action {
            ToggleAction::StartAnalysis => Some(self.analyze().await),
            ToggleAction::StopAnalysis => {
                self.slot.clear(&mut self.surface);
                None
            }
        }
    }

    fn no_recommendation(&mut self, fen: String, error: ClientError) -> AnalysisOutcome {
        warn!(error = %error, "No recommendation");
        self.slot.clear(&mut self.surface);
        self.surface.show_status(NO_RECOMMENDATION_TEXT);
        AnalysisOutcome::NoRecommendation {
            fen,
            reason: error.to_string(),
        }
    }
}
