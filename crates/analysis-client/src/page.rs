//! Page-side collaborators: game-page detection, move collection,
//! navigation tracking, and waiting for the board to appear.

use std::sync::Arc;
use std::time::Duration;

use board_overlay::{BoardFrame, BoardHost};
use chess_core::grid::GridPiece;
use chess_core::notation::{collect_move_tokens, extract_moves};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::WaitError;

/// True for live-game pages (`/game/` or `/play/` on chess.com).
pub fn is_chess_game_page(url: &str) -> bool {
    let Ok(url) = reqwest::Url::parse(url) else {
        return false;
    };
    let on_site = url.host_str().is_some_and(|h| h.contains("chess.com"));
    let path = url.path();
    on_site && (path.contains("/game/") || path.contains("/play/"))
}

/// Piece placement read off the board. Row 0 is rank 8.
pub type PieceGrid = Vec<[Option<GridPiece>; 8]>;

/// Produces move tokens in play order. May be empty or contain junk.
pub trait MoveSource {
    fn collect_moves(&self) -> Vec<String>;

    /// Only consulted when the move list is empty.
    fn piece_grid(&self) -> Option<PieceGrid> {
        None
    }
}

impl MoveSource for Vec<String> {
    fn collect_moves(&self) -> Vec<String> {
        self.clone()
    }
}

/// Raw text of each move-list node, filtered on collection.
#[derive(Debug, Clone, Default)]
pub struct MoveListNodes(pub Vec<String>);

impl MoveSource for MoveListNodes {
    fn collect_moves(&self) -> Vec<String> {
        collect_move_tokens(&self.0)
    }
}

/// A whole move list rendered as one string, e.g. `1. e4 e5 2. Nf3`.
#[derive(Debug, Clone, Default)]
pub struct MoveListText(pub String);

impl MoveSource for MoveListText {
    fn collect_moves(&self) -> Vec<String> {
        extract_moves(&self.0)
    }
}

/// A board that shows its pieces but no move list.
#[derive(Debug, Clone)]
pub struct PiecePlacement(pub PieceGrid);

impl MoveSource for PiecePlacement {
    fn collect_moves(&self) -> Vec<String> {
        Vec::new()
    }

    fn piece_grid(&self) -> Option<PieceGrid> {
        Some(self.0.clone())
    }
}

/// Navigation epoch shared between the page watcher and the pipeline.
///
/// Every in-page navigation bumps the epoch. Work started under an older
/// epoch belongs to a page that no longer exists.
#[derive(Debug, Clone)]
pub struct NavigationWatcher {
    tx: Arc<watch::Sender<u64>>,
}

impl Default for NavigationWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationWatcher {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx: Arc::new(tx) }
    }

    pub fn epoch(&self) -> u64 {
        *self.tx.borrow()
    }

    /// Record a URL change. Returns the new epoch.
    pub fn navigated(&self) -> u64 {
        self.tx.send_modify(|epoch| *epoch += 1);
        let epoch = self.epoch();
        info!(epoch, "Page navigated");
        epoch
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

/// Poll `host` every `interval` until the board and its container are
/// present. There is no attempt limit; a navigation cancels the wait.
pub async fn wait_for_board<H>(
    host: &H,
    interval: Duration,
    navigation: &NavigationWatcher,
) -> Result<BoardFrame, WaitError>
where
    H: BoardHost + ?Sized,
{
    let mut rx = navigation.subscribe();
    rx.borrow_and_update();

    let mut attempts = 0u64;
    loop {
        if let Some(frame) = host.locate() {
            info!(attempts, "Chess board found");
            return Ok(frame);
        }
        attempts += 1;
        debug!(attempts, "Waiting for chess board...");

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = rx.changed() => {
                info!("Navigation during board wait, cancelling");
                return Err(WaitError::Cancelled);
            }
        }
    }
}
