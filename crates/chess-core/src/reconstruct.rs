//! Position reconstruction: replay observed move notation into a FEN.
//!
//! Tokens come from a live move list, so they can be malformed, annotated,
//! or out of sync with the board. Replay never stops at a bad token: it
//! records why the token was skipped and keeps going from the unchanged
//! position.

use serde::Serialize;
use shakmaty::{
    fen::Fen,
    san::{San, SanError},
    uci::UciMove,
    CastlingMode, Chess, Color, EnPassantMode, Move, Position,
};
use tracing::{debug, warn};

use crate::error::SkipReason;

pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const RESULT_TOKENS: &[&str] = &["1-0", "0-1", "1/2-1/2", "½-½", "*"];

/// How forgiving the token matcher is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplayMode {
    /// Resolves ambiguous SAN to the first matching legal move and accepts
    /// coordinate moves like `e2e4`.
    #[default]
    Sloppy,
    /// Plain SAN only; ambiguity is a skip.
    Strict,
}

/// What happened to one token during replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MoveOutcome {
    Applied { token: String, uci: String },
    Skipped { token: String, reason: SkipReason },
}

impl MoveOutcome {
    pub fn token(&self) -> &str {
        match self {
            MoveOutcome::Applied { token, .. } | MoveOutcome::Skipped { token, .. } => token,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied { .. })
    }
}

/// Final FEN plus a per-token account of the replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub fen: String,
    pub outcomes: Vec<MoveOutcome>,
}

impl ReplayReport {
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    /// Skipped tokens with their reasons, in input order.
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.outcomes.iter().filter_map(|o| match o {
            MoveOutcome::Skipped { token, reason } => Some((token.as_str(), reason)),
            MoveOutcome::Applied { .. } => None,
        })
    }
}

/// Reconstruct a FEN from move tokens in play order, tolerating sloppy
/// notation. Empty input yields [`STANDARD_START_FEN`].
pub fn reconstruct<S: AsRef<str>>(moves: &[S]) -> String {
    replay(moves).fen
}

/// Like [`reconstruct`] but ambiguous or coordinate tokens are skipped.
pub fn reconstruct_strict<S: AsRef<str>>(moves: &[S]) -> String {
    replay_strict(moves).fen
}

pub fn replay<S: AsRef<str>>(moves: &[S]) -> ReplayReport {
    replay_with_mode(moves, ReplayMode::Sloppy)
}

pub fn replay_strict<S: AsRef<str>>(moves: &[S]) -> ReplayReport {
    replay_with_mode(moves, ReplayMode::Strict)
}

pub fn replay_with_mode<S: AsRef<str>>(moves: &[S], mode: ReplayMode) -> ReplayReport {
    if moves.is_empty() {
        return ReplayReport {
            fen: STANDARD_START_FEN.to_string(),
            outcomes: Vec::new(),
        };
    }

    let mut pos = Chess::default();
    let mut outcomes = Vec::with_capacity(moves.len());

    for raw in moves {
        let token = raw.as_ref();
        match resolve_move(&pos, token, mode) {
            Ok(mv) => {
                let uci = mv.to_uci(CastlingMode::Standard).to_string();
                debug!(token, uci = %uci, "Applying move");
                pos.play_unchecked(mv);
                outcomes.push(MoveOutcome::Applied {
                    token: token.to_string(),
                    uci,
                });
            }
            Err(reason) => {
                warn!(token, reason = %reason, "Skipping move");
                outcomes.push(MoveOutcome::Skipped {
                    token: token.to_string(),
                    reason,
                });
            }
        }
    }

    let fen = Fen::from_position(&pos, EnPassantMode::Legal).to_string();
    debug!(fen = %fen, "Reconstructed position");
    ReplayReport { fen, outcomes }
}

/// Side to move from the second FEN field.
pub fn side_to_move(fen: &str) -> Option<Color> {
    match fen.split_whitespace().nth(1)? {
        "w" => Some(Color::White),
        "b" => Some(Color::Black),
        _ => None,
    }
}

fn resolve_move(pos: &Chess, token: &str, mode: ReplayMode) -> Result<Move, SkipReason> {
    let cleaned = normalize_token(token);
    if cleaned.is_empty() || RESULT_TOKENS.contains(&cleaned.as_str()) {
        return Err(SkipReason::NotAMove);
    }

    if is_coordinate_move(&cleaned) {
        return match mode {
            ReplayMode::Strict => Err(SkipReason::CoordinateRejected),
            ReplayMode::Sloppy => resolve_uci(pos, &cleaned),
        };
    }

    let san = cleaned
        .parse::<San>()
        .map_err(|e| SkipReason::InvalidNotation(e.to_string()))?;

    match san.to_move(pos) {
        Ok(mv) => Ok(mv),
        Err(SanError::AmbiguousSan) => match mode {
            ReplayMode::Strict => Err(SkipReason::Ambiguous),
            ReplayMode::Sloppy => first_matching_move(pos, &san)
                .ok_or_else(|| SkipReason::Illegal(cleaned.clone())),
        },
        Err(e) => Err(SkipReason::Illegal(e.to_string())),
    }
}

fn resolve_uci(pos: &Chess, cleaned: &str) -> Result<Move, SkipReason> {
    let uci = cleaned
        .parse::<UciMove>()
        .map_err(|e| SkipReason::InvalidNotation(e.to_string()))?;
    uci.to_move(pos)
        .map_err(|e| SkipReason::Illegal(e.to_string()))
}

/// First legal move, in generation order, that fits an under-specified SAN.
fn first_matching_move(pos: &Chess, san: &San) -> Option<Move> {
    let San::Normal {
        role,
        file,
        rank,
        capture,
        to,
        promotion,
    } = *san
    else {
        return None;
    };

    pos.legal_moves().into_iter().find(|m| {
        !m.is_castle()
            && m.role() == role
            && m.to() == to
            && m.promotion() == promotion
            && (!capture || m.is_capture())
            && file.map_or(true, |f| m.from().map_or(false, |sq| sq.file() == f))
            && rank.map_or(true, |r| m.from().map_or(false, |sq| sq.rank() == r))
    })
}

/// Strip check/annotation glyphs and normalise zero-castling.
fn normalize_token(token: &str) -> String {
    let trimmed = token.trim().trim_end_matches(['+', '#', '!', '?']);
    match trimmed {
        "0-0" => "O-O".to_string(),
        "0-0-0" => "O-O-O".to_string(),
        other => other.to_string(),
    }
}

fn is_coordinate_move(s: &str) -> bool {
    let b = s.as_bytes();
    let square = |f: u8, r: u8| (b'a'..=b'h').contains(&f) && (b'1'..=b'8').contains(&r);
    match b.len() {
        4 => square(b[0], b[1]) && square(b[2], b[3]),
        5 => square(b[0], b[1]) && square(b[2], b[3]) && b"qrbn".contains(&b[4]),
        _ => false,
    }
}
