//! End-to-end tests: move list -> FEN -> analysis service -> arrow.
//!
//! Runs the real HTTP client against an in-process mock analysis service.

mod common;

use analysis_client::{
    AnalysisOutcome, HttpAnalysisClient, MoveListNodes, NavigationWatcher, OverlayPipeline,
    NO_RECOMMENDATION_TEXT,
};
use axum::http::StatusCode;
use board_overlay::{
    compute_arrow, BoardFrame, BoundingBox, MemorySurface, Orientation, PlacementOutcome,
    StaticBoard, ARROW_MARKER,
};
use chess_core::{reconstruct, side_to_move, Color, STANDARD_START_FEN};
use serde_json::json;

const E5_REPLY: &str =
    r#"{"moves":[{"uci":"e7e5","san":"e5","score":12.0},{"uci":"c7c5","san":"c5","score":8.0}]}"#;

fn board(orientation: Orientation) -> StaticBoard {
    StaticBoard(Some(BoardFrame {
        orientation,
        bbox: BoundingBox::new(24.0, 96.0, 800.0, 800.0),
    }))
}

fn pipeline(
    mock: &common::MockService,
    orientation: Orientation,
    nodes: &[&str],
) -> OverlayPipeline<HttpAnalysisClient, StaticBoard, MoveListNodes, MemorySurface> {
    let config = mock.config();
    let client = HttpAnalysisClient::new(&config).expect("Failed to build client");
    OverlayPipeline::new(
        &config,
        client,
        board(orientation),
        MoveListNodes(nodes.iter().map(|s| s.to_string()).collect()),
        MemorySurface::new(),
        NavigationWatcher::new(),
    )
}

// ---------------------------------------------------------------------------
// Reconstruction scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_a_single_move() {
    assert_eq!(
        reconstruct(&["e4"]),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
    );
}

#[test]
fn test_scenario_b_three_plies() {
    let fen = reconstruct(&["e4", "e5", "Nf3"]);
    let fields: Vec<&str> = fen.split_whitespace().collect();
    assert_eq!(fields.len(), 6);
    assert_eq!(fields[0], "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R");
    assert_eq!(fields[2], "KQkq");
    assert_eq!(side_to_move(&fen), Some(Color::Black));
}

// ---------------------------------------------------------------------------
// Geometry scenario
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_d_flip_mirrors_midpoint() {
    let bbox = BoundingBox::new(0.0, 0.0, 800.0, 800.0);
    let from = "e2".parse().unwrap();
    let to = "e4".parse().unwrap();
    let white = compute_arrow(from, to, Orientation::White, &bbox).unwrap();
    let black = compute_arrow(from, to, Orientation::Black, &bbox).unwrap();

    let (mw, mb) = (white.midpoint(), black.midpoint());
    assert_eq!((mw.x, mw.y), (450.0, 550.0));
    assert_eq!((mb.x, mb.y), (350.0, 250.0));
    assert_eq!(mw.x + mb.x, 800.0);
    assert_eq!(mw.y + mb.y, 800.0);
}

// ---------------------------------------------------------------------------
// Full round trips
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_round_trip_draws_best_move() {
    let mock = common::spawn_mock(StatusCode::OK, E5_REPLY).await;
    let mut p = pipeline(&mock, Orientation::Black, &["1.", "e4"]);

    let outcome = p.analyze().await;
    match &outcome {
        AnalysisOutcome::Recommended { best, placement, .. } => {
            assert_eq!(best.uci, "e7e5");
            assert_eq!(*placement, PlacementOutcome::Placed);
        }
        other => panic!("expected recommendation, got {other:?}"),
    }

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0],
        json!({
            "fen": "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
            "player_color": "black",
        })
    );

    assert_eq!(p.surface().count_marked(ARROW_MARKER), 1);
    assert_eq!(p.surface().status.as_deref(), Some("Best move: e7-e5 (Score: 12)"));

    // Black at the bottom: e7 is near the bottom-right, e5 above it.
    let arrow = p.slot().current().unwrap();
    assert_eq!((arrow.geometry.from.x, arrow.geometry.from.y), (350.0, 650.0));
    assert_eq!((arrow.geometry.to.x, arrow.geometry.to.y), (350.0, 450.0));
}

#[tokio::test]
async fn test_scenario_c_empty_moves_clears_arrow() {
    let mock = common::spawn_mock(StatusCode::OK, E5_REPLY).await;
    let mut p = pipeline(&mock, Orientation::Black, &["e4"]);
    assert!(matches!(p.analyze().await, AnalysisOutcome::Recommended { .. }));
    assert_eq!(p.surface().count_marked(ARROW_MARKER), 1);

    mock.set_reply(StatusCode::OK, r#"{"moves":[]}"#);
    let outcome = p.analyze().await;

    assert!(matches!(outcome, AnalysisOutcome::NoRecommendation { .. }), "{outcome:?}");
    assert_eq!(p.surface().status.as_deref(), Some(NO_RECOMMENDATION_TEXT));
    assert_eq!(p.surface().count_marked(ARROW_MARKER), 0);
    assert!(p.slot().current().is_none());
}

#[tokio::test]
async fn test_service_error_status_is_neutral() {
    let mock = common::spawn_mock(StatusCode::BAD_REQUEST, r#"{"error":"Invalid FEN"}"#).await;
    let mut p = pipeline(&mock, Orientation::White, &[]);

    let outcome = p.analyze().await;
    let AnalysisOutcome::NoRecommendation { fen, reason } = outcome else {
        panic!("expected no recommendation");
    };
    assert_eq!(fen, STANDARD_START_FEN);
    assert!(reason.contains("400"), "{reason}");
    assert_eq!(p.surface().status.as_deref(), Some(NO_RECOMMENDATION_TEXT));
}

#[tokio::test]
async fn test_malformed_body_is_neutral() {
    let mock = common::spawn_mock(StatusCode::OK, "<html>oops</html>").await;
    let mut p = pipeline(&mock, Orientation::White, &["d4"]);
    assert!(matches!(p.analyze().await, AnalysisOutcome::NoRecommendation { .. }));
    assert_eq!(p.surface().count_marked(ARROW_MARKER), 0);
}

#[tokio::test]
async fn test_unreachable_service_is_neutral() {
    let mock = common::spawn_mock(StatusCode::OK, E5_REPLY).await;
    let mut config = mock.config();
    config.analysis_url = common::dead_url();
    let client = HttpAnalysisClient::new(&config).unwrap();
    let mut p = OverlayPipeline::new(
        &config,
        client,
        board(Orientation::White),
        vec!["e4".to_string()],
        MemorySurface::new(),
        NavigationWatcher::new(),
    );

    assert!(matches!(p.analyze().await, AnalysisOutcome::NoRecommendation { .. }));
    assert_eq!(p.surface().status.as_deref(), Some(NO_RECOMMENDATION_TEXT));
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_malformed_moves_still_reach_service() {
    let mock = common::spawn_mock(StatusCode::OK, r#"{"moves":[]}"#).await;
    let mut p = pipeline(&mock, Orientation::White, &["1.", "e4", "??", "e5", "2.", "Nf3", "Qxz9"]);
    p.analyze().await;

    let requests = mock.requests();
    assert_eq!(requests[0]["fen"], reconstruct(&["e4", "e5", "Nf3"]));
    assert_eq!(requests[0]["player_color"], "white");
}
