//! Overlay agent
//!
//! Runs one analysis round trip from the command line: rebuilds the
//! position from the given moves, asks the analysis service for a move,
//! and prints the status line and arrow SVG a page bridge would draw.
//!
//! Usage: overlay-agent [--black] [--size N] [--probe] [--strict] MOVE...

use analysis_client::{
    wait_for_board, AnalysisOutcome, AnalysisToggle, HttpAnalysisClient, NavigationWatcher,
    OverlayConfig, OverlayPipeline,
};
use board_overlay::{
    BoardFrame, BoundingBox, MemorySurface, Orientation, StaticBoard, MIN_BOARD_DIMENSION,
};
use chess_core::{Reconstruction, ReplayMode};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

struct Args {
    orientation: Orientation,
    size: f64,
    probe: bool,
    strict: bool,
    moves: Vec<String>,
}

fn parse_args<I>(argv: I) -> anyhow::Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut args = Args {
        orientation: Orientation::White,
        size: 800.0,
        probe: false,
        strict: false,
        moves: Vec::new(),
    };

    let mut iter = argv.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--black" => args.orientation = Orientation::Black,
            "--probe" => args.probe = true,
            "--strict" => args.strict = true,
            "--size" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--size needs a value"))?;
                args.size = value.parse()?;
                // A static board never grows, so placement would retry forever.
                anyhow::ensure!(
                    args.size >= MIN_BOARD_DIMENSION,
                    "--size must be at least {MIN_BOARD_DIMENSION}, got {}",
                    args.size
                );
            }
            _ => args.moves.push(arg),
        }
    }
    Ok(args)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let mut config = OverlayConfig::from_env()?;
    if args.strict {
        config.replay_mode = ReplayMode::Strict;
    }
    info!(
        analysis_url = %config.analysis_url,
        mode = ?config.replay_mode,
        "Overlay config loaded"
    );

    let client = HttpAnalysisClient::new(&config)?;

    if args.probe {
        let status = client.check_connection().await;
        let toggle = AnalysisToggle::new(&status);
        println!("{}", status.status_text());
        if !toggle.is_enabled() {
            warn!("Analysis disabled until the engine is reachable");
            return Ok(());
        }
    }

    let host = StaticBoard(Some(BoardFrame {
        orientation: args.orientation,
        bbox: BoundingBox::square(args.size),
    }));
    let navigation = NavigationWatcher::new();
    wait_for_board(&host, config.board_poll_interval, &navigation).await?;

    let mut pipeline = OverlayPipeline::new(
        &config,
        client,
        host,
        args.moves,
        MemorySurface::new(),
        navigation,
    );

    match pipeline.reconstruct() {
        Reconstruction::Replayed(report) => {
            for (token, reason) in report.skipped() {
                warn!(token, reason = %reason, "Move not applied");
            }
            println!("FEN: {}", report.fen);
        }
        Reconstruction::Approximate(fen) => println!("FEN (approximate): {fen}"),
    }

    let outcome = pipeline.analyze().await;
    if let Some(status) = &pipeline.surface().status {
        println!("{status}");
    }
    match outcome {
        AnalysisOutcome::Recommended { .. } => {
            if let Some(annotation) = pipeline.slot().current() {
                println!("{}", annotation.to_svg());
            }
        }
        AnalysisOutcome::NoRecommendation { reason, .. } => info!(reason = %reason, "No arrow drawn"),
        AnalysisOutcome::Stale { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_flags_and_moves() {
        let args = parse_args(argv(&["--black", "--size", "640", "--strict", "e4", "e5"])).unwrap();
        assert_eq!(args.orientation, Orientation::Black);
        assert_eq!(args.size, 640.0);
        assert!(args.strict);
        assert!(!args.probe);
        assert_eq!(args.moves, vec!["e4", "e5"]);
    }

    #[test]
    fn test_undersized_board_rejected() {
        assert!(parse_args(argv(&["--size", "50", "e4"])).is_err());
        assert!(parse_args(argv(&["--size", "100"])).is_ok());
    }

    #[test]
    fn test_size_needs_a_number() {
        assert!(parse_args(argv(&["--size"])).is_err());
        assert!(parse_args(argv(&["--size", "big"])).is_err());
    }
}
