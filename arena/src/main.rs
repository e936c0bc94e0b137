//! Arena - terminal front end for the noughts MCTS engine
//!
//! A short-lived process that either:
//! 1. Runs interactive games (pvp, pvc) on the terminal
//! 2. Plays batches of AI-vs-AI games and reports tallies (cvc)
//! 3. Answers JSON-lines search requests on stdin (serve)

use anyhow::Result;
use clap::Parser;
use mcts::SearchWorker;
use tokio::io::{self, AsyncWriteExt};
use tokio::signal;
use tracing::{error, info};

mod config;
mod controller;
mod input;
mod stats;

use crate::config::{Config, Mode, Player};
use crate::controller::Controller;
use crate::input::InputLines;
use crate::stats::MatchStats;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so stdout stays clean for the board and serve replies
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

async fn run_serve() -> Result<()> {
    let mut worker = SearchWorker::spawn()?;
    let mut input = InputLines::spawn_stdin()?;
    let mut stdout = io::stdout();

    info!("Serving search requests on stdin");
    controller::serve(&mut worker, &mut input, &mut stdout).await?;

    worker.shutdown()?;
    Ok(())
}

async fn run_games(config: &Config, mode: Mode) -> Result<()> {
    let seats = config.seats(mode)?;
    info!(x = %seats.x, o = %seats.o, games = config.games, "Starting match");

    let mut controller = Controller::new(config.budgets.clone(), config.seed())?;
    let mut stats = MatchStats::new();
    let mut input = if seats.x == Player::Human || seats.o == Player::Human {
        InputLines::spawn_stdin()?
    } else {
        InputLines::empty()
    };
    let mut stdout = io::stdout();

    // Batches only print the tallies; single or interactive games show the board
    let show_board = mode != Mode::Cvc || config.games == 1;

    for game in 1..=config.games {
        let searches_before = controller.searches();
        let record = controller
            .play_game(seats, &mut input, &mut stdout, show_board)
            .await?;

        stats.record_game(record.outcome, record.moves);
        stats.record_searches(controller.searches() - searches_before);
        info!(
            game,
            outcome = ?record.outcome,
            moves = record.moves,
            "Game finished"
        );
    }

    if config.games > 1 {
        let summary = stats.snapshot().summary_line();
        stdout.write_all(format!("{}\n", summary).as_bytes()).await?;
        stdout.flush().await?;
    }
    stats.log_summary();

    controller.shutdown()
}

async fn run(config: Config) -> Result<()> {
    match config.mode()? {
        Mode::Serve => run_serve().await,
        mode => run_games(&config, mode).await,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse and validate configuration
    let config = Config::parse();
    config.validate()?;

    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, mode = %config.mode, "Tracing initialized");

    let result = tokio::select! {
        result = run(config) => result,
        signal = signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received, stopping arena");
            Ok(())
        }
    };

    match result {
        Ok(()) => {
            info!("Arena finished");
            Ok(())
        }
        Err(e) => {
            error!("Arena failed: {:#}", e);
            Err(e)
        }
    }
}
