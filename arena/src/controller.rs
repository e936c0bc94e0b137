//! Game loop driving human and AI players.
//!
//! Humans type square numbers on the input stream; AI moves are computed on
//! a [`SearchWorker`] thread, so the async loop itself never runs a search.

use anyhow::{bail, Result};
use engine_config::DifficultyConfig;
use engine_core::Game;
use games_tictactoe::{Outcome, State};
use mcts::{Difficulty, SearchWorker};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::config::{iterations_for, Player, Seats};
use crate::input::InputLines;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub moves: u32,
}

/// Validate a typed square against the current position.
pub fn parse_move(line: &str, state: &State) -> Result<u8, String> {
    let text = line.trim();
    let mv: u8 = text
        .parse()
        .map_err(|_| format!("'{}' is not a square number", text))?;
    state.apply_move(mv).map_err(|e| e.to_string())?;
    Ok(mv)
}

pub fn outcome_message(outcome: Outcome) -> String {
    match outcome {
        Outcome::Win(mark) => format!("Player {} wins!", mark),
        Outcome::Draw => "It's a draw!".to_string(),
        Outcome::Undecided => "Game not finished".to_string(),
    }
}

async fn write_str<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

/// Prompt until the human enters a legal square.
async fn read_human_move<W>(state: &State, input: &mut InputLines, out: &mut W) -> Result<u8>
where
    W: AsyncWrite + Unpin,
{
    loop {
        let prompt = format!(
            "Player {}, choose a square (0-8): ",
            state.player_to_move()
        );
        write_str(out, &prompt).await?;

        let Some(line) = input.next_line().await? else {
            bail!("input closed before the game finished");
        };

        match parse_move(&line, state) {
            Ok(mv) => return Ok(mv),
            Err(msg) => write_str(out, &format!("{}\n", msg)).await?,
        }
    }
}

/// Owns the search worker and plays games between seated players.
pub struct Controller {
    worker: SearchWorker<State>,
    budgets: DifficultyConfig,
    seed: Option<u64>,
    searches: u64,
}

impl Controller {
    pub fn new(budgets: DifficultyConfig, seed: Option<u64>) -> Result<Self> {
        Ok(Self {
            worker: SearchWorker::spawn()?,
            budgets,
            seed,
            searches: 0,
        })
    }

    /// Searches run so far.
    pub fn searches(&self) -> u64 {
        self.searches
    }

    async fn ai_move(&mut self, state: &State, difficulty: Difficulty) -> Result<u8> {
        let iterations = iterations_for(&self.budgets, difficulty);
        // Distinct but reproducible seed per search
        let seed = self.seed.map(|s| s.wrapping_add(self.searches));
        self.searches += 1;

        let mv = self.worker.search_state(state, iterations, seed).await?;
        debug!(%difficulty, iterations, mv, "AI move chosen");
        Ok(mv)
    }

    /// Play one game from the empty board.
    ///
    /// With `show_board` the board is printed after every move along with the
    /// final result; human prompts are always printed.
    pub async fn play_game<W>(
        &mut self,
        seats: Seats,
        input: &mut InputLines,
        out: &mut W,
        show_board: bool,
    ) -> Result<GameRecord>
    where
        W: AsyncWrite + Unpin,
    {
        let mut state = State::initial();
        if show_board {
            write_str(out, &format!("{}\n\n", state)).await?;
        }

        while !state.is_terminal() {
            let mark = state.player_to_move();
            let mv = match seats.get(mark) {
                Player::Human => read_human_move(&state, input, out).await?,
                Player::Agent(difficulty) => {
                    if show_board {
                        write_str(out, &format!("AI ({}) playing {}...\n", difficulty, mark))
                            .await?;
                    }
                    self.ai_move(&state, difficulty).await?
                }
            };

            state = state.apply_move(mv)?;
            debug!(player = %mark, mv, "Move played");

            if show_board {
                write_str(out, &format!("{} plays {}\n{}\n\n", mark, mv, state)).await?;
            }
        }

        let outcome = state.outcome();
        if show_board {
            write_str(out, &format!("{}\n", outcome_message(outcome))).await?;
        }

        Ok(GameRecord {
            outcome,
            moves: state.moves_played() as u32,
        })
    }

    pub fn shutdown(self) -> Result<()> {
        self.worker.shutdown()?;
        Ok(())
    }
}

/// Answer JSON-lines search requests until the input closes.
///
/// Every non-blank line gets exactly one reply line, `{"move":n}` or
/// `{"error":"..."}`. Returns the number of requests served.
pub async fn serve<W>(
    worker: &mut SearchWorker<State>,
    input: &mut InputLines,
    out: &mut W,
) -> Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut served = 0u64;

    while let Some(line) = input.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = worker.handle_json_line(&line).await;
        write_str(out, &format!("{}\n", reply)).await?;
        served += 1;
        debug!(served, "Request answered");
    }

    info!(served, "Input closed, stopping service");
    Ok(served)
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_tictactoe::Mark;

    fn budgets() -> DifficultyConfig {
        DifficultyConfig {
            easy: 50,
            medium: 500,
            hard: 2000,
        }
    }

    fn humans() -> Seats {
        Seats {
            x: Player::Human,
            o: Player::Human,
        }
    }

    #[test]
    fn test_parse_move() {
        let state = State::initial().apply_move(4).unwrap();
        assert_eq!(parse_move(" 0\n", &state), Ok(0));
        assert!(parse_move("4", &state).unwrap_err().contains("occupied"));
        assert!(parse_move("9", &state).unwrap_err().contains("out of range"));
        assert!(parse_move("x", &state)
            .unwrap_err()
            .contains("not a square number"));
        assert!(parse_move("-1", &state).is_err());
    }

    #[test]
    fn test_outcome_message() {
        assert_eq!(outcome_message(Outcome::Win(Mark::O)), "Player O wins!");
        assert_eq!(outcome_message(Outcome::Draw), "It's a draw!");
    }

    #[tokio::test]
    async fn test_human_game_top_row() {
        let mut controller = Controller::new(budgets(), Some(1)).unwrap();
        let mut input = InputLines::from_lines(&["0", "3", "1", "4", "2"]);
        let mut out = Vec::new();

        let record = controller
            .play_game(humans(), &mut input, &mut out, true)
            .await
            .unwrap();

        assert_eq!(record.outcome, Outcome::Win(Mark::X));
        assert_eq!(record.moves, 5);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Player X wins!"));
        assert_eq!(controller.searches(), 0);

        controller.shutdown().unwrap();
    }

    #[tokio::test]
    async fn test_invalid_input_is_reprompted() {
        let mut controller = Controller::new(budgets(), None).unwrap();
        let mut input = InputLines::from_lines(&["9", "abc", "0", "0", "3", "1", "4", "2"]);
        let mut out = Vec::new();

        let record = controller
            .play_game(humans(), &mut input, &mut out, false)
            .await
            .unwrap();
        assert_eq!(record.outcome, Outcome::Win(Mark::X));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("out of range"));
        assert!(text.contains("'abc' is not a square number"));
        assert!(text.contains("Cell 0 is already occupied"));
        assert_eq!(text.matches("choose a square").count(), 8);

        controller.shutdown().unwrap();
    }

    #[tokio::test]
    async fn test_closed_input_is_an_error() {
        let mut controller = Controller::new(budgets(), None).unwrap();
        let mut input = InputLines::from_lines(&["4"]);
        let mut out = Vec::new();

        let err = controller
            .play_game(humans(), &mut input, &mut out, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("input closed"));

        controller.shutdown().unwrap();
    }

    #[tokio::test]
    async fn test_dropping_a_pending_prompt_releases_input() {
        let (tx, rx) = tokio::sync::mpsc::channel(1);
        let (mut out, mut screen) = tokio::io::duplex(1024);

        let game = tokio::spawn(async move {
            let mut controller = Controller::new(budgets(), None)?;
            let mut input = InputLines::from_receiver(rx);
            controller
                .play_game(humans(), &mut input, &mut out, false)
                .await
        });

        // Wait until the game is blocked on the first prompt
        let mut seen = Vec::new();
        let mut buf = [0u8; 256];
        while !String::from_utf8_lossy(&seen).contains("choose a square") {
            let n = tokio::io::AsyncReadExt::read(&mut screen, &mut buf)
                .await
                .unwrap();
            assert!(n > 0, "game ended before prompting");
            seen.extend_from_slice(&buf[..n]);
        }

        game.abort();
        assert!(game.await.unwrap_err().is_cancelled());
        assert!(tx.send(Ok("0".into())).await.is_err());
    }

    #[tokio::test]
    async fn test_human_against_ai() {
        let mut controller = Controller::new(budgets(), Some(7)).unwrap();
        // Squares in order; occupied ones are re-prompted
        let mut input =
            InputLines::from_lines(&["0", "1", "2", "3", "4", "5", "6", "7", "8"]);
        let mut out = Vec::new();
        let seats = Seats {
            x: Player::Human,
            o: Player::Agent(Difficulty::Easy),
        };

        let record = controller
            .play_game(seats, &mut input, &mut out, true)
            .await
            .unwrap();

        assert!(record.outcome.is_decided());
        assert!(controller.searches() >= 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("AI (easy) playing O"));

        controller.shutdown().unwrap();
    }

    #[tokio::test]
    async fn test_ai_against_ai() {
        let mut controller = Controller::new(budgets(), Some(3)).unwrap();
        let mut input = InputLines::empty();
        let mut out = Vec::new();
        let seats = Seats {
            x: Player::Agent(Difficulty::Medium),
            o: Player::Agent(Difficulty::Easy),
        };

        let record = controller
            .play_game(seats, &mut input, &mut out, false)
            .await
            .unwrap();

        assert!(record.outcome.is_decided());
        assert_eq!(controller.searches(), record.moves as u64);
        assert!(out.is_empty());

        controller.shutdown().unwrap();
    }

    #[tokio::test]
    async fn test_serve_answers_every_line() {
        let mut worker = SearchWorker::<State>::spawn().unwrap();
        let mut input = InputLines::from_lines(&[
            r#"{"board":["X","X"," ","O","O"," "," "," "," "],"playerToMove":"X","iterations":2000,"seed":5}"#,
            "",
            "not json",
            r#"{"board":["X","X","X","O","O"," "," "," "," "],"playerToMove":"O","iterations":10}"#,
        ]);
        let mut out = Vec::new();

        let served = serve(&mut worker, &mut input, &mut out).await.unwrap();
        assert_eq!(served, 3);

        let text = String::from_utf8(out).unwrap();
        let replies: Vec<&str> = text.lines().collect();
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0], r#"{"move":2}"#);
        assert!(replies[1].starts_with(r#"{"error":"Malformed request"#));
        assert_eq!(replies[2], r#"{"error":"Game is already over"}"#);

        worker.shutdown().unwrap();
    }
}
