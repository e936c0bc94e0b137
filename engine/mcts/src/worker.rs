//! Off-thread execution boundary for MCTS searches.
//!
//! A [`SearchWorker`] owns a dedicated OS thread. Callers hand it a
//! serialised position plus an iteration budget and await a single reply,
//! so an async event loop never blocks on a search. The same request and
//! reply types double as the JSON wire format:
//!
//! ```text
//! -> {"board":["X"," ","O",...],"playerToMove":"X","iterations":500,"seed":7}
//! <- {"move":4}
//! <- {"error":"game is already over"}
//! ```

use std::thread::{self, JoinHandle};

use engine_core::{DecodeError, Game};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::config::MctsConfig;
use crate::search::{MctsAgent, SearchError};

/// Errors surfaced across the worker boundary.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Malformed request: {0}")]
    Malformed(String),

    #[error("Invalid game state: {0}")]
    Decode(#[from] DecodeError),

    #[error("Game is already over")]
    GameOver,

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Search worker is no longer running")]
    Disconnected,

    #[error("Failed to start search worker: {0}")]
    Spawn(String),
}

/// A position to search plus the search budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest<S> {
    #[serde(flatten)]
    pub snapshot: S,

    pub iterations: u32,

    /// Fixed RNG seed; omitted means seed from entropy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl<S> SearchRequest<S> {
    pub fn new(snapshot: S, iterations: u32) -> Self {
        Self {
            snapshot,
            iterations,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// The move chosen by a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse<M> {
    #[serde(rename = "move")]
    pub best_move: M,
}

/// Wire reply: either a move or an error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchReply<M> {
    Move {
        #[serde(rename = "move")]
        best_move: M,
    },
    Error {
        error: String,
    },
}

impl<M> SearchReply<M> {
    pub fn from_result(result: Result<SearchResponse<M>, WorkerError>) -> Self {
        match result {
            Ok(response) => SearchReply::Move {
                best_move: response.best_move,
            },
            Err(e) => SearchReply::Error {
                error: e.to_string(),
            },
        }
    }
}

/// Run one request to completion on the current thread.
///
/// The snapshot is decoded with its outcome recomputed; terminal positions
/// are refused before any tree is built.
pub fn run_request<G: Game>(
    request: SearchRequest<G::Snapshot>,
) -> Result<SearchResponse<G::Move>, WorkerError> {
    let state = G::from_snapshot(&request.snapshot)?;
    if state.is_terminal() {
        return Err(WorkerError::GameOver);
    }

    let mut config = MctsConfig::default().with_iterations(request.iterations);
    config.seed = request.seed;

    let best_move = MctsAgent::new(config).find_best_move(&state)?;
    Ok(SearchResponse { best_move })
}

fn decode_request<G: Game>(line: &str) -> Result<SearchRequest<G::Snapshot>, WorkerError> {
    serde_json::from_str(line.trim()).map_err(|e| WorkerError::Malformed(e.to_string()))
}

fn encode_reply<M: Serialize>(result: Result<SearchResponse<M>, WorkerError>) -> String {
    let reply = SearchReply::from_result(result);
    serde_json::to_string(&reply)
        .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
}

/// Decode a JSON request, search synchronously, and encode the reply.
pub fn handle_json_line<G: Game>(line: &str) -> String {
    encode_reply(decode_request::<G>(line).and_then(run_request::<G>))
}

struct Job<G: Game> {
    request: SearchRequest<G::Snapshot>,
    reply: oneshot::Sender<Result<SearchResponse<G::Move>, WorkerError>>,
}

/// Handle to a background search thread.
///
/// `search` takes `&mut self`, so each worker has at most one request in
/// flight. Dropping the handle closes the channel and lets the thread exit.
pub struct SearchWorker<G: Game> {
    jobs: mpsc::Sender<Job<G>>,
    thread: JoinHandle<()>,
}

impl<G: Game> SearchWorker<G> {
    /// Start the worker thread.
    pub fn spawn() -> Result<Self, WorkerError> {
        let (jobs, mut rx) = mpsc::channel::<Job<G>>(1);

        let thread = thread::Builder::new()
            .name("mcts-worker".into())
            .spawn(move || {
                while let Some(job) = rx.blocking_recv() {
                    let result = run_request::<G>(job.request);
                    if job.reply.send(result).is_err() {
                        warn!("Search requester went away before the reply");
                    }
                }
                debug!("Search worker channel closed, exiting");
            })
            .map_err(|e| WorkerError::Spawn(e.to_string()))?;

        debug!("Search worker started");
        Ok(Self { jobs, thread })
    }

    /// Submit a request and wait for the chosen move.
    pub async fn search(
        &mut self,
        request: SearchRequest<G::Snapshot>,
    ) -> Result<SearchResponse<G::Move>, WorkerError> {
        let (reply, response) = oneshot::channel();
        self.jobs
            .send(Job { request, reply })
            .await
            .map_err(|_| WorkerError::Disconnected)?;
        response.await.map_err(|_| WorkerError::Disconnected)?
    }

    /// Search a live position.
    pub async fn search_state(
        &mut self,
        state: &G,
        iterations: u32,
        seed: Option<u64>,
    ) -> Result<G::Move, WorkerError> {
        let request = SearchRequest::new(state.snapshot(), iterations).with_seed(seed);
        Ok(self.search(request).await?.best_move)
    }

    /// Async counterpart of [`handle_json_line`] that runs the search on the worker.
    pub async fn handle_json_line(&mut self, line: &str) -> String {
        let result = match decode_request::<G>(line) {
            Ok(request) => self.search(request).await,
            Err(e) => Err(e),
        };
        encode_reply(result)
    }

    /// Close the channel and wait for the thread to finish.
    pub fn shutdown(self) -> Result<(), WorkerError> {
        let Self { jobs, thread } = self;
        drop(jobs);
        thread.join().map_err(|_| WorkerError::Disconnected)
    }
}
