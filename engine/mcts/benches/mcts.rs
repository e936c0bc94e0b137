//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full searches at each difficulty tier and at varying iteration counts
//! - Search from different game phases (opening, midgame, near-terminal)
//! - Tree operations (selection, backpropagation, rollout)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use engine_core::Game;
use games_tictactoe::State;
use mcts::{
    run_mcts, Difficulty, Evaluator, MctsConfig, MctsTree, RandomRollout, EXPLORATION_CONSTANT,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Play a fixed sequence of moves from the empty board.
fn play_moves(moves: &[u8]) -> State {
    moves.iter().fold(State::initial(), |state, &mv| {
        state.apply_move(mv).unwrap()
    })
}

fn search(state: State, config: &MctsConfig) -> u8 {
    let evaluator = RandomRollout;
    let mut rng = ChaCha20Rng::seed_from_u64(42);
    run_mcts(&evaluator, config.clone(), state, &mut rng)
        .unwrap()
        .best_move
}

// =============================================================================
// Full MCTS Search Benchmarks
// =============================================================================

fn bench_mcts_search_iterations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_iterations");

    for iterations in [50u32, 200, 500, 1000, 2000] {
        group.throughput(Throughput::Elements(iterations as u64));
        group.bench_with_input(
            BenchmarkId::new("opening", iterations),
            &iterations,
            |b, &iterations| {
                let config = MctsConfig::for_testing().with_iterations(iterations);
                b.iter(|| black_box(search(State::initial(), &config)));
            },
        );
    }

    group.finish();
}

fn bench_mcts_difficulty(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_difficulty");

    for difficulty in Difficulty::ALL {
        group.bench_function(difficulty.as_str(), |b| {
            let config = MctsConfig::for_difficulty(difficulty).with_seed(42);
            b.iter(|| black_box(search(State::initial(), &config)));
        });
    }

    group.finish();
}

fn bench_mcts_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_game_phases");
    let config = MctsConfig::for_testing().with_iterations(500);

    // Opening position (all 9 moves available)
    group.bench_function("opening", |b| {
        b.iter(|| black_box(search(State::initial(), &config)));
    });

    // Midgame: X at 4, O at 0, X at 2, O at 6
    let midgame = play_moves(&[4, 0, 2, 6]);
    group.bench_function("midgame", |b| {
        b.iter(|| black_box(search(midgame, &config)));
    });

    // Near-terminal: X at 0, O at 3, X at 1, O at 4 -> X can win at 2
    let near_terminal = play_moves(&[0, 3, 1, 4]);
    group.bench_function("near_terminal", |b| {
        b.iter(|| black_box(search(near_terminal, &config)));
    });

    group.finish();
}

fn bench_mcts_exploration(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_exploration");

    for exploration in [0.5, 1.0, EXPLORATION_CONSTANT, 2.0] {
        group.bench_with_input(
            BenchmarkId::new("c", format!("{:.3}", exploration)),
            &exploration,
            |b, &exploration| {
                let config = MctsConfig::for_testing()
                    .with_iterations(500)
                    .with_exploration(exploration);
                b.iter(|| black_box(search(State::initial(), &config)));
            },
        );
    }

    group.finish();
}

// =============================================================================
// Tree Operation Benchmarks
// =============================================================================

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_tree_ops");

    // Expand every root move
    group.bench_function("expand_root", |b| {
        b.iter(|| {
            let mut tree = MctsTree::new(State::initial());
            while let Some(child) = tree.expand(tree.root()).unwrap() {
                black_box(child);
            }
            black_box(tree.len())
        });
    });

    // Child selection (UCB1 over 9 children with varied statistics)
    group.bench_function("select_child", |b| {
        let mut tree = MctsTree::new(State::initial());
        let mut i = 0u32;
        while let Some(child_id) = tree.expand(tree.root()).unwrap() {
            let child = tree.get_mut(child_id);
            child.visit_count = (i + 1) * 10;
            child.win_score = child.visit_count as f64 * (i as f64 / 10.0);
            i += 1;
        }
        tree.get_mut(tree.root()).visit_count = 450;

        b.iter(|| black_box(tree.select_child(tree.root(), EXPLORATION_CONSTANT)));
    });

    // Backpropagation along a path of depth 5
    group.bench_function("backpropagate_depth_5", |b| {
        b.iter_batched(
            || {
                let mut tree = MctsTree::new(State::initial());
                let mut leaf = tree.root();
                for _ in 0..5 {
                    leaf = tree.expand(leaf).unwrap().unwrap();
                }
                (tree, leaf)
            },
            |(mut tree, leaf)| {
                tree.backpropagate(leaf, 1.0);
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    // A single random playout from the empty board
    group.bench_function("random_rollout", |b| {
        let evaluator = RandomRollout;
        let state = State::initial();
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        b.iter(|| black_box(evaluator.evaluate(&state, &mut rng).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_mcts_search_iterations,
    bench_mcts_difficulty,
    bench_mcts_game_phases,
    bench_mcts_exploration,
    bench_tree_operations,
);

criterion_main!(benches);
