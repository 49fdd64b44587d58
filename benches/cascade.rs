use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_cascade::core::{
    find_matches, Board, ChainResolver, GameConfig, ScoreTracker, SimpleRng, StagedCascade,
};
use tui_cascade::engine::{GameEngine, ReadinessGate};
use tui_cascade::types::{Adjacency, Identity};

/// Default-sized board with the bottom half filled from a fixed seed.
fn busy_board() -> Board {
    let config = GameConfig::default();
    let mut rng = SimpleRng::new(12345);
    let mut board = Board::new(config.rows, config.columns);
    for row in config.rows / 2..config.rows {
        for col in 0..config.columns {
            let id = (rng.next_u32() >> 16) % 4;
            board.set(row, col, Some(Identity::new(id as u8))).unwrap();
        }
    }
    board
}

fn bench_find_matches(c: &mut Criterion) {
    let board = busy_board();
    c.bench_function("find_matches_diagonal", |b| {
        b.iter(|| find_matches(black_box(&board), Adjacency::Diagonal))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let board = busy_board();
    c.bench_function("resolve_atomic", |b| {
        b.iter(|| {
            let mut board = board.clone();
            let mut score = ScoreTracker::new();
            ChainResolver::new(Adjacency::Orthogonal).resolve(&mut board, &mut score)
        })
    });
    c.bench_function("resolve_staged", |b| {
        b.iter(|| {
            let mut board = board.clone();
            let mut score = ScoreTracker::new();
            StagedCascade::new(Adjacency::Orthogonal).run_to_fixpoint(&mut board, &mut score)
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let config = GameConfig::default();
    let mut gate = ReadinessGate::new(config.identities);
    for i in 0..config.identities {
        gate.mark_ready(Identity::new(i));
    }
    let mut engine = GameEngine::from_config(config, 12345).unwrap();
    engine.start(&gate).unwrap();

    c.bench_function("engine_tick_16ms", |b| {
        b.iter(|| {
            if engine.game_over() {
                engine.reset();
            }
            engine.tick(black_box(16));
        })
    });
}

criterion_group!(benches, bench_find_matches, bench_resolve, bench_tick);
criterion_main!(benches);
