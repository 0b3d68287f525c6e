use criterion::{black_box, criterion_group, criterion_main, Criterion};

use auto_tetris::bot::{plan_move, EvalWeights, RiskTracker};
use auto_tetris::core::{catalog, Board};
use auto_tetris::types::{GameAction, PieceKind};
use auto_tetris::{Autopilot, GameConfig, GameState};

fn bench_clear_full_rows(c: &mut Criterion) {
    let mut template = Board::new(14, 30);
    for y in 26..30 {
        for x in 0..14 {
            template.set(x, y, 1);
        }
    }

    c.bench_function("clear_four_rows", |b| {
        b.iter(|| {
            let mut board = template.clone();
            black_box(board.clear_full_rows())
        })
    });
}

fn bench_collision(c: &mut Criterion) {
    let mut board = Board::new(14, 30);
    for y in 20..30 {
        for x in 0..13 {
            board.set(x, y, 1);
        }
    }
    let t = catalog(PieceKind::T);

    c.bench_function("collision_probe", |b| {
        b.iter(|| {
            let mut hits = 0;
            for y in 0..30 {
                for x in -2..16 {
                    if board.collides(black_box(&t), x, y) {
                        hits += 1;
                    }
                }
            }
            black_box(hits)
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    c.bench_function("tick_gravity", |b| {
        let mut state = GameState::new(GameConfig::default().with_seed(1)).unwrap();
        b.iter(|| {
            if state.game_over() {
                state.apply_action(GameAction::Restart);
            }
            black_box(state.tick(50))
        })
    });
}

fn bench_plan_move(c: &mut Criterion) {
    let state = GameState::new(GameConfig::default().with_seed(7)).unwrap();
    let weights = EvalWeights::default();

    c.bench_function("plan_move_two_ply", |b| {
        b.iter(|| {
            let mut risk = RiskTracker::new();
            black_box(plan_move(&state, &mut risk, &weights))
        })
    });
}

fn bench_autopilot_session(c: &mut Criterion) {
    c.bench_function("autopilot_20_pieces", |b| {
        b.iter(|| {
            let mut state = GameState::new(GameConfig::default().with_seed(11)).unwrap();
            let mut pilot = Autopilot::new();
            let mut placed = 0;
            while placed < 20 && !state.game_over() {
                let Some(action) = pilot.next_action(&state) else {
                    break;
                };
                if action == GameAction::HardDrop {
                    placed += 1;
                }
                state.apply_action(action);
            }
            black_box(state.score_state().score)
        })
    });
}

criterion_group!(
    benches,
    bench_clear_full_rows,
    bench_collision,
    bench_tick,
    bench_plan_move,
    bench_autopilot_session
);
criterion_main!(benches);
