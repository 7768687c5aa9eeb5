use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::time::Duration;

use pobo::board::{Action, GameState, Rank};
use pobo::eval::{score, Weights};
use pobo::movegen::{legal_actions, ExclusionList};
use pobo::protocol::notation::parse_position;
use pobo::resolve::{apply, find_groups};
use pobo::search::{complete_search, preselect, simulate};

/// A crowded middle-game position with reserves on both sides.
const MIDGAME: &str = "a1B1b1/1aAb2/2ab2/b2a1B/2b3/6;111;1;a";

fn bench_evaluate(c: &mut Criterion) {
    let state = parse_position(MIDGAME).unwrap();
    let weights = Weights::default();
    c.bench_function("evaluate_midgame", |b| {
        b.iter(|| {
            score(
                black_box(&state.board),
                black_box(&state.pools),
                state.turn,
                &weights,
            )
        })
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let state = parse_position(MIDGAME).unwrap();
    let exclusions = ExclusionList::new();
    c.bench_function("legal_actions_midgame", |b| {
        b.iter(|| legal_actions(black_box(&state), &exclusions))
    });
}

fn bench_find_groups(c: &mut Criterion) {
    let state = parse_position(MIDGAME).unwrap();
    c.bench_function("find_groups_midgame", |b| {
        b.iter(|| find_groups(black_box(&state.board), &state.pools, state.turn))
    });
}

fn bench_apply(c: &mut Criterion) {
    let state = parse_position(MIDGAME).unwrap();
    let weights = Weights::default();
    let action = Action::new(Rank::Minor, 2, 1);
    c.bench_function("apply_crowded_placement", |b| {
        let mut rng = SmallRng::seed_from_u64(42);
        b.iter(|| {
            let mut next = state;
            apply(&mut next, black_box(action), &weights.groups, &mut rng)
        })
    });
}

fn bench_simulate_and_score(c: &mut Criterion) {
    let state = parse_position(MIDGAME).unwrap();
    let weights = Weights::default();
    let actions = legal_actions(&state, &ExclusionList::new());
    c.bench_function("simulate_all_candidates", |b| {
        let mut rng = SmallRng::seed_from_u64(42);
        b.iter(|| {
            for &action in &actions {
                let next = simulate(black_box(&state), action, &weights, &mut rng);
                black_box(score(&next.board, &next.pools, next.turn, &weights));
            }
        })
    });
}

fn bench_complete_search(c: &mut Criterion) {
    let weights = Weights::default();
    let exclusions = ExclusionList::new();
    let mut group = c.benchmark_group("search");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(10));
    for (name, state) in [
        ("opening", GameState::initial()),
        ("midgame", parse_position(MIDGAME).unwrap()),
    ] {
        group.bench_function(name, |b| {
            let mut rng = SmallRng::seed_from_u64(42);
            b.iter(|| complete_search(black_box(&state), &weights, &exclusions, &mut rng))
        });
    }
    group.finish();
}

fn bench_preselect(c: &mut Criterion) {
    let state = parse_position(MIDGAME).unwrap();
    let weights = Weights::default();
    let exclusions = ExclusionList::new();
    c.bench_function("preselect_top5_midgame", |b| {
        let mut rng = SmallRng::seed_from_u64(42);
        b.iter(|| preselect(black_box(&state), &weights, &exclusions, 5, &mut rng))
    });
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_legal_actions,
    bench_find_groups,
    bench_apply,
    bench_simulate_and_score,
    bench_complete_search,
    bench_preselect,
);
criterion_main!(benches);
