//! # Impact Ledger Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | Unlock evaluation (3 predicates) | < 1µs |
//! | `log_action` against the in-memory store | < 50µs |
//! | Standings ranking, 10k participants | < 1ms |

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use su_01_impact_ledger::domain::catalog::seed_achievements;
use su_01_impact_ledger::domain::rules::evaluate_unlocks;
use su_01_impact_ledger::{
    ActionKind, CommunityProgress, FixedClock, FixedRanking, ImpactLedgerApi,
    ImpactLedgerService, InMemoryCounterStore, LedgerConfig, PredicateTable, RankingProvider,
    StandingsRanking, Stats,
};

fn bench_unlock_evaluation(c: &mut Criterion) {
    let table = PredicateTable::standard();
    let stats = Stats {
        carbon_saved: 50.0,
        waste_diverted: 20.0,
        trees_planted: 1,
        community_rank: 12,
    };
    let community = CommunityProgress::default();

    c.bench_function("su-01/evaluate_unlocks_none_satisfied", |b| {
        b.iter(|| {
            let mut achievements = seed_achievements();
            black_box(evaluate_unlocks(
                &mut achievements,
                &table,
                black_box(&stats),
                &community,
            ))
        })
    });
}

fn bench_log_action(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let mut ledger = ImpactLedgerService::new(
        Arc::new(InMemoryCounterStore::new()),
        Arc::new(FixedRanking::with_percentile(40)),
        Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2025, 1, 22).unwrap())),
        LedgerConfig::default(),
    )
    .unwrap();

    c.bench_function("su-01/log_action_in_memory", |b| {
        b.iter(|| {
            runtime
                .block_on(ledger.log_action(ActionKind::CarbonReduction, black_box(0.5)))
                .unwrap()
        })
    });
}

fn bench_standings(c: &mut Criterion) {
    let mut group = c.benchmark_group("su-01/standings_ranking");
    for size in [100usize, 1_000, 10_000] {
        let ranking = StandingsRanking::new((0..size).map(|i| i as f64 * 1.5).collect());
        let stats = Stats {
            carbon_saved: size as f64 * 0.75,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(ranking.standing(&stats).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_unlock_evaluation, bench_log_action, bench_standings);
criterion_main!(benches);
