// Criterion benchmarks for swipe-match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashSet;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use swipe_match::core::{
    build_candidate_query, haversine_distance, matches_query_constraints, rank_candidates, Discovery,
    DiscoveryFilter, SortBy,
};
use swipe_match::models::{Credential, Member};
use swipe_match::services::{IdentityStore, MemoryStore};

fn create_candidate(id: usize, lat: f64, lon: f64) -> Member {
    let mut member = Member::new(
        format!("user{}@example.com", id),
        Credential::new("pw"),
        format!("User {}", id),
        if id % 2 == 0 { "F" } else { "M" },
        20 + (id % 20) as u32,
        lat,
        lon,
    );
    member.attractiveness_score = (id % 100) as f64 / 100.0;
    member
}

fn candidates(count: usize) -> Vec<Member> {
    (0..count)
        .map(|i| {
            let lat_offset = (i as f64 * 0.001) % 0.5;
            let lon_offset = (i as f64 * 0.0007) % 0.5;
            create_candidate(i, 40.7128 + lat_offset, -74.0060 + lon_offset)
        })
        .collect()
}

fn bench_haversine_distance(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            haversine_distance(
                black_box(40.7128),
                black_box(-74.0060),
                black_box(40.72),
                black_box(-74.01),
            )
        });
    });
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 100, 1000].iter() {
        let pool = candidates(*candidate_count);

        for sort_by in [SortBy::Distance, SortBy::Attractiveness] {
            group.bench_with_input(
                BenchmarkId::new(format!("rank_{:?}", sort_by).to_lowercase(), candidate_count),
                candidate_count,
                |b, _| {
                    b.iter(|| {
                        rank_candidates(
                            black_box(40.7128),
                            black_box(-74.0060),
                            black_box(pool.clone()),
                            sort_by,
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_filtering(c: &mut Criterion) {
    let pool = candidates(1000);
    let requester = create_candidate(usize::MAX, 40.7128, -74.0060);
    let swiped: HashSet<_> = pool.iter().step_by(3).map(|m| m.id).collect();
    let filter = DiscoveryFilter::from_params(21, 35, "F", 100);
    let query = build_candidate_query(requester.id, &swiped, &filter);

    c.bench_function("filter_1000_candidates", |b| {
        b.iter(|| {
            let kept: Vec<_> = pool
                .iter()
                .filter(|m| matches_query_constraints(m, black_box(&query)))
                .collect();
            black_box(kept)
        });
    });
}

fn bench_discover(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let store = Arc::new(MemoryStore::new());
    let requester = create_candidate(usize::MAX, 40.7128, -74.0060);

    runtime.block_on(async {
        store.put_member(&requester).await.unwrap();
        for m in candidates(1000) {
            store.put_member(&m).await.unwrap();
        }
    });

    let discovery = Discovery::new(store);
    let filter = DiscoveryFilter::from_params(21, 35, "F", 20);
    let cancel = CancellationToken::new();

    c.bench_function("discover_memory_store_1000", |b| {
        b.iter(|| {
            runtime
                .block_on(discovery.discover(requester.id, black_box(&filter), &cancel))
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    bench_haversine_distance,
    bench_ranking,
    bench_filtering,
    bench_discover
);

criterion_main!(benches);
