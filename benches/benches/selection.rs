// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use std::sync::Arc;
use understory_collection::{Collection, ItemSpec};
use understory_selection::{SelectionConfig, SelectionManager, SelectionMode};

fn numbers(len: u32) -> Arc<Collection<u32, ()>> {
    let items = (0..len).map(|i| ItemSpec::item(i, format!("item {i}"), ()));
    Arc::new(Collection::from_items(items).unwrap())
}

fn manager(collection: &Arc<Collection<u32, ()>>) -> SelectionManager<u32, ()> {
    SelectionManager::new(
        Arc::clone(collection),
        SelectionConfig::new(SelectionMode::Multiple),
    )
}

fn bench_extend(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/extend");

    // Shift+click to the end, then back to the middle: withdraws the old range
    // before adding the new one.
    for len in [128u32, 1_024, 8_192] {
        let collection = numbers(len);
        group.throughput(Throughput::Elements(u64::from(len)));
        group.bench_with_input(
            BenchmarkId::new("to_end_and_back", len),
            &collection,
            |b, collection| {
                b.iter_batched(
                    || {
                        let mut m = manager(collection);
                        m.replace_selection(0);
                        m
                    },
                    |mut m| {
                        m.extend_selection(len - 1);
                        m.extend_selection(len / 2);
                        black_box(m);
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_select_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/select_all");

    for len in [128u32, 1_024, 8_192] {
        let collection = numbers(len);
        group.throughput(Throughput::Elements(u64::from(len)));
        group.bench_with_input(
            BenchmarkId::new("resolve", len),
            &collection,
            |b, collection| {
                let mut m = manager(collection);
                m.select_all();
                b.iter(|| black_box(m.selected_keys().len()));
            },
        );
    }

    group.finish();
}

fn bench_toggle_after_select_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/toggle");

    // Deselecting one key expands `All` into a concrete set.
    for len in [1_024u32, 8_192, 65_536] {
        let collection = numbers(len);
        group.throughput(Throughput::Elements(u64::from(len)));
        group.bench_with_input(
            BenchmarkId::new("out_of_all", len),
            &collection,
            |b, collection| {
                b.iter_batched(
                    || {
                        let mut m = manager(collection);
                        m.select_all();
                        m
                    },
                    |mut m| {
                        m.toggle_selection(len / 2);
                        black_box(m);
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_collection_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/set_collection");

    // Half the selected keys disappear in the new collection.
    for len in [128u32, 1_024, 8_192] {
        let before = numbers(len);
        let after = Arc::new(before.filter(|node| node.key() % 2 == 0));
        group.throughput(Throughput::Elements(u64::from(len)));
        group.bench_with_input(
            BenchmarkId::new("prune_half", len),
            &(before, after),
            |b, (before, after)| {
                b.iter_batched(
                    || {
                        let mut m = manager(before);
                        m.set_selected_keys(0..len);
                        m
                    },
                    |mut m| {
                        m.set_collection(Arc::clone(after));
                        black_box(m);
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_extend,
    bench_select_all,
    bench_toggle_after_select_all,
    bench_collection_swap
);
criterion_main!(benches);
