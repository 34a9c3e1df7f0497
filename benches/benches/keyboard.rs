// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_collection::{Collection, ItemSpec};
use understory_keyboard::{
    KeyboardConfig, KeyboardDelegate, ListKeyboardDelegate, TypeSelect, TypeSelectOutcome,
};

fn words(len: u32) -> Collection<u32, ()> {
    // Every item shares a long prefix so the collator walks several chars.
    let items = (0..len).map(|i| ItemSpec::item(i, format!("entry {i:06}"), ()));
    Collection::from_items(items).unwrap()
}

fn bench_key_for_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyboard/key_for_search");

    // Worst case: the only match sits just before the starting key, so the
    // search wraps around the whole collection.
    for len in [128u32, 1_024, 8_192] {
        let collection = words(len);
        let delegate = ListKeyboardDelegate::new(&collection, KeyboardConfig::default());
        let target = format!("entry {:06}", len - 2);
        let from = len - 1;
        group.bench_with_input(BenchmarkId::new("wrap", len), &target, |b, target| {
            b.iter(|| black_box(delegate.key_for_search(target, Some(&from))));
        });
    }

    group.finish();
}

fn bench_typeahead(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyboard/typeahead");

    for len in [128u32, 1_024, 8_192] {
        let collection = words(len);
        let delegate = ListKeyboardDelegate::new(&collection, KeyboardConfig::default());
        let typed: Vec<char> = format!("entry {:06}", len / 2).chars().collect();
        group.bench_with_input(BenchmarkId::new("type_word", len), &typed, |b, typed| {
            b.iter(|| {
                let mut select = TypeSelect::new();
                let mut focused = None;
                for (i, &ch) in typed.iter().enumerate() {
                    if let TypeSelectOutcome::Focus(key) =
                        select.input(ch, focused.as_ref(), &delegate, i as u64)
                    {
                        focused = Some(key);
                    }
                }
                black_box(focused)
            });
        });
    }

    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyboard/navigation");

    for len in [128u32, 1_024, 8_192] {
        let collection = words(len);
        let delegate = ListKeyboardDelegate::new(&collection, KeyboardConfig::default());
        group.bench_with_input(BenchmarkId::new("walk_down", len), &len, |b, _| {
            b.iter(|| {
                let mut key = delegate.first_key();
                let mut steps = 0_u32;
                while let Some(k) = key {
                    key = delegate.key_below(&k);
                    steps += 1;
                }
                black_box(steps)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_key_for_search,
    bench_typeahead,
    bench_navigation
);
criterion_main!(benches);
