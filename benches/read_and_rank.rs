use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use table_ingest::{ReadOptions, SortDirection, read_table};
use tempfile::TempDir;

fn generate_shipments(rows: usize) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("temp dir");
    let csv_path = temp_dir.path().join("shipments.csv");
    let mut file = File::create(&csv_path).expect("create csv");
    writeln!(file, "id,carrier,distance.km,mass.kg,express").expect("header");
    for i in 0..rows {
        let carrier = match i % 3 {
            0 => "rail",
            1 => "road",
            _ => "sea",
        };
        let distance = (i * 37) % 1_000;
        let mass = ((i * 7919) % 10_000) as f64 / 10.0 + 0.5;
        let express = i % 2 == 0;
        writeln!(file, "{i},{carrier},{distance},{mass:.2},{express}").expect("row");
    }
    (temp_dir, csv_path)
}

fn bench_read_and_rank(c: &mut Criterion) {
    let (temp_dir, csv_path) = generate_shipments(50_000);
    let options = ReadOptions::default();
    let table = read_table(&csv_path, &options).expect("read shipments");

    let mut group = c.benchmark_group("read_and_rank");

    group.bench_function("read_csv", |b| {
        b.iter_batched(
            || (),
            |_| {
                read_table(&csv_path, &options).expect("read shipments");
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("rank_by_mass", |b| {
        b.iter(|| {
            table
                .rank_by("mass", SortDirection::Descending)
                .expect("rank by mass")
        });
    });

    drop(temp_dir);
    group.finish();
}

criterion_group!(benches, bench_read_and_rank);
criterion_main!(benches);
