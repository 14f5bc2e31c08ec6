use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;

use convstudy::reader;

/// Write a synthetic diagnostic with the given record count
fn generate_diagnostic(dir: &TempDir, records: usize) -> std::path::PathBuf {
    let path = dir.path().join(format!("bench_{records}.dat"));
    let mut file = File::create(&path).unwrap();
    for i in 0..records {
        let t = i as f64 * 3.6e3;
        let r = 1.0e11 + i as f64 * 1.0e8;
        file.write_all(&t.to_ne_bytes()).unwrap();
        file.write_all(&r.to_ne_bytes()).unwrap();
        file.write_all(&0.0f64.to_ne_bytes()).unwrap();
    }
    path
}

fn bench_read(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();

    let mut group = c.benchmark_group("reader_decode");
    for records in [1_000usize, 100_000, 1_000_000] {
        let path = generate_diagnostic(&dir, records);
        let bytes = (records * reader::RECORD_STRIDE) as u64;
        group.throughput(Throughput::Bytes(bytes));
        group.bench_function(format!("{records}_records"), |b| {
            b.iter(|| reader::read(&path).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_read);
criterion_main!(benches);
