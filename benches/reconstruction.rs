use aerovis::streamline::{
    read_samples, ReconstructOptions, Sample, SeedIdentity, StreamlineReconstructor, TableSchema,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Samples in ParaView export order: seed, forward run, seed, backward run
fn create_export(num_seeds: usize, steps_per_run: usize) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(num_seeds * (2 * steps_per_run + 2));
    for s in 0..num_seeds {
        let seed = [0.5, -0.25 + s as f64 * 1e-3, 0.1];
        samples.push(Sample::new(seed, 0.5, 0.0));
        for j in 1..=steps_per_run {
            let t = j as f64 * 1e-4;
            samples.push(Sample::new([seed[0] + t, seed[1], seed[2]], 0.5 + t, t));
        }
        samples.push(Sample::new(seed, 0.5, 0.0));
        for j in 1..=steps_per_run {
            let t = -(j as f64) * 1e-4;
            samples.push(Sample::new([seed[0] + t, seed[1], seed[2]], 0.5 + t, t));
        }
    }
    samples
}

fn create_csv(samples: &[Sample]) -> String {
    let mut csv = String::from("\"IntegrationTime\",\"Mach\",\"Points:0\",\"Points:1\",\"Points:2\"\n");
    for s in samples {
        let [x, y, z] = s.position;
        csv.push_str(&format!("{},{},{},{},{}\n", s.integration_time, s.value, x, y, z));
    }
    csv
}

/// Benchmark stitching forward and backward runs
fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");

    for num_seeds in [100, 1000, 4000] {
        let samples = create_export(num_seeds, 200);
        group.throughput(Throughput::Elements(samples.len() as u64));

        for (label, identity) in [("exact", SeedIdentity::Exact), ("quantized", SeedIdentity::Quantized(6))] {
            let reconstructor =
                StreamlineReconstructor::with_options(ReconstructOptions::default().seed_identity(identity));
            group.bench_with_input(
                BenchmarkId::new(label, format!("{}seeds", num_seeds)),
                &samples,
                |b, samples| {
                    b.iter(|| {
                        let collection = reconstructor.reconstruct(black_box(samples.clone())).unwrap();
                        black_box(collection);
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the full CSV to JSON path in memory
fn bench_table_to_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_to_json");
    let schema = TableSchema::default();

    for num_seeds in [100, 1000] {
        let csv = create_csv(&create_export(num_seeds, 200));
        group.throughput(Throughput::Bytes(csv.len() as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}seeds", num_seeds)),
            &csv,
            |b, csv| {
                let reconstructor = StreamlineReconstructor::new();
                b.iter(|| {
                    let samples = read_samples(black_box(csv.as_bytes()), &schema).unwrap();
                    let collection = reconstructor.reconstruct(samples).unwrap();
                    let mut out = Vec::new();
                    collection.write_json(&mut out).unwrap();
                    black_box(out);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_reconstruct, bench_table_to_json);
criterion_main!(benches);
