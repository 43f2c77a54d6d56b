use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dupeblock::config::Config;
use dupeblock::duplicates::{BlockwiseComparator, ContentComparator, Matcher, TrackedFile};
use dupeblock::scanner::{Candidate, Walker};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// Helper to create a test directory with a specific structure
fn setup_test_dir(depth: usize, files_per_dir: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    create_dir_recursive(temp_dir.path().to_path_buf(), depth, files_per_dir);
    temp_dir
}

fn create_dir_recursive(path: PathBuf, depth: usize, files_per_dir: usize) {
    if depth == 0 {
        return;
    }

    if !path.exists() {
        fs::create_dir_all(&path).expect("Failed to create dir");
    }

    for i in 0..files_per_dir {
        let file_path = path.join(format!("file_{}.txt", i));
        fs::write(file_path, format!("content of file number {}", i))
            .expect("Failed to write file");
    }

    if depth > 1 {
        for i in 0..2 {
            // 2 subdirectories per level
            let sub_dir = path.join(format!("dir_{}", i));
            create_dir_recursive(sub_dir, depth - 1, files_per_dir);
        }
    }
}

fn collect_candidates(root: &TempDir) -> Vec<Candidate> {
    let config = Config::default().with_include_dir(root.path().to_path_buf());
    Walker::new(config)
        .walk()
        .collect::<Result<_, _>>()
        .expect("Failed to collect candidates")
}

// 1. Directory Walking Benchmarks
fn bench_walker(c: &mut Criterion) {
    let temp_dir = setup_test_dir(4, 10); // depth 4, 10 files per dir -> roughly 150 files
    let config = Config::default().with_include_dir(temp_dir.path().to_path_buf());

    c.bench_function("walker_150_files", |b| {
        b.iter(|| {
            let walker = Walker::new(config.clone());
            let candidates: Vec<_> = walker.walk().collect();
            black_box(candidates);
        })
    });
}

// 2. Block Comparison Benchmarks
fn bench_comparator(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparator");
    let comparator = BlockwiseComparator::new(4096);

    for size_kb in [1, 64, 1024] {
        let data = vec![b'a'; size_kb * 1024];
        let temp_dir = TempDir::new().unwrap();
        let path_a = temp_dir.path().join("a.dat");
        let path_b = temp_dir.path().join("b.dat");
        fs::write(&path_a, &data).expect("Failed to write bench file");
        fs::write(&path_b, &data).expect("Failed to write bench file");
        let size = data.len() as u64;

        group.bench_with_input(
            format!("identical_{}KB", size_kb),
            &(path_a, path_b),
            |b, (path_a, path_b)| {
                b.iter(|| {
                    // Fresh tracked files so every iteration reads from disk.
                    let mut left = TrackedFile::new(path_a.clone(), size);
                    let mut right = TrackedFile::new(path_b.clone(), size);
                    let equal = comparator.equal(&mut left, &mut right).unwrap();
                    black_box(equal);
                });
            },
        );
    }
    group.finish();
}

// 3. Matcher Benchmarks
fn bench_matcher(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    // 20 clusters of 5 identical files each
    for cluster in 0..20 {
        for copy in 0..5 {
            let path = temp_dir.path().join(format!("c{}_f{}.dat", cluster, copy));
            fs::write(path, format!("cluster {:04} payload", cluster)).unwrap();
        }
    }
    let candidates = collect_candidates(&temp_dir);

    c.bench_function("matcher_100_files_20_groups", |b| {
        b.iter(|| {
            let mut matcher = Matcher::new(1024);
            for candidate in candidates.iter().cloned() {
                matcher.insert(candidate).unwrap();
            }
            black_box(matcher.into_groups());
        })
    });
}

// 4. Full Pipeline Benchmark
fn bench_pipeline(c: &mut Criterion) {
    let temp_dir = setup_test_dir(3, 10); // ~70 files
                                          // Create some duplicates
    let src = temp_dir.path().join("file_0.txt");
    for i in 1..10 {
        let dst = temp_dir.path().join(format!("dup_{}.txt", i));
        fs::copy(&src, &dst).expect("Failed to copy duplicate");
    }

    let config = Config::default().with_include_dir(temp_dir.path().to_path_buf());

    c.bench_function("pipeline_approx_80_files", |b| {
        b.iter(|| {
            let walker = Walker::new(config.clone());
            let mut matcher = Matcher::new(config.block_size);
            for candidate in walker.walk() {
                matcher.insert(candidate.unwrap()).unwrap();
            }
            black_box(matcher.into_groups());
        })
    });
}

criterion_group!(
    benches,
    bench_walker,
    bench_comparator,
    bench_matcher,
    bench_pipeline
);
criterion_main!(benches);
