use chrono::Utc;
use criterion::{criterion_group, criterion_main, Criterion};

use cortex_core::config::StorageConfig;
use cortex_core::memory::{BaseMemory, Confidence, Importance, MemoryType, TypedContent};
use cortex_storage::queries::memory_crud;
use cortex_storage::StorageEngine;

fn make_memory(id: &str) -> BaseMemory {
    BaseMemory {
        id: id.to_string(),
        memory_type: MemoryType::Core,
        content: TypedContent::Core(cortex_core::memory::CoreContent {
            statement: "benchmarking statement".to_string(),
        }),
        summary: "benchmark memory".to_string(),
        transaction_time: Utc::now(),
        valid_time: Utc::now(),
        valid_until: None,
        confidence: Confidence::new(0.9),
        importance: Importance::Medium,
        last_accessed: Utc::now(),
        access_count: 0,
        linked_patterns: vec![],
        linked_constraints: vec![],
        linked_files: vec![],
        linked_functions: vec![],
        tags: vec!["bench".to_string()],
        archived: false,
        superseded_by: None,
        supersedes: None,
        content_hash: "bench_hash".to_string(),
    }
}

fn bench_insert(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        db_path: "bench.db".to_string(),
        ..Default::default()
    };
    let engine = StorageEngine::open(dir.path(), &config).unwrap();
    let mut counter = 0u64;

    c.bench_function("insert_memory", |b| {
        b.iter(|| {
            counter += 1;
            let memory = make_memory(&format!("bench-{counter}"));
            rt.block_on(async {
                engine
                    .writer
                    .with_conn(move |conn| memory_crud::insert_memory(conn, &memory))
                    .await
                    .unwrap();
            });
        });
    });
}

fn bench_get(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        db_path: "bench_get.db".to_string(),
        ..Default::default()
    };
    let engine = StorageEngine::open(dir.path(), &config).unwrap();

    rt.block_on(async {
        for i in 0..100 {
            let memory = make_memory(&format!("get-{i}"));
            engine
                .writer
                .with_conn(move |conn| memory_crud::insert_memory(conn, &memory))
                .await
                .unwrap();
        }
    });

    c.bench_function("get_memory", |b| {
        let mut idx = 0;
        b.iter(|| {
            let id = format!("get-{}", idx % 100);
            engine
                .readers
                .with_conn(|conn| memory_crud::get_memory(conn, &id))
                .unwrap();
            idx += 1;
        });
    });
}

fn bench_bulk_insert(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("bulk_insert_100", |b| {
        b.iter(|| {
            let dir = tempfile::tempdir().unwrap();
            let config = StorageConfig {
                db_path: "bench_bulk.db".to_string(),
                ..Default::default()
            };
            let engine = StorageEngine::open(dir.path(), &config).unwrap();
            let memories: Vec<BaseMemory> =
                (0..100).map(|i| make_memory(&format!("bulk-{i}"))).collect();
            rt.block_on(async {
                engine
                    .writer
                    .with_conn(move |conn| memory_crud::bulk_insert(conn, &memories))
                    .await
                    .unwrap();
            });
        });
    });
}

criterion_group!(benches, bench_insert, bench_get, bench_bulk_insert);
criterion_main!(benches);
