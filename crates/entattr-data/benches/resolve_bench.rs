use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use entattr_core::{
    AttributeType, CapabilitySet, KeyValueDescriptor, OffsetDescriptor, PropertyDescriptor,
};
use entattr_data::{AttributeEngine, CatalogRegistry, CatalogSet};
use entattr_infra::SimulatedEngine;

fn bench_resolution(c: &mut Criterion) {
    let set = CatalogSet::new()
        .with_property(
            "entity",
            "health",
            PropertyDescriptor::new("m_iHealth", AttributeType::Int),
        )
        .with_keyvalue(
            "entity",
            "targetname",
            KeyValueDescriptor {
                ty: AttributeType::StringPointer,
            },
        )
        .with_offset(
            "player",
            "armor",
            OffsetDescriptor {
                offset: 0x1F4,
                ty: AttributeType::Int,
            },
        );
    let registry = CatalogRegistry::with_catalogs(set);

    let mut backend = SimulatedEngine::new(4);
    backend
        .spawn(1, "player")
        .declare_property("m_iHealth", 100)
        .declare_keyvalue("targetname", "hero");
    let mut engine = AttributeEngine::new(&mut backend, &registry);
    let mut player = match engine.resolve(1u32, CapabilitySet::new(["player"])) {
        Ok(handle) => handle,
        Err(e) => panic!("bench setup failed: {e}"),
    };

    let mut group = c.benchmark_group("Attribute Resolution");

    group.bench_function("Property get", |b| {
        b.iter(|| black_box(engine.get(&player, "health")));
    });

    group.bench_function("Offset get (last layer)", |b| {
        b.iter(|| black_box(engine.get(&player, "armor")));
    });

    group.bench_function("Miss", |b| {
        b.iter(|| black_box(engine.get(&player, "missing")));
    });

    group.bench_function("Property set", |b| {
        b.iter(|| black_box(engine.set(&mut player, "health", 75)));
    });

    group.finish();
}

criterion_group!(benches, bench_resolution);
criterion_main!(benches);
