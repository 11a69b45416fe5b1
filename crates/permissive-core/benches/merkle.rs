//! Permission commitment benchmarks
//!
//! Leaf hashing and proof verification run on every operator request; tree
//! construction runs once per administrative mutation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use permissive_core::{verify, Address, Permission, PermissionTree, Selector};

fn permission_set(size: usize) -> Vec<Permission> {
    (0..size)
        .map(|i| {
            let mut target = [0u8; 20];
            target[..8].copy_from_slice(&(i as u64).to_be_bytes());
            Permission {
                operator: Address::new([0x42; 20]),
                target: Address::new(target),
                selector: Selector::from_signature("transfer(address,uint256)"),
                paymaster: Address::ZERO,
                expires_at_time: 1_709_933_133,
                expires_at_height: 0,
            }
        })
        .collect()
}

fn bench_leaf(c: &mut Criterion) {
    let permission = permission_set(1)[0];
    c.bench_function("permission_leaf", |b| b.iter(|| black_box(permission).leaf()));
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("proof_verify");
    for size in [1usize, 16, 1024] {
        let permissions = permission_set(size);
        let tree = PermissionTree::from_permissions(&permissions);
        let leaf = permissions[size / 2].leaf();
        let Some(proof) = tree.proof(&leaf) else {
            continue;
        };
        let root = tree.root();
        group.bench_with_input(BenchmarkId::from_parameter(size), &proof, |b, proof| {
            b.iter(|| verify(black_box(&root), black_box(&leaf), proof));
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let permissions = permission_set(1024);
    c.bench_function("tree_build_1024", |b| {
        b.iter(|| PermissionTree::from_permissions(black_box(&permissions)).root());
    });
}

criterion_group!(benches, bench_leaf, bench_verify, bench_build);
criterion_main!(benches);
