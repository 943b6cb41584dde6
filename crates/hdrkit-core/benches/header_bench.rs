//! Benchmarks for the header store and its encodings.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use hdrkit_core::encoding::{blob, Preamble};
use hdrkit_core::{Data, Header};

/// Build a header with `size` entries of mixed types in descending tag order.
fn build_header(size: i32) -> Header {
    let mut header = Header::new();
    for i in (0..size).rev() {
        match i % 4 {
            0 => header.add(i, i).unwrap(),
            1 => header.add(i, "a moderately long string value").unwrap(),
            2 => header.add(i, vec![i64::from(i); 4]).unwrap(),
            _ => header.add(i, Data::Bin(b"\x00\x01\x02\x03\x04\x05\x06\x07")).unwrap(),
        }
    }
    header
}

/// Benchmark appending entries.
fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_add");

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size));
        group.bench_function(format!("add_{size}"), |b| {
            b.iter(|| build_header(black_box(i32::try_from(size).unwrap())));
        });
    }

    group.finish();
}

/// Benchmark lookups on unsorted and sorted headers.
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_lookup");
    group.throughput(Throughput::Elements(1));

    let unsorted = build_header(1000);
    let sorted = unsorted.canonicalize().unwrap();

    group.bench_function("linear_scan", |b| {
        b.iter(|| unsorted.find_entry(black_box(7)));
    });
    group.bench_function("binary_search", |b| {
        b.iter(|| sorted.find_entry(black_box(7)));
    });

    group.finish();
}

/// Benchmark canonicalization.
fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_canonicalize");

    for size in [10, 100, 1000] {
        let header = build_header(size);
        group.throughput(Throughput::Elements(u64::try_from(size).unwrap()));
        group.bench_function(format!("canonicalize_{size}"), |b| {
            b.iter(|| header.canonicalize().unwrap());
        });
    }

    group.finish();
}

/// Benchmark wire and blob encoding round trips.
fn bench_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("header_codecs");
    let header = build_header(1000);
    let wire = header.to_wire_bytes(Preamble::WithMagic).unwrap();
    let packed = blob::pack(&header).unwrap();
    group.throughput(Throughput::Bytes(wire.len() as u64));

    group.bench_function("wire_encode", |b| {
        b.iter(|| header.to_wire_bytes(Preamble::WithMagic).unwrap());
    });
    group.bench_function("wire_decode", |b| {
        b.iter_batched(
            || wire.clone(),
            |bytes| Header::from_wire_bytes(&bytes, Preamble::WithMagic).unwrap(),
            BatchSize::SmallInput,
        );
    });
    group.bench_function("blob_unpack", |b| {
        b.iter(|| blob::unpack(black_box(&packed)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_add, bench_lookup, bench_canonicalize, bench_codecs);

criterion_main!(benches);
