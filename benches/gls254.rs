use criterion::{criterion_group, criterion_main, Criterion};
use gls254::point::{mulgen, scalar_mul, Point};
use gls254::protocol::{sign, verify_vartime, PrivateKey};
use std::hint::black_box;

pub fn bench_mulgen(c: &mut Criterion) {
    let k = [0x11u8; 32];
    c.bench_function("gls254 mulgen", |b| b.iter(|| mulgen(black_box(&k))));
}

pub fn bench_mul(c: &mut Criterion) {
    let g = Point::base();
    let k = [0x22u8; 32];
    c.bench_function("gls254 scalar_mul", |b| {
        b.iter(|| scalar_mul(black_box(&g), black_box(&k)))
    });
}

pub fn bench_sign(c: &mut Criterion) {
    let sk = PrivateKey::keygen(b"benchmark signing seed");
    let data = b"benchmark message payload";
    c.bench_function("gls254 sign", |b| {
        b.iter(|| sign(black_box(&sk), None, black_box(data), b""))
    });
}

pub fn bench_verify(c: &mut Criterion) {
    let sk = PrivateKey::keygen(b"benchmark verify seed");
    let data = b"benchmark message payload";
    let sig = sign(&sk, None, data, b"");
    c.bench_function("gls254 verify_vartime", |b| {
        b.iter(|| verify_vartime(black_box(sk.public()), None, black_box(data), black_box(&sig)))
    });
}

criterion_group!(benches, bench_mulgen, bench_mul, bench_sign, bench_verify);
criterion_main!(benches);
