use cryptal_ecc::curves;
use cryptal_ecc::keys::PrivateKey;
use cryptal_ecc::mac::HmacSha256;
use cryptal_ecc::signatures::{sign, sign_deterministic, verify_prehashed};

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const HASH: [u8; 32] = [0x5A; 32];

pub fn bench_ecdsa(c: &mut Criterion) {
    let curve = curves::secp256k1();
    let private = PrivateKey::from_seed::<HmacSha256>(curve, b"bench", b"", 0);
    let public = private.public_key();
    let signature = sign(&private, &HASH).unwrap();

    c.bench_function("ecdsa sign secp256k1", |b| {
        b.iter(|| sign(&private, black_box(&HASH)).unwrap())
    });

    c.bench_function("ecdsa sign_deterministic secp256k1", |b| {
        b.iter(|| sign_deterministic::<HmacSha256>(&private, black_box(&HASH)).unwrap())
    });

    c.bench_function("ecdsa verify secp256k1", |b| {
        b.iter(|| verify_prehashed(&public, black_box(&HASH), black_box(&signature)))
    });
}

pub fn bench_keygen(c: &mut Criterion) {
    let curve = curves::secp256k1();

    c.bench_function("keygen secp256k1", |b| {
        b.iter(|| PrivateKey::generate(curve).unwrap().public_key())
    });
}

criterion_group!(benches, bench_ecdsa, bench_keygen);
criterion_main!(benches);
