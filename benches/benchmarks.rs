use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use rcs::cshake::CShake256;
use rcs::kmac::kmac256;
use rcs::rcs::{RcsState, RcsVariant};
use rcs::sha3::{sha3_256, sha3_512, shake256};

const INPUT: usize = 100 * 1024;

fn permutation_benchmarks(c: &mut Criterion) {
    let mut g = c.benchmark_group("permutation");
    g.throughput(Throughput::Bytes(200));

    g.bench_function("Keccak-f1600-unrolled", |b| {
        let mut lanes = [0u64; 25];
        b.iter(|| rcs::keccak::unrolled::permute::<24>(&mut lanes))
    });
    g.bench_function("Keccak-f1600-compact", |b| {
        let mut lanes = [0u64; 25];
        b.iter(|| rcs::keccak::compact::permute::<24>(&mut lanes))
    });
    g.finish();
}

fn hash_benchmarks(c: &mut Criterion) {
    let mut g = c.benchmark_group("hash");
    g.throughput(Throughput::Bytes(INPUT as u64));

    g.bench_with_input("SHA3-256", &[0u8; INPUT], |b, block| {
        let mut out = [0u8; 32];
        b.iter(|| sha3_256(&mut out, block))
    });
    g.bench_with_input("SHA3-512", &[0u8; INPUT], |b, block| {
        let mut out = [0u8; 64];
        b.iter(|| sha3_512(&mut out, block))
    });
    g.bench_with_input("SHAKE-256", &[0u8; INPUT], |b, block| {
        let mut out = [0u8; 32];
        b.iter(|| shake256(&mut out, block))
    });
    g.bench_with_input("cSHAKE-256", &[0u8; INPUT], |b, block| {
        let mut out = [0u8; 32];
        b.iter(|| {
            let mut c = CShake256::new(b"bench", b"");
            c.absorb(block);
            c.squeeze(&mut out);
        })
    });
    g.bench_with_input("KMAC-256", &[0u8; INPUT], |b, block| {
        let key = [0x2Au8; 32];
        let mut out = [0u8; 32];
        b.iter(|| kmac256(&mut out, &key, block, b""))
    });
    g.finish();
}

fn aead_benchmarks(c: &mut Criterion) {
    let mut g = c.benchmark_group("aead");
    g.throughput(Throughput::Bytes(INPUT as u64));

    g.bench_with_input("RCS-256 seal", &vec![0u8; INPUT], |b, block| {
        let key = [0x2Au8; 32];
        let nonce = [0u8; 32];
        let mut out = vec![0u8; block.len() + RcsVariant::Rcs256.mac_len()];
        b.iter(|| {
            let mut state = RcsState::initialize(RcsVariant::Rcs256, &key, nonce, b"", true);
            state.transform(&mut out, block)
        })
    });
    g.bench_with_input("RCS-512 seal", &vec![0u8; INPUT], |b, block| {
        let key = [0x2Au8; 64];
        let nonce = [0u8; 32];
        let mut out = vec![0u8; block.len() + RcsVariant::Rcs512.mac_len()];
        b.iter(|| {
            let mut state = RcsState::initialize(RcsVariant::Rcs512, &key, nonce, b"", true);
            state.transform(&mut out, block)
        })
    });
    g.finish();
}

criterion_group!(benches, permutation_benchmarks, hash_benchmarks, aead_benchmarks);
criterion_main!(benches);
