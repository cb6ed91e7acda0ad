use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ledgerops_core::{Address, Hash};

fn bench_identifiers(c: &mut Criterion) {
    let addr = Address::from_bytes([0x5a; 20]);
    let text = addr.to_checksum_hex();
    let hash = Hash::from_bytes([0xc3; 32]);

    c.bench_function("address_checksum_hex", |b| {
        b.iter(|| black_box(addr).to_checksum_hex())
    });
    c.bench_function("address_parse", |b| {
        b.iter(|| black_box(text.as_str()).parse::<Address>())
    });
    c.bench_function("hash_to_hex", |b| b.iter(|| black_box(hash).to_hex()));
    c.bench_function("hash_from_slice_cropped", |b| {
        let long = [0x77u8; 48];
        b.iter(|| Hash::from_slice(black_box(&long)))
    });
}

criterion_group!(benches, bench_identifiers);
criterion_main!(benches);
