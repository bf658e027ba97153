use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pipe_tests::{DWORD_BOUNDARIES, packed_dwords, record_stream};
use pipe_wire::Pipe;

fn bench_fixed_width(c: &mut Criterion) {
    let payload: Vec<u8> = (0..4096u32).flat_map(u32::to_le_bytes).collect();

    c.bench_function("read_dword_4k", |b| {
        b.iter(|| {
            let mut pipe = Pipe::new(payload.clone());
            let mut sum = 0u64;
            while !pipe.is_at_end() {
                sum += u64::from(pipe.read_dword().unwrap());
            }
            sum
        });
    });
}

fn bench_packed_dword(c: &mut Criterion) {
    let mut group = c.benchmark_group("packed_dword");

    for &value in &[0x7Fu32, 0x3FFF, 0x1FFF_FFFF, u32::MAX] {
        let payload = packed_dwords(&vec![value; 1024]);
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("decode", format!("{value:#X}")),
            &payload,
            |b, p| {
                b.iter(|| {
                    let mut pipe = Pipe::new(p.clone());
                    while !pipe.is_at_end() {
                        pipe.read_packed_be_dword().unwrap();
                    }
                });
            },
        );
    }

    let mixed = packed_dwords(&DWORD_BOUNDARIES.repeat(100));
    group.bench_function("mixed_boundaries", |b| {
        b.iter(|| {
            let mut pipe = Pipe::new(mixed.clone());
            while !pipe.is_at_end() {
                pipe.read_packed_be_dword().unwrap();
            }
        });
    });

    group.finish();
}

fn bench_record_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_stream");

    for count in [100u32, 1_000, 10_000] {
        let payload = record_stream(count);
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("decode", count), &payload, |b, p| {
            b.iter(|| {
                let mut pipe = Pipe::new(p.clone());
                while !pipe.is_at_end() {
                    pipe.read_byte().unwrap();
                    pipe.read_packed_be_dword().unwrap();
                    let len = pipe.read_word().unwrap();
                    pipe.read_block(usize::from(len)).unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fixed_width,
    bench_packed_dword,
    bench_record_stream
);
criterion_main!(benches);
