//! Benchmarks for movegen, encoding, and the PUCT search loop.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use zero_chess::encode::{self, EncoderVersion};
use zero_chess::eval::cache::CachedEvaluator;
use zero_chess::eval::StubEvaluator;
use zero_chess::position::{fen, movegen, Position};
use zero_chess::search::{select_move, SearchBudget, SearchConfig};
use zero_chess::sync::StopFlag;

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| movegen::perft(black_box(&mut Position::startpos()), depth))
        });
    }

    for depth in 1..=2 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| {
                let mut pos = fen::parse("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
                movegen::perft(black_box(&mut pos), depth)
            })
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");

    let startpos = Position::startpos();
    group.bench_function("startpos", |b| {
        b.iter(|| black_box(movegen::generate_legal_moves(&startpos)))
    });

    let middlegame = fen::parse("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4").unwrap();
    group.bench_function("middlegame", |b| {
        b.iter(|| black_box(movegen::generate_legal_moves(&middlegame)))
    });

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let startpos = Position::startpos();
    group.bench_function("startpos_v1", |b| {
        b.iter(|| black_box(encode::encode(&startpos, EncoderVersion::V1)))
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for rounds in [50, 200] {
        group.bench_with_input(BenchmarkId::new("startpos", rounds), &rounds, |b, &rounds| {
            b.iter(|| {
                let pos = Position::startpos();
                let mut cache = CachedEvaluator::new(StubEvaluator::new(0.0), EncoderVersion::V1, 4096);
                let mut config = SearchConfig::default();
                config.num_rounds = rounds;
                let stop = StopFlag::new();
                select_move(&pos, &mut cache, &config, &stop, SearchBudget::default())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_encode, bench_search);
criterion_main!(benches);
