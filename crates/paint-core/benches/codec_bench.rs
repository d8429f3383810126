//! Criterion benchmarks for the Multiplayer Paint datagram codec.
//!
//! A held mouse button sends one Draw per frame, and a relay replay can deliver
//! thousands of inbound Draws in one tick, so those two paths matter most.
//!
//! Run with:
//! ```bash
//! cargo bench --package paint-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use paint_core::protocol::{
    decode_inbound, encode_inbound, encode_outbound, Command, OutboundCommand, Point,
};
use paint_core::Session;

fn inbound_fixtures() -> Vec<(&'static str, Command)> {
    vec![
        ("Connect", Command::Connect { user: "alice".to_string() }),
        (
            "Draw",
            Command::Draw { user: "alice".to_string(), point: Point::new(320, 240, 2) },
        ),
        (
            "Erase",
            Command::Erase { user: "alice".to_string(), point: Point::new(320, 240, 2) },
        ),
        (
            "Message",
            Command::Message {
                user: "alice".to_string(),
                text: "the quick brown fox jumps over the lazy dog".to_string(),
            },
        ),
    ]
}

fn bench_encode_outbound(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_outbound");
    let draw = OutboundCommand::Draw(Point::new(320, 240, 2));
    group.bench_function("Draw", |b| b.iter(|| encode_outbound(black_box(&draw))));
    let erase = OutboundCommand::Erase { x: 320, y: 240 };
    group.bench_function("Erase", |b| b.iter(|| encode_outbound(black_box(&erase))));
    group.finish();
}

fn bench_decode_inbound(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_inbound");
    for (name, cmd) in inbound_fixtures() {
        let bytes = encode_inbound(&cmd);
        group.bench_with_input(BenchmarkId::new("cmd", name), &bytes, |b, bytes| {
            b.iter(|| decode_inbound(black_box(bytes)).expect("decode must succeed"))
        });
    }
    group.finish();
}

/// Decodes and applies a 1000-point replay burst, as after a Reset.
fn bench_replay_burst(c: &mut Criterion) {
    let datagrams: Vec<Vec<u8>> = (0..1000u16)
        .map(|i| {
            encode_inbound(&Command::Draw {
                user: "relay".to_string(),
                point: Point::new(i % 640, i % 480, i % 8),
            })
        })
        .collect();

    c.bench_function("replay_burst_1000", |b| {
        b.iter(|| {
            let mut session = Session::default();
            for bytes in &datagrams {
                if let Ok(cmd) = decode_inbound(black_box(bytes)) {
                    session.apply(&cmd);
                }
            }
            session.points().len()
        })
    });
}

criterion_group!(benches, bench_encode_outbound, bench_decode_inbound, bench_replay_burst);
criterion_main!(benches);
