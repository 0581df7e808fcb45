//! Spin lifecycle benchmarks on virtual time.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use roulette_core::{
    Face, Recorder, RouletteConfig, RouletteSession, Scheduler, TimerKind, TimerQueue,
};

fn bench_full_spin(c: &mut Criterion) {
    let config = RouletteConfig::from_toml_str("seed = 7").expect("valid config");
    let recorder = Recorder::new();
    let mut session = RouletteSession::from_config(&config, recorder.sinks(), recorder.clone());

    c.bench_function("full_spin_virtual_time", |b| {
        b.iter(|| {
            let result = session.spin_to_completion();
            // Keep the log from growing without bound.
            let _ = recorder.take();
            black_box(result)
        });
    });
}

fn bench_history_push(c: &mut Criterion) {
    let mut history = roulette_core::History::default();
    let mut i = 0usize;
    c.bench_function("history_push_and_streak", |b| {
        b.iter(|| {
            i = i.wrapping_add(1);
            history.push(Face::ALL[i % Face::COUNT]);
            black_box(history.streak(3))
        });
    });
}

fn bench_timer_queue(c: &mut Criterion) {
    c.bench_function("timer_queue_preview_burst", |b| {
        b.iter(|| {
            let mut queue = TimerQueue::new();
            let tick = queue.schedule_repeating(Duration::from_millis(80), TimerKind::PreviewTick);
            queue.schedule_once(Duration::from_millis(2500), TimerKind::Complete);
            let mut fired = 0u32;
            while let Some(timer) = queue.pop_due(Duration::from_millis(2500)) {
                if timer.kind == TimerKind::Complete {
                    queue.cancel(tick);
                }
                fired += 1;
            }
            black_box(fired)
        });
    });
}

criterion_group!(benches, bench_full_spin, bench_history_push, bench_timer_queue);
criterion_main!(benches);
