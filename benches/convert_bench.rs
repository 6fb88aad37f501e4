//! Benchmarks for the pure conversion paths.
//!
//! The raw ADC read is a hardware (or simulated) query, so the benchmarks
//! cover the arithmetic around it: channel conversion and the fan curve.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use placa::adc::{convert, BoardChannel};
use placa::thermal::{FanCurve, FanStep};

fn bench_convert_current(c: &mut Criterion) {
    c.bench_function("convert_current_channel", |b| {
        b.iter(|| black_box(convert(BoardChannel::Current0, black_box(0x0400))));
    });
}

fn bench_convert_voltage(c: &mut Criterion) {
    c.bench_function("convert_voltage_channel", |b| {
        b.iter(|| black_box(convert(BoardChannel::Voltage0, black_box(0x0400))));
    });
}

fn bench_convert_all_channels(c: &mut Criterion) {
    c.bench_function("convert_all_channels", |b| {
        b.iter(|| {
            for channel in BoardChannel::ALL {
                black_box(convert(channel, black_box(0x0123)));
            }
        });
    });
}

fn bench_fan_curve_default(c: &mut Criterion) {
    let curve = FanCurve::default();

    c.bench_function("fan_curve_duty_for", |b| {
        b.iter(|| black_box(curve.duty_for(black_box(67.5))));
    });
}

fn bench_fan_curve_many_steps(c: &mut Criterion) {
    let steps = (0u8..16)
        .map(|i| FanStep {
            min_temp_celsius: f32::from(i) * 5.0,
            duty_percent: (i * 6).min(100),
        })
        .collect();
    let curve = FanCurve::new(steps);

    c.bench_function("fan_curve_duty_for_16_steps", |b| {
        b.iter(|| black_box(curve.duty_for(black_box(42.0))));
    });
}

fn bench_measurement_display(c: &mut Criterion) {
    let measurement = convert(BoardChannel::Voltage1, 0x0400);

    c.bench_function("measurement_display", |b| {
        b.iter(|| black_box(measurement.to_string()));
    });
}

criterion_group!(
    benches,
    bench_convert_current,
    bench_convert_voltage,
    bench_convert_all_channels,
    bench_fan_curve_default,
    bench_fan_curve_many_steps,
    bench_measurement_display
);
criterion_main!(benches);
