use std::f64::consts::PI;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geosaccade::{
    circular_mean_and_std, detect_angvel, extract_kinematics, smooth1d, track_spans, AngvelConfig,
    Sample, SaccadeDetector, SaccadeParams, SmoothingConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn params() -> SaccadeParams {
    let dt = 1.0 / 60.0;
    SaccadeParams {
        delta_t_inner_sec: 4.0 * dt,
        delta_t_outer_sec: 10.0 * dt,
        min_amplitude_deg: 25.0,
        max_orientation_dispersion_deg: 15.0,
        min_linear_velocity: 0.1,
        max_linear_acceleration: 20.0,
        max_angular_velocity: 8000.0,
        minimum_interval_sec: 10.0 * dt,
    }
}

/// Straight flight segments joined by sharp turns every ~1 s, with position
/// jitter.
fn make_flight(n: usize, seed: u64) -> Vec<Sample> {
    let dt = 1.0 / 60.0;
    let speed = 0.3;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut heading = 0.0f64;
    let (mut x, mut y) = (0.0f64, 0.0f64);
    let mut samples = Vec::with_capacity(n);
    for k in 0..n {
        if k > 0 && k % 60 == 0 {
            heading += rng.gen_range(0.6..1.8) * if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        }
        let (vx, vy) = (speed * heading.cos(), speed * heading.sin());
        samples.push(Sample {
            obj_id: 1,
            frame: k as u64,
            timestamp: k as f64 * dt,
            x: x + rng.gen_range(-1e-4..1e-4),
            y: y + rng.gen_range(-1e-4..1e-4),
            z: 0.0,
            xvel: vx,
            yvel: vy,
            zvel: 0.0,
        });
        x += vx * dt;
        y += vy * dt;
    }
    samples
}

fn bench_detect(c: &mut Criterion) {
    let flight_10k = make_flight(10_000, 7);
    let flight_60k = make_flight(60_000, 9);
    let detector = SaccadeDetector::new(params());

    c.bench_function("detect_10k_samples", |b| {
        b.iter(|| {
            let res = detector.detect(black_box(&flight_10k));
            black_box(res.map(|r| r.saccades.len()).unwrap_or(0))
        })
    });

    c.bench_function("detect_60k_samples", |b| {
        b.iter(|| {
            let res = detector.detect(black_box(&flight_60k));
            black_box(res.map(|r| r.saccades.len()).unwrap_or(0))
        })
    });
}

fn bench_kinematics(c: &mut Criterion) {
    let flight = make_flight(10_000, 11);
    let spans = track_spans(&flight);
    let cfg = SmoothingConfig::default();

    c.bench_function("kinematics_10k_samples", |b| {
        b.iter(|| {
            let kin = extract_kinematics(black_box(&flight), black_box(&spans), black_box(&cfg));
            black_box(kin.len())
        })
    });

    let signal: Vec<f64> = flight.iter().map(|s| s.xvel).collect();
    c.bench_function("smooth1d_10k_w5", |b| {
        b.iter(|| black_box(smooth1d(black_box(&signal), 5)))
    });
}

fn bench_circular_stats(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(12345);
    let angles: Vec<f64> = (0..7).map(|_| rng.gen_range(-PI..PI)).collect();

    c.bench_function("circular_mean_and_std_7", |b| {
        b.iter(|| black_box(circular_mean_and_std(black_box(&angles))))
    });
}

fn bench_angvel(c: &mut Criterion) {
    let flight = make_flight(10_000, 13);
    let cfg = AngvelConfig::default();

    c.bench_function("angvel_10k_samples", |b| {
        b.iter(|| {
            let res = detect_angvel(black_box(&flight), black_box(&cfg));
            black_box(res.map(|r| r.saccades.len()).unwrap_or(0))
        })
    });
}

criterion_group!(
    hotpaths,
    bench_detect,
    bench_kinematics,
    bench_circular_stats,
    bench_angvel
);
criterion_main!(hotpaths);
