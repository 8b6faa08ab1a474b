use etherloop::{
    AnimationClock, AnimationState, Config, ConstantNoise, ContourGenerator, FbmNoise,
    OutlineRing, OutlineSampler, Point, PointerField, PointerSample, Vec2,
};

fn diamond() -> OutlineRing {
    OutlineRing::from_points(vec![
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
        Point::new(-10.0, 0.0),
        Point::new(0.0, -10.0),
    ])
}

fn blob(samples: usize) -> OutlineRing {
    OutlineSampler::new(samples)
        .sample_path_data("M150,0 C150,80 60,120 0,110 C-90,100 -140,60 -130,0 C-120,-70 -60,-120 0,-115 C70,-110 150,-80 150,0 Z")
        .unwrap()
}

fn state_at(elapsed: f64) -> AnimationState {
    AnimationState {
        elapsed,
        wave_phase: elapsed * 3.0,
        noise_time: elapsed * 0.25,
        ..AnimationState::initial(212.0)
    }
}

#[test]
fn every_band_closes_for_awkward_wave_frequencies() {
    let ring = blob(97);
    for freq in [6.0, 2.5, 0.1234, 13.7] {
        let cfg = Config {
            num_bands: 7,
            wave_freq_angle: freq,
            ..Config::default()
        };
        let generator = ContourGenerator::new(&cfg, FbmNoise::new(3));
        let pointer = PointerSample {
            position: Point::new(40.0, 10.0),
            scale_to_screen: 1.3,
        };
        for band in generator.generate_frame(&ring, &state_at(0.7), Some(&pointer)) {
            assert_eq!(band.points.len(), 98);
            assert_eq!(band.points.first(), band.points.last());
        }
    }
}

#[test]
fn example_scenario_leaves_the_ring_unchanged() {
    let cfg = Config {
        num_bands: 1,
        thickness: 0.0,
        noise_range: 0.0,
        wave_amp: 0.0,
        ..Config::default()
    };
    let generator = ContourGenerator::new(&cfg, FbmNoise::new(0));
    let far = PointerSample {
        position: Point::new(1.0e6, 1.0e6),
        scale_to_screen: 1.0,
    };
    let band = generator.generate_band(0, &diamond(), &AnimationState::initial(212.0), Some(&far));
    let mut expected = diamond().points().to_vec();
    expected.push(expected[0]);
    assert_eq!(band, expected);
}

#[test]
fn zero_progress_is_the_pure_band_offset_ring() {
    let cfg = Config {
        num_bands: 5,
        thickness: 40.0,
        ..Config::default()
    };
    let generator = ContourGenerator::new(&cfg, FbmNoise::new(8));
    let ring = blob(64);
    let state = AnimationState {
        elapsed: 0.0,
        wave_phase: 2.0,
        noise_time: 9.0,
        ..AnimationState::initial(212.0)
    };

    for band in 0..5 {
        let offset = generator.params().band_offset(band);
        let points = generator.generate_band(band, &ring, &state, None);
        for (p, base) in points.iter().zip(ring.points()) {
            let dir = base.to_vec2() / base.to_vec2().hypot();
            let expected = *base + dir * offset;
            assert!((*p - expected).hypot() < 1e-9);
        }
    }
}

#[test]
fn displacement_stays_within_the_amplitude_bound() {
    let cfg = Config {
        num_bands: 9,
        ..Config::default()
    };
    let generator = ContourGenerator::new(&cfg, FbmNoise::new(21));
    let ring = blob(128);
    let bound_extra = cfg.noise_range + cfg.wave_amp + 1e-9;

    for elapsed in [0.1, 0.5, 1.0, 3.0, 1.0e6] {
        let state = state_at(elapsed);
        assert!(state.progress() <= 1.0);
        for band in 0..cfg.num_bands {
            let limit = generator.params().band_offset(band).abs() + bound_extra;
            let points = generator.generate_band(band, &ring, &state, None);
            for (p, base) in points.iter().zip(ring.points()) {
                assert!((*p - *base).hypot() <= limit);
            }
        }
    }
}

#[test]
fn noise_extremes_reach_but_do_not_exceed_the_range() {
    let cfg = Config {
        num_bands: 1,
        thickness: 0.0,
        wave_amp: 0.0,
        noise_range: 80.0,
        ..Config::default()
    };
    let state = state_at(2.0);
    let ring = diamond();
    let out = ContourGenerator::new(&cfg, ConstantNoise(1.0)).generate_band(0, &ring, &state, None);
    let inward = ContourGenerator::new(&cfg, ConstantNoise(0.0)).generate_band(0, &ring, &state, None);
    assert_eq!(out[0], Point::new(90.0, 0.0));
    assert_eq!(inward[0], Point::new(-30.0, 0.0));
}

#[test]
fn empty_ring_is_safe_for_every_band() {
    let generator = ContourGenerator::new(&Config::default(), FbmNoise::new(1));
    let pointer = PointerSample {
        position: Point::ZERO,
        scale_to_screen: 1.0,
    };
    for band in [0, 1, 50, 99, 1000] {
        assert!(
            generator
                .generate_band(band, &OutlineRing::empty(), &state_at(0.5), Some(&pointer))
                .is_empty()
        );
    }
    let frame = generator.generate_frame(&OutlineRing::empty(), &state_at(0.5), None);
    assert_eq!(frame.len(), 100);
}

#[test]
fn generation_is_bit_for_bit_deterministic() {
    let cfg = Config {
        num_bands: 12,
        ..Config::default()
    };
    let ring = blob(200);
    let state = state_at(0.8);
    let pointer = PointerSample {
        position: Point::new(-20.0, 35.0),
        scale_to_screen: 0.9,
    };

    let a = ContourGenerator::new(&cfg, FbmNoise::new(5));
    let b = ContourGenerator::new(&cfg, FbmNoise::new(5));
    for band in 0..12 {
        let x = a.generate_band(band, &ring, &state, Some(&pointer));
        let y = b.generate_band(band, &ring, &state, Some(&pointer));
        let bits = |v: &[Point]| v.iter().map(|p| (p.x.to_bits(), p.y.to_bits())).collect::<Vec<_>>();
        assert_eq!(bits(&x), bits(&y));
    }
}

#[test]
fn pointer_attraction_is_local() {
    for (influence, falloff) in [(50.0, 1.5), (500.0, 0.2), (5.0, 8.0)] {
        let field = PointerField::new(influence, 120.0, falloff);
        let pointer = Point::new(10.0, 10.0);
        for p in [
            Point::new(130.0, 10.0),
            Point::new(10.0, -110.0),
            Point::new(200.0, 200.0),
        ] {
            assert_eq!(field.attract(p, pointer), Vec2::ZERO);
        }
        assert_ne!(field.attract(Point::new(60.0, 10.0), pointer), Vec2::ZERO);
    }
}

#[test]
fn pointer_only_moves_vertices_inside_its_disc() {
    let cfg = Config {
        num_bands: 1,
        thickness: 0.0,
        noise_range: 0.0,
        wave_amp: 0.0,
        pointer_radius: 5.0,
        ..Config::default()
    };
    let generator = ContourGenerator::new(&cfg, FbmNoise::new(0));
    let state = AnimationState::initial(212.0);
    let near_first = PointerSample {
        position: Point::new(12.0, 0.0),
        scale_to_screen: 1.0,
    };
    let band = generator.generate_band(0, &diamond(), &state, Some(&near_first));
    assert!(band[0].x > 10.0);
    assert_eq!(&band[1..4], &diamond().points()[1..4]);
}

#[test]
fn clock_and_generator_cooperate_over_many_frames() {
    let cfg = Config {
        num_bands: 3,
        ..Config::default()
    };
    let clock = AnimationClock::from_config(&cfg);
    let generator = ContourGenerator::new(&cfg, FbmNoise::new(2));
    let ring = blob(50);
    let mut state = clock.initial_state();
    for i in 0..300 {
        state = clock.advance(state, i % 50 < 20);
        for band in generator.generate_frame(&ring, &state, None) {
            assert!(band.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
            assert!((0.6..=0.8).contains(&band.color.a));
        }
    }
}
