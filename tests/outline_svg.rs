use std::path::{Path, PathBuf};

use etherloop::{OutlineRing, OutlineSampler, Point};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn blob_fixture_samples_into_a_centered_ring() {
    let ring = OutlineSampler::new(200)
        .load_svg_file(&fixture("blob.svg"))
        .unwrap();
    assert_eq!(ring.len(), 200);

    let c = ring.centroid().unwrap();
    assert!(c.x.abs() < 1e-6 && c.y.abs() < 1e-6, "{c:?}");

    // near-circle of radius 100 around the origin once re-centered
    for p in ring.points() {
        let r = p.to_vec2().hypot();
        assert!((r - 100.0).abs() < 2.0, "radius {r}");
    }
    // first sample sits at the path start, (300,200) before centering
    let first = ring.get(0).unwrap();
    assert!((first.x - 100.0).abs() < 1.0 && first.y.abs() < 1.0);
}

#[test]
fn samples_are_evenly_spaced_along_the_outline() {
    let ring = OutlineSampler::new(64)
        .load_svg_file(&fixture("blob.svg"))
        .unwrap();
    let pts = ring.points();
    let steps: Vec<f64> = (0..pts.len())
        .map(|k| (pts[(k + 1) % pts.len()] - pts[k]).hypot())
        .collect();
    let min = steps.iter().copied().fold(f64::INFINITY, f64::min);
    let max = steps.iter().copied().fold(0.0, f64::max);
    assert!(max - min < 0.05 * max, "chord spread {min}..{max}");
}

#[test]
fn ring_is_cyclic() {
    let ring = OutlineSampler::new(10)
        .load_svg_file(&fixture("blob.svg"))
        .unwrap();
    assert_eq!(ring.get(3), ring.get(13));
    assert_eq!(ring.get(0), ring.get(10));
}

#[test]
fn unusable_sources_degrade_to_the_empty_ring() {
    for name in ["no_path.svg", "not_svg.svg", "rect_only.svg", "does_not_exist.svg"] {
        let path = fixture(name);
        assert!(OutlineSampler::new(50).load_svg_file(&path).is_err(), "{name}");
        let ring = OutlineRing::load_or_empty(&path, 50);
        assert!(ring.is_empty(), "{name}");
        assert_eq!(ring.get(0), None);
    }
}

#[test]
fn only_path_elements_are_traced() {
    let blob = OutlineSampler::new(64)
        .load_svg_file(&fixture("blob.svg"))
        .unwrap();
    for name in ["rect_before_path.svg", "path_in_defs.svg"] {
        let ring = OutlineSampler::new(64)
            .load_svg_file(&fixture(name))
            .unwrap();
        assert_eq!(ring.len(), 64, "{name}");
        for (p, q) in ring.points().iter().zip(blob.points()) {
            assert!((*p - *q).hypot() < 1e-9, "{name}: {p:?} vs {q:?}");
        }
    }
}

#[test]
fn inline_path_data_matches_polygon_sampling() {
    let sampler = OutlineSampler::new(8);
    let from_path = sampler.sample_path_data("M0,0 L40,0 L40,40 L0,40 Z").unwrap();
    let from_poly = sampler
        .sample_polygon(&[
            Point::new(0.0, 0.0),
            Point::new(40.0, 0.0),
            Point::new(40.0, 40.0),
            Point::new(0.0, 40.0),
        ])
        .unwrap();
    assert_eq!(from_path, from_poly);
    let first = from_path.get(0).unwrap();
    assert!((first.x + 20.0).abs() < 1e-9 && (first.y + 20.0).abs() < 1e-9);
}
