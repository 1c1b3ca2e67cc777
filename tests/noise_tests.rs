// Host-side tests for the value noise source.

use osmo_core::noise::{fade, lattice_hash, noise};

#[test]
fn noise_is_deterministic() {
    for i in 0..50 {
        let x = i as f32 * 0.37 - 4.0;
        let y = i as f32 * 0.11 + 2.5;
        assert_eq!(noise(x, y), noise(x, y));
    }
}

#[test]
fn noise_stays_in_unit_range() {
    for i in 0..200 {
        for j in 0..20 {
            let v = noise(i as f32 * 0.173 - 17.0, j as f32 * 0.291 - 3.0);
            assert!((-1.0..=1.0).contains(&v), "noise out of range: {v}");
        }
    }
}

#[test]
fn noise_matches_lattice_at_integer_corners() {
    let v = noise(3.0, -2.0);
    assert!((v - lattice_hash(3.0, -2.0)).abs() < 1e-6);
}

#[test]
fn noise_is_continuous_across_cells() {
    // Small input steps never produce large output jumps, including at cell edges.
    let eps = 1e-3;
    for i in 0..400 {
        let x = i as f32 * 0.05 - 10.0;
        let a = noise(x, 0.7);
        let b = noise(x + eps, 0.7);
        assert!((a - b).abs() < 0.02, "jump at x={x}: {a} vs {b}");
    }
}

#[test]
fn noise_handles_non_finite_input() {
    assert_eq!(noise(f32::NAN, 1.0), 0.0);
    assert_eq!(noise(0.0, f32::INFINITY), 0.0);
}

#[test]
fn fade_is_smooth_at_endpoints() {
    assert_eq!(fade(0.0), 0.0);
    assert_eq!(fade(1.0), 1.0);
    assert!((fade(0.5) - 0.5).abs() < 1e-6);
}
