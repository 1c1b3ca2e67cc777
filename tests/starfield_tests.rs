// Host-side tests for the ambient starfield.

use glam::Vec2;
use osmo_core::starfield::{constellation_links, repulsion, reveal_progress, star_pulse};
use osmo_core::{Cursor, Starfield, StarfieldConfig, Viewport};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_field(viewport: Viewport, count: usize, reduced: bool) -> Starfield {
    let mut rng = StdRng::seed_from_u64(7);
    Starfield::new(StarfieldConfig::default(), viewport, count, reduced, &mut rng).unwrap()
}

#[test]
fn reveal_progress_hits_half_way_exactly() {
    assert_eq!(reveal_progress(0.3, 0.0, 0.6), 0.5);
    assert_eq!(reveal_progress(0.0, 0.0, 0.6), 0.0);
    assert_eq!(reveal_progress(5.0, 0.0, 0.6), 1.0);
}

#[test]
fn reveal_progress_is_monotonic() {
    let mut prev = 0.0;
    for i in 0..400 {
        let e = i as f32 * 0.01;
        let p = reveal_progress(e, 1.2, 0.6);
        assert!(p >= prev, "reveal went backwards at {e}");
        assert!((0.0..=1.0).contains(&p));
        prev = p;
    }
    assert_eq!(prev, 1.0);
}

#[test]
fn reveal_is_zero_until_delay_passes() {
    assert_eq!(reveal_progress(1.0, 1.0, 0.6), 0.0);
    assert_eq!(reveal_progress(0.5, 1.0, 0.6), 0.0);
}

#[test]
fn repulsion_falloff_matches_reference_points() {
    let cursor = Some(Vec2::ZERO);
    assert_eq!(repulsion(Vec2::new(150.0, 0.0), cursor, 150.0, 40.0), Vec2::ZERO);
    let push = repulsion(Vec2::new(75.0, 0.0), cursor, 150.0, 40.0);
    assert!((push.length() - 10.0).abs() < 1e-4);
    assert!(push.x > 0.0, "push should point away from the cursor");
    let at_cursor = repulsion(Vec2::ZERO, cursor, 150.0, 40.0);
    assert_eq!(at_cursor, Vec2::ZERO);
    assert!(at_cursor.is_finite());
}

#[test]
fn repulsion_is_zero_without_cursor_or_radius() {
    assert_eq!(repulsion(Vec2::new(10.0, 0.0), None, 150.0, 40.0), Vec2::ZERO);
    assert_eq!(repulsion(Vec2::new(10.0, 0.0), Some(Vec2::ZERO), 0.0, 40.0), Vec2::ZERO);
}

#[test]
fn star_pulse_stays_in_band() {
    for i in 0..100 {
        let p = star_pulse(i as f32 * 0.1, 2.0, 0.3);
        assert!((0.3 - 1e-6..=1.0 + 1e-6).contains(&p));
    }
}

fn nearest_selection(positions: &[Vec2], i: usize, max_d: f32, k: usize) -> Vec<usize> {
    let mut near: Vec<(usize, f32)> = positions
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != i)
        .map(|(j, q)| (j, positions[i].distance(*q)))
        .filter(|&(_, d)| d < max_d)
        .collect();
    near.sort_by(|a, b| a.1.total_cmp(&b.1));
    near.into_iter().take(k).map(|(j, _)| j).collect()
}

#[test]
fn constellation_respects_distance_and_selection_cap() {
    // Dense grid: every star has far more than six neighbours in range.
    let positions: Vec<Vec2> = (0..100)
        .map(|i| Vec2::new((i % 10) as f32 * 18.0 + (i / 10) as f32 * 0.37, (i / 10) as f32 * 18.0))
        .collect();
    let edges = constellation_links(&positions, 100.0, 6);
    assert!(!edges.is_empty());

    let mut seen = std::collections::HashSet::new();
    for &(a, b, d) in &edges {
        assert!(a < b);
        assert!(d < 100.0);
        assert!(seen.insert((a, b)), "pair {a}-{b} emitted twice");
        let from_a = nearest_selection(&positions, a, 100.0, 6).contains(&b);
        let from_b = nearest_selection(&positions, b, 100.0, 6).contains(&a);
        assert!(from_a || from_b, "edge {a}-{b} chosen by neither end");
    }

    for i in 0..positions.len() {
        let own = edges
            .iter()
            .filter(|&&(a, b, _)| {
                (a == i && nearest_selection(&positions, i, 100.0, 6).contains(&b))
                    || (b == i && nearest_selection(&positions, i, 100.0, 6).contains(&a))
            })
            .count();
        assert!(own <= 6, "star {i} selected {own} neighbours");
    }
}

#[test]
fn constellation_skips_far_pairs() {
    let positions = [Vec2::ZERO, Vec2::new(100.0, 0.0), Vec2::new(500.0, 500.0)];
    assert!(constellation_links(&positions, 100.0, 6).is_empty());
}

#[test]
fn frame_links_stay_under_max_distance() {
    let field = make_field(Viewport::new(400.0, 300.0), 120, false);
    let frame = field.update(5.0, Cursor::OFF_SCENE);
    assert!(!frame.links.is_empty());
    for link in &frame.links {
        assert!(link.from.distance(link.to) < 100.0);
        assert!(link.opacity > 0.0 && link.opacity <= 0.08);
    }
}

#[test]
fn links_are_invisible_before_fade_window() {
    let field = make_field(Viewport::new(400.0, 300.0), 120, false);
    assert!(field.update(1.5, Cursor::OFF_SCENE).links.is_empty());
    assert_eq!(field.link_fade(2.5), 0.5);
    assert_eq!(field.link_fade(10.0), 1.0);
}

#[test]
fn star_amplitudes_stay_within_bounds() {
    let config = StarfieldConfig::default();
    let field = make_field(Viewport::new(1280.0, 800.0), 120, false);
    for star in field.stars() {
        assert!(config.size.contains(star.size));
        assert!(config.brightness.contains(star.brightness));
        assert!(config.hue.contains(star.hue));
    }
    for i in 0..60 {
        let frame = field.update(i as f32 * 0.25, Cursor::at(Vec2::new(640.0, 400.0)));
        for s in &frame.stars {
            assert!(s.size >= 0.0 && s.size <= config.size.max + 1e-4);
            assert!(s.brightness >= 0.0 && s.brightness <= config.brightness.max + 1e-4);
            assert!(s.pos.is_finite());
        }
    }
}

#[test]
fn rebuild_replaces_population_inside_new_bounds() {
    let mut field = make_field(Viewport::new(1920.0, 1080.0), 120, false);
    let mut rng = StdRng::seed_from_u64(99);
    field.rebuild(Viewport::new(500.0, 400.0), 80, &mut rng);
    assert_eq!(field.len(), 80);
    assert_eq!(field.viewport(), Viewport::new(500.0, 400.0));
    for star in field.stars() {
        assert!(star.base.x >= 0.0 && star.base.x <= 500.0);
        assert!(star.base.y >= 0.0 && star.base.y <= 400.0);
    }
}

#[test]
fn rebuild_after_launch_keeps_stars_and_links_visible() {
    let config = StarfieldConfig::default();
    let mut field = make_field(Viewport::new(1280.0, 800.0), 120, false);
    let before = field.update(10.0, Cursor::OFF_SCENE);
    assert!(before.stars.iter().all(|s| s.reveal == 1.0));
    assert!(!before.links.is_empty());

    // A window drag: many small rebuilds in quick succession.
    let mut rng = StdRng::seed_from_u64(3);
    for (i, w) in [1270.0, 1262.0, 1255.0, 1249.0].into_iter().enumerate() {
        field.rebuild(Viewport::new(w, 800.0), 120, &mut rng);
        let frame = field.update(10.0 + 0.016 * (i + 1) as f32, Cursor::OFF_SCENE);
        assert!(frame.stars.iter().all(|s| s.reveal == 1.0));
        assert!(frame.links.iter().all(|l| l.opacity > 0.0));
        assert!(!frame.links.is_empty());
    }
    assert_eq!(field.link_fade(10.1), 1.0);
    assert!(config.settled_elapsed() < 10.0);
}

#[test]
fn rebuild_during_launch_follows_the_launch_schedule() {
    let config = StarfieldConfig::default();
    let mut field = make_field(Viewport::new(1280.0, 800.0), 120, false);
    let mut rng = StdRng::seed_from_u64(4);
    field.rebuild(Viewport::new(900.0, 700.0), 120, &mut rng);
    let frame = field.update(0.5, Cursor::OFF_SCENE);
    for (record, star) in frame.stars.iter().zip(field.stars()) {
        assert_eq!(record.reveal, reveal_progress(0.5, star.reveal_delay, star.reveal_duration));
        assert!(star.reveal_delay <= config.reveal_delay_max);
    }
    assert!(frame.links.is_empty());
}

#[test]
fn zero_viewport_is_harmless() {
    let field = make_field(Viewport::new(0.0, 0.0), 40, false);
    let frame = field.update(4.0, Cursor::at(Vec2::ZERO));
    assert!(frame.nebula.is_empty());
    assert!(frame.stars.iter().all(|s| s.pos.is_finite()));
}

#[test]
fn reduced_motion_removes_drift_and_repulsion() {
    let config = StarfieldConfig::default();
    let field = make_field(Viewport::new(800.0, 600.0), 60, true);
    let settled = config.settled_elapsed();
    let cursor = Cursor::at(field.stars()[0].base + Vec2::new(10.0, 0.0));
    let frame = field.update(settled, cursor);
    assert!(frame.nebula.is_empty());
    for (record, star) in frame.stars.iter().zip(field.stars()) {
        assert_eq!(record.pos, star.base);
        assert_eq!(record.reveal, 1.0);
    }
    assert_eq!(field.link_fade(settled), 1.0);
}
