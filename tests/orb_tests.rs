// Host-side tests for the orbit ring, its springs and easing curves.

use osmo_core::orb::{ease_out_cubic, smootherstep, wrap_angle, Spring};
use osmo_core::{FrameTime, OrbConfig, OrbitRing, TransitionEvent, TransitionMachine, TransitionState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::PI;

const DT: f32 = 1.0 / 60.0;

fn make_ring(count: usize, reduced: bool) -> OrbitRing {
    let mut rng = StdRng::seed_from_u64(42);
    OrbitRing::new(OrbConfig::default(), count, reduced, &mut rng).unwrap()
}

fn machine() -> TransitionMachine {
    let c = OrbConfig::default();
    TransitionMachine::new(c.scatter_out_secs, c.reform_secs)
}

/// Step the ring at 60 Hz from `from` for `secs`, advancing the machine's
/// auto-transitions like the scene does. Returns the final elapsed time.
fn run(ring: &mut OrbitRing, m: &mut TransitionMachine, from: f32, secs: f32) -> f32 {
    let frames = (secs / DT).round() as u32;
    let mut t = from;
    for _ in 0..frames {
        t += DT;
        m.advance(t);
        ring.update(FrameTime { elapsed: t, dt: DT }, m);
    }
    t
}

#[test]
fn wrap_angle_takes_the_short_way() {
    assert!((wrap_angle(1.5 * PI) + 0.5 * PI).abs() < 1e-5);
    assert!((wrap_angle(-1.5 * PI) - 0.5 * PI).abs() < 1e-5);
    assert_eq!(wrap_angle(PI), PI);
    assert_eq!(wrap_angle(-PI), PI);
    assert_eq!(wrap_angle(0.25), 0.25);
    assert_eq!(wrap_angle(f32::NAN), 0.0);
}

#[test]
fn angular_spring_crosses_the_seam() {
    // 3.0 -> -3.0 is 0.28 rad forward across ±π, not 6 rad backward.
    let mut s = Spring {
        value: 3.0,
        velocity: 0.0,
    };
    s.step_angle(-3.0, 8.0, 1.0, 1.0 / 120.0);
    assert!(s.velocity > 0.0);
    assert!(s.value > 3.0);
}

#[test]
fn easing_curves_hit_endpoints() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    assert_eq!(smootherstep(0.0), 0.0);
    assert_eq!(smootherstep(1.0), 1.0);
    assert!(ease_out_cubic(0.5) > 0.5);
}

#[test]
fn particles_fill_bands_in_order() {
    let config = OrbConfig::default();
    for (count, expected) in [(150, [50, 50, 50]), (100, [34, 34, 32]), (50, [17, 17, 16])] {
        let ring = make_ring(count, false);
        assert_eq!(ring.len(), count);
        let mut per_band = [0usize; 3];
        for p in ring.particles() {
            per_band[p.band] += 1;
            let band = config.bands.as_slice()[p.band];
            assert!(p.base_radius >= band.min && p.base_radius <= band.max);
        }
        assert_eq!(per_band, expected);
    }
    assert!(make_ring(0, false).is_empty());
}

#[test]
fn particle_amplitudes_stay_within_bounds() {
    let config = OrbConfig::default();
    let ring = make_ring(150, false);
    assert!(ring.particles().iter().any(|p| p.orbit_speed < 0.0));
    assert!(ring.particles().iter().any(|p| p.orbit_speed > 0.0));
    for p in ring.particles() {
        assert!(config.size.contains(p.size));
        assert!(config.brightness.contains(p.brightness));
        assert!(config.orbit_speed.contains(p.orbit_speed.abs()));
    }
}

#[test]
fn rendered_size_and_brightness_stay_within_bounds_every_tick() {
    let config = OrbConfig::default();
    let mut ring = make_ring(150, false);
    let m = machine();
    let mut saw_pulse = false;
    for i in 1..=2000 {
        let t = i as f32 * DT;
        let frame = ring.update(FrameTime { elapsed: t, dt: DT }, &m);
        for (record, p) in frame.particles.iter().zip(ring.particles()) {
            assert!(config.size.contains(record.size), "size {} at {t}", record.size);
            assert!(config.brightness.contains(record.brightness), "brightness {} at {t}", record.brightness);
            saw_pulse |= record.size != p.size;
        }
    }
    assert!(saw_pulse);
}

#[test]
fn hover_converges_within_one_percent_in_a_second() {
    let mut ring = make_ring(150, false);
    let mut m = machine();
    m.handle(TransitionEvent::PointerEnter, 0.0);
    let t = run(&mut ring, &mut m, 0.0, 1.0);
    let hover = ring.config().hover_offset;
    let targets = ring.targets(t, &m);
    for (p, &(r, a)) in ring.particles().iter().zip(&targets) {
        assert!((p.radial_offset() - hover).abs() <= 0.01 * hover);
        assert!((p.current_radius - r).abs() <= 0.01 * hover);
        assert!(wrap_angle(p.current_angle - a).abs() < 1e-3);
    }
}

#[test]
fn five_percent_settle_time_is_in_range() {
    let mut ring = make_ring(12, false);
    let mut m = machine();
    m.handle(TransitionEvent::PointerEnter, 0.0);
    let hover = ring.config().hover_offset;
    let mut settled_at = None;
    let mut t = 0.0;
    for _ in 0..120 {
        t += DT;
        ring.update(FrameTime { elapsed: t, dt: DT }, &m);
        let err = (ring.particles()[0].radial_offset() - hover).abs();
        if err > 0.05 * hover {
            settled_at = None;
        } else if settled_at.is_none() {
            settled_at = Some(t);
        }
    }
    let settled_at = settled_at.unwrap();
    assert!((0.3..=0.9).contains(&settled_at), "settled at {settled_at}");
}

#[test]
fn convergence_does_not_depend_on_frame_rate() {
    let mut fast = make_ring(6, false);
    let mut slow = make_ring(6, false);
    let mut m = machine();
    m.handle(TransitionEvent::PointerEnter, 0.0);
    for i in 1..=144 {
        fast.update(
            FrameTime {
                elapsed: i as f32 / 144.0,
                dt: 1.0 / 144.0,
            },
            &m,
        );
    }
    for i in 1..=30 {
        slow.update(
            FrameTime {
                elapsed: i as f32 / 30.0,
                dt: 1.0 / 30.0,
            },
            &m,
        );
    }
    let a = fast.particles()[0].radial_offset();
    let b = slow.particles()[0].radial_offset();
    assert!((a - b).abs() < 0.05, "{a} vs {b}");
}

#[test]
fn scatter_pushes_out_and_reform_returns() {
    let mut ring = make_ring(60, false);
    let mut m = machine();
    let t = run(&mut ring, &mut m, 0.0, 2.0);
    assert!(m.handle(TransitionEvent::Click, t));
    let t = run(&mut ring, &mut m, t, 0.45);
    assert_eq!(m.state(), TransitionState::Reforming);
    assert!(ring.particles().iter().all(|p| p.radial_offset() > 5.0));
    let _ = run(&mut ring, &mut m, t, 1.6);
    assert_eq!(m.state(), TransitionState::Idle);
    assert!(ring.particles().iter().all(|p| p.radial_offset().abs() < 1.0));
}

#[test]
fn scatter_amount_follows_the_timeline() {
    let ring = make_ring(3, false);
    let d = ring.config().scatter_distance;
    assert_eq!(ring.scatter_amount(TransitionState::Scattering, 0.0), 0.0);
    assert_eq!(ring.scatter_amount(TransitionState::Scattering, 1.0), d);
    assert_eq!(ring.scatter_amount(TransitionState::Reforming, 0.0), d);
    assert_eq!(ring.scatter_amount(TransitionState::Reforming, 1.0), 0.0);
    assert_eq!(ring.scatter_amount(TransitionState::Hovered, 0.5), 0.0);
}

#[test]
fn warmup_ramps_up_then_holds() {
    let ring = make_ring(3, false);
    assert_eq!(ring.warmup(0.0), 0.0);
    let mut prev = 0.0;
    for i in 1..=30 {
        let w = ring.warmup(i as f32 * 0.05);
        assert!(w >= prev);
        prev = w;
    }
    assert_eq!(ring.warmup(1.2), 1.0);
    assert_eq!(ring.warmup(10.0), 1.0);
}

#[test]
fn idle_wander_is_small_and_finite() {
    let mut ring = make_ring(150, false);
    let mut m = machine();
    let mut t = 0.0;
    for _ in 0..600 {
        t += DT;
        let frame = ring.update(FrameTime { elapsed: t, dt: DT }, &m);
        assert!(frame.particles.iter().all(|p| p.pos.is_finite()));
        m.advance(t);
    }
    assert!(ring.particles().iter().all(|p| p.radial_offset().abs() < 1.0));
}

#[test]
fn reduced_motion_snaps_without_wander_or_bob() {
    let mut ring = make_ring(50, true);
    let m = machine();
    let elapsed = ring.config().settled_elapsed();
    let frame = ring.update(FrameTime { elapsed, dt: 0.0 }, &m);
    assert_eq!(frame.bob, 0.0);
    assert_eq!(frame.particles.len(), 50);
    assert!(ring.particles().iter().all(|p| p.radial_offset() == 0.0));
}

#[test]
fn large_frame_gaps_stay_stable() {
    let mut ring = make_ring(30, false);
    let mut m = machine();
    m.handle(TransitionEvent::Click, 0.0);
    // 0.1 s is the largest delta the clock ever hands out.
    for i in 1..=20 {
        let t = i as f32 * 0.1;
        m.advance(t);
        ring.update(FrameTime { elapsed: t, dt: 0.1 }, &m);
    }
    assert!(ring.particles().iter().all(|p| p.current_radius.is_finite()));
}
