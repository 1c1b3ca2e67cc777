// Host-side tests for pure input functions.
// The web crate is wasm-only, so the module is included directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn css_to_scene_is_identity_at_native_size() {
    let p = Vec2::new(37.0, 80.5);
    let size = Vec2::new(220.0, 220.0);
    assert_eq!(css_to_scene(p, size, size), p);
}

#[test]
fn css_to_scene_scales_a_stretched_element() {
    // Orb canvas styled at 440 CSS px but simulated at 220 units.
    let p = css_to_scene(Vec2::new(220.0, 110.0), Vec2::splat(440.0), Vec2::splat(220.0));
    assert!((p - Vec2::new(110.0, 55.0)).length() < 1e-5);
}

#[test]
fn css_to_scene_leaves_collapsed_elements_alone() {
    let p = Vec2::new(12.0, 4.0);
    assert_eq!(css_to_scene(p, Vec2::ZERO, Vec2::splat(220.0)), p);
    assert_eq!(css_to_scene(p, Vec2::splat(100.0), Vec2::ZERO), p);
}

#[test]
fn css_to_scene_keeps_points_outside_the_element() {
    let p = css_to_scene(Vec2::new(-10.0, 500.0), Vec2::splat(200.0), Vec2::splat(100.0));
    assert!((p - Vec2::new(-5.0, 250.0)).length() < 1e-5);
}
