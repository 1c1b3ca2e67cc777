//! Gradient renderer for both scenes.

use crate::constants::*;
use crate::orb::OrbFrame;
use crate::starfield::StarfieldFrame;
use crate::surface::{DrawingSurface, RadialGradient, Rect, Rgba};
use glam::Vec2;

fn fill(surface: &mut dyn DrawingSurface, gradient: RadialGradient) {
    if gradient.is_drawable() {
        let rect = gradient.bounds();
        surface.fill_with_gradient(&gradient, rect);
    }
}

/// Soft glow disc (6× size) under a bright core (1.5× size).
///
/// `glow_center` is the glow's innermost color; its alpha is scaled by
/// `GLOW_PEAK_ALPHA · brightness`. `glow_mid` is the mid stop as-is.
pub fn draw_particle(
    surface: &mut dyn DrawingSurface,
    pos: Vec2,
    size: f32,
    brightness: f32,
    glow_center: Rgba,
    glow_mid: Rgba,
) {
    if !(size > 0.0 && brightness > 0.0) {
        return;
    }
    fill(
        surface,
        RadialGradient::new(
            pos,
            size * GLOW_RADIUS_SCALE,
            &[
                (0.0, glow_center.with_alpha(GLOW_PEAK_ALPHA * brightness)),
                (0.5, glow_mid),
                (1.0, Rgba::TRANSPARENT),
            ],
        ),
    );
    fill(
        surface,
        RadialGradient::new(
            pos,
            size * CORE_RADIUS_SCALE,
            &[
                (0.0, Rgba::white(brightness)),
                (0.5, Rgba::white(brightness * CORE_MID_ALPHA)),
                (1.0, Rgba::TRANSPARENT),
            ],
        ),
    );
}

/// Background, nebula, links, stars, cursor glow, in that order.
pub fn render_starfield(surface: &mut dyn DrawingSurface, frame: &StarfieldFrame) {
    let vp = frame.viewport;
    surface.fill_opaque_rect(frame.background, Rect::new(0.0, 0.0, vp.width, vp.height));

    for blob in &frame.nebula {
        let gradient = RadialGradient::new(
            blob.center,
            blob.radius,
            &[(0.0, blob.color), (0.5, Rgba::TRANSPARENT), (1.0, Rgba::TRANSPARENT)],
        );
        if gradient.is_drawable() {
            surface.fill_with_gradient(&gradient, Rect::new(0.0, 0.0, vp.width, vp.height));
        }
    }

    for link in &frame.links {
        if link.opacity > 0.0 {
            surface.stroke_line(link.from, link.to, Rgba::white(link.opacity), LINK_WIDTH);
        }
    }

    for star in &frame.stars {
        if star.reveal <= 0.0 {
            continue;
        }
        draw_particle(
            surface,
            star.pos,
            star.size,
            star.brightness,
            Rgba::from_hsla(star.hue, 0.3, 0.9, 1.0),
            Rgba::from_hsla(star.hue, 0.3, 1.0, GLOW_MID_ALPHA),
        );
    }

    if let Some(cursor) = frame.cursor {
        fill(
            surface,
            RadialGradient::new(
                cursor,
                CURSOR_GLOW_RADIUS,
                &[
                    (0.0, Rgba::white(0.08)),
                    (0.5, Rgba::white(0.04)),
                    (1.0, Rgba::TRANSPARENT),
                ],
            ),
        );
    }
}

/// Transparent clear, then particles; the orb composites over the page.
pub fn render_orb(surface: &mut dyn DrawingSurface, frame: &OrbFrame) {
    surface.clear();
    for p in &frame.particles {
        draw_particle(
            surface,
            p.pos,
            p.size,
            p.brightness,
            Rgba::white(1.0),
            Rgba::white(GLOW_MID_ALPHA * p.brightness),
        );
    }
}
