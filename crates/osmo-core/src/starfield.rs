//! Ambient full-viewport starfield.
//!
//! Each star sits at a fixed base position and is displaced per tick by a
//! slow two-axis drift and by pointer repulsion. Nearby stars are joined by
//! faint constellation links recomputed every frame.

use crate::config::StarfieldConfig;
use crate::error::ConfigError;
use crate::interaction::Cursor;
use crate::motion::Viewport;
use crate::surface::Rgba;
use fnv::FnvHashSet;
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// One star. Everything except `base` is fixed at creation.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub base: Vec2,
    pub size: f32,
    pub brightness: f32,
    pub pulse_speed: f32,
    pub pulse_phase: f32,
    pub drift_speed: f32,
    pub drift_angle: f32,
    pub hue: f32,
    pub reveal_delay: f32,
    pub reveal_duration: f32,
}

impl Star {
    fn sample<R: Rng + ?Sized>(config: &StarfieldConfig, viewport: Viewport, rng: &mut R) -> Self {
        Self {
            base: Vec2::new(rng.gen::<f32>() * viewport.width, rng.gen::<f32>() * viewport.height),
            size: config.size.sample(rng),
            brightness: config.brightness.sample(rng),
            pulse_speed: config.pulse_speed.sample(rng),
            pulse_phase: rng.gen::<f32>() * TAU,
            drift_speed: config.drift_speed.sample(rng),
            drift_angle: rng.gen::<f32>() * TAU,
            hue: config.hue.sample(rng),
            reveal_delay: rng.gen::<f32>() * config.reveal_delay_max,
            reveal_duration: config.reveal_duration,
        }
    }
}

/// Per-star values for one frame. `size` and `brightness` already include
/// the pulse and the reveal fade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarRecord {
    pub pos: Vec2,
    pub size: f32,
    pub brightness: f32,
    pub hue: f32,
    pub reveal: f32,
}

/// Unordered pair of star indices (`a < b`) joined in this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NebulaBlob {
    pub center: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

/// Everything the renderer needs to paint one starfield frame.
#[derive(Clone, Debug, PartialEq)]
pub struct StarfieldFrame {
    pub viewport: Viewport,
    pub background: Rgba,
    pub nebula: Vec<NebulaBlob>,
    pub links: Vec<Link>,
    pub stars: Vec<StarRecord>,
    pub cursor: Option<Vec2>,
}

/// `clamp((elapsed − delay) / duration, 0, 1)`; a zero duration is a step.
#[inline]
pub fn reveal_progress(elapsed: f32, delay: f32, duration: f32) -> f32 {
    let since = elapsed - delay;
    if !(duration > 0.0) {
        return if since > 0.0 { 1.0 } else { 0.0 };
    }
    (since / duration).clamp(0.0, 1.0)
}

/// Twinkle multiplier in `[0.3, 1.0]`.
#[inline]
pub fn star_pulse(elapsed: f32, speed: f32, phase: f32) -> f32 {
    crate::constants::STAR_PULSE_BASE + crate::constants::STAR_PULSE_SPAN * (elapsed * speed + phase).sin()
}

/// Push away from the cursor: `(1 − d/radius)² · strength` along the unit
/// vector from cursor to star, for `0 < d < radius`; zero otherwise.
pub fn repulsion(pos: Vec2, cursor: Option<Vec2>, radius: f32, strength: f32) -> Vec2 {
    let Some(c) = cursor else {
        return Vec2::ZERO;
    };
    if !(radius > 0.0) {
        return Vec2::ZERO;
    }
    let delta = pos - c;
    let d = delta.length();
    if !(d > 0.0 && d < radius) {
        return Vec2::ZERO;
    }
    let falloff = 1.0 - d / radius;
    delta / d * (falloff * falloff * strength)
}

/// Each star links to at most `max_per_star` of its nearest neighbours
/// strictly closer than `max_distance`. A pair chosen from both ends is
/// emitted once. Returns `(a, b, distance)` with `a < b`.
pub fn constellation_links(
    positions: &[Vec2],
    max_distance: f32,
    max_per_star: usize,
) -> Vec<(usize, usize, f32)> {
    let mut seen: FnvHashSet<(usize, usize)> = FnvHashSet::default();
    let mut edges = Vec::new();
    let mut nearby: SmallVec<[(usize, f32); 16]> = SmallVec::new();
    if max_per_star == 0 {
        return edges;
    }
    for (i, &p) in positions.iter().enumerate() {
        nearby.clear();
        for (j, &q) in positions.iter().enumerate() {
            if i == j {
                continue;
            }
            let d = p.distance(q);
            if d < max_distance {
                nearby.push((j, d));
            }
        }
        nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
        for &(j, d) in nearby.iter().take(max_per_star) {
            let key = (i.min(j), i.max(j));
            if seen.insert(key) {
                edges.push((key.0, key.1, d));
            }
        }
    }
    edges
}

pub struct Starfield {
    config: StarfieldConfig,
    viewport: Viewport,
    stars: Vec<Star>,
    reduced_motion: bool,
}

impl Starfield {
    pub fn new<R: Rng + ?Sized>(
        config: StarfieldConfig,
        viewport: Viewport,
        count: usize,
        reduced_motion: bool,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut field = Self {
            config,
            viewport,
            stars: Vec::new(),
            reduced_motion,
        };
        field.rebuild(viewport, count, rng);
        Ok(field)
    }

    /// Replace the whole population. The new stars are fully built before
    /// the old ones are dropped.
    ///
    /// Reveal delays and the link fade are measured from the scene's first
    /// frame, not from the rebuild, so a population rebuilt after the launch
    /// schedule has run is drawn fully revealed and linked on its first frame.
    pub fn rebuild<R: Rng + ?Sized>(&mut self, viewport: Viewport, count: usize, rng: &mut R) {
        let fresh: Vec<Star> = (0..count)
            .map(|_| Star::sample(&self.config, viewport, rng))
            .collect();
        self.stars = fresh;
        self.viewport = viewport;
    }

    /// Drop every star (teardown).
    pub fn clear(&mut self) {
        self.stars = Vec::new();
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }

    /// Base position plus drift (no drift under reduced motion).
    pub fn drifted_position(&self, star: &Star, elapsed: f32) -> Vec2 {
        if self.reduced_motion {
            return star.base;
        }
        let amp = self.config.drift_amplitude;
        let phase = elapsed * star.drift_speed;
        star.base
            + Vec2::new(
                (phase + star.drift_angle).cos() * amp,
                (phase * crate::constants::STAR_DRIFT_Y_RATIO + star.drift_angle).sin() * amp,
            )
    }

    /// 0..1 opacity ramp for constellation links.
    pub fn link_fade(&self, elapsed: f32) -> f32 {
        reveal_progress(elapsed, self.config.link_fade_delay, self.config.link_fade_duration)
    }

    pub fn nebula(&self, elapsed: f32) -> Vec<NebulaBlob> {
        let Viewport { width, height } = self.viewport;
        if self.reduced_motion || self.viewport.is_empty() {
            return Vec::new();
        }
        use crate::constants::{NEBULA_BREATH_AMOUNT, NEBULA_BREATH_SPEED, NEBULA_RADIUS_FRACTION, NEBULA_WANDER};
        let radius = width.min(height)
            * NEBULA_RADIUS_FRACTION
            * (1.0 - NEBULA_BREATH_AMOUNT + (elapsed * NEBULA_BREATH_SPEED).sin() * NEBULA_BREATH_AMOUNT);
        self.config
            .nebula
            .iter()
            .map(|layer| NebulaBlob {
                center: Vec2::new(
                    width * (layer.anchor.x + (elapsed * layer.speed).sin() * NEBULA_WANDER),
                    height * (layer.anchor.y + (elapsed * layer.speed * 0.8).cos() * NEBULA_WANDER),
                ),
                radius,
                color: layer.color,
            })
            .collect()
    }

    /// Compute the frame snapshot at scene time `elapsed`.
    pub fn update(&self, elapsed: f32, cursor: Cursor) -> StarfieldFrame {
        let drifted: Vec<Vec2> = self
            .stars
            .iter()
            .map(|s| self.drifted_position(s, elapsed))
            .collect();

        let fade = self.link_fade(elapsed);
        let links = if fade > 0.0 {
            let max_d = self.config.link_max_distance;
            constellation_links(&drifted, max_d, self.config.link_max_per_star)
                .into_iter()
                .map(|(a, b, d)| Link {
                    a,
                    b,
                    from: drifted[a],
                    to: drifted[b],
                    opacity: (1.0 - d / max_d) * crate::constants::LINK_MAX_ALPHA * fade,
                })
                .collect()
        } else {
            Vec::new()
        };

        let pointer = if self.reduced_motion { None } else { cursor.position() };
        let stars = self
            .stars
            .iter()
            .zip(&drifted)
            .map(|(star, &pos)| {
                let reveal = reveal_progress(elapsed, star.reveal_delay, star.reveal_duration);
                let pulse = star_pulse(elapsed, star.pulse_speed, star.pulse_phase);
                let push = repulsion(pos, pointer, self.config.repel_radius, self.config.repel_strength);
                StarRecord {
                    pos: pos + push,
                    size: star.size * pulse * reveal,
                    brightness: star.brightness * pulse * reveal,
                    hue: star.hue,
                    reveal,
                }
            })
            .collect();

        StarfieldFrame {
            viewport: self.viewport,
            background: self.config.background,
            nebula: self.nebula(elapsed),
            links,
            stars,
            cursor: cursor.position(),
        }
    }
}
