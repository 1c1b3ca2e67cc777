//! Interactive particle orb: concentric rings that orbit, breathe and
//! scatter on click.
//!
//! Every particle has a moving baseline (breathing radius, steadily
//! advancing angle). The interaction mode only decides an *offset* from
//! that baseline; a critically damped spring carries the rendered offset
//! toward the target offset using the real frame delta.

use crate::config::OrbConfig;
use crate::error::ConfigError;
use crate::noise::noise;
use crate::time::{substeps, FrameTime};
use crate::transition::{TransitionMachine, TransitionState};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Wrap an angle difference into `(−π, π]`.
#[inline]
pub fn wrap_angle(a: f32) -> f32 {
    if !a.is_finite() {
        return 0.0;
    }
    let w = (a + PI).rem_euclid(TAU) - PI;
    if w <= -PI {
        w + TAU
    } else {
        w
    }
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - t.clamp(0.0, 1.0);
    1.0 - u * u * u
}

/// Quintic smootherstep `6t⁵ − 15t⁴ + 10t³`.
#[inline]
pub fn smootherstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Damped spring on a single scalar.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spring {
    pub value: f32,
    pub velocity: f32,
}

impl Spring {
    /// One semi-implicit Euler step toward `target`.
    pub fn step(&mut self, target: f32, omega: f32, damping_ratio: f32, dt: f32) {
        self.step_error(target - self.value, omega, damping_ratio, dt);
    }

    /// Like `step`, but the error is taken the short way around the circle.
    pub fn step_angle(&mut self, target: f32, omega: f32, damping_ratio: f32, dt: f32) {
        self.step_error(wrap_angle(target - self.value), omega, damping_ratio, dt);
    }

    fn step_error(&mut self, error: f32, omega: f32, damping_ratio: f32, dt: f32) {
        let accel = omega * omega * error - 2.0 * damping_ratio * omega * self.velocity;
        self.velocity += accel * dt;
        self.value += self.velocity * dt;
        if !(self.value.is_finite() && self.velocity.is_finite()) {
            *self = Spring::default();
        }
    }

    pub fn snap(&mut self, target: f32) {
        self.value = target;
        self.velocity = 0.0;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbParticle {
    pub band: usize,
    pub base_radius: f32,
    pub base_angle: f32,
    pub size: f32,
    pub brightness: f32,
    pub orbit_speed: f32,
    pub breath_phase: f32,
    pub noise_phase: f32,
    radial: Spring,
    angular: Spring,
    pub current_radius: f32,
    pub current_angle: f32,
}

impl OrbParticle {
    pub fn radial_offset(&self) -> f32 {
        self.radial.value
    }
}

/// Per-particle values for one frame, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbRecord {
    pub pos: Vec2,
    pub size: f32,
    pub brightness: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbFrame {
    pub canvas_size: f32,
    pub bob: f32,
    pub particles: Vec<OrbRecord>,
}

pub struct OrbitRing {
    config: OrbConfig,
    particles: Vec<OrbParticle>,
    reduced_motion: bool,
}

impl OrbitRing {
    pub fn new<R: Rng + ?Sized>(
        config: OrbConfig,
        count: usize,
        reduced_motion: bool,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut ring = Self {
            config,
            particles: Vec::new(),
            reduced_motion,
        };
        ring.rebuild(count, rng);
        Ok(ring)
    }

    /// Distribute `count` particles over the bands, `ceil(count / bands)`
    /// per band until the total is reached.
    pub fn rebuild<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        let bands = self.config.bands.as_slice();
        let per_band = count.div_ceil(bands.len().max(1));
        let mut fresh = Vec::with_capacity(count);
        'bands: for (band_index, band) in bands.iter().enumerate() {
            for i in 0..per_band {
                if fresh.len() == count {
                    break 'bands;
                }
                let angle = i as f32 / per_band as f32 * TAU + rng.gen::<f32>() * self.config.angle_jitter;
                let radius = band.min + rng.gen::<f32>() * (band.max - band.min);
                let sign = if rng.gen::<bool>() { 1.0 } else { -1.0 };
                fresh.push(OrbParticle {
                    band: band_index,
                    base_radius: radius,
                    base_angle: angle,
                    size: self.config.size.sample(rng),
                    brightness: self.config.brightness.sample(rng),
                    orbit_speed: self.config.orbit_speed.sample(rng) * sign,
                    breath_phase: rng.gen::<f32>() * TAU,
                    noise_phase: rng.gen::<f32>() * TAU,
                    radial: Spring::default(),
                    angular: Spring::default(),
                    current_radius: radius,
                    current_angle: angle,
                });
            }
        }
        self.particles = fresh;
    }

    pub fn clear(&mut self) {
        self.particles = Vec::new();
    }

    pub fn particles(&self) -> &[OrbParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &OrbConfig {
        &self.config
    }

    pub fn breathe(&self, elapsed: f32, phase: f32) -> f32 {
        1.0 + self.config.breath_amplitude * (self.config.breath_speed * elapsed + phase).sin()
    }

    /// Noise strength ramp: 0 at mount, full after `warmup_secs`.
    pub fn warmup(&self, elapsed: f32) -> f32 {
        ease_out_cubic(elapsed / self.config.warmup_secs)
    }

    pub fn bob(&self, elapsed: f32) -> f32 {
        if self.reduced_motion {
            return 0.0;
        }
        self.config
            .bob
            .iter()
            .map(|&(speed, amp)| (elapsed * speed).sin() * amp)
            .sum()
    }

    fn noise_wander(&self, p: &OrbParticle, elapsed: f32) -> f32 {
        if self.reduced_motion {
            return 0.0;
        }
        let drift = elapsed * self.config.noise_speed;
        let a = p.base_angle * 0.1;
        let nx = noise(drift + p.noise_phase, a) * 0.1;
        let ny = noise(a, drift + p.noise_phase * 0.5) * 0.1;
        (nx + ny) * (self.config.noise_strength * 0.5) * self.warmup(elapsed)
    }

    /// Outward scatter offset for the timed states, 0 otherwise.
    pub fn scatter_amount(&self, state: TransitionState, progress: f32) -> f32 {
        let d = self.config.scatter_distance;
        match state {
            TransitionState::Scattering => d * ease_out_cubic(progress),
            TransitionState::Reforming => d * (1.0 - smootherstep(progress)),
            TransitionState::Idle | TransitionState::Hovered => 0.0,
        }
    }

    /// Target `(radial, angular)` offsets from the particle's baseline.
    fn target_offsets(&self, p: &OrbParticle, elapsed: f32, machine: &TransitionMachine) -> (f32, f32) {
        match machine.state() {
            TransitionState::Idle => (self.noise_wander(p, elapsed), 0.0),
            TransitionState::Hovered => (self.config.hover_offset, 0.0),
            state @ (TransitionState::Scattering | TransitionState::Reforming) => {
                let amount = self.scatter_amount(state, machine.progress(elapsed));
                let frac = if self.config.scatter_distance > 0.0 {
                    amount / self.config.scatter_distance
                } else {
                    0.0
                };
                let ripple = self.config.scatter_ripple * frac * (p.base_angle * 3.0).sin();
                (amount + ripple, amount * self.config.scatter_angle_gain)
            }
        }
    }

    fn baseline(&self, p: &OrbParticle, elapsed: f32) -> (f32, f32) {
        (
            p.base_radius * self.breathe(elapsed, p.breath_phase),
            p.base_angle + elapsed * p.orbit_speed,
        )
    }

    /// Absolute target `(radius, angle)` per particle at `elapsed`.
    pub fn targets(&self, elapsed: f32, machine: &TransitionMachine) -> Vec<(f32, f32)> {
        self.particles
            .iter()
            .map(|p| {
                let (r0, a0) = self.baseline(p, elapsed);
                let (dr, da) = self.target_offsets(p, elapsed, machine);
                (r0 + dr, a0 + da)
            })
            .collect()
    }

    /// Advance the springs by `time.dt` and compute the frame snapshot.
    /// Under reduced motion offsets jump straight to their targets.
    pub fn update(&mut self, time: FrameTime, machine: &TransitionMachine) -> OrbFrame {
        let FrameTime { elapsed, dt } = time;
        let (steps, h) = substeps(dt);
        let omega = self.config.spring_omega;
        let zeta = self.config.spring_damping_ratio;

        let offsets: Vec<(f32, f32)> = self
            .particles
            .iter()
            .map(|p| self.target_offsets(p, elapsed, machine))
            .collect();
        let baselines: Vec<(f32, f32)> = self.particles.iter().map(|p| self.baseline(p, elapsed)).collect();

        let reduced = self.reduced_motion;
        for ((p, &(dr, da)), &(r0, a0)) in self.particles.iter_mut().zip(&offsets).zip(&baselines) {
            if reduced {
                p.radial.snap(dr);
                p.angular.snap(da);
            } else {
                for _ in 0..steps {
                    p.radial.step(dr, omega, zeta, h);
                    p.angular.step_angle(da, omega, zeta, h);
                }
            }
            p.current_radius = (r0 + p.radial.value).max(0.0);
            p.current_angle = a0 + p.angular.value;
        }

        let bob = self.bob(elapsed);
        let center = self.config.center() + Vec2::new(0.0, bob);
        let (size, brightness) = (self.config.size, self.config.brightness);
        let particles = self
            .particles
            .iter()
            .map(|p| {
                let pulse = 1.0 + self.config.pulse_amount * (self.config.breath_speed * elapsed + p.breath_phase).sin();
                // The pulse may not push a particle past its configured range.
                OrbRecord {
                    pos: center + Vec2::from_angle(p.current_angle) * p.current_radius,
                    size: size.clamp(p.size * pulse),
                    brightness: brightness.clamp(p.brightness * pulse),
                }
            })
            .collect();

        OrbFrame {
            canvas_size: self.config.canvas_size,
            bob,
            particles,
        }
    }
}
