//! Scene configuration.
//!
//! Every tunable lives in one of the structs below, with `Default` impls
//! taken from `constants.rs`. Configs are validated once, when a field is
//! constructed; the simulation never re-checks them per tick.

use crate::constants::*;
use crate::error::ConfigError;
use crate::surface::Rgba;
use glam::Vec2;
use rand::Rng;

/// Closed `[min, max]` range used for sampling and clamping per-particle values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn from_pair(pair: (f32, f32)) -> Self {
        Self::new(pair.0, pair.1)
    }

    pub fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidBounds {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Clamp without panicking, even for a NaN input (maps to `min`).
    #[inline]
    pub fn clamp(&self, v: f32) -> f32 {
        if v.is_nan() {
            return self.min;
        }
        v.max(self.min).min(self.max)
    }

    #[inline]
    pub fn contains(&self, v: f32) -> bool {
        v >= self.min && v <= self.max
    }

    /// Uniform sample in the range. Degenerate ranges return `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        self.clamp(self.min + rng.gen::<f32>() * (self.max - self.min))
    }
}

/// One concentric radius band of the orb.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingBand {
    pub min: f32,
    pub max: f32,
}

/// Non-empty, strictly increasing, non-overlapping list of ring bands.
///
/// Adjacent bands may touch (`prev.max == next.min`) but not overlap.
#[derive(Clone, Debug, PartialEq)]
pub struct RingBands(Vec<RingBand>);

impl RingBands {
    pub fn new(bands: Vec<RingBand>) -> Result<Self, ConfigError> {
        if bands.is_empty() {
            return Err(ConfigError::NoRingBands);
        }
        for (index, band) in bands.iter().enumerate() {
            if !(band.min.is_finite() && band.max.is_finite()) || band.min < 0.0 || band.min >= band.max {
                return Err(ConfigError::InvertedBand {
                    index,
                    min: band.min,
                    max: band.max,
                });
            }
            if index > 0 {
                let prev_max = bands[index - 1].max;
                if band.min < prev_max {
                    return Err(ConfigError::OverlappingBands {
                        index,
                        min: band.min,
                        prev_max,
                    });
                }
            }
        }
        Ok(Self(bands))
    }

    pub fn as_slice(&self) -> &[RingBand] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Outer edge of the last band.
    pub fn outer_radius(&self) -> f32 {
        self.0.last().map(|b| b.max).unwrap_or(0.0)
    }
}

impl Default for RingBands {
    fn default() -> Self {
        Self(
            ORB_RING_BANDS
                .iter()
                .map(|&(min, max)| RingBand { min, max })
                .collect(),
        )
    }
}

/// Target population per viewport class. Negative values clamp to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PopulationCounts {
    pub wide: i32,
    pub narrow: i32,
    pub reduced: i32,
}

impl PopulationCounts {
    pub fn resolve(&self, viewport_width: f32, narrow_max_width: f32, reduced_motion: bool) -> usize {
        let n = if reduced_motion {
            self.reduced
        } else if viewport_width < narrow_max_width {
            self.narrow
        } else {
            self.wide
        };
        n.max(0) as usize
    }
}

/// Motion-preference dependent sizing, read once at mount.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionConfig {
    pub narrow_max_width: f32,
    pub stars: PopulationCounts,
    pub orb: PopulationCounts,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            narrow_max_width: NARROW_VIEWPORT_MAX_WIDTH,
            stars: PopulationCounts {
                wide: STAR_COUNT_WIDE,
                narrow: STAR_COUNT_NARROW,
                reduced: STAR_COUNT_REDUCED,
            },
            orb: PopulationCounts {
                wide: ORB_COUNT_WIDE,
                narrow: ORB_COUNT_NARROW,
                reduced: ORB_COUNT_REDUCED,
            },
        }
    }
}

/// A single drifting nebula blob. `anchor` is a fraction of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NebulaLayer {
    pub anchor: Vec2,
    pub speed: f32,
    pub color: Rgba,
}

/// The three layers of the ambient nebula.
pub fn default_nebula() -> [NebulaLayer; 3] {
    [
        NebulaLayer {
            anchor: Vec2::new(0.2, 0.3),
            speed: 0.04,
            color: Rgba::from_rgb8(38, 13, 77, 0.08),
        },
        NebulaLayer {
            anchor: Vec2::new(0.7, 0.6),
            speed: 0.06,
            color: Rgba::from_rgb8(13, 26, 64, 0.04),
        },
        NebulaLayer {
            anchor: Vec2::new(0.5, 0.2),
            speed: 0.08,
            color: Rgba::from_rgb8(38, 13, 77, 0.06),
        },
    ]
}

#[derive(Clone, Debug, PartialEq)]
pub struct StarfieldConfig {
    pub size: Bounds,
    pub brightness: Bounds,
    pub pulse_speed: Bounds,
    pub drift_speed: Bounds,
    pub hue: Bounds,
    pub reveal_delay_max: f32,
    pub reveal_duration: f32,
    pub drift_amplitude: f32,
    pub repel_radius: f32,
    pub repel_strength: f32,
    pub link_max_distance: f32,
    pub link_max_per_star: usize,
    pub link_fade_delay: f32,
    pub link_fade_duration: f32,
    pub nebula: [NebulaLayer; 3],
    pub background: Rgba,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            size: Bounds::from_pair(STAR_SIZE),
            brightness: Bounds::from_pair(STAR_BRIGHTNESS),
            pulse_speed: Bounds::from_pair(STAR_PULSE_SPEED),
            drift_speed: Bounds::from_pair(STAR_DRIFT_SPEED),
            hue: Bounds::from_pair(STAR_HUE),
            reveal_delay_max: STAR_REVEAL_DELAY_MAX,
            reveal_duration: STAR_REVEAL_DURATION,
            drift_amplitude: STAR_DRIFT_AMPLITUDE,
            repel_radius: REPEL_RADIUS,
            repel_strength: REPEL_STRENGTH,
            link_max_distance: LINK_MAX_DISTANCE,
            link_max_per_star: LINK_MAX_PER_STAR,
            link_fade_delay: LINK_FADE_DELAY,
            link_fade_duration: LINK_FADE_DURATION,
            nebula: default_nebula(),
            background: Rgba::BLACK,
        }
    }
}

impl StarfieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.size.validate("size")?;
        self.brightness.validate("brightness")?;
        self.pulse_speed.validate("pulse_speed")?;
        self.drift_speed.validate("drift_speed")?;
        self.hue.validate("hue")?;
        positive("reveal_duration", self.reveal_duration)?;
        positive("link_fade_duration", self.link_fade_duration)?;
        if !(self.reveal_delay_max.is_finite() && self.reveal_delay_max >= 0.0) {
            return Err(ConfigError::InvalidBounds {
                name: "reveal_delay",
                min: 0.0,
                max: self.reveal_delay_max,
            });
        }
        Ok(())
    }

    /// Elapsed time at which every reveal and link fade has completed.
    pub fn settled_elapsed(&self) -> f32 {
        (self.reveal_delay_max + self.reveal_duration)
            .max(self.link_fade_delay + self.link_fade_duration)
            .max(SETTLED_MIN_SECS)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrbConfig {
    pub canvas_size: f32,
    pub bands: RingBands,
    pub size: Bounds,
    pub brightness: Bounds,
    pub orbit_speed: Bounds,
    pub angle_jitter: f32,
    pub breath_amplitude: f32,
    pub breath_speed: f32,
    pub pulse_amount: f32,
    pub hover_offset: f32,
    pub scatter_distance: f32,
    pub scatter_ripple: f32,
    pub scatter_angle_gain: f32,
    pub scatter_out_secs: f32,
    pub reform_secs: f32,
    pub noise_strength: f32,
    pub noise_speed: f32,
    pub warmup_secs: f32,
    pub spring_omega: f32,
    pub spring_damping_ratio: f32,
    /// Vertical bob as `(angular speed, amplitude)` sinusoids.
    pub bob: [(f32, f32); 2],
}

impl Default for OrbConfig {
    fn default() -> Self {
        Self {
            canvas_size: ORB_CANVAS_SIZE,
            bands: RingBands::default(),
            size: Bounds::from_pair(ORB_SIZE),
            brightness: Bounds::from_pair(ORB_BRIGHTNESS),
            orbit_speed: Bounds::from_pair(ORB_ORBIT_SPEED),
            angle_jitter: ORB_ANGLE_JITTER,
            breath_amplitude: BREATH_AMPLITUDE,
            breath_speed: BREATH_SPEED,
            pulse_amount: ORB_PULSE_AMOUNT,
            hover_offset: HOVER_OFFSET,
            scatter_distance: SCATTER_DISTANCE,
            scatter_ripple: SCATTER_RIPPLE,
            scatter_angle_gain: SCATTER_ANGLE_GAIN,
            scatter_out_secs: SCATTER_OUT_SECS,
            reform_secs: REFORM_SECS,
            noise_strength: NOISE_STRENGTH,
            noise_speed: NOISE_SPEED,
            warmup_secs: WARMUP_SECS,
            spring_omega: SPRING_OMEGA,
            spring_damping_ratio: SPRING_DAMPING_RATIO,
            bob: [BOB_PRIMARY, BOB_SECONDARY],
        }
    }
}

impl OrbConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Re-run band validation in case the bands were assembled by hand.
        RingBands::new(self.bands.as_slice().to_vec())?;
        self.size.validate("size")?;
        self.brightness.validate("brightness")?;
        self.orbit_speed.validate("orbit_speed")?;
        positive("scatter_out_secs", self.scatter_out_secs)?;
        positive("reform_secs", self.reform_secs)?;
        positive("warmup_secs", self.warmup_secs)?;
        positive("spring_omega", self.spring_omega)?;
        positive("spring_damping_ratio", self.spring_damping_ratio)?;
        Ok(())
    }

    /// Warm-up is the only timeline the orb has to resolve before settling.
    pub fn settled_elapsed(&self) -> f32 {
        self.warmup_secs.max(SETTLED_MIN_SECS)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::splat(self.canvas_size * 0.5)
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}
