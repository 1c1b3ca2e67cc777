//! Drawing surface abstraction.
//!
//! The renderer only needs five primitives, so any 2D backend (a browser
//! canvas, a software rasterizer, a test recorder) can host the effects.

use glam::Vec2;
use smallvec::SmallVec;

/// Straight (non-premultiplied) color, all channels in 0..1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }

    pub const fn white(a: f32) -> Self {
        Self::new(1.0, 1.0, 1.0, a)
    }

    /// HSL to RGB, hue in turns (0..1), saturation and lightness in 0..1.
    pub fn from_hsla(h: f32, s: f32, l: f32, a: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let hp = h * 6.0;
        let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c * 0.5;
        Self::new(r1 + m, g1 + m, b1 + m, a)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS `rgba(...)` form, alpha clamped to 0..1.
    pub fn to_css(&self) -> String {
        let ch = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({},{},{},{:.4})",
            ch(self.r),
            ch(self.g),
            ch(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of half-width `radius` around `center`.
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Radial gradient from `center` (radius 0) out to `radius`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub center: Vec2,
    pub radius: f32,
    pub stops: SmallVec<[ColorStop; 3]>,
}

impl RadialGradient {
    pub fn new(center: Vec2, radius: f32, stops: &[(f32, Rgba)]) -> Self {
        Self {
            center,
            radius,
            stops: stops
                .iter()
                .map(|&(offset, color)| ColorStop { offset, color })
                .collect(),
        }
    }

    /// Zero, negative or non-finite geometry paints nothing; callers skip it.
    pub fn is_drawable(&self) -> bool {
        self.radius.is_finite() && self.radius > 0.0 && self.center.is_finite()
    }

    /// Square that fully contains the gradient.
    pub fn bounds(&self) -> Rect {
        Rect::around(self.center, self.radius)
    }
}

pub trait DrawingSurface {
    /// Reset every pixel to transparent.
    fn clear(&mut self);
    fn fill_opaque_rect(&mut self, color: Rgba, rect: Rect);
    fn fill_with_gradient(&mut self, gradient: &RadialGradient, rect: Rect);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);
    /// Backing-store resize. Surfaces without their own storage ignore it.
    fn set_size(&mut self, _width: f32, _height: f32) {}
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect { color: Rgba, rect: Rect },
    FillGradient { gradient: RadialGradient, rect: Rect },
    StrokeLine { from: Vec2, to: Vec2, color: Rgba, width: f32 },
    Resize { width: f32, height: f32 },
}

/// Surface that records commands instead of painting; used for headless
/// frames and for asserting draw order.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2, Rgba)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokeLine { from, to, color, .. } => Some((*from, *to, *color)),
            _ => None,
        })
    }

    pub fn gradients(&self) -> impl Iterator<Item = &RadialGradient> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillGradient { gradient, .. } => Some(gradient),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_opaque_rect(&mut self, color: Rgba, rect: Rect) {
        self.commands.push(DrawCommand::FillRect { color, rect });
    }

    fn fill_with_gradient(&mut self, gradient: &RadialGradient, rect: Rect) {
        self.commands.push(DrawCommand::FillGradient {
            gradient: gradient.clone(),
            rect,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            color,
            width,
        });
    }

    fn set_size(&mut self, width: f32, height: f32) {
        self.commands.push(DrawCommand::Resize { width, height });
    }
}
