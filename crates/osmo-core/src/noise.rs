//! Hashed-lattice value noise.

/// Pseudo-random value in `[-1, 1)` for an integer lattice corner.
///
/// Sine hash evaluated in f64 so large lattice coordinates keep their
/// fractional bits; same corner, same value, on every platform.
#[inline]
pub fn lattice_hash(ix: f64, iy: f64) -> f32 {
    let n = (ix * 12.9898 + iy * 78.233).sin() * 43_758.545_3;
    ((n - n.floor()) * 2.0 - 1.0) as f32
}

/// Smoothstep fade `3f² − 2f³`.
#[inline]
pub fn fade(f: f32) -> f32 {
    f * f * (3.0 - 2.0 * f)
}

/// 2D value noise in `[-1, 1]`, continuous with continuous first derivative.
///
/// Non-finite inputs return 0 rather than poisoning particle positions.
pub fn noise(x: f32, y: f32) -> f32 {
    if !(x.is_finite() && y.is_finite()) {
        return 0.0;
    }
    let ix = x.floor();
    let iy = y.floor();
    let u = fade(x - ix);
    let v = fade(y - iy);
    let (ix, iy) = (ix as f64, iy as f64);

    let a = lattice_hash(ix, iy);
    let b = lattice_hash(ix + 1.0, iy);
    let c = lattice_hash(ix, iy + 1.0);
    let d = lattice_hash(ix + 1.0, iy + 1.0);

    let top = a + (b - a) * u;
    let bottom = c + (d - c) * u;
    (top + (bottom - top) * v).clamp(-1.0, 1.0)
}
