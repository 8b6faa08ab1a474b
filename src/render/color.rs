use crate::foundation::math::mul_div255_u16;

/// Color in the cylindrical HSB model with straight alpha.
///
/// Ranges: `h` in degrees (wrapped into `[0, 360)`), `s` and `b` in `[0, 100]`, `a` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsba {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation, 0..=100.
    pub s: f64,
    /// Brightness, 0..=100.
    pub b: f64,
    /// Alpha, 0..=1.
    pub a: f64,
}

impl Hsba {
    /// Build a color from its components.
    pub const fn new(h: f64, s: f64, b: f64, a: f64) -> Self {
        Self { h, s, b, a }
    }

    /// Opaque white.
    pub const fn white() -> Self {
        Self::new(0.0, 0.0, 100.0, 1.0)
    }

    /// Convert to straight-alpha RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        let h = if self.h.is_finite() {
            self.h.rem_euclid(360.0)
        } else {
            0.0
        };
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let v = (self.b / 100.0).clamp(0.0, 1.0);

        let c = v * s;
        let hp = h / 60.0;
        let x = c * (1.0 - (hp.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match hp as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = v - c;

        [to_u8(r1 + m), to_u8(g1 + m), to_u8(b1 + m), to_u8(self.a)]
    }

    /// Convert to premultiplied RGBA8.
    pub fn to_rgba8_premul(self) -> [u8; 4] {
        let [r, g, b, a] = self.to_rgba8();
        let a16 = u16::from(a);
        let premul = |c: u8| mul_div255_u16(u16::from(c), a16) as u8;
        [premul(r), premul(g), premul(b), a]
    }
}
