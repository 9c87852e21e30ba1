#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `rgb(r, g, b)` for canvas fill/stroke styles.
    pub fn css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

pub const BACKGROUND: Rgb = Rgb::new(30, 30, 40);
pub const TEXT: Rgb = Rgb::new(255, 255, 255);
pub const POSITIVE: Rgb = Rgb::new(255, 60, 60);
pub const NEGATIVE: Rgb = Rgb::new(60, 120, 255);
/// Drawn when there is no field anywhere to normalize against.
pub const INERT: Rgb = Rgb::new(0, 0, 255);

pub fn charge_color(q: f64) -> Rgb {
    if q > 0.0 { POSITIVE } else { NEGATIVE }
}

// 255 * x truncated, x expected in [0, 1]
#[inline]
fn channel(x: f64) -> u8 {
    (255.0 * x.clamp(0.0, 1.0)) as u8
}

/// Blue → cyan → yellow → red by `magnitude / max_magnitude`.
///
/// Color scaling is frame-global: callers pass the same `max_magnitude` for
/// everything drawn in a frame. Band edges sit at 0.33 and 0.66.
pub fn color_of(magnitude: f64, max_magnitude: f64, curve: Option<f64>) -> Rgb {
    if max_magnitude <= 0.0 {
        return INERT;
    }
    let mut t = (magnitude / max_magnitude).clamp(0.0, 1.0);
    if let Some(p) = curve {
        t = t.powf(p);
    }

    if t < 0.33 {
        Rgb::new(0, channel(t / 0.33), 255)
    } else if t < 0.66 {
        let s = (t - 0.33) / 0.33;
        Rgb::new(channel(s), 255, channel(1.0 - s))
    } else {
        Rgb::new(255, channel(1.0 - (t - 0.66) / 0.34), 0)
    }
}
