use crate::color::{Rgb, color_of};
use crate::config::FieldConfig;
use crate::grid::FieldSample;
use glam::DVec2;
use std::f64::consts::FRAC_PI_6;

/// Fixed-length arrow: direction from the field, magnitude only via color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
    pub tail: DVec2,
    pub tip: DVec2,
    pub head: [DVec2; 3],
    pub color: Rgb,
}

pub fn arrow_for(sample: &FieldSample, max_magnitude: f64, cfg: &FieldConfig) -> Option<Arrow> {
    if sample.magnitude == 0.0 {
        return None;
    }
    let shaft = sample.e / sample.magnitude * cfg.arrow_length;
    let tip = sample.pos + shaft;
    let angle = shaft.y.atan2(shaft.x);
    let s = cfg.arrow_head;
    let left = tip - s * DVec2::new((angle - FRAC_PI_6).cos(), (angle - FRAC_PI_6).sin());
    let right = tip - s * DVec2::new((angle + FRAC_PI_6).cos(), (angle + FRAC_PI_6).sin());

    Some(Arrow {
        tail: sample.pos,
        tip,
        head: [tip, left, right],
        color: color_of(sample.magnitude, max_magnitude, cfg.color_curve),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(e: DVec2) -> FieldSample {
        FieldSample {
            pos: DVec2::new(50.0, 50.0),
            e,
            magnitude: e.length(),
        }
    }

    #[test]
    fn zero_field_draws_nothing() {
        assert!(arrow_for(&sample(DVec2::ZERO), 1.0, &FieldConfig::default()).is_none());
    }

    #[test]
    fn length_is_fixed_regardless_of_magnitude() {
        let cfg = FieldConfig::default();
        for e in [DVec2::new(1e-9, 0.0), DVec2::new(3.0, 4.0), DVec2::new(-1e6, 2e6)] {
            let a = arrow_for(&sample(e), 1.0, &cfg).expect("nonzero field");
            assert!(((a.tip - a.tail).length() - cfg.arrow_length).abs() < 1e-9);
            assert!((a.tip - a.tail).normalize().dot(e.normalize()) > 1.0 - 1e-12);
        }
    }

    #[test]
    fn head_straddles_the_shaft() {
        let cfg = FieldConfig::default();
        let a = arrow_for(&sample(DVec2::new(1.0, 0.0)), 1.0, &cfg).expect("nonzero field");
        assert_eq!(a.head[0], a.tip);
        let back = cfg.arrow_head * FRAC_PI_6.cos();
        let side = cfg.arrow_head * FRAC_PI_6.sin();
        assert!((a.head[1] - (a.tip + DVec2::new(-back, side))).length() < 1e-9);
        assert!((a.head[2] - (a.tip + DVec2::new(-back, -side))).length() < 1e-9);
    }
}
