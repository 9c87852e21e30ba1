use crate::field::{Charge, field_at, magnitude};
use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSample {
    pub pos: DVec2,
    pub e: DVec2,
    pub magnitude: f64,
}

/// One frame's worth of lattice samples plus the frame-global maximum
/// magnitude used to normalize colors.
#[derive(Clone, Debug, Default)]
pub struct FieldGrid {
    pub samples: Vec<FieldSample>, // column-major: x outer, y inner
    pub max_magnitude: f64,
}

// nodes at 0, spacing, 2*spacing, ... strictly below `extent`
fn axis_nodes(extent: f64, spacing: f64) -> usize {
    if extent <= 0.0 || spacing <= 0.0 {
        return 0;
    }
    (extent / spacing).ceil() as usize
}

/// Evaluates the field on a regular lattice anchored at the origin, tracking
/// the maximum magnitude in the same pass.
pub fn sample_grid(
    charges: &[Charge],
    width: f64,
    height: f64,
    spacing: f64,
    k: f64,
    softening: f64,
) -> FieldGrid {
    let cols = axis_nodes(width, spacing);
    let rows = axis_nodes(height, spacing);
    let mut samples = Vec::with_capacity(cols * rows);
    let mut max_magnitude = 0.0f64;

    for ix in 0..cols {
        let x = ix as f64 * spacing;
        for jy in 0..rows {
            let y = jy as f64 * spacing;
            let pos = DVec2::new(x, y);
            let e = field_at(pos, charges, k, softening);
            let m = magnitude(e);
            if m > max_magnitude {
                max_magnitude = m;
            }
            samples.push(FieldSample {
                pos,
                e,
                magnitude: m,
            });
        }
    }

    FieldGrid {
        samples,
        max_magnitude,
    }
}
