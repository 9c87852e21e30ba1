use crate::color::{Rgb, color_of};
use crate::config::{FieldConfig, Integrator};
use crate::field::{Charge, field_at, magnitude};
use crate::seed::{ring_seeds, seeds_per_charge};
use glam::DVec2;

/// A polyline through the seed: backward half reversed, the seed, then the
/// forward half.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub points: Vec<DVec2>,
    pub seed_index: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldLine {
    pub trace: Trace,
    pub color: Rgb,
}

// unit field direction times `sign`, None where the field vanishes
fn direction(p: DVec2, charges: &[Charge], cfg: &FieldConfig, sign: f64) -> Option<DVec2> {
    let e = field_at(p, charges, cfg.k, cfg.softening);
    let m = magnitude(e);
    if m == 0.0 || !m.is_finite() {
        None
    } else {
        Some(e / m * sign)
    }
}

fn step(p: DVec2, charges: &[Charge], cfg: &FieldConfig, sign: f64) -> Option<DVec2> {
    let h = cfg.step_length;
    let f = |x: DVec2| direction(x, charges, cfg, sign);
    let k1 = f(p)?;
    let d = match cfg.integrator {
        Integrator::Euler => k1,
        Integrator::Midpoint => f(p + 0.5 * h * k1).unwrap_or(k1),
        Integrator::Rk4 => {
            let k2 = f(p + 0.5 * h * k1).unwrap_or(k1);
            let k3 = f(p + 0.5 * h * k2).unwrap_or(k2);
            let k4 = f(p + h * k3).unwrap_or(k3);
            (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0
        }
    };
    Some(p + h * d)
}

fn in_viewport(p: DVec2, cfg: &FieldConfig) -> bool {
    p.x >= 0.0 && p.x <= cfg.width && p.y >= 0.0 && p.y <= cfg.height
}

/// Integrates the normalized field from `seed` in both directions.
///
/// Each direction stops on an exactly vanishing field, when the next point
/// would leave the viewport, or after `max_steps` points.
pub fn trace_field_line(seed: DVec2, charges: &[Charge], cfg: &FieldConfig) -> Trace {
    let walk = |sign: f64| {
        let mut pts = Vec::new();
        let mut p = seed;
        for _ in 0..cfg.max_steps {
            let Some(next) = step(p, charges, cfg, sign) else {
                break;
            };
            if !in_viewport(next, cfg) {
                break;
            }
            pts.push(next);
            p = next;
        }
        pts
    };

    let back = walk(-1.0);
    let fwd = walk(1.0);

    let mut points = Vec::with_capacity(back.len() + 1 + fwd.len());
    points.extend(back.iter().rev());
    points.push(seed);
    points.extend_from_slice(&fwd);
    Trace {
        points,
        seed_index: back.len(),
    }
}

/// Traces every seed around every charge. Lines that never leave their
/// seed are dropped; each kept line is colored once from the field at its
/// seed against the frame's grid maximum.
pub fn trace_all(charges: &[Charge], max_magnitude: f64, cfg: &FieldConfig) -> Vec<FieldLine> {
    let mut lines = Vec::new();
    for c in charges {
        for seed in ring_seeds(c.pos, cfg.seed_radius, seeds_per_charge(c.q)) {
            let trace = trace_field_line(seed, charges, cfg);
            if trace.points.len() <= 1 {
                continue;
            }
            let m = magnitude(field_at(seed, charges, cfg.k, cfg.softening));
            lines.push(FieldLine {
                trace,
                color: color_of(m, max_magnitude, cfg.color_curve),
            });
        }
    }
    lines
}
