use glam::DVec2;
use std::f64::consts::TAU;

/// Stronger charges emit more lines: `10 + 4|q|`, truncated.
pub fn seeds_per_charge(q: f64) -> usize {
    (10.0 + 4.0 * q.abs()) as usize
}

pub fn ring_seeds(center: DVec2, radius: f64, n: usize) -> impl Iterator<Item = DVec2> {
    // evenly spaced, first seed on +x
    (0..n).map(move |i| {
        let angle = TAU * i as f64 / n as f64;
        center + radius * DVec2::new(angle.cos(), angle.sin())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_charge_emits_fourteen() {
        assert_eq!(seeds_per_charge(1.0), 14);
        assert_eq!(seeds_per_charge(-1.0), 14);
        assert_eq!(seeds_per_charge(10.0), 50);
        assert_eq!(seeds_per_charge(0.0), 10);
    }

    #[test]
    fn seeds_lie_on_the_ring() {
        let c = DVec2::new(40.0, -3.0);
        let seeds: Vec<_> = ring_seeds(c, 12.0, 14).collect();
        assert_eq!(seeds.len(), 14);
        assert!((seeds[0] - DVec2::new(52.0, -3.0)).length() < 1e-12);
        for s in &seeds {
            assert!((s.distance(c) - 12.0).abs() < 1e-9);
        }
    }
}
