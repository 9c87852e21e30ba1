use glam::DVec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Charge {
    pub pos: DVec2,
    pub q: f64,
}

impl Charge {
    pub fn new(x: f64, y: f64, q: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            q,
        }
    }
}

/// Ordered charges. A charge's identity is its index; hit-testing walks in
/// insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChargeSet {
    charges: Vec<Charge>,
}

impl ChargeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    pub fn as_slice(&self) -> &[Charge] {
        &self.charges
    }

    pub fn get(&self, idx: usize) -> Option<&Charge> {
        self.charges.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Charge> {
        self.charges.get_mut(idx)
    }

    pub fn add(&mut self, charge: Charge) {
        self.charges.push(charge);
    }

    pub fn remove(&mut self, idx: usize) -> Option<Charge> {
        (idx < self.charges.len()).then(|| self.charges.remove(idx))
    }

    pub fn clear(&mut self) {
        self.charges.clear();
    }

    /// First charge (in order) strictly closer than `radius` to `p`.
    pub fn hit_test(&self, p: DVec2, radius: f64) -> Option<usize> {
        let r2 = radius * radius;
        self.charges
            .iter()
            .position(|c| c.pos.distance_squared(p) < r2)
    }

    /// Strictly nearest charge with squared distance below `radius²`.
    /// Exact ties keep the earlier index.
    pub fn nearest_within(&self, p: DVec2, radius: f64) -> Option<usize> {
        let mut best = radius * radius;
        let mut nearest = None;
        for (i, c) in self.charges.iter().enumerate() {
            let d = c.pos.distance_squared(p);
            if d < best {
                best = d;
                nearest = Some(i);
            }
        }
        nearest
    }
}

impl From<Vec<Charge>> for ChargeSet {
    fn from(charges: Vec<Charge>) -> Self {
        Self { charges }
    }
}

/// Softened Coulomb superposition at `p`: sum of `k q d / (|d|² + s²)^(3/2)`.
#[inline]
pub fn field_at(p: DVec2, charges: &[Charge], k: f64, softening: f64) -> DVec2 {
    let soft2 = softening * softening;
    let mut e = DVec2::ZERO;
    for c in charges {
        let d = p - c.pos;
        let r2 = d.length_squared() + soft2;
        let r = r2.sqrt();
        e += (k * c.q / (r2 * r)) * d;
    }
    e
}

#[inline]
pub fn magnitude(e: DVec2) -> f64 {
    (e.x * e.x + e.y * e.y).sqrt()
}
