use glam::DVec3;
use ndarray::Array1;

/// Snapshot of a single particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub index: usize,
    pub prev_position: DVec3,
    pub position: DVec3,
    pub velocity: DVec3,
    pub density: f64,
    pub near_density: f64,
}

/// Particle state, stored column-wise. The index of a particle never changes.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    /// Positions before the current step's prediction.
    pub(crate) prev_positions: Array1<DVec3>,
    /// Predicted positions. These are the authoritative positions once a step completes.
    pub(crate) positions: Array1<DVec3>,
    pub(crate) velocities: Array1<DVec3>,
    pub(crate) densities: Array1<f64>,
    pub(crate) near_densities: Array1<f64>,
}

impl ParticleStore {
    /// Creates a store with one resting particle at each position.
    pub fn from_positions(positions: Vec<DVec3>) -> Self {
        let n = positions.len();

        Self {
            prev_positions: Array1::from_vec(positions.clone()),
            positions: Array1::from_vec(positions),
            velocities: Array1::from_elem(n, DVec3::ZERO),
            densities: Array1::from_elem(n, 0.0),
            near_densities: Array1::from_elem(n, 0.0),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<Particle> {
        if i >= self.len() {
            return None;
        }

        Some(Particle {
            index: i,
            prev_position: self.prev_positions[i],
            position: self.positions[i],
            velocity: self.velocities[i],
            density: self.densities[i],
            near_density: self.near_densities[i],
        })
    }

    pub fn position(&self, i: usize) -> DVec3 {
        self.positions[i]
    }

    pub fn velocity(&self, i: usize) -> DVec3 {
        self.velocities[i]
    }

    pub fn set_velocity(&mut self, i: usize, v: DVec3) {
        self.velocities[i] = v;
    }

    pub fn iter(&self) -> impl Iterator<Item = Particle> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = &DVec3> {
        self.positions.iter()
    }

    pub fn iter_velocities(&self) -> impl Iterator<Item = &DVec3> {
        self.velocities.iter()
    }

    /// Whether every position and velocity is finite.
    pub fn is_finite(&self) -> bool {
        self.positions.iter().all(|p| p.is_finite()) && self.velocities.iter().all(|v| v.is_finite())
    }
}
