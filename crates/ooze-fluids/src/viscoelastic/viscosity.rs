use crate::params::ViscoelasticParams;

use super::ViscoelasticFluid;

impl ViscoelasticFluid {
    /// Applies pairwise viscosity impulses to particles that are approaching each other.
    ///
    /// The impulse is split evenly between the two particles of a pair, so momentum is
    /// conserved pair by pair. Velocities are updated in place as pairs are visited.
    pub fn apply_viscosity(&mut self, params: &ViscoelasticParams) {
        let dt = params.time_step;
        let h = params.interaction_radius;
        let sigma = params.viscosity_sigma;
        let beta = params.viscosity_beta;

        let store = &mut self.particles;
        let n = store.len();

        for i in 0..n {
            for j in i + 1..n {
                let delta = store.positions[j] - store.positions[i];
                let distance = delta.length();

                // Coincident particles have no separation direction.
                if distance > h || distance == 0.0 {
                    continue;
                }

                let q = distance / h;
                if q >= 1.0 {
                    continue;
                }

                // Inward radial velocity.
                let u = ((store.velocities[i] - store.velocities[j]) * delta / distance).element_sum();
                if u > 0.0 {
                    let factor = dt * (1.0 - q) * (sigma * u + beta * u * u);
                    let impulse = factor * delta / distance;

                    store.velocities[i] -= impulse * 0.5;
                    store.velocities[j] += impulse * 0.5;
                }
            }
        }
    }
}
