use crate::{
    params::{SpringRule, ViscoelasticParams},
    springs::ABSENT,
};

use super::ViscoelasticFluid;

impl ViscoelasticFluid {
    /// Adds, ages and removes springs, then lets the surviving springs displace their
    /// endpoints.
    pub fn adjust_springs(&mut self, params: &ViscoelasticParams) {
        self.age_springs(params);

        let pruned = self.springs.prune(params.interaction_radius);
        if pruned > 0 {
            log::trace!("pruned {pruned} springs");
        }

        self.displace_by_springs(params);
    }

    fn age_springs(&mut self, params: &ViscoelasticParams) {
        let dt = params.time_step;
        let h = params.interaction_radius;
        let rest = params.spring_rest_length;
        let rate = dt * params.plasticity;

        let n = self.particles.len();

        for i in 0..n {
            for j in i + 1..n {
                let delta = self.particles.positions[j] - self.particles.positions[i];
                let distance = delta.length();

                if distance > h || distance / h >= 1.0 {
                    continue;
                }

                let existing = self.springs.rest_length(i, j);
                let mut l = match params.spring_rule {
                    SpringRule::Reference if existing == ABSENT => ABSENT,
                    SpringRule::Reference => h,
                    SpringRule::Corrected if existing == ABSENT => h,
                    SpringRule::Corrected => existing,
                };

                // Tolerable deformation.
                let d = params.yield_ratio * l;

                if distance > rest + d {
                    l += rate * (distance - rest - d);
                } else if distance < rest - d {
                    l -= rate * (rest - d - distance);
                }

                if l == ABSENT {
                    self.springs.remove(i, j);
                } else {
                    self.springs.insert(i, j, l);
                }
            }
        }
    }

    fn displace_by_springs(&mut self, params: &ViscoelasticParams) {
        let dt = params.time_step;
        let h = params.interaction_radius;
        let k = params.spring_stiffness;

        let store = &mut self.particles;

        for ((i, j), l) in self.springs.sorted() {
            let delta = store.positions[j] - store.positions[i];
            let distance = delta.length();

            if distance > h || distance == 0.0 {
                continue;
            }

            let factor = dt * dt * k * (1.0 - l / h) * (l - distance);
            let displacement = factor * delta / distance;

            store.positions[i] -= displacement * 0.5;
            store.positions[j] += displacement * 0.5;
        }
    }
}
