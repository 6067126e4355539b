use glam::DVec3;

use crate::params::ViscoelasticParams;

use super::ViscoelasticFluid;

impl ViscoelasticFluid {
    /// Double density relaxation.
    ///
    /// For each particle in turn, its density and near density are gathered from its
    /// neighbors and turned into pressure displacements. Neighbors are pushed immediately;
    /// the particle's own displacement is applied once all of its neighbors have been visited.
    pub fn relax_double_density(&mut self, params: &ViscoelasticParams) {
        let dt2 = params.time_step * params.time_step;
        let h = params.interaction_radius;

        let store = &mut self.particles;
        let n = store.len();

        for i in 0..n {
            let p = store.positions[i];

            let mut density = 0.0;
            let mut near_density = 0.0;

            for j in 0..n {
                if i == j {
                    continue;
                }

                let distance = store.positions[j].distance(p);
                if distance > h {
                    continue;
                }

                let q = distance / h;
                if q < 1.0 {
                    density += (1.0 - q) * (1.0 - q);
                    near_density += (1.0 - q) * (1.0 - q) * (1.0 - q);
                }
            }

            store.densities[i] = density;
            store.near_densities[i] = near_density;

            let pressure = params.stiffness * (density - params.rest_density);
            let near_pressure = params.near_stiffness * near_density;

            let mut dx = DVec3::ZERO;

            for j in 0..n {
                if i == j {
                    continue;
                }

                let delta = store.positions[j] - p;
                let distance = delta.length();

                // Coincident neighbors count toward density but cannot be pushed.
                if distance > h || distance == 0.0 {
                    continue;
                }

                let q = distance / h;
                if q < 1.0 {
                    let factor = dt2 * (pressure * (1.0 - q) + near_pressure * (1.0 - q) * (1.0 - q));
                    let displacement = factor * delta / distance;

                    store.positions[j] += displacement / 2.0;
                    dx -= displacement / 2.0;
                }
            }

            store.positions[i] += dx;
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::{
        params::ViscoelasticParams,
        viscoelastic::{tests::params, ViscoelasticFluid},
    };

    /// The pass on the x axis alone. With `in_place` unset every particle reads the positions
    /// from before the pass and all displacements land at the end.
    fn relax_on_x(x: &[f64], params: &ViscoelasticParams, in_place: bool) -> Vec<f64> {
        let dt2 = params.time_step * params.time_step;
        let h = params.interaction_radius;
        let n = x.len();
        let before = x.to_vec();
        let mut x = x.to_vec();
        let mut deferred = vec![0.0; n];

        for i in 0..n {
            let seen = if in_place { x.clone() } else { before.clone() };

            let mut density = 0.0;
            let mut near_density = 0.0;
            for j in (0..n).filter(|&j| j != i) {
                let q = (seen[j] - seen[i]).abs() / h;
                if q < 1.0 {
                    density += (1.0 - q) * (1.0 - q);
                    near_density += (1.0 - q) * (1.0 - q) * (1.0 - q);
                }
            }

            let pressure = params.stiffness * (density - params.rest_density);
            let near_pressure = params.near_stiffness * near_density;

            let mut dx = 0.0;
            for j in (0..n).filter(|&j| j != i) {
                let delta = seen[j] - seen[i];
                let distance = delta.abs();
                let q = distance / h;
                if distance == 0.0 || q >= 1.0 {
                    continue;
                }

                let factor = dt2 * (pressure * (1.0 - q) + near_pressure * (1.0 - q) * (1.0 - q));
                let displacement = factor * delta / distance;

                if in_place {
                    x[j] += displacement / 2.0;
                } else {
                    deferred[j] += displacement / 2.0;
                }
                dx -= displacement / 2.0;
            }

            if in_place {
                x[i] += dx;
            } else {
                deferred[i] += dx;
            }
        }

        if !in_place {
            for (x, d) in x.iter_mut().zip(deferred) {
                *x += d;
            }
        }

        x
    }

    #[test]
    fn neighbors_are_pushed_before_they_relax() {
        let mut params = params();
        params.time_step = 0.25;

        let x = [0.0, 1.0, 1.8];
        let mut fluid = ViscoelasticFluid::from_positions(x.iter().map(|&x| DVec3::new(x, 0.0, 0.0)).collect());

        fluid.relax_double_density(&params);

        let sequential = relax_on_x(&x, &params, true);
        let snapshot = relax_on_x(&x, &params, false);

        for i in 0..3 {
            let p = fluid.particles().position(i);
            assert!((p.x - sequential[i]).abs() < 1e-12);
            assert_eq!((p.y, p.z), (0.0, 0.0));
        }

        let gap = sequential.iter().zip(&snapshot).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max);
        assert!(gap > 1e-6);
    }

    #[test]
    fn isolated_particle_has_no_density() {
        let mut fluid = ViscoelasticFluid::from_positions(vec![DVec3::ONE, DVec3::new(10.0, 1.0, 1.0)]);

        fluid.relax_double_density(&params());

        let p = fluid.particles().get(0).unwrap();
        assert_eq!(p.density, 0.0);
        assert_eq!(p.near_density, 0.0);
        assert_eq!(p.position, DVec3::ONE);
    }

    #[test]
    fn close_pair_is_pushed_apart() {
        let a = DVec3::new(5.0, 5.0, 2.0);
        let b = DVec3::new(5.5, 5.0, 2.0);
        let mut fluid = ViscoelasticFluid::from_positions(vec![a, b]);

        fluid.relax_double_density(&params());

        let p0 = fluid.particles().get(0).unwrap();
        let q = 0.5 / 3.0;
        assert!((p0.density - (1.0 - q) * (1.0 - q)).abs() < 1e-12);
        assert!((p0.near_density - (1.0 - q) * (1.0 - q) * (1.0 - q)).abs() < 1e-12);

        let separation = fluid.particles().position(0).distance(fluid.particles().position(1));
        assert!(separation > 0.5);
    }

    #[test]
    fn coincident_pair_counts_density_without_nan() {
        let mut fluid = ViscoelasticFluid::from_positions(vec![DVec3::ONE, DVec3::ONE]);

        fluid.relax_double_density(&params());

        assert_eq!(fluid.particles().get(0).unwrap().density, 1.0);
        assert!(fluid.particles().is_finite());
    }

    #[test]
    fn densities_are_recomputed_each_pass() {
        let mut fluid = ViscoelasticFluid::from_positions(vec![DVec3::ZERO, DVec3::X]);
        let params = params();

        fluid.relax_double_density(&params);
        fluid.particles.positions[1] = DVec3::new(50.0, 0.0, 0.0);
        fluid.relax_double_density(&params);

        assert_eq!(fluid.particles().get(0).unwrap().density, 0.0);
    }
}
