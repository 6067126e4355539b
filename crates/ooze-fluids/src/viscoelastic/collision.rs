use ndarray::azip;

use crate::params::ViscoelasticParams;

use super::ViscoelasticFluid;

impl ViscoelasticFluid {
    /// Keeps particles inside the container, reflecting and damping their velocity on
    /// every face they cross.
    ///
    /// Particles on or below the floor are clamped exactly onto it and counted as floor
    /// contacts. On the other faces the particle is placed back inside by one step of its
    /// reflected velocity. The far `z` face is open.
    pub fn resolve_collisions(&mut self, params: &ViscoelasticParams) {
        let dt = params.time_step;
        let e = params.restitution;
        let min = params.container.min;
        let max = params.container.max;

        let relaunch = &mut self.relaunch;
        relaunch.begin_step();

        let store = &mut self.particles;

        azip!((p in &mut store.positions, v in &mut store.velocities) {
            if p.x < min.x {
                v.x *= -e;
                p.x = (min.x + v.x.abs() * dt).min(max.x);
            } else if p.x > max.x {
                v.x *= -e;
                p.x = (max.x - v.x.abs() * dt).max(min.x);
            }

            if p.y <= min.y {
                v.y *= -e;
                p.y = min.y;
                relaunch.touch_floor();
            } else if p.y > max.y {
                v.y *= -e;
                p.y = (max.y - v.y.abs() * dt).max(min.y);
            }

            if p.z < min.z {
                v.z *= -e;
                p.z = min.z + v.z.abs() * dt;
            }
        });
    }
}
