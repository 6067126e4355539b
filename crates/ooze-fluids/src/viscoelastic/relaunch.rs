use ndarray::azip;

use crate::params::ViscoelasticParams;

use super::ViscoelasticFluid;

impl ViscoelasticFluid {
    /// Throws settled fluid back up once it has spread over part of the floor.
    ///
    /// Particles falling onto the floor get the full launch speed; particles still falling
    /// above it get a share scaled by how far they are below the original fill height.
    pub fn apply_relaunch(&mut self, params: &ViscoelasticParams) {
        let Some(relaunch) = &params.relaunch else {
            return;
        };

        if !self.relaunch.advance(self.particles.len(), relaunch) {
            return;
        }

        let floor = params.container.min.y;
        let fill_height = params.fill.min.y - floor;
        let dv = self.relaunch.launch_speed(params.gravity, fill_height, relaunch);
        let ratio = relaunch.energy_loss_ratio;

        log::info!(
            "relaunching fluid at {dv:.3} (energy loss {})",
            self.relaunch.energy_loss(),
        );

        let store = &mut self.particles;

        azip!((v in &mut store.velocities, &p in &store.positions) {
            if v.y < 0.0 {
                if p.y <= floor {
                    v.y = dv;
                } else if fill_height > 0.0 {
                    v.y = dv * (1.0 - (p.y - floor) / fill_height) * ratio;
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use crate::viscoelastic::{tests::params, ViscoelasticFluid};

    /// Ten particles, two of them on the floor after collisions.
    fn settled() -> ViscoelasticFluid {
        let mut positions: Vec<_> = (0..8).map(|i| DVec3::new(1.0 + i as f64, 2.5, 2.0)).collect();
        positions.push(DVec3::new(1.0, -0.1, 2.0));
        positions.push(DVec3::new(2.0, -0.1, 2.0));

        let mut fluid = ViscoelasticFluid::from_positions(positions);
        for i in 0..10 {
            fluid.particles_mut().set_velocity(i, DVec3::new(0.0, -1.0, 0.0));
        }
        fluid
    }

    #[test]
    fn fires_when_part_of_the_fluid_is_grounded() {
        let params = params();
        let mut fluid = settled();

        fluid.resolve_collisions(&params);
        // Floor particles bounced upward, so only those still falling are relaunched.
        fluid.particles_mut().set_velocity(8, DVec3::new(0.0, -0.5, 0.0));
        fluid.apply_relaunch(&params);

        assert!(fluid.relaunch_state().fired());

        let relaunch = params.relaunch.unwrap();
        let dv = fluid.relaunch_state().launch_speed(params.gravity, params.fill.min.y, &relaunch);
        assert_eq!(fluid.particles().velocity(8).y, dv);
        assert!((fluid.particles().velocity(9).y - 0.9).abs() < 1e-12);

        let expected = dv * (1.0 - 2.5 / params.fill.min.y) * 0.9;
        assert!((fluid.particles().velocity(0).y - expected).abs() < 1e-12);
    }

    #[test]
    fn disabled_relaunch_leaves_velocities() {
        let mut params = params();
        params.relaunch = None;
        let mut fluid = settled();

        fluid.resolve_collisions(&params);
        fluid.apply_relaunch(&params);

        assert!(!fluid.relaunch_state().fired());
        assert_eq!(fluid.particles().velocity(0), DVec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn airborne_fluid_is_not_relaunched() {
        let params = params();
        let mut fluid = ViscoelasticFluid::from_positions(vec![DVec3::new(5.0, 50.0, 2.0); 4]);

        fluid.resolve_collisions(&params);
        fluid.apply_relaunch(&params);

        assert!(!fluid.relaunch_state().fired());
        assert_eq!(fluid.relaunch_state().energy_loss(), 1);
    }
}
