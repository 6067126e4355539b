//! Particle-based viscoelastic fluid after Clavet, Beaudoin and Poulin (2005).
//!
//! Every pass runs over all particles (or all particle pairs) before the next one starts.
//! Pairwise passes update the store in place while iterating, so later pairs observe the
//! writes of earlier pairs within the same pass.

use glam::DVec3;
use ndarray::azip;

use crate::{
    lattice::{fill_lattice, InitError},
    params::ViscoelasticParams,
    particles::{Particle, ParticleStore},
    relaunch::RelaunchState,
    springs::SpringGraph,
    Fluid,
};

mod collision;
mod plasticity;
mod relaunch;
mod relaxation;
mod viscosity;

#[derive(Debug, Clone)]
pub struct ViscoelasticFluid {
    particles: ParticleStore,
    springs: SpringGraph,
    relaunch: RelaunchState,
}

impl ViscoelasticFluid {
    /// Fills the configured fill volume with `params.particle_count` resting particles.
    pub fn new(params: &ViscoelasticParams) -> Result<Self, InitError> {
        params.validate()?;

        let positions = fill_lattice(&params.fill, params.particle_radius, params.particle_count)?;

        log::info!(
            "placed {} particles in [{}, {}]",
            positions.len(),
            params.fill.min,
            params.fill.max,
        );

        Ok(Self::from_positions(positions))
    }

    /// Creates a fluid with resting particles at the given positions and no springs.
    pub fn from_positions(positions: Vec<DVec3>) -> Self {
        Self {
            particles: ParticleStore::from_positions(positions),
            springs: SpringGraph::new(),
            relaunch: RelaunchState::new(),
        }
    }

    #[inline(always)]
    pub fn particles(&self) -> &ParticleStore {
        &self.particles
    }

    #[inline(always)]
    pub fn particles_mut(&mut self) -> &mut ParticleStore {
        &mut self.particles
    }

    #[inline(always)]
    pub fn springs(&self) -> &SpringGraph {
        &self.springs
    }

    #[inline(always)]
    pub fn relaunch_state(&self) -> &RelaunchState {
        &self.relaunch
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = &DVec3> {
        self.particles.iter_positions()
    }

    pub fn iter_particles(&self) -> impl Iterator<Item = Particle> + '_ {
        self.particles.iter()
    }

    /// `v.y -= dt * g` for every particle.
    pub fn apply_gravity(&mut self, params: &ViscoelasticParams) {
        let dv = params.time_step * params.gravity;
        self.particles.velocities.map_inplace(|v| v.y -= dv);
    }

    /// Saves the current positions and advances them by one step of velocity.
    pub fn advance_positions(&mut self, params: &ViscoelasticParams) {
        let dt = params.time_step;
        let store = &mut self.particles;

        azip!((prev in &mut store.prev_positions, p in &mut store.positions, &v in &store.velocities) {
            *prev = *p;
            *p += dt * v;
        });
    }

    /// Recovers velocities from the displacement made during this step.
    pub fn reconstruct_velocities(&mut self, params: &ViscoelasticParams) {
        let dt = params.time_step;
        let store = &mut self.particles;

        azip!((v in &mut store.velocities, &p in &store.positions, &prev in &store.prev_positions) {
            *v = (p - prev) / dt;
        });
    }
}

impl Fluid for ViscoelasticFluid {
    type Params = ViscoelasticParams;

    fn step(&mut self, params: &Self::Params) {
        self.apply_gravity(params);
        self.apply_viscosity(params);
        self.advance_positions(params);
        self.adjust_springs(params);
        self.relax_double_density(params);
        self.resolve_collisions(params);
        self.reconstruct_velocities(params);
        self.apply_relaunch(params);

        log::debug!(
            "step done: {} springs, {} particles on the floor",
            self.springs.len(),
            self.relaunch.floor_contacts(),
        );
    }

    fn len(&self) -> usize {
        self.particles.len()
    }
}
