pub mod bounds;
pub mod lattice;
pub mod params;
pub mod particles;
pub mod relaunch;
pub mod scene;
pub mod springs;
pub mod viscoelastic;

pub trait Fluid {
    type Params;

    /// Advances the fluid by one full time step.
    fn step(&mut self, params: &Self::Params);

    /// The number of particles in the fluid.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
