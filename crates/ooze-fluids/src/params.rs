use crate::{bounds::Aabb, lattice::InitError};

/// How the spring pass treats pairs that come within the interaction radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpringRule {
    /// Every existing spring has its rest length reset to the interaction radius each step
    /// before plastic drift, while absent springs drift away from the `-1` sentinel. This
    /// is how the simulation has always behaved and remains the default.
    Reference,
    /// Absent springs are created at the interaction radius and existing springs keep their
    /// rest length, as in Clavet et al.
    Corrected,
}

/// Parameters of the scripted re-energization effect that relaunches settled fluid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaunchParams {
    /// Fraction of the relaunch speed kept per airborne cycle.
    pub energy_loss_ratio: f64,
    /// Multiplier on `gravity * fill height` inside the relaunch speed.
    pub height_scale: f64,
    /// Open interval of the fraction of particles touching the floor that triggers a
    /// relaunch.
    pub floor_band: (f64, f64),
}

/// Every parameter of the viscoelastic fluid. There are no library defaults; callers must
/// supply each field.
///
/// The time step, interaction radius and particle radius must be positive. This is checked
/// by [`ViscoelasticParams::validate`] when a fluid is built with
/// [`ViscoelasticFluid::new`](crate::viscoelastic::ViscoelasticFluid::new).
#[derive(Debug, Clone, PartialEq)]
pub struct ViscoelasticParams {
    /// Gravity magnitude, acting along `-y`.
    pub gravity: f64,
    /// Duration of a single step.
    pub time_step: f64,
    /// Interaction radius `h`.
    pub interaction_radius: f64,
    /// Particle radius, used for lattice spacing.
    pub particle_radius: f64,
    /// Number of particles to place in the fill volume.
    pub particle_count: usize,

    /// Rest density `ρ0`.
    pub rest_density: f64,
    /// Pressure stiffness `k`.
    pub stiffness: f64,
    /// Near-pressure stiffness `k_near`.
    pub near_stiffness: f64,

    /// Spring stiffness `k_spring`.
    pub spring_stiffness: f64,
    /// Rest length `L0` that plastic deformation is measured against.
    pub spring_rest_length: f64,
    /// Plasticity constant `α`.
    pub plasticity: f64,
    /// Yield ratio `γ`.
    pub yield_ratio: f64,
    pub spring_rule: SpringRule,

    /// Linear viscosity `σ`.
    pub viscosity_sigma: f64,
    /// Quadratic viscosity `β`.
    pub viscosity_beta: f64,

    /// Fraction of normal velocity kept (and reversed) on a wall hit.
    pub restitution: f64,
    /// The tank the particles are kept in.
    pub container: Aabb,
    /// The volume the particles are initially placed in.
    pub fill: Aabb,
    /// `None` disables the relaunch effect.
    pub relaunch: Option<RelaunchParams>,
}

impl ViscoelasticParams {
    /// Rejects a non-positive time step, interaction radius or particle radius.
    pub fn validate(&self) -> Result<(), InitError> {
        let positive = [
            ("time step", self.time_step),
            ("interaction radius", self.interaction_radius),
            ("particle radius", self.particle_radius),
        ];

        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(InitError::NonPositive { name, value });
            }
        }

        Ok(())
    }
}
