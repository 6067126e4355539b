use std::path::PathBuf;

use clap::{Args, ValueEnum};
use glam::DVec3;
use ooze_fluids::{
    bounds::Aabb,
    params::{RelaunchParams, SpringRule, ViscoelasticParams},
};

/// Named starting points for the simulation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Profile {
    /// 500 particles dropped into a narrow tank, with viscosity and plastic springs.
    Standard,
    /// The standard tank without viscosity or yield tolerance.
    Reduced,
}

impl Profile {
    pub fn params(self) -> ViscoelasticParams {
        let standard = ViscoelasticParams {
            gravity: 9.80665,
            time_step: 1.0 / 30.0,
            interaction_radius: 3.0,
            particle_radius: 0.5,
            particle_count: 500,
            rest_density: 1.0,
            stiffness: 0.01,
            near_stiffness: 0.9,
            spring_stiffness: 0.7,
            spring_rest_length: 0.5,
            plasticity: 0.04,
            yield_ratio: 0.1,
            spring_rule: SpringRule::Reference,
            viscosity_sigma: 2.0,
            viscosity_beta: 1.0,
            restitution: 0.9,
            container: Aabb::new(DVec3::ZERO, DVec3::new(20.0, 600.0, 5.0)),
            fill: Aabb::new(DVec3::new(3.0, 5.0, 0.0), DVec3::new(7.0, 100.0, 4.0)),
            relaunch: Some(RelaunchParams {
                energy_loss_ratio: 0.9,
                height_scale: 10.0,
                floor_band: (0.1, 0.8),
            }),
        };

        match self {
            Profile::Standard => standard,
            Profile::Reduced => ViscoelasticParams {
                yield_ratio: 0.0,
                viscosity_sigma: 0.0,
                viscosity_beta: 0.0,
                ..standard
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Parameter profile that the flags below override.
    #[arg(long, value_enum, default_value_t = Profile::Standard)]
    pub profile: Profile,
    /// Number of steps to run.
    #[arg(short, long, default_value_t = 300)]
    pub frames: u64,
    /// Playback rate stored with the recording.
    #[arg(long, default_value_t = 30)]
    pub fps: u32,
    /// Directory to record every step into.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub particles: Option<usize>,
    /// Step duration. Defaults to the profile's.
    #[arg(long)]
    pub time_step: Option<f64>,
    #[arg(long)]
    pub gravity: Option<f64>,
    #[arg(long)]
    pub interaction_radius: Option<f64>,
    #[arg(long)]
    pub particle_radius: Option<f64>,
    #[arg(long)]
    pub rest_density: Option<f64>,
    #[arg(long)]
    pub stiffness: Option<f64>,
    #[arg(long)]
    pub near_stiffness: Option<f64>,
    #[arg(long)]
    pub spring_stiffness: Option<f64>,
    #[arg(long)]
    pub spring_rest_length: Option<f64>,
    #[arg(long)]
    pub plasticity: Option<f64>,
    #[arg(long)]
    pub yield_ratio: Option<f64>,
    #[arg(long)]
    pub viscosity_sigma: Option<f64>,
    #[arg(long)]
    pub viscosity_beta: Option<f64>,
    #[arg(long)]
    pub restitution: Option<f64>,

    /// Container corner, as `x,y,z`.
    #[arg(long, value_parser = parse_vec3)]
    pub container_min: Option<DVec3>,
    #[arg(long, value_parser = parse_vec3)]
    pub container_max: Option<DVec3>,
    /// Initial fill volume corner, as `x,y,z`.
    #[arg(long, value_parser = parse_vec3)]
    pub fill_min: Option<DVec3>,
    #[arg(long, value_parser = parse_vec3)]
    pub fill_max: Option<DVec3>,

    /// Create springs for new neighbors and keep existing rest lengths.
    #[arg(long)]
    pub corrected_springs: bool,
    /// Disable the relaunch effect.
    #[arg(long)]
    pub no_relaunch: bool,
}

impl RunArgs {
    /// The profile's parameters with every given flag applied.
    pub fn params(&self) -> ViscoelasticParams {
        let base = self.profile.params();

        ViscoelasticParams {
            gravity: self.gravity.unwrap_or(base.gravity),
            time_step: self.time_step.unwrap_or(base.time_step),
            interaction_radius: self.interaction_radius.unwrap_or(base.interaction_radius),
            particle_radius: self.particle_radius.unwrap_or(base.particle_radius),
            particle_count: self.particles.unwrap_or(base.particle_count),
            rest_density: self.rest_density.unwrap_or(base.rest_density),
            stiffness: self.stiffness.unwrap_or(base.stiffness),
            near_stiffness: self.near_stiffness.unwrap_or(base.near_stiffness),
            spring_stiffness: self.spring_stiffness.unwrap_or(base.spring_stiffness),
            spring_rest_length: self.spring_rest_length.unwrap_or(base.spring_rest_length),
            plasticity: self.plasticity.unwrap_or(base.plasticity),
            yield_ratio: self.yield_ratio.unwrap_or(base.yield_ratio),
            spring_rule: if self.corrected_springs { SpringRule::Corrected } else { base.spring_rule },
            viscosity_sigma: self.viscosity_sigma.unwrap_or(base.viscosity_sigma),
            viscosity_beta: self.viscosity_beta.unwrap_or(base.viscosity_beta),
            restitution: self.restitution.unwrap_or(base.restitution),
            container: Aabb::new(
                self.container_min.unwrap_or(base.container.min),
                self.container_max.unwrap_or(base.container.max),
            ),
            fill: Aabb::new(
                self.fill_min.unwrap_or(base.fill.min),
                self.fill_max.unwrap_or(base.fill.max),
            ),
            relaunch: if self.no_relaunch { None } else { base.relaunch },
        }
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Directory written by `run --output`.
    pub path: PathBuf,
}

fn parse_vec3(s: &str) -> Result<DVec3, String> {
    let parts = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| format!("`{c}`: {e}")))
        .collect::<Result<Vec<_>, _>>()?;

    match parts[..] {
        [x, y, z] => Ok(DVec3::new(x, y, z)),
        _ => Err(format!("expected three comma-separated values, got {}", parts.len())),
    }
}
