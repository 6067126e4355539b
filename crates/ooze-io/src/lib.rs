use std::{io::Write, path::{Path, PathBuf}};

use encode::{EncodingError, FluidFrameEncoder};
use ooze_fluids::{bounds::Aabb, viscoelastic::ViscoelasticFluid, params::ViscoelasticParams, Fluid};

pub mod encode;
pub mod decode;
pub mod as_bytes;

/// Name of the metadata file inside a recording directory.
pub const METADATA_FILE: &str = "_meta";

/// A fluid whose per-step state can be handed to a renderer.
pub trait EncodeFluid: Fluid {
    /// Radius each particle should be drawn with.
    fn particle_radius(params: &Self::Params) -> f64;

    /// The box the particles are kept in.
    fn domain(params: &Self::Params) -> Aabb;

    fn encode_state<W: Write>(&self, encoder: &mut FluidFrameEncoder<W>) -> Result<(), EncodingError>;
}

impl EncodeFluid for ViscoelasticFluid {
    fn particle_radius(params: &ViscoelasticParams) -> f64 {
        params.particle_radius
    }

    fn domain(params: &ViscoelasticParams) -> Aabb {
        params.container
    }

    fn encode_state<W: Write>(&self, encoder: &mut FluidFrameEncoder<W>) -> Result<(), EncodingError> {
        let particles = self.particles();

        encoder.encode_section(particles.len(), particles.iter_positions().copied())?;
        encoder.encode_section(particles.len(), particles.iter_velocities().copied())?;

        Ok(())
    }
}

/// Frame files are zero-padded so that they sort in playback order.
fn frame_path(dir: &Path, frame: u64, num_frames: u64) -> PathBuf {
    let max_digits = num_frames.saturating_sub(1).checked_ilog10().unwrap_or(0) + 1;
    let digits = frame.checked_ilog10().unwrap_or(0) + 1;
    let zeros = max_digits.saturating_sub(digits);

    dir.join(format!("{}{frame}.dat", "0".repeat(zeros as usize)))
}
