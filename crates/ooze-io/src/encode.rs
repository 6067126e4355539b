use std::{fs::File, io::{BufWriter, Write}, path::PathBuf};

use thiserror::Error;

use ooze_fluids::scene::Scene;

use crate::{frame_path, EncodeFluid, METADATA_FILE};

use super::as_bytes::AsBytes;

/// Records a run into a directory: one metadata file plus one file per frame.
pub struct FluidDataEncoder {
    /// The path to the directory into which the fluid data will be placed.
    path: PathBuf,
    num_frames: u64,
    fps: u32,
    current_frame: u64,
}

impl FluidDataEncoder {
    pub fn new(path: PathBuf, num_frames: u64, fps: u32) -> Result<FluidDataEncoder, EncodingError> {
        std::fs::create_dir_all(&path)?;
        log::debug!("recording {num_frames} frames into {}", path.display());

        Ok(Self {
            path,
            num_frames,
            fps,
            current_frame: 0,
        })
    }

    #[inline(always)]
    pub fn frames_written(&self) -> u64 {
        self.current_frame
    }

    pub fn encode_metadata<F: EncodeFluid>(&mut self, scene: &Scene<F>) -> Result<(), EncodingError> {
        let path = self.path.join(METADATA_FILE);
        let mut writer = BufWriter::new(File::create(path)?);

        let domain = F::domain(scene.params());

        writer.write_all(&3u8.to_bytes())?;
        writer.write_all(&self.fps.to_bytes())?;
        writer.write_all(&self.num_frames.to_bytes())?;
        writer.write_all(&F::particle_radius(scene.params()).to_bytes())?;
        writer.write_all(&domain.min.to_bytes())?;
        writer.write_all(&domain.max.to_bytes())?;
        writer.flush()?;

        Ok(())
    }

    pub fn encode_frame<F: EncodeFluid>(&mut self, scene: &Scene<F>) -> Result<(), EncodingError> {
        if self.current_frame >= self.num_frames {
            return Err(EncodingError::TooManyFrames(self.num_frames));
        }

        let path = frame_path(&self.path, self.current_frame, self.num_frames);
        let writer = BufWriter::new(File::create(path)?);

        let mut encoder = FluidFrameEncoder { writer };
        scene.fluid.encode_state(&mut encoder)?;
        encoder.writer.flush()?;

        self.current_frame += 1;

        Ok(())
    }
}

pub struct FluidFrameEncoder<W: Write> {
    writer: BufWriter<W>,
}

impl<W: Write> FluidFrameEncoder<W> {
    /// Writes `len` followed by every value in `values`.
    pub fn encode_section<const N: usize, T, I>(&mut self, len: usize, values: I) -> Result<(), EncodingError>
    where
        I: Iterator<Item = T>,
        T: AsBytes<N>,
    {
        self.writer.write_all(&(len as u64).to_bytes())?;

        let bytes: Vec<_> = values.flat_map(|v| v.to_bytes()).collect();
        self.writer.write_all(&bytes)?;

        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum EncodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("the recording was sized for {0} frames")]
    TooManyFrames(u64),
}
