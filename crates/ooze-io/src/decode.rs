use std::{fs::File, io::{BufReader, Read}, path::PathBuf};

use smallvec::SmallVec;
use thiserror::Error;

use crate::{as_bytes::AsBytes, frame_path, METADATA_FILE};

/// Upper bound on values reserved ahead of reading a section, whatever its header claims.
const MAX_PREALLOCATED: usize = 1 << 20;

/// Reads back a recording written by [`FluidDataEncoder`](crate::encode::FluidDataEncoder).
pub struct FluidDataDecoder {
    /// The path to the directory into which the fluid data resides.
    path: PathBuf,
    dim: u8,
    num_frames: u64,
    current_frame: u64,
}

impl FluidDataDecoder {
    pub fn new(path: PathBuf) -> FluidDataDecoder {
        Self {
            path,
            dim: 0,
            num_frames: 0,
            current_frame: 0,
        }
    }

    fn read_value<const N: usize, T: AsBytes<N>, R: Read>(reader: &mut R) -> Result<T, DecodingError> {
        let mut bytes = [0; N];
        reader.read_exact(&mut bytes)?;

        Ok(T::from_bytes(bytes))
    }

    fn read_section<R: Read>(reader: &mut R, dim: u8) -> Result<FluidDataArray, DecodingError> {
        let len = Self::read_value::<8, u64, _>(reader)?;
        let count = len
            .checked_mul(dim as u64)
            .and_then(|c| usize::try_from(c).ok())
            .ok_or(DecodingError::Malformed("section too long"))?;

        let mut values = Vec::with_capacity(count.min(MAX_PREALLOCATED));
        for _ in 0..count {
            values.push(Self::read_value::<8, f64, _>(reader)?);
        }

        Ok(FluidDataArray(values))
    }

    pub fn decode_metadata(&mut self) -> Result<FluidMetadata, DecodingError> {
        let path = self.path.join(METADATA_FILE);
        let mut reader = BufReader::new(File::open(path)?);

        let dim = Self::read_value::<1, u8, _>(&mut reader)?;
        if dim == 0 || dim > 4 {
            return Err(DecodingError::UnsupportedDimension(dim));
        }

        let fps = Self::read_value::<4, u32, _>(&mut reader)?;
        let num_frames = Self::read_value::<8, u64, _>(&mut reader)?;
        let particle_radius = Self::read_value::<8, f64, _>(&mut reader)?;

        let mut min: SmallVec<[f64; 4]> = SmallVec::new();
        let mut max: SmallVec<[f64; 4]> = SmallVec::new();

        for _ in 0..dim {
            min.push(Self::read_value::<8, f64, _>(&mut reader)?);
        }

        for _ in 0..dim {
            max.push(Self::read_value::<8, f64, _>(&mut reader)?);
        }

        self.dim = dim;
        self.num_frames = num_frames;

        Ok(FluidMetadata {
            dim,
            fps,
            num_frames,
            particle_radius,
            min,
            max,
        })
    }

    /// Reads the next frame, or `None` once every frame has been read.
    pub fn decode_frame(&mut self) -> Result<Option<FluidFrameData>, DecodingError> {
        if self.dim == 0 {
            return Err(DecodingError::Malformed("metadata must be decoded before frames"));
        }

        if self.current_frame >= self.num_frames {
            return Ok(None)
        }

        let path = frame_path(&self.path, self.current_frame, self.num_frames);
        let mut reader = BufReader::new(File::open(path)?);

        let positions = Self::read_section(&mut reader, self.dim)?;
        let velocities = Self::read_section(&mut reader, self.dim)?;

        self.current_frame += 1;

        Ok(Some(FluidFrameData {
            positions,
            velocities,
        }))
    }

    pub fn reset(&mut self) {
        self.current_frame = 0;
    }
}

pub struct FluidMetadata {
    pub dim: u8,
    pub fps: u32,
    pub num_frames: u64,
    pub particle_radius: f64,
    pub min: SmallVec<[f64; 4]>,
    pub max: SmallVec<[f64; 4]>,
}

impl FluidMetadata {
    pub fn min_corner<const D: usize>(&self) -> Option<[f64; D]> {
        self.min.get(..D)?.try_into().ok()
    }

    pub fn max_corner<const D: usize>(&self) -> Option<[f64; D]> {
        self.max.get(..D)?.try_into().ok()
    }
}

pub struct FluidFrameData {
    pub positions: FluidDataArray,
    pub velocities: FluidDataArray,
}

/// Packed `D`-dimensional vectors.
pub struct FluidDataArray(Vec<f64>);

impl FluidDataArray {
    pub fn iter<const D: usize>(&self) -> impl Iterator<Item = [f64; D]> + use<'_, D> {
        self.0.chunks_exact(D).filter_map(|chunk| <[f64; D]>::try_from(chunk).ok())
    }

    pub fn get<const D: usize>(&self, i: usize) -> Option<[f64; D]> {
        let start = i.checked_mul(D)?;
        self.0.get(start..start.checked_add(D)?)?.try_into().ok()
    }

    pub fn len<const D: usize>(&self) -> usize {
        self.0.len() / D
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum DecodingError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unsupported dimension {0}")]
    UnsupportedDimension(u8),
    #[error("malformed recording: {0}")]
    Malformed(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_get_is_bounds_checked() {
        let array = FluidDataArray(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        assert_eq!(array.get::<3>(1), Some([4.0, 5.0, 6.0]));
        assert_eq!(array.get::<3>(2), None);
        assert_eq!(array.get::<3>(usize::MAX), None);
        assert_eq!(array.get::<3>(usize::MAX / 3), None);
        assert_eq!(array.len::<3>(), 2);
    }
}
