use glam::DVec3;

/// Fixed-size little-endian encoding of a value.
pub trait AsBytes<const N: usize> {
    fn from_bytes(b: [u8; N]) -> Self;

    fn to_bytes(self) -> [u8; N];
}

impl AsBytes<1> for u8 {
    fn from_bytes(b: [u8; 1]) -> Self {
        b[0]
    }

    fn to_bytes(self) -> [u8; 1] {
        [self]
    }
}

impl AsBytes<4> for u32 {
    fn from_bytes(b: [u8; 4]) -> Self {
        u32::from_le_bytes(b)
    }

    fn to_bytes(self) -> [u8; 4] {
        self.to_le_bytes()
    }
}

impl AsBytes<8> for u64 {
    fn from_bytes(b: [u8; 8]) -> Self {
        u64::from_le_bytes(b)
    }

    fn to_bytes(self) -> [u8; 8] {
        self.to_le_bytes()
    }
}

impl AsBytes<8> for f64 {
    fn from_bytes(b: [u8; 8]) -> Self {
        f64::from_le_bytes(b)
    }

    fn to_bytes(self) -> [u8; 8] {
        self.to_le_bytes()
    }
}

impl AsBytes<24> for DVec3 {
    fn from_bytes(b: [u8; 24]) -> Self {
        let mut xyz = [0.0; 3];
        for (v, chunk) in xyz.iter_mut().zip(b.chunks_exact(8)) {
            let mut bytes = [0; 8];
            bytes.copy_from_slice(chunk);
            *v = f64::from_bytes(bytes);
        }

        DVec3::from_array(xyz)
    }

    fn to_bytes(self) -> [u8; 24] {
        let mut b = [0; 24];
        for (chunk, v) in b.chunks_exact_mut(8).zip(self.to_array()) {
            chunk.copy_from_slice(&v.to_bytes());
        }

        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_layout_is_xyz() {
        let b = DVec3::new(1.0, -2.5, 3.25).to_bytes();

        assert_eq!(b[0..8], 1.0f64.to_le_bytes());
        assert_eq!(b[8..16], (-2.5f64).to_le_bytes());
        assert_eq!(b[16..24], 3.25f64.to_le_bytes());
        assert_eq!(DVec3::from_bytes(b), DVec3::new(1.0, -2.5, 3.25));
    }
}
