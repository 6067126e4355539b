use glam::DVec3;
use thiserror::Error;

use crate::bounds::Aabb;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InitError {
    #[error("the fill volume can only hold {placed} of the {requested} requested particles")]
    Capacity { placed: usize, requested: usize },
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}

/// Places `count` particles on a lattice inside `fill`, two particle radii apart.
///
/// The lattice is walked along `x` first, then `z`, then `y`. Each axis wraps back to its
/// minimum once it passes its maximum and advances the next one. Fails once `y` passes the
/// top of the fill volume before every particle is placed.
pub fn fill_lattice(fill: &Aabb, particle_radius: f64, count: usize) -> Result<Vec<DVec3>, InitError> {
    let spacing = 2.0 * particle_radius;
    let mut cursor = fill.min;
    let mut positions = Vec::with_capacity(count);

    for placed in 0..count {
        if cursor.y > fill.max.y {
            return Err(InitError::Capacity { placed, requested: count });
        }

        positions.push(cursor);

        cursor.x += spacing;
        if cursor.x > fill.max.x {
            cursor.z += spacing;
            cursor.x = fill.min.x;
        }

        if cursor.z > fill.max.z {
            cursor.x = fill.min.x;
            cursor.z = fill.min.z;
            cursor.y += spacing;
        }
    }

    Ok(positions)
}
