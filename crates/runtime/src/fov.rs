//! Ray-cast field of view over a [`TerrainMap`].

use vision_core::{Position, Vision};

use crate::world::TerrainMap;

/// Line-of-sight vision: a cell is seen when it lies within the Euclidean
/// radius and the Bresenham line to it crosses no blocking cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct RaycastVision;

impl RaycastVision {
    /// Cells visible from `origin`, in row-major order.
    ///
    /// Nothing is seen from outside the map.
    pub fn visible_tiles(&self, map: &TerrainMap, origin: Position, vision: &Vision) -> Vec<Position> {
        if !map.contains(origin) {
            return Vec::new();
        }

        let limit = u64::from(vision.radius).pow(2);
        map.dimensions()
            .square_around(origin, vision.radius)
            .filter(|target| origin.distance_squared(*target).unsigned_abs() <= limit)
            .filter(|target| self.line_of_sight(map, origin, *target, vision))
            .collect()
    }

    /// Whether every cell strictly between the endpoints lets sight through.
    pub fn line_of_sight(
        &self,
        map: &TerrainMap,
        from: Position,
        to: Position,
        vision: &Vision,
    ) -> bool {
        let line = bresenham(from, to);
        let interior = line.len().saturating_sub(1);
        line.iter()
            .take(interior)
            .skip(1)
            .all(|cell| !map.terrain(*cell).blocks_sight(vision.flags))
    }
}

fn bresenham(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut points = Vec::with_capacity(dx.max(-dy) as usize + 1);
    let (mut x, mut y) = (from.x, from.y);
    let mut err = dx + dy;
    loop {
        points.push(Position::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += sx;
        }
        if doubled <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}
