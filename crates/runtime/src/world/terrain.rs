//! Static terrain layer of the reference grid world.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use vision_core::{Position, VisionFlags};

use crate::error::{Result, RuntimeError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// In-bounds cells within Chebyshev distance `radius` of `center`, row-major.
    ///
    /// Bounds are clamped to the map before iterating, so any radius costs at
    /// most the map area.
    pub fn square_around(self, center: Position, radius: u32) -> impl Iterator<Item = Position> {
        let radius = i64::from(radius);
        let clamp = |center: i32, len: u32| {
            let low = (i64::from(center) - radius).max(0);
            let high = (i64::from(center) + radius).min(i64::from(len) - 1);
            low..=high
        };
        let xs = clamp(center.x, self.width);
        let ys = clamp(center.y, self.height);
        ys.flat_map(move |y| {
            xs.clone()
                .map(move |x| Position::new(x as i32, y as i32))
        })
    }
}

/// Base terrain of a cell, as far as sight is concerned.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    #[default]
    Floor,
    Wall,
    Foliage,
    /// Mist over open water hides what lies past it.
    Water,
    Void,
}

impl TerrainKind {
    /// Whether this cell stops a line of sight passing through it.
    ///
    /// The blocking cell itself is still seen.
    pub fn blocks_sight(self, flags: VisionFlags) -> bool {
        match self {
            TerrainKind::Floor => false,
            TerrainKind::Wall | TerrainKind::Void => true,
            TerrainKind::Foliage => !flags.contains(VisionFlags::SEE_THROUGH_FOLIAGE),
            TerrainKind::Water => !flags.contains(VisionFlags::SEE_OVER_WATER),
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            TerrainKind::Floor => '.',
            TerrainKind::Wall => '#',
            TerrainKind::Foliage => '"',
            TerrainKind::Water => '~',
            TerrainKind::Void => ' ',
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(TerrainKind::Floor),
            '#' => Some(TerrainKind::Wall),
            '"' => Some(TerrainKind::Foliage),
            '~' => Some(TerrainKind::Water),
            ' ' => Some(TerrainKind::Void),
            _ => None,
        }
    }
}

/// Row-major terrain grid. Cells outside the grid read as [`TerrainKind::Void`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainMap {
    dimensions: MapDimensions,
    tiles: Vec<TerrainKind>,
}

impl TerrainMap {
    pub fn filled(dimensions: MapDimensions, terrain: TerrainKind) -> Self {
        Self {
            dimensions,
            tiles: vec![terrain; dimensions.area()],
        }
    }

    /// Parses ASCII rows using the [`TerrainKind::glyph`] alphabet.
    ///
    /// Short rows are padded with void.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let height = rows.len() as u32;
        let width = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0) as u32;
        if width == 0 || height == 0 {
            return Err(RuntimeError::InvalidScenario(
                "terrain must have at least one cell".to_string(),
            ));
        }

        let mut map = Self::filled(MapDimensions::new(width, height), TerrainKind::Void);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.as_ref().chars().enumerate() {
                let terrain = TerrainKind::from_glyph(glyph).ok_or_else(|| {
                    RuntimeError::InvalidScenario(format!(
                        "unknown terrain glyph {glyph:?} at ({x}, {y})"
                    ))
                })?;
                map.tiles[y * width as usize + x] = terrain;
            }
        }
        Ok(map)
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn terrain(&self, position: Position) -> TerrainKind {
        self.index(position)
            .map_or(TerrainKind::Void, |index| self.tiles[index])
    }

    /// Replaces the terrain at `position` and returns what was there.
    pub fn set_terrain(&mut self, position: Position, terrain: TerrainKind) -> Result<TerrainKind> {
        let index = self.index(position).ok_or(RuntimeError::OutOfBounds {
            position,
            width: self.dimensions.width,
            height: self.dimensions.height,
        })?;
        Ok(std::mem::replace(&mut self.tiles[index], terrain))
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn glyphs_round_trip() {
        for terrain in TerrainKind::iter() {
            assert_eq!(TerrainKind::from_glyph(terrain.glyph()), Some(terrain));
        }
    }

    #[test]
    fn names_parse() {
        assert_eq!(TerrainKind::from_str("foliage").unwrap(), TerrainKind::Foliage);
        assert_eq!(TerrainKind::Void.to_string(), "void");
    }

    #[test]
    fn foliage_respects_flags() {
        assert!(TerrainKind::Foliage.blocks_sight(VisionFlags::empty()));
        assert!(!TerrainKind::Foliage.blocks_sight(VisionFlags::SEE_THROUGH_FOLIAGE));
        assert!(TerrainKind::Wall.blocks_sight(VisionFlags::all()));
    }

    #[test]
    fn square_around_is_clamped_to_map() {
        let dimensions = MapDimensions::new(3, 2);

        let near: Vec<_> = dimensions.square_around(Position::new(0, 0), 1).collect();
        let all: Vec<_> = dimensions.square_around(Position::new(1, 0), u32::MAX).collect();

        assert_eq!(
            near,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)]
        );
        assert_eq!(all.len(), dimensions.area());
        assert_eq!(dimensions.square_around(Position::new(9, 0), 2).count(), 0);
    }

    #[test]
    fn rows_parse_and_pad() {
        let map = TerrainMap::from_rows(&["###", "#."]).unwrap();

        assert_eq!(map.dimensions(), MapDimensions::new(3, 2));
        assert_eq!(map.terrain(Position::new(1, 1)), TerrainKind::Floor);
        assert_eq!(map.terrain(Position::new(2, 1)), TerrainKind::Void);
        assert_eq!(map.terrain(Position::new(-1, 0)), TerrainKind::Void);
    }

    #[test]
    fn unknown_glyph_is_rejected() {
        let err = TerrainMap::from_rows(&["#x#"]).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidScenario(_)));
    }

    #[test]
    fn set_terrain_outside_map_fails() {
        let mut map = TerrainMap::filled(MapDimensions::new(2, 2), TerrainKind::Floor);

        assert_eq!(
            map.set_terrain(Position::new(1, 1), TerrainKind::Wall).unwrap(),
            TerrainKind::Floor
        );
        assert!(matches!(
            map.set_terrain(Position::new(2, 0), TerrainKind::Wall),
            Err(RuntimeError::OutOfBounds { .. })
        ));
    }
}
