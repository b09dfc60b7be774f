//! Coordinate types and transforms.

use crate::config::TerrainConfig;

/// A real-valued world position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coords {
    pub x: f32,
    pub y: f32,
}

impl Coords {
    /// Creates a world position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An integer terrain grid position.
///
/// World-grid positions span all chunks; patch cells use the same type for
/// chunk-local positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainCoords {
    pub x: i32,
    pub y: i32,
}

impl TerrainCoords {
    /// Creates a terrain position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Quantizes a world position onto the terrain grid.
    ///
    /// Rounds half to even, so `0.5` cells past the origin lands on the origin.
    /// The division runs in `f64`; in `f32` a position just past a half cell
    /// collapses onto the tie.
    #[must_use]
    pub fn from_real(coords: Coords, config: &TerrainConfig) -> Self {
        let offset = f64::from(config.grid_offset());
        let cell = f64::from(config.cell_size());
        Self {
            x: (f64::from(coords.x) / cell + offset).round_ties_even() as i32,
            y: (f64::from(coords.y) / cell + offset).round_ties_even() as i32,
        }
    }

    /// Returns the world position of this grid cell.
    #[must_use]
    pub fn to_real(self, config: &TerrainConfig) -> Coords {
        let offset = f64::from(config.grid_offset());
        let cell = f64::from(config.cell_size());
        Coords {
            x: ((f64::from(self.x) - offset) * cell) as f32,
            y: ((f64::from(self.y) - offset) * cell) as f32,
        }
    }

    /// Returns the chunk that owns this world-grid cell.
    #[must_use]
    pub const fn chunk(self, config: &TerrainConfig) -> ChunkId {
        let size = config.chunk_size() as i32;
        ChunkId {
            x: self.x.div_euclid(size),
            y: self.y.div_euclid(size),
        }
    }

    /// Returns this world-grid cell's position inside its chunk.
    #[must_use]
    pub const fn local(self, config: &TerrainConfig) -> Self {
        let size = config.chunk_size() as i32;
        Self {
            x: self.x.rem_euclid(size),
            y: self.y.rem_euclid(size),
        }
    }
}

/// A chunk address in chunk-grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChunkId {
    pub x: i32,
    pub y: i32,
}

impl ChunkId {
    /// Creates a chunk address.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for ChunkId {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for ChunkId {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_grid_center() {
        let config = TerrainConfig::default();
        let t = TerrainCoords::from_real(Coords::new(0.0, 0.0), &config);
        assert_eq!(t, TerrainCoords::new(512, 512));
    }

    #[test]
    fn grid_center_maps_to_origin() {
        let config = TerrainConfig::default();
        let real = TerrainCoords::new(512, 512).to_real(&config);
        assert_eq!(real, Coords::new(0.0, 0.0));
    }

    #[test]
    fn rounds_half_to_even() {
        let config = TerrainConfig::default();
        // 12.5 / 25 = 0.5 -> 512.5 -> 512
        let a = TerrainCoords::from_real(Coords::new(12.5, 0.0), &config);
        assert_eq!(a.x, 512);
        // 37.5 / 25 = 1.5 -> 513.5 -> 514
        let b = TerrainCoords::from_real(Coords::new(37.5, 0.0), &config);
        assert_eq!(b.x, 514);
        // -12.5 / 25 = -0.5 -> 511.5 -> 512
        let c = TerrainCoords::from_real(Coords::new(-12.5, 0.0), &config);
        assert_eq!(c.x, 512);
    }

    #[test]
    fn just_past_half_cell_rounds_up() {
        let config = TerrainConfig::default();
        let t = TerrainCoords::from_real(Coords::new(12.500_001, -12.500_001), &config);
        assert_eq!(t, TerrainCoords::new(513, 511));
    }

    #[test]
    fn negative_world_positions() {
        let config = TerrainConfig::default();
        let t = TerrainCoords::from_real(Coords::new(-250.0, 100.0), &config);
        assert_eq!(t, TerrainCoords::new(502, 516));
        assert_eq!(t.to_real(&config), Coords::new(-250.0, 100.0));
    }

    #[test]
    fn roundtrip_within_half_cell() {
        let config = TerrainConfig::default();
        let real = Coords::new(1234.0, -987.0);
        let back = TerrainCoords::from_real(real, &config).to_real(&config);
        assert!((back.x - real.x).abs() <= 12.5);
        assert!((back.y - real.y).abs() <= 12.5);
    }

    #[test]
    fn extreme_grid_positions_do_not_overflow() {
        let config = TerrainConfig::default();
        let real = TerrainCoords::new(i32::MIN, i32::MAX).to_real(&config);
        assert_eq!(real.x, ((f64::from(i32::MIN) - 512.0) * 25.0) as f32);
        assert_eq!(real.y, ((f64::from(i32::MAX) - 512.0) * 25.0) as f32);
    }

    #[test]
    fn chunk_and_local_split() {
        let config = TerrainConfig::default();
        let t = TerrainCoords::new(517, 130);
        assert_eq!(t.chunk(&config), ChunkId::new(8, 2));
        assert_eq!(t.local(&config), TerrainCoords::new(5, 2));
    }

    #[test]
    fn chunk_split_negative() {
        let config = TerrainConfig::default();
        let t = TerrainCoords::new(-1, -64);
        assert_eq!(t.chunk(&config), ChunkId::new(-1, -1));
        assert_eq!(t.local(&config), TerrainCoords::new(63, 0));
    }

    #[test]
    fn chunk_id_from_pairs() {
        assert_eq!(ChunkId::from((3, -2)), ChunkId::new(3, -2));
        assert_eq!(ChunkId::from([7, 8]), ChunkId::new(7, 8));
    }
}
