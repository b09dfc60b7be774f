use terrain::{
    decode_snapshot, encode_snapshot, hilbert, AltitudeGrid, ChunkId, ChunkUpdate,
    TerrainConfig, TerrainDecodeError,
};

fn grid_from(size: usize, f: impl Fn(usize, usize) -> u8) -> AltitudeGrid {
    let mut grid = AltitudeGrid::new(size);
    for x in 0..size {
        for y in 0..size {
            grid.set(x, y, f(x, y));
        }
    }
    grid
}

#[test]
fn all_zero_chunk_roundtrip() {
    let config = TerrainConfig::default();
    let grid = AltitudeGrid::new(64);
    let bytes = encode_snapshot(&grid).unwrap();
    assert_eq!(bytes.len(), 256);
    assert_eq!(decode_snapshot(&bytes, &config).unwrap(), grid);
}

#[test]
fn single_run_chunk_roundtrip() {
    let config = TerrainConfig::default();
    let grid = grid_from(64, |_, _| 0xC0);
    let bytes = encode_snapshot(&grid).unwrap();
    assert!(bytes.iter().all(|&b| b == 0xCF));
    assert_eq!(decode_snapshot(&bytes, &config).unwrap(), grid);
}

#[test]
fn checkerboard_chunk_roundtrip() {
    let config = TerrainConfig::default();
    let grid = grid_from(64, |x, y| if (x + y) % 2 == 0 { 0x10 } else { 0xE0 });
    let bytes = encode_snapshot(&grid).unwrap();
    assert_eq!(decode_snapshot(&bytes, &config).unwrap(), grid);
}

#[test]
fn quadrants_land_in_curve_order() {
    // The first quarter of the curve covers one quadrant of the chunk.
    let config = TerrainConfig::default();
    let mut bytes = vec![0xFF; 64];
    bytes.extend(std::iter::repeat(0x0F).take(192));
    let grid = decode_snapshot(&bytes, &config).unwrap();
    assert_eq!(grid.land_cells(), 1024);
    for d in 0..1024 {
        let (x, y) = hilbert::point_from_distance(6, d);
        assert!(grid.is_land(x as usize, y as usize));
    }
    assert!(grid.is_land(0, 0));
}

#[test]
fn chunk_update_decodes_once_per_tick() {
    let config = TerrainConfig::default();
    let grid = grid_from(64, |x, _| if x < 32 { 0xF0 } else { 0 });
    let update = ChunkUpdate::snapshot(ChunkId::new(4, 4), encode_snapshot(&grid).unwrap());
    assert_eq!(update.altitudes(&config).unwrap(), &grid);
    assert!(update.is_decoded());
}

#[test]
fn truncated_snapshot_is_rejected() {
    let config = TerrainConfig::default();
    let mut bytes = encode_snapshot(&AltitudeGrid::new(64)).unwrap();
    bytes.pop();
    assert_eq!(
        decode_snapshot(&bytes, &config),
        Err(TerrainDecodeError::SizeMismatch {
            expected: 4096,
            actual: 4080,
        })
    );
}
