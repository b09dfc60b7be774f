#![no_main]

use libfuzzer_sys::fuzz_target;
use terrain::{
    decode_snapshot, encode_snapshot, ChunkId, ChunkUpdate, TerrainConfig, WorldTerrain,
};

fuzz_target!(|data: &[u8]| {
    let config = TerrainConfig::for_testing();

    // Pairs of input bytes form one wire value so values above 255 occur.
    let values: Vec<u32> = data
        .chunks(2)
        .map(|pair| u32::from(pair[0]) | (u32::from(*pair.get(1).unwrap_or(&0) & 1) << 8))
        .take(256)
        .collect();

    if let Ok(grid) = decode_snapshot(&values, &config) {
        let again = encode_snapshot(&grid).unwrap();
        assert_eq!(decode_snapshot(&again, &config).as_ref(), Ok(&grid));
    }

    let mut world = WorldTerrain::new(config);
    let _ = world.apply(&ChunkUpdate::snapshot(ChunkId::new(0, 0), vec![0x0F; 4]));
    let _ = world.apply(&ChunkUpdate::patch(ChunkId::new(0, 0), values));
});
