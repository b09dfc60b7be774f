#![no_main]

use envelope::EnvelopeLimits;
use libfuzzer_sys::fuzz_target;
use protocol::{UpdateDecoder, UpdateLimits};
use terrain::{TerrainConfig, WorldTerrain};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let config = TerrainConfig::for_testing();
    let decoder = UpdateDecoder::new(config, UpdateLimits::for_testing())
        .with_envelope_limits(EnvelopeLimits::for_testing());

    if let Ok(update) = decoder.decode(text) {
        let mut world = WorldTerrain::new(config);
        if let Some(terrain) = &update.terrain {
            let _ = world.apply_all(terrain);
        }
    }
});
