//! Fuzz target for engine.json parsing and validation.
//!
//! Parsing and validation must never panic, and any config that passes
//! validation must drive the engine without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rollcast_config::{validate_engine, EngineConfig};
use rollcast_core::Session;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = serde_json::from_slice::<EngineConfig>(data) else {
        return;
    };
    if validate_engine(&config).is_err() {
        return;
    }

    let mut session = Session::new(config);
    for (first, second) in [(10, 20), (15, 45), (50, 8), (33, 31), (6, 54)] {
        let _ = session.append(first, second);
    }
    let _ = session.predict_multi_step(3);
    let _ = session.insights();
});
