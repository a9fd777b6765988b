//! Fuzz target for observation log import.
//!
//! Arbitrary documents must either import cleanly or be rejected without
//! touching the session.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rollcast_core::Session;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut session = Session::default();
    let _ = session.append(10, 20);
    let before = session.snapshot().to_vec();

    match session.import_json(text) {
        Ok(count) => {
            assert_eq!(count, session.len());
            let forecast = session.predict(1);
            assert_eq!(u32::from(forecast.small_pct) + u32::from(forecast.big_pct), 100);
        }
        Err(_) => assert_eq!(session.snapshot(), before.as_slice()),
    }
});
