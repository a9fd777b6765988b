//! Fuzz target for sequences of session mutations.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rollcast_core::Session;

#[derive(Debug, Arbitrary)]
enum Op {
    Append(i8, i8),
    RemoveNth(u8),
    Clear,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut session = Session::default();
    for op in ops {
        match op {
            Op::Append(first, second) => {
                let _ = session.append(i64::from(first), i64::from(second));
            }
            Op::RemoveNth(n) => {
                let id = session.snapshot().get(usize::from(n)).map(|o| o.id);
                if let Some(id) = id {
                    assert!(session.remove(id));
                }
            }
            Op::Clear => session.clear(),
        }

        let forecast = session.predict(1);
        assert_eq!(u32::from(forecast.small_pct) + u32::from(forecast.big_pct), 100);
        let ids: Vec<u64> = session.snapshot().iter().map(|o| o.id.0).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
});
