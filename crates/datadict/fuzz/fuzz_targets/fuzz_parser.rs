//! Fuzz target for the delimited-text parser and profiler.
//!
//! Any input the parser accepts must also profile and document without
//! panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use datadict::input::Parser;
use datadict::Session;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let parser = Parser::new();
    if let Ok(table) = parser.parse_bytes(data) {
        let mut session = Session::default();
        let _ = session.run("fuzz", &table, None);
    }
});
