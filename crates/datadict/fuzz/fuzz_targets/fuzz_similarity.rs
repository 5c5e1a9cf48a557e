//! Fuzz target for the similarity ratio.
//!
//! The ratio must stay within [0, 1] and be symmetric for any pair of strings.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use datadict::glossary::similarity_ratio;

#[derive(Debug, Arbitrary)]
struct Pair {
    a: String,
    b: String,
}

fuzz_target!(|pair: Pair| {
    if pair.a.len() > 512 || pair.b.len() > 512 {
        return;
    }

    let forward = similarity_ratio(&pair.a, &pair.b);
    let backward = similarity_ratio(&pair.b, &pair.a);

    assert!((0.0..=1.0).contains(&forward));
    assert_eq!(forward, backward);
});
