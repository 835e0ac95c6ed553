#![no_main]

use akita_wire::{decode, encode, Packet};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let decoded = decode(&encode(data)).expect("encoded frame must decode");
    assert_eq!(decoded, data);

    // Arbitrary payloads either parse or report truncation
    let _ = Packet::parse(data);
    let _ = decode(data);
});
