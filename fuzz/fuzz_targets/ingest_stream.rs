#![no_main]

use akita_core::DEFAULT_MAX_BUFFER;
use akita_wire::Ingestor;
use libfuzzer_sys::fuzz_target;

// First byte picks the chunk size, the rest is the stream.
fuzz_target!(|data: &[u8]| {
    let Some((&chunk, stream)) = data.split_first() else {
        return;
    };
    let chunk = usize::from(chunk).max(1);

    let mut ingestor = Ingestor::default();
    for piece in stream.chunks(chunk) {
        let _ = ingestor.ingest(piece);
        assert!(ingestor.deframer().buffered() <= DEFAULT_MAX_BUFFER);
    }
});
