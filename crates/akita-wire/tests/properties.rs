//! Property tests for the decoding pipeline

use akita_core::{DestinationId, DATA_FRAME_COMMAND, DEFAULT_MAX_BUFFER, FRAME_DELIMITER};
use akita_wire::{decode, encode, escape, Deframer, Ingestor, Packet, PacketFlags};
use proptest::prelude::*;

fn arb_packet() -> impl Strategy<Value = Packet> {
    (
        any::<u8>(),
        any::<u8>(),
        any::<[u8; 16]>(),
        any::<u8>(),
        prop::collection::vec(any::<u8>(), 0..64),
    )
        .prop_map(|(flags, hops, destination, context, data)| Packet {
            flags: PacketFlags::from_byte(flags),
            hops,
            destination: DestinationId::new(destination),
            context,
            data,
        })
}

/// Split `stream` at the given cut points
fn split_at_points(stream: &[u8], mut cuts: Vec<usize>) -> Vec<&[u8]> {
    cuts.iter_mut().for_each(|c| *c %= stream.len() + 1);
    cuts.sort_unstable();
    cuts.dedup();

    let mut chunks = Vec::new();
    let mut prev = 0;
    for cut in cuts {
        chunks.push(&stream[prev..cut]);
        prev = cut;
    }
    chunks.push(&stream[prev..]);
    chunks
}

proptest! {
    #[test]
    fn escape_roundtrip(payload in prop::collection::vec(any::<u8>(), 0..512)) {
        let mut framed = vec![FRAME_DELIMITER];
        framed.extend(escape(&payload));
        framed.push(FRAME_DELIMITER);

        prop_assert_eq!(decode(&framed).unwrap(), payload.clone());
        prop_assert_eq!(framed, encode(&payload));
    }

    #[test]
    fn escaped_payload_has_no_delimiter(payload in prop::collection::vec(any::<u8>(), 0..512)) {
        prop_assert!(!escape(&payload).contains(&FRAME_DELIMITER));
    }

    #[test]
    fn chunking_does_not_change_frames(
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..48), 1..8),
        cuts in prop::collection::vec(any::<usize>(), 0..16),
    ) {
        let stream: Vec<u8> = payloads.iter().flat_map(|p| encode(p)).collect();

        let mut deframer = Deframer::default();
        let mut decoded = Vec::new();
        for chunk in split_at_points(&stream, cuts) {
            for frame in deframer.feed(chunk) {
                decoded.push(frame.unwrap().decode().unwrap());
            }
        }

        prop_assert_eq!(decoded, payloads);
        prop_assert_eq!(deframer.buffered(), 0);
    }

    #[test]
    fn header_roundtrip(packet in arb_packet()) {
        let mut prefixed = vec![DATA_FRAME_COMMAND];
        prefixed.extend(packet.to_bytes());
        prop_assert_eq!(Packet::parse(&prefixed).unwrap(), packet.clone());

        if packet.flags.to_byte() != DATA_FRAME_COMMAND {
            prop_assert_eq!(Packet::parse(&packet.to_bytes()).unwrap(), packet);
        }
    }

    #[test]
    fn ingest_recovers_every_packet(
        packets in prop::collection::vec(arb_packet(), 1..6),
        cuts in prop::collection::vec(any::<usize>(), 0..16),
    ) {
        let stream: Vec<u8> = packets.iter().flat_map(|p| p.to_kiss_frame(true)).collect();

        let mut ingestor = Ingestor::default();
        let mut decoded = Vec::new();
        for chunk in split_at_points(&stream, cuts) {
            for result in ingestor.ingest(chunk) {
                decoded.push(result.unwrap());
            }
        }

        prop_assert_eq!(decoded, packets);
    }

    #[test]
    fn arbitrary_bytes_never_exceed_cap(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..700), 0..8),
    ) {
        let mut ingestor = Ingestor::default();
        for chunk in &chunks {
            let _ = ingestor.ingest(chunk);
            prop_assert!(ingestor.deframer().buffered() <= DEFAULT_MAX_BUFFER);
        }
    }
}
