//! Property tests for the bridge protocol.
//!
//! Exercises the two load-bearing guarantees over arbitrary payloads and
//! buffer geometries: compressing then decompressing reproduces the payload
//! byte for byte, and view positions only ever move forward and never pass
//! their limits.

use proptest::prelude::*;
use zstream::{ByteView, Direction, StreamTable};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn round_trip_identity(
        payload in proptest::collection::vec(any::<u8>(), 0..4096),
        out_chunk in 1usize..512,
    ) {
        let mut table = StreamTable::new();
        let deflate = table.open(Direction::Deflate).unwrap();

        let mut input = payload.clone();
        let mut in_view = ByteView::new(&mut input);
        let mut compressed = Vec::new();
        let mut ended = false;
        while !ended {
            let mut buf = vec![0u8; out_chunk];
            let mut out_view = ByteView::new(&mut buf);
            ended = table
                .work(Direction::Deflate, deflate, Some(&mut in_view), &mut out_view, true)
                .unwrap();
            let produced = out_view.position();
            compressed.extend_from_slice(&buf[..produced]);
        }
        table.close(deflate);

        let inflate = table.open(Direction::Inflate).unwrap();
        let mut in_buf = compressed;
        let mut in_view = ByteView::new(&mut in_buf);
        let mut decompressed = Vec::new();
        let mut ended = false;
        while !ended {
            let mut buf = vec![0u8; out_chunk];
            let mut out_view = ByteView::new(&mut buf);
            let input_arg = in_view.has_remaining().then_some(&mut in_view);
            ended = table
                .work(Direction::Inflate, inflate, input_arg, &mut out_view, false)
                .unwrap();
            let produced = out_view.position();
            decompressed.extend_from_slice(&buf[..produced]);
        }
        table.close(inflate);

        prop_assert_eq!(decompressed, payload);
    }

    #[test]
    fn positions_stay_monotonic_and_bounded(
        payload in proptest::collection::vec(any::<u8>(), 0..2048),
        out_chunk in 1usize..128,
    ) {
        let mut table = StreamTable::new();
        let handle = table.open(Direction::Deflate).unwrap();

        let mut input = payload;
        let mut in_view = ByteView::new(&mut input);
        let in_limit = in_view.limit();
        let mut ended = false;
        while !ended {
            let mut buf = vec![0u8; out_chunk];
            let mut out_view = ByteView::new(&mut buf);
            let in_before = in_view.position();
            ended = table
                .work(Direction::Deflate, handle, Some(&mut in_view), &mut out_view, true)
                .unwrap();
            prop_assert!(in_view.position() >= in_before);
            prop_assert!(in_view.position() <= in_view.limit());
            prop_assert_eq!(in_view.limit(), in_limit);
            prop_assert!(out_view.position() <= out_view.limit());
        }
        prop_assert_eq!(in_view.position(), in_limit);
        table.close(handle);
    }
}
