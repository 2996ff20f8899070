//! Property test: the compact (5-step) and unrolled (two-rounds-merged)
//! Keccak-f[1600] implementations must agree bit-for-bit on every input.

use proptest::prelude::*;
use rcs::keccak::{compact, unrolled};

proptest! {
    #[test]
    fn compact_and_unrolled_agree(bytes in prop::collection::vec(any::<u8>(), 200)) {
        let mut lanes_compact = [0u64; 25];
        let mut lanes_unrolled = [0u64; 25];

        for (i, chunk) in bytes.chunks(8).enumerate() {
            let mut lane = [0u8; 8];
            lane.copy_from_slice(chunk);
            let value = u64::from_le_bytes(lane);
            lanes_compact[i] = value;
            lanes_unrolled[i] = value;
        }

        compact::permute::<24>(&mut lanes_compact);
        unrolled::permute::<24>(&mut lanes_unrolled);

        prop_assert_eq!(lanes_compact, lanes_unrolled);
    }

    #[test]
    fn compact_and_unrolled_agree_reduced_round(bytes in prop::collection::vec(any::<u8>(), 200)) {
        let mut lanes_compact = [0u64; 25];
        let mut lanes_unrolled = [0u64; 25];

        for (i, chunk) in bytes.chunks(8).enumerate() {
            let mut lane = [0u8; 8];
            lane.copy_from_slice(chunk);
            let value = u64::from_le_bytes(lane);
            lanes_compact[i] = value;
            lanes_unrolled[i] = value;
        }

        compact::permute::<12>(&mut lanes_compact);
        unrolled::permute::<12>(&mut lanes_unrolled);

        prop_assert_eq!(lanes_compact, lanes_unrolled);
    }
}
