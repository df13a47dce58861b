//! Claimed-set arithmetic: bit `i` of the bitmap is set iff entry `i` was paid out.

/// Width of the claimed bitmap used by the first deployments (2 bytes).
pub const LEGACY_MAX_NUM_NODES: u32 = 16;

/// Upper bound on entries per distributor, keeps the account well under the
/// 10KiB limit for accounts created through CPI.
pub const MAX_NUM_NODES: u32 = 65_536;

/// Number of bytes needed to track `max_num_nodes` entries.
pub fn bitmap_len(max_num_nodes: u32) -> usize {
    (max_num_nodes as usize + 7) / 8
}

/// Number of indices representable by `bitmap`.
pub fn capacity(bitmap: &[u8]) -> u64 {
    bitmap.len() as u64 * 8
}

fn locate(bitmap: &[u8], index: u32) -> Option<(usize, u8)> {
    let byte_index = (index / 8) as usize;
    if byte_index >= bitmap.len() {
        return None;
    }
    Some((byte_index, 1u8 << (index % 8)))
}

/// `None` when `index` does not fit in the bitmap.
pub fn is_claimed(bitmap: &[u8], index: u32) -> Option<bool> {
    let (byte_index, mask) = locate(bitmap, index)?;
    Some(bitmap[byte_index] & mask != 0)
}

/// Sets bit `index` and returns whether it was already set.
/// `None` when `index` does not fit in the bitmap.
pub fn set_claimed(bitmap: &mut [u8], index: u32) -> Option<bool> {
    let (byte_index, mask) = locate(bitmap, index)?;
    let was_claimed = bitmap[byte_index] & mask != 0;
    bitmap[byte_index] |= mask;
    Some(was_claimed)
}

/// Number of set bits.
pub fn claimed_count(bitmap: &[u8]) -> u64 {
    bitmap.iter().map(|b| b.count_ones() as u64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_len() {
        assert_eq!(bitmap_len(0), 0);
        assert_eq!(bitmap_len(1), 1);
        assert_eq!(bitmap_len(10), 2);
        assert_eq!(bitmap_len(LEGACY_MAX_NUM_NODES), 2);
        assert_eq!(bitmap_len(17), 3);
        assert_eq!(bitmap_len(MAX_NUM_NODES), 8192);
    }

    #[test]
    fn test_set_and_check() {
        let mut bitmap = vec![0u8; bitmap_len(LEGACY_MAX_NUM_NODES)];
        assert_eq!(is_claimed(&bitmap, 0), Some(false));
        assert_eq!(set_claimed(&mut bitmap, 0), Some(false));
        assert_eq!(is_claimed(&bitmap, 0), Some(true));
        assert_eq!(is_claimed(&bitmap, 1), Some(false));
        assert_eq!(set_claimed(&mut bitmap, 0), Some(true));

        assert_eq!(set_claimed(&mut bitmap, 9), Some(false));
        assert_eq!(bitmap, vec![0b0000_0001, 0b0000_0010]);
        assert_eq!(claimed_count(&bitmap), 2);
    }

    #[test]
    fn test_capacity_boundary() {
        let mut bitmap = vec![0u8; bitmap_len(LEGACY_MAX_NUM_NODES)];
        assert_eq!(capacity(&bitmap), 16);
        assert_eq!(set_claimed(&mut bitmap, 15), Some(false));
        assert_eq!(is_claimed(&bitmap, 16), None);
        assert_eq!(set_claimed(&mut bitmap, 16), None);
        assert_eq!(set_claimed(&mut bitmap, u32::MAX), None);
    }
}
