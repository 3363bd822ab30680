//! Debug assertion macros for sequencer and ring buffer invariants.
//!
//! These check the invariants documented in `SPEC_FULL.md` §3 and §8. They are
//! only active in debug builds (`#[cfg(debug_assertions)]`), so there is zero
//! overhead in release builds.

// =============================================================================
// INV-1: read_cursor <= write_cursor at every snapshot
// =============================================================================

macro_rules! debug_assert_read_le_write {
    ($read:expr, $write:expr) => {
        debug_assert!(
            $read <= $write,
            "INV-1 violated: read_cursor {} exceeded write_cursor {}",
            $read,
            $write
        )
    };
}

// =============================================================================
// INV-2: write_cursor - read_cursor <= capacity (no overwrite of unread data)
// =============================================================================

macro_rules! debug_assert_no_overwrite {
    ($write:expr, $read:expr, $capacity:expr) => {
        debug_assert!(
            $write.wrapping_sub($read) <= $capacity,
            "INV-2 violated: write_cursor {} outran read_cursor {} by more than capacity {}",
            $write,
            $read,
            $capacity
        )
    };
}

// =============================================================================
// INV-5: capacity is a power of two >= 2
// =============================================================================

macro_rules! debug_assert_power_of_two {
    ($capacity:expr) => {
        debug_assert!(
            $capacity >= 2 && ($capacity & ($capacity - 1)) == 0,
            "INV-5 violated: capacity {} is not a power of two >= 2",
            $capacity
        )
    };
}

// =============================================================================
// INV-4: a cell's stamp is monotone non-decreasing across its publications
// =============================================================================

macro_rules! debug_assert_stamp_monotonic {
    ($old:expr, $new:expr) => {
        debug_assert!(
            $new > $old,
            "INV-4 violated: cell stamp went from {} to {}, expected strictly increasing",
            $old,
            $new
        )
    };
}

pub(crate) use debug_assert_no_overwrite;
pub(crate) use debug_assert_power_of_two;
pub(crate) use debug_assert_read_le_write;
pub(crate) use debug_assert_stamp_monotonic;
