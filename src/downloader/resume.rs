//! Whether an existing destination can be appended to.

use crate::http::probe::BYTES_RANGE_UNIT;

/// Decide whether to resume into the existing destination.
///
/// Resuming requires a non-empty destination, a server serving byte ranges,
/// and no explicit range from the caller. Anything else means the existing
/// file is stale and must be replaced, since appending to it would corrupt
/// the output.
pub fn can_resume(accept_ranges: &str, explicit_range: bool, existing_size: u64) -> bool {
    existing_size > 0 && accept_ranges == BYTES_RANGE_UNIT && !explicit_range
}
