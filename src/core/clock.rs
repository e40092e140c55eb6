/*!
Wall-clock helpers for session timestamps.

All timestamps in this subsystem are Unix-epoch seconds; formatting is left
to external collaborators.
*/

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Current Unix time in whole seconds
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}
