//! Clock-tick formatting helpers.

/// Format a tick count as a human-readable duration, assuming one-second
/// ticks (the common configuration for timestamp-clocked ledgers).
pub fn format_ticks(ticks: u64) -> String {
    if ticks < 60 {
        format!("{}s", ticks)
    } else if ticks < 3600 {
        format!("{}m {}s", ticks / 60, ticks % 60)
    } else if ticks < 86400 {
        format!("{}h {}m", ticks / 3600, (ticks % 3600) / 60)
    } else {
        format!("{}d {}h", ticks / 86400, (ticks % 86400) / 3600)
    }
}
