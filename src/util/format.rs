const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;
const GB: u64 = 1024 * 1024 * 1024;

/// Format a byte count as a human-readable string (B, KB, MB, GB).
///
/// Exact multiples of the chosen unit render without decimals, anything
/// else renders with four fractional digits. Below 1 KB the plain byte
/// count is used.
pub fn format_size(bytes: u64) -> String {
    let (unit, label) = if bytes >= GB {
        (GB, "GB")
    } else if bytes >= MB {
        (MB, "MB")
    } else if bytes >= KB {
        (KB, "KB")
    } else {
        return format!("{} B", bytes);
    };

    if bytes % unit == 0 {
        format!("{} {}", bytes / unit, label)
    } else {
        format!("{:.4} {}", bytes as f64 / unit as f64, label)
    }
}
