const KIB: usize = 1024;
const MIB: usize = 1024 * KIB;

/// Formats a `[0, 1]` style ratio as a percent string, e.g. `0.1234 -> "12.3%"`.
pub fn percent(ratio: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio * 100.0)
}

/// Human readable byte size for user-facing messages.
pub fn byte_size(bytes: usize) -> String {
    if bytes >= MIB {
        if bytes % MIB == 0 {
            format!("{} MB", bytes / MIB)
        } else {
            format!("{:.1} MB", bytes as f64 / MIB as f64)
        }
    } else if bytes >= KIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} bytes")
    }
}
