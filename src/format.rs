//! Human-readable byte counts

const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Format bytes with binary (1024) steps and one decimal place
///
/// ```
/// use synology_dsm_exporter::format::bytes_to_readable;
///
/// assert_eq!(bytes_to_readable(512), "512 B");
/// assert_eq!(bytes_to_readable(1_073_741_824), "1.0 GB");
/// ```
pub fn bytes_to_readable(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}
