/// Units for [`format_file_size`], in base-1024 steps.
const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count for display next to a selected file.
///
/// Sizes use base-1024 units rounded to two decimals with trailing zeros
/// dropped.  Anything at or past a terabyte stays in GB.
///
/// ```
/// # use advisor_chat::utils::format_file_size;
/// assert_eq!(format_file_size(0), "0 Bytes");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < SIZE_UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }
    let value = format!("{:.2}", bytes as f64 / scale as f64);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{value} {}", SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn whole_units() {
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(1_073_741_824), "1 GB");
    }

    #[test]
    fn fractional_units() {
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1000), "1000 Bytes");
        assert_eq!(format_file_size(1234), "1.21 KB");
        assert_eq!(format_file_size(5 * 1_048_576 + 262_144), "5.25 MB");
    }

    #[test]
    fn rounding_can_reach_next_unit_value() {
        assert_eq!(format_file_size(1_048_575), "1024 KB");
    }

    #[test]
    fn terabytes_stay_in_gigabytes() {
        assert_eq!(format_file_size(1024 * 1_073_741_824), "1024 GB");
    }
}
