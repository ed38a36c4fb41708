//! Small formatting helpers shared by the TUI and CLI output.

/// Formats a byte count with 1024-based units.
///
/// Below one kilobyte the exact byte count is shown; everything above is
/// rendered with two decimals in the largest unit that keeps the value
/// readable. No locale separators, literal `.` decimal point.
pub fn to_human_size(size: u64) -> String {
    const SCALE: f64 = 1024.0;
    let kb = size as f64 / SCALE;
    let mb = kb / SCALE;
    let gb = mb / SCALE;
    let tb = gb / SCALE;

    if size < 1024 {
        format!("{} Bytes", size)
    } else if size < 1024 * 1024 {
        format!("{:.2} KB", kb)
    } else if size < 1024 * 1024 * 1024 {
        format!("{:.2} MB", mb)
    } else if size < 1024 * 1024 * 1024 * 1024 {
        format!("{:.2} GB", gb)
    } else {
        format!("{:.2} TB", tb)
    }
}

/// Shortens `text` to `max_width` characters, cutting out the middle.
///
/// File names tend to carry their distinguishing parts at both ends
/// (episode numbers, extensions), so the middle is what goes.
pub fn middle_ellipsis(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    if max_width <= 1 {
        return "…".to_string();
    }

    let keep = max_width - 1;
    let head = keep.div_ceil(2);
    let tail = keep - head;

    let mut shortened: String = chars.iter().take(head).collect();
    shortened.push('…');
    shortened.extend(chars.iter().skip(chars.len() - tail));
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_below_one_kb_are_exact() {
        assert_eq!(to_human_size(0), "0 Bytes");
        assert_eq!(to_human_size(500), "500 Bytes");
        assert_eq!(to_human_size(1023), "1023 Bytes");
    }

    #[test]
    fn kilobytes_carry_two_decimals() {
        assert_eq!(to_human_size(1024), "1.00 KB");
        assert_eq!(to_human_size(1536), "1.50 KB");
        assert_eq!(to_human_size(2048), "2.00 KB");
    }

    #[test]
    fn unit_boundaries_round_up_into_the_smaller_unit() {
        // One byte short of 1 MB still formats as KB
        assert_eq!(to_human_size(1024 * 1024 - 1), "1024.00 KB");
        assert_eq!(to_human_size(1024 * 1024), "1.00 MB");
    }

    #[test]
    fn large_magnitudes() {
        assert_eq!(to_human_size(1_073_741_824), "1.00 GB");
        assert_eq!(to_human_size(5 * 1024 * 1024 * 1024 / 2), "2.50 GB");
        assert_eq!(to_human_size(1024u64.pow(4)), "1.00 TB");
        assert_eq!(to_human_size(3 * 1024u64.pow(4)), "3.00 TB");
    }

    #[test]
    fn ellipsis_keeps_both_ends() {
        assert_eq!(middle_ellipsis("short.mkv", 20), "short.mkv");
        assert_eq!(middle_ellipsis("a-very-long-episode-name.mkv", 11), "a-ver…e.mkv");
        assert_eq!(middle_ellipsis("abcdef", 1), "…");
        assert_eq!(middle_ellipsis("abcdef", 0), "");
    }
}
