//! Human-readable byte sizes.

const KB: f64 = 1024.0;

/// Format `bytes` with binary units: `B`, `KB` and `MB` to two decimals,
/// `GB` and `TB` to three.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let kb = bytes as f64 / KB;
    if kb < KB {
        return format!("{:.2} KB", kb);
    }
    let mb = kb / KB;
    if mb < KB {
        return format!("{:.2} MB", mb);
    }
    let gb = mb / KB;
    if gb < KB {
        return format!("{:.3} GB", gb);
    }
    format!("{:.3} TB", gb / KB)
}
