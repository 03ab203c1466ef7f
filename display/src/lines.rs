//! Static metadata for the transit lines shown on the display.

use std::collections::HashMap;
use std::sync::LazyLock;

pub const DEFAULT_LINE_COLOR: &str = "#6c757d";

static LINE_COLORS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("line_1", "#ff6b6b"),
        ("line_2", "#4ecdc4"),
        ("line_3", "#ffe66d"),
        ("line_4", "#1a535c"),
        ("line_5", "#9b5de5"),
        ("line_6", "#f15bb5"),
        ("line_7", "#fee440"),
        ("line_8", "#00bbf9"),
        ("line_9", "#00f5d4"),
    ])
});

static LINE_NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("line_1", "1号线"),
        ("line_2", "2号线"),
        ("line_3", "3号线"),
        ("line_4", "4号线"),
        ("line_5", "5号线"),
        ("line_6", "6号线"),
        ("line_7", "7号线"),
        ("line_8", "8号线"),
        ("line_9", "9号线"),
    ])
});

/// CSS color for a line, or [`DEFAULT_LINE_COLOR`] when the line is unknown.
pub fn line_color(line_id: &str) -> &'static str {
    LINE_COLORS
        .get(line_id)
        .copied()
        .unwrap_or(DEFAULT_LINE_COLOR)
}

/// Human-readable name for a line. Unknown ids are shown as-is.
pub fn line_display_name(line_id: &str) -> &str {
    LINE_NAMES.get(line_id).copied().unwrap_or(line_id)
}
