//! String helpers shared by the domain and the console output.

/// Collapse all whitespace runs into single spaces and cap the result at
/// `max_chars` characters, appending `...` when something was cut.
///
/// Customer inputs often arrive with embedded newlines; this keeps a
/// progress line or log field on one line.
pub fn one_line_preview(s: &str, max_chars: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let keep = max_chars.saturating_sub(3);
    let mut out: String = collapsed.chars().take(keep).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_untouched() {
        assert_eq!(one_line_preview("burst pipe", 20), "burst pipe");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            one_line_preview("water\n  tastes\tfunny", 40),
            "water tastes funny"
        );
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        assert_eq!(one_line_preview("my water bill is wrong", 10), "my wate...");
        assert_eq!(one_line_preview("水道料金が高すぎます", 6), "水道料...");
    }
}
