//! Colored plan output.

pub use anstream::println as aprintln;

/// Tokyo Night color palette
#[allow(dead_code)]
pub mod colors {
    pub const RESET: &str = "\x1b[0m";

    pub const TKN_RED: &str = "\x1b[38;2;247;118;142m"; // #f7768e
    pub const TKN_GREEN: &str = "\x1b[38;2;158;206;106m"; // #9ece6a
    pub const TKN_YELLOW: &str = "\x1b[38;2;224;175;104m"; // #e0af68
    pub const TKN_BLUE: &str = "\x1b[38;2;122;162;247m"; // #7aa2f7
    pub const TKN_CYAN: &str = "\x1b[38;2;125;207;255m"; // #7dcfff
}

fn paint(color: &str, text: &str) -> String {
    format!("{}{}{}", color, text, colors::RESET)
}

pub fn p_g(text: &str) -> String {
    paint(colors::TKN_GREEN, text)
}

pub fn p_r(text: &str) -> String {
    paint(colors::TKN_RED, text)
}

pub fn p_y(text: &str) -> String {
    paint(colors::TKN_YELLOW, text)
}

pub fn p_b(text: &str) -> String {
    paint(colors::TKN_BLUE, text)
}

pub fn p_c(text: &str) -> String {
    paint(colors::TKN_CYAN, text)
}

/// Colors plan lines by their marker: additions green, removals red,
/// changes yellow. Nested `+` lines keep their indentation.
pub fn colorize_plan(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| match line.trim_start().chars().next() {
            Some('+') => p_g(line),
            Some('-') => p_r(line),
            Some('~') => p_y(line),
            _ => line.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_plan_by_marker() {
        let lines = vec![
            "+ Table: items".to_string(),
            "  + /items".to_string(),
            "  Partition key: itemId (S)".to_string(),
        ];

        let colored = colorize_plan(&lines);

        assert_eq!(colored[0], p_g("+ Table: items"));
        assert_eq!(colored[1], p_g("  + /items"));
        assert_eq!(colored[2], "  Partition key: itemId (S)");
    }

    #[test]
    fn test_paint_wraps_with_reset() {
        let text = p_b("x");
        assert!(text.starts_with(colors::TKN_BLUE));
        assert!(text.ends_with(colors::RESET));
    }
}
