/// Split text into raw lines. A trailing `\r` is not part of the line.
pub(crate) fn line_units(text: &str) -> Vec<&str> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

/// Join one group of lines; the result is trimmed and may be empty.
pub(crate) fn join_lines(group: &[&str]) -> String {
    group.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_blank_lines_as_units() {
        assert_eq!(line_units("a\n\nb"), vec!["a", "", "b"]);
    }

    #[test]
    fn strips_carriage_returns() {
        assert_eq!(line_units("a\r\nb\r\n"), vec!["a", "b", ""]);
    }

    #[test]
    fn whitespace_only_text_has_no_units() {
        assert!(line_units("").is_empty());
        assert!(line_units(" \n\t\n").is_empty());
    }

    #[test]
    fn join_trims_group() {
        assert_eq!(join_lines(&["  Arma virumque", "cano  "]), "Arma virumque\ncano");
        assert_eq!(join_lines(&["", "  "]), "");
    }
}
