/// Parse a line-oriented URL list: trims each line, drops blank lines
/// and `#` comments.
pub fn parse_url_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::parse_url_lines;

    #[test]
    fn keeps_trimmed_entries_in_order() {
        let raw = "  https://a.example/one \nhttps://a.example/two\n";
        assert_eq!(
            parse_url_lines(raw),
            vec!["https://a.example/one", "https://a.example/two"]
        );
    }

    #[test]
    fn drops_blanks_and_comments() {
        let raw = "\n# header comment\nhttps://a.example/x\n   \n  # indented comment\n";
        assert_eq!(parse_url_lines(raw), vec!["https://a.example/x"]);
    }

    #[test]
    fn empty_input_yields_no_entries() {
        assert!(parse_url_lines("").is_empty());
        assert!(parse_url_lines("\n\n# only comments\n").is_empty());
    }
}
