//! Script file reader.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Read a script file into lines with leading whitespace removed.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text.lines().map(|line| line.trim_start().to_string()).collect())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn script_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_lines_trims_leading_whitespace() {
        let file = script_file("  note A\n\ttype_line echo hi\n");
        let lines = read_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["note A", "type_line echo hi"]);
    }

    #[test]
    fn test_read_lines_keeps_blank_and_comment_lines() {
        let file = script_file("note A\n\n# comment\n");
        let lines = read_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["note A", "", "# comment"]);
    }

    #[test]
    fn test_read_lines_keeps_trailing_whitespace() {
        let file = script_file("type_line echo hi  \n");
        let lines = read_lines(file.path()).unwrap();
        assert_eq!(lines, vec!["type_line echo hi  "]);
    }

    #[test]
    fn test_read_lines_missing_file() {
        assert!(read_lines("/no/such/script.gupty").is_err());
    }
}
