//! Line-level parsing of `key=value` text.
//!
//! Import lines are parsed in two steps so the caller can warn about a
//! space delimiter before the key itself is validated.

use crate::error::{KonfigError, KonfigResult};

/// Section completed onto bare keys by `import --alias`.
pub const ALIAS_SECTION: &str = "alias";

/// How a line was classified before splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Content,
}

/// Classify an already trimmed import line.
pub fn classify(line: &str) -> LineKind {
    if line.is_empty() {
        LineKind::Blank
    } else if line.starts_with('#') || line.starts_with("//") {
        LineKind::Comment
    } else {
        LineKind::Content
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Equals,
    Space,
}

/// A line split into raw key and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLine<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub delimiter: Delimiter,
}

/// Split at the first `=`, falling back to the first space.
///
/// Whitespace around the key is dropped; the value is kept verbatim.
pub fn split_delimited(line: &str) -> KonfigResult<SplitLine<'_>> {
    let (pos, delimiter) = match line.find('=') {
        Some(pos) => (pos, Delimiter::Equals),
        None => match line.find(' ') {
            Some(pos) => (pos, Delimiter::Space),
            None => return Err(KonfigError::NoDelimiter),
        },
    };
    Ok(SplitLine {
        key: line[..pos].trim(),
        value: &line[pos + 1..],
        delimiter,
    })
}

/// Validate that `key` has a section and a variable name.
///
/// A key whose first `.` is missing or leading has no section; with
/// `alias` it is completed to `alias.<key>`. A key whose first `.` is its
/// last character has no variable.
pub fn qualify_key(key: &str, alias: bool) -> KonfigResult<String> {
    let key = match key.find('.') {
        Some(pos) if pos > 0 => key.to_string(),
        _ if alias => format!("{}.{}", ALIAS_SECTION, key),
        _ => return Err(KonfigError::NoSection),
    };
    if key.find('.') == Some(key.len() - 1) {
        return Err(KonfigError::NoVariable);
    }
    Ok(key)
}

/// Whether a `git config --list` line belongs to one of `sections`.
pub fn in_sections<S: AsRef<str>>(line: &str, sections: &[S]) -> bool {
    sections.iter().any(|section| {
        line.strip_prefix(section.as_ref())
            .is_some_and(|rest| rest.starts_with('.'))
    })
}

/// Split a `git config --list` line at its first `=`.
pub fn split_list_line(line: &str) -> Option<(&str, &str)> {
    line.split_once('=')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("# aliases"), LineKind::Comment);
        assert_eq!(classify("// aliases"), LineKind::Comment);
        assert_eq!(classify("/alias.st=status"), LineKind::Content);
        assert_eq!(classify("alias.st=status"), LineKind::Content);
    }

    #[test]
    fn test_split_prefers_equals() {
        let split = split_delimited("alias.lg=log --oneline --graph").unwrap();
        assert_eq!(split.key, "alias.lg");
        assert_eq!(split.value, "log --oneline --graph");
        assert_eq!(split.delimiter, Delimiter::Equals);
    }

    #[test]
    fn test_split_keeps_later_equals_in_value() {
        let split = split_delimited("alias.x=!git -c a=b status").unwrap();
        assert_eq!(split.key, "alias.x");
        assert_eq!(split.value, "!git -c a=b status");
    }

    #[test]
    fn test_split_falls_back_to_space() {
        let split = split_delimited("alias.co checkout").unwrap();
        assert_eq!(split.key, "alias.co");
        assert_eq!(split.value, "checkout");
        assert_eq!(split.delimiter, Delimiter::Space);
    }

    #[test]
    fn test_split_keeps_value_whitespace() {
        let split = split_delimited("alias.x =  foo").unwrap();
        assert_eq!(split.key, "alias.x");
        assert_eq!(split.value, "  foo");

        let split = split_delimited("a.b  c").unwrap();
        assert_eq!(split.key, "a.b");
        assert_eq!(split.value, " c");
        assert_eq!(split.delimiter, Delimiter::Space);
    }

    #[test]
    fn test_split_without_delimiter() {
        assert!(matches!(
            split_delimited("alias.st"),
            Err(KonfigError::NoDelimiter)
        ));
    }

    #[test]
    fn test_split_empty_value() {
        let split = split_delimited("alias.st=").unwrap();
        assert_eq!(split.key, "alias.st");
        assert_eq!(split.value, "");
    }

    #[test]
    fn test_qualify_key() {
        assert_eq!(qualify_key("alias.st", false).unwrap(), "alias.st");
        assert_eq!(qualify_key("st", true).unwrap(), "alias.st");
        assert_eq!(
            qualify_key("remote.origin.url", false).unwrap(),
            "remote.origin.url"
        );
        assert!(matches!(qualify_key("st", false), Err(KonfigError::NoSection)));
        assert!(matches!(qualify_key(".st", false), Err(KonfigError::NoSection)));
        assert!(matches!(qualify_key("alias.", false), Err(KonfigError::NoVariable)));
        assert!(matches!(qualify_key("alias.", true), Err(KonfigError::NoVariable)));
        assert!(matches!(qualify_key("", true), Err(KonfigError::NoVariable)));
    }

    #[test]
    fn test_in_sections() {
        let sections = ["alias", "user"];
        assert!(in_sections("alias.st=status", &sections));
        assert!(in_sections("user.name=Bob", &sections));
        assert!(!in_sections("aliases.st=status", &sections));
        assert!(!in_sections("core.editor=vim", &sections));
        assert!(!in_sections("alias", &sections));
        let none: [&str; 0] = [];
        assert!(!in_sections("alias.st=status", &none));
    }

    #[test]
    fn test_split_list_line() {
        assert_eq!(split_list_line("user.name=Bob"), Some(("user.name", "Bob")));
        assert_eq!(split_list_line("a.b=c=d"), Some(("a.b", "c=d")));
        assert_eq!(split_list_line("core.bare"), None);
    }
}
