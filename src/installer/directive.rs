//! Interpreter directive injection
//!
//! Works on in-memory lines only; the pipeline writes the result at commit time.
//! Lines are raw bytes, so scripts in any encoding pass through unchanged.

use crate::config::SourceKindTable;
use crate::error::{PyexError, Result};

/// One line of a script, without its `\n`
pub type Line = Vec<u8>;

/// Result of [`inject`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injection {
    /// First line already was the required directive
    Unchanged(Vec<Line>),
    /// Directive and a blank separator line were prepended
    Injected(Vec<Line>),
}

#[cfg(test)]
impl Injection {
    pub fn lines(&self) -> &[Line] {
        match self {
            Injection::Unchanged(lines) | Injection::Injected(lines) => lines,
        }
    }

    pub fn is_injected(&self) -> bool {
        matches!(self, Injection::Injected(_))
    }
}

/// Split content on `\n`. A trailing newline yields a trailing empty line, so
/// [`join_lines`] restores the content exactly.
pub fn split_lines(content: &[u8]) -> Vec<Line> {
    content.split(|&b| b == b'\n').map(<[u8]>::to_vec).collect()
}

pub fn join_lines(lines: &[Line]) -> Vec<u8> {
    lines.join(&b'\n')
}

/// Prepend the directive for `suffix` unless the first line already is that directive.
///
/// `suffix` must be a recognized kind; anything else means the caller skipped
/// validation and is reported as [`PyexError::DirectiveInjectorMisuse`].
pub fn inject(lines: Vec<Line>, suffix: &str, kinds: &SourceKindTable) -> Result<Injection> {
    let directive = kinds
        .directive_for(suffix)
        .ok_or_else(|| PyexError::DirectiveInjectorMisuse {
            suffix: suffix.to_string(),
        })?;

    if lines.first().map(Vec::as_slice) == Some(directive.as_bytes()) {
        return Ok(Injection::Unchanged(lines));
    }

    let mut injected = Vec::with_capacity(lines.len() + 2);
    injected.push(directive.as_bytes().to_vec());
    injected.push(Vec::new());
    injected.extend(lines);
    Ok(Injection::Injected(injected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<Line> {
        split_lines(text.as_bytes())
    }

    #[test]
    fn test_inject_prepends_directive_and_blank_line() {
        let kinds = SourceKindTable::default();
        let result = inject(lines("print('a')\nprint('b')\n"), ".py", &kinds).unwrap();

        assert!(result.is_injected());
        assert_eq!(
            join_lines(result.lines()),
            b"#!/bin/python3\n\nprint('a')\nprint('b')\n"
        );
    }

    #[test]
    fn test_inject_is_idempotent_for_every_kind() {
        let kinds = SourceKindTable::default();
        for (suffix, directive) in kinds.entries() {
            let original = lines(&format!("{directive}\necho body\n"));
            let result = inject(original.clone(), suffix, &kinds).unwrap();
            assert_eq!(result, Injection::Unchanged(original));
        }
    }

    #[test]
    fn test_inject_twice_only_adds_one_directive() {
        let kinds = SourceKindTable::default();
        let once = inject(lines("echo hi"), ".sh", &kinds).unwrap();
        let twice = inject(once.lines().to_vec(), ".sh", &kinds).unwrap();

        assert!(!twice.is_injected());
        assert_eq!(twice.lines(), once.lines());
    }

    #[test]
    fn test_inject_preserves_existing_foreign_directive() {
        let kinds = SourceKindTable::default();
        let result = inject(lines("#!/usr/bin/env python3\nprint(1)"), ".py", &kinds).unwrap();

        assert_eq!(
            join_lines(result.lines()),
            b"#!/bin/python3\n\n#!/usr/bin/env python3\nprint(1)"
        );
    }

    #[test]
    fn test_inject_empty_file() {
        let kinds = SourceKindTable::default();
        let result = inject(lines(""), ".sh", &kinds).unwrap();
        assert_eq!(join_lines(result.lines()), b"#!/bin/bash\n\n");
    }

    #[test]
    fn test_inject_keeps_non_utf8_content() {
        let kinds = SourceKindTable::default();
        let content = b"echo caf\xe9\n";
        let result = inject(split_lines(content), ".sh", &kinds).unwrap();

        assert_eq!(join_lines(result.lines()), b"#!/bin/bash\n\necho caf\xe9\n");
    }

    #[test]
    fn test_inject_unknown_suffix_is_misuse() {
        let kinds = SourceKindTable::default();
        let err = inject(lines("puts 1"), ".rb", &kinds).unwrap_err();
        assert!(matches!(err, PyexError::DirectiveInjectorMisuse { .. }));
    }

    #[test]
    fn test_split_join_preserves_content() {
        for content in [&b""[..], b"a", b"a\n", b"a\n\nb", b"a\r\nb\r\n", b"\xff\xfe\n"] {
            assert_eq!(join_lines(&split_lines(content)), content);
        }
    }
}
