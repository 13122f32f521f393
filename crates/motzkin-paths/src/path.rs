//! Path alphabet and validity rules.
//!
//! A Motzkin path is a string over `.`, `(` and `)` whose marks balance like
//! parentheses and where every matched pair encloses at least `min_width`
//! symbols. The counter and enumerator never build an invalid path; these
//! checks exist so callers (and the self-test) can confirm that.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One symbol of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbol {
    /// An unpaired position.
    Dot,
    /// Opening mark of a matched pair.
    Open,
    /// Closing mark of a matched pair.
    Close,
}

impl Symbol {
    pub const fn as_char(self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Open => '(',
            Symbol::Close => ')',
        }
    }

    pub fn from_char(c: char) -> Option<Symbol> {
        match c {
            '.' => Some(Symbol::Dot),
            '(' => Some(Symbol::Open),
            ')' => Some(Symbol::Close),
            _ => None,
        }
    }
}

/// Reason a string is not a Motzkin path of the requested width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum PathViolation {
    /// Character outside the path alphabet.
    UnknownSymbol { index: usize, found: char },
    /// A close mark with no open mark before it.
    UnmatchedClose { index: usize },
    /// An open mark that is never closed.
    UnclosedOpen { index: usize },
    /// A matched pair enclosing fewer than `min_width` symbols.
    TooNarrow {
        open: usize,
        close: usize,
        width: usize,
        min_width: usize,
    },
}

impl std::fmt::Display for PathViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathViolation::UnknownSymbol { index, found } => {
                write!(f, "unknown symbol {:?} at {}", found, index)
            }
            PathViolation::UnmatchedClose { index } => {
                write!(f, "close mark at {} has no matching open mark", index)
            }
            PathViolation::UnclosedOpen { index } => {
                write!(f, "open mark at {} is never closed", index)
            }
            PathViolation::TooNarrow {
                open,
                close,
                width,
                min_width,
            } => write!(
                f,
                "pair ({}, {}) encloses {} symbols, need at least {}",
                open, close, width, min_width
            ),
        }
    }
}

/// Check prefix balance, total balance and pair width for `path`.
///
/// Indices are character positions. The first violation found scanning left
/// to right is reported; unclosed opens are reported innermost first.
pub fn validate_path(path: &str, min_width: usize) -> Result<(), PathViolation> {
    // Positions of currently open marks. Paths are short in practice.
    let mut open: SmallVec<[usize; 16]> = SmallVec::new();

    for (index, c) in path.chars().enumerate() {
        match Symbol::from_char(c) {
            None => return Err(PathViolation::UnknownSymbol { index, found: c }),
            Some(Symbol::Dot) => {}
            Some(Symbol::Open) => open.push(index),
            Some(Symbol::Close) => {
                let start = open
                    .pop()
                    .ok_or(PathViolation::UnmatchedClose { index })?;
                let width = index - start - 1;
                if width < min_width {
                    return Err(PathViolation::TooNarrow {
                        open: start,
                        close: index,
                        width,
                        min_width,
                    });
                }
            }
        }
    }

    match open.pop() {
        Some(index) => Err(PathViolation::UnclosedOpen { index }),
        None => Ok(()),
    }
}

pub fn is_valid_path(path: &str, min_width: usize) -> bool {
    validate_path(path, min_width).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_chars() {
        for symbol in [Symbol::Dot, Symbol::Open, Symbol::Close] {
            assert_eq!(Symbol::from_char(symbol.as_char()), Some(symbol));
        }
        assert_eq!(Symbol::from_char('x'), None);
    }

    #[test]
    fn test_valid_paths() {
        assert!(is_valid_path("", 0));
        assert!(is_valid_path("", 5));
        assert!(is_valid_path("(...)(())...", 0));
        assert!(is_valid_path(".(.(.....))", 5));
        assert!(is_valid_path(".(.(...))", 3));
        assert!(is_valid_path("(.(...))", 3));
    }

    #[test]
    fn test_too_narrow() {
        assert_eq!(
            validate_path(".(.(..))", 3),
            Err(PathViolation::TooNarrow {
                open: 3,
                close: 6,
                width: 2,
                min_width: 3
            })
        );
        assert!(!is_valid_path("()......", 3));
        // Nested marks count toward the enclosing pair's width.
        assert!(is_valid_path("(())", 2));
        assert!(!is_valid_path("(())", 3));
    }

    #[test]
    fn test_unbalanced() {
        assert_eq!(
            validate_path(".)(.()", 0),
            Err(PathViolation::UnmatchedClose { index: 1 })
        );
        assert_eq!(
            validate_path(".(.(...)", 3),
            Err(PathViolation::UnclosedOpen { index: 1 })
        );
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(
            validate_path("(.x)", 0),
            Err(PathViolation::UnknownSymbol {
                index: 2,
                found: 'x'
            })
        );
    }

    #[test]
    fn test_violation_serializes_with_kind_tag() {
        let json = serde_json::to_value(PathViolation::UnmatchedClose { index: 4 }).unwrap();
        assert_eq!(json["kind"], "unmatchedClose");
        assert_eq!(json["index"], 4);
    }
}
