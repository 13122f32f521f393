//! Lazy enumeration of Motzkin paths.
//!
//! [`MotzkinPaths`] produces paths in the order of the counting recurrence:
//! first every path that starts with a dot, then, for each inside length
//! `inner` from `min_width` up to `length - 2`, every `(inside)after`
//! combination with the inside paths in the outer loop and the after paths in
//! the inner loop.
//!
//! Unrolling that order, a segment of length `len` holding a pair is
//! `dots(len - m) ( inside ) after`, and the segments of a path form a tree:
//! each paired segment owns its inside and its after. The next path is found
//! by walking that tree in reverse preorder and advancing the first segment
//! that still has a choice left, then resetting everything to its right.
//! Segments are kept on an explicit frame list, so neither construction nor
//! iteration recurses, whatever the length.

use std::iter::FusedIterator;

use log::trace;

use crate::path::Symbol;

/// Iterator over every path of a given length and minimum width.
///
/// Each call to [`MotzkinPaths::new`] starts an independent sequence. Nothing
/// is allocated until the first path is requested, and dropping the iterator
/// early releases all of its state.
#[derive(Debug, Clone)]
pub struct MotzkinPaths {
    length: usize,
    width: usize,
    state: State,
}

#[derive(Debug, Clone)]
enum State {
    /// Nothing produced yet. The first path is always all dots.
    Fresh,
    /// The path produced last.
    Active(Vec<Symbol>),
    Done,
}

/// A segment `[start, end)` of the current path, with the first pair it
/// contains, if any.
#[derive(Debug, Clone, Copy)]
struct SegmentFrame {
    start: usize,
    end: usize,
    /// Positions of the segment's first open mark and its matching close.
    pair: Option<(usize, usize)>,
}

impl SegmentFrame {
    /// Move this segment to its next layout, leaving its inside and after
    /// as all dots. Returns false when the segment has no layout left.
    fn advance(&self, path: &mut [Symbol], width: usize) -> bool {
        let len = self.end - self.start;
        // `m` is the length from the open mark to the end of the segment.
        let (m, inner) = match self.pair {
            None if len >= 2 && len - 2 >= width => (width + 2, width),
            None => return false,
            Some((open, close)) => {
                let m = self.end - open;
                let inner = close - open - 1;
                if inner + 3 <= m {
                    (m, inner + 1)
                } else if m < len {
                    (m + 1, width)
                } else {
                    return false;
                }
            }
        };

        path[self.start..self.end].fill(Symbol::Dot);
        let open = self.end - m;
        path[open] = Symbol::Open;
        path[open + inner + 1] = Symbol::Close;
        true
    }
}

/// Segment frames of `path` in preorder: each segment, then its inside,
/// then its after. Empty segments are left out.
fn segment_frames(path: &[Symbol]) -> Vec<SegmentFrame> {
    let n = path.len();

    let mut partner = vec![0; n];
    let mut open_marks = Vec::new();
    for (index, symbol) in path.iter().enumerate() {
        match symbol {
            Symbol::Open => open_marks.push(index),
            Symbol::Close => {
                if let Some(open) = open_marks.pop() {
                    partner[open] = index;
                }
            }
            Symbol::Dot => {}
        }
    }

    // next_open[i] is the first open mark at or after i, or n.
    let mut next_open = vec![n; n + 1];
    for index in (0..n).rev() {
        next_open[index] = if path[index] == Symbol::Open {
            index
        } else {
            next_open[index + 1]
        };
    }

    let mut frames = Vec::new();
    let mut pending = vec![(0, n)];
    while let Some((start, end)) = pending.pop() {
        if start == end {
            continue;
        }
        let open = next_open[start];
        if open < end {
            let close = partner[open];
            frames.push(SegmentFrame {
                start,
                end,
                pair: Some((open, close)),
            });
            pending.push((close + 1, end));
            pending.push((open + 1, close));
        } else {
            frames.push(SegmentFrame {
                start,
                end,
                pair: None,
            });
        }
    }
    frames
}

/// Turn every pair lying wholly in `path[from..]` into dots. Close marks
/// belonging to opens before `from` stay.
fn reset_from(path: &mut [Symbol], from: usize) {
    let mut depth = 0usize;
    for symbol in &mut path[from..] {
        match *symbol {
            Symbol::Open => {
                depth += 1;
                *symbol = Symbol::Dot;
            }
            Symbol::Close if depth > 0 => {
                depth -= 1;
                *symbol = Symbol::Dot;
            }
            _ => {}
        }
    }
}

/// Replace `path` with its successor. Returns false if it was the last path.
fn advance(path: &mut [Symbol], width: usize) -> bool {
    for frame in segment_frames(path).iter().rev() {
        if frame.advance(path, width) {
            trace!("advanced segment {}..{}", frame.start, frame.end);
            reset_from(path, frame.end);
            return true;
        }
    }
    false
}

fn render(path: &[Symbol]) -> String {
    path.iter().map(|symbol| symbol.as_char()).collect()
}

impl MotzkinPaths {
    pub fn new(length: usize, width: usize) -> Self {
        Self {
            length,
            width,
            state: State::Fresh,
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn min_width(&self) -> usize {
        self.width
    }
}

impl Iterator for MotzkinPaths {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match &mut self.state {
            State::Fresh => {
                let path = vec![Symbol::Dot; self.length];
                let rendered = render(&path);
                self.state = State::Active(path);
                Some(rendered)
            }
            State::Active(path) => {
                if advance(path, self.width) {
                    Some(render(path))
                } else {
                    trace!("paths({}, {}) exhausted", self.length, self.width);
                    self.state = State::Done;
                    None
                }
            }
            State::Done => None,
        }
    }
}

impl FusedIterator for MotzkinPaths {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(length: usize, width: usize) -> Vec<String> {
        MotzkinPaths::new(length, width).collect()
    }

    #[test]
    fn test_empty_path() {
        for width in [0, 1, 2, 5] {
            assert_eq!(collect(0, width), vec![String::new()]);
        }
    }

    #[test]
    fn test_order_dots_then_pairs() {
        assert_eq!(collect(4, 0), vec![
            "....", "..()", ".().", ".(.)", "()..", "()()", "(.).", "(..)", "(())"
        ]);
        assert_eq!(collect(4, 1), vec!["....", ".(.)", "(.).", "(..)"]);
    }

    #[test]
    fn test_length_8_width_3_order() {
        assert_eq!(collect(8, 3), vec![
            "........", "...(...)", "..(...).", "..(....)", ".(...)..", ".(....).",
            ".(.....)", ".((...))", "(...)...", "(....)..", "(.....).", "((...)).",
            "(......)", "(.(...))", "((...).)", "((....))",
        ]);
    }

    #[test]
    fn test_width_too_large_yields_only_dots() {
        assert_eq!(collect(3, 7), vec!["..."]);
        assert_eq!(collect(1, 0), vec!["."]);
    }

    #[test]
    fn test_fused_after_exhaustion() {
        let mut paths = MotzkinPaths::new(2, 0);
        assert_eq!(paths.next().as_deref(), Some(".."));
        assert_eq!(paths.next().as_deref(), Some("()"));
        assert_eq!(paths.next(), None);
        assert_eq!(paths.next(), None);
    }

    #[test]
    fn test_partial_consumption() {
        let mut paths = MotzkinPaths::new(12, 0);
        let first: Vec<String> = paths.by_ref().take(3).collect();
        assert_eq!(first, vec!["............", "..........()", ".........().",]);
        assert_eq!(paths.length(), 12);
        assert_eq!(paths.min_width(), 0);
        drop(paths);
    }

    #[test]
    fn test_construction_allocates_nothing() {
        let paths = MotzkinPaths::new(usize::MAX, 0);
        assert!(matches!(paths.state, State::Fresh));
    }

    #[test]
    fn test_very_long_path_does_not_recurse() {
        let mut paths = MotzkinPaths::new(100_000, 3);
        let first = paths.next().unwrap();
        assert_eq!(first.len(), 100_000);
        assert!(first.chars().all(|c| c == '.'));

        let second = paths.next().unwrap();
        assert_eq!(&second[..99_995], ".".repeat(99_995));
        assert_eq!(&second[99_995..], "(...)");
    }

    #[test]
    fn test_deeply_nested_successor() {
        // A path nested far deeper than the native stack could follow.
        let depth = 20_000;
        let mut path = vec![Symbol::Open; depth];
        path.extend(std::iter::repeat(Symbol::Dot).take(3));
        path.extend(std::iter::repeat(Symbol::Close).take(depth));
        path.push(Symbol::Dot);

        // Every inner segment is at its last layout, so the outermost pair
        // widens to swallow the whole path.
        assert!(advance(&mut path, 3));
        let mut expected = vec![Symbol::Open];
        expected.extend(std::iter::repeat(Symbol::Dot).take(2 * depth + 2));
        expected.push(Symbol::Close);
        assert_eq!(path, expected);
    }

    #[test]
    fn test_clone_resumes_independently() {
        let mut paths = MotzkinPaths::new(7, 1);
        paths.next();
        paths.next();
        let rest: Vec<String> = paths.clone().collect();
        assert_eq!(rest, paths.collect::<Vec<_>>());
    }
}
