//! In-source exclusion markers.
//!
//! Collects `i18n-ignore` directives from a file's comments so the transform
//! can leave annotated lines alone:
//!
//! ```tsx
//! <Text>Build hash</Text> {/* i18n-ignore */}
//!
//! // i18n-ignore-next-line
//! const labels = { title: "Internal" };
//!
//! // i18n-ignore-start
//! ...
//! // i18n-ignore-end
//! ```
//!
//! Consecutive comment lines are skipped when resolving the target of
//! `i18n-ignore-next-line`, so stacked directives apply to the next code line.

use std::collections::HashSet;

use swc_common::SourceMap;

use crate::core::parsers::jsx::ExtractedComments;

/// Maximum number of consecutive comment lines to traverse when looking for
/// the target code line of a next-line directive.
pub const MAX_COMMENT_CHAIN_LINES: usize = 10;

/// Range representing ignored lines [start, end] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgnoredRange {
    pub start: usize,
    pub end: usize, // usize::MAX for open-ended
}

/// Lines of one file where no rewrite may happen.
#[derive(Debug, Default, Clone)]
pub struct Suppressions {
    pub lines: HashSet<usize>,
    pub ranges: Vec<IgnoredRange>,
}

impl Suppressions {
    /// Check if a line is suppressed.
    pub fn is_suppressed(&self, line: usize) -> bool {
        self.lines.contains(&line) || self.ranges.iter().any(|r| line >= r.start && line <= r.end)
    }

    /// Add lines supplied by the caller.
    pub fn extend_lines(&mut self, lines: impl IntoIterator<Item = usize>) {
        self.lines.extend(lines);
    }
}

/// One parsed ignore directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreDirective {
    /// `i18n-ignore`: the comment's own line.
    Line,
    /// `i18n-ignore-next-line`
    NextLine,
    /// `i18n-ignore-start`
    Start,
    /// `i18n-ignore-end`
    End,
}

impl IgnoreDirective {
    /// Parse a directive from comment text.
    ///
    /// The directive keyword may appear anywhere in the comment as a whole
    /// word (`// legal copy: i18n-ignore`, `// i18n-ignore brand name`). The first
    /// keyword found wins.
    pub fn parse(text: &str) -> Option<Self> {
        text.split_whitespace()
            .map(|word| word.trim_matches(|c: char| !(c.is_alphanumeric() || c == '-')))
            .find_map(|keyword| match keyword {
                "i18n-ignore" => Some(Self::Line),
                "i18n-ignore-next-line" => Some(Self::NextLine),
                "i18n-ignore-start" => Some(Self::Start),
                "i18n-ignore-end" => Some(Self::End),
                _ => None,
            })
    }
}

/// Collect suppressions from all comments of a file.
pub fn collect_suppressions(comments: &ExtractedComments, source_map: &SourceMap) -> Suppressions {
    let mut suppressions = Suppressions::default();

    let (leading, trailing) = comments.borrow_all();
    let mut comments_with_lines: Vec<_> = leading
        .iter()
        .chain(trailing.iter())
        .flat_map(|(_, cmts)| cmts.iter())
        .map(|cmt| {
            let line = source_map.lookup_char_pos(cmt.span.lo).line;
            (line, cmt)
        })
        .collect();

    // The same comment can be both leading and trailing
    comments_with_lines.sort_by_key(|(line, cmt)| (*line, cmt.span.lo));
    comments_with_lines.dedup_by_key(|(_, cmt)| cmt.span.lo);

    let comment_lines: HashSet<usize> = comments_with_lines.iter().map(|(line, _)| *line).collect();

    let mut open_range: Option<usize> = None;

    for (line, cmt) in comments_with_lines {
        let Some(directive) = IgnoreDirective::parse(&cmt.text) else {
            continue;
        };
        match directive {
            IgnoreDirective::Line => {
                suppressions.lines.insert(line);
            }
            IgnoreDirective::NextLine => {
                suppressions
                    .lines
                    .insert(find_next_non_comment_line(line, &comment_lines));
            }
            IgnoreDirective::Start => {
                open_range.get_or_insert(line);
            }
            IgnoreDirective::End => {
                if let Some(start) = open_range.take() {
                    suppressions.ranges.push(IgnoredRange { start, end: line });
                }
            }
        }
    }

    if let Some(start) = open_range {
        suppressions.ranges.push(IgnoredRange {
            start,
            end: usize::MAX,
        });
    }

    suppressions
}

/// Find the next non-comment line after the given line.
fn find_next_non_comment_line(line: usize, comment_lines: &HashSet<usize>) -> usize {
    let mut next = line + 1;
    let max_line = line + MAX_COMMENT_CHAIN_LINES;
    while comment_lines.contains(&next) && next < max_line {
        next += 1;
    }
    next
}
