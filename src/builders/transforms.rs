use serde::Serialize;

/// A per-line, per-file rewrite unit.
///
/// The engine feeds every content line, together with its 0-based content
/// index, through an ordered chain of these. The first transform to return a
/// replacement wins the line and the rest of the chain is skipped; `None`
/// lets the line fall through unchanged.
///
/// Implementations must return `None` when the canonical form they would
/// produce is identical to the incoming line. That rule is what makes a
/// second run over an already-normalized file report zero replacements.
pub trait LineTransform {
    /// Converts one content line, or passes on it.
    fn convert_line(&mut self, line: &str, index: usize) -> Option<String>;

    /// Drains the issues recorded while converting this file's lines.
    fn take_issues(&mut self) -> Vec<Issue>;
}

/// A recoverable finding at a single content line.
///
/// Issues never abort a file; the line they point at is left unchanged and
/// processing continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// 0-based content-line index the issue was recorded at.
    pub line: usize,
    pub message: String,
}

impl Issue {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// One actual rewrite the driver performed, kept for the diagnostic stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    /// 0-based content-line index of the rewritten line.
    pub line: usize,
    pub old: String,
    pub new: String,
}
