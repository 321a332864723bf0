use crate::builders::transforms::{Issue, LineTransform};
use crate::core::source_file::SourceFile;

/// Rewrites the include-guard lines of a header to their canonical form.
///
/// The canonical guard name is derived from the file's position in the tree:
/// the configured prefix (if any), the namespace segments, and the file name
/// with every `.` turned into `_`, all uppercased and joined with `_`.
/// `include/foo/bar.h` with an empty prefix becomes `FOO_BAR_H`.
///
/// Only three content positions are touched: the `#ifndef` on line 0, the
/// `#define` on line 1, and the `#endif` on the last line, which also gains a
/// trailing comment naming the guard. A header whose first content line is
/// not an `#ifndef` has no guard to normalize; the transform records the
/// issue and stays inactive for the rest of the file rather than inventing
/// one.
pub struct GuardTransform<'a> {
    src: &'a SourceFile,
    guard: String,
    active: bool,
    issues: Vec<Issue>,
}

impl<'a> GuardTransform<'a> {
    pub fn new(src: &'a SourceFile, prefix: &str) -> Self {
        let mut parts: Vec<String> = Vec::new();
        if !prefix.is_empty() {
            parts.push(prefix.to_string());
        }
        parts.extend(src.namespace().iter().cloned());
        parts.push(src.file_name().replace('.', "_"));
        let guard = parts.join("_").to_uppercase();

        Self {
            src,
            guard,
            // Implementation files carry no guard; the transform never fires.
            active: src.is_header(),
            issues: Vec::new(),
        }
    }

    pub fn guard_name(&self) -> &str {
        &self.guard
    }

    fn record(&mut self, line: usize, message: &str) {
        self.issues.push(Issue::new(line, message));
    }

    /// Suppresses the replacement when the line is already canonical.
    fn emit(&self, line: &str, canonical: String) -> Option<String> {
        if canonical == line { None } else { Some(canonical) }
    }
}

impl LineTransform for GuardTransform<'_> {
    fn convert_line(&mut self, line: &str, index: usize) -> Option<String> {
        if !self.active {
            return None;
        }
        if index == 0 {
            if line.trim_end().starts_with("#ifndef") {
                return self.emit(line, format!("#ifndef {}", self.guard));
            }
            // Once the open guard is missing, the define and close positions
            // must not be rewritten either.
            self.active = false;
            self.record(index, "missing header guard");
        } else if index == 1 {
            if line.trim_end().starts_with("#define") {
                return self.emit(line, format!("#define {}", self.guard));
            }
            self.record(index, "header guard missing define");
        } else if index + 1 == self.src.content_len() {
            if line.trim_end().starts_with("#endif") {
                return self.emit(line, format!("#endif // {}", self.guard));
            }
            self.record(index, "header guard not at end of file");
        }
        None
    }

    fn take_issues(&mut self) -> Vec<Issue> {
        std::mem::take(&mut self.issues)
    }
}
