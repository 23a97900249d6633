//! Classification and bounded summarization of unified diffs.
//!
//! The summary is what gets sent to the language model, so it has to stay
//! small no matter how large the staged change set is: at most ten content
//! lines survive per hunk, blank and context lines are dropped entirely.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum number of non-blank `+`/`-` lines kept per file/hunk block.
const BLOCK_LINE_CAP: usize = 10;

static HUNK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+),(\d+) @@").unwrap());

/// One line of a unified diff, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffLine<'a> {
    /// `+++ b/<path>` header introducing a changed file.
    FileHeader { path: &'a str },
    /// `@@ -a[,b] +c,d @@` marker; counts are the old/new side line counts.
    HunkMarker { removed: u32, added: u32 },
    Addition { content: &'a str },
    Deletion { content: &'a str },
    Context,
}

/// Classifies a single diff line.
///
/// Bare `+++` / `---` lines (no filename) are treated as context so a
/// truncated header cannot open a false file boundary. `@@` lines that do
/// not match the unified-diff hunk pattern also fall through to context.
pub fn classify_line(line: &str) -> DiffLine<'_> {
    if let Some(path) = line.strip_prefix("+++ b/") {
        return DiffLine::FileHeader { path };
    }
    if let Some(caps) = HUNK_RE.captures(line) {
        // The old-side count is omitted for single-line hunks.
        let removed = caps
            .get(2)
            .map(|m| m.as_str().parse().unwrap_or(1))
            .unwrap_or(1);
        let added = caps
            .get(4)
            .map(|m| m.as_str().parse().unwrap_or(0))
            .unwrap_or(0);
        return DiffLine::HunkMarker { removed, added };
    }
    if line.starts_with('+') && !line.starts_with("+++") {
        return DiffLine::Addition { content: &line[1..] };
    }
    if line.starts_with('-') && !line.starts_with("---") {
        return DiffLine::Deletion { content: &line[1..] };
    }
    DiffLine::Context
}

/// Transient grouping of summary lines for one changed file.
struct FileChangeBlock {
    path: String,
    lines: Vec<String>,
    emitted: usize,
}

impl FileChangeBlock {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            lines: Vec::new(),
            emitted: 0,
        }
    }

    fn render_into(&self, out: &mut String) {
        if !self.path.is_empty() {
            out.push_str("File Changed: ");
            out.push_str(&self.path);
            out.push('\n');
        }
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
    }
}

/// Produces a bounded, model-readable summary of a unified diff.
///
/// Pure and total: malformed input degrades to dropped lines, never an
/// error, and empty input yields an empty summary.
pub fn summarize_diff(diff: &str) -> String {
    // The leading block (empty path) covers content lines appearing before
    // the first file header.
    let mut done: Vec<FileChangeBlock> = Vec::new();
    let mut current = FileChangeBlock::new("");

    for raw in diff.lines() {
        match classify_line(raw) {
            DiffLine::FileHeader { path } => {
                done.push(std::mem::replace(&mut current, FileChangeBlock::new(path)));
            }
            DiffLine::HunkMarker { removed, added } => {
                current
                    .lines
                    .push(format!("Lines Removed: -{removed}, Lines Added: +{added}"));
                current.emitted = 0;
            }
            DiffLine::Addition { content } | DiffLine::Deletion { content } => {
                if content.trim().is_empty() {
                    continue;
                }
                if current.emitted < BLOCK_LINE_CAP {
                    current.lines.push(raw.to_string());
                    current.emitted += 1;
                }
            }
            DiffLine::Context => {}
        }
    }
    done.push(current);

    let mut summary = String::new();
    for block in &done {
        block.render_into(&mut summary);
    }
    debug!(
        "summarized diff: {} bytes in, {} bytes out",
        diff.len(),
        summary.len()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_file_header() {
        assert_eq!(
            classify_line("+++ b/src/main.rs"),
            DiffLine::FileHeader { path: "src/main.rs" }
        );
    }

    #[test]
    fn bare_markers_are_context() {
        assert_eq!(classify_line("+++"), DiffLine::Context);
        assert_eq!(classify_line("---"), DiffLine::Context);
        assert_eq!(classify_line("--- a/src/main.rs"), DiffLine::Context);
    }

    #[test]
    fn classifies_hunk_marker() {
        assert_eq!(
            classify_line("@@ -10,3 +12,7 @@ fn main() {"),
            DiffLine::HunkMarker {
                removed: 3,
                added: 7
            }
        );
    }

    #[test]
    fn hunk_marker_old_count_defaults_to_one() {
        assert_eq!(
            classify_line("@@ -4 +4,2 @@"),
            DiffLine::HunkMarker {
                removed: 1,
                added: 2
            }
        );
    }

    #[test]
    fn malformed_hunk_marker_is_context() {
        assert_eq!(classify_line("@@ not a hunk"), DiffLine::Context);
    }

    #[test]
    fn classifies_additions_and_deletions() {
        assert_eq!(
            classify_line("+let x = 1;"),
            DiffLine::Addition { content: "let x = 1;" }
        );
        assert_eq!(
            classify_line("-let x = 0;"),
            DiffLine::Deletion { content: "let x = 0;" }
        );
        assert_eq!(classify_line(" unchanged"), DiffLine::Context);
    }

    #[test]
    fn empty_diff_summarizes_to_empty() {
        assert_eq!(summarize_diff(""), "");
    }

    #[test]
    fn context_only_diff_summarizes_to_empty() {
        assert_eq!(summarize_diff(" fn main() {\n }\nplain text\n"), "");
    }

    #[test]
    fn summary_includes_file_marker_and_hunk_counts() {
        let diff = "\
diff --git a/a.rs b/a.rs
--- a/a.rs
+++ b/a.rs
@@ -1,2 +1,3 @@
-old line
+new line
+another line
";
        let summary = summarize_diff(diff);
        assert_eq!(
            summary,
            "File Changed: a.rs\n\
             Lines Removed: -2, Lines Added: +3\n\
             -old line\n\
             +new line\n\
             +another line\n"
        );
    }

    #[test]
    fn caps_content_lines_per_hunk_at_ten() {
        let mut diff = String::from("+++ b/a.rs\n@@ -1,0 +1,15 @@\n");
        for i in 0..15 {
            diff.push_str(&format!("+line {i}\n"));
        }
        let summary = summarize_diff(&diff);
        let content_lines = summary
            .lines()
            .filter(|l| l.starts_with('+'))
            .count();
        assert_eq!(content_lines, 10);
        assert!(summary.contains("Lines Added: +15"));
    }

    #[test]
    fn cap_resets_on_new_hunk() {
        let mut diff = String::from("+++ b/a.rs\n@@ -1,0 +1,12 @@\n");
        for i in 0..12 {
            diff.push_str(&format!("+first {i}\n"));
        }
        diff.push_str("@@ -20,0 +20,12 @@\n");
        for i in 0..12 {
            diff.push_str(&format!("+second {i}\n"));
        }
        let summary = summarize_diff(&diff);
        assert_eq!(summary.matches("+first").count(), 10);
        assert_eq!(summary.matches("+second").count(), 10);
    }

    #[test]
    fn cap_resets_on_new_file() {
        let mut diff = String::from("+++ b/a.rs\n");
        for i in 0..12 {
            diff.push_str(&format!("+first {i}\n"));
        }
        diff.push_str("+++ b/b.rs\n");
        for i in 0..12 {
            diff.push_str(&format!("+second {i}\n"));
        }
        let summary = summarize_diff(&diff);
        assert_eq!(summary.matches("+first").count(), 10);
        assert_eq!(summary.matches("+second").count(), 10);
    }

    #[test]
    fn blank_content_lines_do_not_count_toward_cap() {
        let mut diff = String::from("+++ b/a.rs\n");
        for _ in 0..5 {
            diff.push_str("+\n");
            diff.push_str("+   \n");
        }
        for i in 0..10 {
            diff.push_str(&format!("+real {i}\n"));
        }
        let summary = summarize_diff(&diff);
        assert_eq!(summary.matches("+real").count(), 10);
        assert!(!summary.contains("+   "));
    }
}
