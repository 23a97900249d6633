use log::warn;

/// Conventional-commit subject line budget.
pub const SUBJECT_WIDTH: usize = 50;
/// Column budget for each body line.
pub const BODY_WIDTH: usize = 72;

/// Structured commit message, the one artifact the pipeline produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitRecord {
    /// Classification token ("feat", "fix", ...).
    pub kind: String,
    /// Affected area, may be empty.
    pub scope: String,
    /// One-line summary.
    pub desc: String,
    /// Free-text body, may be multi-line or empty.
    pub body: String,
    /// Trailer text, may be empty.
    pub footer: String,
}

impl CommitRecord {
    /// The subject line: `kind[(scope)]: desc`.
    pub fn subject(&self) -> String {
        let mut out = self.kind.clone();
        if !self.scope.is_empty() {
            out.push('(');
            out.push_str(&self.scope);
            out.push(')');
        }
        out.push_str(": ");
        out.push_str(&self.desc);
        out
    }

    /// Canonical rendered message: subject, then body and footer as
    /// blank-line separated paragraphs. No trailing newline.
    pub fn render(&self) -> String {
        let mut out = self.subject();
        if !self.body.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.body);
        }
        if !self.footer.is_empty() {
            out.push_str("\n\n");
            out.push_str(&self.footer);
        }
        out
    }

    /// Trims the description at word boundaries until the subject fits
    /// `SUBJECT_WIDTH` columns.
    ///
    /// The model is asked for a short description but does not always
    /// comply. Falls back to a hard cut when no word boundary helps.
    pub fn fit_subject(&mut self) {
        if self.subject().len() <= SUBJECT_WIDTH {
            return;
        }
        let original = self.desc.clone();

        while self.subject().len() > SUBJECT_WIDTH {
            match self.desc.trim_end().rfind(' ') {
                Some(idx) => self.desc.truncate(idx),
                None => break,
            }
            self.desc = self.desc.trim_end().to_string();
        }

        if self.desc.is_empty() || self.subject().len() > SUBJECT_WIDTH {
            let overhead = self.subject().len() - self.desc.len();
            let room = SUBJECT_WIDTH.saturating_sub(overhead).max(1);
            self.desc = original.chars().take(room).collect::<String>();
            self.desc = self.desc.trim_end().to_string();
        }

        warn!("description trimmed to fit {SUBJECT_WIDTH}-column subject: {:?}", self.desc);
    }
}
