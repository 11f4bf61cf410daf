//! Structured rendered-comment model and markdown assembly.

/// Titled collapsible sub-section of a rendered comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintSection {
    title: String,
    lines: Vec<String>,
}

impl HintSection {
    /// Creates a hint section with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
        }
    }

    /// Appends a line to the section body.
    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Appends a line when the value is present; absent values leave no trace.
    #[must_use]
    pub fn with_optional_line(self, line: Option<impl Into<String>>) -> Self {
        match line {
            Some(value) => self.with_line(value),
            None => self,
        }
    }

    /// Returns the section title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the section body lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns `true` when the section has no body lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Deterministic two-part comment: an always-visible `main` block and
/// collapsible `hints` sections.
///
/// Line order is part of the contract: the status line leads, supplementary
/// links and digests hold fixed positions in the hints block. Absent optional
/// elements are omitted entirely, never rendered as placeholders or blank
/// lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedComment {
    main: Vec<String>,
    hints: Vec<HintSection>,
}

impl RenderedComment {
    /// Creates an empty comment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            main: Vec::new(),
            hints: Vec::new(),
        }
    }

    /// Appends a line to the main block.
    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.main.push(line.into());
        self
    }

    /// Appends a main line when the value is present.
    #[must_use]
    pub fn with_optional_line(self, line: Option<impl Into<String>>) -> Self {
        match line {
            Some(value) => self.with_line(value),
            None => self,
        }
    }

    /// Appends a hint section, dropping it when it carries no lines.
    #[must_use]
    pub fn with_hint(mut self, hint: HintSection) -> Self {
        if !hint.is_empty() {
            self.hints.push(hint);
        }
        self
    }

    /// Renders a dispatch failure for a command that never produced an entry.
    ///
    /// This is a distinct path from command renderers: a failed `launch` has
    /// no entry or values to draw from.
    #[must_use]
    pub fn failure(command_name: &str, reason: &str) -> Self {
        Self::new()
            .with_line(format!("**/{command_name}** — failed to start"))
            .with_hint(HintSection::new("Failure detail").with_line(reason))
    }

    /// Returns the main block lines.
    #[must_use]
    pub fn main(&self) -> &[String] {
        &self.main
    }

    /// Returns the hint sections.
    #[must_use]
    pub fn hints(&self) -> &[HintSection] {
        &self.hints
    }

    /// Assembles the final markdown body.
    ///
    /// Main lines join with single newlines; each hint becomes a `<details>`
    /// block with its title as the summary.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut body = self.main.join("\n");
        for hint in &self.hints {
            if !body.is_empty() {
                body.push_str("\n\n");
            }
            body.push_str("<details><summary>");
            body.push_str(hint.title());
            body.push_str("</summary>\n\n");
            body.push_str(&hint.lines().join("\n"));
            body.push_str("\n\n</details>");
        }
        body
    }
}
