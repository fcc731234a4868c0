use std::fmt;

/// A range of bytes in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A message anchored to a span of the source.
#[derive(Debug, Clone)]
pub struct Label {
    pub span: Span,
    pub message: String,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Option<String>,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.notes.push(format!("help: {}", help.into()));
        self
    }
}

/// Computes the 1-based line and column of a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

fn line_content(source: &str, line_num: usize) -> Option<&str> {
    source.lines().nth(line_num - 1)
}

/// Renders a diagnostic against its source in the usual compiler shape:
/// a header, a `-->` location, the offending line, and a caret underline.
pub fn render(source: &str, file_name: &str, diagnostic: &Diagnostic) -> String {
    let mut output = String::new();

    match &diagnostic.code {
        Some(code) => {
            output.push_str(&format!(
                "{}[{}]: {}\n",
                diagnostic.severity, code, diagnostic.message
            ));
        }
        None => {
            output.push_str(&format!("{}: {}\n", diagnostic.severity, diagnostic.message));
        }
    }

    for label in &diagnostic.labels {
        let (line, col) = line_col(source, label.span.start);
        output.push_str(&format!("  --> {}:{}:{}\n", file_name, line, col));

        if let Some(content) = line_content(source, line) {
            let gutter_width = line.to_string().len();
            output.push_str(&format!("{} |\n", " ".repeat(gutter_width)));
            output.push_str(&format!("{} | {}\n", line, content));

            let width = (label.span.end.saturating_sub(label.span.start)).max(1);
            let underline = format!(
                "{}{}",
                " ".repeat(col.saturating_sub(1)),
                "^".repeat(width.min(content.len().saturating_sub(col - 1).max(1)))
            );
            if label.message.is_empty() {
                output.push_str(&format!("{} | {}\n", " ".repeat(gutter_width), underline));
            } else {
                output.push_str(&format!(
                    "{} | {} {}\n",
                    " ".repeat(gutter_width),
                    underline,
                    label.message
                ));
            }
        }
    }

    for note in &diagnostic.notes {
        output.push_str(&format!("  = {}\n", note));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let source = "(define x 5)\n(print-num x)";
        assert_eq!(line_col(source, 0), (1, 1));
        assert_eq!(line_col(source, 8), (1, 9));
        assert_eq!(line_col(source, 13), (2, 1));
        assert_eq!(line_col(source, 14), (2, 2));
    }

    #[test]
    fn test_span_merge() {
        let merged = Span::new(3, 7).merge(Span::new(5, 12));
        assert_eq!(merged, Span::new(3, 12));
    }

    #[test]
    fn test_render_with_label() {
        let source = "(+ 1)\n";
        let diagnostic = Diagnostic::error("operator takes at least 2 operands")
            .with_code("E0101")
            .with_label(Label::primary(Span::new(1, 2), "here"))
            .with_help("supply another operand");

        let output = render(source, "program", &diagnostic);
        assert!(output.contains("error[E0101]"));
        assert!(output.contains("program:1:2"));
        assert!(output.contains("(+ 1)"));
        assert!(output.contains("^"));
        assert!(output.contains("help: supply another operand"));
    }

    #[test]
    fn test_render_without_label() {
        let diagnostic = Diagnostic::error("unexpected end of input");
        let output = render("", "program", &diagnostic);
        assert_eq!(output, "error: unexpected end of input\n");
    }
}
