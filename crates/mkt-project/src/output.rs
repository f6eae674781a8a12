//! Colored terminal output for test runs.

use console::{Style, Term};

/// Terminal output formatter (stderr unless built with [`Output::stdout`]).
pub struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    cyan_bold: Style,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::with_term(Term::stderr())
    }

    /// Formatter writing to stdout, for results meant to be piped.
    #[must_use]
    pub fn stdout() -> Self {
        Self::with_term(Term::stdout())
    }

    fn with_term(term: Term) -> Self {
        Self {
            term,
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a success message (green).
    pub fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a highlighted message (cyan bold).
    pub fn highlight(&self, msg: &str) {
        let _ = self
            .term
            .write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Top-level heading: the text between two rules.
    pub fn h1(&self, title: &str) {
        let rule = "=".repeat(RULE_WIDTH);
        self.highlight(&rule);
        self.highlight(title);
        self.highlight(&rule);
    }

    /// Second-level heading: the text over a rule.
    pub fn h2(&self, title: &str) {
        self.highlight(title);
        self.info(&"-".repeat(RULE_WIDTH));
    }

    /// Third-level heading.
    pub fn h3(&self, title: &str) {
        self.highlight(&format!("> {title}"));
    }
}

const RULE_WIDTH: usize = 70;

/// Print a top-level heading to stderr.
pub fn h1(title: &str) {
    Output::new().h1(title);
}

/// Print a second-level heading to stderr.
pub fn h2(title: &str) {
    Output::new().h2(title);
}

/// Print a third-level heading to stderr.
pub fn h3(title: &str) {
    Output::new().h3(title);
}
