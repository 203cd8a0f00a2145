//! Rendering targets for command reports.

/// Sink that a report writes its lines to.
///
/// Reports hand over compilation results piece by piece; the sink decides
/// how each piece looks.
pub trait Output {
    /// Render a unit failure.
    fn diagnostic(&mut self, rendered: &str);

    /// Start a group of lines under a heading.
    fn heading(&mut self, text: &str);

    /// Render one generated type.
    fn generated_type(&mut self, kind: &str, class_name: &str);

    /// Render the closing verdict for an IR document.
    fn verdict(&mut self, success: bool, text: &str);

    /// Render a blank line.
    fn newline(&mut self);
}

/// A report that can render itself to an output.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Writes reports to stdout, and diagnostics to stderr.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn diagnostic(&mut self, rendered: &str) {
        eprintln!("{}", rendered);
    }

    fn heading(&mut self, text: &str) {
        println!("{}:", text);
    }

    fn generated_type(&mut self, kind: &str, class_name: &str) {
        println!("  + {} {}", kind, class_name);
    }

    fn verdict(&mut self, success: bool, text: &str) {
        let mark = if success { '✓' } else { '✗' };
        println!("{} {}", mark, text);
    }

    fn newline(&mut self) {
        println!();
    }
}
