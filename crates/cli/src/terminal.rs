//! Writing panel events to the terminal as they stream in.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use encryd_core::error::Result;
use encryd_core::operations::Operation;
use encryd_core::worker::{Completion, Event};

/// Prints the output of one panel: child lines verbatim, diagnostics and the
/// final status line in color.
pub struct Terminal<W: Write> {
    out: W,
    colored: bool,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes `event` and flushes, so lines show up while the child still runs.
    pub fn event(&mut self, operation: Operation, event: &Event) -> Result<()> {
        match event {
            Event::Started { .. } => {}
            Event::Line(line) => queue!(self.out, Print(line))?,
            Event::Diagnostic(line) => self.colored_line(line, Color::Red)?,
            Event::Finished(completion) => self.status(operation, completion)?,
        }

        self.out.flush()?;
        Ok(())
    }

    pub fn status(&mut self, operation: Operation, completion: &Completion) -> Result<()> {
        let color = if completion.is_success() {
            Color::Green
        } else {
            Color::Red
        };

        self.colored_line(&operation.status_line(completion), color)
    }

    /// A plain informational line, such as the output file after renaming.
    pub fn message(&mut self, text: &str) -> Result<()> {
        let text = text.strip_suffix('\n').unwrap_or(text);
        queue!(self.out, Print(text), Print("\n"))?;
        self.out.flush()?;
        Ok(())
    }

    /// A message that did not come from the child, such as a rejected request.
    pub fn failure(&mut self, message: &str) -> Result<()> {
        self.colored_line(message, Color::Red)?;
        self.out.flush()?;
        Ok(())
    }

    fn colored_line(&mut self, text: &str, color: Color) -> Result<()> {
        let text = text.strip_suffix('\n').unwrap_or(text);

        if self.colored {
            queue!(
                self.out,
                SetForegroundColor(color),
                Print(text),
                ResetColor,
                Print("\n")
            )?;
        } else {
            queue!(self.out, Print(text), Print("\n"))?;
        }

        Ok(())
    }
}
