//! Terminal control used by the live reporter.

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

/// Text output with screen, cursor and color control.
///
/// Rows and columns are 1-based.
pub trait Console: Write {
    fn clear_screen(&mut self) -> io::Result<()>;

    fn set_cursor_position(&mut self, row: u16, col: u16) -> io::Result<()>;

    fn set_foreground_color(&mut self, r: u8, g: u8, b: u8) -> io::Result<()>;

    fn reset_foreground_color(&mut self) -> io::Result<()>;

    fn set_background_color(&mut self, r: u8, g: u8, b: u8) -> io::Result<()>;

    fn reset_background_color(&mut self) -> io::Result<()>;
}

/// Console emitting ANSI control sequences through `crossterm`.
pub struct TerminalConsole<W: Write> {
    out: W,
}

impl TerminalConsole<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalConsole<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Write for TerminalConsole<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Console for TerminalConsole<W> {
    fn clear_screen(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))
    }

    fn set_cursor_position(&mut self, row: u16, col: u16) -> io::Result<()> {
        queue!(
            self.out,
            MoveTo(col.saturating_sub(1), row.saturating_sub(1))
        )
    }

    fn set_foreground_color(&mut self, r: u8, g: u8, b: u8) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(Color::Rgb { r, g, b }))
    }

    fn reset_foreground_color(&mut self) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(Color::Reset))
    }

    fn set_background_color(&mut self, r: u8, g: u8, b: u8) -> io::Result<()> {
        queue!(self.out, SetBackgroundColor(Color::Rgb { r, g, b }))
    }

    fn reset_background_color(&mut self) -> io::Result<()> {
        queue!(self.out, SetBackgroundColor(Color::Reset))
    }
}
