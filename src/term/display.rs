//! Terminal frame output
//!
//! Full-frame redraws over the alternate screen. The frame is a fixed
//! grid, so each row is repainted in place with no clearing; only the
//! status line below it changes length and gets cleared. Dropping the
//! display restores the terminal even when the loop bails out early.

use std::io::{self, Write};

use crossterm::{cursor, style::Print, terminal, QueueableCommand};

pub struct AsciiDisplay {
    stdout: io::Stdout,
    active: bool,
}

impl AsciiDisplay {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            active: false,
        }
    }

    /// Switch the terminal into raw alternate-screen mode
    pub fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        self.active = true;
        Ok(())
    }

    /// Restore the terminal; a second call is a no-op
    pub fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Paint one frame with a status line underneath
    pub fn draw(&mut self, frame: &str, status: &str) -> io::Result<()> {
        let mut row: u16 = 0;
        for line in frame.lines() {
            self.stdout.queue(cursor::MoveTo(0, row))?;
            self.stdout.queue(Print(line))?;
            row = row.saturating_add(1);
        }
        self.stdout.queue(cursor::MoveTo(0, row))?;
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::UntilNewLine))?;
        self.stdout.queue(Print(status))?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for AsciiDisplay {
    fn default() -> Self {
        AsciiDisplay::new()
    }
}

impl Drop for AsciiDisplay {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
