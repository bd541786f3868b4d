use crate::{Grid, Result};
use std::io::Write;

/// Consumes committed generations, one call per frame.
pub trait Renderer {
    /// Draws `grid`, the committed state of generation number `generation`.
    fn render(&mut self, grid: &Grid, generation: u64) -> Result<()>;
}

/// Renders frames as text: a generation label followed by the grid, `#` for
/// alive cells and `.` for dead ones.
pub struct TerminalRenderer<W: Write> {
    out: W,
    /// Prefix every frame with an ANSI "clear screen, cursor home" sequence
    clear_screen: bool,
}

impl<W: Write> TerminalRenderer<W> {
    const CLEAR_SCREEN: &'static str = "\x1b[2J\x1b[H";

    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, grid: &Grid, generation: u64) -> Result<()> {
        if self.clear_screen {
            self.out.write_all(Self::CLEAR_SCREEN.as_bytes())?;
        }
        writeln!(self.out, "Generation: {generation}")?;
        write!(self.out, "{grid}")?;
        self.out.flush()?;
        Ok(())
    }
}
