use crate::{app::App, view};
use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use pima_form::Predictor;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stdout, stdout};

/// Represents the Terminal UI, responsible for drawing and managing the terminal state.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    /// Creates a new `Tui` instance and initializes the terminal.
    pub fn new() -> Result<Self> {
        let terminal = Self::init_terminal()?;
        Ok(Self { terminal })
    }

    fn init_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        Ok(terminal)
    }

    pub fn draw<P: Predictor>(&mut self, app: &App<P>) -> Result<()> {
        self.terminal.draw(|frame| view::render(&app.state, frame))?;
        Ok(())
    }

    /// Restores the terminal to its original state.
    pub fn restore_terminal() -> Result<()> {
        execute!(stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;
        Ok(())
    }
}
