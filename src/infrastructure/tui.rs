pub mod real;
pub mod textarea_engine;

use std::future::Future;
use std::pin::Pin;

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use serde::{Deserialize, Serialize};

pub type IO = std::io::Stdout;
pub fn io() -> IO {
    std::io::stdout()
}
pub type Frame<'a> = ratatui::Frame<'a>;

/// Terminal events as seen by the runner
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Init,
    Quit,
    Error,
    Closed,
    Tick,
    Render,
    FocusGained,
    FocusLost,
    Paste(String),
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Terminal abstraction shared by the real terminal and the test backend
pub trait TuiLike: Send {
    fn enter(&mut self) -> Result<()>;
    fn exit(&mut self) -> Result<()>;
    fn draw(&mut self, f: &mut dyn FnMut(&mut Frame<'_>)) -> Result<()>;
    fn resize(&mut self, area: ratatui::prelude::Rect) -> Result<()>;
    fn next(&mut self) -> Pin<Box<dyn Future<Output = Option<Event>> + Send + '_>>;

    /// Leaves the terminal and stops the process until it is resumed.
    fn suspend(&mut self) -> Result<()> {
        self.exit()
    }

    fn resume(&mut self) -> Result<()> {
        self.enter()
    }
}
