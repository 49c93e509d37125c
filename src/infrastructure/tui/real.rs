use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
        Event as CrosstermEvent, KeyEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::{FutureExt, StreamExt};
use ratatui::backend::CrosstermBackend as Backend;
use ratatui::prelude::Rect;
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::infrastructure::tui::{io, Event, Frame, TuiLike, IO};

/// Crossterm terminal with a background task turning terminal input, ticks
/// and frame deadlines into [`Event`]s.
pub struct RealTui {
    terminal: ratatui::Terminal<Backend<IO>>,
    task: JoinHandle<()>,
    cancellation_token: CancellationToken,
    event_rx: UnboundedReceiver<Event>,
    event_tx: UnboundedSender<Event>,
    frame_rate: f64,
    tick_rate: f64,
    mouse: bool,
    paste: bool,
}

impl RealTui {
    pub fn new() -> Result<Self> {
        let terminal = ratatui::Terminal::new(Backend::new(io()))?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal,
            task: tokio::spawn(async {}),
            cancellation_token: CancellationToken::new(),
            event_rx,
            event_tx,
            frame_rate: 60.0,
            tick_rate: 4.0,
            // outside-click detection needs pointer events
            mouse: true,
            paste: true,
        })
    }

    pub fn tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn mouse(mut self, mouse: bool) -> Self {
        self.mouse = mouse;
        self
    }

    pub fn paste(mut self, paste: bool) -> Self {
        self.paste = paste;
        self
    }

    fn start(&mut self) {
        let tick_delay = Duration::from_secs_f64(1.0 / self.tick_rate.max(0.1));
        let render_delay = Duration::from_secs_f64(1.0 / self.frame_rate.max(0.1));
        self.cancel();
        self.cancellation_token = CancellationToken::new();
        let cancellation_token = self.cancellation_token.clone();
        let event_tx = self.event_tx.clone();
        self.task = tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_delay);
            let mut render_interval = tokio::time::interval(render_delay);
            if event_tx.send(Event::Init).is_err() {
                return;
            }
            loop {
                let tick = tick_interval.tick();
                let render = render_interval.tick();
                let crossterm_event = reader.next().fuse();
                let event = tokio::select! {
                    _ = cancellation_token.cancelled() => break,
                    maybe_event = crossterm_event => match maybe_event {
                        Some(Ok(evt)) => match evt {
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                Some(Event::Key(key))
                            }
                            CrosstermEvent::Key(_) => None,
                            CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                            CrosstermEvent::Resize(x, y) => Some(Event::Resize(x, y)),
                            CrosstermEvent::FocusLost => Some(Event::FocusLost),
                            CrosstermEvent::FocusGained => Some(Event::FocusGained),
                            CrosstermEvent::Paste(s) => Some(Event::Paste(s)),
                        },
                        Some(Err(e)) => {
                            log::error!("terminal event stream error: {e}");
                            Some(Event::Error)
                        }
                        None => Some(Event::Closed),
                    },
                    _ = tick => Some(Event::Tick),
                    _ = render => Some(Event::Render),
                };
                if let Some(event) = event {
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            }
        });
    }

    fn stop(&self) -> Result<()> {
        self.cancel();
        let mut counter = 0;
        while !self.task.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
            counter += 1;
            if counter > 50 {
                self.task.abort();
            }
            if counter > 100 {
                log::error!("Failed to abort task in 100 milliseconds for unknown reason");
                break;
            }
        }
        Ok(())
    }

    fn cancel(&self) {
        self.cancellation_token.cancel();
    }
}

/// Puts the terminal back into cooked mode. Safe to call more than once.
pub fn restore_terminal() -> Result<()> {
    if crossterm::terminal::is_raw_mode_enabled()? {
        crossterm::execute!(
            io(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen,
            cursor::Show
        )?;
        crossterm::terminal::disable_raw_mode()?;
    }
    Ok(())
}

impl TuiLike for RealTui {
    fn enter(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(io(), EnterAlternateScreen, cursor::Hide)?;
        if self.mouse {
            crossterm::execute!(io(), EnableMouseCapture)?;
        }
        if self.paste {
            crossterm::execute!(io(), EnableBracketedPaste)?;
        }
        self.start();
        Ok(())
    }

    fn exit(&mut self) -> Result<()> {
        self.stop()?;
        if crossterm::terminal::is_raw_mode_enabled()? {
            self.terminal.flush()?;
        }
        restore_terminal()
    }

    fn draw(&mut self, f: &mut dyn FnMut(&mut Frame<'_>)) -> Result<()> {
        self.terminal.draw(|frame| f(frame))?;
        Ok(())
    }

    fn resize(&mut self, area: Rect) -> Result<()> {
        self.terminal.resize(area)?;
        Ok(())
    }

    fn next(&mut self) -> Pin<Box<dyn Future<Output = Option<Event>> + Send + '_>> {
        Box::pin(self.event_rx.recv())
    }

    fn suspend(&mut self) -> Result<()> {
        self.exit()?;
        #[cfg(unix)]
        {
            // SAFETY: raising a signal on the current process has no memory effects
            let rc = unsafe { libc::raise(libc::SIGTSTP) };
            if rc != 0 {
                log::warn!("failed to raise SIGTSTP: {rc}");
            }
        }
        Ok(())
    }
}

impl Drop for RealTui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            log::error!("Unable to exit terminal: {e:?}");
        }
    }
}
