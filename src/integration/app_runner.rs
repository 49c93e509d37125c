use std::{sync::Arc, time::Duration};

use color_eyre::eyre::Result;
use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::prelude::Rect;
use tokio::sync::{mpsc, Mutex};

use crate::{
    core::{
        cmd::TuiCommand,
        cmd_executor::CmdExecutor,
        msg::{autocomplete::AutocompleteMsg, settings::SettingsMsg, Msg},
        raw_msg::RawMsg,
        state::AppState,
    },
    domain::{contact::Contact, preferences::SharedLayout},
    infrastructure::{
        config::Config,
        listeners::PointerListeners,
        preferences::PreferencesPersistence,
        query::{CatalogQueryService, QueryService},
        tui::{self, TuiLike},
    },
    integration::{coalescer::Coalescer, runtime::Runtime},
    presentation::components::Components,
};

/// Drives the Elm runtime from terminal events and renders the components
pub struct AppRunner {
    runtime: Runtime,
    tui: Arc<Mutex<dyn TuiLike>>,
    components: Components,
    layout: SharedLayout,
    listeners: PointerListeners,
    tui_rx: mpsc::UnboundedReceiver<TuiCommand>,
    render_rx: mpsc::UnboundedReceiver<()>,
    last_size: Option<(u16, u16)>,
}

impl AppRunner {
    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut Runtime {
        &mut self.runtime
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    pub fn layout(&self) -> &SharedLayout {
        &self.layout
    }

    /// Create a runner backed by the in-memory contact catalog of `config`.
    pub fn new_with_config(
        config: Config,
        layout: SharedLayout,
        tui: Arc<Mutex<dyn TuiLike>>,
    ) -> Self {
        let catalog = CatalogQueryService::new(config.contacts.clone())
            .with_latency(Duration::from_millis(config.catalog.latency_ms))
            .with_limit(config.catalog.max_results);
        Self::new(config, layout, tui, Arc::new(catalog))
    }

    /// Create a runner with an explicit query collaborator.
    pub fn new(
        config: Config,
        layout: SharedLayout,
        tui: Arc<Mutex<dyn TuiLike>>,
        contacts: Arc<dyn QueryService<Contact>>,
    ) -> Self {
        let initial_state = AppState::new_with_layout(config, layout.snapshot());
        let listeners = PointerListeners::new();

        let mut executor = CmdExecutor::new(contacts, layout.clone());
        executor.set_pointer_listeners(listeners.clone());
        let (tui_tx, tui_rx) = mpsc::unbounded_channel();
        executor.set_tui_sender(tui_tx);
        let (render_tx, render_rx) = mpsc::unbounded_channel();
        executor.set_render_request_sender(render_tx);

        let runtime = Runtime::new_with_executor(initial_state, executor);

        Self {
            runtime,
            tui,
            components: Components::new(),
            layout,
            listeners,
            tui_rx,
            render_rx,
            last_size: None,
        }
    }

    /// Persist preference changes through `persistence`.
    pub fn with_persistence(mut self, persistence: Arc<dyn PreferencesPersistence>) -> Self {
        if let Some(executor) = self.runtime.executor_mut() {
            executor.set_persistence(persistence);
        }
        self
    }

    /// Replace the terminal, e.g. with a `TestTui`.
    pub fn set_tui_for_tests(&mut self, tui: Arc<Mutex<dyn TuiLike>>) {
        self.tui = tui;
    }

    /// Run the main loop until quit or until the event source is exhausted.
    pub async fn run(&mut self) -> Result<()> {
        self.tui.lock().await.enter()?;
        self.runtime
            .send_msg(Msg::Autocomplete(AutocompleteMsg::Initialize));
        self.cycle(Vec::new(), true).await?;

        loop {
            let event = {
                let mut tui = self.tui.lock().await;
                tui.next().await
            };
            let Some(event) = event else {
                log::info!("event source closed");
                break;
            };
            self.cycle(vec![event], false).await?;

            if self.runtime.state().system.should_quit {
                break;
            }
            if self.runtime.state().system.should_suspend {
                self.suspend().await?;
            }
        }

        self.runtime.shutdown();
        self.tui.lock().await.exit()?;
        Ok(())
    }

    /// Handles `events`, runs one update cycle and renders if anything asked for it.
    async fn cycle(&mut self, events: Vec<tui::Event>, force_render: bool) -> Result<()> {
        let mut frame = if force_render {
            Coalescer::forced()
        } else {
            Coalescer::new()
        };
        for event in events {
            match event {
                tui::Event::Quit => self.runtime.send_raw_msg(RawMsg::Quit),
                tui::Event::Tick => self.runtime.send_raw_msg(RawMsg::Tick),
                tui::Event::Render => frame.frame(),
                tui::Event::Resize(w, h) => frame.resize(w, h),
                tui::Event::Key(key) => self.runtime.send_raw_msg(RawMsg::Key(key)),
                tui::Event::Paste(text) => self.runtime.send_raw_msg(RawMsg::Paste(text)),
                tui::Event::Mouse(mouse) => self.handle_mouse(mouse),
                tui::Event::Error => log::warn!("terminal reported an error event"),
                tui::Event::Init
                | tui::Event::Closed
                | tui::Event::FocusGained
                | tui::Event::FocusLost => {}
            }
        }

        // The store may have been written outside the settings page
        let dark_theme = self.layout.dark_theme();
        if dark_theme != self.runtime.state().settings.dark_theme {
            self.runtime
                .send_msg(Msg::Settings(SettingsMsg::StoreChanged(dark_theme)));
        }

        if let Some((w, h)) = frame.take_resize() {
            self.runtime.send_raw_msg(RawMsg::Resize(w, h));
        }
        if let Err(e) = self.runtime.run_update_cycle() {
            log::error!("Runtime error: {e}");
            self.runtime
                .send_raw_msg(RawMsg::Error(format!("Runtime error: {e}")));
        }

        // Host-side reactions requested by commands
        while let Ok(cmd) = self.tui_rx.try_recv() {
            match cmd {
                TuiCommand::Resize { width, height } => {
                    if self.last_size != Some((width, height)) {
                        self.tui
                            .lock()
                            .await
                            .resize(Rect::new(0, 0, width, height))?;
                        self.last_size = Some((width, height));
                    }
                    frame.request();
                }
            }
        }
        while self.render_rx.try_recv().is_ok() {
            frame.request();
        }

        if frame.should_render() {
            self.render().await?;
        }
        Ok(())
    }

    /// Pointer presses outside a listening field close it.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if matches!(mouse.kind, MouseEventKind::Down(_)) {
            for field in self.listeners.active() {
                if !self
                    .components
                    .areas()
                    .contains(field, mouse.column, mouse.row)
                {
                    self.runtime.send_raw_msg(RawMsg::OutsideClick(field));
                }
            }
        }
        self.runtime.send_raw_msg(RawMsg::Mouse(mouse));
    }

    async fn suspend(&mut self) -> Result<()> {
        log::info!("suspending");
        {
            let mut tui = self.tui.lock().await;
            tui.suspend()?;
            tui.resume()?;
        }
        self.runtime.send_raw_msg(RawMsg::Resume);
        self.cycle(Vec::new(), true).await
    }

    async fn render(&mut self) -> Result<()> {
        let state = self.runtime.state();
        let components = &mut self.components;
        let layout = &self.layout;
        self.tui
            .lock()
            .await
            .draw(&mut |f: &mut tui::Frame<'_>| components.render(f, state, layout))?;
        Ok(())
    }

    /// Runs a single cycle over `events`, exactly like one turn of [`run`](Self::run).
    pub async fn run_one_cycle_for_tests(&mut self, events: Vec<tui::Event>) -> Result<()> {
        self.cycle(events, false).await
    }

    pub async fn render_for_tests(&mut self) -> Result<()> {
        self.render().await
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        core::state::form::FieldId, domain::autocomplete::Phase,
        infrastructure::tui::test::TestTui,
    };

    fn config() -> Config {
        let mut config = Config::embedded().unwrap();
        config.catalog.latency_ms = 0;
        config.contacts = vec![
            Contact::new("jdoe", "John Doe"),
            Contact::new("jsmith", "Jane Smith"),
        ];
        config
    }

    fn runner() -> (AppRunner, Arc<Mutex<TestTui>>) {
        let tui = Arc::new(Mutex::new(TestTui::new(60, 20).unwrap()));
        let runner = AppRunner::new_with_config(config(), SharedLayout::default(), tui.clone());
        (runner, tui)
    }

    fn key(c: char) -> tui::Event {
        tui::Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn test_render_only_when_requested() {
        let (mut runner, tui) = runner();

        runner.run_one_cycle_for_tests(vec![tui::Event::Tick]).await.unwrap();
        assert_eq!(tui.lock().await.draw_count(), 0);

        runner
            .run_one_cycle_for_tests(vec![tui::Event::Render])
            .await
            .unwrap();
        assert_eq!(tui.lock().await.draw_count(), 1);
    }

    #[tokio::test]
    async fn test_resizes_are_coalesced() {
        let (mut runner, tui) = runner();
        runner
            .run_one_cycle_for_tests(vec![
                tui::Event::Resize(40, 10),
                tui::Event::Resize(50, 12),
            ])
            .await
            .unwrap();

        assert_eq!(runner.runtime().state().system.size, Some((50, 12)));
        let tui = tui.lock().await;
        assert_eq!(tui.buffer().area, Rect::new(0, 0, 50, 12));
        assert_eq!(tui.draw_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_outside_click_closes_dropdown() {
        let (mut runner, _tui) = runner();
        let tab = tui::Event::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        runner.run_one_cycle_for_tests(vec![tab]).await.unwrap();
        assert!(runner.runtime().state().ui.is_focused(FieldId::Contact));

        runner
            .run_one_cycle_for_tests(vec![key('j')])
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        runner.run_one_cycle_for_tests(vec![]).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
        runner
            .run_one_cycle_for_tests(vec![tui::Event::Render])
            .await
            .unwrap();
        assert_eq!(
            runner.runtime().state().form.contact.phase(),
            Phase::OpenWithOptions
        );
        assert!(runner.listeners.is_listening(FieldId::Contact));

        // a click inside the dropdown keeps it open
        let dropdown = runner.components().areas().get(FieldId::Contact)[1];
        let inside = tui::Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: dropdown.x + 1,
            row: dropdown.y + 1,
            modifiers: KeyModifiers::NONE,
        });
        runner.run_one_cycle_for_tests(vec![inside]).await.unwrap();
        assert!(runner.runtime().state().form.contact.is_open());

        let outside = tui::Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 59,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        runner.run_one_cycle_for_tests(vec![outside]).await.unwrap();
        assert!(!runner.runtime().state().form.contact.is_open());
        assert_eq!(runner.listeners.active_count(), 0);
    }

    #[tokio::test]
    async fn test_run_until_quit() {
        let events = [
            key('4'),
            key('2'),
            tui::Event::Render,
            tui::Event::Quit,
            key('9'),
        ];
        let tui = Arc::new(Mutex::new(TestTui::with_events(60, 20, events).unwrap()));
        let mut runner = AppRunner::new_with_config(config(), SharedLayout::default(), tui.clone());

        runner.run().await.unwrap();

        assert_eq!(runner.runtime().state().form.amount.value(), Some("42.00"));
        let tui = tui.lock().await;
        assert!(!tui.is_entered());
        assert!(tui.screen_text().contains("Amount: 42.00"));
    }
}
