use std::{collections::HashMap, sync::Arc, time::Duration};

use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        cmd::{Cmd, TuiCommand},
        raw_msg::RawMsg,
        state::form::FieldId,
    },
    domain::{contact::Contact, preferences::SharedLayout},
    infrastructure::{
        listeners::{ListenerGuard, PointerListeners},
        preferences::PreferencesPersistence,
        query::QueryService,
        search::LatestTasks,
    },
};

/// Command executor that turns Elm commands into tasks, listener guards and store writes
///
/// Every result of background work comes back as a [`RawMsg`] on `raw_sender`.
pub struct CmdExecutor {
    raw_sender: Option<mpsc::UnboundedSender<RawMsg>>,
    contacts: Arc<dyn QueryService<Contact>>,
    searches: LatestTasks<FieldId>,
    fetches: LatestTasks<FieldId>,
    pointer_listeners: PointerListeners,
    guards: HashMap<FieldId, ListenerGuard>,
    layout: SharedLayout,
    persistence: Option<Arc<dyn PreferencesPersistence>>,
    tui_sender: Option<mpsc::UnboundedSender<TuiCommand>>,
    render_req_sender: Option<mpsc::UnboundedSender<()>>,
    root: CancellationToken,
}

impl CmdExecutor {
    /// Create a new command executor backed by `contacts`
    pub fn new(contacts: Arc<dyn QueryService<Contact>>, layout: SharedLayout) -> Self {
        let root = CancellationToken::new();
        Self {
            raw_sender: None,
            contacts,
            searches: LatestTasks::new(root.clone()),
            fetches: LatestTasks::new(root.clone()),
            pointer_listeners: PointerListeners::new(),
            guards: HashMap::new(),
            layout,
            persistence: None,
            tui_sender: None,
            render_req_sender: None,
            root,
        }
    }

    /// Inject the channel background tasks report back on.
    pub fn set_raw_sender(&mut self, sender: mpsc::UnboundedSender<RawMsg>) {
        self.raw_sender = Some(sender);
    }

    /// Share the outside-click table with the event loop.
    pub fn set_pointer_listeners(&mut self, listeners: PointerListeners) {
        self.guards.clear();
        self.pointer_listeners = listeners;
    }

    pub fn set_persistence(&mut self, persistence: Arc<dyn PreferencesPersistence>) {
        self.persistence = Some(persistence);
    }

    /// Inject TUI command sender for executing TuiCommand asynchronously.
    pub fn set_tui_sender(&mut self, sender: mpsc::UnboundedSender<TuiCommand>) {
        self.tui_sender = Some(sender);
    }

    /// Inject render request sender for AppRunner-orchestrated rendering.
    pub fn set_render_request_sender(&mut self, sender: mpsc::UnboundedSender<()>) {
        self.render_req_sender = Some(sender);
    }

    pub fn pointer_listeners(&self) -> &PointerListeners {
        &self.pointer_listeners
    }

    pub fn layout(&self) -> &SharedLayout {
        &self.layout
    }

    /// Token every spawned task descends from
    pub fn root_token(&self) -> CancellationToken {
        self.root.clone()
    }

    fn raw_sender(&self, cmd: &str) -> Option<mpsc::UnboundedSender<RawMsg>> {
        if self.raw_sender.is_none() {
            log::warn!("{cmd} ignored: raw message sender not configured");
        }
        self.raw_sender.clone()
    }

    /// Execute a single command
    pub fn execute_command(&mut self, cmd: &Cmd) -> Result<()> {
        match cmd {
            Cmd::None => {}

            Cmd::ScheduleSearch {
                field,
                epoch,
                delay_ms,
            } => {
                let Some(tx) = self.raw_sender("ScheduleSearch") else {
                    return Ok(());
                };
                let (field, epoch) = (*field, *epoch);
                let delay = Duration::from_millis(*delay_ms);
                self.searches.spawn_latest(field, move |token| async move {
                    tokio::time::sleep(delay).await;
                    if !token.is_cancelled() {
                        let _ = tx.send(RawMsg::DebounceElapsed { field, epoch });
                    }
                });
            }

            Cmd::CancelSearch { field } => {
                if self.searches.cancel(*field) {
                    log::debug!("cancelled pending search of {field}");
                }
            }

            Cmd::Query { field, text, epoch } => {
                let Some(tx) = self.raw_sender("Query") else {
                    return Ok(());
                };
                let (field, epoch) = (*field, *epoch);
                let query = self.contacts.query(text.clone());
                log::debug!("query {text:?} for {field} at epoch {epoch}");
                self.searches.spawn_latest(field, move |token| async move {
                    let result = query.await;
                    if token.is_cancelled() {
                        return;
                    }
                    let msg = match result {
                        Ok(rows) => RawMsg::SearchResults { field, epoch, rows },
                        Err(e) => RawMsg::QueryFailed {
                            field,
                            epoch,
                            error: e.to_string(),
                        },
                    };
                    let _ = tx.send(msg);
                });
            }

            Cmd::Fetch { field, value } => {
                let Some(tx) = self.raw_sender("Fetch") else {
                    return Ok(());
                };
                let field = *field;
                let value = value.clone();
                let fetch = self.contacts.fetch(value.clone());
                self.fetches.spawn_latest(field, move |token| async move {
                    let result = fetch.await;
                    if token.is_cancelled() {
                        return;
                    }
                    let msg = match result {
                        Ok(option) => RawMsg::Fetched {
                            field,
                            value,
                            option,
                        },
                        Err(e) => RawMsg::Error(format!("Failed to resolve {value}: {e}")),
                    };
                    let _ = tx.send(msg);
                });
            }

            Cmd::ListenPointer { field } => {
                let listeners = &self.pointer_listeners;
                self.guards
                    .entry(*field)
                    .or_insert_with(|| listeners.register(*field));
            }

            Cmd::UnlistenPointer { field } => {
                self.guards.remove(field);
            }

            Cmd::SetDarkTheme(dark_theme) => {
                if !self.layout.set_dark_theme(*dark_theme) {
                    return Ok(());
                }
                if let Some(persistence) = &self.persistence {
                    if let Err(e) = persistence.save(&self.layout.snapshot()) {
                        log::error!("Failed to save preferences: {e}");
                        if let Some(tx) = &self.raw_sender {
                            let _ = tx.send(RawMsg::Error(format!(
                                "Failed to save preferences: {e}"
                            )));
                        }
                    }
                }
            }

            Cmd::Tui(tui_cmd) => match tui_cmd {
                TuiCommand::Resize { width, height } => {
                    if let Some(tx) = &self.tui_sender {
                        let _ = tx.send(tui_cmd.clone());
                        return Ok(());
                    }
                    log::warn!(
                        "CmdExecutor: TUI sender not configured; dropping Resize command {}x{}",
                        width,
                        height
                    );
                }
            },

            Cmd::RequestRender => {
                if let Some(rtx) = &self.render_req_sender {
                    let _ = rtx.send(());
                }
            }

            Cmd::LogError { message } => {
                log::error!("Elm command error: {}", message);
            }

            Cmd::LogInfo { message } => {
                log::info!("Elm command info: {}", message);
            }

            Cmd::Batch(commands) => {
                for cmd in commands {
                    self.execute_command(cmd)?;
                }
            }
        }

        Ok(())
    }

    /// Execute multiple commands
    pub fn execute_commands(&mut self, commands: &[Cmd]) -> Result<Vec<String>> {
        let mut execution_log = Vec::new();

        for cmd in commands {
            match self.execute_command(cmd) {
                Ok(()) => {
                    execution_log.push(format!("✓ Executed: {}", cmd.name()));
                }
                Err(e) => {
                    let error_msg = format!("✗ Failed to execute {}: {}", cmd.name(), e);
                    log::error!("{}", error_msg);
                    execution_log.push(error_msg);
                }
            }
        }

        Ok(execution_log)
    }

    /// Cancel every pending task and drop all listener registrations.
    pub fn shutdown(&mut self) {
        self.searches.shutdown();
        self.fetches.shutdown();
        self.guards.clear();
    }

    /// Get execution statistics
    pub fn get_stats(&self) -> CmdExecutorStats {
        CmdExecutorStats {
            has_raw_sender: self.raw_sender.is_some(),
            running_searches: self.searches.running(),
            running_fetches: self.fetches.running(),
            pointer_listeners: self.pointer_listeners.active_count(),
        }
    }
}

impl Drop for CmdExecutor {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

/// Command executor statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdExecutorStats {
    pub has_raw_sender: bool,
    pub running_searches: usize,
    pub running_fetches: usize,
    pub pointer_listeners: usize,
}

/// Extension trait for Cmd to get human-readable names
trait CmdName {
    fn name(&self) -> String;
}

impl CmdName for Cmd {
    fn name(&self) -> String {
        match self {
            Cmd::None => "None".to_string(),
            Cmd::ScheduleSearch { .. } => "ScheduleSearch".to_string(),
            Cmd::CancelSearch { .. } => "CancelSearch".to_string(),
            Cmd::Query { .. } => "Query".to_string(),
            Cmd::Fetch { .. } => "Fetch".to_string(),
            Cmd::ListenPointer { .. } => "ListenPointer".to_string(),
            Cmd::UnlistenPointer { .. } => "UnlistenPointer".to_string(),
            Cmd::SetDarkTheme(_) => "SetDarkTheme".to_string(),
            Cmd::RequestRender => "RequestRender".to_string(),
            Cmd::LogError { .. } => "LogError".to_string(),
            Cmd::LogInfo { .. } => "LogInfo".to_string(),
            Cmd::Batch(cmds) => format!("Batch({})", cmds.len()),
            Cmd::Tui(tc) => match tc {
                TuiCommand::Resize { .. } => "Tui(Resize)".to_string(),
            },
        }
    }
}
