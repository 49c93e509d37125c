use std::{collections::VecDeque, sync::Arc};

use tokio::sync::mpsc;

use crate::{
    core::{
        cmd::{Cmd, TuiCommand},
        cmd_executor::CmdExecutor,
        msg::Msg,
        raw_msg::RawMsg,
        state::AppState,
        textarea_engine::TextAreaEngine,
        translator::translate_raw_to_domain,
        update::update_with_engine,
    },
    infrastructure::tui::textarea_engine::TuiTextAreaEngine,
};

/// Drives the Elm loop: raw messages in, state updates, commands out
pub struct Runtime {
    engine: Arc<dyn TextAreaEngine + Send + Sync>,
    state: AppState,
    msg_queue: VecDeque<Msg>,
    raw_msg_queue: VecDeque<RawMsg>,
    cmd_queue: VecDeque<Cmd>,
    msg_tx: Option<mpsc::UnboundedSender<Msg>>,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
    raw_msg_tx: Option<mpsc::UnboundedSender<RawMsg>>,
    raw_msg_rx: mpsc::UnboundedReceiver<RawMsg>,
    cmd_executor: Option<CmdExecutor>,
}

impl Runtime {
    /// Create a new Runtime
    pub fn new(initial_state: AppState) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (raw_msg_tx, raw_msg_rx) = mpsc::unbounded_channel();

        Self {
            engine: Arc::new(TuiTextAreaEngine),
            state: initial_state,
            msg_queue: VecDeque::new(),
            raw_msg_queue: VecDeque::new(),
            cmd_queue: VecDeque::new(),
            msg_tx: Some(msg_tx),
            msg_rx,
            raw_msg_tx: Some(raw_msg_tx),
            raw_msg_rx,
            cmd_executor: None,
        }
    }

    /// Create a new Runtime with command executor
    pub fn new_with_executor(initial_state: AppState, executor: CmdExecutor) -> Self {
        let mut runtime = Self::new(initial_state);
        runtime.set_executor(executor);
        runtime
    }

    /// Set command executor; background results are routed back into this runtime
    pub fn set_executor(&mut self, mut executor: CmdExecutor) {
        if let Some(tx) = &self.raw_msg_tx {
            executor.set_raw_sender(tx.clone());
        }
        self.cmd_executor = Some(executor);
    }

    /// Replace the text editing engine
    pub fn set_engine(&mut self, engine: Arc<dyn TextAreaEngine + Send + Sync>) {
        self.engine = engine;
    }

    pub fn executor(&self) -> Option<&CmdExecutor> {
        self.cmd_executor.as_ref()
    }

    pub fn executor_mut(&mut self) -> Option<&mut CmdExecutor> {
        self.cmd_executor.as_mut()
    }

    /// Get sender for message transmission
    pub fn get_sender(&self) -> Option<mpsc::UnboundedSender<Msg>> {
        self.msg_tx.clone()
    }

    /// Add TUI command sender support to existing executor (for TuiCommand execution)
    pub fn add_tui_sender(
        &mut self,
        tui_sender: mpsc::UnboundedSender<TuiCommand>,
    ) -> Result<(), String> {
        if let Some(executor) = &mut self.cmd_executor {
            executor.set_tui_sender(tui_sender);
            Ok(())
        } else {
            Err("No executor available. Use set_executor() first.".to_string())
        }
    }

    /// Add render request sender for orchestrated rendering in AppRunner
    pub fn add_render_request_sender(
        &mut self,
        render_sender: mpsc::UnboundedSender<()>,
    ) -> Result<(), String> {
        if let Some(executor) = &mut self.cmd_executor {
            executor.set_render_request_sender(render_sender);
            Ok(())
        } else {
            Err("No executor available. Use set_executor() first.".to_string())
        }
    }

    /// Get current state (read-only)
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Send message directly (for testing)
    pub fn send_msg(&mut self, msg: Msg) {
        self.msg_queue.push_back(msg);
    }

    /// Send raw message (for integration with external systems)
    pub fn send_raw_msg(&mut self, raw_msg: RawMsg) {
        self.raw_msg_queue.push_back(raw_msg);
    }

    /// Get raw message sender
    pub fn get_raw_sender(&self) -> Option<mpsc::UnboundedSender<RawMsg>> {
        self.raw_msg_tx.clone()
    }

    /// Get pending commands
    pub fn pending_commands(&mut self) -> Vec<Cmd> {
        self.cmd_queue.drain(..).collect()
    }

    /// Execute all pending commands using the command executor
    pub fn execute_pending_commands(&mut self) -> Result<Vec<String>, String> {
        let commands = self.pending_commands();
        let Some(executor) = self.cmd_executor.as_mut() else {
            return Err("No command executor available. Use set_executor() to configure.".to_string());
        };
        if commands.is_empty() {
            return Ok(vec![]);
        }

        executor
            .execute_commands(&commands)
            .map_err(|e| format!("Command execution failed: {e}"))
    }

    /// Execute a single command immediately
    pub fn execute_command(&mut self, cmd: &Cmd) -> Result<(), String> {
        if let Some(executor) = &mut self.cmd_executor {
            executor
                .execute_command(cmd)
                .map_err(|e| format!("Command execution failed: {e}"))
        } else {
            Err("No command executor available. Use set_executor() to configure.".to_string())
        }
    }

    /// Process a single message
    pub fn process_message(&mut self, msg: Msg) -> Vec<Cmd> {
        if !msg.is_frequent() {
            log::debug!("update: {msg:?}");
        }
        let state = std::mem::take(&mut self.state);
        let (new_state, commands) = update_with_engine(msg, state, self.engine.as_ref());
        self.state = new_state;

        let commands: Vec<Cmd> = commands.into_iter().flat_map(Cmd::flatten).collect();
        self.cmd_queue.extend(commands.iter().cloned());

        commands
    }

    fn process_raw_message(&mut self, raw_msg: RawMsg) -> Vec<Cmd> {
        translate_raw_to_domain(raw_msg, &self.state)
            .into_iter()
            .flat_map(|msg| self.process_message(msg))
            .collect()
    }

    /// Process all messages in queue
    pub fn process_all_messages(&mut self) -> Vec<Cmd> {
        let mut all_commands = Vec::new();

        // Domain messages queued before this cycle go first
        while let Some(msg) = self.msg_queue.pop_front() {
            let commands = self.process_message(msg);
            all_commands.extend(commands);
        }

        // Each raw message is translated against the state left by the
        // previous one, so a focus change routes the next key correctly
        while let Some(raw_msg) = self.raw_msg_queue.pop_front() {
            all_commands.extend(self.process_raw_message(raw_msg));
        }

        // Process raw messages from external sources
        while let Ok(raw_msg) = self.raw_msg_rx.try_recv() {
            all_commands.extend(self.process_raw_message(raw_msg));
        }

        // Process domain messages from external sources
        while let Ok(msg) = self.msg_rx.try_recv() {
            let commands = self.process_message(msg);
            all_commands.extend(commands);
        }

        all_commands
    }

    /// Process all messages and execute commands in one step
    pub fn run_update_cycle(&mut self) -> Result<Vec<String>, String> {
        let _commands = self.process_all_messages();
        self.execute_pending_commands()
    }

    /// Stop background work owned by the executor
    pub fn shutdown(&mut self) {
        if let Some(executor) = &mut self.cmd_executor {
            executor.shutdown();
        }
    }

    /// Get runtime statistics
    pub fn get_stats(&self) -> RuntimeStats {
        RuntimeStats {
            queued_messages: self.msg_queue.len(),
            queued_commands: self.cmd_queue.len(),
            focus: self.state.ui.focus.to_string(),
            dropdown_open: self.state.form.contact.is_open(),
            has_executor: self.cmd_executor.is_some(),
            pointer_listeners: self
                .cmd_executor
                .as_ref()
                .map(|executor| executor.get_stats().pointer_listeners)
                .unwrap_or(0),
        }
    }
}

/// Runtime statistics
#[derive(Debug, Clone)]
pub struct RuntimeStats {
    pub queued_messages: usize,
    pub queued_commands: usize,
    pub focus: String,
    pub dropdown_open: bool,
    pub has_executor: bool,
    pub pointer_listeners: usize,
}
