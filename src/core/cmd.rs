use serde::{Deserialize, Serialize};

use crate::{core::msg::Msg, core::state::form::FieldId, domain::autocomplete::Epoch};

/// UI (TUI) specific sub-commands executed by the host/runtime
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TuiCommand {
    Resize { width: u16, height: u16 },
}

/// Elm-like command definitions
/// Represents side effects (timers, queries, shared-store writes, etc.)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    // Search-related commands
    /// Start the debounce timer of `field`, superseding any pending one
    ScheduleSearch {
        field: FieldId,
        epoch: Epoch,
        delay_ms: u64,
    },
    /// Drop the pending timer or query of `field`
    CancelSearch {
        field: FieldId,
    },
    Query {
        field: FieldId,
        text: String,
        epoch: Epoch,
    },
    Fetch {
        field: FieldId,
        value: String,
    },

    // Outside-click listener lifecycle
    ListenPointer {
        field: FieldId,
    },
    UnlistenPointer {
        field: FieldId,
    },

    // Shared display preferences
    SetDarkTheme(bool),

    // UI-related commands
    Tui(TuiCommand),
    /// Request a render; delivered via the render request channel
    RequestRender,

    // Logging related
    LogError {
        message: String,
    },
    LogInfo {
        message: String,
    },

    // Batch command (execute multiple commands together)
    Batch(Vec<Cmd>),

    // Do nothing (for testing)
    None,
}

impl Cmd {
    /// Combine multiple commands into one
    pub fn batch(commands: Vec<Cmd>) -> Cmd {
        let mut commands = commands;
        match commands.len() {
            0 => Cmd::None,
            1 => commands.remove(0),
            _ => Cmd::Batch(commands),
        }
    }

    /// Whether the command requires asynchronous processing
    pub fn is_async(&self) -> bool {
        match self {
            Cmd::ScheduleSearch { .. } | Cmd::Query { .. } | Cmd::Fetch { .. } => true,

            Cmd::CancelSearch { .. }
            | Cmd::ListenPointer { .. }
            | Cmd::UnlistenPointer { .. }
            | Cmd::SetDarkTheme(_)
            | Cmd::Tui(..)
            | Cmd::RequestRender
            | Cmd::LogError { .. }
            | Cmd::LogInfo { .. }
            | Cmd::None => false,

            Cmd::Batch(cmds) => cmds.iter().any(|cmd| cmd.is_async()),
        }
    }

    /// Get command priority (smaller numbers = higher priority)
    pub fn priority(&self) -> u8 {
        match self {
            // UI-related has highest priority
            Cmd::Tui(..) | Cmd::RequestRender => 0,

            // Cancellation and listener bookkeeping must run before new work
            Cmd::CancelSearch { .. } | Cmd::ListenPointer { .. } | Cmd::UnlistenPointer { .. } => 1,

            Cmd::ScheduleSearch { .. } | Cmd::Query { .. } | Cmd::Fetch { .. } => 2,

            Cmd::SetDarkTheme(_) => 3,

            // Logging have lowest priority
            Cmd::LogError { .. } | Cmd::LogInfo { .. } => 4,

            // Batch takes highest priority of contained commands
            Cmd::Batch(cmds) => cmds.iter().map(|cmd| cmd.priority()).min().unwrap_or(255),

            Cmd::None => 255,
        }
    }

    /// Flattens nested batches and drops no-ops
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => vec![],
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }
}

/// Command execution result
#[derive(Debug, Clone)]
pub enum CmdResult {
    /// Success (may generate new messages)
    Success(Vec<Msg>),
    /// Error
    Error(String),
    /// Still executing (for async commands)
    Pending,
}
