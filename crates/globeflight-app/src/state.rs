//! Messages shared between the input reader and the host loop thread.

use globeflight_core::commands::HostCommand;

/// Commands sent from the input side to the host loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopCommand {
    /// A host command to forward to the engine.
    Host(HostCommand),
    /// Shut down the host loop thread gracefully.
    Shutdown,
}

impl From<HostCommand> for LoopCommand {
    fn from(command: HostCommand) -> Self {
        LoopCommand::Host(command)
    }
}
