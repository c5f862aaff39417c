use async_trait::async_trait;

use mindhaven_domain::shared::DomainError;

/// Marker trait for commands
pub trait Command: Send + Sync + 'static {}

/// Handles a single command type
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    type Result: Send;

    async fn handle(&self, command: C) -> Result<Self::Result, DomainError>;
}
