use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;

// EventPublisher delivers circulation events after the state change they describe is stored.
#[async_trait]
pub(crate) trait EventPublisher: Sync + Send {
    async fn publish(&self, event: &DomainEvent) -> LibraryResult<()>;
}
