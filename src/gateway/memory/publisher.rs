use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryResult;
use crate::gateway::events::EventPublisher;

// EventLog is a shared, append-only list of published events.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventLog {
    events: Arc<RwLock<Vec<DomainEvent>>>,
}

impl EventLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn events(&self) -> Vec<DomainEvent> {
        self.events.read().await.clone()
    }

    pub(crate) async fn names(&self) -> Vec<String> {
        self.events.read().await.iter().map(|e| e.name.to_string()).collect()
    }
}

impl PartialEq for EventLog {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.events, &other.events)
    }
}

#[derive(Debug)]
pub struct MemoryPublisher {
    log: EventLog,
}

impl MemoryPublisher {
    pub(crate) fn new(log: EventLog) -> Self {
        Self {
            log,
        }
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn publish(&self, event: &DomainEvent) -> LibraryResult<()> {
        self.log.events.write().await.push(event.clone());
        Ok(())
    }
}
