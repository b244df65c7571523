pub mod events;
pub mod factory;
pub mod logs;
pub mod memory;

use crate::gateway::memory::publisher::EventLog;

#[derive(Debug, PartialEq, Clone)]
pub(crate) enum GatewayPublisherVia {
    Logs,
    Memory(EventLog),
}
