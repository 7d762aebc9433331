use tracing::info;

use crate::id::Id;

/// Receives ids in the order the consumer pops them
pub trait IdSink {
    fn emit(&mut self, id: &Id);
}

impl<F: FnMut(&Id)> IdSink for F {
    fn emit(&mut self, id: &Id) {
        self(id)
    }
}

/// Emits every delivered id as a tracing event
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl IdSink for LogSink {
    fn emit(&mut self, id: &Id) {
        info!(timestamp = id.timestamp(), id = id.value(), "delivered");
    }
}
