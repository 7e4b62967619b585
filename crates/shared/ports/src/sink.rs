use crate::event::GatewayEvent;
use thiserror::Error;

/// Nobody consumes gateway callbacks anymore
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("event sink closed")]
pub struct SinkClosed;

/// Where a gateway delivers its callbacks
///
/// Emitting must never block: gateways call it from their own callback
/// thread, one event at a time, in the order they produced them.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: GatewayEvent) -> Result<(), SinkClosed>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recorder(Mutex<Vec<GatewayEvent>>);

    impl EventSink for Recorder {
        fn emit(&self, event: GatewayEvent) -> Result<(), SinkClosed> {
            self.0.lock().map_err(|_| SinkClosed)?.push(event);
            Ok(())
        }
    }

    #[test]
    fn test_sink_is_object_safe() {
        let recorder = Recorder(Mutex::new(Vec::new()));
        let sink: &dyn EventSink = &recorder;
        sink.emit(GatewayEvent::FrontConnected).unwrap();
        assert_eq!(recorder.0.lock().unwrap().len(), 1);
    }
}
