use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishError {
    /// The outbound queue has no room for another message
    QueueFull,
    /// The payload does not fit the outbound buffer
    PayloadTooLarge,
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::QueueFull => write!(f, "publish queue is full"),
            PublishError::PayloadTooLarge => write!(f, "payload too large"),
        }
    }
}

/// Hands state payloads to the transport for publication on the state topic
pub trait StatePublisher {
    fn publish_state(&mut self, payload: &[u8]) -> Result<(), PublishError>;
}

impl<T: StatePublisher + ?Sized> StatePublisher for &mut T {
    fn publish_state(&mut self, payload: &[u8]) -> Result<(), PublishError> {
        (**self).publish_state(payload)
    }
}
