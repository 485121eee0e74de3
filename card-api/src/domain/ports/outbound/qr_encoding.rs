use crate::domain::CardError;

pub trait QrEncoder: Send + Sync + 'static {
    /// Encodes `payload` into a PNG image.
    fn encode(&self, payload: &str) -> Result<Vec<u8>, CardError>;
}
