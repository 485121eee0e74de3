use crate::domain::{CardError, ContactRecord};

pub trait InfoRenderer: Send + Sync + 'static {
    /// Draws the record onto a card and returns it as a PNG image.
    fn render(&self, record: &ContactRecord) -> Result<Vec<u8>, CardError>;
}
