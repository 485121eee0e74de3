use async_trait::async_trait;

use crate::domain::{models::CardPackage, CardError, ContactRecord};

#[async_trait]
pub trait CardService: Send + Sync + 'static {
    /// Builds the vCard, QR code and info image for `record` and bundles
    /// them into an archive.
    async fn generate_package(&self, record: ContactRecord) -> Result<CardPackage, CardError>;

    /// Renders the info image alone, as PNG bytes.
    async fn render_info_image(&self, record: ContactRecord) -> Result<Vec<u8>, CardError>;
}
