use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::domain::{
    models::{ArchiveEntry, CardPackage, QrPayload},
    payload,
    ports::{
        inbound::CardService,
        outbound::{InfoRenderer, Packager, QrEncoder},
    },
    vcard, CardError, ContactRecord,
};

pub const ARCHIVE_NAME: &str = "digital_card.zip";
pub const VCARD_ENTRY: &str = "card.vcf";
pub const QR_ENTRY: &str = "qrcode.png";
pub const INFO_ENTRY: &str = "info.png";

#[derive(Debug, Clone)]
pub struct CardOptions {
    pub payload: QrPayload,
    /// Base URL the info image endpoint is reachable under.
    pub public_url: Url,
    pub include_info_image: bool,
}

pub struct CardServiceImpl<E, R, P> {
    encoder: Arc<E>,
    renderer: Arc<R>,
    packager: Arc<P>,
    options: Arc<CardOptions>,
}

impl<E, R, P> CardServiceImpl<E, R, P> {
    pub fn new(encoder: Arc<E>, renderer: Arc<R>, packager: Arc<P>, options: CardOptions) -> Self {
        Self {
            encoder,
            renderer,
            packager,
            options: Arc::new(options),
        }
    }
}

impl<E: QrEncoder, R: InfoRenderer, P: Packager> CardServiceImpl<E, R, P> {
    fn build_package(
        encoder: &E,
        renderer: &R,
        packager: &P,
        options: &CardOptions,
        record: &ContactRecord,
    ) -> Result<CardPackage, CardError> {
        let vcard = vcard::format(record);
        let qr_payload = payload::qr_payload(options.payload, record, &vcard, &options.public_url);
        let qr = encoder.encode(&qr_payload)?;

        let mut entries = vec![
            ArchiveEntry::new(VCARD_ENTRY, vcard),
            ArchiveEntry::new(QR_ENTRY, qr),
        ];
        if options.include_info_image {
            entries.push(ArchiveEntry::new(INFO_ENTRY, renderer.render(record)?));
        }

        let package = packager.package(&entries, ARCHIVE_NAME)?;
        tracing::debug!(
            scratch = %package.scratch_dir().display(),
            entries = entries.len(),
            "built card package"
        );

        Ok(package)
    }
}

#[async_trait]
impl<E: QrEncoder, R: InfoRenderer, P: Packager> CardService for CardServiceImpl<E, R, P> {
    async fn generate_package(&self, record: ContactRecord) -> Result<CardPackage, CardError> {
        let encoder = Arc::clone(&self.encoder);
        let renderer = Arc::clone(&self.renderer);
        let packager = Arc::clone(&self.packager);
        let options = Arc::clone(&self.options);

        tokio::task::spawn_blocking(move || {
            Self::build_package(&encoder, &renderer, &packager, &options, &record)
        })
        .await
        .map_err(|err| CardError::Task(format!("card generation task failed: {err}")))?
    }

    async fn render_info_image(&self, record: ContactRecord) -> Result<Vec<u8>, CardError> {
        let renderer = Arc::clone(&self.renderer);

        tokio::task::spawn_blocking(move || renderer.render(&record))
            .await
            .map_err(|err| CardError::Task(format!("info image task failed: {err}")))?
    }
}
