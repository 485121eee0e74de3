//! Composition root: the only place that wires concrete outbound adapters
//! into the card service.

use std::sync::Arc;

use anyhow::Context;

use crate::{
    adapters::outbound::{
        archive::ZipPackager,
        media::{CardRenderer, QrLogo, StyledQrEncoder, Typeface},
    },
    config::Settings,
    domain::{
        ports::inbound::CardService,
        services::{CardOptions, CardServiceImpl},
    },
};

pub fn build_card_service(settings: &Settings) -> anyhow::Result<Arc<dyn CardService>> {
    let mut encoder = StyledQrEncoder::new(settings.qr.style());
    if let Some(logo) = load_logo(settings)? {
        encoder = encoder.with_logo(logo);
    }

    let typeface = match &settings.card.font_path {
        Some(path) => Typeface::load(path)
            .with_context(|| format!("failed to load card font {}", path.display()))?,
        None => {
            tracing::info!("no card font configured, using the built-in bitmap face");
            Typeface::Bitmap
        }
    };
    let canvas = settings.card.canvas().context("invalid card size")?;
    let renderer = CardRenderer::new(canvas, typeface);

    let packager = ZipPackager::new(settings.storage.scratch_root.clone());

    let options = CardOptions {
        payload: settings.qr.payload,
        public_url: settings.application.public_url.clone(),
        include_info_image: settings.card.include_info_image,
    };

    Ok(Arc::new(CardServiceImpl::new(
        Arc::new(encoder),
        Arc::new(renderer),
        Arc::new(packager),
        options,
    )))
}

/// Loads the QR logo if one is configured and present on disk.
fn load_logo(settings: &Settings) -> anyhow::Result<Option<QrLogo>> {
    let Some(path) = &settings.qr.logo_path else {
        return Ok(None);
    };

    if !path.exists() {
        tracing::warn!(logo = %path.display(), "QR logo not found, encoding without a logo");
        return Ok(None);
    }

    let logo = QrLogo::open(path)
        .with_context(|| format!("failed to decode QR logo {}", path.display()))?;
    tracing::info!(logo = %path.display(), "loaded QR logo");
    Ok(Some(logo))
}
