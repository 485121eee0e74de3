use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{header, HeaderValue},
    response::Response,
    routing::{get, post},
    Form, Router,
};
use futures::stream;
use tokio::{fs::File, io::AsyncReadExt};
use tracing::instrument;

use crate::{
    app_state::AppState,
    domain::{models::CardPackage, payload::INFO_IMAGE_PATH, ContactForm, ContactRecord},
    routes::ApiError,
};

const ARCHIVE_CHUNK_SIZE: usize = 64 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/card", post(create_card))
        .route(&format!("/{INFO_IMAGE_PATH}"), get(info_image))
}

#[instrument(name = "POST /card", skip_all)]
async fn create_card(
    State(app_state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> Result<Response, ApiError> {
    let record = normalize(form)?;
    let package = app_state.card_service.generate_package(record).await?;

    archive_response(package).await
}

#[instrument(name = "GET /info_image", skip_all)]
async fn info_image(
    State(app_state): State<AppState>,
    Query(form): Query<ContactForm>,
) -> Result<Response, ApiError> {
    let record = normalize(form)?;
    let png = app_state.card_service.render_info_image(record).await?;

    let mut response = Response::new(Body::from(png));
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("image/png"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    Ok(response)
}

fn normalize(form: ContactForm) -> Result<ContactRecord, ApiError> {
    form.normalize().map_err(|err| {
        if let Some(field) = err.field() {
            tracing::debug!(%field, "rejected contact form: {}", err);
        }
        ApiError::from(err)
    })
}

/// Streams the archive from disk. The body owns the package, so its
/// scratch dir is released once the body has been sent or dropped.
async fn archive_response(package: CardPackage) -> Result<Response, ApiError> {
    let file = File::open(package.archive_path()).await.map_err(|err| {
        tracing::error!("failed to open card archive: {:?}", err);
        ApiError::internal("failed to build card package")
    })?;
    let length = file.metadata().await.ok().map(|meta| meta.len());
    let disposition = format!("attachment; filename=\"{}\"", package.file_name());

    let body = Body::from_stream(stream::unfold(
        Some((file, package)),
        |state| async move {
            let Some((mut file, package)) = state else {
                return None;
            };
            let mut buf = vec![0u8; ARCHIVE_CHUNK_SIZE];
            match file.read(&mut buf).await {
                Ok(0) => None,
                Ok(n) => {
                    buf.truncate(n);
                    Some((Ok(Bytes::from(buf)), Some((file, package))))
                }
                Err(err) => Some((Err(err), None)),
            }
        },
    ));

    let mut response = Response::new(body);
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/zip"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );
    if let Some(length) = length {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, sync::Arc};

    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::{
        adapters::outbound::{
            archive::ZipPackager,
            media::{CardRenderer, StyledQrEncoder},
        },
        domain::{
            models::{QrPayload, QrStyle},
            services::{CardOptions, CardServiceImpl, INFO_ENTRY, QR_ENTRY, VCARD_ENTRY},
        },
    };

    const JANE_FORM: &str = "full_name=Jane+Doe&phone=%2B1-555-0100&email=jane%40example.com\
                             &job_title=Engineer&company=Acme&website=https%3A%2F%2Facme.example";

    fn app() -> Router {
        let service = CardServiceImpl::new(
            Arc::new(StyledQrEncoder::new(QrStyle::default())),
            Arc::new(CardRenderer::default()),
            Arc::new(ZipPackager::default()),
            CardOptions {
                payload: QrPayload::Vcard,
                public_url: Url::parse("http://localhost:8000").unwrap(),
                include_info_image: true,
            },
        );
        router().with_state(AppState::new(Arc::new(service)))
    }

    fn post_card(body: &str) -> Request<Body> {
        Request::post("/card")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn post_card_returns_zip_attachment() {
        let response = app().oneshot(post_card(JANE_FORM)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"digital_card.zip\""
        );

        let bytes = body_bytes(response).await;
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        let names: Vec<_> = archive.file_names().map(str::to_owned).collect();
        assert_eq!(names.len(), 3);
        for name in [VCARD_ENTRY, QR_ENTRY, INFO_ENTRY] {
            assert!(names.iter().any(|n| n == name), "missing {name}");
        }

        let mut vcard = String::new();
        std::io::Read::read_to_string(&mut archive.by_name(VCARD_ENTRY).unwrap(), &mut vcard)
            .unwrap();
        assert_eq!(
            vcard,
            "BEGIN:VCARD\nVERSION:3.0\nFN:Jane Doe\nORG:Acme\nTITLE:Engineer\n\
             TEL;TYPE=CELL:+1-555-0100\nEMAIL:jane@example.com\n\
             URL:https://acme.example\nEND:VCARD\n"
        );
    }

    #[tokio::test]
    async fn invalid_email_is_a_bad_request_naming_the_field() {
        let body = JANE_FORM.replace("jane%40example.com", "not-an-email");
        let response = app().oneshot(post_card(&body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["field"], "email");
        assert_eq!(json["code"], "INVALID_FIELD");
    }

    #[tokio::test]
    async fn missing_required_field_is_a_bad_request() {
        let response = app()
            .oneshot(post_card("full_name=Jane&email=jane%40example.com"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["field"], "phone");
    }

    #[tokio::test]
    async fn blank_optional_fields_are_accepted() {
        let response = app()
            .oneshot(post_card(
                "full_name=Sam&phone=1&email=sam%40example.com&job_title=&company=&website=",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn info_image_returns_png() {
        let request = Request::get(format!("/info_image?{JANE_FORM}"))
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let image = image::load_from_memory(&body_bytes(response).await).unwrap();
        assert_eq!((image.width(), image.height()), (700, 400));
    }

    #[tokio::test]
    async fn info_image_validates_query() {
        let request = Request::get("/info_image?full_name=Jane&phone=1&email=nope")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn concurrent_requests_get_their_own_archives() {
        let app = app();
        let alice = "full_name=Alice&phone=1&email=alice%40example.com";
        let bob = "full_name=Bob&phone=2&email=bob%40example.com";

        let (a, b) = tokio::join!(
            app.clone().oneshot(post_card(alice)),
            app.clone().oneshot(post_card(bob)),
        );

        for (response, own, other) in [(a.unwrap(), "Alice", "Bob"), (b.unwrap(), "Bob", "Alice")] {
            let bytes = body_bytes(response).await;
            let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
            let mut vcard = String::new();
            std::io::Read::read_to_string(&mut archive.by_name(VCARD_ENTRY).unwrap(), &mut vcard)
                .unwrap();

            assert!(vcard.contains(&format!("FN:{own}\n")));
            assert!(!vcard.contains(other));
        }
    }
}
