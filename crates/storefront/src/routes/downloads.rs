//! Digital asset downloads.
//!
//! Asset paths are stored relative to the media root. A stored path that
//! would leave the media root is rejected rather than served.

use std::io;
use std::path::{Component, Path as FsPath, PathBuf};

use async_stream::try_stream;
use axum::body::{Body, Bytes};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use digistore_core::DigitalAssetId;
use digistore_core::catalog::DigitalAsset;
use futures::Stream;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::instrument;

use crate::db::DigitalAssetRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

const CHUNK_SIZE: usize = 64 * 1024;
const FALLBACK_FILENAME: &str = "download";

/// Stream the file behind a digital asset as an attachment.
#[instrument(skip(state))]
pub async fn download(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Response> {
    // TODO: require a paid order containing asset.product_id for the current
    // customer once orders and customer sessions exist; until then any caller
    // who knows an asset ID can download it.
    let asset = DigitalAssetRepository::new(state.pool())
        .get_by_id(DigitalAssetId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("digital asset {id}")))?;

    serve_asset(&state.config().media_root, &asset).await
}

/// Build the streaming response for an asset under `media_root`.
pub(crate) async fn serve_asset(media_root: &FsPath, asset: &DigitalAsset) -> Result<Response> {
    let path = resolve_asset_path(media_root, &asset.file_path)?;

    let file = match File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(asset_id = %asset.id, path = %path.display(), "Digital asset file missing");
            return Err(AppError::NotFound(format!("file for digital asset {}", asset.id)));
        }
        Err(e) => return Err(AppError::Internal(format!("open {}: {e}", path.display()))),
    };

    let filename = attachment_filename(&asset.file_path);
    tracing::info!(asset_id = %asset.id, product_id = %asset.product_id, %filename, "Serving download");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_DISPOSITION, content_disposition(&filename))
        .body(Body::from_stream(file_chunks(file)))
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Join a stored relative path onto the media root.
///
/// Absolute paths and `..` components are rejected.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an empty or escaping path.
pub fn resolve_asset_path(media_root: &FsPath, file_path: &str) -> Result<PathBuf> {
    let relative = FsPath::new(file_path);
    if file_path.trim().is_empty() {
        return Err(AppError::BadRequest("empty asset path".to_string()));
    }

    let escapes = relative.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes {
        return Err(AppError::BadRequest(
            "asset path escapes the media root".to_string(),
        ));
    }

    Ok(media_root.join(relative))
}

/// Last path segment of the stored path, made safe for a quoted header value.
pub(crate) fn attachment_filename(file_path: &str) -> String {
    let name = FsPath::new(file_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(FALLBACK_FILENAME);

    name.chars()
        .map(|c| {
            if c == '"' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect()
}

pub(crate) fn content_disposition(filename: &str) -> String {
    format!("attachment; filename=\"{filename}\"")
}

fn file_chunks(mut file: File) -> impl Stream<Item = io::Result<Bytes>> {
    try_stream! {
        let mut buffer = vec![0_u8; CHUNK_SIZE];
        loop {
            let read = file.read(&mut buffer).await?;
            if read == 0 {
                break;
            }
            let chunk = buffer.get(..read).unwrap_or_default();
            yield Bytes::copy_from_slice(chunk);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use axum::response::IntoResponse;
    use digistore_core::ProductId;
    use tempfile::tempdir;

    use super::*;

    fn asset(file_path: &str) -> DigitalAsset {
        DigitalAsset {
            id: DigitalAssetId::new(5),
            product_id: ProductId::new(9),
            file_path: file_path.to_string(),
        }
    }

    #[test]
    fn test_resolve_asset_path_joins_relative_path() {
        let path = resolve_asset_path(FsPath::new("/srv/media"), "books/python.pdf").unwrap();
        assert_eq!(path, PathBuf::from("/srv/media/books/python.pdf"));
    }

    #[test]
    fn test_resolve_asset_path_rejects_escapes() {
        for bad in ["../etc/passwd", "books/../../secret", "/etc/passwd", "", "   "] {
            let err = resolve_asset_path(FsPath::new("/srv/media"), bad).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_attachment_filename_uses_basename() {
        assert_eq!(attachment_filename("books/python.pdf"), "python.pdf");
        assert_eq!(attachment_filename("plain.zip"), "plain.zip");
        assert_eq!(attachment_filename("a/we\"ird.zip"), "we_ird.zip");
    }

    #[test]
    fn test_content_disposition_header() {
        assert_eq!(
            content_disposition("python.pdf"),
            "attachment; filename=\"python.pdf\""
        );
    }

    #[tokio::test]
    async fn test_serve_asset_streams_file() {
        let media = tempdir().unwrap();
        let root = media.path();
        std::fs::create_dir_all(root.join("music")).unwrap();
        let payload = vec![7_u8; CHUNK_SIZE + 10];
        std::fs::write(root.join("music/lofi.zip"), &payload).unwrap();

        let response = serve_asset(root, &asset("music/lofi.zip")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"lofi.zip\""
        );
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/octet-stream"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), payload.as_slice());
    }

    #[tokio::test]
    async fn test_serve_asset_missing_file_is_not_found() {
        let media = tempdir().unwrap();

        let err = serve_asset(media.path(), &asset("nowhere.zip"))
            .await
            .unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
