// SPDX-FileCopyrightText: 2026 Pageforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Featured-image fetch and import.
//!
//! One GET per image, validated by content type, then handed to a
//! [`MediaStore`] for import. No retries, no batching -- a failed image
//! degrades that one page's featured image only.

use std::time::Duration;

use pageforge_core::{ImageData, MediaId, MediaStore, PageforgeError, PostId};
use tracing::debug;

/// Fetch an image from a URL.
///
/// Fails with a `Media` error on a non-success status or a response whose
/// content type is not `image/*`. The file name is derived from the last
/// URL path segment.
pub async fn fetch_image(client: &reqwest::Client, url: &str) -> Result<ImageData, PageforgeError> {
    let response = client.get(url).send().await.map_err(|e| PageforgeError::Media {
        message: format!("failed to fetch {url}: {e}"),
        source: Some(Box::new(e)),
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(PageforgeError::Media {
            message: format!("{url} returned {status}"),
            source: None,
        });
    }

    let mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
        .unwrap_or_default();
    if !mime.starts_with("image/") {
        return Err(PageforgeError::Media {
            message: format!("{url} is not an image (content-type: {mime:?})"),
            source: None,
        });
    }

    let file_name = file_name_from_url(url, &mime);
    let bytes = response.bytes().await.map_err(|e| PageforgeError::Media {
        message: format!("failed to read image body from {url}: {e}"),
        source: Some(Box::new(e)),
    })?;

    debug!(url, %mime, size = bytes.len(), "image fetched");

    Ok(ImageData {
        bytes: bytes.to_vec(),
        mime,
        file_name,
    })
}

/// Fetch an image and import it as a post's featured image.
pub async fn import_featured_image(
    client: &reqwest::Client,
    store: &dyn MediaStore,
    url: &str,
    post: PostId,
) -> Result<MediaId, PageforgeError> {
    let image = fetch_image(client, url).await?;
    store.import(image, Some(post)).await
}

/// Last URL path segment, with a fallback name derived from the MIME type.
fn file_name_from_url(url: &str, mime: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let candidate = path.rsplit('/').next().unwrap_or("");
    if !candidate.is_empty() && candidate.contains('.') {
        return candidate.to_string();
    }
    let extension = mime.strip_prefix("image/").unwrap_or("img");
    format!("imported.{extension}")
}

/// Shared HTTP client for image fetches.
pub fn image_client(timeout: Duration) -> Result<reqwest::Client, PageforgeError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| PageforgeError::Media {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct RecordingStore {
        imported: Mutex<Vec<(String, Option<PostId>)>>,
    }

    #[async_trait]
    impl MediaStore for RecordingStore {
        async fn import(
            &self,
            image: ImageData,
            attach_to: Option<PostId>,
        ) -> Result<MediaId, PageforgeError> {
            let mut imported = self.imported.lock().unwrap();
            imported.push((image.file_name, attach_to));
            Ok(MediaId(imported.len() as i64))
        }
    }

    #[tokio::test]
    async fn fetch_image_validates_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hero.jpg"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/jpeg")
                    .set_body_bytes(b"\xff\xd8\xff\xe0jpegdata".to_vec()),
            )
            .mount(&server)
            .await;

        let client = image_client(Duration::from_secs(5)).unwrap();
        let image = fetch_image(&client, &format!("{}/hero.jpg", server.uri()))
            .await
            .unwrap();
        assert_eq!(image.mime, "image/jpeg");
        assert_eq!(image.file_name, "hero.jpg");
        assert!(image.bytes.starts_with(b"\xff\xd8"));
    }

    #[tokio::test]
    async fn html_response_is_a_media_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=utf-8")
                    .set_body_string("<html>not an image</html>"),
            )
            .mount(&server)
            .await;

        let client = image_client(Duration::from_secs(5)).unwrap();
        let err = fetch_image(&client, &format!("{}/page", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, PageforgeError::Media { .. }));
        assert!(err.to_string().contains("not an image"));
    }

    #[tokio::test]
    async fn missing_image_is_a_media_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = image_client(Duration::from_secs(5)).unwrap();
        let err = fetch_image(&client, &format!("{}/gone.png", server.uri()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn import_attaches_to_the_post() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .set_body_bytes(b"\x89PNGdata".to_vec()),
            )
            .mount(&server)
            .await;

        let store = RecordingStore {
            imported: Mutex::new(vec![]),
        };
        let client = image_client(Duration::from_secs(5)).unwrap();
        let media = import_featured_image(
            &client,
            &store,
            &format!("{}/banner.png?w=1200", server.uri()),
            PostId(7),
        )
        .await
        .unwrap();

        assert_eq!(media, MediaId(1));
        let imported = store.imported.lock().unwrap();
        assert_eq!(imported[0], ("banner.png".to_string(), Some(PostId(7))));
    }

    #[test]
    fn file_name_fallback_uses_mime_extension() {
        assert_eq!(
            file_name_from_url("https://cdn.example.com/i/", "image/webp"),
            "imported.webp"
        );
        assert_eq!(
            file_name_from_url("https://cdn.example.com/photo.jpeg#frag", "image/jpeg"),
            "photo.jpeg"
        );
    }
}
