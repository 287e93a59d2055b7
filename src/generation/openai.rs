//! OpenAI image provider
//!
//! Maps the form's style and size onto the parameters the images endpoint
//! accepts, issues a single request, and turns the returned URL into a
//! `GeneratedImage` that keeps the values the user picked.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::generation::{GenerationError, GenerationProvider};
use crate::storage::settings::{AppSettings, API_KEY_ENV};
use crate::types::media::new_record_id;
use crate::types::{GeneratedImage, GenerationRequest, ImageOptions, ImageSize, ImageStyle};

// ============================================================================
// Provider parameter tables
// ============================================================================

/// Rendering quality tier understood by the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Standard,
    Hd,
}

/// Output dimensions the provider can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderSize {
    #[serde(rename = "1024x1024")]
    Square,
    #[serde(rename = "1792x1024")]
    Landscape,
}

impl ProviderSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderSize::Square => "1024x1024",
            ProviderSize::Landscape => "1792x1024",
        }
    }
}

pub fn quality_for(style: ImageStyle) -> ImageQuality {
    match style {
        ImageStyle::Photorealistic | ImageStyle::Cinematic => ImageQuality::Hd,
        ImageStyle::Artistic | ImageStyle::Anime | ImageStyle::Abstract | ImageStyle::DigitalArt => {
            ImageQuality::Standard
        }
    }
}

pub fn provider_size_for(size: ImageSize) -> ProviderSize {
    match size {
        ImageSize::Landscape1080 => ProviderSize::Landscape,
        ImageSize::Square512 | ImageSize::Square1024 | ImageSize::Square2048 => ProviderSize::Square,
    }
}

/// Append the style as a qualifier the model can follow
pub fn enhance_prompt(prompt: &str, style: ImageStyle) -> String {
    format!("{}. Style: {}. High quality, detailed.", prompt, style)
}

// ============================================================================
// Images API types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagesRequest {
    pub model: String,
    pub prompt: String,
    pub n: u32,
    pub size: ProviderSize,
    pub quality: ImageQuality,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub data: Option<Vec<ImageData>>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageData {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub message: String,
}

impl ImagesResponse {
    fn first_url(self) -> Option<String> {
        self.data?
            .into_iter()
            .next()?
            .url
            .filter(|url| !url.trim().is_empty())
    }
}

/// Transport for the images endpoint
#[async_trait]
pub trait ImageApi: Send + Sync {
    async fn create_image(
        &self,
        api_key: &str,
        request: &ImagesRequest,
    ) -> Result<ImagesResponse, GenerationError>;
}

/// `ImageApi` over HTTPS with reqwest
pub struct HttpImageApi {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpImageApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to create HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/images/generations", self.base_url)
    }
}

#[async_trait]
impl ImageApi for HttpImageApi {
    async fn create_image(
        &self,
        api_key: &str,
        request: &ImagesRequest,
    ) -> Result<ImagesResponse, GenerationError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout(self.timeout)
                } else {
                    GenerationError::Provider(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout(self.timeout)
            } else {
                GenerationError::Provider(format!("Failed to read response: {}", e))
            }
        })?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ImagesResponse>(&response_text)
                .ok()
                .and_then(|body| body.error)
                .map(|error| error.message)
                .unwrap_or(response_text);
            return Err(GenerationError::Provider(format!(
                "Images API error ({}): {}",
                status, detail
            )));
        }

        serde_json::from_str(&response_text)
            .map_err(|e| GenerationError::Provider(format!("Failed to parse response: {}", e)))
    }
}

// ============================================================================
// OpenAiImageProvider
// ============================================================================

pub struct OpenAiImageProvider {
    api: Arc<dyn ImageApi>,
    api_key: Option<String>,
    model: String,
}

impl OpenAiImageProvider {
    /// Provider talking to the configured endpoint over HTTP
    pub fn from_settings(api_key: Option<String>, settings: &AppSettings) -> Self {
        let api = HttpImageApi::new(settings.api_base_url.clone(), settings.request_timeout());
        Self::with_api(Arc::new(api), api_key, settings.image_model.clone())
    }

    pub fn with_api(api: Arc<dyn ImageApi>, api_key: Option<String>, model: impl Into<String>) -> Self {
        if api_key.is_none() {
            tracing::warn!(
                "Image API key not found. Set {} to enable image generation",
                API_KEY_ENV
            );
        }
        Self {
            api,
            api_key,
            model: model.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// The request sent for `options`
    pub fn build_request(&self, options: &ImageOptions) -> ImagesRequest {
        ImagesRequest {
            model: self.model.clone(),
            prompt: enhance_prompt(&options.prompt, options.style),
            n: 1,
            size: provider_size_for(options.size_or_default()),
            quality: quality_for(options.style),
        }
    }
}

#[async_trait]
impl GenerationProvider for OpenAiImageProvider {
    type Options = ImageOptions;
    type Record = GeneratedImage;

    fn name(&self) -> &str {
        "image"
    }

    async fn generate(&self, options: &ImageOptions) -> Result<GeneratedImage, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GenerationError::Configuration(format!(
                "Image API key not configured. Set the {} environment variable",
                API_KEY_ENV
            ))
        })?;
        options.validate()?;

        let request = self.build_request(options);
        tracing::debug!(
            "Requesting {} image at {} ({:?})",
            request.model,
            request.size.as_str(),
            request.quality
        );

        let image_url = self
            .api
            .create_image(api_key, &request)
            .await?
            .first_url()
            .ok_or_else(|| GenerationError::Provider("No image URL returned by the provider".into()))?;

        Ok(GeneratedImage {
            id: new_record_id(),
            prompt: options.prompt.clone(),
            style: options.style,
            size: options.size_or_default(),
            realism: options.realism_or_default(),
            image_url,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every request and answers with a canned response
    struct RecordingApi {
        requests: Mutex<Vec<ImagesRequest>>,
        response: Result<serde_json::Value, GenerationError>,
    }

    impl RecordingApi {
        fn answering(response: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                response: Ok(response),
            })
        }

        fn failing(error: GenerationError) -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                response: Err(error),
            })
        }

        fn calls(&self) -> Vec<ImagesRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ImageApi for RecordingApi {
        async fn create_image(
            &self,
            _api_key: &str,
            request: &ImagesRequest,
        ) -> Result<ImagesResponse, GenerationError> {
            self.requests.lock().unwrap().push(request.clone());
            match &self.response {
                Ok(value) => Ok(serde_json::from_value(value.clone()).unwrap()),
                Err(e) => Err(e.clone()),
            }
        }
    }

    fn url_response(url: &str) -> serde_json::Value {
        serde_json::json!({ "created": 1, "data": [{ "url": url }] })
    }

    #[test]
    fn test_quality_table() {
        assert_eq!(quality_for(ImageStyle::Photorealistic), ImageQuality::Hd);
        assert_eq!(quality_for(ImageStyle::Cinematic), ImageQuality::Hd);
        assert_eq!(quality_for(ImageStyle::Artistic), ImageQuality::Standard);
        assert_eq!(quality_for(ImageStyle::Anime), ImageQuality::Standard);
        assert_eq!(quality_for(ImageStyle::Abstract), ImageQuality::Standard);
        assert_eq!(quality_for(ImageStyle::DigitalArt), ImageQuality::Standard);
    }

    #[test]
    fn test_size_table() {
        assert_eq!(provider_size_for(ImageSize::Square512), ProviderSize::Square);
        assert_eq!(provider_size_for(ImageSize::Square1024), ProviderSize::Square);
        assert_eq!(provider_size_for(ImageSize::Landscape1080), ProviderSize::Landscape);
        assert_eq!(provider_size_for(ImageSize::Square2048), ProviderSize::Square);
    }

    #[test]
    fn test_request_body_shape() {
        let provider = OpenAiImageProvider::with_api(
            RecordingApi::answering(url_response("https://x")),
            Some("sk-test".into()),
            "dall-e-3",
        );
        let request = provider.build_request(
            &ImageOptions::new("a harbor at dawn")
                .with_style(ImageStyle::Anime)
                .with_size(ImageSize::Square2048),
        );

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "dall-e-3",
                "prompt": "a harbor at dawn. Style: Anime. High quality, detailed.",
                "n": 1,
                "size": "1024x1024",
                "quality": "standard"
            })
        );
    }

    #[tokio::test]
    async fn test_record_keeps_user_values_while_request_is_mapped() {
        let api = RecordingApi::answering(url_response("https://cdn.example.com/img.png"));
        let provider = OpenAiImageProvider::with_api(api.clone(), Some("sk-test".into()), "dall-e-3");

        let options = ImageOptions::new("city skyline")
            .with_style(ImageStyle::Photorealistic)
            .with_size(ImageSize::Landscape1080)
            .with_realism(65);
        let image = provider.generate(&options).await.unwrap();

        assert_eq!(image.style, ImageStyle::Photorealistic);
        assert_eq!(image.size, ImageSize::Landscape1080);
        assert_eq!(image.realism, 65);
        assert_eq!(image.prompt, "city skyline");
        assert_eq!(image.image_url, "https://cdn.example.com/img.png");
        assert!(!image.id.is_empty());

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].quality, ImageQuality::Hd);
        assert_eq!(calls[0].size.as_str(), "1792x1024");
        assert_eq!(calls[0].n, 1);
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let api = RecordingApi::answering(url_response("https://x"));
        let provider = OpenAiImageProvider::with_api(api.clone(), None, "dall-e-3");

        let err = provider.generate(&ImageOptions::new("anything")).await.unwrap_err();

        assert!(matches!(err, GenerationError::Configuration(_)));
        assert!(api.calls().is_empty());
        assert!(!provider.is_configured());
    }

    #[tokio::test]
    async fn test_response_without_url_is_provider_error() {
        for body in [
            serde_json::json!({ "data": [] }),
            serde_json::json!({ "data": [{ "url": null }] }),
            serde_json::json!({ "data": [{ "url": "" }] }),
            serde_json::json!({}),
        ] {
            let provider =
                OpenAiImageProvider::with_api(RecordingApi::answering(body), Some("k".into()), "dall-e-3");
            let err = provider.generate(&ImageOptions::new("p")).await.unwrap_err();
            assert!(matches!(err, GenerationError::Provider(_)));
        }
    }

    #[tokio::test]
    async fn test_transport_error_propagates_unchanged() {
        let api = RecordingApi::failing(GenerationError::Provider("429 rate limited".into()));
        let provider = OpenAiImageProvider::with_api(api.clone(), Some("k".into()), "dall-e-3");

        let err = provider.generate(&ImageOptions::new("p")).await.unwrap_err();

        assert_eq!(err, GenerationError::Provider("429 rate limited".into()));
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_defaults_fill_unset_options() {
        let provider = OpenAiImageProvider::with_api(
            RecordingApi::answering(url_response("https://x/y.png")),
            Some("k".into()),
            "dall-e-3",
        );

        let image = provider.generate(&ImageOptions::new("p")).await.unwrap();

        assert_eq!(image.size, ImageSize::Square1024);
        assert_eq!(image.realism, 80);
    }

    #[test]
    fn test_endpoint_joins_base_url() {
        let api = HttpImageApi::new("http://localhost:9000/v1/", Duration::from_secs(5));
        assert_eq!(api.endpoint(), "http://localhost:9000/v1/images/generations");
    }

    #[tokio::test]
    async fn test_prompt_is_sent_and_stored_verbatim() {
        let api = RecordingApi::answering(url_response("https://x/y.png"));
        let provider = OpenAiImageProvider::with_api(api.clone(), Some("k".into()), "dall-e-3");

        let image = provider
            .generate(&ImageOptions::new("  a quiet lake\n").with_style(ImageStyle::Artistic))
            .await
            .unwrap();

        assert_eq!(image.prompt, "  a quiet lake\n");
        assert_eq!(
            api.calls()[0].prompt,
            "  a quiet lake\n. Style: Artistic. High quality, detailed."
        );
    }

    // ------------------------------------------------------------------------
    // HttpImageApi against a local socket
    // ------------------------------------------------------------------------

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one connection, answer it with `status` and `body` after `delay`,
    /// and hand back the raw request text
    async fn serve_once(
        status: &'static str,
        body: &'static str,
        delay: Duration,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            tokio::time::sleep(delay).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            // The client may already have given up
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
            request
        });

        (base_url, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn sample_request() -> ImagesRequest {
        ImagesRequest {
            model: "dall-e-3".into(),
            prompt: "a red kite".into(),
            n: 1,
            size: ProviderSize::Landscape,
            quality: ImageQuality::Hd,
        }
    }

    #[tokio::test]
    async fn test_http_success_posts_json_with_bearer_auth() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"created":1,"data":[{"url":"https://cdn.example.com/kite.png"}]}"#,
            Duration::ZERO,
        )
        .await;
        let api = HttpImageApi::new(base_url, Duration::from_secs(5));

        let response = api.create_image("sk-local", &sample_request()).await.unwrap();
        assert_eq!(response.first_url().as_deref(), Some("https://cdn.example.com/kite.png"));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/images/generations "));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer sk-local"));
        assert!(request.contains(r#""size":"1792x1024""#));
        assert!(request.contains(r#""quality":"hd""#));
    }

    #[tokio::test]
    async fn test_http_error_status_carries_api_message() {
        let (base_url, server) = serve_once(
            "400 Bad Request",
            r#"{"error":{"message":"Your request was rejected by the safety system"}}"#,
            Duration::ZERO,
        )
        .await;
        let api = HttpImageApi::new(base_url, Duration::from_secs(5));

        let err = api.create_image("k", &sample_request()).await.unwrap_err();
        server.await.unwrap();

        match err {
            GenerationError::Provider(message) => {
                assert!(message.contains("400"));
                assert!(message.contains("rejected by the safety system"));
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_error_status_with_plain_body() {
        let (base_url, server) =
            serve_once("502 Bad Gateway", "upstream unavailable", Duration::ZERO).await;
        let api = HttpImageApi::new(base_url, Duration::from_secs(5));

        let err = api.create_image("k", &sample_request()).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(&err, GenerationError::Provider(m) if m.contains("upstream unavailable")));
    }

    #[tokio::test]
    async fn test_http_unparsable_body_is_provider_error() {
        let (base_url, server) = serve_once("200 OK", "<html>oops</html>", Duration::ZERO).await;
        let api = HttpImageApi::new(base_url, Duration::from_secs(5));

        let err = api.create_image("k", &sample_request()).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(&err, GenerationError::Provider(m) if m.starts_with("Failed to parse response")));
    }

    #[tokio::test]
    async fn test_http_slow_server_times_out() {
        let timeout = Duration::from_millis(200);
        let (base_url, server) = serve_once("200 OK", "{}", Duration::from_secs(2)).await;
        let api = HttpImageApi::new(base_url, timeout);

        let err = api.create_image("k", &sample_request()).await.unwrap_err();

        assert_eq!(err, GenerationError::Timeout(timeout));
        server.abort();
    }
}
