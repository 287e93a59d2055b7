//! Media generation
//!
//! Providers turn submitted options into records. The image provider calls a
//! hosted API, the video provider is a stand-in that returns canned clips.
//! `generate_and_store` calls the provider under a deadline and files the
//! record in the library; the generator views run it through
//! `generate_in_background` so it outlives the view that started it.

pub mod mock_video;
pub mod openai;
pub mod session;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::storage::library::LibraryCollection;
use crate::storage::MediaLibrary;
use crate::types::{GenerationRequest, MediaRecord};

pub use mock_video::MockVideoProvider;
pub use openai::{ImageApi, OpenAiImageProvider};
pub use session::{GeneratorSession, GeneratorState, SubmitError};

/// Generation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A required setting, such as the API key, is missing
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The provider failed or returned unusable data
    #[error("Provider error: {0}")]
    Provider(String),
    #[error("Invalid options: {0}")]
    Validation(String),
    #[error("Generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Something that can produce a record from options
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    type Options: GenerationRequest;
    type Record: MediaRecord;

    fn name(&self) -> &str;

    async fn generate(&self, options: &Self::Options) -> Result<Self::Record, GenerationError>;
}

/// Run one generation and store its result
///
/// The record is only saved when the provider succeeds within `timeout`.
pub async fn generate_and_store<P>(
    provider: &P,
    library: &MediaLibrary,
    options: &P::Options,
    timeout: Duration,
) -> Result<P::Record, GenerationError>
where
    P: GenerationProvider + ?Sized,
    P::Record: LibraryCollection,
{
    tracing::info!(
        "Starting {} generation for prompt {:?}",
        provider.name(),
        options.prompt()
    );

    let record = match tokio::time::timeout(timeout, provider.generate(options)).await {
        Ok(Ok(record)) => record,
        Ok(Err(e)) => {
            tracing::error!("{} generation failed: {}", provider.name(), e);
            return Err(e);
        }
        Err(_) => {
            tracing::error!(
                "{} generation timed out after {:?}",
                provider.name(),
                timeout
            );
            return Err(GenerationError::Timeout(timeout));
        }
    };

    library.save(record.clone());
    tracing::info!(
        "{} generation finished, stored {:?} record {}",
        provider.name(),
        <P::Record as MediaRecord>::KIND,
        record.id()
    );
    Ok(record)
}

/// Run `generate_and_store` on its own tokio task
///
/// The task owns the provider, library and options, so the record is still
/// saved when the caller stops awaiting (a view unmounting mid-generation).
pub async fn generate_in_background<P>(
    provider: Arc<P>,
    library: Arc<MediaLibrary>,
    options: P::Options,
    timeout: Duration,
) -> Result<P::Record, GenerationError>
where
    P: GenerationProvider + ?Sized + 'static,
    P::Record: LibraryCollection,
{
    let task = tokio::spawn(async move {
        generate_and_store(provider.as_ref(), &library, &options, timeout).await
    });

    match task.await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Generation task ended abnormally: {}", e);
            Err(GenerationError::Provider(format!("Generation task failed: {}", e)))
        }
    }
}
