//! Generation options
//!
//! What the generator forms submit to a provider.

use serde::{Deserialize, Serialize};

use crate::generation::GenerationError;
use crate::types::media::{ImageSize, ImageStyle, VideoResolution, VideoStyle};

pub const DEFAULT_REALISM: u8 = 80;
pub const MAX_REALISM: u8 = 100;
pub const DEFAULT_DURATION_SECS: u32 = 10;
pub const MIN_DURATION_SECS: u32 = 3;
pub const MAX_DURATION_SECS: u32 = 30;

/// Options common to every generation request
pub trait GenerationRequest: Clone + Send + Sync + 'static {
    fn prompt(&self) -> &str;

    /// Checks the options before they reach a provider
    fn validate(&self) -> Result<(), GenerationError>;
}

/// Input of an image generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOptions {
    pub prompt: String,
    pub style: ImageStyle,
    pub size: Option<ImageSize>,
    pub realism: Option<u8>,
}

impl ImageOptions {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style: ImageStyle::default(),
            size: None,
            realism: None,
        }
    }

    pub fn with_style(mut self, style: ImageStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_realism(mut self, realism: u8) -> Self {
        self.realism = Some(realism);
        self
    }

    pub fn size_or_default(&self) -> ImageSize {
        self.size.unwrap_or_default()
    }

    pub fn realism_or_default(&self) -> u8 {
        self.realism.unwrap_or(DEFAULT_REALISM)
    }
}

impl GenerationRequest for ImageOptions {
    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn validate(&self) -> Result<(), GenerationError> {
        validate_prompt(&self.prompt)?;
        let realism = self.realism_or_default();
        if realism > MAX_REALISM {
            return Err(GenerationError::Validation(format!(
                "realism must be between 0 and {}, got {}",
                MAX_REALISM, realism
            )));
        }
        Ok(())
    }
}

/// Input of a video generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoOptions {
    pub prompt: String,
    pub style: VideoStyle,
    pub resolution: Option<VideoResolution>,
    pub duration: Option<u32>,
}

impl VideoOptions {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style: VideoStyle::default(),
            resolution: None,
            duration: None,
        }
    }

    pub fn with_style(mut self, style: VideoStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_resolution(mut self, resolution: VideoResolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn resolution_or_default(&self) -> VideoResolution {
        self.resolution.unwrap_or_default()
    }

    pub fn duration_or_default(&self) -> u32 {
        self.duration.unwrap_or(DEFAULT_DURATION_SECS)
    }
}

impl GenerationRequest for VideoOptions {
    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn validate(&self) -> Result<(), GenerationError> {
        validate_prompt(&self.prompt)?;
        let duration = self.duration_or_default();
        if !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&duration) {
            return Err(GenerationError::Validation(format!(
                "duration must be between {} and {} seconds, got {}",
                MIN_DURATION_SECS, MAX_DURATION_SECS, duration
            )));
        }
        Ok(())
    }
}

fn validate_prompt(prompt: &str) -> Result<(), GenerationError> {
    if prompt.trim().is_empty() {
        return Err(GenerationError::Validation("prompt is empty".to_string()));
    }
    Ok(())
}
