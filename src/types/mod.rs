//! Shared type definitions
//!
//! Records kept in the library and the options the generators submit.

pub mod media;
pub mod options;

pub use media::{
    GeneratedImage, GeneratedVideo, ImageSize, ImageStyle, MediaKind, MediaRecord,
    VideoResolution, VideoStyle,
};
pub use options::{GenerationRequest, ImageOptions, VideoOptions};
