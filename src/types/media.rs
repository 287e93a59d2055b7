//! Media record types
//!
//! Defines the persisted image and video records and the fixed option sets
//! offered by the generator forms.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Returned when a label does not name any variant of an option set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed option set whose serialized form is its display label.
macro_rules! option_set {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in the order the forms list them
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| UnknownOption {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

option_set! {
    /// Visual style of a generated image
    ImageStyle, "image style" {
        Photorealistic => "Photorealistic",
        Artistic => "Artistic",
        Anime => "Anime",
        Abstract => "Abstract",
        Cinematic => "Cinematic",
        DigitalArt => "Digital Art",
    }
}

option_set! {
    /// Requested image dimensions
    ImageSize, "image size" {
        Square512 => "512x512",
        Square1024 => "1024x1024",
        Landscape1080 => "1920x1080",
        Square2048 => "2048x2048",
    }
}

option_set! {
    /// Visual style of a generated video
    VideoStyle, "video style" {
        Realistic => "Realistic",
        Animated => "Animated",
        Cinematic => "Cinematic",
        MotionGraphics => "Motion Graphics",
    }
}

option_set! {
    /// Output resolution of a generated video
    VideoResolution, "video resolution" {
        Hd720 => "720p",
        FullHd => "1080p",
        Uhd4k => "4K",
    }
}

impl Default for ImageStyle {
    fn default() -> Self {
        ImageStyle::Photorealistic
    }
}

impl Default for ImageSize {
    fn default() -> Self {
        ImageSize::Square1024
    }
}

impl Default for VideoStyle {
    fn default() -> Self {
        VideoStyle::Realistic
    }
}

impl Default for VideoResolution {
    fn default() -> Self {
        VideoResolution::FullHd
    }
}

/// The two kinds of media kept in the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Storage key of the collection holding this kind
    pub fn collection_key(self) -> &'static str {
        match self {
            MediaKind::Image => "genfinity_images",
            MediaKind::Video => "genfinity_videos",
        }
    }
}

/// Behaviour shared by every persisted record
pub trait MediaRecord: Clone + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static {
    const KIND: MediaKind;

    fn id(&self) -> &str;
}

/// A generated image as stored in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub id: String,
    pub prompt: String,
    pub style: ImageStyle,
    pub size: ImageSize,
    /// Realism slider value, 0 to 100
    pub realism: u8,
    /// Remote URL of the rendered asset
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// A generated video as stored in the library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedVideo {
    pub id: String,
    pub prompt: String,
    pub style: VideoStyle,
    pub resolution: VideoResolution,
    /// Length in seconds, 3 to 30
    pub duration: u32,
    pub video_url: String,
    pub thumbnail_url: String,
    pub created_at: DateTime<Utc>,
}

impl MediaRecord for GeneratedImage {
    const KIND: MediaKind = MediaKind::Image;

    fn id(&self) -> &str {
        &self.id
    }
}

impl MediaRecord for GeneratedVideo {
    const KIND: MediaKind = MediaKind::Video;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Fresh opaque record identifier
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}
