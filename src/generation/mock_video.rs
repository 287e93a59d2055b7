//! Placeholder video provider
//!
//! There is no real video backend yet. This provider waits for a random
//! latency and hands back one of a few stock clips, so the rest of the
//! application can be exercised end to end.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::time::Duration;

use crate::generation::{GenerationError, GenerationProvider};
use crate::storage::settings::AppSettings;
use crate::types::media::new_record_id;
use crate::types::{GeneratedVideo, GenerationRequest, VideoOptions};

/// A stock clip and its poster frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogClip {
    pub video_url: &'static str,
    pub thumbnail_url: &'static str,
}

pub const VIDEO_CATALOG: &[CatalogClip] = &[
    CatalogClip {
        video_url: "https://videos.pexels.com/video-files/3255275/3255275-uhd_2560_1440_25fps.mp4",
        thumbnail_url: "https://images.pexels.com/videos/3255275/free-video-3255275.jpg?auto=compress&cs=tinysrgb&w=1260&h=750",
    },
    CatalogClip {
        video_url: "https://videos.pexels.com/video-files/3571264/3571264-uhd_2560_1440_30fps.mp4",
        thumbnail_url: "https://images.pexels.com/videos/3571264/free-video-3571264.jpg?auto=compress&cs=tinysrgb&w=1260&h=750",
    },
    CatalogClip {
        video_url: "https://videos.pexels.com/video-files/2834202/2834202-uhd_2560_1440_25fps.mp4",
        thumbnail_url: "https://images.pexels.com/videos/2834202/pexels-photo-2834202.jpeg?auto=compress&cs=tinysrgb&w=1260&h=750",
    },
];

pub struct MockVideoProvider {
    min_latency: Duration,
    max_latency: Duration,
}

impl MockVideoProvider {
    pub fn new(min_latency: Duration, max_latency: Duration) -> Self {
        let (min_latency, max_latency) = if min_latency <= max_latency {
            (min_latency, max_latency)
        } else {
            (max_latency, min_latency)
        };
        Self {
            min_latency,
            max_latency,
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        let (min, max) = settings.video_latency();
        Self::new(min, max)
    }

    /// No simulated wait, for tests and demos
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    fn pick(&self) -> (Duration, CatalogClip) {
        let mut rng = rand::thread_rng();
        let latency = if self.min_latency == self.max_latency {
            self.min_latency
        } else {
            rng.gen_range(self.min_latency..=self.max_latency)
        };
        let clip = VIDEO_CATALOG[rng.gen_range(0..VIDEO_CATALOG.len())];
        (latency, clip)
    }
}

impl Default for MockVideoProvider {
    fn default() -> Self {
        Self::from_settings(&AppSettings::default())
    }
}

#[async_trait]
impl GenerationProvider for MockVideoProvider {
    type Options = VideoOptions;
    type Record = GeneratedVideo;

    fn name(&self) -> &str {
        "video"
    }

    async fn generate(&self, options: &VideoOptions) -> Result<GeneratedVideo, GenerationError> {
        options.validate()?;

        // The thread-local rng must not be held across the await
        let (latency, clip) = self.pick();
        tracing::debug!("Simulating video generation for {:?}", latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        Ok(GeneratedVideo {
            id: new_record_id(),
            prompt: options.prompt.clone(),
            style: options.style,
            resolution: options.resolution_or_default(),
            duration: options.duration_or_default(),
            video_url: clip.video_url.to_string(),
            thumbnail_url: clip.thumbnail_url.to_string(),
            created_at: Utc::now(),
        })
    }
}
