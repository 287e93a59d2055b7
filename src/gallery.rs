//! Gallery state
//!
//! Holds the collections as last read from the library, the active filter
//! and the item open in the full-screen preview. Filtering works on the
//! records already loaded; only `refresh` goes back to storage.

use crate::storage::MediaLibrary;
use crate::types::{GeneratedImage, GeneratedVideo, MediaKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GalleryFilter {
    #[default]
    All,
    Images,
    Videos,
}

impl GalleryFilter {
    pub const ALL: [GalleryFilter; 3] = [GalleryFilter::All, GalleryFilter::Images, GalleryFilter::Videos];

    pub fn label(self) -> &'static str {
        match self {
            GalleryFilter::All => "All",
            GalleryFilter::Images => "Images",
            GalleryFilter::Videos => "Videos",
        }
    }

    fn shows(self, kind: MediaKind) -> bool {
        match self {
            GalleryFilter::All => true,
            GalleryFilter::Images => kind == MediaKind::Image,
            GalleryFilter::Videos => kind == MediaKind::Video,
        }
    }
}

/// A record of either kind, as shown in the preview
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryItem {
    Image(GeneratedImage),
    Video(GeneratedVideo),
}

impl GalleryItem {
    pub fn kind(&self) -> MediaKind {
        match self {
            GalleryItem::Image(_) => MediaKind::Image,
            GalleryItem::Video(_) => MediaKind::Video,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            GalleryItem::Image(image) => &image.id,
            GalleryItem::Video(video) => &video.id,
        }
    }

    /// URL opened by the download action
    pub fn asset_url(&self) -> &str {
        match self {
            GalleryItem::Image(image) => &image.image_url,
            GalleryItem::Video(video) => &video.video_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GalleryState {
    images: Vec<GeneratedImage>,
    videos: Vec<GeneratedVideo>,
    filter: GalleryFilter,
    preview: Option<GalleryItem>,
}

impl GalleryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State loaded from `library`
    pub fn load(library: &MediaLibrary) -> Self {
        let mut state = Self::new();
        state.refresh(library);
        state
    }

    /// Re-read both collections
    pub fn refresh(&mut self, library: &MediaLibrary) {
        self.images = library.images().get_all();
        self.videos = library.videos().get_all();
        tracing::debug!(
            "Gallery loaded {} images and {} videos",
            self.images.len(),
            self.videos.len()
        );
    }

    pub fn filter(&self) -> GalleryFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: GalleryFilter) {
        self.filter = filter;
    }

    pub fn visible_images(&self) -> &[GeneratedImage] {
        if self.filter.shows(MediaKind::Image) {
            &self.images
        } else {
            &[]
        }
    }

    pub fn visible_videos(&self) -> &[GeneratedVideo] {
        if self.filter.shows(MediaKind::Video) {
            &self.videos
        } else {
            &[]
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible_images().len() + self.visible_videos().len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible_count() == 0
    }

    pub fn preview(&self) -> Option<&GalleryItem> {
        self.preview.as_ref()
    }

    pub fn open_preview(&mut self, item: GalleryItem) {
        self.preview = Some(item);
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    /// Delete a record, reload, and close the preview if it showed that record
    pub fn delete(&mut self, library: &MediaLibrary, kind: MediaKind, id: &str) {
        library.delete(kind, id);
        self.refresh(library);

        let showing_deleted = self
            .preview
            .as_ref()
            .map(|item| item.kind() == kind && item.id() == id)
            .unwrap_or(false);
        if showing_deleted {
            self.preview = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::{ImageSize, ImageStyle, VideoResolution, VideoStyle};
    use chrono::Utc;
    use std::sync::Arc;

    fn image(id: &str) -> GeneratedImage {
        GeneratedImage {
            id: id.to_string(),
            prompt: "mountain".to_string(),
            style: ImageStyle::Abstract,
            size: ImageSize::Square1024,
            realism: 10,
            image_url: format!("https://example.com/{}.png", id),
            created_at: Utc::now(),
        }
    }

    fn video(id: &str) -> GeneratedVideo {
        GeneratedVideo {
            id: id.to_string(),
            prompt: "river".to_string(),
            style: VideoStyle::Cinematic,
            resolution: VideoResolution::FullHd,
            duration: 8,
            video_url: format!("https://example.com/{}.mp4", id),
            thumbnail_url: format!("https://example.com/{}.jpg", id),
            created_at: Utc::now(),
        }
    }

    fn seeded_library() -> MediaLibrary {
        let library = MediaLibrary::new(Arc::new(MemoryStore::new()));
        library.save(image("i1"));
        library.save(image("i2"));
        library.save(video("v1"));
        library
    }

    #[test]
    fn test_filters() {
        let library = seeded_library();
        let mut gallery = GalleryState::load(&library);

        assert_eq!(gallery.filter(), GalleryFilter::All);
        assert_eq!(gallery.visible_images().len(), 2);
        assert_eq!(gallery.visible_videos().len(), 1);
        assert_eq!(gallery.visible_count(), 3);

        gallery.set_filter(GalleryFilter::Videos);
        assert!(gallery.visible_images().is_empty());
        assert_eq!(gallery.visible_videos().len(), 1);
        assert_eq!(gallery.visible_videos()[0].id, "v1");

        gallery.set_filter(GalleryFilter::Images);
        assert_eq!(gallery.visible_images().len(), 2);
        assert!(gallery.visible_videos().is_empty());
    }

    #[test]
    fn test_filter_does_not_refetch() {
        let library = seeded_library();
        let mut gallery = GalleryState::load(&library);

        library.save(image("i3"));
        gallery.set_filter(GalleryFilter::Images);
        assert_eq!(gallery.visible_images().len(), 2);

        gallery.refresh(&library);
        assert_eq!(gallery.visible_images().len(), 3);
        assert_eq!(gallery.visible_images()[0].id, "i3");
    }

    #[test]
    fn test_deleting_previewed_item_closes_preview() {
        let library = seeded_library();
        let mut gallery = GalleryState::load(&library);

        gallery.open_preview(GalleryItem::Video(gallery.visible_videos()[0].clone()));
        gallery.delete(&library, MediaKind::Video, "v1");

        assert!(gallery.preview().is_none());
        assert!(gallery.visible_videos().is_empty());
        assert!(library.videos().get_all().is_empty());
    }

    #[test]
    fn test_deleting_other_item_keeps_preview() {
        let library = seeded_library();
        let mut gallery = GalleryState::load(&library);

        gallery.open_preview(GalleryItem::Image(image("i1")));
        gallery.delete(&library, MediaKind::Image, "i2");

        assert_eq!(gallery.preview().map(|item| item.id()), Some("i1"));
        assert_eq!(gallery.visible_images().len(), 1);
    }

    #[test]
    fn test_same_id_other_kind_keeps_preview() {
        let library = MediaLibrary::new(Arc::new(MemoryStore::new()));
        library.save(image("x"));
        library.save(video("x"));
        let mut gallery = GalleryState::load(&library);

        gallery.open_preview(GalleryItem::Image(image("x")));
        gallery.delete(&library, MediaKind::Video, "x");

        assert!(gallery.preview().is_some());
    }

    #[test]
    fn test_empty_gallery() {
        let library = MediaLibrary::new(Arc::new(MemoryStore::new()));
        let gallery = GalleryState::load(&library);
        assert!(gallery.is_empty());
    }

    #[test]
    fn test_item_accessors() {
        let item = GalleryItem::Video(video("v9"));
        assert_eq!(item.kind(), MediaKind::Video);
        assert_eq!(item.id(), "v9");
        assert_eq!(item.asset_url(), "https://example.com/v9.mp4");
    }
}
