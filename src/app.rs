//! Root Dioxus application component
//!
//! This module contains the main App component that serves as the root of the UI tree.

use crate::generation::{GeneratorSession, MockVideoProvider, OpenAiImageProvider};
use crate::storage::settings::{api_key_from_env, load_settings, AppSettings, Tab};
use crate::storage::{FileStore, KeyValueStore, MediaLibrary, MemoryStore};
use crate::types::{GeneratedImage, GeneratedVideo, ImageOptions, VideoOptions};
use crate::ui::Layout;
use dioxus::prelude::*;
use std::sync::Arc;

pub type ImageSession = GeneratorSession<ImageOptions, GeneratedImage>;
pub type VideoSession = GeneratorSession<VideoOptions, GeneratedVideo>;

/// Global application state shared across components
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<MediaLibrary>,
    pub image_provider: Arc<OpenAiImageProvider>,
    pub video_provider: Arc<MockVideoProvider>,
    pub settings: AppSettings,
    pub active_tab: Signal<Tab>,
    /// Generator sessions live here so a generation keeps its result when the
    /// user switches tabs
    pub image_session: Signal<ImageSession>,
    pub video_session: Signal<VideoSession>,
    /// Mirrors the library revision so views can react to saves and deletes
    pub library_revision: Signal<u64>,
}

impl AppState {
    pub fn new() -> Self {
        let settings = load_settings();
        let library = Arc::new(MediaLibrary::new(open_backend()));
        let image_provider = Arc::new(OpenAiImageProvider::from_settings(
            api_key_from_env(),
            &settings,
        ));
        let video_provider = Arc::new(MockVideoProvider::from_settings(&settings));

        tracing::info!(
            "AppState initialized ({} images, {} videos)",
            library.images().get_all().len(),
            library.videos().get_all().len()
        );

        Self {
            active_tab: Signal::new(settings.default_tab),
            library_revision: Signal::new(library.revision()),
            image_session: Signal::new(ImageSession::new()),
            video_session: Signal::new(VideoSession::new()),
            settings,
            library,
            image_provider,
            video_provider,
        }
    }
}

/// File storage in the data directory, or an in-memory map if that fails
fn open_backend() -> Arc<dyn KeyValueStore> {
    match FileStore::open_default() {
        Ok(store) => {
            tracing::info!("Storing media records in {}", store.root().display());
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to open data directory, records will not survive a restart: {}",
                e
            );
            Arc::new(MemoryStore::new())
        }
    }
}

#[component]
pub fn App() -> Element {
    let app_state = use_context_provider(AppState::new);

    {
        let library = app_state.library.clone();
        let revision = app_state.library_revision;
        use_future(move || {
            let library = library.clone();
            async move {
                let mut revision = revision;
                let mut changes = library.subscribe();
                while changes.changed().await.is_ok() {
                    let current = *changes.borrow_and_update();
                    revision.set(current);
                }
            }
        });
    }

    rsx! {
        Layout {}
    }
}
