#![allow(non_snake_case)]

//! Gallery view - every stored record, filterable by kind

use crate::app::AppState;
use crate::gallery::{GalleryFilter, GalleryItem, GalleryState};
use crate::system::open_external;
use crate::types::{GeneratedImage, GeneratedVideo, MediaKind};
use crate::ui::components::media_preview::MediaPreview;
use crate::ui::components::{Badge, SECONDARY_BUTTON};
use crate::ui::layout::TabButton;
use dioxus::prelude::*;

#[component]
pub fn Gallery() -> Element {
    let app_state = use_context::<AppState>();
    let library = app_state.library.clone();
    let mut gallery = use_signal(|| GalleryState::load(&library));

    // Reload whenever the library reports a save or delete
    {
        let library = app_state.library.clone();
        let revision = app_state.library_revision;
        use_effect(move || {
            let _ = revision();
            gallery.write().refresh(&library);
        });
    }

    let state = gallery.read().clone();
    let active_filter = state.filter();
    let images = state.visible_images().to_vec();
    let videos = state.visible_videos().to_vec();
    let preview = state.preview().cloned();

    rsx! {
        div {
            class: "flex flex-col gap-5",

            div {
                class: "flex items-center justify-between",
                h2 { class: "text-lg font-semibold", "Gallery" }
                div {
                    class: "flex gap-1 p-1 rounded-xl w-fit",
                    style: "background: rgba(242,237,231,0.03); border: 1px solid rgba(242,237,231,0.06);",
                    for filter in GalleryFilter::ALL {
                        TabButton {
                            key: "{filter.label()}",
                            active: filter == active_filter,
                            onclick: move |_| gallery.write().set_filter(filter),
                            label: filter.label(),
                        }
                    }
                }
            }

            if state.is_empty() {
                div {
                    class: "flex items-center justify-center py-20 rounded-2xl border border-dashed border-[var(--border-subtle)] text-sm text-[var(--text-tertiary)]",
                    "Nothing here yet. Generated images and videos will show up in this gallery."
                }
            } else {
                div {
                    class: "grid grid-cols-2 md:grid-cols-3 xl:grid-cols-4 gap-4",
                    for image in images.into_iter() {
                        ImageCard { key: "image-{image.id}", image: image, gallery: gallery }
                    }
                    for video in videos.into_iter() {
                        VideoCard { key: "video-{video.id}", video: video, gallery: gallery }
                    }
                }
            }

            {preview.map(|item| rsx! {
                MediaPreview {
                    item: item,
                    on_close: move |_| gallery.write().close_preview(),
                }
            })}
        }
    }
}

#[component]
fn ImageCard(image: GeneratedImage, gallery: Signal<GalleryState>) -> Element {
    let app_state = use_context::<AppState>();
    let mut gallery = gallery;
    let library = app_state.library.clone();

    let item = GalleryItem::Image(image.clone());
    let url = image.image_url.clone();
    let id = image.id.clone();

    rsx! {
        div {
            class: "group glass-card rounded-xl overflow-hidden cursor-pointer hover:border-[var(--border-medium)] transition-all",
            onclick: move |_| gallery.write().open_preview(item.clone()),

            img {
                class: "w-full aspect-square object-cover block",
                src: "{image.image_url}",
                alt: "{image.prompt}",
            }
            div {
                class: "p-3 flex flex-col gap-2",
                p { class: "truncate text-sm text-[var(--text-secondary)]", "{image.prompt}" }
                div {
                    class: "flex flex-wrap gap-1.5",
                    Badge { text: "Image" }
                    Badge { text: image.style.to_string() }
                    Badge { text: image.size.to_string() }
                }
                CardActions {
                    url: url,
                    on_delete: move |_| gallery.write().delete(&library, MediaKind::Image, &id),
                }
            }
        }
    }
}

#[component]
fn VideoCard(video: GeneratedVideo, gallery: Signal<GalleryState>) -> Element {
    let app_state = use_context::<AppState>();
    let mut gallery = gallery;
    let library = app_state.library.clone();

    let item = GalleryItem::Video(video.clone());
    let url = video.video_url.clone();
    let id = video.id.clone();

    rsx! {
        div {
            class: "group glass-card rounded-xl overflow-hidden cursor-pointer hover:border-[var(--border-medium)] transition-all",
            onclick: move |_| gallery.write().open_preview(item.clone()),

            img {
                class: "w-full aspect-square object-cover block",
                src: "{video.thumbnail_url}",
                alt: "{video.prompt}",
            }
            div {
                class: "p-3 flex flex-col gap-2",
                p { class: "truncate text-sm text-[var(--text-secondary)]", "{video.prompt}" }
                div {
                    class: "flex flex-wrap gap-1.5",
                    Badge { text: "Video" }
                    Badge { text: video.resolution.to_string() }
                    Badge { text: format!("{}s", video.duration) }
                }
                CardActions {
                    url: url,
                    on_delete: move |_| gallery.write().delete(&library, MediaKind::Video, &id),
                }
            }
        }
    }
}

/// Download and delete buttons; clicks stay out of the card's preview handler
#[component]
fn CardActions(url: String, on_delete: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "flex gap-2",
            button {
                class: SECONDARY_BUTTON,
                onclick: move |evt: MouseEvent| {
                    evt.stop_propagation();
                    if let Err(e) = open_external(&url) {
                        tracing::error!("Failed to open asset: {}", e);
                    }
                },
                "Download"
            }
            button {
                class: SECONDARY_BUTTON,
                title: "Delete",
                onclick: move |evt: MouseEvent| {
                    evt.stop_propagation();
                    on_delete.call(());
                },
                "Delete"
            }
        }
    }
}
