//! Full-screen preview of a gallery item

use crate::gallery::GalleryItem;
use crate::system::open_external;
use crate::ui::components::{Badge, SECONDARY_BUTTON};
use dioxus::prelude::*;

#[component]
pub fn MediaPreview(item: GalleryItem, on_close: EventHandler<()>) -> Element {
    let download_url = item.asset_url().to_string();

    rsx! {
        // Backdrop closes the preview
        div {
            class: "fixed inset-0 bg-black/70 backdrop-blur-2xl z-50 flex items-center justify-center p-6",
            onclick: move |_| on_close.call(()),

            div {
                class: "glass-card relative w-full max-w-4xl max-h-full overflow-y-auto rounded-2xl p-5 flex flex-col gap-4 scrollbar-thin",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),

                button {
                    class: "absolute top-3 right-3 w-8 h-8 rounded-full flex items-center justify-center text-[var(--text-tertiary)] hover:text-[var(--text-primary)] hover:bg-white/[0.08] transition-all",
                    title: "Close",
                    onclick: move |_| on_close.call(()),
                    "✕"
                }

                match &item {
                    GalleryItem::Image(image) => rsx! {
                        img {
                            class: "w-full max-h-[70vh] object-contain rounded-xl bg-black/40",
                            src: "{image.image_url}",
                            alt: "{image.prompt}",
                        }
                        p { class: "text-sm text-[var(--text-secondary)]", "{image.prompt}" }
                        div {
                            class: "flex flex-wrap gap-2",
                            Badge { text: image.style.to_string() }
                            Badge { text: image.size.to_string() }
                            Badge { text: format!("{}% realism", image.realism) }
                        }
                    },
                    GalleryItem::Video(video) => rsx! {
                        video {
                            class: "w-full max-h-[70vh] rounded-xl bg-black/40",
                            src: "{video.video_url}",
                            poster: "{video.thumbnail_url}",
                            controls: true,
                            autoplay: true,
                        }
                        p { class: "text-sm text-[var(--text-secondary)]", "{video.prompt}" }
                        div {
                            class: "flex flex-wrap gap-2",
                            Badge { text: video.style.to_string() }
                            Badge { text: video.resolution.to_string() }
                            Badge { text: format!("{}s", video.duration) }
                        }
                    },
                }

                div {
                    class: "flex justify-end",
                    button {
                        class: SECONDARY_BUTTON,
                        onclick: move |_| {
                            if let Err(e) = open_external(&download_url) {
                                tracing::error!("Failed to open asset: {}", e);
                            }
                        },
                        "Download"
                    }
                }
            }
        }
    }
}
