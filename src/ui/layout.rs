#![allow(non_snake_case)]

//! Application shell: header with the view tabs and the active view below

use crate::app::AppState;
use crate::storage::settings::Tab;
use crate::ui::gallery::Gallery;
use crate::ui::image_generator::ImageGenerator;
use crate::ui::video_generator::VideoGenerator;
use crate::ui::GLOBAL_CSS;
use dioxus::prelude::*;

#[component]
pub fn Layout() -> Element {
    let app_state = use_context::<AppState>();
    let mut active_tab = app_state.active_tab;

    rsx! {
        style { {GLOBAL_CSS} }

        div {
            class: "flex flex-col h-screen min-h-0 bg-[var(--bg-base)] text-[var(--text-primary)]",

            // Header with glass pill tabs
            header {
                class: "flex-none flex items-center justify-between px-6 py-4 border-b border-[var(--border-subtle)]",
                h1 { class: "text-xl font-semibold tracking-tight", "Genfinity" }

                nav {
                    class: "flex gap-1 p-1 rounded-xl w-fit",
                    style: "background: rgba(242,237,231,0.03); border: 1px solid rgba(242,237,231,0.06);",
                    TabButton {
                        active: active_tab() == Tab::Image,
                        onclick: move |_| active_tab.set(Tab::Image),
                        label: "Image",
                    }
                    TabButton {
                        active: active_tab() == Tab::Video,
                        onclick: move |_| active_tab.set(Tab::Video),
                        label: "Video",
                    }
                    TabButton {
                        active: active_tab() == Tab::Gallery,
                        onclick: move |_| active_tab.set(Tab::Gallery),
                        label: "Gallery",
                    }
                }
            }

            main {
                class: "flex-1 overflow-y-auto p-6 scrollbar-thin",
                div {
                    class: "max-w-6xl mx-auto w-full",
                    match active_tab() {
                        Tab::Image => rsx! { ImageGenerator {} },
                        Tab::Video => rsx! { VideoGenerator {} },
                        Tab::Gallery => rsx! { Gallery {} },
                    }
                }
            }
        }
    }
}

#[component]
pub fn TabButton(active: bool, onclick: EventHandler<MouseEvent>, label: String) -> Element {
    let classes = if active {
        "text-[var(--text-primary)] shadow-sm"
    } else {
        "text-[var(--text-tertiary)] hover:text-[var(--text-secondary)]"
    };

    rsx! {
        button {
            class: "py-2 px-4 rounded-lg text-sm font-medium transition-all {classes}",
            style: if active { "background: rgba(242,237,231,0.06); border: 1px solid rgba(242,237,231,0.08);" } else { "border: 1px solid transparent;" },
            onclick: onclick,
            "{label}"
        }
    }
}
