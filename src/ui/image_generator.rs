#![allow(non_snake_case)]

//! Image generator view

use crate::app::AppState;
use crate::generation::{generate_in_background, GeneratorState};
use crate::system::{copy_to_clipboard, open_external};
use crate::types::options::{DEFAULT_REALISM, MAX_REALISM};
use crate::types::{GeneratedImage, ImageOptions, ImageSize, ImageStyle};
use crate::ui::components::option_select::{labels, OptionSelect};
use crate::ui::components::{Badge, ErrorBox, PRIMARY_BUTTON, SECONDARY_BUTTON};
use dioxus::prelude::*;

#[component]
pub fn ImageGenerator() -> Element {
    let app_state = use_context::<AppState>();
    let mut prompt = use_signal(String::new);
    let mut style = use_signal(ImageStyle::default);
    let mut size = use_signal(ImageSize::default);
    let mut realism = use_signal(|| DEFAULT_REALISM);
    let mut session = app_state.image_session;

    let configured = app_state.image_provider.is_configured();

    // Not tied to this view: switching tabs must not drop the result
    let run = {
        let library = app_state.library.clone();
        let provider = app_state.image_provider.clone();
        let timeout = app_state.settings.generation_timeout();
        move |options: ImageOptions| {
            let library = library.clone();
            let provider = provider.clone();
            spawn_forever(async move {
                let mut session = session;
                let outcome = generate_in_background(provider, library, options, timeout).await;
                session.write().finish(outcome);
            });
        }
    };
    let run_again = run.clone();

    let submitting = session.read().is_submitting();
    let can_submit = session.read().can_submit(&prompt());
    let can_regenerate = session.read().can_regenerate();
    let state = session.read().state().clone();
    let button_label = if submitting { "Generating..." } else { "Generate Image" };

    rsx! {
        div {
            class: "grid grid-cols-1 lg:grid-cols-2 gap-6",

            div {
                class: "glass-card rounded-2xl p-5 flex flex-col gap-5",
                h2 { class: "text-lg font-semibold", "Create an image" }

                if !configured {
                    ErrorBox {
                        message: "No API key configured. Set OPENAI_API_KEY to enable image generation.",
                    }
                }

                div {
                    class: "flex flex-col gap-1.5",
                    label { class: "text-xs font-medium uppercase tracking-wider text-[var(--text-tertiary)]", "Prompt" }
                    textarea {
                        class: "glass-input text-sm resize-none",
                        rows: "4",
                        placeholder: "Describe the image you want to create...",
                        value: "{prompt}",
                        disabled: submitting,
                        oninput: move |e: FormEvent| prompt.set(e.value()),
                    }
                }

                div {
                    class: "grid grid-cols-2 gap-4",
                    OptionSelect {
                        label: "Style",
                        options: labels(ImageStyle::ALL),
                        value: style().to_string(),
                        disabled: submitting,
                        on_change: move |value: String| match value.parse::<ImageStyle>() {
                            Ok(parsed) => style.set(parsed),
                            Err(e) => tracing::warn!("{}", e),
                        },
                    }
                    OptionSelect {
                        label: "Size",
                        options: labels(ImageSize::ALL),
                        value: size().to_string(),
                        disabled: submitting,
                        on_change: move |value: String| match value.parse::<ImageSize>() {
                            Ok(parsed) => size.set(parsed),
                            Err(e) => tracing::warn!("{}", e),
                        },
                    }
                }

                div {
                    class: "flex flex-col gap-1.5",
                    div {
                        class: "flex justify-between text-xs font-medium uppercase tracking-wider text-[var(--text-tertiary)]",
                        span { "Realism" }
                        span { class: "text-[var(--text-secondary)]", "{realism}%" }
                    }
                    input {
                        class: "w-full",
                        r#type: "range",
                        min: "0",
                        max: "{MAX_REALISM}",
                        value: "{realism}",
                        disabled: submitting,
                        oninput: move |e: FormEvent| {
                            if let Ok(value) = e.value().parse::<u8>() {
                                realism.set(value.min(MAX_REALISM));
                            }
                        },
                    }
                }

                button {
                    class: PRIMARY_BUTTON,
                    disabled: !can_submit,
                    onclick: move |_| {
                        let options = ImageOptions::new(prompt())
                            .with_style(style())
                            .with_size(size())
                            .with_realism(realism());
                        let started = session.write().begin(options);
                        match started {
                            Ok(options) => run(options),
                            Err(e) => tracing::debug!("Image submission refused: {}", e),
                        }
                    },
                    "{button_label}"
                }
            }

            div {
                class: "glass-card rounded-2xl p-5 flex flex-col gap-4 min-h-[320px]",
                match state {
                    GeneratorState::Idle => rsx! {
                        PreviewPlaceholder { text: "Your generated image will appear here" }
                    },
                    GeneratorState::Submitting => rsx! {
                        PreviewPlaceholder { text: "Generating your image..." }
                    },
                    GeneratorState::Failed(message) => rsx! {
                        ErrorBox { message: message }
                        div {
                            button {
                                class: SECONDARY_BUTTON,
                                disabled: !can_regenerate,
                                onclick: move |_| {
                                    let started = session.write().regenerate();
                                    if let Ok(options) = started {
                                        run_again(options);
                                    }
                                },
                                "Try again"
                            }
                        }
                    },
                    GeneratorState::Ready(image) => rsx! {
                        ImageResult {
                            image: image,
                            can_regenerate: can_regenerate,
                            on_regenerate: move |_| {
                                let started = session.write().regenerate();
                                if let Ok(options) = started {
                                    run_again(options);
                                }
                            },
                        }
                    },
                }
            }
        }
    }
}

#[component]
pub fn PreviewPlaceholder(text: String) -> Element {
    rsx! {
        div {
            class: "flex-1 flex items-center justify-center rounded-xl border border-dashed border-[var(--border-subtle)] text-sm text-[var(--text-tertiary)]",
            "{text}"
        }
    }
}

#[component]
fn ImageResult(image: GeneratedImage, can_regenerate: bool, on_regenerate: EventHandler<()>) -> Element {
    let prompt = image.prompt.clone();
    let url = image.image_url.clone();

    rsx! {
        img {
            class: "w-full rounded-xl object-contain bg-black/40",
            src: "{image.image_url}",
            alt: "{image.prompt}",
        }
        div {
            class: "flex flex-wrap gap-2",
            Badge { text: image.style.to_string() }
            Badge { text: image.size.to_string() }
            Badge { text: format!("{}% realism", image.realism) }
        }
        div {
            class: "flex gap-2",
            button {
                class: SECONDARY_BUTTON,
                disabled: !can_regenerate,
                onclick: move |_| on_regenerate.call(()),
                "Regenerate"
            }
            button {
                class: SECONDARY_BUTTON,
                onclick: move |_| {
                    if let Err(e) = open_external(&url) {
                        tracing::error!("Failed to open image: {}", e);
                    }
                },
                "Download"
            }
            button {
                class: SECONDARY_BUTTON,
                onclick: move |_| {
                    if let Err(e) = copy_to_clipboard(&prompt) {
                        tracing::error!("Failed to copy prompt: {}", e);
                    }
                },
                "Copy prompt"
            }
        }
    }
}
