#![allow(non_snake_case)]

//! Video generator view

use crate::app::AppState;
use crate::generation::{generate_in_background, GeneratorState};
use crate::system::{copy_to_clipboard, open_external};
use crate::types::options::{DEFAULT_DURATION_SECS, MAX_DURATION_SECS, MIN_DURATION_SECS};
use crate::types::{VideoOptions, VideoResolution, VideoStyle};
use crate::ui::components::option_select::{labels, OptionSelect};
use crate::ui::components::{Badge, ErrorBox, PRIMARY_BUTTON, SECONDARY_BUTTON};
use crate::ui::image_generator::PreviewPlaceholder;
use dioxus::prelude::*;

#[component]
pub fn VideoGenerator() -> Element {
    let app_state = use_context::<AppState>();
    let mut prompt = use_signal(String::new);
    let mut style = use_signal(VideoStyle::default);
    let mut resolution = use_signal(VideoResolution::default);
    let mut duration = use_signal(|| DEFAULT_DURATION_SECS);
    let mut session = app_state.video_session;

    let run = {
        let library = app_state.library.clone();
        let provider = app_state.video_provider.clone();
        let timeout = app_state.settings.generation_timeout();
        move |options: VideoOptions| {
            let library = library.clone();
            let provider = provider.clone();
            spawn_forever(async move {
                let mut session = session;
                let outcome = generate_in_background(provider, library, options, timeout).await;
                session.write().finish(outcome);
            });
        }
    };

    let submitting = session.read().is_submitting();
    let can_submit = session.read().can_submit(&prompt());
    let can_regenerate = session.read().can_regenerate();
    let state = session.read().state().clone();
    let button_label = if submitting { "Generating..." } else { "Generate Video" };

    let run_again = run.clone();
    let regenerate = move |_: MouseEvent| {
        let started = session.write().regenerate();
        if let Ok(options) = started {
            run_again(options);
        }
    };

    rsx! {
        div {
            class: "grid grid-cols-1 lg:grid-cols-2 gap-6",

            div {
                class: "glass-card rounded-2xl p-5 flex flex-col gap-5",
                h2 { class: "text-lg font-semibold", "Create a video" }

                div {
                    class: "flex flex-col gap-1.5",
                    label { class: "text-xs font-medium uppercase tracking-wider text-[var(--text-tertiary)]", "Prompt" }
                    textarea {
                        class: "glass-input text-sm resize-none",
                        rows: "4",
                        placeholder: "Describe the scene you want to animate...",
                        value: "{prompt}",
                        disabled: submitting,
                        oninput: move |e: FormEvent| prompt.set(e.value()),
                    }
                }

                div {
                    class: "grid grid-cols-2 gap-4",
                    OptionSelect {
                        label: "Style",
                        options: labels(VideoStyle::ALL),
                        value: style().to_string(),
                        disabled: submitting,
                        on_change: move |value: String| match value.parse::<VideoStyle>() {
                            Ok(parsed) => style.set(parsed),
                            Err(e) => tracing::warn!("{}", e),
                        },
                    }
                    OptionSelect {
                        label: "Resolution",
                        options: labels(VideoResolution::ALL),
                        value: resolution().to_string(),
                        disabled: submitting,
                        on_change: move |value: String| match value.parse::<VideoResolution>() {
                            Ok(parsed) => resolution.set(parsed),
                            Err(e) => tracing::warn!("{}", e),
                        },
                    }
                }

                div {
                    class: "flex flex-col gap-1.5",
                    div {
                        class: "flex justify-between text-xs font-medium uppercase tracking-wider text-[var(--text-tertiary)]",
                        span { "Duration" }
                        span { class: "text-[var(--text-secondary)]", "{duration}s" }
                    }
                    input {
                        class: "w-full",
                        r#type: "range",
                        min: "{MIN_DURATION_SECS}",
                        max: "{MAX_DURATION_SECS}",
                        value: "{duration}",
                        disabled: submitting,
                        oninput: move |e: FormEvent| {
                            if let Ok(value) = e.value().parse::<u32>() {
                                duration.set(value.clamp(MIN_DURATION_SECS, MAX_DURATION_SECS));
                            }
                        },
                    }
                }

                button {
                    class: PRIMARY_BUTTON,
                    disabled: !can_submit,
                    onclick: move |_| {
                        let options = VideoOptions::new(prompt())
                            .with_style(style())
                            .with_resolution(resolution())
                            .with_duration(duration());
                        let started = session.write().begin(options);
                        match started {
                            Ok(options) => run(options),
                            Err(e) => tracing::debug!("Video submission refused: {}", e),
                        }
                    },
                    "{button_label}"
                }
            }

            div {
                class: "glass-card rounded-2xl p-5 flex flex-col gap-4 min-h-[320px]",
                match state {
                    GeneratorState::Idle => rsx! {
                        PreviewPlaceholder { text: "Your generated video will appear here" }
                    },
                    GeneratorState::Submitting => rsx! {
                        PreviewPlaceholder { text: "Rendering your video, this can take a few seconds..." }
                    },
                    GeneratorState::Failed(message) => rsx! {
                        ErrorBox { message: message }
                    },
                    GeneratorState::Ready(video) => {
                        let video_url = video.video_url.clone();
                        let prompt_text = video.prompt.clone();
                        rsx! {
                            video {
                                class: "w-full rounded-xl bg-black/40",
                                src: "{video.video_url}",
                                poster: "{video.thumbnail_url}",
                                controls: true,
                            }
                            div {
                                class: "flex flex-wrap gap-2",
                                Badge { text: video.style.to_string() }
                                Badge { text: video.resolution.to_string() }
                                Badge { text: format!("{}s", video.duration) }
                            }
                            div {
                                class: "flex gap-2",
                                button {
                                    class: SECONDARY_BUTTON,
                                    disabled: !can_regenerate,
                                    onclick: regenerate,
                                    "Regenerate"
                                }
                                button {
                                    class: SECONDARY_BUTTON,
                                    onclick: move |_| {
                                        if let Err(e) = open_external(&video_url) {
                                            tracing::error!("Failed to open video: {}", e);
                                        }
                                    },
                                    "Download"
                                }
                                button {
                                    class: SECONDARY_BUTTON,
                                    onclick: move |_| {
                                        if let Err(e) = copy_to_clipboard(&prompt_text) {
                                            tracing::error!("Failed to copy prompt: {}", e);
                                        }
                                    },
                                    "Copy prompt"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
