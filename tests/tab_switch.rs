//! A generation started by a view must still land in the library after the
//! view unmounts, which is what happens when the user switches tabs.

#![allow(non_snake_case)]

use dioxus::dioxus_core::NoOpMutations;
use dioxus::prelude::*;
use genfinity::generation::{generate_in_background, MockVideoProvider};
use genfinity::storage::{MediaLibrary, MemoryStore};
use genfinity::types::VideoOptions;
use std::sync::Arc;
use std::time::Duration;

const LATENCY: Duration = Duration::from_millis(100);

/// Starts a generation on mount, the way the generator views do
#[component]
fn GeneratingView() -> Element {
    let library = use_context::<Arc<MediaLibrary>>();
    use_hook(move || {
        let provider = Arc::new(MockVideoProvider::new(LATENCY, LATENCY));
        spawn(async move {
            let _ = generate_in_background(
                provider,
                library,
                VideoOptions::new("lanterns over a river"),
                Duration::from_secs(5),
            )
            .await;
        });
    });

    rsx! { div { "generating" } }
}

/// Mounts the view, then swaps it out after 20ms
fn SwitchingShell() -> Element {
    let mut show_view = use_signal(|| true);
    use_future(move || async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        show_view.set(false);
    });

    rsx! {
        if show_view() {
            GeneratingView {}
        } else {
            div { "gallery" }
        }
    }
}

fn StayingShell() -> Element {
    rsx! { GeneratingView {} }
}

async fn drive(shell: fn() -> Element, library: Arc<MediaLibrary>) {
    let mut dom = VirtualDom::new(shell).with_root_context(library);
    dom.rebuild_in_place();

    let run = async {
        loop {
            dom.wait_for_work().await;
            dom.render_immediate(&mut NoOpMutations);
        }
    };
    let _ = tokio::time::timeout(Duration::from_millis(600), run).await;
}

#[tokio::test]
async fn test_record_is_saved_when_view_unmounts_mid_generation() {
    let library = Arc::new(MediaLibrary::new(Arc::new(MemoryStore::new())));

    drive(SwitchingShell, library.clone()).await;

    let videos = library.videos().get_all();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].prompt, "lanterns over a river");
}

#[tokio::test]
async fn test_record_is_saved_when_view_stays_mounted() {
    let library = Arc::new(MediaLibrary::new(Arc::new(MemoryStore::new())));

    drive(StayingShell, library.clone()).await;

    assert_eq!(library.videos().get_all().len(), 1);
}
