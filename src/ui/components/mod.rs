#![allow(non_snake_case)]

pub mod media_preview;
pub mod option_select;

use dioxus::prelude::*;

pub const PRIMARY_BUTTON: &str = "w-full py-3 rounded-xl text-sm font-semibold text-[#F2EDE7] bg-[var(--accent-primary)] hover:bg-[var(--accent-hover)] transition-all disabled:opacity-40 disabled:cursor-not-allowed";

pub const SECONDARY_BUTTON: &str = "px-3 py-1.5 rounded-lg text-xs font-medium text-[var(--text-secondary)] hover:text-[var(--text-primary)] border border-[var(--border-subtle)] hover:bg-white/[0.05] transition-all disabled:opacity-40";

/// Small pill showing one attribute of a record
#[component]
pub fn Badge(text: String) -> Element {
    rsx! {
        span {
            class: "px-2 py-0.5 rounded-full text-[11px] font-medium text-[var(--text-secondary)] bg-white/[0.05] border border-[var(--border-subtle)]",
            "{text}"
        }
    }
}

/// Inline error block
#[component]
pub fn ErrorBox(message: String) -> Element {
    rsx! {
        div {
            class: "px-4 py-3 rounded-xl text-sm text-[var(--text-error)] bg-[var(--bg-error-subtle)] border border-[var(--border-error-subtle)]",
            "{message}"
        }
    }
}
