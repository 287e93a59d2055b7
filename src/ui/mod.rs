//! UI components for Genfinity
//!
//! This module contains all user interface components built with Dioxus.

pub mod components;
pub mod gallery;
pub mod image_generator;
pub mod layout;
pub mod video_generator;

pub use layout::Layout;

/// Stylesheet injected once by the layout
pub const GLOBAL_CSS: &str = include_str!("../../assets/main.css");
