//! Genfinity Library
//!
//! Core library for the Genfinity desktop application: generate images and
//! videos from text prompts and keep them in a local gallery.

pub mod app;
pub mod gallery;
pub mod generation;
pub mod storage;
pub mod system;
pub mod types;
pub mod ui;
