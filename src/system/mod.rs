//! System utilities
//!
//! Hands assets and prompts to the rest of the desktop: opening a URL in the
//! default browser and copying text to the clipboard.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Refusing to open non-web URL: {0}")]
    UnsupportedUrl(String),
    #[error("Failed to open browser: {0}")]
    Browser(#[from] std::io::Error),
    #[error("Clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}

/// Only remote web assets are opened
pub fn is_openable_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("https://") || url.starts_with("http://")
}

/// Open an asset URL in the system browser (the "download" action)
pub fn open_external(url: &str) -> Result<(), SystemError> {
    if !is_openable_url(url) {
        return Err(SystemError::UnsupportedUrl(url.to_string()));
    }
    webbrowser::open(url.trim())?;
    tracing::debug!("Opened {} in the browser", url);
    Ok(())
}

/// Put `text` on the system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<(), SystemError> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}
