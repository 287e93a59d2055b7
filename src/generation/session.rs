//! Generator view state
//!
//! One session per generator view. A submission moves the view to
//! `Submitting`; the outcome of the provider call moves it to `Ready` or
//! `Failed`. While `Submitting`, further submissions are refused, which is
//! what keeps a view from running two generations at once.

use thiserror::Error;

use crate::generation::GenerationError;
use crate::types::GenerationRequest;

/// Why a submission was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Prompt is empty")]
    EmptyPrompt,
    #[error("A generation is already running")]
    InFlight,
    #[error("Nothing has been generated yet")]
    NothingToRegenerate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorState<R> {
    Idle,
    Submitting,
    Ready(R),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSession<O, R> {
    state: GeneratorState<R>,
    last_options: Option<O>,
}

impl<O, R> Default for GeneratorSession<O, R> {
    fn default() -> Self {
        Self {
            state: GeneratorState::Idle,
            last_options: None,
        }
    }
}

impl<O: GenerationRequest, R: Clone> GeneratorSession<O, R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GeneratorState<R> {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, GeneratorState::Submitting)
    }

    /// The record from the last successful run
    pub fn result(&self) -> Option<&R> {
        match &self.state {
            GeneratorState::Ready(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            GeneratorState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn last_options(&self) -> Option<&O> {
        self.last_options.as_ref()
    }

    /// Whether the generate control should be enabled for `prompt`
    pub fn can_submit(&self, prompt: &str) -> bool {
        !self.is_submitting() && !prompt.trim().is_empty()
    }

    pub fn can_regenerate(&self) -> bool {
        !self.is_submitting() && self.last_options.is_some()
    }

    /// Start a generation with `options`
    ///
    /// Returns the options the caller should hand to the provider.
    pub fn begin(&mut self, options: O) -> Result<O, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::InFlight);
        }
        if options.prompt().trim().is_empty() {
            return Err(SubmitError::EmptyPrompt);
        }
        self.last_options = Some(options.clone());
        self.state = GeneratorState::Submitting;
        Ok(options)
    }

    /// Start again with the options of the last submission
    pub fn regenerate(&mut self) -> Result<O, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::InFlight);
        }
        let options = self
            .last_options
            .clone()
            .ok_or(SubmitError::NothingToRegenerate)?;
        self.state = GeneratorState::Submitting;
        Ok(options)
    }

    /// Record the outcome of the provider call
    pub fn finish(&mut self, outcome: Result<R, GenerationError>) {
        self.state = match outcome {
            Ok(record) => GeneratorState::Ready(record),
            Err(e) => GeneratorState::Failed(e.to_string()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ImageOptions, ImageStyle};

    type Session = GeneratorSession<ImageOptions, String>;

    #[test]
    fn test_starts_idle() {
        let session = Session::new();
        assert_eq!(session.state(), &GeneratorState::Idle);
        assert!(session.result().is_none());
        assert!(!session.can_regenerate());
    }

    #[test]
    fn test_empty_prompt_is_refused() {
        let mut session = Session::new();
        assert_eq!(session.begin(ImageOptions::new("  \n")), Err(SubmitError::EmptyPrompt));
        assert_eq!(session.state(), &GeneratorState::Idle);
        assert!(!session.can_submit(""));
    }

    #[test]
    fn test_submit_then_succeed() {
        let mut session = Session::new();
        let options = session.begin(ImageOptions::new("a fox")).unwrap();
        assert_eq!(options.prompt, "a fox");
        assert!(session.is_submitting());
        assert!(!session.can_submit("a fox"));

        session.finish(Ok("record".to_string()));
        assert_eq!(session.result(), Some(&"record".to_string()));
        assert!(session.can_submit("a fox"));
    }

    #[test]
    fn test_second_submit_while_running_is_refused() {
        let mut session = Session::new();
        session.begin(ImageOptions::new("one")).unwrap();

        assert_eq!(session.begin(ImageOptions::new("two")), Err(SubmitError::InFlight));
        assert_eq!(session.regenerate(), Err(SubmitError::InFlight));
        assert_eq!(session.last_options().unwrap().prompt, "one");
    }

    #[test]
    fn test_failure_shows_message() {
        let mut session = Session::new();
        session.begin(ImageOptions::new("a fox")).unwrap();
        session.finish(Err(GenerationError::Provider("quota exceeded".into())));

        assert_eq!(session.error(), Some("Provider error: quota exceeded"));
        assert!(session.result().is_none());
    }

    #[test]
    fn test_regenerate_reuses_last_options() {
        let mut session = Session::new();
        let options = ImageOptions::new("a fox").with_style(ImageStyle::Anime);
        session.begin(options.clone()).unwrap();
        session.finish(Ok("first".to_string()));

        let again = session.regenerate().unwrap();
        assert_eq!(again, options);
        assert!(session.is_submitting());

        session.finish(Err(GenerationError::Timeout(std::time::Duration::from_secs(1))));
        assert!(session.result().is_none());
        assert!(session.error().is_some());

        session.regenerate().unwrap();
        session.finish(Ok("second".to_string()));
        assert_eq!(session.result(), Some(&"second".to_string()));
        assert!(session.error().is_none());
    }

    #[test]
    fn test_regenerate_without_history() {
        let mut session = Session::new();
        assert_eq!(session.regenerate(), Err(SubmitError::NothingToRegenerate));
        assert_eq!(session.state(), &GeneratorState::Idle);
    }
}
