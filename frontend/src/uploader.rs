//! Uploader state machine.
//!
//! Combines the staged [`Selection`] with the current [`UploadSession`].
//! The Leptos component keeps one [`UploaderState`] in a signal and only
//! projects it to the DOM; every decision about gating, rollback and
//! progress is made here.

use crate::selection::{FileHandle, FileId, Selection, StageOutcome, StagedFile};
use crate::session::{UploadOutcome, UploadSession};
use crate::{AppError, AppResult, ACCEPTED_EXTENSION};

/// What the page should show for the upload flow.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadPhase {
    /// No request in flight
    Idle,
    /// Request body being transmitted
    Sending { percent: u32 },
    /// Server accepted the upload, reload pending
    Processing,
}

#[derive(Clone, Debug)]
pub struct UploaderState<F> {
    selection: Selection<F>,
    session: Option<UploadSession>,
}

impl<F> Default for UploaderState<F> {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            session: None,
        }
    }
}

impl<F: FileHandle> UploaderState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a new batch, replacing the current selection.
    ///
    /// Rejected names come back as a validation error alongside the
    /// outcome so the caller can warn without aborting.
    pub fn stage(&mut self, batch: impl IntoIterator<Item = F>) -> (StageOutcome, Option<AppError>) {
        let outcome = self.selection.stage(batch);
        let warning = outcome.has_rejections().then(|| {
            AppError::Validation(format!(
                "only markdown files ({}) can be uploaded, skipped {}",
                ACCEPTED_EXTENSION,
                outcome.rejected.join(", ")
            ))
        });
        (outcome, warning)
    }

    pub fn remove(&mut self, id: FileId) -> Option<StagedFile<F>> {
        self.selection.remove(id)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<StagedFile<F>> {
        self.selection.remove_at(index)
    }

    /// Start a submission.
    ///
    /// Returns the handles to send, in selection order. Fails without
    /// side effects when nothing is staged or a request is in flight.
    pub fn begin_submit(&mut self) -> AppResult<Vec<F>> {
        if self.session.is_some() {
            return Err(AppError::InFlight);
        }
        if self.selection.is_empty() {
            return Err(AppError::EmptySelection);
        }
        self.session = Some(UploadSession::start());
        Ok(self.selection.handles())
    }
}

impl<F> UploaderState<F> {
    pub fn selection(&self) -> &Selection<F> {
        &self.selection
    }

    pub fn session(&self) -> Option<&UploadSession> {
        self.session.as_ref()
    }

    pub fn in_flight(&self) -> bool {
        self.session.is_some()
    }

    /// The submit control is enabled iff something is staged and no
    /// request is running.
    pub fn submit_enabled(&self) -> bool {
        !self.selection.is_empty() && self.session.is_none()
    }

    pub fn phase(&self) -> UploadPhase {
        match &self.session {
            None => UploadPhase::Idle,
            Some(session) if session.succeeded() => UploadPhase::Processing,
            Some(session) => UploadPhase::Sending {
                percent: session.percent(),
            },
        }
    }

    /// Forward a progress event to the running session.
    pub fn record_progress(&mut self, loaded: f64, total: f64) -> Option<u32> {
        self.session.as_mut()?.record_progress(loaded, total)
    }

    /// Apply the terminal response.
    ///
    /// On success the session stays so the processing label remains
    /// visible until reload. On failure the session is dropped, which hides
    /// progress and re-enables submit; the selection is left untouched.
    pub fn finish(&mut self, response: Result<u16, AppError>) -> UploadOutcome {
        let outcome = UploadOutcome::from_response(response);
        match self.session.as_mut() {
            Some(session) if outcome == UploadOutcome::Succeeded => {
                session.finish(outcome.clone());
            }
            _ => self.session = None,
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::tests::{files, FakeFile};

    fn staged(names: &[&'static str]) -> UploaderState<FakeFile> {
        let mut state = UploaderState::new();
        state.stage(files(names));
        state
    }

    #[test]
    fn test_mixed_batch_warns_and_enables_submit() {
        let mut state = UploaderState::new();
        let (outcome, warning) = state.stage(files(&["notes.md", "image.png"]));

        assert_eq!(state.selection().names(), vec!["notes.md"]);
        assert_eq!(outcome.rejected, vec!["image.png"]);
        assert!(matches!(warning, Some(AppError::Validation(msg)) if msg.contains("image.png")));
        assert!(state.submit_enabled());
    }

    #[test]
    fn test_empty_submit_is_blocked() {
        let mut state = UploaderState::<FakeFile>::new();
        state.stage(Vec::new());

        assert!(!state.submit_enabled());
        assert_eq!(state.begin_submit(), Err(AppError::EmptySelection));
        assert!(!state.in_flight());
        assert_eq!(state.phase(), UploadPhase::Idle);
    }

    #[test]
    fn test_button_gating_follows_selection() {
        let mut state = staged(&["a.md", "b.md"]);
        assert!(state.submit_enabled());

        state.remove_at(0);
        assert!(state.submit_enabled());
        state.remove_at(0);
        assert!(!state.submit_enabled());

        state.stage(files(&["c.md"]));
        assert!(state.submit_enabled());
        let id = state.selection().iter().next().unwrap().id();
        state.remove(id);
        assert!(!state.submit_enabled());

        state.stage(files(&["x.png"]));
        assert!(!state.submit_enabled());
    }

    #[test]
    fn test_submit_locks_until_finished() {
        let mut state = staged(&["a.md", "b.md"]);
        let sent = state.begin_submit().unwrap();

        assert_eq!(sent.iter().map(|f| f.name).collect::<Vec<_>>(), vec!["a.md", "b.md"]);
        assert!(!state.submit_enabled());
        assert_eq!(state.phase(), UploadPhase::Sending { percent: 0 });
        assert_eq!(state.begin_submit(), Err(AppError::InFlight));
    }

    #[test]
    fn test_progress_updates_phase() {
        let mut state = staged(&["a.md"]);
        assert_eq!(state.record_progress(5.0, 10.0), None);

        state.begin_submit().unwrap();
        assert_eq!(state.record_progress(5.0, 10.0), Some(50));
        assert_eq!(state.phase(), UploadPhase::Sending { percent: 50 });
    }

    #[test]
    fn test_success_keeps_processing_state() {
        let mut state = staged(&["a.md"]);
        state.begin_submit().unwrap();
        state.record_progress(10.0, 10.0);

        assert_eq!(state.finish(Ok(200)), UploadOutcome::Succeeded);
        assert_eq!(state.phase(), UploadPhase::Processing);
        assert!(!state.submit_enabled());
    }

    #[test]
    fn test_server_error_rolls_back_and_keeps_selection() {
        let mut state = staged(&["a.md", "b.md"]);
        state.begin_submit().unwrap();
        state.record_progress(7.0, 10.0);

        let outcome = state.finish(Ok(500));
        assert_eq!(outcome, UploadOutcome::Failed(AppError::Server { status: 500 }));
        assert_eq!(state.phase(), UploadPhase::Idle);
        assert!(state.session().is_none());
        assert!(state.submit_enabled());
        assert_eq!(state.selection().names(), vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_network_error_allows_retry() {
        let mut state = staged(&["a.md"]);
        state.begin_submit().unwrap();
        let outcome = state.finish(Err(AppError::Network("offline".into())));

        assert!(matches!(outcome, UploadOutcome::Failed(AppError::Network(_))));
        let retry = state.begin_submit().unwrap();
        assert_eq!(retry.len(), 1);
    }
}
