//! Upload session: one submit-to-response cycle.
//!
//! Tracks transfer progress and the terminal outcome. Progress only moves
//! forward; a late or reordered event never lowers the displayed percent.

use crate::{AppError, PROCESSING_LABEL};

/// Terminal result of an upload.
#[derive(Clone, Debug, PartialEq)]
pub enum UploadOutcome {
    /// Server answered 200, the page should reload.
    Succeeded,
    /// Non-200 status or transport failure.
    Failed(AppError),
}

impl UploadOutcome {
    /// Classify a completed HTTP response.
    pub fn from_status(status: u16) -> Self {
        if status == 200 {
            UploadOutcome::Succeeded
        } else {
            UploadOutcome::Failed(AppError::Server { status })
        }
    }

    /// Classify the result of the transport layer.
    pub fn from_response(response: Result<u16, AppError>) -> Self {
        match response {
            Ok(status) => Self::from_status(status),
            Err(e) => UploadOutcome::Failed(e),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploadSession {
    fraction: f64,
    outcome: Option<UploadOutcome>,
}

impl UploadSession {
    pub fn start() -> Self {
        Self::default()
    }

    /// Record a progress event.
    ///
    /// Returns the displayed percent, or `None` when the total is not
    /// computable or the session already finished.
    pub fn record_progress(&mut self, loaded: f64, total: f64) -> Option<u32> {
        if self.outcome.is_some() || !(total > 0.0) || !loaded.is_finite() {
            return None;
        }
        let fraction = (loaded / total).clamp(0.0, 1.0);
        if fraction > self.fraction {
            self.fraction = fraction;
        }
        Some(self.percent())
    }

    /// Completed fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Completed percent, rounded for display.
    pub fn percent(&self) -> u32 {
        (self.fraction * 100.0).round() as u32
    }

    pub fn finish(&mut self, outcome: UploadOutcome) -> &UploadOutcome {
        self.outcome.insert(outcome)
    }

    pub fn outcome(&self) -> Option<&UploadOutcome> {
        self.outcome.as_ref()
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, Some(UploadOutcome::Succeeded))
    }

    /// Text for the progress label.
    pub fn label(&self) -> String {
        if self.succeeded() {
            PROCESSING_LABEL.to_string()
        } else {
            format!("Uploading... {}%", self.percent())
        }
    }

    /// CSS width of the progress bar.
    pub fn bar_width(&self) -> String {
        if self.succeeded() {
            "100%".to_string()
        } else {
            format!("{}%", self.percent())
        }
    }
}
