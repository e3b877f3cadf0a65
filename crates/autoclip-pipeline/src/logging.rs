//! Structured run logging utilities.
//!
//! Provides consistent, structured logging for pipeline runs with
//! contextual information (run ID, stage).

use tracing::{error, info, warn};
use uuid::Uuid;

/// Run logger for structured lifecycle events.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    stage: String,
}

impl RunLogger {
    /// Logger for a fresh run with a generated ID.
    pub fn new(stage: &str) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            stage: stage.to_string(),
        }
    }

    /// Same run, different stage.
    pub fn stage(&self, stage: &str) -> Self {
        Self {
            run_id: self.run_id.clone(),
            stage: stage.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(run_id = %self.run_id, stage = %self.stage, "Stage started: {}", message);
    }

    pub fn log_progress(&self, message: &str) {
        info!(run_id = %self.run_id, stage = %self.stage, "Stage progress: {}", message);
    }

    pub fn log_warning(&self, message: &str) {
        warn!(run_id = %self.run_id, stage = %self.stage, "Stage warning: {}", message);
    }

    pub fn log_error(&self, message: &str) {
        error!(run_id = %self.run_id, stage = %self.stage, "Stage error: {}", message);
    }

    pub fn log_completion(&self, message: &str) {
        info!(run_id = %self.run_id, stage = %self.stage, "Stage completed: {}", message);
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_preserves_run_id() {
        let logger = RunLogger::new("acquisition");
        let next = logger.stage("analysis");
        assert_eq!(logger.run_id(), next.run_id());
    }
}
