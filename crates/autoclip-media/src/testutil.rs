//! Shared test doubles for command execution.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::command::{Executor, RawOutput};
use crate::error::{MediaError, MediaResult};

/// Build a successful output with the given stdout.
pub(crate) fn ok_output_with(stdout: &str) -> RawOutput {
    RawOutput {
        exit_code: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

/// Build a failed output with the given stderr.
pub(crate) fn failed_output(stderr: &str) -> RawOutput {
    RawOutput {
        exit_code: Some(1),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

/// Executor replaying a fixed script of outcomes, recording every argv.
pub(crate) struct ScriptedExecutor {
    script: Vec<MediaResult<RawOutput>>,
    calls: AtomicU32,
    invocations: Mutex<Vec<Vec<String>>>,
}

impl ScriptedExecutor {
    pub(crate) fn new(script: Vec<MediaResult<RawOutput>>) -> Self {
        Self {
            script,
            calls: AtomicU32::new(0),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Executor that fails every invocation with the given stderr.
    pub(crate) fn always_failing(stderr: &str) -> Self {
        Self::new(vec![Ok(failed_output(stderr))])
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn invocations(&self) -> Vec<Vec<String>> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl Executor for ScriptedExecutor {
    async fn execute(&self, argv: &[String], _timeout: Duration) -> MediaResult<RawOutput> {
        let idx = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        self.invocations.lock().unwrap().push(argv.to_vec());
        // A script shorter than the call count repeats its last entry, so a
        // one-entry script can stand in for "always fails".
        let entry = self.script.get(idx).or_else(|| self.script.last());
        match entry {
            Some(Ok(raw)) => Ok(raw.clone()),
            Some(Err(MediaError::Timeout(s))) => Err(MediaError::Timeout(*s)),
            Some(Err(_)) => Err(MediaError::command_failed("scripted error", None, None)),
            None => Ok(failed_output("script exhausted")),
        }
    }
}
