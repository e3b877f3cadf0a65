//! Ordered acquisition chain with guaranteed forward progress.
//!
//! Strategies are tried strictly in priority order; the first one that
//! produces the destination file wins and no further strategies run. A
//! failed strategy costs an inter-strategy cooldown before the next try.
//! When the whole chain is exhausted the fallback generator synthesizes a
//! placeholder so the rest of the pipeline always receives a usable file;
//! only a fallback failure is fatal.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::acquire::fallback::FallbackGenerator;
use crate::acquire::strategy::{default_strategies, AuthContext, FetchRequest, FetchStrategy};
use crate::command::CommandRunner;
use crate::error::{MediaError, MediaResult};

/// Base inter-strategy cooldown in seconds.
const BASE_COOLDOWN_SECS: u64 = 3;

/// Cap for the inter-strategy cooldown in seconds.
const COOLDOWN_CAP_SECS: u64 = 10;

/// How the asset ended up on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    /// A strategy fetched the real asset.
    Fetched { strategy: &'static str },
    /// Every strategy failed; a placeholder was synthesized.
    Fallback,
}

/// The acquisition pipeline: strategy chain plus fallback generator.
pub struct AcquisitionPipeline {
    runner: CommandRunner,
    strategies: Vec<Box<dyn FetchStrategy>>,
    fallback: FallbackGenerator,
    fallback_enabled: bool,
}

impl AcquisitionPipeline {
    /// Pipeline with the default strategy chain.
    pub fn new(runner: CommandRunner) -> Self {
        Self {
            runner,
            strategies: default_strategies(),
            fallback: FallbackGenerator::default(),
            fallback_enabled: true,
        }
    }

    /// Replace the strategy chain (used by tests and custom deployments).
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn FetchStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Replace the fallback generator.
    pub fn with_fallback(mut self, fallback: FallbackGenerator) -> Self {
        self.fallback = fallback;
        self
    }

    /// Disable fallback synthesis; exhaustion then fails directly.
    pub fn with_fallback_enabled(mut self, enabled: bool) -> Self {
        self.fallback_enabled = enabled;
        self
    }

    /// Acquire the asset at `request.dest`.
    ///
    /// Returns how the file was produced, or `AcquisitionExhausted` when
    /// both the chain and the fallback generator failed.
    pub async fn acquire(
        &self,
        request: &FetchRequest,
        auth: &AuthContext,
    ) -> MediaResult<Acquisition> {
        let total = self.strategies.len();
        info!(url = %request.url, strategies = total, "starting acquisition");

        for (index, strategy) in self.strategies.iter().enumerate() {
            let ordinal = index + 1;

            let argv = match strategy.command(request, auth) {
                Some(argv) => argv,
                None => {
                    debug!(strategy = strategy.name(), "strategy self-skipped");
                    continue;
                }
            };

            info!(
                strategy = strategy.name(),
                ordinal, total, "attempting strategy"
            );

            match self.runner.run(&argv, strategy.retry_budget()).await {
                Ok(_) => {
                    if request.dest.exists() {
                        info!(strategy = strategy.name(), "acquisition succeeded");
                        return Ok(Acquisition::Fetched {
                            strategy: strategy.name(),
                        });
                    }
                    warn!(
                        strategy = strategy.name(),
                        "strategy reported success but produced no file"
                    );
                }
                Err(e) => {
                    warn!(strategy = strategy.name(), error = %e, "strategy failed");
                }
            }

            if ordinal < total {
                let cooldown = (BASE_COOLDOWN_SECS + ordinal as u64).min(COOLDOWN_CAP_SECS);
                debug!(cooldown_secs = cooldown, "cooling down before next strategy");
                tokio::time::sleep(Duration::from_secs(cooldown)).await;
            }
        }

        if !self.fallback_enabled {
            return Err(MediaError::exhausted("fallback disabled"));
        }

        warn!(url = %request.url, "all strategies failed, synthesizing fallback asset");
        match self.fallback.generate(&self.runner, &request.dest).await {
            Ok(()) => Ok(Acquisition::Fallback),
            Err(e) => Err(MediaError::exhausted(format!(
                "fallback generation failed: {}",
                e
            ))),
        }
    }

    /// Inter-strategy cooldown for a 1-based strategy ordinal.
    #[cfg(test)]
    fn cooldown_secs(ordinal: usize) -> u64 {
        (BASE_COOLDOWN_SECS + ordinal as u64).min(COOLDOWN_CAP_SECS)
    }
}

/// Convenience: acquire `url` into `dest` with discovered auth and default
/// strategies.
pub async fn acquire_asset(
    runner: CommandRunner,
    url: &str,
    dest: impl AsRef<Path>,
    quality: &str,
) -> MediaResult<Acquisition> {
    let request = FetchRequest::new(url, dest.as_ref(), quality);
    let auth = AuthContext::discover();
    AcquisitionPipeline::new(runner).acquire(&request, &auth).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::RawOutput;
    use crate::testutil::{failed_output, ScriptedExecutor};
    use std::sync::Arc;

    /// Strategy with a fixed argv and a one-shot retry budget.
    struct FixedStrategy {
        name: &'static str,
        requires_auth: bool,
    }

    impl FetchStrategy for FixedStrategy {
        fn name(&self) -> &'static str {
            self.name
        }

        fn retry_budget(&self) -> u32 {
            1
        }

        fn command(&self, request: &FetchRequest, auth: &AuthContext) -> Option<Vec<String>> {
            if self.requires_auth && auth.cookies.is_none() {
                return None;
            }
            Some(vec![
                "yt-dlp".to_string(),
                self.name.to_string(),
                request.dest.to_string_lossy().to_string(),
            ])
        }
    }

    fn chain(specs: &[(&'static str, bool)]) -> Vec<Box<dyn FetchStrategy>> {
        specs
            .iter()
            .map(|&(name, requires_auth)| {
                Box::new(FixedStrategy {
                    name,
                    requires_auth,
                }) as Box<dyn FetchStrategy>
            })
            .collect()
    }

    fn touch(path: &Path) -> RawOutput {
        std::fs::write(path, b"video").unwrap();
        RawOutput {
            exit_code: Some(0),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_success_wins() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("raw_video.mp4");

        // Second strategy succeeds; the third must never run.
        let executor = Arc::new(ScriptedExecutor::new(vec![
            Ok(failed_output("nope")),
            Ok(touch(&dest)),
        ]));
        let runner = CommandRunner::new(executor.clone());
        let pipeline = AcquisitionPipeline::new(runner)
            .with_strategies(chain(&[("first", false), ("second", false), ("third", false)]));

        let request = FetchRequest::new("https://youtu.be/Tvz8an1znIo", &dest, "720p");
        let outcome = pipeline
            .acquire(&request, &AuthContext::default())
            .await
            .unwrap();

        assert_eq!(outcome, Acquisition::Fetched { strategy: "second" });
        assert_eq!(executor.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auth_strategies_skipped_without_cooldown() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("raw_video.mp4");

        let executor = Arc::new(ScriptedExecutor::new(vec![Ok(touch(&dest))]));
        let runner = CommandRunner::new(executor.clone());
        let pipeline = AcquisitionPipeline::new(runner)
            .with_strategies(chain(&[("needs_auth", true), ("open", false)]));

        let request = FetchRequest::new("https://youtu.be/Tvz8an1znIo", &dest, "720p");
        let outcome = pipeline
            .acquire(&request, &AuthContext::default())
            .await
            .unwrap();

        // Only the open strategy was ever invoked
        assert_eq!(outcome, Acquisition::Fetched { strategy: "open" });
        assert_eq!(executor.calls(), 1);
        assert_eq!(executor.invocations()[0][1], "open");
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_invokes_fallback_once() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("raw_video.mp4");

        // Everything fails, including the fallback ffmpeg run.
        let executor = Arc::new(ScriptedExecutor::always_failing("ERROR: throttled"));
        let runner = CommandRunner::new(executor.clone());
        let pipeline = AcquisitionPipeline::new(runner)
            .with_strategies(chain(&[("a", false), ("b", false), ("c", false)]));

        let request = FetchRequest::new("https://youtu.be/Tvz8an1znIo", &dest, "720p");
        let err = pipeline
            .acquire(&request, &AuthContext::default())
            .await
            .unwrap_err();

        assert!(matches!(err, MediaError::AcquisitionExhausted { .. }));

        // 3 strategy attempts + 3 fallback retries; the fallback ffmpeg
        // command was started exactly once per retry, no second synthesis
        // pass after the error.
        let invocations = executor.invocations();
        let ffmpeg_calls = invocations.iter().filter(|a| a[0] == "ffmpeg").count();
        assert_eq!(ffmpeg_calls, 3);
        assert_eq!(invocations.len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fallback_success_reports_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("raw_video.mp4");

        let executor = Arc::new(ScriptedExecutor::new(vec![
            Ok(failed_output("no")),
            Ok(touch(&dest)), // the fallback ffmpeg run
        ]));
        let runner = CommandRunner::new(executor.clone());
        let pipeline =
            AcquisitionPipeline::new(runner).with_strategies(chain(&[("only", false)]));

        let request = FetchRequest::new("https://youtu.be/Tvz8an1znIo", &dest, "720p");
        let outcome = pipeline
            .acquire(&request, &AuthContext::default())
            .await
            .unwrap();

        assert_eq!(outcome, Acquisition::Fallback);
        assert_eq!(executor.invocations()[1][0], "ffmpeg");
    }

    #[test]
    fn test_cooldown_formula() {
        assert_eq!(AcquisitionPipeline::cooldown_secs(1), 4);
        assert_eq!(AcquisitionPipeline::cooldown_secs(2), 5);
        assert_eq!(AcquisitionPipeline::cooldown_secs(6), 9);
        // Capped
        assert_eq!(AcquisitionPipeline::cooldown_secs(7), 10);
        assert_eq!(AcquisitionPipeline::cooldown_secs(20), 10);
    }
}
