//! Scan driver
//!
//! Feeds a program to an [`Interpreter`] one line at a time, checking for
//! cancellation before every line, reporting progress at a fixed line
//! cadence and calling the throttle hook after every line.

use std::io::BufRead;
use std::path::Path;

use gcodescan_core::{AbortHandle, AnalysisError, ProgressCallback, Result, ThrottleHook};
use gcodescan_settings::Config;
use tracing::{debug, info, warn};

use crate::result::AnalysisResult;
use crate::simulator::Interpreter;
use crate::utils::{GcodeFileReader, LossyLines};

/// What progress percentages are measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBasis {
    /// Line index over the number of lines, for in-memory programs
    Lines { total: u64 },
    /// Bytes consumed over the input size, for streams
    Bytes { total: u64 },
}

impl ProgressBasis {
    /// Percentage after `lines` lines spanning `bytes` bytes
    pub fn percent(self, lines: u64, bytes: u64) -> f64 {
        let (done, total) = match self {
            Self::Lines { total } => (lines, total),
            Self::Bytes { total } => (bytes, total),
        };
        if total == 0 {
            0.0
        } else {
            (done as f64 / total as f64 * 100.0).min(100.0)
        }
    }
}

/// G-code analyzer
///
/// Owns the configuration and the caller's hooks; every `analyze_*` call
/// replays the program from a fresh machine state.
pub struct GcodeAnalyzer {
    config: Config,
    progress: Option<ProgressCallback>,
    throttle: Option<ThrottleHook>,
    abort: AbortHandle,
}

impl std::fmt::Debug for GcodeAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GcodeAnalyzer")
            .field("config", &self.config)
            .field("progress", &self.progress.is_some())
            .field("throttle", &self.throttle.is_some())
            .field("abort", &self.abort)
            .finish()
    }
}

impl Default for GcodeAnalyzer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl GcodeAnalyzer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            progress: None,
            throttle: None,
            abort: AbortHandle::new(),
        }
    }

    /// Report progress percentages to `callback`
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: FnMut(f64) -> Result<()> + Send + 'static,
    {
        self.progress = Some(Box::new(callback));
        self
    }

    /// Call `hook` after every processed line
    pub fn with_throttle<F>(mut self, hook: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.throttle = Some(Box::new(hook));
        self
    }

    /// Share cancellation with an existing handle
    pub fn with_abort_handle(mut self, handle: AbortHandle) -> Self {
        self.abort = handle;
        self
    }

    /// Handle that cancels this analyzer's scans, usable from other threads
    pub fn abort_handle(&self) -> AbortHandle {
        self.abort.clone()
    }

    /// Cancel the current or next scan
    ///
    /// The request stays in effect until the handle is reset.
    pub fn abort(&self) {
        self.abort.abort();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze an in-memory program, one element per line
    pub fn analyze_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<AnalysisResult> {
        let basis = ProgressBasis::Lines {
            total: lines.len() as u64,
        };
        let items = lines.iter().map(|line| {
            let line = line.as_ref();
            Ok((line, line.len() as u64 + 1))
        });
        self.run(items, basis)
    }

    /// Analyze a program held in a string
    pub fn analyze_str(&mut self, program: &str) -> Result<AnalysisResult> {
        let lines: Vec<&str> = program.lines().collect();
        self.analyze_lines(&lines)
    }

    /// Analyze a stream of `total_bytes` bytes
    pub fn analyze_reader<R: BufRead>(
        &mut self,
        reader: R,
        total_bytes: u64,
    ) -> Result<AnalysisResult> {
        self.run(
            LossyLines::new(reader),
            ProgressBasis::Bytes { total: total_bytes },
        )
    }

    /// Analyze the file at `path`
    pub fn analyze_file(&mut self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let reader = GcodeFileReader::new(path)?;
        info!(
            path = %reader.path().display(),
            size = reader.file_size(),
            "Analyzing G-code file"
        );
        let basis = ProgressBasis::Bytes {
            total: reader.file_size(),
        };
        self.run(reader.lines()?, basis)
    }

    fn run<L, I>(&mut self, lines: I, basis: ProgressBasis) -> Result<AnalysisResult>
    where
        L: AsRef<str>,
        I: Iterator<Item = Result<(L, u64)>>,
    {
        self.config
            .validate()
            .map_err(|err| AnalysisError::InvalidInput {
                reason: err.to_string(),
            })?;

        let mut interpreter = Interpreter::new(&self.config);
        let interval = self.config.analysis.progress_interval.max(1);
        let mut lines_processed = 0u64;
        let mut bytes_read = 0u64;

        for item in lines {
            if self.abort.is_aborted() {
                info!(lines_processed, "Analysis aborted");
                return Err(AnalysisError::Aborted { lines_processed }.into());
            }

            let (line, bytes) = item?;
            lines_processed += 1;
            bytes_read += bytes;

            if lines_processed % interval == 0 {
                self.report_progress(basis.percent(lines_processed, bytes_read));
            }

            interpreter.process_line(line.as_ref());

            if let Some(throttle) = self.throttle.as_mut() {
                throttle();
            }
        }

        self.report_progress(100.0);
        let result = interpreter.finish();
        info!(
            lines = lines_processed,
            extruded = result.printing_area.is_set(),
            extruded_mm = result.total_extrusion_length(),
            extruded_cm3 = result.total_extrusion_volume(),
            estimated_time = %result.formatted_time(),
            "Analysis finished"
        );
        Ok(result)
    }

    fn report_progress(&mut self, percent: f64) {
        let Some(callback) = self.progress.as_mut() else {
            return;
        };
        debug!(percent, "Progress");
        if let Err(err) = callback(percent) {
            warn!(error = %err, percent, "Progress callback failed, continuing");
        }
    }
}
