//! Output reporting for Bech32X correction
//!
//! Decouples the correction logic from how results are shown, so the same
//! batch driver serves the console and quiet/test use.

mod console;
mod silent;

pub use console::ConsoleCorrectionReporter;
pub use silent::SilentCorrectionReporter;

use crate::codec::Corrected;
use crate::error::Error;

/// Base trait for all reporters
pub trait Reporter: Send + Sync {
    /// Report an error that occurred during operation
    fn report_error(&self, error: &str);
}

/// Trait for reporting correction results
pub trait CorrectionReporter: Reporter {
    /// Input was already valid
    fn report_valid(&self, input: &str, result: &Corrected);

    /// Input had errors that were repaired
    fn report_corrected(&self, input: &str, result: &Corrected);

    /// Input could not be decoded
    fn report_failed(&self, input: &str, error: &Error);

    /// Final summary over a batch
    fn report_summary(&self, total: usize, valid: usize, corrected: usize, failed: usize);
}

/// Totals over a reported batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub corrected: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Send each batch result to `reporter` and tally the outcomes
pub fn report_batch<S, R>(
    inputs: &[S],
    results: &[crate::Result<Corrected>],
    reporter: &R,
) -> BatchSummary
where
    S: AsRef<str>,
    R: CorrectionReporter + ?Sized,
{
    let mut summary = BatchSummary {
        total: results.len(),
        ..Default::default()
    };

    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(corrected) if corrected.is_valid() => {
                summary.valid += 1;
                reporter.report_valid(input.as_ref(), corrected);
            }
            Ok(corrected) => {
                summary.corrected += 1;
                reporter.report_corrected(input.as_ref(), corrected);
            }
            Err(e) => {
                summary.failed += 1;
                reporter.report_failed(input.as_ref(), e);
            }
        }
    }

    reporter.report_summary(
        summary.total,
        summary.valid,
        summary.corrected,
        summary.failed,
    );
    summary
}
