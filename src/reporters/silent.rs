//! Silent reporter
//!
//! Provides a no-output implementation for testing or when quiet operation is desired.

use super::{CorrectionReporter, Reporter};
use crate::codec::Corrected;
use crate::error::Error;

/// Silent implementation for correction
#[derive(Default)]
pub struct SilentCorrectionReporter;

impl SilentCorrectionReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for SilentCorrectionReporter {
    fn report_error(&self, _error: &str) {}
}

impl CorrectionReporter for SilentCorrectionReporter {
    fn report_valid(&self, _input: &str, _result: &Corrected) {}
    fn report_corrected(&self, _input: &str, _result: &Corrected) {}
    fn report_failed(&self, _input: &str, _error: &Error) {}
    fn report_summary(&self, _total: usize, _valid: usize, _corrected: usize, _failed: usize) {}
}
