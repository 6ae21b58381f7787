//! Console reporter
//!
//! Prints each input, a `?` mask over repaired characters, the correction,
//! the prefix and the decoded bytes.

use super::{CorrectionReporter, Reporter};
use crate::codec::Corrected;
use crate::error::Error;

/// Console implementation for correction
#[derive(Default)]
pub struct ConsoleCorrectionReporter {
    quiet: bool,
}

impl ConsoleCorrectionReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    fn print_payload(&self, result: &Corrected) {
        println!("HRP: {}", result.hrp);
        match result.to_bytes() {
            Ok(bytes) => println!("Decoded: {}", hex::encode(bytes)),
            Err(e) => println!("Decoded: <{}>", e),
        }
    }
}

impl Reporter for ConsoleCorrectionReporter {
    fn report_error(&self, error: &str) {
        eprintln!("Error: {}", error);
    }
}

impl CorrectionReporter for ConsoleCorrectionReporter {
    fn report_valid(&self, input: &str, result: &Corrected) {
        if self.quiet {
            println!("{}", result.encoded);
            return;
        }
        println!("Valid:        {}", input);
        self.print_payload(result);
    }

    fn report_corrected(&self, input: &str, result: &Corrected) {
        if self.quiet {
            println!("{}", result.encoded);
            return;
        }
        println!("Input:        {}", input);
        println!("Errors found: {}", result.masked());
        println!("Correction:   {}", result.encoded);
        self.print_payload(result);
    }

    fn report_failed(&self, input: &str, error: &Error) {
        let kind = if error.is_malformed() {
            "malformed"
        } else {
            "unrecoverable"
        };
        self.report_error(&format!("{} ({}): {}", input, kind, error));
    }

    fn report_summary(&self, total: usize, valid: usize, corrected: usize, failed: usize) {
        if self.quiet || total < 2 {
            return;
        }
        println!(
            "\n{} strings: {} valid, {} corrected, {} failed",
            total, valid, corrected, failed
        );
    }
}
