use serde::Serialize;

/// Running validation counters.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Counters {
    pub optional_attempts: u64,
    pub optional_failures: u64,
    pub required_attempts: u64,
    pub required_failures: u64,
    pub batch_processed: u64,
}

/// Point-in-time view of the validator's counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationStats {
    pub optional_attempts: u64,
    pub optional_failures: u64,
    pub required_attempts: u64,
    pub required_failures: u64,
    pub batch_processed: u64,
    pub optional_success_rate: f64,
    pub required_success_rate: f64,
}

impl Counters {
    pub fn snapshot(&self) -> ValidationStats {
        ValidationStats {
            optional_attempts: self.optional_attempts,
            optional_failures: self.optional_failures,
            required_attempts: self.required_attempts,
            required_failures: self.required_failures,
            batch_processed: self.batch_processed,
            optional_success_rate: success_rate(self.optional_attempts, self.optional_failures),
            required_success_rate: success_rate(self.required_attempts, self.required_failures),
        }
    }
}

/// Share of attempts that passed. No attempts counts as a perfect record.
fn success_rate(attempts: u64, failures: u64) -> f64 {
    if attempts == 0 {
        return 1.0;
    }
    attempts.saturating_sub(failures) as f64 / attempts as f64
}
