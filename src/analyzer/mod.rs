// Analyzer module: the scan-and-aggregate core.

pub mod pulse;

pub use pulse::PulseAnalyzer;
