pub mod match_metrics;

pub use match_metrics::MatchMetrics;
