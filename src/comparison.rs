pub mod aggregator;
pub mod contract;
pub mod pipeline;
pub mod request_builder;
pub mod schema;
pub mod spec_extraction;

#[cfg(test)]
mod test_support;

pub use aggregator::{efficiency_bars, format_render_time, game_delta, summarize, EfficiencyBars, GameDelta, SummaryStats};
pub use pipeline::{run_comparison, ComparisonOutcome, ComparisonSession, SubmissionState, SubmissionTicket};
pub use request_builder::{build_comparison_request, ComparisonRequest};
pub use spec_extraction::extract_specs;
