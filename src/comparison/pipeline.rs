use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::comparison::aggregator::{efficiency_bars, summarize, EfficiencyBars, SummaryStats};
use crate::comparison::request_builder::build_comparison_request;
use crate::entities::comparison_result::ComparisonResult;
use crate::entities::error::ComparatorError;
use crate::entities::hardware_query::HardwareQuery;
use crate::openai_handler::LlmInvoker;

/// Everything the results view needs for one successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonOutcome {
    pub query: HardwareQuery,
    pub result: ComparisonResult,
    pub summary: SummaryStats,
    pub efficiency_bars: EfficiencyBars,
}

/// Build, call once, parse, normalize, summarize. No retry.
pub async fn run_comparison(
    invoker: &dyn LlmInvoker,
    query: &HardwareQuery,
) -> Result<ComparisonOutcome, ComparatorError> {
    let display_name = if query.is_single() {
        "Comparison / Single GPU"
    } else {
        "Comparison / Head to head"
    };
    let gpt_request = build_comparison_request(query)?.into_gpt_request(display_name);

    let mut result: ComparisonResult = gpt_request.execute(invoker).await?;
    result.normalize_for_query(query);

    let summary = summarize(&result);
    let efficiency_bars = efficiency_bars(&result.efficiency);
    Ok(ComparisonOutcome {
        query: query.clone(),
        result,
        summary,
        efficiency_bars,
    })
}

#[derive(Debug, Clone)]
pub enum SubmissionState {
    Idle,
    Submitting { seq: u64 },
    Success(Box<ComparisonOutcome>),
    Failed { message: String },
}

#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub seq: u64,
    pub submission_id: Uuid,
    pub query: HardwareQuery,
}

/// Per-user submission state. Sequence numbers only grow; a completion is
/// applied only if it belongs to the most recent submission.
#[derive(Debug)]
pub struct ComparisonSession {
    state: SubmissionState,
    latest_seq: u64,
}

impl Default for ComparisonSession {
    fn default() -> Self {
        ComparisonSession::new()
    }
}

impl ComparisonSession {
    pub fn new() -> ComparisonSession {
        ComparisonSession {
            state: SubmissionState::Idle,
            latest_seq: 0,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, SubmissionState::Submitting { .. })
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn reset(&mut self) {
        self.state = SubmissionState::Idle;
    }

    /// Validation failures leave the state untouched.
    pub fn begin(&mut self, query: HardwareQuery) -> Result<SubmissionTicket, ComparatorError> {
        query.validate()?;
        self.latest_seq += 1;
        let ticket = SubmissionTicket {
            seq: self.latest_seq,
            submission_id: Uuid::new_v4(),
            query,
        };
        self.state = SubmissionState::Submitting { seq: ticket.seq };
        info!(
            target: "comparison",
            "submission_id: {} submission_started seq={} gpu1={} gpu2={}",
            ticket.submission_id,
            ticket.seq,
            ticket.query.gpu1,
            ticket.query.gpu2
        );
        Ok(ticket)
    }

    /// Returns whether the completion was applied.
    pub fn complete(
        &mut self,
        ticket: &SubmissionTicket,
        outcome: Result<ComparisonOutcome, ComparatorError>,
    ) -> bool {
        if ticket.seq != self.latest_seq {
            warn!(
                target: "comparison",
                "submission_id: {} stale_completion_discarded seq={} latest_seq={}",
                ticket.submission_id,
                ticket.seq,
                self.latest_seq
            );
            return false;
        }
        self.state = match outcome {
            Ok(outcome) => {
                info!(
                    target: "comparison",
                    "submission_id: {} submission_succeeded seq={} winner={}",
                    ticket.submission_id,
                    ticket.seq,
                    outcome.summary.winner
                );
                SubmissionState::Success(Box::new(outcome))
            }
            Err(e) => {
                warn!(
                    target: "comparison",
                    "submission_id: {} submission_failed seq={} error={:?}",
                    ticket.submission_id,
                    ticket.seq,
                    e
                );
                SubmissionState::Failed {
                    message: e.user_message(),
                }
            }
        };
        true
    }

    pub async fn submit(
        &mut self,
        invoker: &dyn LlmInvoker,
        query: HardwareQuery,
    ) -> Result<&SubmissionState, ComparatorError> {
        let ticket = self.begin(query)?;
        let outcome = run_comparison(invoker, &ticket.query).await;
        self.complete(&ticket, outcome);
        Ok(&self.state)
    }
}
