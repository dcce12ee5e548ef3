use std::fs;

use hardware_comparator::comparison::{format_render_time, game_delta, ComparisonSession, SubmissionState};
use hardware_comparator::entities::hardware_query::FormState;
use hardware_comparator::logging;
use hardware_comparator::openai_handler::GptResponsesClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    // Usage: compare_playground <form.json>
    let form_path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: compare_playground <form.json>"))?;
    let form: FormState = serde_json::from_str(&fs::read_to_string(&form_path)?)?;
    let query = form.to_query()?;

    let client = GptResponsesClient::from_env()?;
    let mut session = ComparisonSession::new();

    match session.submit(&client, query).await? {
        SubmissionState::Success(outcome) => {
            println!("=== RAW RESULT ===");
            println!("{}", serde_json::to_string_pretty(&outcome.result)?);

            println!("\n=== SUMMARY ===");
            match outcome.summary.headline() {
                Some(headline) => println!("{}", headline),
                None => println!("Single GPU analysis of {}", outcome.summary.winner),
            }
            println!(
                "Efficiency bars: {:.0}% / {:.0}%",
                outcome.efficiency_bars.gpu1_percent, outcome.efficiency_bars.gpu2_percent
            );

            let gpu2_name = outcome.result.second_gpu();
            for benchmark in &outcome.result.gaming_benchmarks {
                let delta = game_delta(benchmark, &outcome.result.gpu1_name, gpu2_name)
                    .map(|delta| delta.label())
                    .unwrap_or_default();
                println!(
                    "- {} @{}: {} / {} {}",
                    benchmark.game_name, benchmark.resolution, benchmark.gpu1_fps, benchmark.gpu2_fps, delta
                );
            }
            for benchmark in &outcome.result.productivity_benchmarks {
                println!(
                    "- {}: {} / {}",
                    benchmark.workload,
                    format_render_time(benchmark.gpu1_score, benchmark.unit),
                    format_render_time(benchmark.gpu2_score, benchmark.unit)
                );
            }
        }
        SubmissionState::Failed { message } => println!("ERROR: {}", message),
        other => println!("Unexpected state: {:?}", other),
    }
    Ok(())
}
