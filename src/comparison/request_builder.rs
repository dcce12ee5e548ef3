use crate::comparison::contract::{comparison_schema, COMPARISON_SCHEMA_VERSION};
use crate::comparison::schema::SchemaDescriptor;
use crate::entities::error::ComparatorError;
use crate::entities::hardware_query::{ComparisonMode, CpuConfig, HardwareQuery};
use crate::openai_handler::GptRequestConfig;

const STYLE_DIRECTIVE: &str = "Ensure data is realistic and based on general hardware consensus. Style: Technical, concise, objective. No marketing fluff.";
const NO_CPU_DIRECTIVE: &str = "(No CPU bottleneck analysis needed, set that field to 'N/A' or generic advice. Leave specs.cpu null).";

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRequest {
    pub system_prompt: String,
    pub prompt: String,
    pub schema: SchemaDescriptor,
}

impl ComparisonRequest {
    pub fn into_gpt_request(self, display_name: &str) -> GptRequestConfig {
        GptRequestConfig::new(self.system_prompt, self.prompt, COMPARISON_SCHEMA_VERSION, self.schema)
            .with_display_name(display_name)
    }
}

/// Builds the prompt and the response contract for one query. Pure.
pub fn build_comparison_request(query: &HardwareQuery) -> Result<ComparisonRequest, ComparatorError> {
    query.validate()?;

    let preferences = &query.preferences;
    let game_list = if preferences.target_games.is_empty() {
        "popular AAA titles".to_string()
    } else {
        preferences.target_games.join(", ")
    };
    let software_focus = software_directive(&preferences.editing_software, &preferences.export_preset);
    let gaming_line = format!(
        "1. Provide estimated average FPS for 10 distinct games (including {}) at {} with {} settings.",
        game_list, preferences.target_resolution, preferences.quality_preset
    );
    let productivity_line = format!(
        "2. Provide productivity metrics for tasks like 3D Rendering and Video Editing. {}",
        software_focus
    );

    let mut sections = match query.mode {
        ComparisonMode::Single => vec![
            format!("Analyze the performance of the GPU: {}.", query.gpu1),
            String::new(),
            gaming_line,
            productivity_line,
            "3. Provide CURRENT ESTIMATED MARKET PRICE (USD) and TYPICAL POWER CONSUMPTION (TDP) for the GPU.".to_string(),
            "4. Calculate Performance per Watt (FPS/Watts).".to_string(),
            String::new(),
            "IMPORTANT: For all 'gpu2' related fields in the schema (gpu2Name, gpu2Fps, gpu2Score, specs.gpu2, efficiency.gpu2FpsPerWatt), return null or 0.".to_string(),
        ],
        ComparisonMode::Comparison => vec![
            format!(
                "Compare the following two GPUs based on publicly available performance data: {} vs {}.",
                query.gpu1, query.gpu2
            ),
            String::new(),
            gaming_line,
            productivity_line,
            "3. Provide CURRENT ESTIMATED MARKET PRICES (USD) and TDP for both GPUs.".to_string(),
            "4. Calculate Performance per Watt for both.".to_string(),
        ],
    };

    if !preferences.target_games.is_empty() {
        sections.push(format!(
            "CRITICAL: You MUST include specific estimated benchmarks for the following games, using these exact names: {}.",
            game_list
        ));
    }

    sections.push(String::new());
    sections.push(STYLE_DIRECTIVE.to_string());
    sections.push(match query.cpu_for_analysis() {
        Some(cpu) => cpu_directive(cpu),
        None => NO_CPU_DIRECTIVE.to_string(),
    });

    Ok(ComparisonRequest {
        system_prompt: include_str!("prompts/comparison/system.md").to_string(),
        prompt: sections.join("\n"),
        schema: comparison_schema(),
    })
}

fn software_directive(editing_software: &[String], export_preset: &str) -> String {
    if editing_software.is_empty() {
        format!("Include a render benchmark using settings close to: {}.", export_preset)
    } else {
        format!(
            "CRITICAL: You MUST include specific render speed (export time in Seconds) benchmarks for these software: {}. Use the export setting: {}. The unit must be 'Seconds' and lowerIsBetter must be true.",
            editing_software.join(", "),
            export_preset
        )
    }
}

fn ram_description(cpu: &CpuConfig) -> String {
    let amount = if cpu.ram_amount.trim().is_empty() {
        "unknown RAM"
    } else {
        cpu.ram_amount.trim()
    };
    let speed = if cpu.ram_speed.trim().is_empty() {
        "unknown speed"
    } else {
        cpu.ram_speed.trim()
    };
    match cpu.brand() {
        Some(brand) => format!("{} ({}) at {}", amount, brand, speed),
        None => format!("{} at {}", amount, speed),
    }
}

fn cpu_directive(cpu: &CpuConfig) -> String {
    format!(
        "Also analyze if the CPU ({}) with {} will bottleneck the GPU(s). Include CPU price and TDP in the specs section (specs.cpu must be filled).",
        cpu.model.trim(),
        ram_description(cpu)
    )
}
