use std::fs;
use std::path::Path;

use hardware_comparator::comparison::extract_specs;
use hardware_comparator::entities::hardware_query::FormState;
use hardware_comparator::logging;
use hardware_comparator::openai_handler::GptResponsesClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_tracing();

    // Usage: extract_pdf_playground <document.pdf>
    let pdf_path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: extract_pdf_playground <document.pdf>"))?;
    let pdf_bytes = fs::read(&pdf_path)?;
    let filename = Path::new(&pdf_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("document.pdf");

    let client = GptResponsesClient::from_env()?;
    let specs = match extract_specs(&client, filename, &pdf_bytes).await {
        Ok(specs) => specs,
        Err(e) => {
            eprintln!("{}", e.extraction_user_message());
            return Err(e.into());
        }
    };

    println!("=== EXTRACTED SPECS ===");
    println!("{}", serde_json::to_string_pretty(&specs)?);

    let mut form = FormState::default();
    form.apply_extracted_specs(&specs);
    println!("\n=== FORM STATE ===");
    println!("{}", serde_json::to_string_pretty(&form)?);
    Ok(())
}
