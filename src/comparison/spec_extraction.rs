use tracing::info;

use crate::comparison::contract::{spec_extraction_schema, SPEC_EXTRACTION_SCHEMA_VERSION};
use crate::entities::error::ComparatorError;
use crate::entities::hardware_query::ExtractedSpecs;
use crate::openai_handler::{GptRequestConfig, LlmInvoker, PdfAttachment};

const PDF_MAGIC: &[u8] = b"%PDF-";

pub fn build_spec_extraction_request(
    filename: &str,
    pdf_bytes: &[u8],
) -> Result<GptRequestConfig, ComparatorError> {
    if !pdf_bytes.starts_with(PDF_MAGIC) {
        return Err(ComparatorError::validation("Please upload a PDF file."));
    }
    Ok(GptRequestConfig::new(
        include_str!("prompts/spec_extraction/system.md"),
        include_str!("prompts/spec_extraction/user.md"),
        SPEC_EXTRACTION_SCHEMA_VERSION,
        spec_extraction_schema(),
    )
    .with_display_name("Spec Extraction / PDF")
    .with_attachment(PdfAttachment::from_bytes(filename, pdf_bytes)))
}

/// Reads GPU, CPU and RAM details out of a PDF. Missing details come back as
/// empty strings. Failures are shown with `extraction_user_message`.
pub async fn extract_specs(
    invoker: &dyn LlmInvoker,
    filename: &str,
    pdf_bytes: &[u8],
) -> Result<ExtractedSpecs, ComparatorError> {
    let request = build_spec_extraction_request(filename, pdf_bytes)?;
    let specs: ExtractedSpecs = request.execute(invoker).await?;
    info!(
        target: "comparison",
        "request_id: {} specs_extracted gpu1={:?} cpu={:?}",
        request.request_id,
        specs.gpu1,
        specs.cpu_model
    );
    Ok(specs)
}
