use crate::message::ChatRequest;

use super::extractor::{ERROR_PREFIX, extract_code};
use super::llm_client::CodeGenerator;

pub fn build_directive(message: &str, language: &str) -> String {
    format!("Provide complete, runnable {language} code for: {message}. Only return the code block.")
}

/// Runs one request through the generator and the extractor.
///
/// Never fails: generator errors become `"Error: <message>"`, a reply with no
/// usable fence becomes the extractor's fixed error string.
pub async fn generate_reply(generator: &dyn CodeGenerator, request: &ChatRequest) -> String {
    let directive = build_directive(&request.message, &request.language);

    match generator.generate(&directive).await {
        Ok(reply) => {
            let code = extract_code(&reply, &request.language);
            if code.starts_with(ERROR_PREFIX) {
                tracing::warn!(language = %request.language, "no fenced code block in reply");
            }
            code
        }
        Err(e) => {
            tracing::error!(error = %e, "code generation failed");
            format!("{ERROR_PREFIX}{e}")
        }
    }
}
