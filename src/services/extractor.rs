use regex::RegexBuilder;

/// Prefix shared by every failure string this service returns.
pub const ERROR_PREFIX: &str = "Error: ";

pub fn extraction_error(language: &str) -> String {
    format!("{ERROR_PREFIX}Could not generate valid {language} code. Please try again.")
}

/// Returns the trimmed body of the first fenced code block in `reply`.
///
/// The opening fence may carry `language` (any case) or no label at all.
/// When nothing matches, the fixed error string naming `language` is
/// returned as a normal value.
pub fn extract_code(reply: &str, language: &str) -> String {
    let pattern = format!(
        r"```(?:{})?\r?\n(.*?)```",
        regex::escape(&language.to_lowercase())
    );

    let re = match RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()
    {
        Ok(re) => re,
        Err(e) => {
            tracing::warn!(error = %e, language, "could not build fence pattern");
            return extraction_error(language);
        }
    };

    match re.captures(reply).and_then(|caps| caps.get(1)) {
        Some(body) => body.as_str().trim().to_string(),
        None => extraction_error(language),
    }
}
