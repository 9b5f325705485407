/// Prompt the editor sends for a code snippet: asks the model to simulate
/// execution and answer with a single JSON object matching the
/// [`Diagnostic`](crate::Diagnostic) field contract.
pub fn analysis_prompt(code: &str) -> String {
    format!(
        r#"You are an assistant that helps beginners understand code execution and find common mistakes.

Analyze this code and respond ONLY with valid JSON (no markdown, no extra text) in this exact format:
{{
  "simulated_output": "what the code would output when run",
  "errors": "any compilation or runtime errors, or empty string if none",
  "diagnostic": "simple English explanation of what the code does and any issues found (mention line numbers)"
}}

CODE_START
{code}
CODE_END

Remember: respond with ONLY the JSON object, nothing else."#
    )
}
