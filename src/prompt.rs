//! Instruction text sent to the completion endpoint.

const INSTRUCTIONS: [&str; 7] = [
    "Maintain the exact same meaning and core information",
    "Adjust ONLY the writing style, formality level, and level of detail to match the tone description",
    "Keep the same approximate length as the original text unless the tone specifically requires expansion or conciseness",
    "Ensure the output sounds natural and coherent",
    "Do not add any new information or change the factual content",
    "Return only the rewritten text, without any additional commentary or explanation",
    "If the tone description is unclear or contradictory, use your best judgement to interpret it in a way that enhances the text while staying true to the original meaning",
];

/// Heading that introduces earlier rewrites of the same text.
pub const PREVIOUS_ATTEMPTS_HEADING: &str =
    "Previous versions that were generated (provide a materially different interpretation):";

/// Closing request appended whenever earlier rewrites are listed.
pub const FRESH_TAKE_INSTRUCTION: &str =
    "Please provide a fresh take on the tone while maintaining the original meaning.";

/// Builds the single user message for a tone rewrite.
///
/// The original text is quoted verbatim and never truncated; callers are
/// responsible for enforcing the length limit. Earlier attempts are listed
/// 1-indexed in the order given.
#[must_use]
pub fn build_prompt(text: &str, tone_description: &str, previous_attempts: &[String]) -> String {
    let mut prompt = String::new();
    prompt.push_str("Please rewrite the following text to match this specific tone and style: ");
    prompt.push_str(tone_description);
    prompt.push_str("\n\nOriginal text: \"");
    prompt.push_str(text);
    prompt.push_str("\"\n\nIMPORTANT INSTRUCTIONS:\n");

    for instruction in INSTRUCTIONS {
        prompt.push_str("- ");
        prompt.push_str(instruction);
        prompt.push('\n');
    }

    if previous_attempts.is_empty() {
        return prompt;
    }

    prompt.push('\n');
    prompt.push_str(PREVIOUS_ATTEMPTS_HEADING);
    prompt.push('\n');
    for (index, attempt) in previous_attempts.iter().enumerate() {
        prompt.push_str(format!("{}. \"{attempt}\"\n", index + 1).as_str());
    }
    prompt.push('\n');
    prompt.push_str(FRESH_TAKE_INSTRUCTION);
    prompt.push('\n');

    prompt
}
