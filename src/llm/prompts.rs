use crate::models::Policy;

/// System prompt for the rewrite request (non-negotiable constraints)
pub const SYSTEM_PROMPT: &str = r#"You are revising internal policy documents against a regulation. You MUST follow these rules:

1. Return only the rewritten policy text. No preamble, no commentary, no surrounding quotation marks.
2. If the policy already complies with the regulation, return the policy text unchanged.
3. Do not invent obligations the regulation does not impose.
4. Preserve the policy's voice and level of detail; change only what compliance requires."#;

/// Build the user prompt for a single regulation/policy pair
pub fn build_rewrite_prompt(regulation_text: &str, policy: &Policy) -> String {
    let mut prompt = String::new();

    prompt.push_str("# Regulation\n");
    prompt.push_str(regulation_text);
    prompt.push_str("\n\n");

    prompt.push_str(&format!("# Current policy: {} ({})\n", policy.title, policy.id));
    prompt.push_str(&format!("\"{}\"\n\n", policy.text));

    prompt.push_str("## Instructions\n");
    prompt.push_str("Rewrite the above policy so that it clearly complies with the regulation.\n");
    prompt.push_str("If no change is needed, keep the policy as-is.\n");
    prompt.push_str("Return only the rewritten policy text.\n");

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_both_texts() {
        let policy = Policy::new(
            "pol-privacy-01",
            "Biometric Data Collection",
            "We collect biometric information for attendance verification.",
        );
        let prompt = build_rewrite_prompt("Organizations must provide explicit notice.", &policy);

        assert!(prompt.contains("Organizations must provide explicit notice."));
        assert!(prompt.contains("We collect biometric information"));
        assert!(prompt.contains("pol-privacy-01"));
        assert!(prompt.contains("Return only the rewritten policy text"));
    }

    #[test]
    fn test_system_prompt_forbids_commentary() {
        assert!(SYSTEM_PROMPT.contains("Return only the rewritten policy text"));
        assert!(SYSTEM_PROMPT.contains("return the policy text unchanged"));
    }
}
