use anyhow::Result;

use crate::models::{Policy, RewriteResult};

use super::{AnthropicClient, SYSTEM_PROMPT, build_rewrite_prompt};

/// The seam between the coordinator and the text-generation service.
///
/// The coordinator is generic over this trait so tests can substitute
/// deterministic stubs for the live client.
pub trait Rewriter {
    /// Ask for a compliance rewrite of one policy against one regulation.
    ///
    /// Returns the proposed replacement text packaged with the policy's id,
    /// title, and original text. Any service failure is an error; there is
    /// no retry and no partial result.
    fn rewrite(
        &self,
        regulation_text: &str,
        policy: &Policy,
    ) -> impl Future<Output = Result<RewriteResult>>;
}

/// Live rewriter backed by the Anthropic API
///
/// Borrows the process-wide client handle; holds no state of its own.
pub struct LlmRewriter<'a> {
    client: &'a AnthropicClient,
}

impl<'a> LlmRewriter<'a> {
    pub fn new(client: &'a AnthropicClient) -> Self {
        Self { client }
    }
}

impl Rewriter for LlmRewriter<'_> {
    async fn rewrite(&self, regulation_text: &str, policy: &Policy) -> Result<RewriteResult> {
        let prompt = build_rewrite_prompt(regulation_text, policy);
        let response = self.client.send_message(SYSTEM_PROMPT, &prompt).await?;

        let proposed = response.trim();
        if proposed.is_empty() {
            anyhow::bail!("model returned an empty rewrite for policy {}", policy.id);
        }

        Ok(RewriteResult::from_policy(policy, proposed))
    }
}
