//! The chat pipeline: context, knowledge, completion, reply.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::context::{ContextBuilder, ContextOutcome};
use crate::error::ConciergeError;
use crate::flags::FeatureFlags;
use crate::intent::Intent;
use crate::knowledge::{KnowledgeItem, KnowledgeSource, MAX_KNOWLEDGE_ITEMS};
use crate::message::ChatInput;
use crate::prompt::{Prompt, FALLBACK_REPLY};
use crate::provider::CompletionProvider;

/// How a reply was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// The message was empty; the provider was not called.
    Clarification,
    /// The provider answered.
    Completion,
    /// The provider failed; the text is the fallback apology.
    Fallback,
}

/// The pipeline's answer to one chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub kind: ReplyKind,
    /// Number of knowledge items included in the prompt.
    pub knowledge_count: usize,
}

impl Reply {
    fn clarification(text: String) -> Self {
        Self {
            text,
            kind: ReplyKind::Clarification,
            knowledge_count: 0,
        }
    }
}

/// Linear, stateless chat pipeline.
///
/// Each call runs context building, knowledge lookup and a single completion
/// request in sequence. Nothing is retained between calls.
pub struct Concierge {
    context: ContextBuilder,
    knowledge: Arc<dyn KnowledgeSource>,
    provider: Arc<dyn CompletionProvider>,
}

impl Concierge {
    /// Create a pipeline from its three collaborators.
    pub fn new(
        context: ContextBuilder,
        knowledge: Arc<dyn KnowledgeSource>,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        info!(
            provider = provider.name(),
            history_window = context.history_window(),
            "Concierge pipeline initialized"
        );
        Self {
            context,
            knowledge,
            provider,
        }
    }

    /// The completion provider in use.
    pub fn provider(&self) -> &dyn CompletionProvider {
        self.provider.as_ref()
    }

    /// The context builder in use.
    pub fn context(&self) -> &ContextBuilder {
        &self.context
    }

    /// Answer a chat message, resolving relative dates against today (UTC).
    pub async fn respond(&self, input: &ChatInput, flags: &FeatureFlags) -> Reply {
        self.respond_on(input, flags, Utc::now().date_naive()).await
    }

    /// Answer a chat message, resolving relative dates against `today`.
    pub async fn respond_on(&self, input: &ChatInput, flags: &FeatureFlags, today: NaiveDate) -> Reply {
        let prompt = match self.context.build(input) {
            ContextOutcome::Clarify(text) => {
                debug!("Empty message, replying with clarification");
                return Reply::clarification(text);
            }
            ContextOutcome::Ready(prompt) => prompt,
        };

        let knowledge = if flags.knowledge_lookup {
            self.lookup(&prompt, today).await
        } else {
            Vec::new()
        };

        let messages = prompt.to_messages(&knowledge);
        debug!(
            messages = messages.len(),
            knowledge = knowledge.len(),
            "Requesting completion"
        );

        match self.provider.complete(&messages).await {
            Ok(text) => Reply {
                text,
                kind: ReplyKind::Completion,
                knowledge_count: knowledge.len(),
            },
            Err(err) => {
                warn!(provider = self.provider.name(), error = %err, "Completion failed, using fallback");
                Reply {
                    text: FALLBACK_REPLY.to_string(),
                    kind: ReplyKind::Fallback,
                    knowledge_count: knowledge.len(),
                }
            }
        }
    }

    /// Best-effort lookup: any failure yields an empty set.
    async fn lookup(&self, prompt: &Prompt, today: NaiveDate) -> Vec<KnowledgeItem> {
        let intent = Intent::extract(&prompt.user_text, today);
        if intent.is_empty() {
            return Vec::new();
        }

        match self.collect(&intent, today).await {
            Ok(items) => items,
            Err(err) => {
                warn!(error = %err, "Knowledge lookup failed, continuing without knowledge");
                Vec::new()
            }
        }
    }

    async fn collect(&self, intent: &Intent, today: NaiveDate) -> Result<Vec<KnowledgeItem>, ConciergeError> {
        let mut items = Vec::new();
        for mut query in intent.queries(today) {
            let remaining = MAX_KNOWLEDGE_ITEMS - items.len();
            if remaining == 0 {
                break;
            }
            query.limit = query.limit.min(remaining);
            let found = self.knowledge.lookup(&query).await?;
            items.extend(found.into_iter().take(remaining));
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::async_trait;
    use crate::knowledge::{KnowledgeKind, KnowledgeQuery};
    use crate::message::{Membership, Message};
    use crate::prompt::{PromptMessage, PromptRole, CLARIFICATION_REPLY};
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<Vec<PromptMessage>>>,
        fail: bool,
    }

    #[async_trait]
    impl CompletionProvider for Recorder {
        async fn complete(&self, messages: &[PromptMessage]) -> Result<String, ConciergeError> {
            self.calls.lock().await.push(messages.to_vec());
            if self.fail {
                Err(ConciergeError::Timeout)
            } else {
                Ok("Je vous recommande Nobu.".to_string())
            }
        }

        fn name(&self) -> &str {
            "Recorder"
        }
    }

    struct Catalog {
        per_query: usize,
        fail: bool,
        queries: Mutex<Vec<KnowledgeQuery>>,
    }

    impl Catalog {
        fn new(per_query: usize) -> Self {
            Self {
                per_query,
                fail: false,
                queries: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new(0)
            }
        }
    }

    #[async_trait]
    impl KnowledgeSource for Catalog {
        async fn lookup(&self, query: &KnowledgeQuery) -> Result<Vec<KnowledgeItem>, ConciergeError> {
            self.queries.lock().await.push(query.clone());
            if self.fail {
                return Err(ConciergeError::Knowledge("connection refused".to_string()));
            }
            Ok((0..self.per_query)
                .map(|i| KnowledgeItem {
                    kind: query.kind,
                    name: format!("Place {}", i),
                    category: query.category.clone().unwrap_or_default(),
                    zone: None,
                    rating: None,
                    date: None,
                    description: None,
                })
                .collect())
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn concierge(catalog: Arc<Catalog>, provider: Arc<Recorder>) -> Concierge {
        Concierge::new(ContextBuilder::new("persona", 4), catalog, provider)
    }

    #[tokio::test]
    async fn test_empty_message_never_reaches_provider() {
        let provider = Arc::new(Recorder::default());
        let catalog = Arc::new(Catalog::new(3));
        let concierge = concierge(catalog.clone(), provider.clone());

        let reply = concierge
            .respond_on(&ChatInput::new("  "), &FeatureFlags::default(), today())
            .await;

        assert_eq!(reply.kind, ReplyKind::Clarification);
        assert_eq!(reply.text, CLARIFICATION_REPLY);
        assert!(provider.calls.lock().await.is_empty());
        assert!(catalog.queries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_completion_includes_knowledge() {
        let provider = Arc::new(Recorder::default());
        let catalog = Arc::new(Catalog::new(2));
        let concierge = concierge(catalog.clone(), provider.clone());

        let input = ChatInput::new("restaurant japonais").with_membership(Membership::Member);
        let reply = concierge.respond_on(&input, &FeatureFlags::default(), today()).await;

        assert_eq!(reply.kind, ReplyKind::Completion);
        assert_eq!(reply.text, "Je vous recommande Nobu.");
        assert_eq!(reply.knowledge_count, 2);

        let calls = provider.calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][0].role, PromptRole::System);
        assert!(calls[0][0].content.contains("Place 1"));
        assert_eq!(calls[0].last(), Some(&PromptMessage::user("restaurant japonais")));
    }

    #[tokio::test]
    async fn test_knowledge_capped_across_queries() {
        let provider = Arc::new(Recorder::default());
        let catalog = Arc::new(Catalog::new(7));
        let concierge = concierge(catalog.clone(), provider.clone());

        // restaurant, spa and yacht: three queries, 7 results each
        let input = ChatInput::new("restaurant, spa et yacht");
        let reply = concierge.respond_on(&input, &FeatureFlags::default(), today()).await;

        assert_eq!(reply.knowledge_count, MAX_KNOWLEDGE_ITEMS);
        let queries = catalog.queries.lock().await;
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].limit, 10);
        assert_eq!(queries[1].limit, 3);
        assert_eq!(queries[1].kind, KnowledgeKind::Establishment);
    }

    #[tokio::test]
    async fn test_lookup_failure_degrades_to_empty() {
        let provider = Arc::new(Recorder::default());
        let concierge = concierge(Arc::new(Catalog::failing()), provider.clone());

        let reply = concierge
            .respond_on(&ChatInput::new("un beach club"), &FeatureFlags::default(), today())
            .await;

        assert_eq!(reply.kind, ReplyKind::Completion);
        assert_eq!(reply.knowledge_count, 0);
        assert_eq!(provider.calls.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_disabled_by_flag() {
        let provider = Arc::new(Recorder::default());
        let catalog = Arc::new(Catalog::new(2));
        let concierge = concierge(catalog.clone(), provider.clone());

        let reply = concierge
            .respond_on(&ChatInput::new("restaurant"), &FeatureFlags::minimal(), today())
            .await;

        assert_eq!(reply.knowledge_count, 0);
        assert!(catalog.queries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_yields_fallback() {
        let provider = Arc::new(Recorder {
            fail: true,
            ..Default::default()
        });
        let concierge = concierge(Arc::new(Catalog::new(0)), provider);

        let reply = concierge
            .respond_on(&ChatInput::new("bonjour"), &FeatureFlags::default(), today())
            .await;

        assert_eq!(reply.kind, ReplyKind::Fallback);
        assert_eq!(reply.text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_history_window_applied_to_provider_messages() {
        let provider = Arc::new(Recorder::default());
        let concierge = concierge(Arc::new(Catalog::new(0)), provider.clone());

        let history: Vec<Message> = (0..6).map(|i| Message::user(format!("m{}", i))).collect();
        let input = ChatInput::new("et maintenant ?").with_history(history);
        concierge.respond_on(&input, &FeatureFlags::default(), today()).await;

        let calls = provider.calls.lock().await;
        let contents: Vec<&str> = calls[0].iter().skip(1).map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["m2", "m3", "m4", "m5", "et maintenant ?"]);
    }
}
