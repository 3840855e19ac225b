//! The per-turn orchestrator.
//!
//! A `Session` owns everything one conversation needs: the model transport,
//! the tool registry, the identity, the assembler, and the two-tier memory.
//! Turns are processed strictly one at a time — `process` takes `&mut self`,
//! so a new turn cannot begin until the prior turn's memory update
//! (including any summarization call) has completed.

use crate::context::ContextAssembler;
use crate::memory::{MemoryManager, MemoryPolicy, Turn};
use crate::resolver::{parse_reply, ModelReply};
use mnemo_core::error::{Error, ToolError};
use mnemo_core::identity::Identity;
use mnemo_core::provider::{Provider, ProviderRequest};
use mnemo_core::retriever::{RetrievedDocument, Retriever};
use mnemo_core::tool::ToolRegistry;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Unique identifier for one conversation session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One conversation session: the turn pipeline plus its private state.
pub struct Session {
    id: SessionId,
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    tools: Arc<ToolRegistry>,
    identity: Identity,
    assembler: ContextAssembler,
    memory: MemoryManager,
    retriever: Option<Arc<dyn Retriever>>,
}

impl Session {
    /// Create a new session. Memory starts empty; the identity and policy
    /// are fixed for the session's lifetime.
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
        identity: Identity,
        policy: MemoryPolicy,
    ) -> Self {
        let model = model.into();
        Self {
            id: SessionId::new(),
            assembler: ContextAssembler::new(&policy),
            memory: MemoryManager::new(policy, provider.clone(), model.clone(), temperature),
            provider,
            model,
            temperature,
            tools,
            identity,
            retriever: None,
        }
    }

    /// Attach an optional document retriever.
    pub fn with_retriever(mut self, retriever: Arc<dyn Retriever>) -> Self {
        self.retriever = Some(retriever);
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The current long-term summary (for display/debugging).
    pub fn long_summary(&self) -> &str {
        self.memory.long_summary()
    }

    /// Number of buffered short-term messages.
    pub fn short_term_len(&self) -> usize {
        self.memory.short_term().len()
    }

    /// Process one user input and return the turn's result.
    ///
    /// Pipeline: retrieve → assemble → complete → resolve → dispatch →
    /// record. Transport failure on the main completion fails the turn; an
    /// unknown tool name fails the turn with a distinct error; a tool
    /// handler failure becomes a descriptive string result.
    pub async fn process(&mut self, user_input: &str) -> mnemo_core::Result<String> {
        info!(session_id = %self.id, buffered = self.short_term_len(), "Processing turn");

        let docs = self.retrieve(user_input).await;

        let messages = self.assembler.build(
            user_input,
            &self.identity,
            self.memory.long_summary(),
            self.memory.short_term(),
            &docs,
        );

        let request = ProviderRequest::new(self.model.clone(), messages, self.temperature);
        let response = self.provider.complete(request).await?;

        let result = match parse_reply(&response.content) {
            ModelReply::DirectAnswer(text) => text,
            ModelReply::ToolInvocation { name, argument } => {
                let Some(tool) = self.tools.get(&name) else {
                    warn!(tool = %name, "Model invoked an unregistered tool");
                    return Err(Error::Tool(ToolError::NotFound(name)));
                };
                debug!(tool = %name, has_argument = argument.is_some(), "Dispatching tool call");
                match tool.run(argument.as_deref()).await {
                    Ok(output) => output,
                    Err(e) => {
                        warn!(tool = %name, error = %e, "Tool execution failed");
                        format!("Error: {e}")
                    }
                }
            }
        };

        let turn = Turn {
            user_input: user_input.to_string(),
            result: result.trim().to_string(),
        };
        self.memory.record_turn(&turn).await;

        Ok(turn.result)
    }

    /// Query the retriever, degrading to no documents on failure.
    async fn retrieve(&self, query: &str) -> Vec<RetrievedDocument> {
        let Some(retriever) = &self.retriever else {
            return Vec::new();
        };
        match retriever.retrieve(query).await {
            Ok(docs) => {
                if !docs.is_empty() {
                    debug!(count = docs.len(), "Retrieved documents for context");
                }
                docs
            }
            Err(e) => {
                warn!(error = %e, "Retrieval failed, continuing without documents");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mnemo_core::error::{ProviderError, RetrievalError};
    use mnemo_core::provider::ProviderResponse;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Scripted provider: pops canned responses and records every request.
    struct ScriptedProvider {
        responses: Mutex<VecDeque<Result<String, ProviderError>>>,
        requests: Mutex<Vec<ProviderRequest>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<Result<String, ProviderError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<ProviderRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn complete(
            &self,
            request: ProviderRequest,
        ) -> Result<ProviderResponse, ProviderError> {
            self.requests.lock().unwrap().push(request);
            let next = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("no scripted response left");
            next.map(|content| ProviderResponse {
                content,
                usage: None,
                model: "scripted-model".into(),
            })
        }
    }

    struct UpperTool;

    #[async_trait]
    impl mnemo_core::tool::Tool for UpperTool {
        fn name(&self) -> &str {
            "Upper"
        }
        fn description(&self) -> &str {
            "Uppercases the argument. Usage: return 'Upper(text)'"
        }
        async fn run(&self, argument: Option<&str>) -> Result<String, ToolError> {
            let arg = argument.ok_or_else(|| {
                ToolError::InvalidArguments("Upper requires an argument".into())
            })?;
            Ok(arg.to_uppercase())
        }
    }

    fn registry() -> Arc<ToolRegistry> {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(UpperTool));
        Arc::new(registry)
    }

    fn session(provider: Arc<ScriptedProvider>, max_short: usize) -> Session {
        let tools = registry();
        let identity = Identity::with_tools("test-agent", &tools);
        Session::new(
            provider,
            "test-model",
            0.7,
            tools,
            identity,
            MemoryPolicy {
                max_short_messages: max_short,
                ..MemoryPolicy::default()
            },
        )
    }

    #[tokio::test]
    async fn direct_answer_is_trimmed_and_returned() {
        let provider = ScriptedProvider::new(vec![Ok("  Paris is the capital.  ".into())]);
        let mut session = session(provider, 20);

        let result = session.process("What is the capital of France?").await.unwrap();
        assert_eq!(result, "Paris is the capital.");
        assert_eq!(session.short_term_len(), 2);
    }

    #[tokio::test]
    async fn tool_invocation_result_becomes_the_turn_result() {
        let provider = ScriptedProvider::new(vec![Ok("Upper(hello)".into())]);
        let mut session = session(provider, 20);

        let result = session.process("shout hello").await.unwrap();
        assert_eq!(result, "HELLO");
    }

    #[tokio::test]
    async fn unknown_tool_is_a_distinct_error() {
        let provider = ScriptedProvider::new(vec![Ok("Weather(Tokyo)".into())]);
        let mut session = session(provider, 20);

        let err = session.process("what's the weather").await.unwrap_err();
        assert!(matches!(err, Error::Tool(ToolError::NotFound(name)) if name == "Weather"));
        // No result was produced, so the turn is not recorded.
        assert_eq!(session.short_term_len(), 0);
    }

    #[tokio::test]
    async fn tool_failure_becomes_a_descriptive_string_result() {
        // Zero-argument call to a tool that requires an argument.
        let provider = ScriptedProvider::new(vec![Ok("Upper()".into())]);
        let mut session = session(provider, 20);

        let result = session.process("shout nothing").await.unwrap();
        assert!(result.starts_with("Error: "));
        assert!(result.contains("Upper requires an argument"));
        // The turn still records, with the error string as the result.
        assert_eq!(session.short_term_len(), 2);
    }

    #[tokio::test]
    async fn transport_failure_fails_the_turn() {
        let provider = ScriptedProvider::new(vec![Err(ProviderError::Network(
            "connection refused".into(),
        ))]);
        let mut session = session(provider, 20);

        let err = session.process("hello").await.unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
        assert_eq!(session.short_term_len(), 0);
    }

    #[tokio::test]
    async fn context_carries_identity_then_history_then_input() {
        let provider = ScriptedProvider::new(vec![
            Ok("first answer".into()),
            Ok("second answer".into()),
        ]);
        let mut session = session(provider.clone(), 20);

        session.process("first question").await.unwrap();
        session.process("second question").await.unwrap();

        let requests = provider.requests();
        let second = &requests[1].messages;
        assert!(second[0].content.contains("tool-calling agent"));
        assert_eq!(second[1].content, "Recent Interactions:");
        assert_eq!(second[2].content, "User: first question");
        assert_eq!(second[3].content, "Assistant: first answer");
        assert_eq!(second.last().unwrap().content, "second question");
    }

    #[tokio::test]
    async fn eviction_scenario_issues_one_summarization_call() {
        // Buffer max = 4 messages (2 turns). After 3 turns, exactly turn 1's
        // 2 messages are evicted and one summarization call goes out.
        let provider = ScriptedProvider::new(vec![
            Ok("answer 1".into()),
            Ok("answer 2".into()),
            Ok("answer 3".into()),
            Ok("a summary".into()),
        ]);
        let mut session = session(provider.clone(), 4);

        session.process("question 1").await.unwrap();
        session.process("question 2").await.unwrap();
        session.process("question 3").await.unwrap();

        assert_eq!(session.short_term_len(), 4);
        assert_eq!(session.long_summary(), "a summary");

        let requests = provider.requests();
        // 3 main completions + 1 summarization.
        assert_eq!(requests.len(), 4);
        let summary_prompt = &requests[3].messages[0].content;
        assert!(summary_prompt.contains("<long></long>"));
        assert!(summary_prompt.contains("<user>question 1</user>"));
        assert!(summary_prompt.contains("<assistant>answer 1</assistant>"));
        let short_block = &summary_prompt[summary_prompt.find("<short>").unwrap()..];
        assert!(short_block.contains("question 2"));
        assert!(short_block.contains("answer 3"));
        assert!(!short_block.contains("question 1"));
    }

    #[tokio::test]
    async fn summary_appears_in_later_context() {
        let provider = ScriptedProvider::new(vec![
            Ok("answer 1".into()),
            Ok("answer 2".into()),
            Ok("sum so far".into()), // summarization for evicted turn 1
            Ok("answer 3".into()),
            Ok("sum even further".into()), // summarization for evicted turn 2
        ]);
        let mut session = session(provider.clone(), 2);

        session.process("question 1").await.unwrap();
        session.process("question 2").await.unwrap();
        session.process("question 3").await.unwrap();

        let requests = provider.requests();
        let third_turn = &requests[3].messages;
        assert_eq!(third_turn[1].content, "Long-Term Memory:\nsum so far");
    }

    struct FlakyRetriever;

    #[async_trait]
    impl Retriever for FlakyRetriever {
        async fn retrieve(
            &self,
            _query: &str,
        ) -> Result<Vec<RetrievedDocument>, RetrievalError> {
            Err(RetrievalError::StoreUnavailable("index missing".into()))
        }
    }

    #[tokio::test]
    async fn retrieval_failure_degrades_to_no_documents() {
        let provider = ScriptedProvider::new(vec![Ok("fine".into())]);
        let mut session = session(provider.clone(), 20).with_retriever(Arc::new(FlakyRetriever));

        let result = session.process("anything").await.unwrap();
        assert_eq!(result, "fine");
        let requests = provider.requests();
        assert!(!requests[0]
            .messages
            .iter()
            .any(|m| m.content.contains("Retrieved Documents")));
    }

    struct OneDocRetriever;

    #[async_trait]
    impl Retriever for OneDocRetriever {
        async fn retrieve(
            &self,
            _query: &str,
        ) -> Result<Vec<RetrievedDocument>, RetrievalError> {
            Ok(vec![RetrievedDocument {
                text: "Llamas are camelids.".into(),
                source: "llamas.md".into(),
            }])
        }
    }

    #[tokio::test]
    async fn retrieved_documents_enter_the_context() {
        let provider = ScriptedProvider::new(vec![Ok("ok".into())]);
        let mut session = session(provider.clone(), 20).with_retriever(Arc::new(OneDocRetriever));

        session.process("tell me about llamas").await.unwrap();
        let requests = provider.requests();
        let docs_msg = requests[0]
            .messages
            .iter()
            .find(|m| m.content.starts_with("Retrieved Documents:"))
            .expect("documents block missing");
        assert!(docs_msg.content.contains("1. [llamas.md] Llamas are camelids."));
    }
}
