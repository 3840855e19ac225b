//! Context assembly — builds the ordered message sequence for one turn.
//!
//! The prompt is layered from four sources in a fixed order: identity,
//! long-term summary, short-term history, retrieved documents — then the
//! current user input. Assembly is deterministic and does no truncation;
//! keeping the history bounded is the memory manager's job upstream.

use mnemo_core::identity::Identity;
use mnemo_core::message::Message;
use mnemo_core::retriever::RetrievedDocument;
use std::collections::VecDeque;

use crate::memory::MemoryPolicy;

/// Stateless prompt builder. Holds the memory policy so the long-term
/// block is only emitted when long-term memory is enabled.
pub struct ContextAssembler {
    long_memory_enabled: bool,
}

impl ContextAssembler {
    /// Create an assembler from the session's memory policy.
    pub fn new(policy: &MemoryPolicy) -> Self {
        Self {
            long_memory_enabled: policy.long_memory_enabled,
        }
    }

    /// Build the message sequence for one model call.
    ///
    /// Construction order (fixed):
    /// 1. system: the identity, verbatim
    /// 2. system: labeled long-term memory block (if enabled and non-empty)
    /// 3. system: "Recent Interactions:" header plus one message per
    ///    buffered entry, rendered `Role: content` with the role capitalized
    /// 4. system: labeled, numbered retrieved-documents block (if any)
    /// 5. user: the current input, verbatim
    pub fn build(
        &self,
        user_input: &str,
        identity: &Identity,
        long_summary: &str,
        short_buffer: &VecDeque<Message>,
        retrieved_docs: &[RetrievedDocument],
    ) -> Vec<Message> {
        let mut messages = vec![Message::system(&identity.system_prompt)];

        if self.long_memory_enabled && !long_summary.is_empty() {
            messages.push(Message::system(format!("Long-Term Memory:\n{long_summary}")));
        }

        if !short_buffer.is_empty() {
            messages.push(Message::system("Recent Interactions:"));
            for entry in short_buffer {
                messages.push(Message::system(format!(
                    "{}: {}",
                    entry.role.label(),
                    entry.content
                )));
            }
        }

        if !retrieved_docs.is_empty() {
            let mut block = String::from("Retrieved Documents:\n");
            for (i, doc) in retrieved_docs.iter().enumerate() {
                block.push_str(&format!("{}. [{}] {}\n", i + 1, doc.source, doc.text));
            }
            messages.push(Message::system(block.trim_end()));
        }

        messages.push(Message::user(user_input));
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnemo_core::message::Role;

    fn assembler(long_enabled: bool) -> ContextAssembler {
        let policy = MemoryPolicy {
            long_memory_enabled: long_enabled,
            ..MemoryPolicy::default()
        };
        ContextAssembler::new(&policy)
    }

    fn identity() -> Identity {
        Identity::from_prompt("test", "You are a test agent.")
    }

    #[test]
    fn minimal_context_is_identity_plus_input() {
        let messages = assembler(true).build(
            "hello",
            &identity(),
            "",
            &VecDeque::new(),
            &[],
        );
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], Message::system("You are a test agent."));
        assert_eq!(messages[1], Message::user("hello"));
    }

    #[test]
    fn full_layer_ordering() {
        let buffer: VecDeque<Message> = vec![
            Message::user("earlier question"),
            Message::assistant("earlier answer"),
        ]
        .into();
        let docs = vec![RetrievedDocument {
            text: "Llamas are camelids.".into(),
            source: "llamas.md".into(),
        }];

        let messages = assembler(true).build(
            "current question",
            &identity(),
            "The user is researching llamas.",
            &buffer,
            &docs,
        );

        assert_eq!(messages.len(), 7);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, "You are a test agent.");
        assert_eq!(
            messages[1].content,
            "Long-Term Memory:\nThe user is researching llamas."
        );
        assert_eq!(messages[2].content, "Recent Interactions:");
        assert_eq!(messages[3].content, "User: earlier question");
        assert_eq!(messages[4].content, "Assistant: earlier answer");
        assert!(messages[2..6].iter().all(|m| m.role == Role::System));
        assert_eq!(
            messages[5].content,
            "Retrieved Documents:\n1. [llamas.md] Llamas are camelids."
        );
        assert_eq!(messages[6], Message::user("current question"));
    }

    #[test]
    fn disabled_long_memory_suppresses_the_block() {
        let messages = assembler(false).build(
            "q",
            &identity(),
            "stale summary",
            &VecDeque::new(),
            &[],
        );
        assert_eq!(messages.len(), 2);
        assert!(!messages.iter().any(|m| m.content.contains("Long-Term Memory")));
    }

    #[test]
    fn empty_summary_emits_no_block() {
        let messages = assembler(true).build("q", &identity(), "", &VecDeque::new(), &[]);
        assert!(!messages.iter().any(|m| m.content.contains("Long-Term Memory")));
    }

    #[test]
    fn multiple_documents_are_numbered() {
        let docs = vec![
            RetrievedDocument {
                text: "first".into(),
                source: "a.md".into(),
            },
            RetrievedDocument {
                text: "second".into(),
                source: "b.md".into(),
            },
        ];
        let messages = assembler(true).build("q", &identity(), "", &VecDeque::new(), &docs);
        let block = &messages[messages.len() - 2].content;
        assert!(block.contains("1. [a.md] first"));
        assert!(block.contains("2. [b.md] second"));
        assert!(!block.ends_with('\n'));
    }
}
