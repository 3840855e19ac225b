//! Retriever trait — optional document retrieval collaborator.
//!
//! The agent treats retrieval as an external seam: a query string goes in, an
//! ordered list of documents comes out. An unconfigured retriever is
//! equivalent to one that always returns an empty list. The embedding and
//! vector-store machinery behind an implementation is out of scope here.

use crate::error::RetrievalError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A document returned by a retriever, ordered most-relevant-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedDocument {
    /// The document text.
    pub text: String,

    /// Human-readable source label (filename, URL, etc.).
    pub source: String,
}

/// The retrieval seam.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Retrieve documents relevant to the query, most relevant first.
    async fn retrieve(
        &self,
        query: &str,
    ) -> std::result::Result<Vec<RetrievedDocument>, RetrievalError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRetriever(Vec<RetrievedDocument>);

    #[async_trait]
    impl Retriever for FixedRetriever {
        async fn retrieve(
            &self,
            _query: &str,
        ) -> std::result::Result<Vec<RetrievedDocument>, RetrievalError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn retriever_returns_documents_in_order() {
        let retriever = FixedRetriever(vec![
            RetrievedDocument {
                text: "first".into(),
                source: "a.md".into(),
            },
            RetrievedDocument {
                text: "second".into(),
                source: "b.md".into(),
            },
        ]);
        let docs = retriever.retrieve("anything").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].text, "first");
        assert_eq!(docs[1].source, "b.md");
    }
}
