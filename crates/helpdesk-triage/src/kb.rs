use figment::{
    providers::{Format, Toml},
    Figment,
};
use helpdesk_core::config::KnowledgeConfig;
use helpdesk_core::error::{HelpdeskError, Result};
use helpdesk_core::types::TicketPriority;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::record::{TicketTemplate, TopicRecord};

/// The ordered topic list plus the fallback greeting.
///
/// Built once at startup and shared read-only across request handlers —
/// nothing here mutates after construction, so no locking is needed.
///
/// Record order is significant: when two topics score the same keyword
/// count, the earlier record wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBase {
    #[serde(default = "default_greeting")]
    pub greeting: String,
    pub topics: Vec<TopicRecord>,
}

fn default_greeting() -> String {
    "I'm here to help with your healthcare questions. How can I assist you today?".to_string()
}

impl KnowledgeBase {
    /// Build a knowledge base, normalizing the records so the matcher's
    /// contract holds for any input:
    ///   - keyword phrases are trimmed and lowercased (the matcher lowercases
    ///     the message only, so keywords must already be lowercase)
    ///   - empty keyword phrases are dropped ("" is a substring of everything)
    ///   - records left with no keywords are dropped with a warning — they
    ///     could never match
    pub fn new(greeting: String, topics: Vec<TopicRecord>) -> Self {
        let topics = topics
            .into_iter()
            .filter_map(|mut record| {
                record.keywords = record
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                if record.keywords.is_empty() {
                    warn!(topic = %record.topic, "dropping topic with no usable keywords");
                    None
                } else {
                    Some(record)
                }
            })
            .collect();
        Self { greeting, topics }
    }

    /// The built-in topic list the service ships with.
    pub fn builtin() -> Self {
        Self::new(default_greeting(), builtin_topics())
    }

    /// Load an operator-authored knowledge base from a TOML file.
    ///
    /// Expected shape:
    ///
    /// ```toml
    /// greeting = "Hi! How can I help?"      # optional
    ///
    /// [[topics]]
    /// topic = "billing"
    /// keywords = ["invoice", "charge"]
    /// answer = "Billing questions go to ..."
    ///
    /// [topics.escalation]                   # optional per topic
    /// subject = "Billing Issue"
    /// category = "billing"
    /// priority = "medium"
    /// ```
    pub fn from_toml_file(path: &str) -> Result<Self> {
        let raw: KnowledgeBase = Figment::new()
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| HelpdeskError::Knowledge(format!("{path}: {e}")))?;
        let kb = Self::new(raw.greeting, raw.topics);
        info!(path, topics = kb.topics.len(), "knowledge base loaded");
        Ok(kb)
    }

    /// Resolve the knowledge base for a config: file override or built-in.
    pub fn load(config: &KnowledgeConfig) -> Result<Self> {
        match &config.path {
            Some(path) => Self::from_toml_file(path),
            None => Ok(Self::builtin()),
        }
    }
}

/// The five stock topics. Keywords are keyword *phrases* — multi-word
/// entries like "can't log in" match as whole substrings.
fn builtin_topics() -> Vec<TopicRecord> {
    vec![
        TopicRecord {
            topic: "login".to_string(),
            keywords: strings(&[
                "login",
                "password",
                "account access",
                "sign in",
                "can't log in",
                "reset password",
            ]),
            answer: "I understand you're having login issues. I can help create a ticket \
                     for our technical team to assist you."
                .to_string(),
            escalation: Some(TicketTemplate {
                subject: "Login Access Issues".to_string(),
                category: "authentication".to_string(),
                priority: TicketPriority::High,
            }),
        },
        TopicRecord {
            topic: "claims".to_string(),
            keywords: strings(&[
                "claim",
                "denied",
                "rejected",
                "not covered",
                "bill",
                "reimbursement",
            ]),
            answer: "I'm sorry to hear about your claim issue. Let me create a ticket for \
                     our claims department to look into this."
                .to_string(),
            escalation: Some(TicketTemplate {
                subject: "Claim Processing Issue".to_string(),
                category: "claims".to_string(),
                priority: TicketPriority::Medium,
            }),
        },
        TopicRecord {
            topic: "documents".to_string(),
            keywords: strings(&[
                "upload",
                "document",
                "file",
                "attachment",
                "form",
                "paperwork",
            ]),
            answer: "To upload documents, go to 'My Account' > 'Documents' > 'Upload New'. \
                     You can upload files up to 10MB in PDF, JPG, or PNG format."
                .to_string(),
            escalation: None,
        },
        TopicRecord {
            topic: "providers".to_string(),
            keywords: strings(&[
                "doctor",
                "provider",
                "specialist",
                "hospital",
                "clinic",
                "in-network",
            ]),
            answer: "To find in-network providers, you can use our provider directory by \
                     clicking on 'Find a Provider' in the main menu."
                .to_string(),
            escalation: None,
        },
        TopicRecord {
            topic: "technical".to_string(),
            keywords: strings(&[
                "error",
                "problem",
                "not working",
                "issue",
                "bug",
                "glitch",
            ]),
            answer: "I'm sorry you're experiencing technical difficulties. I'll create a \
                     support ticket for our technical team to investigate this issue."
                .to_string(),
            escalation: Some(TicketTemplate {
                subject: "Technical Issue Report".to_string(),
                category: "technical".to_string(),
                priority: TicketPriority::Medium,
            }),
        },
    ]
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
