pub mod kb;
pub mod matcher;
pub mod record;

pub use kb::KnowledgeBase;
pub use matcher::triage;
pub use record::{TicketDraft, TicketTemplate, TopicRecord, TriageResponse};
