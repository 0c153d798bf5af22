use tracing::debug;

use crate::kb::KnowledgeBase;
use crate::record::{TicketDraft, TriageResponse};

/// Match a message against the knowledge base and build the response.
///
/// Pure and total: any string input (including empty) produces a response,
/// and nothing is mutated — safe to call from any number of concurrent
/// handlers over a shared `&KnowledgeBase`.
///
/// Scoring: the message is lowercased once, then every record counts how
/// many of its keyword phrases occur as substrings. Each distinct keyword
/// counts at most once no matter how often it repeats in the message. The
/// record with the strictly greatest count wins; on a tie the earlier
/// record keeps the win. A best count of zero falls back to the greeting.
pub fn triage(kb: &KnowledgeBase, message: &str) -> TriageResponse {
    let lowered = message.to_lowercase();

    let mut best = None;
    let mut best_hits = 0usize;

    for record in &kb.topics {
        let hits = record
            .keywords
            .iter()
            .filter(|keyword| lowered.contains(keyword.as_str()))
            .count();
        if hits > best_hits {
            best_hits = hits;
            best = Some(record);
        }
    }

    let Some(record) = best else {
        debug!("no keyword hits, returning greeting");
        return TriageResponse::answer(kb.greeting.clone());
    };

    debug!(topic = %record.topic, hits = best_hits, escalates = record.escalates(), "topic matched");

    match &record.escalation {
        Some(template) => TriageResponse::escalate(
            record.answer.clone(),
            TicketDraft {
                name: None,
                email: None,
                subject: template.subject.clone(),
                category: template.category.clone(),
                description: format!("User reported: \"{}\"", message),
                priority: template.priority,
            },
        ),
        None => TriageResponse::answer(record.answer.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{TicketTemplate, TopicRecord};
    use helpdesk_core::types::TicketPriority;

    fn record(topic: &str, keywords: &[&str], escalates: bool) -> TopicRecord {
        TopicRecord {
            topic: topic.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            answer: format!("answer for {topic}"),
            escalation: escalates.then(|| TicketTemplate {
                subject: format!("{topic} subject"),
                category: topic.to_string(),
                priority: TicketPriority::Medium,
            }),
        }
    }

    fn kb(topics: Vec<TopicRecord>) -> KnowledgeBase {
        KnowledgeBase::new("greeting".to_string(), topics)
    }

    #[test]
    fn no_hits_returns_greeting_without_ticket() {
        let kb = kb(vec![record("a", &["alpha"], true)]);
        let response = triage(&kb, "nothing relevant here");
        assert_eq!(response.message, "greeting");
        assert!(!response.create_ticket);
        assert!(response.ticket_data.is_none());
    }

    #[test]
    fn empty_message_returns_greeting() {
        let response = triage(&KnowledgeBase::builtin(), "");
        assert!(!response.create_ticket);
        assert!(response.ticket_data.is_none());
        assert_eq!(
            response.message,
            KnowledgeBase::builtin().greeting
        );
    }

    #[test]
    fn single_keyword_selects_its_topic() {
        let kb = kb(vec![record("a", &["alpha"], false), record("b", &["beta"], true)]);
        let response = triage(&kb, "tell me about beta please");
        assert_eq!(response.message, "answer for b");
        assert!(response.create_ticket);
    }

    #[test]
    fn tie_keeps_the_earlier_record() {
        let kb = kb(vec![
            record("first", &["alpha"], false),
            record("second", &["beta"], false),
        ]);
        // One hit each — list order decides.
        let response = triage(&kb, "alpha and beta");
        assert_eq!(response.message, "answer for first");
    }

    #[test]
    fn higher_count_beats_earlier_position() {
        let kb = kb(vec![
            record("first", &["alpha"], false),
            record("second", &["beta", "gamma"], false),
        ]);
        let response = triage(&kb, "alpha beta gamma");
        assert_eq!(response.message, "answer for second");
    }

    #[test]
    fn repeated_keyword_counts_once() {
        let kb = kb(vec![
            record("spam", &["ping"], false),
            record("pair", &["foo", "bar"], false),
        ]);
        // "ping" three times is still one distinct hit; "foo" + "bar" is two.
        let response = triage(&kb, "ping ping ping foo bar");
        assert_eq!(response.message, "answer for pair");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let kb = kb(vec![record("a", &["reset password"], true)]);
        let response = triage(&kb, "RESET Password NOW");
        assert!(response.create_ticket);
    }

    #[test]
    fn description_quotes_the_verbatim_message() {
        let kb = kb(vec![record("a", &["alpha"], true)]);
        let message = "ALPHA broke, please help";
        let response = triage(&kb, message);
        let draft = response.ticket_data.unwrap();
        // Original casing preserved, wrapped in double quotes.
        assert_eq!(
            draft.description,
            "User reported: \"ALPHA broke, please help\""
        );
    }

    #[test]
    fn draft_copies_template_fields() {
        let kb = kb(vec![record("outage", &["down"], true)]);
        let draft = triage(&kb, "site is down").ticket_data.unwrap();
        assert_eq!(draft.subject, "outage subject");
        assert_eq!(draft.category, "outage");
        assert_eq!(draft.priority, TicketPriority::Medium);
        assert!(draft.name.is_none());
        assert!(draft.email.is_none());
    }

    #[test]
    fn non_escalating_match_has_no_ticket_data() {
        let kb = kb(vec![record("a", &["alpha"], false)]);
        let response = triage(&kb, "alpha");
        assert!(!response.create_ticket);
        assert!(response.ticket_data.is_none());
    }

    // ── Built-in knowledge base scenarios ────────────────────────────────────

    #[test]
    fn login_trouble_escalates_high_priority() {
        let response = triage(
            &KnowledgeBase::builtin(),
            "I can't log in, password reset isn't working",
        );
        assert!(response.create_ticket);
        let draft = response.ticket_data.unwrap();
        assert_eq!(draft.category, "authentication");
        assert_eq!(draft.priority, TicketPriority::High);
        assert_eq!(draft.subject, "Login Access Issues");
        assert_eq!(
            draft.description,
            "User reported: \"I can't log in, password reset isn't working\""
        );
    }

    #[test]
    fn provider_question_answers_without_ticket() {
        let kb = KnowledgeBase::builtin();
        let response = triage(&kb, "Where can I find a specialist?");
        assert!(!response.create_ticket);
        assert!(response.ticket_data.is_none());
        assert_eq!(response.message, kb.topics[3].answer);
    }

    #[test]
    fn claim_denial_escalates_medium() {
        let response = triage(
            &KnowledgeBase::builtin(),
            "my claim was denied and I got a huge bill",
        );
        let draft = response.ticket_data.unwrap();
        assert_eq!(draft.category, "claims");
        assert_eq!(draft.priority, TicketPriority::Medium);
    }
}
