// Verify the JSON contract the embedding HTTP layer relies on.
// Clients expect `{ message, create_ticket, ticket_data | null }` with
// `name`/`email` omitted from the draft until the user supplies them.

use helpdesk_core::types::TicketPriority;
use helpdesk_triage::{triage, KnowledgeBase, TicketDraft, TriageResponse};

#[test]
fn greeting_serializes_ticket_data_as_null() {
    let response = triage(&KnowledgeBase::builtin(), "good morning");
    let json = serde_json::to_string(&response).unwrap();

    assert!(json.contains(r#""create_ticket":false"#));
    // The key must be present and explicitly null, not omitted.
    assert!(json.contains(r#""ticket_data":null"#));
}

#[test]
fn escalation_serializes_full_draft() {
    let response = triage(&KnowledgeBase::builtin(), "login error");
    let json = serde_json::to_string(&response).unwrap();

    assert!(json.contains(r#""create_ticket":true"#));
    assert!(json.contains(r#""subject":"Login Access Issues""#));
    assert!(json.contains(r#""category":"authentication""#));
    assert!(json.contains(r#""priority":"high""#));
    // No contact details yet — the keys must be absent entirely.
    assert!(!json.contains(r#""name""#));
    assert!(!json.contains(r#""email""#));
}

#[test]
fn draft_with_contact_details_includes_them() {
    let draft = TicketDraft {
        name: Some("Ada".to_string()),
        email: Some("ada@example.com".to_string()),
        subject: "Subject".to_string(),
        category: "technical".to_string(),
        description: "User reported: \"x\"".to_string(),
        priority: TicketPriority::Low,
    };
    let json = serde_json::to_string(&draft).unwrap();

    assert!(json.contains(r#""name":"Ada""#));
    assert!(json.contains(r#""email":"ada@example.com""#));
    assert!(json.contains(r#""priority":"low""#));
}

#[test]
fn response_round_trips_through_json() {
    let original = triage(
        &KnowledgeBase::builtin(),
        "I can't log in, password reset isn't working",
    );
    let json = serde_json::to_string(&original).unwrap();
    let parsed: TriageResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn description_embeds_quotes_safely() {
    // A message that itself contains double quotes must survive JSON encoding.
    let response = triage(&KnowledgeBase::builtin(), r#"the "login" page errors"#);
    let draft = response.ticket_data.unwrap();
    assert_eq!(
        draft.description,
        r#"User reported: "the "login" page errors""#
    );
    let json = serde_json::to_string(&draft).unwrap();
    let parsed: TicketDraft = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.description, draft.description);
}
