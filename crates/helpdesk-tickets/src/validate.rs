//! Field validation for ticket submissions.
//!
//! Mirrors what the intake form promises users: a named contact with a
//! reachable address and enough text for an agent to act on. Violations are
//! reported per-field so the caller can surface them next to the input.

use crate::error::{Result, TicketError};
use crate::types::{NewTicket, TicketPatch};

/// Minimum subject length in characters.
pub const MIN_SUBJECT_CHARS: usize = 5;
/// Minimum description length in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Validate a full submission. Returns the first violation found.
pub fn validate_new(ticket: &NewTicket) -> Result<()> {
    validate_name(&ticket.name)?;
    validate_email(&ticket.email)?;
    validate_subject(&ticket.subject)?;
    validate_description(&ticket.description)?;
    validate_category(&ticket.category)?;
    Ok(())
}

/// Validate only the fields a patch actually touches.
pub fn validate_patch(patch: &TicketPatch) -> Result<()> {
    if let Some(ref name) = patch.name {
        validate_name(name)?;
    }
    if let Some(ref email) = patch.email {
        validate_email(email)?;
    }
    if let Some(ref subject) = patch.subject {
        validate_subject(subject)?;
    }
    if let Some(ref description) = patch.description {
        validate_description(description)?;
    }
    if let Some(ref category) = patch.category {
        validate_category(category)?;
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(TicketError::validation("name", "Name is required"));
    }
    Ok(())
}

/// Minimal address shape check: `local@domain.tld`, no whitespace.
///
/// Deliverability is the mail system's problem; this only rejects values
/// that cannot possibly be an address.
fn validate_email(email: &str) -> Result<()> {
    let invalid = || TicketError::validation("email", "Invalid email address");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if host.is_empty() || tld.is_empty() {
        return Err(invalid());
    }
    Ok(())
}

fn validate_subject(subject: &str) -> Result<()> {
    if subject.chars().count() < MIN_SUBJECT_CHARS {
        return Err(TicketError::validation(
            "subject",
            format!("Subject must be at least {MIN_SUBJECT_CHARS} characters"),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(TicketError::validation(
            "description",
            format!("Description must be at least {MIN_DESCRIPTION_CHARS} characters"),
        ));
    }
    Ok(())
}

fn validate_category(category: &str) -> Result<()> {
    if category.trim().is_empty() {
        return Err(TicketError::validation("category", "Category is required"));
    }
    Ok(())
}
