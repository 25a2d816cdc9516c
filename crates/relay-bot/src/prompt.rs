//! Prompt construction
//!
//! Composes the final prompt sent to the model, optionally prefixing
//! the user's stored persona.

/// Build the outbound prompt.
///
/// Without a role, the prompt is the user message verbatim. With a
/// role, a fixed preamble states the persona and the literal user
/// message follows unmodified. The wording is a formatting contract:
/// the user message must survive the wrapping byte for byte.
pub fn build(user_message: &str, role: Option<&str>) -> String {
    match role {
        None => user_message.to_string(),
        Some(role) => format!(
            "You are a helpful assistant acting as {role}. \
             Answer the user's message below in that role.\n\n{user_message}"
        ),
    }
}
