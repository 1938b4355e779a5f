//! Invitation message templates.
//!
//! A message is stored with placeholders when the invitation is created and
//! finalized once its token exists.

/// Replaced with the raw invitation token.
pub const TOKEN_PLACEHOLDER: &str = "{{TOKEN}}";

/// Replaced with the full RSVP link for the invitation.
pub const RSVP_LINK_PLACEHOLDER: &str = "{{RSVP_LINK}}";

/// Build the public RSVP link for a token.
pub fn rsvp_link(base_url: &str, token: &str) -> String {
    format!("{}/rsvp/{token}", base_url.trim_end_matches('/'))
}

/// Fill the first occurrence of each placeholder in `template`.
pub fn render_invite_message(template: &str, token: &str, base_url: &str) -> String {
    template
        .replacen(TOKEN_PLACEHOLDER, token, 1)
        .replacen(RSVP_LINK_PLACEHOLDER, &rsvp_link(base_url, token), 1)
}

/// Default message sent to a guest; contains an RSVP link placeholder.
pub fn default_invite_template(guest_name: &str) -> String {
    format!(
        "Hello {guest_name},\n\n\
         We would be delighted to have you celebrate with us. \
         All the details of the event, and the form to confirm your attendance, \
         are at the link below:\n\n\
         {RSVP_LINK_PLACEHOLDER}\n\n\
         With love,\nThe hosts"
    )
}

/// True while the message still contains an unresolved placeholder.
pub fn has_placeholders(message: &str) -> bool {
    message.contains(TOKEN_PLACEHOLDER) || message.contains(RSVP_LINK_PLACEHOLDER)
}
