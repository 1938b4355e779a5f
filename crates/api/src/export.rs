//! CSV export of the invitation dashboard.
//!
//! The file opens cleanly in spreadsheet tools: UTF-8 BOM, every field
//! double-quoted, and no embedded line breaks.

use rsvp_db::models::invitation::InvitationWithResponse;
use rsvp_db::models::response::Response;

/// Byte-order mark so spreadsheet tools detect UTF-8.
pub const UTF8_BOM: &str = "\u{FEFF}";

/// Suggested download name for the export.
pub const EXPORT_FILENAME: &str = "rsvp-list.csv";

/// Placeholder for values an invitation does not have yet.
const MISSING: &str = "-";

const HEADERS: [&str; 11] = [
    "Name",
    "Phone",
    "Sent",
    "Opened",
    "Responded",
    "Attending",
    "Plus One",
    "Kids",
    "Menu",
    "Companion Menu",
    "Comment",
];

/// Render the dashboard rows as a CSV document, BOM and header included.
pub fn render_csv(rows: &[InvitationWithResponse]) -> String {
    let mut out = String::from(UTF8_BOM);
    push_record(&mut out, HEADERS.iter().map(|h| h.to_string()));
    for row in rows {
        push_record(&mut out, record(row));
    }
    out
}

fn record(row: &InvitationWithResponse) -> Vec<String> {
    let inv = &row.invitation;
    let mut fields = vec![
        inv.guest_name.clone(),
        inv.phone.clone(),
        yes_no(inv.sent_at.is_some()).to_string(),
        yes_no(inv.opened_at.is_some()).to_string(),
        yes_no(inv.responded_at.is_some()).to_string(),
    ];
    match &row.response {
        Some(response) => fields.extend(response_fields(response)),
        None => fields.extend(vec![MISSING.to_string(); 6]),
    }
    fields
}

fn response_fields(response: &Response) -> [String; 6] {
    [
        yes_no(response.attending).to_string(),
        yes_no(response.plus_one).to_string(),
        response.kids_count.max(0).to_string(),
        or_missing(&response.menu_preference),
        or_missing(&response.companion_menu_preference),
        or_missing(&response.comment),
    ]
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn or_missing(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

fn push_record(out: &mut String, fields: impl IntoIterator<Item = String>) {
    let line = fields
        .into_iter()
        .map(|f| quote(&f))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push('\n');
}

/// Quote a field, doubling embedded quotes and flattening line breaks.
fn quote(field: &str) -> String {
    let escaped = field
        .replace('"', "\"\"")
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ");
    format!("\"{escaped}\"")
}
