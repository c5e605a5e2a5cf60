//! Notification email composition

use std::fmt::Write as _;

use member_core::entities::Member;
use member_core::EmailMessage;

const NOT_PROVIDED: &str = "Not provided";

/// Confirmation sent to the person who submitted the registration
pub fn submitter_confirmation(member: &Member, from: &str, to: &str) -> EmailMessage {
    let rows = detail_rows(member);

    let mut text = String::from("Hi,\n\nYou have successfully registered a new member.\n\nMember Details:\n");
    for (label, value) in &rows {
        let _ = writeln!(text, "- {label}: {value}");
    }
    text.push_str("\nThank you for using the Membership API.\n");

    let html = html_document(
        "Member Registration Successful",
        "<p>Hi,</p>\n  <p>You have successfully registered a new member.</p>\n  <h3>Member Details:</h3>",
        &rows,
        r#"<p style="margin-top: 20px;">Thank you for using the Membership API.</p>"#,
    );

    EmailMessage {
        from: from.to_string(),
        to: to.to_string(),
        subject: format!("Member Registration Successful: {}", member.full_name()),
        text_body: text,
        html_body: html,
    }
}

/// Alert sent to the administrator address when no submitter is known
pub fn admin_alert(member: &Member, admin: &str) -> EmailMessage {
    let rows = detail_rows(member);

    let mut text = String::from("New Member Registration\n\n");
    for (label, value) in &rows {
        let _ = writeln!(text, "{label}: {value}");
    }

    let html = html_document(
        "New Member Registration",
        "",
        &rows,
        r#"<p style="color: #666; font-size: 12px; margin-top: 20px;">This is an automated notification from the Membership API.</p>"#,
    );

    EmailMessage {
        from: admin.to_string(),
        to: admin.to_string(),
        subject: format!("New Member Registration: {}", member.full_name()),
        text_body: text,
        html_body: html,
    }
}

fn detail_rows(member: &Member) -> Vec<(&'static str, String)> {
    vec![
        ("Name", member.full_name()),
        ("Email", member.email.clone()),
        ("Phone", member.phone.clone().unwrap_or_else(|| NOT_PROVIDED.to_string())),
        (
            "Age",
            member.age.map_or_else(|| NOT_PROVIDED.to_string(), |age| age.to_string()),
        ),
        ("Employee", if member.is_employee { "Yes" } else { "No" }.to_string()),
        ("Registration Date", member.created_at.to_rfc3339()),
        ("Member ID", member.id.to_string()),
    ]
}

fn html_document(title: &str, intro: &str, rows: &[(&'static str, String)], footer: &str) -> String {
    const CELL: &str = r#"style="padding: 12px; border: 1px solid #ddd;""#;

    let mut html = format!("<html>\n<head></head>\n<body>\n  <h2>{title}</h2>\n");
    if !intro.is_empty() {
        let _ = writeln!(html, "  {intro}");
    }
    html.push_str("  <table style=\"border-collapse: collapse; border: 1px solid #ddd;\">\n");
    for (i, (label, value)) in rows.iter().enumerate() {
        let shade = if i % 2 == 0 { r#" style="background-color: #f2f2f2;""# } else { "" };
        let _ = writeln!(
            html,
            "    <tr{shade}>\n      <td {CELL}><strong>{label}</strong></td>\n      <td {CELL}>{}</td>\n    </tr>",
            escape_html(value)
        );
    }
    let _ = write!(html, "  </table>\n  {footer}\n</body>\n</html>\n");
    html
}

/// Escape text for an HTML element body or attribute value
fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
