// Rendering of the contact notification email

use chrono::{DateTime, Utc};

use super::models::ContactSubmission;
use crate::common::validation::{escape_html, is_valid_email};
use crate::kernel::EmailMessage;

const BRAND: &str = "Portfolio";
const ACCENT: &str = "#4f46e5";
const BORDER: &str = "#e5e7eb";
const MUTED: &str = "#6b7280";

pub fn subject(submission: &ContactSubmission) -> String {
    format!(
        "New {} inquiry from {}",
        submission.service, submission.name
    )
}

fn message_or_placeholder(message: &str) -> &str {
    if message.trim().is_empty() {
        "(no message provided)"
    } else {
        message
    }
}

/// HTML body. Every user-supplied value is escaped.
pub fn render_html(submission: &ContactSubmission, ip: &str, sent_at: DateTime<Utc>) -> String {
    let name = escape_html(&submission.name);
    let email = escape_html(&submission.email);
    let service = escape_html(&submission.service.to_string());
    let message = escape_html(message_or_placeholder(&submission.message));
    let reply_href = format!(
        "mailto:{}?subject={}",
        email,
        escape_html(&format!("Re: {}", subject(submission)))
    );

    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>{brand} - New inquiry</title>
  </head>
  <body style="margin:0; padding:24px 14px; background:#f6f9fc; font-family:system-ui, -apple-system, Segoe UI, Roboto;">
    <table role="presentation" width="100%" style="max-width:640px; margin:0 auto; background:#ffffff; border-radius:16px; border:1px solid {border};">
      <tr>
        <td style="padding:24px; background:{accent}; color:#ffffff; border-radius:16px 16px 0 0;">
          <h1 style="margin:0; font-size:22px;">New {service} inquiry from {name}</h1>
          <p style="margin:6px 0 0; font-size:14px;">Someone just contacted you from your website.</p>
        </td>
      </tr>
      <tr>
        <td style="padding:24px;">
          <p style="margin:0 0 6px;"><strong style="color:{muted};">Name</strong> {name}</p>
          <p style="margin:0 0 6px;"><strong style="color:{muted};">Email</strong> <a href="mailto:{email}" style="color:{accent};">{email}</a></p>
          <p style="margin:0 0 18px;"><strong style="color:{muted};">Service</strong> {service}</p>
          <div style="border:1px solid {border}; border-radius:12px; padding:14px; white-space:pre-wrap;">{message}</div>
          <p style="margin:20px 0 0;"><a href="{reply_href}" style="background:{accent}; color:#ffffff; padding:12px 16px; border-radius:10px; text-decoration:none;">Reply to {name}</a></p>
          <p style="margin:18px 0 0; color:{muted}; font-size:12px;">IP: {ip} &middot; Sent {sent}</p>
        </td>
      </tr>
    </table>
  </body>
</html>"#,
        brand = BRAND,
        border = BORDER,
        accent = ACCENT,
        muted = MUTED,
        ip = escape_html(ip),
        sent = sent_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

pub fn render_text(submission: &ContactSubmission, ip: &str, sent_at: DateTime<Utc>) -> String {
    format!(
        "New {service} inquiry from {name}\n\nName: {name}\nEmail: {email}\nService: {service}\n\nMessage:\n{message}\n\nIP: {ip}\nSent: {sent}\n",
        service = submission.service,
        name = submission.name,
        email = submission.email,
        message = message_or_placeholder(&submission.message),
        ip = ip,
        sent = sent_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

/// Full message addressed to the site owner; reply-to only when the address is well formed
pub fn build_message(
    submission: &ContactSubmission,
    ip: &str,
    to: &str,
    from: &str,
    sent_at: DateTime<Utc>,
) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        from: from.to_string(),
        subject: subject(submission),
        html: render_html(submission, ip, sent_at),
        text: render_text(submission, ip, sent_at),
        reply_to: is_valid_email(&submission.email).then(|| submission.email.clone()),
    }
}
