//! Message content for photo strip deliveries

use askama::Template;
use chrono::NaiveDate;

/// Subject line of the photo strip email
pub const EMAIL_SUBJECT: &str = "Your Photo Strip from Billy's Ayr Lanes! 📸";

/// Text sent alongside the photo strip MMS
pub const SMS_BODY: &str = "Thanks for visiting Billy's Ayr Lanes Photo Booth! 📸 Your photo strip is attached. Come back soon!";

/// Normalize a user-entered phone number to E.164-ish form
///
/// Non-digits are dropped. A bare 10-digit number is assumed to be North
/// American and gets the `1` country code. Longer inputs are passed through
/// with only the leading `+`.
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 10 && !digits.starts_with('1') {
        format!("+1{}", digits)
    } else {
        format!("+{}", digits)
    }
}

/// Extract the base64 payload from a data URI or raw base64 string
pub fn photo_payload(photo_strip: &str) -> &str {
    match photo_strip.split_once(',') {
        Some((_, payload)) => payload,
        None => photo_strip,
    }
}

/// File name of the attached photo strip
pub fn attachment_filename(session_id: &str) -> String {
    format!("photobooth-{}.jpg", session_id)
}

/// HTML body of the photo strip email
#[derive(Template)]
#[template(path = "email/photo_strip.html")]
struct PhotoStripEmailHtml<'a> {
    session_id: &'a str,
    date: String,
}

/// Render the branded HTML body of the photo strip email
///
/// The session id is HTML-escaped by the template.
pub fn render_email_html(session_id: &str, date: NaiveDate) -> Result<String, askama::Error> {
    PhotoStripEmailHtml {
        session_id,
        date: date.format("%m/%d/%Y").to_string(),
    }
    .render()
}
