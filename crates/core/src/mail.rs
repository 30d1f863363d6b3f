//! Prefilled intro-call emails.

use crate::harvest::EmailList;
use crate::identity::ResolvedIdentity;

const COMPOSE_URL: &str = "https://mail.google.com/mail/";

/// A composed email, ready to be opened in a web mail client.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MailDraft {
    /// The subject line.
    pub subject: String,
    /// The plain-text body.
    pub body: String,
    /// Comma-joined recipients; `None` when no address is known.
    pub recipients: Option<String>,
    /// A web mail compose URL with every field prefilled.
    pub web_link: String,
}

/// Composes an intro call request to the company behind `identity`.
pub fn compose(identity: &ResolvedIdentity, emails: &EmailList) -> MailDraft {
    let subject = format!("Intro call request – {}", identity.combined_label);

    let product_label = identity.product_name.as_deref().unwrap_or("your product");
    let company_label = identity
        .company_name
        .as_deref()
        .or(Some(identity.display_name.as_str()).filter(|s| !s.is_empty()))
        .or(identity.product_name.as_deref())
        .unwrap_or("your company");
    let body = format!(
        "Hi {company_label} team,\n\
         \n\
         I've been reviewing {product_label} and would love to learn more \
         about what you are building at {company_label}.\n\
         \n\
         Would you be open to a short intro call in the coming days? \
         Feel free to suggest a few times that work for you.\n\
         \n\
         Best regards,"
    );

    let recipients = (!emails.is_empty()).then(|| emails.join());
    let web_link = compose_link(&subject, &body, recipients.as_deref());

    MailDraft {
        subject,
        body,
        recipients,
        web_link,
    }
}

/// Builds a web mail compose URL. Every value is percent-encoded; the
/// recipient parameter is left out when `to` is `None`.
pub fn compose_link(subject: &str, body: &str, to: Option<&str>) -> String {
    let mut link = format!(
        "{COMPOSE_URL}?view=cm&fs=1&su={}&body={}",
        urlencoding::encode(subject),
        urlencoding::encode(body),
    );
    if let Some(to) = to {
        link.push_str("&to=");
        link.push_str(&urlencoding::encode(to));
    }
    link
}
