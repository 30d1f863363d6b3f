//! Collects contact email addresses from arbitrarily nested data.

use std::collections::HashSet;

use regex::Regex;
use serde_json::{Map, Value};

use crate::record::AnalysisRecord;

const EMAIL_PATTERN: &str = r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}";

/// An ordered list of unique email addresses.
///
/// Uniqueness is case-insensitive; the first-seen spelling and position
/// win.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmailList {
    emails: Vec<String>,
    seen: HashSet<String>,
}

impl EmailList {
    /// Appends `email` unless an address equal to it ignoring case is
    /// already present. Returns whether it was added.
    pub fn insert(&mut self, email: &str) -> bool {
        let email = email.trim();
        if email.is_empty() || !self.seen.insert(email.to_lowercase()) {
            return false;
        }
        self.emails.push(email.to_owned());
        true
    }

    /// Returns the addresses in discovery order.
    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.emails
    }

    /// Returns the number of addresses.
    #[inline]
    pub fn len(&self) -> usize {
        self.emails.len()
    }

    /// Returns `true` if no address has been found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    /// Iterates over the addresses in discovery order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.emails.iter().map(String::as_str)
    }

    /// Joins the addresses with commas, as used in a recipient field.
    #[inline]
    pub fn join(&self) -> String {
        self.emails.join(",")
    }
}

/// The shapes a value can take, as far as harvesting is concerned.
enum Shape<'a> {
    Text(&'a str),
    Sequence(&'a [Value]),
    Mapping(&'a Map<String, Value>),
    Scalar,
}

impl<'a> Shape<'a> {
    #[inline]
    fn of(value: &'a Value) -> Self {
        match value {
            Value::String(s) => Shape::Text(s),
            Value::Array(items) => Shape::Sequence(items),
            Value::Object(map) => Shape::Mapping(map),
            Value::Null | Value::Bool(_) | Value::Number(_) => Shape::Scalar,
        }
    }
}

/// Scans values for email-like strings.
#[derive(Clone, Debug)]
pub struct EmailHarvester {
    pattern: Regex,
}

impl Default for EmailHarvester {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailHarvester {
    /// Creates a harvester matching `local@domain.tld` addresses, where
    /// the domain has at least one dot and the TLD at least two letters.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(EMAIL_PATTERN).expect("valid email pattern"),
        }
    }

    /// Harvests from `sources` in order.
    pub fn harvest<'a, I>(&self, sources: I) -> EmailList
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut list = EmailList::default();
        for source in sources {
            self.visit(source, &mut list);
        }
        list
    }

    /// Harvests the contact fields of an analysis record.
    ///
    /// Sources are visited in a fixed order so that the result is stable:
    /// founder emails, contact email, founder contacts, the overview's
    /// founders, the whole overview, then the public data.
    pub fn harvest_record(&self, record: &AnalysisRecord) -> EmailList {
        let public_data = record.public_data();
        let sources = [
            record.metadata_field("founder_emails"),
            record.metadata_field("contact_email"),
            record.metadata_field("founder_contacts"),
            record.overview_field("founders"),
            record.company_overview(),
            Some(&*public_data),
        ];
        self.harvest(sources.into_iter().flatten())
    }

    fn visit(&self, value: &Value, list: &mut EmailList) {
        match Shape::of(value) {
            Shape::Text(text) => {
                for m in self.pattern.find_iter(text) {
                    list.insert(m.as_str());
                }
            }
            Shape::Sequence(items) => {
                for item in items {
                    self.visit(item, list);
                }
            }
            Shape::Mapping(map) => {
                for item in map.values() {
                    self.visit(item, list);
                }
            }
            Shape::Scalar => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn harvest_record(value: Value) -> Vec<String> {
        EmailHarvester::new()
            .harvest_record(&AnalysisRecord::from_value(value))
            .as_slice()
            .to_vec()
    }

    #[test]
    fn test_case_insensitive_dedup() {
        let emails = harvest_record(json!({
            "metadata": {
                "founder_emails": "a@x.com",
                "contact_email": "A@X.com"
            }
        }));
        assert_eq!(emails, ["a@x.com"]);
    }

    #[test]
    fn test_source_order_and_first_casing() {
        let emails = harvest_record(json!({
            "public_data": "{\"press\": \"press@acme.io\", \"ceo\": \"Jane@Acme.io\"}",
            "memo": {
                "draft_v1": {
                    "company_overview": {
                        "name": "Acme",
                        "founders": [
                            { "name": "Jane", "email": "jane@acme.io" },
                            { "name": "Bob", "contact": "Reach bob@acme.io or bob@acme.io" }
                        ],
                        "website": "hello@acme.io"
                    }
                }
            },
            "metadata": {
                "founder_contacts": [["ops@acme.io"], { "x": null, "y": 3 }],
                "contact_email": "info@acme.io",
                "founder_emails": ["JANE@acme.io", "cto@acme.io"]
            }
        }));
        assert_eq!(
            emails,
            [
                "JANE@acme.io",
                "cto@acme.io",
                "info@acme.io",
                "ops@acme.io",
                "bob@acme.io",
                "hello@acme.io",
                "press@acme.io",
            ]
        );
    }

    #[test]
    fn test_multiple_matches_in_one_string() {
        let harvester = EmailHarvester::new();
        let value = json!("Contact a.b+c@sub.example.co.uk, x@y.io; not@valid");
        let list = harvester.harvest([&value]);
        assert_eq!(list.as_slice(), ["a.b+c@sub.example.co.uk", "x@y.io"]);
        assert_eq!(list.join(), "a.b+c@sub.example.co.uk,x@y.io");
    }

    #[test]
    fn test_malformed_input_yields_nothing() {
        assert!(harvest_record(json!(null)).is_empty());
        assert!(harvest_record(json!({ "metadata": "oops" })).is_empty());
        assert!(harvest_record(json!({
            "metadata": { "founder_emails": 12, "contact_email": true },
            "public_data": "{broken"
        }))
        .is_empty());
    }

    #[test]
    fn test_no_duplicates_ignoring_case() {
        let harvester = EmailHarvester::new();
        let value = json!([
            "A@b.co", "a@B.co", ["a@b.CO", { "k": "c@d.org" }], "C@D.ORG"
        ]);
        let list = harvester.harvest([&value]);
        assert_eq!(list.as_slice(), ["A@b.co", "c@d.org"]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().collect::<Vec<_>>(), ["A@b.co", "c@d.org"]);
    }

    #[test]
    fn test_public_data_array() {
        let emails = harvest_record(json!({
            "public_data": "[\"ceo@acme.io\", {\"press\": \"press@acme.io\"}]"
        }));
        assert_eq!(emails, ["ceo@acme.io", "press@acme.io"]);

        let emails = harvest_record(json!({
            "public_data": ["ops@acme.io", { "team": ["dev@acme.io"] }]
        }));
        assert_eq!(emails, ["ops@acme.io", "dev@acme.io"]);
    }
}
