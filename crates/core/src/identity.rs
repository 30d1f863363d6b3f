//! Derives canonical company, product and display names from an
//! analysis record.

use serde_json::Value;

use crate::record::AnalysisRecord;

/// Used when nothing better is known about the company.
pub const FALLBACK_DISPLAY_NAME: &str = "the company";

/// Limits a product name candidate must stay within.
///
/// Values beyond these limits are most likely prose that was captured by
/// accident, not a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NameLimits {
    /// Maximum length in characters, after whitespace is collapsed.
    pub max_chars: usize,
    /// Maximum number of space-separated words.
    pub max_words: usize,
}

impl Default for NameLimits {
    fn default() -> Self {
        Self {
            max_chars: 60,
            max_words: 6,
        }
    }
}

/// Normalizes a name candidate.
///
/// Whitespace is trimmed and collapsed to single spaces. Returns `None`
/// if nothing is left, or if the result exceeds `limits`.
pub fn sanitize_name(candidate: &str, limits: &NameLimits) -> Option<String> {
    let words: Vec<&str> = candidate.split_whitespace().collect();
    if words.is_empty() || words.len() > limits.max_words {
        return None;
    }
    let normalized = words.join(" ");
    if normalized.chars().count() > limits.max_chars {
        return None;
    }
    Some(normalized)
}

/// Combines a company and a product name for headings.
///
/// The product is left out when it is the same as the company, or when
/// one of them contains the other (ignoring case).
pub fn headline_name(company: Option<&str>, product: Option<&str>) -> String {
    let company = company.unwrap_or_default().trim();
    let product = product.unwrap_or_default().trim();

    if product.is_empty() {
        return company.to_owned();
    }
    if company.is_empty() {
        return product.to_owned();
    }

    let normalized_company = company.to_lowercase();
    let normalized_product = product.to_lowercase();
    if normalized_company.contains(&normalized_product)
        || normalized_product.contains(&normalized_company)
    {
        return company.to_owned();
    }

    format!("{company} — {product}")
}

/// Names derived from an [`AnalysisRecord`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedIdentity {
    /// The company name, if any source provides one.
    pub company_name: Option<String>,
    /// The sanitized product name, if any candidate passed sanitization.
    pub product_name: Option<String>,
    /// Never empty; [`FALLBACK_DISPLAY_NAME`] at worst.
    pub display_name: String,
    /// Whether the product name adds information over the company name.
    pub show_product: bool,
    /// The display label, annotated with the product when
    /// `show_product` is set.
    pub combined_label: String,
}

impl ResolvedIdentity {
    /// The company name, falling back to the display name.
    #[inline]
    pub fn company_or_display(&self) -> &str {
        self.company_name.as_deref().unwrap_or(&self.display_name)
    }

    /// See [`headline_name`].
    #[inline]
    pub fn headline(&self) -> String {
        let headline = headline_name(
            self.company_name.as_deref(),
            self.product_name.as_deref(),
        );
        if headline.is_empty() {
            self.display_name.clone()
        } else {
            headline
        }
    }
}

/// Resolves [`ResolvedIdentity`] values.
#[derive(Clone, Debug, Default)]
pub struct IdentityResolver {
    limits: NameLimits,
}

impl IdentityResolver {
    /// Creates a resolver with the default [`NameLimits`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver with custom [`NameLimits`].
    #[inline]
    pub fn with_limits(limits: NameLimits) -> Self {
        Self { limits }
    }

    /// Resolves the identity of `record`. Never fails; missing or
    /// malformed fields fall through to the next source.
    pub fn resolve(&self, record: &AnalysisRecord) -> ResolvedIdentity {
        let bag = |key: &str| {
            record
                .metadata_field("display_names")
                .and_then(|names| names.get(key))
        };

        let company_name = [
            bag("company"),
            record.metadata_field("legal_name"),
            record.metadata_field("company_name"),
            record.overview_field("name"),
        ]
        .into_iter()
        .find_map(non_empty_text)
        .map(ToOwned::to_owned);

        let product_name = [bag("product"), record.metadata_field("product_name")]
            .into_iter()
            .filter_map(non_empty_text)
            .find_map(|candidate| sanitize_name(candidate, &self.limits))
            .or_else(|| {
                non_empty_text(record.overview_field("technology"))
                    .and_then(|tech| sanitize_name(tech, &self.limits))
            });

        let display_name = [bag("display"), record.metadata_field("display_name")]
            .into_iter()
            .find_map(non_empty_text)
            .map(ToOwned::to_owned)
            .or_else(|| company_name.clone())
            .or_else(|| product_name.clone())
            .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_owned());

        let show_product = match (&product_name, &company_name) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(product), Some(company)) => {
                product.to_lowercase() != company.to_lowercase()
            }
        };

        let base = company_name.as_deref().unwrap_or(&display_name);
        let combined_label = match (&product_name, show_product) {
            (Some(product), true) => format!("{base} (Product: {product})"),
            _ => base.to_owned(),
        };

        ResolvedIdentity {
            company_name,
            product_name,
            display_name,
            show_product,
            combined_label,
        }
    }
}

#[inline]
fn non_empty_text(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn resolve(value: Value) -> ResolvedIdentity {
        IdentityResolver::new().resolve(&AnalysisRecord::from_value(value))
    }

    #[test]
    fn test_empty_record() {
        let identity = resolve(json!({}));
        assert_eq!(identity.company_name, None);
        assert_eq!(identity.product_name, None);
        assert_eq!(identity.display_name, "the company");
        assert_eq!(identity.combined_label, "the company");
        assert!(!identity.show_product);

        let identity = resolve(Value::Null);
        assert_eq!(identity.display_name, "the company");
    }

    #[test]
    fn test_sanitize_name() {
        let limits = NameLimits::default();
        assert_eq!(
            sanitize_name("  Acme \t  Robotics ", &limits).as_deref(),
            Some("Acme Robotics")
        );
        assert_eq!(
            sanitize_name("the quick brown fox jumps over lazily", &limits),
            None
        );
        assert_eq!(sanitize_name("   ", &limits), None);
        assert_eq!(sanitize_name(&"x".repeat(61), &limits), None);
        assert!(sanitize_name(&"x".repeat(60), &limits).is_some());

        let strict = NameLimits {
            max_chars: 10,
            max_words: 1,
        };
        assert_eq!(sanitize_name("Acme Robotics", &strict), None);
        assert_eq!(sanitize_name("Acme", &strict).as_deref(), Some("Acme"));
    }

    #[test]
    fn test_company_precedence() {
        let identity = resolve(json!({
            "metadata": {
                "display_names": { "company": "  " },
                "legal_name": "Acme Holdings Inc.",
                "company_name": "Acme"
            },
            "memo": { "draft_v1": { "company_overview": { "name": "ACME" } } }
        }));
        assert_eq!(identity.company_name.as_deref(), Some("Acme Holdings Inc."));

        let identity = resolve(json!({
            "metadata": { "company_name": 7 },
            "memo": { "draft_v1": { "company_overview": { "name": " Acme " } } }
        }));
        assert_eq!(identity.company_name.as_deref(), Some("Acme"));
        assert_eq!(identity.display_name, "Acme");
    }

    #[test]
    fn test_product_falls_back_to_technology() {
        let identity = resolve(json!({
            "metadata": {
                "company_name": "Acme",
                "product_name": "A platform that lets teams automate every single workflow"
            },
            "memo": {
                "draft_v1": {
                    "company_overview": { "technology": "RoboArm" }
                }
            }
        }));
        assert_eq!(identity.product_name.as_deref(), Some("RoboArm"));
        assert!(identity.show_product);
        assert_eq!(identity.combined_label, "Acme (Product: RoboArm)");
    }

    #[test]
    fn test_same_product_and_company() {
        let identity = resolve(json!({
            "metadata": { "company_name": "Acme", "product_name": "acme" }
        }));
        assert!(!identity.show_product);
        assert_eq!(identity.combined_label, "Acme");
    }

    #[test]
    fn test_display_name_precedence() {
        let identity = resolve(json!({
            "metadata": {
                "display_names": { "display": "Acme AI", "product": "Arm One" },
                "display_name": "Ignored",
                "company_name": "Acme"
            }
        }));
        assert_eq!(identity.display_name, "Acme AI");
        assert_eq!(identity.combined_label, "Acme (Product: Arm One)");

        let identity = resolve(json!({
            "metadata": { "product_name": "Arm One" }
        }));
        assert_eq!(identity.display_name, "Arm One");
        assert_eq!(identity.company_or_display(), "Arm One");
        assert!(identity.show_product);
    }

    #[test]
    fn test_headline_name() {
        assert_eq!(headline_name(None, None), "");
        assert_eq!(headline_name(Some(" Acme "), None), "Acme");
        assert_eq!(headline_name(None, Some("Arm")), "Arm");
        assert_eq!(headline_name(Some("Acme"), Some("ACME")), "Acme");
        assert_eq!(headline_name(Some("Acme Robotics"), Some("acme")), "Acme Robotics");
        assert_eq!(headline_name(Some("Acme"), Some("RoboArm")), "Acme — RoboArm");

        let identity = resolve(json!({}));
        assert_eq!(identity.headline(), "the company");
    }
}
