//! Sensitive-field detection: classifies extracted model fields into
//! `SENSITIVE_FIELD` categories by name (spec.md §3 — computed, not
//! ingested from source).

use super::types::{ExtractedModel, SensitiveCategory, SensitiveFieldMatch};

/// A known field-name match and the category/specificity it implies.
struct KnownField {
    name: &'static str,
    category: SensitiveCategory,
}

const KNOWN_FIELDS: &[KnownField] = &[
    KnownField { name: "password", category: SensitiveCategory::Credential },
    KnownField { name: "password_hash", category: SensitiveCategory::Credential },
    KnownField { name: "api_key", category: SensitiveCategory::Credential },
    KnownField { name: "secret", category: SensitiveCategory::Credential },
    KnownField { name: "token", category: SensitiveCategory::Credential },
    KnownField { name: "ssn", category: SensitiveCategory::Pii },
    KnownField { name: "social_security_number", category: SensitiveCategory::Pii },
    KnownField { name: "email", category: SensitiveCategory::Pii },
    KnownField { name: "phone", category: SensitiveCategory::Pii },
    KnownField { name: "phone_number", category: SensitiveCategory::Pii },
    KnownField { name: "address", category: SensitiveCategory::Pii },
    KnownField { name: "date_of_birth", category: SensitiveCategory::Pii },
    KnownField { name: "dob", category: SensitiveCategory::Pii },
    KnownField { name: "full_name", category: SensitiveCategory::Pii },
    KnownField { name: "credit_card", category: SensitiveCategory::Financial },
    KnownField { name: "credit_card_number", category: SensitiveCategory::Financial },
    KnownField { name: "iban", category: SensitiveCategory::Financial },
    KnownField { name: "bank_account", category: SensitiveCategory::Financial },
    KnownField { name: "salary", category: SensitiveCategory::Financial },
    KnownField { name: "diagnosis", category: SensitiveCategory::Health },
    KnownField { name: "medical_record", category: SensitiveCategory::Health },
    KnownField { name: "prescription", category: SensitiveCategory::Health },
    KnownField { name: "blood_type", category: SensitiveCategory::Health },
];

/// Scans extracted model fields against a static known-field-name table.
pub struct SensitiveFieldDetector {
    known: &'static [KnownField],
}

impl SensitiveFieldDetector {
    pub fn new() -> Self {
        Self { known: KNOWN_FIELDS }
    }

    /// Classify every field of `model`. An exact (case-insensitive) name
    /// match scores `specificity = 1.0`; a substring match (the field
    /// name contains a known term as part of a longer identifier, e.g.
    /// `user_email_address`) scores `0.6`.
    pub fn detect_sensitive_fields(&self, model: &ExtractedModel) -> Vec<SensitiveFieldMatch> {
        let table = model.table_name.clone().unwrap_or_else(|| model.name.clone());
        let mut matches = Vec::new();

        for field in &model.fields {
            let lower = field.name.to_lowercase();
            let mut best: Option<(SensitiveCategory, f64)> = None;

            for known in self.known {
                if lower == known.name {
                    best = Some((known.category, 1.0));
                    break;
                }
                if lower.contains(known.name) {
                    let candidate = (known.category, 0.6);
                    if best.is_none() {
                        best = Some(candidate);
                    }
                }
            }

            if let Some((category, specificity)) = best {
                matches.push(SensitiveFieldMatch {
                    table: table.clone(),
                    field: field.name.clone(),
                    category,
                    specificity,
                });
            }
        }

        matches
    }
}

impl Default for SensitiveFieldDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundaries::types::{ExtractedField, OrmFramework};

    fn field(name: &str) -> ExtractedField {
        ExtractedField {
            name: name.to_string(),
            field_type: None,
            is_primary_key: false,
            is_nullable: true,
            is_unique: false,
            default_value: None,
            line: 1,
        }
    }

    #[test]
    fn exact_match_scores_full_specificity() {
        let model = ExtractedModel {
            name: "User".to_string(),
            table_name: Some("users".to_string()),
            file: "user.ts".to_string(),
            line: 1,
            framework: OrmFramework::TypeOrm,
            fields: vec![field("password"), field("display_name")],
            relationships: vec![],
            confidence: 0.9,
        };

        let detector = SensitiveFieldDetector::new();
        let matches = detector.detect_sensitive_fields(&model);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].field, "password");
        assert_eq!(matches[0].category, SensitiveCategory::Credential);
        assert!((matches[0].specificity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn substring_match_scores_lower_specificity() {
        let model = ExtractedModel {
            name: "Contact".to_string(),
            table_name: Some("contacts".to_string()),
            file: "contact.ts".to_string(),
            line: 1,
            framework: OrmFramework::TypeOrm,
            fields: vec![field("user_email_address")],
            relationships: vec![],
            confidence: 0.9,
        };

        let detector = SensitiveFieldDetector::new();
        let matches = detector.detect_sensitive_fields(&model);

        assert_eq!(matches.len(), 1);
        assert!((matches[0].specificity - 0.6).abs() < f64::EPSILON);
    }
}
