//! Contact override merge.
//!
//! Each of `name`, `phone`, `email` is decided on its own: a present,
//! non-blank override wins, otherwise the model-produced value stays.
//! `location` is never overridable.

use crate::models::resume::{ContactOverrides, ResumeData};

pub fn merge_overrides(mut structured: ResumeData, overrides: Option<ContactOverrides>) -> ResumeData {
    let Some(overrides) = overrides else {
        return structured;
    };

    let contact = &mut structured.contact_info;
    apply(&mut contact.name, overrides.name);
    apply(&mut contact.phone, overrides.phone);
    apply(&mut contact.email, overrides.email);

    structured
}

fn apply(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        let value = value.trim();
        if !value.is_empty() {
            *field = value.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ContactInfo;

    fn structured() -> ResumeData {
        ResumeData {
            contact_info: ContactInfo {
                name: "A".to_string(),
                email: "a@x".to_string(),
                phone: "1".to_string(),
                location: Some("Norfolk, VA".to_string()),
            },
            professional_summary: "Summary".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_overrides_return_input_unchanged() {
        assert_eq!(merge_overrides(structured(), None), structured());
    }

    #[test]
    fn test_present_override_wins_and_empty_override_is_ignored() {
        let overrides = ContactOverrides {
            name: Some("B".to_string()),
            phone: Some(String::new()),
            email: None,
        };
        let merged = merge_overrides(structured(), Some(overrides));
        assert_eq!(merged.contact_info.name, "B");
        assert_eq!(merged.contact_info.phone, "1");
        assert_eq!(merged.contact_info.email, "a@x");
    }

    #[test]
    fn test_all_fields_overridden() {
        let overrides = ContactOverrides {
            name: Some("Casey Lee".to_string()),
            phone: Some("555-0199".to_string()),
            email: Some("casey@example.com".to_string()),
        };
        let merged = merge_overrides(structured(), Some(overrides));
        assert_eq!(merged.contact_info.name, "Casey Lee");
        assert_eq!(merged.contact_info.phone, "555-0199");
        assert_eq!(merged.contact_info.email, "casey@example.com");
    }

    #[test]
    fn test_whitespace_override_is_treated_as_empty() {
        let overrides = ContactOverrides {
            email: Some("   ".to_string()),
            ..Default::default()
        };
        let merged = merge_overrides(structured(), Some(overrides));
        assert_eq!(merged.contact_info.email, "a@x");
    }

    #[test]
    fn test_location_and_other_sections_untouched() {
        let overrides = ContactOverrides {
            name: Some("B".to_string()),
            phone: Some("2".to_string()),
            email: Some("b@x".to_string()),
        };
        let merged = merge_overrides(structured(), Some(overrides));
        assert_eq!(merged.contact_info.location.as_deref(), Some("Norfolk, VA"));
        assert_eq!(merged.professional_summary, "Summary");
    }

    #[test]
    fn test_override_replaces_unknown_sentinel() {
        let resume = ResumeData::default();
        let overrides = ContactOverrides {
            name: Some("Jordan Reyes".to_string()),
            ..Default::default()
        };
        let merged = merge_overrides(resume, Some(overrides));
        assert_eq!(merged.contact_info.name, "Jordan Reyes");
        assert_eq!(merged.contact_info.phone, "Unknown");
    }
}
