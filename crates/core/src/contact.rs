//! Contacts, contact details and the rules for creating them.
//!
//! A [`Contact`] owns zero or more [`ContactDetail`]s. Contacts created through
//! the API must carry at least one detail ([`ValidationPolicy::Strict`]), while
//! spreadsheet imports may create contacts without any
//! ([`ValidationPolicy::Permissive`]).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::OffsetDateTime;
use uuid::Uuid;

/// A typed contact method belonging to exactly one contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetail {
    pub id: Uuid,
    pub contact_id: Uuid,
    /// Free-form label such as "phone" or "email".
    pub contact_type: String,
    pub contact_value: String,
    /// Zero-based insertion index within the owning contact.
    pub position: i32,
}

/// A contact with its details attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub is_favorite: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub details: Vec<ContactDetail>,
}

impl Contact {
    /// Details as `(type, value)` pairs, in display order.
    pub fn detail_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.details
            .iter()
            .map(|d| (d.contact_type.as_str(), d.contact_value.as_str()))
    }
}

/// A `(type, value)` pair supplied by a client or parsed from a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailInput {
    #[serde(default)]
    pub contact_type: String,
    #[serde(default)]
    pub contact_value: String,
}

impl DetailInput {
    pub fn new(contact_type: impl Into<String>, contact_value: impl Into<String>) -> Self {
        Self {
            contact_type: contact_type.into(),
            contact_value: contact_value.into(),
        }
    }

    /// Returns the pair with surrounding whitespace removed from both sides.
    pub fn trimmed(&self) -> Self {
        Self::new(self.contact_type.trim(), self.contact_value.trim())
    }

    /// Whether both the type and the value are non-blank.
    pub fn is_complete(&self) -> bool {
        !self.contact_type.trim().is_empty() && !self.contact_value.trim().is_empty()
    }
}

/// How strictly a [`NewContact`] is checked before it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPolicy {
    /// Direct creation: a name and at least one detail are required.
    Strict,
    /// Bulk import: a name is required, details may be empty.
    Permissive,
}

/// Input for creating a contact together with its initial details.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub details: Vec<DetailInput>,
}

impl NewContact {
    pub fn new(name: impl Into<String>, details: Vec<DetailInput>) -> Self {
        Self {
            name: name.into(),
            details,
        }
    }

    /// Check this input against `policy`.
    ///
    /// Every supplied detail must have a non-blank type and value under both
    /// policies; only the minimum detail count differs.
    pub fn validate(&self, policy: ValidationPolicy) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("name is required".to_string()));
        }

        if policy == ValidationPolicy::Strict && self.details.is_empty() {
            return Err(Error::Validation(
                "at least one contact detail is required".to_string(),
            ));
        }

        if let Some(index) = self.details.iter().position(|d| !d.is_complete()) {
            return Err(Error::Validation(format!(
                "contact detail {index} requires both contact_type and contact_value"
            )));
        }

        Ok(())
    }

    /// Trim the name and every detail.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            details: self.details.iter().map(DetailInput::trimmed).collect(),
        }
    }
}

/// Attach each detail to the contact whose id it references.
///
/// Details keep their relative order; details whose owner is not among
/// `contacts` are dropped. Contacts without details end up with an empty list.
pub fn attach_details(mut contacts: Vec<Contact>, details: Vec<ContactDetail>) -> Vec<Contact> {
    let mut by_owner: HashMap<Uuid, Vec<ContactDetail>> = HashMap::new();
    for detail in details {
        by_owner.entry(detail.contact_id).or_default().push(detail);
    }

    for contact in &mut contacts {
        contact.details = by_owner.remove(&contact.id).unwrap_or_default();
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str) -> Contact {
        Contact {
            id: Uuid::new_v4(),
            name: name.to_string(),
            is_favorite: false,
            created_at: OffsetDateTime::now_utc(),
            details: Vec::new(),
        }
    }

    fn detail(owner: Uuid, position: i32, kind: &str, value: &str) -> ContactDetail {
        ContactDetail {
            id: Uuid::new_v4(),
            contact_id: owner,
            contact_type: kind.to_string(),
            contact_value: value.to_string(),
            position,
        }
    }

    #[test]
    fn strict_policy_requires_details() {
        let input = NewContact::new("Alice", vec![]);
        let err = input.validate(ValidationPolicy::Strict).unwrap_err();
        assert!(err.to_string().contains("at least one contact detail"));
        assert!(input.validate(ValidationPolicy::Permissive).is_ok());
    }

    #[test]
    fn blank_name_rejected_by_both_policies() {
        let input = NewContact::new("   ", vec![DetailInput::new("phone", "1")]);
        assert!(input.validate(ValidationPolicy::Strict).is_err());
        assert!(input.validate(ValidationPolicy::Permissive).is_err());
    }

    #[test]
    fn incomplete_detail_rejected() {
        let input = NewContact::new(
            "Bob",
            vec![
                DetailInput::new("phone", "555"),
                DetailInput::new("email", "  "),
            ],
        );
        let err = input.validate(ValidationPolicy::Strict).unwrap_err();
        assert!(err.to_string().contains("contact detail 1"));
    }

    #[test]
    fn normalized_trims_everything() {
        let input = NewContact::new(" Carol ", vec![DetailInput::new(" phone", "555 ")]);
        let normalized = input.normalized();
        assert_eq!(normalized.name, "Carol");
        assert_eq!(normalized.details, vec![DetailInput::new("phone", "555")]);
    }

    #[test]
    fn attach_details_groups_by_owner() {
        let alice = contact("Alice");
        let bob = contact("Bob");
        let carol = contact("Carol");
        let stranger = Uuid::new_v4();

        let details = vec![
            detail(alice.id, 0, "phone", "1"),
            detail(bob.id, 0, "email", "b@x.com"),
            detail(alice.id, 1, "email", "a@x.com"),
            detail(stranger, 0, "phone", "9"),
        ];

        let contacts = attach_details(vec![alice.clone(), bob.clone(), carol.clone()], details);

        assert_eq!(contacts.len(), 3);
        let pairs: Vec<_> = contacts[0].detail_pairs().collect();
        assert_eq!(pairs, vec![("phone", "1"), ("email", "a@x.com")]);
        assert_eq!(contacts[1].details.len(), 1);
        assert!(contacts[2].details.is_empty());
        assert!(
            contacts
                .iter()
                .flat_map(|c| &c.details)
                .all(|d| d.contact_id != stranger)
        );
    }

    #[test]
    fn contact_serializes_nested_details() {
        let mut alice = contact("Alice");
        alice.details.push(detail(alice.id, 0, "phone", "555-1111"));

        let json = serde_json::to_value(&alice).unwrap();
        assert_eq!(json["name"], "Alice");
        assert_eq!(json["is_favorite"], false);
        assert_eq!(json["details"][0]["contact_type"], "phone");
        assert_eq!(json["details"][0]["contact_value"], "555-1111");
    }

    #[test]
    fn new_contact_deserializes_with_missing_fields() {
        let input: NewContact = serde_json::from_str(r#"{"name": "Dan"}"#).unwrap();
        assert!(input.details.is_empty());
        assert!(input.validate(ValidationPolicy::Strict).is_err());
    }
}
