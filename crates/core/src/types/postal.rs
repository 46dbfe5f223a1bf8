//! Structured postal address fields.

use serde::{Deserialize, Serialize};

/// The postal part of a saved address.
///
/// The storefront treats these fields as opaque data; it never validates a
/// postal code or a country. Identity and default status live on the
/// storefront's `Address` record that wraps this value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    /// Recipient name.
    pub full_name: String,
    /// First street line.
    pub street: String,
    /// Apartment, suite, landmark.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl PostalAddress {
    /// Compact single-line label, e.g. `"Asha Rao, 12 MG Road, Jaipur 302001"`.
    #[must_use]
    pub fn label(&self) -> String {
        let mut parts = vec![self.full_name.as_str(), self.street.as_str()];
        if let Some(street2) = self.street2.as_deref().filter(|s| !s.is_empty()) {
            parts.push(street2);
        }
        let locality = format!("{} {}", self.city, self.postal_code);
        let mut label = parts
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let locality = locality.trim();
        if !locality.is_empty() {
            if !label.is_empty() {
                label.push_str(", ");
            }
            label.push_str(locality);
        }
        label
    }
}
