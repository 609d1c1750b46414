//! Customer models.

use serde::{Deserialize, Serialize};

use dispatch_core::CustomerId;

/// A delivery destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,
    pub phone: String,
    /// Full address string as entered; the geocode fields below are
    /// filled from it when the mapping client is configured.
    pub address_full: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_active: bool,
}

/// Input for creating a customer; the store assigns the id.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    pub phone: String,
    pub address_full: String,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

/// Partial update for a customer. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub address_full: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

impl Customer {
    /// Apply a partial update in place.
    pub fn apply(&mut self, patch: CustomerPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(contact_person) = patch.contact_person {
            self.contact_person = Some(contact_person);
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(address_full) = patch.address_full {
            self.address_full = address_full;
        }
        if let Some(street) = patch.street {
            self.street = Some(street);
        }
        if let Some(city) = patch.city {
            self.city = Some(city);
        }
        if let Some(zip) = patch.zip {
            self.zip = Some(zip);
        }
        if let Some(latitude) = patch.latitude {
            self.latitude = Some(latitude);
        }
        if let Some(longitude) = patch.longitude {
            self.longitude = Some(longitude);
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }
}
