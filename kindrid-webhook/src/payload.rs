//! Kindrid donation payload model and decoder.
//!
//! Kindrid POSTs a single JSON document per donation:
//!
//! ```text
//! { "donation": { "status": "completed", "amount": 12.12, ..., "donor": { ..., "tags": { ... } } } }
//! ```
//!
//! Every field except the top-level `donation` object is optional. Absent and
//! `null` values both decode to the type's zero value (empty string, zero
//! amount, empty nested struct) so consumers never deal with missing markers.
//! No format validation is done here; dates, phone numbers and amounts are
//! passed through as sent.
//!
//! The public types only serialize. Deserialization goes through the private
//! `wire` structs, which are reachable only from [`crate::VerifiedPayload`].

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::WebhookError;

/// Status value Kindrid sends once funds are captured.
pub const STATUS_COMPLETED: &str = "completed";

/// A single donation transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DonationEvent {
    /// Raw status string; see [`DonationEvent::status`].
    #[serde(rename = "status")]
    pub status_raw: String,

    /// Amount credited to the donor, in the account's currency.
    pub amount: Decimal,

    /// ISO-8601 timestamp as sent, e.g. `2017-01-04T20:08:57.579000`.
    #[serde(rename = "date")]
    pub timestamp: String,

    /// Kindrid's transaction id.
    pub id: String,

    /// Designated-giving label, empty when not used.
    pub designation: String,

    /// Number or keyword/shortcode the gift was given through.
    pub to: String,

    pub giving_type: String,

    /// Card or ACH.
    pub source_type: String,

    pub donor: Donor,
}

impl DonationEvent {
    pub fn status(&self) -> DonationStatus {
        DonationStatus::from(self.status_raw.as_str())
    }

    /// True when the transaction succeeded and funds were captured.
    pub fn is_completed(&self) -> bool {
        self.status() == DonationStatus::Completed
    }
}

/// Classified donation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonationStatus {
    Completed,
    Other(String),
}

impl From<&str> for DonationStatus {
    fn from(value: &str) -> Self {
        match value {
            STATUS_COMPLETED => DonationStatus::Completed,
            other => DonationStatus::Other(other.to_string()),
        }
    }
}

/// The person who gave.
///
/// `name` and `address` are free text with no validation. Some records carry
/// the whole address, city and state included, in `address`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Donor {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    /// Sent alongside `zip` in both sample payloads.
    pub zipcode: String,
    /// Kindrid's donor id.
    pub id: String,
    /// Where Kindrid sends e-receipts.
    pub email: String,
    /// The cell number that originated the SMS.
    pub phone: String,
    pub tags: TagSet,
}

impl Donor {
    /// `zip` if present, otherwise `zipcode`.
    pub fn postal_code(&self) -> &str {
        if self.zip.is_empty() {
            &self.zipcode
        } else {
            &self.zip
        }
    }
}

/// Donor tags.
///
/// The documentation describes `campus` (a name) plus `chms_id`, while live
/// traffic sends only `_campus` (an opaque id). Both shapes are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TagSet {
    #[serde(rename = "_campus", skip_serializing_if = "String::is_empty")]
    pub campus_ref: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub campus: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub chms_id: String,
}

impl TagSet {
    /// Campus identifier, preferring `_campus` over `campus`.
    pub fn campus_id(&self) -> &str {
        if self.campus_ref.is_empty() {
            &self.campus
        } else {
            &self.campus_ref
        }
    }
}

/// Decode a raw webhook body into a [`DonationEvent`].
///
/// Only reachable through [`crate::VerifiedPayload`] outside this crate.
pub(crate) fn decode(raw: &[u8]) -> Result<DonationEvent, WebhookError> {
    let payload: wire::Payload = serde_json::from_slice(raw)?;
    Ok(payload.donation.into())
}

/// JSON shapes as Kindrid sends them.
mod wire {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};

    /// Top-level envelope; `donation` is the only required key.
    #[derive(Debug, Deserialize)]
    pub(crate) struct Payload {
        pub donation: Donation,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub(crate) struct Donation {
        #[serde(deserialize_with = "null_as_default")]
        pub status: String,
        #[serde(deserialize_with = "null_as_default")]
        pub amount: Decimal,
        #[serde(deserialize_with = "null_as_default")]
        pub date: String,
        #[serde(deserialize_with = "null_as_default")]
        pub id: String,
        #[serde(deserialize_with = "null_as_default")]
        pub designation: String,
        #[serde(deserialize_with = "null_as_default")]
        pub to: String,
        #[serde(deserialize_with = "null_as_default")]
        pub giving_type: String,
        #[serde(deserialize_with = "null_as_default")]
        pub source_type: String,
        #[serde(deserialize_with = "null_as_default")]
        pub donor: Donor,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub(crate) struct Donor {
        #[serde(deserialize_with = "null_as_default")]
        pub name: String,
        #[serde(deserialize_with = "null_as_default")]
        pub address: String,
        #[serde(deserialize_with = "null_as_default")]
        pub city: String,
        #[serde(deserialize_with = "null_as_default")]
        pub state: String,
        #[serde(deserialize_with = "null_as_default")]
        pub zip: String,
        #[serde(deserialize_with = "null_as_default")]
        pub zipcode: String,
        #[serde(deserialize_with = "null_as_default")]
        pub id: String,
        #[serde(deserialize_with = "null_as_default")]
        pub email: String,
        #[serde(deserialize_with = "null_as_default")]
        pub phone: String,
        #[serde(deserialize_with = "null_as_default")]
        pub tags: Tags,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub(crate) struct Tags {
        #[serde(rename = "_campus", deserialize_with = "null_as_default")]
        pub campus_ref: String,
        #[serde(deserialize_with = "null_as_default")]
        pub campus: String,
        #[serde(deserialize_with = "null_as_default")]
        pub chms_id: String,
    }

    /// Map JSON `null` to the zero value. Absent fields are covered by
    /// `#[serde(default)]` on the containing struct.
    fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

impl From<wire::Donation> for DonationEvent {
    fn from(donation: wire::Donation) -> Self {
        DonationEvent {
            status_raw: donation.status,
            amount: donation.amount,
            timestamp: donation.date,
            id: donation.id,
            designation: donation.designation,
            to: donation.to,
            giving_type: donation.giving_type,
            source_type: donation.source_type,
            donor: donation.donor.into(),
        }
    }
}

impl From<wire::Donor> for Donor {
    fn from(donor: wire::Donor) -> Self {
        Donor {
            name: donor.name,
            address: donor.address,
            city: donor.city,
            state: donor.state,
            zip: donor.zip,
            zipcode: donor.zipcode,
            id: donor.id,
            email: donor.email,
            phone: donor.phone,
            tags: donor.tags.into(),
        }
    }
}

impl From<wire::Tags> for TagSet {
    fn from(tags: wire::Tags) -> Self {
        TagSet {
            campus_ref: tags.campus_ref,
            campus: tags.campus,
            chms_id: tags.chms_id,
        }
    }
}
