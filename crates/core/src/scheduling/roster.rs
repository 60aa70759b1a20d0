//! Dog-roster normalization.
//!
//! The booking form submits the roster as an ordered list of single-key
//! maps, keyed by positional labels: `[{"dog1": {...}}, {"dog2": {...}}]`.
//! Normalization preserves the order the caller supplied; the labels are
//! never used to re-derive a position.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::types::Dog;

/// One dog's fields as submitted by the booking form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DogParams {
    pub name: String,
    pub owner: String,
    pub address: String,
    #[serde(rename = "phoneNum")]
    pub phone: String,
    #[serde(default)]
    pub fixed: bool,
    #[serde(default, deserialize_with = "crate::serde::deserialize_optional_string")]
    pub notes: Option<String>,
}

impl From<DogParams> for Dog {
    fn from(params: DogParams) -> Self {
        Dog {
            name: params.name,
            owner: params.owner,
            address: params.address,
            phone: params.phone,
            fixed: params.fixed,
            notes: params.notes,
        }
    }
}

/// The raw roster as it arrives on the wire. Each list element carries
/// one labelled dog.
pub type DogRoster = Vec<BTreeMap<String, DogParams>>;

/// Projects the raw roster into an ordered list of [`Dog`] records,
/// preserving the list order as supplied.
pub fn normalize_roster(roster: DogRoster) -> Vec<Dog> {
    roster
        .into_iter()
        .flat_map(BTreeMap::into_values)
        .map(Dog::from)
        .collect()
}
