//! Customer records as exchanged with the bank service
//!
//! The service owns identity and persistence; the client only ever holds
//! transient copies. Deserialization is lenient about a few representation
//! details the service is known to vary on (numeric vs. string ids, balances
//! and phone numbers, null or missing fields). Fields the client does not
//! know about are carried along so updates send them back untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque record identifier assigned by the backend.
///
/// Kept in whichever JSON form the service used so that it round-trips
/// unchanged in update payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Text(value.to_string())
    }
}

/// A persisted customer record.
///
/// Null or missing display fields decode as empty strings and a zero
/// balance, so one sparse row does not fail the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub username: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub email: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub balance: f64,
    /// Server-side fields outside the form, e.g. creation timestamps
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Build a record from a server-assigned id and the submitted fields
    pub fn from_draft(id: RecordId, draft: RecordDraft) -> Self {
        Record {
            id,
            name: draft.name,
            username: draft.username,
            email: draft.email,
            phone: draft.phone,
            balance: draft.balance,
            extra: Map::new(),
        }
    }

    /// Replace the editable fields, keeping the id and any extra fields
    pub fn with_draft(&self, draft: RecordDraft) -> Self {
        Record {
            extra: self.extra.clone(),
            ..Record::from_draft(self.id.clone(), draft)
        }
    }
}

/// Payload for creating a record; the backend assigns the id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordDraft {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub balance: f64,
}

/// Render a balance the way it is typed into the form (`10`, not `10.0`)
pub fn format_balance(balance: f64) -> String {
    format!("{}", balance)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(serde_json::Number),
    Text(String),
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Lenient>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Lenient::Number(n)) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("balance out of range")),
        Some(Lenient::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid balance '{}'", s))),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Lenient>::deserialize(deserializer)? {
        None => Ok(String::new()),
        Some(Lenient::Number(n)) => Ok(n.to_string()),
        Some(Lenient::Text(s)) => Ok(s),
    }
}
