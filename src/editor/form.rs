//! Form state: the five editable draft fields and the edit target

use crate::record::{format_balance, Record, RecordDraft};

/// One editable field of the customer form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Username,
    Email,
    Phone,
    Balance,
}

impl Field {
    /// All fields in on-screen order
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Username,
        Field::Email,
        Field::Phone,
        Field::Balance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Username => "Username",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Balance => "Balance",
        }
    }

    /// The field below this one, or `None` after the last field
    pub fn next(self) -> Option<Self> {
        match self {
            Field::Name => Some(Field::Username),
            Field::Username => Some(Field::Email),
            Field::Email => Some(Field::Phone),
            Field::Phone => Some(Field::Balance),
            Field::Balance => None,
        }
    }

    /// The field above this one, or `None` before the first field
    pub fn prev(self) -> Option<Self> {
        match self {
            Field::Name => None,
            Field::Username => Some(Field::Name),
            Field::Email => Some(Field::Username),
            Field::Phone => Some(Field::Email),
            Field::Balance => Some(Field::Phone),
        }
    }
}

/// Draft values as typed, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub balance: String,
}

impl FormState {
    /// Form populated with exactly the values of an existing record
    pub fn from_record(record: &Record) -> Self {
        FormState {
            name: record.name.clone(),
            username: record.username.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            balance: format_balance(record.balance),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Username => &self.username,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Balance => &self.balance,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Username => &mut self.username,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Balance => &mut self.balance,
        }
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|&f| self.get(f).is_empty())
    }

    pub fn clear(&mut self) {
        *self = FormState::default();
    }

    /// Convert to a create payload.
    ///
    /// Returns `None` when the balance does not parse; callers validate
    /// first, so a validated form always converts.
    pub fn to_draft(&self) -> Option<RecordDraft> {
        let balance = self.balance.trim().parse::<f64>().ok()?;
        Some(RecordDraft {
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordId;

    #[test]
    fn test_from_record_copies_every_field() {
        let record = Record {
            id: RecordId::Number(3),
            name: "Grace".to_string(),
            username: "ghopper".to_string(),
            email: "grace@navy.mil".to_string(),
            phone: "2025550143".to_string(),
            balance: 1200.75,
            extra: Default::default(),
        };
        let form = FormState::from_record(&record);

        assert_eq!(form.name, "Grace");
        assert_eq!(form.username, "ghopper");
        assert_eq!(form.email, "grace@navy.mil");
        assert_eq!(form.phone, "2025550143");
        assert_eq!(form.balance, "1200.75");
    }

    #[test]
    fn test_field_navigation_is_bounded() {
        assert_eq!(Field::Name.prev(), None);
        assert_eq!(Field::Balance.next(), None);
        assert_eq!(Field::Email.next(), Some(Field::Phone));
    }

    #[test]
    fn test_to_draft_requires_numeric_balance() {
        let mut form = FormState::default();
        form.balance = "abc".to_string();
        assert!(form.to_draft().is_none());

        form.balance = " 42 ".to_string();
        assert_eq!(form.to_draft().map(|d| d.balance), Some(42.0));
    }

    #[test]
    fn test_clear_resets_all_fields() {
        let mut form = FormState::default();
        form.get_mut(Field::Phone).push_str("123");
        assert!(!form.is_empty());
        form.clear();
        assert!(form.is_empty());
    }
}
