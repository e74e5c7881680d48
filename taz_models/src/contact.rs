use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// The contents of the contact form as entered by the user.
///
/// An empty `phone` means that no phone number has been provided.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    pub fn get(&self, field: ContactFormField) -> &str {
        match field {
            ContactFormField::Name => &self.name,
            ContactFormField::Email => &self.email,
            ContactFormField::Phone => &self.phone,
            ContactFormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactFormField, value: String) {
        let slot = match field {
            ContactFormField::Name => &mut self.name,
            ContactFormField::Email => &mut self.email,
            ContactFormField::Phone => &mut self.phone,
            ContactFormField::Message => &mut self.message,
        };
        *slot = value;
    }

    pub fn has_phone(&self) -> bool {
        !self.phone.trim().is_empty()
    }

    /// Whether every field is empty.
    pub fn is_empty(&self) -> bool {
        ContactFormField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactFormField {
    Name,
    Email,
    Phone,
    Message,
}

impl ContactFormField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    /// Identifier of the field, as used in analytics events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }

    /// Human readable label of the field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Message => "Message",
        }
    }
}

impl fmt::Display for ContactFormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The reason a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidEmail,
    InvalidPhone,
}

impl FieldError {
    /// Render the error message that is displayed below `field`.
    pub fn message(self, field: ContactFormField) -> String {
        let label = field.label();
        match self {
            Self::Required => format!("{label} is required"),
            Self::TooShort { min } => format!("{label} must be at least {min} characters"),
            Self::TooLong { max } => format!("{label} must not exceed {max} characters"),
            Self::InvalidEmail => "Invalid email address".into(),
            Self::InvalidPhone => "Invalid phone number. Use the format: (XX) XXXXX-XXXX".into(),
        }
    }
}

/// Field errors of a contact form, ordered like the fields of the form.
///
/// Only invalid fields have an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<ContactFormField, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: ContactFormField, error: FieldError) {
        self.0.insert(field, error);
    }

    pub fn get(&self, field: ContactFormField) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn remove(&mut self, field: ContactFormField) -> Option<FieldError> {
        self.0.remove(&field)
    }

    pub fn contains(&self, field: ContactFormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactFormField, FieldError)> + '_ {
        self.0.iter().map(|(&field, &error)| (field, error))
    }

    pub fn fields(&self) -> impl Iterator<Item = ContactFormField> + '_ {
        self.0.keys().copied()
    }

    /// The message of the first invalid field.
    pub fn first_message(&self) -> Option<String> {
        self.iter().next().map(|(field, error)| error.message(field))
    }

    pub fn messages(&self) -> Vec<(ContactFormField, String)> {
        self.iter()
            .map(|(field, error)| (field, error.message(field)))
            .collect()
    }
}

impl FromIterator<(ContactFormField, FieldError)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (ContactFormField, FieldError)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
