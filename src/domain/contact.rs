use serde::{Deserialize, Serialize};

use crate::domain::autocomplete::AutocompleteItem;

/// A person that can be picked in the contact field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Contact {
    pub fn new(username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Case-insensitive match on username, name or email.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return false;
        }
        [Some(&self.username), Some(&self.name), self.email.as_ref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&query))
    }
}

impl AutocompleteItem for Contact {
    type Value = String;

    fn display(&self) -> String {
        format!("{} ({})", self.name, self.username)
    }

    fn value(&self) -> String {
        self.username.clone()
    }
}
