//! Contact - the single persisted entity

/// A stored contact row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    /// Assigned by the database on insert, never changed afterwards
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all contacts
    pub email: String,
}

/// The mutable fields of a contact, as submitted by create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ContactFields {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Attach a database id to these fields
    pub fn with_id(self, id: i64) -> Contact {
        Contact {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

impl Contact {
    /// Split off the mutable fields
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}

impl std::fmt::Display for Contact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {} {} <{}>", self.id, self.first_name, self.last_name, self.email)
    }
}
