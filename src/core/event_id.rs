//! Event id for correlating record instances across occurrences

use serde::{Deserialize, Serialize};
use std::fmt;

/// Optional (numeric id, name) pair attached to a log record.
///
/// The default `(0, None)` means "no event id".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventId {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EventId {
    pub fn new(id: i64) -> Self {
        Self { id, name: None }
    }

    pub fn named(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }

    pub fn is_none(&self) -> bool {
        self.id == 0 && self.name.is_none()
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", self.id, name),
            None => write!(f, "{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert!(EventId::default().is_none());
        assert!(!EventId::new(123).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(EventId::new(7).to_string(), "7");
        assert_eq!(EventId::named(7, "Startup").to_string(), "7 (Startup)");
    }
}
