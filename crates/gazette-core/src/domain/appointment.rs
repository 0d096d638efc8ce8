use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Appointment entity - a standalone booking request.
///
/// Unrelated to the content schema; no foreign keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub date: NaiveDate,
    pub client_name: String,
    pub message: String,
}

impl Appointment {
    pub fn new(date: NaiveDate, client_name: String, message: String) -> Self {
        Self {
            id: 0,
            date,
            client_name,
            message,
        }
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.client_name, self.message)
    }
}
