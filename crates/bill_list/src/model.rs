use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bill exactly as the store hands it over. Nothing here is validated,
/// `date` and `status` in particular may hold anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBill {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, rename = "type")]
    pub bill_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub vat: Option<String>,
    #[serde(default)]
    pub pct: Option<f64>,
    #[serde(default)]
    pub commentary: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub comment_admin: Option<String>,
}

/// A bill ready to be shown to the employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayBill {
    pub id: String,
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub bill_type: Option<String>,
    pub name: Option<String>,
    /// Parsed calendar date, `None` when the raw value could not be read.
    pub date: Option<NaiveDate>,
    /// Formatted date, or the raw value when formatting failed.
    pub display_date: String,
    pub amount: Option<f64>,
    pub vat: Option<String>,
    pub pct: Option<f64>,
    pub commentary: Option<String>,
    pub status: Option<BillStatus>,
    /// Never empty, unknown statuses get a fallback label.
    pub display_status: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub comment_admin: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown bill status {0:?}")]
pub struct UnknownStatus(pub String);

impl FromStr for BillStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BillStatus::Pending),
            "accepted" => Ok(BillStatus::Accepted),
            "refused" => Ok(BillStatus::Refused),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UserType {
    Employee,
    Admin,
}

impl TryFrom<String> for UserType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "employee" => Ok(UserType::Employee),
            "admin" => Ok(UserType::Admin),
            _ => Err(format!("unknown user type {:?}", value)),
        }
    }
}

impl From<UserType> for String {
    fn from(ty: UserType) -> String {
        match ty {
            UserType::Employee => "Employee",
            UserType::Admin => "Admin",
        }
        .to_string()
    }
}

/// The signed-in user. Read-only for everything in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default)]
    pub email: Option<String>,
}

impl Session {
    pub fn employee(email: impl Into<String>) -> Self {
        Self {
            user_type: UserType::Employee,
            email: Some(email.into()),
        }
    }

    pub fn is_employee(&self) -> bool {
        matches!(self.user_type, UserType::Employee)
    }
}
