use anyhow::{bail, Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::{fmt, str::FromStr};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub r#type: NotificationType,
    pub priority: Priority,
    pub date: DateTime<Utc>,
    pub read: bool,
}

/// A notification the backend has not assigned an id or timestamp to yet.
#[derive(Clone, Debug, Deserialize)]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    pub r#type: NotificationType,
    pub priority: Priority,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Payment,
    Maintenance,
    System,
    Tenant,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Maintenance => "maintenance",
            Self::System => "system",
            Self::Tenant => "tenant",
        }
    }
    pub fn get_display_name(&self) -> &'static str {
        match self {
            Self::Payment => "Payment",
            Self::Maintenance => "Maintenance",
            Self::System => "System",
            Self::Tenant => "Tenant",
        }
    }
}

impl FromStr for NotificationType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "payment" => Self::Payment,
            "maintenance" => Self::Maintenance,
            "system" => Self::System,
            "tenant" => Self::Tenant,
            _ => bail!("{s} is not a valid notification type"),
        })
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Normal,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Normal => "normal",
            Self::Low => "low",
        }
    }
}

impl FromStr for Priority {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "high" => Self::High,
            "normal" => Self::Normal,
            "low" => Self::Low,
            _ => bail!("{s} is not a valid notification priority"),
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which notification category the list view shows. Unknown values coming
/// in from query strings fall back to `All`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Payment,
    Maintenance,
    Tenant,
    System,
}

impl CategoryFilter {
    /// In the order the filter bar shows them.
    pub const ALL: [CategoryFilter; 5] = [
        Self::All,
        Self::Payment,
        Self::Maintenance,
        Self::Tenant,
        Self::System,
    ];

    pub fn admits(&self, ty: NotificationType) -> bool {
        match self {
            Self::All => true,
            Self::Payment => ty == NotificationType::Payment,
            Self::Maintenance => ty == NotificationType::Maintenance,
            Self::Tenant => ty == NotificationType::Tenant,
            Self::System => ty == NotificationType::System,
        }
    }
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Payment => "payment",
            Self::Maintenance => "maintenance",
            Self::Tenant => "tenant",
            Self::System => "system",
        }
    }
    pub fn get_display_name(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Payment => "Payments",
            Self::Maintenance => "Maintenance",
            Self::Tenant => "Tenants",
            Self::System => "System",
        }
    }
    pub fn parse_or_all(s: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .unwrap_or_default()
    }
}

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn notification(
        n: u128,
        r#type: NotificationType,
        read: bool,
    ) -> Notification {
        Notification {
            id: Uuid::from_u128(n),
            title: format!("Notification {n}"),
            message: format!("Something happened ({n})"),
            r#type,
            priority: Priority::Normal,
            date: Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
                - chrono::Duration::minutes(n as i64),
            read,
        }
    }

    /// Four notifications, newest first; the first two are unread.
    pub fn inbox() -> Vec<Notification> {
        vec![
            notification(1, NotificationType::Payment, false),
            notification(2, NotificationType::Maintenance, false),
            notification(3, NotificationType::Tenant, true),
            notification(4, NotificationType::System, true),
        ]
    }
}
