//! Back-office staff roles.

use serde::{Deserialize, Serialize};

/// Back-office staff role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Full access including staff management and settings.
    Admin,
    /// Store management: inventory, suppliers, purchase orders.
    Manager,
    /// Order handling and catalog upkeep.
    Staff,
    /// POS only.
    Cashier,
}

impl StaffRole {
    /// Whether this role may see the notification feed.
    #[must_use]
    pub const fn can_view_notifications(self) -> bool {
        !matches!(self, Self::Cashier)
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Manager => write!(f, "manager"),
            Self::Staff => write!(f, "staff"),
            Self::Cashier => write!(f, "cashier"),
        }
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "staff" => Ok(Self::Staff),
            "cashier" => Ok(Self::Cashier),
            _ => Err(format!("invalid staff role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_role_roundtrip() {
        for role in [
            StaffRole::Admin,
            StaffRole::Manager,
            StaffRole::Staff,
            StaffRole::Cashier,
        ] {
            assert_eq!(role.to_string().parse::<StaffRole>().unwrap(), role);
        }
        assert!("owner".parse::<StaffRole>().is_err());
    }

    #[test]
    fn test_cashier_cannot_view_notifications() {
        assert!(!StaffRole::Cashier.can_view_notifications());
        assert!(StaffRole::Manager.can_view_notifications());
    }
}
