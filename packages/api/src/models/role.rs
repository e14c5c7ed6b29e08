//! Warehouse roles.
//!
//! A [`Role`] decides which dashboard a user lands on. Five roles are known;
//! anything else read from the database or a stored session is kept verbatim
//! in [`Role::Unrecognized`] so it round-trips without loss and still routes
//! to the fallback dashboard.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    ModelInference,
    InventoryManagement,
    OperationsCompliance,
    WarehouseConfig,
    NotificationReporting,
    Unrecognized(String),
}

impl Role {
    /// Every recognized role, in display order.
    pub const ALL: [Role; 5] = [
        Role::ModelInference,
        Role::InventoryManagement,
        Role::OperationsCompliance,
        Role::WarehouseConfig,
        Role::NotificationReporting,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Role::ModelInference => "model_inference",
            Role::InventoryManagement => "inventory_management",
            Role::OperationsCompliance => "operations_compliance",
            Role::WarehouseConfig => "warehouse_config",
            Role::NotificationReporting => "notification_reporting",
            Role::Unrecognized(other) => other,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Unrecognized(_))
    }

    /// Human-readable role name for forms and headers.
    pub fn title(&self) -> &str {
        match self {
            Role::ModelInference => "Model Inference",
            Role::InventoryManagement => "Inventory Management",
            Role::OperationsCompliance => "Operations Compliance",
            Role::WarehouseConfig => "Warehouse Configuration",
            Role::NotificationReporting => "Notification & Reporting",
            Role::Unrecognized(other) => other,
        }
    }

    /// Dashboard label stored alongside the role when none is supplied.
    pub fn default_dashboard_label(&self) -> Option<&'static str> {
        match self {
            Role::ModelInference => Some("Model Inference Dashboard"),
            Role::InventoryManagement => Some("Inventory Management Dashboard"),
            Role::OperationsCompliance => Some("Operations Compliance Dashboard"),
            Role::WarehouseConfig => Some("Warehouse Configuration Dashboard"),
            Role::NotificationReporting => Some("Notification & Reporting Dashboard"),
            Role::Unrecognized(_) => None,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "model_inference" => Role::ModelInference,
            "inventory_management" => Role::InventoryManagement,
            "operations_compliance" => Role::OperationsCompliance,
            "warehouse_config" => Role::WarehouseConfig,
            "notification_reporting" => Role::NotificationReporting,
            _ => Role::Unrecognized(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Unrecognized(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_roles_parse_exactly() {
        for role in Role::ALL {
            assert_eq!(Role::from(role.as_str()), role);
            assert!(role.is_recognized());
        }
    }

    #[test]
    fn test_role_match_is_case_sensitive() {
        let role = Role::from("Model_Inference");
        assert_eq!(role, Role::Unrecognized("Model_Inference".to_string()));
        assert!(!role.is_recognized());
        assert_eq!(role.default_dashboard_label(), None);
    }

    #[test]
    fn test_role_serializes_as_plain_string() {
        let json = serde_json::to_string(&Role::WarehouseConfig).unwrap();
        assert_eq!(json, "\"warehouse_config\"");

        let parsed: Role = serde_json::from_str("\"shift_supervisor\"").unwrap();
        assert_eq!(parsed.as_str(), "shift_supervisor");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"shift_supervisor\"");
    }
}
