//! Role-based dashboard dispatch.
//!
//! [`Dashboard::for_session`] is a pure function of the session: each of the
//! five roles selects its own dashboard, and a missing or unrecognized role
//! falls back to [`Dashboard::ModelInference`]. [`RoleDashboard`] renders
//! whichever one the current session selects.

use api::{Role, UserInfo};
use dioxus::prelude::*;

use crate::use_session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dashboard {
    ModelInference,
    InventoryManagement,
    OperationsCompliance,
    WarehouseConfig,
    NotificationReporting,
}

impl Dashboard {
    pub fn for_role(role: Option<&Role>) -> Self {
        match role {
            Some(Role::ModelInference) => Dashboard::ModelInference,
            Some(Role::InventoryManagement) => Dashboard::InventoryManagement,
            Some(Role::OperationsCompliance) => Dashboard::OperationsCompliance,
            Some(Role::WarehouseConfig) => Dashboard::WarehouseConfig,
            Some(Role::NotificationReporting) => Dashboard::NotificationReporting,
            Some(Role::Unrecognized(_)) | None => Dashboard::ModelInference,
        }
    }

    pub fn for_session(user: Option<&UserInfo>) -> Self {
        Self::for_role(user.and_then(|u| u.role.as_ref()))
    }

    /// Identifier matching the role value that selects this dashboard.
    pub fn id(self) -> &'static str {
        match self {
            Dashboard::ModelInference => "model_inference",
            Dashboard::InventoryManagement => "inventory_management",
            Dashboard::OperationsCompliance => "operations_compliance",
            Dashboard::WarehouseConfig => "warehouse_config",
            Dashboard::NotificationReporting => "notification_reporting",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Dashboard::ModelInference => "Model Inference",
            Dashboard::InventoryManagement => "Inventory Management",
            Dashboard::OperationsCompliance => "Operations Compliance",
            Dashboard::WarehouseConfig => "Warehouse Configuration",
            Dashboard::NotificationReporting => "Notification & Reporting",
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Dashboard::ModelInference => "PPE detection results across monitored zones.",
            Dashboard::InventoryManagement => "Stock levels of helmets, vests, gloves and eyewear.",
            Dashboard::OperationsCompliance => "Shift compliance rates and open violations.",
            Dashboard::WarehouseConfig => "Zones, cameras and PPE requirements per area.",
            Dashboard::NotificationReporting => "Alerts, scheduled reports and employee feedback.",
        }
    }
}

/// Render the dashboard selected by the current session.
#[component]
pub fn RoleDashboard() -> Element {
    let session = use_session();
    let Some(user) = session.read().user().cloned() else {
        return rsx! {};
    };
    let dashboard = Dashboard::for_session(Some(&user));

    rsx! {
        DashboardPanel { dashboard, user }
    }
}

#[component]
fn DashboardPanel(dashboard: Dashboard, user: UserInfo) -> Element {
    let label = user
        .dashboard_type
        .clone()
        .unwrap_or_else(|| format!("{} Dashboard", dashboard.title()));
    let id = dashboard.id();
    let summary = dashboard.summary();
    let name = user.display_name().to_string();

    rsx! {
        section {
            class: "dashboard dashboard-{id}",
            header {
                class: "dashboard-header",
                h1 { "{label}" }
                p { class: "dashboard-greeting", "Signed in as {name}" }
            }
            p { class: "dashboard-summary", "{summary}" }
        }
    }
}
