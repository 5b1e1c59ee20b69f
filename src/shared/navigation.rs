//! Role-based navigation
//!
//! The dashboard shell renders whatever this model returns: a sidebar for the
//! front desk, cards for everyone. Items are only listed when the role's
//! permission predicates allow the underlying action.

use serde::{Deserialize, Serialize};

use crate::shared::roles::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub role: Role,
    pub show_sidebar: bool,
    pub sections: Vec<NavSection>,
    pub cards: Vec<DashboardCard>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub title: String,
    pub items: Vec<NavItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardCard {
    pub title: String,
    pub description: String,
    pub path: String,
}

fn item(label: &str, path: &str) -> NavItem {
    NavItem {
        label: label.to_string(),
        path: path.to_string(),
    }
}

fn card(title: &str, description: &str, path: &str) -> DashboardCard {
    DashboardCard {
        title: title.to_string(),
        description: description.to_string(),
        path: path.to_string(),
    }
}

fn section(title: &str, items: Vec<NavItem>) -> NavSection {
    NavSection {
        title: title.to_string(),
        items,
    }
}

/// Build the navigation a user with `role` should see
pub fn navigation_for(role: Role) -> Navigation {
    let mut sections = Vec::new();
    let mut cards = Vec::new();

    if role.shows_sidebar() {
        sections.push(section("Overview", vec![item("Dashboard", "/dashboard")]));
    }

    if role.can_manage_customers() {
        sections.push(section(
            "Customers",
            vec![
                item("Customer list", "/customers"),
                item("Add customer", "/customers/add"),
            ],
        ));
        cards.push(card("Customers", "Manage gym members and their memberships", "/customers"));
    }

    if role.can_manage_trainers() {
        sections.push(section(
            "Trainers",
            vec![
                item("Trainer list", "/trainers"),
                item("Add trainer", "/trainers/add"),
            ],
        ));
        cards.push(card("Trainers", "Manage trainers and their work schedules", "/trainers"));
    }

    if role.can_view_equipment() {
        let mut items = vec![item("Equipment list", "/equipment")];
        if role.can_create_equipment() {
            items.push(item("Add equipment", "/equipment/add"));
        }
        sections.push(section("Equipment", items));
        cards.push(card("Equipment", "Track machines and their condition", "/equipment"));
    }

    if role.can_manage_maintenance() {
        sections.push(section("Maintenance", vec![item("Maintenance schedule", "/maintenance")]));
        cards.push(card("Maintenance", "Plan and record equipment maintenance", "/maintenance"));
    }

    if role.can_manage_staff() {
        sections.push(section(
            "Staff",
            vec![item("Staff list", "/staff"), item("Add staff member", "/staff/add")],
        ));
        cards.push(card("Staff", "Manage receptionist accounts", "/staff"));
    }

    match role {
        Role::Trainer => {
            sections.push(section(
                "Schedule",
                vec![
                    item("View my schedule", "/my-schedule"),
                    item("Manage schedule", "/schedule"),
                ],
            ));
            cards.push(card("My customers", "Customers assigned to you", "/my-customers"));
            cards.push(card("Work schedule", "Your weekly working hours", "/my-schedule"));
        }
        Role::Customer => {
            cards.push(card("Trainers", "Browse trainers and their weekly schedules", "/trainers"));
        }
        Role::Admin | Role::Receptionist => {}
    }

    cards.push(card("My account", "View and update your account details", "/profile"));

    Navigation {
        role,
        show_sidebar: role.shows_sidebar(),
        sections,
        cards,
    }
}
