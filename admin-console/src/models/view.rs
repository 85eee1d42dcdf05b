//! Flattened rows for the templates, so markup only reads fields.

use super::{Action, Permission, Role};

#[derive(Debug, Clone)]
pub struct ActionCell {
    pub action: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub struct PermissionRow {
    pub id: i64,
    pub name: String,
    pub cells: Vec<ActionCell>,
}

impl PermissionRow {
    pub fn new(permission: &Permission) -> Self {
        Self {
            id: permission.id,
            name: permission.name.clone(),
            cells: cells(|action| permission.actions.get(action)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssignmentRow {
    pub permission_id: i64,
    pub permission_name: String,
    pub assigned: bool,
}

/// A role with one checkbox per known permission.
#[derive(Debug, Clone)]
pub struct RoleCard {
    pub id: i64,
    pub name: String,
    pub rows: Vec<AssignmentRow>,
}

impl RoleCard {
    pub fn new(role: &Role, permissions: &[Permission]) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            rows: permissions
                .iter()
                .map(|p| AssignmentRow {
                    permission_id: p.id,
                    permission_name: p.name.clone(),
                    assigned: role.has_permission(p.id),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GrantRow {
    pub permission_id: i64,
    pub permission_name: String,
    pub cells: Vec<ActionCell>,
}

/// A role with one checkbox per known permission and action.
#[derive(Debug, Clone)]
pub struct RoleGrantCard {
    pub id: i64,
    pub name: String,
    pub rows: Vec<GrantRow>,
}

impl RoleGrantCard {
    pub fn new(role: &Role, permissions: &[Permission]) -> Self {
        Self {
            id: role.id,
            name: role.name.clone(),
            rows: permissions
                .iter()
                .map(|p| GrantRow {
                    permission_id: p.id,
                    permission_name: p.name.clone(),
                    cells: cells(|action| role.grants(p.id, action)),
                })
                .collect(),
        }
    }
}

fn cells(checked: impl Fn(Action) -> bool) -> Vec<ActionCell> {
    Action::ALL
        .iter()
        .map(|&action| ActionCell {
            action: action.as_str(),
            label: action.label(),
            checked: checked(action),
        })
        .collect()
}
