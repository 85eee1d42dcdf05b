use super::{banner_only, page_status};
use crate::models::{
    first_message, Action, Mutation, NameForm, Permission, PermissionRow, Role, RoleGrantCard,
};
use crate::AppState;
use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use validator::Validate;

#[derive(Template)]
#[template(path = "permissions.html")]
pub struct PermissionsTemplate {
    pub rows: Vec<PermissionRow>,
    pub grants: Vec<RoleGrantCard>,
    pub form: NameForm,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "partials/permissions_table_fragment.html")]
pub struct PermissionsTableTemplate {
    pub rows: Vec<PermissionRow>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "partials/role_grants_fragment.html")]
pub struct RoleGrantsTemplate {
    pub grant: RoleGrantCard,
    pub error: Option<String>,
}

async fn load(state: &AppState) -> anyhow::Result<(Vec<Permission>, Vec<Role>)> {
    futures::try_join!(state.rbac.list_permissions(), state.rbac.list_roles())
}

impl PermissionsTemplate {
    async fn load(state: &AppState, form: NameForm) -> Self {
        match load(state).await {
            Ok((permissions, roles)) => Self {
                rows: permissions.iter().map(PermissionRow::new).collect(),
                grants: roles
                    .iter()
                    .map(|role| RoleGrantCard::new(role, &permissions))
                    .collect(),
                form,
                error: None,
            },
            Err(e) => Self {
                rows: Vec::new(),
                grants: Vec::new(),
                form,
                error: Some(e.to_string()),
            },
        }
    }
}

pub async fn permissions_page(State(state): State<AppState>) -> Response {
    let page = PermissionsTemplate::load(&state, NameForm::default()).await;
    (page_status(&page.error), page).into_response()
}

pub async fn create_permission(
    State(state): State<AppState>,
    Form(form): Form<NameForm>,
) -> Response {
    let form = form.trimmed();
    if let Err(errors) = form.validate() {
        let mut page = PermissionsTemplate::load(&state, form).await;
        page.error = Some(first_message(&errors));
        return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
    }

    match state.rbac.create_permission(&form.name).await {
        Ok(permission) => {
            tracing::info!(permission_id = permission.id, "Permission added");
            Redirect::to("/permissions").into_response()
        }
        Err(e) => {
            let mut page = PermissionsTemplate::load(&state, form).await;
            page.error = Some(e.to_string());
            (StatusCode::BAD_GATEWAY, page).into_response()
        }
    }
}

/// Flip one action flag on a permission and PUT it back.
pub async fn toggle_permission_action(
    State(state): State<AppState>,
    Path((permission_id, action)): Path<(i64, String)>,
) -> Response {
    let Ok(action) = action.parse::<Action>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let mut permissions = match state.rbac.list_permissions().await {
        Ok(permissions) => permissions,
        Err(e) => return banner_only(e.to_string()),
    };
    let Some(index) = permissions.iter().position(|p| p.id == permission_id) else {
        return banner_only("Permission is not found");
    };

    let mutation = Mutation::begin(permissions[index].clone(), |p| p.toggle_action(action));
    let outcome = state.rbac.update_permission(mutation.optimistic()).await;
    let mutation = mutation.settle(outcome);

    if let Some(message) = mutation.error() {
        tracing::warn!(permission_id, %action, error = %message, "Permission update reverted");
    }
    permissions[index] = mutation.visible().clone();

    PermissionsTableTemplate {
        rows: permissions.iter().map(PermissionRow::new).collect(),
        error: mutation.error().map(str::to_string),
    }
    .into_response()
}

/// Flip one action flag on a role's copy of a permission and PUT the role.
pub async fn toggle_role_permission_action(
    State(state): State<AppState>,
    Path((role_id, permission_id, action)): Path<(i64, i64, String)>,
) -> Response {
    let Ok(action) = action.parse::<Action>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let (permissions, roles) = match load(&state).await {
        Ok(loaded) => loaded,
        Err(e) => return banner_only(e.to_string()),
    };
    let Some(role) = roles.into_iter().find(|r| r.id == role_id) else {
        return banner_only("Role is not found");
    };

    let mutation = Mutation::begin(role, |r| r.toggle_permission_action(permission_id, action));
    let outcome = state
        .rbac
        .update_role(mutation.optimistic(), "Failed to update role")
        .await;
    let mutation = mutation.settle(outcome);

    if let Some(message) = mutation.error() {
        tracing::warn!(role_id, permission_id, %action, error = %message, "Role update reverted");
    }

    RoleGrantsTemplate {
        grant: RoleGrantCard::new(mutation.visible(), &permissions),
        error: mutation.error().map(str::to_string),
    }
    .into_response()
}
