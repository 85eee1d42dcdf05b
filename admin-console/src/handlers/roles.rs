use super::{banner_only, page_status};
use crate::models::{first_message, Mutation, NameForm, Permission, Role, RoleCard};
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
#[template(path = "roles.html")]
pub struct RolesTemplate {
    pub cards: Vec<RoleCard>,
    pub has_permissions: bool,
    pub form: NameForm,
    pub error: Option<String>,
}

/// One role's assignment matrix, re-rendered after a toggle.
#[derive(Template)]
#[template(path = "partials/role_card_fragment.html")]
pub struct RoleCardTemplate {
    pub card: RoleCard,
    pub error: Option<String>,
}

async fn load(state: &AppState) -> anyhow::Result<(Vec<Role>, Vec<Permission>)> {
    futures::try_join!(state.rbac.list_roles(), state.rbac.list_permissions())
}

impl RolesTemplate {
    async fn load(state: &AppState, form: NameForm) -> Self {
        match load(state).await {
            Ok((roles, permissions)) => Self {
                cards: roles
                    .iter()
                    .map(|role| RoleCard::new(role, &permissions))
                    .collect(),
                has_permissions: !permissions.is_empty(),
                form,
                error: None,
            },
            Err(e) => Self {
                cards: Vec::new(),
                has_permissions: false,
                form,
                error: Some(e.to_string()),
            },
        }
    }
}

pub async fn roles_page(State(state): State<AppState>) -> Response {
    let page = RolesTemplate::load(&state, NameForm::default()).await;
    (page_status(&page.error), page).into_response()
}

pub async fn create_role(State(state): State<AppState>, Form(form): Form<NameForm>) -> Response {
    let form = form.trimmed();
    if let Err(errors) = form.validate() {
        let mut page = RolesTemplate::load(&state, form).await;
        page.error = Some(first_message(&errors));
        return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
    }

    match state.rbac.create_role(&form.name).await {
        Ok(role) => {
            tracing::info!(role_id = role.id, "Role added");
            Redirect::to("/roles").into_response()
        }
        Err(e) => {
            let mut page = RolesTemplate::load(&state, form).await;
            page.error = Some(e.to_string());
            (StatusCode::BAD_GATEWAY, page).into_response()
        }
    }
}

/// Assign or unassign a permission, then PUT the whole role.
pub async fn toggle_role_permission(
    State(state): State<AppState>,
    Path((role_id, permission_id)): Path<(i64, i64)>,
) -> Response {
    let (roles, permissions) = match load(&state).await {
        Ok(loaded) => loaded,
        Err(e) => return banner_only(e.to_string()),
    };
    let Some(role) = roles.into_iter().find(|r| r.id == role_id) else {
        return banner_only("Role is not found");
    };

    let mutation = Mutation::begin(role, |r| r.toggle_permission(permission_id));
    let outcome = state
        .rbac
        .update_role(mutation.optimistic(), "Failed to update role permissions")
        .await;
    let mutation = mutation.settle(outcome);

    if let Some(message) = mutation.error() {
        tracing::warn!(role_id, permission_id, error = %message, "Role update reverted");
    }

    RoleCardTemplate {
        card: RoleCard::new(mutation.visible(), &permissions),
        error: mutation.error().map(str::to_string),
    }
    .into_response()
}
