use super::page_status;
use crate::models::{first_message, NewUserForm, Role, User};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use validator::Validate;

#[derive(Template)]
#[template(path = "users.html")]
pub struct UsersTemplate {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub form: NewUserForm,
    pub error: Option<String>,
}

impl UsersTemplate {
    async fn load(state: &AppState, form: NewUserForm) -> Self {
        let loaded = futures::try_join!(state.rbac.list_users(), state.rbac.list_roles());
        match loaded {
            Ok((users, roles)) => Self {
                users,
                roles,
                form,
                error: None,
            },
            Err(e) => Self {
                users: Vec::new(),
                roles: Vec::new(),
                form,
                error: Some(e.to_string()),
            },
        }
    }
}

pub async fn users_page(State(state): State<AppState>) -> Response {
    let page = UsersTemplate::load(&state, NewUserForm::default()).await;
    (page_status(&page.error), page).into_response()
}

pub async fn create_user(
    State(state): State<AppState>,
    Form(form): Form<NewUserForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        let mut page = UsersTemplate::load(&state, form).await;
        page.error = Some(first_message(&errors));
        return (StatusCode::UNPROCESSABLE_ENTITY, page).into_response();
    }

    match state.rbac.create_user(&form.to_body()).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "User added");
            Redirect::to("/users").into_response()
        }
        Err(e) => {
            let mut page = UsersTemplate::load(&state, form).await;
            page.error = Some(e.to_string());
            (StatusCode::BAD_GATEWAY, page).into_response()
        }
    }
}
