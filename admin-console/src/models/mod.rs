//! Typed views over the untyped records served by rbac-service.

pub mod forms;
pub mod lenient;
pub mod mutation;
pub mod permission;
pub mod role;
pub mod user;
pub mod view;

pub use forms::{first_message, NameForm};
pub use mutation::Mutation;
pub use permission::{Action, Actions, Permission};
pub use role::{PermissionRef, Role};
pub use user::{NewUserForm, User};
pub use view::{PermissionRow, RoleCard, RoleGrantCard};
