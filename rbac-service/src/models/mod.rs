//! Record model for the three RBAC collections.
//!
//! Records are kept as open JSON objects: whatever fields a client posts are
//! stored and echoed back, and nothing but `id` is interpreted by the service.

pub mod permission;
pub mod record;
pub mod resource;

pub use permission::Actions;
pub use record::{parse_body, record_id, shallow_merge, Record};
pub use resource::Resource;
