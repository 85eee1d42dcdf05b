pub mod rbac_client;
