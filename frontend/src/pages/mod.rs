pub mod backup;
pub mod custom_fields;
pub mod database;
pub mod email;
pub mod maintenance;
pub mod performance;
