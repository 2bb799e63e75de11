pub mod backup;
pub mod choice;
pub mod custom_field;
pub mod database;
pub mod email;
pub mod maintenance;
pub mod metrics;
pub mod record;
pub mod value;
