pub mod activity;
pub mod activity_type;
pub mod employee;
pub mod project;
pub mod role;
