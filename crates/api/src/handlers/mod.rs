pub mod auth;
pub mod cases;
pub mod dashboard;
pub mod records;
pub mod tables;
