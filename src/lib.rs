#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "Backend for a kanban-style task board: credential storage, session token"]
#![doc = "issuance, task CRUD, and the HTTP surface that ties them together."]
#![doc = "The main binary (`main.rs`) constructs and runs the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
