//! # todo-service
//!
//! A small task-tracking HTTP service: create, list, fetch, update and delete
//! tasks (numeric id, title, completion flag) stored in an `SQLite` file.
//!
//! ## Layers
//!
//! - [`domain`]: the `Task` entity and field validation
//! - [`infrastructure`]: the `TaskRepository` gateway and its `SQLite` and
//!   in-memory implementations
//! - [`service`]: the CRUD operations and their outcome taxonomy
//! - [`api`]: JSON decoding, status mapping, handlers and routes
//! - [`config`]: listener, runtime and logging settings

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod service;
