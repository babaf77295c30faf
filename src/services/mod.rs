// src/services/mod.rs
pub mod auth_service;
pub mod group_service;
pub mod task_service;
pub mod theme_service;
pub mod user_service;
