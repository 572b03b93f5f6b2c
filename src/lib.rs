// src/lib.rs

pub mod api;
pub mod app_state;
pub mod config;
pub mod content;
pub mod database;
pub mod error;
pub mod files;
pub mod people;
pub mod service;
