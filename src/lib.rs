//! Library exports for the URL shortener application
//!
//! This module exposes internal components for testing and potential library usage.

pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod repository;
pub mod route;
pub mod utils;
