//! Mergington High School activities API.
//!
//! Students browse extracurricular activities and sign themselves up. The
//! roster lives in process memory and is reseeded on every start.

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod web;
