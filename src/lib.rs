//! Fyyur: a listings site for booking artists at venues.
//!
//! Venues and artists are listed with their details, and shows pair one
//! artist with one venue at a start time. Pages are server-rendered with
//! askama, and all data lives in SQLite behind sqlx.
//!
//! The site is laid out as:
//!
//! - `/`: the home page
//! - `/venues`: venues grouped by city and state, plus search, detail,
//!   create, edit and delete under `/venues/...`
//! - `/artists`: the same for artists
//! - `/shows`: upcoming and past shows, plus search, create, edit and delete

pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod forms;
pub mod models;
pub mod routes;
pub mod templates;
pub mod util;
pub mod validation;

pub use crate::routes::router;
