// Library for tests to access modules

pub mod axis;
pub mod calendar;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod normalizer;
pub mod render;
pub mod routes;
pub mod series;
pub mod snapshot_repo;
pub mod version;
