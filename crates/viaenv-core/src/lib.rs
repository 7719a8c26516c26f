//! Core library for the `ViaEnv` dashboard.
//!
//! Contains the domain model, the derived-view pipeline (filter, sort,
//! reveal, copy) shared by every list page, the theme token tables, the
//! canonical route table and sidebar menu, and input validation. This crate
//! knows nothing about HTTP or where the data comes from; the repository
//! trait lives in `viaenv-storage` and the rendering in `viaenv-server`.

pub mod allowlist;
pub mod error;
pub mod menu;
pub mod model;
pub mod pipeline;
pub mod route;
pub mod theme;
pub mod view;
