//! Platform-neutral core of the CRM administration console.
//!
//! Everything a screen needs except rendering lives here: the record model and
//! entity types, form coercion and validation, the generic [`editor::CollectionEditor`],
//! tab shell state, the bootstrap loader and the console configuration. The crate
//! builds for both native targets and `wasm32`.

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod editor;
pub mod form;
pub mod model;
pub mod screens;
pub mod shell;
pub mod validation;
