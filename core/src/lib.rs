//! Core of the `ceval` expression evaluator.
//!
//! Source text is parsed by [`parser`] into an arena-backed [`syntax`] tree,
//! which [`evaluator`] reduces to a single [`values::Value`] in one
//! post-order [`visitor`] walk. Most callers only need [`api`].

pub mod api;
pub mod evaluator;
pub mod parser;
pub mod syntax;
pub mod values;
pub mod visitor;

pub use api::{Engine, EngineOptions, Environment, Error, Language, eval};
pub use values::Value;
