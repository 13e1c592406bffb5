//! relation-core
//!
//! Core library that inspects an ORM model through a reflection interface and
//! reports which of its public methods define relations (belongs-to, has-many,
//! and the other relation kinds) as opposed to plain data accessors.
//!
//! Reflection itself is not performed here. Callers implement [`model::Model`]
//! atop whatever introspection they have (a live runtime bridge, generated
//! metadata, or a [`manifest::ModelManifest`] loaded from JSON) and hand it to
//! [`analysis::RelationClassifier`].

pub mod model;
pub mod docblock;
pub mod base_model;
pub mod analysis;
pub mod manifest;
pub mod config;
pub mod error;

pub use analysis::{Classification, RelationClassifier, RelationMethod};
pub use error::{AnalysisError, ModelError};
pub use model::{MethodInfo, Model, ModelReflection, RelationKind, RuntimeValue, TypeRef};
