//! vivado-gen-core
//!
//! Core library behind the Vivado script generators.
//!
//! The pipeline is: collect repeated flags ([`flags`]), sort sources into
//! language buckets ([`classify`]), assemble an immutable record with
//! re-rooted include paths ([`binding`]), and render it through Handlebars
//! templates into output files ([`render`]). Everything substantive lives
//! here so the CLI stays a thin wrapper.

pub mod binding;
pub mod classify;
pub mod config;
pub mod error;
pub mod flags;
pub mod params;
pub mod program;
pub mod render;

pub use binding::{OutputPaths, ProjectBinding, ProjectInputs};
pub use classify::{ClassifiedSources, FileCategory, SourceEntry};
pub use config::{GeneratorConfig, RequiredField, RequiredPolicy, VhdlStandard};
pub use error::{GenError, GenResult};
pub use flags::{KeyValue, KeyValueList, RepeatedValues};
pub use params::ParamsBinding;
pub use program::ProgramBinding;
pub use render::{Template, TemplateRenderer};

/// Returns the library version as encoded at compile time.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
