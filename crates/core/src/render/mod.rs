//! Template registry and artifact writer.
//!
//! All built-in templates are compiled into one [`handlebars::Handlebars`]
//! registry when a [`TemplateRenderer`] is created; nothing is registered
//! lazily or mutated during rendering except the optional user override of
//! the custom template. Built-ins stay available to user templates as
//! partials (`{{> project}}`, `{{> synth}}`, `{{> pnr}}`).
//!
//! The registry runs in strict mode with HTML escaping disabled: a template
//! that refers to a field the binding does not have is an error, and values
//! are emitted verbatim.

pub mod templates;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde::Serialize;

use crate::error::{GenError, GenResult};

/// The artifacts `xprgen` can produce from a [`crate::binding::ProjectBinding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Project,
    Synth,
    Pnr,
    Custom,
}

impl Template {
    pub const ALL: [Template; 4] =
        [Template::Project, Template::Synth, Template::Pnr, Template::Custom];

    /// Registry name, also usable as a partial name.
    pub fn name(&self) -> &'static str {
        match self {
            Template::Project => "project",
            Template::Synth => "synth",
            Template::Pnr => "pnr",
            Template::Custom => "custom",
        }
    }

    fn builtin_source(&self) -> &'static str {
        match self {
            Template::Project => templates::PROJECT,
            Template::Synth => templates::SYNTH,
            Template::Pnr => templates::PNR,
            Template::Custom => templates::CUSTOM,
        }
    }
}

/// Name under which [`templates::PARAMS`] is registered.
pub const PARAMS_TEMPLATE: &str = "params";

// Wraps a value in TCL braces so it is taken literally.
handlebars_helper!(braced: |value: str| format!("{{{}}}", value));
// Space-separated list, as TCL list literals expect.
handlebars_helper!(joined: |values: array| values
    .iter()
    .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
    .collect::<Vec<_>>()
    .join(" "));

pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Build a registry holding every built-in template.
    pub fn new() -> GenResult<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        registry.register_helper("braced", Box::new(braced));
        registry.register_helper("joined", Box::new(joined));

        let mut renderer = Self { registry };
        for template in Template::ALL {
            renderer.register(template.name(), template.builtin_source())?;
        }
        renderer.register(PARAMS_TEMPLATE, templates::PARAMS)?;
        Ok(renderer)
    }

    /// Register (or replace) a template under `name`.
    pub fn register(&mut self, name: &str, source: &str) -> GenResult<()> {
        self.registry.register_template_string(name, source).map_err(|e| {
            GenError::TemplateParse { name: name.to_string(), source: Box::new(e) }
        })
    }

    /// Replace the built-in custom template with the contents of `path`.
    pub fn load_custom_template(&mut self, path: &Path) -> GenResult<()> {
        let source = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        self.register(Template::Custom.name(), &source).map_err(|e| match e {
            GenError::TemplateParse { source, .. } => {
                GenError::TemplateParse { name: path.display().to_string(), source }
            }
            other => other,
        })?;
        log::debug!("custom template loaded from {}", path.display());
        Ok(())
    }

    /// Register the file at `path` under its file name and return that name.
    pub fn load_template_file(&mut self, path: &Path) -> GenResult<String> {
        let source = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        self.register(&name, &source)?;
        Ok(name)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> GenResult<String> {
        self.registry.render(name, data).map_err(|e| GenError::TemplateRender {
            name: name.to_string(),
            source: Box::new(e),
        })
    }

    /// Render `name` into `out`, creating or truncating it.
    ///
    /// An empty `out` means the artifact was not requested: nothing is
    /// created and `Ok(false)` is returned. The file handle is closed when
    /// this returns, whether or not rendering succeeded.
    pub fn write_artifact<T: Serialize>(
        &self,
        name: &str,
        data: &T,
        out: &Path,
    ) -> GenResult<bool> {
        if out.as_os_str().is_empty() {
            log::debug!("no output path for '{name}', skipping");
            return Ok(false);
        }

        let file = File::create(out).map_err(|e| GenError::io(out, e))?;
        let mut writer = BufWriter::new(file);
        self.registry.render_to_write(name, data, &mut writer).map_err(|e| {
            GenError::TemplateRender { name: name.to_string(), source: Box::new(e) }
        })?;
        writer.flush().map_err(|e| GenError::io(out, e))?;

        log::info!("wrote {} ({name})", out.display());
        Ok(true)
    }
}
