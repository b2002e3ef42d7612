//! Assembly of the record every template is rendered against.
//!
//! [`ProjectInputs`] is what the flag collectors produce; [`ProjectBinding`]
//! is the frozen, classified, path-adjusted form handed to the renderer.
//! Field names are serialized in PascalCase, and those names are the
//! variables available to templates (`{{ProjectName}}`, `{{#each VhdlFiles}}`).

pub mod paths;

use std::path::Path;

use serde::Serialize;

use crate::classify::{ClassifiedSources, SourceEntry};
use crate::config::{VhdlStandard, DEFAULT_FILESET_NAME, DEFAULT_SYNTH_NAME};
use crate::error::GenResult;
use crate::flags::{KeyValueList, RepeatedValues};

/// Output targets. An empty path means the artifact was not requested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputPaths {
    /// Project-creation script.
    pub out_xpr: String,
    /// Synthesis script.
    pub out_synth: String,
    /// Place-and-route and bitstream script.
    pub out_pnr: String,
    /// File rendered from the custom template.
    pub custom_filename: String,
    /// Checkpoint a previous step produced.
    pub load_dcp: String,
    /// Checkpoint this step should produce.
    pub save_dcp: String,
    /// Where the final bitstream is copied.
    pub bitstream: String,
    pub timing_report: String,
    pub utilization_report: String,
    pub drc_report: String,
}

impl OutputPaths {
    /// Whether the PnR script must open the implemented design after the
    /// run finishes (for reports or a checkpoint).
    pub fn needs_impl_design(&self) -> bool {
        [&self.timing_report, &self.utilization_report, &self.drc_report, &self.save_dcp]
            .iter()
            .any(|p| !p.is_empty())
    }
}

/// Everything collected from the command line, before classification.
#[derive(Debug, Clone)]
pub struct ProjectInputs {
    pub project_name: String,
    pub fileset_name: String,
    pub top_name: String,
    pub part: String,
    pub vhdl_standard: VhdlStandard,
    pub synth_name: String,
    pub sources: RepeatedValues,
    /// `library=file` pairs: key is the library, value the file.
    pub library_files: KeyValueList,
    pub headers: RepeatedValues,
    pub include_dirs: RepeatedValues,
    pub constraints: RepeatedValues,
    pub defines: RepeatedValues,
    pub generics: KeyValueList,
    /// How many directory levels Vivado's working directory sits below the
    /// paths given on the command line.
    pub dir_depth: usize,
    pub outputs: OutputPaths,
}

impl Default for ProjectInputs {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            fileset_name: DEFAULT_FILESET_NAME.to_string(),
            top_name: String::new(),
            part: String::new(),
            vhdl_standard: VhdlStandard::default(),
            synth_name: DEFAULT_SYNTH_NAME.to_string(),
            sources: RepeatedValues::new("source"),
            library_files: KeyValueList::new("library-file"),
            headers: RepeatedValues::new("header"),
            include_dirs: RepeatedValues::new("include-dir"),
            constraints: RepeatedValues::new("constraints"),
            defines: RepeatedValues::new("define"),
            generics: KeyValueList::new("generic"),
            dir_depth: 0,
            outputs: OutputPaths::default(),
        }
    }
}

/// The immutable record rendered into every `xprgen` artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectBinding {
    pub project_name: String,
    pub fileset_name: String,
    pub top_name: String,
    /// FPGA part designator, e.g. `xc7a200tfbg484-2`. May be empty.
    pub part: String,
    pub vhdl_standard: String,
    /// `read_vhdl` switch for `vhdl_standard`; empty for VHDL-93.
    pub vhdl_flag: String,
    pub synth_name: String,
    /// `(System)Verilog` defines, as given.
    pub defines: Vec<String>,
    /// VHDL generics as `KEY=VALUE`.
    pub generics: Vec<String>,
    pub system_verilog_files: Vec<SourceEntry>,
    pub verilog_files: Vec<SourceEntry>,
    pub vhdl_files: Vec<SourceEntry>,
    pub other_files: Vec<SourceEntry>,
    pub headers: Vec<String>,
    /// Include directories followed by header directories, all re-rooted by
    /// `dir_depth`.
    pub include_dirs: Vec<String>,
    pub constraints: Vec<String>,
    pub pwd: String,
    pub dir_depth: usize,
    pub needs_impl_design: bool,
    #[serde(flatten)]
    pub outputs: OutputPaths,
}

impl ProjectBinding {
    /// Classify sources and resolve paths. `pwd` is the working directory,
    /// resolved once by the caller; nothing else here touches the filesystem.
    pub fn build(inputs: ProjectInputs, pwd: &Path) -> GenResult<Self> {
        let sources = classify_inputs(&inputs.library_files, &inputs.sources)?;
        let include_dirs =
            resolve_include_dirs(&inputs.include_dirs, &inputs.headers, inputs.dir_depth);
        let needs_impl_design = inputs.outputs.needs_impl_design();

        Ok(Self {
            project_name: inputs.project_name,
            fileset_name: inputs.fileset_name,
            top_name: inputs.top_name,
            part: inputs.part,
            vhdl_standard: inputs.vhdl_standard.as_str().to_string(),
            vhdl_flag: inputs.vhdl_standard.read_flag().to_string(),
            synth_name: inputs.synth_name,
            defines: inputs.defines.into_values(),
            generics: inputs.generics.pairs().iter().map(|kv| kv.to_string()).collect(),
            system_verilog_files: sources.system_verilog,
            verilog_files: sources.verilog,
            vhdl_files: sources.vhdl,
            other_files: sources.other,
            headers: inputs.headers.into_values(),
            include_dirs,
            constraints: inputs.constraints.into_values(),
            pwd: pwd.display().to_string(),
            dir_depth: inputs.dir_depth,
            needs_impl_design,
            outputs: inputs.outputs,
        })
    }
}

/// Sort library-tagged files, then plain sources, into per-language lists.
///
/// Order within each list follows the command line.
pub fn classify_inputs(
    library_files: &KeyValueList,
    sources: &RepeatedValues,
) -> GenResult<ClassifiedSources> {
    log::debug!(
        "classifying {} --{} and {} --{} entries",
        library_files.len(),
        library_files.flag(),
        sources.len(),
        sources.flag()
    );
    let mut classified = ClassifiedSources::new();
    for pair in library_files.pairs() {
        classified.push(SourceEntry::with_library(&pair.value, &pair.key))?;
    }
    for source in sources.values() {
        classified.push(SourceEntry::new(source))?;
    }
    Ok(classified)
}

/// Re-root explicit include dirs, then the directory of every header.
pub fn resolve_include_dirs(
    include_dirs: &RepeatedValues,
    headers: &RepeatedValues,
    dir_depth: usize,
) -> Vec<String> {
    let prefix = paths::parent_prefix(dir_depth);
    let explicit = include_dirs.values().iter().map(|dir| paths::join_prefixed(&prefix, dir));
    let from_headers =
        headers.values().iter().map(|hdr| paths::join_prefixed(&prefix, &paths::dir_of(hdr)));
    explicit.chain(from_headers).collect()
}
