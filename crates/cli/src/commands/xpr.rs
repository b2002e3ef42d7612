use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use vivado_gen_core::{
    GeneratorConfig, KeyValueList, OutputPaths, ProjectBinding, ProjectInputs, RepeatedValues,
    Template, TemplateRenderer, VhdlStandard,
};

use crate::working_directory;

/// Generate a Vivado project script plus synthesis and place-and-route scripts.
///
/// Vivado can only create a project in its own working directory, so every
/// script is plain TCL to be sourced from there. Repeated flags keep their
/// command-line order in the output.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "xprgen",
    version = vivado_gen_core::version(),
    about = "Generate Vivado project and run scripts",
    long_about = None
)]
pub struct XprArgs {
    /// Source file; repeat for more. Classified by suffix (.sv, .v, .vhd/.vhdl, other).
    #[arg(long = "source", value_name = "FILE")]
    pub sources: Vec<String>,

    /// (System)Verilog header; its directory is added to the include path.
    #[arg(long = "header", value_name = "FILE")]
    pub headers: Vec<String>,

    /// Verilog include directory.
    #[arg(long = "include-dir", value_name = "DIR")]
    pub include_dirs: Vec<String>,

    /// (System)Verilog define.
    #[arg(long = "define", value_name = "DEFINE")]
    pub defines: Vec<String>,

    /// Source file compiled into a named library.
    #[arg(long = "library-file", value_name = "LIB=FILE")]
    pub library_files: Vec<String>,

    /// Constraint file (.xdc).
    #[arg(long = "constraints", value_name = "FILE")]
    pub constraints: Vec<String>,

    /// VHDL generic for the top entity.
    #[arg(long = "generic", value_name = "KEY=VALUE")]
    pub generics: Vec<String>,

    /// FPGA part to target, e.g. xc7a200tfbg484-2.
    #[arg(long)]
    pub part: Option<String>,

    /// Name of the project to create.
    #[arg(long)]
    pub project_name: Option<String>,

    /// Fileset to create. [default: sources_1]
    #[arg(long)]
    pub fileset_name: Option<String>,

    /// Top-level entity name.
    #[arg(long)]
    pub top_name: Option<String>,

    /// VHDL standard: 1993, 2008 or 2019. [default: 2008]
    #[arg(long)]
    pub vhdl_standard: Option<String>,

    /// Synthesis run to launch. [default: synth_1]
    #[arg(long)]
    pub synth_name: Option<String>,

    /// Directory levels between Vivado's working directory and the paths given here.
    #[arg(long, default_value_t = 0)]
    pub dir_depth: usize,

    /// Output project-creation script.
    #[arg(long)]
    pub out_xpr: Option<String>,

    /// Output synthesis script.
    #[arg(long)]
    pub out_synth: Option<String>,

    /// Output place-and-route script.
    #[arg(long)]
    pub out_pnr: Option<String>,

    /// Output file rendered from the custom template.
    #[arg(long)]
    pub custom_filename: Option<String>,

    /// Template for --custom-filename, replacing the built-in settings template.
    #[arg(long)]
    pub custom_template: Option<PathBuf>,

    /// Checkpoint produced by a previous step.
    #[arg(long)]
    pub load_dcp: Option<String>,

    /// Checkpoint to write after implementation.
    #[arg(long)]
    pub save_dcp: Option<String>,

    /// Where to copy the generated bitstream.
    #[arg(long)]
    pub bitstream: Option<String>,

    /// File to write the timing summary report to.
    #[arg(long)]
    pub timing_report: Option<String>,

    /// File to write the utilization report to.
    #[arg(long)]
    pub utilization_report: Option<String>,

    /// File to write the design rule check report to.
    #[arg(long)]
    pub drc_report: Option<String>,

    /// JSON or YAML file with defaults and the required-flag policy.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the assembled template binding as JSON.
    #[arg(long, default_value_t = false)]
    pub print_binding: bool,
}

/// Load `--config` if given, otherwise the built-in defaults.
pub fn load_generator_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::load(path)
            .with_context(|| format!("Failed to load generator config {}", path.display())),
        None => Ok(GeneratorConfig::default()),
    }
}

/// Gather flags into [`ProjectInputs`], filling unset values from `config`.
pub fn collect_project_inputs(args: &XprArgs, config: &GeneratorConfig) -> Result<ProjectInputs> {
    let vhdl_standard: VhdlStandard =
        args.vhdl_standard.as_deref().unwrap_or(&config.vhdl_standard).parse()?;
    let library_files = KeyValueList::from_values("library-file", &args.library_files)?;
    let generics = KeyValueList::from_values("generic", &args.generics)?;

    let outputs = OutputPaths {
        out_xpr: args.out_xpr.clone().unwrap_or_default(),
        out_synth: args.out_synth.clone().unwrap_or_default(),
        out_pnr: args.out_pnr.clone().unwrap_or_default(),
        custom_filename: args.custom_filename.clone().unwrap_or_default(),
        load_dcp: args.load_dcp.clone().unwrap_or_default(),
        save_dcp: args.save_dcp.clone().unwrap_or_default(),
        bitstream: args.bitstream.clone().unwrap_or_default(),
        timing_report: args.timing_report.clone().unwrap_or_default(),
        utilization_report: args.utilization_report.clone().unwrap_or_default(),
        drc_report: args.drc_report.clone().unwrap_or_default(),
    };

    Ok(ProjectInputs {
        project_name: args.project_name.clone().unwrap_or_default(),
        fileset_name: args.fileset_name.clone().unwrap_or_else(|| config.fileset_name.clone()),
        top_name: args.top_name.clone().unwrap_or_default(),
        part: args.part.clone().unwrap_or_default(),
        vhdl_standard,
        synth_name: args.synth_name.clone().unwrap_or_else(|| config.synth_name.clone()),
        sources: RepeatedValues::from_values("source", &args.sources),
        library_files,
        headers: RepeatedValues::from_values("header", &args.headers),
        include_dirs: RepeatedValues::from_values("include-dir", &args.include_dirs),
        constraints: RepeatedValues::from_values("constraints", &args.constraints),
        defines: RepeatedValues::from_values("define", &args.defines),
        generics,
        dir_depth: args.dir_depth,
        outputs,
    })
}

/// Validate flags, build the binding, and write every requested artifact.
pub fn xprgen_command(args: XprArgs) -> Result<()> {
    let config = load_generator_config(args.config.as_deref())?;
    let inputs = collect_project_inputs(&args, &config)?;
    config.required.check(&inputs)?;

    let pwd = working_directory()?;
    let binding = ProjectBinding::build(inputs, &pwd).context("Failed to classify sources")?;

    if args.print_binding {
        let serialized = serde_json::to_string_pretty(&binding)
            .context("Failed to serialize binding to JSON")?;
        println!("{}", serialized);
    }

    let mut renderer = TemplateRenderer::new().context("Failed to compile built-in templates")?;
    if let Some(path) = &args.custom_template {
        renderer.load_custom_template(path)?;
        if binding.outputs.custom_filename.is_empty() {
            log::warn!(
                "--custom-template {} given without --custom-filename; nothing will use it",
                path.display()
            );
        }
    }

    let written = write_project_artifacts(&renderer, &binding)?;
    if written == 0 && !args.print_binding {
        log::warn!(
            "no outputs requested; pass --out-xpr, --out-synth, --out-pnr or --custom-filename"
        );
    }

    Ok(())
}

/// Render each requested artifact in turn; returns how many were written.
///
/// Stops at the first failure. Files written before it are left in place.
pub fn write_project_artifacts(
    renderer: &TemplateRenderer,
    binding: &ProjectBinding,
) -> Result<usize> {
    let outputs = &binding.outputs;
    let artifacts = [
        (Template::Project, &outputs.out_xpr, "XPR file"),
        (Template::Synth, &outputs.out_synth, "synth file"),
        (Template::Pnr, &outputs.out_pnr, "PNR file"),
        (Template::Custom, &outputs.custom_filename, "custom file"),
    ];

    let mut written = 0;
    for (template, path, label) in artifacts {
        if renderer
            .write_artifact(template.name(), binding, Path::new(path))
            .with_context(|| format!("Failed while writing {label}: {path}"))?
        {
            written += 1;
        }
    }
    Ok(written)
}
