use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vivado_gen_core::render::PARAMS_TEMPLATE;
use vivado_gen_core::{KeyValueList, ParamsBinding, TemplateRenderer};

/// Generate constraint-file parameter overrides for a top-level cell.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "genparams",
    version = vivado_gen_core::version(),
    about = "Generate XDC parameter overrides",
    long_about = None
)]
pub struct ParamsArgs {
    /// VHDL generic. Text after the first space is ignored.
    #[arg(long = "generic", value_name = "KEY=VALUE")]
    pub generics: Vec<String>,

    /// Verilog parameter. Text after the first space is ignored.
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Verilog top-level cell the parameters apply to.
    #[arg(long)]
    pub verilog_top: Option<String>,

    /// VHDL top-level entity (not supported yet).
    #[arg(long)]
    pub vhdl_top: Option<String>,

    /// Write here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Parse the repeated flags and assemble the binding.
pub fn params_binding(args: &ParamsArgs) -> Result<ParamsBinding> {
    let generics = KeyValueList::from_first_words("generic", &args.generics)?;
    let params = KeyValueList::from_first_words("param", &args.params)?;
    let binding = ParamsBinding::build(
        generics,
        params,
        args.verilog_top.clone().unwrap_or_default(),
        args.vhdl_top.clone().unwrap_or_default(),
    )?;
    Ok(binding)
}

/// Render the parameter script to `--out`, or stdout when it is absent.
pub fn genparams_command(args: ParamsArgs) -> Result<()> {
    let binding = params_binding(&args)?;
    let renderer = TemplateRenderer::new().context("Failed to compile built-in templates")?;

    match &args.out {
        Some(out) => {
            renderer
                .write_artifact(PARAMS_TEMPLATE, &binding, out)
                .with_context(|| format!("Failed to write parameters to {}", out.display()))?;
        }
        None => {
            let rendered = renderer.render(PARAMS_TEMPLATE, &binding)?;
            print!("{}", rendered);
        }
    }

    Ok(())
}
