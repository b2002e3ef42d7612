use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use vivado_gen_core::{ProgramBinding, TemplateRenderer};

use crate::log_environment;

/// Generate a device-programming script from a template.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "proggen",
    version = vivado_gen_core::version(),
    about = "Generate an FPGA programming script",
    long_about = None
)]
pub struct ProgArgs {
    /// The output file to generate.
    #[arg(long)]
    pub outfile: Option<String>,

    /// The template file to use for generation.
    #[arg(long)]
    pub template: Option<String>,

    /// The script for running docker.
    #[arg(long = "run-docker")]
    pub run_docker: Option<String>,

    /// The gotopt2 binary to use.
    #[arg(long)]
    pub gotopt2: Option<String>,

    /// The bitstream to program.
    #[arg(long)]
    pub bitfile: Option<String>,
}

impl From<ProgArgs> for ProgramBinding {
    fn from(args: ProgArgs) -> Self {
        ProgramBinding {
            outfile: args.outfile.unwrap_or_default(),
            template_file: args.template.unwrap_or_default(),
            run_docker_file: args.run_docker.unwrap_or_default(),
            gotopt_file: args.gotopt2.unwrap_or_default(),
            bit_file: args.bitfile.unwrap_or_default(),
        }
    }
}

/// Render the programming script template into `--outfile`.
pub fn proggen_command(args: ProgArgs) -> Result<()> {
    log_environment();

    let binding = ProgramBinding::from(args);
    binding.validate()?;

    let template_path = Path::new(&binding.template_file);
    let mut renderer = TemplateRenderer::new().context("Failed to compile built-in templates")?;
    let name = renderer.load_template_file(template_path).with_context(|| {
        format!("could not open or parse template file: {}", template_path.display())
    })?;

    let outfile = Path::new(&binding.outfile);
    renderer
        .write_artifact(&name, &binding, outfile)
        .with_context(|| format!("could not write outfile: {}", outfile.display()))?;

    Ok(())
}
