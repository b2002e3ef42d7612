use anyhow::Result;
use vivado_gen::commands::{proggen_command, ProgArgs};

fn main() -> Result<()> {
    vivado_gen::init_logging();
    let args: ProgArgs = vivado_gen::parse_args();
    proggen_command(args)
}
