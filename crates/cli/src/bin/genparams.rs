use anyhow::Result;
use vivado_gen::commands::{genparams_command, ParamsArgs};

fn main() -> Result<()> {
    vivado_gen::init_logging();
    let args: ParamsArgs = vivado_gen::parse_args();
    genparams_command(args)
}
