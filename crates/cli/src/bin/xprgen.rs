use anyhow::Result;
use vivado_gen::commands::{xprgen_command, XprArgs};

fn main() -> Result<()> {
    vivado_gen::init_logging();
    let args: XprArgs = vivado_gen::parse_args();
    xprgen_command(args)
}
