// SPDX-License-Identifier: MPL-2.0
use iced_toasts::app::{self, Flags};

const HELP: &str = "\
Toast notification demo

USAGE:
  iced_toasts [OPTIONS]

OPTIONS:
  --placement <SIDE>     top, bottom, left or right
  --timeout-ms <MS>      auto-dismiss countdown length
  --config-dir <PATH>    directory holding settings.toml
  -h, --help             print this help
";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        placement: args.opt_value_from_str("--placement")?,
        timeout_ms: args.opt_value_from_str("--timeout-ms")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("Warning: unused arguments {remaining:?}");
    }
    Ok(Some(flags))
}

fn main() -> iced::Result {
    match parse_flags() {
        Ok(Some(flags)) => app::run(flags),
        Ok(None) => {
            print!("{HELP}");
            Ok(())
        }
        Err(err) => {
            eprintln!("Error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    }
}
