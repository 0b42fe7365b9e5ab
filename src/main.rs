// SPDX-License-Identifier: MPL-2.0
use farewell_lens::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: farewell_lens [OPTIONS] [IMAGE]

Arguments:
  [IMAGE]                Image path or URL to open in the viewer

Options:
  --lang <LOCALE>        Interface language (e.g. en-US, fr)
  --data-dir <DIR>       Where cards and uploaded images are stored
  --config-dir <DIR>     Where settings.toml is read from
  --ephemeral            Keep cards in memory only
  -h, --help             Print this help";

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        ephemeral: args.contains("--ephemeral"),
        file_path: None,
    };

    Ok(Flags {
        file_path: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
        ..flags
    })
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        println!("{USAGE}");
        return Ok(());
    }

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());
    tracing::debug!(?flags, "parsed command line");

    app::run(flags)
}
