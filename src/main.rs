mod app;

use clap::Parser;

use crate::app::cli::Cli;

fn init_logging(quiet: bool, verbose: u8) {
    let level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", level);
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Cli::parse();
    init_logging(args.quiet, args.verbose);

    if let Err(err) = app::run(args).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
