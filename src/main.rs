use clap::Parser;
use log::info;
use snafu::ErrorCompat;

mod args;
mod report;

fn main() {
    let args = args::Args::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    if args.verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    }
    log_builder.init();

    info!("args: {:?}", args);

    if let Err(e) = report::run_report(&args) {
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
