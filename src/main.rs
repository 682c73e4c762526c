use clap::Parser;
use fundbook::args::{Args, Command};
use fundbook::{api, commands, Config, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().fundbook_home().path();

    // This allows for exercising the program without hitting the Google APIs.
    // When FUNDBOOK_IN_TEST_MODE is set and non-zero in length, the mode will
    // be Mode::Test, otherwise it will be Mode::Google.
    let mode = Mode::from_env();

    let _: () = match args.command() {
        Command::Init(init_args) => {
            commands::init(home, init_args.credentials(), init_args.sheet_url())
                .await?
                .print()
        }

        Command::Add(add_args) => {
            let config = Config::load(home).await?;
            let mut store = api::store(&config, mode).await?;
            commands::add(
                store.as_mut(),
                add_args.kind(),
                add_args.date(),
                add_args.name(),
                add_args.amount(),
            )
            .await?
            .print()
        }

        Command::Show => {
            let config = Config::load(home).await?;
            let mut store = api::store(&config, mode).await?;
            commands::show(store.as_mut()).await?.print()
        }

        Command::Summary => {
            let config = Config::load(home).await?;
            let mut store = api::store(&config, mode).await?;
            commands::summary(store.as_mut()).await?.print()
        }

        Command::Export(export_args) => {
            let config = Config::load(home).await?;
            let mut store = api::store(&config, mode).await?;
            commands::export(store.as_mut(), export_args.format(), export_args.out())
                .await?
                .print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
