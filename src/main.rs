mod bills;
mod display;
mod session;
mod settings;
mod store;

use anyhow::Result;
use clap::{arg, Command};
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::settings::Settings;

static CLIENT_NAME: &str = "billed";

async fn run() -> Result<()> {
    let app = Command::new(CLIENT_NAME)
        .about("The billed utility lists an employee's expense reports and \
         previews their receipts.")
        .version("0.1.0")
        .subcommand_required(true)
        .allow_external_subcommands(false)
        .arg(arg!(CONFIG: -c --config [FILE] "Sets a custom config file"))
        .arg(arg!(verbose: -v --verbose [Boolean] "Sets the level of verbosity"))
        .subcommand(Command::new("bills")
            .subcommand_required(true)
            .about("Works with the signed-in employee's expense reports.")
            .subcommand(Command::new("list")
                .about("Lists bills, most recent first.")
                .arg(arg!(html: --html "Prints the bills page markup instead of a table.")))
            .subcommand(Command::new("new")
                .about("Opens the new bill form."))
            .subcommand(Command::new("receipt")
                .about("Previews the receipt attached to a bill.")
                .arg(arg!(id: <ID> "The ID of the bill whose receipt to preview."))));

    let matches = app.get_matches();

    if matches.value_of("verbose") == Some("true") {
        tracing_subscriber::registry()
            .with(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    match matches.subcommand() {
        Some(("bills", bills_matches)) => {
            let settings = Settings::new(matches.value_of("CONFIG"))?;
            bills::run(bills_matches, settings).await?;
        }
        None => unreachable!("subcommand is required"),
        _ => unreachable!(),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        println!("{}", err);
        std::process::exit(1);
    }
}
