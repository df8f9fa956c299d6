use anyhow::Result;
use clap::{Parser, Subcommand};
use maplinks::{
    auth,
    config::Config,
    pipeline::{PipelineOutcome, Session},
    store::DriveClient,
};
use reqwest::Client;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "maplinks",
    about = "Append a Google Maps link column to spreadsheets in a Drive folder"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List candidate spreadsheets in the configured folder
    List,
    /// Download a file, append the link column, and upload `<base>_with_links.xlsx`
    Run {
        /// Display name of the file, as shown by `list`
        name: String,
        /// Number of transformed rows to print as a preview
        #[arg(long, default_value_t = 5)]
        preview: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();
    let cfg = Config::from_env()?;

    // ─── 2) authenticate; fatal if the store handle can't be built ───
    let authenticator = auth::service_account(&cfg.service_account_key).await?;
    let store = DriveClient::new(Client::new(), authenticator);
    let mut session = Session::new(store, cfg.folder_id);

    // ─── 3) dispatch ─────────────────────────────────────────────────
    match cli.command {
        Command::List => {
            for name in session.file_names().await? {
                println!("{name}");
            }
        }
        Command::Run { name, preview } => match session.run(&name).await {
            Ok(outcome) => {
                println!("✅ Links generated!");
                print_preview(&outcome, preview);
                println!(
                    "✅ Uploaded {} (file ID: {})",
                    outcome.file_name, outcome.file_id
                );
            }
            Err(err) => {
                eprintln!("❌ {:#}", anyhow::Error::new(err));
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

fn print_preview(outcome: &PipelineOutcome, n: usize) {
    println!("{}", outcome.table.headers().join(" | "));
    for row in outcome.preview(n) {
        println!("{}", row.join(" | "));
    }
}
