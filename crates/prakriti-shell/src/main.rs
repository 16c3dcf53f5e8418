use clap::{Parser, Subcommand};
use eyre::Result;
use uuid::Uuid;

use prakriti_core::models::follow_up::FollowUpKind;

mod commands;

#[derive(Parser)]
#[command(name = "prakriti", version)]
#[command(about = "Prakriti assessment, daily schedule and follow-up administration")]
#[command(
    after_help = "Environment:\n  PRAKRITI_URL            Store URL override\n  PRAKRITI_ANON_KEY       Anon key override\n  PRAKRITI_ACCESS_TOKEN   Access token override\n  RUST_LOG                Log filter (default: info)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Take the Prakriti questionnaire, then show the resulting schedule.
    Assess,
    /// Show the daily schedule for the latest assessment.
    Schedule,
    /// Administrator panel.
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
    /// Show or change the stored configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// List non-administrator accounts.
    Users,
    /// Show an account's details and follow-ups.
    FollowUps { account: Uuid },
    /// Schedule a follow-up for an account.
    Add {
        account: Uuid,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = FollowUpKind::Reminder)]
        kind: FollowUpKind,
        /// Local date and time, `YYYY-MM-DDTHH:MM`.
        #[arg(long)]
        at: String,
    },
    /// Delete one of an account's follow-ups after confirmation.
    Delete { account: Uuid, follow_up: Uuid },
}

#[derive(Subcommand)]
enum ConfigCommand {
    Show,
    Set {
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        anon_key: Option<String>,
        #[arg(long)]
        access_token: Option<String>,
        #[arg(long)]
        jwt_secret: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Show => commands::config_show(),
            ConfigCommand::Set {
                url,
                anon_key,
                access_token,
                jwt_secret,
            } => commands::config_set(url, anon_key, access_token, jwt_secret),
        },
        Command::Assess => commands::assess(&commands::connect().await?).await,
        Command::Schedule => commands::schedule(&commands::connect().await?).await,
        Command::Admin { command } => {
            let shell = commands::connect().await?;
            match command {
                AdminCommand::Users => commands::admin_users(&shell).await,
                AdminCommand::FollowUps { account } => {
                    commands::admin_follow_ups(&shell, account).await
                }
                AdminCommand::Add {
                    account,
                    title,
                    description,
                    kind,
                    at,
                } => commands::admin_add(&shell, account, title, description, kind, at).await,
                AdminCommand::Delete { account, follow_up } => {
                    commands::admin_delete(&shell, account, follow_up).await
                }
            }
        }
    }
}
