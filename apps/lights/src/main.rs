use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings_from, DEFAULT_CONFIG_FILE},
    PersonalizeClient, ReconciliationFlow, Session,
};
use shared::{
    domain::{SettingKind, UserId},
    token::encode,
    validation::{is_valid_user_id, INVALID_USER_ID_MESSAGE},
};
use storage::Storage;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(name = "lights", about = "Personalized smart-light settings")]
struct Cli {
    /// Client settings file; missing is fine.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Remember USER_ID as the active user.
    Login { user_id: String },
    Logout,
    /// Show the active user and the last applied settings.
    Status,
    /// Fetch and show the recommended settings.
    Recommend,
    /// Fetch the recommendation, apply overrides and send them as feedback.
    Apply {
        #[arg(long, allow_hyphen_values = true)]
        brightness: Option<i64>,
        #[arg(long, allow_hyphen_values = true)]
        cct: Option<i64>,
        #[arg(long, allow_hyphen_values = true)]
        dimmer: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings_from(&cli.config)?;
    debug!(endpoint = %settings.endpoint, database = %settings.database_url, "loaded client settings");
    let storage = Storage::new(&settings.normalized_database_url()).await?;
    let mut session = Session::new(storage);
    session.bootstrap().await;

    match cli.command {
        Command::Login { user_id } => {
            if !is_valid_user_id(&user_id) {
                bail!(INVALID_USER_ID_MESSAGE);
            }
            let user_id = UserId::parse(&user_id)?;
            session
                .login(user_id.clone())
                .await
                .context("Failed to log in. Please try again.")?;
            println!("Logged in as {user_id}");
        }
        Command::Logout => {
            session.logout().await.context("Failed to log out")?;
            println!("Logged out");
        }
        Command::Status => match session.user_id() {
            Some(user_id) => {
                println!("User: {user_id}");
                match session.last_applied().await? {
                    Some(applied) => println!("Last applied: {}", encode(&applied)),
                    None => println!("Last applied: none"),
                }
            }
            None => println!("Not logged in"),
        },
        Command::Recommend => {
            ensure_logged_in(&session)?;
            let mut flow = ReconciliationFlow::new(PersonalizeClient::new(&settings)?);
            if let Err(err) = flow.refresh(&session).await {
                eprintln!("Failed to fetch recommendations. Please try again. ({err})");
            }
            print_screen(&session, &flow);
        }
        Command::Apply {
            brightness,
            cct,
            dimmer,
        } => {
            ensure_logged_in(&session)?;
            let mut flow = ReconciliationFlow::new(PersonalizeClient::new(&settings)?);
            flow.refresh(&session)
                .await
                .context("Failed to fetch recommendations. Please try again.")?;

            for (kind, value) in [
                (SettingKind::Brightness, brightness),
                (SettingKind::ColorTemperature, cct),
                (SettingKind::DimmerRate, dimmer),
            ] {
                if let Some(value) = value {
                    flow.set(kind, value);
                }
            }
            print_screen(&session, &flow);

            if !flow.is_adjusted() {
                println!("Using Recommended Settings");
                return Ok(());
            }

            let applied = flow
                .apply(&session)
                .await
                .context("Failed to save your preferences. Please try again.")?;
            session.remember_applied(&applied).await?;
            println!("Your preferences have been saved!");
        }
    }

    Ok(())
}

fn ensure_logged_in(session: &Session<Storage>) -> Result<()> {
    if !session.is_authenticated() {
        bail!("Not logged in; run `lights login <USER_ID>` first");
    }
    Ok(())
}

fn print_screen(session: &Session<Storage>, flow: &ReconciliationFlow<PersonalizeClient>) {
    if let Some(user_id) = session.user_id() {
        println!("Welcome, {user_id}");
    }
    match flow.confidence() {
        Some(confidence) => println!(
            "Your Recommended Settings (confidence {:.0}%)",
            confidence * 100.0
        ),
        None => println!("Your Recommended Settings"),
    }
    print!(
        "{}",
        render::render_sliders(flow.current(), flow.recommended(), &flow.deltas())
    );
}
