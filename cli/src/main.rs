
use std::path::PathBuf;
use std::process::ExitCode;

use chat_client::config::DEFAULT_BASE_URL;
use chat_client::{App, AuthError, ClientConfig, ConfigError, Navigation};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("no route matches `{0}`")]
    NotFound(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "chat-cli", about = "Sign in to the chat backend and navigate its routes")]
struct Cli {
    #[arg(long, env = "CHAT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Directory holding the persisted session token.
    #[arg(long, env = "CHAT_STATE_DIR")]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange credentials for a token and store it.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CHAT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in with it.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CHAT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored token.
    Logout,
    /// Show whether a session is held and where the app lands.
    Status,
    /// Navigate to a route through the auth guard.
    Open { path: String },
    /// Authorized GET against the backend.
    Get { path: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = build_config(&cli)?;
    let mut app = App::from_config(config)?;

    match cli.command {
        Command::Login { username, password } => {
            let nav = app.login(&username, &password).await?;
            println!("signed in as {username}");
            println!("{}", describe_navigation(&nav));
        }
        Command::Register { username, password } => {
            let nav = app.register(&username, &password).await?;
            println!("registered and signed in as {username}");
            println!("{}", describe_navigation(&nav));
        }
        Command::Logout => {
            let nav = app.logout();
            println!("signed out");
            println!("{}", describe_navigation(&nav));
        }
        Command::Status => {
            let state = if app.store().is_authenticated() { "signed in" } else { "signed out" };
            println!("{state}");
            println!("{}", describe_navigation(&app.start()));
        }
        Command::Open { path } => match app.navigate(&path) {
            Navigation::NotFound(path) => return Err(CliError::NotFound(path)),
            nav => println!("{}", describe_navigation(&nav)),
        },
        Command::Get { path } => {
            let resp = app.store().send_authorized(reqwest::Method::GET, &path).await?;
            let body = resp.text().await?;
            match serde_json::from_str::<Value>(&body) {
                Ok(json) => print_json(&json)?,
                Err(_) => println!("{body}"),
            }
        }
    }
    Ok(())
}

/// Config for `--base-url` (which clap already falls back to `CHAT_BASE_URL` for),
/// with timeouts and the state dir taken from the environment.
fn build_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env_with_base_url(&cli.base_url)?;
    if let Some(dir) = &cli.state_dir {
        config.state_dir.clone_from(dir);
    }
    Ok(config)
}

fn describe_navigation(nav: &Navigation) -> String {
    match nav {
        Navigation::Rendered(route) => format!("-> {} ({})", route.path, route.name),
        Navigation::Redirected { requested, route } => {
            format!("-> {} ({}), redirected from {requested}", route.path, route.name)
        }
        Navigation::NotFound(path) => format!("no route matches {path}"),
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
