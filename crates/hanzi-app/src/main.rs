use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use hanzi_config::logging::LoggingConfig;
use hanzi_core::language::LookupScope;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod output;
pub mod profile;
pub mod state;


use self::controller::AppController;
use self::io::Input;
use self::output::OutputFormat;
use self::state::AppState;

/// Look up Chinese words and characters in CC-CEDICT and CC-Canto
#[derive(Parser)]
#[command(name = "hanzi", version)]
struct Args {
    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dictionaries to consult
    #[arg(long, value_enum, default_value_t = ScopeArg::Combined)]
    scope: ScopeArg,

    /// Print one JSON object per response
    #[arg(long)]
    json: bool,

    /// Texts to look up; read one per line from stdin when omitted
    text: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    Mandarin,
    Cantonese,
    Combined,
}

impl From<ScopeArg> for LookupScope {
    fn from(scope: ScopeArg) -> Self {
        match scope {
            ScopeArg::Mandarin => LookupScope::Mandarin,
            ScopeArg::Cantonese => LookupScope::Cantonese,
            ScopeArg::Combined => LookupScope::Combined,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let config = profile::load_config(args.config.as_deref())?;
    init_tracing(&config.logging);

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);

    let input = if args.text.is_empty() {
        Input::Stdin
    } else {
        Input::Args(args.text)
    };
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let mut tasks = controller.spawn_tasks(input, args.scope.into(), format);

    loop {
        tokio::select! {
            joined = tasks.join_next() => {
                match joined {
                    Some(Ok(Ok(()))) => {}
                    Some(Ok(Err(e))) => {
                        tracing::error!("Task failed: {e}");
                        controller.shutdown();
                        tasks.abort_all();
                        return Err(e);
                    }
                    Some(Err(e)) => {
                        tracing::error!("Task panicked: {e}");
                        controller.shutdown();
                        tasks.abort_all();
                        return Err(e.into());
                    }
                    None => break,
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                controller.shutdown();
            }
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
