use citadel_demo::adapters::{FileSettingsProvider, ReqwestHttpClient};
use citadel_demo::bridge::{BridgeApiClient, TokenController};
use citadel_demo::cli::{handle_version_command, parse_args, CliCommand, RunOptions};
use citadel_demo::config::AppConfig;
use citadel_demo::session::{OpenOutcome, WidgetEvent, WidgetGate};
use citadel_demo::state::SettingsStore;
use citadel_demo::traits::SettingsProvider;

use color_eyre::Result;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load persisted settings.
///
/// The flag is false when the file exists but could not be read; the store
/// then starts from defaults and the file must not be overwritten.
async fn load_store(provider: &FileSettingsProvider) -> (SettingsStore, bool) {
    match provider.load().await {
        Ok(Some(snapshot)) => (SettingsStore::from_snapshot(snapshot), true),
        Ok(None) => (SettingsStore::new(), true),
        Err(e) => {
            tracing::warn!(path = %provider.path().display(), "ignoring settings file: {}", e);
            (SettingsStore::new(), false)
        }
    }
}

async fn run(config: AppConfig, options: RunOptions) -> Result<()> {
    let provider = FileSettingsProvider::new()?;
    let (store, loaded) = load_store(&provider).await;

    // Overrides apply to this run only, so such runs never write settings back.
    let overridden = config.overrides_settings() || options.overrides_settings();
    config.seed_store(&store);
    options.apply(&store);

    println!("Environment: {}", store.env().label());
    println!("Product:     {}", store.product().label());

    let api = BridgeApiClient::with_base_url(ReqwestHttpClient::new(), config.api_host.clone());
    let controller = TokenController::new(store.clone(), api);

    match controller.refresh_and_wait(config.token_timeout).await {
        Some(token) => println!("Bridge token: {}", token),
        None => println!("Bridge token: (none)"),
    }

    if options.open {
        let gate = WidgetGate::new(store.clone());
        match gate.open() {
            Ok(OpenOutcome::Opened(_)) | Ok(OpenOutcome::AlreadyActive) => {
                println!("Citadel Bridge opened");
                gate.handle_event(WidgetEvent::Close);
            }
            Err(advisory) => {
                println!();
                println!("{}", advisory.title);
                println!("{}", advisory.message);
                println!("[{}] ({})", advisory.action.label(), advisory.reason.description());
            }
        }
    }

    if overridden {
        tracing::debug!("run used overrides, not saving settings");
    } else if loaded {
        if let Err(e) = provider.save(&store.snapshot()).await {
            tracing::warn!("failed to save settings: {}", e);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let options = match command {
        CliCommand::Version => handle_version_command(),
        CliCommand::Run(options) => options,
    };

    color_eyre::install()?;
    init_tracing();

    let config = AppConfig::from_env()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(config, options))
}
