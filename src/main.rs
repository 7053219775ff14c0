use anyhow::Result;
use clap::{Parser, Subcommand};
use nanostat::config::AppConfig;
use nanostat::fetcher::TelemetryFetcher;
use nanostat::models::{MonitorPosition, MonitorSettings};
use nanostat::provider::{LocalProvider, Provider, RemoteProvider};
use nanostat::routes;
use nanostat::settings_file::SettingsFile;
use nanostat::store::SettingsStore;
use nanostat::surface::dashboard::{self, DashboardState};
use nanostat::surface::overlay;
use nanostat::sysinfo_repo::SysinfoRepo;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[derive(Parser)]
#[command(name = "nanostat", version, about = "Hardware telemetry dashboard and overlay")]
struct Cli {
    /// Config file (defaults to $NANOSTAT_CONFIG, then nanostat.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the provider: host sampling, settings persistence, overlay window state
    Serve,
    /// Mount the dashboard surface and print its state
    Dashboard,
    /// Mount the overlay surface and print what it renders
    Overlay,
    /// Read or write monitor settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the provider's current settings as JSON
    Get,
    /// Move the overlay (position-only write)
    SetPosition { position: MonitorPosition },
    /// Change settings and commit them (shows/hides the overlay to match `enabled`)
    Set {
        #[arg(long)]
        enabled: Option<bool>,
        #[arg(long)]
        position: Option<MonitorPosition>,
        #[arg(long)]
        refresh_interval: Option<u32>,
        #[arg(long)]
        opacity: Option<u8>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let app_config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve => serve(&app_config).await,
        Command::Dashboard => run_dashboard(&app_config).await,
        Command::Overlay => run_overlay(&app_config).await,
        Command::Settings { action } => run_settings(&app_config, action).await,
    }
}

fn remote(app_config: &AppConfig) -> Result<Arc<dyn Provider>> {
    let provider = RemoteProvider::new(&app_config.provider.url, app_config.request_timeout())?;
    tracing::debug!(url = provider.base_url(), "using remote provider");
    Ok(Arc::new(provider))
}

async fn serve(app_config: &AppConfig) -> Result<()> {
    let provider = Arc::new(LocalProvider::new(
        Arc::new(SysinfoRepo::new()),
        SettingsFile::new(&app_config.provider.settings_path),
        app_config.screen(),
    ));
    let app = routes::app(provider);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Provider stopped");
    Ok(())
}

async fn run_dashboard(app_config: &AppConfig) -> Result<()> {
    let fetcher = Arc::new(TelemetryFetcher::new(remote(app_config)?));
    let surface = dashboard::mount(fetcher, app_config.dashboard_config());
    let mut state = surface.state();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let line = dashboard_line(&state.borrow_and_update());
                println!("{}", line);
            }
            _ = &mut shutdown => break,
        }
    }
    let _ = surface.unmount().await;
    Ok(())
}

fn dashboard_line(s: &DashboardState) -> String {
    let mut line = match &s.realtime {
        Some(r) => format!(
            "cpu {:>5.1}%  gpu {:>5.1}%  mem {:>5.1}%  ↓{:.0}KB/s ↑{:.0}KB/s",
            r.cpu_usage,
            r.gpu_usage,
            r.memory_usage,
            r.network_stats.download_rate,
            r.network_stats.upload_rate
        ),
        None => "waiting for first sample".to_string(),
    };
    if let Some(o) = &s.overview {
        line.push_str(&format!("  [{} / {} disks]", o.cpu.name, o.disks.len()));
    }
    line.push_str(&format!("  history {}", s.cpu_history.len()));
    if let Some(e) = &s.error {
        line.push_str(&format!("  ({})", e));
    }
    line
}

async fn run_overlay(app_config: &AppConfig) -> Result<()> {
    let provider = remote(app_config)?;
    let store = Arc::new(SettingsStore::new(provider.clone()));
    let fetcher = Arc::new(TelemetryFetcher::new(provider));
    let surface = overlay::mount(store, fetcher, app_config.overlay_config());
    let mut state = surface.state();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = state.borrow_and_update().view();
                if view.visible {
                    println!("[{:.2}] {}", view.alpha, view);
                }
            }
            _ = &mut shutdown => break,
        }
    }
    let _ = surface.unmount().await;
    Ok(())
}

async fn run_settings(app_config: &AppConfig, action: SettingsAction) -> Result<()> {
    let provider = remote(app_config)?;
    let store = SettingsStore::new(provider.clone());
    match action {
        SettingsAction::Get => {
            let settings = provider
                .get_monitor_settings()
                .await
                .map_err(|e| anyhow::anyhow!("reading settings: {}", e))?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        SettingsAction::SetPosition { position } => {
            store
                .set_position(position)
                .await
                .map_err(|e| anyhow::anyhow!("setting position: {}", e))?;
        }
        SettingsAction::Set {
            enabled,
            position,
            refresh_interval,
            opacity,
        } => {
            let current = store.load().await;
            let next = MonitorSettings {
                enabled: enabled.unwrap_or(current.enabled),
                position: position.unwrap_or(current.position),
                refresh_interval: refresh_interval.unwrap_or(current.refresh_interval),
                opacity: opacity.unwrap_or(current.opacity),
                display_items: current.display_items,
            };
            // Move the panel first for immediate feedback; the full commit follows.
            if let Some(p) = position {
                store
                    .set_position(p)
                    .await
                    .map_err(|e| anyhow::anyhow!("setting position: {}", e))?;
            }
            store
                .commit(next)
                .await
                .map_err(|e| anyhow::anyhow!("saving settings: {}", e))?;
            tracing::info!("settings saved");
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
}
