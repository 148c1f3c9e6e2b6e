use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use camwall_core::{
    event_channel, FeedFormat, Footprint, HttpStatusSource, StatusSnapshot, StatusSource,
    WallConfig, WallController, WallRuntime,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod feed_probe;
mod log_surface;
mod playlist;
mod wall_view;

use feed_probe::FeedProber;
use log_surface::LogSurface;
use playlist::PlaylistPlayer;
use wall_view::TerminalWall;

#[derive(Debug, Parser)]
#[command(name = "camwalld")]
#[command(about = "Camera wall: live feeds, motion highlights and a playlist player")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[arg(long, default_value = "http://localhost:8080")]
    base_url: String,

    #[arg(long, default_value_t = 3)]
    cameras: u8,

    #[arg(long, value_enum, default_value = "mjpeg")]
    feed_format: FeedFormatArg,

    #[arg(long, default_value_t = 500)]
    retry_delay_ms: u64,

    #[arg(long, default_value_t = 5000)]
    highlight_ms: u64,

    #[arg(long, default_value_t = 2000)]
    first_poll_ms: u64,

    #[arg(long, default_value_t = 500)]
    poll_interval_ms: u64,

    #[arg(long, default_value_t = 2000)]
    poll_backoff_ms: u64,

    #[arg(long, default_value_t = 5000)]
    status_timeout_ms: u64,

    #[arg(long, default_value_t = 5000)]
    lock_delay_ms: u64,

    #[arg(long, default_value_t = 1000)]
    shuffle_delay_ms: u64,

    /// Volume applied when sound is turned back on.
    #[arg(long, default_value_t = 50)]
    volume: u8,

    /// Leave failed feeds on the placeholder.
    #[arg(long)]
    no_stream_retry: bool,

    /// Stop polling after the first failed status request.
    #[arg(long)]
    no_poll_retry: bool,

    /// Log destination while the terminal wall owns the screen.
    #[arg(long)]
    log_file: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Terminal wall with keyboard control.
    Run {
        #[arg(long = "track")]
        tracks: Vec<String>,
    },
    /// Headless wall; every surface change is logged.
    Watch {
        #[arg(long = "track")]
        tracks: Vec<String>,
        #[arg(long, default_value_t = 1920)]
        display_width: u32,
        #[arg(long, default_value_t = 1080)]
        display_height: u32,
    },
    /// One status request, printed.
    Status {
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FeedFormatArg {
    Mjpeg,
    H264,
}

impl From<FeedFormatArg> for FeedFormat {
    fn from(arg: FeedFormatArg) -> Self {
        match arg {
            FeedFormatArg::Mjpeg => FeedFormat::Mjpeg,
            FeedFormatArg::H264 => FeedFormat::H264,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = WallConfig {
        base_url: cli.base_url.clone(),
        camera_count: cli.cameras,
        feed_format: cli.feed_format.into(),
        retry_streams: !cli.no_stream_retry,
        retry_delay: Duration::from_millis(cli.retry_delay_ms),
        highlight_dwell: Duration::from_millis(cli.highlight_ms),
        retry_polls: !cli.no_poll_retry,
        first_poll_delay: Duration::from_millis(cli.first_poll_ms),
        poll_interval: Duration::from_millis(cli.poll_interval_ms),
        poll_backoff: Duration::from_millis(cli.poll_backoff_ms),
        status_timeout: Duration::from_millis(cli.status_timeout_ms),
        lock_delay: Duration::from_millis(cli.lock_delay_ms),
        shuffle_delay: Duration::from_millis(cli.shuffle_delay_ms),
        volume_pct: cli.volume,
    };
    config.validate()?;

    match cli.command {
        Command::Run { tracks } => run_wall(config, tracks).await?,
        Command::Watch {
            tracks,
            display_width,
            display_height,
        } => watch_wall(config, tracks, Footprint::new(display_width, display_height)).await?,
        Command::Status { format } => {
            let source = HttpStatusSource::from_config(&config)?;
            let snapshot = source.fetch().await?;
            print_snapshot(&config, &snapshot, format)?;
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact();

    let terminal_owns_screen = matches!(cli.command, Command::Run { .. });
    match (&cli.log_file, terminal_owns_screen) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        (None, true) => builder.with_writer(std::io::sink).init(),
        (None, false) => builder.init(),
    }
    Ok(())
}

async fn run_wall(config: WallConfig, tracks: Vec<String>) -> Result<()> {
    let (tx, rx) = event_channel();
    let source: Arc<dyn StatusSource> = Arc::new(HttpStatusSource::from_config(&config)?);
    let prober = FeedProber::new(tx.clone(), config.status_timeout)?;
    let surface = TerminalWall::new(config.camera_count, Some(prober));
    let player = PlaylistPlayer::new(tracks, tx.clone());

    let mut controller = WallController::new(config, surface, player);
    controller.initialize();
    controller.player().announce_ready();

    let mut runtime = WallRuntime::new(controller, source, tx, rx);
    wall_view::run_terminal_wall(&mut runtime).await
}

async fn watch_wall(config: WallConfig, tracks: Vec<String>, display: Footprint) -> Result<()> {
    info!(status_url = %config.status_url(), cameras = config.camera_count, "starting headless wall");

    let (tx, rx) = event_channel();
    let source: Arc<dyn StatusSource> = Arc::new(HttpStatusSource::from_config(&config)?);
    let prober = FeedProber::new(tx.clone(), config.status_timeout)?;
    let surface = LogSurface::new(display, prober);
    let player = PlaylistPlayer::new(tracks, tx.clone());

    let mut controller = WallController::new(config, surface, player);
    controller.initialize();
    controller.player().announce_ready();

    let mut runtime = WallRuntime::new(controller, source, tx, rx);
    runtime
        .run_until(async {
            if tokio::signal::ctrl_c().await.is_err() {
                warn!("ctrl-c handler unavailable");
                std::future::pending::<()>().await;
            }
            warn!("received ctrl-c, stopping");
        })
        .await;

    let stats = runtime.controller().poller().stats();
    info!(polls_ok = stats.polls_ok, polls_err = stats.polls_err, "stopped");
    Ok(())
}

fn print_snapshot(config: &WallConfig, snapshot: &StatusSnapshot, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(snapshot)?);
        }
        OutputFormat::Human => {
            println!("=== Camera Status ===");
            println!("Time:       {}", snapshot.received_at.to_rfc3339());
            println!("Endpoint:   {}", config.status_url());
            for cam in config.cameras() {
                let motion = if snapshot.has_motion(cam) { "MOTION" } else { "idle" };
                println!("  {:<10} {motion}", cam.status_key());
            }

            let unknown: Vec<&str> = snapshot
                .motion
                .keys()
                .filter(|key| !config.cameras().any(|cam| cam.status_key() == **key))
                .map(String::as_str)
                .collect();
            if !unknown.is_empty() {
                println!("Ignored:    {}", unknown.join(", "));
            }
        }
    }

    Ok(())
}
