use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::asset_prober::ASSET_ROOT_ENV;
use services::content_loader::{CONTENT_ENV, DEFAULT_CONTENT_PATH};
use services::{
    AppServices, AssetProber, Boot, Clock, ContentConfig, ContentLoader, ContentSource,
    PassengerService, PersistenceGateway, boot,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt as tracing_fmt};
use ui::{App, UiApp, build_app_context};

const DB_ENV: &str = "QUIZ_DB_URL";
const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidContent { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidContent { raw } => write!(f, "invalid --content value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    boot: Boot,
    services: AppServices,
    clock: Clock,
}

impl UiApp for DesktopApp {
    fn boot(&self) -> Boot {
        self.boot.clone()
    }

    fn gateway(&self) -> PersistenceGateway {
        self.services.gateway()
    }

    fn passenger(&self) -> Arc<PassengerService> {
        self.services.passenger()
    }

    fn clock(&self) -> Clock {
        self.clock
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    content: String,
    asset_root: PathBuf,
    memory: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--db <sqlite_url>] [--content <url|path>] [--assets <dir>] [--memory]");
    eprintln!("  cargo run -p app -- check [--content <url|path>] [--assets <dir>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --content {DEFAULT_CONTENT_PATH}");
    eprintln!("  --assets <current directory>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {DB_ENV}, {CONTENT_ENV}, {ASSET_ROOT_ENV}, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url =
            env_value(DB_ENV).map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut content = env_value(CONTENT_ENV).unwrap_or_else(|| DEFAULT_CONTENT_PATH.into());
        let mut asset_root = env_value(ASSET_ROOT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
        let mut memory = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--content" => {
                    let value = require_value(args, "--content")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidContent { raw: value });
                    }
                    content = value;
                }
                "--assets" => {
                    asset_root = PathBuf::from(require_value(args, "--assets")?);
                }
                "--memory" => memory = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            content,
            asset_root,
            memory,
        })
    }

    fn loader(&self) -> ContentLoader {
        ContentLoader::new(ContentConfig::new(ContentSource::parse(&self.content)))
    }

    fn prober(&self) -> AssetProber {
        AssetProber::new(self.asset_root.clone())
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_fmt().with_env_filter(env_filter).try_init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let booted = boot(&parsed.loader(), parsed.prober()).await;

    match cmd {
        Command::Check => {
            let Some(content) = booted.content.as_ref() else {
                println!("no question data available");
                return Ok(());
            };
            println!("{}", content.meta().title());
            for track in content.tracks() {
                println!("  {}: {} questions ({})", track.id(), track.len(), track.label());
            }
            println!(
                "images: {} found, {} missing",
                booted.images.found(),
                booted.images.missing()
            );
            Ok(())
        }
        Command::Ui => {
            let services = if parsed.memory {
                info!("using in-memory storage");
                AppServices::in_memory()
            } else {
                prepare_sqlite_file(&parsed.db_url)?;
                AppServices::new_sqlite(&parsed.db_url).await?
            };

            let title = booted
                .content
                .as_ref()
                .map_or_else(|| "Quiz".to_string(), |c| c.meta().title().to_string());
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                boot: booted,
                services,
                clock: Clock::default_clock(),
            });
            let context = build_app_context(&app);

            // tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(title)
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
