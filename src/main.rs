use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use juju_version::config::{self, Config};
use juju_version::executable::find_juju;
use juju_version::version::{Version, VersionNumber};

#[derive(Parser)]
#[command(name = "juju-version")]
#[command(version, about = "Parse, format and match Juju versions")]
struct Cli {
    /// Write JSON logs to a file instead of stderr (default: XDG data dir)
    #[arg(long, global = true)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a version and print its canonical form
    Parse {
        version: String,
        /// Parse as a bare version number (wildcards allowed)
        #[arg(long)]
        number: bool,
        /// Print the components as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check whether CANDIDATE satisfies PATTERN
    Match { pattern: String, candidate: String },
    /// Locate the Juju client and check its version
    Find {
        /// Executable name or path
        #[arg(long)]
        name: Option<String>,
        /// Accepted versions, e.g. 2.9.x
        #[arg(long)]
        version: Option<String>,
        /// Config file (defaults to the XDG config location when present)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let log_file = cli
        .log_file
        .map(|path| path.unwrap_or_else(config::log_path));
    let _guard = init_logging(log_file.as_deref())?;

    match cli.command {
        Command::Parse {
            version,
            number,
            json,
        } => parse(&version, number, json),
        Command::Match { pattern, candidate } => {
            let pattern = VersionNumber::parse(&pattern)
                .with_context(|| format!("invalid pattern {:?}", pattern))?;
            let matched = pattern
                .matches_str(&candidate)
                .with_context(|| format!("invalid candidate {:?}", candidate))?;
            println!("{}", matched);
            Ok(if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Find {
            name,
            version,
            config,
        } => find(name, version, config),
    }
}

fn parse(raw: &str, number: bool, as_json: bool) -> anyhow::Result<ExitCode> {
    if number {
        let number =
            VersionNumber::parse(raw).with_context(|| format!("invalid version {:?}", raw))?;
        if as_json {
            println!(
                "{}",
                json!({
                    "major": number.major(),
                    "minor": number.minor().to_string(),
                    "micro": (!number.micro().is_unset()).then(|| number.micro().to_string()),
                    "wildcard": number.is_wildcard(),
                })
            );
        } else {
            println!("{}", number);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let version = Version::parse(raw).with_context(|| format!("invalid version {:?}", raw))?;
    if as_json {
        println!(
            "{}",
            json!({
                "number": version.number(),
                "releaselevel": version.releaselevel().to_string(),
                "series": version.series(),
                "arch": version.arch(),
            })
        );
    } else {
        println!("{}", version);
    }
    Ok(ExitCode::SUCCESS)
}

fn find(
    name: Option<String>,
    version: Option<String>,
    config_file: Option<PathBuf>,
) -> anyhow::Result<ExitCode> {
    let config = load_config(config_file)?;

    let name = name.unwrap_or(config.juju.executable);
    let requested = match version {
        Some(raw) => Some(
            VersionNumber::parse(&raw).with_context(|| format!("invalid pattern {:?}", raw))?,
        ),
        None => config.juju.version,
    };

    let (executable, found) = find_juju(&name, requested.as_ref(), None)?;
    println!("{}\t{}", executable.filename().display(), found);
    Ok(ExitCode::SUCCESS)
}

fn load_config(explicit: Option<PathBuf>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let path = config::config_path();
            if !path.exists() {
                debug!("No config at {:?}, using defaults", path);
                return Ok(Config::default());
            }
            path
        }
    };
    debug!("Loading config from {:?}", path);
    Config::load(&path).with_context(|| format!("failed to load config {:?}", path))
}

fn init_logging(
    log_file: Option<&std::path::Path>,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let Some(log_file) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
        return Ok(None);
    };

    let dir = log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let file_name = log_file
        .file_name()
        .with_context(|| format!("invalid log file {:?}", log_file))?;
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {:?}", dir))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}
