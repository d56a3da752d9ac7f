use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::borrow::Cow;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};
use yvc::{
    config::{Config, ListSource},
    fetch::{FetchOutcome, Fetcher},
    logging,
    model::CheckReport,
    output::{write_findings, write_result, OutputFormat},
    Checker,
};

/// Exit codes, compatible with scripts written against the old yvc
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const VULNERABLE: u8 = 2;
}

const STDIN_MARKER: &str = "-";

#[derive(Parser)]
#[command(name = "yvc")]
#[command(
    author,
    version,
    about = "Check software packages against vulnerability lists"
)]
struct Cli {
    /// Read configuration from FILE instead of the default location
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Check against vulnerability list FILE (repeatable; replaces configured lists)
    #[arg(short = 'l', long = "vlist", value_name = "FILE")]
    vlists: Vec<PathBuf>,

    /// Output format (text, json, table)
    #[arg(short, long)]
    format: Option<String>,

    /// Packages to check; "-" or no packages reads them from stdin
    #[arg(value_name = "PACKAGE")]
    packages: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Download vulnerability lists
    Fetch {
        /// Download a single list from URL instead of the configured sources
        #[arg(requires = "output")]
        url: Option<String>,

        /// Where to save the list downloaded from URL
        #[arg(short, long, value_name = "FILE", requires = "url")]
        output: Option<PathBuf>,

        /// Download even if the local copy is fresh
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();

    // `config --init -c FILE` must work before FILE exists.
    if let Some(Commands::Config { init, path }) = cli.command {
        handle_config(cli.config.as_deref(), init, path)?;
        return Ok(exit_codes::SUCCESS);
    }

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_overrides(cli.vlists, cli.verbose);
    logging::init_tracing(config.verbosity, &config.log_format)?;

    match cli.command {
        None => {
            let format = cli.format.unwrap_or_else(|| config.default_format.clone());
            let format = OutputFormat::from_str(&format).map_err(|e| anyhow::anyhow!(e))?;
            run_check(&config, &cli.packages, format)
        }
        Some(Commands::Config { .. }) => Ok(exit_codes::SUCCESS),
        Some(Commands::Fetch { url, output, force }) => {
            let sources = match (url, output) {
                (Some(url), Some(path)) => vec![ListSource { url, path }],
                _ => config.sources.clone(),
            };
            run_fetch(&sources, config.refresh_hours, force).await
        }
    }
}

fn run_check(config: &Config, packages: &[String], format: OutputFormat) -> Result<u8> {
    if config.vlists.is_empty() {
        anyhow::bail!(
            "no vulnerability lists given; use -l FILE or set vlists in {}",
            Config::config_path().display()
        );
    }

    let mut checker = Checker::new(config.ignore.clone());
    let loaded = checker.load_lists(&config.vlists)?;
    info!(
        lists = config.vlists.len(),
        vulnerabilities = loaded,
        "vulnerability lists loaded"
    );

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut input = stdin.lock();
    let mut out = stdout.lock();

    let mut report = CheckReport::new();
    let written = check_packages(&checker, packages, &mut input, format, &mut out, &mut report)
        .and_then(|()| write_result(&mut out, &report, format))
        .and_then(|()| out.flush().map_err(Into::into));

    match written {
        Ok(()) => {}
        // Reader went away (e.g. `| head`); what was checked still decides the exit code.
        Err(e) if is_broken_pipe(&e) => debug!("stdout closed, stopping"),
        Err(e) => return Err(e),
    }

    Ok(exit_code_for(&report))
}

fn exit_code_for(report: &CheckReport) -> u8 {
    if report.is_vulnerable() {
        exit_codes::VULNERABLE
    } else {
        exit_codes::SUCCESS
    }
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}

/// Checks the command-line packages, reading `input` wherever `-` appears,
/// or reading only `input` when no packages were given.
fn check_packages<R, W>(
    checker: &Checker,
    packages: &[String],
    input: &mut R,
    format: OutputFormat,
    out: &mut W,
    report: &mut CheckReport,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    if packages.is_empty() {
        return check_input(checker, input, format, out, report);
    }

    // Runs of ordinary arguments are checked together.
    for (index, batch) in packages.split(|p| p == STDIN_MARKER).enumerate() {
        if index > 0 {
            check_input(checker, input, format, out, report)?;
        }
        check_batch(checker, batch, format, out, report)?;
    }
    Ok(())
}

/// Checks whitespace-separated packages from `input`, a line at a time.
/// Bytes that are not UTF-8 are replaced rather than ending the run.
fn check_input<R, W>(
    checker: &Checker,
    input: &mut R,
    format: OutputFormat,
    out: &mut W,
    report: &mut CheckReport,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    for (index, line) in input.split(b'\n').enumerate() {
        let line = line.context("failed to read packages from stdin")?;
        let line = String::from_utf8_lossy(&line);
        if matches!(line, Cow::Owned(_)) {
            warn!(line = index + 1, "input is not valid UTF-8, checking with replacement characters");
        }
        let packages: Vec<&str> = line.split_whitespace().collect();
        check_batch(checker, &packages, format, out, report)?;
    }
    Ok(())
}

fn check_batch<S, W>(
    checker: &Checker,
    packages: &[S],
    format: OutputFormat,
    out: &mut W,
    report: &mut CheckReport,
) -> Result<()>
where
    S: AsRef<str> + Sync,
    W: Write,
{
    for findings in checker.check_all(packages) {
        let written = if format.is_streaming() {
            write_findings(out, &findings)
        } else {
            Ok(())
        };
        // Record before giving up on output so the exit code still counts it.
        report.record(findings);
        written?;
    }
    Ok(())
}

async fn run_fetch(sources: &[ListSource], refresh_hours: u64, force: bool) -> Result<u8> {
    if sources.is_empty() {
        anyhow::bail!(
            "no list sources configured; pass URL -o FILE or add [[sources]] to {}",
            Config::config_path().display()
        );
    }

    let progress = if std::io::stderr().is_terminal() {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Fetching {} vulnerability lists...", sources.len()));
        Some(pb)
    } else {
        None
    };

    let fetcher = Fetcher::new(refresh_hours);
    let results = fetcher.fetch_all(sources, force).await;

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let mut failed = 0;
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(FetchOutcome::Updated { entries }) => {
                println!("{}: updated ({} entries)", source.path.display(), entries);
            }
            Ok(FetchOutcome::Fresh) => {
                println!("{}: up to date", source.path.display());
            }
            Err(e) => {
                warn!(url = %source.url, error = %e, "fetch failed");
                eprintln!("{}: {}", source.path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        Ok(exit_codes::ERROR)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn handle_config(explicit: Option<&Path>, init: bool, show_path: bool) -> Result<()> {
    let config_path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_path);

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        let config = Config::default();
        config.save(&config_path)?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("Default configuration:");
        println!("{}", Config::generate_default_config());
        return Ok(());
    }

    // Show current config
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        println!("Config file: {}", config_path.display());
        println!();
        println!("{}", content);
    } else {
        println!("No config file found.");
        println!("Run 'yvc config --init' to create one.");
        println!();
        println!("Config path: {}", config_path.display());
    }

    Ok(())
}
