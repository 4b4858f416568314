//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

use crate::adapters::csv_price_adapter::CsvPriceAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::metrics_csv_adapter::load_metrics_csv;
use crate::domain::config_validation::{
    DEFAULT_TOP_N, parse_optional_date, strategy_int, validate_data_config,
    validate_strategy_config,
};
use crate::domain::error::MacrossError;
use crate::domain::price::PriceSeries;
use crate::domain::report::{render, render_monthly_returns};
use crate::domain::sample::{SAMPLE_MONTHLY_RETURNS, sample_risk, sample_summary};
use crate::domain::selection::{RankedCode, rank_by_strength};
use crate::domain::signal::{
    CrossoverOutput, CrossoverParams, DEFAULT_FAST_WINDOW, DEFAULT_SLOW_WINDOW, crossover_events,
    generate_with,
};
use crate::logging;
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::PricePort;

#[derive(Parser, Debug)]
#[command(
    name = "macross",
    about = "Moving-average crossover signals and backtest metrics reports"
)]
pub struct Cli {
    /// Log filter (e.g. info, debug); RUST_LOG takes precedence
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the crossover signal for one code
    Signal {
        #[arg(long)]
        code: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory holding <code>.csv price files
        #[arg(long)]
        data: Option<PathBuf>,
        #[arg(long)]
        fast: Option<usize>,
        #[arg(long)]
        slow: Option<usize>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Rank the configured universe by signal strength
    Scan {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        top: Option<usize>,
    },
    /// Render backtest summary and risk metrics
    Report {
        /// name,value CSV; sample figures when omitted
        #[arg(long)]
        summary: Option<PathBuf>,
        /// name,value CSV; sample figures when omitted
        #[arg(long)]
        risk: Option<PathBuf>,
        /// Append the sample monthly returns line
        #[arg(long)]
        monthly: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Load the config file once, install logging, and dispatch the subcommand.
pub fn execute(cli: Cli) -> Result<(), MacrossError> {
    let log_level = cli.log_level.as_deref();

    match cli.command {
        Command::Signal {
            code,
            config,
            data,
            fast,
            slow,
            start,
            end,
        } => {
            let config = config.as_ref().map(load_config).transpose()?;
            init_logging(log_level, config.as_ref());
            run_signal(
                &code,
                config.as_ref(),
                data.as_ref(),
                (fast, slow),
                (start, end),
            )
        }
        Command::Scan { config, top } => {
            let config = load_config(&config)?;
            init_logging(log_level, Some(&config));
            run_scan(&config, top)
        }
        Command::Report {
            summary,
            risk,
            monthly,
            output,
        } => {
            init_logging(log_level, None);
            run_report(summary.as_deref(), risk.as_deref(), monthly, output.as_ref())
        }
        Command::Validate { config } => {
            let config = load_config(&config)?;
            init_logging(log_level, Some(&config));
            run_validate(&config)
        }
    }
}

fn init_logging(cli_level: Option<&str>, config: Option<&FileConfigAdapter>) {
    let config_level = config.and_then(|c| c.get_string("logging", "level"));
    logging::init(&[cli_level, config_level.as_deref()]);
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, MacrossError> {
    FileConfigAdapter::from_file(path)
}

/// Window pair from explicit overrides, then config, then the 5/20 defaults.
pub fn build_params(
    config: Option<&dyn ConfigPort>,
    fast: Option<usize>,
    slow: Option<usize>,
) -> Result<CrossoverParams, MacrossError> {
    let from_config = |key: &str, default: usize| -> Result<usize, MacrossError> {
        match config {
            Some(c) => Ok(usize::try_from(strategy_int(c, key, default as i64)?).unwrap_or(0)),
            None => Ok(default),
        }
    };
    let fast = match fast {
        Some(n) => n,
        None => from_config("fast_window", DEFAULT_FAST_WINDOW)?,
    };
    let slow = match slow {
        Some(n) => n,
        None => from_config("slow_window", DEFAULT_SLOW_WINDOW)?,
    };
    CrossoverParams::new(fast, slow)
}

pub fn resolve_data_path(
    data_override: Option<&PathBuf>,
    config: Option<&dyn ConfigPort>,
) -> Result<PathBuf, MacrossError> {
    if let Some(path) = data_override {
        return Ok(path.clone());
    }
    config
        .and_then(|c| c.get_string("data", "path"))
        .map(PathBuf::from)
        .ok_or_else(|| MacrossError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })
}

pub fn resolve_top_n(
    top_override: Option<usize>,
    config: &dyn ConfigPort,
) -> Result<usize, MacrossError> {
    let top = match top_override {
        Some(n) => n,
        None => usize::try_from(strategy_int(config, "top_n", DEFAULT_TOP_N)?).unwrap_or(0),
    };
    if top == 0 {
        return Err(MacrossError::InvalidParameter {
            name: "top_n".into(),
            reason: "must be at least 1".into(),
        });
    }
    Ok(top)
}

/// Configured codes, or every code the price source knows about.
pub fn resolve_codes(
    config: &dyn ConfigPort,
    port: &dyn PricePort,
) -> Result<Vec<String>, MacrossError> {
    let codes = config.get_list("data", "codes");
    if !codes.is_empty() {
        return Ok(codes);
    }
    port.list_codes()
}

fn run_signal(
    code: &str,
    config: Option<&FileConfigAdapter>,
    data_override: Option<&PathBuf>,
    (fast, slow): (Option<usize>, Option<usize>),
    (start, end): (Option<NaiveDate>, Option<NaiveDate>),
) -> Result<(), MacrossError> {
    if let Some(c) = config {
        validate_data_config(c)?;
    }
    let config_port = config.map(|c| c as &dyn ConfigPort);

    let params = build_params(config_port, fast, slow)?;
    let data_path = resolve_data_path(data_override, config_port)?;

    let (cfg_start, cfg_end) = match config_port {
        Some(c) => (
            parse_optional_date(c, "start_date")?,
            parse_optional_date(c, "end_date")?,
        ),
        None => (None, None),
    };

    let port = CsvPriceAdapter::new(data_path);
    let prices = port.fetch_prices(code, start.or(cfg_start), end.or(cfg_end))?;
    info!(
        code,
        bars = prices.len(),
        first = %prices.first_date(),
        last = %prices.last_date(),
        fast = params.fast_window,
        slow = params.slow_window,
        "Computing crossover signal"
    );

    let output = generate_with(&prices, params);
    if !output.is_sufficient() {
        warn!(
            code,
            bars = prices.len(),
            minimum = params.slow_window,
            "Series shorter than the slow window; signal is undefined everywhere"
        );
    }

    for event in crossover_events(&output.signal) {
        info!(code, date = %event.date, "{}", event.kind);
    }

    write_signal_csv(io::stdout().lock(), &prices, &output)
}

fn run_scan(config: &FileConfigAdapter, top: Option<usize>) -> Result<(), MacrossError> {
    validate_strategy_config(config)?;
    validate_data_config(config)?;

    let params = build_params(Some(config), None, None)?;
    let top_n = resolve_top_n(top, config)?;
    let port = CsvPriceAdapter::new(resolve_data_path(None, Some(config))?);
    let codes = resolve_codes(config, &port)?;
    let start = parse_optional_date(config, "start_date")?;
    let end = parse_optional_date(config, "end_date")?;

    info!(codes = codes.len(), top_n, "Scanning universe");
    let candidates = scan_universe(&port, &codes, params, start, end)?;
    let ranked = rank_by_strength(&candidates, top_n);
    info!(
        scanned = candidates.len(),
        selected = ranked.len(),
        "Scan complete"
    );

    write_ranking_csv(io::stdout().lock(), &ranked)
}

/// Compute signals for every code, skipping codes that fail to load or do
/// not have enough history.
pub fn scan_universe(
    port: &dyn PricePort,
    codes: &[String],
    params: CrossoverParams,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<(String, CrossoverOutput)>, MacrossError> {
    let mut candidates = Vec::with_capacity(codes.len());

    for code in codes {
        let prices = match port.fetch_prices(code, start, end) {
            Ok(p) => p,
            Err(e) => {
                warn!(code = %code, error = %e, "Skipping code");
                continue;
            }
        };

        let output = generate_with(&prices, params);
        if let Err(e) = output.require_sufficient() {
            warn!(code = %code, error = %e, "Skipping code");
            continue;
        }
        debug!(code = %code, bars = prices.len(), "Signal computed");
        candidates.push((code.clone(), output));
    }

    if candidates.is_empty() {
        return Err(MacrossError::Data {
            reason: "no codes with enough data to scan".into(),
        });
    }
    Ok(candidates)
}

fn run_report(
    summary: Option<&Path>,
    risk: Option<&Path>,
    monthly: bool,
    output: Option<&PathBuf>,
) -> Result<(), MacrossError> {
    let text = build_report_text(summary, risk, monthly)?;

    match output {
        Some(path) => {
            fs::write(path, &text)?;
            info!(path = %path.display(), "Report written");
        }
        None => io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}

pub fn build_report_text(
    summary: Option<&Path>,
    risk: Option<&Path>,
    monthly: bool,
) -> Result<String, MacrossError> {
    let summary = match summary {
        Some(path) => load_metrics_csv(path, "Backtest summary")?,
        None => {
            debug!("Using sample backtest summary");
            sample_summary()
        }
    };
    let risk = match risk {
        Some(path) => load_metrics_csv(path, "Risk metrics")?,
        None => {
            debug!("Using sample risk metrics");
            sample_risk()
        }
    };

    let mut text = render(&summary, &risk);
    if monthly {
        text.push('\n');
        text.push_str(&render_monthly_returns(&SAMPLE_MONTHLY_RETURNS));
    }
    Ok(text)
}

fn run_validate(config: &FileConfigAdapter) -> Result<(), MacrossError> {
    validate_strategy_config(config)?;
    validate_data_config(config)?;

    let params = build_params(Some(config), None, None)?;
    let top_n = resolve_top_n(None, config)?;
    let codes = config.get_list("data", "codes");
    info!(
        fast = params.fast_window,
        slow = params.slow_window,
        top_n,
        codes = codes.len(),
        "Configuration is valid"
    );
    eprintln!("Configuration is valid.");
    Ok(())
}

fn fmt_optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// `date,close,sma_fast,sma_slow,signal`; undefined values are empty fields.
/// Averages print at full precision so they always agree with the signal.
pub fn write_signal_csv<W: Write>(
    writer: W,
    prices: &PriceSeries,
    output: &CrossoverOutput,
) -> Result<(), MacrossError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["date", "close", "sma_fast", "sma_slow", "signal"])
        .map_err(io::Error::from)?;

    for (i, point) in prices.points().iter().enumerate() {
        wtr.write_record([
            point.date.to_string(),
            point.close.to_string(),
            fmt_optional(output.fast.value_at(i)),
            fmt_optional(output.slow.value_at(i)),
            output
                .signal
                .signal_at(i)
                .map(|s| s.to_string())
                .unwrap_or_default(),
        ])
        .map_err(io::Error::from)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_ranking_csv<W: Write>(writer: W, ranked: &[RankedCode]) -> Result<(), MacrossError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["rank", "code", "strength", "date"])
        .map_err(io::Error::from)?;

    for (i, r) in ranked.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string(),
            r.code.clone(),
            format!("{:.4}", r.strength),
            r.last_date.to_string(),
        ])
        .map_err(io::Error::from)?;
    }

    wtr.flush()?;
    Ok(())
}
