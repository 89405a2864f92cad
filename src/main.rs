//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chatlens::ChatlensError;
use chatlens::cli::{AnalyzeArgs, Cli, Command, RecordExport, ReportFormat, SendersArgs};
use chatlens::config::AccountsConfig;
use chatlens::core::output::{to_json, write_jsonl};
use chatlens::core::{FilterConfig, Report};
use chatlens::error::AccountError;
use chatlens::parser::{ChatParser, ParsedChat};

fn main() {
    let cli = <Cli as ClapParser>::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so report output on stdout stays clean.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "chatlens=warn".into()),
        1 => "chatlens=debug".into(),
        _ => "chatlens=trace".into(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(command: Command) -> Result<(), ChatlensError> {
    match command {
        Command::Analyze(args) => analyze(&args),
        Command::Senders(args) => senders(&args),
        #[cfg(feature = "accounts")]
        Command::Account { action } => account(action),
    }
}

fn analyze(args: &AnalyzeArgs) -> Result<(), ChatlensError> {
    let start = Instant::now();
    let config = args.load_config()?;

    if config.accounts.require_login {
        check_login(
            &config.accounts,
            args.login.as_deref(),
            args.password.as_deref(),
        )?;
    }

    let filter = args.filter()?;
    let chat = ChatParser::with_config(config.parser.clone()).parse(&args.input)?;
    let report = Report::build(&chat.records, &filter, &config.analysis)?;
    debug!(elapsed_ms = start.elapsed().as_millis() as u64, "analysis finished");

    let rendered = match args.format {
        ReportFormat::Json => to_json(&report)?,
        ReportFormat::Text => render_text(&report, &chat, &args.input, &filter)?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{rendered}\n"))?;
            eprintln!("✅ Report saved to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    if let Some(path) = &args.export_records {
        export_records(&chat, path)?;
        eprintln!("💾 Exported {} records to {}", chat.len(), path.display());
    }

    Ok(())
}

fn senders(args: &SendersArgs) -> Result<(), ChatlensError> {
    let config = args.parse.load_config()?;
    let chat = ChatParser::with_config(config.parser).parse(&args.input)?;
    for sender in chat.senders() {
        println!("{sender}");
    }
    Ok(())
}

fn export_records(chat: &ParsedChat, path: &Path) -> Result<(), ChatlensError> {
    match RecordExport::from_path(path)? {
        RecordExport::Jsonl => write_jsonl(&chat.records, path),
        #[cfg(feature = "csv-output")]
        RecordExport::Csv => chatlens::core::output::write_csv(&chat.records, path),
        #[cfg(not(feature = "csv-output"))]
        RecordExport::Csv => Err(ChatlensError::invalid_format(
            "record export",
            "CSV export requires the `csv-output` feature",
        )),
    }
}

#[cfg(feature = "accounts")]
fn check_login(
    accounts: &AccountsConfig,
    login: Option<&str>,
    password: Option<&str>,
) -> Result<(), ChatlensError> {
    let (Some(user), Some(password)) = (login, password) else {
        return Err(AccountError::InvalidCredentials.into());
    };
    let mut store = chatlens::accounts::CredentialStore::load(accounts.store_path.clone())?;
    store.verify(user, password)?;
    info!(user, "login accepted");
    Ok(())
}

#[cfg(not(feature = "accounts"))]
fn check_login(
    _accounts: &AccountsConfig,
    _login: Option<&str>,
    _password: Option<&str>,
) -> Result<(), ChatlensError> {
    info!("login required but account support is disabled");
    Err(AccountError::InvalidCredentials.into())
}

#[cfg(feature = "accounts")]
fn account(action: chatlens::cli::AccountAction) -> Result<(), ChatlensError> {
    use chatlens::accounts::CredentialStore;
    use chatlens::cli::AccountAction;

    match action {
        AccountAction::Signup(args) => {
            let mut store = CredentialStore::load(args.store_path()?)?;
            store.sign_up(&args.username, &args.password)?;
            println!("✅ Account '{}' created", args.username.trim());
        }
        AccountAction::Login(args) => {
            let mut store = CredentialStore::load(args.store_path()?)?;
            store.verify(&args.username, &args.password)?;
            println!("✅ Logged in as '{}'", args.username.trim());
        }
    }
    Ok(())
}

fn render_text(
    report: &Report,
    chat: &ParsedChat,
    input: &Path,
    filter: &FilterConfig,
) -> Result<String, ChatlensError> {
    let mut out = String::new();
    write_report(&mut out, report, chat, input, filter).map_err(io::Error::other)?;
    Ok(out)
}

fn write_report(
    out: &mut String,
    report: &Report,
    chat: &ParsedChat,
    input: &Path,
    filter: &FilterConfig,
) -> std::fmt::Result {
    writeln!(out, "📊 chatlens v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
    writeln!(out, "📂 Input:    {}", input.display())?;
    if let Some(preset) = chat.detected_preset {
        writeln!(out, "🔎 Format:   {preset} (detected)")?;
    }
    writeln!(out, "👤 Analysis: {}", report.filter)?;
    if let Some(after) = filter.after {
        writeln!(out, "📅 After:    {}", after.date())?;
    }
    if let Some(before) = filter.before {
        writeln!(out, "📅 Before:   {}", before.date())?;
    }
    writeln!(out, "📝 Parsed:   {} records", chat.len())?;
    if chat.skipped > 0 {
        writeln!(out, "⚠️  Skipped:  {} entries with invalid timestamps", chat.skipped)?;
    }

    writeln!(out)?;
    writeln!(out, "📈 Top Statistics:")?;
    writeln!(out, "   Messages:  {}", report.stats.messages)?;
    writeln!(out, "   Words:     {}", report.stats.words)?;
    writeln!(out, "   Media:     {}", report.stats.media)?;
    writeln!(out, "   Links:     {}", report.stats.links)?;

    if let Some(active) = &report.most_active {
        writeln!(out)?;
        writeln!(out, "🏆 Most Active Participants:")?;
        for (rank, sender) in active.top.iter().enumerate() {
            let percent = active
                .shares
                .iter()
                .find(|s| s.sender == sender.sender)
                .map_or(0.0, |s| s.percent);
            writeln!(
                out,
                "   {}. {:<20} {:>6} ({:.2}%)",
                rank + 1,
                sender.sender,
                sender.messages,
                percent
            )?;
        }
    }

    if !report.common_words.is_empty() {
        writeln!(out)?;
        writeln!(out, "💬 Most Common Words:")?;
        for word in &report.common_words {
            writeln!(out, "   {:<20} {:>6}", word.word, word.count)?;
        }
    }

    if !report.monthly_timeline.is_empty() {
        writeln!(out)?;
        writeln!(out, "🗓️  Monthly Timeline:")?;
        for point in &report.monthly_timeline {
            writeln!(out, "   {:<20} {:>6}", point.label, point.messages)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "📆 Busiest Days:")?;
    for day in &report.weekday_activity {
        writeln!(out, "   {:<20} {:>6}", day.label, day.messages)?;
    }

    writeln!(out)?;
    writeln!(out, "🗓️  Busiest Months:")?;
    for month in &report.month_activity {
        writeln!(out, "   {:<20} {:>6}", month.label, month.messages)?;
    }

    let peak = report
        .heatmap
        .cells
        .iter()
        .enumerate()
        .flat_map(|(d, row)| row.iter().enumerate().map(move |(h, &n)| (n, d, h)))
        .filter(|&(n, _, _)| n > 0)
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)).then_with(|| b.2.cmp(&a.2)));
    if let Some((messages, day, hour)) = peak {
        writeln!(out)?;
        writeln!(
            out,
            "🔥 Peak Slot: {} {} ({} messages)",
            report.heatmap.rows[day], report.heatmap.columns[hour], messages
        )?;
    }

    write!(out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")
}
