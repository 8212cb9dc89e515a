use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use trading_journal::analytics::{
    build_calendar_grid, compute_hot_cold_days, compute_performance_by_asset,
    compute_performance_by_weekday, compute_trade_stats, CalendarGrid, DashboardReport, DayType,
    YearMonth,
};
use trading_journal::config::Config;
use trading_journal::import;
use trading_journal::models::{
    note_views, EmotionalState, JournalEntry, NoteView, Operation, OperationPatch, OperationType,
};
use trading_journal::store::{JournalRepository, JsonFileStore, OperationRepository};

#[derive(Parser)]
#[command(author, version, about = "Trading journal: operations, notes and performance views", long_about = None)]
struct Cli {
    /// Print derived views as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Win rate, averages and extrema
    Stats,
    /// Net result and trade count per weekday
    Weekdays,
    /// Net result and trade count per asset
    Assets,
    /// Net result per trading date, classified hot or cold
    HotCold,
    /// Month grid with hot/cold days
    Calendar {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Full dashboard summary
    Report,
    /// Manage recorded operations
    Ops {
        #[command(subcommand)]
        command: OpsCommand,
    },
    /// Import a MetaTrader 5 CSV history export
    Import {
        file: String,

        /// Parse and show the operations without storing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage journal notes
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },
}

#[derive(Subcommand)]
enum OpsCommand {
    /// List operations, newest first
    List {
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Record an operation; profit/loss is computed unless given
    Add {
        /// Trading date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        asset: String,
        /// buy or sell
        #[arg(long = "type")]
        operation_type: OperationType,
        #[arg(long)]
        entry: f64,
        #[arg(long)]
        exit: f64,
        #[arg(long)]
        volume: f64,
        #[arg(long)]
        profit: Option<f64>,
    },
    /// Change fields of an existing operation
    Update {
        id: u64,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        asset: Option<String>,
        #[arg(long = "type")]
        operation_type: Option<OperationType>,
        #[arg(long)]
        entry: Option<f64>,
        #[arg(long)]
        exit: Option<f64>,
        #[arg(long)]
        volume: Option<f64>,
        #[arg(long)]
        profit: Option<f64>,
    },
    /// Remove an operation
    Delete { id: u64 },
}

#[derive(Subcommand)]
enum NotesCommand {
    /// List notes with the trade they refer to
    List,
    /// Add a note to an operation
    Add {
        operation_id: u64,
        /// calm, anxious, confident, fearful, impatient, frustrated, euphoric, indecisive, other
        #[arg(long)]
        state: EmotionalState,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        improvements: String,
    },
    /// Remove a note
    Delete { id: u64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let cli = Cli::parse();
    let store = JsonFileStore::open(&cfg).await?;
    let options = cfg.analytics_options();

    match cli.command {
        Commands::Stats => {
            let stats = compute_trade_stats(&store.list().await?);
            if cli.json {
                return print_json(&stats);
            }
            println!("Operations:    {}", stats.total_operations);
            println!(
                "Win/Loss:      {} / {}",
                stats.winning_operations, stats.losing_operations
            );
            println!("Win rate:      {:.2}%", stats.win_rate);
            println!("Net P/L:       {:+.2}", stats.total_profit);
            println!("Avg win:       {:+.2}", stats.avg_winning);
            println!("Avg loss:      {:+.2}", stats.avg_losing);
            println!("Best trade:    {:+.2}", stats.best_trade);
            println!("Worst trade:   {:+.2}", stats.worst_trade);
            println!("Profit factor: {:.2}", stats.profit_factor);
        }
        Commands::Weekdays => {
            let perf = compute_performance_by_weekday(&store.list().await?, options.weekday_basis);
            if cli.json {
                return print_json(&perf);
            }
            for i in 0..7 {
                println!(
                    "{:>9}: {:>3} trades | P/L {:+.2}",
                    perf.labels[i], perf.count[i], perf.performance[i]
                );
            }
        }
        Commands::Assets => {
            let perf = compute_performance_by_asset(
                &store.list().await?,
                &store.assets().await?,
                options.asset_matching,
            )?;
            if cli.json {
                return print_json(&perf);
            }
            for (symbol, performance, count) in perf.rows() {
                println!("{:>8}: {:>3} trades | P/L {:+.2}", symbol, count, performance);
            }
        }
        Commands::HotCold => {
            let days = compute_hot_cold_days(&store.list().await?);
            if cli.json {
                return print_json(&days);
            }
            for day in days {
                println!("{} {:>4} {:+.2}", day.date, day.day_type, day.performance);
            }
        }
        Commands::Calendar { month } => {
            let year_month = match month {
                Some(m) => m.parse::<YearMonth>()?,
                None => YearMonth::of(Utc::now().date_naive())?,
            };
            let hot_cold = compute_hot_cold_days(&store.list().await?);
            let grid = build_calendar_grid(year_month, &hot_cold);
            if cli.json {
                return print_json(&grid.days);
            }
            print_calendar(&grid);
        }
        Commands::Report => {
            let report =
                DashboardReport::build(&store.list().await?, &store.assets().await?, options)?;
            if cli.json {
                return print_json(&report);
            }
            report.print_summary();
        }
        Commands::Ops { command } => run_ops(&store, command, cli.json).await?,
        Commands::Import { file, dry_run } => {
            let operations =
                import::import_file(&file).with_context(|| format!("importing {file}"))?;
            if dry_run {
                print_operations(&operations);
                println!("{} operation(s) parsed, nothing stored", operations.len());
            } else {
                let stored = store.import(operations).await?;
                println!("Imported {} operation(s) into {}", stored.len(), store.path().display());
            }
        }
        Commands::Notes { command } => run_notes(&store, command, cli.json).await?,
    }

    Ok(())
}

async fn run_ops(store: &JsonFileStore, command: OpsCommand, json: bool) -> Result<()> {
    match command {
        OpsCommand::List { limit } => {
            let mut ops = store.list().await?;
            if let Some(limit) = limit {
                ops.truncate(limit);
            }
            if json {
                return print_json(&ops);
            }
            print_operations(&ops);
        }
        OpsCommand::Add {
            date,
            asset,
            operation_type,
            entry,
            exit,
            volume,
            profit,
        } => {
            let mut op = Operation::new(date, &asset, operation_type, entry, exit, volume);
            if let Some(profit) = profit {
                op = op.with_profit_loss(profit);
            }
            let op = store.add(op).await?;
            println!("Added operation {} ({:+.2})", op.id.unwrap_or_default(), op.profit_loss);
        }
        OpsCommand::Update {
            id,
            date,
            asset,
            operation_type,
            entry,
            exit,
            volume,
            profit,
        } => {
            let patch = OperationPatch {
                date,
                asset,
                operation_type,
                entry_price: entry,
                exit_price: exit,
                volume,
                profit_loss: profit,
            };
            if patch.is_empty() {
                println!("Nothing to update");
                return Ok(());
            }
            let op = store.update(id, patch).await?;
            println!("Updated operation {} ({:+.2})", id, op.profit_loss);
        }
        OpsCommand::Delete { id } => {
            store.delete(id).await?;
            println!("Deleted operation {id}");
        }
    }
    Ok(())
}

async fn run_notes(store: &JsonFileStore, command: NotesCommand, json: bool) -> Result<()> {
    match command {
        NotesCommand::List => {
            let entries = store.list_entries().await?;
            let operations = store.list().await?;
            let views = note_views(&entries, &operations);
            if json {
                return print_json(&views);
            }
            for NoteView { entry, tone, operation } in views {
                let trade = match operation {
                    Some(op) => format!("{} {} {:+.2}", op.date, op.asset, op.profit_loss),
                    None => "operation deleted".to_string(),
                };
                println!(
                    "#{} [{}/{}] {} | {}",
                    entry.id.unwrap_or_default(),
                    entry.emotional_state,
                    tone,
                    trade,
                    entry.description
                );
                if !entry.improvements.is_empty() {
                    println!("    improve: {}", entry.improvements);
                }
            }
        }
        NotesCommand::Add {
            operation_id,
            state,
            description,
            improvements,
        } => {
            if store.get(operation_id).await?.is_none() {
                tracing::warn!("Operation {} does not exist, saving note anyway", operation_id);
            }
            let entry = store
                .add_entry(JournalEntry::new(operation_id, state, &description, &improvements))
                .await?;
            println!("Added note {}", entry.id.unwrap_or_default());
        }
        NotesCommand::Delete { id } => {
            store.delete_entry(id).await?;
            println!("Deleted note {id}");
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_operations(ops: &[Operation]) {
    println!(
        "{:>4}  {:<10}  {:<8}  {:<4}  {:>12}  {:>12}  {:>8}  {:>10}",
        "id", "date", "asset", "type", "entry", "exit", "volume", "P/L"
    );
    let mut flagged = 0;
    for op in ops {
        let mark = if op.is_consistent() {
            ' '
        } else {
            flagged += 1;
            '*'
        };
        println!(
            "{:>4}  {:<10}  {:<8}  {:<4}  {:>12.5}  {:>12.5}  {:>8.2}  {:>+10.2}{}",
            op.id.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string()),
            op.date,
            op.asset,
            op.operation_type,
            op.entry_price,
            op.exit_price,
            op.volume,
            op.profit_loss,
            mark
        );
    }
    if flagged > 0 {
        println!("* {flagged} operation(s) with P/L set apart from the prices (manual or imported)");
    }
}

fn print_calendar(grid: &CalendarGrid) {
    println!("{:^63}", grid.year_month.title());
    println!(
        "{}",
        ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
            .iter()
            .map(|d| format!("{:^9}", d))
            .collect::<String>()
    );
    for week in grid.weeks() {
        let line: String = week
            .iter()
            .map(|day| {
                let mark = match day.day_type {
                    DayType::Hot => '+',
                    DayType::Cold => '-',
                    DayType::Neutral => ' ',
                };
                if day.is_current_month {
                    format!("  {:>2}{}    ", day.day, mark)
                } else {
                    format!(" ({:>2}){}   ", day.day, mark)
                }
            })
            .collect();
        println!("{line}");
    }

    let summary = grid.month_summary();
    println!();
    println!(
        "Traded days: {} | Hot: {} | Cold: {} | Net: {:+.2}",
        summary.traded_days, summary.hot_days, summary.cold_days, summary.net_performance
    );
}
