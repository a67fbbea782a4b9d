//! Command-line interface over the report engine

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::StoreConfig;
use crate::services::{
    EventAdmin, FilterField, LogbookService, LookupContext, Projector, ReportEngine,
};
use crate::store::RestStore;
use crate::types::{ActionType, NewLogEntry};

/// Events drink-fridge consumption tracker
#[derive(Parser)]
#[command(name = "fridgetrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Event selection and drilldown filters shared by the read-side commands
#[derive(Args, Default)]
struct FilterArgs {
    /// Restrict to these event ids (comma separated; default: all known)
    #[arg(long, value_delimiter = ',')]
    events: Vec<String>,

    /// Filter by drink name
    #[arg(long)]
    drink: Option<String>,

    /// Filter by fridge name
    #[arg(long)]
    fridge: Option<String>,

    /// Filter by event date (YYYY-MM-DD, or "Unknown")
    #[arg(long)]
    date: Option<String>,

    /// Filter by owner label
    #[arg(long)]
    owner: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BreakdownKey {
    Drink,
    Fridge,
    Date,
    Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogAction {
    Start,
    Restock,
    End,
}

impl From<LogAction> for ActionType {
    fn from(action: LogAction) -> Self {
        match action {
            LogAction::Start => ActionType::Start,
            LogAction::Restock => ActionType::Restock,
            LogAction::End => ActionType::End,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the aggregated consumption table with totals
    Report {
        #[command(flatten)]
        filters: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one breakdown view (total units per label)
    Breakdown {
        /// Grouping key
        #[arg(long, value_enum)]
        by: BreakdownKey,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the visible report as CSV
    Csv {
        #[command(flatten)]
        filters: FilterArgs,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Export the report document handed to the PDF renderer
    Pdf {
        #[command(flatten)]
        filters: FilterArgs,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Log a stock count (runner write path)
    Log {
        #[arg(long)]
        event: String,

        #[arg(long)]
        fridge: String,

        #[arg(long)]
        drink: String,

        /// start, restock or end
        #[arg(long, value_enum)]
        action: LogAction,

        /// Unit count (non-negative)
        #[arg(long)]
        amount: u32,

        /// Acting user id
        #[arg(long)]
        user: String,
    },

    /// Close the still-open events in a selection
    Close {
        #[arg(long, value_delimiter = ',')]
        events: Vec<String>,
    },

    /// Reopen one closed event
    Reopen {
        #[arg(long)]
        event: String,
    },

    /// List known events with date and status
    Events,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let store = RestStore::new(StoreConfig::load()?)?;

        match self.command {
            Commands::Report { filters, json } => run_report(store, &filters, json),
            Commands::Breakdown { by, filters, json } => run_breakdown(store, by, &filters, json),
            Commands::Csv { filters, output } => run_csv(store, &filters, output),
            Commands::Pdf { filters, output } => run_pdf(store, &filters, output),
            Commands::Log {
                event,
                fridge,
                drink,
                action,
                amount,
                user,
            } => run_log(store, event, fridge, drink, action, amount, user),
            Commands::Close { events } => run_close(store, &events),
            Commands::Reopen { event } => run_reopen(store, &event),
            Commands::Events => run_events(store),
        }
    }
}

/// Refresh an engine over the selection and apply the drilldown flags
fn build_engine(store: RestStore, filters: &FilterArgs) -> ReportEngine<RestStore> {
    let mut engine = ReportEngine::new(store);

    let selected: Vec<String> = if filters.events.is_empty() {
        engine.lookups().events().map(|e| e.id.clone()).collect()
    } else {
        filters.events.clone()
    };
    engine.refresh(&selected);

    if let Some(drink) = &filters.drink {
        engine.set_filter(FilterField::Drink, drink.as_str());
    }
    if let Some(fridge) = &filters.fridge {
        engine.set_filter(FilterField::Fridge, fridge.as_str());
    }
    if let Some(date) = &filters.date {
        engine.set_filter(FilterField::Date, date.as_str());
    }
    if let Some(owner) = &filters.owner {
        engine.set_filter(FilterField::Owner, owner.as_str());
    }

    engine
}

fn print_status(engine: &ReportEngine<RestStore>) {
    if !engine.status().is_empty() {
        eprintln!("{}", engine.status());
    }
}

fn run_report(store: RestStore, filters: &FilterArgs, json: bool) -> anyhow::Result<()> {
    let engine = build_engine(store, filters);
    print_status(&engine);

    if json {
        println!("{}", serde_json::to_string_pretty(&engine.visible_rows())?);
    } else {
        print!("{}", engine.export_report().to_text());
    }
    Ok(())
}

fn run_breakdown(
    store: RestStore,
    by: BreakdownKey,
    filters: &FilterArgs,
    json: bool,
) -> anyhow::Result<()> {
    let engine = build_engine(store, filters);
    print_status(&engine);

    let visible = engine.visible_rows();
    let breakdown = match by {
        BreakdownKey::Drink => Projector::units_by_drink(&visible),
        BreakdownKey::Fridge => Projector::units_by_fridge(&visible),
        BreakdownKey::Date => Projector::units_by_date(&visible),
        BreakdownKey::Owner => Projector::units_by_owner(&visible),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        for (label, units) in &breakdown {
            println!("{label}  {units}");
        }
    }
    Ok(())
}

fn run_csv(store: RestStore, filters: &FilterArgs, output: Option<PathBuf>) -> anyhow::Result<()> {
    let engine = build_engine(store, filters);
    print_status(&engine);
    write_or_print(output, &engine.export_csv())
}

fn run_pdf(store: RestStore, filters: &FilterArgs, output: Option<PathBuf>) -> anyhow::Result<()> {
    let engine = build_engine(store, filters);
    print_status(&engine);
    write_or_print(output, &engine.export_report().to_text())
}

fn write_or_print(output: Option<PathBuf>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(&path, content)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_log(
    store: RestStore,
    event: String,
    fridge: String,
    drink: String,
    action: LogAction,
    amount: u32,
    user: String,
) -> anyhow::Result<()> {
    let ctx = LookupContext::fetch(&store)?;
    let logbook = LogbookService::new(store);

    let saved = logbook.submit(
        &ctx,
        NewLogEntry {
            event_id: event,
            fridge_id: fridge,
            drink_type_id: drink,
            action_type: action.into(),
            amount,
            user_id: user,
        },
    )?;

    println!("Saved log entry {}.", saved.id);
    Ok(())
}

fn run_close(store: RestStore, events: &[String]) -> anyhow::Result<()> {
    let ctx = LookupContext::fetch(&store)?;
    let admin = EventAdmin::new(store);
    let closed = admin.close_events(&ctx, events)?;
    println!("Closed {closed} event(s).");
    Ok(())
}

fn run_reopen(store: RestStore, event: &str) -> anyhow::Result<()> {
    let ctx = LookupContext::fetch(&store)?;
    let admin = EventAdmin::new(store);
    admin.reopen_event(&ctx, event)?;
    println!("Reopened event {event}.");
    Ok(())
}

fn run_events(store: RestStore) -> anyhow::Result<()> {
    let ctx = LookupContext::fetch(&store)?;

    let mut events: Vec<_> = ctx.events().collect();
    events.sort_by(|a, b| (a.event_date, &a.name).cmp(&(b.event_date, &b.name)));

    for event in events {
        let date = event
            .event_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "no date".into());
        let status = if event.is_closed() { "Closed" } else { "Open" };
        println!("{}  {}  {}  [{}]", event.id, event.name, date, status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_report() {
        let cli = Cli::try_parse_from(["fridgetrack", "report"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Report { json: false, .. }
        ));
    }

    #[test]
    fn test_cli_parse_report_with_filters() {
        let cli = Cli::try_parse_from([
            "fridgetrack",
            "report",
            "--events",
            "ev-1,ev-2",
            "--drink",
            "Cola",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Report { filters, json } => {
                assert!(json);
                assert_eq!(filters.events, vec!["ev-1", "ev-2"]);
                assert_eq!(filters.drink.as_deref(), Some("Cola"));
            }
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn test_cli_parse_breakdown_by_key() {
        let cli =
            Cli::try_parse_from(["fridgetrack", "breakdown", "--by", "fridge"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Breakdown {
                by: BreakdownKey::Fridge,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_parse_log_submission() {
        let cli = Cli::try_parse_from([
            "fridgetrack",
            "log",
            "--event",
            "ev-1",
            "--fridge",
            "fr-1",
            "--drink",
            "dr-1",
            "--action",
            "restock",
            "--amount",
            "6",
            "--user",
            "user-1",
        ])
        .unwrap();

        match cli.command {
            Commands::Log { action, amount, .. } => {
                assert_eq!(action, LogAction::Restock);
                assert_eq!(amount, 6);
            }
            _ => panic!("expected log command"),
        }
    }

    #[test]
    fn test_cli_rejects_negative_amount() {
        let result = Cli::try_parse_from([
            "fridgetrack",
            "log",
            "--event",
            "ev-1",
            "--fridge",
            "fr-1",
            "--drink",
            "dr-1",
            "--action",
            "start",
            "--amount",
            "-3",
            "--user",
            "user-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_action_maps_to_action_type() {
        assert_eq!(ActionType::from(LogAction::Start), ActionType::Start);
        assert_eq!(ActionType::from(LogAction::End), ActionType::End);
    }
}
