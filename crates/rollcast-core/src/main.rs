//! Rollcast - hybrid outcome forecasting for paired rolls
//!
//! The main entry point for rollcast, handling:
//! - Recording, listing and removing observations
//! - Forecasts, transition tables, pattern metrics and insights
//! - Import/export of the observation log
//! - Engine configuration inspection and validation

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Args, CommandFactory, Parser, Subcommand};
use rollcast_common::{Error, ObservationId, OutputFormat, Result, StructuredError, SCHEMA_VERSION};
use rollcast_core::config::{load_engine_config, load_engine_from_file, ConfigSource, ResolvedConfig};
use rollcast_core::engine::{transition_probabilities, StateBand, StateProbabilities};
use rollcast_core::exit_codes::ExitCode;
use rollcast_core::logging::{
    event_names, generate_run_id, get_host_id, init_logging, LogConfig, LogContext, LogFormat,
    LogLevel, Stage,
};
use rollcast_core::session::{default_export_name, HistoryQuery};
use rollcast_core::store::{write_bytes_atomic, JsonFileStore};
use rollcast_core::{input, log_event, output, schema, Session};
use serde::Serialize;

/// Rollcast - forecast the outcome class of the next paired roll
#[derive(Parser)]
#[command(name = "rollcast")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Observation log file (default: platform data dir)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Engine configuration file (engine.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "md")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a pair of rolls
    Add(AddArgs),

    /// Remove an observation by id
    Remove {
        /// Observation id as shown by `list`
        id: String,
    },

    /// Delete every observation
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// List recorded observations
    List(ListArgs),

    /// Forecast the next outcome class
    Predict(PredictArgs),

    /// Show the state transition table
    Matrix,

    /// Show pattern metrics
    Metrics,

    /// Show narrative insights
    Insights,

    /// Show quick statistics
    Status,

    /// Export the log as a JSON array
    Export {
        /// Destination file ("-" for stdout; default rollcast-YYYY-MM-DD.json)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Replace the log with an exported JSON array
    Import {
        /// File produced by `export`
        file: PathBuf,
    },

    /// Configuration management
    Config(ConfigArgs),

    /// Print JSON Schemas for the JSON output types
    Schema(SchemaArgs),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print version information
    Version,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Add(_) => "add",
            Commands::Remove { .. } => "remove",
            Commands::Clear { .. } => "clear",
            Commands::List(_) => "list",
            Commands::Predict(_) => "predict",
            Commands::Matrix => "matrix",
            Commands::Metrics => "metrics",
            Commands::Insights => "insights",
            Commands::Status => "status",
            Commands::Export { .. } => "export",
            Commands::Import { .. } => "import",
            Commands::Config(_) => "config",
            Commands::Schema(_) => "schema",
            Commands::Completions { .. } => "completions",
            Commands::Version => "version",
        }
    }
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct AddArgs {
    /// First roll (6-54)
    #[arg(allow_hyphen_values = true)]
    first: String,

    /// Second roll (6-54)
    #[arg(allow_hyphen_values = true)]
    second: String,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// List oldest entries first
    #[arg(long)]
    oldest_first: bool,

    /// Case-insensitive filter on values, class and state
    #[arg(long)]
    search: Option<String>,

    /// Maximum rows to show
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Args, Debug)]
struct PredictArgs {
    /// Number of steps ahead (1 shows the factor breakdown)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..=50))]
    steps: u16,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Args, Debug)]
struct SchemaArgs {
    /// Type to print (see --list)
    #[arg(value_parser = clap::builder::PossibleValuesParser::new(schema::schema_names()))]
    name: Option<String>,

    /// List available schema types
    #[arg(long, conflicts_with_all = ["name", "all"])]
    list: bool,

    /// Print every schema keyed by type name
    #[arg(long, conflicts_with = "name")]
    all: bool,

    /// Single-line JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective engine configuration
    Show,

    /// Validate an engine configuration file
    Validate {
        /// File to validate (default: the resolved engine.json)
        file: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let log_format = if cli.global.format.is_machine() {
        Some(LogFormat::Jsonl)
    } else {
        None
    };
    let log_config = LogConfig::from_env(
        LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet),
        log_format,
    );
    init_logging(&log_config);

    let command = cli.command.name();
    let ctx = LogContext::new(generate_run_id(), get_host_id()).with_command(command);
    log_event!(ctx, DEBUG, event_names::RUN_STARTED, Stage::Init, "run started");

    let global = &cli.global;
    let result = match &cli.command {
        Commands::Add(args) => run_add(global, &ctx, args),
        Commands::Remove { id } => run_remove(global, &ctx, id),
        Commands::Clear { yes } => run_clear(global, &ctx, *yes),
        Commands::List(args) => run_list(global, &ctx, args),
        Commands::Predict(args) => run_predict(global, &ctx, args),
        Commands::Matrix => run_matrix(global, &ctx),
        Commands::Metrics => run_metrics(global, &ctx),
        Commands::Insights => run_insights(global, &ctx),
        Commands::Status => run_status(global, &ctx),
        Commands::Export { output } => run_export(global, &ctx, output.as_deref()),
        Commands::Import { file } => run_import(global, &ctx, file),
        Commands::Config(args) => run_config(global, &ctx, args),
        Commands::Schema(args) => run_schema(global, args),
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "rollcast", &mut std::io::stdout());
            Ok(ExitCode::Clean)
        }
        Commands::Version => print_version(global),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(err) => report_error(global, &ctx, command, &err),
    };
    log_event!(
        ctx,
        DEBUG,
        event_names::RUN_FINISHED,
        Stage::Init,
        "run finished",
        exit_code = exit_code.as_i32()
    );

    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Shared plumbing
// ============================================================================

/// Print `payload` in the selected format.
fn emit<T, M, S>(global: &GlobalOpts, command: &str, payload: &T, md: M, summary: S) -> Result<()>
where
    T: Serialize + ?Sized,
    M: FnOnce() -> String,
    S: FnOnce() -> String,
{
    match global.format {
        OutputFormat::Json => println!("{}", output::to_json_string(command, payload)?),
        OutputFormat::Md => print!("{}", md()),
        OutputFormat::Summary => println!("{}", summary()),
        OutputFormat::Exitcode => {}
    }
    Ok(())
}

fn load_config(global: &GlobalOpts, ctx: &LogContext) -> Result<ResolvedConfig> {
    match load_engine_config(global.config.as_deref()) {
        Ok(resolved) => {
            if *resolved.source() == ConfigSource::BuiltinDefault {
                log_event!(
                    ctx,
                    DEBUG,
                    event_names::CONFIG_DEFAULT_USED,
                    Stage::Init,
                    "using built-in engine calibration"
                );
            } else {
                log_event!(
                    ctx,
                    INFO,
                    event_names::CONFIG_LOADED,
                    Stage::Init,
                    "engine config loaded",
                    source = tracing::field::display(resolved.source())
                );
            }
            Ok(resolved)
        }
        Err(e) => {
            log_event!(
                ctx,
                WARN,
                event_names::CONFIG_ERROR,
                Stage::Init,
                "engine config rejected",
                error = tracing::field::display(&e)
            );
            Err(e.into())
        }
    }
}

/// Resolve config and store, then load the session.
fn open_session(global: &GlobalOpts, ctx: &LogContext) -> Result<(Session, JsonFileStore)> {
    let resolved = load_config(global, ctx)?;
    let store = JsonFileStore::from_env(global.data.as_deref())?;
    let session = Session::open(&store, resolved.engine)?;
    log_event!(
        ctx,
        DEBUG,
        event_names::STORE_LOADED,
        Stage::Init,
        "observation log loaded",
        path = tracing::field::display(store.path().display()),
        entries = session.len()
    );
    Ok((session, store))
}

fn save_session(session: &Session, store: &JsonFileStore, ctx: &LogContext) -> Result<()> {
    session.save(store)?;
    log_event!(
        ctx,
        DEBUG,
        event_names::STORE_SAVED,
        Stage::Ingest,
        "observation log saved",
        entries = session.len()
    );
    Ok(())
}

fn report_error(global: &GlobalOpts, ctx: &LogContext, command: &str, err: &Error) -> ExitCode {
    let exit_code = ExitCode::for_error(err);
    if exit_code.is_internal_error() {
        log_event!(
            ctx,
            ERROR,
            event_names::INTERNAL_ERROR,
            Stage::Init,
            "command failed",
            code = err.code(),
            error = tracing::field::display(err)
        );
    }

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "command": command,
                "status": "error",
                "exit_code": exit_code.code_name(),
                "error": StructuredError::from(err),
            });
            match serde_json::to_string_pretty(&response) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("{}", StructuredError::from(err).to_json()),
            }
        }
        OutputFormat::Summary => {
            eprintln!("[{}] {} error {}: {}", ctx.run_id, command, err.code(), err);
        }
        OutputFormat::Exitcode => {}
        OutputFormat::Md => {
            eprintln!("{}", err.to_human());
        }
    }

    exit_code
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_add(global: &GlobalOpts, ctx: &LogContext, args: &AddArgs) -> Result<ExitCode> {
    let first = input::parse_value("first", &args.first)?;
    let second = input::parse_value("second", &args.second)?;

    let (mut session, store) = open_session(global, ctx)?;
    let obs = session.append(first, second)?.clone();
    save_session(&session, &store, ctx)?;
    log_event!(
        ctx,
        INFO,
        event_names::LOG_APPENDED,
        Stage::Ingest,
        "observation recorded",
        observation_id = obs.id.0,
        first = first,
        second = second
    );

    emit(
        global,
        "add",
        &obs,
        || output::render_observation_md(&obs),
        || output::summary_observation(&obs),
    )?;
    Ok(ExitCode::Clean)
}

fn run_remove(global: &GlobalOpts, ctx: &LogContext, raw_id: &str) -> Result<ExitCode> {
    let id = ObservationId::parse(raw_id).ok_or_else(|| Error::NonNumeric {
        field: "id".to_string(),
        input: raw_id.to_string(),
    })?;

    let (mut session, store) = open_session(global, ctx)?;
    let removed = session.remove(id);
    if removed {
        save_session(&session, &store, ctx)?;
        log_event!(
            ctx,
            INFO,
            event_names::LOG_REMOVED,
            Stage::Ingest,
            "observation removed",
            observation_id = id.0
        );
    }

    let payload = serde_json::json!({
        "id": id,
        "removed": removed,
        "remaining": session.len(),
    });
    emit(
        global,
        "remove",
        &payload,
        || {
            if removed {
                format!("Removed observation {}. {} remaining.\n", id, session.len())
            } else {
                format!("No observation with id {}; nothing removed.\n", id)
            }
        },
        || format!("remove {}: {}", id, if removed { "removed" } else { "absent" }),
    )?;
    Ok(ExitCode::Clean)
}

fn run_clear(global: &GlobalOpts, ctx: &LogContext, yes: bool) -> Result<ExitCode> {
    if !yes {
        if global.format != OutputFormat::Exitcode {
            eprintln!("Refusing to delete every observation without --yes.");
        }
        return Ok(ExitCode::ArgsError);
    }

    let (mut session, store) = open_session(global, ctx)?;
    let cleared = session.len();
    session.clear();
    save_session(&session, &store, ctx)?;
    log_event!(
        ctx,
        INFO,
        event_names::LOG_CLEARED,
        Stage::Ingest,
        "observation log cleared",
        cleared = cleared
    );

    let payload = serde_json::json!({ "cleared": cleared });
    emit(
        global,
        "clear",
        &payload,
        || format!("Cleared {} observations.\n", cleared),
        || format!("cleared {}", cleared),
    )?;
    Ok(ExitCode::Clean)
}

fn run_list(global: &GlobalOpts, ctx: &LogContext, args: &ListArgs) -> Result<ExitCode> {
    let (session, _) = open_session(global, ctx)?;

    let mut query = HistoryQuery::default();
    if args.oldest_first {
        query = query.oldest_first();
    }
    if let Some(text) = &args.search {
        query = query.search(text.clone());
    }
    if let Some(limit) = args.limit {
        query = query.limit(limit);
    }
    let rows = session.history(&query);

    let payload = serde_json::json!({
        "total": session.len(),
        "order": query.order,
        "rows": rows,
    });
    emit(
        global,
        "list",
        &payload,
        || output::render_history_md(&rows),
        || format!("{} of {} observations", rows.len(), session.len()),
    )?;
    Ok(ExitCode::Clean)
}

fn run_predict(global: &GlobalOpts, ctx: &LogContext, args: &PredictArgs) -> Result<ExitCode> {
    let (session, _) = open_session(global, ctx)?;
    let steps = usize::from(args.steps);

    if steps == 1 {
        let forecast = session.predict(1);
        log_event!(
            ctx,
            INFO,
            event_names::PREDICT_FINISHED,
            Stage::Predict,
            "forecast ready",
            small_pct = forecast.small_pct,
            big_pct = forecast.big_pct,
            confidence_pct = forecast.confidence_pct
        );
        emit(
            global,
            "predict",
            &forecast,
            || output::render_forecast_md(&forecast),
            || output::summary_forecast(&forecast),
        )?;
    } else {
        let forecasts = session.predict_multi_step(steps);
        log_event!(
            ctx,
            INFO,
            event_names::PREDICT_FINISHED,
            Stage::Predict,
            "multi-step forecast ready",
            steps = steps
        );
        let payload = serde_json::json!({
            "steps": steps,
            "forecasts": forecasts,
        });
        emit(
            global,
            "predict",
            &payload,
            || output::render_multi_step_md(&forecasts),
            || output::summary_multi_step(&forecasts),
        )?;
    }

    Ok(if session.has_enough_data() {
        ExitCode::Clean
    } else {
        ExitCode::InsufficientData
    })
}

fn run_matrix(global: &GlobalOpts, ctx: &LogContext) -> Result<ExitCode> {
    let (session, _) = open_session(global, ctx)?;
    let matrix = session.transition_matrix();
    let probabilities: BTreeMap<StateBand, StateProbabilities> = StateBand::ALL
        .iter()
        .map(|from| (*from, transition_probabilities(&matrix, *from)))
        .collect();
    log_event!(
        ctx,
        DEBUG,
        event_names::ANALYZE_FINISHED,
        Stage::Analyze,
        "transition table built",
        transitions = matrix.total()
    );

    let payload = serde_json::json!({
        "total": matrix.total(),
        "counts": matrix,
        "probabilities": probabilities,
    });
    emit(
        global,
        "matrix",
        &payload,
        || output::render_matrix_md(&matrix),
        || output::summary_matrix(&matrix),
    )?;
    Ok(data_exit_code(session.is_empty()))
}

fn run_metrics(global: &GlobalOpts, ctx: &LogContext) -> Result<ExitCode> {
    let (session, _) = open_session(global, ctx)?;
    let metrics = session.metrics();
    log_event!(
        ctx,
        DEBUG,
        event_names::ANALYZE_FINISHED,
        Stage::Analyze,
        "pattern metrics computed",
        entries = session.len()
    );

    emit(
        global,
        "metrics",
        &metrics,
        || output::render_metrics_md(&metrics),
        || output::summary_metrics(&metrics),
    )?;
    Ok(data_exit_code(session.is_empty()))
}

fn run_insights(global: &GlobalOpts, ctx: &LogContext) -> Result<ExitCode> {
    let (session, _) = open_session(global, ctx)?;
    let insights = session.insights();
    let short = session.len() < session.config().insights.min_entries;
    log_event!(
        ctx,
        DEBUG,
        event_names::ANALYZE_FINISHED,
        Stage::Analyze,
        "insights generated",
        count = insights.len()
    );

    let payload = serde_json::json!({ "insights": insights });
    emit(
        global,
        "insights",
        &payload,
        || output::render_insights_md(&insights),
        || insights.first().cloned().unwrap_or_default(),
    )?;
    Ok(data_exit_code(short))
}

fn run_status(global: &GlobalOpts, ctx: &LogContext) -> Result<ExitCode> {
    let (session, store) = open_session(global, ctx)?;
    let stats = session.quick_stats();

    let payload = serde_json::json!({
        "data_path": store.path().display().to_string(),
        "stats": stats,
    });
    emit(
        global,
        "status",
        &payload,
        || output::render_status_md(&stats),
        || output::summary_status(&stats),
    )?;
    Ok(ExitCode::Clean)
}

fn run_export(global: &GlobalOpts, ctx: &LogContext, output_path: Option<&Path>) -> Result<ExitCode> {
    let (session, _) = open_session(global, ctx)?;
    let json = session.export_json()?;

    let target = match output_path {
        Some(p) if p == Path::new("-") => None,
        Some(p) => Some(p.to_path_buf()),
        None => Some(PathBuf::from(default_export_name(
            chrono::Local::now().date_naive(),
        ))),
    };

    // Raw array on stdout stays importable regardless of --format.
    let Some(path) = target else {
        println!("{}", json);
        return Ok(ExitCode::Clean);
    };

    write_bytes_atomic(&path, json.as_bytes())?;
    log_event!(
        ctx,
        INFO,
        event_names::LOG_EXPORTED,
        Stage::Export,
        "observation log exported",
        path = tracing::field::display(path.display()),
        entries = session.len()
    );

    let payload = serde_json::json!({
        "path": path.display().to_string(),
        "entries": session.len(),
    });
    emit(
        global,
        "export",
        &payload,
        || format!("Exported {} observations to {}\n", session.len(), path.display()),
        || format!("exported {} -> {}", session.len(), path.display()),
    )?;
    Ok(ExitCode::Clean)
}

fn run_import(global: &GlobalOpts, ctx: &LogContext, file: &Path) -> Result<ExitCode> {
    let content = std::fs::read_to_string(file)?;
    let (mut session, store) = open_session(global, ctx)?;
    let previous = session.len();
    let imported = session.import_json(&content)?;
    save_session(&session, &store, ctx)?;
    log_event!(
        ctx,
        INFO,
        event_names::LOG_IMPORTED,
        Stage::Ingest,
        "observation log imported",
        imported = imported,
        replaced = previous
    );

    let payload = serde_json::json!({
        "imported": imported,
        "replaced": previous,
    });
    emit(
        global,
        "import",
        &payload,
        || format!("Imported {} observations (replaced {}).\n", imported, previous),
        || format!("imported {}", imported),
    )?;
    Ok(ExitCode::Clean)
}

fn run_config(global: &GlobalOpts, ctx: &LogContext, args: &ConfigArgs) -> Result<ExitCode> {
    match &args.command {
        ConfigCommands::Show => run_config_show(global, ctx),
        ConfigCommands::Validate { file } => run_config_validate(global, ctx, file.as_deref()),
    }
}

/// Display the effective configuration (defaults when no file is present).
fn run_config_show(global: &GlobalOpts, ctx: &LogContext) -> Result<ExitCode> {
    let resolved = load_config(global, ctx)?;
    let snapshot = resolved.snapshot();

    let payload = serde_json::json!({
        "source": resolved.source().to_string(),
        "path": resolved.path().map(|p| p.display().to_string()),
        "snapshot": snapshot,
        "engine": resolved.engine,
    });

    let md = || {
        let w = &resolved.engine.weights;
        let mut out = String::from("# rollcast config show\n\n");
        match resolved.path() {
            Some(path) => out.push_str(&format!("Source: {} ({})\n", path.display(), resolved.source())),
            None => out.push_str("Source: **built-in defaults** (no engine.json found)\n"),
        }
        out.push_str(&format!("Hash: {}\n\n", snapshot.short_id()));
        out.push_str("## Weights\n\n| Factor | Weight |\n|--------|--------|\n");
        for (name, weight) in w.named() {
            out.push_str(&format!("| {} | {} |\n", name, weight));
        }
        out
    };
    emit(
        global,
        "config show",
        &payload,
        md,
        || format!("[{}] config: {}", snapshot.short_id(), resolved.source()),
    )?;
    Ok(ExitCode::Clean)
}

fn run_config_validate(global: &GlobalOpts, ctx: &LogContext, file: Option<&Path>) -> Result<ExitCode> {
    let (path, source) = match file {
        Some(path) => {
            load_engine_from_file(path)?;
            (Some(path.to_path_buf()), ConfigSource::CliArgument)
        }
        None => {
            let resolved = load_config(global, ctx)?;
            (resolved.path().map(Path::to_path_buf), resolved.source().clone())
        }
    };

    let payload = serde_json::json!({
        "status": "valid",
        "path": path.as_ref().map(|p| p.display().to_string()),
        "source": source.to_string(),
    });
    emit(
        global,
        "config validate",
        &payload,
        || match &path {
            Some(p) => format!("# Configuration Validation\n\nStatus: ✓ Valid\nFile: {}\n", p.display()),
            None => "# Configuration Validation\n\nStatus: ✓ Valid\nUsing built-in defaults\n".to_string(),
        },
        || "config validate: OK".to_string(),
    )?;
    Ok(ExitCode::Clean)
}

// ============================================================================
// Schema
// ============================================================================

/// Print one schema, all schemas, or the list of schema types.
///
/// Schemas are printed bare (no envelope) so they can be fed to validators.
fn run_schema(global: &GlobalOpts, args: &SchemaArgs) -> Result<ExitCode> {
    if args.list || (args.name.is_none() && !args.all) {
        let entries: Vec<serde_json::Value> = schema::SCHEMA_TYPES
            .iter()
            .map(|(name, description)| serde_json::json!({ "name": name, "description": description }))
            .collect();
        let payload = serde_json::json!({ "schemas": entries });
        emit(
            global,
            "schema",
            &payload,
            || {
                let mut out = String::from("# Schema types\n\n| Type | Description |\n|------|-------------|\n");
                for (name, description) in schema::SCHEMA_TYPES {
                    out.push_str(&format!("| {} | {} |\n", name, description));
                }
                out
            },
            || format!("schemas: {}", schema::SCHEMA_TYPES.len()),
        )?;
        return Ok(ExitCode::Clean);
    }

    let value = match args.name.as_deref() {
        Some(name) => match schema::generate_schema(name) {
            Some(value) => value,
            None => return Ok(ExitCode::ArgsError),
        },
        None => serde_json::to_value(schema::generate_all_schemas())?,
    };

    if global.format != OutputFormat::Exitcode {
        let text = if args.compact {
            serde_json::to_string(&value)?
        } else {
            serde_json::to_string_pretty(&value)?
        };
        println!("{}", text);
    }
    Ok(ExitCode::Clean)
}

fn print_version(global: &GlobalOpts) -> Result<ExitCode> {
    let version_info = serde_json::json!({
        "rollcast_version": env!("CARGO_PKG_VERSION"),
        "config_schema_version": rollcast_core::config::CONFIG_SCHEMA_VERSION,
    });
    emit(
        global,
        "version",
        &version_info,
        || {
            format!(
                "rollcast {}\nschema version: {}\n",
                env!("CARGO_PKG_VERSION"),
                SCHEMA_VERSION
            )
        },
        || format!("rollcast {}", env!("CARGO_PKG_VERSION")),
    )?;
    Ok(ExitCode::Clean)
}

fn data_exit_code(short: bool) -> ExitCode {
    if short {
        ExitCode::InsufficientData
    } else {
        ExitCode::Clean
    }
}
