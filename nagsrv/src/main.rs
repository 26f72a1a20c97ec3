//! nagsrv: query a monitoring daemon's status file and send it commands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

/// Environment variable holding the log filter.
const LOG_VAR: &str = "NAGSRV_LOG";

#[derive(Parser)]
#[command(name = "nagsrv")]
#[command(about = "Query Nagios status and submit external commands")]
#[command(version)]
struct Cli {
    /// Path to nagios.cfg
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Path to status.dat (overrides settings and nagios.cfg)
    #[arg(short = 's', long = "statusfile", global = true)]
    statusfile: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Host and service selectors shared by the search commands.
#[derive(Args, Debug, Clone, Default)]
pub struct Selectors {
    /// Host name, or /regex/ (repeatable)
    #[arg(long = "for-host")]
    pub for_host: Vec<String>,

    /// Service description, or /regex/ (repeatable)
    #[arg(long = "with-service")]
    pub with_service: Vec<String>,

    /// Only services with notifications enabled
    #[arg(long = "notify-enabled", conflicts_with = "notify_disabled")]
    pub notify_enabled: bool,

    /// Only services with notifications disabled
    #[arg(long = "notify-disabled")]
    pub notify_disabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    List,
    Details,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List hosts with at least one matching service
    Hosts {
        #[command(flatten)]
        selectors: Selectors,

        /// Output template using ${host} and ${tstamp}
        #[arg(short = 't', long = "template")]
        template: Option<String>,
    },

    /// List matching services
    #[command(visible_alias = "ls")]
    Services {
        #[command(flatten)]
        selectors: Selectors,

        /// Only acknowledged problems
        #[arg(long = "acknowledged", conflicts_with = "unacknowledged")]
        acknowledged: bool,

        /// Only unacknowledged problems
        #[arg(long = "unacknowledged")]
        unacknowledged: bool,

        /// Only passive services
        #[arg(long = "passive")]
        passive: bool,

        /// Only services in this state (0-3)
        #[arg(long = "state")]
        state: Option<String>,

        /// Output format
        #[arg(short = 'f', long = "format", value_enum, default_value = "list")]
        format: ListFormat,

        /// Output template using ${host}, ${service} and ${tstamp}
        #[arg(short = 't', long = "template")]
        template: Option<String>,
    },

    /// Apply an action to every matching service
    Act {
        /// enable-notify, disable-notify, enable-checks, disable-checks, force-check or acknowledge
        action: String,

        #[command(flatten)]
        selectors: Selectors,

        /// Path to the external command file
        #[arg(long = "command-file")]
        command_file: Option<PathBuf>,

        /// Author for acknowledgements (default from settings)
        #[arg(long = "author")]
        author: Option<String>,

        /// Comment for acknowledgements
        #[arg(long = "comment")]
        comment: Option<String>,

        /// Print the commands instead of sending them
        #[arg(short = 'n', long = "dry-run")]
        dry_run: bool,
    },

    /// Send one external command
    Send {
        /// Action name, e.g. SCHEDULE_HOST_DOWNTIME
        action: String,

        /// Fields as name=value
        fields: Vec<String>,

        /// Command timestamp (default: now)
        #[arg(long = "ts")]
        ts: Option<i64>,

        /// Path to the external command file
        #[arg(long = "command-file")]
        command_file: Option<PathBuf>,

        /// Print the command instead of sending it
        #[arg(short = 'n', long = "dry-run")]
        dry_run: bool,
    },

    /// List known actions, or show the fields of one
    Actions {
        action: Option<String>,
    },

    /// Roll service states up into one check result
    Check {
        /// Only services matching this regex
        #[arg(short = 'S', long = "service")]
        service: Option<String>,

        /// Only hosts matching this regex
        #[arg(short = 'H', long = "host")]
        host: Option<String>,
    },

    /// Show objects from objects.cache
    Objects {
        /// Object type, e.g. host, service, contactgroup
        kind: String,

        /// Attribute to match on
        #[arg(long = "by", requires = "pattern")]
        by: Option<String>,

        /// Value or /regex/ the attribute must match
        #[arg(long = "match", requires = "by")]
        pattern: Option<String>,

        /// Path to objects.cache
        #[arg(long = "object-cache")]
        object_cache: Option<PathBuf>,
    },

    /// Show program information and status
    Program,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = commands::Context {
        nagios_cfg: cli.config,
        status_file: cli.statusfile,
    };

    let result = match cli.command {
        Commands::Hosts { selectors, template } => commands::hosts(&ctx, &selectors, template.as_deref()).map(|_| 0),
        Commands::Services { selectors, acknowledged, unacknowledged, passive, state, format, template } => {
            let acked = if acknowledged {
                Some(true)
            } else if unacknowledged {
                Some(false)
            } else {
                None
            };
            let opts = commands::ServiceOptions {
                acknowledged: acked,
                passive,
                state,
                format,
                template,
            };
            commands::services(&ctx, &selectors, &opts).map(|_| 0)
        }
        Commands::Act { action, selectors, command_file, author, comment, dry_run } => commands::act(
            &ctx,
            &action,
            &selectors,
            command_file.as_deref(),
            author.as_deref(),
            comment.as_deref(),
            dry_run,
        ),
        Commands::Send { action, fields, ts, command_file, dry_run } => {
            commands::send(&ctx, &action, &fields, ts, command_file.as_deref(), dry_run).map(|_| 0)
        }
        Commands::Actions { action } => commands::actions(action.as_deref()).map(|_| 0),
        Commands::Check { service, host } => commands::check(&ctx, service.as_deref(), host.as_deref()),
        Commands::Objects { kind, by, pattern, object_cache } => {
            commands::objects(&ctx, &kind, by.as_deref(), pattern.as_deref(), object_cache.as_deref()).map(|_| 0)
        }
        Commands::Program => commands::program(&ctx).map(|_| 0),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
