//! CLI command implementations.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use nagstat::command::{current_timestamp, format_command, lookup_action, ACTIONS};
use nagstat::query::{render_details, render_host_listing, render_json, render_listing};
use nagstat::rollup::rollup_services;
use nagstat::{
    find_hosts, find_services, CommandChannel, CommandRequest, FileKind, Matcher, ObjectCache, RollupFilter,
    RollupReport, ServiceAction, ServiceSelection, Settings, StatusSnapshot,
};
use tracing::debug;

use crate::{ListFormat, Selectors};

/// Paths given as global flags.
#[derive(Debug, Clone, Default)]
pub struct Context {
    pub nagios_cfg: Option<PathBuf>,
    pub status_file: Option<PathBuf>,
}

impl Context {
    fn settings(&self) -> nagstat::Result<Settings> {
        Settings::load()
    }

    fn resolve(&self, settings: &Settings, kind: FileKind, flag: Option<&Path>) -> nagstat::Result<PathBuf> {
        let path = settings.resolve(kind, flag, self.nagios_cfg.as_deref())?;
        debug!(kind = ?kind, path = %path.display(), "resolved file");
        Ok(path)
    }

    fn snapshot(&self, settings: &Settings) -> nagstat::Result<StatusSnapshot> {
        let path = self.resolve(settings, FileKind::Status, self.status_file.as_deref())?;
        StatusSnapshot::from_path(&path)
    }
}

/// Options for `services` beyond the shared selectors.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub acknowledged: Option<bool>,
    pub passive: bool,
    pub state: Option<String>,
    pub format: ListFormat,
    pub template: Option<String>,
}

fn selection(selectors: &Selectors) -> ServiceSelection {
    let mut selection = ServiceSelection {
        for_host: selectors.for_host.clone(),
        with_service: selectors.with_service.clone(),
        ..Default::default()
    };
    if selectors.notify_enabled {
        selection = selection.notify_enabled(true);
    } else if selectors.notify_disabled {
        selection = selection.notify_enabled(false);
    }
    selection
}

fn print_lines(lines: &[String]) -> nagstat::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// List hosts that have a matching service.
pub fn hosts(ctx: &Context, selectors: &Selectors, template: Option<&str>) -> nagstat::Result<()> {
    let settings = ctx.settings()?;
    let snapshot = ctx.snapshot(&settings)?;
    let selection = selection(selectors);

    let hosts = find_hosts(&selection, &snapshot)?;
    print_lines(&render_host_listing(&hosts, template, current_timestamp()))
}

/// List matching services in the chosen format.
pub fn services(ctx: &Context, selectors: &Selectors, opts: &ServiceOptions) -> nagstat::Result<()> {
    let settings = ctx.settings()?;
    let snapshot = ctx.snapshot(&settings)?;

    let mut selection = selection(selectors);
    selection.acknowledged = opts.acknowledged;
    selection.passive = opts.passive;
    selection.current_state = opts.state.clone();

    let matches = find_services(&selection, &snapshot)?;
    debug!(matches = matches.len(), "service search");

    let lines = match opts.format {
        ListFormat::List => {
            let template = opts.template.as_deref().or(selection.default_template());
            render_listing(&matches, template, current_timestamp())
        }
        ListFormat::Details => render_details(&matches),
        ListFormat::Json => render_json(&matches)?,
    };
    print_lines(&lines)
}

/// Apply a canned action to every matching service. Returns the exit code.
pub fn act(
    ctx: &Context,
    action: &str,
    selectors: &Selectors,
    command_file: Option<&Path>,
    author: Option<&str>,
    comment: Option<&str>,
    dry_run: bool,
) -> nagstat::Result<i32> {
    let action: ServiceAction = action.parse()?;
    let settings = ctx.settings()?;
    let snapshot = ctx.snapshot(&settings)?;

    let matches = find_services(&selection(selectors), &snapshot)?;
    if matches.is_empty() {
        eprintln!("No services matched");
        return Ok(0);
    }

    let tstamp = current_timestamp();
    let author = author.unwrap_or(&settings.author);
    let requests: Vec<CommandRequest> = matches
        .iter()
        .map(|m| action.request(m, tstamp, author, comment))
        .collect();

    if dry_run {
        let lines = requests
            .iter()
            .map(format_command)
            .collect::<nagstat::Result<Vec<_>>>()?;
        return print_lines(&lines).map(|_| 0);
    }

    let path = ctx.resolve(&settings, FileKind::Command, command_file)?;
    let channel = CommandChannel::open(path)?;
    let report = channel.submit(requests);

    for outcome in &report.outcomes {
        match &outcome.line {
            Some(line) => println!("{}", line),
            None => {
                for message in &outcome.messages {
                    eprintln!("Error: {}: {}", outcome.request.action, message);
                }
            }
        }
    }

    if report.success {
        Ok(0)
    } else {
        eprintln!("{} of {} commands failed", report.failures().count(), report.outcomes.len());
        Ok(1)
    }
}

/// Send a single command built from `name=value` arguments.
pub fn send(
    ctx: &Context,
    action: &str,
    fields: &[String],
    ts: Option<i64>,
    command_file: Option<&Path>,
    dry_run: bool,
) -> nagstat::Result<()> {
    let mut request = CommandRequest::new(action).with_assignments(fields.iter().map(String::as_str))?;
    request.timestamp = Some(ts.unwrap_or_else(current_timestamp));

    if dry_run {
        println!("{}", format_command(&request)?);
        return Ok(());
    }

    let settings = ctx.settings()?;
    let path = ctx.resolve(&settings, FileKind::Command, command_file)?;
    let line = CommandChannel::open(path)?.write(&request)?;
    println!("{}", line);
    Ok(())
}

/// List every action, or one action's fields.
pub fn actions(action: Option<&str>) -> nagstat::Result<()> {
    match action {
        Some(name) => {
            let spec = lookup_action(name).ok_or_else(|| nagstat::Error::UnknownAction(name.to_string()))?;
            if spec.fields.is_empty() {
                println!("{} (no fields)", spec.name);
            } else {
                println!("{};{}", spec.name, spec.fields.join(";"));
            }
        }
        None => {
            let lines: Vec<String> = ACTIONS.iter().map(|a| a.name.to_string()).collect();
            print_lines(&lines)?;
        }
    }
    Ok(())
}

/// Roll up service states. Returns 2 on critical, 1 on warning, else 0.
pub fn check(ctx: &Context, service: Option<&str>, host: Option<&str>) -> nagstat::Result<i32> {
    let filter = RollupFilter::new(service, host)?;
    let settings = ctx.settings()?;
    let snapshot = ctx.snapshot(&settings)?;

    let report = RollupReport::build(rollup_services(&snapshot, &filter));
    println!("{}", report.summary_line(&filter));
    print_lines(&report.detail_lines())?;
    Ok(report.exit_code())
}

/// Print objects of one type, optionally filtered by one attribute.
pub fn objects(
    ctx: &Context,
    kind: &str,
    by: Option<&str>,
    pattern: Option<&str>,
    object_cache: Option<&Path>,
) -> nagstat::Result<()> {
    let settings = ctx.settings()?;
    let path = ctx.resolve(&settings, FileKind::ObjectCache, object_cache)?;
    let cache = ObjectCache::from_path(&path)?;

    let selected = match (by, pattern) {
        (Some(attribute), Some(raw)) => cache.find_all(kind, attribute, &Matcher::parse(raw)?),
        _ => cache
            .objects(kind)
            .map(|objs| objs.values().collect())
            .unwrap_or_default(),
    };
    if selected.is_empty() {
        return Err(nagstat::Error::NotFound(format!("no {} objects matched", kind)));
    }

    let mut lines = Vec::new();
    for attrs in selected {
        lines.push(format!("define {} {{", kind));
        lines.extend(attrs.iter().map(|(k, v)| format!("\t{}\t{}", k, v)));
        lines.push("\t}".to_string());
    }
    print_lines(&lines)
}

/// Print the `info` and `programstatus` blocks as key=value pairs.
pub fn program(ctx: &Context) -> nagstat::Result<()> {
    let settings = ctx.settings()?;
    let snapshot = ctx.snapshot(&settings)?;

    let lines: Vec<String> = snapshot
        .info
        .iter()
        .chain(snapshot.process.iter())
        .map(|(k, v)| format!("{}={}", k, v))
        .collect();
    print_lines(&lines)
}
