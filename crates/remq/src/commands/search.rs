//! Search command implementation.
//!
//! Builds a search request from a request file and command-line flags, runs it
//! against the snapshot, and prints the response.

use std::fs;
use std::path::Path;

use reminders_query_rs::filter::parse_filter;
use reminders_query_rs::{
    GroupField, Granularity, LogicNode, QueryEngine, SearchGrouping, SearchPagination,
    SearchRequest, SearchSortDescriptor, SnapshotStore, SortDirection, SortField,
};

use super::config::Config;
use super::{CommandContext, CommandError, Result};
use crate::cli::SearchArgs;
use crate::clock::query_context;
use crate::output::{format_response_json, format_response_table};

/// Executes the search command.
///
/// # Errors
///
/// Returns an error if the request cannot be built (bad filter, bad JSON,
/// unknown group or sort field) or the snapshot cannot be read.
pub fn execute(
    ctx: &CommandContext,
    args: &SearchArgs,
    store: &SnapshotStore,
    config: &Config,
) -> Result<()> {
    let request = build_request(args, config)?;
    let context = query_context(&args.clock, config)?;

    if ctx.verbose {
        eprintln!("Snapshot: {}", store.path().display());
        eprintln!("Request: {}", serde_json::to_string(&request)?);
    }

    let records = store.fetch(&request)?;
    let response = QueryEngine::new(context).run(records, &request);

    if ctx.json_output {
        println!("{}", format_response_json(&response)?);
    } else if !ctx.quiet {
        let output = format_response_table(&response, &context, ctx.date_format, ctx.use_colors);
        print!("{output}");
    }

    Ok(())
}

/// Builds the search request.
///
/// Starts from `--request` when given and layers flags on top. Logic from the
/// file, `--logic` and `--filter` are all required to match. Repeated
/// `--group-by`/`--sort`/`--list` flags replace the file's values. Limit and
/// completed-visibility fall back to the config file.
pub fn build_request(args: &SearchArgs, config: &Config) -> Result<SearchRequest> {
    let mut request = match &args.request {
        Some(path) => read_request(path)?,
        None => SearchRequest::new(),
    };

    let mut logic: Vec<LogicNode> = request.logic.take().into_iter().collect();
    if let Some(raw) = &args.logic {
        logic.push(parse_logic_arg(raw)?);
    }
    if let Some(filter) = &args.filter {
        logic.push(parse_filter(filter)?);
    }
    request.logic = match logic.len() {
        0 => None,
        1 => logic.pop(),
        _ => Some(LogicNode::all(logic)),
    };

    if !args.group_by.is_empty() {
        let group_by = args
            .group_by
            .iter()
            .map(|spec| parse_grouping(spec))
            .collect::<Result<Vec<_>>>()?;
        request.group_by = Some(group_by);
    }

    if !args.sort.is_empty() {
        let sort = args
            .sort
            .iter()
            .map(|spec| parse_sort(spec))
            .collect::<Result<Vec<_>>>()?;
        request.sort = Some(sort);
    }

    let pagination = request.pagination.unwrap_or_default();
    let limit = args.limit.or(pagination.limit).or(config.search.limit);
    let offset = args.offset.or(pagination.offset);
    request.pagination = if limit.is_some() || offset.is_some() {
        Some(SearchPagination::new(limit, offset))
    } else {
        None
    };

    if args.include_completed || config.search.include_completed == Some(true) {
        request.include_completed = true;
    }

    if !args.list.is_empty() {
        request.lists = Some(args.list.clone());
    }

    if let Some(query) = &args.query {
        request.query = Some(query.clone());
    }

    Ok(request)
}

fn read_request(path: &Path) -> Result<SearchRequest> {
    let content = fs::read_to_string(path).map_err(|e| {
        CommandError::Request(format!("failed to read {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Parses `--logic`: inline JSON, or `@path` to read JSON from a file.
fn parse_logic_arg(raw: &str) -> Result<LogicNode> {
    let json = match raw.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| CommandError::Request(format!("failed to read {}: {}", path, e)))?,
        None => raw.to_string(),
    };
    Ok(serde_json::from_str(&json)?)
}

/// Parses `field[:granularity]`, e.g. `list` or `dueDate:week`.
fn parse_grouping(spec: &str) -> Result<SearchGrouping> {
    let (name, granularity) = match spec.split_once(':') {
        Some((name, granularity)) => (name, Some(granularity)),
        None => (spec, None),
    };

    let field = GroupField::from_name(name.trim()).ok_or_else(|| {
        let valid: Vec<&str> = GroupField::ALL.iter().map(|f| f.as_str()).collect();
        CommandError::Request(format!(
            "unknown group field '{}'. Valid fields: {}",
            name,
            valid.join(", ")
        ))
    })?;

    let grouping = SearchGrouping::new(field);
    match granularity {
        Some(raw) => {
            let granularity = Granularity::from_name(raw.trim()).ok_or_else(|| {
                CommandError::Request(format!(
                    "unknown granularity '{}'. Valid values: day, week, month",
                    raw
                ))
            })?;
            Ok(grouping.with_granularity(granularity))
        }
        None => Ok(grouping),
    }
}

/// Parses `field[:asc|desc]`, e.g. `dueDate` or `priority:desc`.
fn parse_sort(spec: &str) -> Result<SearchSortDescriptor> {
    let (name, direction) = match spec.split_once(':') {
        Some((name, direction)) => (name, Some(direction)),
        None => (spec, None),
    };

    let field = SortField::from_name(name.trim()).ok_or_else(|| {
        let valid: Vec<&str> = SortField::ALL.iter().map(|f| f.as_str()).collect();
        CommandError::Request(format!(
            "unknown sort field '{}'. Valid fields: {}",
            name,
            valid.join(", ")
        ))
    })?;

    let direction = match direction {
        Some(raw) => SortDirection::from_name(raw.trim()).ok_or_else(|| {
            CommandError::Request(format!(
                "unknown sort direction '{}'. Valid values: asc, desc",
                raw
            ))
        })?,
        None => SortDirection::Asc,
    };

    Ok(SearchSortDescriptor::new(field, direction))
}
