use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use clap::ArgMatches;
use tracing::{debug, info};

use super::post::edit_summary_and_post;
use crate::aggregate::{assemble, GroupingMode};
use crate::cli_context::CliContext;
use crate::client::{IssueGateway, Selector};
use crate::constants::{DEFAULT_GROUP, DEFAULT_SINCE};
use crate::error::{SummarizerError, SummarizerResult};
use crate::filtering::parse_since;
use crate::formatting::{print_report, render};

#[derive(Debug, Clone)]
pub struct SummaryOptions {
    pub selector: Selector,
    pub grouping: GroupingMode,
    pub cutoff: DateTime<FixedOffset>,
    pub no_post: bool,
}

/// A rendered tree, with the issue key it can be posted on.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub key: Option<String>,
    pub text: String,
}

pub async fn handle_summarize(matches: &ArgMatches) -> SummarizerResult<()> {
    let mut context = CliContext::load(matches.get_one::<String>("jira-username").cloned())?;

    let group = matches
        .get_one::<String>("group")
        .cloned()
        .or_else(|| context.config().group.clone())
        .unwrap_or_else(|| DEFAULT_GROUP.to_string());
    let grouping: GroupingMode = group.parse()?;

    let since = matches
        .get_one::<String>("since")
        .cloned()
        .or_else(|| context.config().since.clone())
        .unwrap_or_else(|| DEFAULT_SINCE.to_string());
    let cutoff = parse_since(&since)
        .map_err(|e| SummarizerError::InvalidInput(format!("invalid --since value: {}", e)))?;

    let mut no_post = matches.get_flag("no-post");
    if grouping == GroupingMode::Merge && !no_post {
        info!("merge grouping strategy in a virtual top ticket can't be posted on Jira. Only doing a summary.");
        no_post = true;
    }

    let keys: Vec<String> = matches
        .get_many::<String>("keys")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let options = SummaryOptions {
        selector: Selector::from_keys(keys),
        grouping,
        cutoff,
        no_post,
    };
    debug!("summarizing with {:?}", options);

    let gateway: Arc<dyn IssueGateway> = context.verified_client()?;
    let reports = prepare_reports(gateway.clone(), &options).await?;

    if reports.is_empty() {
        println!("No activity since {}.", options.cutoff.format("%Y-%m-%d %H:%M"));
        return Ok(());
    }

    for report in reports {
        match (&report.key, options.no_post) {
            (Some(key), false) => {
                edit_summary_and_post(gateway.as_ref(), key, &report.text).await?;
            }
            _ => print_report(&report.text),
        }
    }

    Ok(())
}

/// Assemble, prune and render every tree selected by `options`.
///
/// Trees without activity since the cutoff produce no report.
pub async fn prepare_reports(
    gateway: Arc<dyn IssueGateway>,
    options: &SummaryOptions,
) -> SummarizerResult<Vec<Report>> {
    let trees = assemble(gateway, &options.selector, options.grouping).await?;

    let mut reports = Vec::with_capacity(trees.len());
    for mut tree in trees {
        // Embedders are summarized from their children work.
        if tree.is_embedder() {
            tree.clear_own_comments();
        }

        if !tree.retain_recent(&options.cutoff) {
            debug!("no recent activity under {:?}", tree.key());
            continue;
        }

        reports.push(Report {
            key: tree.key().map(str::to_string),
            text: render(&tree),
        });
    }

    Ok(reports)
}
