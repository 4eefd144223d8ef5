use std::process;

use clap::{Arg, ArgAction, Command};

use jira_summarizer::commands::handle_summarize;
use jira_summarizer::constants::LOG_ENV_VAR;
use jira_summarizer::logging::init_logging;

fn cli() -> Command {
    Command::new("jira-summarizer")
        .about("Summarize the high level tickets based on recent activity on their children")
        .long_about(
            "Summarize the high level tickets based on recent activity on their children. \
             If no Jira ticket is provided, all active assigned epics are considered.",
        )
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(format!("Set {} (e.g. debug) to tune log output.", LOG_ENV_VAR))
        .arg(
            Arg::new("keys")
                .value_name("JIRA_TICKET")
                .help("Top-level issue keys to summarize")
                .num_args(0..)
                .index(1),
        )
        .arg(
            Arg::new("since")
                .long("since")
                .short('s')
                .value_name("SINCE")
                .help("Start time or relative duration (e.g. '2004-10-20', '6mo', '1w', '5d') [default: 2w]"),
        )
        .arg(
            Arg::new("group")
                .long("group")
                .short('g')
                .value_name("MODE")
                .value_parser(["top", "none", "merge", "children"])
                .help("Grouping behavior: top, merge, children [default: top]"),
        )
        .arg(
            Arg::new("no-post")
                .long("no-post")
                .help("Do not offer posting the summary to the grouping jira tickets")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("jira-username")
                .long("jira-username")
                .value_name("EMAIL")
                .help("Jira username to connect with"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show debug logs")
                .action(ArgAction::SetTrue),
        )
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();

    init_logging(matches.get_flag("verbose"));

    if let Err(e) = handle_summarize(&matches).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
