use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::builder::IssueBuilder;
use crate::client::{IssueGateway, Selector};
use crate::error::{SummarizerError, SummarizerResult};
use crate::models::{IssueNode, Tree};

/// How top-level query results map to reported trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingMode {
    /// Each top-level issue is its own tree.
    #[default]
    None,
    /// All top-level issues under one virtual root.
    Merge,
    /// Direct children of the top-level issues become the trees.
    Children,
}

impl FromStr for GroupingMode {
    type Err = SummarizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "top" => Ok(GroupingMode::None),
            "merge" => Ok(GroupingMode::Merge),
            "children" => Ok(GroupingMode::Children),
            other => Err(SummarizerError::InvalidInput(format!(
                "invalid group value: {:?}. Valid options are: top, merge, children",
                other
            ))),
        }
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupingMode::None => "top",
            GroupingMode::Merge => "merge",
            GroupingMode::Children => "children",
        };
        write!(f, "{}", name)
    }
}

/// Fetch the issues named by `selector`, build each of them on its own task
/// and group the results.
///
/// Any failure aborts the whole assembly: nothing built so far is returned.
/// The build tasks never outlive this future; dropping it aborts them.
pub async fn assemble(
    gateway: Arc<dyn IssueGateway>,
    selector: &Selector,
    grouping: GroupingMode,
) -> SummarizerResult<Vec<Tree>> {
    let top_level = gateway.query_top_level(selector).await?;
    info!("found {} top-level issues", top_level.len());

    let assembly = CancellationToken::new();
    let _cancel_on_drop = assembly.clone().drop_guard();
    let builder = IssueBuilder::new(gateway);

    let mut slots: Vec<Option<IssueNode>> = Vec::with_capacity(top_level.len());
    let mut tasks = JoinSet::new();
    for (index, raw) in top_level.into_iter().enumerate() {
        slots.push(None);
        let build = builder.build(raw, assembly.child_token());
        tasks.spawn(async move { (index, build.await) });
    }

    while let Some(joined) = tasks.join_next().await {
        let error = match joined {
            Ok((index, Ok(node))) => {
                slots[index] = Some(node);
                continue;
            }
            Ok((_, Err(e))) => e,
            Err(e) => SummarizerError::Unknown(format!("build task did not complete: {}", e)),
        };
        // The remaining results would be discarded.
        assembly.cancel();
        tasks.abort_all();
        return Err(error);
    }

    let nodes: Vec<IssueNode> = slots.into_iter().flatten().collect();
    debug!("built {} top-level trees", nodes.len());

    Ok(group(nodes, grouping))
}

/// Apply `grouping` to built top-level nodes, preserving their order.
pub fn group(nodes: Vec<IssueNode>, grouping: GroupingMode) -> Vec<Tree> {
    match grouping {
        GroupingMode::None => nodes.into_iter().map(Tree::Issue).collect(),
        GroupingMode::Merge => {
            if nodes.is_empty() {
                Vec::new()
            } else {
                vec![Tree::Virtual { children: nodes }]
            }
        }
        GroupingMode::Children => nodes
            .into_iter()
            .flat_map(|node| node.children)
            .map(Tree::Issue)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_jira_time, Status};

    fn node(key: &str, children: Vec<IssueNode>) -> IssueNode {
        IssueNode {
            key: key.to_string(),
            url: format!("https://jira.example.com/browse/{}", key),
            summary: format!("Summary of {}", key),
            description: String::new(),
            issue_type: "Task".to_string(),
            created: parse_jira_time("2024-01-01T00:00:00.000+0000").unwrap(),
            status: Status::default(),
            comments: Vec::new(),
            children,
        }
    }

    fn keys(trees: &[Tree]) -> Vec<Option<&str>> {
        trees.iter().map(Tree::key).collect()
    }

    #[test]
    fn grouping_mode_parses_aliases() {
        assert_eq!("top".parse::<GroupingMode>().unwrap(), GroupingMode::None);
        assert_eq!("none".parse::<GroupingMode>().unwrap(), GroupingMode::None);
        assert_eq!("Merge".parse::<GroupingMode>().unwrap(), GroupingMode::Merge);
        assert_eq!("children".parse::<GroupingMode>().unwrap(), GroupingMode::Children);
        assert!("flat".parse::<GroupingMode>().is_err());
    }

    #[test]
    fn none_keeps_each_top_level_issue() {
        let trees = group(
            vec![node("A", vec![node("A1", vec![])]), node("B", vec![])],
            GroupingMode::None,
        );
        assert_eq!(keys(&trees), vec![Some("A"), Some("B")]);
        assert_eq!(trees[0].children().len(), 1);
    }

    #[test]
    fn merge_wraps_in_a_virtual_root() {
        let trees = group(vec![node("A", vec![]), node("B", vec![])], GroupingMode::Merge);
        assert_eq!(trees.len(), 1);
        let children: Vec<_> = trees[0].children().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(children, vec!["A", "B"]);
        assert!(trees[0].key().is_none());
    }

    #[test]
    fn merge_of_nothing_is_nothing() {
        assert!(group(Vec::new(), GroupingMode::Merge).is_empty());
    }

    #[test]
    fn children_promotes_direct_children_only() {
        let trees = group(
            vec![
                node("A", vec![node("A1", vec![node("A1a", vec![])]), node("A2", vec![])]),
                node("B", vec![]),
            ],
            GroupingMode::Children,
        );
        assert_eq!(keys(&trees), vec![Some("A1"), Some("A2")]);
        assert_eq!(trees[0].children()[0].key, "A1a");
    }
}
