use super::{group_set, Context};
use accessgraph_core::admin::{AccessGraph, GraphStyle};
use std::collections::BTreeMap;

/// Styled cytoscape JSON of the graph seen by `groups`
///
/// Without an identity provider, the declared catalog groups stand in for
/// the directory listing, so only undeclared groups are flagged.
pub fn run(ctx: &Context, groups: &[String], pretty: bool) -> anyhow::Result<String> {
    let directory: BTreeMap<String, String> =
        ctx.catalog.groups.group_names().map(|name| (name.to_string(), String::new())).collect();
    let graph = AccessGraph::build(&ctx.catalog, &group_set(groups), &directory);
    let elements = GraphStyle::default().to_elements(&graph);

    let json = if pretty { serde_json::to_string_pretty(&elements)? } else { serde_json::to_string(&elements)? };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures;
    use serde_json::Value;

    #[test]
    fn emits_elements_and_layout() {
        let out = run(&fixtures::context(), &["leads".to_string()], false).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["layout"]["name"], "breadthfirst");
        let elements = value["elements"].as_array().unwrap();
        let qsr = elements.iter().find(|e| e["data"]["name"] == "QSR").unwrap();
        assert_eq!(qsr["style"]["color"], "red");
        let leads = elements.iter().find(|e| e["data"]["name"] == "leads").unwrap();
        assert_eq!(leads["style"]["background-color"], "lime");
    }

    #[test]
    fn pretty_output_is_multiline() {
        let out = run(&fixtures::context(), &[], true).unwrap();
        assert!(out.lines().count() > 1);
    }
}
