//! Cytoscape rendering of an [`AccessGraph`]

use super::graph::{AccessGraph, Edge, Node};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Id of the compound node holding every section
pub const APPS_ROOT_ID: &str = "apps";

/// Colors and shapes keyed by access flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStyle {
    /// Group held by inheritance
    pub inherited: String,
    /// Group held directly
    pub direct: String,
    /// Accessible instance, active edge
    pub granted: String,
    /// Anything not held
    pub denied: String,
    /// Label of a group the directory knows
    pub listed_label: String,
    /// Label of a group missing from the directory
    pub unlisted_label: String,
    pub instance_shape: String,
    /// Description shown for groups missing from the directory
    pub unlisted_description: String,
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self {
            inherited: "green".to_string(),
            direct: "lime".to_string(),
            granted: "green".to_string(),
            denied: "grey".to_string(),
            listed_label: "black".to_string(),
            unlisted_label: "red".to_string(),
            instance_shape: "triangle".to_string(),
            unlisted_description: "Warning! Not in directory".to_string(),
        }
    }
}

/// Cytoscape `elements` plus the layout to render them with
#[derive(Debug, Clone, Serialize)]
pub struct Elements {
    pub elements: Vec<Value>,
    pub layout: Value,
}

/// Node identity for id lookups; apps and instances are scoped by parent
#[derive(Hash, PartialEq, Eq)]
enum Slot<'a> {
    Group(&'a str),
    AppGroup(&'a str),
    App(&'a str, &'a str),
    Instance(&'a str, &'a str),
}

impl GraphStyle {
    /// Render `graph`; ids are fresh on every call
    pub fn to_elements(&self, graph: &AccessGraph) -> Elements {
        let mut ids: HashMap<Slot<'_>, String> = HashMap::new();
        for node in &graph.nodes {
            ids.insert(slot(node), unique_id(node.name()));
        }

        let mut elements = vec![json!({"data": {"id": APPS_ROOT_ID, "name": "Apps"}})];

        for node in &graph.nodes {
            let id = &ids[&slot(node)];
            let element = match node {
                Node::Group { name, access, inherited, in_directory, description } => {
                    let background = match (access, inherited) {
                        (true, true) => &self.inherited,
                        (true, false) => &self.direct,
                        _ => &self.denied,
                    };
                    let label = if *in_directory { &self.listed_label } else { &self.unlisted_label };
                    let desc = match (in_directory, description) {
                        (false, _) => self.unlisted_description.clone(),
                        (true, Some(d)) => d.clone(),
                        (true, None) => String::new(),
                    };
                    json!({
                        "data": {"id": id, "name": name, "desc": desc},
                        "style": {"background-color": background, "color": label, "label": name},
                    })
                }
                Node::AppGroup { name, access } => json!({
                    "data": {"id": id, "name": name, "parent": APPS_ROOT_ID},
                    "style": {"border-color": self.color(*access), "label": name},
                }),
                Node::App { name, parent, access } => json!({
                    "data": {"id": id, "name": name, "parent": ids.get(&Slot::AppGroup(parent))},
                    "style": {"border-color": self.color(*access), "label": name},
                }),
                Node::AppInstance { name, parent, section, access } => json!({
                    "data": {"id": id, "name": name, "parent": ids.get(&Slot::App(section, parent))},
                    "style": {
                        "background-color": self.color(*access),
                        "shape": self.instance_shape,
                        "label": name,
                    },
                }),
            };
            elements.push(element);
        }

        for edge in &graph.edges {
            let (name, source, target, on) = match edge {
                Edge::Inherits { parent, child, active } => (
                    format!("{child}-{parent}"),
                    ids.get(&Slot::Group(parent)),
                    ids.get(&Slot::Group(child)),
                    *active,
                ),
                Edge::Requires { app, instance, group, satisfied } => (
                    format!("{instance}-{group}"),
                    ids.get(&Slot::Instance(app, instance)),
                    ids.get(&Slot::Group(group)),
                    *satisfied,
                ),
            };
            let (Some(source), Some(target)) = (source, target) else {
                log::warn!("Skipping edge {} with a missing endpoint", name);
                continue;
            };
            elements.push(json!({
                "data": {"id": unique_id(&name), "name": name, "source": source, "target": target},
                "style": {"line-color": self.color(on), "target-arrow-color": self.color(on)},
            }));
        }

        let roots = graph
            .nodes
            .iter()
            .filter(|node| matches!(node, Node::AppInstance { .. }))
            .filter_map(|node| ids.get(&slot(node)))
            .map(|id| format!("[id = \"{id}\"]"))
            .collect::<Vec<_>>()
            .join(", ");

        Elements { elements, layout: json!({"name": "breadthfirst", "roots": roots}) }
    }

    fn color(&self, on: bool) -> &str {
        if on {
            &self.granted
        } else {
            &self.denied
        }
    }
}

fn slot(node: &Node) -> Slot<'_> {
    match node {
        Node::Group { name, .. } => Slot::Group(name),
        Node::AppGroup { name, .. } => Slot::AppGroup(name),
        Node::App { name, parent, .. } => Slot::App(parent, name),
        Node::AppInstance { name, parent, .. } => Slot::Instance(parent, name),
    }
}

fn unique_id(name: &str) -> String {
    format!("{name}{}", uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AppInstanceDef;
    use crate::testing::{sample_catalog, set};
    use std::collections::{BTreeMap, HashSet};

    fn render(groups: &[&str]) -> Elements {
        let directory = BTreeMap::from([("admin_group".to_string(), "Admins".to_string())]);
        let graph = AccessGraph::build(&sample_catalog(), &set(groups), &directory);
        GraphStyle::default().to_elements(&graph)
    }

    fn find<'a>(elements: &'a Elements, name: &str, predicate: impl Fn(&Value) -> bool) -> &'a Value {
        elements
            .elements
            .iter()
            .find(|e| e["data"]["name"] == name && predicate(e))
            .unwrap_or_else(|| panic!("no element named {name}"))
    }

    fn is_node(e: &Value) -> bool {
        e["data"]["source"].is_null()
    }

    #[test]
    fn test_group_colors() {
        let elements = render(&["admin_group"]);

        let admin = find(&elements, "admin_group", |e| is_node(e) && e["style"]["shape"].is_null());
        assert_eq!(admin["style"]["background-color"], "lime");
        assert_eq!(admin["style"]["color"], "black");
        assert_eq!(admin["data"]["desc"], "Admins");

        let forecast = find(&elements, "forecast_users", is_node);
        assert_eq!(forecast["style"]["background-color"], "green");
        assert_eq!(forecast["style"]["color"], "red");
        assert_eq!(forecast["data"]["desc"], "Warning! Not in directory");

        let superuser = find(&elements, "superuser", is_node);
        assert_eq!(superuser["style"]["background-color"], "grey");
    }

    #[test]
    fn test_instances_are_triangles_nested_in_apps() {
        let elements = render(&["internal"]);

        let instance = find(&elements, "slot_dc", |e| e["style"]["shape"] == "triangle");
        assert_eq!(instance["style"]["background-color"], "green");

        let app = find(&elements, "slot_dc", |e| is_node(e) && e["style"]["shape"].is_null());
        assert_eq!(instance["data"]["parent"], app["data"]["id"]);
    }

    #[test]
    fn test_ids_are_unique_per_render() {
        let first = render(&["internal"]);
        let second = render(&["internal"]);

        let ids: HashSet<&str> = first.elements.iter().filter_map(|e| e["data"]["id"].as_str()).collect();
        assert_eq!(ids.len(), first.elements.len());

        let again: HashSet<&str> = second.elements.iter().filter_map(|e| e["data"]["id"].as_str()).collect();
        assert_eq!(ids.intersection(&again).copied().collect::<Vec<_>>(), vec![APPS_ROOT_ID]);
    }

    #[test]
    fn test_layout_roots_are_instances() {
        let elements = render(&[]);
        assert_eq!(elements.layout["name"], "breadthfirst");

        let roots = elements.layout["roots"].as_str().unwrap();
        assert_eq!(roots.matches("[id = ").count(), 6);
        let slot_dc = find(&elements, "slot_dc", |e| e["style"]["shape"] == "triangle");
        assert!(roots.contains(slot_dc["data"]["id"].as_str().unwrap()));
    }

    #[test]
    fn test_same_instance_name_in_two_apps_renders_twice() {
        let mut catalog = sample_catalog();
        let portals = &mut catalog.apps.app_groups[1].apps[0];
        portals.instances.push(AppInstanceDef::new("slot_dc", &["portal_users"]));

        let graph = AccessGraph::build(&catalog, &set(&["internal"]), &BTreeMap::new());
        let elements = GraphStyle::default().to_elements(&graph);

        let copies: Vec<&Value> = elements
            .elements
            .iter()
            .filter(|e| e["data"]["name"] == "slot_dc" && e["style"]["shape"] == "triangle")
            .collect();
        assert_eq!(copies.len(), 2);
        assert_ne!(copies[0]["data"]["id"], copies[1]["data"]["id"]);
        assert_ne!(copies[0]["data"]["parent"], copies[1]["data"]["parent"]);

        let roots = elements.layout["roots"].as_str().unwrap();
        assert_eq!(roots.matches("[id = ").count(), 7);
        for copy in &copies {
            let id = copy["data"]["id"].as_str().unwrap();
            assert!(roots.contains(id));
            let edges = elements.elements.iter().filter(|e| e["data"]["source"] == id).count();
            assert_eq!(edges, 1, "instance {id} should keep its own requirement edge");
        }
    }

    #[test]
    fn test_edge_colors() {
        let elements = render(&["internal"]);
        let edge = find(&elements, "portal_users-internal", |e| !is_node(e));
        assert_eq!(edge["style"]["line-color"], "green");

        let edge = find(&elements, "forecast_users-admin_group", |e| !is_node(e));
        assert_eq!(edge["style"]["line-color"], "grey");
    }
}
