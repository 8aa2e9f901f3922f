//! The access graph of one user, as plain data
//!
//! Nodes and edges are keyed by name. Colors, ids and layout belong to
//! [`super::style`].

use crate::access::{has_access, propagate_inheritance_in};
use crate::catalog::Catalog;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Group {
        name: String,
        /// Held directly or by inheritance
        access: bool,
        /// Held by inheritance only
        inherited: bool,
        in_directory: bool,
        description: Option<String>,
    },
    AppGroup {
        name: String,
        access: bool,
    },
    App {
        name: String,
        parent: String,
        access: bool,
    },
    AppInstance {
        name: String,
        /// Owning app
        parent: String,
        section: String,
        access: bool,
    },
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Group { name, .. }
            | Node::AppGroup { name, .. }
            | Node::App { name, .. }
            | Node::AppInstance { name, .. } => name.as_str(),
        }
    }

    pub fn access(&self) -> bool {
        match self {
            Node::Group { access, .. }
            | Node::AppGroup { access, .. }
            | Node::App { access, .. }
            | Node::AppInstance { access, .. } => *access,
        }
    }

    pub fn parent(&self) -> Option<&str> {
        match self {
            Node::App { parent, .. } | Node::AppInstance { parent, .. } => Some(parent.as_str()),
            Node::Group { .. } | Node::AppGroup { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Edge {
    /// `parent` grants `child`; active when the user holds `parent`
    Inherits { parent: String, child: String, active: bool },
    /// `instance` of `app` needs `group`; satisfied when the user holds `group`
    Requires { app: String, instance: String, group: String, satisfied: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccessGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// App instance names, the starting points of the layout
    pub roots: Vec<String>,
}

impl AccessGraph {
    /// Build the graph of `catalog` as seen by a user holding `user_groups`
    ///
    /// `directory_groups` is the identity provider's group list; catalog
    /// groups missing from it are flagged. Groups referenced by the
    /// catalog but never declared still get a node so no edge dangles.
    pub fn build(
        catalog: &Catalog,
        user_groups: &BTreeSet<String>,
        directory_groups: &BTreeMap<String, String>,
    ) -> Self {
        let structure = catalog.to_auth_structure();
        let mut effective = propagate_inheritance_in(user_groups, &structure.user_groups, &structure.ad_groups);
        effective.extend(user_groups.iter().cloned());

        let mut graph = AccessGraph::default();

        let mut group_names: Vec<&str> = Vec::new();
        let mut seen = BTreeSet::new();
        let declared = catalog.groups.groups.iter().map(|def| def.name.as_str());
        let inherited = catalog.groups.groups.iter().flat_map(|def| def.inherits.iter().map(String::as_str));
        let required = catalog.apps.instances().flat_map(|(_, _, inst)| inst.requires.iter().map(String::as_str));
        for name in declared.chain(inherited).chain(required) {
            if seen.insert(name) {
                group_names.push(name);
            }
        }

        for name in group_names {
            let access = effective.contains(name);
            graph.nodes.push(Node::Group {
                name: name.to_string(),
                access,
                inherited: access && !user_groups.contains(name),
                in_directory: directory_groups.contains_key(name),
                description: directory_groups.get(name).filter(|d| !d.is_empty()).cloned(),
            });
        }

        let mut seen_edges = BTreeSet::new();
        for def in &catalog.groups.groups {
            for child in &def.inherits {
                if seen_edges.insert((def.name.as_str(), child.as_str())) {
                    graph.edges.push(Edge::Inherits {
                        parent: def.name.clone(),
                        child: child.clone(),
                        active: effective.contains(&def.name),
                    });
                }
            }
        }

        for section in &catalog.apps.app_groups {
            let mut section_nodes = Vec::new();
            let mut section_access = false;

            for app in &section.apps {
                let mut app_nodes = Vec::new();
                let mut app_access = false;

                for instance in &app.instances {
                    let requirements: BTreeSet<String> = instance.requires.iter().cloned().collect();
                    let access = has_access(&effective, &requirements);
                    app_access |= access;

                    app_nodes.push(Node::AppInstance {
                        name: instance.name.clone(),
                        parent: app.name.clone(),
                        section: section.name.clone(),
                        access,
                    });
                    graph.roots.push(instance.name.clone());
                    for group in &instance.requires {
                        graph.edges.push(Edge::Requires {
                            app: app.name.clone(),
                            instance: instance.name.clone(),
                            group: group.clone(),
                            satisfied: effective.contains(group),
                        });
                    }
                }

                section_access |= app_access;
                section_nodes.push(Node::App { name: app.name.clone(), parent: section.name.clone(), access: app_access });
                section_nodes.append(&mut app_nodes);
            }

            graph.nodes.push(Node::AppGroup { name: section.name.clone(), access: section_access });
            graph.nodes.append(&mut section_nodes);
        }

        graph
    }

    pub fn group(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| matches!(n, Node::Group { .. }) && n.name() == name)
    }

    pub fn instance(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| matches!(n, Node::AppInstance { .. }) && n.name() == name)
    }

    pub fn accessible_instances(&self) -> BTreeSet<String> {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::AppInstance { access: true, .. }))
            .map(|n| n.name().to_string())
            .collect()
    }
}
