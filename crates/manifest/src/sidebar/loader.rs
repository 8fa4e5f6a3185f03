//! Loader for sidebar navigation manifests.
//!
//! A tree declaration is a list whose entries are either document ids
//! (strings) or groups (`{"label": ..., "items": [...]}`). A sidebar set is
//! an object mapping sidebar names to tree declarations.
//!
//! Validation is a single depth-first pass in declared order. The first
//! violation aborts the load; no partial tree is ever returned.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::tree::{Group, NavigationNode, NavigationTree, SidebarSet};
use crate::error::ValidationError;

/// Keys accepted on a group object.
const GROUP_KEYS: &[&str] = &["label", "items", "collapsed"];

/// Load and validate a single navigation tree.
pub fn load(declaration: &Value) -> Result<NavigationTree, ValidationError> {
    load_at(declaration, "")
}

/// Load and validate a set of named sidebars.
///
/// Document ids must be unique within each sidebar; the same document may
/// appear in more than one sidebar.
pub fn load_sidebars(declaration: &Value) -> Result<SidebarSet, ValidationError> {
    let Value::Object(entries) = declaration else {
        return Err(ValidationError::malformed(
            "manifest",
            format!(
                "expected an object mapping sidebar names to entries, found {}",
                describe(declaration)
            ),
        ));
    };

    let mut sidebars = IndexMap::with_capacity(entries.len());
    for (name, tree) in entries {
        if name.trim().is_empty() {
            return Err(ValidationError::malformed("manifest", "sidebar name is empty"));
        }
        sidebars.insert(name.clone(), load_at(tree, name)?);
    }

    debug!(sidebars = sidebars.len(), "loaded sidebar manifest");
    Ok(SidebarSet::new(sidebars))
}

fn load_at(declaration: &Value, root: &str) -> Result<NavigationTree, ValidationError> {
    let Value::Array(entries) = declaration else {
        let location = if root.is_empty() { "manifest" } else { root };
        return Err(ValidationError::malformed(
            location,
            format!("expected a list of entries, found {}", describe(declaration)),
        ));
    };

    // doc id -> location of its first reference
    let mut seen: HashMap<String, String> = HashMap::new();

    let nodes = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| load_node(entry, format!("{root}[{i}]"), &mut seen))
        .collect::<Result<Vec<_>, _>>()?;

    if nodes.is_empty() {
        warn!(sidebar = %root, "navigation tree declares no entries");
    }

    debug!(
        sidebar = %root,
        entries = nodes.len(),
        documents = seen.len(),
        "loaded navigation tree"
    );
    Ok(NavigationTree::new(nodes))
}

fn load_node(
    entry: &Value,
    location: String,
    seen: &mut HashMap<String, String>,
) -> Result<NavigationNode, ValidationError> {
    match entry {
        Value::String(doc_id) => load_leaf(doc_id, location, seen),
        Value::Object(fields) => load_group(fields, location, seen),
        other => Err(ValidationError::malformed(
            location,
            format!(
                "expected a document id or a {{label, items}} group, found {}",
                describe(other)
            ),
        )),
    }
}

fn load_leaf(
    doc_id: &str,
    location: String,
    seen: &mut HashMap<String, String>,
) -> Result<NavigationNode, ValidationError> {
    if doc_id.trim().is_empty() {
        return Err(ValidationError::malformed(location, "document id is empty"));
    }

    if let Some(first_location) = seen.get(doc_id) {
        return Err(ValidationError::DuplicateReference {
            doc_id: doc_id.to_string(),
            location,
            first_location: first_location.clone(),
        });
    }

    seen.insert(doc_id.to_string(), location);
    Ok(NavigationNode::leaf(doc_id))
}

fn load_group(
    fields: &Map<String, Value>,
    location: String,
    seen: &mut HashMap<String, String>,
) -> Result<NavigationNode, ValidationError> {
    if let Some(key) = fields.keys().find(|k| !GROUP_KEYS.contains(&k.as_str())) {
        return Err(ValidationError::malformed(
            location,
            format!(
                "unknown group key '{key}'. Valid keys: {}",
                GROUP_KEYS.join(", ")
            ),
        ));
    }

    let label = match fields.get("label") {
        Some(Value::String(label)) if !label.trim().is_empty() => label.clone(),
        Some(Value::String(_)) => {
            return Err(ValidationError::malformed(location, "group label is empty"));
        }
        Some(other) => {
            return Err(ValidationError::malformed(
                location,
                format!("group label must be a string, found {}", describe(other)),
            ));
        }
        None => {
            return Err(ValidationError::malformed(location, "group is missing 'label'"));
        }
    };

    let items = match fields.get("items") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ValidationError::malformed(
                location,
                format!(
                    "items of group '{label}' must be a list, found {}",
                    describe(other)
                ),
            ));
        }
        None => {
            return Err(ValidationError::malformed(
                location,
                format!("group '{label}' is missing 'items'"),
            ));
        }
    };

    if items.is_empty() {
        return Err(ValidationError::EmptyGroup { label, location });
    }

    let collapsed = match fields.get("collapsed") {
        None => None,
        Some(Value::Bool(flag)) => Some(*flag),
        Some(other) => {
            return Err(ValidationError::malformed(
                location,
                format!(
                    "'collapsed' of group '{label}' must be a boolean, found {}",
                    describe(other)
                ),
            ));
        }
    };

    let children = items
        .iter()
        .enumerate()
        .map(|(i, item)| load_node(item, format!("{location}.items[{i}]"), seen))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NavigationNode::Group(Group::new(label, children, collapsed)))
}

/// Short description of a JSON value's type for error messages.
fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
