//! Resource trees: the nested label structure of one locale.
//!
//! Definitions are read in two steps. Serde first produces a loose
//! [`RawNode`] that keeps duplicate keys and wrongly typed values, then
//! conversion checks the tree invariants and reports the exact path of any
//! violation:
//!
//! - every leaf is a string
//! - keys are unique and non-empty within one level

use crate::i18n::KeyPath;
use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::{btree_map, BTreeMap};
use std::fmt;

/// A node in a resource tree: a label or a nested group of labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResourceNode {
    Leaf(String),
    Branch(ResourceTree),
}

impl ResourceNode {
    pub fn leaf(value: impl Into<String>) -> Self {
        ResourceNode::Leaf(value.into())
    }

    pub fn branch<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ResourceNode)>,
    {
        ResourceNode::Branch(entries.into_iter().collect())
    }

    /// The label text, if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            ResourceNode::Leaf(value) => Some(value),
            ResourceNode::Branch(_) => None,
        }
    }

    /// The nested tree, if this node is a branch.
    pub fn as_branch(&self) -> Option<&ResourceTree> {
        match self {
            ResourceNode::Leaf(_) => None,
            ResourceNode::Branch(tree) => Some(tree),
        }
    }
}

/// One level of labels, keyed by feature or sub-feature name.
///
/// Keys are kept sorted so iteration, dumps and equality are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResourceTree {
    nodes: BTreeMap<String, ResourceNode>,
}

impl ResourceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// The node stored directly under `key`.
    pub fn get(&self, key: &str) -> Option<&ResourceNode> {
        self.nodes.get(key)
    }

    /// Walk `path` from this level. The root path resolves to nothing.
    pub fn resolve(&self, path: &KeyPath) -> Option<&ResourceNode> {
        let (last, parents) = path.segments().split_last()?;
        let mut tree = self;
        for segment in parents {
            tree = tree.get(segment)?.as_branch()?;
        }
        tree.get(last)
    }

    /// The label at `path`; `None` for missing paths and for branches.
    pub fn lookup(&self, path: &KeyPath) -> Option<&str> {
        self.resolve(path).and_then(ResourceNode::as_leaf)
    }

    /// Number of keys on this level.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every label in the tree with its full path, in key order.
    pub fn leaves(&self) -> Vec<(KeyPath, &str)> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut KeyPath::root(), &mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, path: &mut KeyPath, out: &mut Vec<(KeyPath, &'a str)>) {
        for (key, node) in &self.nodes {
            path.push(key.as_str());
            match node {
                ResourceNode::Leaf(value) => out.push((path.clone(), value.as_str())),
                ResourceNode::Branch(tree) => tree.collect_leaves(path, out),
            }
            path.pop();
        }
    }

    /// Total number of labels at any depth.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .values()
            .map(|node| match node {
                ResourceNode::Leaf(_) => 1,
                ResourceNode::Branch(tree) => tree.leaf_count(),
            })
            .sum()
    }
}

/// Later entries replace earlier ones with the same key.
impl<K: Into<String>> FromIterator<(K, ResourceNode)> for ResourceTree {
    fn from_iter<I: IntoIterator<Item = (K, ResourceNode)>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ResourceTree {
    type Item = (&'a String, &'a ResourceNode);
    type IntoIter = btree_map::Iter<'a, String, ResourceNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl<'de> Deserialize<'de> for ResourceTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawNode::deserialize(deserializer)?
            .into_tree(&mut KeyPath::root())
            .map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for ResourceNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawNode::deserialize(deserializer)?
            .into_node(&mut KeyPath::root())
            .map_err(de::Error::custom)
    }
}

/// A tree invariant violated by a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefinitionError {
    pub path: KeyPath,
    pub reason: String,
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "{}", self.reason)
        } else {
            write!(f, "{} (at '{}')", self.reason, self.path)
        }
    }
}

/// A definition value as written, before invariants are checked.
#[derive(Debug)]
pub(crate) enum RawNode {
    Leaf(String),
    Branch(Vec<(String, RawNode)>),
    /// A value of the wrong type; holds its description.
    Invalid(&'static str),
}

impl RawNode {
    pub(crate) fn into_node(self, path: &mut KeyPath) -> Result<ResourceNode, DefinitionError> {
        match self {
            RawNode::Leaf(value) => Ok(ResourceNode::Leaf(value)),
            RawNode::Branch(entries) => Self::entries_into_tree(entries, path).map(ResourceNode::Branch),
            RawNode::Invalid(found) => Err(DefinitionError {
                path: path.clone(),
                reason: format!("expected a string or an object, found {}", found),
            }),
        }
    }

    pub(crate) fn into_tree(self, path: &mut KeyPath) -> Result<ResourceTree, DefinitionError> {
        match self {
            RawNode::Branch(entries) => Self::entries_into_tree(entries, path),
            RawNode::Leaf(_) => Err(DefinitionError {
                path: path.clone(),
                reason: "expected an object, found a string".to_string(),
            }),
            RawNode::Invalid(found) => Err(DefinitionError {
                path: path.clone(),
                reason: format!("expected an object, found {}", found),
            }),
        }
    }

    fn entries_into_tree(
        entries: Vec<(String, RawNode)>,
        path: &mut KeyPath,
    ) -> Result<ResourceTree, DefinitionError> {
        let mut nodes = BTreeMap::new();

        for (key, raw) in entries {
            if key.is_empty() {
                return Err(DefinitionError {
                    path: path.clone(),
                    reason: "empty key".to_string(),
                });
            }
            path.push(key.as_str());
            if nodes.contains_key(&key) {
                return Err(DefinitionError {
                    path: path.clone(),
                    reason: "duplicate key".to_string(),
                });
            }
            let node = raw.into_node(path)?;
            path.pop();
            nodes.insert(key, node);
        }

        Ok(ResourceTree { nodes })
    }
}

impl<'de> Deserialize<'de> for RawNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawNodeVisitor)
    }
}

struct RawNodeVisitor;

impl<'de> Visitor<'de> for RawNodeVisitor {
    type Value = RawNode;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a label string or an object of labels")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<RawNode, E> {
        Ok(RawNode::Leaf(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<RawNode, E> {
        Ok(RawNode::Leaf(value))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<RawNode, E> {
        Ok(RawNode::Invalid("a boolean"))
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<RawNode, E> {
        Ok(RawNode::Invalid("a number"))
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<RawNode, E> {
        Ok(RawNode::Invalid("a number"))
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<RawNode, E> {
        Ok(RawNode::Invalid("a number"))
    }

    fn visit_unit<E: de::Error>(self) -> Result<RawNode, E> {
        Ok(RawNode::Invalid("null"))
    }

    fn visit_none<E: de::Error>(self) -> Result<RawNode, E> {
        Ok(RawNode::Invalid("null"))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawNode, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RawNode::Invalid("an array"))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawNode, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, RawNode>()? {
            entries.push((key, value));
        }
        Ok(RawNode::Branch(entries))
    }
}
