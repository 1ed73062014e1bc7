//! Document attribute store and widget-to-node mapping.
//!
//! The resizer writes exactly one attribute per committed drag. `Document` is
//! the in-memory store: every write happens inside a `change` transaction that
//! is rolled back as a whole if any step fails, and committed transactions
//! land on an undo stack so a resize is a single undo step.

use crate::error::DocumentError;
use crate::id::NodeId;
use crate::surface::ElementId;
use std::collections::{BTreeMap, HashMap};

/// Transactional "set named attribute on node".
pub trait AttributeStore {
    fn set_attribute(&mut self, node: NodeId, key: &str, value: &str) -> Result<(), DocumentError>;
}

/// Resolves the logical node behind a rendered widget wrapper.
pub trait WidgetMapping {
    /// `None` when the widget's node is gone (e.g. deleted mid-drag).
    fn node_for_wrapper(&self, wrapper: ElementId) -> Option<NodeId>;
}

/// Everything a resize commit needs from the document.
pub trait DocumentStore: AttributeStore + WidgetMapping {}

impl<T: AttributeStore + WidgetMapping> DocumentStore for T {}

/// One attribute change with enough information to reverse it.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeChange {
    pub node: NodeId,
    pub key: String,
    pub before: Option<String>,
    pub after: String,
}

/// A committed group of changes, undone and redone as a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub description: String,
    pub changes: Vec<AttributeChange>,
}

type Attributes = BTreeMap<String, String>;

/// Write access handed to a `Document::change` block.
pub struct Writer<'a> {
    nodes: &'a mut HashMap<NodeId, Attributes>,
    changes: Vec<AttributeChange>,
}

impl Writer<'_> {
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        key: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        if key.is_empty() {
            return Err(DocumentError::EmptyAttributeName);
        }
        let attributes = self
            .nodes
            .get_mut(&node)
            .ok_or(DocumentError::UnknownNode(node))?;
        let before = attributes.insert(key.to_string(), value.to_string());
        self.changes.push(AttributeChange {
            node,
            key: key.to_string(),
            before,
            after: value.to_string(),
        });
        Ok(())
    }
}

pub struct Document {
    nodes: HashMap<NodeId, Attributes>,
    wrappers: HashMap<ElementId, NodeId>,
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    /// Maximum undo depth.
    max_depth: usize,
    /// Number of committed transactions, including undo/redo replays.
    revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Document {
    pub fn new(max_depth: usize) -> Self {
        Self {
            nodes: HashMap::new(),
            wrappers: HashMap::new(),
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
            revision: 0,
        }
    }

    pub fn insert_node(&mut self, node: NodeId) {
        self.nodes.entry(node).or_default();
    }

    /// Remove a node and every wrapper mapped to it.
    pub fn remove_node(&mut self, node: NodeId) {
        self.nodes.remove(&node);
        self.wrappers.retain(|_, n| *n != node);
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Record that `wrapper` is the rendered form of `node`.
    pub fn bind_wrapper(&mut self, wrapper: ElementId, node: NodeId) {
        self.wrappers.insert(wrapper, node);
    }

    pub fn attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        self.nodes.get(&node)?.get(key).map(String::as_str)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Committed transactions available to undo, oldest first.
    pub fn history(&self) -> &[Transaction] {
        &self.undo_stack
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Run `block` as one transaction. On error every change it made is
    /// reverted and nothing is recorded.
    pub fn change<R>(
        &mut self,
        description: &str,
        block: impl FnOnce(&mut Writer<'_>) -> Result<R, DocumentError>,
    ) -> Result<R, DocumentError> {
        let mut writer = Writer {
            nodes: &mut self.nodes,
            changes: Vec::new(),
        };
        let result = block(&mut writer);
        let changes = std::mem::take(&mut writer.changes);

        match result {
            Ok(value) => {
                if !changes.is_empty() {
                    self.push_undo(Transaction {
                        description: description.to_string(),
                        changes,
                    });
                    self.redo_stack.clear();
                    self.revision += 1;
                }
                Ok(value)
            }
            Err(err) => {
                log::debug!("rolling back `{description}`: {err}");
                revert(&mut self.nodes, &changes);
                Err(err)
            }
        }
    }

    /// Undo the last transaction. Returns its description.
    pub fn undo(&mut self) -> Option<String> {
        let tx = self.undo_stack.pop()?;
        revert(&mut self.nodes, &tx.changes);
        let desc = tx.description.clone();
        self.redo_stack.push(tx);
        self.revision += 1;
        Some(desc)
    }

    /// Redo the last undone transaction. Returns its description.
    pub fn redo(&mut self) -> Option<String> {
        let tx = self.redo_stack.pop()?;
        for change in &tx.changes {
            apply(&mut self.nodes, change.node, &change.key, Some(change.after.as_str()));
        }
        let desc = tx.description.clone();
        self.push_undo(tx);
        self.revision += 1;
        Some(desc)
    }

    fn push_undo(&mut self, tx: Transaction) {
        self.undo_stack.push(tx);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
    }
}

fn apply(nodes: &mut HashMap<NodeId, Attributes>, node: NodeId, key: &str, value: Option<&str>) {
    if let Some(attributes) = nodes.get_mut(&node) {
        match value {
            Some(v) => {
                attributes.insert(key.to_string(), v.to_string());
            }
            None => {
                attributes.remove(key);
            }
        }
    }
}

fn revert(nodes: &mut HashMap<NodeId, Attributes>, changes: &[AttributeChange]) {
    for change in changes.iter().rev() {
        apply(nodes, change.node, &change.key, change.before.as_deref());
    }
}

impl AttributeStore for Document {
    fn set_attribute(&mut self, node: NodeId, key: &str, value: &str) -> Result<(), DocumentError> {
        self.change(&format!("set {key}"), |writer| {
            writer.set_attribute(node, key, value)
        })
    }
}

impl WidgetMapping for Document {
    fn node_for_wrapper(&self, wrapper: ElementId) -> Option<NodeId> {
        self.wrappers
            .get(&wrapper)
            .copied()
            .filter(|node| self.nodes.contains_key(node))
    }
}
