//! Block reference names to node ids.

use std::collections::HashMap;

use fm_core::NodeId;

use crate::connections::TargetKey;
use crate::schema::ReferenceDef;

/// Append-only map from block reference to a densely assigned [`NodeId`].
///
/// Ids are handed out in first-seen order starting at index 0 and are never
/// reused within one translation.
#[derive(Debug, Clone, Default)]
pub struct ReferenceRegistry {
    ids: HashMap<String, NodeId>,
    names: Vec<String>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `reference`, assigning the next one on first sight.
    pub fn resolve(&mut self, reference: &str) -> NodeId {
        if let Some(&id) = self.ids.get(reference) {
            return id;
        }
        let id = NodeId::from_index(self.names.len() as u32);
        self.ids.insert(reference.to_string(), id);
        self.names.push(reference.to_string());
        id
    }

    /// Resolve a reference object, counting the copy wrappers it went through.
    pub fn resolve_target(&mut self, reference: &ReferenceDef) -> TargetKey {
        match reference {
            ReferenceDef::Direct { reference } => TargetKey::direct(self.resolve(reference)),
            ReferenceDef::Copy { copy } => self.resolve_target(copy).copied(),
        }
    }

    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.names.get(id.index() as usize).map(String::as_str)
    }

    /// Name for diagnostics; falls back to the numeric id.
    pub fn display(&self, id: NodeId) -> String {
        match self.name_of(id) {
            Some(name) => name.to_string(),
            None => format!("#{id}"),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// `(id, reference)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (NodeId::from_index(i as u32), name.as_str()))
    }
}
