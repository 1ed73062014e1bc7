use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for document node ids and class markers.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Interned identifier of a logical document node (the model side of a widget).
/// Internally a 4-byte `Spur` index.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Spur);

impl NodeId {
    /// Intern a new string as a NodeId, or return existing if already interned.
    pub fn intern(s: &str) -> Self {
        NodeId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(NodeId::intern(&s))
    }
}

/// Interned class marker on a rendered element (`widget-resizer__handle`, ...).
///
/// Shares the node-id interner: markers are a small, fixed vocabulary that is
/// compared on every ancestor step of a handle lookup.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassName(Spur);

impl ClassName {
    pub fn intern(s: &str) -> Self {
        ClassName(INTERNER.get_or_intern(s))
    }

    /// Look up an already-interned marker without growing the interner.
    pub fn get(s: &str) -> Option<Self> {
        INTERNER.get(s).map(ClassName)
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = NodeId::intern("figure_1");
        let b = NodeId::intern("figure_1");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "figure_1");
        assert_eq!(a.to_string(), "#figure_1");
    }

    #[test]
    fn class_lookup_does_not_intern() {
        assert!(ClassName::get("never-interned-marker-xyz").is_none());
        let c = ClassName::intern("widget-resizer");
        assert_eq!(ClassName::get("widget-resizer"), Some(c));
    }
}
