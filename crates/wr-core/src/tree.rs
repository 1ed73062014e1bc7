//! In-memory rendering surface.
//!
//! A `StableDiGraph` of elements (edge weights record child order) with a
//! deliberately small layout model, enough to drive the resizer the way a
//! browser would:
//!
//! - An element with a *natural box* is placed at that box's origin and takes
//!   its size unless inline `width`/`height` override it.
//! - An element without one is placed at its parent's origin offset by the
//!   inline `left`/`top` styles (absolutely positioned overlay parts).
//! - Setting only `width` on an element with a natural box scales its height
//!   proportionally, like a replaced element with `height: auto`.
//! - `max-width` clamps the width and scales the height with it.
//! - `display: none` and detached elements have no rendered box.

use crate::id::ClassName;
use crate::length::parse_length;
use crate::surface::{ElementId, StyleProp, Surface};
use kurbo::{Point, Rect, Size, Vec2};
use petgraph::Direction;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use smallvec::SmallVec;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct ElementData {
    id: ElementId,
    tag: String,
    classes: SmallVec<[ClassName; 4]>,
    styles: HashMap<StyleProp, String>,
    text: String,
    natural: Option<Rect>,
    max_width: Option<f64>,
}

impl ElementData {
    fn new(id: ElementId, tag: &str) -> Self {
        Self {
            id,
            tag: tag.to_string(),
            classes: SmallVec::new(),
            styles: HashMap::new(),
            text: String::new(),
            natural: None,
            max_width: None,
        }
    }

    /// Inline length style resolved to pixels against `reference`.
    fn length(&self, prop: StyleProp, reference: f64) -> Option<f64> {
        let raw = self.styles.get(&prop)?;
        match parse_length(raw) {
            Ok(length) => Some(length.resolve(reference)),
            Err(_) => None,
        }
    }

    fn is_hidden(&self) -> bool {
        self.styles
            .get(&StyleProp::Display)
            .is_some_and(|d| d == "none")
    }
}

pub struct MemorySurface {
    graph: StableDiGraph<ElementData, u64>,
    root: NodeIndex,
    root_id: ElementId,
    index: HashMap<ElementId, NodeIndex>,
    next_id: u32,
    next_order: u64,
}

impl MemorySurface {
    /// Create a surface whose root (`body`) spans `viewport`.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        let mut graph = StableDiGraph::new();
        let root_id = ElementId::from_raw(0);
        let mut body = ElementData::new(root_id, "body");
        body.natural = Some(Rect::from_origin_size(Point::ZERO, viewport));
        let root = graph.add_node(body);
        let mut index = HashMap::new();
        index.insert(root_id, root);

        Self {
            graph,
            root,
            root_id,
            index,
            next_id: 1,
            next_order: 0,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root_id
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.index.contains_key(&element)
    }

    /// Number of live elements, including the root.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Set the box the element renders at when no inline size overrides it.
    pub fn set_natural_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(idx) = self.index.get(&element).copied() {
            self.graph[idx].natural = Some(rect);
        }
    }

    /// Constrain the element's rendered width (a `max-width` layout rule).
    pub fn set_max_width(&mut self, element: ElementId, max_width: Option<f64>) {
        if let Some(idx) = self.index.get(&element).copied() {
            self.graph[idx].max_width = max_width;
        }
    }

    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.index
            .get(&element)
            .map(|idx| self.graph[*idx].tag.as_str())
    }

    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.index
            .get(&element)
            .map(|idx| self.graph[*idx].text.as_str())
    }

    pub fn classes(&self, element: ElementId) -> Vec<&str> {
        self.index
            .get(&element)
            .map(|idx| {
                self.graph[*idx]
                    .classes
                    .iter()
                    .map(|c| c.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Children of `element` in insertion order.
    pub fn children(&self, element: ElementId) -> Vec<ElementId> {
        let Some(idx) = self.index.get(&element).copied() else {
            return Vec::new();
        };
        self.child_indices(idx)
            .into_iter()
            .map(|child| self.id_of(child))
            .collect()
    }

    /// Unhook `element` from its parent without deleting it.
    pub fn detach(&mut self, element: ElementId) {
        if let Some(idx) = self.index.get(&element).copied() {
            self.unlink(idx);
        }
    }

    fn id_of(&self, idx: NodeIndex) -> ElementId {
        self.graph[idx].id
    }

    fn parent_index(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
    }

    fn child_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<(u64, NodeIndex)> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect();
        edges.sort();
        edges.into_iter().map(|(_, child)| child).collect()
    }

    fn unlink(&mut self, idx: NodeIndex) {
        if let Some(parent) = self.parent_index(idx)
            && let Some(edge) = self.graph.find_edge(parent, idx)
        {
            self.graph.remove_edge(edge);
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeIndex, of: NodeIndex) -> bool {
        let mut current = Some(of);
        while let Some(idx) = current {
            if idx == candidate {
                return true;
            }
            current = self.parent_index(idx);
        }
        false
    }

    fn layout(&self, idx: NodeIndex) -> Option<Rect> {
        let data = &self.graph[idx];
        if data.is_hidden() {
            return None;
        }
        let parent_rect = match self.parent_index(idx) {
            Some(parent) => Some(self.layout(parent)?),
            None if idx == self.root => None,
            None => return None,
        };
        let reference = parent_rect.map(|r| r.size()).unwrap_or(Size::ZERO);

        let origin = match data.natural {
            Some(natural) => natural.origin(),
            None => {
                let base = parent_rect.map(|r| r.origin()).unwrap_or(Point::ZERO);
                let left = data.length(StyleProp::Left, reference.width).unwrap_or(0.0);
                let top = data.length(StyleProp::Top, reference.height).unwrap_or(0.0);
                base + Vec2::new(left, top)
            }
        };

        let natural = data.natural.map(|r| r.size());
        let styled_width = data.length(StyleProp::Width, reference.width);
        let styled_height = data.length(StyleProp::Height, reference.height);

        let mut width = styled_width.or(natural.map(|n| n.width)).unwrap_or(0.0);
        let mut height = match (styled_height, natural) {
            (Some(h), _) => h,
            (None, Some(n)) if styled_width.is_some() && n.width > 0.0 => {
                n.height * width / n.width
            }
            (None, Some(n)) => n.height,
            (None, None) => 0.0,
        };

        if let Some(max) = data.max_width
            && width > max
        {
            if width > 0.0 {
                height *= max / width;
            }
            width = max;
        }

        Some(Rect::from_origin_size(
            origin,
            Size::new(width.max(0.0), height.max(0.0)),
        ))
    }
}

impl Surface for MemorySurface {
    fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId::from_raw(self.next_id);
        self.next_id += 1;
        let idx = self.graph.add_node(ElementData::new(id, tag));
        self.index.insert(id, idx);
        id
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        let (Some(parent_idx), Some(child_idx)) =
            (self.index.get(&parent).copied(), self.index.get(&child).copied())
        else {
            log::warn!("append_child on unknown element {parent:?} <- {child:?}");
            return;
        };
        if self.is_ancestor_or_self(child_idx, parent_idx) {
            log::warn!("append_child would create a cycle: {parent:?} <- {child:?}");
            return;
        }
        self.unlink(child_idx);
        let order = self.next_order;
        self.next_order += 1;
        self.graph.add_edge(parent_idx, child_idx, order);
    }

    fn remove_element(&mut self, element: ElementId) {
        if element == self.root_id {
            return;
        }
        let Some(idx) = self.index.get(&element).copied() else {
            return;
        };
        let mut stack = vec![idx];
        let mut doomed = Vec::new();
        while let Some(current) = stack.pop() {
            stack.extend(self.child_indices(current));
            doomed.push(current);
        }
        self.index.retain(|_, i| !doomed.contains(i));
        for idx in doomed {
            self.graph.remove_node(idx);
        }
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        let idx = self.index.get(&element).copied()?;
        self.parent_index(idx).map(|p| self.id_of(p))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(idx) = self.index.get(&element).copied() {
            let class = ClassName::intern(class);
            let classes = &mut self.graph[idx].classes;
            if !classes.contains(&class) {
                classes.push(class);
            }
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        let Some(class) = ClassName::get(class) else {
            return;
        };
        if let Some(idx) = self.index.get(&element).copied() {
            self.graph[idx].classes.retain(|c| *c != class);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        let Some(class) = ClassName::get(class) else {
            return false;
        };
        self.index
            .get(&element)
            .is_some_and(|idx| self.graph[*idx].classes.contains(&class))
    }

    fn set_style(&mut self, element: ElementId, prop: StyleProp, value: Option<&str>) {
        if let Some(idx) = self.index.get(&element).copied() {
            let styles = &mut self.graph[idx].styles;
            match value {
                Some(v) => {
                    styles.insert(prop, v.to_string());
                }
                None => {
                    styles.remove(&prop);
                }
            }
        }
    }

    fn style(&self, element: ElementId, prop: StyleProp) -> Option<String> {
        let idx = self.index.get(&element)?;
        self.graph[*idx].styles.get(&prop).cloned()
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(idx) = self.index.get(&element).copied() {
            self.graph[idx].text = text.to_string();
        }
    }

    fn bounding_rect(&self, element: ElementId) -> Option<Rect> {
        let idx = self.index.get(&element).copied()?;
        self.layout(idx)
    }

    fn is_connected(&self, element: ElementId) -> bool {
        let Some(idx) = self.index.get(&element).copied() else {
            return false;
        };
        self.is_ancestor_or_self(self.root, idx)
    }
}
