//! Calendar component tree (RFC 5545 §3.4-3.6).
//!
//! A component is one `BEGIN`/`END` block. Concrete kinds hold their own
//! fields and assemble a fresh [`PropertyBag`] per render pass; the tree
//! itself stays a plain owned structure with optional keyed lookup of
//! children.

mod calendar;
mod event;
mod freebusy;
mod timezone;

pub use calendar::Calendar;
pub use event::Event;
pub use freebusy::{FreeBusy, FreeBusyType};
pub use timezone::Timezone;

use std::collections::HashMap;

use crate::core::PropertyBag;
use crate::error::IcalResult;

/// One calendar object in the component tree.
///
/// `assemble` is a pure function of the component's field state and runs
/// once per render pass; it never mutates children. Nothing here is
/// internally synchronized: concurrent renders need independent trees.
pub trait Component {
    /// Returns the fixed identifier used for the `BEGIN`/`END` markers.
    fn component_type(&self) -> &'static str;

    /// Builds the property bag from the component's current field state.
    ///
    /// # Errors
    ///
    /// Concrete kinds may surface invariant violations; assembly itself
    /// performs no encoding.
    fn assemble(&self) -> IcalResult<PropertyBag>;

    /// Returns the child components in render order.
    fn children(&self) -> Vec<&dyn Component> {
        Vec::new()
    }

    /// Renders this component and its children to iCalendar text.
    ///
    /// # Errors
    ///
    /// Returns the first encoding error; no partial output is produced.
    fn render(&self) -> IcalResult<String>
    where
        Self: Sized,
    {
        crate::build::render(self)
    }
}

/// A child component of known kind.
///
/// The closed enum keeps the tree owned and lets callers that hold a key
/// get back at the concrete kind (interval forwarding needs the free/busy
/// section, not an opaque component).
#[derive(Debug, Clone)]
pub enum ComponentNode {
    /// A `VEVENT` block.
    Event(Event),
    /// A `VFREEBUSY` block.
    FreeBusy(FreeBusy),
    /// A `VTIMEZONE` block.
    Timezone(Timezone),
}

impl ComponentNode {
    /// Returns the free/busy section if this node is one.
    #[must_use]
    pub fn as_free_busy(&self) -> Option<&FreeBusy> {
        if let Self::FreeBusy(section) = self {
            Some(section)
        } else {
            None
        }
    }

    /// Mutable counterpart of [`as_free_busy`](Self::as_free_busy).
    pub fn as_free_busy_mut(&mut self) -> Option<&mut FreeBusy> {
        if let Self::FreeBusy(section) = self {
            Some(section)
        } else {
            None
        }
    }

    fn as_component(&self) -> &dyn Component {
        match self {
            Self::Event(component) => component,
            Self::FreeBusy(component) => component,
            Self::Timezone(component) => component,
        }
    }
}

impl Component for ComponentNode {
    fn component_type(&self) -> &'static str {
        self.as_component().component_type()
    }

    fn assemble(&self) -> IcalResult<PropertyBag> {
        self.as_component().assemble()
    }

    fn children(&self) -> Vec<&dyn Component> {
        self.as_component().children()
    }
}

impl From<Event> for ComponentNode {
    fn from(component: Event) -> Self {
        Self::Event(component)
    }
}

impl From<FreeBusy> for ComponentNode {
    fn from(component: FreeBusy) -> Self {
        Self::FreeBusy(component)
    }
}

impl From<Timezone> for ComponentNode {
    fn from(component: Timezone) -> Self {
        Self::Timezone(component)
    }
}

/// Ordered child components with optional keyed lookup.
///
/// Children render in insertion order. A key points at one node; re-using
/// a key moves the lookup entry to the newest node (the sequence keeps
/// both, so previously added children still render).
#[derive(Debug, Clone, Default)]
pub struct Children {
    nodes: Vec<ComponentNode>,
    keys: HashMap<String, usize>,
}

impl Children {
    /// Appends an un-keyed child.
    pub fn push(&mut self, node: impl Into<ComponentNode>) {
        self.nodes.push(node.into());
    }

    /// Appends a child retrievable by `key`.
    pub fn push_keyed(&mut self, key: impl Into<String>, node: impl Into<ComponentNode>) {
        let key = key.into();
        self.nodes.push(node.into());
        let position = self.nodes.len() - 1;
        if self.keys.insert(key.clone(), position).is_some() {
            tracing::debug!(key = %key, "child key reassigned to newest component");
        }
    }

    /// Returns the child a key points at.
    #[must_use]
    pub fn by_key(&self, key: &str) -> Option<&ComponentNode> {
        self.keys.get(key).map(|&position| &self.nodes[position])
    }

    /// Mutable counterpart of [`by_key`](Self::by_key).
    pub fn by_key_mut(&mut self, key: &str) -> Option<&mut ComponentNode> {
        let position = *self.keys.get(key)?;
        self.nodes.get_mut(position)
    }

    /// Returns the children in render order.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, ComponentNode> {
        self.nodes.iter()
    }

    /// Returns the number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<'a> IntoIterator for &'a Children {
    type Item = &'a ComponentNode;
    type IntoIter = std::slice::Iter<'a, ComponentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
