//! Navigation and search over element children and descendants.
//!
//! None of these operations fail: a lookup that finds nothing returns `None`
//! or an empty `Vec`.

use crate::{Element, Node};
use std::ops::ControlFlow;

impl Element {
    /// Call `f` for each element child in document order, with the child's
    /// index in `children` and the full `children` slice.
    ///
    /// Non-element children are skipped. Returning [`ControlFlow::Break`]
    /// stops the iteration.
    pub fn each_child<F>(&self, mut f: F)
    where
        F: FnMut(&Element, usize, &[Node]) -> ControlFlow<()>,
    {
        for (index, child) in self.children.iter().enumerate() {
            if let Node::Element(element) = child {
                if f(element, index, &self.children).is_break() {
                    return;
                }
            }
        }
    }

    /// The first element child called `name`.
    pub fn child_named(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// All element children called `name`, in document order.
    pub fn children_named(&self, name: &str) -> Vec<&Element> {
        self.elements().filter(|e| e.name == name).collect()
    }

    /// The first element child that has attribute `name`.
    ///
    /// With `value` given the attribute must also equal it; otherwise any
    /// value matches, including an empty one.
    pub fn child_with_attribute(&self, name: &str, value: Option<&str>) -> Option<&Element> {
        self.elements().find(|e| match (e.attribute(name), value) {
            (Some(actual), Some(expected)) => actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        })
    }

    /// Every element in the subtree below this one called `name`, in
    /// pre-order: a matching element comes before any matches nested in it.
    pub fn descendants_named(&self, name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants_named(name, &mut found);
        found
    }

    fn collect_descendants_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Element>) {
        for child in self.elements() {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants_named(name, found);
        }
    }

    /// Follow a dot-separated path of child names, e.g. `"author.name"`.
    ///
    /// Each segment selects the first element child with that name, so this
    /// never searches deeper than the path says.
    pub fn descendant_with_path(&self, path: &str) -> Option<&Element> {
        path.split('.')
            .try_fold(self, |element, segment| element.child_named(segment))
    }

    /// Resolve `path` and return the element's `value`, or with an `@attr`
    /// suffix (`"author.name@isProper"`) the value of that attribute.
    pub fn value_with_path(&self, path: &str) -> Option<&str> {
        let mut parts = path.splitn(2, '@');
        let element_path = parts.next().unwrap_or_default();
        let element = self.descendant_with_path(element_path)?;

        match parts.next() {
            Some(attribute) => element.attribute(attribute),
            None => Some(element.value.as_str()),
        }
    }
}
