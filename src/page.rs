//! Host page model
//!
//! The controller never owns page elements. It talks to whatever page hosts
//! it through [`HostPage`], using [`ElementId`] handles resolved by
//! selector. [`Document`] is the in-memory page used by the terminal and
//! window hosts, the CLI and the tests.

use crate::error::{Result, SearchFieldError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handle to an element of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Whether an element is rendered (`display: block`) or not (`display: none`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Shown,
    Hidden,
}

impl Visibility {
    pub fn from_bool(visible: bool) -> Self {
        if visible {
            Visibility::Shown
        } else {
            Visibility::Hidden
        }
    }

    pub fn is_shown(self) -> bool {
        self == Visibility::Shown
    }

    /// CSS `display` value for this visibility
    pub fn css_display(self) -> &'static str {
        match self {
            Visibility::Shown => "block",
            Visibility::Hidden => "none",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Shown => write!(f, "shown"),
            Visibility::Hidden => write!(f, "hidden"),
        }
    }
}

/// A simple selector: `.class`, `#id` or a bare tag name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Selector {
    Class(String),
    Id(String),
    Tag(String),
}

fn is_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl FromStr for Selector {
    type Err = SearchFieldError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let selector = if let Some(name) = s.strip_prefix('.') {
            Selector::Class(name.to_string())
        } else if let Some(name) = s.strip_prefix('#') {
            Selector::Id(name.to_string())
        } else {
            Selector::Tag(s.to_ascii_lowercase())
        };

        let name = match &selector {
            Selector::Class(n) | Selector::Id(n) | Selector::Tag(n) => n,
        };
        if is_name(name) {
            Ok(selector)
        } else {
            Err(SearchFieldError::InvalidSelector(s.to_string()))
        }
    }
}

impl TryFrom<String> for Selector {
    type Error = SearchFieldError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.to_string()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Class(name) => write!(f, ".{}", name),
            Selector::Id(name) => write!(f, "#{}", name),
            Selector::Tag(name) => write!(f, "{}", name),
        }
    }
}

impl Selector {
    pub fn matches(&self, element: &Element) -> bool {
        match self {
            Selector::Class(name) => element.classes.iter().any(|c| c == name),
            Selector::Id(name) => element.id.as_deref() == Some(name.as_str()),
            Selector::Tag(name) => element.tag == *name,
        }
    }

    /// Make `element` match this selector (adds the class, sets the id or
    /// replaces the tag)
    pub fn stamp(&self, element: Element) -> Element {
        match self {
            Selector::Class(name) => element.with_class(name),
            Selector::Id(name) => element.with_id(name),
            Selector::Tag(name) => Element {
                tag: name.clone(),
                ..element
            },
        }
    }
}

/// Page event kinds the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The page finished loading
    Loaded,
    /// The content of an input changed
    Input,
    /// Primary activation (click, Enter, tap)
    Click,
}

/// An event delivered to a target element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: ElementId,
}

impl Event {
    pub fn loaded(root: ElementId) -> Self {
        Self {
            kind: EventKind::Loaded,
            target: root,
        }
    }

    pub fn input(target: ElementId) -> Self {
        Self {
            kind: EventKind::Input,
            target,
        }
    }

    pub fn click(target: ElementId) -> Self {
        Self {
            kind: EventKind::Click,
            target,
        }
    }
}

/// Everything the controller needs from the page hosting it
pub trait HostPage {
    /// First attached element matching `selector`, in document order
    fn query_selector(&self, selector: &Selector) -> Option<ElementId>;

    /// All attached elements matching `selector`, in document order
    fn query_selector_all(&self, selector: &Selector) -> Vec<ElementId>;

    /// Whether `id` still refers to an element attached to the page
    fn contains(&self, id: ElementId) -> bool;

    fn matches(&self, id: ElementId, selector: &Selector) -> bool;

    fn parent(&self, id: ElementId) -> Option<ElementId>;

    fn value(&self, id: ElementId) -> Result<&str>;

    fn set_value(&mut self, id: ElementId, value: &str) -> Result<()>;

    fn visibility(&self, id: ElementId) -> Result<Visibility>;

    fn set_visibility(&mut self, id: ElementId, visibility: Visibility) -> Result<()>;

    fn focus(&mut self, id: ElementId) -> Result<()>;

    fn focused(&self) -> Option<ElementId>;

    fn href(&self, id: ElementId) -> Result<Option<&str>>;
}

/// A single page element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub value: String,
    pub href: Option<String>,
    pub text: String,
    pub visibility: Visibility,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            value: String::new(),
            href: None,
            text: String::new(),
            visibility: Visibility::Shown,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
        }
        self
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// In-memory element tree
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Element>>,
    root: ElementId,
    focused: Option<ElementId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document with a `body` root
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Element::new("body"))],
            root: ElementId(0),
            focused: None,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Add a detached element to the document
    pub fn create_element(&mut self, mut element: Element) -> ElementId {
        element.parent = None;
        element.children.clear();
        self.nodes.push(Some(element));
        ElementId(self.nodes.len() - 1)
    }

    /// Attach `child` as the last child of `parent`, detaching it from any
    /// previous parent first
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        if parent == child || self.is_ancestor(child, parent) {
            return Err(SearchFieldError::StaleElement(child));
        }
        self.get(parent)?;
        let old_parent = self.get(child)?.parent;
        if let Some(old) = old_parent {
            self.get_mut(old)?.children.retain(|&c| c != child);
        }
        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Create `element` and append it under `parent`
    pub fn insert(&mut self, parent: ElementId, element: Element) -> Result<ElementId> {
        let id = self.create_element(element);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Remove `id` and its whole subtree
    pub fn remove(&mut self, id: ElementId) -> Result<()> {
        if id == self.root {
            return Err(SearchFieldError::StaleElement(id));
        }
        let parent = self.get(id)?.parent;
        if let Some(parent) = parent {
            self.get_mut(parent)?.children.retain(|&c| c != id);
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(element) = self.nodes.get_mut(current.0).and_then(Option::take) {
                stack.extend(element.children);
            }
            if self.focused == Some(current) {
                self.focused = None;
            }
        }
        Ok(())
    }

    pub fn element(&self, id: ElementId) -> Result<&Element> {
        self.get(id)
    }

    pub fn children(&self, id: ElementId) -> Result<&[ElementId]> {
        Ok(&self.get(id)?.children)
    }

    pub fn text(&self, id: ElementId) -> Result<&str> {
        Ok(&self.get(id)?.text)
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) -> Result<()> {
        self.get_mut(id)?.text = text.to_string();
        Ok(())
    }

    fn get(&self, id: ElementId) -> Result<&Element> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(SearchFieldError::StaleElement(id))
    }

    fn get_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(SearchFieldError::StaleElement(id))
    }

    fn is_ancestor(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = self.parent(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.parent(cur);
        }
        false
    }

    fn is_attached(&self, id: ElementId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.get(current).ok().and_then(|el| el.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Attached elements in document order (pre-order from the root)
    fn walk(&self) -> Vec<ElementId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if let Ok(el) = self.get(id) {
                order.push(id);
                stack.extend(el.children.iter().rev().copied());
            }
        }
        order
    }
}

impl HostPage for Document {
    fn query_selector(&self, selector: &Selector) -> Option<ElementId> {
        self.walk()
            .into_iter()
            .find(|&id| self.matches(id, selector))
    }

    fn query_selector_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.walk()
            .into_iter()
            .filter(|&id| self.matches(id, selector))
            .collect()
    }

    fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_ok() && self.is_attached(id)
    }

    fn matches(&self, id: ElementId, selector: &Selector) -> bool {
        self.get(id).map(|el| selector.matches(el)).unwrap_or(false)
    }

    fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).ok().and_then(|el| el.parent)
    }

    fn value(&self, id: ElementId) -> Result<&str> {
        Ok(&self.get(id)?.value)
    }

    fn set_value(&mut self, id: ElementId, value: &str) -> Result<()> {
        self.get_mut(id)?.value = value.to_string();
        Ok(())
    }

    fn visibility(&self, id: ElementId) -> Result<Visibility> {
        Ok(self.get(id)?.visibility)
    }

    fn set_visibility(&mut self, id: ElementId, visibility: Visibility) -> Result<()> {
        self.get_mut(id)?.visibility = visibility;
        Ok(())
    }

    fn focus(&mut self, id: ElementId) -> Result<()> {
        self.get(id)?;
        self.focused = Some(id);
        Ok(())
    }

    fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    fn href(&self, id: ElementId) -> Result<Option<&str>> {
        Ok(self.get(id)?.href.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel(s: &str) -> Selector {
        s.parse().unwrap()
    }

    #[test]
    fn parses_selector_forms() {
        assert_eq!(sel(".search-field"), Selector::Class("search-field".into()));
        assert_eq!(sel("#loading"), Selector::Id("loading".into()));
        assert_eq!(sel("INPUT"), Selector::Tag("input".into()));
        assert_eq!(sel(" .clear-button ").to_string(), ".clear-button");
    }

    #[test]
    fn rejects_compound_selectors() {
        for bad in ["", ".", "#", "div .x", "a > b", ".a.b", "[href]"] {
            assert!(
                matches!(bad.parse::<Selector>(), Err(SearchFieldError::InvalidSelector(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn queries_follow_document_order() {
        let mut doc = Document::new();
        let root = doc.root();
        let list = doc.insert(root, Element::new("div")).unwrap();
        let a = doc.insert(list, Element::new("a").with_class("link")).unwrap();
        let b = doc.insert(root, Element::new("a").with_class("link")).unwrap();
        let c = doc.insert(list, Element::new("a").with_class("link")).unwrap();

        assert_eq!(doc.query_selector(&sel(".link")), Some(a));
        assert_eq!(doc.query_selector_all(&sel(".link")), vec![a, c, b]);
        assert_eq!(doc.query_selector_all(&sel("a")).len(), 3);
        assert_eq!(doc.query_selector(&sel("#nope")), None);
    }

    #[test]
    fn detached_elements_are_not_queried() {
        let mut doc = Document::new();
        let loose = doc.create_element(Element::new("button").with_class("clear-button"));
        assert_eq!(doc.query_selector(&sel(".clear-button")), None);
        assert!(!doc.contains(loose));

        doc.append_child(doc.root(), loose).unwrap();
        assert_eq!(doc.query_selector(&sel(".clear-button")), Some(loose));
        assert!(doc.contains(loose));
    }

    #[test]
    fn remove_drops_subtree_and_focus() {
        let mut doc = Document::new();
        let form = doc.insert(doc.root(), Element::new("form")).unwrap();
        let input = doc.insert(form, Element::new("input")).unwrap();
        doc.focus(input).unwrap();

        doc.remove(form).unwrap();
        assert!(!doc.contains(input));
        assert_eq!(doc.focused(), None);
        assert!(matches!(
            doc.value(input),
            Err(SearchFieldError::StaleElement(id)) if id == input
        ));
    }

    #[test]
    fn append_child_rejects_cycles() {
        let mut doc = Document::new();
        let outer = doc.insert(doc.root(), Element::new("div")).unwrap();
        let inner = doc.insert(outer, Element::new("div")).unwrap();
        assert!(doc.append_child(inner, outer).is_err());
        assert!(doc.append_child(outer, outer).is_err());
    }

    #[test]
    fn stamp_makes_element_match() {
        for s in [".result-link", "#first", "li"] {
            let selector = sel(s);
            let element = selector.stamp(Element::new("a"));
            assert!(selector.matches(&element), "{}", s);
        }
    }

    #[test]
    fn visibility_css_display() {
        assert_eq!(Visibility::from_bool(true).css_display(), "block");
        assert_eq!(Visibility::from_bool(false).css_display(), "none");
    }
}
