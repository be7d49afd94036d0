//! A loaded search page with its controller wired in
//!
//! The hosts (terminal, window, headless CLI) all drive the page through a
//! [`Session`]: they edit the field, click elements, and read back a
//! [`PageState`] to render.

use crate::config::{AppConfig, Selectors};
use crate::controller::{Handled, SearchFieldController, ViewMode};
use crate::error::{Result, SearchFieldError};
use crate::logging;
use crate::page::{Document, ElementId, Event, HostPage, Selector, Visibility};
use crate::results::{MediaType, SearchResult};
use serde::Serialize;
use std::str::FromStr;

const LOG: &str = "SESSION";

/// One scripted user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Replace the field content, then fire an input event
    Type(String),
    /// Append to the field content, then fire an input event
    Append(String),
    /// Click the clear affordance
    Clear,
    /// Click the n-th result link currently on the page
    Activate(usize),
    /// Insert a new result link with this title
    Add(String),
}

impl FromStr for Step {
    type Err = SearchFieldError;

    fn from_str(s: &str) -> Result<Self> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        match (name, arg) {
            ("type", Some(text)) => Ok(Step::Type(text.to_string())),
            ("append", Some(text)) => Ok(Step::Append(text.to_string())),
            ("clear", None) => Ok(Step::Clear),
            ("activate", Some(n)) => n
                .parse()
                .map(Step::Activate)
                .map_err(|_| SearchFieldError::InvalidStep(s.to_string())),
            ("add", Some(title)) if !title.is_empty() => Ok(Step::Add(title.to_string())),
            _ => Err(SearchFieldError::InvalidStep(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkState {
    pub label: String,
    pub href: Option<String>,
}

/// Snapshot of everything a host renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub query: String,
    pub clear_button: Visibility,
    pub results: Visibility,
    pub loading: Visibility,
    pub view_mode: ViewMode,
    pub field_focused: bool,
    pub links: Vec<LinkState>,
    pub navigation: Option<String>,
}

pub struct Session {
    doc: Document,
    controller: SearchFieldController,
    selectors: Selectors,
    navigated: bool,
    navigation: Option<String>,
}

impl Session {
    /// Build the search page for `query` and `results`, attach the
    /// controller and deliver the page-loaded event
    pub fn open(config: &AppConfig, query: &str, results: &[SearchResult]) -> Result<Self> {
        let doc = Document::search_page(query, results, &config.selectors);
        Self::with_document(doc, config)
    }

    /// Attach to an existing page
    pub fn with_document(doc: Document, config: &AppConfig) -> Result<Self> {
        let controller =
            SearchFieldController::attach(&doc, &config.selectors, config.controller_options())?;
        let mut session = Self {
            doc,
            controller,
            selectors: config.selectors.clone(),
            navigated: false,
            navigation: None,
        };
        let root = session.doc.root();
        session.dispatch(Event::loaded(root))?;
        Ok(session)
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn controller(&self) -> &SearchFieldController {
        &self.controller
    }

    /// Navigation target of the first activated result. A link without an
    /// href navigates nowhere.
    pub fn navigation(&self) -> Option<&str> {
        self.navigation.as_deref()
    }

    pub fn query(&self) -> Result<&str> {
        self.doc.value(self.controller.field())
    }

    pub fn field_focused(&self) -> bool {
        self.doc.focused() == Some(self.controller.field())
    }

    pub fn focus_field(&mut self) -> Result<()> {
        let field = self.controller.field();
        self.doc.focus(field)
    }

    pub fn focus(&mut self, id: ElementId) -> Result<()> {
        self.doc.focus(id)
    }

    /// Result links currently on the page, in document order
    pub fn links(&self) -> Vec<ElementId> {
        self.doc.query_selector_all(&self.selectors.result_link)
    }

    pub fn dispatch(&mut self, event: Event) -> Result<Handled> {
        let outcome = self.controller.handle(&mut self.doc, &event);
        match &outcome {
            Ok(Handled::Navigate { href, .. }) => {
                if !self.navigated {
                    self.navigated = true;
                    self.navigation = href.clone();
                }
            }
            Ok(_) => {}
            Err(e) => logging::error(LOG, &format!("{:?} failed: {}", event.kind, e)),
        }
        outcome
    }

    /// Replace the field content as the user would, then fire input
    pub fn set_query(&mut self, text: &str) -> Result<Handled> {
        let field = self.controller.field();
        self.doc.set_value(field, text)?;
        self.dispatch(Event::input(field))
    }

    pub fn click_clear(&mut self) -> Result<Handled> {
        let clear = self.controller.clear_button();
        self.dispatch(Event::click(clear))
    }

    pub fn click(&mut self, target: ElementId) -> Result<Handled> {
        self.dispatch(Event::click(target))
    }

    /// Click the `index`-th result link currently on the page
    pub fn activate(&mut self, index: usize) -> Result<Handled> {
        let links = self.links();
        match links.get(index) {
            Some(&link) => self.click(link),
            None => {
                logging::warn(
                    LOG,
                    &format!("no result link {} ({} on the page)", index, links.len()),
                );
                Err(SearchFieldError::InvalidStep(format!("activate:{}", index)))
            }
        }
    }

    /// Add a result link after the controller was attached
    pub fn add_result(&mut self, result: &SearchResult) -> Result<ElementId> {
        let container = self
            .doc
            .query_selector(&self.selectors.results)
            .ok_or_else(|| SearchFieldError::missing("results container", self.selectors.results.to_string()))?;
        self.doc.append_result_link(container, result, &self.selectors)
    }

    pub fn apply(&mut self, step: &Step) -> Result<Handled> {
        logging::debug(LOG, &format!("step {:?}", step));
        match step {
            Step::Type(text) => self.set_query(text),
            Step::Append(text) => {
                let text = format!("{}{}", self.query()?, text);
                self.set_query(&text)
            }
            Step::Clear => self.click_clear(),
            Step::Activate(index) => self.activate(*index),
            Step::Add(title) => {
                let id = self.links().len() as u64 + 1;
                let result = SearchResult::new(id, title, None, MediaType::Movie);
                self.add_result(&result)?;
                Ok(Handled::Ignored)
            }
        }
    }

    /// Visibility of the element matching `selector`, hidden if absent
    fn visibility_of(&self, selector: &Selector) -> Visibility {
        self.doc
            .query_selector(selector)
            .and_then(|id| self.doc.visibility(id).ok())
            .unwrap_or(Visibility::Hidden)
    }

    pub fn state(&self) -> Result<PageState> {
        let links = self
            .links()
            .into_iter()
            .map(|id| {
                Ok(LinkState {
                    label: self.doc.text(id)?.to_string(),
                    href: self.doc.href(id)?.map(str::to_string),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(PageState {
            query: self.query()?.to_string(),
            clear_button: self.controller.clear_visibility(&self.doc)?,
            results: self.visibility_of(&self.selectors.results),
            loading: self.visibility_of(&self.selectors.loading),
            view_mode: self.controller.view_mode(),
            field_focused: self.field_focused(),
            links,
            navigation: self.navigation.clone(),
        })
    }
}
