//! Search field controller
//!
//! Keeps the clear affordance visible exactly when the search field has
//! content, empties the field when the affordance is activated, and swaps
//! the results container for the loading indicator when a result link is
//! activated.
//!
//! The controller holds element handles resolved once by [`attach`]; it
//! never caches page state. Every handler re-reads what it needs from the
//! page it is given.
//!
//! [`attach`]: SearchFieldController::attach

use crate::config::Selectors;
use crate::error::{Result, SearchFieldError};
use crate::logging;
use crate::page::{ElementId, Event, EventKind, HostPage, Selector, Visibility};
use serde::{Deserialize, Serialize};

const LOG: &str = "CONTROLLER";

/// Page roles the controller touches directly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Field,
    Clear,
    Results,
    Loading,
}

impl Role {
    fn name(self) -> &'static str {
        match self {
            Role::Field => "search field",
            Role::Clear => "clear button",
            Role::Results => "results container",
            Role::Loading => "loading indicator",
        }
    }

    fn selector(self, selectors: &Selectors) -> &Selector {
        match self {
            Role::Field => &selectors.search_field,
            Role::Clear => &selectors.clear_button,
            Role::Results => &selectors.results,
            Role::Loading => &selectors.loading,
        }
    }

    fn missing(self, selectors: &Selectors) -> SearchFieldError {
        SearchFieldError::missing(self.name(), self.selector(selectors).to_string())
    }
}

/// Which of the two mutually exclusive views is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Results,
    Loading,
}

/// Focus handling after the field is cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClearFocus {
    /// Put focus back on the search field
    #[default]
    Restore,
    /// Leave focus where it is
    Leave,
}

/// How result-link activations are recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultWiring {
    /// Only links present at attach time
    #[default]
    Snapshot,
    /// Any element matching the result-link selector at activation time
    Delegated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub focus_after_clear: ClearFocus,
    pub result_wiring: ResultWiring,
}

/// Outcome of routing an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// The clear affordance visibility was (re)applied
    ClearVisibility(Visibility),
    /// A result link was activated; the host should navigate to `href`
    Navigate { link: ElementId, href: Option<String> },
    /// No handler is wired for this event
    Ignored,
}

/// Wired element a click lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClickTarget {
    Clear,
    Link(ElementId),
}

pub struct SearchFieldController {
    field: ElementId,
    clear: ElementId,
    results: Option<ElementId>,
    loading: Option<ElementId>,
    result_links: Vec<ElementId>,
    selectors: Selectors,
    options: Options,
    view_mode: ViewMode,
}

impl SearchFieldController {
    /// Resolve the page roles and wire the controller to them.
    ///
    /// Fails with [`SearchFieldError::MissingElement`] when the search
    /// field or the clear affordance cannot be found. The results container
    /// and loading indicator are only required once a result link is
    /// activated; no result links at all is fine.
    pub fn attach<P: HostPage>(page: &P, selectors: &Selectors, options: Options) -> Result<Self> {
        let field = page
            .query_selector(&selectors.search_field)
            .ok_or_else(|| Role::Field.missing(selectors))?;
        let clear = page
            .query_selector(&selectors.clear_button)
            .ok_or_else(|| Role::Clear.missing(selectors))?;
        let results = page.query_selector(&selectors.results);
        let loading = page.query_selector(&selectors.loading);

        let result_links = match options.result_wiring {
            ResultWiring::Snapshot => page.query_selector_all(&selectors.result_link),
            ResultWiring::Delegated => Vec::new(),
        };

        logging::debug(
            LOG,
            &format!(
                "attached: field={:?} clear={:?} results={:?} loading={:?} links={} wiring={:?}",
                field,
                clear,
                results,
                loading,
                result_links.len(),
                options.result_wiring
            ),
        );

        Ok(Self {
            field,
            clear,
            results,
            loading,
            result_links,
            selectors: selectors.clone(),
            options,
            view_mode: ViewMode::Results,
        })
    }

    pub fn field(&self) -> ElementId {
        self.field
    }

    pub fn clear_button(&self) -> ElementId {
        self.clear
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Links wired at attach time (empty under delegated wiring)
    pub fn wired_links(&self) -> &[ElementId] {
        &self.result_links
    }

    /// Current visibility of the clear affordance, read from the page
    pub fn clear_visibility<P: HostPage>(&self, page: &P) -> Result<Visibility> {
        page.visibility(self.clear)
            .map_err(|e| self.stale_as_missing(e, Role::Clear, self.clear))
    }

    /// Apply the initial clear affordance visibility once the page is loaded
    pub fn initialize<P: HostPage>(&self, page: &mut P) -> Result<Visibility> {
        let visibility = self.toggle_clear_button(page)?;
        logging::info(LOG, &format!("initialized, clear button {}", visibility));
        Ok(visibility)
    }

    /// The search field content changed
    pub fn on_field_input<P: HostPage>(&self, page: &mut P) -> Result<Visibility> {
        self.toggle_clear_button(page)
    }

    /// The clear affordance was activated
    pub fn on_clear_click<P: HostPage>(&self, page: &mut P) -> Result<Visibility> {
        page.set_value(self.field, "")
            .map_err(|e| self.stale_as_missing(e, Role::Field, self.field))?;
        let visibility = self.toggle_clear_button(page)?;

        if self.options.focus_after_clear == ClearFocus::Restore {
            page.focus(self.field)
                .map_err(|e| self.stale_as_missing(e, Role::Field, self.field))?;
        }

        logging::debug(LOG, "search field cleared");
        Ok(visibility)
    }

    /// A result link was activated: hide the results, show the loading
    /// indicator. There is no way back to the results view.
    pub fn on_result_activate<P: HostPage>(&mut self, page: &mut P, link: ElementId) -> Result<Handled> {
        let href = page.href(link)?.map(str::to_string);

        let results = self
            .results
            .ok_or_else(|| Role::Results.missing(&self.selectors))?;
        let loading = self
            .loading
            .ok_or_else(|| Role::Loading.missing(&self.selectors))?;

        page.set_visibility(results, Visibility::Hidden)
            .map_err(|e| self.stale_as_missing(e, Role::Results, results))?;
        page.set_visibility(loading, Visibility::Shown)
            .map_err(|e| self.stale_as_missing(e, Role::Loading, loading))?;

        if self.view_mode == ViewMode::Results {
            logging::info(
                LOG,
                &format!("result {:?} activated, loading {}", link, href.as_deref().unwrap_or("-")),
            );
        }
        self.view_mode = ViewMode::Loading;

        Ok(Handled::Navigate { link, href })
    }

    /// Route a page event to its handler. Each (element, event kind) pair
    /// has at most one handler.
    pub fn handle<P: HostPage>(&mut self, page: &mut P, event: &Event) -> Result<Handled> {
        let outcome = match event.kind {
            EventKind::Loaded => Handled::ClearVisibility(self.initialize(page)?),
            EventKind::Input if event.target == self.field => {
                Handled::ClearVisibility(self.on_field_input(page)?)
            }
            EventKind::Click => match self.click_target(page, event.target) {
                Some(ClickTarget::Clear) => Handled::ClearVisibility(self.on_clear_click(page)?),
                Some(ClickTarget::Link(link)) => self.on_result_activate(page, link)?,
                None => Handled::Ignored,
            },
            EventKind::Input => Handled::Ignored,
        };
        Ok(outcome)
    }

    /// The wired element a click on `target` reaches, bubbling from the
    /// target up through its ancestors
    fn click_target<P: HostPage>(&self, page: &P, target: ElementId) -> Option<ClickTarget> {
        if self.options.result_wiring == ResultWiring::Delegated && !page.contains(target) {
            return None;
        }
        let mut current = Some(target);
        while let Some(id) = current {
            if id == self.clear {
                return Some(ClickTarget::Clear);
            }
            if self.is_result_link(page, id) {
                return Some(ClickTarget::Link(id));
            }
            current = page.parent(id);
        }
        None
    }

    fn is_result_link<P: HostPage>(&self, page: &P, id: ElementId) -> bool {
        match self.options.result_wiring {
            ResultWiring::Snapshot => self.result_links.contains(&id),
            ResultWiring::Delegated => page.matches(id, &self.selectors.result_link),
        }
    }

    /// `visible(clear) = len(field value) > 0`
    fn toggle_clear_button<P: HostPage>(&self, page: &mut P) -> Result<Visibility> {
        let has_text = !page
            .value(self.field)
            .map_err(|e| self.stale_as_missing(e, Role::Field, self.field))?
            .is_empty();
        let visibility = Visibility::from_bool(has_text);
        page.set_visibility(self.clear, visibility)
            .map_err(|e| self.stale_as_missing(e, Role::Clear, self.clear))?;
        logging::debug(LOG, &format!("clear button {}", visibility));
        Ok(visibility)
    }

    /// Report a vanished role element as a missing element of that role
    fn stale_as_missing(&self, err: SearchFieldError, role: Role, id: ElementId) -> SearchFieldError {
        match err {
            SearchFieldError::StaleElement(stale) if stale == id => {
                let err = role.missing(&self.selectors);
                logging::error(LOG, &err.to_string());
                err
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Document, Element};

    struct Fixture {
        doc: Document,
        field: ElementId,
        clear: ElementId,
        results: ElementId,
        loading: ElementId,
        links: Vec<ElementId>,
    }

    fn fixture(value: &str, link_count: usize) -> Fixture {
        let mut doc = Document::new();
        let root = doc.root();
        let form = doc.insert(root, Element::new("form")).unwrap();
        let field = doc
            .insert(form, Element::new("input").with_class("search-field").with_value(value))
            .unwrap();
        let clear = doc
            .insert(form, Element::new("button").with_class("clear-button"))
            .unwrap();
        let results = doc
            .insert(root, Element::new("div").with_class("search-results"))
            .unwrap();
        let links = (0..link_count)
            .map(|i| {
                doc.insert(
                    results,
                    Element::new("a")
                        .with_class("result-link")
                        .with_href(&format!("/details/{}/Movie/", i)),
                )
                .unwrap()
            })
            .collect();
        let loading = doc
            .insert(
                root,
                Element::new("div")
                    .with_class("loading")
                    .with_visibility(Visibility::Hidden),
            )
            .unwrap();
        Fixture {
            doc,
            field,
            clear,
            results,
            loading,
            links,
        }
    }

    fn attach(fx: &Fixture, options: Options) -> SearchFieldController {
        SearchFieldController::attach(&fx.doc, &Selectors::default(), options).unwrap()
    }

    #[test]
    fn attach_resolves_roles() {
        let fx = fixture("", 3);
        let ctl = attach(&fx, Options::default());
        assert_eq!(ctl.field(), fx.field);
        assert_eq!(ctl.clear_button(), fx.clear);
        assert_eq!(ctl.wired_links(), fx.links.as_slice());
        assert_eq!(ctl.view_mode(), ViewMode::Results);
    }

    #[test]
    fn attach_requires_field_and_clear_button() {
        let mut fx = fixture("", 0);
        fx.doc.remove(fx.clear).unwrap();
        let err = SearchFieldController::attach(&fx.doc, &Selectors::default(), Options::default())
            .err()
            .unwrap();
        assert!(matches!(
            err,
            SearchFieldError::MissingElement { role: "clear button", .. }
        ));

        let mut fx = fixture("", 0);
        fx.doc.remove(fx.field).unwrap();
        let err = SearchFieldController::attach(&fx.doc, &Selectors::default(), Options::default())
            .err()
            .unwrap();
        assert_eq!(
            err.to_string(),
            "Missing search field element (selector '.search-field')"
        );
    }

    #[test]
    fn visibility_tracks_emptiness() {
        let mut fx = fixture("", 0);
        let ctl = attach(&fx, Options::default());
        for (value, expected) in [
            ("", Visibility::Hidden),
            ("a", Visibility::Shown),
            (" ", Visibility::Shown),
            ("\t\n", Visibility::Shown),
            ("héllo", Visibility::Shown),
            ("", Visibility::Hidden),
        ] {
            fx.doc.set_value(fx.field, value).unwrap();
            assert_eq!(ctl.on_field_input(&mut fx.doc).unwrap(), expected, "{:?}", value);
            assert_eq!(fx.doc.visibility(fx.clear).unwrap(), expected);
        }
    }

    #[test]
    fn input_is_idempotent() {
        let mut fx = fixture("abc", 0);
        let ctl = attach(&fx, Options::default());
        let first = ctl.on_field_input(&mut fx.doc).unwrap();
        let second = ctl.on_field_input(&mut fx.doc).unwrap();
        assert_eq!(first, second);
        assert_eq!(fx.doc.value(fx.field).unwrap(), "abc");
    }

    #[test]
    fn clear_empties_and_hides() {
        let mut fx = fixture("something", 0);
        let ctl = attach(&fx, Options::default());
        ctl.initialize(&mut fx.doc).unwrap();
        assert_eq!(ctl.on_clear_click(&mut fx.doc).unwrap(), Visibility::Hidden);
        assert_eq!(fx.doc.value(fx.field).unwrap(), "");
        assert_eq!(ctl.clear_visibility(&fx.doc).unwrap(), Visibility::Hidden);
    }

    #[test]
    fn clear_focus_policies() {
        let mut fx = fixture("x", 1);
        let ctl = attach(&fx, Options::default());
        fx.doc.focus(fx.clear).unwrap();
        ctl.on_clear_click(&mut fx.doc).unwrap();
        assert_eq!(fx.doc.focused(), Some(fx.field));

        let mut fx = fixture("x", 1);
        let ctl = attach(
            &fx,
            Options {
                focus_after_clear: ClearFocus::Leave,
                ..Options::default()
            },
        );
        fx.doc.focus(fx.clear).unwrap();
        ctl.on_clear_click(&mut fx.doc).unwrap();
        assert_eq!(fx.doc.focused(), Some(fx.clear));
    }

    #[test]
    fn activation_switches_to_loading() {
        let mut fx = fixture("", 3);
        let mut ctl = attach(&fx, Options::default());
        let outcome = ctl.handle(&mut fx.doc, &Event::click(fx.links[1])).unwrap();
        assert_eq!(
            outcome,
            Handled::Navigate {
                link: fx.links[1],
                href: Some("/details/1/Movie/".into())
            }
        );
        assert_eq!(fx.doc.visibility(fx.results).unwrap(), Visibility::Hidden);
        assert_eq!(fx.doc.visibility(fx.loading).unwrap(), Visibility::Shown);
        assert_eq!(ctl.view_mode(), ViewMode::Loading);

        // a second activation keeps the loading view
        ctl.handle(&mut fx.doc, &Event::click(fx.links[0])).unwrap();
        assert_eq!(fx.doc.visibility(fx.results).unwrap(), Visibility::Hidden);
        assert_eq!(fx.doc.visibility(fx.loading).unwrap(), Visibility::Shown);
    }

    #[test]
    fn activation_without_containers_is_missing_element() {
        let mut fx = fixture("", 1);
        fx.doc.remove(fx.loading).unwrap();
        let mut ctl = attach(&fx, Options::default());
        let err = ctl.handle(&mut fx.doc, &Event::click(fx.links[0])).unwrap_err();
        assert!(matches!(
            err,
            SearchFieldError::MissingElement { role: "loading indicator", .. }
        ));
    }

    #[test]
    fn removed_field_surfaces_as_missing_element() {
        let mut fx = fixture("abc", 0);
        let ctl = attach(&fx, Options::default());
        fx.doc.remove(fx.field).unwrap();
        let err = ctl.on_field_input(&mut fx.doc).unwrap_err();
        assert!(err.is_missing_element());
        assert!(matches!(
            err,
            SearchFieldError::MissingElement { role: "search field", .. }
        ));
    }

    #[test]
    fn snapshot_ignores_late_links() {
        let mut fx = fixture("", 1);
        let mut ctl = attach(&fx, Options::default());
        let late = fx
            .doc
            .insert(fx.results, Element::new("a").with_class("result-link"))
            .unwrap();
        assert_eq!(ctl.handle(&mut fx.doc, &Event::click(late)).unwrap(), Handled::Ignored);
        assert_eq!(ctl.view_mode(), ViewMode::Results);
        assert_eq!(fx.doc.visibility(fx.results).unwrap(), Visibility::Shown);
    }

    #[test]
    fn delegated_honours_late_links_and_descendants() {
        let mut fx = fixture("", 0);
        let mut ctl = attach(
            &fx,
            Options {
                result_wiring: ResultWiring::Delegated,
                ..Options::default()
            },
        );
        let late = fx
            .doc
            .insert(
                fx.results,
                Element::new("a").with_class("result-link").with_href("/details/9/TV/"),
            )
            .unwrap();
        let poster = fx.doc.insert(late, Element::new("img")).unwrap();

        let outcome = ctl.handle(&mut fx.doc, &Event::click(poster)).unwrap();
        assert_eq!(
            outcome,
            Handled::Navigate {
                link: late,
                href: Some("/details/9/TV/".into())
            }
        );
        assert_eq!(ctl.view_mode(), ViewMode::Loading);
    }

    #[test]
    fn clicks_inside_wired_elements_bubble_up() {
        let mut fx = fixture("abc", 2);
        let mut ctl = attach(&fx, Options::default());

        let icon = fx.doc.insert(fx.clear, Element::new("span")).unwrap();
        assert_eq!(
            ctl.handle(&mut fx.doc, &Event::click(icon)).unwrap(),
            Handled::ClearVisibility(Visibility::Hidden)
        );
        assert_eq!(fx.doc.value(fx.field).unwrap(), "");

        let poster = fx.doc.insert(fx.links[1], Element::new("img")).unwrap();
        assert_eq!(
            ctl.handle(&mut fx.doc, &Event::click(poster)).unwrap(),
            Handled::Navigate {
                link: fx.links[1],
                href: Some("/details/1/Movie/".into())
            }
        );
        assert_eq!(ctl.view_mode(), ViewMode::Loading);
    }

    #[test]
    fn unrelated_events_are_ignored() {
        let mut fx = fixture("abc", 1);
        let mut ctl = attach(&fx, Options::default());
        assert_eq!(
            ctl.handle(&mut fx.doc, &Event::input(fx.clear)).unwrap(),
            Handled::Ignored
        );
        assert_eq!(
            ctl.handle(&mut fx.doc, &Event::click(fx.field)).unwrap(),
            Handled::Ignored
        );
        assert_eq!(
            ctl.handle(&mut fx.doc, &Event::click(fx.results)).unwrap(),
            Handled::Ignored
        );
        assert_eq!(fx.doc.value(fx.field).unwrap(), "abc");
    }

    #[test]
    fn loaded_event_runs_initialize() {
        let mut fx = fixture("query", 0);
        let mut ctl = attach(&fx, Options::default());
        let root = fx.doc.root();
        assert_eq!(
            ctl.handle(&mut fx.doc, &Event::loaded(root)).unwrap(),
            Handled::ClearVisibility(Visibility::Shown)
        );
    }
}
