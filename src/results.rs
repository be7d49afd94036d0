//! Search results and the search page markup
//!
//! Results come from the search backend as JSON; each becomes a result link
//! pointing at the title's details page.

use crate::config::Selectors;
use crate::error::Result;
use crate::page::{Document, Element, ElementId, Visibility};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    Movie,
    #[serde(rename = "TV")]
    Tv,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Tv => write!(f, "TV"),
        }
    }
}

/// One entry of a title search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub tmdb_id: u64,
    pub title: String,
    /// Release (movie) or first air (TV) date, `YYYY` or `YYYY-MM-DD`
    #[serde(default)]
    pub year: Option<String>,
    pub media_type: MediaType,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl SearchResult {
    pub fn new(tmdb_id: u64, title: &str, year: Option<&str>, media_type: MediaType) -> Self {
        Self {
            tmdb_id,
            title: title.to_string(),
            year: year.map(str::to_string),
            media_type,
            poster_path: None,
        }
    }

    /// Four-digit year, if the date has one
    pub fn release_year(&self) -> Option<&str> {
        let year = self.year.as_deref()?.get(..4)?;
        year.chars().all(|c| c.is_ascii_digit()).then_some(year)
    }

    /// Link target of the details page
    pub fn details_href(&self) -> String {
        format!("/details/{}/{}/", self.tmdb_id, self.media_type)
    }

    /// Link text, e.g. `Heat (1995)`
    pub fn label(&self) -> String {
        match self.release_year() {
            Some(year) => format!("{} ({})", self.title, year),
            None => self.title.clone(),
        }
    }
}

/// Read a JSON array of results
pub fn load_results(path: &Path) -> Result<Vec<SearchResult>> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

impl Document {
    /// Lay out a search page:
    ///
    /// ```text
    /// body
    ///  ├─ form
    ///  │   ├─ input   search field (value = query)
    ///  │   └─ button  clear affordance
    ///  ├─ div         results container
    ///  │   └─ a *     one result link per result
    ///  └─ div         loading indicator (hidden)
    /// ```
    pub fn search_page(query: &str, results: &[SearchResult], selectors: &Selectors) -> Self {
        let mut doc = Document::new();
        let root = doc.root();

        let form = doc.create_element(Element::new("form").with_text("Search"));
        let field = doc.create_element(
            selectors
                .search_field
                .stamp(Element::new("input").with_value(query)),
        );
        let clear = doc.create_element(
            selectors
                .clear_button
                .stamp(Element::new("button").with_text("\u{2715}")),
        );
        let container = doc.create_element(selectors.results.stamp(Element::new("div")));
        let loading = doc.create_element(
            selectors.loading.stamp(
                Element::new("div")
                    .with_text("Loading...")
                    .with_visibility(Visibility::Hidden),
            ),
        );

        // All freshly created, so appends cannot fail
        for (parent, child) in [
            (root, form),
            (form, field),
            (form, clear),
            (root, container),
            (root, loading),
        ] {
            let _ = doc.append_child(parent, child);
        }
        for result in results {
            let _ = doc.append_result_link(container, result, selectors);
        }

        doc
    }

    /// Append a result link for `result` under `container`
    pub fn append_result_link(
        &mut self,
        container: ElementId,
        result: &SearchResult,
        selectors: &Selectors,
    ) -> Result<ElementId> {
        let link = selectors.result_link.stamp(
            Element::new("a")
                .with_href(&result.details_href())
                .with_text(&result.label()),
        );
        self.insert(container, link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HostPage;

    fn heat() -> SearchResult {
        SearchResult::new(949, "Heat", Some("1995-12-15"), MediaType::Movie)
    }

    #[test]
    fn details_href_uses_route_media_names() {
        assert_eq!(heat().details_href(), "/details/949/Movie/");
        let show = SearchResult::new(1396, "Breaking Bad", Some("2008"), MediaType::Tv);
        assert_eq!(show.details_href(), "/details/1396/TV/");
    }

    #[test]
    fn label_includes_year_when_known() {
        assert_eq!(heat().label(), "Heat (1995)");
        let undated = SearchResult::new(1, "Untitled", None, MediaType::Movie);
        assert_eq!(undated.label(), "Untitled");
        let odd = SearchResult::new(2, "Odd", Some("n/a"), MediaType::Movie);
        assert_eq!(odd.label(), "Odd");
    }

    #[test]
    fn parses_backend_json() {
        let results: Vec<SearchResult> = serde_json::from_str(
            r#"[
                {"tmdb_id": 949, "title": "Heat", "year": "1995-12-15", "media_type": "Movie"},
                {"tmdb_id": 1396, "title": "Breaking Bad", "media_type": "TV", "poster_path": "/bb.jpg"}
            ]"#,
        )
        .unwrap();
        assert_eq!(results[0], heat());
        assert_eq!(results[1].media_type, MediaType::Tv);
        assert_eq!(results[1].year, None);
        assert_eq!(results[1].poster_path.as_deref(), Some("/bb.jpg"));
    }

    #[test]
    fn search_page_layout() {
        let selectors = Selectors::default();
        let results = vec![heat(), SearchResult::new(2, "Heat 2", None, MediaType::Movie)];
        let doc = Document::search_page("heat", &results, &selectors);

        let field = doc.query_selector(&selectors.search_field).unwrap();
        assert_eq!(doc.value(field).unwrap(), "heat");
        assert!(doc.query_selector(&selectors.clear_button).is_some());

        let links = doc.query_selector_all(&selectors.result_link);
        assert_eq!(links.len(), 2);
        assert_eq!(doc.href(links[0]).unwrap(), Some("/details/949/Movie/"));
        assert_eq!(doc.text(links[1]).unwrap(), "Heat 2");

        let container = doc.query_selector(&selectors.results).unwrap();
        assert_eq!(doc.children(container).unwrap(), links.as_slice());

        let loading = doc.query_selector(&selectors.loading).unwrap();
        assert_eq!(doc.visibility(loading).unwrap(), Visibility::Hidden);
    }

    #[test]
    fn search_page_honours_custom_selectors() {
        let selectors: Selectors = serde_json::from_str(
            r##"{ "search_field": "#q", "clear_button": "#reset", "result_link": "li" }"##,
        )
        .unwrap();
        let doc = Document::search_page("", &[heat()], &selectors);
        let field = doc.query_selector(&selectors.search_field).unwrap();
        assert_eq!(doc.element(field).unwrap().id.as_deref(), Some("q"));
        let link = doc.query_selector(&selectors.result_link).unwrap();
        assert_eq!(doc.element(link).unwrap().tag, "li");
    }
}
