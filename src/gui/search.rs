//! Search field buffer for the window host

/// Local copy of the search field value that egui edits in place
#[derive(Default)]
pub struct SearchState {
    /// Text shown in the field
    pub query: String,
    /// Focus the field on the next frame
    pub wants_focus: bool,
}

impl SearchState {
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            wants_focus: true,
        }
    }

    /// Pick up a value the page changed on its own (e.g. after clearing)
    pub fn sync(&mut self, page_value: &str) -> bool {
        if self.query != page_value {
            self.query = page_value.to_string();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_reports_external_changes() {
        let mut search = SearchState::new("heat");
        assert!(search.wants_focus);
        assert!(!search.sync("heat"));
        assert!(search.sync(""));
        assert_eq!(search.query, "");
    }
}
