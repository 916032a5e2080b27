/// Free-text filter input. Submitting or clearing hands the term to the
/// owner; the bar itself never touches results.
#[derive(Debug, Clone, Default)]
pub struct SearchBar {
    term: String,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_active(&self) -> bool {
        !self.term.trim().is_empty()
    }

    pub fn submit(&mut self, text: &str) -> &str {
        self.term = text.trim().to_string();
        &self.term
    }

    pub fn clear(&mut self) -> &str {
        self.term.clear();
        &self.term
    }
}
