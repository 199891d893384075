use super::TemplateRecord;

/// Data displayed in the browser: the loaded template collection plus the
/// labels and query the UI should start with.
///
/// The collection is only ever replaced wholesale (initial load or reload),
/// never mutated in place, and its order is the API response order.
#[derive(Debug, Default, Clone)]
pub struct TemplateCatalog {
    pub context_label: Option<String>,
    pub initial_query: String,
    pub templates: Vec<TemplateRecord>,
}

impl TemplateCatalog {
    /// Create an empty [`TemplateCatalog`] instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label describing where the templates come from.
    #[must_use]
    pub fn with_context(mut self, label: impl Into<String>) -> Self {
        self.context_label = Some(label.into());
        self
    }

    /// Set the query that should be shown when the UI starts.
    #[must_use]
    pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
        self.initial_query = query.into();
        self
    }

    /// Replace the template collection.
    #[must_use]
    pub fn with_templates(mut self, templates: Vec<TemplateRecord>) -> Self {
        self.templates = templates;
        self
    }
}

/// What the browser session produced when it exited.
#[derive(Debug, Clone)]
pub struct BrowseOutcome {
    /// Whether the user accepted a card (Enter) or cancelled (Esc).
    pub accepted: bool,
    /// The highlighted template at accept time, if any was visible.
    pub selection: Option<TemplateRecord>,
    /// The query text as it stood on exit.
    pub query: String,
}
