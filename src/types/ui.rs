/// Text used by the UI when rendering the header and the three message
/// states.
#[derive(Debug, Clone)]
pub struct UiConfig {
    /// Prompt shown left of the query input.
    pub input_title: String,
    /// Noun used by the status line when counting templates.
    pub count_label: String,
    /// Message shown while the listing is being fetched.
    pub loading_text: String,
    /// Message shown when no template matches the query.
    pub empty_text: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            input_title: "Meme templates".to_string(),
            count_label: "Templates".to_string(),
            loading_text: "Loading meme templates…".to_string(),
            empty_text: "No meme templates match that search.".to_string(),
        }
    }
}
