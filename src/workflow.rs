use anyhow::Result;
use memegrid::{BrowseOutcome, MemeBrowser};

use crate::settings::ResolvedConfig;

/// Coordinates building and running the interactive browse session.
pub(crate) struct BrowseWorkflow {
    browser: MemeBrowser,
}

impl BrowseWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Self {
        let ResolvedConfig {
            endpoint,
            input_title,
            initial_query,
            theme_name: _,
            theme,
            ui,
        } = config;

        let mut browser = MemeBrowser::remote(endpoint)
            .with_theme(theme)
            .with_ui_config(ui)
            .with_initial_query(initial_query);
        if let Some(title) = input_title {
            browser = browser.with_input_title(title);
        }

        Self { browser }
    }

    pub(crate) fn run(self) -> Result<BrowseOutcome> {
        self.browser.run()
    }
}
