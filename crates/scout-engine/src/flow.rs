use crate::backend::Backend;
use crate::selector::SelectorFiller;
use scout_common::protocol::{FlowExecutionResult, PageFillResult};
use scout_common::scenario::PageObjectSpec;
use tracing::{info, warn};

/// Drives the selector filler across page objects, one page at a time.
///
/// A backend failure on one page is recorded on that page and the run moves on.
pub struct FlowExecutor<'a, B: Backend + ?Sized> {
    filler: SelectorFiller<'a, B>,
}

impl<'a, B: Backend + ?Sized> FlowExecutor<'a, B> {
    pub fn new(filler: SelectorFiller<'a, B>) -> Self {
        Self { filler }
    }

    pub async fn execute(&mut self, pages: &[PageObjectSpec]) -> FlowExecutionResult {
        let mut results = Vec::with_capacity(pages.len());
        for page in pages {
            results.push(self.execute_page(page).await);
        }
        FlowExecutionResult::from_pages(results)
    }

    async fn execute_page(&mut self, page: &PageObjectSpec) -> PageFillResult {
        if page.required_elements.is_empty() {
            info!(page = %page.name, "No elements to resolve");
            return PageFillResult {
                page_name: page.name.clone(),
                path: page.path.clone(),
                selectors: Vec::new(),
                success: true,
                missing_elements: Vec::new(),
                error: None,
            };
        }

        info!(page = %page.name, path = %page.path, elements = page.required_elements.len(), "Filling selectors");
        match self
            .filler
            .fill_page_selectors(&page.path, &page.required_elements)
            .await
        {
            Ok(selectors) => {
                let missing_elements: Vec<String> = selectors
                    .iter()
                    .filter(|m| !m.is_resolved())
                    .map(|m| m.element_name.clone())
                    .collect();
                let success = missing_elements.is_empty();
                if success {
                    info!(page = %page.name, resolved = selectors.len(), "Page resolved");
                } else {
                    warn!(page = %page.name, missing = ?missing_elements, "Page has unresolved elements");
                }
                PageFillResult {
                    page_name: page.name.clone(),
                    path: page.path.clone(),
                    selectors,
                    success,
                    missing_elements,
                    error: None,
                }
            }
            Err(e) => {
                warn!(page = %page.name, error = %e, "Page failed");
                PageFillResult {
                    page_name: page.name.clone(),
                    path: page.path.clone(),
                    selectors: Vec::new(),
                    success: false,
                    missing_elements: page
                        .required_elements
                        .iter()
                        .map(|el| el.name.clone())
                        .collect(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
