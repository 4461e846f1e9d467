//! Application state shared across handlers.

use std::sync::Arc;

use binwatch_core::MonitoringService;

use crate::insight::InsightPort;
use crate::pages::PageTemplates;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Alert/bin stores and demo seeding.
    pub service: Arc<MonitoringService>,
    /// Generative-text backend.
    pub insight: Arc<dyn InsightPort>,
    /// Dashboard page templates.
    pub pages: Arc<PageTemplates>,
}

impl AppState {
    /// Bundle the collaborators handed to the router.
    #[must_use]
    pub fn new(
        service: MonitoringService,
        insight: impl InsightPort + 'static,
        pages: PageTemplates,
    ) -> Self {
        Self {
            service: Arc::new(service),
            insight: Arc::new(insight),
            pages: Arc::new(pages),
        }
    }
}
