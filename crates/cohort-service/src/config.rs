//! Service configuration.

use cohort_core::query::DEFAULT_PAGE_LIMIT;

/// Configuration for the group service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Page size used when a listing does not ask for one (default: 10).
    pub default_page_limit: u64,
    /// Upper bound on client-requested page sizes (default: 100).
    pub max_page_limit: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_limit: DEFAULT_PAGE_LIMIT,
            max_page_limit: 100,
        }
    }
}
