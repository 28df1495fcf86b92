//! Namespace reset through cursor-driven enumeration

use cacheside_domain::constants::DEFAULT_SCAN_BATCH_SIZE;
use cacheside_domain::error::{Error, Result};
use cacheside_domain::{KeyScanner, Namespace, ScanCursor};
use std::sync::Arc;
use tracing::{debug, info};

use crate::constants::DEFAULT_MAX_SCAN_PAGES;

/// Deletes every key of a namespace, page by page
///
/// The loop only ends when the backend hands the start cursor back. Pages
/// may be empty while the cursor is still running, so an empty page never
/// stops the scan on its own. A key seen twice is counted twice.
#[derive(Clone)]
pub struct NamespaceScanner {
    scanner: Arc<dyn KeyScanner>,
    batch_size: usize,
    max_pages: u64,
}

impl NamespaceScanner {
    /// Create a scanner with the default batch size and page bound
    pub fn new(scanner: Arc<dyn KeyScanner>) -> Self {
        Self {
            scanner,
            batch_size: DEFAULT_SCAN_BATCH_SIZE,
            max_pages: DEFAULT_MAX_SCAN_PAGES,
        }
    }

    /// Keys requested per page; zero is raised to one
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Maximum pages fetched before giving up; zero is raised to one
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u64) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    /// Delete all keys matching `"<namespace>:*"` and return how many were matched
    ///
    /// A failure on the first page, before anything was deleted, is returned
    /// as the backend reported it. A failure after that is wrapped in
    /// [`Error::ScanIncomplete`] carrying the keys deleted so far.
    pub async fn reset(&self, namespace: &str) -> Result<u64> {
        if namespace.is_empty() {
            return Err(Error::invalid_argument(
                "Namespace must not be empty; an empty namespace would match the whole keyspace",
            ));
        }

        let prefix = Namespace::new(namespace).pattern_prefix();
        let mut cursor = ScanCursor::START;
        let mut deleted: u64 = 0;
        let mut pages: u64 = 0;

        loop {
            let page = match self
                .scanner
                .scan_prefix(&cursor, &prefix, self.batch_size)
                .await
            {
                Ok(page) => page,
                Err(e) if pages == 0 => return Err(e),
                Err(e) => {
                    return Err(Error::scan_incomplete(
                        namespace,
                        deleted,
                        pages,
                        "page fetch failed",
                        Some(e),
                    ));
                }
            };
            pages += 1;

            if !page.keys.is_empty() {
                if let Err(e) = self.scanner.delete_many(&page.keys).await {
                    if pages == 1 {
                        return Err(e);
                    }
                    return Err(Error::scan_incomplete(
                        namespace,
                        deleted,
                        pages,
                        "batch delete failed",
                        Some(e),
                    ));
                }
                deleted += page.keys.len() as u64;
            }

            debug!(
                namespace,
                page = pages,
                keys = page.keys.len(),
                cursor = %page.cursor,
                "scan page"
            );

            if page.is_last() {
                break;
            }
            if pages >= self.max_pages {
                return Err(Error::scan_incomplete(
                    namespace,
                    deleted,
                    pages,
                    format!("page limit of {} reached", self.max_pages),
                    None,
                ));
            }
            cursor = page.cursor;
        }

        info!(namespace, deleted, pages, "namespace reset");
        Ok(deleted)
    }
}

impl std::fmt::Debug for NamespaceScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamespaceScanner")
            .field("provider", &self.scanner.provider_name())
            .field("batch_size", &self.batch_size)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}
