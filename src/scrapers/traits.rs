use async_trait::async_trait;

/// Finds a contact email on a hotel's website
#[async_trait]
pub trait EmailScraper: Send + Sync {
    /// Look up a contact email on `website`. Failures are reported as
    /// `None`; callers never see a scrape error.
    async fn find_email(&self, website: Option<&str>) -> Option<String>;

    /// Name of the scraping backend, for logs
    fn backend_name(&self) -> &'static str;
}
