pub mod browser;
pub mod extract;
pub mod traits;

pub use browser::BrowserEmailScraper;
pub use traits::EmailScraper;
