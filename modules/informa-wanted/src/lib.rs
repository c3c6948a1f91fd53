pub mod filter;
pub mod normalize;
pub mod scraper;
pub mod storage;

pub use filter::filter_records;
pub use normalize::{dedupe, extract_records, normalize_crimes, normalize_record};
pub use scraper::{StructuredExtractor, WantedPersonsScraper};
pub use storage::WantedPersonsStore;
