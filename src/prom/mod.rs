mod labels;
pub use self::labels::decode_labels;
mod line;
pub use self::line::classify;
pub use self::line::Line;
pub use self::line::SampleLine;
mod model;
pub use self::model::LabelSet;
pub use self::model::MetricFamilies;
pub use self::model::MetricFamily;
pub use self::model::MetricSample;
pub use self::model::MetricType;
mod parser;
pub use self::parser::parse;
mod query;
pub use self::query::UNSET_LABEL;

mod metric_scraper;
pub use self::metric_scraper::HttpSource;
pub use self::metric_scraper::MetricScraper;
pub use self::metric_scraper::MetricSource;
pub use self::metric_scraper::ScrapeError;
pub use self::metric_scraper::Snapshot;

#[cfg(test)]
mod test_data;
