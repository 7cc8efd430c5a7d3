pub mod encoding;
pub mod record;
pub mod sample;

pub use encoding::{FeatureEncoding, TOP_POSITIONS};
pub use record::{load_records, parse_records, Record, MALE_LABEL};
pub use sample::TrainingSample;
