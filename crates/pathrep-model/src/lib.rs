pub mod category;
pub mod counts;
pub mod record;

pub use category::{Category, ClassificationSource};
pub use counts::{CategoryCountRow, GRAND_TOTAL_LABEL, TestCountRow};
pub use record::{AdmissionTag, ClassifiedRecord, RawRecord, Record};
