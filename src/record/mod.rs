//! Raw record handling: the transport-facing record type, the declarative
//! field-rule mapper, and timestamp coercion.

pub mod mapper;
pub mod raw;
pub mod timestamp;

pub use mapper::{ExtraFields, FieldRule, FieldRules, FieldValue, MappedRecord};
pub use raw::RawRecord;
pub use timestamp::{format_query_date, parse_timestamp, timestamp_field};
