//! Types and traits for recording training and evaluation metrics.
//!
//! * [`Record`] - key-value pairs of [`RecordValue`]s
//! * [`Recorder`] - writes records to an output destination
//! * [`AggregateRecorder`] - stores records and writes aggregated values on flush
//! * [`RecordStorage`] - aggregation of stored records
//! * [`BufferedRecorder`] - keeps records in memory, used when recording evaluation episodes
//! * [`NullRecorder`] - discards all records
//!
//! # Basic Usage
//!
//! ```rust
//! use reinforce_core::record::{Record, RecordValue};
//!
//! // following values are obtained with some process in reality
//! let episode = 1;
//! let obs = vec![0.01f32, -0.2, 0.03, 0.1];
//! let ret = 23f32;
//!
//! let mut record = Record::empty();
//! record.insert("episode", RecordValue::Scalar(episode as f32));
//! record.insert("episode_return", RecordValue::Scalar(ret));
//! record.insert("obs", RecordValue::Array1(obs));
//! assert_eq!(record.get_scalar("episode_return").unwrap(), 23.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::{AggregateRecorder, Recorder};
pub use storage::RecordStorage;
