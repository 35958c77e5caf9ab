//! Writes [`Record`]s to TFRecord files readable by Tensorboard.
use log::warn;
use reinforce_core::record::{AggregateRecorder, Record, RecordStorage, RecordValue, Recorder};
use std::path::Path;
use tensorboard_rs::summary_writer::SummaryWriter;

/// Write records to TFRecord.
pub struct TensorboardRecorder {
    writer: SummaryWriter,
    step_key: String,
    ignore_unsupported_value: bool,
    storage: RecordStorage,
}

impl TensorboardRecorder {
    /// Construct a [`TensorboardRecorder`].
    ///
    /// TFRecord will be stored in `logdir`. Records passed to
    /// [`Recorder::write`] are indexed by their `"episode"` scalar.
    pub fn new<P: AsRef<Path>>(logdir: P) -> Self {
        Self {
            writer: SummaryWriter::new(logdir),
            step_key: "episode".to_string(),
            ignore_unsupported_value: true,
            storage: RecordStorage::new(),
        }
    }

    /// Construct a [`TensorboardRecorder`] that panics on values it cannot write.
    pub fn new_with_check_unsupported_value<P: AsRef<Path>>(logdir: P) -> Self {
        Self {
            ignore_unsupported_value: false,
            ..Self::new(logdir)
        }
    }

    fn write_at(&mut self, record: &Record, step: usize) {
        for (k, v) in record.iter() {
            if *k == self.step_key {
                continue;
            }
            match v {
                RecordValue::Scalar(v) => self.writer.add_scalar(k, *v, step),
                _ => {
                    if !self.ignore_unsupported_value {
                        panic!("Unsupported value: {:?}", (k, v));
                    }
                }
            }
        }
        self.writer.flush();
    }
}

impl Recorder for TensorboardRecorder {
    /// Write a given [`Record`] into a TFRecord.
    ///
    /// Only [`RecordValue::Scalar`] values are written. A record without the
    /// step key is skipped.
    fn write(&mut self, record: Record) {
        let step = match record.get(&self.step_key) {
            Some(RecordValue::Scalar(v)) => *v as usize,
            _ => {
                warn!("Record without scalar {:?} was not written", self.step_key);
                return;
            }
        };
        self.write_at(&record, step);
    }
}

impl AggregateRecorder for TensorboardRecorder {
    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        let record = self.storage.aggregate();
        if !record.is_empty() {
            self.write_at(&record, step.max(0) as usize);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use anyhow::Result;
    use tempdir::TempDir;

    fn n_bytes(dir: &Path) -> Result<u64> {
        let mut n = 0;
        for entry in std::fs::read_dir(dir)? {
            n += entry?.metadata()?.len();
        }
        Ok(n)
    }

    // Size of the event file of a recorder that has written nothing
    fn header_bytes() -> Result<u64> {
        let dir = TempDir::new("tensorboard_recorder_empty")?;
        drop(TensorboardRecorder::new(dir.path()));
        n_bytes(dir.path())
    }

    #[test]
    fn test_write_and_flush() -> Result<()> {
        let dir = TempDir::new("tensorboard_recorder")?;
        let mut recorder = TensorboardRecorder::new(dir.path());

        recorder.write(Record::from_slice(&[
            ("episode", RecordValue::Scalar(1.0)),
            ("episode_return", RecordValue::Scalar(12.0)),
        ]));
        recorder.store(Record::from_scalar("episode_return", 10.0));
        recorder.store(Record::from_scalar("episode_return", 20.0));
        recorder.flush(2);

        // Events reach the file from a background thread, joined on drop
        drop(recorder);
        assert!(n_bytes(dir.path())? > header_bytes()?);
        Ok(())
    }

    #[test]
    fn test_record_without_step_key_is_skipped() -> Result<()> {
        let dir = TempDir::new("tensorboard_recorder")?;
        let mut recorder = TensorboardRecorder::new(dir.path());
        recorder.write(Record::from_scalar("episode_return", 12.0));
        recorder.flush(1);

        drop(recorder);
        assert_eq!(n_bytes(dir.path())?, header_bytes()?);
        Ok(())
    }

    #[test]
    #[should_panic]
    fn test_unsupported_value_panics() {
        let dir = TempDir::new("tensorboard_recorder").unwrap();
        let mut recorder = TensorboardRecorder::new_with_check_unsupported_value(dir.path());
        recorder.write(Record::from_slice(&[
            ("episode", RecordValue::Scalar(1.0)),
            ("state", RecordValue::Array1(vec![0.0; 4])),
        ]));
    }
}
