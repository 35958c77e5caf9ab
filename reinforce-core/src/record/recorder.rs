use super::Record;

/// Writes a record to an output destination with [`Recorder::write`].
pub trait Recorder {
    /// Write a record to the [`Recorder`].
    fn write(&mut self, record: Record);
}

/// Stores records and writes values aggregated over them on [`AggregateRecorder::flush`].
///
/// [`Trainer`](crate::Trainer) stores a record per episode and flushes
/// every `flush_record_interval` episodes.
pub trait AggregateRecorder {
    /// Store the record.
    fn store(&mut self, record: Record);

    /// Writes values aggregated from the stored records.
    ///
    /// `step` is the number of episodes done so far.
    fn flush(&mut self, step: i64);
}
