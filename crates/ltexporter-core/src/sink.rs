// Sample output
//
// The sink is the producer half of a bounded channel owned by the caller.
// A full channel makes `emit` wait, which is the only backpressure the
// pipeline has; nothing is buffered on the producer side.

use tokio::sync::mpsc;

use crate::error::CoreError;
use crate::sample::MetricSample;

#[derive(Debug, Clone)]
pub struct MetricSink {
    tx: mpsc::Sender<MetricSample>,
}

impl MetricSink {
    pub fn new(tx: mpsc::Sender<MetricSample>) -> Self {
        Self { tx }
    }

    /// A sink plus the receiver the caller drains. Capacity is at least 1.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<MetricSample>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self::new(tx), rx)
    }

    /// Hand one sample to the consumer, waiting while the channel is full.
    pub async fn emit(&self, sample: MetricSample) -> Result<(), CoreError> {
        self.tx
            .send(sample)
            .await
            .map_err(|_| CoreError::SinkClosed)
    }
}
