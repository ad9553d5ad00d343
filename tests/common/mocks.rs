use async_trait::async_trait;
use medpredict_client::{
    Error, Result,
    client::PredictionClient,
    form::FormPayload,
    page::{MemoryStatusRegion, RegionSnapshot},
};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// Mock prediction client that replays canned bodies and records what the
/// status region looked like while each request was in flight.
#[derive(Debug)]
pub struct RecordingPredictionClient {
    pub responses: Arc<Mutex<VecDeque<Result<Value>>>>,
    pub requests: Arc<Mutex<Vec<(String, FormPayload)>>>,
    pub in_flight: Arc<Mutex<Vec<RegionSnapshot>>>,
    region: Option<Arc<MemoryStatusRegion>>,
}

impl RecordingPredictionClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(Mutex::new(Vec::new())),
            region: None,
        }
    }

    pub fn with_response(self, body: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body));
        self
    }

    pub fn with_error(self, error: Error) -> Self {
        self.responses.lock().unwrap().push_back(Err(error));
        self
    }

    /// Snapshot this region on every call.
    pub fn observing(mut self, region: Arc<MemoryStatusRegion>) -> Self {
        self.region = Some(region);
        self
    }

    pub fn get_requests(&self) -> Vec<(String, FormPayload)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn in_flight_snapshots(&self) -> Vec<RegionSnapshot> {
        self.in_flight.lock().unwrap().clone()
    }
}

impl Default for RecordingPredictionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PredictionClient for RecordingPredictionClient {
    async fn predict(&self, endpoint: &str, payload: FormPayload) -> Result<Value> {
        self.requests
            .lock()
            .unwrap()
            .push((endpoint.to_string(), payload));

        if let Some(region) = &self.region {
            self.in_flight.lock().unwrap().push(region.snapshot());
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::config("No more mock responses available")))
    }
}

/// Client whose calls stay pending until the test releases them, one gate
/// per call in call order.
pub struct GatedPredictionClient {
    gates: Mutex<VecDeque<oneshot::Receiver<Value>>>,
    calls: Mutex<usize>,
}

impl GatedPredictionClient {
    pub fn new(count: usize) -> (Self, Vec<oneshot::Sender<Value>>) {
        let mut senders = Vec::with_capacity(count);
        let mut receivers = VecDeque::with_capacity(count);
        for _ in 0..count {
            let (tx, rx) = oneshot::channel();
            senders.push(tx);
            receivers.push_back(rx);
        }

        let client = Self {
            gates: Mutex::new(receivers),
            calls: Mutex::new(0),
        };
        (client, senders)
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl PredictionClient for GatedPredictionClient {
    async fn predict(&self, _endpoint: &str, _payload: FormPayload) -> Result<Value> {
        let gate = {
            *self.calls.lock().unwrap() += 1;
            self.gates.lock().unwrap().pop_front()
        };

        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| Error::config("gate dropped before release")),
            None => Err(Error::config("No gate left for this call")),
        }
    }
}
