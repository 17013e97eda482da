//! Lookup counters exposed on `/metrics`.
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    lookups: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let lookups = IntCounterVec::new(
            Opts::new("shiptrack_lookups_total", "Tracking lookups by outcome"),
            &["route", "outcome"],
        )?;
        registry.register(Box::new(lookups.clone()))?;
        Ok(Self { registry, lookups })
    }

    pub fn record(&self, route: &str, outcome: &str) {
        self.lookups.with_label_values(&[route, outcome]).inc();
    }

    pub fn count(&self, route: &str, outcome: &str) -> u64 {
        self.lookups.with_label_values(&[route, outcome]).get()
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}
