//! Prometheus metrics for the recommend endpoint.
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::time::Duration;
use whatrobe_core::{RecommendStatus, Recommendation};

pub struct ApiMetrics {
    registry: Registry,
    recommend_total: IntCounterVec,
    stage_candidates: IntCounterVec,
    stage_failures: IntCounterVec,
    recommend_seconds: Histogram,
}

impl ApiMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let recommend_total = IntCounterVec::new(
            Opts::new("whatrobe_recommend_total", "Recommend runs by result status"),
            &["status"],
        )?;
        let stage_candidates = IntCounterVec::new(
            Opts::new("whatrobe_stage_candidates_total", "Outfits accepted into the pool, by stage"),
            &["stage"],
        )?;
        let stage_failures = IntCounterVec::new(
            Opts::new("whatrobe_stage_failures_total", "Stage runs that ended in a recovered error"),
            &["stage"],
        )?;
        let recommend_seconds = Histogram::with_opts(
            HistogramOpts::new("whatrobe_recommend_seconds", "Recommend run latency")
                .buckets(vec![0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0]),
        )?;

        registry.register(Box::new(recommend_total.clone()))?;
        registry.register(Box::new(stage_candidates.clone()))?;
        registry.register(Box::new(stage_failures.clone()))?;
        registry.register(Box::new(recommend_seconds.clone()))?;

        Ok(Self {
            registry,
            recommend_total,
            stage_candidates,
            stage_failures,
            recommend_seconds,
        })
    }

    pub fn observe(&self, recommendation: &Recommendation, elapsed: Duration) {
        self.recommend_total
            .with_label_values(&[status_label(recommendation.status)])
            .inc();
        self.recommend_seconds.observe(elapsed.as_secs_f64());

        for stage in &recommendation.proof.stages {
            self.stage_candidates
                .with_label_values(&[stage.id.as_str()])
                .inc_by(stage.accepted as u64);
            if stage.error.is_some() {
                self.stage_failures.with_label_values(&[stage.id.as_str()]).inc();
            }
        }
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

fn status_label(status: RecommendStatus) -> &'static str {
    match status {
        RecommendStatus::Ok => "ok",
        RecommendStatus::InsufficientInventory => "insufficient_inventory",
        RecommendStatus::NoCandidates => "no_candidates",
    }
}
