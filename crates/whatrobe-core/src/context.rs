//! Execution Context: per-request state carried through the pipeline
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct ExecutionContext {
    /// Opaque owner of the inventory (from `X-User-ID`).
    pub user_id: String,
    pub trace_id: String,
    /// When set, shuffles and generated ids are reproducible.
    pub determinism_seed: Option<u64>,
    rng: StdRng,
}

impl ExecutionContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            trace_id: uuid::Uuid::new_v4().to_string(),
            determinism_seed: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.determinism_seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Seed only when one is provided; entropy otherwise.
    pub fn with_optional_seed(self, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => self.with_seed(seed),
            None => self,
        }
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Fresh candidate id drawn from the context generator.
    pub fn next_id(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.gen();
        uuid::Builder::from_random_bytes(bytes).into_uuid().to_string()
    }
}
