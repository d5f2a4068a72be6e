/* Per-subject memoization of generation results */

use crate::codegen::{self, GenerationOutput};
use crate::config::GeneratorOptions;
use crate::model::SubjectModel;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tracing::{trace, warn};

/// Memoizes [`GenerationOutput`] by a structural hash of the model and options.
///
/// Generation is a pure function of those two inputs, so a hit returns
/// exactly the text a fresh run would produce.
#[derive(Debug, Default)]
pub struct ProxyCache {
    entries: HashMap<String, GenerationOutput>,
    hits: usize,
    misses: usize,
}

impl ProxyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /* SHA256 over the canonical JSON of (model, options) */
    pub fn cache_key(model: &SubjectModel, options: &GeneratorOptions) -> Result<String, serde_json::Error> {
        let canonical = serde_json::to_vec(&(model, options))?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        let result = hasher.finalize();
        Ok(hex::encode(&result))
    }

    pub fn get_or_generate(&mut self, model: &SubjectModel, options: &GeneratorOptions) -> GenerationOutput {
        let key = match Self::cache_key(model, options) {
            Ok(key) => key,
            Err(err) => {
                warn!(subject = %model.subject.reference, error = %err, "cannot hash model, generating uncached");
                self.misses += 1;
                return codegen::generate(model, options);
            }
        };

        if let Some(output) = self.entries.get(&key) {
            trace!(subject = %model.subject.reference, key = %key, "cache hit");
            self.hits += 1;
            return output.clone();
        }

        trace!(subject = %model.subject.reference, key = %key, "cache miss");
        self.misses += 1;
        let output = codegen::generate(model, options);
        self.entries.insert(key, output.clone());
        output
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/* Simple hex encoding */
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }
}
