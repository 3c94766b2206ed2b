//! Cached portrait generation.
//!
//! # Invariants
//! - A cached portrait is returned as-is; the generator is not called.
//! - A cache write failure does not discard a generated portrait.

use super::ServiceError;
use crate::llm::TextGenerator;
use crate::numerology;
use crate::report::build_report_structure;
use crate::repo::{ReportCacheRepository, ReportKey};
use log::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portrait {
    pub text: String,
    pub from_cache: bool,
}

pub struct PortraitService<R: ReportCacheRepository, G: TextGenerator> {
    cache: R,
    generator: G,
}

impl<R: ReportCacheRepository, G: TextGenerator> PortraitService<R, G> {
    pub fn new(cache: R, generator: G) -> Self {
        Self { cache, generator }
    }

    /// Returns the portrait for `key`, generating and caching it on a miss.
    ///
    /// # Errors
    /// - `Repo` when the cache lookup fails.
    pub fn portrait(&self, key: &ReportKey) -> Result<Portrait, ServiceError> {
        if let Some(text) = self.cache.get_report(key)? {
            info!(
                "event=portrait module=service status=ok source=cache mode={}",
                key.mode
            );
            return Ok(Portrait {
                text,
                from_cache: true,
            });
        }

        let profile = numerology::calculate(&key.date);
        let structure = build_report_structure(&profile, key.mode);
        let text = self.generator.generate(&structure, key.mode);

        if let Err(err) = self.cache.save_report(key, &text) {
            warn!(
                "event=portrait module=service status=cache_write_failed mode={} error={}",
                key.mode, err
            );
        }
        info!(
            "event=portrait module=service status=ok source={} mode={} lines={}",
            self.generator.provider().as_str(),
            key.mode,
            structure.len()
        );
        Ok(Portrait {
            text,
            from_cache: false,
        })
    }
}
