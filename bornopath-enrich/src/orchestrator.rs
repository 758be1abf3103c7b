//! Bounded-concurrency enrichment of many words
//!
//! Each word becomes one task on a fixed-width pool. Tasks share nothing but the
//! translation cache and the known-word set; their outcomes are collected as they
//! finish and merged through a deduplication guard, so two words that normalize
//! to the same headword still yield a single record.

use crate::cache::TranslationCache;
use crate::config::EnrichConfig;
use crate::interrupt::Interrupt;
use crate::policy::{AcceptancePolicy, Rejection, Resolution};
use crate::source::SourceSet;
use bornopath::{CandidateGenerator, EnrichedRecord, KnownWords};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Outcome of one enrichment run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Accepted records, in completion order, unique by lowercase headword
    pub records: Vec<EnrichedRecord>,
    /// Number of words rejected, per reason
    pub rejected: BTreeMap<Rejection, usize>,
    /// Accepted records dropped because their headword was already taken
    pub duplicates: usize,
    /// Tasks that panicked or were aborted
    pub failed_tasks: usize,
}

impl EnrichReport {
    pub fn accepted(&self) -> usize {
        self.records.len()
    }

    pub fn rejected_for(&self, reason: Rejection) -> usize {
        self.rejected.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_rejected(&self) -> usize {
        self.rejected.values().sum()
    }

    pub fn into_records(self) -> Vec<EnrichedRecord> {
        self.records
    }
}

/// First-writer-wins merge of accepted records
#[derive(Debug)]
struct DedupGuard<'a> {
    seen: HashSet<String>,
    known: &'a KnownWords,
}

impl<'a> DedupGuard<'a> {
    fn new(known: &'a KnownWords) -> Self {
        Self {
            seen: HashSet::new(),
            known,
        }
    }

    fn admit(&mut self, record: &EnrichedRecord) -> bool {
        let key = record.key();
        !self.known.contains(&key) && self.seen.insert(key)
    }
}

/// Runs the acceptance policy over many words in parallel
#[derive(Debug, Clone)]
pub struct Enricher {
    policy: Arc<AcceptancePolicy>,
    workers: usize,
}

impl Enricher {
    pub fn new(sources: SourceSet, config: &EnrichConfig) -> Self {
        Self {
            policy: Arc::new(AcceptancePolicy::new(sources, config.call_timeout)),
            workers: config.workers.max(1),
        }
    }

    pub fn with_generator(self, generator: CandidateGenerator) -> Self {
        self.map_policy(|policy| policy.with_generator(generator))
    }

    pub fn with_interrupt(self, interrupt: Interrupt) -> Self {
        self.map_policy(|policy| policy.with_interrupt(interrupt))
    }

    pub fn with_cache(self, cache: TranslationCache) -> Self {
        self.map_policy(|policy| policy.with_cache(cache))
    }

    fn map_policy(mut self, f: impl FnOnce(AcceptancePolicy) -> AcceptancePolicy) -> Self {
        let policy = Arc::unwrap_or_clone(self.policy);
        self.policy = Arc::new(f(policy));
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Handle that stops the run from issuing further lookups
    pub fn interrupt(&self) -> Interrupt {
        self.policy.interrupt().clone()
    }

    pub fn cache(&self) -> TranslationCache {
        self.policy.cache().clone()
    }

    /// Enrich `words`, at most `workers` at a time
    ///
    /// Words already in `known` cost no lookups. The returned records never
    /// contain a word in `known` and never contain the same headword twice.
    pub async fn enrich<I, S>(&self, words: I, known: &KnownWords) -> EnrichReport
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let permits = Arc::new(Semaphore::new(self.workers));
        let mut tasks = JoinSet::new();

        for word in words {
            let word: String = word.into();
            let policy = Arc::clone(&self.policy);
            let permits = Arc::clone(&permits);
            let known = known.clone();
            tasks.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return Resolution::Rejected(Rejection::Interrupted);
                };
                if policy.interrupt().is_triggered() {
                    return Resolution::Rejected(Rejection::Interrupted);
                }
                policy.resolve(&word, &known).await
            });
        }

        let total = tasks.len();
        tracing::info!(
            "Fetching details for {} words with {} workers",
            total,
            self.workers
        );

        let mut report = EnrichReport::default();
        let mut guard = DedupGuard::new(known);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Resolution::Accepted(record)) => {
                    if guard.admit(&record) {
                        report.records.push(record);
                    } else {
                        tracing::debug!("Dropping duplicate record for '{}'", record.en);
                        report.duplicates += 1;
                    }
                }
                Ok(Resolution::Rejected(reason)) => {
                    *report.rejected.entry(reason).or_default() += 1;
                }
                Err(e) => {
                    tracing::warn!("Enrichment task failed: {}", e);
                    report.failed_tasks += 1;
                }
            }
        }

        tracing::info!(
            "Detailed meanings fetched for {} of {} words",
            report.accepted(),
            total
        );
        report
    }
}
