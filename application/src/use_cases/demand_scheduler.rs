//! Demand Scheduler use case
//!
//! Keeps every (subject, category) pair of the prompt catalog stocked with
//! enough evaluating generations for raters to work on.
//!
//! Each iteration:
//!
//! 1. Read the evaluating count of every pair (fresh read, no lock held after)
//! 2. For each pair short of the target, pick one of its prompts at random
//! 3. Ask the generator for up to `requests_per_pair` texts
//! 4. Strip echoed tags and insert the results as new evaluating records
//!
//! A failing pair is logged and skipped until the next iteration.

use crate::config::SchedulerParams;
use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::text_generator::{GeneratorError, TextGenerator};
use crate::store::{GenerationStore, StoreError};
use genpool_domain::{
    Deficit, Generation, GenerationId, PairKey, PromptCatalog, compute_deficits,
    strip_echoed_tags,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Why a pair was skipped in one iteration
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Generator failed: {0}")]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No prompt available for {0}")]
    NoPrompt(PairKey),
}

/// Summary of one iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IterationReport {
    /// Pairs below the target at the start of the iteration
    pub pairs_short: usize,
    /// Generator calls made
    pub requests: usize,
    /// Evaluating records added
    pub created: usize,
    /// Pairs skipped because of an error
    pub failures: usize,
}

/// Use case for the background generation loop
pub struct DemandSchedulerUseCase<G: TextGenerator + 'static> {
    store: Arc<GenerationStore>,
    generator: Arc<G>,
    catalog: PromptCatalog,
    params: SchedulerParams,
    rng: Mutex<StdRng>,
    activity: Arc<dyn ActivityLogger>,
}

impl<G: TextGenerator + 'static> DemandSchedulerUseCase<G> {
    pub fn new(
        store: Arc<GenerationStore>,
        generator: Arc<G>,
        catalog: PromptCatalog,
        params: SchedulerParams,
    ) -> Self {
        Self {
            store,
            generator,
            catalog,
            params,
            rng: Mutex::new(StdRng::from_entropy()),
            activity: Arc::new(NoActivityLogger),
        }
    }

    /// Make prompt selection reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_activity_logger(mut self, logger: Arc<dyn ActivityLogger>) -> Self {
        self.activity = logger;
        self
    }

    pub fn params(&self) -> &SchedulerParams {
        &self.params
    }

    /// Run iterations on a fixed cadence until `cancel` fires.
    ///
    /// The first iteration starts immediately. An iteration in progress is
    /// allowed to finish; cancellation is observed between iterations.
    pub async fn run(&self, cancel: CancellationToken) {
        let period = self.params.interval.max(Duration::from_millis(1));
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Demand scheduler started: {} pairs, target {} per pair, every {:?}",
            self.catalog.pair_count(),
            self.params.target_pool_size,
            period
        );

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let report = self.run_iteration().await;
            if report.requests > 0 {
                info!(
                    "Scheduler iteration: {} pairs short, {} created, {} failed",
                    report.pairs_short, report.created, report.failures
                );
            } else {
                debug!("Scheduler iteration: all pairs stocked");
            }
        }

        info!("Demand scheduler stopped");
    }

    /// Run a single iteration over every catalog pair
    pub async fn run_iteration(&self) -> IterationReport {
        let counts = self.store.evaluating_counts().await;
        let deficits = compute_deficits(&self.catalog, &counts, self.params.target_pool_size);

        let mut report = IterationReport {
            pairs_short: deficits.len(),
            ..Default::default()
        };

        for deficit in &deficits {
            match self.fill(deficit, &mut report).await {
                Ok(created) => report.created += created,
                Err(e) => {
                    report.failures += 1;
                    warn!("Skipping {} this round: {}", deficit.pair, e);
                }
            }
        }

        report
    }

    async fn fill(
        &self,
        deficit: &Deficit,
        report: &mut IterationReport,
    ) -> Result<usize, SchedulerError> {
        let pair = &deficit.pair;
        let prompt = self.pick_prompt(pair)?;
        let amount = deficit.request_amount(self.params.requests_per_pair);

        debug!(
            "Requesting {} for {} ({} of {} evaluating)",
            amount, pair, deficit.current, self.params.target_pool_size
        );
        report.requests += 1;
        let texts = self.generate(&prompt, amount).await?;

        let generations: Vec<Generation> = texts
            .iter()
            .map(|text| strip_echoed_tags(text))
            .filter(|text| !text.is_empty())
            .take(deficit.missing)
            .map(|text| {
                Generation::new(
                    GenerationId::generate(),
                    text,
                    pair.subject.clone(),
                    pair.category.clone(),
                )
            })
            .collect();

        if generations.is_empty() {
            warn!("Generator returned no usable text for {}", pair);
            return Ok(0);
        }

        let events: Vec<ActivityEvent> = generations
            .iter()
            .map(|g| ActivityEvent::created(g, &prompt))
            .collect();

        let inserted = self.store.insert_evaluating(generations).await?;
        for event in events {
            self.activity.log(event);
        }

        Ok(inserted)
    }

    fn pick_prompt(&self, pair: &PairKey) -> Result<String, SchedulerError> {
        let prompts = self.catalog.prompts(&pair.subject, &pair.category);
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        prompts
            .choose(&mut *rng)
            .map(|template| template.render(&pair.subject, &pair.category))
            .ok_or_else(|| SchedulerError::NoPrompt(pair.clone()))
    }

    async fn generate(&self, prompt: &str, amount: usize) -> Result<Vec<String>, GeneratorError> {
        let timeout = self.params.generator_timeout;
        tokio::time::timeout(timeout, self.generator.generate(prompt, amount))
            .await
            .map_err(|_| GeneratorError::Timeout(timeout.as_secs()))?
    }
}
