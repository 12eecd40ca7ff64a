//! Submit Rating use case
//!
//! The promotion engine: records one rater's classification of a generation
//! and, once enough distinct raters voted, finalizes or rejects it.
//!
//! ```text
//! finalized? ──yes──▶ merge rating (no promotion logic)
//!     │ no
//!     ▼
//! upsert evaluating (first submitter's text wins)
//!     ▼
//! set rating ──▶ threshold reached? ──no──▶ Recorded
//!                     │ yes
//!                     ▼
//!           consensus has "disliked"? ──yes──▶ Rejected (discard)
//!                     │ no
//!                     ▼
//!                 Finalized
//! ```

use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::snapshot_storage::StorageError;
use crate::store::{GenerationStore, Mutation, StoreError};
use genpool_domain::{
    Classification, ConsensusOutcome, DomainError, Generation, GenerationId, GenerationPools,
    PromotionRule, RaterId, Verdict, preview,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while submitting a rating
#[derive(Error, Debug)]
pub enum SubmitRatingError {
    /// Missing or malformed input; nothing was changed
    #[error("Invalid submission: {0}")]
    Validation(DomainError),

    /// Unknown id and no content to create it from
    #[error("Generation not found: {0}")]
    NotFound(String),

    /// The rating was applied in memory but could not be written
    #[error("Failed to persist rating: {0}")]
    Persistence(#[from] StorageError),

    #[error("Store error: {0}")]
    Store(DomainError),
}

impl SubmitRatingError {
    pub fn is_validation(&self) -> bool {
        matches!(self, SubmitRatingError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SubmitRatingError::NotFound(_))
    }
}

impl From<StoreError> for SubmitRatingError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Domain(DomainError::GenerationNotFound(id)) => Self::NotFound(id),
            StoreError::Domain(e @ DomainError::MissingField(_))
            | StoreError::Domain(e @ DomainError::InvalidField { .. }) => Self::Validation(e),
            StoreError::Domain(e) => Self::Store(e),
            StoreError::Persistence(e) => Self::Persistence(e),
        }
    }
}

/// Unvalidated submission fields, as received by a transport.
///
/// Field names in validation errors follow the wire names: `uuid`,
/// `generation`, `title`, `type`, `classification`, `client_id`.
#[derive(Debug, Clone, Default)]
pub struct RatingRequest {
    pub uuid: Option<String>,
    pub generation: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub classification: Option<String>,
    pub client_id: Option<String>,
}

impl RatingRequest {
    /// Check required fields and parse the classification.
    ///
    /// `uuid`, `client_id` and `classification` are always required. Text,
    /// title and type only matter when the generation has to be created, so
    /// they may all be absent; if only some are present, the first missing
    /// one is reported.
    pub fn validate(self) -> Result<SubmitRatingInput, SubmitRatingError> {
        let id = required("uuid", self.uuid)?;
        let raw_classification = required("classification", self.classification)?;
        let rater = required("client_id", self.client_id)?;

        let classification: Classification = raw_classification.parse().map_err(|reason| {
            SubmitRatingError::Validation(DomainError::InvalidField {
                field: "classification",
                reason,
            })
        })?;

        let text = present(self.generation);
        let subject = present(self.title);
        let category = present(self.category);

        let content = match (text, subject, category) {
            (None, None, None) => None,
            (Some(text), Some(subject), Some(category)) => Some(GenerationContent {
                text,
                subject,
                category,
            }),
            (text, subject, _) => {
                let missing = if text.is_none() {
                    "generation"
                } else if subject.is_none() {
                    "title"
                } else {
                    "type"
                };
                return Err(SubmitRatingError::Validation(DomainError::MissingField(
                    missing,
                )));
            }
        };

        Ok(SubmitRatingInput {
            id: GenerationId::new(id),
            rater: RaterId::new(rater),
            classification,
            content,
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(field: &'static str, value: Option<String>) -> Result<String, SubmitRatingError> {
    present(value).ok_or(SubmitRatingError::Validation(DomainError::MissingField(field)))
}

/// Defining fields of a generation introduced by a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationContent {
    pub text: String,
    pub subject: String,
    pub category: String,
}

/// Validated input for the SubmitRating use case
#[derive(Debug, Clone)]
pub struct SubmitRatingInput {
    pub id: GenerationId,
    pub rater: RaterId,
    pub classification: Classification,
    /// Needed only when `id` is not known yet
    pub content: Option<GenerationContent>,
}

impl SubmitRatingInput {
    /// A rating for a generation that must already exist
    pub fn rating(
        id: impl Into<GenerationId>,
        rater: impl Into<RaterId>,
        classification: Classification,
    ) -> Self {
        Self {
            id: id.into(),
            rater: rater.into(),
            classification,
            content: None,
        }
    }

    /// Supply the content used if the generation has to be created
    pub fn with_content(
        mut self,
        text: impl Into<String>,
        subject: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        self.content = Some(GenerationContent {
            text: text.into(),
            subject: subject.into(),
            category: category.into(),
        });
        self
    }
}

/// What a successful submission did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingOutcome {
    /// Same rater, same classification: nothing changed
    Unchanged,
    /// Rating stored; the generation keeps evaluating
    Recorded { raters: usize },
    /// Rating stored and consensus accepted the generation
    Finalized,
    /// Rating stored and consensus discarded the generation
    Rejected,
    /// Rating added to an already finalized generation
    MergedIntoFinalized,
}

/// Use case for submitting a rating
pub struct SubmitRatingUseCase {
    store: Arc<GenerationStore>,
    rule: PromotionRule,
    activity: Arc<dyn ActivityLogger>,
}

impl SubmitRatingUseCase {
    pub fn new(store: Arc<GenerationStore>, rule: PromotionRule) -> Self {
        Self {
            store,
            rule,
            activity: Arc::new(NoActivityLogger),
        }
    }

    pub fn with_activity_logger(mut self, logger: Arc<dyn ActivityLogger>) -> Self {
        self.activity = logger;
        self
    }

    /// Validate a raw request, then execute it
    pub async fn submit(&self, request: RatingRequest) -> Result<RatingOutcome, SubmitRatingError> {
        self.execute(request.validate()?).await
    }

    /// Execute the use case
    pub async fn execute(
        &self,
        input: SubmitRatingInput,
    ) -> Result<RatingOutcome, SubmitRatingError> {
        let rule = self.rule;
        let (outcome, events) = self
            .store
            .mutate(|pools| apply_rating(pools, &input, &rule))
            .await?;

        for event in events {
            self.activity.log(event);
        }

        debug!(
            "Rating {} by {} on {}: {:?}",
            input.classification, input.rater, input.id, outcome
        );
        Ok(outcome)
    }

    /// Judge every evaluating generation that already has enough raters.
    ///
    /// Such records appear when a snapshot was written under a higher
    /// threshold. Returns how many left the evaluating pool; the pools are
    /// persisted once.
    pub async fn reconcile(&self) -> Result<usize, SubmitRatingError> {
        let rule = self.rule;
        let events = self
            .store
            .mutate(|pools| {
                let due: Vec<GenerationId> = pools
                    .evaluating()
                    .filter(|g| rule.is_reached(g.ratings().len()))
                    .map(|g| g.id().clone())
                    .collect();

                let mut events = Vec::new();
                for id in &due {
                    let verdict = match pools.get(id) {
                        Some(generation) => Verdict::evaluate(generation.ratings(), &rule),
                        None => continue,
                    };
                    if let Some((_, event)) = settle(pools, id, &verdict)? {
                        events.push(event);
                    }
                }

                Ok(if events.is_empty() {
                    Mutation::unchanged(events)
                } else {
                    Mutation::changed(events)
                })
            })
            .await?;

        let settled = events.len();
        for event in events {
            self.activity.log(event);
        }
        if settled > 0 {
            info!("Settled {} generations already past the threshold", settled);
        }
        Ok(settled)
    }
}

type Applied = (RatingOutcome, Vec<ActivityEvent>);

/// Apply one rating to the pools; runs under the store's write guard.
fn apply_rating(
    pools: &mut GenerationPools,
    input: &SubmitRatingInput,
    rule: &PromotionRule,
) -> Result<Mutation<Applied>, DomainError> {
    let id = &input.id;

    if pools.is_finalized(id) {
        let change =
            pools.merge_rating_into_finalized(id, input.rater.clone(), input.classification)?;
        return Ok(if change.is_unchanged() {
            Mutation::unchanged((RatingOutcome::Unchanged, Vec::new()))
        } else {
            Mutation::changed((RatingOutcome::MergedIntoFinalized, Vec::new()))
        });
    }

    let mut events = Vec::new();
    let (generation, created) = pools.upsert_evaluating(id, |id| build_generation(id, input))?;
    if created {
        info!(
            "New generation {} for {}/{}: {}",
            id,
            generation.subject(),
            generation.category(),
            preview(generation.text(), 60)
        );
        events.push(ActivityEvent::submitted(generation));
    }

    let change = generation.rate(input.rater.clone(), input.classification);
    let verdict = Verdict::evaluate(generation.ratings(), rule);

    // A repeated rating still settles a record that is already past the threshold
    match settle(pools, id, &verdict)? {
        Some((outcome, event)) => {
            events.push(event);
            Ok(Mutation::changed((outcome, events)))
        }
        None if change.is_unchanged() && !created => {
            Ok(Mutation::unchanged((RatingOutcome::Unchanged, events)))
        }
        None => Ok(Mutation::changed((
            RatingOutcome::Recorded {
                raters: verdict.raters,
            },
            events,
        ))),
    }
}

/// Finalize or discard `id` according to `verdict`; `None` while pending.
fn settle(
    pools: &mut GenerationPools,
    id: &GenerationId,
    verdict: &Verdict,
) -> Result<Option<(RatingOutcome, ActivityEvent)>, DomainError> {
    match verdict.outcome {
        ConsensusOutcome::Pending => Ok(None),
        ConsensusOutcome::Approved => {
            let finalized = pools.move_to_finalized(id)?;
            info!("Generation {} finalized ({})", id, verdict.vote_summary());
            Ok(Some((
                RatingOutcome::Finalized,
                ActivityEvent::finalized(finalized, verdict),
            )))
        }
        ConsensusOutcome::Rejected => {
            let rejected = pools.discard(id)?;
            info!("Generation {} rejected ({})", id, verdict.vote_summary());
            Ok(Some((
                RatingOutcome::Rejected,
                ActivityEvent::rejected(&rejected, verdict),
            )))
        }
    }
}

fn build_generation(id: &GenerationId, input: &SubmitRatingInput) -> Result<Generation, DomainError> {
    let content = input
        .content
        .as_ref()
        .ok_or_else(|| DomainError::GenerationNotFound(id.to_string()))?;

    Ok(Generation::new(
        id.clone(),
        content.text.clone(),
        content.subject.clone(),
        content.category.clone(),
    )
    .with_submitter(input.rater.clone()))
}
