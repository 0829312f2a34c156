use crate::cache::{profile_key, ItineraryLibrary};
use crate::catalog::Catalog;
use crate::error::{AppError, Result};
use crate::models::{
    Itinerary, ItinerarySource, PlanRequest, PlanResponse, PlannedItinerary, QuizAnswers,
    RankedDestinationSummary,
};
use crate::services::gemini::GeminiClient;
use crate::services::rule_based::RuleBasedGenerator;
use crate::services::scoring::{rank_destinations, ScoredDestination};
use async_trait::async_trait;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

/// One tier of the fallback chain. `None` hands over to the next tier.
#[async_trait]
pub trait ItineraryProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn source(&self) -> ItinerarySource;

    async fn provide<'a>(
        &self,
        answers: &QuizAnswers,
        shortlist: &[ScoredDestination<'a>],
    ) -> Option<Itinerary>;
}

/// Prompt, call the generative service, validate the answer.
pub struct GenerativeProvider {
    client: GeminiClient,
    catalog: Arc<Catalog>,
}

impl GenerativeProvider {
    pub fn new(client: GeminiClient, catalog: Arc<Catalog>) -> Self {
        Self { client, catalog }
    }
}

#[async_trait]
impl ItineraryProvider for GenerativeProvider {
    fn name(&self) -> &'static str {
        "generative"
    }

    fn source(&self) -> ItinerarySource {
        ItinerarySource::Generative
    }

    async fn provide<'a>(
        &self,
        answers: &QuizAnswers,
        shortlist: &[ScoredDestination<'a>],
    ) -> Option<Itinerary> {
        self.client.generate(answers, shortlist, &self.catalog).await
    }
}

/// Exact-key lookup in the precomputed itinerary library.
pub struct CachedProvider {
    library: Arc<ItineraryLibrary>,
}

impl CachedProvider {
    pub fn new(library: Arc<ItineraryLibrary>) -> Self {
        Self { library }
    }
}

#[async_trait]
impl ItineraryProvider for CachedProvider {
    fn name(&self) -> &'static str {
        "cached"
    }

    fn source(&self) -> ItinerarySource {
        ItinerarySource::Cached
    }

    async fn provide<'a>(
        &self,
        answers: &QuizAnswers,
        _shortlist: &[ScoredDestination<'a>],
    ) -> Option<Itinerary> {
        self.library.lookup(&profile_key(answers))
    }
}

/// Validates a request, ranks the catalog, and walks the provider chain.
/// The rule-based generator terminates the chain and always succeeds.
pub struct Planner {
    catalog: Arc<Catalog>,
    providers: Vec<Arc<dyn ItineraryProvider>>,
    fallback: RuleBasedGenerator,
    rank_limit: usize,
}

impl Planner {
    pub fn new(
        catalog: Arc<Catalog>,
        providers: Vec<Arc<dyn ItineraryProvider>>,
        rank_limit: usize,
    ) -> Self {
        Planner {
            catalog,
            providers,
            fallback: RuleBasedGenerator::new(),
            rank_limit: rank_limit.max(1),
        }
    }

    /// Generative tier first, then the itinerary library.
    pub fn with_default_chain(
        catalog: Arc<Catalog>,
        client: GeminiClient,
        library: Arc<ItineraryLibrary>,
        rank_limit: usize,
    ) -> Self {
        let providers: Vec<Arc<dyn ItineraryProvider>> = vec![
            Arc::new(GenerativeProvider::new(client, catalog.clone())),
            Arc::new(CachedProvider::new(library)),
        ];
        Self::new(catalog, providers, rank_limit)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Plan from a raw request body. Malformed input is rejected before any
    /// scoring happens.
    pub async fn plan(&self, body: &[u8]) -> Result<PlanResponse> {
        let request = PlanRequest::from_slice(body).map_err(AppError::InvalidRequest)?;
        self.plan_request(&request).await
    }

    pub async fn plan_request(&self, request: &PlanRequest) -> Result<PlanResponse> {
        let answers = &request.answers;
        let shortlist = rank_destinations(
            self.catalog.destinations(),
            answers,
            self.rank_limit,
            request.normalized_query(),
        );

        let (itinerary, source) = self.run_chain(answers, &shortlist).await;

        tracing::info!(
            source = %source,
            profile = %answers.profile_tag(),
            days = itinerary.days.len(),
            "Planned {}-day itinerary via {} tier",
            itinerary.days.len(),
            source
        );

        let generated_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| AppError::Internal(format!("Failed to format timestamp: {}", e)))?;

        Ok(PlanResponse {
            itinerary: PlannedItinerary {
                id: format!("trip-{}", Uuid::new_v4()),
                itinerary,
                generated_at,
                profile_used: answers.profile_tag(),
            },
            ranked_destinations: shortlist
                .iter()
                .map(|s| RankedDestinationSummary {
                    id: s.destination.id.clone(),
                    name: s.destination.name.clone(),
                    score: s.display_score(),
                })
                .collect(),
            source,
        })
    }

    async fn run_chain(
        &self,
        answers: &QuizAnswers,
        shortlist: &[ScoredDestination<'_>],
    ) -> (Itinerary, ItinerarySource) {
        for provider in &self.providers {
            if let Some(itinerary) = provider.provide(answers, shortlist).await {
                return (itinerary, provider.source());
            }
            tracing::info!(
                tier = provider.name(),
                "{} tier produced no itinerary, falling back",
                provider.name()
            );
        }

        (
            self.fallback.build(shortlist, answers),
            ItinerarySource::RuleBased,
        )
    }
}
