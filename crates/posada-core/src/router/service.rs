//! Tiered message resolution.
//!
//! `MessageRouter` coordinates every collaborator: cache, conversation
//! context, room catalog, scripts, training corpus, and the generation
//! provider. Generic over the port traits so posada-core never depends on
//! posada-infra.

use posada_types::booking::BookingQuery;
use posada_types::config::EngineConfig;
use posada_types::error::QuoteError;
use posada_types::llm::{ChatMessage, GenerationRequest};
use posada_types::response::{ResponseSource, RouteResponse};
use posada_types::training::HotelFacts;
use tracing::{debug, info, warn};

use crate::intent::{
    MessageClass, classify_message, extract_dates, extract_guests, extract_room_type,
};
use crate::llm::BoxGenerationProvider;
use crate::quote::QuoteEngine;
use crate::repository::{CatalogStore, ScriptStore, TrainingStore};

use super::cache::ResponseCache;
use super::context::ConversationStore;
use super::corpus::best_corpus_answer;
use super::prompt::GenerationPromptBuilder;
use super::scripts::best_script_match;

/// Apology of last resort, used when even the fallback script is missing.
const TECHNICAL_APOLOGY: &str = "Disculpe, en este momento tenemos inconvenientes técnicos. \
     Por favor intente nuevamente en unos minutos.";

const ASK_DATES_AND_GUESTS: &str =
    "Con gusto le preparo una cotización. ¿Para qué fechas desea hospedarse y cuántas personas serían?";
const ASK_DATES: &str =
    "¿Para qué fechas desea hospedarse? Por ejemplo: del 10 al 12 de marzo.";
const ASK_GUESTS: &str = "¿Para cuántas personas sería la reserva?";

/// Resolves inbound messages through the tier chain: cache, booking
/// pipeline, script match, trained Q&A, generation fallback.
///
/// `resolve_message` is infallible: store and provider failures are logged
/// and degrade to the next tier or the fallback chain, never to the caller.
pub struct MessageRouter<Cat, Scr, Trn, Cache, Ctx>
where
    Cat: CatalogStore,
    Scr: ScriptStore,
    Trn: TrainingStore,
    Cache: ResponseCache,
    Ctx: ConversationStore,
{
    catalog: Cat,
    scripts: Scr,
    training: Trn,
    cache: Cache,
    contexts: Ctx,
    provider: BoxGenerationProvider,
    quote_engine: QuoteEngine,
    config: EngineConfig,
}

impl<Cat, Scr, Trn, Cache, Ctx> MessageRouter<Cat, Scr, Trn, Cache, Ctx>
where
    Cat: CatalogStore,
    Scr: ScriptStore,
    Trn: TrainingStore,
    Cache: ResponseCache,
    Ctx: ConversationStore,
{
    pub fn new(
        catalog: Cat,
        scripts: Scr,
        training: Trn,
        cache: Cache,
        contexts: Ctx,
        provider: BoxGenerationProvider,
        config: EngineConfig,
    ) -> Self {
        let quote_engine = QuoteEngine::new(config.calendar.clone(), config.pricing.clone());
        Self {
            catalog,
            scripts,
            training,
            cache,
            contexts,
            provider,
            quote_engine,
            config,
        }
    }

    /// Access the response cache.
    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Access the conversation store.
    pub fn contexts(&self) -> &Ctx {
        &self.contexts
    }

    /// Resolve one inbound message to a terminal response.
    ///
    /// Successful responses are recorded into the session context and the
    /// cache; degraded responses (fallback script, static apology) are
    /// returned as-is so a recovered provider is retried on the next turn.
    pub async fn resolve_message(&self, session_id: &str, message: &str) -> RouteResponse {
        let cache_key = format!("{session_id}:{message}");
        if let Some(hit) = self.cache.get(&cache_key) {
            debug!(session_id, source = %hit.source, "cache hit");
            return hit;
        }

        let dates = extract_dates(message);
        let guests = extract_guests(message);
        let wants_booking = dates.is_some()
            || !guests.is_empty()
            || classify_message(message) == MessageClass::PriceInquiry;

        let response = if wants_booking {
            self.booking_pipeline(session_id, message, dates, guests)
                .await
        } else {
            self.conversational_tiers(session_id, message).await
        };

        if response.success {
            self.contexts
                .record_exchange(session_id, message, &response.response);
            self.cache.put(cache_key, response.clone());
        }
        response
    }

    /// Price a complete booking query directly, bypassing the tier chain.
    pub async fn quote_query(&self, query: &BookingQuery) -> Result<String, QuoteError> {
        let rooms = self.catalog.list_rooms().await?;
        self.quote_engine.quote_query(query, &rooms)
    }

    /// Merge this turn's extractions into the session's pending query, then
    /// either ask for what is still missing or produce the quote.
    async fn booking_pipeline(
        &self,
        session_id: &str,
        message: &str,
        dates: Option<posada_types::booking::DateRange>,
        guests: Vec<posada_types::booking::Guest>,
    ) -> RouteResponse {
        let mut pending = self.contexts.pending_query(session_id);
        pending.merge(BookingQuery {
            dates,
            guests,
            room_type: extract_room_type(message),
            raw_message: Some(message.to_string()),
        });
        self.contexts.store_pending(session_id, pending.clone());

        if !pending.is_complete() {
            debug!(session_id, "booking query incomplete, asking follow-up");
            let question = match (pending.dates.is_none(), pending.guests.is_empty()) {
                (true, true) => ASK_DATES_AND_GUESTS,
                (true, false) => ASK_DATES,
                (false, _) => ASK_GUESTS,
            };
            return RouteResponse::ok(question, ResponseSource::Ai);
        }

        let rooms = match self.catalog.list_rooms().await {
            Ok(rooms) => rooms,
            Err(err) => {
                warn!(error = %err, "room catalog unavailable");
                return self.error_fallback().await;
            }
        };

        match self.quote_engine.quote_query(&pending, &rooms) {
            Ok(text) => {
                info!(session_id, "quote generated");
                RouteResponse::ok(text, ResponseSource::Ai)
            }
            Err(QuoteError::NoRoomsAvailable { guests }) => RouteResponse::ok(
                format!(
                    "Por el momento no contamos con habitaciones disponibles para {guests} \
                     personas en esas fechas. ¿Desea consultar otras fechas?"
                ),
                ResponseSource::Ai,
            ),
            Err(err) => {
                warn!(error = %err, "quote failed");
                self.error_fallback().await
            }
        }
    }

    /// Script match, then trained Q&A, then the generation fallback.
    async fn conversational_tiers(&self, session_id: &str, message: &str) -> RouteResponse {
        match self.scripts.list_active_scripts().await {
            Ok(scripts) => {
                if let Some(m) = best_script_match(message, &scripts) {
                    info!(session_id, score = m.score, "script matched");
                    return RouteResponse::ok(m.script.response.clone(), ResponseSource::Script);
                }
            }
            Err(err) => warn!(error = %err, "script store unavailable, skipping tier"),
        }

        let corpus = match self.training.latest_completed_corpus().await {
            Ok(corpus) => corpus,
            Err(err) => {
                warn!(error = %err, "training store unavailable, skipping tier");
                None
            }
        };
        if let Some(corpus) = &corpus {
            if let Some((answer, score)) = best_corpus_answer(message, corpus) {
                info!(session_id, score, "trained answer matched");
                return RouteResponse::ok(answer, ResponseSource::Ai);
            }
        }

        let facts = corpus.map(|c| c.extracted_info.hotel_info);
        self.generate(session_id, message, facts.as_ref()).await
    }

    async fn generate(
        &self,
        session_id: &str,
        message: &str,
        facts: Option<&HotelFacts>,
    ) -> RouteResponse {
        let mut messages = self.contexts.history(session_id);
        messages.push(ChatMessage::user(message));

        let sampling = &self.config.sampling;
        let request = GenerationRequest {
            messages,
            system: Some(GenerationPromptBuilder::build(
                facts,
                &self.config.custom_instructions,
            )),
            max_tokens: sampling.max_tokens,
            temperature: sampling.temperature,
            presence_penalty: sampling.presence_penalty,
            frequency_penalty: sampling.frequency_penalty,
        };

        match self.provider.complete(&request).await {
            Ok(completion) => {
                info!(session_id, model = %completion.model, "generated response");
                RouteResponse::ok(completion.content, ResponseSource::Ai)
            }
            Err(err) => {
                warn!(
                    provider = self.provider.name(),
                    error = %err,
                    "generation failed, degrading"
                );
                self.error_fallback().await
            }
        }
    }

    /// The designated error-fallback script, or the static apology when no
    /// such script exists (or the script store itself is down).
    async fn error_fallback(&self) -> RouteResponse {
        match self.scripts.list_active_scripts().await {
            Ok(scripts) => {
                if let Some(script) = scripts.iter().find(|s| s.active && s.is_error_fallback()) {
                    return RouteResponse::degraded(
                        script.response.clone(),
                        ResponseSource::FallbackScript,
                    );
                }
            }
            Err(err) => warn!(error = %err, "script store unavailable for fallback"),
        }
        RouteResponse::degraded(TECHNICAL_APOLOGY, ResponseSource::ErrorHandler)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;
    use posada_types::error::StoreError;
    use posada_types::llm::{GenerationError, GenerationResponse};
    use posada_types::room::Room;
    use posada_types::script::{ERROR_FALLBACK_CATEGORY, Script};
    use posada_types::training::{
        CommonQuestion, ExtractedInfo, TrainingCorpus,
    };
    use uuid::Uuid;

    use crate::llm::GenerationProvider;

    use super::*;

    // --- test doubles ---

    #[derive(Default)]
    struct TestCache(Mutex<HashMap<String, RouteResponse>>);

    impl ResponseCache for TestCache {
        fn get(&self, key: &str) -> Option<RouteResponse> {
            self.0.lock().unwrap().get(key).cloned()
        }
        fn put(&self, key: String, response: RouteResponse) {
            self.0.lock().unwrap().insert(key, response);
        }
        fn evict(&self, key: &str) {
            self.0.lock().unwrap().remove(key);
        }
        fn len(&self) -> usize {
            self.0.lock().unwrap().len()
        }
    }

    #[derive(Default)]
    struct TestContexts(Mutex<HashMap<String, (Vec<ChatMessage>, BookingQuery)>>);

    impl ConversationStore for TestContexts {
        fn history(&self, session_id: &str) -> Vec<ChatMessage> {
            self.0
                .lock()
                .unwrap()
                .get(session_id)
                .map(|(h, _)| h.clone())
                .unwrap_or_default()
        }
        fn record_exchange(&self, session_id: &str, user: &str, assistant: &str) {
            let mut map = self.0.lock().unwrap();
            let entry = map.entry(session_id.to_string()).or_default();
            entry.0.push(ChatMessage::user(user));
            entry.0.push(ChatMessage::assistant(assistant));
        }
        fn pending_query(&self, session_id: &str) -> BookingQuery {
            self.0
                .lock()
                .unwrap()
                .get(session_id)
                .map(|(_, q)| q.clone())
                .unwrap_or_default()
        }
        fn store_pending(&self, session_id: &str, query: BookingQuery) {
            self.0.lock().unwrap().entry(session_id.to_string()).or_default().1 = query;
        }
        fn evict(&self, session_id: &str) {
            self.0.lock().unwrap().remove(session_id);
        }
    }

    struct FixedCatalog(Vec<Room>);

    impl CatalogStore for FixedCatalog {
        async fn list_rooms(&self) -> Result<Vec<Room>, StoreError> {
            Ok(self.0.clone())
        }
    }

    struct FixedScripts(Vec<Script>);

    impl ScriptStore for FixedScripts {
        async fn list_active_scripts(&self) -> Result<Vec<Script>, StoreError> {
            Ok(self.0.clone())
        }
    }

    struct FailingScripts;

    impl ScriptStore for FailingScripts {
        async fn list_active_scripts(&self) -> Result<Vec<Script>, StoreError> {
            Err(StoreError::Connection)
        }
    }

    struct FixedTraining(Option<TrainingCorpus>);

    impl TrainingStore for FixedTraining {
        async fn latest_completed_corpus(&self) -> Result<Option<TrainingCorpus>, StoreError> {
            Ok(self.0.clone())
        }
    }

    struct CountingProvider {
        calls: std::sync::Arc<AtomicUsize>,
    }

    impl GenerationProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }
        async fn complete(
            &self,
            _request: &GenerationRequest,
        ) -> Result<GenerationResponse, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GenerationResponse {
                content: "respuesta generada".to_string(),
                model: "test-model".to_string(),
            })
        }
    }

    struct FailingProvider;

    impl GenerationProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }
        async fn complete(
            &self,
            _request: &GenerationRequest,
        ) -> Result<GenerationResponse, GenerationError> {
            Err(GenerationError::Network("connection refused".to_string()))
        }
    }

    // --- fixtures ---

    fn room(name: &str, capacity: u32, rack: f64) -> Room {
        Room {
            id: Uuid::now_v7(),
            name: name.to_string(),
            room_type: "doble".to_string(),
            capacity,
            rack_rate: rack,
            occupancy_rates: vec![],
        }
    }

    fn script(triggers: &[&str], response: &str) -> Script {
        Script {
            id: Uuid::now_v7(),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            response: response.to_string(),
            active: true,
            category: None,
            requires_date: false,
            requires_room_type: false,
            requires_occupancy: false,
        }
    }

    fn fallback_script() -> Script {
        let mut s = script(&[], "Un momento por favor, lo atenderemos en breve.");
        s.category = Some(ERROR_FALLBACK_CATEGORY.to_string());
        s
    }

    fn corpus_with_question() -> TrainingCorpus {
        TrainingCorpus {
            id: Uuid::now_v7(),
            completed_at: Utc::now(),
            conversations: vec![],
            extracted_info: ExtractedInfo {
                common_questions: vec![CommonQuestion {
                    question: "a que hora es el check out".to_string(),
                    answer: "El check-out es hasta las 12:00.".to_string(),
                    frequency: 5,
                }],
                hotel_info: Default::default(),
            },
        }
    }

    type TestRouter<Scr> =
        MessageRouter<FixedCatalog, Scr, FixedTraining, TestCache, TestContexts>;

    fn router<Scr: ScriptStore>(
        rooms: Vec<Room>,
        scripts: Scr,
        corpus: Option<TrainingCorpus>,
        provider: BoxGenerationProvider,
    ) -> TestRouter<Scr> {
        MessageRouter::new(
            FixedCatalog(rooms),
            scripts,
            FixedTraining(corpus),
            TestCache::default(),
            TestContexts::default(),
            provider,
            EngineConfig::default(),
        )
    }

    fn counting_provider() -> (BoxGenerationProvider, std::sync::Arc<AtomicUsize>) {
        let calls = std::sync::Arc::new(AtomicUsize::new(0));
        (
            BoxGenerationProvider::new(CountingProvider {
                calls: calls.clone(),
            }),
            calls,
        )
    }

    // Stays in low season on a Monday, clear of every minimum-night rule.
    const QUOTE_MESSAGE: &str = "precio del 12 al 14 de mayo de 2031 para 2 personas";

    // --- tests ---

    #[tokio::test]
    async fn complete_booking_message_yields_a_quote() {
        let (provider, calls) = counting_provider();
        let r = router(
            vec![room("Marina", 2, 120.0)],
            FixedScripts(vec![]),
            None,
            provider,
        );

        let response = r.resolve_message("s1", QUOTE_MESSAGE).await;
        assert!(response.success);
        assert_eq!(response.source, ResponseSource::Ai);
        assert!(response.response.contains("Cotización de su estadía"));
        assert!(response.response.contains("Marina"));
        // the booking pipeline never touches the provider
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn booking_query_accumulates_across_turns() {
        let (provider, _) = counting_provider();
        let r = router(
            vec![room("Marina", 2, 120.0)],
            FixedScripts(vec![]),
            None,
            provider,
        );

        let first = r.resolve_message("s1", "quiero precios para 2 personas").await;
        assert_eq!(first.response, ASK_DATES);

        let second = r
            .resolve_message("s1", "del 12 al 14 de mayo de 2031")
            .await;
        assert!(second.response.contains("Cotización de su estadía"));
    }

    #[tokio::test]
    async fn price_inquiry_without_details_asks_for_both() {
        let (provider, _) = counting_provider();
        let r = router(vec![], FixedScripts(vec![]), None, provider);

        let response = r.resolve_message("s1", "cuanto cuesta una noche?").await;
        assert_eq!(response.response, ASK_DATES_AND_GUESTS);
        assert_eq!(response.source, ResponseSource::Ai);
    }

    #[tokio::test]
    async fn repeated_message_is_served_from_cache() {
        let (provider, calls) = counting_provider();
        let r = router(vec![], FixedScripts(vec![]), None, provider);

        let first = r.resolve_message("s1", "cuentame del hotel").await;
        let second = r.resolve_message("s1", "cuentame del hotel").await;
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cache_keys_are_scoped_per_session() {
        let (provider, calls) = counting_provider();
        let r = router(vec![], FixedScripts(vec![]), None, provider);

        r.resolve_message("s1", "cuentame del hotel").await;
        r.resolve_message("s2", "cuentame del hotel").await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn script_tier_answers_without_the_provider() {
        let (provider, calls) = counting_provider();
        let r = router(
            vec![],
            FixedScripts(vec![script(
                &["donde queda el hotel"],
                "Estamos en la Av. Costanera 123.",
            )]),
            None,
            provider,
        );

        let response = r.resolve_message("s1", "¿dónde queda el hotel?").await;
        assert_eq!(response.source, ResponseSource::Script);
        assert_eq!(response.response, "Estamos en la Av. Costanera 123.");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn trained_answer_beats_generation() {
        let (provider, calls) = counting_provider();
        let r = router(
            vec![],
            FixedScripts(vec![]),
            Some(corpus_with_question()),
            provider,
        );

        let response = r
            .resolve_message("s1", "a que hora es el check out")
            .await;
        assert_eq!(response.source, ResponseSource::Ai);
        assert_eq!(response.response, "El check-out es hasta las 12:00.");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn script_store_failure_degrades_to_later_tiers() {
        let (provider, calls) = counting_provider();
        let r = router(vec![], FailingScripts, None, provider);

        let response = r.resolve_message("s1", "cuentame del hotel").await;
        assert!(response.success);
        assert_eq!(response.response, "respuesta generada");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn provider_failure_uses_the_fallback_script() {
        let r = router(
            vec![],
            FixedScripts(vec![fallback_script()]),
            None,
            BoxGenerationProvider::new(FailingProvider),
        );

        let response = r.resolve_message("s1", "cuentame del hotel").await;
        assert!(!response.success);
        assert_eq!(response.source, ResponseSource::FallbackScript);
        assert_eq!(
            response.response,
            "Un momento por favor, lo atenderemos en breve."
        );
    }

    #[tokio::test]
    async fn provider_failure_without_fallback_script_apologizes() {
        let r = router(
            vec![],
            FixedScripts(vec![]),
            None,
            BoxGenerationProvider::new(FailingProvider),
        );

        let response = r.resolve_message("s1", "cuentame del hotel").await;
        assert!(!response.success);
        assert_eq!(response.source, ResponseSource::ErrorHandler);
        assert_eq!(response.response, TECHNICAL_APOLOGY);
    }

    #[tokio::test]
    async fn degraded_responses_are_never_cached() {
        let r = router(
            vec![],
            FixedScripts(vec![fallback_script()]),
            None,
            BoxGenerationProvider::new(FailingProvider),
        );

        r.resolve_message("s1", "cuentame del hotel").await;
        assert!(r.cache().is_empty());
        assert!(r.contexts().history("s1").is_empty());
    }

    #[tokio::test]
    async fn successful_exchange_is_recorded_in_context() {
        let (provider, _) = counting_provider();
        let r = router(vec![], FixedScripts(vec![]), None, provider);

        r.resolve_message("s1", "cuentame del hotel").await;
        let history = r.contexts().history("s1");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].content, "cuentame del hotel");
        assert_eq!(history[1].content, "respuesta generada");
    }

    #[tokio::test]
    async fn no_available_room_is_a_polite_answer() {
        let (provider, _) = counting_provider();
        let r = router(
            vec![room("Individual", 1, 80.0)],
            FixedScripts(vec![]),
            None,
            provider,
        );

        let response = r
            .resolve_message("s1", "precio del 12 al 14 de mayo de 2031 para 8 personas")
            .await;
        assert!(response.success);
        assert!(response.response.contains("no contamos con habitaciones"));
    }

    #[tokio::test]
    async fn direct_quote_entry_reports_missing_data_as_errors() {
        let (provider, _) = counting_provider();
        let r = router(
            vec![room("Marina", 2, 120.0)],
            FixedScripts(vec![]),
            None,
            provider,
        );

        let err = r.quote_query(&BookingQuery::default()).await.unwrap_err();
        assert!(matches!(err, QuoteError::MissingDates));
    }
}
