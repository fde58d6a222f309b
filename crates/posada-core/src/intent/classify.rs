//! Coarse message classification.
//!
//! A price/availability/reservation pattern short-circuits to
//! `PriceInquiry` regardless of anything else in the message; that is the
//! only class the router acts on. The remaining classes come from
//! side-specific sub-classifiers and exist for telemetry.

use regex::Regex;
use std::sync::LazyLock;

use crate::text::normalize;

/// Coarse class of an inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageClass {
    /// Asks for prices, availability, or to reserve. Drives the booking gate.
    PriceInquiry,
    Greeting,
    Farewell,
    Thanks,
    /// Asks about amenities or services (pool, breakfast, parking...).
    ServiceQuestion,
    /// Hotel-side confirmation of a reservation or registration.
    Confirmation,
    General,
}

/// Which side of the conversation sent the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakerSide {
    Client,
    Hotel,
}

static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"precio|tarifa|costo|cuanto (cuesta|sale|cobran)|disponib|reserva|cotiza|alquil",
    )
    .expect("price pattern")
});

static GREETING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(hola|buenos dias|buenas tardes|buenas noches|buen dia)")
        .expect("greeting pattern")
});

static FAREWELL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"adios|hasta luego|hasta pronto|chau|nos vemos").expect("farewell pattern"));

static THANKS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"gracias|muy amable").expect("thanks pattern"));

static SERVICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"piscina|desayuno|wifi|estacionamiento|cochera|mascotas|check.?in|check.?out|lavanderia|restaurante")
        .expect("service pattern")
});

static CONFIRMATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"confirmad|registrad").expect("confirmation pattern")
});

/// Classify a client-side message.
pub fn classify_message(message: &str) -> MessageClass {
    classify_message_for(SpeakerSide::Client, message)
}

/// Classify a message from the given speaker side.
///
/// The price pattern wins over everything; the per-side cascades below it
/// only inform logging, never pricing decisions.
pub fn classify_message_for(side: SpeakerSide, message: &str) -> MessageClass {
    let text = normalize(message);

    if PRICE_PATTERN.is_match(&text) {
        return MessageClass::PriceInquiry;
    }

    let class = match side {
        SpeakerSide::Client => classify_client(&text),
        SpeakerSide::Hotel => classify_hotel(&text),
    };
    tracing::trace!(?side, ?class, "classified message");
    class
}

fn classify_client(text: &str) -> MessageClass {
    if GREETING_PATTERN.is_match(text) {
        MessageClass::Greeting
    } else if THANKS_PATTERN.is_match(text) {
        MessageClass::Thanks
    } else if FAREWELL_PATTERN.is_match(text) {
        MessageClass::Farewell
    } else if SERVICE_PATTERN.is_match(text) {
        MessageClass::ServiceQuestion
    } else {
        MessageClass::General
    }
}

fn classify_hotel(text: &str) -> MessageClass {
    if CONFIRMATION_PATTERN.is_match(text) {
        MessageClass::Confirmation
    } else if SERVICE_PATTERN.is_match(text) {
        MessageClass::ServiceQuestion
    } else {
        MessageClass::General
    }
}
