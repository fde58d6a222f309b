//! Deterministic quote text generation.
//!
//! Quotes are plain human-readable Spanish: dates, season, per-room
//! breakdown, discount and deposit lines, the fixed benefits list, the
//! minimum-night summary, and the closing request for the identity fields
//! needed to confirm.

use posada_types::booking::{BookingQuery, DateRange, RoomAllocation};
use posada_types::calendar::TariffCalendar;
use posada_types::config::PricingPolicy;
use posada_types::error::QuoteError;
use posada_types::room::Room;

use crate::intent::{extract_room_distribution, is_multi_room_query};
use crate::tariff::{StayPricing, calculate_room_rate, season_for, validate_minimum_nights};

use super::allocation::filter_available_rooms;

/// Benefits included with every confirmed reservation.
const BENEFITS: &[&str] = &[
    "Desayuno continental incluido",
    "Wi-Fi en todas las áreas",
    "Atención en recepción las 24 horas",
];

/// Closing line asking for the data needed to confirm.
const CONFIRMATION_REQUEST: &str = "Para confirmar su reserva envíenos: nombre completo, DNI o pasaporte, correo electrónico y teléfono de contacto.";

/// Whether the stored raw message asks for more than one room.
pub fn needs_multiple_rooms(query: &BookingQuery) -> bool {
    query
        .raw_message
        .as_deref()
        .is_some_and(is_multi_room_query)
}

/// Prices booking queries against a calendar and pricing policy.
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    calendar: TariffCalendar,
    pricing: PricingPolicy,
}

impl QuoteEngine {
    pub fn new(calendar: TariffCalendar, pricing: PricingPolicy) -> Self {
        Self { calendar, pricing }
    }

    pub fn calendar(&self) -> &TariffCalendar {
        &self.calendar
    }

    /// Price a complete query against the catalog.
    ///
    /// This is the direct entry point: missing information is an error
    /// here, unlike the conversational router which turns it into a
    /// follow-up question. A minimum-night violation is not an error; the
    /// explanatory message is the quote's answer.
    pub fn quote_query(&self, query: &BookingQuery, rooms: &[Room]) -> Result<String, QuoteError> {
        let range = query.dates.ok_or(QuoteError::MissingDates)?;
        if query.guests.is_empty() {
            return Err(QuoteError::MissingGuests);
        }

        let policy = validate_minimum_nights(range.check_in, range.nights(), &self.calendar);
        if let Some(message) = policy.message {
            return Ok(message);
        }

        if needs_multiple_rooms(query) {
            let distribution = query
                .raw_message
                .as_deref()
                .and_then(extract_room_distribution);
            if let Some(distribution) = distribution {
                // Each room only needs to host its own share of the party.
                let per_room_query = BookingQuery {
                    guests: distribution[0].guests.clone(),
                    ..query.clone()
                };
                let candidates = filter_available_rooms(rooms, &per_room_query, &self.calendar);
                if candidates.len() >= distribution.len() {
                    let pairs: Vec<(&Room, &RoomAllocation)> = candidates
                        .iter()
                        .zip(distribution.iter())
                        .collect();
                    return Ok(self.multi_room_quote(&pairs, range, rooms));
                }
                tracing::warn!(
                    requested = distribution.len(),
                    available = candidates.len(),
                    "not enough rooms for requested distribution, quoting best single room"
                );
            }
        }

        let candidates = filter_available_rooms(rooms, query, &self.calendar);
        if candidates.is_empty() {
            return Err(QuoteError::NoRoomsAvailable {
                guests: query.paying_guests(),
            });
        }

        Ok(self.single_room_quote(&candidates[0], range, rooms))
    }

    /// Quote one room for the stay.
    pub fn single_room_quote(&self, room: &Room, range: DateRange, siblings: &[Room]) -> String {
        let stay = calculate_room_rate(room, range, siblings, &self.calendar, &self.pricing);
        let mut lines = self.header(range);

        lines.push(String::new());
        lines.extend(self.room_block(room, &stay, None));
        lines.push(String::new());
        lines.extend(self.totals_block(stay.total, stay.discounted_total));
        lines.extend(self.footer(range));

        lines.join("\n")
    }

    /// Quote a multi-room distribution, summing undiscounted and discounted
    /// totals before presenting the aggregate.
    pub fn multi_room_quote(
        &self,
        pairs: &[(&Room, &RoomAllocation)],
        range: DateRange,
        siblings: &[Room],
    ) -> String {
        let mut lines = self.header(range);
        let mut total = 0.0;
        let mut discounted_total = 0.0;

        for (room, allocation) in pairs {
            let stay = calculate_room_rate(room, range, siblings, &self.calendar, &self.pricing);
            total += stay.total;
            discounted_total += stay.discounted_total;

            lines.push(String::new());
            lines.extend(self.room_block(room, &stay, Some(allocation)));
        }

        lines.push(String::new());
        lines.push(format!("Total por las {} habitaciones:", pairs.len()));
        lines.extend(self.totals_block(total, discounted_total));
        lines.extend(self.footer(range));

        lines.join("\n")
    }

    fn header(&self, range: DateRange) -> Vec<String> {
        let season = season_for(&self.calendar, range.check_in);
        vec![
            "Cotización de su estadía:".to_string(),
            format!(
                "Ingreso: {} — Salida: {} ({} {})",
                range.check_in.format("%d/%m/%Y"),
                range.check_out.format("%d/%m/%Y"),
                range.nights(),
                if range.nights() == 1 { "noche" } else { "noches" },
            ),
            format!("Temporada: {season}"),
        ]
    }

    fn room_block(
        &self,
        room: &Room,
        stay: &StayPricing,
        allocation: Option<&RoomAllocation>,
    ) -> Vec<String> {
        let mut lines = vec![format!(
            "{} ({}, capacidad {} personas)",
            room.name, room.room_type, room.capacity
        )];
        if let Some(allocation) = allocation {
            lines.push(format!(
                "  Habitación {} para {} personas",
                allocation.room_number,
                allocation.guests.len()
            ));
        }
        lines.push(format!("  Tarifa por noche: S/ {:.2}", stay.nightly_rate));
        lines.push(format!(
            "  Subtotal ({} {}): S/ {:.2}",
            stay.nights,
            if stay.nights == 1 { "noche" } else { "noches" },
            stay.subtotal
        ));
        lines.push(format!(
            "  IGV ({:.0}%): S/ {:.2}",
            self.pricing.tax_rate * 100.0,
            stay.tax
        ));
        lines.push(format!("  Total: S/ {:.2}", stay.total));
        lines
    }

    fn totals_block(&self, total: f64, discounted_total: f64) -> Vec<String> {
        vec![
            format!(
                "Con descuento promocional del {:.0}%: S/ {:.2} (antes S/ {:.2})",
                self.pricing.promo_discount * 100.0,
                discounted_total,
                total
            ),
            format!(
                "Depósito para confirmar ({:.0}%): S/ {:.2}",
                self.pricing.deposit_share * 100.0,
                discounted_total * self.pricing.deposit_share
            ),
        ]
    }

    fn footer(&self, range: DateRange) -> Vec<String> {
        let mut lines = vec![String::new(), "Beneficios incluidos:".to_string()];
        lines.extend(BENEFITS.iter().map(|b| format!("- {b}")));

        let policy = validate_minimum_nights(range.check_in, range.nights(), &self.calendar);
        if policy.required > 1 {
            lines.push(String::new());
            lines.push(format!(
                "Estadía mínima para su fecha de ingreso: {} noches.",
                policy.required
            ));
        }

        lines.push(String::new());
        lines.push(CONFIRMATION_REQUEST.to_string());
        lines
    }
}
