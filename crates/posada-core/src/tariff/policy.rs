//! Minimum-night policy validation.

use chrono::NaiveDate;

use posada_types::calendar::TariffCalendar;

/// Outcome of a minimum-night check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimumNightCheck {
    pub ok: bool,
    /// Nights required by the matched rule; 1 when no rule applied.
    pub required: u32,
    /// User-facing explanation, present only on a violation.
    pub message: Option<String>,
}

impl MinimumNightCheck {
    fn passed(required: u32) -> Self {
        Self {
            ok: true,
            required,
            message: None,
        }
    }
}

/// Validate a stay against the calendar's minimum-night rules.
///
/// Rules are evaluated in table order and the first one whose trigger
/// covers the check-in date decides; later rules are never consulted. A
/// violation is an explanatory message for the guest, not an error.
pub fn validate_minimum_nights(
    check_in: NaiveDate,
    nights: u32,
    calendar: &TariffCalendar,
) -> MinimumNightCheck {
    for rule in &calendar.minimum_night_rules {
        if !rule.applies(check_in) {
            continue;
        }
        if nights >= rule.min_nights {
            return MinimumNightCheck::passed(rule.min_nights);
        }
        tracing::debug!(
            check_in = %check_in,
            nights,
            required = rule.min_nights,
            rule = %rule.label,
            "minimum-night policy violated"
        );
        return MinimumNightCheck {
            ok: false,
            required: rule.min_nights,
            message: Some(format!(
                "Las estadías con ingreso el {} ({}) requieren un mínimo de {} noches; su consulta es de {} {}.",
                check_in.format("%d/%m/%Y"),
                rule.label,
                rule.min_nights,
                nights,
                if nights == 1 { "noche" } else { "noches" },
            )),
        };
    }
    MinimumNightCheck::passed(1)
}
