//! Fixed answers for a handful of recognized questions.
//!
//! Checked before any provider call. A match short-circuits the whole
//! analysis: no prompt is rendered and the category is never consulted.

pub const PRODUCT_DESCRIPTION: &str = "Healio is your personal health companion. \
You can book and review appointments with your doctors, keep a log of your diagnoses \
and health records, and describe your symptoms to our AI assistant for a preliminary \
analysis. Healio does not replace a consultation with a qualified medical professional.";

pub const TIREDNESS_ADVICE: &str = "Feeling tired is very common and often improves with \
rest. Try to get 7-9 hours of sleep, stay hydrated, eat regular balanced meals and take \
short breaks during the day. Light physical activity and limiting caffeine late in the \
day can also help. If the tiredness lasts more than two weeks, keeps getting worse, or \
comes with fever, weight loss, shortness of breath or low mood, please book an \
appointment with your doctor.";

const TIREDNESS_PHRASES: &[&str] = &[
    "today im so tired",
    "i'm tired",
    "im tired",
    "feeling tired",
    "i am tired",
];

/// One entry of the canned-answer table.
pub struct CannedAnswer {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub response: &'static str,
}

fn asks_about_product(text: &str) -> bool {
    text.contains("what is healio") || text == "what's healio" || text == "what is healio?"
}

fn reports_tiredness(text: &str) -> bool {
    TIREDNESS_PHRASES.iter().any(|phrase| text.contains(phrase))
}

/// Ordered table. First match wins.
pub const CANNED_ANSWERS: &[CannedAnswer] = &[
    CannedAnswer {
        name: "product_description",
        matches: asks_about_product,
        response: PRODUCT_DESCRIPTION,
    },
    CannedAnswer {
        name: "tiredness_advice",
        matches: reports_tiredness,
        response: TIREDNESS_ADVICE,
    },
];

/// Look up a canned answer for raw symptom text.
///
/// Input is trimmed and lowercased before matching. `None` is a normal
/// outcome meaning the text should go to the providers.
pub fn match_canned(symptoms: &str) -> Option<&'static CannedAnswer> {
    let normalized = symptoms.trim().to_lowercase();
    CANNED_ANSWERS
        .iter()
        .find(|entry| (entry.matches)(&normalized))
}
