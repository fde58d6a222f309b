//! Trained Q&A matching over a mined corpus.

use posada_types::llm::ChatRole;
use posada_types::training::TrainingCorpus;

use crate::text::{jaccard, normalize};

/// Minimum similarity for a mined common question to answer directly.
pub const QUESTION_THRESHOLD: f64 = 0.6;

/// Minimum similarity for a raw conversation turn to answer directly.
/// Strictly exceeded; lower than the question threshold because raw turns
/// were never curated.
pub const CONVERSATION_THRESHOLD: f64 = 0.4;

/// Answer a message from the training corpus, if anything matches well
/// enough.
///
/// Mined common questions are tried first at the higher threshold, most
/// frequent first on ties. Failing that, every client turn in the raw
/// conversations is scored and the hotel turn that followed the best match
/// above the conversation threshold is returned.
pub fn best_corpus_answer(message: &str, corpus: &TrainingCorpus) -> Option<(String, f64)> {
    let normalized = normalize(message);
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return None;
    }

    if let Some(hit) = best_common_question(normalized, corpus) {
        return Some(hit);
    }
    best_conversation_turn(normalized, corpus)
}

fn best_common_question(normalized: &str, corpus: &TrainingCorpus) -> Option<(String, f64)> {
    let mut best: Option<(&str, f64, u32)> = None;
    for question in &corpus.extracted_info.common_questions {
        let score = jaccard(normalized, normalize(&question.question).trim());
        if score < QUESTION_THRESHOLD {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, best_score, best_freq)) => {
                score > best_score || (score == best_score && question.frequency > best_freq)
            }
        };
        if better {
            best = Some((&question.answer, score, question.frequency));
        }
    }
    best.map(|(answer, score, _)| {
        tracing::debug!(score, "matched mined common question");
        (answer.to_string(), score)
    })
}

fn best_conversation_turn(normalized: &str, corpus: &TrainingCorpus) -> Option<(String, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for conversation in &corpus.conversations {
        for pair in conversation.messages.windows(2) {
            let [turn, reply] = pair else { continue };
            if turn.role != ChatRole::User || reply.role != ChatRole::Assistant {
                continue;
            }
            let score = jaccard(normalized, normalize(&turn.content).trim());
            if score > CONVERSATION_THRESHOLD
                && best.is_none_or(|(_, best_score)| score > best_score)
            {
                best = Some((&reply.content, score));
            }
        }
    }
    best.map(|(answer, score)| {
        tracing::debug!(score, "matched raw conversation turn");
        (answer.to_string(), score)
    })
}
