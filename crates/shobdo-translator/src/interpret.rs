use serde_json::{Map, Value};
use shobdo_types::{CorrectionItem, CorrectionKind, TranslationResult, WordMeaning};

use crate::TranslateError;

/// Greedy `\{[\s\S]*\}`: first `{` through the last `}` after it
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Pull the structured result out of a free-form model reply
pub fn interpret(reply: &str) -> Result<TranslationResult, TranslateError> {
    let raw = extract_json_object(reply)
        .ok_or_else(|| TranslateError::InvalidResponse("no JSON object in reply".to_string()))?;

    let value: Value = serde_json::from_str(raw)
        .map_err(|e| TranslateError::InvalidResponse(format!("embedded JSON: {e}")))?;

    let Value::Object(fields) = value else {
        return Err(TranslateError::InvalidResponse(
            "embedded JSON is not an object".to_string(),
        ));
    };

    let has_errors = fields
        .get("hasErrors")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let corrections = if has_errors {
        array(&fields, "corrections")
            .filter_map(correction_item)
            .collect()
    } else {
        Vec::new()
    };

    let word_meanings = array(&fields, "wordMeanings")
        .filter_map(word_meaning)
        .collect();

    Ok(TranslationResult {
        has_errors,
        corrections,
        corrected_sentence: string(&fields, "correctedSentence"),
        translation: string(&fields, "translation"),
        word_meanings,
    })
}

fn string(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn array<'a>(fields: &'a Map<String, Value>, key: &str) -> impl Iterator<Item = &'a Value> {
    fields
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn word_meaning(value: &Value) -> Option<WordMeaning> {
    let english = value.get("english")?.as_str()?.trim();
    let bangla = value.get("bangla")?.as_str()?.trim();
    if english.is_empty() {
        return None;
    }
    Some(WordMeaning::new(english, bangla))
}

fn correction_item(value: &Value) -> Option<CorrectionItem> {
    let original = value.get("original")?.as_str()?;
    let corrected = value.get("corrected")?.as_str()?;

    let kind = value
        .get("type")
        .and_then(|t| serde_json::from_value::<CorrectionKind>(t.clone()).ok())
        .unwrap_or(CorrectionKind::Other);

    let explanation = value
        .get("explanation")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Some(CorrectionItem {
        original: original.to_string(),
        corrected: corrected.to_string(),
        kind,
        explanation: explanation.to_string(),
    })
}
