use shobdo_types::Mode;

const TRANSLATE_SHAPE: &str = r#"{
  "translation": "full bangla translation here",
  "wordMeanings": [
    {
      "english": "word1",
      "bangla": "bangla meaning"
    },
    {
      "english": "word2",
      "bangla": "bangla meaning"
    }
  ]
}"#;

const CORRECT_SHAPE: &str = r#"{
  "hasErrors": true/false,
  "corrections": [
    {
      "original": "wrong word or phrase",
      "corrected": "correct word or phrase",
      "type": "grammar/spelling/structure",
      "explanation": "brief explanation of the mistake"
    }
  ],
  "correctedSentence": "full corrected sentence here (only if hasErrors is true)",
  "translation": "full bangla translation of the corrected sentence",
  "wordMeanings": [
    {
      "english": "word1",
      "bangla": "bangla meaning"
    },
    {
      "english": "word2",
      "bangla": "bangla meaning"
    }
  ]
}"#;

const ARTICLES_NOTE: &str = "Make sure to include all meaningful words in wordMeanings (exclude articles like 'a', 'an', 'the' unless contextually important).";

/// Build the prompt sent for `text`
pub fn compose(mode: Mode, text: &str) -> String {
    match mode {
        Mode::Translate => format!(
            "Translate the following English text to Bangla and provide word-by-word meanings:\n\n\
             Text: \"{text}\"\n\n\
             Please respond in this exact JSON format:\n{TRANSLATE_SHAPE}\n\n\
             {ARTICLES_NOTE}\n"
        ),
        Mode::Correct => format!(
            "First, check if the following English text has any grammatical errors, spelling mistakes, \
             or structural issues. Then translate it to Bangla and provide word-by-word meanings.\n\n\
             Text: \"{text}\"\n\n\
             Please respond in this exact JSON format:\n{CORRECT_SHAPE}\n\n\
             If there are no errors, set hasErrors to false and corrections to empty array. \
             Use the original sentence for translation.\n\
             {ARTICLES_NOTE}\n"
        ),
    }
}
