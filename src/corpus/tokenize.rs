// Word tokenization for extracted documents.
//
// Written documents hold one space-joined token sequence. The default
// tokenizer separates punctuation from words ("profit," -> "profit" ",")
// using the BERT pre-tokenization rules from the `tokenizers` crate; no
// vocabulary or model file is involved.

use anyhow::Result;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

/// Trait for splitting a document body into word tokens.
pub trait WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;
}

/// Whitespace + punctuation splitting (the default).
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationTokenizer;

impl WordTokenizer for PunctuationTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let mut pretokenized = PreTokenizedString::from(text);
        BertPreTokenizer
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| anyhow::anyhow!("Pre-tokenization failed: {}", e))?;

        Ok(pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Byte)
            .into_iter()
            .map(|(token, _, _)| token.to_string())
            .collect())
    }
}

/// Plain whitespace splitting; punctuation stays attached to words.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl WordTokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.split_whitespace().map(str::to_string).collect())
    }
}
