//! Formatting noise must not change the verdict.

use proptest::prelude::*;
use verbatim::{check_chunk_fidelity, normalize_word, tokenize, NormalizeOptions};

// ============================================================================
// STRATEGIES
// ============================================================================

/// A base word plus punctuation hugging it and a casing choice.
#[derive(Debug, Clone)]
struct Dressed {
    base: String,
    prefix: &'static str,
    suffix: &'static str,
    upper: bool,
}

impl Dressed {
    fn render(&self) -> String {
        let core = if self.upper {
            self.base.to_uppercase()
        } else {
            self.base.clone()
        };
        format!("{}{}{}", self.prefix, core, self.suffix)
    }
}

fn dressed(base: String) -> impl Strategy<Value = Dressed> {
    (
        prop::sample::select(vec!["", "", "(", "\"", "'", "“"]),
        prop::sample::select(vec!["", "", ",", ".", ").", ";", "!", "”", "..."]),
        any::<bool>(),
    )
        .prop_map(move |(prefix, suffix, upper)| Dressed {
            base: base.clone(),
            prefix,
            suffix,
            upper,
        })
}

/// The same base words dressed two independent ways.
fn two_renderings() -> impl Strategy<Value = (Vec<Dressed>, Vec<Dressed>)> {
    prop::collection::vec("[a-z0-9]{1,8}", 1..30).prop_flat_map(|bases| {
        let first: Vec<_> = bases.iter().cloned().map(dressed).collect();
        let second: Vec<_> = bases.into_iter().map(dressed).collect();
        (first, second)
    })
}

fn whitespace() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![" ", " ", "  ", "\n", "\t", " \n\n "])
}

fn join_with(words: &[Dressed], gaps: &[&str]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            out.push_str(gaps.get(i % gaps.len().max(1)).copied().unwrap_or(" "));
        }
        out.push_str(&word.render());
    }
    out
}

// ============================================================================
// TOLERANCE PROPERTIES
// ============================================================================

proptest! {
    /// Property: edge punctuation, case and whitespace differences are ignored.
    #[test]
    fn prop_formatting_noise_is_tolerated(
        (document_words, chunk_words) in two_renderings(),
        gaps in prop::collection::vec(whitespace(), 1..5),
        at in any::<prop::sample::Index>(),
        len in 1usize..10,
    ) {
        let len = len.min(chunk_words.len());
        let start = at.index(chunk_words.len() - len + 1);
        let document = join_with(&document_words, &[" "]);
        let chunk = join_with(&chunk_words[start..start + len], &gaps);
        prop_assert!(
            check_chunk_fidelity(&chunk, &document, false),
            "chunk {:?} not found in {:?}", chunk, document
        );
    }

    /// Property: token spans are ordered char-boundary slices that normalize to the token.
    #[test]
    fn prop_token_spans_round_trip(text in any::<String>()) {
        let options = NormalizeOptions::default();
        let mut last_end = 0;
        for token in tokenize(&text, &options) {
            prop_assert!(token.start < token.end);
            prop_assert!(token.start >= last_end);
            let slice = text.get(token.start..token.end);
            prop_assert!(slice.is_some(), "span {}..{} is not a char range", token.start, token.end);
            prop_assert_eq!(normalize_word(slice.unwrap_or(""), &options), Some(token.text.clone()));
            last_end = token.end;
        }
    }

    /// Property: tokenizing is deterministic and insensitive to surrounding whitespace.
    #[test]
    fn prop_tokenize_ignores_outer_whitespace(text in "[a-zA-Z,. ]{0,80}") {
        let options = NormalizeOptions::default();
        let plain: Vec<String> = tokenize(&text, &options).into_iter().map(|t| t.text).collect();
        let padded: Vec<String> = tokenize(&format!("\n  {}\t ", text), &options)
            .into_iter()
            .map(|t| t.text)
            .collect();
        prop_assert_eq!(plain, padded);
    }
}
