use std::collections::HashMap;

use log::debug;

pub type Symbol = String;
pub type FreqTable = HashMap<Symbol, u64>;

/// Punctuation marks that are symbols on their own.
pub const PUNCTUATION: [char; 4] = ['.', ',', '?', '!'];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lazy iterator over the symbols of a lowercased text.
///
/// A clone keeps the current position, so cloning before consumption
/// replays the whole sequence.
#[derive(Debug, Clone)]
pub struct Tokens {
    text: String,
    pos: usize,
}

impl Iterator for Tokens {
    type Item = Symbol;

    fn next(&mut self) -> Option<Symbol> {
        let rest = &self.text[self.pos..];
        let (start, first) = rest
            .char_indices()
            .find(|&(_, c)| is_word_char(c) || PUNCTUATION.contains(&c))?;

        let start = self.pos + start;
        if PUNCTUATION.contains(&first) {
            self.pos = start + first.len_utf8();
            return Some(first.to_string());
        }

        let len = self.text[start..]
            .find(|c: char| !is_word_char(c))
            .unwrap_or(self.text.len() - start);
        self.pos = start + len;
        Some(self.text[start..self.pos].to_string())
    }
}

/// Splits `text` into words and punctuation symbols, left to right.
///
/// The whole text is lowercased first. A word is a maximal run of
/// alphanumeric or `_` characters; each of `. , ? !` is its own symbol.
/// Everything else separates symbols and is dropped.
pub fn tokenize(text: &str) -> Tokens {
    Tokens {
        text: text.to_lowercase(),
        pos: 0,
    }
}

pub fn frequency_of<I>(symbols: I) -> FreqTable
where
    I: IntoIterator<Item = Symbol>,
{
    let mut freq = FreqTable::new();
    for symbol in symbols {
        *freq.entry(symbol).or_insert(0) += 1;
    }
    debug!("Counted {} distinct symbols", freq.len());
    freq
}
