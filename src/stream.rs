use log::trace;

use crate::huffman::CodeTable;
use crate::tokenizer::tokenize;

/// Encodes `text` as the concatenation of its symbols' codes.
///
/// Symbols missing from `codes` contribute no bits. The output is the
/// symbolic `'0'`/`'1'` form, not packed bytes.
pub fn encode_text(text: &str, codes: &CodeTable) -> String {
    let mut bits = String::new();

    for symbol in tokenize(text) {
        match codes.get(&symbol) {
            Some(code) => bits.push_str(code),
            None => trace!("Skipping out-of-vocabulary symbol {:?}", symbol),
        }
    }

    bits
}
