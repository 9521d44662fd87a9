//! End-to-end tests: corpus text -> vocabulary -> tree -> codes -> bits.

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use word_huffman::Error;
use word_huffman::corpus::{SAMPLE_CORPUS, compress_corpus, read_corpus, write_report};
use word_huffman::huffman::{Node, build_code_table, build_huffman_tree};
use word_huffman::serialize::serialize_tree;
use word_huffman::stream::encode_text;
use word_huffman::tokenizer::{FreqTable, frequency_of, tokenize};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Fresh directory under the system temp dir, removed on drop.
struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("word-huffman-{}-{}", std::process::id(), n));
        let _ = fs::remove_dir_all(&dir);
        TempDir(dir)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

/// Decodes a bit string by walking the tree; used only to check codes.
fn decode(root: &Node, bits: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Node::Leaf { symbol, .. } = root {
        out.extend(bits.chars().map(|_| symbol.clone()));
        return out;
    }
    let mut node = root;
    for bit in bits.chars() {
        if let Node::Internal { left, right, .. } = node {
            node = if bit == '0' { left } else { right };
        }
        if let Node::Leaf { symbol, .. } = node {
            out.push(symbol.clone());
            node = root;
        }
    }
    out
}

#[test]
fn test_sentence_scenario() {
    let text = "the cat sat. the cat ran.";
    let tokens: Vec<String> = tokenize(text).collect();
    assert_eq!(tokens, ["the", "cat", "sat", ".", "the", "cat", "ran", "."]);

    let freq = frequency_of(tokens.iter().cloned());
    let expected: FreqTable = [("the", 2), ("cat", 2), ("sat", 1), (".", 2), ("ran", 1)]
        .into_iter()
        .map(|(s, f)| (s.to_string(), f))
        .collect();
    assert_eq!(freq, expected);

    let tree = build_huffman_tree(&freq).expect("tree");
    let codes = build_code_table(&tree);
    assert_eq!(codes.len(), 5);

    let bits = encode_text(text, &codes);
    let expected_len: usize = tokens.iter().map(|t| codes[t].len()).sum();
    assert_eq!(bits.len(), expected_len);

    // Every bit string decodes back to the token sequence.
    assert_eq!(decode(&tree, &bits), tokens);
}

#[test]
fn test_empty_pipeline() {
    assert_eq!(tokenize("").count(), 0);
    assert_eq!(tokenize("   ").count(), 0);
    let freq = frequency_of(tokenize("   "));
    assert!(freq.is_empty());
    assert!(build_huffman_tree(&freq).is_none());
    assert_eq!(serialize_tree(None), "");
}

#[test]
fn test_single_symbol_pipeline() {
    let report = compress_corpus(&["Cat cat CAT"]).expect("report");
    assert_eq!(report.codes.len(), 1);
    assert_eq!(report.codes["cat"], "0");
    assert_eq!(report.blocks[0].encoded, "000");
    assert_eq!(report.serialized_tree, "(3,cat)");
    assert_eq!(decode(&report.tree, "000"), ["cat", "cat", "cat"]);
}

#[test]
fn test_out_of_vocabulary_is_lenient() {
    let freq = frequency_of(tokenize("one two two three three three"));
    let codes = build_code_table(&build_huffman_tree(&freq).expect("tree"));
    let bits = encode_text("zero one, four two? three", &codes);
    let expected = format!("{}{}{}", codes["one"], codes["two"], codes["three"]);
    assert_eq!(bits, expected);
}

#[test]
fn test_sample_corpus_codes_are_prefix_free_and_decodable() {
    let blocks: Vec<&str> = SAMPLE_CORPUS.split("\n\n").collect();
    let report = compress_corpus(&blocks).expect("report");

    let codes: Vec<&String> = report.codes.values().collect();
    for (i, a) in codes.iter().enumerate() {
        for (j, b) in codes.iter().enumerate() {
            if i != j {
                assert!(!b.starts_with(a.as_str()), "{a} is a prefix of {b}");
            }
        }
    }

    let leaf_total: u64 = report.frequencies.values().sum();
    assert_eq!(report.tree.freq(), leaf_total);

    for block in &report.blocks {
        let tokens: Vec<String> = tokenize(&block.original).collect();
        assert_eq!(decode(&report.tree, &block.encoded), tokens);
        assert_eq!(block.token_count, tokens.len());
    }
}

#[test]
fn test_runs_are_deterministic() {
    let text = "a b c d e f a b c a b a . , ! ?";
    let first = compress_corpus(&[text]).expect("first");
    let second = compress_corpus(&[text]).expect("second");
    assert_eq!(first.tree, second.tree);
    assert_eq!(first.codes, second.codes);
    assert_eq!(first.serialized_tree, second.serialized_tree);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn test_missing_input_creates_sample() {
    let tmp = TempDir::new();
    let input = tmp.0.join("data").join("input.dat");

    let blocks = read_corpus(&input).expect("read");
    assert!(input.exists());
    assert_eq!(fs::read_to_string(&input).expect("sample"), SAMPLE_CORPUS);
    assert_eq!(blocks.len(), 3);
}

#[test]
fn test_existing_input_is_split_into_blocks() {
    let tmp = TempDir::new();
    fs::create_dir_all(&tmp.0).expect("dir");
    let input = tmp.0.join("input.dat");
    fs::write(&input, "  First block.\n\n\n\nSecond block!\n\n").expect("write");

    let blocks = read_corpus(&input).expect("read");
    assert_eq!(blocks, ["First block.", "Second block!"]);
}

#[test]
fn test_crlf_input_is_split_into_blocks() {
    let tmp = TempDir::new();
    fs::create_dir_all(&tmp.0).expect("dir");
    let input = tmp.0.join("input.dat");
    fs::write(&input, "First block.\r\n\r\nSecond block!\r\n").expect("write");

    let blocks = read_corpus(&input).expect("read");
    assert_eq!(blocks, ["First block.", "Second block!"]);
    let report = compress_corpus(&blocks).expect("report");
    assert_eq!(report.blocks.len(), 2);
    assert_eq!(report.blocks[1].token_count, 3);
}

#[test]
fn test_blank_input_reports_empty_corpus() {
    let tmp = TempDir::new();
    fs::create_dir_all(&tmp.0).expect("dir");
    let input = tmp.0.join("input.dat");
    fs::write(&input, "\n\n   \n\n").expect("write");

    let blocks = read_corpus(&input).expect("read");
    assert!(matches!(compress_corpus(&blocks), Err(Error::EmptyCorpus)));
}

#[test]
fn test_report_is_written_whole() {
    let tmp = TempDir::new();
    let output = tmp.0.join("out").join("output.dat");
    let report = compress_corpus(&["the cat sat.", "the cat ran."]).expect("report");

    write_report(&output, &report).expect("write");
    let written = fs::read_to_string(&output).expect("read back");
    assert_eq!(written, report.to_string());
    assert!(written.contains("'cat': 01"));
    assert!(written.contains(" - Text block 2"));
    assert!(!tmp.0.join("out").join("output.dat.tmp").exists());
}

#[test]
fn test_unwritable_report_leaves_nothing_behind() {
    let tmp = TempDir::new();
    fs::create_dir_all(&tmp.0).expect("dir");
    // A directory where the report should go makes the rename fail.
    let output = tmp.0.join("output.dat");
    fs::create_dir_all(output.join("occupied")).expect("dir");
    let report = compress_corpus(&["word"]).expect("report");

    assert!(matches!(write_report(&output, &report), Err(Error::Io { .. })));
    assert!(!tmp.0.join("output.dat.tmp").exists());
}
