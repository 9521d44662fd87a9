//! Corpus handling: block splitting, the compression run and its report.

use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::huffman::{
    CodeTable, HuffmanTree, average_code_length, build_code_table, build_huffman_tree,
    entropy_from_freq,
};
use crate::serialize::serialize_tree;
use crate::stream::encode_text;
use crate::tokenizer::{FreqTable, frequency_of, tokenize};

/// Written when the input file does not exist yet.
pub const SAMPLE_CORPUS: &str = "Memory stores information. The CPU reads memory. The CPU processes data.\n\n\
The scheduler controls the system. The system coordinates tasks.\n\n\
Operating systems control resources and coordinate the tasks of the processor.";

const SEPARATOR: &str = "-----------------------------------------------------------------";

/// Splits on runs of two or more newlines, `\r\n` counting as one.
/// Blocks are trimmed and blank ones dropped.
pub fn split_blocks(content: &str) -> Vec<String> {
    content
        .replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(String::from)
        .collect()
}

/// Reads and splits the corpus, creating the sample file first if `path`
/// does not exist.
pub fn read_corpus(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        create_parent(path)?;
        fs::write(path, SAMPLE_CORPUS).map_err(|e| Error::io(path, e))?;
        warn!(
            "Input file {} was not found; created it with sample content.",
            path.display()
        );
    }

    info!("Reading corpus: {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let blocks = split_blocks(&content);
    debug!("Corpus holds {} blocks", blocks.len());
    Ok(blocks)
}

/// Writes the rendered report through a temporary sibling file so a
/// failed write never leaves a partial artifact at `path`.
pub fn write_report(path: &Path, report: &CompressionReport) -> Result<()> {
    create_parent(path)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    let written = fs::write(tmp, report.to_string()).and_then(|()| fs::rename(tmp, path));
    if let Err(e) = written {
        let _ = fs::remove_file(tmp);
        return Err(Error::io(path, e));
    }

    info!("Report written to {}", path.display());
    Ok(())
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => fs::create_dir_all(parent).map_err(|e| Error::io(parent, e)),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockResult {
    pub original: String,
    pub encoded: String,
    pub token_count: usize,
}

#[derive(Debug, Clone)]
pub struct CompressionReport {
    pub tree: Box<HuffmanTree>,
    pub serialized_tree: String,
    pub frequencies: FreqTable,
    pub codes: CodeTable,
    pub blocks: Vec<BlockResult>,
}

impl CompressionReport {
    pub fn total_tokens(&self) -> usize {
        self.blocks.iter().map(|b| b.token_count).sum()
    }

    pub fn total_bits(&self) -> usize {
        self.blocks.iter().map(|b| b.encoded.len()).sum()
    }

    pub fn entropy(&self) -> f64 {
        entropy_from_freq(&self.frequencies)
    }

    pub fn average_code_length(&self) -> f64 {
        average_code_length(&self.frequencies, &self.codes)
    }

    /// Code table entries in lexicographic symbol order.
    pub fn sorted_codes(&self) -> Vec<(&str, &str)> {
        let mut codes: Vec<_> = self
            .codes
            .iter()
            .map(|(s, c)| (s.as_str(), c.as_str()))
            .collect();
        codes.sort_unstable();
        codes
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n- Tree structure (serialized):")?;
        writeln!(f, "{}", self.serialized_tree)?;
        writeln!(f, "\n- Generated Huffman codes:")?;
        for (symbol, code) in self.sorted_codes() {
            writeln!(f, "'{}': {}", symbol, code)?;
        }
        writeln!(f, "\n{}\n", SEPARATOR)?;

        for (i, block) in self.blocks.iter().enumerate() {
            write!(f, "\n - Text block {}", i + 1)?;
            write!(f, "\n Original text: {}", block.original.trim())?;
            write!(f, "\n Compressed text: {}", block.encoded)?;
            write!(f, "\n\n")?;
        }
        Ok(())
    }
}

/// Builds one code from all blocks together and encodes each block with it.
pub fn compress_corpus<S: AsRef<str>>(blocks: &[S]) -> Result<CompressionReport> {
    if blocks.is_empty() {
        return Err(Error::EmptyCorpus);
    }

    let full_text = blocks
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    let frequencies = frequency_of(tokenize(&full_text));
    let tree = build_huffman_tree(&frequencies).ok_or(Error::EmptyVocabulary)?;
    let codes = build_code_table(&tree);
    debug!("Huffman tree built with {} unique symbols", codes.len());

    let blocks = blocks
        .iter()
        .map(|block| {
            let block = block.as_ref();
            BlockResult {
                original: block.to_string(),
                encoded: encode_text(block, &codes),
                token_count: tokenize(block).count(),
            }
        })
        .collect();

    Ok(CompressionReport {
        serialized_tree: serialize_tree(Some(&tree)),
        tree,
        frequencies,
        codes,
        blocks,
    })
}
