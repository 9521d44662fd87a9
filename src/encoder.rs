use std::env;
use std::process;

use log::{debug, error, info, warn};

use word_huffman::config::{Config, print_help};
use word_huffman::corpus::{CompressionReport, compress_corpus, read_corpus, write_report};
use word_huffman::huffman::Node;
use word_huffman::render::{DotRenderer, NoRenderer, TreeRenderer};
use word_huffman::{RenderError, Result};

fn render_tree(renderer: &dyn TreeRenderer, root: &Node) {
    match renderer.render(root) {
        Ok(path) => println!("🌳 Tree image saved to {}", path.display()),
        Err(RenderError::Disabled) => debug!("Tree rendering disabled."),
        Err(RenderError::Unavailable) => {
            warn!("Graphviz `dot` not available. Skipping tree visualisation.")
        }
        Err(e) => warn!("Tree image was not generated: {}", e),
    }
}

fn print_summary(config: &Config, report: &CompressionReport) {
    for (i, block) in report.blocks.iter().enumerate() {
        println!(
            "  - Block {}: {} tokens -> {} bits",
            i + 1,
            block.token_count,
            block.encoded.len()
        );
    }

    println!(
        "\r\n✅ Encoding successful.\n\
         📂  Input:        {}\n\
         💾  Output:       {}\n\
         🔤  Symbols:      {} unique, {} total\n\
         ℹ️  Entropy:      {:.4} bits/symbol\n\
         🗜️  Code length:  {:.4} bits/symbol ({} bits)",
        config.input_file.display(),
        config.output_file.display(),
        report.codes.len(),
        report.total_tokens(),
        report.entropy(),
        report.average_code_length(),
        report.total_bits()
    );
}

fn run(config: &Config) -> Result<()> {
    let blocks = read_corpus(&config.input_file)?;

    info!("Computing frequencies over {} blocks...", blocks.len());
    let report = compress_corpus(&blocks)?;

    let renderer: Box<dyn TreeRenderer> = if config.render {
        Box::new(DotRenderer::new(&config.tree_image))
    } else {
        Box::new(NoRenderer)
    };
    render_tree(renderer.as_ref(), &report.tree);

    write_report(&config.output_file, &report)?;
    print_summary(config, &report);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            print_help();
            process::exit(1);
        }
    };

    if config.help {
        print_help();
        return;
    }

    info!("--- Start Encoding ---");
    config.print();

    if let Err(e) = run(&config) {
        error!("❌ {}", e);
        process::exit(1);
    }

    info!("--- End ---");
}
