/// Print every shape text of a Visio drawing that starts with a prefix.
///
/// Usage:
///   cargo run --example search_vsdx -- diagram.vsdx "Note"
///   RUST_LOG=debug cargo run --example search_vsdx -- diagram.vsdx "TODO:" --pairing positional
use clap::{Parser, ValueEnum};
use vsdx_notes::opc::RelIdOrder;
use vsdx_notes::{PagePairing, SearchOptions, TextScope, search_prefix_text_with};

#[derive(Clone, Copy, ValueEnum)]
enum Pairing {
    Auto,
    Positional,
    RelId,
}

impl From<Pairing> for PagePairing {
    fn from(pairing: Pairing) -> Self {
        match pairing {
            Pairing::Auto => PagePairing::Auto,
            Pairing::Positional => PagePairing::Positional,
            Pairing::RelId => PagePairing::ByRelationshipId,
        }
    }
}

#[derive(Parser)]
#[command(version, about = "Search the shape texts of a .vsdx drawing by prefix")]
struct Cli {
    /// Path to the .vsdx file
    file: String,

    /// Text prefix to look for (case-sensitive)
    prefix: String,

    /// How page parts get their names from the pages index
    #[arg(long, value_enum, default_value_t = Pairing::Auto)]
    pairing: Pairing,

    /// Visit pages in numeric relationship id order (rId2 before rId10)
    #[arg(long, default_value_t = false)]
    natural_order: bool,

    /// Report a text only for its innermost shape, not for every enclosing group
    #[arg(long, default_value_t = false)]
    innermost: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let options = SearchOptions::default()
        .with_pairing(cli.pairing.into())
        .with_rel_id_order(if cli.natural_order {
            RelIdOrder::Natural
        } else {
            RelIdOrder::Lexicographic
        })
        .with_text_scope(if cli.innermost {
            TextScope::InnermostShape
        } else {
            TextScope::ShapeSubtree
        });

    let matches = search_prefix_text_with(&cli.file, &cli.prefix, &options)?;
    if matches.is_empty() {
        println!("No shape text starting with {:?} in {}", cli.prefix, cli.file);
        return Ok(());
    }

    for (page, texts) in matches.iter() {
        println!("{}", page);
        for text in texts {
            println!("  {}", text);
        }
    }
    println!(
        "\n{} match(es) on {} page(s)",
        matches.total_matches(),
        matches.len()
    );

    Ok(())
}
