//! Indexes a short story (or the file given as the first argument) and prints the trie as DOT.
//!
//! Render the output with `dot -Tsvg`, or paste it into any online Graphviz viewer.
use std::fs::File;

use radix_index::{Error, Indexer};
use tracing::{info, Level};

const STORY: &str = "Dit is een heel lang verhaal over een vos die vrolijk over een luie hond springt. \
    Wat de hond niet weet is dat deze vos snel en bruin is, maar dat de hond zelf lui is. \
    De hond trekt zich er weinig van aan zoals een luie hond betaamd. Maar die vos voelt zich een \
    partijtje goed joh, die komt thuis en zegt tegen zn vrouw dat hij echt iets heel stoers heeft \
    gedaan. De vrouw is niet bijster onder de indruk: hij is te laat voor het eten en behalve een \
    goed verhaal heeft hij verder verdraaid weinig meegebracht. Einde.";

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let mut indexer = Indexer::new();
    let words = match std::env::args().nth(1) {
        Some(path) => indexer.index_reader(File::open(&path)?)?,
        None => indexer.index_text(STORY),
    };
    info!(words, distinct = indexer.trie().len(), "Indexed input");

    println!("{}", indexer.trie().render());
    Ok(())
}
