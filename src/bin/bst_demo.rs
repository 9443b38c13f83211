//! Builds a tree from a sequence of keys and reports on the subtree rooted at a reference key.

use clap::Parser;
use linked_bst::{NodeId, Tree};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(version, about = "Inspect an unbalanced binary search tree")]
struct Opts {
    /// Keys to insert, in order.
    #[arg(
        short,
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_value = "7,4,9,2,5,6,1,8,3,10"
    )]
    keys: Vec<i32>,

    /// Keys to remove after inserting.
    #[arg(short = 'x', long, value_delimiter = ',', allow_hyphen_values = true)]
    remove: Vec<i32>,

    /// Key of the node whose subtree is reported on.
    #[arg(short, long, allow_hyphen_values = true, default_value = "7")]
    reference: i32,

    /// Key to search the whole tree for.
    #[arg(short, long, allow_hyphen_values = true, default_value = "10")]
    search: i32,

    /// Log level, overridden by `RUST_LOG`.
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

#[derive(Debug, Error)]
enum DemoError {
    #[error("reference key {0} is not in the tree")]
    MissingReference(i32),
    #[error("failed to initialize logging")]
    Logger(#[from] log::SetLoggerError),
}

fn describe(tree: &Tree, node: Option<NodeId>) -> String {
    node.and_then(|n| tree.key(n))
        .map_or_else(|| "none".to_string(), |key| key.to_string())
}

fn main() -> Result<(), DemoError> {
    let opts = Opts::parse();
    SimpleLogger::new().with_level(opts.log_level).env().init()?;
    info!("{:?}", opts);

    let mut tree = opts.keys.iter().copied().collect::<Tree>();
    for key in &opts.remove {
        if !tree.remove(*key) {
            info!("{} was not in the tree", key);
        }
    }
    println!("{}", tree);

    let reference = tree
        .search(opts.reference)
        .ok_or(DemoError::MissingReference(opts.reference))?;

    println!("Minimum: {}", describe(&tree, tree.minimum(reference)));
    println!("Maximum: {}", describe(&tree, tree.maximum(reference)));
    println!("Successor: {}", describe(&tree, tree.successor(reference)));
    println!("Predecessor: {}", describe(&tree, tree.predecessor(reference)));
    println!(
        "Search ({}): {}",
        opts.search,
        describe(&tree, tree.search(opts.search))
    );
    println!("Height: {}", tree.subtree_height(reference));
    println!("Node count: {}", tree.node_count(reference));
    println!("Width: {}", tree.subtree_width(reference));
    println!("Density: {:.3}", tree.subtree_density(reference));

    Ok(())
}
