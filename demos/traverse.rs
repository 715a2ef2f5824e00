use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use bitree::{BinaryTree, Shape};
use clap::Parser;
use log::{info, warn};
use rayon::prelude::*;
use simple_logger::SimpleLogger;

#[derive(Debug, Parser)]
#[clap(version = "1.0", author = "J. Zrake <jzrake@clemson.edu>")]
struct Opts {
    /// Values of a balanced tree to traverse (sorted before building)
    #[clap(short = 'v', long, value_delimiter = ',', default_values = &["10", "20", "30", "40", "50"])]
    values: Vec<i32>,

    /// CBOR file containing a tree shape; overrides --values
    #[clap(short = 's', long)]
    shape: Option<PathBuf>,

    /// Number of independent cursors to run in parallel over the same tree
    #[clap(short = 'r', long, default_value = "1")]
    readers: usize,

    /// CBOR file to write the traversal report to
    #[clap(short = 'o', long)]
    output: Option<PathBuf>,

    #[clap(long, default_value = "info")]
    log_level: log::LevelFilter,
}




/**
 * Summary of one traversal, written to the output file
 */
#[derive(serde::Serialize)]
struct Report {
    values: Vec<i32>,
    len: usize,
    height: usize,
    links_followed: usize,
    readers_agree: bool,
}




// ============================================================================
fn load_tree(opts: &Opts) -> Result<BinaryTree<i32>, Box<dyn std::error::Error>> {
    match &opts.shape {
        Some(path) => {
            info!("reading tree shape from {}", path.display());
            let shape: Shape<i32> = ciborium::de::from_reader(BufReader::new(File::open(path)?))?;
            Ok(BinaryTree::from_shape(shape))
        }
        None => Ok(opts.values.iter().copied().collect()),
    }
}




// ============================================================================
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();
    SimpleLogger::new().with_level(opts.log_level).init()?;

    let tree = load_tree(&opts)?;
    info!("tree has {} nodes and height {}", tree.len(), tree.height());

    let mut cursor = tree.in_order();
    let mut values = Vec::new();

    while cursor.move_next() {
        values.push(*cursor.value()?);
    }
    println!("{}", values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(","));

    let readers_agree = (0..opts.readers)
        .into_par_iter()
        .map(|_| tree.in_order().copied().collect::<Vec<_>>())
        .all(|other| other == values);

    if readers_agree {
        info!("{} parallel readers agree", opts.readers)
    } else {
        warn!("parallel readers disagree")
    }

    if let Some(path) = &opts.output {
        let report = Report {
            len: tree.len(),
            height: tree.height(),
            links_followed: cursor.links_followed(),
            readers_agree,
            values,
        };
        let mut buffer = BufWriter::new(File::create(path)?);
        ciborium::ser::into_writer(&report, &mut buffer)?;
        info!("wrote report to {}", path.display());
    }
    Ok(())
}
