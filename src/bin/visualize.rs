extern crate generalized_suffix_tree;
extern crate structopt;

use std::process;

use structopt::StructOpt;

use generalized_suffix_tree::{SuffixTree, TextPair};

#[derive(StructOpt, Debug)]
struct Options {
    #[structopt(short = "i", long = "intermediate")]
    intermediate: bool,
    #[structopt(short = "d", long = "dump")]
    dump: bool,
    #[structopt(name = "FIRST")]
    first: String,
    #[structopt(name = "SECOND")]
    second: String,
}

fn main() {
    let options = Options::from_args();

    let pair = match TextPair::from_lines(&options.first, &options.second) {
        Ok(pair) => pair,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    };

    let mut tree = SuffixTree::new(pair.text());
    for _ in 0..pair.text().len() {
        tree.step();

        if options.intermediate {
            tree.visualize();
            println!("----");
        }
    }

    tree.visualize();

    if options.dump {
        println!("{:?}", tree);
    }
}
