extern crate generalized_suffix_tree;
extern crate structopt;

use std::error::Error;
use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

use structopt::StructOpt;

use generalized_suffix_tree::{write_description, SuffixTree, TextPair};

#[derive(StructOpt)]
struct Options {
    #[structopt(short = "f", long = "file", parse(from_os_str))]
    file_path: Option<PathBuf>,
    #[structopt(name = "FIRST")]
    first: Option<String>,
    #[structopt(name = "SECOND")]
    second: Option<String>,
}

fn main() {
    if let Err(error) = run(Options::from_args()) {
        eprintln!("{}", error);
        process::exit(1);
    }
}

fn run(options: Options) -> Result<(), Box<dyn Error>> {
    let (first, second) = match (options.first, options.second) {
        (Some(first), Some(second)) => (first, second),
        (Some(_), None) => return Err("expected two strings".into()),
        _ => {
            if let Some(path) = options.file_path {
                read_lines(&mut BufReader::new(File::open(path)?))?
            } else {
                let stdin = io::stdin();
                let mut lock = stdin.lock();
                read_lines(&mut lock)?
            }
        }
    };

    let pair = TextPair::from_lines(&first, &second)?;
    let tree = SuffixTree::from_text(pair.text());

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_description(&tree, pair.boundary(), &mut out)?;

    Ok(())
}

fn read_lines<R: BufRead>(reader: &mut R) -> Result<(String, String), Box<dyn Error>> {
    let mut first = String::new();
    let mut second = String::new();
    reader.read_line(&mut first)?;
    reader.read_line(&mut second)?;

    Ok((trimmed(first), trimmed(second)))
}

fn trimmed(mut line: String) -> String {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }

    line
}
