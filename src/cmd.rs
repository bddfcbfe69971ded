use argh::FromArgs;
use log::debug;
use std::io::{self, BufWriter, Write};

use crate::client;
use crate::error::Error;

#[derive(FromArgs, PartialEq, Debug)]
#[argh(description = "Pick tokens from standard input uniformly at random")]
struct Global {
    #[argh(subcommand)]
    nested: SubCommands,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
enum SubCommands {
    Subset(Subset),
    Replay(Replay),
    Shuffle(Shuffle),
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "subset",
    description = "Print k distinct tokens chosen uniformly at random"
)]
struct Subset {
    #[argh(positional, description = "number of tokens to print")]
    k: usize,

    #[argh(
        option,
        short = 's',
        long = "seed",
        description = "seed for a reproducible selection"
    )]
    seed: Option<u64>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "replay",
    description = "Enqueue every token, dequeue a random one on each '-'"
)]
struct Replay {
    #[argh(
        option,
        short = 's',
        long = "seed",
        description = "seed for a reproducible run"
    )]
    seed: Option<u64>,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "shuffle",
    description = "Print every token once in a random order"
)]
struct Shuffle {
    #[argh(
        option,
        short = 's',
        long = "seed",
        description = "seed for a reproducible order"
    )]
    seed: Option<u64>,
}

#[derive(Debug, Default, PartialEq)]
pub struct SubsetOptions {
    pub k: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Default, PartialEq)]
pub struct QueueOptions {
    pub seed: Option<u64>,
}

pub fn run() -> Result<(), Error> {
    let args: Global = argh::from_env();
    let stdin = io::stdin().lock();
    let mut out = BufWriter::new(io::stdout().lock());

    match args.nested {
        SubCommands::Subset(subset) => {
            let options = SubsetOptions {
                k: subset.k,
                seed: subset.seed,
            };
            debug!("Selecting with options: {:?}", options);
            client::subset(&options, stdin, &mut out)?;
        }
        SubCommands::Replay(replay) => {
            let options = QueueOptions { seed: replay.seed };
            debug!("Replaying with options: {:?}", options);
            client::replay(&options, stdin, &mut out)?;
        }
        SubCommands::Shuffle(shuffle) => {
            let options = QueueOptions { seed: shuffle.seed };
            debug!("Shuffling with options: {:?}", options);
            client::shuffle(&options, stdin, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
