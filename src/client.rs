use log::debug;
use std::io::{BufRead, Write};

use crate::cmd::{QueueOptions, SubsetOptions};
use crate::error::Error;
use crate::utils::queues::RandomizedQueue;

// Token that makes `replay` dequeue instead of enqueue
const DEQUEUE_TOKEN: &str = "-";

fn new_queue(seed: Option<u64>) -> RandomizedQueue<String> {
    match seed {
        Some(seed) => RandomizedQueue::new(seed),
        None => RandomizedQueue::from_entropy(),
    }
}

/// Splits the input into whitespace-delimited tokens.
pub fn read_tokens<B: BufRead>(input: B) -> Result<Vec<String>, Error> {
    let mut tokens = Vec::new();
    for line in input.lines() {
        tokens.extend(line?.split_whitespace().map(str::to_owned));
    }
    debug!("Read {} tokens", tokens.len());
    Ok(tokens)
}

/// Prints `options.k` distinct tokens of the input, one per line, chosen uniformly at random.
pub fn subset<B: BufRead, W: Write>(
    options: &SubsetOptions,
    input: B,
    out: &mut W,
) -> Result<(), Error> {
    let mut queue = new_queue(options.seed);
    queue.extend(read_tokens(input)?);

    if options.k > queue.len() {
        return Err(Error::InvalidCount {
            k: options.k,
            available: queue.len(),
        });
    }

    for _ in 0..options.k {
        writeln!(out, "{}", queue.dequeue()?)?;
    }
    Ok(())
}

/// Enqueues each token and prints a random dequeued item for every `-`.
///
/// A `-` on an empty queue is ignored. The remaining count is printed last.
pub fn replay<B: BufRead, W: Write>(
    options: &QueueOptions,
    input: B,
    out: &mut W,
) -> Result<(), Error> {
    let mut queue = new_queue(options.seed);
    for token in read_tokens(input)? {
        if token != DEQUEUE_TOKEN {
            queue.enqueue(token);
        } else if !queue.is_empty() {
            write!(out, "{} ", queue.dequeue()?)?;
        }
    }
    writeln!(out, "({} left on queue)", queue.len())?;
    Ok(())
}

/// Prints every token once, one per line, in a uniformly random order.
pub fn shuffle<B: BufRead, W: Write>(
    options: &QueueOptions,
    input: B,
    out: &mut W,
) -> Result<(), Error> {
    let mut queue = new_queue(options.seed);
    queue.extend(read_tokens(input)?);
    for token in queue.iter() {
        writeln!(out, "{}", token)?;
    }
    Ok(())
}
