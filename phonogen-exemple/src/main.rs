use std::env;
use std::error::Error;
use std::time::{SystemTime, UNIX_EPOCH};

use log::info;
use phonogen_core::{Engine, Variety, WordShape};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Parses the positional argument at `index`, or returns `default` when absent.
fn arg<T>(args: &[String], index: usize, default: T) -> Result<T, Box<dyn Error>>
where
    T: std::str::FromStr,
    T::Err: Error + 'static,
{
    match args.get(index) {
        Some(value) => Ok(value.parse::<T>()?),
        None => Ok(default),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Usage: phonogen-exemple [count] [max_syllables] [variety] [seed]
    let args: Vec<String> = env::args().skip(1).collect();
    let count: usize = arg(&args, 0, 100)?;
    let max_syllables: usize = arg(&args, 1, 3)?;
    let variety: Variety = arg(&args, 2, Variety::AmericanEnglish)?;

    // Without a seed argument every run differs
    let seed: u64 = match args.get(3) {
        Some(value) => value.parse()?,
        None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64,
    };

    // Rejects a zero syllable bound before building anything
    let shape = WordShape::new(max_syllables)?;

    let engine = Engine::new(variety)?;
    info!("Generating {count} words from {variety} with seed {seed}");

    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..count {
        println!("{}", engine.generate(&mut rng, &shape)?.text);
    }

    Ok(())
}
