use clap::{Args, Parser, Subcommand, ValueEnum};
use scalable_bloom_rs::{
    BloomFilterOps, BloomFilterStats, BloomResult, FilterConfig, FilterParams,
    HashFunction, ScalableFilter, ScalableFilterConfigBuilder,
    common::bits2hr, fnv64_digest, murmur3_digest,
};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Digest used to derive bit indices
    #[arg(long, global = true, value_enum, default_value_t = Digest::Murmur3)]
    hash: Digest,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Digest {
    Murmur3,
    Fnv,
}

impl Digest {
    fn function(self) -> HashFunction {
        match self {
            Digest::Murmur3 => murmur3_digest,
            Digest::Fnv => fnv64_digest,
        }
    }
}

#[derive(Args)]
struct FilterArgs {
    /// Capacity of each sub-filter
    #[arg(short = 'n', long, default_value = "10000")]
    capacity: usize,

    /// Target false positive rate (between 0 and 1)
    #[arg(short, long, default_value = "0.001")]
    error_rate: f64,

    /// Fill ratio that triggers a new sub-filter
    #[arg(short = 'p', long, default_value = "0.5")]
    fill_ratio: f64,

    /// Error tightening ratio between sub-filters
    #[arg(short = 'r', long, default_value = "0.9")]
    tightening_ratio: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the derived k, m and s for a single filter
    Params {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Insert every line of a file and print filter statistics
    Load {
        /// File with one key per line
        file: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Insert a known key list, then measure false negatives on it and
    /// false positives on a disjoint list
    Test {
        /// Keys to insert
        #[arg(short, long)]
        known: PathBuf,

        /// Keys that were never inserted
        #[arg(short, long)]
        unknown: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> BloomResult<()> {
    let hash_function = cli.hash.function();

    match &cli.command {
        Commands::Params { filter } => {
            let config = FilterConfig {
                capacity: filter.capacity,
                error_rate: filter.error_rate,
                fill_ratio: filter.fill_ratio,
                hash_function,
            };
            config.validate()?;
            let config = config.normalized();
            let params = FilterParams::from(&config);

            println!("Capacity (n):        {}", config.capacity);
            println!("Error rate (e):      {}", config.error_rate);
            println!("Fill ratio (p):      {}", config.fill_ratio);
            println!("Hash values (k):     {}", params.num_hashes);
            println!("Total bits (m):      {}", params.total_bits);
            println!("Partition size (s):  {}", params.partition_size);
            println!("Memory:              {}", bits2hr(params.total_bits));
        }

        Commands::Load { file, filter } => {
            let mut bloom = build_filter(filter, hash_function)?;
            let keys = read_keys(file)?;
            info!(keys = keys.len(), path = %file.display(), "Loading keys");

            for key in &keys {
                bloom.insert(key.as_bytes());
            }
            print_stats(&bloom);
        }

        Commands::Test {
            known,
            unknown,
            filter,
        } => {
            let mut bloom = build_filter(filter, hash_function)?;
            let known_keys = read_keys(known)?;
            let unknown_keys = read_keys(unknown)?;

            let mut false_negatives = 0usize;
            for key in &known_keys {
                bloom.insert(key.as_bytes());
                if !bloom.contains(key.as_bytes()) {
                    false_negatives += 1;
                }
            }

            let false_positives = unknown_keys
                .iter()
                .filter(|key| bloom.contains(key.as_bytes()))
                .count();

            print_stats(&bloom);
            println!(
                "False negatives:     {} ({:.4}%)",
                false_negatives,
                percent(false_negatives, known_keys.len())
            );
            println!(
                "False positives:     {} ({:.4}%)",
                false_positives,
                percent(false_positives, unknown_keys.len())
            );
        }
    }

    Ok(())
}

fn build_filter(
    args: &FilterArgs,
    hash_function: HashFunction,
) -> BloomResult<ScalableFilter> {
    let config = ScalableFilterConfigBuilder::default()
        .capacity(args.capacity)
        .error_rate(args.error_rate)
        .fill_ratio(args.fill_ratio)
        .tightening_ratio(args.tightening_ratio)
        .hash_function(hash_function)
        .build()?;

    ScalableFilter::new(config)
}

fn read_keys(path: &Path) -> BloomResult<Vec<String>> {
    let reader = BufReader::new(File::open(path)?);
    let keys = reader.lines().collect::<std::io::Result<_>>()?;
    Ok(keys)
}

fn print_stats(filter: &ScalableFilter) {
    println!("Inserted:            {}", filter.insert_count());
    println!("Sub-filters:         {}", filter.sub_filter_count());
    println!("Memory:              {}", bits2hr(filter.total_bits()));
    println!("Fill ratio:          {:.4}", filter.fill_ratio());
    println!("Estimated fill:      {:.4}", filter.estimated_fill_ratio());
    println!("Compound error rate: {:.6}", filter.compound_error_rate());
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
