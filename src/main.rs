use anyhow::Result;
use clap::{Parser, Subcommand};

mod io;
mod model;
mod scaffold;
mod util;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "scaffold-rust", author, version, about = "Greedy contig scaffolding from read-overlap evidence", arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rate overlaps into adjacency vote tables and save them (.votes)
    Rate {
        /// Overlaps file (PAF, first 11 columns)
        overlaps: String,
        /// Output prefix for the vote table file
        #[arg(short, long, default_value = "overlaps")]
        output: String,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
    /// Join contigs into scaffolds using overlap evidence
    Scaffold {
        /// Contigs FASTA file
        contigs: String,
        /// Overlaps file (PAF, first 11 columns)
        overlaps: String,
        /// Output FASTA path
        output: String,
        /// Load previously rated vote tables (.votes) instead of re-rating
        #[arg(long)]
        votes: Option<String>,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Rate {
            overlaps,
            output,
            threads,
        } => run_rate(&overlaps, &output, threads),
        Commands::Scaffold {
            contigs,
            overlaps,
            output,
            votes,
            threads,
        } => {
            let opt = scaffold::ScaffoldOpt { threads, votes };
            scaffold::run(&contigs, &overlaps, &output, &opt)
        }
    }
}

fn run_rate(overlaps_path: &str, output: &str, threads: usize) -> Result<()> {
    let fh = std::fs::File::open(overlaps_path)
        .map_err(|e| anyhow::anyhow!("cannot open overlaps file '{}': {}", overlaps_path, e))?;
    let overlaps = io::paf::PafReader::new(std::io::BufReader::new(fh)).read_all()?;

    println!("overlaps: {}", overlaps.len());

    let tables = scaffold::vote::rate_overlaps_parallel(&overlaps, threads)?;
    println!("vote entries: {}", tables.num_entries());

    let rated = scaffold::RatedVotes {
        tables,
        meta: scaffold::RateMeta {
            overlaps_file: Some(overlaps_path.to_string()),
            build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
            build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
        },
    };

    let out_path = format!("{}.votes", output);
    rated
        .save_to_file(&out_path)
        .map_err(|e| anyhow::anyhow!("cannot write vote tables to '{}': {}", out_path, e))?;
    println!("vote tables saved: {}", out_path);
    Ok(())
}
