use clap::{Parser, Subcommand};
use std::io;
use termorph::config::ExplorerConfig;
use termorph::explorer;
use termorph::settings::Settings;

#[derive(Parser)]
#[command(name = "termorph")]
#[command(author = "Terminal Art Generator")]
#[command(version = "0.1.0")]
#[command(about = "Terminal biomorph breeder: interactive evolution of branching line art", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Breed biomorphs: pick one of 20 mutant offspring as the next parent
    Explore {
        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Color scheme (0=mono, 1=fire, 2=ice, 3=gold, 4=green)
        #[arg(short = 'S', long)]
        scheme: Option<u8>,

        /// Draw every segment with this character instead of slope glyphs
        #[arg(short, long)]
        char: Option<String>,
    },

    /// Render one random biomorph to stdout and exit
    Print {
        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Color scheme (0=mono, 1=fire, 2=ice, 3=gold, 4=green)
        #[arg(short = 'S', long)]
        scheme: Option<u8>,

        /// Draw every segment with this character instead of slope glyphs
        #[arg(short, long)]
        char: Option<String>,
    },
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load();

    let (seed, scheme, line_char, print) = match cli.command {
        Commands::Explore { seed, scheme, char } => (seed, scheme, char, false),
        Commands::Print { seed, scheme, char } => (seed, scheme, char, true),
    };

    let config = ExplorerConfig {
        print,
        seed,
        scheme: scheme.or(settings.explorer.scheme).unwrap_or(0).min(4),
        line_char: line_char
            .or(settings.explorer.line_char)
            .and_then(|s| s.chars().next()),
    };

    explorer::run(config)
}
