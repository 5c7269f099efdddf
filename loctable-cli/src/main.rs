use clap::{Parser, Subcommand};
use loctable::{TableCodec, convert_auto};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a localization file to the other representation.
    ///
    /// The direction is inferred from the file extensions: a .json
    /// document becomes a .csv translation table and vice versa.
    Convert {
        /// The input file to process (.json or .csv)
        #[arg(short, long)]
        input: String,

        /// The output file to write the results to
        #[arg(short, long)]
        output: String,

        /// Comma-separated locale tags defining the column order
        /// (defaults to "en,fi")
        #[arg(short, long)]
        locales: Option<String>,
    },
}

fn main() {
    let args = Args::parse();

    match args.commands {
        Commands::Convert {
            input,
            output,
            locales,
        } => {
            let result = match locales {
                Some(tags) => TableCodec::with_locales(tags.split(',').map(str::trim))
                    .and_then(|codec| codec.convert_auto(&input, &output)),
                None => convert_auto(&input, &output),
            };
            if let Err(e) = result {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
