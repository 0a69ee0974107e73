mod logging;

use std::path::PathBuf;

use clap::Parser;
use flatpress_adapter::FlatpressEntryRepository;
use fp_core::application::ConversionServiceImpl;
use fp_core::domain::{DateRange, Markup};
use fp_core::ports::{DocumentWriter, EntryRepository, Result};
use fp_core::utils::parse_date_to_local_timestamp;
use latex_adapter::{CopyingImageResolver, LatexWriterAdapter, DEFAULT_IMAGES_DIR};
use logging::LogDestination;

/// CLI tool to convert Flatpress blog entries into a LaTeX document
#[derive(Parser, Debug)]
#[command(name = "fp2latex", version)]
#[command(about = "Converts Flatpress blog entries into a LaTeX document")]
#[command(
    after_help = "Example: fp2latex --from-date 2023-01-01 --to-date 2023-03-31 \
                  --images /home/user/image1 /home/user/image2 \
                  --content /var/www/html/blog/fp-content/content --output blog"
)]
struct Cli {
    /// Root folder of the entries (fp-content/content)
    #[arg(short = 'c', long = "content", required = true)]
    content: PathBuf,

    /// Keep entries after this date, format YYYY-MM-DD
    #[arg(short = 'f', long = "from-date", required = true)]
    from_date: String,

    /// Keep entries before this date, format YYYY-MM-DD
    #[arg(short = 't', long = "to-date", required = true)]
    to_date: String,

    /// Folders searched, in order, for referenced images
    #[arg(short = 'i', long = "images", num_args = 0..)]
    images: Vec<PathBuf>,

    /// Name of the document to generate, without the .tex extension
    #[arg(short = 'o', long = "output", required = true)]
    output: PathBuf,

    /// Folder that found images are copied into
    #[arg(long = "images-dir", default_value = DEFAULT_IMAGES_DIR)]
    images_dir: PathBuf,

    /// Also write the log to this file
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log debug details
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn run(cli: Cli) -> Result<PathBuf> {
    let date_range = DateRange::new(
        parse_date_to_local_timestamp(&cli.from_date)?,
        parse_date_to_local_timestamp(&cli.to_date)?,
    );

    // Instantiate concrete implementations of secondary adapters
    let entry_repository: Box<dyn EntryRepository> = Box::new(FlatpressEntryRepository::new(
        cli.content,
        Markup::default(),
    ));

    let image_resolver = CopyingImageResolver::new(cli.images, cli.images_dir);
    let document_writer: Box<dyn DocumentWriter> =
        Box::new(LatexWriterAdapter::new(cli.output, Box::new(image_resolver)));

    // Instantiate the core business service with dependency injection
    let service = ConversionServiceImpl::new(entry_repository, document_writer, date_range);
    service.execute_conversion()
}

fn main() {
    let cli = Cli::parse();

    let destination = match cli.log_file.clone() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    logging::initialize(destination, cli.verbose);

    match run(cli) {
        Ok(path) => {
            println!("Successfully converted entries to {}", path.display());
        }
        Err(e) => {
            eprintln!("Error during conversion: {}", e);
            std::process::exit(1);
        }
    }
}
