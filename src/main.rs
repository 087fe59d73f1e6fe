use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use vocal_feedback::{
    analysis::{AnalysisResult, MockAnalyzer, Recording},
    compare::Comparison,
    config::Config,
    report,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "vocal_feedback")]
#[command(author = "Ian Lintner")]
#[command(version = "0.1.0")]
#[command(about = "Vocal performance feedback and progress tracking", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Seed for the mock analyzer
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a single recording
    Analyze {
        /// Audio file to analyse
        file: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Save the result as JSON for a later `diff`
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Analyse two recordings and compare them
    Compare {
        /// Earlier recording
        previous: String,

        /// Later recording
        current: String,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two previously saved analysis results
    Diff {
        /// Earlier analysis JSON file
        previous: String,

        /// Later analysis JSON file
        current: String,

        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web interface
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate default configuration file
    GenerateConfig {
        /// Output file path
        #[arg(default_value = "config.json")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load or create config
    let mut config = if let Some(path) = &cli.config {
        Config::from_file(path)?
    } else {
        Config::default()
    };

    // Override with CLI arguments
    config.verbose |= cli.verbose;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    // Initialize logger
    let level = if config.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match cli.command {
        Commands::Analyze { file, json, output } => {
            let analyzer = MockAnalyzer::from_config(&config);
            let recording = Recording::from_path(&file)?;

            info!("Analysing {}...", recording.file_name);
            let result = analyzer.analyze(&recording).await?;

            if let Some(path) = output {
                result.to_file(&path)?;
                info!("Analysis saved to {}", path);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::render_analysis(&result));
            }
            Ok(())
        }

        Commands::Compare {
            previous,
            current,
            json,
        } => {
            let analyzer = MockAnalyzer::from_config(&config);
            let previous = Recording::from_path(&previous)?;
            let current = Recording::from_path(&current)?;

            info!(
                "Analysing {} and {}...",
                previous.file_name, current.file_name
            );
            let (previous, current) = analyzer.analyze_pair(&previous, &current).await?;
            print_comparison(&previous, &current, json)
        }

        Commands::Diff {
            previous,
            current,
            json,
        } => {
            let previous = AnalysisResult::from_file(&previous)?;
            let current = AnalysisResult::from_file(&current)?;
            print_comparison(&previous, &current, json)
        }

        Commands::Serve { port } => {
            if let Some(port) = port {
                config.web_port = port;
            }
            config.validate()?;

            let server = WebServer::new(&config);
            server.start().await
        }

        Commands::GenerateConfig { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Configuration file generated: {}", output);
            Ok(())
        }
    }
}

fn print_comparison(previous: &AnalysisResult, current: &AnalysisResult, json: bool) -> Result<()> {
    let comparison = Comparison::between(&previous.snapshot, &current.snapshot)?;
    info!(
        "{} of {} metrics improved",
        comparison.improved_count(),
        comparison.reports.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
    } else {
        println!("{} -> {}", previous.file_name, current.file_name);
        print!("{}", report::render_comparison(&comparison));
    }
    Ok(())
}
