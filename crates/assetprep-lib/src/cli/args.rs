use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber;

#[derive(Debug, Clone)]
pub enum Command {
    Manifest {
        package: String,
        config_path: Option<String>,
        endpoint: Option<String>,
    },
    Fetch {
        package: String,
        config_path: Option<String>,
        endpoint: Option<String>,
        output_dir: Option<String>,
        parallelism: Option<usize>,
    },
    Convert {
        package: String,
        config_path: Option<String>,
        endpoint: Option<String>,
        output_dir: Option<String>,
        parallelism: Option<usize>,
        converter_cmd: Option<String>,
        converter_args: Vec<String>,
    },
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "assetprep",
    version,
    about = "Fetch a workshop asset package's files and prepare its primary model for conversion"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count,
        global = true
    )]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Resolve a package's descriptor and print its manifest as JSON
    Manifest {
        #[arg(value_name = "PACKAGE", help = "Package identifier in <author>.<name> form")]
        package: String,

        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Sets a custom config file"
        )]
        config: Option<String>,

        #[arg(long = "endpoint", value_name = "URL", help = "Overrides the registry endpoint")]
        endpoint: Option<String>,
    },

    /// Download every file in a package's manifest and report the primary asset
    Fetch {
        #[arg(value_name = "PACKAGE", help = "Package identifier in <author>.<name> form")]
        package: String,

        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Sets a custom config file"
        )]
        config: Option<String>,

        #[arg(long = "endpoint", value_name = "URL", help = "Overrides the registry endpoint")]
        endpoint: Option<String>,

        #[arg(
            short = 'o',
            long = "output-dir",
            value_name = "DIR",
            help = "Overrides the output directory for downloaded files"
        )]
        output_dir: Option<String>,

        #[arg(
            long = "parallelism",
            value_name = "N",
            help = "Maximum number of simultaneous downloads"
        )]
        parallelism: Option<usize>,
    },

    /// Fetch a package and run the external converter on its primary asset
    Convert {
        #[arg(value_name = "PACKAGE", help = "Package identifier in <author>.<name> form")]
        package: String,

        #[arg(
            short = 'c',
            long = "config",
            value_name = "FILE",
            help = "Sets a custom config file"
        )]
        config: Option<String>,

        #[arg(long = "endpoint", value_name = "URL", help = "Overrides the registry endpoint")]
        endpoint: Option<String>,

        #[arg(
            short = 'o',
            long = "output-dir",
            value_name = "DIR",
            help = "Overrides the output directory for downloaded files"
        )]
        output_dir: Option<String>,

        #[arg(
            long = "parallelism",
            value_name = "N",
            help = "Maximum number of simultaneous downloads"
        )]
        parallelism: Option<usize>,

        #[arg(
            long = "converter-cmd",
            value_name = "CMD",
            help = "External converter executable to run on the primary asset"
        )]
        converter_cmd: Option<String>,

        #[arg(
            long = "converter-arg",
            value_name = "ARG",
            help = "Extra argument passed to the converter (repeatable)",
            action = ArgAction::Append
        )]
        converter_args: Vec<String>,
    },
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    let command = match cli.command {
        CliCommand::Manifest {
            package,
            config,
            endpoint,
        } => Command::Manifest {
            package,
            config_path: config,
            endpoint,
        },
        CliCommand::Fetch {
            package,
            config,
            endpoint,
            output_dir,
            parallelism,
        } => Command::Fetch {
            package,
            config_path: config,
            endpoint,
            output_dir,
            parallelism,
        },
        CliCommand::Convert {
            package,
            config,
            endpoint,
            output_dir,
            parallelism,
            converter_cmd,
            converter_args,
        } => Command::Convert {
            package,
            config_path: config,
            endpoint,
            output_dir,
            parallelism,
            converter_cmd,
            converter_args,
        },
    };

    Args { command, log_level }
}
