use anyhow::Result;
use clap::Parser;
use goman::commands::{self, Config, OutputFormat};
use goman::runtime::RealRuntime;
use std::path::PathBuf;

/// goman - manage binaries installed with `go install`
///
/// Tracks each installed binary's source, requested version, and last
/// update time in a local JSON registry, and replays that record set for
/// update, uninstall, export, and import.
///
/// Examples:
///   goman install github.com/user/tool@latest
#[derive(Parser, Debug)]
#[command(author, version = env!("GOMAN_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration directory (also via GOMAN_CONFIG_DIR)
    #[arg(
        long = "config-dir",
        env = "GOMAN_CONFIG_DIR",
        value_name = "PATH",
        global = true
    )]
    config_dir: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Install packages and record them in the registry
    Install(InstallArgs),

    /// Update tracked packages to their latest versions
    Update(UpdateArgs),

    /// Uninstall packages and drop them from the registry
    Uninstall(UninstallArgs),

    /// List tracked packages
    List(ListArgs),

    /// Export the registry to a file
    Export(FileArgs),

    /// Dump the registry to a file (legacy alias of export)
    Dump(FileArgs),

    /// Import a registry file, replacing the current registry
    Import(FileArgs),
}

#[derive(clap::Args, Debug)]
struct InstallArgs {
    /// Packages to install, as source@version
    #[arg(value_name = "SOURCE@VERSION")]
    identifiers: Vec<String>,

    /// Force the name of the binary (defaults to the name the installer uses)
    #[arg(long, short = 'n')]
    name: Option<String>,
}

#[derive(clap::Args, Debug)]
struct UpdateArgs {
    /// Name of the package to update (default: all latest-tracked packages)
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Also update packages pinned to a non-latest version
    #[arg(long, short = 'f')]
    force: bool,
}

#[derive(clap::Args, Debug)]
struct UninstallArgs {
    /// Names of the packages to uninstall
    #[arg(value_name = "NAME", required = true)]
    names: Vec<String>,
}

#[derive(clap::Args, Debug)]
struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,
}

#[derive(clap::Args, Debug)]
struct FileArgs {
    /// File path (defaults to a file in the home directory)
    #[arg(long, short = 'f', value_name = "PATH")]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = RealRuntime;
    let config = Config::new(&runtime, cli.config_dir)?;

    match cli.command {
        Commands::Install(args) => commands::install(
            &runtime,
            &args.identifiers,
            args.name.as_deref(),
            &config,
        ),
        Commands::Update(args) => {
            commands::update(&runtime, args.name.as_deref(), args.force, &config)
        }
        Commands::Uninstall(args) => commands::uninstall(&runtime, &args.names, &config),
        Commands::List(args) => commands::list(&runtime, args.output, &config),
        Commands::Export(args) => commands::export(&runtime, args.file, &config),
        Commands::Dump(args) => commands::dump(&runtime, args.file, &config),
        Commands::Import(args) => commands::import(&runtime, args.file, &config),
    }
}
