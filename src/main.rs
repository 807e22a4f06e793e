use clap::{ArgAction, Args, Parser, Subcommand};
use git_tracker::commands::*;
use git_tracker::core::{
    config::{ErrorPolicy, PermissionPolicy, TrackerConfig},
    dirs::AppPaths,
    error::{GitTrackerError, Result},
    error_log::{bug_message, log_error},
    print_error, print_error_with_hint,
    prompt::Prompter,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gittracker")]
#[command(about = "Keep track of all your local git repositories with a single command")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Print the directory holding the tracked-repository list and logfile, then exit
    #[arg(long)]
    log_dir: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the status of all tracked repositories (default)
    #[command(visible_alias = "show")]
    Status(StatusArgs),
    /// Search a directory tree for repositories to track
    #[command(visible_alias = "search")]
    Find {
        /// Directory to search under
        #[arg(default_value = ".")]
        topdir: PathBuf,
        /// Directory name or path to skip (repeatable)
        #[arg(short, long)]
        ignore: Vec<String>,
        /// Also search hidden directories
        #[arg(long)]
        search_hidden: bool,
        /// What to do with directories that cannot be read
        #[arg(long, value_enum)]
        permission_errors: Option<PermissionPolicy>,
        /// Only print errors; implies --permission-errors ignore
        #[arg(short, long)]
        quiet: bool,
        /// Track everything found without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Start tracking one or more repositories
    #[command(visible_alias = "track")]
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Add paths that are not repositories without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Stop tracking one or more repositories
    #[command(visible_alias = "rm")]
    Remove {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Remove without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List tracked repositories
    #[command(visible_alias = "ls")]
    List {
        /// Print repository names only
        #[arg(short, long)]
        quiet: bool,
    },
    /// Interactively set up the list of tracked repositories
    Init,
}

#[derive(Args, Default)]
struct StatusArgs {
    /// Increase detail: -v names only, -vv branches and counts, -vvv files and submodules
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// How many levels of submodules to inspect (only with -vvv)
    #[arg(long, value_name = "DEPTH")]
    submodules: Option<usize>,
    /// Write the report to a file instead of the terminal
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,
    /// Disable colored output
    #[arg(long)]
    plain: bool,
    /// What to do when a repository cannot be read
    #[arg(long, value_enum)]
    on_error: Option<ErrorPolicy>,
}

fn run(command: Commands, paths: &AppPaths) -> Result<()> {
    let config = TrackerConfig::load_or_create(&paths.settings_file)?;
    let mut prompter = Prompter::stdio();

    match command {
        Commands::Status(args) => {
            let options = StatusOptions::resolve(
                args.verbose,
                args.submodules,
                args.file,
                args.plain,
                args.on_error,
                &config,
            );
            execute_status(paths, &options, &mut prompter)
        }
        Commands::Find {
            topdir,
            ignore,
            search_hidden,
            permission_errors,
            quiet,
            yes,
        } => {
            let options = FindOptions {
                topdir,
                ignore,
                search_hidden: search_hidden || config.search_hidden,
                permission_errors: permission_errors.unwrap_or(config.permission_errors),
                quiet,
                yes,
            };
            execute_find(paths, &options, &mut prompter).map(|_| ())
        }
        Commands::Add { paths: repos, yes } => {
            execute_add(paths, &repos, yes, &mut prompter).map(|_| ())
        }
        Commands::Remove { paths: repos, yes } => {
            execute_remove(paths, &repos, yes, &mut prompter).map(|_| ())
        }
        Commands::List { quiet } => execute_list(paths, quiet),
        Commands::Init => execute_init(paths, &config, &mut prompter),
    }
}

fn hint(error: &GitTrackerError) -> Option<&'static str> {
    match error {
        GitTrackerError::TrackedListEmpty { .. } => Some(
            "Run `gittracker init`, `gittracker add <path>` or `gittracker find <dir>` to start tracking repositories",
        ),
        GitTrackerError::NotTracked { .. } => {
            Some("Run `gittracker list` to see the repositories GitTracker is tracking")
        }
        GitTrackerError::NoRepositoriesFound { .. } => {
            Some("Use `gittracker add <path>` to track a repository manually")
        }
        _ => None,
    }
}

/// Report `error` and return the process exit code.
fn handle_error(error: GitTrackerError, paths: &AppPaths) -> i32 {
    if let GitTrackerError::Aborted = error {
        return 0;
    }

    if error.is_unexpected() {
        if let Err(log_failure) = log_error(&paths.logfile, &error) {
            log::error!("failed to write logfile: {log_failure}");
        }
        print_error(&error.to_string());
        eprintln!("{}", bug_message(&paths.logfile));
        return 1;
    }

    match hint(&error) {
        Some(hint) => print_error_with_hint(&error.to_string(), hint),
        None => print_error(&error.to_string()),
    }
    1
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag, falling back to RUST_LOG
    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let paths = match AppPaths::resolve() {
        Ok(paths) => paths,
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    };
    log::debug!("using config directory {}", paths.config_dir.display());

    if cli.log_dir {
        println!("{}", paths.log_dir.display());
        return;
    }

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Status(StatusArgs::default()));

    if let Err(e) = run(command, &paths) {
        std::process::exit(handle_error(e, &paths));
    }
}
