use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Result};
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use codenote_app::domain::models::LocationBox;
use codenote_app::{
    AnnotationResult, Config, ConfigKey, FileCredentialStore, InputTab, MemoryLocation, Runtime,
    RuntimeProps,
};
use codenote_client::BackendClientFactory;
use codenote_types::Repository;
use log::LevelFilter;
use tokio::io::AsyncReadExt;

#[derive(Parser, Debug)]
#[clap(
    name = "codenote",
    author,
    version = "0.1.0",
    about = "Annotate source code with generated comments"
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    #[clap(long, short, global = true, default_value = "warn")]
    log_level: String,

    #[clap(long, global = true, help = "Write logs to this file instead of stderr")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the backend is up
    Health,
    /// Sign in with GitHub
    Login {
        #[clap(
            long,
            help = "The address the browser was sent back to after signing in"
        )]
        callback: Option<String>,
    },
    /// Sign out and forget the stored credential
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List the repositories you can browse
    Repos,
    /// List a directory of a repository
    Browse {
        /// Repository as owner/name
        repository: String,
        /// Directory inside the repository, root when omitted
        path: Option<String>,
    },
    /// Annotate a local file, or standard input
    Annotate {
        #[clap(long, short)]
        file: Option<PathBuf>,
    },
    /// Annotate a file stored in a GitHub repository
    AnnotateRepo {
        /// Repository as owner/name
        repository: String,
        /// File path inside the repository
        path: String,
    },
    /// Configuration helpers
    Config {
        #[clap(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print a commented config file with every default
    Default,
}

fn command() -> clap::Command {
    return Config::args()
        .into_iter()
        .fold(Cli::command(), |cmd, arg| cmd.arg(arg));
}

fn init_logging(cli: &Cli) -> Result<()> {
    let log_level_filter = cli.log_level.parse().unwrap_or(LevelFilter::Warn);
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level_filter);

    if let Some(path) = &cli.log_file {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }

    builder.init();
    return Ok(());
}

fn start(location: LocationBox) -> Result<Runtime> {
    let backend_client = BackendClientFactory::create_http_client(
        Config::get(ConfigKey::BackendUrl),
        Config::request_timeout()?,
    );

    return Ok(Runtime::start(RuntimeProps {
        backend_client,
        credentials: Box::new(FileCredentialStore::new(PathBuf::from(Config::get(
            ConfigKey::CredentialFile,
        )))),
        location,
        language: Config::language()?,
        comment_level: Config::comment_level()?,
    }));
}

/// Starts a runtime and restores the stored session, if any.
async fn restore() -> Result<Runtime> {
    let mut app = start(Box::new(MemoryLocation::new(&Config::get(
        ConfigKey::BackendUrl,
    ))))?;
    app.bootstrap()?;
    app.settle().await?;

    return Ok(app);
}

async fn signed_in() -> Result<Runtime> {
    let app = restore().await?;
    if !app.auth.is_authenticated() {
        bail!("Not signed in. Run `codenote login` first.");
    }

    return Ok(app);
}

fn split_repository(full_name: &str) -> Result<Repository> {
    match full_name.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {}
        _ => bail!("Repository must be given as owner/name, got '{full_name}'"),
    }

    return Ok(Repository {
        full_name: full_name.to_string(),
        description: None,
        language: None,
        updated_at: String::new(),
        private: false,
        html_url: None,
    });
}

/// Opens `repository` and descends directory by directory to `path`.
async fn walk_to(app: &mut Runtime, full_name: &str, path: &str) -> Result<()> {
    let repository = match app
        .browser
        .repositories()
        .iter()
        .find(|r| r.full_name == full_name)
    {
        Some(repository) => repository.clone(),
        None => split_repository(full_name)?,
    };

    app.select_repository(&repository)?;
    app.settle().await?;

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        let entry = app
            .browser
            .state()
            .entries
            .iter()
            .find(|e| e.is_dir() && e.name == segment)
            .cloned()
            .ok_or_else(|| {
                anyhow!(
                    "No directory '{segment}' in '/{}'",
                    app.browser.state().current_path
                )
            })?;

        app.open_entry(&entry)?;
        app.settle().await?;
        if app.browser.state().current_path != entry.path {
            bail!("Could not list '/{}'", entry.path);
        }
    }

    return Ok(());
}

/// Writes annotated code to stdout and a diagnostic to stderr. Returns the
/// process exit status.
fn report(result: &AnnotationResult) -> u8 {
    if result.is_diagnostic() {
        eprintln!("{}", result.annotated_code);
        return 1;
    }

    println!("{}", result.annotated_code);
    return 0;
}

fn print_result(app: &Runtime) -> Result<ExitCode> {
    let result = app
        .result()
        .ok_or_else(|| anyhow!("The backend returned no result"))?;

    return Ok(ExitCode::from(report(result)));
}

async fn health() -> Result<()> {
    let mut app = start(Box::new(MemoryLocation::new(&Config::get(
        ConfigKey::BackendUrl,
    ))))?;
    app.health_check()?;
    app.settle().await?;

    if app.backend_healthy != Some(true) {
        bail!(
            "Backend at {} is not reachable",
            Config::get(ConfigKey::BackendUrl)
        );
    }

    println!("Backend at {} is healthy", Config::get(ConfigKey::BackendUrl));
    return Ok(());
}

async fn login(callback: Option<String>) -> Result<()> {
    let href = callback.unwrap_or_else(|| Config::get(ConfigKey::BackendUrl));
    let mut app = start(Box::new(MemoryLocation::new(&href)))?;
    app.bootstrap()?;
    app.settle().await?;

    if !app.auth.is_authenticated() {
        app.login();
        println!("Open this address in a browser to sign in with GitHub:\n");
        println!("  {}\n", app.auth.location_href());
        println!("Then run `codenote login --callback <address you were sent back to>`.");
        return Ok(());
    }

    match app.user() {
        Some(user) => println!("Signed in as {}", user.login),
        None => println!("Signed in, but the profile could not be loaded"),
    }

    return Ok(());
}

async fn logout() -> Result<()> {
    let mut app = restore().await?;
    let was_signed_in = app.auth.is_authenticated();
    app.logout()?;
    app.settle().await?;

    if was_signed_in {
        println!("Signed out");
    } else {
        println!("Not signed in");
    }

    return Ok(());
}

async fn whoami() -> Result<()> {
    let app = signed_in().await?;
    match app.user() {
        Some(user) => match &user.name {
            Some(name) => println!("{} ({name})", user.login),
            None => println!("{}", user.login),
        },
        None => bail!("Signed in, but the profile could not be loaded"),
    }

    return Ok(());
}

async fn repos() -> Result<()> {
    let app = signed_in().await?;
    for repository in app.browser.repositories() {
        println!(
            "{:<40} {:<12} {}{}",
            repository.full_name,
            repository.language.as_deref().unwrap_or("-"),
            repository.updated_at,
            if repository.private { " (private)" } else { "" }
        );
    }

    return Ok(());
}

async fn browse(full_name: &str, path: Option<String>) -> Result<()> {
    let mut app = signed_in().await?;
    walk_to(&mut app, full_name, path.as_deref().unwrap_or("")).await?;

    for entry in &app.browser.state().entries {
        if entry.is_dir() {
            println!("{}/", entry.name);
        } else {
            println!("{}", entry.name);
        }
    }

    return Ok(());
}

async fn annotate(file: Option<PathBuf>) -> Result<ExitCode> {
    let mut app = start(Box::new(MemoryLocation::new(&Config::get(
        ConfigKey::BackendUrl,
    ))))?;

    match file {
        Some(path) => {
            let content = tokio::fs::read_to_string(&path).await?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            app.upload_file(&name, &content)?;
            app.set_tab(InputTab::Upload);
        }
        None => {
            let mut content = String::new();
            tokio::io::stdin().read_to_string(&mut content).await?;
            app.set_code(&content);
            app.set_tab(InputTab::Paste);
        }
    }

    app.submit()?;
    app.settle().await?;

    return print_result(&app);
}

async fn annotate_repo(full_name: &str, path: &str) -> Result<ExitCode> {
    let mut app = signed_in().await?;
    let (dir, _) = path.rsplit_once('/').unwrap_or(("", path));
    walk_to(&mut app, full_name, dir).await?;

    let entry = app
        .browser
        .state()
        .entries
        .iter()
        .find(|e| e.is_file() && e.path == path)
        .cloned()
        .ok_or_else(|| anyhow!("No file '{path}' in {full_name}"))?;
    app.open_entry(&entry)?;
    app.set_tab(InputTab::Github);
    app.submit()?;
    app.settle().await?;

    return print_result(&app);
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cmd = command();
    let matches = cmd.clone().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;
    init_logging(&cli)?;

    let mut arg_matches = vec![&matches];
    if let Some((_, sub_matches)) = matches.subcommand() {
        arg_matches.push(sub_matches);
    }
    Config::load(cmd.clone(), arg_matches).await?;
    log::debug!("running {:?}", cli.command);

    match cli.command {
        Commands::Health => health().await?,
        Commands::Login { callback } => login(callback).await?,
        Commands::Logout => logout().await?,
        Commands::Whoami => whoami().await?,
        Commands::Repos => repos().await?,
        Commands::Browse { repository, path } => browse(&repository, path).await?,
        Commands::Annotate { file } => return annotate(file).await,
        Commands::AnnotateRepo { repository, path } => {
            return annotate_repo(&repository, &path).await
        }
        Commands::Config { action } => match action {
            ConfigCommands::Default => println!("{}", Config::serialize_default(cmd)),
        },
    }

    return Ok(ExitCode::SUCCESS);
}

#[cfg(test)]
mod tests {
    use codenote_client::ClientError;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn test_config_args_are_global() {
        let matches = command()
            .try_get_matches_from(vec!["codenote", "repos", "--language", "go"])
            .unwrap();
        let (_, sub_matches) = matches.subcommand().unwrap();

        assert_eq!(
            sub_matches
                .get_one::<String>(&ConfigKey::Language.to_string())
                .map(String::as_str),
            Some("go")
        );
    }

    #[test]
    fn test_diagnostics_fail_the_process() {
        let diagnostic = AnnotationResult::diagnostic(&ClientError::Server {
            status: 500,
            detail: Some("quota exceeded".to_string()),
        });
        assert_eq!(report(&diagnostic), 1);
        assert_eq!(report(&AnnotationResult::annotated("# ok".to_string())), 0);
    }

    #[test]
    fn test_repository_must_have_an_owner() {
        assert!(split_repository("hello").is_err());
        assert!(split_repository("/hello").is_err());
        assert_eq!(split_repository("octocat/hello").unwrap().name(), "hello");
    }
}
