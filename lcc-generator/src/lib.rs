//! Command handlers of the `lccgen` binary.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lcc_crypto::{new_provider, KeyProvider};
use lcc_license::params::{
    PARAM_BASE64, PARAM_BEGIN_DATE, PARAM_CLIENT_SIGNATURE, PARAM_EXPIRY_DATE, PARAM_EXTRA_DATA,
    PARAM_FEATURE_NAMES, PARAM_PRIMARY_KEY, PARAM_VERSION_FROM, PARAM_VERSION_TO,
};
use lcc_license::{list_projects, InitOutcome, License, Project};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Output name that writes a license to stdout.
pub const STDOUT_LICENSE: &str = "-";

/// Output name that writes a test signature to stdout.
pub const STDOUT_SIGNATURE: &str = "cout";

#[derive(Parser, Debug)]
#[command(name = "lccgen", version)]
#[command(about = "Initialize licensing projects and issue signed licenses")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage projects (one key pair per licensed product)
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Issue licenses
    #[command(subcommand)]
    License(LicenseCommand),

    /// Helpers for testing the licensed application
    #[command(subcommand)]
    Test(TestCommand),
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Create a project folder with a new key pair
    #[command(alias = "initialize")]
    Init(ProjectInitArgs),

    /// List initialized projects
    List(ProjectListArgs),
}

#[derive(Subcommand, Debug)]
pub enum LicenseCommand {
    /// Sign a license and write it (or extend an existing one)
    Issue(LicenseIssueArgs),
}

#[derive(Subcommand, Debug)]
pub enum TestCommand {
    /// Sign a string with a private key
    Sign(TestSignArgs),
}

#[derive(Args, Debug)]
pub struct ProjectInitArgs {
    /// New project name
    #[arg(short = 'n', long)]
    pub project_name: String,

    /// Folder holding all the projects
    #[arg(short, long, env = "LCC_PROJECTS_FOLDER", default_value = "projects")]
    pub projects_folder: PathBuf,

    /// Folder containing a custom public_key.inja template
    #[arg(short, long)]
    pub templates: Option<PathBuf>,

    /// Use an existing private key instead of generating one
    #[arg(long)]
    pub primary_key: Option<PathBuf>,

    /// Overwrite existing keys
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ProjectListArgs {
    /// Folder holding all the projects
    #[arg(short, long, env = "LCC_PROJECTS_FOLDER", default_value = "projects")]
    pub projects_folder: PathBuf,
}

#[derive(Args, Debug)]
pub struct LicenseIssueArgs {
    /// License file to write; may contain folders. `-` prints to stdout
    #[arg(short = 'l', long)]
    pub license_name: String,

    /// Project folder holding the private key
    #[arg(short, long, default_value = ".")]
    pub project_folder: PathBuf,

    /// Encode the license as base64 (e.g. for environment variables)
    #[arg(short, long)]
    pub base64: bool,

    /// Start of validity (YYYY-MM-DD, YYYY/MM/DD or YYYYMMDD)
    #[arg(long)]
    pub valid_from: Option<String>,

    /// End of validity (YYYY-MM-DD, YYYY/MM/DD or YYYYMMDD)
    #[arg(short = 'e', long)]
    pub valid_to: Option<String>,

    /// Signature of the machine the license is bound to
    #[arg(short = 's', long)]
    pub client_signature: Option<String>,

    /// Comma separated features; defaults to the project name
    #[arg(short = 'f', long)]
    pub feature_names: Option<String>,

    /// Private key, when not in the project folder
    #[arg(long)]
    pub primary_key: Option<PathBuf>,

    /// First software version covered (0 = all)
    #[arg(short = 't', long)]
    pub start_version: Option<String>,

    /// Last software version covered (0 = all)
    #[arg(long)]
    pub end_version: Option<String>,

    /// Extra data to include in the license
    #[arg(short = 'x', long)]
    pub extra_data: Option<String>,
}

#[derive(Args, Debug)]
pub struct TestSignArgs {
    /// Data to sign
    #[arg(short, long)]
    pub data: String,

    /// Private key file
    #[arg(short = 'p', long)]
    pub primary_key: PathBuf,

    /// Output file, or `cout` for stdout
    #[arg(short, long)]
    pub output: String,
}

/// Runs a parsed command. Text results (signatures, listings, licenses sent to
/// stdout) go to `out`; logs go through `tracing`.
pub fn run<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    match cli.command {
        Command::Project(ProjectCommand::Init(args)) => project_init(args),
        Command::Project(ProjectCommand::List(args)) => project_list(&args, out),
        Command::License(LicenseCommand::Issue(args)) => license_issue(args, out),
        Command::Test(TestCommand::Sign(args)) => test_sign(&args, out),
    }
}

fn project_init(args: ProjectInitArgs) -> Result<()> {
    let mut project = Project::new(
        &args.project_name,
        args.projects_folder,
        args.templates,
        args.force,
    )?;
    if let Some(key) = args.primary_key {
        project = project.with_primary_key(key);
    }
    match project
        .initialize()
        .with_context(|| format!("Failed to initialize project {}", project.name()))?
    {
        InitOutcome::Created { private_key, .. } => {
            info!(key = %private_key.display(), "Project {} created", project.name());
        }
        InitOutcome::AlreadyInitialized => {
            info!("Project {} already initialized, use --force to overwrite", project.name());
        }
    }
    Ok(())
}

fn project_list<W: Write>(args: &ProjectListArgs, out: &mut W) -> Result<()> {
    for name in list_projects(&args.projects_folder)? {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn license_issue<W: Write>(args: LicenseIssueArgs, out: &mut W) -> Result<()> {
    let output = (args.license_name != STDOUT_LICENSE).then(|| PathBuf::from(&args.license_name));
    let mut license = License::new(output.clone(), &args.project_folder)?;

    let primary_key = args.primary_key.map(|p| p.to_string_lossy().into_owned());
    let params = [
        (PARAM_FEATURE_NAMES, args.feature_names),
        (PARAM_PRIMARY_KEY, primary_key),
        (PARAM_BEGIN_DATE, args.valid_from),
        (PARAM_EXPIRY_DATE, args.valid_to),
        (PARAM_CLIENT_SIGNATURE, args.client_signature),
        (PARAM_VERSION_FROM, args.start_version),
        (PARAM_VERSION_TO, args.end_version),
        (PARAM_EXTRA_DATA, args.extra_data),
        (PARAM_BASE64, args.base64.then(|| "true".to_string())),
    ];
    for (name, value) in params {
        if let Some(value) = value {
            license
                .add_parameter(name, &value)
                .with_context(|| format!("Invalid value for {name}"))?;
        }
    }

    let issued = match output {
        Some(_) => license.write_license()?,
        None => license.issue_to(None, out)?,
    };
    for feature in &issued {
        info!(feature = %feature.name, "License issued");
    }
    Ok(())
}

fn test_sign<W: Write>(args: &TestSignArgs, out: &mut W) -> Result<()> {
    let mut provider = new_provider();
    provider
        .load_private_key_file(&args.primary_key)
        .with_context(|| format!("Failed to load {}", args.primary_key.display()))?;
    let signature = provider.sign_string(&args.data)?;
    if args.output == STDOUT_SIGNATURE {
        writeln!(out, "{signature}")?;
    } else {
        fs::write(&args.output, signature.as_str())
            .with_context(|| format!("Can't create {}", args.output))?;
    }
    Ok(())
}
