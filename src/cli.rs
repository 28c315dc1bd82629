use crate::infra::{load_subject, parse_overrides, UnlinkedGateway};
use crate::server;
use clap::{Args, Parser, Subcommand};
use id3global::config::AppConfig;
use id3global::error::AppError;
use id3global::telemetry;
use id3global::verification::{
    FakeGateway, GatewayBinding, Profile, Verifiable, VerificationService,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "id3global-verify",
    about = "Build and submit ID3global identity verification requests",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the GlobalInputData payload built from a subject record
    Identity(IdentityArgs),
    /// Submit an AuthenticateSP request for a subject record
    Verify(VerifyArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
struct IdentityArgs {
    /// JSON subject record (attributes, relations, mapping, policy)
    #[arg(long)]
    subject: PathBuf,
    /// Field override as Field.Path=value, taken as literal text; repeatable
    #[arg(long = "override", value_name = "FIELD=VALUE")]
    overrides: Vec<String>,
    /// Override a field to absent; repeatable
    #[arg(long = "clear", value_name = "FIELD")]
    cleared: Vec<String>,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// JSON subject record (attributes, relations, mapping, policy)
    #[arg(long)]
    subject: PathBuf,
    /// ID3global profile identifier
    #[arg(long)]
    profile_id: String,
    /// Profile version; 0 selects the latest
    #[arg(long, default_value_t = 0)]
    profile_version: u32,
    /// Customer reference echoed back by the service
    #[arg(long)]
    customer_reference: Option<String>,
    /// Field override as Field.Path=value, taken as literal text; repeatable
    #[arg(long = "override", value_name = "FIELD=VALUE")]
    overrides: Vec<String>,
    /// Override a field to absent; repeatable
    #[arg(long = "clear", value_name = "FIELD")]
    cleared: Vec<String>,
    /// Answer with the fake gateway using this band instead of the configured binding
    #[arg(long)]
    fake_band: Option<String>,
    /// Score reported by the fake gateway
    #[arg(long, default_value_t = 3000)]
    fake_score: i32,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Identity(args) => run_identity(args),
        Command::Verify(args) => run_verify(args),
    }
}

fn run_identity(args: IdentityArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let subject = load_subject(&args.subject)?;
    let overrides = parse_overrides(&args.overrides, &args.cleared)?;

    let identity = subject.make_identity(&overrides)?;
    println!("{}", serde_json::to_string_pretty(&identity)?);
    Ok(())
}

fn run_verify(args: VerifyArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let service = match args.fake_band {
        Some(band) => VerificationService::new(Arc::new(FakeGateway::new(band, args.fake_score))),
        None => bind_service(config.gateway_binding())?,
    };

    let subject = load_subject(&args.subject)?;
    let overrides = parse_overrides(&args.overrides, &args.cleared)?;
    let profile = Profile::new(args.profile_id).with_version(args.profile_version);

    let identity = subject.make_identity(&overrides)?;
    let band =
        service.verify_identity(&identity, &profile, args.customer_reference.as_deref())?;

    println!("Identity verified: {band}");
    Ok(())
}

pub(crate) fn bind_service(binding: GatewayBinding) -> Result<VerificationService, AppError> {
    Ok(VerificationService::from_binding(
        binding,
        UnlinkedGateway::connect,
    )?)
}
