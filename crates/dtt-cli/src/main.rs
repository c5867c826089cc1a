//! Drive Time Tales publisher CLI.
//!
//! Registers locally produced audio dramas with the catalog: `publish` for
//! a single audio file with metadata flags, `publish-project` for an
//! authoring project folder, `list` to query what is live. Endpoints and
//! credentials come from the environment (see .env.example).

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dtt_cli::{clean_dropped_path, format_usd, init_tracing};
use dtt_client::api::ApiClient;
use dtt_client::postgrest::CatalogDbClient;
use dtt_core::models::{StoryInput, StoryQuery};
use dtt_core::normalize::{
    story_record, CoverFailurePolicy, GenreFallback, PricingPolicy, PublishPolicy,
};
use dtt_core::{Config, PublishTargetKind};
use dtt_publish::{
    load_project, ApiTarget, DirectTarget, PublishRequest, PublishTarget, Publisher, SampleCutter,
};
use dtt_storage::create_storage;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "dtt", about = "Drive Time Tales publisher")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a single audio file with metadata from flags
    Publish(PublishArgs),
    /// Publish an authoring project folder (reads project.json)
    PublishProject(PublishProjectArgs),
    /// List published stories, most played first
    List(ListArgs),
}

#[derive(Args)]
struct PublishArgs {
    /// Path to the audio file (MP3)
    audio: PathBuf,
    /// Story title
    #[arg(short, long)]
    title: String,
    /// Author shown in the catalog
    #[arg(short, long)]
    author: Option<String>,
    /// Genre, mapped onto the catalog genres
    #[arg(short, long)]
    genre: Option<String>,
    /// Duration in minutes
    #[arg(short, long, default_value = "30")]
    duration: u32,
    /// Story description (truncated to 500 characters)
    #[arg(long)]
    description: Option<String>,
    /// Pre-cut sample file to upload
    #[arg(short, long)]
    sample: Option<PathBuf>,
    /// Cut a sample from the audio when none is supplied
    #[arg(long)]
    create_sample: bool,
    /// Promo line shown on the story card
    #[arg(long)]
    promo: Option<String>,
    /// Feature the story on the home page
    #[arg(long)]
    featured: bool,
    /// Override the derived credit cost
    #[arg(long)]
    credits: Option<u32>,
    /// Override the genre card gradient
    #[arg(long)]
    color: Option<String>,
    #[command(flatten)]
    route: RouteArgs,
}

#[derive(Args)]
struct PublishProjectArgs {
    /// Project folder; prompted for when omitted
    folder: Option<PathBuf>,
    /// Feature the story on the home page
    #[arg(long)]
    featured: bool,
    #[command(flatten)]
    route: RouteArgs,
}

#[derive(Args)]
struct ListArgs {
    /// Filter by catalog genre
    #[arg(long)]
    genre: Option<String>,
    /// Only featured stories
    #[arg(long)]
    featured: bool,
    /// Maximum number of stories
    #[arg(long)]
    limit: Option<u32>,
    /// Where to read from
    #[arg(long, value_enum, default_value = "api")]
    target: TargetArg,
}

/// Route and policy overrides shared by the publish commands. Each command
/// has its own defaults; these flags override them.
#[derive(Args)]
struct RouteArgs {
    /// Where to publish
    #[arg(long, value_enum)]
    target: Option<TargetArg>,
    /// Site base URL (overrides DTT_API_URL)
    #[arg(long)]
    api_url: Option<String>,
    /// Price derivation to apply
    #[arg(long, value_enum)]
    pricing: Option<PricingArg>,
    /// Fallback for genres outside the catalog mapping
    #[arg(long, value_enum)]
    genre_fallback: Option<GenreFallbackArg>,
    /// Whether a failed cover upload aborts the publish
    #[arg(long, value_enum)]
    cover_failure: Option<CoverFailureArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TargetArg {
    Api,
    Direct,
}

#[derive(Clone, Copy, ValueEnum)]
enum PricingArg {
    /// Credits only; the site prices by credits
    Credits,
    /// Credits plus a dollar price from the duration table
    Table,
}

#[derive(Clone, Copy, ValueEnum)]
enum GenreFallbackArg {
    /// Keep the raw genre, title-cased
    TitleCase,
    /// Replace it with Drama
    Drama,
}

#[derive(Clone, Copy, ValueEnum)]
enum CoverFailureArg {
    Fatal,
    Skip,
}

impl From<TargetArg> for PublishTargetKind {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::Api => PublishTargetKind::Api,
            TargetArg::Direct => PublishTargetKind::Direct,
        }
    }
}

fn apply_policy(mut policy: PublishPolicy, route: &RouteArgs) -> PublishPolicy {
    if let Some(pricing) = route.pricing {
        policy.pricing = match pricing {
            PricingArg::Credits => PricingPolicy::CreditLadder,
            PricingArg::Table => PricingPolicy::PriceTable,
        };
    }
    if let Some(fallback) = route.genre_fallback {
        policy.genre_fallback = match fallback {
            GenreFallbackArg::TitleCase => GenreFallback::TitleCase,
            GenreFallbackArg::Drama => GenreFallback::Drama,
        };
    }
    if let Some(cover) = route.cover_failure {
        policy.cover_failure = match cover {
            CoverFailureArg::Fatal => CoverFailurePolicy::Fatal,
            CoverFailureArg::Skip => CoverFailurePolicy::Skip,
        };
    }
    policy
}

fn resolve_api_url(config: &Config, route: &RouteArgs) -> String {
    route
        .api_url
        .clone()
        .unwrap_or_else(|| config.api_url.clone())
}

async fn build_target(
    kind: PublishTargetKind,
    config: &Config,
    api_url: &str,
) -> anyhow::Result<Arc<dyn PublishTarget>> {
    let timeout = Duration::from_secs(config.http_timeout_secs);

    match kind {
        PublishTargetKind::Api => {
            let client = ApiClient::new(api_url.to_string(), timeout)?;
            Ok(Arc::new(ApiTarget::new(client)))
        }
        PublishTargetKind::Direct => {
            config.validate_direct()?;
            let storage = create_storage(config).await?;
            let supabase_url = config
                .supabase_url
                .clone()
                .context("SUPABASE_URL must be set for direct publishing")?;
            let service_key = config
                .supabase_service_key
                .clone()
                .context("SUPABASE_SERVICE_KEY must be set for direct publishing")?;
            let db = CatalogDbClient::new(supabase_url, service_key, timeout)?;
            Ok(Arc::new(DirectTarget::new(storage, db)))
        }
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn prompt_for_folder() -> anyhow::Result<PathBuf> {
    print!("Drag your project folder here and press Enter: ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    let cleaned = clean_dropped_path(&line);
    if cleaned.is_empty() {
        anyhow::bail!("No folder given");
    }
    Ok(PathBuf::from(cleaned))
}

async fn cmd_publish(args: PublishArgs) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let api_url = resolve_api_url(&config, &args.route);
    let kind = args
        .route
        .target
        .map(PublishTargetKind::from)
        .unwrap_or(PublishTargetKind::Api);
    let target = build_target(kind, &config, &api_url).await?;
    let policy = apply_policy(PublishPolicy::api(), &args.route);
    let sampler = SampleCutter::new(config.ffmpeg_path.clone(), config.sample_seconds);

    let input = StoryInput {
        title: args.title.clone(),
        author: args.author,
        genre: args.genre,
        description: args.description,
        duration_secs: args.duration * 60,
        promo_text: args.promo,
        is_featured: args.featured,
        credits_override: args.credits,
        color_override: args.color,
    };

    println!("Publishing '{}' to Drive Time Tales...", args.title);
    if args.create_sample && args.sample.is_none() {
        println!("Creating {}-minute sample...", config.sample_seconds / 60);
    }

    let request = PublishRequest {
        audio_path: args.audio,
        cover_path: None,
        sample_path: args.sample,
        create_sample: args.create_sample,
        input,
    };

    let outcome = Publisher::new(target, policy, sampler)
        .publish(&request)
        .await?;

    println!();
    println!("SUCCESS! Story published to Drive Time Tales");
    println!("  Story ID: {}", outcome.story.id);
    println!("  Audio: {}", outcome.audio_url);
    if let Some(sample) = &outcome.sample_url {
        println!("  Sample: {}", sample);
    }
    println!("  View at: {}/story/{}", api_url, outcome.story.id);

    Ok(())
}

async fn cmd_publish_project(args: PublishProjectArgs) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let folder = match args.folder {
        Some(folder) => folder,
        None => prompt_for_folder()?,
    };
    if !folder.is_dir() {
        anyhow::bail!("Not a project folder: {}", folder.display());
    }

    let api_url = resolve_api_url(&config, &args.route);
    let kind = args
        .route
        .target
        .map(PublishTargetKind::from)
        .unwrap_or(PublishTargetKind::Direct);
    let target = build_target(kind, &config, &api_url).await?;
    let policy = apply_policy(PublishPolicy::project(), &args.route);
    let sampler = SampleCutter::new(config.ffmpeg_path.clone(), config.sample_seconds);

    let bundle = load_project(&folder).await?;
    let mut input = bundle.manifest.story_input();
    input.is_featured = args.featured;

    let preview = story_record(&input, &policy);
    println!("==================================================");
    println!("PUBLISHING TO DRIVE TIME TALES");
    println!("==================================================");
    println!("Title:    {}", preview.title);
    println!("Author:   {}", preview.author);
    println!("Genre:    {}", preview.genre);
    println!(
        "Duration: {} ({} min)",
        preview.duration_label, preview.duration_mins
    );
    if let Some(price) = preview.price_cents {
        println!("Price:    {}", format_usd(price));
    }
    println!("Credits:  {}", preview.credits);
    println!("Audio:    {}", bundle.audio_path.display());
    match &bundle.cover_path {
        Some(cover) => println!("Cover:    {}", cover.display()),
        None => println!("Cover:    (none found)"),
    }
    println!();

    let request = PublishRequest {
        audio_path: bundle.audio_path.clone(),
        cover_path: bundle.cover_path.clone(),
        sample_path: None,
        create_sample: true,
        input,
    };

    let outcome = Publisher::new(target, policy, sampler)
        .publish(&request)
        .await?;

    println!("SUCCESS! Story published to Drive Time Tales");
    println!("  Story ID: {}", outcome.story.id);
    println!("  View at: {}/story/{}", api_url, outcome.story.id);

    Ok(())
}

async fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let timeout = Duration::from_secs(config.http_timeout_secs);

    let query = StoryQuery {
        genre: args.genre,
        featured: args.featured,
        limit: args.limit,
    };

    let stories = match PublishTargetKind::from(args.target) {
        PublishTargetKind::Api => {
            let client = ApiClient::new(config.api_url.clone(), timeout)?;
            client.list_stories(&query).await?
        }
        PublishTargetKind::Direct => {
            let supabase_url = config
                .supabase_url
                .clone()
                .context("SUPABASE_URL must be set to list directly")?;
            let service_key = config
                .supabase_service_key
                .clone()
                .context("SUPABASE_SERVICE_KEY must be set to list directly")?;
            let client = CatalogDbClient::new(supabase_url, service_key, timeout)?;
            client.list_stories(&query).await?
        }
    };

    print_json(&stories)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Publish(args) => cmd_publish(args).await,
        Commands::PublishProject(args) => cmd_publish_project(args).await,
        Commands::List(args) => cmd_list(args).await,
    }
}
