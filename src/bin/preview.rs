use anyhow::{Context, Result, anyhow};
use clap::Parser;
use preview_tag::{
    Config, PreviewBuilder, PreviewRequest, SnippetCache, Substitute, TemplateContext,
    TemplateRenderer, TitleMode,
    config::{
        DEFAULT_CACHE_DIR, ENV_CACHE_DIR, ENV_TIMEOUT_SECS, ENV_TITLE_MODE, ENV_USER_AGENT,
        parse_timeout_secs,
    },
    fetcher::client::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT},
};
use std::path::PathBuf;
use std::time::Duration;

/// Render a link preview card for a directive and print it to stdout.
#[derive(Debug, Parser)]
#[command(name = "preview", version)]
struct Args {
    /// Directive text, e.g. `"Some Article" https://example.com/post`
    #[arg(required = true, num_args = 1..)]
    directive: Vec<String>,

    /// Snippet cache directory
    #[arg(long, env = ENV_CACHE_DIR, default_value = DEFAULT_CACHE_DIR)]
    cache_dir: PathBuf,

    /// Create the cache directory if it does not exist
    #[arg(long)]
    create_cache_dir: bool,

    /// Fetch timeout in seconds [default: 30]
    #[arg(long, env = ENV_TIMEOUT_SECS, value_parser = parse_timeout_secs)]
    timeout_secs: Option<Duration>,

    /// User-Agent sent with fetches
    #[arg(long, env = ENV_USER_AGENT, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// `legacy` or `fixed`
    #[arg(long, env = ENV_TITLE_MODE, default_value_t = TitleMode::Legacy)]
    title_mode: TitleMode,

    /// Template variable available to the directive, as name=value
    #[arg(long = "var", value_parser = parse_var)]
    vars: Vec<(String, String)>,

    /// Print extracted metadata as JSON instead of the cached card
    #[arg(long)]
    inspect: bool,
}

fn parse_var(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected name=value, got '{raw}'"))?;
    Ok((name.trim().to_string(), value.to_string()))
}

impl Args {
    fn config(&self) -> Config {
        Config::new(
            &self.cache_dir,
            self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT),
            &self.user_agent,
            self.title_mode,
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the snippet
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();
    tracing::debug!(?config, title_mode = %config.title_mode(), "loaded configuration");

    if args.create_cache_dir {
        SnippetCache::create(config.cache_dir()).await?;
    }

    let builder = PreviewBuilder::from_config(&config)?;
    let context: TemplateContext = args.vars.iter().cloned().collect();
    let text = args.directive.join(" ");

    if args.inspect {
        let rendered = Substitute.render_template_text(&text, &context);
        let request = PreviewRequest::parse(&rendered)?;
        let metadata = builder.inspect(&request).await?;
        println!("{}", serde_json::to_string_pretty(&metadata)?);
        return Ok(());
    }

    let snippet = builder
        .render_directive(&Substitute, &text, &context)
        .await
        .with_context(|| format!("failed to render preview for '{text}'"))?;
    println!("{snippet}");

    Ok(())
}
