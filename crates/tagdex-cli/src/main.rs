use anyhow::Context as _;
use clap::Parser;
use github_client::GithubClient;
use std::path::PathBuf;
use tagdex_core::config::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "tagdex",
    about = "Crawl a GitHub repository's Markdown front matter and publish a tag → paths index",
    version
)]
struct Cli {
    /// GitHub token used for both the source crawl and the publish
    #[arg(value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Path to the YAML settings file
    #[arg(long, short = 'c', default_value = "tagdex.yaml")]
    config: PathBuf,

    /// Print the full run result as JSON instead of a summary line
    #[arg(long, short = 'j')]
    json: bool,

    /// Crawl and print the result without publishing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    if let Err(e) = run(cli).await {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load(&cli.config)
        .with_context(|| format!("loading settings from {}", cli.config.display()))?;
    let client = GithubClient::new(&cli.token)?;

    let result = tagdex_core::pipeline::run(&client, &settings).await?;

    if cli.dry_run {
        print_json(&result)?;
        return Ok(());
    }

    let published = tagdex_core::publish::publish(&client, &settings, &result).await?;
    if cli.json {
        print_json(&serde_json::json!({
            "result": result,
            "published": published,
        }))?;
    } else {
        println!(
            "Result stored at {}/{}/{}",
            published.owner, published.repo, published.path
        );
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
