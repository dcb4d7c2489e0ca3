use anyhow::Context;
use clap::Parser;
use resolver_cli::{utils, Resolver};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve a blog post URL into normalized JSON", long_about = None)]
struct Args {
    /// Post URL to resolve
    #[arg(short, long)]
    url: String,

    /// Where to write the JSON result
    #[arg(short, long, default_value = "post.json")]
    output: PathBuf,

    /// Also write the extracted body text to this file
    #[arg(short, long)]
    text: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let resolver = Resolver::with_defaults().context("building HTTP client")?;
    let post = resolver
        .resolve(&args.url)
        .await
        .with_context(|| format!("resolving {}", args.url))?;

    utils::save_json(&post, &args.output)?;
    if let Some(path) = &args.text {
        utils::save_text(post.text.as_deref().unwrap_or_default(), path)?;
    }

    println!(
        "{} [{:?}] {} chars -> {}",
        post.canonical_url.as_deref().unwrap_or(&post.url),
        post.source,
        post.text_len(),
        args.output.display()
    );
    Ok(())
}
