//! The `vibewriter generate` command.

use anyhow::Context;
use clap::Args;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use vibewriter_core::{Config, OutputWriter, VibeWriter};

use super::types::{ImageBank, LlmProvider};

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Campaign topic or brief
    #[arg(long)]
    pub topic: String,

    /// Number of post variants (defaults to config)
    #[arg(long)]
    pub variants: Option<usize>,

    /// LLM model name (provider-specific)
    #[arg(long)]
    pub model: Option<String>,

    /// LLM provider
    #[arg(long, value_enum)]
    pub llm_provider: Option<LlmProvider>,

    /// Image source
    #[arg(long, value_enum)]
    pub image_bank: Option<ImageBank>,

    /// Include image URLs in the output
    #[arg(long)]
    pub open_links: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

/// Fold command-line flags into the loaded configuration.
fn apply_args(args: &GenerateArgs, mut config: Config) -> anyhow::Result<(Config, usize)> {
    if args.topic.trim().is_empty() {
        anyhow::bail!("Please provide a non-empty --topic.");
    }
    let variants = args.variants.unwrap_or(config.general.variants);
    if variants == 0 {
        anyhow::bail!("--variants must be at least 1.");
    }

    config.apply_overrides(
        args.llm_provider.map(|p| p.to_string()),
        args.model.clone(),
    );
    if let Some(bank) = args.image_bank {
        config.general.image_bank = vibewriter_core::ImageBank::from(bank).to_string();
    }
    config.general.open_links |= args.open_links;
    if args.compact {
        config.output.pretty = false;
    }
    Ok((config, variants))
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, config: Config) -> anyhow::Result<()> {
    let (config, variants) = apply_args(&args, config)?;
    let output_path = args.output.clone().or_else(|| config.output_path());
    let pretty = config.output.pretty;

    let writer = VibeWriter::new(config).context("Failed to set up backends")?;
    let result = writer.generate(&args.topic, variants).await?;
    tracing::info!(
        "Generated {} variant(s) for {:?}",
        result.variants.len(),
        result.topic
    );

    match output_path {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut out = OutputWriter::new(BufWriter::new(file), pretty);
            out.write(&result)?;
            out.flush()?;
            tracing::info!("Wrote posts to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = OutputWriter::new(stdout.lock(), pretty);
            out.write(&result)?;
            out.into_inner().flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenerateArgs,
    }

    fn parse(argv: &[&str]) -> GenerateArgs {
        let mut full = vec!["vibewriter"];
        full.extend_from_slice(argv);
        TestCli::parse_from(full).args
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "--topic",
            "Summer smoothie launch",
            "--variants",
            "5",
            "--llm-provider",
            "openai",
            "--model",
            "gpt-4o",
            "--image-bank",
            "suggest",
            "--open-links",
            "--compact",
        ]);
        let (config, variants) = apply_args(&args, Config::default()).unwrap();
        assert_eq!(variants, 5);
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.general.image_bank, "suggest");
        assert!(config.general.open_links);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_defaults_come_from_config() {
        let args = parse(&["--topic", "Autumn blend"]);
        let (config, variants) = apply_args(&args, Config::default()).unwrap();
        assert_eq!(variants, 3);
        assert_eq!(config.llm.provider, "google");
        assert!(config.output.pretty);
    }

    #[test]
    fn test_provider_aliases() {
        let args = parse(&["--topic", "x", "--llm-provider", "gemini"]);
        assert_eq!(args.llm_provider, Some(LlmProvider::Google));
        let args = parse(&["--topic", "x", "--llm-provider", "claude"]);
        assert_eq!(args.llm_provider, Some(LlmProvider::Anthropic));
    }

    #[test]
    fn test_rejects_blank_topic_and_zero_variants() {
        let args = parse(&["--topic", "   "]);
        assert!(apply_args(&args, Config::default()).is_err());

        let args = parse(&["--topic", "Autumn blend", "--variants", "0"]);
        let err = apply_args(&args, Config::default()).unwrap_err();
        assert!(err.to_string().contains("--variants"));
    }

    #[tokio::test]
    async fn test_execute_writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posts.json");
        let args = parse(&[
            "--topic",
            "black friday discount for coffee shop",
            "--variants",
            "2",
            "--llm-provider",
            "stub",
            "--image-bank",
            "suggest",
            "--open-links",
            "--output",
            path.to_str().unwrap(),
        ]);
        execute(args, Config::default()).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("{\n  \"topic\""));
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["topic"], "black friday discount for coffee shop");
        let variants = value["variants"].as_array().unwrap();
        assert_eq!(variants.len(), 2);
        assert_ne!(variants[0]["text"], variants[1]["text"]);
        assert!(variants.iter().all(|v| v["image_url"].is_string()));
    }
}
