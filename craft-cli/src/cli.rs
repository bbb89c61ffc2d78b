//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use craft_codegen::Dialect;

use crate::suggest::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Skeleton loader generator.
#[derive(Debug, Parser)]
#[command(name = "skeleton-craft")]
#[command(about = "Generate skeleton loaders for HTML, React, Vue, Svelte and Angular")]
#[command(version)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate source from a saved layout or a built-in preset
    Generate(GenerateArgs),
    /// List built-in presets
    Presets,
    /// List output formats
    Formats,
    /// Check a saved layout document
    Validate {
        /// Layout document to check
        #[arg(long, short)]
        input: PathBuf,
    },
    /// Propose a layout from a UI screenshot
    Suggest(SuggestArgs),
}

/// Arguments for `generate`.
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Output format (html, react, vue, svelte, angular)
    #[arg(long, short, default_value = "html")]
    pub format: Dialect,

    /// Layout document to read
    #[arg(long, short, conflicts_with = "preset", required_unless_present = "preset")]
    pub input: Option<PathBuf>,

    /// Built-in preset name, e.g. "article-card"
    #[arg(long, short)]
    pub preset: Option<String>,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Component name for component formats
    #[arg(long, default_value = "SkeletonLoader")]
    pub component_name: String,
}

/// Arguments for `suggest`.
#[derive(Debug, Clone, Args)]
pub struct SuggestArgs {
    /// Screenshot to analyse (PNG, JPEG or WebP, at most 4 MiB)
    #[arg(long)]
    pub image: PathBuf,

    /// Emit generated source in this format instead of a layout document
    #[arg(long, short)]
    pub format: Option<Dialect>,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// API key for the inference service
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Inference API base URL
    #[arg(long, env = "CRAFT_SUGGEST_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Model name
    #[arg(long, env = "CRAFT_SUGGEST_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Component name for component formats
    #[arg(long, default_value = "SkeletonLoader")]
    pub component_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_requires_a_source() {
        assert!(Cli::try_parse_from(["skeleton-craft", "generate"]).is_err());
        assert!(Cli::try_parse_from([
            "skeleton-craft",
            "generate",
            "--input",
            "a.json",
            "--preset",
            "orbit"
        ])
        .is_err());
    }

    #[test]
    fn test_generate_parses_format() {
        let cli = Cli::try_parse_from([
            "skeleton-craft",
            "generate",
            "--preset",
            "heartbeat",
            "--format",
            "Svelte",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.format, Dialect::Svelte);
        assert_eq!(args.preset.as_deref(), Some("heartbeat"));
        assert!(Cli::try_parse_from(["skeleton-craft", "generate", "--preset", "x", "-f", "qt"]).is_err());
    }

    #[test]
    fn test_suggest_takes_key_flag() {
        let cli = Cli::try_parse_from([
            "skeleton-craft",
            "suggest",
            "--image",
            "shot.png",
            "--api-key",
            "k",
            "--model",
            "m",
        ])
        .unwrap();
        let Commands::Suggest(args) = cli.command else {
            panic!("expected suggest");
        };
        assert_eq!(args.api_key, "k");
        assert_eq!(args.model, "m");
        assert!(args.format.is_none());
    }
}
