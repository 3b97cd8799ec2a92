use clap::{Args, Parser, Subcommand};
use lc_core::{ImageQuality, ImageSize, ImageStyle, LengthMode};
use lc_inference::ModelKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lc", author, version, about = "Generate SEO-ready legal articles", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, default_value = "anthropic", help = "Text model backend. Available models: anthropic (default), dummy")]
    pub model: ModelKind,

    #[arg(long, global = true, env = "LC_MODEL_NAME")]
    pub model_name: Option<String>,

    #[arg(long, global = true, env = "CLAUDE_API_KEY", hide_env_values = true)]
    pub claude_api_key: Option<String>,

    #[arg(long, global = true, env = "SEMRUSH_API_KEY", hide_env_values = true)]
    pub semrush_api_key: Option<String>,

    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, global = true, default_value = "info", help = "Default log level when RUST_LOG is not set")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Research and print curated SEO keywords
    Keywords {
        #[arg(long)]
        topic: String,
        #[arg(long, default_value_t = lc_keywords::DEFAULT_REPORT_LIMIT)]
        limit: usize,
    },
    /// Generate an outline to edit before drafting
    Outline {
        #[arg(long)]
        topic: String,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run the full article pipeline
    Generate(GenerateArgs),
    /// Export an existing article to HTML and/or PDF
    Export {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        html: Option<PathBuf>,
        #[arg(long)]
        pdf: Option<PathBuf>,
    },
    /// Article illustrations
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(long)]
    pub topic: String,

    #[arg(long, help = "Search keywords for this phrase instead of the topic")]
    pub keyword_topic: Option<String>,

    #[arg(long, conflicts_with = "keyword_topic")]
    pub no_keywords: bool,

    #[arg(long = "exclude-keyword", help = "Curated keyword to leave out (repeatable)")]
    pub exclude_keywords: Vec<String>,

    #[arg(long, help = "Reference material: a file path or an http(s) URL")]
    pub reference: Option<String>,

    #[arg(long, help = "Use this (edited) outline instead of generating one")]
    pub outline_file: Option<PathBuf>,

    #[arg(long, help = "short, medium, long or a target word count")]
    pub length: Option<LengthMode>,

    #[arg(long, default_value_t = 0, help = "Extra deep humanization passes")]
    pub deep_passes: u32,

    #[arg(long, help = "Replace the built-in tone reference text")]
    pub tone_file: Option<PathBuf>,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub html: Option<PathBuf>,

    #[arg(long)]
    pub pdf: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// Suggest iconic visuals for a topic
    Suggest {
        #[arg(long)]
        topic: String,
    },
    /// Generate an image with DALL-E
    Generate {
        #[arg(long)]
        prompt: String,
        #[arg(long, default_value = "realistic")]
        style: ImageStyle,
        #[arg(long, default_value = "1024x1024")]
        size: ImageSize,
        #[arg(long, default_value = "standard")]
        quality: ImageQuality,
        #[arg(long, help = "Save the generated image to this file")]
        download: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "lc",
            "--model",
            "dummy",
            "generate",
            "--topic",
            "§ 223 StGB",
            "--length",
            "2500",
            "--exclude-keyword",
            "anzeige",
            "--exclude-keyword",
            "strafe",
            "--deep-passes",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.model, ModelKind::Dummy);
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.topic, "§ 223 StGB");
                assert_eq!(args.length, Some(LengthMode::Custom { words: 2500 }));
                assert_eq!(args.exclude_keywords, vec!["anzeige", "strafe"]);
                assert_eq!(args.deep_passes, 2);
                assert!(!args.no_keywords);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_image_generate() {
        let cli = Cli::try_parse_from([
            "lc", "image", "generate", "--prompt", "Waage", "--style", "iconic", "--size", "1024x1792", "--quality", "hd",
        ])
        .unwrap();
        match cli.command {
            Commands::Image {
                command: ImageCommands::Generate { style, size, quality, download, .. },
            } => {
                assert_eq!(style, ImageStyle::Iconic);
                assert_eq!(size, ImageSize::Tall);
                assert_eq!(quality, ImageQuality::Hd);
                assert!(download.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_keywords_conflicts_with_keyword_topic() {
        let result = Cli::try_parse_from([
            "lc", "generate", "--topic", "Betrug", "--no-keywords", "--keyword-topic", "Betrug Anwalt",
        ]);
        assert!(result.is_err());
    }
}
