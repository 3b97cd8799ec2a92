use lc_core::{Error, ImageQuality, ImageSize, ImageStyle, Result, TextModel, Topic};
use lc_inference::{create_image_model, create_model, load_reference_source, Config, ImageService, ModelKind};
use lc_keywords::{KeywordCurator, KeywordResearch, KeywordSource, SemrushConfig, SemrushProvider};
use lc_pipeline::{ArticlePipeline, PipelineConfig, SessionContext};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::cli::{Cli, Commands, GenerateArgs, ImageCommands};

pub struct App {
    config: Config,
    semrush_api_key: Option<String>,
    model: Arc<dyn TextModel>,
}

impl App {
    pub fn new(kind: ModelKind, config: Config, semrush_api_key: Option<String>) -> Result<Self> {
        let model = create_model(kind, &config)?;
        info!("🧠 Text model initialized (using {})", model.name());
        Ok(Self {
            config,
            semrush_api_key,
            model,
        })
    }

    fn keyword_research(&self, limit: usize) -> Result<KeywordResearch> {
        let provider = SemrushProvider::new(SemrushConfig {
            api_key: self.semrush_api_key.clone(),
            ..SemrushConfig::default()
        })?;
        Ok(KeywordResearch::new(
            KeywordSource::new(Arc::new(provider)),
            KeywordCurator::new(self.model.clone()),
        )
        .with_limit(limit))
    }

    fn image_service(&self) -> ImageService {
        let image_model = match create_image_model(&self.config) {
            Ok(model) => Some(model),
            Err(e) => {
                warn!("⚠️ Image generation unavailable: {}", e);
                None
            }
        };
        ImageService::new(self.model.clone(), image_model)
    }
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let kind = cli.model;
    let semrush_api_key = cli.semrush_api_key;
    let config = Config {
        anthropic_api_key: cli.claude_api_key,
        openai_api_key: cli.openai_api_key,
        model_name: cli.model_name,
        ..Config::default()
    };

    match cli.command {
        Commands::Keywords { topic, limit } => {
            let app = App::new(kind, config, semrush_api_key)?;
            let research = app.keyword_research(limit)?;
            let keywords = research.keywords_for_topic(topic.trim()).await;
            if keywords.is_empty() {
                warn!("⚠️ No keywords found for '{}'", topic.trim());
            }
            for (i, keyword) in keywords.iter().enumerate() {
                println!("{:>2}. {}", i + 1, keyword);
            }
        }
        Commands::Outline { topic, output } => {
            let app = App::new(kind, config, semrush_api_key)?;
            let pipeline = ArticlePipeline::new(app.model.clone(), PipelineConfig::default());
            let mut session = SessionContext::new(Topic::new(topic)?);
            let outline = pipeline.prepare_outline(&mut session).await?;
            emit_text(&outline, output.as_deref()).await?;
        }
        Commands::Generate(args) => {
            let app = App::new(kind, config, semrush_api_key)?;
            generate(&app, args).await?;
        }
        Commands::Export { input, html, pdf } => {
            let article = tokio::fs::read_to_string(&input).await?;
            if html.is_none() && pdf.is_none() {
                println!("{}", lc_export::to_html(&article));
            }
            export(&article, html, pdf).await?;
        }
        Commands::Image { command } => {
            let app = App::new(kind, config, semrush_api_key)?;
            handle_image(&app, command).await?;
        }
    }
    Ok(())
}

async fn generate(app: &App, args: GenerateArgs) -> Result<()> {
    let mut config = PipelineConfig::default();
    if let Some(tone_file) = &args.tone_file {
        config = config.with_tone_reference(tokio::fs::read_to_string(tone_file).await?);
        info!("🎼 Using tone reference from {}", tone_file.display());
    }
    let pipeline = ArticlePipeline::new(app.model.clone(), config);

    let mut session = SessionContext::new(Topic::new(args.topic.as_str())?);
    session.length = args.length;
    session.set_keyword_topic(args.keyword_topic.clone());

    if args.no_keywords {
        info!("⏭️ Keyword research disabled");
    } else {
        match app.keyword_research(lc_keywords::DEFAULT_REPORT_LIMIT) {
            Ok(research) => {
                let keywords = pipeline.research_keywords(&mut session, &research).await?;
                info!("🏷️ {} keywords curated", keywords.len());
                for phrase in &args.exclude_keywords {
                    if !session.exclude_keyword(phrase) {
                        warn!("⚠️ Keyword '{}' is not in the curated list", phrase);
                    }
                }
            }
            Err(e) => warn!("⚠️ Skipping keyword research: {}", e),
        }
    }

    if let Some(source) = &args.reference {
        match load_reference_source(source).await {
            Ok(raw) => {
                if pipeline.analyze_reference(&mut session, &raw).await.is_none() {
                    warn!("⚠️ No reference information extracted from {}", source);
                }
            }
            Err(e) => warn!("⚠️ Could not load reference {}, continuing without it: {}", source, e),
        }
    }

    if let Some(outline_file) = &args.outline_file {
        let outline = tokio::fs::read_to_string(outline_file).await?;
        session.edit_outline(outline)?;
    }

    let mut article = pipeline.run(&mut session).await?;
    for pass in 1..=args.deep_passes {
        info!("🔁 Deep humanization pass {}/{}", pass, args.deep_passes);
        article = pipeline.rehumanize(&mut session).await?;
    }

    emit_text(&article, args.output.as_deref()).await?;
    export(&article, args.html, args.pdf).await
}

async fn handle_image(app: &App, command: ImageCommands) -> Result<()> {
    let service = app.image_service();
    match command {
        ImageCommands::Suggest { topic } => {
            for visual in service.suggest_visuals(topic.trim()).await? {
                println!("{}", visual);
            }
        }
        ImageCommands::Generate {
            prompt,
            style,
            size,
            quality,
            download,
        } => generate_image(&service, &prompt, style, size, quality, download).await?,
    }
    Ok(())
}

async fn generate_image(
    service: &ImageService,
    prompt: &str,
    style: ImageStyle,
    size: ImageSize,
    quality: ImageQuality,
    download: Option<PathBuf>,
) -> Result<()> {
    let url = service
        .generate(prompt, style, size, quality)
        .await
        .ok_or_else(|| Error::Inference("image generation failed".to_string()))?;
    println!("{}", url);

    if let Some(path) = download {
        let bytes = service.download(&url).await?;
        tokio::fs::write(&path, bytes).await?;
        info!("💾 Image saved to {}", path.display());
    }
    Ok(())
}

async fn emit_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            tokio::fs::write(path, text).await?;
            info!("💾 Saved to {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

/// Write the requested export formats. A missing PDF backend only warns.
pub async fn export(article: &str, html: Option<PathBuf>, pdf: Option<PathBuf>) -> Result<()> {
    if let Some(path) = html {
        tokio::fs::write(&path, lc_export::to_html(article)).await?;
        info!("🌐 HTML saved to {}", path.display());
    }
    if let Some(path) = pdf {
        match lc_export::to_pdf(article) {
            Some(bytes) => {
                tokio::fs::write(&path, bytes).await?;
                info!("📄 PDF saved to {}", path.display());
            }
            None => warn!("⚠️ PDF not available, skipping {}", path.display()),
        }
    }
    Ok(())
}
