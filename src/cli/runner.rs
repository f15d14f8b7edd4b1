//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::GeneratorConfig;
use crate::emit::emitter_for;
use crate::engine::Inferrer;
use crate::error::{Error, Result, ResultExt};
use crate::source::{DatabaseSource, DocumentSource, JsonSource};
use crate::template::{self, TemplateContext};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.resolve_config()?;
        match &self.cli.command {
            Commands::Json { file } => self.json(file.as_deref(), &config).await,
            Commands::Database { .. } => self.database(&config).await,
            Commands::Collections { .. } => self.collections(&config),
        }
    }

    /// Configuration file values overridden by command-line flags
    pub fn resolve_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.cli.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };

        let cli = &self.cli;
        if let Some(name) = &cli.name {
            config.name = Some(name.clone());
        }
        if let Some(module) = &cli.module {
            config.module = Some(module.clone());
        }
        if cli.embed_structs {
            config.embed_structs = true;
        }
        if let Some(format) = cli.format {
            config.format = format;
        }
        if let Some(output) = &cli.output {
            config.output = Some(output.clone());
        }
        if let Some(shards) = cli.shards {
            config.shards = shards;
        }
        if let Some(limit) = cli.limit {
            config.limit = Some(limit);
        }
        if let Some(path) = &cli.record_path {
            config.record_path = Some(path.clone());
        }
        if cli.no_extended_json {
            config.extended_json = false;
        }

        match &cli.command {
            Commands::Database {
                uri,
                collection,
                sample_size,
            } => {
                if let Some(uri) = uri {
                    config.uri = Some(uri.clone());
                }
                if let Some(collection) = collection {
                    config.collection = Some(collection.clone());
                }
                if let Some(size) = sample_size {
                    config.sample_size = *size;
                }
            }
            Commands::Collections { uri: Some(uri) } => config.uri = Some(uri.clone()),
            _ => {}
        }

        config.validate()?;
        Ok(config)
    }

    /// Infer from a JSON file or stdin
    async fn json(&self, file: Option<&Path>, config: &GeneratorConfig) -> Result<()> {
        let source_config = config.json_source_config();

        let (source, label, stem): (Box<dyn DocumentSource>, String, Option<String>) = match file
        {
            Some(path) => (
                Box::new(JsonSource::open(path, source_config)?),
                path.display().to_string(),
                path.file_stem().map(|s| s.to_string_lossy().to_string()),
            ),
            None => (
                Box::new(JsonSource::stdin(source_config)),
                "stdin".to_string(),
                None,
            ),
        };

        let base_name = config.base_name(stem.as_deref());
        self.generate(source, &base_name, label, config).await
    }

    /// Infer from a sampled database table
    async fn database(&self, config: &GeneratorConfig) -> Result<()> {
        let uri = config
            .uri
            .as_deref()
            .ok_or_else(|| Error::config("Database URI not specified (use --uri)"))?;
        let collection = config
            .collection
            .as_deref()
            .ok_or_else(|| Error::config("Collection not specified (use --collection)"))?;

        let mut source = DatabaseSource::connect(uri)?;
        source.sample(collection, config.sample_size)?;

        let label = format!("{}/{collection}", source.connection_info());
        let base_name = config.base_name(Some(collection));
        self.generate(Box::new(source), &base_name, label, config)
            .await
    }

    /// Print the tables of a database, one per line
    fn collections(&self, config: &GeneratorConfig) -> Result<()> {
        let uri = config
            .uri
            .as_deref()
            .ok_or_else(|| Error::config("Database URI not specified (use --uri)"))?;

        let source = DatabaseSource::connect(uri)?;
        let tables = source.list_collections()?;

        let mut stdout = std::io::stdout().lock();
        for table in &tables {
            writeln!(stdout, "{table}")?;
        }
        Ok(())
    }

    async fn generate(
        &self,
        source: Box<dyn DocumentSource>,
        base_name: &str,
        label: String,
        config: &GeneratorConfig,
    ) -> Result<()> {
        let mut source: Box<dyn DocumentSource> = match config.limit {
            Some(limit) => Box::new(source.limit(limit)),
            None => source,
        };

        let mut inferrer = Inferrer::new(config.infer_config(base_name));
        let schema = inferrer.infer(source.as_mut()).await?;

        if !schema.report.is_empty() {
            let paths: Vec<&str> = schema
                .report
                .fallbacks()
                .iter()
                .map(|f| f.path.as_str())
                .collect();
            warn!(
                count = paths.len(),
                paths = %paths.join(", "),
                "Some positions resolved to the opaque type"
            );
        }

        let text = emitter_for(config.format).emit(&schema, &config.emit_options(Some(label)))?;
        write_output(&text, base_name, config)
    }
}

/// Write generated text to the configured output, or stdout
fn write_output(text: &str, base_name: &str, config: &GeneratorConfig) -> Result<()> {
    let Some(output) = &config.output else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        return Ok(());
    };

    let path = output_path(output, base_name, config)?;
    if let Some(parent) = Path::new(&path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create '{}'", parent.display()))?;
        }
    }
    fs::write(&path, text).with_context(|| format!("Failed to write '{path}'"))?;
    info!(path = %path, bytes = text.len(), "Wrote output");
    Ok(())
}

/// Render `{{ name }}` and `{{ extension }}` in the output path
pub(crate) fn output_path(output: &str, base_name: &str, config: &GeneratorConfig) -> Result<String> {
    if !template::has_templates(output) {
        return Ok(output.to_string());
    }
    let ctx = TemplateContext::new()
        .with("name", base_name)
        .with("extension", config.format.extension());
    template::render(output, &ctx)
}
