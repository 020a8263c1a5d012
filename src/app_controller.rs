use anyhow::{anyhow, Context, Result};
use comrak::Arena;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::bilingual;
use crate::file_utils::FileManager;
use crate::markdown::{self, AlignmentRecord};
use crate::providers::LanguageInfo;
use crate::text_stats::DocumentStats;
use crate::translation::{Article, ArticleTranslator, TranslationService};

// @module: Application controller for Markdown translation

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Translation written to this path
    Translated(PathBuf),
    /// Output already present and overwrite not forced
    Skipped(PathBuf),
}

/// Counters for a folder run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub translated: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Fragments and table alignments of one document, as printed by `extract`
#[derive(Debug, Serialize)]
pub struct ExtractionReport {
    pub fragments: Vec<String>,
    pub table_alignments: Vec<AlignmentRecord>,
    pub stats: DocumentStats,
}

/// Main application controller for Markdown translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn translator(&self) -> Result<ArticleTranslator> {
        let service = TranslationService::new(self.config.translation.clone())?;
        Ok(ArticleTranslator::new(service, self.config.markdown.to_options()))
    }

    /// Translate a file or every Markdown file under a directory
    ///
    /// Outputs go next to their inputs unless `output_dir` is given. The title
    /// only applies to single-file runs.
    pub async fn run(
        &self,
        input_path: PathBuf,
        output_dir: Option<PathBuf>,
        force_overwrite: bool,
        title: Option<String>,
    ) -> Result<()> {
        if FileManager::dir_exists(&input_path) {
            let summary = self.run_folder(input_path, output_dir, force_overwrite).await?;
            if summary.failed > 0 {
                return Err(anyhow!("{} file(s) failed to translate", summary.failed));
            }
            return Ok(());
        }

        if !FileManager::file_exists(&input_path) {
            return Err(anyhow!("Input path does not exist: {:?}", input_path));
        }

        let output_dir = match output_dir {
            Some(dir) => dir,
            None => parent_dir(&input_path),
        };

        let translator = self.translator()?;
        info!(
            "🚀 mdtranslate: {} ({} -> {})",
            self.config.translation.provider.display_name(),
            self.config.source_language,
            self.config.target_language
        );

        let start_time = Instant::now();
        match self
            .translate_file(&translator, &input_path, &output_dir, force_overwrite, title.as_deref())
            .await?
        {
            FileOutcome::Translated(path) => {
                info!("Success: {} ({})", path.display(), format_duration(start_time.elapsed()));
            }
            FileOutcome::Skipped(path) => {
                warn!(
                    "Skipping {}, translation already exists (use -f to force overwrite)",
                    path.display()
                );
            }
        }
        Ok(())
    }

    /// Translate one Markdown file and write the combined document
    pub async fn translate_file(
        &self,
        translator: &ArticleTranslator,
        input_file: &Path,
        output_dir: &Path,
        force_overwrite: bool,
        title: Option<&str>,
    ) -> Result<FileOutcome> {
        let output_path = self.output_path_for(input_file, output_dir);
        if FileManager::file_exists(&output_path) && !force_overwrite {
            return Ok(FileOutcome::Skipped(output_path));
        }

        let body = FileManager::read_to_string(input_file)?;
        let article = Article::new(title.unwrap_or_default(), body);

        let translated = translator
            .translate_article(&article, &self.config.source_language, &self.config.target_language)
            .await
            .with_context(|| format!("Failed to translate {:?}", input_file))?;

        let document = bilingual::combine(
            &article,
            Some(&translated),
            self.config.output.format,
            &self.config.output.summary_text,
        );

        FileManager::ensure_dir(output_dir)?;
        FileManager::write_to_file(&output_path, &document)?;
        Ok(FileOutcome::Translated(output_path))
    }

    /// Run the workflow in folder mode over all Markdown files, recursively
    ///
    /// Files that already look like translation outputs are not picked up; a
    /// failing file is logged and counted without stopping the run.
    pub async fn run_folder(
        &self,
        input_dir: PathBuf,
        output_dir: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<FolderSummary> {
        let start_time = Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let files = FileManager::find_markdown_files(&input_dir)?;
        if files.is_empty() {
            return Err(anyhow!("No Markdown files found in directory: {:?}", input_dir));
        }

        let translator = self.translator()?;

        let folder_pb = ProgressBar::new(files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        let mut summary = FolderSummary::default();

        for file in &files {
            let file_name = file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let target_dir = match &output_dir {
                Some(dir) => dir.clone(),
                None => parent_dir(file),
            };

            match self.translate_file(&translator, file, &target_dir, force_overwrite, None).await {
                Ok(FileOutcome::Translated(_)) => summary.translated += 1,
                Ok(FileOutcome::Skipped(path)) => {
                    folder_pb.suspend(|| warn!("Skipping {}, translation already exists", path.display()));
                    summary.skipped += 1;
                }
                Err(e) => {
                    folder_pb.suspend(|| error!("Error processing file {}: {:#}", file_name, e));
                    summary.failed += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Folder processing completed in {}: {} translated, {} skipped, {} errors",
            format_duration(start_time.elapsed()),
            summary.translated,
            summary.skipped,
            summary.failed
        );

        Ok(summary)
    }

    /// Parse a file and report what would be sent for translation
    pub fn extract_file(&self, input_file: &Path) -> Result<ExtractionReport> {
        let content = FileManager::read_to_string(input_file)?;
        let options = self.config.markdown.to_options();

        let arena = Arena::new();
        let document = markdown::extract(&arena, &content, &options)
            .with_context(|| format!("Failed to parse {:?}", input_file))?;

        Ok(ExtractionReport {
            fragments: document.fragment_values(),
            stats: DocumentStats::from_document(&document),
            table_alignments: document.table_alignments,
        })
    }

    /// `extract_file` rendered as pretty JSON
    pub fn extract_to_json(&self, input_file: &Path) -> Result<String> {
        let report = self.extract_file(input_file)?;
        serde_json::to_string_pretty(&report).context("Failed to serialize extraction report")
    }

    /// Languages offered by the configured provider
    pub async fn list_languages(&self) -> Result<Vec<LanguageInfo>> {
        let service = TranslationService::new(self.config.translation.clone())?;
        let languages = service.supported_languages().await
            .with_context(|| format!("Failed to list languages from {}", service.provider_name()))?;
        Ok(languages)
    }

    /// Expected output path for a Markdown input
    pub fn output_path_for(&self, input_file: &Path, output_dir: &Path) -> PathBuf {
        let extension = input_file.extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_else(|| "md".to_string());
        FileManager::generate_output_path(input_file, output_dir, &self.config.target_language, &extension)
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

// Format duration in a human-readable format
fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}.{:03}s", seconds, duration.subsec_millis())
    }
}
