use super::{build_translator, connect_store, load_config};
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;
use vocabot_core::{ImportReport, Translator, VocabularyStore};
use vocabot_store::{SeaOrmStore, parse_word_list};

/// Read a word list and add its unknown words to the dictionary.
pub(super) async fn import_file(
    store: &SeaOrmStore,
    translator: &dyn Translator,
    path: &Path,
) -> anyhow::Result<ImportReport> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read word list {}", path.display()))?;
    let words = parse_word_list(&content);
    info!("Importing {} words from {}", words.len(), path.display());

    Ok(store.import_words(&words, translator).await?)
}

/// Input for the import command.
pub struct ImportInput {
    pub config_path: Option<PathBuf>,
    /// Word list (overrides `import.words_file`)
    pub file: Option<PathBuf>,
}

/// Strategy for seeding the shared dictionary from a file.
#[derive(Debug, Clone, Copy)]
pub struct ImportStrategy;

impl super::CommandStrategy for ImportStrategy {
    type Input = ImportInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = load_config(input.config_path.as_deref())?;
        let path = input.file.unwrap_or_else(|| config.import.words_file.clone());

        let store = connect_store(&config).await?;
        let translator = build_translator(&config)?;

        let report = import_file(&store, &translator, &path).await?;

        println!("Imported: {}", report.imported);
        println!("Skipped:  {}", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {} ({})", skipped.word, skipped.reason);
        }
        Ok(())
    }
}
