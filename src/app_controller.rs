use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use crate::app_config::{Config, ExportFormat};
use crate::context_processor::ContextCollection;
use crate::export::{JsonExporter, KwicDocument, XmlExporter};
use crate::file_utils::{FileManager, FileType};

// @module: Application controller for index export

/// Main application controller for KWIC index export
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
        let controller = Self {
            config,
        };

        Ok(controller)
    }

    /// Returns the label used in output filenames for the configured format
    fn output_label(&self) -> String {
        match self.config.export.format {
            ExportFormat::Contexts => "contexts".to_string(),
            _ => self.config.grouping.to_lowercase_string(),
        }
    }

    /// Run the export workflow for one context file
    pub fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        // Start timing the process
        let start_time = std::time::Instant::now();

        // Check if the input file exists
        if !input_file.exists() {
            return Err(anyhow::anyhow!("Input file does not exist: {:?}", input_file));
        }

        // Ensure the output directory exists
        FileManager::ensure_dir(&output_dir)?;

        // Check if the export already exists
        let output_path = FileManager::generate_output_path(
            &input_file,
            &output_dir,
            &self.output_label(),
            self.config.export.format.extension(),
        );
        if output_path.exists() && !force_overwrite {
            warn!("Skipping file, export already exists (use -f to force overwrite)");
            return Ok(());
        }

        // Detect file type
        let file_type = FileManager::detect_file_type(&input_file)?;
        if file_type != FileType::ContextXml {
            return Err(anyhow::anyhow!(
                "Input file is not a context XML file: {:?}",
                input_file
            ));
        }

        // Read the context file
        let mut collection = ContextCollection::read_from_xml(&input_file)?;
        if collection.entries.is_empty() {
            warn!("No context entries found in {:?}, writing an empty index", input_file);
        }

        // Reproduce the legacy resource ordering when configured
        if self.config.export.sort {
            collection.sort_for_export();
        }

        let output = self.render(&collection)
            .with_context(|| format!("Failed to export {:?}", input_file))?;

        FileManager::write_to_file(&output_path, &output)?;

        info!(
            "Exported {} entries ({} keywords) to {:?} in {:.2}s",
            collection.entries.len(),
            collection.distinct_keyword_count(),
            output_path,
            start_time.elapsed().as_secs_f32()
        );

        Ok(())
    }

    // @renders: Collection into the configured output format
    fn render(&self, collection: &ContextCollection) -> Result<String> {
        let indent = self.config.export.indent;

        let output = match self.config.export.format {
            ExportFormat::Xml => {
                let document = KwicDocument::from_contexts(&collection.entries, self.config.grouping)?;
                debug!("Aggregated {} sublists", document.sublists.len());
                XmlExporter::new(indent).write_document(&document)?
            }
            ExportFormat::Json => {
                let document = KwicDocument::from_contexts(&collection.entries, self.config.grouping)?;
                debug!("Aggregated {} sublists", document.sublists.len());
                JsonExporter::new(indent).write_document(&document)?
            }
            ExportFormat::Contexts => {
                JsonExporter::new(indent).write_contexts(&collection.entries)?
            }
        };

        Ok(output)
    }

    /// Run the export workflow for every context file in a directory
    pub fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<()> {
        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        info!("Starting index export for directory: {:?}", input_dir);

        let mut processed_count = 0;

        for path in FileManager::find_files(&input_dir, "xml")? {
            match FileManager::detect_file_type(&path) {
                Ok(FileType::ContextXml) => {}
                Ok(FileType::KwicIndexXml) => {
                    debug!("Skipping already exported index: {:?}", path);
                    continue;
                }
                Ok(FileType::Unknown) => {
                    debug!("Skipping non-context file: {:?}", path);
                    continue;
                }
                Err(e) => {
                    error!("Error inspecting file {:?}: {}", path, e);
                    continue;
                }
            }

            info!("Processing context file: {:?}", path);

            let output_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
            if let Err(e) = self.run(path.clone(), output_dir, force_overwrite) {
                error!("Error processing file: {}", e);
            } else {
                processed_count += 1;
            }
        }

        info!("Finished processing {} files", processed_count);

        Ok(())
    }

    /// Check if the controller is properly initialized with configuration
    pub fn is_initialized(&self) -> bool {
        self.config.validate().is_ok()
    }
}
