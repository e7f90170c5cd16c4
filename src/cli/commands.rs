use crate::core::context_file_manager::ContextFileManager;
use crate::core::file_selector::{SelectionMode, select_source_files};
use crate::core::prompt_context::{PromptContext, write_prompt_context};
use crate::core::sanitizer::sanitize_file_name;
use crate::core::templates::template_ids;
use crate::domain::constants::{
    DEFAULT_NEW_FILE, OUTPUT_DIR, PREFERENCES_FILENAME, PROMPT_CONTEXT_FILENAME,
    SAMPLE_CONTEXT_TEMPLATE, SOURCE_CONTEXT_DIR, keys,
};
use crate::domain::errors::ContextError;
use crate::infra::file_system::{FileSystemOps, LocalFileSystem};
use crate::infra::logger::setup_logger;
use crate::infra::output::{deliver_output, print_success};
use crate::infra::preferences::{JsonPreferenceStore, PreferenceStore};
use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "promptpilot")]
#[command(about = "Curate context fragments and merge them into a repo context file", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root containing the .promptpilot directory
    #[arg(long, global = true, default_value = ".")]
    pub project: PathBuf,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the source-context and output directories
    Init,
    /// List files in the source-context directory
    List,
    /// Create a new source-context file from a template
    New {
        #[arg(default_value = DEFAULT_NEW_FILE)]
        name: String,

        #[arg(long, default_value = SAMPLE_CONTEXT_TEMPLATE)]
        template: String,
    },
    /// Merge selected source-context files into the repo context file
    Generate {
        /// Comma-separated file names to merge, in order
        #[arg(long, value_delimiter = ',', conflicts_with = "all")]
        files: Option<Vec<String>>,

        #[arg(long)]
        all: bool,

        #[arg(long, conflicts_with = "no_patch")]
        patch: bool,

        #[arg(long)]
        no_patch: bool,

        /// Also print the generated content
        #[arg(long)]
        print: bool,

        #[arg(long)]
        clipboard: bool,
    },
    /// Delete the generated repo context file
    Delete,
    /// Show where the repo context file is written
    Output,
    /// Read or change project preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Write a structured prompt-context JSON file
    PromptContext {
        #[arg(long)]
        intent: String,

        #[arg(long)]
        target: String,

        #[arg(long, default_value = "patch")]
        output_format: String,

        #[arg(long = "instruction")]
        instructions: Vec<String>,

        #[arg(long, default_value = "Concise")]
        style: String,

        #[arg(long, default_value = PROMPT_CONTEXT_FILENAME)]
        file_name: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    Show,
    Set { key: PreferenceKey, value: String },
    Unset { key: PreferenceKey },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreferenceKey {
    OutputDir,
    OutputFilename,
    PatchMode,
    DebugLayout,
}

impl PreferenceKey {
    fn key(self) -> &'static str {
        match self {
            PreferenceKey::OutputDir => keys::CUSTOM_OUTPUT_DIR,
            PreferenceKey::OutputFilename => keys::CUSTOM_OUTPUT_FILENAME,
            PreferenceKey::PatchMode => keys::PATCH_MODE_ENABLED,
            PreferenceKey::DebugLayout => keys::DEBUG_LAYOUT_ENABLED,
        }
    }

    /// Checks and normalizes a value before it is stored.
    fn normalize(self, value: &str) -> anyhow::Result<String> {
        let value = value.trim();
        if value.is_empty() {
            bail!("Value for {} cannot be blank", self.key());
        }
        match self {
            PreferenceKey::PatchMode | PreferenceKey::DebugLayout => match value {
                "true" | "false" => Ok(value.to_string()),
                other => bail!("Expected true or false for {}, got '{}'", self.key(), other),
            },
            PreferenceKey::OutputFilename => Ok(sanitize_file_name(value)),
            PreferenceKey::OutputDir => Ok(value.to_string()),
        }
    }
}

type LocalManager = ContextFileManager<LocalFileSystem, JsonPreferenceStore>;

fn preferences_path(project: &Path) -> PathBuf {
    project.join(OUTPUT_DIR).join(PREFERENCES_FILENAME)
}

fn open_manager(project: &Path) -> LocalManager {
    let preferences = JsonPreferenceStore::open(preferences_path(project));
    ContextFileManager::new(project, LocalFileSystem, preferences)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logger(cli.verbose)?;
    debug!("Project root: {}", cli.project.display());

    match cli.command {
        Commands::Init => init(&cli.project),
        Commands::List => list(&cli.project),
        Commands::New { name, template } => new_source_file(&cli.project, &name, &template),
        Commands::Generate {
            files,
            all,
            patch,
            no_patch,
            print,
            clipboard,
        } => {
            let patch_override = match (patch, no_patch) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            generate(&cli.project, files, all, patch_override, print, clipboard)
        }
        Commands::Delete => delete(&cli.project),
        Commands::Output => {
            println!("{}", open_manager(&cli.project).get_output_file().display());
            Ok(())
        }
        Commands::Config { action } => config(&cli.project, action),
        Commands::PromptContext {
            intent,
            target,
            output_format,
            instructions,
            style,
            file_name,
        } => {
            let context = PromptContext {
                intent,
                target,
                output_format,
                instructions,
                style,
            };
            let path = write_prompt_context(&LocalFileSystem, &cli.project, &context, &file_name)
                .context("Failed to write prompt context")?;
            print_success(&format!("Prompt context written to {}", path.display()))
        }
    }
}

fn init(project: &Path) -> anyhow::Result<()> {
    let manager = open_manager(project);
    manager
        .ensure_directories_exist()
        .context("Failed to prepare PromptPilot directories")?;
    print_success(&format!(
        "Ready: add context files to {}",
        manager.source_dir().display()
    ))
}

fn list(project: &Path) -> anyhow::Result<()> {
    let manager = open_manager(project);
    manager.ensure_directories_exist()?;

    let files = manager
        .list_source_files()
        .context("Could not list source context files")?;

    if files.is_empty() {
        println!("The directory '{}' is empty.", SOURCE_CONTEXT_DIR);
        return Ok(());
    }
    for file in &files {
        println!("{}", file_name_of(file));
    }
    Ok(())
}

fn new_source_file(project: &Path, name: &str, template: &str) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        bail!("File name cannot be blank");
    }
    if name.trim().chars().all(|c| c == '.') {
        bail!("File name cannot consist only of dots: '{}'", name);
    }

    let manager = open_manager(project);
    manager.ensure_directories_exist()?;

    let created = match manager.create_sample_file_from_template(name, template) {
        Ok(path) => path,
        Err(err @ ContextError::TemplateNotFound { .. }) => {
            let available = template_ids().collect::<Vec<_>>().join(", ");
            return Err(anyhow::Error::new(err).context(format!("Available templates: {}", available)));
        }
        Err(err) => return Err(anyhow::Error::new(err).context("Could not create source file")),
    };
    print_success(&format!("Created {}", created.display()))
}

fn generate(
    project: &Path,
    files: Option<Vec<String>>,
    all: bool,
    patch_override: Option<bool>,
    print: bool,
    clipboard: bool,
) -> anyhow::Result<()> {
    info!("Starting generate command");
    let manager = open_manager(project);
    manager
        .ensure_directories_exist()
        .context("Failed to prepare PromptPilot directories")?;

    let available: Vec<String> = manager
        .list_source_files()
        .context("Could not list source context files")?
        .iter()
        .map(|path| file_name_of(path))
        .collect();

    let mode = match files {
        Some(names) => SelectionMode::Named(names),
        None if all => SelectionMode::All,
        None => SelectionMode::Interactive {
            debug_layout: manager.debug_layout_enabled(),
        },
    };
    let selected = select_source_files(available, mode)?;

    let patch_mode = patch_override.unwrap_or_else(|| manager.patch_mode_enabled());
    debug!("Patch mode: {}", patch_mode);

    let contents = manager.read_selected_files_with_content(&selected)?;
    let output = manager
        .create_repo_context_file_from_content(&contents, patch_mode)
        .context("Error creating or updating repo context file")?;

    print_success(&format!(
        "{} generated from {} file(s)",
        output.display(),
        contents.len()
    ))?;

    if print || clipboard {
        let content = LocalFileSystem
            .read_text(&output)
            .with_context(|| format!("Could not read back {}", output.display()))?;
        deliver_output(&content, print, clipboard)?;
    }
    Ok(())
}

fn delete(project: &Path) -> anyhow::Result<()> {
    let manager = open_manager(project);
    manager
        .delete_repo_context_file()
        .context("Could not delete repo context file")?;
    print_success(&format!("{} deleted", manager.get_output_file().display()))
}

fn config(project: &Path, action: ConfigAction) -> anyhow::Result<()> {
    let mut store = JsonPreferenceStore::open(preferences_path(project));

    match action {
        ConfigAction::Show => {
            for (key, value) in store.entries() {
                println!("{} = {}", key, value);
            }
            let manager = ContextFileManager::new(project, LocalFileSystem, store);
            println!("output file:  {}", manager.get_output_file().display());
            println!("patch mode:   {}", manager.patch_mode_enabled());
            println!("debug layout: {}", manager.debug_layout_enabled());
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let value = key.normalize(&value)?;
            store
                .set(key.key(), &value)
                .with_context(|| format!("Failed to save {}", store.path().display()))?;
            print_success(&format!("{} = {}", key.key(), value))
        }
        ConfigAction::Unset { key } => {
            store
                .remove(key.key())
                .with_context(|| format!("Failed to save {}", store.path().display()))?;
            print_success(&format!("{} reset to default", key.key()))
        }
    }
}
