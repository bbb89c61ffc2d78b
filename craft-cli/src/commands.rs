//! Subcommand implementations.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{anyhow, Context};
use craft_codegen::{CodeGenerator, Dialect, GeneratorConfig};
use craft_core::{Element, LayoutDocument};

use crate::cli::{Cli, Commands, GenerateArgs, SuggestArgs};
use crate::presets::{self, PresetCategory};
use crate::suggest::{shapes_to_layout, GeminiSuggester, LayoutImage, LayoutSuggester};

/// Run a parsed command line.
///
/// # Errors
///
/// Returns an error if the command fails; the message is meant for the user.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate(args) => generate(&args),
        Commands::Presets => {
            print!("{}", presets_listing());
            Ok(())
        }
        Commands::Formats => {
            print!("{}", formats_listing());
            Ok(())
        }
        Commands::Validate { input } => {
            println!("{}", validate(&input)?);
            Ok(())
        }
        Commands::Suggest(args) => {
            let suggester = GeminiSuggester::new(&args.api_key, &args.endpoint, &args.model)?;
            let text = suggest(&suggester, &args).await?;
            emit(args.output.as_deref(), &text)
        }
    }
}

/// Read and validate a layout document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid layout.
pub fn load_layout(path: &Path) -> anyhow::Result<Vec<Element>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document = LayoutDocument::from_json(&json)
        .with_context(|| format!("{} is not a valid layout", path.display()))?;
    tracing::debug!(path = %path.display(), elements = document.elements.len(), "Loaded layout");
    Ok(document.elements)
}

/// Generate source for `elements`.
#[must_use]
pub fn render(dialect: Dialect, elements: &[Element], component_name: &str) -> String {
    let config = GeneratorConfig::default().with_component_name(component_name);
    CodeGenerator::new(config).generate(dialect, elements)
}

/// `generate` subcommand.
///
/// # Errors
///
/// Returns an error for an unknown preset, an unreadable or invalid layout,
/// or a failed write.
pub fn generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let elements = match (&args.input, &args.preset) {
        (Some(path), _) => load_layout(path)?,
        (None, Some(name)) => presets::find(name)
            .ok_or_else(|| anyhow!("unknown preset '{name}'; run `skeleton-craft presets`"))?
            .elements(),
        (None, None) => return Err(anyhow!("either --input or --preset is required")),
    };
    tracing::info!(format = %args.format, elements = elements.len(), "Generating code");
    emit(
        args.output.as_deref(),
        &render(args.format, &elements, &args.component_name),
    )
}

/// Preset names grouped by category.
#[must_use]
pub fn presets_listing() -> String {
    let mut out = String::new();
    for category in PresetCategory::ALL {
        let _ = writeln!(out, "{category}:");
        for preset in presets::all().iter().filter(|p| p.category == category) {
            let _ = writeln!(out, "  {:<20} {}", preset.slug(), preset.name);
        }
    }
    out
}

/// Supported output formats.
#[must_use]
pub fn formats_listing() -> String {
    let mut out = String::new();
    for dialect in Dialect::ALL {
        let _ = writeln!(out, "{:<8} {} (.{})", dialect.as_str(), dialect.label(), dialect.extension());
    }
    out
}

/// `validate` subcommand: a one-line summary of a valid layout.
///
/// # Errors
///
/// Returns an error if the layout cannot be loaded.
pub fn validate(path: &Path) -> anyhow::Result<String> {
    let elements = load_layout(path)?;
    let locked = elements.iter().filter(|e| e.locked).count();
    let z = elements.iter().map(|e| e.z_index);
    let summary = match (z.clone().min(), z.max()) {
        (Some(min), Some(max)) => format!(
            "{}: {} elements ({} locked), z-index {min}..={max}",
            path.display(),
            elements.len(),
            locked
        ),
        _ => format!("{}: empty layout", path.display()),
    };
    tracing::info!(path = %path.display(), elements = elements.len(), "Layout is valid");
    Ok(summary)
}

/// `suggest` subcommand: a layout document, or generated source when a
/// format is given.
///
/// # Errors
///
/// Returns an error if the image is rejected, the service fails or the
/// returned layout is invalid.
pub async fn suggest(suggester: &dyn LayoutSuggester, args: &SuggestArgs) -> anyhow::Result<String> {
    let image = LayoutImage::read(&args.image).await?;
    let shapes = suggester.suggest(&image).await?;
    let layout = shapes_to_layout(&shapes);
    match args.format {
        Some(dialect) => Ok(render(dialect, &layout, &args.component_name)),
        None => Ok(LayoutDocument::new(layout).to_json()?),
    }
}

fn emit(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = text.len(), "Wrote output");
        }
        None => {
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listings() {
        let presets = presets_listing();
        assert!(presets.starts_with("Skeletons:\n"));
        assert!(presets.contains("  article-card"));
        assert!(presets.contains("Spinners:\n"));
        let formats = formats_listing();
        assert_eq!(formats.lines().count(), 5);
        assert!(formats.contains("react    React (.jsx)"));
    }

    #[test]
    fn test_render_uses_component_name() {
        let elements = presets::find("heartbeat").unwrap().elements();
        let out = render(Dialect::React, &elements, "Beat");
        assert!(out.contains("export default Beat;"));
    }
}
