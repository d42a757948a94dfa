use api_scaffold_core::{
    GenerationOptions, Preferences, PreferencesStore, PresetDefinition, ScaffoldConfig,
    ScaffoldError, ScaffoldResult, OPTION_KEYS,
};
use console::style;
use inquire::{Confirm, InquireError, MultiSelect, Select};
use std::collections::BTreeMap;
use std::fmt;

fn prompt_error(error: InquireError) -> ScaffoldError {
    match error {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            ScaffoldError::Cancelled
        }
        other => ScaffoldError::prompt(other.to_string()),
    }
}

/// Interactive prompt utilities for CLI commands
pub struct Prompt;

impl Prompt {
    /// Ask a yes/no question with a default answer
    pub fn confirm(message: &str, default: bool) -> ScaffoldResult<bool> {
        Confirm::new(message)
            .with_default(default)
            .prompt()
            .map_err(prompt_error)
    }

    /// Select one option, starting at `cursor`
    pub fn select<T: fmt::Display>(
        message: &str,
        options: Vec<T>,
        cursor: usize,
    ) -> ScaffoldResult<T> {
        Select::new(message, options)
            .with_starting_cursor(cursor)
            .prompt()
            .map_err(prompt_error)
    }

    /// Multi-select with the options at `defaults` pre-checked
    pub fn multi_select<T: fmt::Display>(
        message: &str,
        options: Vec<T>,
        defaults: &[usize],
    ) -> ScaffoldResult<Vec<T>> {
        MultiSelect::new(message, options)
            .with_default(defaults)
            .prompt()
            .map_err(prompt_error)
    }
}

/// Output formatting utilities
pub struct Format;

impl Format {
    pub fn success(message: &str) {
        println!("{} {}", style("✔").green().bold(), message);
    }

    /// Errors go to stderr
    pub fn error(message: &str) {
        eprintln!("{} {}", style("✘").red().bold(), style(message).red());
    }

    pub fn warning(message: &str) {
        println!("{} {}", style("!").yellow().bold(), style(message).yellow());
    }

    pub fn info(message: &str) {
        println!("{} {}", style("·").cyan(), message);
    }

    /// Print a banner between rules
    pub fn banner(title: &str) {
        let rule = "=".repeat(46);
        println!();
        println!("{}", style(&rule).dim());
        println!("  {}", style(title).green().bold());
        println!("{}", style(&rule).dim());
        println!();
    }

    pub fn subheader(title: &str) {
        println!("{}", style(title).bold());
    }

    pub fn list(items: &[String]) {
        for item in items {
            println!("  - {}", item);
        }
    }

    pub fn numbered_list(items: &[&str]) {
        for (i, item) in items.iter().enumerate() {
            println!("  {} {}", style(format!("{}.", i + 1)).yellow(), item);
        }
    }
}

struct PresetChoice<'a>(&'a PresetDefinition);

impl fmt::Display for PresetChoice<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.description.is_empty() {
            write!(f, "{}", self.0.name)
        } else {
            write!(f, "{} - {}", self.0.name, self.0.description)
        }
    }
}

struct OptionChoice(&'static str);

impl fmt::Display for OptionChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.0 {
            "api" => "API methods (index, show, store, update, destroy)",
            "model" => "Model",
            "migration" => "Migration",
            "controller" => "Controller",
            "request" => "Form request",
            "resource" => "API resource",
            "test" => "Feature test",
            "admin" => "Admin panel resource (Nova / Filament)",
            "docs" => "Documentation",
            other => other,
        };
        f.write_str(label)
    }
}

/// Cached preferences; an unreadable cache is reported and ignored.
pub fn load_preferences(store: &PreferencesStore) -> Option<Preferences> {
    match store.load() {
        Ok(preferences) => preferences,
        Err(e) => {
            Format::warning(&format!(
                "Ignoring invalid preferences cache at {}: {}",
                store.path().display(),
                e
            ));
            None
        }
    }
}

/// Walk the user through preset and artifact selection.
///
/// Declining the final confirmation cancels the run.
pub fn run_wizard(
    name: &str,
    config: &ScaffoldConfig,
    store: &PreferencesStore,
) -> ScaffoldResult<GenerationOptions> {
    println!();
    println!("{}", style(format!("Service scaffolding for {}", name)).cyan().bold());
    println!();

    if config.presets.is_empty() {
        return Err(ScaffoldError::configuration("no presets are configured"));
    }

    let cached = load_preferences(store);
    let cursor = cached
        .as_ref()
        .and_then(|prefs| config.presets.iter().position(|p| p.key == prefs.preset))
        .unwrap_or(0);

    let choices: Vec<PresetChoice> = config.presets.iter().map(PresetChoice).collect();
    let preset = Prompt::select("Which preset would you like to use?", choices, cursor)?.0;

    let selected = if preset.is_custom() {
        let defaults: Vec<usize> = OPTION_KEYS
            .iter()
            .enumerate()
            .filter(|(_, key)| {
                cached
                    .as_ref()
                    .and_then(|prefs| prefs.options.get(**key))
                    .copied()
                    .unwrap_or(false)
            })
            .map(|(i, _)| i)
            .collect();
        let options: Vec<OptionChoice> = OPTION_KEYS.into_iter().map(OptionChoice).collect();
        let picked = Prompt::multi_select("Select the components to generate", options, &defaults)?;

        let map: BTreeMap<String, bool> = OPTION_KEYS
            .iter()
            .map(|key| (key.to_string(), picked.iter().any(|choice| choice.0 == *key)))
            .collect();
        GenerationOptions::from_map(&map)
    } else {
        preset.generation_options()
    };

    println!();
    Format::subheader("The following will be generated:");
    let artifacts: Vec<String> = selected
        .artifacts()
        .iter()
        .map(|artifact| artifact.label().to_string())
        .collect();
    Format::list(&artifacts);
    if selected.api {
        Format::info("Service and interface include API methods");
    }
    println!();

    if !Prompt::confirm("Proceed with generation?", true)? {
        return Err(ScaffoldError::Cancelled);
    }

    let preferences = Preferences::new(preset.key.clone(), selected.to_map());
    if let Err(e) = store.save(&preferences) {
        Format::warning(&format!("Could not cache preferences: {}", e));
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_preset_choice_display() {
        let config = ScaffoldConfig::default();
        let minimal = config.preset("minimal").unwrap();
        assert_eq!(PresetChoice(minimal).to_string(), "Minimal - Service and Interface only");
    }

    #[test]
    fn test_option_choices_cover_every_key() {
        for key in OPTION_KEYS {
            assert_ne!(OptionChoice(key).to_string(), key, "{key} has no label");
        }
    }

    #[test]
    fn test_invalid_cache_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");
        std::fs::write(&path, "{ broken").unwrap();

        assert!(load_preferences(&PreferencesStore::new(&path, true)).is_none());
    }

    #[test]
    fn test_cancellation_maps_to_cancelled() {
        assert!(prompt_error(InquireError::OperationCanceled).is_cancelled());
        assert!(prompt_error(InquireError::OperationInterrupted).is_cancelled());
        assert!(!prompt_error(InquireError::NotTTY).is_cancelled());
    }
}
