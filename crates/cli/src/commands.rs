//! One handler per subcommand

use crate::output::format_tree;
use anyhow::{Context, Result, bail};
use colored::Colorize;
use screenwright_ir::builtin::reference_catalog;
use screenwright_ir::{Catalog, QuickActionKind, Validator, load_catalog, load_screen, save_catalog};
use screenwright_runtime::drafts::DraftStore;
use screenwright_runtime::{FileDraftStore, FixtureProcedures, RequestScope, RuntimeConfig, ScreenRuntime};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;
use walkdir::WalkDir;

/// Catalog from `path`, or the reference catalog when none is given
pub fn open_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let catalog =
                load_catalog(path).with_context(|| format!("Failed to load catalog {}", path.display()))?;
            debug!(path = %path.display(), screens = catalog.screens.len(), "Loaded catalog");
            Ok(catalog)
        }
        None => Ok(reference_catalog()?),
    }
}

pub fn validate(catalog: &Catalog) -> Result<()> {
    let result = Validator::with_default_rules().validate(catalog);

    for error in &result.errors {
        println!("  {} {}", "error:".red().bold(), error);
    }
    for warning in &result.warnings {
        println!("  {}", warning.to_string().yellow());
    }

    println!(
        "{} entities, {} journeys, {} screens, {} wizards",
        catalog.entities.len(),
        catalog.journeys.len(),
        catalog.screens.len(),
        catalog.wizards.len()
    );

    if result.has_errors() {
        println!("{} {} error(s)", "✗ Invalid".red().bold(), result.errors.len());
        bail!("catalog validation failed");
    }
    println!("{}", "✓ Valid".green().bold());
    Ok(())
}

pub struct RenderRequest {
    pub screen: String,
    pub fixtures: PathBuf,
    pub params: Vec<(String, String)>,
    pub context: Option<PathBuf>,
    pub json: bool,
}

pub async fn render(catalog: Catalog, config: RuntimeConfig, request: RenderRequest) -> Result<()> {
    let fixtures = FixtureProcedures::load(&request.fixtures)
        .with_context(|| format!("Failed to load fixtures {}", request.fixtures.display()))?;

    let mut scope = RequestScope::new();
    for (name, value) in &request.params {
        scope = scope.with_param(name, value.as_str());
    }
    if let Some(path) = &request.context {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read context {}", path.display()))?;
        let context: Value = serde_json::from_str(&text).context("Context file is not valid JSON")?;
        scope = scope.with_context_value(context);
    }

    let runtime = ScreenRuntime::builder(catalog)
        .config(config)
        .client(Arc::new(fixtures))
        .build()?;
    let tree = runtime.render(&request.screen, &scope).await;

    if request.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print!("{}", format_tree(&tree));
    }

    if tree.is_error() {
        bail!("screen '{}' did not render", request.screen);
    }
    Ok(())
}

pub fn journey(catalog: &Catalog, entity: &str, status: &str) -> Result<()> {
    let journey = catalog.journey(entity)?;
    let current = journey.current_step_index(status);

    println!("{} journey, status {}", entity.bold(), status.cyan());
    for (index, step) in journey.steps.iter().enumerate() {
        let line = format!("{}. {}", index + 1, step.label);
        if index < current {
            println!("  {} {}", "✓".green(), line);
        } else if index == current {
            println!("  {} {}", "▶".cyan().bold(), line.bold());
        } else {
            println!("    {}", line.dimmed());
        }
    }

    let actions = journey.visible_quick_actions(status);
    if actions.is_empty() {
        println!("No quick actions");
        return Ok(());
    }
    println!("Quick actions:");
    for action in actions {
        let target = match &action.kind {
            QuickActionKind::Navigate { href } => format!("-> {}", href),
            QuickActionKind::Dialog { dialog_id } => format!("dialog {}", dialog_id),
            QuickActionKind::Mutation { procedure } => format!("calls {}", procedure),
        };
        println!("  {} ({}) {}", action.label, action.id, target.dimmed());
    }
    Ok(())
}

pub fn export(out: &Path) -> Result<()> {
    let catalog = reference_catalog()?;
    save_catalog(&catalog, out).with_context(|| format!("Failed to write {}", out.display()))?;
    info!(path = %out.display(), "Exported reference catalog");
    println!("{} {}", "Wrote".green(), out.display());
    Ok(())
}

pub fn list_screens(catalog: &Catalog) {
    for screen in catalog.screens.values() {
        println!(
            "{:<24} {:<12} {}",
            screen.id,
            format!("{:?}", screen.kind).to_lowercase(),
            screen.title.describe().dimmed()
        );
    }
}

/// Validate every `*.json` screen file under `dir` against `catalog`
pub fn check_screen_dir(catalog: &Catalog, dir: &Path) -> Result<()> {
    let validator = Validator::with_default_rules();
    let mut checked = 0usize;
    let mut failed = 0usize;

    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        checked += 1;

        let screen = match load_screen(path) {
            Ok(screen) => screen,
            Err(e) => {
                failed += 1;
                println!("{} {}: {}", "✗".red(), path.display(), e);
                continue;
            }
        };
        let result = validator.validate_screen(catalog, &screen);
        if result.has_errors() {
            failed += 1;
            println!("{} {}", "✗".red(), path.display());
            for error in &result.errors {
                println!("    {}", error);
            }
        } else {
            println!("{} {} ({})", "✓".green(), path.display(), screen.id);
        }
    }

    if failed > 0 {
        bail!("{} of {} screen file(s) failed validation", failed, checked);
    }
    println!("{} screen file(s) valid", checked);
    Ok(())
}

pub async fn list_drafts(store: &Path, key: Option<&str>) -> Result<()> {
    let store = FileDraftStore::new(store);
    let drafts = match key {
        Some(key) => store.list_by_store_key(key).await?,
        None => store.list().await?,
    };
    if drafts.is_empty() {
        println!("No drafts");
        return Ok(());
    }
    for draft in drafts {
        println!(
            "{}  {:<16} step {}  {}  {}",
            draft.id,
            draft.store_key,
            draft.current_step + 1,
            draft.updated_at.format("%Y-%m-%d %H:%M"),
            draft.display_name.bold()
        );
    }
    Ok(())
}

pub async fn show_draft(store: &Path, id: Uuid) -> Result<()> {
    let draft = FileDraftStore::new(store).get(id).await?;
    println!("{}", serde_json::to_string_pretty(&draft)?);
    Ok(())
}

pub async fn delete_draft(store: &Path, id: Uuid) -> Result<()> {
    if !FileDraftStore::new(store).delete(id).await? {
        bail!("no draft with id {}", id);
    }
    println!("{} {}", "Deleted".green(), id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use screenwright_ir::WizardDraft;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_open_catalog_defaults_to_reference() {
        let catalog = open_catalog(None).unwrap();
        assert!(catalog.screen("job-detail").is_ok());
    }

    #[test]
    fn test_open_catalog_reports_path() {
        let err = open_catalog(Some(Path::new("/nonexistent/catalog.json"))).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/catalog.json"));
    }

    #[test]
    fn test_validate_reference_catalog() {
        validate(&reference_catalog().unwrap()).unwrap();
    }

    #[test]
    fn test_journey_unknown_entity() {
        let catalog = reference_catalog().unwrap();
        assert!(journey(&catalog, "invoice", "open").is_err());
    }

    #[test]
    fn test_check_screen_dir() {
        let dir = TempDir::new().unwrap();
        let catalog = reference_catalog().unwrap();
        let screen = catalog.screen("job-detail").unwrap();
        std::fs::write(dir.path().join("job.json"), serde_json::to_string(screen).unwrap()).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        check_screen_dir(&catalog, dir.path()).unwrap();

        std::fs::write(dir.path().join("broken.json"), "{").unwrap();
        assert!(check_screen_dir(&catalog, dir.path()).is_err());
    }

    #[tokio::test]
    async fn test_render_reports_failed_screen() {
        let dir = TempDir::new().unwrap();
        let fixtures = dir.path().join("fixtures.json");
        std::fs::write(&fixtures, "{}").unwrap();

        let request = RenderRequest {
            screen: "job-detail".into(),
            fixtures,
            params: vec![("id".into(), "j-1".into())],
            context: None,
            json: true,
        };
        let err = render(reference_catalog().unwrap(), RuntimeConfig::default(), request)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("job-detail"));
    }

    #[tokio::test]
    async fn test_draft_commands() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("drafts.json");
        let catalog = reference_catalog().unwrap();
        let wizard = catalog.wizards.values().next().unwrap();

        let store = FileDraftStore::new(&path);
        let draft = store
            .create(WizardDraft::new(wizard, json!({ "title": "Welder" }), 1))
            .await
            .unwrap();

        list_drafts(&path, None).await.unwrap();
        list_drafts(&path, Some(&wizard.store_key)).await.unwrap();
        show_draft(&path, draft.id).await.unwrap();
        delete_draft(&path, draft.id).await.unwrap();
        assert!(delete_draft(&path, draft.id).await.is_err());
        assert!(store.list().await.unwrap().is_empty());
    }
}
