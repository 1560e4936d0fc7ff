//! # Screenwright Runtime
//!
//! Interprets a `Catalog` of screen definitions:
//!
//! 1. **Resolve**: turn a screen's data source into procedure calls and a `ResolvedContext`
//! 2. **Render**: walk the layout tree into a `RenderTree`
//! 3. **Dispatch**: execute actions and publish UI events
//! 4. **Drafts**: archive and resume unfinished wizards
//!
//! Errors from the lower layers are caught here and turned into error
//! nodes or failed dispatch outcomes; `ScreenRuntime::render` never fails.

pub mod config;
pub mod context;
pub mod dispatch;
pub mod drafts;
pub mod events;
pub mod format;
pub mod handlers;
pub mod procedure;
pub mod render;
pub mod resolver;

pub use config::{DraftStoreConfig, RuntimeConfig};
pub use context::{RequestScope, ResolvedContext};
pub use dispatch::{ActionDispatcher, ActionScope, ActionState, DispatchOutcome, Effect, resolve_route};
pub use drafts::{
    DraftReconciler, DraftState, DraftStore, FileDraftStore, LeaveOutcome, MemoryDraftStore, open_store,
};
pub use events::{EventBus, Notice, NoticeLevel, UiEvent};
pub use format::{Cell, CellFormatter, CellRenderers};
pub use handlers::{ActionHandler, HandlerRegistry};
pub use procedure::{FixtureProcedures, ProcedureClient, ProcedureRegistry};
pub use render::{ActionButton, RenderNode, RenderTree, Renderer};
pub use resolver::{DataSourceResolver, FetchGeneration, FetchTicket, resolve_related, sort_rows};

use screenwright_core::{ScreenError, ScreenResult, Validatable};
use screenwright_ir::Catalog;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Version of the runtime
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// ScreenRuntime
// ============================================================================

/// A validated catalog wired to a procedure client and an event bus
pub struct ScreenRuntime {
    catalog: Arc<Catalog>,
    config: RuntimeConfig,
    resolver: DataSourceResolver,
    renderer: Renderer,
    dispatcher: ActionDispatcher,
    generation: FetchGeneration,
}

impl ScreenRuntime {
    pub fn builder(catalog: Catalog) -> ScreenRuntimeBuilder {
        ScreenRuntimeBuilder::new(catalog)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn dispatcher(&self) -> &ActionDispatcher {
        &self.dispatcher
    }

    pub fn bus(&self) -> &EventBus {
        self.dispatcher.bus()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.bus().subscribe()
    }

    /// Resolve a screen's data source
    pub async fn resolve(&self, screen_id: &str, scope: &RequestScope) -> ScreenResult<ResolvedContext> {
        let screen = self.catalog.screen(screen_id)?;
        self.resolver.resolve(&screen.data_source, scope).await
    }

    /// Resolve and render a screen
    ///
    /// Unknown screens and resolution failures come back as error trees.
    pub async fn render(&self, screen_id: &str, scope: &RequestScope) -> RenderTree {
        self.render_with_context(screen_id, scope).await.1
    }

    /// Like `render`, also returning the context the tree was rendered from
    ///
    /// The context is empty when resolution failed. Actions triggered from
    /// the tree read this context.
    pub async fn render_with_context(&self, screen_id: &str, scope: &RequestScope) -> (ResolvedContext, RenderTree) {
        let screen = match self.catalog.screen(screen_id) {
            Ok(screen) => screen,
            Err(err) => return (ResolvedContext::empty(), self.renderer.render_failure(screen_id, None, &err)),
        };

        match self.resolver.resolve(&screen.data_source, scope).await {
            Ok(ctx) => {
                let tree = self.renderer.render_screen(screen, &ctx, scope);
                (ctx, tree)
            }
            Err(err) => {
                let empty = ResolvedContext::empty();
                let title = screen.title.resolve_text(&scope.sources(empty.as_value()));
                (empty, self.renderer.render_failure(screen_id, title, &err))
            }
        }
    }

    /// Render, discarding the result if a newer render started meanwhile
    pub async fn render_latest(&self, screen_id: &str, scope: &RequestScope) -> Option<RenderTree> {
        let ticket = self.generation.begin();
        let tree = self.render(screen_id, scope).await;
        if self.generation.is_current(&ticket) {
            Some(tree)
        } else {
            debug!(screen = %screen_id, "Discarding stale render");
            None
        }
    }

    /// Trigger an action declared anywhere on a screen
    pub async fn trigger_action(&self, screen_id: &str, action_id: &str, scope: ActionScope<'_>) -> DispatchOutcome {
        match self.find_action(screen_id, action_id) {
            Ok(action) => self.dispatcher.trigger(action, scope).await,
            Err(err) => self.dispatcher.report(err),
        }
    }

    /// Confirm a pending action on a screen
    pub async fn confirm_action(&self, screen_id: &str, action_id: &str, scope: ActionScope<'_>) -> DispatchOutcome {
        match self.find_action(screen_id, action_id) {
            Ok(action) => self.dispatcher.confirm(action, scope).await,
            Err(err) => self.dispatcher.report(err),
        }
    }

    pub fn cancel_action(&self, action_id: &str) -> DispatchOutcome {
        self.dispatcher.cancel(action_id)
    }

    /// Trigger a journey quick action for a record in `status`
    pub async fn trigger_quick_action(
        &self,
        entity_type: &str,
        action_id: &str,
        status: &str,
        scope: ActionScope<'_>,
    ) -> DispatchOutcome {
        let quick = self.catalog.journey(entity_type).and_then(|journey| {
            journey.quick_action(action_id).ok_or_else(|| {
                ScreenError::InvalidConfig(format!(
                    "journey '{}' has no quick action '{}'",
                    entity_type, action_id
                ))
            })
        });
        match quick {
            Ok(quick) => self.dispatcher.trigger_quick_action(quick, status, scope).await,
            Err(err) => self.dispatcher.report(err),
        }
    }

    /// Open the draft store named by the configuration
    pub fn open_draft_store(&self) -> Arc<dyn DraftStore> {
        open_store(&self.config.draft_store)
    }

    /// Reconciler for the wizard registered under `store_key`
    pub fn draft_reconciler(&self, store_key: &str, store: Arc<dyn DraftStore>) -> ScreenResult<DraftReconciler> {
        let wizard = self
            .catalog
            .wizard(store_key)
            .ok_or_else(|| ScreenError::InvalidConfig(format!("no wizard registered for '{}'", store_key)))?;
        Ok(DraftReconciler::new(wizard.clone(), store))
    }

    fn find_action(&self, screen_id: &str, action_id: &str) -> ScreenResult<&screenwright_ir::ActionDescriptor> {
        self.catalog.screen(screen_id)?.action(action_id).ok_or_else(|| {
            ScreenError::malformed_action(action_id, format!("not declared on screen '{}'", screen_id))
        })
    }
}

impl std::fmt::Debug for ScreenRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenRuntime")
            .field("screens", &self.catalog.screen_ids().collect::<Vec<_>>())
            .field("config", &self.config)
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for `ScreenRuntime`
pub struct ScreenRuntimeBuilder {
    catalog: Catalog,
    config: RuntimeConfig,
    client: Option<Arc<dyn ProcedureClient>>,
    handlers: HandlerRegistry,
    renderers: CellRenderers,
    bus: EventBus,
}

impl ScreenRuntimeBuilder {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            config: RuntimeConfig::default(),
            client: None,
            handlers: HandlerRegistry::new(),
            renderers: CellRenderers::with_defaults(),
            bus: EventBus::default(),
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn client(mut self, client: Arc<dyn ProcedureClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn renderers(mut self, renderers: CellRenderers) -> Self {
        self.renderers = renderers;
        self
    }

    pub fn bus(mut self, bus: EventBus) -> Self {
        self.bus = bus;
        self
    }

    /// Validate the catalog and assemble the runtime
    pub fn build(self) -> ScreenResult<ScreenRuntime> {
        self.catalog.validate()?;

        let catalog = Arc::new(self.catalog);
        let client = self
            .client
            .unwrap_or_else(|| Arc::new(ProcedureRegistry::new()));

        let resolver = DataSourceResolver::new(client.clone(), catalog.clone())
            .with_page_size(self.config.default_page_size);
        let renderer = Renderer::new(catalog.clone(), &self.config).with_renderers(self.renderers);
        let dispatcher = ActionDispatcher::new(client, Arc::new(self.handlers), self.bus)
            .with_success_toasts(self.config.toast_on_success);

        info!(
            entities = catalog.entities.len(),
            screens = catalog.screens.len(),
            "Screen runtime ready"
        );
        Ok(ScreenRuntime {
            catalog,
            config: self.config,
            resolver,
            renderer,
            dispatcher,
            generation: FetchGeneration::new(),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use screenwright_ir::builtin::reference_catalog;
    use screenwright_ir::{ColumnConfig, DataSource, Layout, ScreenDefinition, ScreenKind, Section};
    use serde_json::json;

    fn procedures() -> ProcedureRegistry {
        ProcedureRegistry::new()
            .respond(
                "job.getById",
                json!({
                    "id": "j-1",
                    "title": "ICU Nurse",
                    "status": "open",
                    "account": { "name": "St. Mary's" },
                    "submissions": [],
                    "activities": []
                }),
            )
            .respond("dashboard.getSprintProgress", json!({ "placements": { "current": 2, "target": 2 } }))
            .respond("dashboard.getTasks", json!([]))
            .respond("dashboard.getPipelineHealth", json!({ "activeJobs": 4 }))
            .reject("dashboard.getAccountHealth", "timeout")
            .respond("dashboard.getRecentWins", json!([]))
            .respond("job.close", json!({ "status": "closed" }))
    }

    fn runtime() -> ScreenRuntime {
        ScreenRuntime::builder(reference_catalog().unwrap())
            .client(Arc::new(procedures()))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_render_detail_screen() {
        let rt = runtime();
        let tree = rt.render("job-detail", &RequestScope::new().with_param("id", "j-1")).await;
        assert_eq!(tree.title, "ICU Nurse");
        assert!(!tree.is_error());
        assert!(tree.find("submissions").is_some());
    }

    #[tokio::test]
    async fn test_unknown_screen_renders_misconfigured() {
        let tree = runtime().render("payroll", &RequestScope::new()).await;
        assert!(tree.is_error());
        assert!(matches!(tree.body[0], RenderNode::Misconfigured { .. }));
    }

    #[tokio::test]
    async fn test_aggregate_failure_renders_retryable_error() {
        let tree = runtime().render("recruiter-dashboard", &RequestScope::new()).await;
        assert_eq!(tree.title, "My Dashboard");
        let [RenderNode::FetchError { message, retryable }] = tree.body.as_slice() else {
            panic!("expected a fetch error, got {:?}", tree.body);
        };
        assert!(*retryable);
        assert!(message.contains("accountHealth"));
    }

    #[tokio::test]
    async fn test_missing_route_param_is_misconfigured() {
        let tree = runtime().render("job-detail", &RequestScope::new()).await;
        assert!(matches!(tree.body.as_slice(), [RenderNode::Misconfigured { .. }]));
    }

    #[tokio::test]
    async fn test_trigger_action_on_rendered_screen() {
        let rt = runtime();
        let scope = RequestScope::new().with_param("id", "j-1");
        let (ctx, _) = rt.render_with_context("job-detail", &scope).await;

        let outcome = rt.trigger_action("job-detail", "close", ActionScope::new(&ctx, &scope)).await;
        assert!(matches!(outcome, DispatchOutcome::AwaitingConfirmation(_)));
        let outcome = rt.confirm_action("job-detail", "close", ActionScope::new(&ctx, &scope)).await;
        assert!(outcome.is_completed());

        let missing = rt.trigger_action("job-detail", "teleport", ActionScope::new(&ctx, &scope)).await;
        assert!(matches!(missing.error(), Some(ScreenError::MalformedAction { .. })));
    }

    #[tokio::test]
    async fn test_quick_action_dispatch() {
        let rt = runtime();
        let mut rx = rt.subscribe();
        let ctx = ResolvedContext::new(json!({ "id": "j-1" }));
        let scope = RequestScope::new();

        let outcome = rt
            .trigger_quick_action("job", "activity", "open", ActionScope::new(&ctx, &scope))
            .await;
        assert!(outcome.is_completed());
        assert_eq!(
            rx.recv().await.unwrap(),
            UiEvent::OpenDialog {
                dialog: "logActivity".into(),
                entity_id: Some("j-1".into())
            }
        );
    }

    #[tokio::test]
    async fn test_render_latest_returns_current() {
        let rt = runtime();
        let tree = rt
            .render_latest("job-detail", &RequestScope::new().with_param("id", "j-1"))
            .await;
        assert!(tree.is_some());
    }

    #[tokio::test]
    async fn test_draft_reconciler_for_wizard() {
        let rt = runtime();
        let mut wizard = rt.draft_reconciler("job-intake", rt.open_draft_store()).unwrap();
        let outcome = wizard.leave(json!({ "title": "Welder" }), 0).await.unwrap();
        assert!(matches!(outcome, LeaveOutcome::Archived(_)));

        assert!(rt.draft_reconciler("timesheet", rt.open_draft_store()).is_err());
    }

    #[test]
    fn test_build_rejects_invalid_catalog() {
        let mut catalog = reference_catalog().unwrap();
        catalog
            .add_screen(ScreenDefinition::new(
                "orphan",
                ScreenKind::List,
                "Orphan",
                DataSource::list("invoice"),
                Layout::SingleColumn {
                    sections: vec![Section::table("rows", vec![ColumnConfig::new("id")])],
                },
            ))
            .unwrap();
        assert!(ScreenRuntime::builder(catalog).build().is_err());
    }
}
