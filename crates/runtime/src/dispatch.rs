//! Action dispatch
//!
//! Each action id moves through
//! `Idle → (visibility) → (confirmation) → Executing → Idle`.
//! A second trigger while the same id is pending or executing is rejected
//! with `Busy`. Failures are reported on the event bus as error toasts and
//! returned as `DispatchOutcome::Failed`; nothing is retried.

use crate::context::{RequestScope, ResolvedContext};
use crate::events::{EventBus, Notice, UiEvent};
use crate::handlers::HandlerRegistry;
use crate::procedure::ProcedureClient;
use parking_lot::Mutex;
use regex::{Captures, Regex};
use screenwright_core::{ScreenError, ScreenResult, path};
use screenwright_ir::{
    ActionDescriptor, ActionKind, BindingSources, ConfirmSpec, ExportFormat, QuickAction, is_visible,
    resolve_map,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};
use tracing::{debug, error, info};

static PLACEHOLDER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([\w.]+)\s*\}\}|:([A-Za-z_]\w*)"));

// ============================================================================
// Route templates
// ============================================================================

/// Substitute `{{path}}` and `:field` placeholders in a route template
///
/// Placeholders are looked up in `data` with dotted paths. A placeholder
/// with no displayable value is a configuration error.
pub fn resolve_route(template: &str, data: &Value) -> ScreenResult<String> {
    let pattern = PLACEHOLDER
        .as_ref()
        .map_err(|err| ScreenError::internal(format!("placeholder pattern: {}", err)))?;

    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in pattern.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        // `::name` is not a placeholder
        if caps.get(2).is_some() && template[..whole.start()].ends_with(':') {
            continue;
        }
        out.push_str(&template[last..whole.start()]);
        out.push_str(&placeholder_value(template, &caps, data)?);
        last = whole.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}

fn placeholder_value(template: &str, caps: &Captures<'_>, data: &Value) -> ScreenResult<String> {
    let name = caps
        .get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str())
        .unwrap_or_default();
    path::lookup(data, name)
        .and_then(path::display_scalar)
        .ok_or_else(|| ScreenError::missing_placeholder(template, name))
}

// ============================================================================
// Dispatch types
// ============================================================================

/// Where an action id currently sits in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    AwaitingConfirmation,
    Executing,
}

/// Data an action reads when it runs
#[derive(Debug, Clone, Copy)]
pub struct ActionScope<'a> {
    pub resolved: &'a ResolvedContext,
    pub request: &'a RequestScope,
}

impl<'a> ActionScope<'a> {
    pub fn new(resolved: &'a ResolvedContext, request: &'a RequestScope) -> Self {
        Self { resolved, request }
    }

    pub fn data(&self) -> &'a Value {
        self.resolved.as_value()
    }

    fn sources(&self) -> BindingSources<'a> {
        self.request.sources(self.resolved.as_value())
    }

    /// Id of the record the screen shows, if any
    fn entity_id(&self) -> Option<String> {
        self.resolved.text("id")
    }
}

/// What a trigger, confirm, or cancel call ended in
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The action's visibility rule is false for the current data
    Hidden,
    /// Waiting for `confirm` or `cancel`
    AwaitingConfirmation(ConfirmSpec),
    /// The same action is already pending or executing
    Busy,
    Cancelled,
    Completed(Effect),
    Failed(ScreenError),
}

impl DispatchOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, DispatchOutcome::Completed(_))
    }

    pub fn effect(&self) -> Option<&Effect> {
        match self {
            DispatchOutcome::Completed(effect) => Some(effect),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ScreenError> {
        match self {
            DispatchOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Result of a completed action
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Navigate {
        href: String,
    },
    DialogOpened {
        dialog: String,
        entity_id: Option<String>,
    },
    Mutated {
        result: Value,
        invalidated: Vec<String>,
    },
    Handled(Value),
    Exported {
        format: ExportFormat,
        payload: String,
    },
}

// ============================================================================
// ActionDispatcher
// ============================================================================

/// Executes action descriptors
pub struct ActionDispatcher {
    client: Arc<dyn ProcedureClient>,
    handlers: Arc<HandlerRegistry>,
    bus: EventBus,
    states: Mutex<HashMap<String, ActionState>>,
    toast_on_success: bool,
}

impl ActionDispatcher {
    pub fn new(client: Arc<dyn ProcedureClient>, handlers: Arc<HandlerRegistry>, bus: EventBus) -> Self {
        Self {
            client,
            handlers,
            bus,
            states: Mutex::new(HashMap::new()),
            toast_on_success: true,
        }
    }

    pub fn without_success_toasts(mut self) -> Self {
        self.toast_on_success = false;
        self
    }

    pub fn with_success_toasts(mut self, enabled: bool) -> Self {
        self.toast_on_success = enabled;
        self
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn state(&self, action_id: &str) -> ActionState {
        self.states.lock().get(action_id).copied().unwrap_or_default()
    }

    /// User trigger
    pub async fn trigger(&self, action: &ActionDescriptor, scope: ActionScope<'_>) -> DispatchOutcome {
        if !is_visible(action.visible.as_ref(), scope.data()) {
            debug!(action = %action.id, "Action hidden; trigger ignored");
            return DispatchOutcome::Hidden;
        }

        {
            let mut states = self.states.lock();
            if states.get(&action.id).is_some_and(|s| *s != ActionState::Idle) {
                debug!(action = %action.id, "Action already in progress");
                return DispatchOutcome::Busy;
            }
            if let Some(confirm) = &action.confirm {
                states.insert(action.id.clone(), ActionState::AwaitingConfirmation);
                return DispatchOutcome::AwaitingConfirmation(confirm.clone());
            }
            states.insert(action.id.clone(), ActionState::Executing);
        }

        self.run(action, scope).await
    }

    /// Accept a pending confirmation and execute the action
    pub async fn confirm(&self, action: &ActionDescriptor, scope: ActionScope<'_>) -> DispatchOutcome {
        {
            let mut states = self.states.lock();
            let state = states.get(&action.id).copied().unwrap_or_default();
            match state {
                ActionState::AwaitingConfirmation => {}
                ActionState::Executing => return DispatchOutcome::Busy,
                ActionState::Idle => {
                    drop(states);
                    return self.report(ScreenError::action_failed(&action.id, "no confirmation is pending"));
                }
            }
            if !is_visible(action.visible.as_ref(), scope.data()) {
                states.remove(&action.id);
                return DispatchOutcome::Hidden;
            }
            states.insert(action.id.clone(), ActionState::Executing);
        }

        self.run(action, scope).await
    }

    /// Dismiss a pending confirmation
    pub fn cancel(&self, action_id: &str) -> DispatchOutcome {
        let mut states = self.states.lock();
        match states.get(action_id) {
            Some(ActionState::Executing) => DispatchOutcome::Busy,
            _ => {
                states.remove(action_id);
                DispatchOutcome::Cancelled
            }
        }
    }

    /// Trigger a journey quick action for a record in `status`
    pub async fn trigger_quick_action(
        &self,
        quick: &QuickAction,
        status: &str,
        scope: ActionScope<'_>,
    ) -> DispatchOutcome {
        if !quick.is_visible_for(status) {
            debug!(action = %quick.id, status, "Quick action hidden for status");
            return DispatchOutcome::Hidden;
        }
        self.trigger(&quick.to_action(), scope).await
    }

    // ========================================================================
    // Execution
    // ========================================================================

    async fn run(&self, action: &ActionDescriptor, scope: ActionScope<'_>) -> DispatchOutcome {
        let _guard = InFlight {
            states: &self.states,
            action_id: &action.id,
        };
        debug!(action = %action.id, kind = action.kind_name(), "Executing action");

        match self.execute(action, scope).await {
            Ok(effect) => DispatchOutcome::Completed(effect),
            Err(err) => self.report(err),
        }
    }

    /// Report a failure to the user and return it as the outcome
    pub fn report(&self, err: ScreenError) -> DispatchOutcome {
        error!(error = %err, "Action failed");
        self.bus.publish(UiEvent::Toast(Notice::error(err.to_string())));
        DispatchOutcome::Failed(err)
    }

    async fn execute(&self, action: &ActionDescriptor, scope: ActionScope<'_>) -> ScreenResult<Effect> {
        match &action.kind {
            ActionKind::Navigate { route } => {
                let href = resolve_route(route, scope.data())?;
                self.bus.publish(UiEvent::Navigate { href: href.clone() });
                Ok(Effect::Navigate { href })
            }
            ActionKind::Modal { modal } => {
                let entity_id = scope.entity_id();
                self.bus.publish(UiEvent::OpenDialog {
                    dialog: modal.clone(),
                    entity_id: entity_id.clone(),
                });
                Ok(Effect::DialogOpened {
                    dialog: modal.clone(),
                    entity_id,
                })
            }
            ActionKind::Mutation {
                procedure,
                input,
                invalidate,
                success_message,
            } => {
                let input = Value::Object(resolve_map(input, &scope.sources()));
                let result = self
                    .client
                    .call(procedure, input)
                    .await
                    .map_err(|err| as_action_error(&action.id, err))?;

                if !invalidate.is_empty() {
                    self.bus.publish(UiEvent::Invalidate {
                        targets: invalidate.clone(),
                    });
                }
                if let Some(message) = success_message.as_ref().filter(|_| self.toast_on_success) {
                    self.bus.publish(UiEvent::Toast(Notice::success(message)));
                }
                info!(action = %action.id, procedure = %procedure, "Mutation succeeded");
                Ok(Effect::Mutated {
                    result,
                    invalidated: invalidate.clone(),
                })
            }
            ActionKind::Function { handler } => {
                let handler = self.handlers.get(handler)?;
                let result = handler
                    .handle(action, scope.data())
                    .await
                    .map_err(|err| as_action_error(&action.id, err))?;
                Ok(Effect::Handled(result))
            }
            ActionKind::Export {
                procedure,
                format,
                params,
            } => {
                let input = Value::Object(resolve_map(params, &scope.sources()));
                let result = self
                    .client
                    .call(procedure, input)
                    .await
                    .map_err(|err| as_action_error(&action.id, err))?;
                let rows = export_rows(result);
                let payload = match format {
                    ExportFormat::Csv => to_csv(&rows)?,
                    ExportFormat::Json => serde_json::to_string_pretty(&rows)?,
                };
                if self.toast_on_success {
                    self.bus
                        .publish(UiEvent::Toast(Notice::info(format!("Exported {} rows", rows.len()))));
                }
                Ok(Effect::Exported {
                    format: *format,
                    payload,
                })
            }
        }
    }
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("handlers", &self.handlers)
            .field("states", &*self.states.lock())
            .field("toast_on_success", &self.toast_on_success)
            .finish()
    }
}

/// Returns the action to `Idle` when execution ends, however it ends
struct InFlight<'a> {
    states: &'a Mutex<HashMap<String, ActionState>>,
    action_id: &'a str,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.states.lock().remove(self.action_id);
    }
}

/// Configuration errors keep their class; everything else is an action failure
fn as_action_error(action_id: &str, err: ScreenError) -> ScreenError {
    if err.is_configuration() {
        err
    } else {
        ScreenError::action_failed(action_id, err.to_string())
    }
}

// ============================================================================
// Export serialization
// ============================================================================

/// Rows from an export procedure result: an array, `{ items }`, or one record
fn export_rows(result: Value) -> Vec<Value> {
    match result {
        Value::Array(rows) => rows,
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(rows)) => rows,
            Some(other) => {
                map.insert("items".to_string(), other);
                vec![Value::Object(map)]
            }
            None => vec![Value::Object(map)],
        },
        Value::Null => Vec::new(),
        other => vec![other],
    }
}

/// CSV with a header row; columns are the union of row keys in first-seen order
fn to_csv(rows: &[Value]) -> ScreenResult<String> {
    let csv_err = |err: csv::Error| ScreenError::with_context("CSV export", err.to_string());

    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    if headers.is_empty() {
        // scalar rows
        for row in rows {
            writer.write_record([csv_field(Some(row))]).map_err(csv_err)?;
        }
    } else {
        writer.write_record(&headers).map_err(csv_err)?;
        let empty = Map::new();
        for row in rows {
            let map = row.as_object().unwrap_or(&empty);
            writer
                .write_record(headers.iter().map(|h| csv_field(map.get(h))))
                .map_err(csv_err)?;
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ScreenError::with_context("CSV export", err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ScreenError::with_context("CSV export", err.to_string()))
}

fn csv_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(value @ (Value::Array(_) | Value::Object(_))) => value.to_string(),
        Some(value) => path::display_scalar(value).unwrap_or_default(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NoticeLevel;
    use crate::handlers::ActionHandler;
    use crate::procedure::ProcedureRegistry;
    use async_trait::async_trait;
    use screenwright_ir::builtin::reference_catalog;
    use screenwright_ir::{Binding, Operator, Visibility};
    use serde_json::json;
    use tokio::sync::Notify;

    type Calls = Arc<Mutex<Vec<(String, Value)>>>;

    fn recording(calls: &Calls, name: &str, response: Value) -> ProcedureRegistry {
        let calls = calls.clone();
        let procedure = name.to_string();
        ProcedureRegistry::new().with_procedure(name, move |input| {
            calls.lock().push((procedure.clone(), input));
            let response = response.clone();
            async move { Ok(response) }
        })
    }

    fn dispatcher(client: ProcedureRegistry, handlers: HandlerRegistry) -> ActionDispatcher {
        ActionDispatcher::new(Arc::new(client), Arc::new(handlers), EventBus::default())
    }

    fn job() -> ResolvedContext {
        ResolvedContext::new(json!({ "id": "j-1", "title": "ICU Nurse", "status": "open" }))
    }

    fn close_job() -> ActionDescriptor {
        reference_catalog()
            .unwrap()
            .screen("job-detail")
            .unwrap()
            .action("close")
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_resolve_route_placeholders() {
        let data = json!({ "id": 42, "account": { "slug": "acme" } });
        assert_eq!(resolve_route("/jobs/{{id}}/edit", &data).unwrap(), "/jobs/42/edit");
        assert_eq!(resolve_route("/jobs/:id", &data).unwrap(), "/jobs/42");
        assert_eq!(
            resolve_route("/accounts/{{ account.slug }}/jobs/new?edit=:id", &data).unwrap(),
            "/accounts/acme/jobs/new?edit=42"
        );
        assert_eq!(resolve_route("/jobs", &data).unwrap(), "/jobs");
        assert_eq!(resolve_route("/a::id", &data).unwrap(), "/a::id");
    }

    #[test]
    fn test_resolve_route_missing_placeholder() {
        let err = resolve_route("/jobs/{{id}}", &json!({ "title": "x" })).unwrap_err();
        assert!(matches!(
            &err,
            ScreenError::MissingPlaceholder { placeholder, .. } if placeholder == "id"
        ));
        assert!(err.is_configuration());

        let blank = resolve_route("/jobs/:id", &json!({ "id": "  " })).unwrap_err();
        assert!(matches!(blank, ScreenError::MissingPlaceholder { .. }));
    }

    #[tokio::test]
    async fn test_navigate_publishes_event() {
        let d = dispatcher(ProcedureRegistry::new(), HandlerRegistry::new());
        let mut rx = d.bus().subscribe();
        let ctx = job();
        let scope = RequestScope::new();
        let action = ActionDescriptor::navigate("edit", "Edit", "/employee/recruiting/jobs/{{id}}/edit");

        let outcome = d.trigger(&action, ActionScope::new(&ctx, &scope)).await;
        assert_eq!(
            outcome.effect(),
            Some(&Effect::Navigate {
                href: "/employee/recruiting/jobs/j-1/edit".into()
            })
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            UiEvent::Navigate {
                href: "/employee/recruiting/jobs/j-1/edit".into()
            }
        );
        assert_eq!(d.state("edit"), ActionState::Idle);
    }

    #[tokio::test]
    async fn test_missing_placeholder_is_reported() {
        let d = dispatcher(ProcedureRegistry::new(), HandlerRegistry::new());
        let mut rx = d.bus().subscribe();
        let ctx = ResolvedContext::new(json!({ "title": "no id" }));
        let scope = RequestScope::new();
        let action = ActionDescriptor::navigate("edit", "Edit", "/jobs/:id");

        let outcome = d.trigger(&action, ActionScope::new(&ctx, &scope)).await;
        assert!(matches!(outcome.error(), Some(ScreenError::MissingPlaceholder { .. })));
        let UiEvent::Toast(notice) = rx.recv().await.unwrap() else {
            panic!("expected a toast");
        };
        assert_eq!(notice.level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_hidden_action_is_noop() {
        let calls = Calls::default();
        let d = dispatcher(recording(&calls, "job.close", json!({})), HandlerRegistry::new());
        let ctx = ResolvedContext::new(json!({ "id": "j-1", "status": "filled" }));
        let scope = RequestScope::new();

        let outcome = d.trigger(&close_job(), ActionScope::new(&ctx, &scope)).await;
        assert!(matches!(outcome, DispatchOutcome::Hidden));
        assert!(calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_mutation() {
        let calls = Calls::default();
        let d = dispatcher(
            recording(&calls, "job.close", json!({ "status": "closed" })),
            HandlerRegistry::new(),
        );
        let mut rx = d.bus().subscribe();
        let ctx = job();
        let scope = RequestScope::new().with_context("user.id", "u-7");
        let action = close_job();

        let outcome = d.trigger(&action, ActionScope::new(&ctx, &scope)).await;
        let DispatchOutcome::AwaitingConfirmation(confirm) = outcome else {
            panic!("expected confirmation, got {:?}", outcome);
        };
        assert!(confirm.destructive);
        assert_eq!(d.state("close"), ActionState::AwaitingConfirmation);
        assert!(matches!(d.trigger(&action, ActionScope::new(&ctx, &scope)).await, DispatchOutcome::Busy));
        assert!(calls.lock().is_empty());

        let outcome = d.confirm(&action, ActionScope::new(&ctx, &scope)).await;
        assert_eq!(
            outcome.effect(),
            Some(&Effect::Mutated {
                result: json!({ "status": "closed" }),
                invalidated: vec!["job.getById".into(), "job.list".into()],
            })
        );
        assert_eq!(
            calls.lock().as_slice(),
            &[("job.close".to_string(), json!({ "id": "j-1", "closedBy": "u-7" }))]
        );
        assert_eq!(d.state("close"), ActionState::Idle);

        assert_eq!(
            rx.recv().await.unwrap(),
            UiEvent::Invalidate {
                targets: vec!["job.getById".into(), "job.list".into()]
            }
        );
        assert_eq!(rx.recv().await.unwrap(), UiEvent::Toast(Notice::success("Job closed")));
    }

    #[tokio::test]
    async fn test_cancel_returns_to_idle() {
        let calls = Calls::default();
        let d = dispatcher(recording(&calls, "job.close", json!({})), HandlerRegistry::new());
        let ctx = job();
        let scope = RequestScope::new();
        let action = close_job();

        d.trigger(&action, ActionScope::new(&ctx, &scope)).await;
        assert!(matches!(d.cancel("close"), DispatchOutcome::Cancelled));
        assert_eq!(d.state("close"), ActionState::Idle);
        assert!(calls.lock().is_empty());

        let outcome = d.confirm(&action, ActionScope::new(&ctx, &scope)).await;
        assert!(matches!(outcome.error(), Some(ScreenError::ActionFailed { .. })));
    }

    #[tokio::test]
    async fn test_mutation_failure_keeps_page_state() {
        let client = ProcedureRegistry::new().reject("candidate.archive", "database unavailable");
        let d = dispatcher(client, HandlerRegistry::new()).without_success_toasts();
        let mut rx = d.bus().subscribe();
        let ctx = ResolvedContext::new(json!({ "id": "c-1", "status": "bench" }));
        let scope = RequestScope::new();
        let action = ActionDescriptor::mutation("archive", "Archive", "candidate.archive")
            .with_input("id", Binding::field("id"));

        let outcome = d.trigger(&action, ActionScope::new(&ctx, &scope)).await;
        let Some(ScreenError::ActionFailed { action, message }) = outcome.error() else {
            panic!("expected action failure");
        };
        assert_eq!(action, "archive");
        assert!(message.contains("database unavailable"));
        assert_eq!(ctx.get("status"), Some(&json!("bench")));

        let UiEvent::Toast(notice) = rx.recv().await.unwrap() else {
            panic!("expected a toast");
        };
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(d.state("archive"), ActionState::Idle);
    }

    #[tokio::test]
    async fn test_unknown_procedure_stays_configuration_error() {
        let d = dispatcher(ProcedureRegistry::new(), HandlerRegistry::new());
        let ctx = job();
        let scope = RequestScope::new();
        let action = ActionDescriptor::mutation("hold", "Hold", "job.hold");

        let outcome = d.trigger(&action, ActionScope::new(&ctx, &scope)).await;
        assert!(matches!(outcome.error(), Some(ScreenError::UnknownProcedure(_))));
    }

    #[tokio::test]
    async fn test_modal_opens_dialog() {
        let d = dispatcher(ProcedureRegistry::new(), HandlerRegistry::new());
        let mut rx = d.bus().subscribe();
        let ctx = job();
        let scope = RequestScope::new();
        let action = ActionDescriptor::modal("log-activity", "Log Activity", "log-activity");

        d.trigger(&action, ActionScope::new(&ctx, &scope)).await;
        assert_eq!(
            rx.recv().await.unwrap(),
            UiEvent::OpenDialog {
                dialog: "log-activity".into(),
                entity_id: Some("j-1".into())
            }
        );
    }

    #[tokio::test]
    async fn test_function_handlers() {
        let handlers = HandlerRegistry::new().with_fn("initiate-call", |_, data| Ok(json!({ "dialing": data["phone"] })));
        let d = dispatcher(ProcedureRegistry::new(), handlers);
        let ctx = ResolvedContext::new(json!({ "id": "c-1", "phone": "555-0100" }));
        let scope = RequestScope::new();

        let call = ActionDescriptor::function("call", "Call", "initiate-call");
        let outcome = d.trigger(&call, ActionScope::new(&ctx, &scope)).await;
        assert_eq!(outcome.effect(), Some(&Effect::Handled(json!({ "dialing": "555-0100" }))));

        let missing = ActionDescriptor::function("place", "Mark Placed", "mark-consultant-placed");
        let outcome = d.trigger(&missing, ActionScope::new(&ctx, &scope)).await;
        assert!(matches!(outcome.error(), Some(ScreenError::UnknownHandler(_))));
    }

    #[tokio::test]
    async fn test_second_trigger_while_executing_is_busy() {
        struct Slow(Arc<Notify>);

        #[async_trait]
        impl ActionHandler for Slow {
            async fn handle(&self, _: &ActionDescriptor, _: &Value) -> ScreenResult<Value> {
                self.0.notified().await;
                Ok(Value::Null)
            }
        }

        let notify = Arc::new(Notify::new());
        let handlers = HandlerRegistry::new().with_handler("slow", Arc::new(Slow(notify.clone())));
        let d = dispatcher(ProcedureRegistry::new(), handlers);
        let ctx = job();
        let scope = RequestScope::new();
        let action = ActionDescriptor::function("sync", "Sync", "slow");

        let first = d.trigger(&action, ActionScope::new(&ctx, &scope));
        let second = async {
            tokio::task::yield_now().await;
            let outcome = d.trigger(&action, ActionScope::new(&ctx, &scope)).await;
            notify.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_completed());
        assert!(matches!(second, DispatchOutcome::Busy));
        assert_eq!(d.state("sync"), ActionState::Idle);
    }

    #[tokio::test]
    async fn test_csv_export() {
        let calls = Calls::default();
        let rows = json!({
            "items": [
                { "candidate": "Ana Ruiz", "rate": 80, "status": "submitted" },
                { "candidate": "Li, Wei", "status": "placed", "tags": ["icu"] }
            ],
            "total": 2
        });
        let d = dispatcher(recording(&calls, "submission.export", rows), HandlerRegistry::new());
        let ctx = job();
        let scope = RequestScope::new();
        let action = ActionDescriptor::export("export", "Export", "submission.export", ExportFormat::Csv)
            .with_input("jobId", Binding::field("id"));

        let outcome = d.trigger(&action, ActionScope::new(&ctx, &scope)).await;
        let Some(Effect::Exported { format, payload }) = outcome.effect() else {
            panic!("expected export, got {:?}", outcome);
        };
        assert_eq!(*format, ExportFormat::Csv);
        assert_eq!(
            payload,
            "candidate,rate,status,tags\nAna Ruiz,80,submitted,\n\"Li, Wei\",,placed,\"[\"\"icu\"\"]\"\n"
        );
        assert_eq!(calls.lock()[0].1, json!({ "jobId": "j-1" }));
    }

    #[tokio::test]
    async fn test_quick_action_respects_status() {
        let catalog = reference_catalog().unwrap();
        let journey = catalog.journey("job").unwrap();
        let edit = journey.quick_action("edit").unwrap();
        let d = dispatcher(ProcedureRegistry::new(), HandlerRegistry::new());
        let ctx = job();
        let scope = RequestScope::new();

        let hidden = d.trigger_quick_action(edit, "filled", ActionScope::new(&ctx, &scope)).await;
        assert!(matches!(hidden, DispatchOutcome::Hidden));

        let shown = d.trigger_quick_action(edit, "open", ActionScope::new(&ctx, &scope)).await;
        assert_eq!(
            shown.effect(),
            Some(&Effect::Navigate {
                href: "/employee/recruiting/jobs/new?edit=j-1".into()
            })
        );
    }

    #[tokio::test]
    async fn test_visibility_checked_again_on_confirm() {
        let d = dispatcher(ProcedureRegistry::new().respond("job.reopen", json!({})), HandlerRegistry::new());
        let action = ActionDescriptor::mutation("reopen", "Reopen", "job.reopen")
            .visible_when(Visibility::when("status", Operator::Eq, "closed"))
            .confirmed_by(ConfirmSpec::new("Reopen?", "The job will accept submissions again."));
        let scope = RequestScope::new();

        let closed = ResolvedContext::new(json!({ "id": "j-1", "status": "closed" }));
        d.trigger(&action, ActionScope::new(&closed, &scope)).await;

        let reopened = ResolvedContext::new(json!({ "id": "j-1", "status": "open" }));
        let outcome = d.confirm(&action, ActionScope::new(&reopened, &scope)).await;
        assert!(matches!(outcome, DispatchOutcome::Hidden));
        assert_eq!(d.state("reopen"), ActionState::Idle);
    }
}
