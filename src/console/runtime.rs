use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::QueryBackend;
use crate::config::{ConsoleConfig, StalePolicy};
use crate::console::event::ConsoleEvent;
use crate::console::session::ResultsSession;
use crate::logic::{Debouncer, FormReport, QuerySelector, Submission};
use crate::model::QueryRegistry;
use crate::view::{format_record, render_form, render_menu, Clipboard, ResultsView, SearchBar};

pub const HELP: &str = "\
commands:
  list                 show the query menu
  select <n|id>        pick a query
  set <field> <value>  edit a field of the active query (empty value clears it)
  back                 return to the query menu
  search <text>        filter the current results
  clear                drop the search filter
  copy <n>             copy result n to the clipboard
  show                 print the current results
  quit";

/// Where the console draws. The terminal prints; tests record.
pub trait Screen: Send {
    fn show(&mut self, frame: &str);
    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub debounce: Duration,
    pub copied_ack: Duration,
    pub stale_policy: StalePolicy,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self::from(&ConsoleConfig::default())
    }
}

impl From<&ConsoleConfig> for ConsoleSettings {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            debounce: config.debounce(),
            copied_ack: config.copied_ack(),
            stale_policy: config.stale_policy,
        }
    }
}

type SubmitFn = Box<dyn FnMut(Submission) + Send>;

/// The page root. Owns every piece of UI state and processes one event at
/// a time; requests and timers report back through the same queue.
pub struct Console<B, C, S> {
    backend: Arc<B>,
    clipboard: Arc<C>,
    screen: S,
    registry: QueryRegistry,
    selector: QuerySelector<SubmitFn>,
    session: ResultsSession,
    results: ResultsView,
    search: SearchBar,
    debounce: Debouncer,
    copied_timer: Debouncer,
    settings: ConsoleSettings,
    events: UnboundedSender<ConsoleEvent>,
    inbox: UnboundedReceiver<ConsoleEvent>,
}

impl<B, C, S> Console<B, C, S>
where
    B: QueryBackend + 'static,
    C: Clipboard + 'static,
    S: Screen,
{
    pub fn new(backend: Arc<B>, clipboard: Arc<C>, screen: S, settings: ConsoleSettings) -> Self {
        let (events, inbox) = mpsc::unbounded_channel();
        let submissions = events.clone();
        let on_submit: SubmitFn = Box::new(move |submission| {
            let _ = submissions.send(ConsoleEvent::Submit(submission));
        });

        Self {
            backend,
            clipboard,
            screen,
            registry: QueryRegistry::new(),
            selector: QuerySelector::new(on_submit),
            session: ResultsSession::new(settings.stale_policy),
            results: ResultsView::new(),
            search: SearchBar::new(),
            debounce: Debouncer::new(),
            copied_timer: Debouncer::new(),
            settings,
            events,
            inbox,
        }
    }

    /// Queue handle for input sources
    pub fn sender(&self) -> UnboundedSender<ConsoleEvent> {
        self.events.clone()
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn session(&self) -> &ResultsSession {
        &self.session
    }

    pub fn selector(&self) -> &QuerySelector<SubmitFn> {
        &self.selector
    }

    pub fn results(&self) -> &ResultsView {
        &self.results
    }

    /// Process events until `Quit`, then hand the screen back.
    pub async fn run(mut self) -> S {
        let menu = render_menu(&self.registry);
        self.screen.show(&menu);
        while self.pump().await {}
        self.debounce.cancel();
        self.copied_timer.cancel();
        self.screen
    }

    /// Wait for the next queued event and handle it. False once the
    /// console should stop.
    pub async fn pump(&mut self) -> bool {
        match self.inbox.recv().await {
            Some(event) => self.handle(event).await,
            None => false,
        }
    }

    pub async fn handle(&mut self, event: ConsoleEvent) -> bool {
        match event {
            ConsoleEvent::Select(kind) => {
                self.debounce.cancel();
                self.session.invalidate();
                self.selector.select(kind);
                self.show_form();
            }
            ConsoleEvent::Dismiss => {
                self.debounce.cancel();
                self.selector.dismiss();
                let menu = render_menu(&self.registry);
                self.screen.show(&menu);
            }
            ConsoleEvent::Edit { field, value } => self.edit(&field, &value),
            ConsoleEvent::Reported { activation, params } => {
                self.selector.report(activation, params);
            }
            ConsoleEvent::Submit(submission) => self.submit(submission),
            ConsoleEvent::Completed {
                sequence,
                kind,
                result,
            } => match result {
                Ok(response) => {
                    let count = response.data.len();
                    if self.session.apply(sequence, response) {
                        info!("{} returned {} record(s)", kind, count);
                        self.search.clear();
                        self.session.set_search("");
                        self.results.clear_copied();
                        self.copied_timer.cancel();
                        self.show_results();
                    }
                }
                Err(e) if self.session.is_current(sequence) => {
                    warn!("{} failed: {}", kind, e);
                    self.screen.alert(&e.to_string());
                }
                Err(e) => warn!("ignoring failure of superseded request #{}: {}", sequence, e),
            },
            ConsoleEvent::Search(text) => {
                let term = self.search.submit(&text).to_string();
                self.session.set_search(term);
                self.results.clear_copied();
                self.show_results();
            }
            ConsoleEvent::ClearSearch => {
                self.search.clear();
                self.session.set_search("");
                self.results.clear_copied();
                self.show_results();
            }
            ConsoleEvent::Copy(position) => self.copy(position).await,
            ConsoleEvent::CopiedExpired => self.results.clear_copied(),
            ConsoleEvent::ShowMenu => {
                let menu = render_menu(&self.registry);
                self.screen.show(&menu);
            }
            ConsoleEvent::ShowResults => self.show_results(),
            ConsoleEvent::Help => self.screen.show(HELP),
            ConsoleEvent::Notice(message) => self.screen.show(&format!("  {}", message)),
            ConsoleEvent::Quit => return false,
        }
        true
    }

    fn edit(&mut self, field: &str, value: &str) {
        match self.selector.edit(field, value) {
            Ok(FormReport {
                activation,
                params,
                debounced: true,
            }) => {
                let events = self.events.clone();
                self.debounce.schedule(self.settings.debounce, async move {
                    let _ = events.send(ConsoleEvent::Reported { activation, params });
                });
            }
            Ok(report) => {
                self.selector.params_changed(report.params);
            }
            Err(e) => {
                debug!("edit rejected: {}", e);
                self.screen.show(&format!("  {}", e));
                return;
            }
        }
        self.show_form();
    }

    fn submit(&mut self, submission: Submission) {
        if self.session.policy() == StalePolicy::LatestRequested
            && self.selector.activation() != Some(submission.activation)
        {
            warn!(
                "dropping {} submitted by form #{}, another query is active",
                submission.kind, submission.activation
            );
            return;
        }

        let sequence = self.session.next_sequence();
        info!("submitting {} as request #{}", submission.kind, sequence);

        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = backend.fetch(submission.kind, &submission.params).await;
            let _ = events.send(ConsoleEvent::Completed {
                sequence,
                kind: submission.kind,
                result,
            });
        });
    }

    async fn copy(&mut self, position: usize) {
        let keys = self.session.keys();
        let text = position
            .checked_sub(1)
            .and_then(|index| self.session.displayed().get(index).map(|record| format_record(record, &keys)));

        let Some(text) = text else {
            self.screen.show(&format!("  no record #{}", position));
            return;
        };

        match self.clipboard.write_text(&text).await {
            Ok(()) => {
                self.results.mark_copied(position - 1);
                let events = self.events.clone();
                self.copied_timer.schedule(self.settings.copied_ack, async move {
                    let _ = events.send(ConsoleEvent::CopiedExpired);
                });
                self.show_results();
            }
            Err(e) => {
                warn!("copy failed: {}", e);
                self.screen.alert(&format!("{}\n{}", e, text));
            }
        }
    }

    fn show_form(&mut self) {
        let frame = match (self.selector.active(), self.selector.form()) {
            (Some(kind), Some(form)) => render_form(kind.descriptor(), form.values()),
            _ => render_menu(&self.registry),
        };
        self.screen.show(&frame);
    }

    fn show_results(&mut self) {
        let frame = match self.session.response() {
            None => "  no query has been run yet".to_string(),
            Some(response) => {
                let displayed = self.session.displayed();
                let header = if self.search.is_active() {
                    format!(
                        "{} of {} record(s) matching \"{}\"",
                        displayed.len(),
                        response.data.len(),
                        self.search.term()
                    )
                } else {
                    format!("{} record(s)", response.data.len())
                };
                format!(
                    "{}\n{}",
                    header,
                    self.results.render(&displayed, &response.field_names())
                )
            }
        };
        self.screen.show(&frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConsoleError, Result};
    use crate::model::{ParamValue, ParameterSet, QueryKind, QueryResponse};
    use crate::view::MemoryClipboard;
    use parking_lot::Mutex;
    use serde_json::json;

    #[derive(Default)]
    struct FakeBackend {
        calls: Mutex<Vec<(QueryKind, ParameterSet)>>,
    }

    impl FakeBackend {
        fn calls(&self) -> Vec<(QueryKind, ParameterSet)> {
            self.calls.lock().clone()
        }
    }

    #[async_trait::async_trait]
    impl QueryBackend for FakeBackend {
        async fn fetch(&self, kind: QueryKind, params: &ParameterSet) -> Result<QueryResponse> {
            self.calls.lock().push((kind, params.clone()));
            match kind {
                QueryKind::EmployeesByPosition => Err(ConsoleError::Http {
                    status: 500,
                    status_text: "Internal Server Error".to_string(),
                    body: "database unavailable".to_string(),
                }),
                QueryKind::TopActors => {
                    // the first, larger request is the slow one
                    let limit = match params.get("limit") {
                        Some(ParamValue::Number(n)) => *n,
                        _ => 0,
                    };
                    let delay = if limit == 3 { 200 } else { 10 };
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    Ok(envelope(json!([{"name": format!("limit {}", limit), "total_projects": limit}])))
                }
                _ => Ok(envelope(json!([
                    {"production_title": "Night Shift", "total_expense": 1200.5},
                    {"production_title": "Alpine Echo", "total_expense": 0.0}
                ]))),
            }
        }
    }

    fn envelope(data: serde_json::Value) -> QueryResponse {
        let keys: Vec<String> = data[0]
            .as_object()
            .map(|record| record.keys().cloned().collect())
            .unwrap_or_default();
        let count = data.as_array().map(Vec::len).unwrap_or_default();
        serde_json::from_value(json!({"data": data, "count": count, "key": keys})).unwrap()
    }

    #[derive(Default)]
    struct RecordingScreen {
        frames: Vec<String>,
        alerts: Vec<String>,
    }

    impl Screen for RecordingScreen {
        fn show(&mut self, frame: &str) {
            self.frames.push(frame.to_string());
        }

        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }
    }

    fn console() -> (
        Console<FakeBackend, MemoryClipboard, RecordingScreen>,
        Arc<FakeBackend>,
        MemoryClipboard,
    ) {
        let backend = Arc::new(FakeBackend::default());
        let clipboard = MemoryClipboard::new();
        let console = Console::new(
            Arc::clone(&backend),
            Arc::new(clipboard.clone()),
            RecordingScreen::default(),
            ConsoleSettings::default(),
        );
        (console, backend, clipboard)
    }

    #[tokio::test]
    async fn test_zero_parameter_query_loads_without_input() {
        let (mut console, backend, _) = console();
        console.handle(ConsoleEvent::Select(QueryKind::ProductionExpense)).await;

        assert!(console.pump().await); // Submit
        assert!(console.pump().await); // Completed

        assert_eq!(
            backend.calls(),
            vec![(QueryKind::ProductionExpense, ParameterSet::new())]
        );
        assert_eq!(console.session().response().unwrap().data.len(), 2);
        assert!(console.screen().frames.last().unwrap().contains("Night Shift"));
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_results() {
        let (mut console, _backend, _) = console();
        console.handle(ConsoleEvent::Select(QueryKind::ProductionExpense)).await;
        console.pump().await;
        console.pump().await;
        let before = console.session().response().cloned();

        console.handle(ConsoleEvent::Select(QueryKind::EmployeesByPosition)).await;
        console
            .handle(ConsoleEvent::Edit {
                field: "position".to_string(),
                value: "Actor".to_string(),
            })
            .await;
        console.pump().await;
        console.pump().await;

        assert_eq!(console.session().response().cloned(), before);
        let alerts = &console.screen().alerts;
        assert_eq!(alerts.len(), 1);
        assert!(alerts[0].contains("500"));
        assert!(alerts[0].contains("database unavailable"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_free_text_edits_are_debounced() {
        let (mut console, backend, _) = console();
        console.handle(ConsoleEvent::Select(QueryKind::PerformerPartner)).await;
        for value in ["A", "Al", "Alice"] {
            console
                .handle(ConsoleEvent::Edit {
                    field: "performer_name".to_string(),
                    value: value.to_string(),
                })
                .await;
        }
        assert!(backend.calls().is_empty());

        console.pump().await; // Reported after the quiet period
        console.pump().await; // Submit
        console.pump().await; // Completed

        assert_eq!(
            backend.calls(),
            vec![(
                QueryKind::PerformerPartner,
                ParameterSet::new().with("performer_name", "Alice")
            )]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_stale_response_is_dropped() {
        let (mut console, backend, _) = console();
        console.handle(ConsoleEvent::Select(QueryKind::TopActors)).await;
        console.pump().await; // Submit limit 3 (slow)
        console
            .handle(ConsoleEvent::Edit {
                field: "limit".to_string(),
                value: "4".to_string(),
            })
            .await;
        console.pump().await; // Submit limit 4 (fast)
        console.pump().await; // Completed limit 4
        console.pump().await; // Completed limit 3, discarded

        assert_eq!(backend.calls().len(), 2);
        let response = console.session().response().unwrap();
        assert_eq!(response.data[0]["name"], "limit 4");
    }

    #[tokio::test]
    async fn test_queued_submission_of_replaced_query_is_not_sent() {
        let (mut console, backend, _) = console();
        console.handle(ConsoleEvent::Select(QueryKind::ProductionExpense)).await;
        console.handle(ConsoleEvent::Select(QueryKind::PerformerPartner)).await;

        assert!(console.pump().await); // Submit queued by the first selection
        assert_eq!(console.selector().active(), Some(QueryKind::PerformerPartner));
        assert!(backend.calls().is_empty());
        assert!(console.session().response().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_writes_clipboard_and_acknowledgement_expires() {
        let (mut console, _backend, clipboard) = console();
        console.handle(ConsoleEvent::Select(QueryKind::ProductionExpense)).await;
        console.pump().await;
        console.pump().await;

        console.handle(ConsoleEvent::Copy(2)).await;
        assert_eq!(
            clipboard.last().as_deref(),
            Some("production_title: Alpine Echo\ntotal_expense: 0.0")
        );
        assert_eq!(console.results().copied(), Some(1));

        console.pump().await; // CopiedExpired after the acknowledgement delay
        assert_eq!(console.results().copied(), None);
    }

    #[tokio::test]
    async fn test_search_filters_without_touching_envelope() {
        let (mut console, _backend, _) = console();
        console.handle(ConsoleEvent::Select(QueryKind::ProductionExpense)).await;
        console.pump().await;
        console.pump().await;

        console.handle(ConsoleEvent::Search("alpine".to_string())).await;
        assert_eq!(console.session().displayed().len(), 1);
        assert_eq!(console.session().response().unwrap().data.len(), 2);
        assert!(console
            .screen()
            .frames
            .last()
            .unwrap()
            .starts_with("1 of 2 record(s) matching \"alpine\""));

        console.handle(ConsoleEvent::ClearSearch).await;
        assert_eq!(console.session().displayed().len(), 2);
    }

    #[tokio::test]
    async fn test_copy_out_of_range_is_a_notice() {
        let (mut console, _backend, clipboard) = console();
        console.handle(ConsoleEvent::Copy(1)).await;
        assert!(clipboard.writes().is_empty());
        assert!(console.screen().alerts.is_empty());
        assert_eq!(console.screen().frames.last().unwrap(), "  no record #1");
    }

    #[tokio::test]
    async fn test_quit_stops_the_loop() {
        let (console, _backend, _) = console();
        let sender = console.sender();
        sender.send(ConsoleEvent::Help).unwrap();
        sender.send(ConsoleEvent::Quit).unwrap();
        let screen = console.run().await;
        assert_eq!(screen.frames.len(), 2);
        assert_eq!(screen.frames[1], HELP);
    }
}
