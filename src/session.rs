//! Message handling for one plugin session.
//!
//! A [`Session`] owns the state that survives between requests: the id of the
//! last generated report page and whether a generation is running. Every
//! inbound message is answered with zero or more [`UiMessage`]s; failures,
//! panics included, are turned into error notifications.

use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::collector::collect_page;
use crate::config::Config;
use crate::document::{Document, NodeId, NodeKind};
use crate::fonts::FontLoader;
use crate::messages::{self, Notification, PluginMessage, UiMessage};
use crate::reporter::{ReportOutcome, Reporter, CONTAINER_NAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReporterState {
    #[default]
    Idle,
    Generating,
}

/// State carried across requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Page created by the last successful generation.
    pub report_page: Option<NodeId>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReselectError {
    #[error("no design system has been generated in this session")]
    NotGenerated,
    #[error("design system page {0} not found")]
    PageNotFound(NodeId),
    #[error("design system container not found on page {0}")]
    ContainerNotFound(NodeId),
}

impl ReselectError {
    pub fn notification(&self) -> Notification {
        match self {
            ReselectError::NotGenerated => Notification::warning(messages::GENERATE_FIRST),
            ReselectError::PageNotFound(_) => Notification::error(messages::PAGE_NOT_FOUND),
            ReselectError::ContainerNotFound(_) => {
                Notification::error(messages::CONTAINER_NOT_FOUND)
            }
        }
    }
}

/// Switch to the stored report page, then select and frame its container.
pub fn reselect_report(doc: &mut Document, state: &SessionState) -> Result<NodeId, ReselectError> {
    let page = state
        .report_page
        .as_ref()
        .ok_or(ReselectError::NotGenerated)?;
    if !matches!(doc.get(page).map(|n| &n.kind), Some(NodeKind::Page(_))) {
        return Err(ReselectError::PageNotFound(page.clone()));
    }
    doc.set_current_page(page)
        .map_err(|_| ReselectError::PageNotFound(page.clone()))?;

    let container = doc
        .find_one(page, |node| node.name == CONTAINER_NAME)
        .ok_or_else(|| ReselectError::ContainerNotFound(page.clone()))?;
    doc.set_selection(page, vec![container.clone()])
        .map_err(|_| ReselectError::PageNotFound(page.clone()))?;
    doc.scroll_and_zoom_into_view(std::slice::from_ref(&container))
        .map_err(|_| ReselectError::ContainerNotFound(page.clone()))?;
    Ok(container)
}

/// Answers plugin messages against one document.
///
/// `handle` takes `&mut self`, so requests from a single owner are already
/// serialized and the `Generating` guard cannot trip for them. It stays as the
/// explicit form of the `Idle`/`Generating` machine that hosts can inspect via
/// [`Session::reporter_state`]; a generate request observed in `Generating` is
/// refused with a warning rather than starting a second report.
pub struct Session<'a> {
    config: &'a Config,
    fonts: &'a dyn FontLoader,
    state: SessionState,
    reporter: ReporterState,
    last_outcome: Option<ReportOutcome>,
}

impl<'a> Session<'a> {
    pub fn new(config: &'a Config, fonts: &'a dyn FontLoader) -> Self {
        Self {
            config,
            fonts,
            state: SessionState::default(),
            reporter: ReporterState::Idle,
            last_outcome: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn reporter_state(&self) -> ReporterState {
        self.reporter
    }

    /// Outcome of the most recent successful generation.
    pub fn last_outcome(&self) -> Option<&ReportOutcome> {
        self.last_outcome.as_ref()
    }

    pub async fn handle(&mut self, doc: &mut Document, message: PluginMessage) -> Vec<UiMessage> {
        debug!(?message, "handling message");
        let dispatched = AssertUnwindSafe(self.dispatch(doc, message))
            .catch_unwind()
            .await;
        match dispatched {
            Ok(replies) => replies,
            Err(panic) => {
                self.reporter = ReporterState::Idle;
                let reason = panic_message(panic.as_ref());
                error!(reason = %reason, "message handler panicked");
                vec![Notification::error(format!("Error: {reason}")).into()]
            }
        }
    }

    async fn dispatch(&mut self, doc: &mut Document, message: PluginMessage) -> Vec<UiMessage> {
        match message {
            PluginMessage::GenerateDesignSystem => self.generate(doc).await,
            PluginMessage::CopyDesignSystem => self.copy(doc),
        }
    }

    async fn generate(&mut self, doc: &mut Document) -> Vec<UiMessage> {
        if self.reporter == ReporterState::Generating {
            warn!("generation requested while another is running");
            return vec![Notification::warning(messages::GENERATION_IN_PROGRESS).into()];
        }
        self.reporter = ReporterState::Generating;

        let page = doc.current_page().clone();
        let inventory = collect_page(doc, &page, &self.config.collect_options());
        let reporter = Reporter::new(
            &self.config.report,
            self.fonts,
            self.config.fonts.load_timeout,
        );
        let result = reporter.generate(doc, &inventory).await;
        self.reporter = ReporterState::Idle;

        match result {
            Ok(outcome) => {
                info!(page = %outcome.page, "report page stored");
                self.state.report_page = Some(outcome.page.clone());
                let replies = vec![
                    UiMessage::GenerationComplete {
                        stats: outcome.stats,
                    },
                    Notification::success(messages::GENERATED).into(),
                ];
                self.last_outcome = Some(outcome);
                replies
            }
            Err(err) => {
                error!(error = %err, "design system generation failed");
                vec![Notification::error(format!("Error: {err}")).into()]
            }
        }
    }

    fn copy(&mut self, doc: &mut Document) -> Vec<UiMessage> {
        match reselect_report(doc, &self.state) {
            Ok(container) => {
                debug!(container = %container, "design system reselected");
                vec![Notification::success(messages::SELECTED).into()]
            }
            Err(err) => {
                warn!(error = %err, "could not reselect design system");
                vec![err.notification().into()]
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected failure".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::NodeTree;
    use crate::fonts::{FontCatalog, FontError, FontName};
    use crate::messages::NotificationLevel;
    use crate::test_support::{component, document, rect, text};
    use futures::future::BoxFuture;

    fn notify(level: NotificationLevel, message: &str) -> UiMessage {
        Notification::new(level, message).into()
    }

    fn fonts() -> FontCatalog {
        FontCatalog::new([
            FontName::new("Inter", "Regular"),
            FontName::new("Inter", "Bold"),
        ])
    }

    #[tokio::test]
    async fn generate_reports_stats_and_success() {
        let config = Config::default();
        let fonts = fonts();
        let mut doc = document(vec![
            rect("1:1", 1.0, 0.0, 0.0),
            text("1:2", "Inter", "Regular", 14.0, "Body"),
            component("2:1", "Button", 80.0, vec![]),
        ]);
        let mut session = Session::new(&config, &fonts);

        let replies = session.handle(&mut doc, PluginMessage::GenerateDesignSystem).await;

        assert_eq!(replies.len(), 2);
        match &replies[0] {
            UiMessage::GenerationComplete { stats } => {
                assert_eq!((stats.colors, stats.text_styles, stats.components), (1, 1, 1));
            }
            other => panic!("unexpected reply {other:?}"),
        }
        assert_eq!(replies[1], notify(NotificationLevel::Success, messages::GENERATED));
        let page = session.state().report_page.clone().expect("page stored");
        assert_eq!(doc.current_page(), &page);
        assert_eq!(session.reporter_state(), ReporterState::Idle);
    }

    #[tokio::test]
    async fn copy_before_generate_asks_to_generate() {
        let config = Config::default();
        let fonts = fonts();
        let mut doc = document(vec![rect("1:1", 1.0, 0.0, 0.0)]);
        doc.create_page("Notes");
        let current = doc.current_page().clone();
        let canvas = *doc.canvas();
        let mut session = Session::new(&config, &fonts);

        let replies = session.handle(&mut doc, PluginMessage::CopyDesignSystem).await;
        assert_eq!(
            replies,
            vec![notify(NotificationLevel::Warning, messages::GENERATE_FIRST)]
        );
        assert_eq!(doc.current_page(), &current);
        assert_eq!(doc.canvas(), &canvas);
        for page in doc.pages() {
            assert!(doc.selection(page).is_empty(), "page {page} gained a selection");
        }
    }

    #[tokio::test]
    async fn copy_after_generate_selects_container() {
        let config = Config::default();
        let fonts = fonts();
        let mut doc = document(vec![rect("1:1", 0.0, 0.0, 1.0)]);
        let original = doc.current_page().clone();
        let mut session = Session::new(&config, &fonts);
        session.handle(&mut doc, PluginMessage::GenerateDesignSystem).await;
        doc.set_current_page(&original).unwrap();

        let replies = session.handle(&mut doc, PluginMessage::CopyDesignSystem).await;

        assert_eq!(replies, vec![notify(NotificationLevel::Success, messages::SELECTED)]);
        let page = session.state().report_page.clone().unwrap();
        assert_eq!(doc.current_page(), &page);
        let container = session.last_outcome().unwrap().container.clone();
        assert_eq!(doc.selection(&page), &[container]);
    }

    #[tokio::test]
    async fn empty_page_still_generates_with_zero_stats() {
        let config = Config::default();
        let fonts = fonts();
        let mut doc = document(Vec::<NodeTree>::new());
        let mut session = Session::new(&config, &fonts);

        let replies = session.handle(&mut doc, PluginMessage::GenerateDesignSystem).await;
        assert_eq!(
            replies[0],
            UiMessage::GenerationComplete {
                stats: Default::default()
            }
        );
    }

    #[tokio::test]
    async fn missing_label_font_fails_without_storing_page() {
        let config = Config::default();
        let fonts = FontCatalog::new([FontName::new("Inter", "Regular")]);
        let mut doc = document(vec![rect("1:1", 1.0, 0.0, 0.0)]);
        let mut session = Session::new(&config, &fonts);

        let replies = session.handle(&mut doc, PluginMessage::GenerateDesignSystem).await;
        assert_eq!(replies.len(), 1);
        match &replies[0] {
            UiMessage::Notify(n) => {
                assert_eq!(n.level, NotificationLevel::Error);
                assert!(n.message.starts_with("Error: "), "got {}", n.message);
                assert!(n.message.contains("Inter Bold"), "got {}", n.message);
            }
            other => panic!("unexpected reply {other:?}"),
        }
        assert!(session.state().report_page.is_none());

        let replies = session.handle(&mut doc, PluginMessage::CopyDesignSystem).await;
        assert_eq!(
            replies,
            vec![notify(NotificationLevel::Warning, messages::GENERATE_FIRST)]
        );
    }

    #[tokio::test]
    async fn generation_while_generating_is_rejected() {
        let config = Config::default();
        let fonts = fonts();
        let mut doc = document(vec![]);
        let mut session = Session::new(&config, &fonts);
        session.reporter = ReporterState::Generating;
        let pages_before = doc.pages().len();

        let replies = session.handle(&mut doc, PluginMessage::GenerateDesignSystem).await;

        assert_eq!(
            replies,
            vec![notify(NotificationLevel::Warning, messages::GENERATION_IN_PROGRESS)]
        );
        assert_eq!(doc.pages().len(), pages_before);
    }

    struct PanickingLoader;

    impl FontLoader for PanickingLoader {
        fn load_font<'a>(&'a self, _font: &'a FontName) -> BoxFuture<'a, Result<(), FontError>> {
            futures::future::lazy(|_| -> Result<(), FontError> { panic!("font service crashed") })
                .boxed()
        }
    }

    #[tokio::test]
    async fn panics_become_error_notifications() {
        let config = Config::default();
        let fonts = PanickingLoader;
        let mut doc = document(vec![]);
        let mut session = Session::new(&config, &fonts);

        let replies = session.handle(&mut doc, PluginMessage::GenerateDesignSystem).await;

        assert_eq!(
            replies,
            vec![notify(NotificationLevel::Error, "Error: font service crashed")]
        );
        assert_eq!(session.reporter_state(), ReporterState::Idle);
    }

    #[test]
    fn reselect_reports_missing_page_and_container() {
        let mut doc = document(vec![]);
        let state = SessionState {
            report_page: Some(NodeId::new("9:9")),
        };
        assert_eq!(
            reselect_report(&mut doc, &state),
            Err(ReselectError::PageNotFound(NodeId::new("9:9")))
        );

        let page = doc.create_page("Auto Design System");
        let state = SessionState {
            report_page: Some(page.clone()),
        };
        assert_eq!(
            reselect_report(&mut doc, &state),
            Err(ReselectError::ContainerNotFound(page.clone()))
        );
        assert_eq!(doc.current_page(), &page);
        assert!(doc.selection(&page).is_empty());
    }
}
