//! Main application orchestrator.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::application::use_cases::LoadProductsUseCase;
use crate::domain::ports::ProductSourcePort;
use crate::infrastructure::ImageValidator;
use crate::infrastructure::config::UiConfig;
use crate::presentation::events::{EventHandler, KeyAction};
use crate::presentation::widgets::{ImageResolution, ImageResolveRequest};

use super::catalog_screen::{CatalogScreen, CatalogScreenState};
use super::product_list::{FetchCompletion, ProductListController};

#[derive(Debug)]
enum Action {
    ProductsLoaded(FetchCompletion),
    ImageResolved(ImageResolution),
}

/// Terminal catalog application.
pub struct App {
    screen: CatalogScreenState,
    ui: UiConfig,
    validator: ImageValidator,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    fetch_handle: Option<JoinHandle<()>>,
    running: bool,
}

impl App {
    /// Creates the application over a product source and image validator.
    #[must_use]
    pub fn new(
        source: Arc<dyn ProductSourcePort>,
        validator: ImageValidator,
        ui: UiConfig,
    ) -> Self {
        let controller = ProductListController::new(LoadProductsUseCase::new(source));
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            screen: CatalogScreenState::new(controller),
            ui,
            validator,
            action_tx,
            action_rx,
            fetch_handle: None,
            running: true,
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.refresh();

        let mut terminal_events = EventStream::new();
        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(Ok(event)) = terminal_events.next() => {
                    self.handle_terminal_event(&event);
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }
        info!("Application exiting normally");
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        frame.render_stateful_widget(CatalogScreen::new(&self.ui), frame.area(), &mut self.screen);
    }

    fn handle_terminal_event(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        match EventHandler::map_key(key) {
            KeyAction::Quit => self.running = false,
            KeyAction::Refresh => self.refresh(),
            KeyAction::SelectPrevious => self.screen.select_previous(),
            KeyAction::SelectNext => self.screen.select_next(),
            KeyAction::SelectFirst => self.screen.select_first(),
            KeyAction::SelectLast => self.screen.select_last(),
            KeyAction::RecheckImage => {
                if let Some(request) = self.screen.recheck_selected(&self.validator) {
                    self.spawn_image_request(request);
                }
            }
            KeyAction::Ignored => {}
        }
    }

    fn refresh(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }

        let fetch = self.screen.begin_refresh();
        let tx = self.action_tx.clone();

        self.fetch_handle = Some(tokio::spawn(async move {
            let completion = fetch.await;
            let _ = tx.send(Action::ProductsLoaded(completion));
        }));
    }

    fn spawn_image_request(&self, request: ImageResolveRequest) {
        let validator = self.validator.clone();
        let tx = self.action_tx.clone();

        tokio::spawn(async move {
            let resolution = request.run(validator).await;
            let _ = tx.send(Action::ImageResolved(resolution));
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::ProductsLoaded(completion) => {
                self.fetch_handle = None;
                let requests = self.screen.apply_fetch(completion, &self.validator);
                debug!(requests = requests.len(), "Resolving card images");
                for request in requests {
                    self.spawn_image_request(request);
                }
            }
            Action::ImageResolved(resolution) => {
                if !self.screen.apply_image(resolution) {
                    debug!("Discarded stale image resolution");
                }
            }
        }
    }
}
