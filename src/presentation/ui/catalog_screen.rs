//! Catalog screen: product cards over a list controller.

use std::future::Future;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};
use tracing::debug;

use crate::infrastructure::ImageValidator;
use crate::infrastructure::config::UiConfig;
use crate::presentation::widgets::{
    ImageResolution, ImageResolveRequest, ProductCard, ProductCardWidget, StatusBar,
};

use super::product_list::{
    EMPTY_MESSAGE, FetchCompletion, LOADING_MESSAGE, ProductListController, ProductListState,
};

const MIN_CARD_HEIGHT: u16 = 5;

/// State of the catalog screen.
pub struct CatalogScreenState {
    controller: ProductListController,
    cards: Vec<ProductCard>,
    selected: usize,
}

impl CatalogScreenState {
    /// Creates the screen state in `Loading`.
    #[must_use]
    pub const fn new(controller: ProductListController) -> Self {
        Self {
            controller,
            cards: Vec::new(),
            selected: 0,
        }
    }

    /// Returns the list state.
    #[must_use]
    pub const fn list_state(&self) -> &ProductListState {
        self.controller.state()
    }

    /// Returns the mounted cards.
    #[must_use]
    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }

    /// Returns the selected card index.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Unmounts every card and starts a new fetch cycle.
    ///
    /// Returns the fetch work to run in the background.
    pub fn begin_refresh(&mut self) -> impl Future<Output = FetchCompletion> + Send + use<> {
        for card in &mut self.cards {
            card.unmount();
        }
        self.cards.clear();
        self.selected = 0;

        let ticket = self.controller.begin_fetch();
        self.controller.fetch_task(ticket)
    }

    /// Applies a fetch result, mounting one card per product.
    ///
    /// Returns the image validations the new cards requested.
    pub fn apply_fetch(
        &mut self,
        completion: FetchCompletion,
        validator: &ImageValidator,
    ) -> Vec<ImageResolveRequest> {
        if !self.controller.complete(completion) {
            return Vec::new();
        }

        let Some(products) = self.controller.state().products() else {
            return Vec::new();
        };

        self.cards = products.iter().cloned().map(ProductCard::new).collect();
        self.selected = 0;
        debug!(cards = self.cards.len(), "Mounted product cards");

        self.cards
            .iter_mut()
            .filter_map(|card| card.mount(validator))
            .collect()
    }

    /// Routes an image result to the card that requested it.
    pub fn apply_image(&mut self, resolution: ImageResolution) -> bool {
        self.cards
            .iter_mut()
            .any(|card| card.apply_resolution(resolution))
    }

    /// Drops the selected card's cached verdict and resolves it again.
    pub fn recheck_selected(&mut self, validator: &ImageValidator) -> Option<ImageResolveRequest> {
        let card = self.cards.get_mut(self.selected)?;
        if let Some(url) = card.product().image() {
            validator.invalidate(url);
        }
        card.start_resolution(validator)
    }

    /// Selects the previous card.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Selects the next card.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.cards.len() {
            self.selected += 1;
        }
    }

    /// Selects the first card.
    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Selects the last card.
    pub fn select_last(&mut self) {
        self.selected = self.cards.len().saturating_sub(1);
    }
}

/// Renders [`CatalogScreenState`].
pub struct CatalogScreen {
    show_category: bool,
    card_height: u16,
}

impl CatalogScreen {
    /// Creates the screen from UI settings.
    #[must_use]
    pub fn new(ui: &UiConfig) -> Self {
        Self {
            show_category: ui.show_category,
            card_height: ui.card_height.max(MIN_CARD_HEIGHT),
        }
    }

    fn render_message(message: &str, style: Style, area: Rect, buf: &mut Buffer) {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        Paragraph::new(Line::from(message).centered())
            .style(style)
            .render(center, buf);
    }

    fn render_cards(&self, state: &CatalogScreenState, area: Rect, buf: &mut Buffer) {
        let visible = usize::from((area.height / self.card_height).max(1));
        let first = (state.selected + 1).saturating_sub(visible);

        let mut y = area.y;
        for (index, card) in state.cards.iter().enumerate().skip(first).take(visible) {
            let height = self.card_height.min(area.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }
            let card_area = Rect::new(area.x, y, area.width, height);
            ProductCardWidget::new(card)
                .selected(index == state.selected)
                .show_category(self.show_category)
                .render(card_area, buf);
            y += height;
        }
    }
}

impl StatefulWidget for CatalogScreen {
    type State = CatalogScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [content_area, status_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Storefront ");
        let inner = block.inner(content_area);
        block.render(content_area, buf);

        match state.controller.state() {
            ProductListState::Loading => Self::render_message(
                LOADING_MESSAGE,
                Style::default().fg(Color::Yellow),
                inner,
                buf,
            ),
            ProductListState::Error(message) => Self::render_message(
                message,
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                inner,
                buf,
            ),
            ProductListState::Ready(products) if products.is_empty() => Self::render_message(
                EMPTY_MESSAGE,
                Style::default().fg(Color::DarkGray),
                inner,
                buf,
            ),
            ProductListState::Ready(_) => self.render_cards(state, inner, buf),
        }

        (&StatusBar::for_list(state.controller.state())).render(status_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;

    use crate::application::use_cases::LoadProductsUseCase;
    use crate::domain::ports::mocks::{MockImageProbe, MockProductSource};
    use crate::infrastructure::{ImageValidationCache, MemoryKeyValueStore};

    fn validator() -> ImageValidator {
        ImageValidator::new(
            ImageValidationCache::new(Arc::new(MemoryKeyValueStore::new())),
            Arc::new(MockImageProbe::with_content_type("image/png")),
        )
    }

    fn state_for(listing: serde_json::Value) -> CatalogScreenState {
        let source = Arc::new(MockProductSource::responding(listing));
        CatalogScreenState::new(ProductListController::new(LoadProductsUseCase::new(source)))
    }

    fn render_text(state: &mut CatalogScreenState) -> String {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        CatalogScreen::new(&UiConfig::default()).render(area, &mut buf, state);

        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_renders_loading_message() {
        let mut state = state_for(json!([]));
        assert!(render_text(&mut state).contains("Loading products..."));
    }

    #[tokio::test]
    async fn test_empty_listing_renders_empty_message() {
        let mut state = state_for(json!([]));
        let completion = state.begin_refresh().await;
        state.apply_fetch(completion, &validator());

        assert!(render_text(&mut state).contains("No products available."));
    }

    #[tokio::test]
    async fn test_error_renders_fixed_message() {
        let source = Arc::new(MockProductSource::failing("boom"));
        let mut state =
            CatalogScreenState::new(ProductListController::new(LoadProductsUseCase::new(source)));
        let completion = state.begin_refresh().await;
        state.apply_fetch(completion, &validator());

        let text = render_text(&mut state);
        assert!(text.contains("Failed to load products. Please try again later."));
        assert!(!text.contains("boom"));
    }

    #[tokio::test]
    async fn test_apply_fetch_mounts_cards_and_requests_images() {
        let mut state = state_for(json!([
            { "id": 1, "name": "With image", "price": 10, "image": "https://example.com/a.png" },
            { "id": 2, "name": "Placeholder", "price": 10.1, "image": "/placeholder-image.jpg" },
            { "id": 3, "name": 123, "price": -5 }
        ]));
        let validator = validator();

        let completion = state.begin_refresh().await;
        let requests = state.apply_fetch(completion, &validator);

        assert_eq!(state.cards().len(), 2);
        assert!(state.cards().iter().all(ProductCard::is_mounted));
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://example.com/a.png");

        let text = render_text(&mut state);
        assert!(text.contains("$10.00"));
        assert!(text.contains("$10.10"));
    }

    #[tokio::test]
    async fn test_image_results_route_to_requesting_card() {
        let mut state = state_for(json!([
            { "id": 1, "name": "A", "price": 1, "image": "https://example.com/a.png" },
            { "id": 2, "name": "B", "price": 1, "image": "https://example.com/b.png" }
        ]));
        let validator = validator();
        let completion = state.begin_refresh().await;
        let mut requests = state.apply_fetch(completion, &validator);

        let second = requests.pop().unwrap().run(validator.clone()).await;
        assert!(state.apply_image(second));

        assert!(state.cards()[0].image_state().is_resolving());
        assert_eq!(state.cards()[1].displayed_image(), "https://example.com/b.png");
    }

    #[tokio::test]
    async fn test_refresh_discards_results_for_old_cards() {
        let mut state = state_for(json!([
            { "id": 1, "name": "A", "price": 1, "image": "https://example.com/a.png" }
        ]));
        let validator = validator();
        let completion = state.begin_refresh().await;
        let request = state.apply_fetch(completion, &validator).remove(0);

        let pending = state.begin_refresh();
        let resolution = request.run(validator.clone()).await;
        assert!(!state.apply_image(resolution));

        let completion = pending.await;
        state.apply_fetch(completion, &validator);
        assert_eq!(state.cards().len(), 1);
    }

    #[tokio::test]
    async fn test_selection_is_clamped() {
        let mut state = state_for(json!([
            { "id": 1, "name": "A", "price": 1 },
            { "id": 2, "name": "B", "price": 2 },
            { "id": 3, "name": "C", "price": 3 }
        ]));
        let completion = state.begin_refresh().await;
        state.apply_fetch(completion, &validator());

        state.select_previous();
        assert_eq!(state.selected(), 0);
        state.select_last();
        assert_eq!(state.selected(), 2);
        state.select_next();
        assert_eq!(state.selected(), 2);
        state.select_first();
        assert_eq!(state.selected(), 0);
    }

    #[tokio::test]
    async fn test_recheck_selected_invalidates_cached_verdict() {
        let mut state = state_for(json!([
            { "id": 1, "name": "A", "price": 1, "image": "https://example.com/a.png" }
        ]));
        let validator = validator();
        let completion = state.begin_refresh().await;
        let request = state.apply_fetch(completion, &validator).remove(0);
        let resolution = request.run(validator.clone()).await;
        state.apply_image(resolution);
        assert_eq!(validator.peek_cached("https://example.com/a.png"), Some(true));

        let again = state.recheck_selected(&validator);

        assert!(again.is_some());
        assert_eq!(validator.peek_cached("https://example.com/a.png"), None);
        assert!(state.cards()[0].image_state().is_resolving());
    }
}
