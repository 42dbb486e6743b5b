//! Product card widget with per-card image resolution.

use std::sync::atomic::{AtomicU64, Ordering};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use serde_json::Value;
use tracing::debug;

use crate::domain::entities::{CardImageState, IMAGE_UNAVAILABLE_ALT, PLACEHOLDER_IMAGE, Product};
use crate::infrastructure::ImageValidator;

/// Text shown when a product has no description.
pub const DESCRIPTION_FALLBACK: &str = "No description available.";

const CARD_ROLE: &str = "article";

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> CardGeneration {
    CardGeneration(NEXT_GENERATION.fetch_add(1, Ordering::Relaxed))
}

/// Formats a raw price value as dollars with two decimals.
///
/// Anything that is not a finite number formats as `$0.00`.
#[must_use]
pub fn format_price(value: &Value) -> String {
    format_amount(value.as_f64().unwrap_or(0.0))
}

/// Formats an amount as dollars with two decimals.
///
/// Negative zero prints as `$0.00`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let amount = if amount.is_finite() && amount.abs() > 0.0 { amount } else { 0.0 };
    format!("${amount:.2}")
}

/// Identifies one image resolution cycle of one card.
///
/// Unique across the process so a result can never match a card it was not
/// issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardGeneration(u64);

/// Image validation work requested by a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolveRequest {
    /// Generation the result must be tagged with.
    pub generation: CardGeneration,
    /// URL to validate.
    pub url: String,
}

impl ImageResolveRequest {
    /// Runs the validation.
    pub async fn run(self, validator: ImageValidator) -> ImageResolution {
        let valid = validator.resolve(&self.url).await;
        ImageResolution {
            generation: self.generation,
            valid,
        }
    }
}

/// Outcome of an [`ImageResolveRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageResolution {
    /// Generation the request was issued with.
    pub generation: CardGeneration,
    /// Validator verdict.
    pub valid: bool,
}

/// Accessible projection of a rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Semantic role, always `article`.
    pub role: &'static str,
    /// `Product: {name}`.
    pub aria_label: String,
    /// Product name.
    pub name: String,
    /// Description or its fallback.
    pub description: String,
    /// Formatted price.
    pub price: String,
    /// `Price: {price}`.
    pub price_label: String,
    /// Image source currently displayed.
    pub image_src: String,
    /// Image alternative text.
    pub image_alt: String,
    /// Category, if any.
    pub category: Option<String>,
}

/// One product plus its own image resolution state.
#[derive(Debug, Clone)]
pub struct ProductCard {
    product: Product,
    image_state: CardImageState,
    image_failed: bool,
    mounted: bool,
    generation: CardGeneration,
}

impl ProductCard {
    /// Creates an unmounted card.
    #[must_use]
    pub fn new(product: Product) -> Self {
        Self {
            product,
            image_state: CardImageState::Placeholder,
            image_failed: false,
            mounted: false,
            generation: next_generation(),
        }
    }

    /// Returns the product.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Returns the image state.
    #[must_use]
    pub const fn image_state(&self) -> &CardImageState {
        &self.image_state
    }

    /// Returns true while mounted.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Mounts the card and starts image resolution.
    ///
    /// Returns the validation request to run, if any.
    pub fn mount(&mut self, validator: &ImageValidator) -> Option<ImageResolveRequest> {
        self.mounted = true;
        self.start_resolution(validator)
    }

    /// Unmounts the card. Results arriving afterwards are ignored.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation = next_generation();
    }

    /// Replaces the product, re-resolving only when the image changed.
    pub fn update_product(
        &mut self,
        product: Product,
        validator: &ImageValidator,
    ) -> Option<ImageResolveRequest> {
        let image_changed = product.image() != self.product.image();
        self.product = product;
        if image_changed && self.mounted {
            self.start_resolution(validator)
        } else {
            None
        }
    }

    /// Starts a new resolution cycle for the current image.
    ///
    /// Supersedes any request still in flight.
    pub fn start_resolution(&mut self, validator: &ImageValidator) -> Option<ImageResolveRequest> {
        self.generation = next_generation();
        self.image_failed = false;

        let url = match self.product.image() {
            None | Some(PLACEHOLDER_IMAGE) => {
                self.image_state = CardImageState::Resolved(PLACEHOLDER_IMAGE.to_string());
                return None;
            }
            Some(url) => url.to_string(),
        };

        if validator.peek_cached(&url) == Some(false) {
            debug!(url = %url, "Cached negative verdict, using placeholder");
            self.image_state = CardImageState::Resolved(PLACEHOLDER_IMAGE.to_string());
            return None;
        }

        self.image_state = CardImageState::Resolving;
        Some(ImageResolveRequest {
            generation: self.generation,
            url,
        })
    }

    /// Applies a resolution result. Returns false if it was stale.
    pub fn apply_resolution(&mut self, resolution: ImageResolution) -> bool {
        if !self.mounted || resolution.generation != self.generation {
            return false;
        }

        let url = match self.product.image() {
            Some(url) if resolution.valid => url.to_string(),
            _ => PLACEHOLDER_IMAGE.to_string(),
        };
        self.image_state = CardImageState::Resolved(url);
        true
    }

    /// Records that the displayed image failed to load.
    pub fn on_image_error(&mut self) {
        debug!(product = %self.product.id(), "Image failed to load");
        self.image_failed = true;
    }

    /// Returns the image source to display.
    ///
    /// While resolving, the product image is shown optimistically.
    #[must_use]
    pub fn displayed_image(&self) -> &str {
        if self.image_failed {
            return PLACEHOLDER_IMAGE;
        }
        match &self.image_state {
            CardImageState::Resolved(url) => url,
            CardImageState::Resolving => self.product.image().unwrap_or(PLACEHOLDER_IMAGE),
            CardImageState::Placeholder => PLACEHOLDER_IMAGE,
        }
    }

    /// Returns the image alternative text.
    #[must_use]
    pub fn image_alt(&self) -> &str {
        if self.image_failed {
            IMAGE_UNAVAILABLE_ALT
        } else {
            self.product.name()
        }
    }

    /// Builds the accessible projection of the card.
    #[must_use]
    pub fn view(&self) -> CardView {
        let price = format_amount(self.product.price());
        CardView {
            role: CARD_ROLE,
            aria_label: format!("Product: {}", self.product.name()),
            name: self.product.name().to_string(),
            description: self
                .product
                .description()
                .unwrap_or(DESCRIPTION_FALLBACK)
                .to_string(),
            price_label: format!("Price: {price}"),
            price,
            image_src: self.displayed_image().to_string(),
            image_alt: self.image_alt().to_string(),
            category: self.product.category().map(str::to_string),
        }
    }
}

/// Renders a [`ProductCard`] as a bordered block.
pub struct ProductCardWidget<'a> {
    card: &'a ProductCard,
    selected: bool,
    show_category: bool,
}

impl<'a> ProductCardWidget<'a> {
    /// Creates a widget for `card`.
    #[must_use]
    pub const fn new(card: &'a ProductCard) -> Self {
        Self {
            card,
            selected: false,
            show_category: true,
        }
    }

    /// Highlights the card.
    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Toggles the category line.
    #[must_use]
    pub const fn show_category(mut self, show: bool) -> Self {
        self.show_category = show;
        self
    }
}

impl Widget for ProductCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let view = self.card.view();

        let border_style = if self.selected {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" {} ", view.aria_label));

        let mut price_line = vec![Span::styled(
            view.price.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )];
        if self.show_category
            && let Some(category) = &view.category
        {
            price_line.push(Span::raw("  "));
            price_line.push(Span::styled(
                category.clone(),
                Style::default().fg(Color::Magenta),
            ));
        }

        let mut image_line = vec![Span::styled(
            format!("[{}] {}", view.image_alt, view.image_src),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )];
        if self.card.image_state().is_resolving() {
            image_line.push(Span::styled(
                " (checking)",
                Style::default().fg(Color::Yellow),
            ));
        }

        let lines = vec![
            Line::from(price_line),
            Line::from(view.description),
            Line::from(image_line),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
