//! Product listing extraction from search result markup
//!
//! Pages are parsed with html5ever through `scraper`, so unclosed or
//! misnested tags are recovered the way a browser would and parsing never
//! fails. Each field of a card is resolved through an ordered list of
//! selector alternatives; the first alternative that matches wins.

use anyhow::{Result, anyhow};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::ProductResult;
use crate::traits::ScraperConfig;

/// Ordered selector alternatives for a single card field
#[derive(Debug, Clone)]
pub struct FieldRule {
    alternatives: Vec<Selector>,
}

impl FieldRule {
    /// Compile the alternatives in priority order
    pub fn new(name: &'static str, selectors: &[String]) -> Result<Self> {
        let alternatives = selectors
            .iter()
            .map(|s| {
                Selector::parse(s)
                    .map_err(|e| anyhow!("Failed to parse {name} selector '{s}': {e:?}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { alternatives })
    }

    /// First descendant of `card` matched by the earliest alternative
    pub fn resolve<'a>(&self, card: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.alternatives
            .iter()
            .find_map(|selector| card.select(selector).next())
    }
}

/// Pulls normalized product listings out of a search results page
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    base_url: String,
    max_results: usize,
    card: Selector,
    link: FieldRule,
    title: FieldRule,
    price: FieldRule,
}

impl ListingExtractor {
    /// Create an extractor for the configured site
    ///
    /// # Returns
    /// * `Result<Self>` - Fails only when a configured selector does not parse
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let selectors = &config.selectors;
        let card = Selector::parse(&selectors.product_card)
            .map_err(|e| anyhow!("Failed to parse product card selector: {e:?}"))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_results: config.max_results,
            card,
            link: FieldRule::new("link", &selectors.link)?,
            title: FieldRule::new("title", &selectors.title)?,
            price: FieldRule::new("price", &selectors.price)?,
        })
    }

    /// Extract up to `max_results` listings in document order.
    ///
    /// Missing or unrecognised structure yields fewer results, never an error.
    pub fn extract(&self, markup: &str) -> Vec<ProductResult> {
        let document = Html::parse_document(markup);

        let mut cards = 0;
        // Nested containers matching the card pattern are each read as a card.
        let products: Vec<ProductResult> = document
            .select(&self.card)
            .inspect(|_| cards += 1)
            .map(|card| self.read_card(card))
            .filter(|product| !product.title.is_empty() && !product.link.is_empty())
            .take(self.max_results)
            .collect();

        debug!(
            "Kept {} of {} product cards (cap {})",
            products.len(),
            cards,
            self.max_results
        );
        products
    }

    fn read_card(&self, card: ElementRef<'_>) -> ProductResult {
        let link = self
            .link
            .resolve(card)
            .and_then(|anchor| anchor.value().attr("href"))
            .map(|href| self.absolute_link(href))
            .unwrap_or_default();

        ProductResult {
            title: self.title.resolve(card).map(normalize_text).unwrap_or_default(),
            price: self.price.resolve(card).map(normalize_text).unwrap_or_default(),
            link,
        }
    }

    fn absolute_link(&self, href: &str) -> String {
        if href.starts_with('/') {
            format!("{}{href}", self.base_url)
        } else {
            href.to_string()
        }
    }
}

/// Inner text with surrounding whitespace trimmed.
///
/// html5ever decodes character references while tokenizing, so text nodes
/// already hold the single-decoded form; decoding again would turn text the
/// page escaped on purpose (`&amp;lt;`) into markup.
fn normalize_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ListingExtractor {
        ListingExtractor::new(&ScraperConfig::takealot()).unwrap()
    }

    fn card(title: &str, price: &str, href: &str) -> String {
        format!(
            r#"<div class="cell product-card search-product">
                <a class="product-card-module_link" href="{href}">
                    <span class="product-title">{title}</span>
                </a>
                <span class="currency plus currency-module_currency">{price}</span>
            </div>"#
        )
    }

    fn page(cards: &[String]) -> String {
        format!(
            "<html><body><div class=\"listings\">{}</div></body></html>",
            cards.concat()
        )
    }

    #[test]
    fn test_page_without_cards_is_empty() {
        let html = "<html><body><p>No results found</p></body></html>";
        assert!(extractor().extract(html).is_empty());
    }

    #[test]
    fn test_empty_and_garbage_markup_is_empty() {
        let extractor = extractor();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("<<<>>> not html at all &&&").is_empty());
    }

    #[test]
    fn test_extracts_title_price_and_absolute_link() {
        let html = page(&[card("Kettle 1.7L", "R 299", "/kettle-1-7l/PLID123")]);
        let products = extractor().extract(&html);

        assert_eq!(
            products,
            vec![ProductResult {
                title: "Kettle 1.7L".to_string(),
                price: "R 299".to_string(),
                link: "https://www.takealot.com/kettle-1-7l/PLID123".to_string(),
            }]
        );
    }

    #[test]
    fn test_absolute_link_passes_through() {
        let html = page(&[card("Toaster", "R 199", "https://shop.example.com/toaster")]);
        let products = extractor().extract(&html);
        assert_eq!(products[0].link, "https://shop.example.com/toaster");
    }

    #[test]
    fn test_title_entities_are_decoded() {
        let html = page(&[card("Samsung &amp; Co", "R 10", "/products/abc")]);
        let products = extractor().extract(&html);
        assert_eq!(products[0].title, "Samsung & Co");
    }

    #[test]
    fn test_entities_are_decoded_only_once() {
        let html = page(&[card("Salt &amp;amp; Pepper", "R&nbsp;20", "/products/abc")]);
        let products = extractor().extract(&html);
        assert_eq!(products[0].title, "Salt &amp; Pepper");
        assert_eq!(products[0].price, "R\u{a0}20");
    }

    #[test]
    fn test_escaped_markup_in_title_stays_escaped() {
        let html = page(&[card(
            "Use &amp;lt;br&amp;gt; tags &amp;amp; more",
            "R 1",
            "/products/abc",
        )]);
        let products = extractor().extract(&html);
        assert_eq!(products[0].title, "Use &lt;br&gt; tags &amp; more");
    }

    #[test]
    fn test_missing_price_is_kept_as_empty() {
        let html = r#"<div class="product-card">
                <a class="product-card-link" href="/products/abc"></a>
                <span class="title">Desk Lamp</span>
            </div>"#;
        let products = extractor().extract(html);

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Desk Lamp");
        assert_eq!(products[0].price, "");
    }

    #[test]
    fn test_card_without_title_and_link_is_dropped() {
        let html = page(&[
            r#"<div class="product-card"><span class="currency">R 5</span></div>"#.to_string(),
            card("Mug", "R 50", "/mug"),
        ]);
        let products = extractor().extract(&html);

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Mug");
    }

    #[test]
    fn test_card_with_title_but_no_link_is_dropped() {
        let html = r#"<div class="product-card"><span class="title">Orphan</span></div>"#;
        assert!(extractor().extract(html).is_empty());
    }

    #[test]
    fn test_caps_at_five_in_document_order() {
        let cards: Vec<String> = (1..=8)
            .map(|i| card(&format!("Item {i}"), "R 1", &format!("/item/{i}")))
            .collect();
        let products = extractor().extract(&page(&cards));

        let titles: Vec<&str> = products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Item 1", "Item 2", "Item 3", "Item 4", "Item 5"]);
    }

    #[test]
    fn test_title_falls_back_to_product_title_div() {
        let html = r#"<div class="product-card">
                <a class="product-card-link" href="/p/1"></a>
                <div class="product-title-module"><span> Blender </span></div>
            </div>"#;
        let products = extractor().extract(html);
        assert_eq!(products[0].title, "Blender");
    }

    #[test]
    fn test_title_span_preferred_over_fallback() {
        let html = r#"<div class="product-card">
                <a class="product-card-link" href="/p/1"></a>
                <div class="product-title"><span>Fallback</span></div>
                <span class="title">Primary</span>
            </div>"#;
        let products = extractor().extract(html);
        assert_eq!(products[0].title, "Primary");
    }

    #[test]
    fn test_price_falls_back_to_amount_inside_price() {
        let html = r#"<div class="product-card">
                <a class="product-card-link" href="/p/1"></a>
                <span class="title">Fan</span>
                <span class="price"><span class="amount">R 450</span></span>
            </div>"#;
        let products = extractor().extract(html);
        assert_eq!(products[0].price, "R 450");
    }

    #[test]
    fn test_fields_resolve_independently() {
        let html = r#"<div class="product-card">
                <span class="title">No Link Here</span>
                <span class="currency">R 9</span>
            </div>
            <div class="product-card">
                <a class="product-card-link" href="/p/2"></a>
                <div class="product-title"><span>Second</span></div>
            </div>"#;
        let products = extractor().extract(html);

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Second");
        assert_eq!(products[0].price, "");
        assert_eq!(products[0].link, "https://www.takealot.com/p/2");
    }

    #[test]
    fn test_malformed_markup_is_recovered() {
        let html = r#"<html><body>
            <div class="product-card"><a class="product-card-link" href="/p/1">
                <span class="title">Unclosed Card
            <div class="product-card"><a class="product-card-link" href="/p/2"></a>
                <span class="title">Second Card</span><span class="currency">R 2
        "#;
        let products = extractor().extract(html);

        assert!(!products.is_empty());
        assert!(products.iter().any(|p| p.link == "https://www.takealot.com/p/1"));
        assert!(products.iter().all(|p| !p.title.is_empty()));
    }

    #[test]
    fn test_card_class_matches_as_substring() {
        let html = r#"<li class="grid-item product-card-wrapper">
                <a class="product-card-anchor" href="/p/9"><span class="title">Headphones</span></a>
            </li>"#;
        let products = extractor().extract(html);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Headphones");
    }

    #[test]
    fn test_nested_card_containers_are_read_separately() {
        // Inner containers whose class also contains "product-card" are cards
        // in their own right, so the same listing is reported twice.
        let html = r#"<div class="product-card">
                <div class="product-card-body">
                    <a class="product-card-link" href="/p/1"></a>
                    <span class="title">One</span>
                </div>
            </div>"#;
        let products = extractor().extract(html);

        assert_eq!(products.len(), 2);
        assert_eq!(products[0], products[1]);
        assert_eq!(products[0].title, "One");
    }

    #[test]
    fn test_invalid_selector_fails_construction() {
        let mut config = ScraperConfig::takealot();
        config.selectors.title = vec!["span[".to_string()];
        assert!(ListingExtractor::new(&config).is_err());
    }

    #[test]
    fn test_field_rule_tries_alternatives_in_order() {
        let rule = FieldRule::new(
            "price",
            &["span.sale".to_string(), "span.currency".to_string()],
        )
        .unwrap();
        let html = Html::parse_fragment(
            r#"<div><span class="currency">R 80</span><span class="sale">R 60</span></div>"#,
        );
        let root = html.root_element();

        let found = rule.resolve(root).unwrap();
        assert_eq!(found.text().collect::<String>(), "R 60");
    }
}
