use crate::domain::model::{FragmentKind, Menu, MenuFragment, MenuItem};
use crate::domain::ports::FragmentClassifier;
use crate::extract::catalog::selector;
use crate::utils::error::Result;
use scraper::Html;

/// Collects every element matching `fragment_selector` in document order,
/// nested matches included, with its inline style and trimmed text.
pub fn collect_fragments(html: &str, fragment_selector: &str) -> Result<Vec<MenuFragment>> {
    let selector = selector(fragment_selector)?;
    let document = Html::parse_document(html);

    Ok(document
        .select(&selector)
        .map(|element| {
            MenuFragment::new(
                element.value().attr("style").unwrap_or_default(),
                element.text().collect::<String>().trim(),
            )
        })
        .collect())
}

/// 依 inline style 中的 `font-family:<token>` 判斷片段種類
#[derive(Debug, Clone)]
pub struct StyleTokenClassifier {
    heading_marker: String,
    body_marker: String,
}

impl StyleTokenClassifier {
    pub fn new(heading_token: &str, body_token: &str) -> Self {
        Self {
            heading_marker: format!("font-family:{}", heading_token),
            body_marker: format!("font-family:{}", body_token),
        }
    }
}

impl FragmentClassifier for StyleTokenClassifier {
    fn classify(&self, fragment: &MenuFragment) -> FragmentKind {
        if fragment.style.contains(&self.heading_marker) {
            FragmentKind::Heading
        } else if fragment.style.contains(&self.body_marker) {
            FragmentKind::Body
        } else {
            FragmentKind::Ignored
        }
    }
}

/// Two-state grouping of classified fragments: no current category until the
/// first named heading, then every body line targets the latest category.
#[derive(Debug)]
pub struct MenuBuilder<'a> {
    menu: Menu,
    current: Option<usize>,
    currency_marker: &'a str,
    dropped_prices: usize,
}

impl<'a> MenuBuilder<'a> {
    pub fn new(currency_marker: &'a str) -> Self {
        Self {
            menu: Menu::new(),
            current: None,
            currency_marker,
            dropped_prices: 0,
        }
    }

    pub fn push(&mut self, kind: FragmentKind, text: &str) {
        match kind {
            FragmentKind::Heading => {
                let index = self.menu.start_category(text);
                // 空白標題仍會登記，但不能掛上品項
                self.current = (!text.is_empty()).then_some(index);
            }
            FragmentKind::Body => {
                let Some(category) = self.current.and_then(|i| self.menu.category_mut(i)) else {
                    return;
                };
                if text.contains(self.currency_marker) {
                    match category.items.last_mut() {
                        Some(item) => item.price = text.to_string(),
                        None => {
                            tracing::debug!(
                                "Dropping price '{}' before any item in '{}'",
                                text,
                                category.name
                            );
                            self.dropped_prices += 1;
                        }
                    }
                } else {
                    category.items.push(MenuItem {
                        name: text.to_string(),
                        price: String::new(),
                    });
                }
            }
            FragmentKind::Ignored => {}
        }
    }

    pub fn dropped_prices(&self) -> usize {
        self.dropped_prices
    }

    pub fn finish(self) -> Menu {
        self.menu
    }
}

pub fn build_menu(
    fragments: &[MenuFragment],
    classifier: &dyn FragmentClassifier,
    currency_marker: &str,
) -> Menu {
    let mut builder = MenuBuilder::new(currency_marker);
    for fragment in fragments {
        builder.push(classifier.classify(fragment), &fragment.text);
    }
    if builder.dropped_prices() > 0 {
        tracing::warn!(
            "⚠️ {} price line(s) had no item to attach to",
            builder.dropped_prices()
        );
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADING: &str = "font-family:trend-sans-w00-four,sans-serif;font-size:22px;";
    const BODY: &str = "font-family:cinzel,serif;";

    fn classifier() -> StyleTokenClassifier {
        StyleTokenClassifier::new("trend-sans-w00-four", "cinzel")
    }

    fn heading(text: &str) -> MenuFragment {
        MenuFragment::new(HEADING, text)
    }

    fn body(text: &str) -> MenuFragment {
        MenuFragment::new(BODY, text)
    }

    fn item(name: &str, price: &str) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            price: price.to_string(),
        }
    }

    #[test]
    fn test_classifier_checks_heading_before_body() {
        let c = classifier();
        assert_eq!(c.classify(&heading("Starters")), FragmentKind::Heading);
        assert_eq!(c.classify(&body("Soup")), FragmentKind::Body);
        assert_eq!(
            c.classify(&MenuFragment::new(format!("{}{}", BODY, HEADING), "x")),
            FragmentKind::Heading
        );
        assert_eq!(
            c.classify(&MenuFragment::new("font-family:arial;", "x")),
            FragmentKind::Ignored
        );
        assert_eq!(c.classify(&MenuFragment::new("", "x")), FragmentKind::Ignored);
    }

    #[test]
    fn test_starters_scenario() {
        let fragments = vec![heading("Starters"), body("Soup"), body("₹120"), body("Salad")];

        let menu = build_menu(&fragments, &classifier(), "₹");

        assert_eq!(menu.len(), 1);
        assert_eq!(
            menu.get("Starters").unwrap().items,
            vec![item("Soup", "₹120"), item("Salad", "")]
        );
    }

    #[test]
    fn test_orphan_price_is_dropped() {
        let fragments = vec![
            heading("Drinks"),
            body("₹50"),
            body("Tea"),
            body("₹30"),
            body("₹35"),
        ];

        let menu = build_menu(&fragments, &classifier(), "₹");
        let drinks = menu.get("Drinks").unwrap();

        assert_eq!(drinks.items, vec![item("Tea", "₹35")]);
        let priced = drinks.items.iter().filter(|i| !i.price.is_empty()).count();
        assert!(priced <= drinks.items.len());
    }

    #[test]
    fn test_price_never_crosses_into_new_category() {
        let fragments = vec![
            heading("Starters"),
            body("Soup"),
            heading("Mains"),
            body("₹300"),
            body("Thali"),
        ];

        let menu = build_menu(&fragments, &classifier(), "₹");

        assert_eq!(menu.get("Starters").unwrap().items, vec![item("Soup", "")]);
        assert_eq!(menu.get("Mains").unwrap().items, vec![item("Thali", "")]);
    }

    #[test]
    fn test_only_ignored_fragments_yield_empty_menu() {
        let fragments = vec![
            MenuFragment::new("font-family:arial;", "Welcome"),
            MenuFragment::new("color:red;", "₹100"),
            MenuFragment::new("", "Open daily"),
        ];
        assert!(build_menu(&fragments, &classifier(), "₹").is_empty());
    }

    #[test]
    fn test_body_before_first_heading_is_ignored() {
        let fragments = vec![body("Orphan item"), body("₹10"), heading("Desserts"), body("Cake")];

        let menu = build_menu(&fragments, &classifier(), "₹");

        assert_eq!(menu.len(), 1);
        assert_eq!(menu.get("Desserts").unwrap().items, vec![item("Cake", "")]);
    }

    #[test]
    fn test_empty_heading_registers_but_accepts_nothing() {
        let fragments = vec![heading("Snacks"), body("Chips"), heading(""), body("Lost")];

        let menu = build_menu(&fragments, &classifier(), "₹");

        assert_eq!(menu.len(), 2);
        assert!(menu.get("").unwrap().items.is_empty());
        assert_eq!(menu.get("Snacks").unwrap().items, vec![item("Chips", "")]);
    }

    #[test]
    fn test_collect_fragments_reads_style_and_trimmed_text() {
        let html = format!(
            r#"<div>
                <p><span class="wixui-rich-text__text" style="{HEADING}">  Starters </span></p>
                <p><span class="wixui-rich-text__text" style="{BODY}">Soup</span></p>
                <p><span class="other">Not a fragment</span></p>
                <p><span class="wixui-rich-text__text">No style</span></p>
            </div>"#
        );

        let fragments = collect_fragments(&html, "span.wixui-rich-text__text").unwrap();

        assert_eq!(
            fragments,
            vec![
                MenuFragment::new(HEADING, "Starters"),
                MenuFragment::new(BODY, "Soup"),
                MenuFragment::new("", "No style"),
            ]
        );
    }

    #[test]
    fn test_custom_classifier_plugs_into_builder() {
        struct UppercaseHeadings;
        impl FragmentClassifier for UppercaseHeadings {
            fn classify(&self, fragment: &MenuFragment) -> FragmentKind {
                let text = &fragment.text;
                if text.chars().any(char::is_alphabetic) && !text.chars().any(char::is_lowercase) {
                    FragmentKind::Heading
                } else {
                    FragmentKind::Body
                }
            }
        }

        let fragments = vec![
            MenuFragment::new("", "BREAKFAST"),
            MenuFragment::new("", "Pancakes"),
            MenuFragment::new("", "$8"),
        ];
        let menu = build_menu(&fragments, &UppercaseHeadings, "$");

        assert_eq!(
            menu.get("BREAKFAST").unwrap().items,
            vec![item("Pancakes", "$8")]
        );
    }
}
