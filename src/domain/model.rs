use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 星等，依 one..five 排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Rating {
    pub const ALL: [Rating; 5] = [
        Rating::One,
        Rating::Two,
        Rating::Three,
        Rating::Four,
        Rating::Five,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::One => "one",
            Rating::Two => "two",
            Rating::Three => "three",
            Rating::Four => "four",
            Rating::Five => "five",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "one" => Ok(Rating::One),
            "two" => Ok(Rating::Two),
            "three" => Ok(Rating::Three),
            "four" => Ok(Rating::Four),
            "five" => Ok(Rating::Five),
            other => Err(format!("unknown rating word: {:?}", other)),
        }
    }
}

/// 書目列表中的一筆資料，價格保留原始含幣別文字
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub title: String,
    pub price: String,
    pub availability: String,
    pub rating: Option<Rating>,
}

/// 單一列表頁的解析結果；`next` 為尚未解析的相對連結
#[derive(Debug, Clone, Default)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuFragment {
    pub style: String,
    pub text: String,
}

impl MenuFragment {
    pub fn new(style: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Heading,
    Body,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub name: String,
    pub items: Vec<MenuItem>,
}

/// 依首次出現順序排列的分類表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Menu {
    categories: Vec<MenuCategory>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` with an empty item list and returns its index. An
    /// existing category keeps its position but loses its items.
    pub fn start_category(&mut self, name: &str) -> usize {
        if let Some(index) = self.position(name) {
            self.categories[index].items.clear();
            return index;
        }
        self.categories.push(MenuCategory {
            name: name.to_string(),
            items: Vec::new(),
        });
        self.categories.len() - 1
    }

    pub fn category_mut(&mut self, index: usize) -> Option<&mut MenuCategory> {
        self.categories.get_mut(index)
    }

    pub fn get(&self, name: &str) -> Option<&MenuCategory> {
        self.position(name).map(|i| &self.categories[i])
    }

    pub fn categories(&self) -> &[MenuCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.name == name)
    }
}

/// 序列化後待寫出的檔案
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub record_count: usize,
    pub outputs: Vec<OutputFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_parse_and_order() {
        assert_eq!("Three".parse::<Rating>().unwrap(), Rating::Three);
        assert_eq!(" five ".parse::<Rating>().unwrap(), Rating::Five);
        assert!("zero".parse::<Rating>().is_err());
        assert!(Rating::One < Rating::Five);
        assert_eq!(Rating::Four.to_string(), "four");
    }

    #[test]
    fn test_repeated_category_resets_items_in_place() {
        let mut menu = Menu::new();
        let starters = menu.start_category("Starters");
        menu.category_mut(starters).unwrap().items.push(MenuItem {
            name: "Soup".to_string(),
            price: String::new(),
        });
        menu.start_category("Mains");

        let again = menu.start_category("Starters");
        assert_eq!(again, 0);
        assert!(menu.get("Starters").unwrap().items.is_empty());
        assert_eq!(menu.categories()[1].name, "Mains");
    }

    #[test]
    fn test_menu_serializes_as_ordered_list() {
        let mut menu = Menu::new();
        menu.start_category("Drinks");
        let json = serde_json::to_value(&menu).unwrap();
        assert_eq!(json, serde_json::json!([{"name": "Drinks", "items": []}]));
    }
}
