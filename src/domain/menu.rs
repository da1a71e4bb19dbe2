use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rating shown for items that never had one set.
pub const DEFAULT_RATING: f32 = 4.5;

/// Upper bound of the rating display scale.
pub const MAX_RATING: f32 = 5.0;

/// A purchasable menu item.
///
/// Owned by the catalog and only changed through the admin catalog editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u64,
    pub name: String,
    pub category: Category,
    pub price: u32,
    #[serde(default = "default_rating")]
    pub rating: f32,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

fn default_rating() -> f32 {
    DEFAULT_RATING
}

impl MenuItem {
    /// First image, used as the card thumbnail.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// A display-only customer review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub user: String,
    pub comment: String,
}

impl Review {
    pub fn new(user: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            comment: comment.into(),
        }
    }
}

/// Menu category. Stored as its lowercase label so new categories need no migration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Veg,
    NonVeg,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Veg => "veg",
            Category::NonVeg => "non-veg",
            Category::Other(label) => label,
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "veg" => Category::Veg,
            "non-veg" | "nonveg" | "non_veg" => Category::NonVeg,
            other => Category::Other(other.to_string()),
        }
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::from(label.to_string())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category filter used by the menu grid; `"all"` disables filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, item: &MenuItem) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &item.category == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(Category::from(s)))
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

/// Input of the admin catalog editor, as captured from the product form.
///
/// `price` is signed so a negative form value can be rejected instead of wrapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemDraft {
    pub name: String,
    pub category: Category,
    pub price: i64,
    pub rating: f32,
    pub desc: String,
    pub images: Vec<String>,
    pub reviews: Vec<Review>,
}

impl MenuItemDraft {
    pub fn new(name: impl Into<String>, category: impl Into<Category>, price: i64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price,
            rating: DEFAULT_RATING,
            desc: String::new(),
            images: Vec::new(),
            reviews: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.images.push(image.into());
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_review(mut self, review: Review) -> Self {
        self.reviews.push(review);
        self
    }

    /// Validates the draft and builds the stored item under `id`.
    ///
    /// # Errors
    /// - negative or out-of-range price
    /// - non-finite rating
    /// - empty image list
    pub fn into_item(self, id: u64) -> Result<MenuItem, String> {
        let price = u32::try_from(self.price)
            .map_err(|_| format!("price must be a non-negative integer, got {}", self.price))?;
        if !self.rating.is_finite() {
            return Err(format!("rating must be a number, got {}", self.rating));
        }
        if self.images.is_empty() {
            return Err("at least one image is required".to_string());
        }

        Ok(MenuItem {
            id,
            name: self.name.trim().to_string(),
            category: self.category,
            price,
            rating: self.rating.clamp(0.0, MAX_RATING),
            desc: self.desc,
            images: self.images,
            reviews: self.reviews,
        })
    }
}
