//! Product creation form model.
//!
//! Holds the transient state of the creation page: the plain text fields,
//! the composite category field (free text + autocomplete dropdown + inline
//! create-new-category action), and per-field validation errors. All state
//! lives for the page lifetime only; nothing here is persisted.
//!
//! The category field works on three rules:
//! - typing always clears the selection — `selected_category_id` is set only
//!   by picking a suggestion or by successfully creating a category;
//! - suggestions are the loaded categories whose name contains the typed
//!   text, case-insensitive;
//! - creating a category is refused client-side when a case-insensitive
//!   equal name already exists in the loaded list. This is the system's only
//!   duplicate guard and it is race-prone under concurrent sessions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::client::{CatalogApi, ProductDraft};
use crate::models::{Category, Product};

/// Unsigned decimal: digits with at most one decimal point. Keystrokes that
/// would break this shape are silently ignored.
static PRICE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d*\.?\d*$").unwrap());

/// Per-field validation messages, shown together under their fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
    }
}

/// Result of the inline create-new-category action.
#[derive(Debug, Clone, PartialEq)]
pub enum AddCategoryOutcome {
    /// Created, appended to the local list, and selected.
    Added(Category),
    /// Nothing typed; nothing sent.
    EmptyInput,
    /// A case-insensitive equal name already exists locally; nothing sent.
    Duplicate,
    /// The endpoint call failed; form state unchanged.
    Failed(String),
}

/// Result of submitting the form.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Product created; all fields cleared. The caller navigates to the
    /// listing view.
    Saved(Product),
    /// Validation failed; field errors are set and nothing was sent.
    Invalid,
    /// The endpoint call failed; form state left untouched for retry.
    Failed(String),
}

/// State of the product creation form.
#[derive(Debug, Default)]
pub struct ProductForm {
    name: String,
    description: String,
    price: String,
    categories: Vec<Category>,
    category_input: String,
    selected_category_id: Option<i64>,
    dropdown_open: bool,
    errors: FormErrors,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the category list once, on page load. A failed fetch leaves
    /// the list empty rather than surfacing an error.
    pub async fn load_categories(&mut self, api: &dyn CatalogApi) {
        self.categories = api.list_categories().await.unwrap_or_default();
    }

    /// Seeds the loaded category list directly. Used by tests.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn category_input(&self) -> &str {
        &self.category_input
    }

    pub fn selected_category_id(&self) -> Option<i64> {
        self.selected_category_id
    }

    pub fn dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn set_name(&mut self, text: impl Into<String>) {
        self.name = text.into();
        self.errors.name = None;
    }

    pub fn set_description(&mut self, text: impl Into<String>) {
        self.description = text.into();
        self.errors.description = None;
    }

    /// Applies a price edit. The new text is accepted only when it is empty
    /// or matches the unsigned-decimal pattern; otherwise the edit is
    /// silently ignored and `false` is returned.
    pub fn set_price(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if !text.is_empty() && !PRICE_PATTERN.is_match(&text) {
            return false;
        }
        self.price = text;
        self.errors.price = None;
        true
    }

    /// Applies a keystroke to the category field. Typing always resets the
    /// selection and opens the suggestion dropdown.
    pub fn set_category_input(&mut self, text: impl Into<String>) {
        self.category_input = text.into();
        self.selected_category_id = None;
        self.errors.category = None;
        self.dropdown_open = true;
    }

    /// Loaded categories whose name contains the typed text,
    /// case-insensitive.
    pub fn suggestions(&self) -> Vec<&Category> {
        let input = self.category_input.to_lowercase();
        self.categories
            .iter()
            .filter(|cat| cat.name.to_lowercase().contains(&input))
            .collect()
    }

    /// Picks a suggestion: the input snaps to the category's exact name and
    /// the dropdown closes.
    pub fn select_category(&mut self, category: &Category) {
        self.category_input = category.name.clone();
        self.selected_category_id = Some(category.id);
        self.errors.category = None;
        self.dropdown_open = false;
    }

    /// Closes the dropdown (outside click).
    pub fn dismiss_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    /// The create-new-category action. Refuses empty input and locally
    /// duplicate names without any network call; on success the new
    /// category is appended to the local list and selected.
    pub async fn add_category(&mut self, api: &dyn CatalogApi) -> AddCategoryOutcome {
        let trimmed = self.category_input.trim().to_string();
        if trimmed.is_empty() {
            return AddCategoryOutcome::EmptyInput;
        }
        if self
            .categories
            .iter()
            .any(|cat| cat.name.eq_ignore_ascii_case(&trimmed))
        {
            return AddCategoryOutcome::Duplicate;
        }

        match api.create_category(&trimmed).await {
            Ok(category) => {
                self.categories.push(category.clone());
                self.selected_category_id = Some(category.id);
                self.category_input = category.name.clone();
                self.errors.category = None;
                self.dropdown_open = false;
                AddCategoryOutcome::Added(category)
            }
            Err(e) => AddCategoryOutcome::Failed(e.to_string()),
        }
    }

    /// Runs full-form validation, collecting every applicable message at
    /// once rather than stopping at the first failure. Returns `true` when
    /// the form is submittable.
    ///
    /// A non-empty typed category text is NOT sufficient — a category must
    /// actually be selected.
    pub fn validate(&mut self) -> bool {
        let mut errors = FormErrors::default();

        if self.name.trim().is_empty() {
            errors.name = Some("product name is required".to_string());
        } else if self.name.chars().count() < 3 {
            errors.name = Some("product name must be at least 3 characters".to_string());
        }

        if self.description.trim().is_empty() {
            errors.description = Some("product description is required".to_string());
        } else if self.description.chars().count() < 10 {
            errors.description =
                Some("product description must be at least 10 characters".to_string());
        }

        if self.price.is_empty() {
            errors.price = Some("price is required".to_string());
        } else {
            match self.price.parse::<f64>() {
                Ok(p) if p > 0.0 => {}
                _ => errors.price = Some("price must be greater than 0".to_string()),
            }
        }

        if self.selected_category_id.is_none() {
            errors.category = Some("select or add a product category".to_string());
        }

        let ok = errors.is_empty();
        self.errors = errors;
        ok
    }

    /// Submits the form. Validation failures block the request entirely; an
    /// endpoint failure leaves every field untouched so the user can retry.
    /// On success all fields are cleared.
    pub async fn submit(&mut self, api: &dyn CatalogApi) -> SubmitOutcome {
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }

        // validate() guarantees the price parses.
        let price: f64 = match self.price.parse() {
            Ok(p) => p,
            Err(_) => return SubmitOutcome::Invalid,
        };

        let draft = ProductDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            price,
            category_id: self.selected_category_id,
        };

        match api.create_product(&draft).await {
            Ok(product) => {
                self.name.clear();
                self.description.clear();
                self.price.clear();
                self.category_input.clear();
                self.selected_category_id = None;
                self.dropdown_open = false;
                self.errors = FormErrors::default();
                SubmitOutcome::Saved(product)
            }
            Err(e) => SubmitOutcome::Failed(e.to_string()),
        }
    }
}

/// CLI entry point — drives the form against a running server: types each
/// field, resolves the category (selecting an existing one case-insensitively
/// or creating it inline), and submits.
pub async fn run_add(
    base_url: &str,
    name: &str,
    description: &str,
    price: &str,
    category: &str,
) -> anyhow::Result<()> {
    let api = crate::client::HttpApi::new(base_url);
    let mut form = ProductForm::new();
    form.load_categories(&api).await;

    form.set_name(name);
    form.set_description(description);
    if !form.set_price(price) {
        anyhow::bail!("price may contain only digits and at most one decimal point");
    }

    form.set_category_input(category);
    let trimmed = category.trim();
    let existing = form
        .suggestions()
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(trimmed))
        .cloned();
    match existing {
        Some(cat) => form.select_category(&cat),
        None => match form.add_category(&api).await {
            AddCategoryOutcome::Added(cat) => {
                println!("Created category #{}: {}", cat.id, cat.name);
            }
            AddCategoryOutcome::EmptyInput | AddCategoryOutcome::Duplicate => {}
            AddCategoryOutcome::Failed(msg) => {
                eprintln!("warning: could not add category: {}", msg);
            }
        },
    }

    match form.submit(&api).await {
        SubmitOutcome::Saved(product) => {
            println!("Created product #{}: {}", product.id, product.name);
            Ok(())
        }
        SubmitOutcome::Invalid => {
            let errors = form.errors();
            for message in [
                errors.name.as_deref(),
                errors.description.as_deref(),
                errors.price.as_deref(),
                errors.category.as_deref(),
            ]
            .into_iter()
            .flatten()
            {
                eprintln!("error: {}", message);
            }
            anyhow::bail!("product was not created");
        }
        SubmitOutcome::Failed(msg) => anyhow::bail!("could not create product: {}", msg),
    }
}
