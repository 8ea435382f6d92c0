/// Core functionality modules
///
/// Column conventions, form validation and the catalog facade that sits
/// between request handling and the store.

pub mod catalog;
pub mod codec;
pub mod recipe_form;

pub use catalog::RecipeCatalog;
pub use recipe_form::{RecipeForm, DEFAULT_AUTHOR_ID};
