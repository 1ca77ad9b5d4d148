//! HTML templates and styling for the notes gallery.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constant and theme
//! - `components` - Escaping, markdown, nav bar, base template, error page
//! - `gallery` - Notes page with search, tag selector, and card grid
//! - `article` - Per-article detail page

mod article;
mod components;
mod gallery;
mod styles;

pub use article::render_article;
pub use components::{base_html, error_page, html_escape, nav_bar, render_markdown};
pub use gallery::{gallery_href, render_card, render_gallery, GalleryBody, MAX_CARD_TAGS};
pub use styles::STYLE;
