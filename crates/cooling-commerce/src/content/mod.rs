//! Content page filters: FAQ search and the installation gallery.

mod faq;
mod gallery;

pub use faq::{FaqItem, FaqQuery};
pub use gallery::{GalleryFilter, GalleryItem, GalleryView, GALLERY_PAGE_SIZE};
