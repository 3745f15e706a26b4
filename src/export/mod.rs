//! Exported images and the references handed to the image-generated callback.

pub mod file;
pub mod url;

pub use file::{DEFAULT_FILENAME_TEMPLATE, expand_tilde, generate_filename, save_image};
pub use url::{ObjectUrl, ObjectUrls};

use std::rc::Rc;

pub const PNG_MIME: &str = "image/png";

/// A named, typed image blob.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub name: String,
    pub mime: &'static str,
    pub bytes: Rc<[u8]>,
}

/// Callback receiving every successfully saved image.
pub type ImageGenerated = Box<dyn FnMut(&ImageFile, &ObjectUrl)>;
