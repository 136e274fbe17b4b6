pub mod annotate;
pub mod layout;
pub mod mosaic;
pub mod overlay;
#[cfg(feature = "pdf")]
pub mod pdf;
