//! Core, DOM-free behavior for the page controller.
pub mod address;
pub mod contact;
pub mod dom;
pub mod footer;
pub mod skills;
pub mod theme;
pub mod video;

#[cfg(test)]
pub(crate) mod testing;
