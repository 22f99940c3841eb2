//! Network clients used by the page controller.

pub(crate) mod contact;
