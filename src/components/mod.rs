//! UI components: the animated background and the page behaviors around it.

pub mod background;
pub mod page;
