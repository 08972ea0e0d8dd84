pub mod check;
pub mod lang_resolver;
pub mod langs;
pub mod render;
pub mod source_loader;
pub mod tree;

#[cfg(test)]
mod lang_resolver_tests;
#[cfg(test)]
mod render_tests;
