#![allow(clippy::unwrap_used)]

mod tests_editorconfig;
mod tests_workspace_loader;
