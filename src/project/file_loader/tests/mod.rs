#![allow(clippy::unwrap_used)]

mod tests_file_loader;
