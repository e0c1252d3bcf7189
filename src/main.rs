//! FlyForms Dashboard Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod debounce;
mod editor;
mod listing;
mod models;
mod session;
mod store;

use app::App;
use leptos::prelude::*;

fn log_level(debug_build: bool) -> log::Level {
    if debug_build {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log_level(cfg!(debug_assertions))));
    mount_to_body(App);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_by_build() {
        assert_eq!(log_level(true), log::Level::Debug);
        assert_eq!(log_level(false), log::Level::Info);
    }
}
