//! CSR entry point. Trunk builds this binary for `wasm32-unknown-unknown`
//! with the `csr` feature; without the feature (native test builds) it is
//! an empty program.

fn main() {
    #[cfg(feature = "csr")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Debug);
        leptos::mount::mount_to_body(rollcall_client::app::App);
    }
}
