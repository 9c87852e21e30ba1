#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod perf;
#[cfg(target_arch = "wasm32")]
mod picking;
#[cfg(target_arch = "wasm32")]
mod state;

#[cfg(not(target_arch = "wasm32"))]
mod headless;

#[cfg(target_arch = "wasm32")]
pub fn main() {
    use app::App;
    use efield_viz::FieldConfig;
    use leptos::prelude::*;
    use leptos::{logging, mount};

    console_error_panic_hook::set_once();
    let config = FieldConfig::default();
    if let Err(e) = config.validate() {
        logging::error!("invalid field configuration: {e}");
        return;
    }
    logging::log!("csr mode - mounting to body");
    mount::mount_to_body(move || view! { <App config=config/> });
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), efield_viz::ConfigError> {
    headless::run()
}
