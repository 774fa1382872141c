//! Browser entry points.
//!
//! The exported functions keep the names the page templates call from inline handlers,
//! and [`expose_globals`] binds them on `window` where those handlers look them up.

mod console;
mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::DocumentReadyState;

use crate::dom::Document;
use crate::error::{Error, Result};
use crate::format::format_duration;
use crate::page::Page;
use crate::platform::Platform;
use crate::schedule::ScheduleForm;
use crate::settings::Settings;
use crate::timer::BrowserTimer;
use crate::transport::ReqwestClient;
use crate::validation::{self, LoginForm, SignupForm, ValidationError};

pub use console::{ConsoleMakeWriter, ConsoleWriter};
pub use dom::{WebBrowser, WebDocument, WebElement};

use dom::js_error;

/// Names bound on `window` by [`expose_globals`].
pub const GLOBALS: &[&str] = &[
    "adicionarHorario",
    "deletarHorario",
    "ativarHorario",
    "validarLogin",
    "validarCadastro",
    "confirmarLogout",
    "formatarDuracao",
    "unmount",
];

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let settings = Settings::new().map_err(|e| JsValue::from_str(&e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let app_name = env!("CARGO_PKG_NAME").replace('-', "_");
            let level = settings.logger.level.as_str();

            format!("{app_name}={level}").into()
        }))
        .without_time()
        .with_writer(ConsoleMakeWriter)
        .init();

    expose_globals()?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == DocumentReadyState::Loading {
        let on_ready = Closure::once_into_js(move || mount(settings));
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        mount(settings);
    }

    Ok(())
}

/// Bind the exported functions as properties of `window`.
pub fn expose_globals() -> std::result::Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let globals = [
        (GLOBALS[0], Closure::<dyn Fn()>::new(add_schedule).into_js_value()),
        (GLOBALS[1], Closure::<dyn Fn(i32)>::new(delete_schedule).into_js_value()),
        (GLOBALS[2], Closure::<dyn Fn(i32, bool)>::new(set_schedule_active).into_js_value()),
        (GLOBALS[3], Closure::<dyn Fn() -> bool>::new(validate_login).into_js_value()),
        (GLOBALS[4], Closure::<dyn Fn() -> bool>::new(validate_signup).into_js_value()),
        (GLOBALS[5], Closure::<dyn Fn() -> bool>::new(confirm_logout).into_js_value()),
        (GLOBALS[6], Closure::<dyn Fn(u32) -> String>::new(format_duration_js).into_js_value()),
        (GLOBALS[7], Closure::<dyn Fn()>::new(unmount).into_js_value()),
    ];

    for (name, function) in globals {
        js_sys::Reflect::set(&window, &JsValue::from_str(name), &function)?;
    }

    Ok(())
}

fn mount(settings: Settings) {
    let mounted = platform(&settings).and_then(|platform| {
        Page::mount(platform, &settings, |task| wasm_bindgen_futures::spawn_local(task))
    });

    match mounted {
        Ok(page) => {
            let previous = PAGE.with(|slot| slot.borrow_mut().replace(page));
            drop(previous);
        }
        Err(e) => tracing::error!("Failed to mount page: {}", e),
    }
}

fn platform(settings: &Settings) -> Result<Platform> {
    let window = web_sys::window().ok_or_else(|| Error::Browser("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| Error::Browser("no document".into()))?;

    let base_url = match &settings.api.base_url {
        Some(base_url) => base_url.clone(),
        None => window.location().origin().map_err(js_error)?,
    };

    Ok(Platform::new(
        Rc::new(WebDocument::new(document)),
        Rc::new(WebBrowser::new(window)),
        Rc::new(ReqwestClient::new(base_url)),
        Rc::new(BrowserTimer),
    ))
}

fn with_page<T>(f: impl FnOnce(&Page) -> T) -> Option<T> {
    let result = PAGE.with(|slot| slot.borrow().as_ref().map(f));
    if result.is_none() {
        tracing::error!("Page is not mounted");
    }
    result
}

/// Read and check a form. A form that cannot be read is never submitted.
fn gate_submit<F>(form: &str, check: F) -> bool
where
    F: FnOnce(&dyn Document) -> Result<std::result::Result<(), ValidationError>>,
{
    with_page(|page| {
        let platform = page.platform();
        match check(platform.document.as_ref()) {
            Ok(checked) => validation::allow_submit(platform.browser.as_ref(), checked),
            Err(e) => {
                tracing::error!("Failed to read {} form: {}", form, e);
                false
            }
        }
    })
    .unwrap_or(false)
}

/// Dispose the mounted page.
#[wasm_bindgen]
pub fn unmount() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    drop(page);
}

#[wasm_bindgen(js_name = adicionarHorario)]
pub fn add_schedule() {
    let action = with_page(|page| {
        ScheduleForm::read(page.platform().document.as_ref()).map(|form| (form, page.schedules()))
    });

    match action {
        Some(Ok((form, client))) => wasm_bindgen_futures::spawn_local(async move {
            client.add(&form).await;
        }),
        Some(Err(e)) => tracing::error!("Failed to read schedule form: {}", e),
        None => {}
    }
}

#[wasm_bindgen(js_name = deletarHorario)]
pub fn delete_schedule(id: i32) {
    if let Some(client) = with_page(Page::schedules) {
        wasm_bindgen_futures::spawn_local(async move {
            client.delete(id).await;
        });
    }
}

#[wasm_bindgen(js_name = ativarHorario)]
pub fn set_schedule_active(id: i32, ativo: bool) {
    if let Some(client) = with_page(Page::schedules) {
        wasm_bindgen_futures::spawn_local(async move {
            client.set_active(id, ativo).await;
        });
    }
}

#[wasm_bindgen(js_name = validarLogin)]
pub fn validate_login() -> bool {
    gate_submit("login", |document| LoginForm::read(document).map(|form| form.validate()))
}

#[wasm_bindgen(js_name = validarCadastro)]
pub fn validate_signup() -> bool {
    gate_submit("signup", |document| SignupForm::read(document).map(|form| form.validate()))
}

#[wasm_bindgen(js_name = confirmarLogout)]
pub fn confirm_logout() -> bool {
    with_page(|page| validation::confirm_logout(page.platform().browser.as_ref())).unwrap_or(false)
}

#[wasm_bindgen(js_name = formatarDuracao)]
pub fn format_duration_js(segundos: u32) -> String {
    format_duration(segundos)
}
