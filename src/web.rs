//! Browser host bindings
//!
//! JavaScript owns the `requestAnimationFrame` loop, DOM listeners and
//! drawing; it calls into [`WebGame`] once per frame and renders the returned
//! JSON snapshot. Reward reports are forwarded to an optional JS callback.

use wasm_bindgen::prelude::*;

use crate::reward::{RewardError, RewardReporter};
use crate::{InputEvent, Key, Session, Tuning, Viewport};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Ignore the error if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Calls a JS function `(score) => boolean`; a throw or `false` means rejected
#[derive(Default)]
pub struct JsReporter {
    callback: Option<js_sys::Function>,
}

impl RewardReporter for JsReporter {
    fn report(&mut self, final_score: u64) -> Result<(), RewardError> {
        let Some(callback) = &self.callback else {
            return Err(RewardError::Failed("no reward handler installed".into()));
        };
        match callback.call1(&JsValue::NULL, &JsValue::from_f64(final_score as f64)) {
            Ok(value) if value.as_bool() == Some(false) => {
                Err(RewardError::Failed("reward handler reported failure".into()))
            }
            Ok(_) => Ok(()),
            Err(err) => Err(RewardError::Rejected(format!("{err:?}"))),
        }
    }
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session<JsReporter>,
}

#[wasm_bindgen]
impl WebGame {
    /// `tuning_json` may be a partial override of the default balance
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, tuning_json: Option<String>) -> Result<WebGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Tuning::default(),
        };
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64 ^ (js_sys::Date::now() as u64);
        Ok(WebGame {
            session: Session::new(Viewport::new(width, height), tuning, JsReporter::default(), seed),
        })
    }

    pub fn set_reward_handler(&mut self, callback: js_sys::Function) {
        self.session.reporter_mut().callback = Some(callback);
    }

    pub fn start_countdown(&mut self, now: f64) {
        self.session.start_countdown(now);
    }

    pub fn begin_run(&mut self, now: f64) {
        self.session.begin_run(now);
    }

    /// Advance one frame and return the snapshot as JSON
    pub fn frame(&mut self, now: f64) -> Result<String, JsValue> {
        self.session.frame(now);
        self.session
            .snapshot()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Events since the last call, as a JSON array
    pub fn take_events(&mut self) -> Result<String, JsValue> {
        let events: Vec<_> = self.session.drain_events().collect();
        serde_json::to_string(&events).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn key_down(&mut self, key: &str) {
        if let Some(key) = Key::from_name(key) {
            self.session.handle_input(InputEvent::KeyDown(key));
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(key) = Key::from_name(key) {
            self.session.handle_input(InputEvent::KeyUp(key));
        }
    }

    pub fn touch_start(&mut self, x: f32) {
        self.session.handle_input(InputEvent::TouchStart { x });
    }

    pub fn touch_end(&mut self) {
        self.session.handle_input(InputEvent::TouchEnd);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.session.resize(Viewport::new(width, height));
    }

    pub fn stop(&mut self) {
        self.session.stop();
    }

    pub fn score(&self) -> f64 {
        self.session.score() as f64
    }
}
