//! Browser Geolocation
//!
//! Wraps `navigator.geolocation.getCurrentPosition` in a future.

use airwatch::location::{Coordinate, Geolocator, LocateError, DEFAULT_LOCATE_TIMEOUT};
use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{GeolocationPosition, GeolocationPositionError, PositionOptions};

/// One-shot, high-accuracy position request with no cached fixes
#[derive(Debug, Clone, Copy)]
pub struct BrowserGeolocator {
    timeout_ms: u32,
}

impl Default for BrowserGeolocator {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_LOCATE_TIMEOUT.as_millis() as u32,
        }
    }
}

impl BrowserGeolocator {
    fn options(&self) -> PositionOptions {
        let options = PositionOptions::new();
        options.set_enable_high_accuracy(true);
        options.set_timeout(self.timeout_ms);
        options.set_maximum_age(0);
        options
    }
}

#[async_trait(?Send)]
impl Geolocator for BrowserGeolocator {
    async fn locate(&self) -> Result<Coordinate, LocateError> {
        let geolocation = web_sys::window()
            .ok_or(LocateError::Unsupported)?
            .navigator()
            .geolocation()
            .map_err(|_| LocateError::Unsupported)?;

        let options = self.options();
        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            if let Err(e) = geolocation.get_current_position_with_error_callback_and_options(
                &resolve,
                Some(&reject),
                &options,
            ) {
                let _ = reject.call1(&wasm_bindgen::JsValue::NULL, &e);
            }
        });

        let position = JsFuture::from(promise).await.map_err(|e| {
            e.dyn_into::<GeolocationPositionError>()
                .map(|err| LocateError::from_code(err.code()))
                .unwrap_or(LocateError::Unavailable)
        })?;

        let position: GeolocationPosition = position
            .dyn_into()
            .map_err(|_| LocateError::Unavailable)?;
        let coords = position.coords();

        Ok(Coordinate::new(coords.latitude(), coords.longitude()))
    }
}
