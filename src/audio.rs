//! Background music over an HTML audio element
//!
//! The game music lives in an `<audio>` element in the page; this wrapper
//! exposes the play/pause/rewind/volume capabilities the game needs.
//! Playback is fire-and-forget: a missing element or a blocked autoplay
//! degrades to silence with a logged warning.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAudioElement};

/// Handle to the game music element
pub struct MusicPlayer {
    element: Option<HtmlAudioElement>,
}

impl MusicPlayer {
    /// Look up the audio element by id
    pub fn new(document: &Document, element_id: &str) -> Self {
        let element = document
            .get_element_by_id(element_id)
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());
        if element.is_none() {
            log::warn!("No '{element_id}' audio element - music disabled");
        }
        Self { element }
    }

    pub fn play(&self) {
        if let Some(el) = &self.element {
            // play() returns a promise; browsers may reject it before the
            // first user gesture
            let _ = el.play();
        }
    }

    pub fn pause(&self) {
        if let Some(el) = &self.element {
            let _ = el.pause();
        }
    }

    /// Seek back to the beginning of the track
    pub fn rewind(&self) {
        if let Some(el) = &self.element {
            el.set_current_time(0.0);
        }
    }

    /// Set playback volume, clamped to [0, 1]
    pub fn set_volume(&self, volume: f64) {
        if let Some(el) = &self.element {
            el.set_volume(volume.clamp(0.0, 1.0));
        }
    }
}
