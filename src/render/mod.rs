//! Frame drawing over an abstract surface
//!
//! `draw_frame` turns a `GameState` into plain draw calls so the scene can be
//! rendered on any backend (the canvas 2D context on wasm, a recording
//! surface in tests).

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::consts::*;
use crate::sim::{GamePhase, GameState};

pub const TURRET_COLOR: &str = "red";
pub const BULLET_COLOR: &str = "yellow";
pub const OBJECT_COLOR: &str = "white";
pub const HUD_COLOR: &str = "white";
pub const MESSAGE_COLOR: &str = "red";
pub const HUD_FONT: &str = "20px Arial";
pub const MESSAGE_FONT: &str = "30px Arial";

/// Minimal drawing capability the game needs from its rendering surface
pub trait DrawSurface {
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str);
}

/// Draw one frame for the current phase.
///
/// Called every scheduled frame regardless of phase: Paused redraws the
/// frozen scene, GameOver and Quitted draw their terminal messages, Idle
/// leaves the surface blank.
pub fn draw_frame(state: &GameState, surface: &mut impl DrawSurface) {
    match state.phase {
        GamePhase::Idle => {
            surface.clear();
        }
        GamePhase::Running | GamePhase::Paused => {
            draw_scene(state, surface);
        }
        GamePhase::GameOver => {
            draw_scene(state, surface);
            surface.fill_text(
                "Game Over!",
                state.width / 2.0 - 80.0,
                state.height / 2.0 - 20.0,
                MESSAGE_FONT,
                MESSAGE_COLOR,
            );
            let seconds_left = state.restart_ticks.div_ceil(TICKS_PER_SECOND);
            surface.fill_text(
                &format!("Restarting in {seconds_left}s..."),
                state.width / 2.0 - 90.0,
                state.height / 2.0 + 20.0,
                HUD_FONT,
                MESSAGE_COLOR,
            );
        }
        GamePhase::Quitted => {
            surface.clear();
            surface.fill_text(
                "Game Quitted",
                state.width / 2.0 - 80.0,
                state.height / 2.0 - 20.0,
                MESSAGE_FONT,
                MESSAGE_COLOR,
            );
        }
    }
}

fn draw_scene(state: &GameState, surface: &mut impl DrawSurface) {
    surface.clear();

    let turret = state.turret_rect();
    surface.fill_rect(
        turret.pos.x,
        turret.pos.y,
        turret.size.x,
        turret.size.y,
        TURRET_COLOR,
    );

    for bullet in &state.bullets {
        let rect = bullet.rect();
        surface.fill_rect(
            rect.pos.x,
            rect.pos.y,
            rect.size.x,
            rect.size.y,
            BULLET_COLOR,
        );
    }

    for object in &state.objects {
        let rect = object.rect();
        surface.fill_rect(
            rect.pos.x,
            rect.pos.y,
            rect.size.x,
            rect.size.y,
            OBJECT_COLOR,
        );
    }

    surface.fill_text(&format!("Score: {}", state.score), 10.0, 30.0, HUD_FONT, HUD_COLOR);
    surface.fill_text(&format!("Level: {}", state.level), 10.0, 60.0, HUD_FONT, HUD_COLOR);
}
