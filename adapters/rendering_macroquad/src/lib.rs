#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Munchkin.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, so the adapter depends on macroquad without its default
//! `audio` feature. Sound cues emitted by the simulation are logged instead
//! of played.
//!
//! The loop presents one simulation frame per fixed slice and sleeps out the
//! remainder of each slice.

mod draw;
mod input;

use anyhow::Result;
use log::info;
use munchkin_core::FrameInput;
use munchkin_rendering::{LoopControl, Presentation, RenderingBackend, Scene};
use std::{
    thread,
    time::{Duration, Instant},
};

use self::{
    draw::{draw_scene, picture_size, to_macroquad_color, ViewMetrics},
    input::{frame_input_from_observations, KeyObservations},
};

/// Wall-clock slice of one simulation frame.
pub const FRAME_BUDGET: Duration = Duration::from_millis(33);

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    frame_budget: Duration,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            frame_budget: FRAME_BUDGET,
        }
    }
}

impl MacroquadBackend {
    /// Creates a backend with the platform's default presentation settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> LoopControl + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            frame_budget,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scale,
            scene,
        } = presentation;

        let (window_width, window_height) = window_size(scale);
        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut fullscreen = false;

            loop {
                let frame_start = Instant::now();
                let observations = KeyObservations::poll();
                let (frame_input, toggle_fullscreen) =
                    frame_input_from_observations(&observations, scene.hud.name_entry);
                if toggle_fullscreen {
                    fullscreen = !fullscreen;
                    macroquad::window::set_fullscreen(fullscreen);
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                if update_scene(frame_dt, frame_input, &mut scene) == LoopControl::Exit {
                    break;
                }

                macroquad::window::clear_background(background);
                let metrics = ViewMetrics::fit(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                draw_scene(&scene, &metrics);

                if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                    if show_fps {
                        info!("FPS: {per_second:.2}");
                    }
                }

                thread::sleep(remaining_budget(frame_budget, frame_start.elapsed()));
                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Window size in screen pixels for the picture at `scale`.
fn window_size(scale: f32) -> (i32, i32) {
    let size = picture_size() * scale;
    (size.x.round() as i32, size.y.round() as i32)
}

/// Time left in a frame slice after `spent`.
fn remaining_budget(budget: Duration, spent: Duration) -> Duration {
    budget.saturating_sub(spent)
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average rate once one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let frames = self.frames;
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        if seconds <= f32::EPSILON {
            return None;
        }
        Some(frames as f32 / seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_matches_the_scaled_picture() {
        assert_eq!(window_size(5.0), (1000, 800));
        assert_eq!(window_size(2.5), (500, 400));
    }

    #[test]
    fn frames_sleep_out_the_rest_of_their_slice() {
        assert_eq!(
            remaining_budget(FRAME_BUDGET, Duration::from_millis(10)),
            Duration::from_millis(23)
        );
        assert_eq!(
            remaining_budget(FRAME_BUDGET, Duration::from_millis(50)),
            Duration::ZERO
        );
    }

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        let mut reports = Vec::new();
        for _ in 0..60 {
            if let Some(rate) = counter.record_frame(Duration::from_millis(25)) {
                reports.push(rate);
            }
        }

        assert_eq!(reports.len(), 1);
        assert!((reports[0] - 40.0).abs() < 0.5);
    }

    #[test]
    fn builder_toggles_vsync_through_the_swap_interval() {
        let backend = MacroquadBackend::new().with_vsync(false).with_show_fps(true);

        assert_eq!(backend.swap_interval, Some(0));
        assert!(backend.show_fps);
        assert_eq!(MacroquadBackend::new().with_vsync(true).swap_interval, Some(1));
    }
}
