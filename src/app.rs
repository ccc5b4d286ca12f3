//! Application state and frame loops
//!
//! Owns the scene, its spin animations and the renderer, and drives
//! them through either the interactive terminal loop or the headless
//! capture loop.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::rasterizer::{AsciiEncoder, Quat, RenderSettings, Renderer, SettingsError};
use crate::scene::{BuiltScene, NodeId, SceneGraph, SpinBinding};
use crate::term::{AsciiDisplay, InputContext, InputFrame};

/// Units per second the rig moves under WASD
const MOVE_SPEED: f32 = 4.0;
/// Target frame duration for the interactive loop
const FRAME_CAP: Duration = Duration::from_millis(33);
/// Fixed timestep used by headless capture
const CAPTURE_DT: f32 = 1.0 / 30.0;

const STATUS: &str = "w/a/s/d move   q quit";

pub struct App {
    graph: SceneGraph,
    spins: Vec<SpinBinding>,
    controlled: NodeId,
    renderer: Renderer,
    encoder: AsciiEncoder,
    input: InputContext,
}

impl App {
    /// Movement targets the first top-level node, or the root for an
    /// empty scene.
    pub fn new(settings: RenderSettings, scene: BuiltScene) -> Result<Self, SettingsError> {
        let renderer = Renderer::new(settings)?;
        let controlled = scene
            .graph
            .children(scene.graph.root())
            .first()
            .copied()
            .unwrap_or(scene.graph.root());
        Ok(Self {
            graph: scene.graph,
            spins: scene.spins,
            controlled,
            renderer,
            encoder: AsciiEncoder::new(),
            input: InputContext::new(),
        })
    }

    /// Advance spins and movement by `dt` seconds
    pub fn update(&mut self, input: &InputFrame, dt: f32) {
        let delta = input.axis * (MOVE_SPEED * dt);
        if delta.len_squared() > 0.0 {
            self.graph
                .node_mut(self.controlled)
                .transform
                .translate(delta);
        }
        for spin in &self.spins {
            let step = Quat::from_axis_angle(spin.axis, (spin.rate * dt).to_radians());
            self.graph.node_mut(spin.node).transform.rotate(step);
        }
    }

    /// Render the current scene and encode it as text
    pub fn frame(&mut self) -> String {
        self.renderer.render(&self.graph);
        self.encoder.encode(self.renderer.output())
    }

    /// Run the terminal loop until a quit key arrives
    pub fn run_interactive(&mut self) -> anyhow::Result<()> {
        let mut display = AsciiDisplay::new();
        display.enter()?;
        let result = self.interactive_loop(&mut display);

        // Always try to restore terminal state.
        let _ = display.exit();
        result
    }

    fn interactive_loop(&mut self, display: &mut AsciiDisplay) -> anyhow::Result<()> {
        let mut last = Instant::now();
        loop {
            let frame = self.frame();
            display.draw(&frame, STATUS)?;

            let timeout = FRAME_CAP
                .checked_sub(last.elapsed())
                .unwrap_or(Duration::ZERO);
            let input = self.input.poll(timeout)?;
            if input.quit {
                return Ok(());
            }

            let dt = last.elapsed().as_secs_f32();
            last = Instant::now();
            self.update(&input, dt);
        }
    }

    /// Render `frames` frames at a fixed timestep into `out`
    pub fn run_capture(&mut self, frames: u32, out: &Path, png: bool) -> anyhow::Result<()> {
        fs::create_dir_all(out)?;
        for index in 0..frames {
            self.update(&InputFrame::default(), CAPTURE_DT);
            let frame = self.frame();
            fs::write(out.join(format!("frame_{:03}.txt", index)), &frame)?;
            if png {
                self.renderer
                    .output()
                    .save_png(out.join(format!("frame_{:03}.png", index)))
                    .map_err(anyhow::Error::msg)?;
            }
        }
        Ok(())
    }
}
