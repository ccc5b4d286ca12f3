//! Keyboard input for the frame loop
//!
//! One `InputContext` is created at startup and polled once per frame.
//! The poll waits up to the frame deadline for the first event, then
//! drains whatever else queued up, folding everything into an
//! `InputFrame`.

use std::collections::BTreeSet;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::rasterizer::Vec4;

/// Everything the loop learns from one frame of input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    /// Labels of the keys seen this frame ("w", "space", ...)
    pub buttons: BTreeSet<String>,
    /// Summed WASD movement, one unit per key event
    pub axis: Vec4,
    pub quit: bool,
}

/// Keyboard source scoping access to the terminal event queue; created
/// once at startup and polled every frame
#[derive(Debug, Default)]
pub struct InputContext;

impl InputContext {
    pub fn new() -> Self {
        Self
    }

    /// Block up to `timeout` for input, then drain the queue
    pub fn poll(&mut self, timeout: Duration) -> io::Result<InputFrame> {
        let mut frame = InputFrame::default();
        if event::poll(timeout)? {
            loop {
                if let Event::Key(key) = event::read()? {
                    apply_key_event(key, &mut frame);
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }
        Ok(frame)
    }
}

/// Fold one key event into the frame
fn apply_key_event(key: KeyEvent, frame: &mut InputFrame) {
    if should_quit(&key) {
        frame.quit = true;
        return;
    }
    match key.code {
        KeyCode::Char(c) => {
            let label = if c == ' ' {
                String::from("space")
            } else {
                c.to_ascii_lowercase().to_string()
            };
            frame.buttons.insert(label);
            match c.to_ascii_lowercase() {
                'w' => frame.axis.y += 1.0,
                's' => frame.axis.y -= 1.0,
                'a' => frame.axis.x -= 1.0,
                'd' => frame.axis.x += 1.0,
                _ => {}
            }
        }
        KeyCode::Up => {
            frame.buttons.insert(String::from("up"));
        }
        KeyCode::Down => {
            frame.buttons.insert(String::from("down"));
        }
        KeyCode::Left => {
            frame.buttons.insert(String::from("left"));
        }
        KeyCode::Right => {
            frame.buttons.insert(String::from("right"));
        }
        _ => {}
    }
}

/// Check if a key should quit the loop
fn should_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_for(codes: &[KeyCode]) -> InputFrame {
        let mut frame = InputFrame::default();
        for &code in codes {
            apply_key_event(KeyEvent::from(code), &mut frame);
        }
        frame
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(&KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(&KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(&KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(&KeyEvent::from(KeyCode::Char('c'))));
        assert!(frame_for(&[KeyCode::Esc]).quit);
    }

    #[test]
    fn test_wasd_axis() {
        let frame = frame_for(&[KeyCode::Char('w')]);
        assert!((frame.axis.y - 1.0).abs() < 0.001);

        let frame = frame_for(&[KeyCode::Char('s')]);
        assert!((frame.axis.y + 1.0).abs() < 0.001);

        let frame = frame_for(&[KeyCode::Char('a')]);
        assert!((frame.axis.x + 1.0).abs() < 0.001);

        let frame = frame_for(&[KeyCode::Char('d')]);
        assert!((frame.axis.x - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_axis_sums_over_a_frame() {
        let frame = frame_for(&[KeyCode::Char('w'), KeyCode::Char('d'), KeyCode::Char('w')]);
        assert!((frame.axis.x - 1.0).abs() < 0.001);
        assert!((frame.axis.y - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_button_labels() {
        let frame = frame_for(&[KeyCode::Char('W'), KeyCode::Char(' '), KeyCode::Up]);
        assert!(frame.buttons.contains("w"));
        assert!(frame.buttons.contains("space"));
        assert!(frame.buttons.contains("up"));
    }

    #[test]
    fn test_unmapped_keys_do_nothing() {
        let frame = frame_for(&[KeyCode::Tab, KeyCode::Char('z')]);
        assert!(!frame.quit);
        assert!((frame.axis.len() - 0.0).abs() < 0.001);
        assert!(frame.buttons.contains("z"));
    }
}
