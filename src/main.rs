//! Terminal Gridfall runner.
//!
//! One loop does everything: poll input for the remainder of the frame
//! budget, apply commands to the simulation, advance the logic clock, render.
//! Rendering runs at the frame rate; the simulation ticks at whatever rate
//! its cycle clock is currently set to.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use gridfall::core::Game;
use gridfall::input::{map_key_press, map_key_release, should_quit, DropLatch};
use gridfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use gridfall::types::{Command, FRAME_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut game = Game::new(wall_clock_seed());
    let view = GameView;
    let mut fb = FrameBuffer::new(0, 0);
    let mut latch = DropLatch::new();

    let frame = Duration::from_millis(FRAME_MS);
    let mut last_frame = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        let timeout = frame
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(command) = map_key_press(key) {
                            if command == Command::SoftDropPress {
                                latch.press();
                            }
                            game.handle_command(command);
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(command) = map_key_release(key) {
                            if latch.release() {
                                game.handle_command(command);
                            }
                        }
                    }
                },
                // The next render picks the new size up from terminal::size.
                Event::Resize(..) => {}
                _ => {}
            }
        }

        if last_frame.elapsed() >= frame {
            last_frame = Instant::now();
            if latch.expire(FRAME_MS as u32) {
                game.handle_command(Command::SoftDropRelease);
            }
            game.update();
        }
    }
}

fn wall_clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
}
