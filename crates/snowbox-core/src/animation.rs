//! Frame-based sprite animation: walk cycles chosen from keys or headings,
//! plus the one-shot snowball splash.

use std::f32::consts::{FRAC_PI_4, PI, TAU};

/// Character sheets are 4x4 grids of 48x48 frames.
pub const CHARACTER_FRAME_SIZE: u32 = 48;
pub const CHARACTER_SHEET_COLUMNS: u32 = 4;
pub const CHARACTER_SHEET_ROWS: u32 = 4;

pub const WALK_FPS: f32 = 12.0;
pub const SPLASH_FPS: f32 = 70.0;
pub const SPLASH_FRAME_COUNT: usize = 8;

/// A named frame sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clip {
    pub name: &'static str,
    pub frames: &'static [usize],
    pub fps: f32,
    pub looping: bool,
}

pub const SPLASH: Clip = Clip {
    name: "explosion",
    frames: &[0, 1, 2, 3, 4, 5, 6, 7],
    fps: SPLASH_FPS,
    looping: false,
};

/// Walking direction, one per sprite sheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkCycle {
    Left,
    Right,
    Top,
    Bottom,
}

impl WalkCycle {
    pub fn clip(self) -> Clip {
        let (name, frames): (&'static str, &'static [usize]) = match self {
            Self::Left => ("moveLeft", &[1, 5, 9, 13]),
            Self::Right => ("moveRight", &[3, 7, 11, 15]),
            Self::Top => ("moveTop", &[2, 6, 10, 14]),
            Self::Bottom => ("moveBottom", &[0, 4, 8, 12]),
        };
        Clip {
            name,
            frames,
            fps: WALK_FPS,
            looping: true,
        }
    }
}

/// Arrow keys currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionKeys {
    /// Movement intent sent to the server. Up wins over down and left over
    /// right when both keys of an axis are held.
    pub fn direction(&self) -> (i8, i8) {
        let y = if self.up {
            -1
        } else if self.down {
            1
        } else {
            0
        };
        let x = if self.left {
            -1
        } else if self.right {
            1
        } else {
            0
        };
        (x, y)
    }

    /// Walk cycle for the local player. Vertical keys take priority.
    pub fn walk_cycle(&self) -> Option<WalkCycle> {
        if self.up {
            Some(WalkCycle::Top)
        } else if self.down {
            Some(WalkCycle::Bottom)
        } else if self.left {
            Some(WalkCycle::Left)
        } else if self.right {
            Some(WalkCycle::Right)
        } else {
            None
        }
    }
}

/// Walk cycle for a remote player from the server heading.
///
/// The heading is folded into `(-PI, PI]` and flipped so that "up the
/// screen" is positive, then split into four quadrants.
pub fn walk_cycle_for_heading(speed: f32, angle: f32) -> Option<WalkCycle> {
    if speed == 0.0 {
        return None;
    }

    let a = -((angle + PI) % TAU - PI);
    let deg45 = FRAC_PI_4;
    let deg135 = deg45 * 3.0;

    Some(if (deg45..=deg135).contains(&a) {
        WalkCycle::Top
    } else if a <= -deg45 && a >= -deg135 {
        WalkCycle::Bottom
    } else if a > deg135 || a <= -deg45 {
        WalkCycle::Left
    } else {
        WalkCycle::Right
    })
}

/// Result of advancing an animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// A non-looping clip showed its last frame for its full duration.
    Finished,
}

/// Plays one clip at a time.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    clip: Option<Clip>,
    cursor: usize,
    elapsed: f32,
    playing: bool,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clip(&self) -> Option<&Clip> {
        self.clip.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Switching to a different clip restarts from its first frame; asking
    /// for the current clip only resumes it if it was stopped.
    pub fn play(&mut self, clip: Clip) {
        match &self.clip {
            Some(current) if current.name == clip.name => {
                if !self.playing {
                    self.restart();
                }
            },
            _ => {
                self.clip = Some(clip);
                self.restart();
            },
        }
    }

    /// Stop and rewind to the first frame of the current clip.
    pub fn stop(&mut self) {
        self.playing = false;
        self.cursor = 0;
        self.elapsed = 0.0;
    }

    /// Drive the animator from an optional walk cycle: `None` stops.
    pub fn walk(&mut self, cycle: Option<WalkCycle>) {
        match cycle {
            Some(cycle) => self.play(cycle.clip()),
            None => self.stop(),
        }
    }

    fn restart(&mut self) {
        self.cursor = 0;
        self.elapsed = 0.0;
        self.playing = true;
    }

    /// Sheet index of the frame to display.
    pub fn frame(&self) -> Option<usize> {
        let clip = self.clip.as_ref()?;
        clip.frames.get(self.cursor).copied()
    }

    pub fn tick(&mut self, dt: f32) -> Option<AnimationEvent> {
        if !self.playing {
            return None;
        }
        let clip = self.clip?;
        if clip.frames.is_empty() || clip.fps <= 0.0 {
            return None;
        }

        let frame_time = 1.0 / clip.fps;
        self.elapsed += dt;
        while self.elapsed >= frame_time {
            self.elapsed -= frame_time;
            if self.cursor + 1 < clip.frames.len() {
                self.cursor += 1;
            } else if clip.looping {
                self.cursor = 0;
            } else {
                self.playing = false;
                self.elapsed = 0.0;
                return Some(AnimationEvent::Finished);
            }
        }
        None
    }
}
