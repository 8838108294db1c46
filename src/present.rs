//! Presentation boundary
//!
//! The simulation never touches pixels or speakers. Hosts implement
//! `RenderSink` and `AudioSink`, and `Session` drives a `GameState` through
//! them one frame at a time.

use glam::Vec2;

use crate::consts::{GRID_HEIGHT, GRID_WIDTH};
use crate::sim::{
    BlockId, Direction, GameEvent, GameState, Level, LevelError, TickInput, tick,
};
use crate::{Cell, offset_to_world};

/// Sounds the game asks for; how they are produced is up to the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// A block came to rest
    Move,
    /// A block dropped into a hole
    Fall,
    /// A level was solved
    Victory,
}

impl GameEvent {
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Blocked { .. } => Some(SoundCue::Move),
            GameEvent::Fell { .. } => Some(SoundCue::Fall),
            GameEvent::LevelComplete { .. } => Some(SoundCue::Victory),
            GameEvent::MoveStarted { .. }
            | GameEvent::LevelLoaded { .. }
            | GameEvent::Reset { .. }
            | GameEvent::Won => None,
        }
    }
}

/// Player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Move(Direction),
    Reset,
    PreviousLevel,
}

impl InputAction {
    /// Map a browser `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(InputAction::Move(Direction::Up)),
            "ArrowDown" => Some(InputAction::Move(Direction::Down)),
            "ArrowLeft" => Some(InputAction::Move(Direction::Left)),
            "ArrowRight" => Some(InputAction::Move(Direction::Right)),
            " " => Some(InputAction::Reset),
            "a" | "A" => Some(InputAction::PreviousLevel),
            _ => None,
        }
    }
}

/// Render-side view of one block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockView {
    pub id: BlockId,
    /// Start cell; the block is drawn there, translated by `offset`
    pub start: Cell,
    /// Displacement from the start cell in world units (y up)
    pub offset: Vec2,
    /// True when the block rests on a whole cell
    pub settled: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame<'a> {
    pub level: &'a Level,
    pub blocks: [BlockView; 2],
    pub won: bool,
}

impl<'a> RenderFrame<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        let view = |id: BlockId| {
            let motion = state.motion(id);
            BlockView {
                id,
                start: state.level.start(id),
                offset: offset_to_world(motion.offset, GRID_WIDTH, GRID_HEIGHT),
                settled: motion.is_settled(),
            }
        };

        Self {
            level: &state.level,
            blocks: BlockId::ALL.map(view),
            won: state.is_won(),
        }
    }
}

pub trait RenderSink {
    /// Draw one frame; called once per redraw
    fn render(&mut self, frame: &RenderFrame<'_>);
}

pub trait AudioSink {
    /// Fire-and-forget
    fn notify(&mut self, cue: SoundCue);
}

/// A running game bound to its output sinks
pub struct Session<R: RenderSink, A: AudioSink> {
    state: GameState,
    input: TickInput,
    pub renderer: R,
    pub audio: A,
}

impl<R: RenderSink, A: AudioSink> Session<R, A> {
    pub fn new(renderer: R, audio: A) -> Self {
        Self::with_state(GameState::new(), renderer, audio)
    }

    pub fn with_state(state: GameState, renderer: R, audio: A) -> Self {
        Self {
            state,
            input: TickInput::default(),
            renderer,
            audio,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Record an intent; it is applied on the next `frame`
    pub fn queue(&mut self, action: InputAction) {
        match action {
            // First press of the frame wins
            InputAction::Move(direction) => {
                self.input.direction.get_or_insert(direction);
            }
            InputAction::Reset => self.input.reset = true,
            InputAction::PreviousLevel => self.input.previous_level = true,
        }
    }

    /// Jump straight to a level by number
    pub fn select_level(&mut self, id: u32) -> Result<(), LevelError> {
        self.input = TickInput::default();
        self.state.select_level(id)
    }

    /// Advance one tick, play its sounds and draw it.
    ///
    /// Returns the events of this frame so the host can update its HUD.
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input);

        let events = self.state.drain_events();
        for cue in events.iter().filter_map(GameEvent::sound_cue) {
            self.audio.notify(cue);
        }

        self.renderer.render(&RenderFrame::capture(&self.state));
        events
    }
}
