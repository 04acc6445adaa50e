// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the lsystem-turtle crate.

use super::Segment2D;
use crate::LSystemError;
use smallvec::SmallVec;
use vector_traits::glam::DVec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurtleCommand2D {
    Nop,
    /// Move one unit forward, drawing a segment
    Draw,
    /// Move one unit forward without drawing
    Move,
    /// Change the heading by this many degrees
    Turn(f64),
    TurnAround,
    Push,
    Pop,
}

impl TurtleCommand2D {
    /// Classify a symbol. The bookkeeping letters `V W X Y Z v w x y z` are checked before the
    /// draw (`A`-`Z`, `0`-`9`) and move (`a`-`z`) ranges.
    pub fn from_symbol(symbol: char, angle_degrees: f64) -> Self {
        match symbol {
            'V' | 'W' | 'X' | 'Y' | 'Z' | 'v' | 'w' | 'x' | 'y' | 'z' => Self::Nop,
            'A'..='Z' | '0'..='9' => Self::Draw,
            'a'..='z' => Self::Move,
            '+' => Self::Turn(angle_degrees),
            '-' => Self::Turn(-angle_degrees),
            '|' => Self::TurnAround,
            '[' => Self::Push,
            ']' => Self::Pop,
            _ => Self::Nop,
        }
    }
}

/// Position and heading (degrees, counter-clockwise from +X) of a 2D turtle
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TurtleState2D {
    pub position: DVec2,
    pub heading: f64,
}

impl TurtleState2D {
    /// the position one unit length ahead
    fn ahead(&self) -> DVec2 {
        let (sin, cos) = self.heading.to_radians().sin_cos();
        self.position + DVec2::new(cos, sin)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Turtle2D {
    state: TurtleState2D,
    stack: SmallVec<[TurtleState2D; 16]>,
    result: Vec<Segment2D>,
}

impl Turtle2D {
    /// Apply a turtle command, `index` is the position of the symbol it came from
    pub fn apply(&mut self, index: usize, command: TurtleCommand2D) -> Result<(), LSystemError> {
        match command {
            TurtleCommand2D::Nop => {}
            TurtleCommand2D::Draw => {
                let p0 = self.state.position;
                self.state.position = self.state.ahead();
                self.result.push([p0, self.state.position]);
            }
            TurtleCommand2D::Move => self.state.position = self.state.ahead(),
            TurtleCommand2D::Turn(angle) => self.state.heading += angle,
            TurtleCommand2D::TurnAround => self.state.heading += 180.0,
            TurtleCommand2D::Push => self.stack.push(self.state),
            TurtleCommand2D::Pop => {
                self.state = self.stack.pop().ok_or(LSystemError::StackUnderflow {
                    index,
                    iteration: None,
                })?;
            }
        }
        Ok(())
    }

    /// Interpret every symbol in order. Symbol indices in errors count from the start of
    /// `symbols`.
    pub fn walk<I>(&mut self, symbols: I, angle_degrees: f64) -> Result<(), LSystemError>
    where
        I: IntoIterator<Item = char>,
    {
        for (index, symbol) in symbols.into_iter().enumerate() {
            self.apply(index, TurtleCommand2D::from_symbol(symbol, angle_degrees))?;
        }
        Ok(())
    }

    pub fn state(&self) -> TurtleState2D {
        self.state
    }

    /// Number of saved states currently on the stack
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn segments(&self) -> &[Segment2D] {
        &self.result
    }

    pub fn into_segments(self) -> Vec<Segment2D> {
        self.result
    }
}
