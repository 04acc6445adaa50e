// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the lsystem-turtle crate.

use super::{OrientationModel, Segment3D, heading::Orientation};
use crate::LSystemError;
use smallvec::SmallVec;
use vector_traits::glam::DVec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TurtleCommand3D {
    Nop,
    /// Move one unit along the current direction, drawing a segment
    Forward,
    /// turn left, radians
    Yaw(f64),
    /// nose down, radians
    Pitch(f64),
    /// roll left, radians
    Roll(f64),
    Push,
    Pop,
}

impl TurtleCommand3D {
    pub fn from_symbol(symbol: char, angle_radians: f64) -> Self {
        match symbol {
            'F' => Self::Forward,
            '+' => Self::Yaw(angle_radians),
            '-' => Self::Yaw(-angle_radians),
            '&' => Self::Pitch(angle_radians),
            '^' => Self::Pitch(-angle_radians),
            '\\' => Self::Roll(angle_radians),
            '/' => Self::Roll(-angle_radians),
            '[' => Self::Push,
            ']' => Self::Pop,
            _ => Self::Nop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurtleState3D {
    pub position: DVec3,
    pub orientation: Orientation,
}

#[derive(Debug, Clone)]
pub struct Turtle3D {
    state: TurtleState3D,
    stack: SmallVec<[TurtleState3D; 16]>,
    result: Vec<Segment3D>,
}

impl Default for Turtle3D {
    fn default() -> Self {
        Self::new(OrientationModel::default())
    }
}

impl Turtle3D {
    /// A turtle at the origin heading along +X with +Z as up
    pub fn new(model: OrientationModel) -> Self {
        Self {
            state: TurtleState3D {
                position: DVec3::ZERO,
                orientation: Orientation::new(model),
            },
            stack: SmallVec::new(),
            result: Vec::new(),
        }
    }

    /// Apply a turtle command, `index` is the position of the symbol it came from
    pub fn apply(&mut self, index: usize, command: TurtleCommand3D) -> Result<(), LSystemError> {
        match command {
            TurtleCommand3D::Nop => {}
            TurtleCommand3D::Forward => {
                let p0 = self.state.position;
                self.state.position += self.state.orientation.forward();
                self.result.push([p0, self.state.position]);
            }
            TurtleCommand3D::Yaw(angle) => self.state.orientation.yaw(angle),
            TurtleCommand3D::Pitch(angle) => self.state.orientation.pitch_down(angle),
            TurtleCommand3D::Roll(angle) => self.state.orientation.roll_left(angle),
            TurtleCommand3D::Push => self.stack.push(self.state),
            TurtleCommand3D::Pop => {
                self.state = self.stack.pop().ok_or(LSystemError::StackUnderflow {
                    index,
                    iteration: None,
                })?;
            }
        }
        Ok(())
    }

    /// Interpret every symbol in order, `angle_degrees` is used for every rotation command.
    pub fn walk<I>(&mut self, symbols: I, angle_degrees: f64) -> Result<(), LSystemError>
    where
        I: IntoIterator<Item = char>,
    {
        let angle = angle_degrees.to_radians();
        for (index, symbol) in symbols.into_iter().enumerate() {
            self.apply(index, TurtleCommand3D::from_symbol(symbol, angle))?;
        }
        Ok(())
    }

    pub fn state(&self) -> TurtleState3D {
        self.state
    }

    /// Number of saved states currently on the stack
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn segments(&self) -> &[Segment3D] {
        &self.result
    }

    pub fn into_segments(self) -> Vec<Segment3D> {
        self.result
    }
}
