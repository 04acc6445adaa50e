// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the lsystem-turtle crate.

//! Turtle graphics interpretation of an expanded L-system string.
//!
//! Both interpreters make exactly one left to right pass over the symbols, branching is done
//! with an explicit stack of saved turtle states. A `]` without a matching `[` aborts the
//! walk with [`LSystemError::StackUnderflow`].
//!
//! | symbol                       | 2D                          | 3D                  |
//! |------------------------------|-----------------------------|---------------------|
//! | `A`-`Z`, `0`-`9`             | draw one unit               | only `F` draws      |
//! | `a`-`z`                      | move one unit, no line      | -                   |
//! | `V W X Y Z v w x y z`        | nothing                     | -                   |
//! | `+` / `-`                    | turn by +angle / -angle     | yaw                 |
//! | `&` / `^`                    | -                           | pitch down / up     |
//! | `\` / `/`                    | -                           | roll left / right   |
//! | `\|`                         | turn 180 degrees            | -                   |
//! | `[` / `]`                    | push / pop state            | push / pop state    |
//!
//! Everything else is silently skipped.

mod heading;
mod turtle_2d;
mod turtle_3d;

use crate::{LSystemError, mesh::Mesh};
pub use heading::{EulerAngles, Heading, Orientation};
pub use turtle_2d::{Turtle2D, TurtleCommand2D, TurtleState2D};
pub use turtle_3d::{Turtle3D, TurtleCommand3D, TurtleState3D};
use vector_traits::glam::{DVec2, DVec3};

/// A 2D line segment, `[start, end]`
pub type Segment2D = [DVec2; 2];
/// A 3D line segment, `[start, end]`
pub type Segment3D = [DVec3; 2];

/// How the 3D turtle keeps track of its orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrientationModel {
    /// A forward/up frame rotated around the turtle's own axes, rotations compose correctly
    /// and roll affects subsequent turns.
    #[default]
    Frame,
    /// Three independently accumulated angles, the direction only depends on yaw and pitch.
    /// Roll is tracked but never changes the drawing.
    EulerAngles,
}

impl std::str::FromStr for OrientationModel {
    type Err = LSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "frame" => Ok(Self::Frame),
            "euler" | "euler_angles" => Ok(Self::EulerAngles),
            other => Err(LSystemError::InvalidParameter(format!(
                "Unknown orientation model:{other}"
            ))),
        }
    }
}

/// Runs a 2D turtle over `symbols` and returns the segments in the order they were drawn.
///
/// ```
/// use lsystem_turtle::turtle::interpret_2d;
/// let segments = interpret_2d("F[+F]F[-F]F", 25.0)?;
/// assert_eq!(segments.len(), 5);
/// # Ok::<(), lsystem_turtle::LSystemError>(())
/// ```
pub fn interpret_2d(symbols: &str, angle_degrees: f64) -> Result<Vec<Segment2D>, LSystemError> {
    let mut turtle = Turtle2D::default();
    turtle.walk(symbols.chars(), angle_degrees)?;
    Ok(turtle.into_segments())
}

/// Runs a 3D turtle over `symbols` using the default [`OrientationModel::Frame`].
///
/// Returns the segments in drawing order together with the de-duplicated [`Mesh`].
pub fn interpret_3d(
    symbols: &str,
    angle_degrees: f64,
) -> Result<(Vec<Segment3D>, Mesh), LSystemError> {
    interpret_3d_with(symbols, angle_degrees, OrientationModel::default())
}

/// Runs a 3D turtle over `symbols` with the given orientation model.
pub fn interpret_3d_with(
    symbols: &str,
    angle_degrees: f64,
    model: OrientationModel,
) -> Result<(Vec<Segment3D>, Mesh), LSystemError> {
    let mut turtle = Turtle3D::new(model);
    turtle.walk(symbols.chars(), angle_degrees)?;
    let segments = turtle.into_segments();
    let mesh = Mesh::from_segments(&segments)?;
    Ok((segments, mesh))
}
