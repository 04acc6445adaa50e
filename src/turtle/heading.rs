// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 lacklustr@protonmail.com https://github.com/eadf
// This file is part of the lsystem-turtle crate.

use super::OrientationModel;
use vector_traits::glam::{DMat3, DVec3};

#[derive(Debug, Clone, Copy, PartialEq)]
/// A structure defining the 3D heading of a turtle as a forward/up frame
pub struct Heading {
    pub heading: DVec3,
    pub up: DVec3,
}

impl Default for Heading {
    fn default() -> Self {
        Self {
            heading: DVec3::X,
            up: DVec3::Z,
        }
    }
}

impl Heading {
    /// rotate around 'forward' or longitudinal axis, a positive angle tips 'up' to the right
    fn roll(&self, angle: f64) -> Heading {
        let axis = self.heading.normalize();
        let rot = DMat3::from_axis_angle(axis, angle);
        Self {
            heading: self.heading,
            up: (rot * self.up).normalize(),
        }
    }

    /// rotate around 'up' or vertical axis
    fn yaw(&self, angle: f64) -> Heading {
        let axis = self.up.normalize();
        let rot = DMat3::from_axis_angle(axis, angle);
        Self {
            heading: (rot * self.heading).normalize(),
            up: self.up,
        }
    }

    /// rotate around axis perpendicular to 'up' and 'forward' - i.e. lateral/traverse axis.
    /// A positive angle lifts the nose.
    fn pitch(&self, angle: f64) -> Heading {
        let pitch_v = self.heading.cross(self.up).normalize();
        let rot = DMat3::from_axis_angle(pitch_v, angle);
        Self {
            heading: (rot * self.heading).normalize(),
            up: (rot * self.up).normalize(),
        }
    }
}

/// Yaw, pitch and roll kept as three independent accumulated angles (radians).
///
/// The forward direction only depends on yaw and pitch, a positive pitch points the nose down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EulerAngles {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl EulerAngles {
    pub fn forward(&self) -> DVec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        DVec3::new(cos_yaw * cos_pitch, sin_yaw * cos_pitch, -sin_pitch)
    }
}

/// The orientation of a 3D turtle, in one of the two [`OrientationModel`]s
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    Frame(Heading),
    Euler(EulerAngles),
}

impl Orientation {
    pub fn new(model: OrientationModel) -> Self {
        match model {
            OrientationModel::Frame => Self::Frame(Heading::default()),
            OrientationModel::EulerAngles => Self::Euler(EulerAngles::default()),
        }
    }

    /// Turn left (positive) or right (negative)
    pub fn yaw(&mut self, angle: f64) {
        match self {
            Self::Frame(h) => *h = h.yaw(angle),
            Self::Euler(e) => e.yaw += angle,
        }
    }

    /// Nose down (positive) or up (negative)
    pub fn pitch_down(&mut self, angle: f64) {
        match self {
            Self::Frame(h) => *h = h.pitch(-angle),
            Self::Euler(e) => e.pitch += angle,
        }
    }

    /// Roll left (positive) or right (negative)
    pub fn roll_left(&mut self, angle: f64) {
        match self {
            Self::Frame(h) => *h = h.roll(-angle),
            Self::Euler(e) => e.roll += angle,
        }
    }

    /// unit vector of the current direction of travel
    pub fn forward(&self) -> DVec3 {
        match self {
            Self::Frame(h) => h.heading,
            Self::Euler(e) => e.forward(),
        }
    }
}
