//! Box faces and their normals

use crate::core::types::Vec3;

/// One of the six faces of a unit box, in box-geometry material order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Right = 0,  // +X
    Left = 1,   // -X
    Top = 2,    // +Y
    Bottom = 3, // -Y
    Front = 4,  // +Z
    Back = 5,   // -Z
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Right,
        Face::Left,
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Face> {
        Face::ALL.get(index as usize).copied()
    }

    /// Outward unit normal
    pub fn normal(self) -> Vec3 {
        match self {
            Face::Right => Vec3::X,
            Face::Left => Vec3::NEG_X,
            Face::Top => Vec3::Y,
            Face::Bottom => Vec3::NEG_Y,
            Face::Front => Vec3::Z,
            Face::Back => Vec3::NEG_Z,
        }
    }

    /// Face whose normal best matches `normal` (dominant axis).
    /// Returns None for a zero or non-finite vector.
    pub fn from_normal(normal: Vec3) -> Option<Face> {
        if !normal.is_finite() || normal.abs().max_element() == 0.0 {
            return None;
        }

        let abs = normal.abs();
        let face = if abs.x >= abs.y && abs.x >= abs.z {
            if normal.x > 0.0 { Face::Right } else { Face::Left }
        } else if abs.y >= abs.z {
            if normal.y > 0.0 { Face::Top } else { Face::Bottom }
        } else if normal.z > 0.0 {
            Face::Front
        } else {
            Face::Back
        };
        Some(face)
    }
}
