//! Falling pieces.
//!
//! A piece is a rigid composite of sub-cubes moved and rotated as one unit.
//! Its placement is never a mutated running matrix: the authoritative state
//! is the current location plus the ordered rotation history, and the model
//! matrix is rebuilt from scratch on every command. Rejected commands roll
//! back by popping the history or restoring the location scalar, which keeps
//! rollback exact (no matrix inversion, no drift).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::math::{Mat4, Vec3, Vec4};

/// The five piece shapes, one per source model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceKind {
    /// 2x2 flat block.
    Square,
    /// Three cubes in an L on the floor plus one stacked up.
    Corner,
    /// Four cubes, three in a row with one hooked sideways.
    LShape,
    /// Three in a row with one centered sideways.
    TShape,
    /// Four in a row.
    Line,
}

impl PieceKind {
    pub const ALL: [PieceKind; 5] = [
        PieceKind::Square,
        PieceKind::Corner,
        PieceKind::LShape,
        PieceKind::TShape,
        PieceKind::Line,
    ];

    /// Local-space center of each sub-cube, captured once at load time.
    /// Centers sit on the integer lattice so a grid-aligned placement
    /// always rounds exactly.
    pub fn centers(self) -> &'static [Vec4] {
        const SQUARE: [Vec4; 4] = [
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 1.0, 1.0),
            Vec4::new(1.0, 0.0, 1.0, 1.0),
        ];
        const CORNER: [Vec4; 4] = [
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 1.0, 1.0),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
        ];
        const L_SHAPE: [Vec4; 4] = [
            Vec4::new(-1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 1.0, 1.0),
        ];
        const T_SHAPE: [Vec4; 4] = [
            Vec4::new(-1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 1.0, 1.0),
        ];
        const LINE: [Vec4; 4] = [
            Vec4::new(-1.0, 0.0, 0.0, 1.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec4::new(1.0, 0.0, 0.0, 1.0),
            Vec4::new(2.0, 0.0, 0.0, 1.0),
        ];
        match self {
            PieceKind::Square => &SQUARE,
            PieceKind::Corner => &CORNER,
            PieceKind::LShape => &L_SHAPE,
            PieceKind::TShape => &T_SHAPE,
            PieceKind::Line => &LINE,
        }
    }

    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// One entry of a piece's rotation history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub angle_deg: f32,
    pub axis: Vec3,
}

/// The active falling piece.
#[derive(Debug, Clone)]
pub struct Piece {
    pub kind: PieceKind,
    pub location: Vec3,
    rotations: Vec<Rotation>,
}

impl Piece {
    pub fn new(kind: PieceKind, location: Vec3) -> Self {
        Self {
            kind,
            location,
            rotations: Vec::new(),
        }
    }

    pub fn rotations(&self) -> &[Rotation] {
        &self.rotations
    }

    pub fn push_rotation(&mut self, rotation: Rotation) {
        self.rotations.push(rotation);
    }

    pub fn pop_rotation(&mut self) -> Option<Rotation> {
        self.rotations.pop()
    }

    /// Rebuilds the placement transform from the authoritative state:
    /// translate to the current location, then apply the rotations most
    /// recent first, all about world axes through the piece origin.
    pub fn model_matrix(&self) -> Mat4 {
        let mut m = Mat4::identity();
        m.translate(self.location.x, self.location.y, self.location.z);
        for rot in self.rotations.iter().rev() {
            m.rotate(rot.angle_deg, rot.axis.x, rot.axis.y, rot.axis.z);
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_four_cubes() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.centers().len(), 4, "{kind:?}");
        }
    }

    #[test]
    fn model_matrix_places_cubes_at_location() {
        let piece = Piece::new(PieceKind::Square, Vec3::new(0.0, 14.5, 0.0));
        let m = piece.model_matrix();
        let p = m.transform_vec4(piece.kind.centers()[0]);
        assert_eq!(p.truncate(), Vec3::new(0.0, 14.5, 0.0));
    }

    #[test]
    fn rotations_apply_most_recent_first() {
        let mut piece = Piece::new(PieceKind::Line, Vec3::ZERO);
        piece.push_rotation(Rotation {
            angle_deg: 90.0,
            axis: Vec3::new(0.0, 1.0, 0.0),
        });
        piece.push_rotation(Rotation {
            angle_deg: 90.0,
            axis: Vec3::new(1.0, 0.0, 0.0),
        });

        // The newest rotation (x) is multiplied in first, leaving the
        // oldest (y) rightmost, so the y turn acts on each point first.
        let mut expected = Mat4::identity();
        expected.rotate(90.0, 1.0, 0.0, 0.0);
        expected.rotate(90.0, 0.0, 1.0, 0.0);

        let got = piece.model_matrix();
        for (a, b) in got.m.iter().zip(expected.m.iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn pop_rotation_restores_previous_matrix() {
        let mut piece = Piece::new(PieceKind::TShape, Vec3::new(1.0, 5.5, -2.0));
        let before = piece.model_matrix();

        piece.push_rotation(Rotation {
            angle_deg: -90.0,
            axis: Vec3::new(0.0, 0.0, 1.0),
        });
        assert!(piece.model_matrix() != before);

        piece.pop_rotation();
        assert_eq!(piece.model_matrix(), before);
    }

    #[test]
    fn quarter_turns_keep_cubes_on_the_lattice() {
        let mut piece = Piece::new(PieceKind::LShape, Vec3::new(0.0, 10.5, 0.0));
        piece.push_rotation(Rotation {
            angle_deg: 90.0,
            axis: Vec3::new(0.0, 1.0, 0.0),
        });
        let m = piece.model_matrix();

        for center in piece.kind.centers().iter().copied() {
            let p = m.transform_vec4(center);
            assert!((p.x - p.x.round()).abs() < 1e-4);
            assert!((p.z - p.z.round()).abs() < 1e-4);
            // Heights stay on the half-integer lattice.
            assert!(((p.y - 0.5) - (p.y - 0.5).round()).abs() < 1e-4);
        }
    }
}
