//! Static geometry templates, one per furniture kind
//!
//! Dimensions are world units at scale 1 (25 units per foot). Every object
//! stands on y = 0 and is centred on its origin. Faces are listed back to
//! front: supports first, visible tops last.

use super::object::{Face, ObjectKind};
use crate::spatial::Point3D;

const LEG_TINT: f32 = 0.8;

pub(crate) fn faces_for(kind: ObjectKind) -> Vec<Face> {
    match kind {
        ObjectKind::Desk => desk(),
        ObjectKind::Chair => chair(),
        ObjectKind::Table => table(),
        ObjectKind::Podium => podium(),
        ObjectKind::Cabinet => cabinet(),
    }
}

fn p(x: f32, y: f32, z: f32) -> Point3D {
    Point3D::new(x, y, z)
}

/// Horizontal rectangle at height `y`, wound (-x,-z) → (x,-z) → (x,z) → (-x,z)
fn slab(half_x: f32, half_z: f32, y: f32) -> Face {
    Face::new(vec![
        p(-half_x, y, -half_z),
        p(half_x, y, -half_z),
        p(half_x, y, half_z),
        p(-half_x, y, half_z),
    ])
}

/// Thin vertical strip standing in for a leg at (x, z)
fn leg(x: f32, z: f32, height: f32, thickness: f32) -> Face {
    let t = thickness / 2.0;
    Face::new(vec![
        p(x - t, 0.0, z),
        p(x + t, 0.0, z),
        p(x + t, height, z),
        p(x - t, height, z),
    ])
    .with_tint(LEG_TINT)
}

fn legs(dx: f32, dz: f32, height: f32, thickness: f32) -> Vec<Face> {
    [(-dx, -dz), (dx, -dz), (-dx, dz), (dx, dz)]
        .into_iter()
        .map(|(x, z)| leg(x, z, height, thickness))
        .collect()
}

fn desk() -> Vec<Face> {
    let mut faces = legs(35.0, 20.0, 35.0, 4.0);
    faces.push(slab(40.0, 25.0, 35.0));
    faces
}

fn chair() -> Vec<Face> {
    let mut faces = legs(15.0, 15.0, 25.0, 3.0);
    faces.push(slab(20.0, 20.0, 25.0));
    faces.push(
        Face::new(vec![
            p(-20.0, 25.0, -22.0),
            p(20.0, 25.0, -22.0),
            p(20.0, 60.0, -22.0),
            p(-20.0, 60.0, -22.0),
        ])
        .with_tint(LEG_TINT),
    );
    faces
}

fn table() -> Vec<Face> {
    let mut faces = legs(50.0, 30.0, 40.0, 5.0);
    faces.push(slab(60.0, 40.0, 40.0));
    faces
}

fn podium() -> Vec<Face> {
    let (w, d, h) = (20.0, 15.0, 60.0);
    let (tw, td) = (w + 5.0, d + 5.0);
    vec![
        // left side
        Face::new(vec![p(-w, 0.0, -d), p(-w, 0.0, d), p(-w, h, d), p(-w, h, -d)]).with_tint(LEG_TINT),
        // right side
        Face::new(vec![p(w, 0.0, d), p(w, 0.0, -d), p(w, h, -d), p(w, h, d)]).with_tint(LEG_TINT),
        // front
        Face::new(vec![p(-w, 0.0, d), p(w, 0.0, d), p(w, h, d), p(-w, h, d)]),
        // reading surface, sloping down toward the front
        Face::new(vec![
            p(-tw, h + 12.0, -td),
            p(tw, h + 12.0, -td),
            p(tw, h + 2.0, td),
            p(-tw, h + 2.0, td),
        ]),
    ]
}

fn cabinet() -> Vec<Face> {
    let (w, d, h) = (35.0, 20.0, 70.0);
    vec![
        Face::new(vec![p(-w, 0.0, -d), p(-w, 0.0, d), p(-w, h, d), p(-w, h, -d)]).with_tint(LEG_TINT),
        Face::new(vec![p(w, 0.0, d), p(w, 0.0, -d), p(w, h, -d), p(w, h, d)]).with_tint(LEG_TINT),
        Face::new(vec![p(-w, 0.0, d), p(w, 0.0, d), p(w, h, d), p(-w, h, d)]),
        slab(w, d, h),
    ]
}
