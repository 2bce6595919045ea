use approx::assert_relative_eq;
use cleave3d::query::CutResult;
use cleave3d::shape::{CutPlane, IndexedMesh};
use nalgebra::{Point2, Point3, Unit, Vector3};

const TOLERANCE: f32 = 1.0e-4;

fn cube_buffers() -> (Vec<Point3<f32>>, Vec<Point2<f32>>, Vec<Vector3<f32>>) {
    let vertices: Vec<_> = [
        [-0.5, -0.5, -0.5],
        [0.5, -0.5, -0.5],
        [0.5, 0.5, -0.5],
        [-0.5, 0.5, -0.5],
        [-0.5, -0.5, 0.5],
        [0.5, -0.5, 0.5],
        [0.5, 0.5, 0.5],
        [-0.5, 0.5, 0.5],
    ]
    .iter()
    .map(|v| Point3::new(v[0], v[1], v[2]))
    .collect();
    let uvs = vertices
        .iter()
        .map(|v| Point2::new(v.x + 0.5, v.z + 0.5))
        .collect();
    let normals = vertices.iter().map(|v| v.coords.normalize()).collect();
    (vertices, uvs, normals)
}

const CUBE_SIDES: [u32; 24] = [
    4, 5, 6, 4, 6, 7, // front, z = 0.5
    1, 0, 3, 1, 3, 2, // back, z = -0.5
    0, 4, 7, 0, 7, 3, // left, x = -0.5
    5, 1, 2, 5, 2, 6, // right, x = 0.5
];

const CUBE_TOP_BOTTOM: [u32; 12] = [
    3, 7, 6, 3, 6, 2, // top, y = 0.5
    0, 1, 5, 0, 5, 4, // bottom, y = -0.5
];

/// A unit cube centered at the origin, as a single sub-mesh.
fn build_cube() -> IndexedMesh {
    let (vertices, uvs, normals) = cube_buffers();
    let mut indices = CUBE_SIDES.to_vec();
    indices.extend_from_slice(&CUBE_TOP_BOTTOM);
    IndexedMesh::new(vertices, uvs, normals, vec![indices]).unwrap()
}

/// The same cube with the side faces and the top/bottom faces in separate
/// sub-meshes (two material slots).
fn build_cube_two_submeshes() -> IndexedMesh {
    let (vertices, uvs, normals) = cube_buffers();
    IndexedMesh::new(
        vertices,
        uvs,
        normals,
        vec![CUBE_SIDES.to_vec(), CUBE_TOP_BOTTOM.to_vec()],
    )
    .unwrap()
}

fn equator_plane() -> CutPlane {
    CutPlane::new(Unit::new_normalize(Vector3::y()), 0.0)
}

/// The triangles of `mesh` whose three vertex normals all equal `normal`:
/// with the equator cut these are exactly the cap triangles.
fn cap_triangles(mesh: &IndexedMesh, normal: &Vector3<f32>) -> Vec<[Point3<f32>; 3]> {
    let mut caps = Vec::new();
    for submesh in 0..mesh.num_submeshes() {
        for [ia, ib, ic] in mesh.submesh_triangles(submesh) {
            if [ia, ib, ic]
                .iter()
                .all(|i| (mesh.normals[*i as usize] - normal).norm() < 1.0e-5)
            {
                caps.push([
                    mesh.vertices[ia as usize],
                    mesh.vertices[ib as usize],
                    mesh.vertices[ic as usize],
                ]);
            }
        }
    }
    caps
}

#[test]
fn cube_halves_have_expected_structure() {
    let cube = build_cube();
    let result = cube.local_cut(&equator_plane(), TOLERANCE).unwrap();

    assert!(matches!(result, CutResult::Pair(..)));
    if let CutResult::Pair(above, below) = result {
        // Each half keeps one whole horizontal face (2 triangles), gets 3
        // sub-triangles from each of the 4 split side faces, and an 8-vertex
        // cap fan (4 cube corners + 4 face-diagonal crossings).
        assert_eq!(above.num_triangles(), 2 + 4 * 3 + 8);
        assert_eq!(below.num_triangles(), 2 + 4 * 3 + 8);

        // Positive side = the piece above the plane.
        assert!(above.vertices.iter().all(|v| v.y > -TOLERANCE));
        assert!(below.vertices.iter().all(|v| v.y < TOLERANCE));
    }
}

#[test]
fn cube_caps_close_the_cross_section() {
    let cube = build_cube();
    let (result, diagnostics) = cube
        .local_cut_with_diagnostics(&equator_plane(), TOLERANCE)
        .unwrap();

    assert_eq!(diagnostics.cap_loops.len(), 1);
    assert!(diagnostics.multi_loop_submeshes.is_empty());
    let cap_loop = &diagnostics.cap_loops[0];
    assert_eq!(cap_loop.len(), 8);

    // The loop is a closed star-shaped fan around its centroid: the fan
    // angles sum to a full turn.
    let centroid = Point3::from(
        cap_loop
            .iter()
            .map(|v| v.coords)
            .sum::<Vector3<f32>>()
            / cap_loop.len() as f32,
    );
    let mut angle_sum = 0.0;
    for i in 0..cap_loop.len() {
        let u = cap_loop[i] - centroid;
        let v = cap_loop[(i + 1) % cap_loop.len()] - centroid;
        angle_sum += u.angle(&v);
    }
    assert_relative_eq!(angle_sum, std::f32::consts::TAU, epsilon = 1.0e-4);

    if let CutResult::Pair(above, below) = result {
        let above_caps = cap_triangles(&above, &Vector3::y());
        let below_caps = cap_triangles(&below, &-Vector3::y());
        assert_eq!(above_caps.len(), 8);
        assert_eq!(below_caps.len(), 8);

        // The cap covers the full unit-square cross-section.
        let cap_area: f32 = above_caps
            .iter()
            .map(|[a, b, c]| (b - a).cross(&(c - a)).norm() / 2.0)
            .sum();
        assert_relative_eq!(cap_area, 1.0, epsilon = 1.0e-4);

        // Watertight along the boundary: every loop vertex is shared by
        // two consecutive fan triangles.
        for vertex in cap_loop {
            let incidences = above_caps
                .iter()
                .filter(|tri| tri.iter().any(|p| (p - vertex).norm() < TOLERANCE))
                .count();
            assert_eq!(incidences, 2);
        }

        // Cap windings face away from each other.
        for [a, b, c] in &above_caps {
            assert!((b - a).cross(&(c - a)).dot(&Vector3::y()) > 0.0);
        }
        for [a, b, c] in &below_caps {
            assert!((b - a).cross(&(c - a)).dot(&Vector3::y()) < 0.0);
        }
    }
}

#[test]
fn cube_triangle_count_follows_the_split_ratio() {
    let cube = build_cube();
    let result = cube.local_cut(&equator_plane(), TOLERANCE).unwrap();

    if let CutResult::Pair(above, below) = result {
        let caps = cap_triangles(&above, &Vector3::y()).len()
            + cap_triangles(&below, &-Vector3::y()).len();
        // 12 input triangles, 8 of which split 1:3.
        assert_eq!(
            above.num_triangles() + below.num_triangles() - caps,
            12 + 8 * 2
        );
    }
}

#[test]
fn submeshes_are_cut_and_reassembled_independently() {
    let cube = build_cube_two_submeshes();
    let (result, diagnostics) = cube
        .local_cut_with_diagnostics(&equator_plane(), TOLERANCE)
        .unwrap();

    assert!(matches!(result, CutResult::Pair(..)));
    if let CutResult::Pair(above, below) = result {
        assert_eq!(above.num_submeshes(), 2);
        assert_eq!(below.num_submeshes(), 2);

        // Sub-mesh 0 (the side walls) was split and capped; sub-mesh 1
        // contributed one whole horizontal face to each half.
        assert_eq!(above.submeshes[0].len() / 3, 4 * 3 + 8);
        assert_eq!(above.submeshes[1].len() / 3, 2);
        assert_eq!(below.submeshes[0].len() / 3, 4 * 3 + 8);
        assert_eq!(below.submeshes[1].len() / 3, 2);
    }

    // Only the side-wall sub-mesh produced a cut loop.
    assert_eq!(diagnostics.cap_loops.len(), 1);
}

#[test]
fn cube_cut_reports_no_anomalies() {
    let cube = build_cube();
    let (_, diagnostics) = cube
        .local_cut_with_diagnostics(&equator_plane(), TOLERANCE)
        .unwrap();

    assert!(!diagnostics.errored);
    assert!(diagnostics.winding_mismatch.is_none());
    assert!(diagnostics.missed_intersections.is_empty());
}
