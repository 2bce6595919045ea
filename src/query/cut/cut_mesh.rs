//! Plane-based bisection of an indexed triangle mesh.

use crate::math::{Real, Vector};
use crate::query::cut::cap;
use crate::query::cut::diagnostics::{CutDiagnostics, MissedIntersection, WindingMismatch};
use crate::shape::{CutPlane, IndexedMesh, MeshValidationError, VertexData};
use crate::utils::hashmap::{Entry, HashMap};
use arrayvec::ArrayVec;

/// Failure of a whole cut operation.
///
/// Recoverable anomalies (missed edge intersections, winding mismatches,
/// cap loops too small to stitch) never surface here; the cut degrades
/// gracefully and reports them through [`CutDiagnostics`].
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CutError {
    /// The input mesh failed validation; no output was produced.
    #[error("malformed input mesh: {0}")]
    MalformedInput(#[from] MeshValidationError),
}

/// The result of a plane-cutting operation.
#[derive(Clone, Debug)]
pub enum CutResult {
    /// The plane crossed the mesh. The first piece lies above the plane
    /// (the detached piece), the second below it (the remaining base).
    Pair(IndexedMesh, IndexedMesh),
    /// The mesh lies entirely on the positive side of the plane.
    Above,
    /// The mesh lies entirely on the negative side of the plane.
    Below,
}

impl IndexedMesh {
    /// Cuts this mesh by a plane expressed in its local space.
    ///
    /// Triangles crossing the plane are split along it, with vertex
    /// attributes interpolated at the cut; the open cross-section left on
    /// each piece is closed by a fan of cap triangles. Both returned meshes
    /// have the same sub-mesh count and order as `self`.
    ///
    /// `tolerance` controls the early-out test for planes that miss the
    /// mesh and the vertex-welding grid used during reassembly. Callers
    /// that transform a world-space plane into mesh-local space can use
    /// [`CutPlane::transform_by`]. See [`crate::math::DEFAULT_CUT_TOLERANCE`]
    /// for a reasonable default.
    ///
    /// # Result
    /// [`CutResult::Pair`] if the plane crossed the mesh, otherwise
    /// [`CutResult::Above`]/[`CutResult::Below`]. The only error is
    /// [`CutError::MalformedInput`], raised before any output is built.
    pub fn local_cut(&self, plane: &CutPlane, tolerance: Real) -> Result<CutResult, CutError> {
        self.local_cut_with_diagnostics(plane, tolerance)
            .map(|(result, _)| result)
    }

    /// Cuts this mesh by a plane, also returning the cut's diagnostics.
    ///
    /// The diagnostics record the plane, every recoverable anomaly and the
    /// ordered cap loops; they are meant for visualization and tooling and
    /// are never required for correct operation.
    pub fn local_cut_with_diagnostics(
        &self,
        plane: &CutPlane,
        tolerance: Real,
    ) -> Result<(CutResult, CutDiagnostics), CutError> {
        self.validate()?;

        let mut diagnostics = CutDiagnostics::new(*plane);

        // 1. Classify the vertex buffer; exit early if the plane misses the
        //    mesh entirely.
        let mut found_above = false;
        let mut found_below = false;
        for point in &self.vertices {
            let dist = plane.signed_distance(point);
            if dist > tolerance {
                found_above = true;
            } else if dist < -tolerance {
                found_below = true;
            }
        }

        if !found_below {
            return Ok((CutResult::Above, diagnostics));
        }
        if !found_above {
            return Ok((CutResult::Below, diagnostics));
        }

        // 2. Split every sub-mesh and stitch its cross-section closed.
        let mut above_buckets = Vec::with_capacity(self.num_submeshes());
        let mut below_buckets = Vec::with_capacity(self.num_submeshes());

        for submesh in 0..self.num_submeshes() {
            let (mut above, mut below, cut_edges) =
                self.split_submesh(submesh, plane, &mut diagnostics);

            let stitched = cap::stitch_caps(&cut_edges, plane, tolerance, &mut above, &mut below);
            if stitched.loops.len() > 1 {
                log::warn!(
                    "the cross-section of sub-mesh {} consists of {} disjoint loops",
                    submesh,
                    stitched.loops.len()
                );
                diagnostics.multi_loop_submeshes.push(submesh);
            }
            diagnostics.cap_loops.extend(stitched.loops);

            above_buckets.push(above);
            below_buckets.push(below);
        }

        // The vertex scan can pass while every triangle still lands on one
        // side (e.g. stray vertices referenced by no triangle).
        if above_buckets.iter().all(|bucket| bucket.is_empty()) {
            return Ok((CutResult::Below, diagnostics));
        }
        if below_buckets.iter().all(|bucket| bucket.is_empty()) {
            return Ok((CutResult::Above, diagnostics));
        }

        // 3. Reassemble one indexed mesh per side.
        let above_mesh = assemble_mesh(&above_buckets, tolerance);
        let below_mesh = assemble_mesh(&below_buckets, tolerance);
        Ok((CutResult::Pair(above_mesh, below_mesh), diagnostics))
    }

    /// Routes the triangles of one sub-mesh to the two side buckets,
    /// splitting the ones crossing the plane and collecting one cut-edge
    /// pair per split.
    fn split_submesh(
        &self,
        submesh: usize,
        plane: &CutPlane,
        diagnostics: &mut CutDiagnostics,
    ) -> (Vec<VertexData>, Vec<VertexData>, Vec<(VertexData, VertexData)>) {
        let mut above = Vec::new();
        let mut below = Vec::new();
        let mut cut_edges = Vec::new();

        for [ia, ib, ic] in self.submesh_triangles(submesh) {
            let corners = [
                self.vertex_data(ia),
                self.vertex_data(ib),
                self.vertex_data(ic),
            ];
            let sides = [
                plane.is_above(&corners[0].position),
                plane.is_above(&corners[1].position),
                plane.is_above(&corners[2].position),
            ];

            if sides[0] == sides[1] && sides[1] == sides[2] {
                let bucket = if sides[0] { &mut above } else { &mut below };
                bucket.extend_from_slice(&corners);
                continue;
            }

            // Exactly one corner is alone on its side of the plane. The
            // other two keep their encounter order so the intersection
            // points stay matched to them.
            let lone_is_above = sides.iter().filter(|side| **side).count() == 1;
            let mut lone = 0;
            let mut pair = ArrayVec::<usize, 2>::new();
            for (corner, side) in sides.iter().enumerate() {
                if *side == lone_is_above {
                    lone = corner;
                } else {
                    pair.push(corner);
                }
            }

            let x = corners[lone];
            let y1 = corners[pair[0]];
            let y2 = corners[pair[1]];

            let i1 = split_edge_vertex(plane, &x, &y1, submesh, diagnostics);
            let i2 = split_edge_vertex(plane, &x, &y2, submesh, diagnostics);

            let reference = scaled_normal(&corners);
            let (lone_bucket, pair_bucket) = if lone_is_above {
                (&mut above, &mut below)
            } else {
                (&mut below, &mut above)
            };

            // The tip triangle keeps the lone corner; the other side gets
            // the remaining quad as two triangles.
            let mut tip = [x, i2, i1];
            enforce_winding(&mut tip, &reference, submesh, &corners, sides, diagnostics);
            lone_bucket.extend_from_slice(&tip);

            let mut quad_first = [y1, i1, i2];
            enforce_winding(
                &mut quad_first,
                &reference,
                submesh,
                &corners,
                sides,
                diagnostics,
            );
            pair_bucket.extend_from_slice(&quad_first);

            let mut quad_second = [y2, y1, i2];
            enforce_winding(
                &mut quad_second,
                &reference,
                submesh,
                &corners,
                sides,
                diagnostics,
            );
            pair_bucket.extend_from_slice(&quad_second);

            cut_edges.push((i1, i2));
        }

        (above, below, cut_edges)
    }
}

/// The scaled normal of a triangle: `cross(b - a, c - a)`.
#[inline]
fn scaled_normal(triangle: &[VertexData; 3]) -> Vector<Real> {
    (triangle[1].position - triangle[0].position)
        .cross(&(triangle[2].position - triangle[0].position))
}

/// The interpolated vertex where the plane crosses the edge from `lone` to
/// `other`.
///
/// If the intersection cannot be computed the edge midpoint is substituted
/// so a single bad edge does not abort the whole cut.
fn split_edge_vertex(
    plane: &CutPlane,
    lone: &VertexData,
    other: &VertexData,
    submesh: usize,
    diagnostics: &mut CutDiagnostics,
) -> VertexData {
    match plane.intersect_segment(&lone.position, &other.position) {
        Some((_, t)) => lone.lerp(other, t),
        None => {
            log::error!(
                "no plane intersection found on the edge from {:?} to {:?}",
                lone.position,
                other.position
            );
            diagnostics.errored = true;
            diagnostics.missed_intersections.push(MissedIntersection {
                submesh,
                start: lone.position,
                end: other.position,
            });
            lone.lerp(other, 0.5)
        }
    }
}

/// Makes the winding of `triangle` agree with the `reference` scaled normal
/// of its source triangle, flipping once if needed.
///
/// If the flipped winding still disagrees, the triangle is kept as-is and
/// the mismatch is recorded: one malformed triangle must not abort the cut.
fn enforce_winding(
    triangle: &mut [VertexData; 3],
    reference: &Vector<Real>,
    submesh: usize,
    source: &[VertexData; 3],
    sides: [bool; 3],
    diagnostics: &mut CutDiagnostics,
) {
    let first = scaled_normal(triangle);
    if first.dot(reference) > 0.0 {
        return;
    }

    triangle.swap(1, 2);

    let flipped = scaled_normal(triangle);
    if flipped.dot(reference) < 0.0 {
        log::error!(
            "winding enforcement failed: source cross {:?}, emitted cross {:?}, flipped cross {:?}",
            reference,
            first,
            flipped
        );
        diagnostics.errored = true;
        if diagnostics.winding_mismatch.is_none() {
            diagnostics.winding_mismatch = Some(WindingMismatch {
                submesh,
                triangle: [
                    source[0].position,
                    source[1].position,
                    source[2].position,
                ],
                sides,
                sub_triangle: [
                    triangle[0].position,
                    triangle[1].position,
                    triangle[2].position,
                ],
                original_cross: *reference,
                first_cross: first,
                flipped_cross: flipped,
            });
        }
    }
}

/// Flattens per-sub-mesh triangle buckets into one indexed mesh, welding
/// vertices whose attribute tuples agree within the tolerance grid.
fn assemble_mesh(buckets: &[Vec<VertexData>], tolerance: Real) -> IndexedMesh {
    let mut vertices = Vec::new();
    let mut uvs = Vec::new();
    let mut normals = Vec::new();
    let mut vertex_indices = HashMap::new();
    let mut submeshes = Vec::with_capacity(buckets.len());

    for bucket in buckets {
        let mut indices = Vec::with_capacity(bucket.len());

        for vertex in bucket {
            let index = match vertex_indices.entry(vertex.quantized(tolerance)) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    vertices.push(vertex.position);
                    uvs.push(vertex.uv);
                    normals.push(vertex.normal);
                    *entry.insert(vertices.len() as u32 - 1)
                }
            };
            indices.push(index);
        }

        submeshes.push(indices);
    }

    IndexedMesh {
        vertices,
        uvs,
        normals,
        submeshes,
    }
}
