//! Cap stitching: closing the cross-section left by a cut.

use crate::math::{Point, Point2, Real, Vector};
use crate::shape::{CutPlane, QuantizedVertex, VertexData};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::hashset::HashSet;
use num::Zero;

/// The ordered boundary loops reconstructed for one sub-mesh.
pub(crate) struct StitchedCaps {
    /// The ordered loop vertices, one entry per reconstructed loop.
    pub loops: Vec<Vec<Point<Real>>>,
}

fn intern(
    vertex: &VertexData,
    tolerance: Real,
    node_ids: &mut HashMap<QuantizedVertex, usize>,
    nodes: &mut Vec<VertexData>,
) -> usize {
    match node_ids.entry(vertex.quantized(tolerance)) {
        Entry::Occupied(entry) => *entry.get(),
        Entry::Vacant(entry) => {
            nodes.push(*vertex);
            *entry.insert(nodes.len() - 1)
        }
    }
}

/// Reconstructs the boundary loop(s) described by the unordered cut-edge
/// `pairs` and appends a centroid fan for both sides of the plane.
///
/// Cap triangles take the plane's normal (above side) or its opposite
/// (below side) as their vertex normal, a flat-fill `(0.5, 0.5)` UV, and a
/// winding consistent with that normal. A component with fewer than 3
/// distinct vertices produces no cap.
pub(crate) fn stitch_caps(
    pairs: &[(VertexData, VertexData)],
    plane: &CutPlane,
    tolerance: Real,
    above: &mut Vec<VertexData>,
    below: &mut Vec<VertexData>,
) -> StitchedCaps {
    let mut stitched = StitchedCaps { loops: Vec::new() };
    if pairs.is_empty() {
        return stitched;
    }

    // The pairs are the edges of an undirected graph over the distinct
    // (tolerance-quantized) intersection vertices.
    let mut node_ids = HashMap::new();
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut seen_edges = HashSet::new();

    for (first, second) in pairs {
        let a = intern(first, tolerance, &mut node_ids, &mut nodes);
        let b = intern(second, tolerance, &mut node_ids, &mut nodes);

        // A pair collapsing to a single node comes from a degenerate split.
        if a != b && seen_edges.insert((a.min(b), a.max(b))) {
            edges.push((a, b));
        }
    }

    let mut adjacency = vec![Vec::new(); nodes.len()];
    for (a, b) in edges {
        adjacency[a].push(b);
        adjacency[b].push(a);
    }

    let mut visited = vec![false; nodes.len()];

    for start in 0..nodes.len() {
        if visited[start] || adjacency[start].is_empty() {
            continue;
        }

        // Follow unvisited neighbors until the walk closes back on itself.
        let mut cycle = Vec::new();
        let mut current = start;
        loop {
            visited[current] = true;
            cycle.push(current);

            match adjacency[current].iter().copied().find(|&n| !visited[n]) {
                Some(next) => current = next,
                None => break,
            }
        }

        if cycle.len() < 3 {
            log::debug!(
                "skipping cap component with only {} distinct vertices",
                cycle.len()
            );
            continue;
        }

        let mut sum = Vector::zero();
        for &id in &cycle {
            sum += nodes[id].position.coords;
        }
        let centroid = Point::from(sum / cycle.len() as Real);

        let up = *plane.normal;
        let cap_uv = Point2::new(0.5, 0.5);

        for i in 0..cycle.len() {
            let v1 = nodes[cycle[i]].position;
            let v2 = nodes[cycle[(i + 1) % cycle.len()]].position;

            // Orient the fan triangle so its face normal matches the cap's
            // vertex normal on each side.
            let cross = (centroid - v1).cross(&(v2 - v1));
            let (head, tail) = if cross.dot(&up) >= 0.0 {
                (v1, v2)
            } else {
                (v2, v1)
            };

            above.extend_from_slice(&[
                VertexData::new(head, cap_uv, up),
                VertexData::new(centroid, cap_uv, up),
                VertexData::new(tail, cap_uv, up),
            ]);
            below.extend_from_slice(&[
                VertexData::new(tail, cap_uv, -up),
                VertexData::new(centroid, cap_uv, -up),
                VertexData::new(head, cap_uv, -up),
            ]);
        }

        stitched
            .loops
            .push(cycle.iter().map(|&id| nodes[id].position).collect());
    }

    stitched
}
