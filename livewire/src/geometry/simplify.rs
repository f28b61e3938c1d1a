use super::math::perpendicular_distance;
use crate::model::Vec2;

/// Ramer–Douglas–Peucker over an open run; returns the indexes kept
/// (always including both endpoints), in order.
pub fn douglas_peucker(points: &[Vec2], epsilon: f32) -> Vec<usize> {
    let n = points.len();
    if n <= 2 {
        return (0..n).collect();
    }
    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;
    // explicit stack instead of recursion; long traced runs can be thousands of points
    let mut stack = vec![(0usize, n - 1)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let mut max_d = 0.0f32;
        let mut max_i = start;
        for i in start + 1..end {
            let d = perpendicular_distance(points[i], points[start], points[end]);
            if d > max_d {
                max_d = d;
                max_i = i;
            }
        }
        if max_d > epsilon {
            keep[max_i] = true;
            stack.push((start, max_i));
            stack.push((max_i, end));
        }
    }
    keep.iter()
        .enumerate()
        .filter_map(|(i, k)| if *k { Some(i) } else { None })
        .collect()
}

/// Simplify a closed ring run-by-run between handle indexes so that every
/// handle survives. `handles` must be sorted ascending and index into `ring`
/// (no closing duplicate). Returns the simplified ring, which starts at
/// `ring[handles[0]]`, and the new handle indexes.
pub fn decimate_between_handles(ring: &[Vec2], handles: &[usize], epsilon: f32) -> (Vec<Vec2>, Vec<usize>) {
    if ring.len() < 3 || handles.is_empty() || epsilon <= 0.0 {
        return (ring.to_vec(), handles.to_vec());
    }
    let n = ring.len();
    let mut out: Vec<Vec2> = Vec::with_capacity(n);
    let mut out_handles = Vec::with_capacity(handles.len());
    // only the last run wraps past the end of the ring
    for (k, &h) in handles.iter().enumerate() {
        let next = if k + 1 < handles.len() { handles[k + 1] } else { handles[0] + n };
        let run: Vec<Vec2> = (h..=next).map(|i| ring[i % n]).collect();
        let kept = douglas_peucker(&run, epsilon);
        out_handles.push(out.len());
        for &i in &kept[..kept.len() - 1] {
            out.push(run[i]);
        }
    }
    (out, out_handles)
}
