// Hierarchical clustering primitives.
//
// Cosine distances between feature vectors, average-linkage (UPGMA)
// agglomeration into a dendrogram, and the two flat cuts the community
// detector chooses between: by distance threshold or by cluster count.
//
// Dendrogram node ids follow the usual linkage-matrix convention: leaves are
// 0..n, and the cluster created by merge step i gets id n + i.

/// Cosine distance `1 - cos(a, b)` in [0, 2].
///
/// A zero vector has no direction: two zero vectors are at distance 0,
/// a zero vector and a non-zero one at distance 1.
pub fn cosine_distance(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let mag_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    match (mag_a < f64::EPSILON, mag_b < f64::EPSILON) {
        (true, true) => 0.0,
        (true, false) | (false, true) => 1.0,
        (false, false) => (1.0 - dot / (mag_a * mag_b)).clamp(0.0, 2.0),
    }
}

/// Symmetric matrix of pairwise cosine distances with a zero diagonal.
pub fn pairwise_cosine(vectors: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let n = vectors.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let d = cosine_distance(&vectors[i], &vectors[j]);
            matrix[i][j] = d;
            matrix[j][i] = d;
        }
    }
    matrix
}

/// One agglomeration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Merge {
    /// Smaller of the two merged node ids
    pub left: usize,
    /// Larger of the two merged node ids
    pub right: usize,
    /// Average-linkage distance at which the merge happened
    pub distance: f64,
    /// Number of leaves in the new cluster
    pub size: usize,
}

/// Merge history over `n_leaves` observations (`n_leaves - 1` merges).
#[derive(Debug, Clone, PartialEq)]
pub struct Dendrogram {
    n_leaves: usize,
    merges: Vec<Merge>,
}

impl Dendrogram {
    /// Average-linkage agglomerative clustering over a distance matrix.
    ///
    /// At every step the closest pair of active clusters is merged; ties go
    /// to the lowest slot indices so the result is deterministic. Average
    /// linkage is monotone, so merge distances never decrease.
    pub fn average_linkage(distances: &[Vec<f64>]) -> Self {
        let n = distances.len();
        let mut dist: Vec<Vec<f64>> = distances.to_vec();
        let mut active = vec![true; n];
        let mut node_id: Vec<usize> = (0..n).collect();
        let mut size = vec![1usize; n];
        let mut merges = Vec::with_capacity(n.saturating_sub(1));

        for step in 0..n.saturating_sub(1) {
            let mut best: Option<(usize, usize, f64)> = None;
            for i in 0..n {
                if !active[i] {
                    continue;
                }
                for j in (i + 1)..n {
                    if !active[j] {
                        continue;
                    }
                    if best.map_or(true, |(_, _, d)| dist[i][j] < d) {
                        best = Some((i, j, dist[i][j]));
                    }
                }
            }
            let Some((i, j, d)) = best else {
                break;
            };

            merges.push(Merge {
                left: node_id[i].min(node_id[j]),
                right: node_id[i].max(node_id[j]),
                distance: d,
                size: size[i] + size[j],
            });

            // Slot i becomes the merged cluster; slot j retires.
            let (wi, wj) = (size[i] as f64, size[j] as f64);
            for k in 0..n {
                if k == i || k == j || !active[k] {
                    continue;
                }
                let merged = (wi * dist[i][k] + wj * dist[j][k]) / (wi + wj);
                dist[i][k] = merged;
                dist[k][i] = merged;
            }
            size[i] += size[j];
            active[j] = false;
            node_id[i] = n + step;
        }

        Self { n_leaves: n, merges }
    }

    pub fn n_leaves(&self) -> usize {
        self.n_leaves
    }

    pub fn merges(&self) -> &[Merge] {
        &self.merges
    }

    pub fn merge_distances(&self) -> Vec<f64> {
        self.merges.iter().map(|m| m.distance).collect()
    }

    /// Flat clusters where every merge at or below `threshold` is applied.
    /// Labels start at 1.
    pub fn cut_at_distance(&self, threshold: f64) -> Vec<usize> {
        let applied = self
            .merges
            .iter()
            .take_while(|m| m.distance <= threshold)
            .count();
        self.labels_after(applied)
    }

    /// Exactly `k` flat clusters (clamped to 1..=n_leaves), obtained by
    /// undoing the last `k - 1` merges. Labels start at 1.
    pub fn cut_into(&self, k: usize) -> Vec<usize> {
        let k = k.clamp(1, self.n_leaves.max(1));
        let applied = self.n_leaves.saturating_sub(k).min(self.merges.len());
        self.labels_after(applied)
    }

    /// Cluster labels after applying the first `applied` merges.
    ///
    /// Labels are numbered in order of each cluster's first leaf, so leaf 0
    /// is always in cluster 1.
    fn labels_after(&self, applied: usize) -> Vec<usize> {
        let n = self.n_leaves;
        let mut parent: Vec<usize> = (0..n).collect();
        // Any leaf inside each dendrogram node, indexed by node id
        let mut representative: Vec<usize> = (0..n).collect();

        for merge in &self.merges[..applied] {
            let a = find(&mut parent, representative[merge.left]);
            let b = find(&mut parent, representative[merge.right]);
            let (root, child) = if a <= b { (a, b) } else { (b, a) };
            parent[child] = root;
            representative.push(root);
        }

        let mut label_of_root: Vec<usize> = vec![0; n];
        let mut next = 0;
        (0..n)
            .map(|leaf| {
                let root = find(&mut parent, leaf);
                if label_of_root[root] == 0 {
                    next += 1;
                    label_of_root[root] = next;
                }
                label_of_root[root]
            })
            .collect()
    }
}

fn find(parent: &mut [usize], mut x: usize) -> usize {
    while parent[x] != x {
        parent[x] = parent[parent[x]];
        x = parent[x];
    }
    x
}

/// Percentile with linear interpolation between closest ranks.
/// Returns 0.0 for an empty slice.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

/// Number of distinct labels.
pub fn count_clusters(labels: &[usize]) -> usize {
    let mut distinct = labels.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    distinct.len()
}
