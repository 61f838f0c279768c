/// Sparse vector sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    pub fn from_unsorted(mut entries: Vec<(u32, f32)>) -> Self {
        entries.sort_by_key(|(id, _)| *id);
        Self { entries }
    }

    pub fn entries(&self) -> &[(u32, f32)] { &self.entries }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn norm(&self) -> f32 { self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt() }

    pub fn normalized(self) -> Self {
        let norm = self.norm();
        if norm <= f32::EPSILON {
            return Self::default();
        }
        Self { entries: self.entries.into_iter().map(|(id, w)| (id, w / norm)).collect() }
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j, mut sum) = (0, 0, 0.0);
        while i < self.entries.len() && j < other.entries.len() {
            let (a, wa) = self.entries[i];
            let (b, wb) = other.entries[j];
            match a.cmp(&b) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wa * wb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity; 0 when either vector is empty.
    pub fn cosine(&self, other: &SparseVector) -> f32 {
        let denom = self.norm() * other.norm();
        if denom <= f32::EPSILON {
            return 0.0;
        }
        self.dot(other) / denom
    }
}
