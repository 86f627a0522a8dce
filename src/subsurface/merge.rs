use slotmap::SlotMap;

use crate::error::SubSurfaceError;
use crate::math::intersect_3d::are_points_close;

use super::SubSurfacePoint;

slotmap::new_key_type! {
    /// Key of a seam point in a [`SeamStore`].
    pub struct SeamKey;
}

#[derive(Debug, Clone)]
struct SeamEntry {
    point: SubSurfacePoint,
    twin: Option<SeamKey>,
}

/// Arena of detected seam points with their twin links.
///
/// Twin links are kept as keys while merging and only written back as ids
/// by [`SeamStore::into_points`].
#[derive(Debug, Clone, Default)]
pub struct SeamStore {
    entries: SlotMap<SeamKey, SeamEntry>,
}

impl SeamStore {
    /// Creates a store from twin pairs.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = [SubSurfacePoint; 2]>) -> Self {
        let mut entries = SlotMap::with_key();
        for [p, q] in pairs {
            let pk = entries.insert(SeamEntry {
                point: p,
                twin: None,
            });
            let qk = entries.insert(SeamEntry {
                point: q,
                twin: Some(pk),
            });
            if let Some(entry) = entries.get_mut(pk) {
                entry.twin = Some(qk);
            }
        }
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Twin of the point under `key`.
    #[must_use]
    pub fn twin(&self, key: SeamKey) -> Option<SeamKey> {
        self.entries.get(key).and_then(|e| e.twin)
    }

    /// Runs merge passes until no two pairs share a point, returning the
    /// number of merges.
    ///
    /// A pass first drops one pair whose two points both lie within
    /// `epsilon` of another pair's points, as when two triangle pairs see
    /// the same seam segment. Only when no such duplicate is left does it
    /// join a chain: a point `a` with twin `b`, and another point `c`
    /// within `epsilon` of `b`. `b` and `c` are removed and `a` is relinked
    /// with the twin of `c`.
    ///
    /// # Errors
    ///
    /// Returns [`SubSurfaceError::MergeDidNotConverge`] if a fixpoint is not
    /// reached within `max_passes`. Merges done so far are kept.
    pub fn merge(&mut self, epsilon: f64, max_passes: usize) -> Result<usize, SubSurfaceError> {
        for merges in 0..max_passes {
            if !self.merge_once(epsilon) {
                return Ok(merges);
            }
        }
        Err(SubSurfaceError::MergeDidNotConverge { passes: max_passes })
    }

    fn merge_once(&mut self, epsilon: f64) -> bool {
        if let Some((c, d)) = self.find_duplicate(epsilon) {
            self.entries.remove(c);
            self.entries.remove(d);
            return true;
        }
        let Some((a, b, c)) = self.find_chain(epsilon) else {
            return false;
        };
        let d = self.twin(c).filter(|&d| d != a && d != b);
        self.entries.remove(b);
        self.entries.remove(c);

        if let Some(entry) = self.entries.get_mut(a) {
            entry.twin = d;
        }
        if let Some(entry) = d.and_then(|d| self.entries.get_mut(d)) {
            entry.twin = Some(a);
        }
        true
    }

    fn close(&self, p: SeamKey, q: SeamKey, epsilon: f64) -> bool {
        match (self.entries.get(p), self.entries.get(q)) {
            (Some(p), Some(q)) => are_points_close(&p.point.coords, &q.point.coords, epsilon),
            _ => false,
        }
    }

    /// Another pair `c ↔ d` covering the same span as a pair `a ↔ b`.
    fn find_duplicate(&self, epsilon: f64) -> Option<(SeamKey, SeamKey)> {
        self.entries.iter().find_map(|(a, entry)| {
            let b = entry.twin?;
            self.entries
                .iter()
                .filter(|&(c, _)| c != a && c != b)
                .find_map(|(c, other)| {
                    let d = other.twin.filter(|&d| d != a && d != b)?;
                    let same = (self.close(a, c, epsilon) && self.close(b, d, epsilon))
                        || (self.close(a, d, epsilon) && self.close(b, c, epsilon));
                    same.then_some((c, d))
                })
        })
    }

    fn find_chain(&self, epsilon: f64) -> Option<(SeamKey, SeamKey, SeamKey)> {
        self.entries.iter().find_map(|(a, entry)| {
            let b = entry.twin?;
            let twin = self.entries.get(b)?;
            let (c, _) = self.entries.iter().find(|&(c, other)| {
                c != a
                    && c != b
                    && are_points_close(&twin.point.coords, &other.point.coords, epsilon)
            })?;
            Some((a, b, c))
        })
    }

    /// Consumes the store, writing twin links back as ids, in detection
    /// order.
    #[must_use]
    pub fn into_points(self) -> Vec<SubSurfacePoint> {
        let links: Vec<Option<(String, String)>> = self
            .entries
            .values()
            .map(|entry| {
                let twin = self.entries.get(entry.twin?)?;
                Some((twin.point.id.clone(), twin.point.knot_id.clone()))
            })
            .collect();

        self.entries
            .into_iter()
            .zip(links)
            .map(|((_, entry), link)| {
                let mut point = entry.point;
                if let Some(si) = point.surface_intersection.as_mut() {
                    let (id, knot) = link.unzip();
                    si.twin_point_id = id;
                    si.twin_knot_id = knot;
                }
                point
            })
            .collect()
    }
}
