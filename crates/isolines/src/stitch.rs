//! Incremental stitching of cell segments into polylines.
//!
//! Segments arrive in cell-scan order, so one contour can be assembled from
//! fragments that start far apart and only meet much later in the scan. The
//! stitcher keeps every open chain's two free extremities in a spatial hash
//! keyed on quantized coordinates, which makes each arrival a constant-time
//! lookup instead of a scan over all chains.

use std::collections::{HashMap, VecDeque};

use isoline_common::Point;

use crate::types::{Polyline, Segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Head,
    Tail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EndRef {
    chain: usize,
    end: End,
}

#[derive(Debug)]
struct Chain {
    points: VecDeque<Point>,
    closed: bool,
}

impl Chain {
    fn endpoint(&self, end: End) -> Option<Point> {
        match end {
            End::Head => self.points.front().copied(),
            End::Tail => self.points.back().copied(),
        }
    }

    fn reverse(&mut self) {
        self.points.make_contiguous().reverse();
    }
}

/// Folds segments into the minimal set of open and closed polylines.
#[derive(Debug)]
pub struct LineStitcher {
    epsilon: f64,
    bucket_size: f64,
    /// Chains in creation order; merged-away chains leave a `None`.
    chains: Vec<Option<Chain>>,
    ends: HashMap<(i64, i64), Vec<EndRef>>,
    segments: usize,
    degenerate: usize,
}

impl LineStitcher {
    /// Create a stitcher that treats points within `epsilon` as identical.
    ///
    /// A zero, negative or non-finite `epsilon` is replaced by
    /// [`f64::EPSILON`] with a warning. That is an absolute tolerance, so
    /// away from the origin it only matches bit-identical points.
    pub fn new(epsilon: f64) -> Self {
        let epsilon = if epsilon > 0.0 && epsilon.is_finite() {
            epsilon
        } else {
            tracing::warn!(
                epsilon = epsilon,
                fallback = f64::EPSILON,
                "Invalid stitch tolerance, falling back to machine epsilon"
            );
            f64::EPSILON
        };
        Self {
            epsilon,
            // Twice epsilon keeps any two matching points in adjacent buckets.
            bucket_size: epsilon * 2.0,
            chains: Vec::new(),
            ends: HashMap::new(),
            segments: 0,
            degenerate: 0,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Segments accepted so far, excluding zero-length ones.
    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// Zero-length segments dropped so far.
    pub fn degenerate_count(&self) -> usize {
        self.degenerate
    }

    /// Number of chains still accepting segments.
    pub fn open_count(&self) -> usize {
        self.chains
            .iter()
            .flatten()
            .filter(|c| !c.closed)
            .count()
    }

    pub fn add_segment(&mut self, segment: Segment) {
        let (a, b) = (segment.start, segment.end);
        if a.approx_eq(&b, self.epsilon) {
            self.degenerate += 1;
            return;
        }
        self.segments += 1;

        let at_a = self.find_open_end(&a, None);
        let at_b = self.find_open_end(&b, at_a);

        match (at_a, at_b) {
            (None, None) => self.start_chain(a, b),
            (Some(end), None) => self.extend(end, b),
            (None, Some(end)) => self.extend(end, a),
            (Some(ea), Some(eb)) if ea.chain == eb.chain => self.close(ea.chain),
            (Some(ea), Some(eb)) => self.merge(ea, eb),
        }
    }

    /// Consume the stitcher, returning polylines ordered by the scan position
    /// of their first segment.
    pub fn finish(self) -> Vec<Polyline> {
        self.chains
            .into_iter()
            .flatten()
            .map(|c| Polyline::new(Vec::from(c.points), c.closed))
            .collect()
    }

    fn key(&self, p: &Point) -> (i64, i64) {
        (
            (p.x / self.bucket_size).round() as i64,
            (p.y / self.bucket_size).round() as i64,
        )
    }

    fn find_open_end(&self, p: &Point, exclude: Option<EndRef>) -> Option<EndRef> {
        let (kx, ky) = self.key(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = self.ends.get(&(kx + dx, ky + dy)) else {
                    continue;
                };
                for &r in bucket {
                    if Some(r) == exclude {
                        continue;
                    }
                    let Some(chain) = self.chains[r.chain].as_ref() else {
                        continue;
                    };
                    if chain.closed {
                        continue;
                    }
                    if let Some(q) = chain.endpoint(r.end) {
                        if q.approx_eq(p, self.epsilon) {
                            return Some(r);
                        }
                    }
                }
            }
        }
        None
    }

    fn index(&mut self, r: EndRef, p: &Point) {
        let key = self.key(p);
        self.ends.entry(key).or_default().push(r);
    }

    fn unindex(&mut self, r: EndRef, p: &Point) {
        let key = self.key(p);
        if let Some(bucket) = self.ends.get_mut(&key) {
            bucket.retain(|e| *e != r);
            if bucket.is_empty() {
                self.ends.remove(&key);
            }
        }
    }

    fn index_chain(&mut self, chain: usize) {
        let Some(c) = self.chains[chain].as_ref() else {
            return;
        };
        let (head, tail) = (c.endpoint(End::Head), c.endpoint(End::Tail));
        if let Some(p) = head {
            self.index(EndRef { chain, end: End::Head }, &p);
        }
        if let Some(p) = tail {
            self.index(EndRef { chain, end: End::Tail }, &p);
        }
    }

    fn unindex_chain(&mut self, chain: usize) {
        let Some(c) = self.chains[chain].as_ref() else {
            return;
        };
        let (head, tail) = (c.endpoint(End::Head), c.endpoint(End::Tail));
        if let Some(p) = head {
            self.unindex(EndRef { chain, end: End::Head }, &p);
        }
        if let Some(p) = tail {
            self.unindex(EndRef { chain, end: End::Tail }, &p);
        }
    }

    fn start_chain(&mut self, a: Point, b: Point) {
        let chain = self.chains.len();
        self.chains.push(Some(Chain {
            points: VecDeque::from(vec![a, b]),
            closed: false,
        }));
        self.index_chain(chain);
    }

    /// Attach `p` beyond the matched extremity `end`.
    fn extend(&mut self, end: EndRef, p: Point) {
        let Some(old) = self.chains[end.chain].as_ref().and_then(|c| c.endpoint(end.end)) else {
            return;
        };
        self.unindex(end, &old);
        if let Some(chain) = self.chains[end.chain].as_mut() {
            match end.end {
                End::Head => chain.points.push_front(p),
                End::Tail => chain.points.push_back(p),
            }
        }
        self.index(end, &p);
        self.close_if_looped(end.chain);
    }

    /// The new segment bridges the chain's own head and tail.
    fn close(&mut self, chain: usize) {
        self.unindex_chain(chain);
        if let Some(c) = self.chains[chain].as_mut() {
            if let Some(head) = c.points.front().copied() {
                c.points.push_back(head);
            }
            c.closed = true;
        }
    }

    /// Join two different chains through the new segment. The result keeps
    /// the slot of whichever chain was started first.
    fn merge(&mut self, ea: EndRef, eb: EndRef) {
        self.unindex_chain(ea.chain);
        self.unindex_chain(eb.chain);
        let (Some(mut first), Some(mut second)) =
            (self.chains[ea.chain].take(), self.chains[eb.chain].take())
        else {
            return;
        };

        // first ... a | b ... second
        if ea.end == End::Head {
            first.reverse();
        }
        if eb.end == End::Tail {
            second.reverse();
        }
        first.points.extend(second.points);

        let keep = ea.chain.min(eb.chain);
        self.chains[keep] = Some(first);
        self.index_chain(keep);
        self.close_if_looped(keep);
    }

    fn close_if_looped(&mut self, chain: usize) {
        let looped = match self.chains[chain].as_ref() {
            Some(c) if !c.closed && c.points.len() > 3 => {
                match (c.endpoint(End::Head), c.endpoint(End::Tail)) {
                    (Some(h), Some(t)) => h.approx_eq(&t, self.epsilon),
                    _ => false,
                }
            }
            _ => false,
        };
        if looped {
            self.unindex_chain(chain);
            if let Some(c) = self.chains[chain].as_mut() {
                c.closed = true;
            }
        }
    }
}
