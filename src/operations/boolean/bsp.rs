use crate::math::Point3;
use crate::solid::{Facet, Plane};

/// Thickness of a splitting plane. Vertices closer than this are coplanar.
const PLANE_EPSILON: f64 = 1e-5;

const COPLANAR: u8 = 0;
const FRONT: u8 = 1;
const BACK: u8 = 2;
const SPANNING: u8 = 3;

/// Facets sorted against one splitting plane.
#[derive(Debug, Default)]
struct Partition {
    coplanar_front: Vec<Facet>,
    coplanar_back: Vec<Facet>,
    front: Vec<Facet>,
    back: Vec<Facet>,
}

/// Sorts `facet` into `out`, cutting it in two when it spans the plane.
fn split_facet(plane: &Plane, facet: Facet, out: &mut Partition) {
    let kinds: Vec<u8> = facet
        .vertices
        .iter()
        .map(|v| {
            let t = plane.distance(v);
            if t < -PLANE_EPSILON {
                BACK
            } else if t > PLANE_EPSILON {
                FRONT
            } else {
                COPLANAR
            }
        })
        .collect();
    let kind = kinds.iter().fold(COPLANAR, |acc, k| acc | k);

    match kind {
        COPLANAR => {
            if plane.normal.dot(&facet.plane.normal) > 0.0 {
                out.coplanar_front.push(facet);
            } else {
                out.coplanar_back.push(facet);
            }
        }
        FRONT => out.front.push(facet),
        BACK => out.back.push(facet),
        _ => {
            let n = facet.vertices.len();
            let mut f: Vec<Point3> = Vec::with_capacity(n + 1);
            let mut b: Vec<Point3> = Vec::with_capacity(n + 1);
            for i in 0..n {
                let j = (i + 1) % n;
                let (ki, kj) = (kinds[i], kinds[j]);
                let (vi, vj) = (facet.vertices[i], facet.vertices[j]);
                if ki != BACK {
                    f.push(vi);
                }
                if ki != FRONT {
                    b.push(vi);
                }
                if ki | kj == SPANNING {
                    let di = plane.distance(&vi);
                    let dj = plane.distance(&vj);
                    let t = di / (di - dj);
                    let v = vi + (vj - vi) * t;
                    f.push(v);
                    b.push(v);
                }
            }
            if f.len() >= 3 {
                out.front.push(Facet::on_plane(f, facet.plane));
            }
            if b.len() >= 3 {
                out.back.push(Facet::on_plane(b, facet.plane));
            }
        }
    }
}

/// A binary space partitioning tree over the facets of one solid.
///
/// Each node splits space by the plane of its first facet; facets lying on
/// that plane are kept at the node. Front and back subtrees hold the rest.
#[derive(Debug, Default)]
pub struct BspNode {
    plane: Option<Plane>,
    facets: Vec<Facet>,
    front: Option<Box<BspNode>>,
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Builds a tree from a closed set of facets.
    #[must_use]
    pub fn new(facets: Vec<Facet>) -> Self {
        let mut node = Self::default();
        node.build(facets);
        node
    }

    /// Swaps solid space and empty space.
    pub fn invert(&mut self) {
        for facet in &mut self.facets {
            facet.flip();
        }
        if let Some(plane) = self.plane.as_mut() {
            *plane = plane.flipped();
        }
        if let Some(front) = self.front.as_mut() {
            front.invert();
        }
        if let Some(back) = self.back.as_mut() {
            back.invert();
        }
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Removes the parts of `facets` that lie inside this tree's solid.
    #[must_use]
    pub fn clip_facets(&self, facets: Vec<Facet>) -> Vec<Facet> {
        let Some(plane) = self.plane else {
            return facets;
        };
        let mut part = Partition::default();
        for facet in facets {
            split_facet(&plane, facet, &mut part);
        }
        let mut front = part.front;
        front.append(&mut part.coplanar_front);
        let mut back = part.back;
        back.append(&mut part.coplanar_back);

        let mut front = match &self.front {
            Some(node) => node.clip_facets(front),
            None => front,
        };
        let back = match &self.back {
            Some(node) => node.clip_facets(back),
            None => Vec::new(),
        };
        front.extend(back);
        front
    }

    /// Removes the parts of this tree's facets that lie inside `other`.
    pub fn clip_to(&mut self, other: &BspNode) {
        self.facets = other.clip_facets(std::mem::take(&mut self.facets));
        if let Some(front) = self.front.as_mut() {
            front.clip_to(other);
        }
        if let Some(back) = self.back.as_mut() {
            back.clip_to(other);
        }
    }

    /// Collects every facet in the tree.
    #[must_use]
    pub fn all_facets(&self) -> Vec<Facet> {
        let mut out = Vec::new();
        self.collect_into(&mut out);
        out
    }

    fn collect_into(&self, out: &mut Vec<Facet>) {
        out.extend(self.facets.iter().cloned());
        if let Some(front) = &self.front {
            front.collect_into(out);
        }
        if let Some(back) = &self.back {
            back.collect_into(out);
        }
    }

    /// Inserts facets into the tree, splitting them where needed.
    pub fn build(&mut self, facets: Vec<Facet>) {
        let Some(first) = facets.first() else {
            return;
        };
        let plane = *self.plane.get_or_insert(first.plane);
        let mut part = Partition::default();
        for facet in facets {
            split_facet(&plane, facet, &mut part);
        }
        self.facets.append(&mut part.coplanar_front);
        self.facets.append(&mut part.coplanar_back);
        if !part.front.is_empty() {
            self.front
                .get_or_insert_with(Box::default)
                .build(part.front);
        }
        if !part.back.is_empty() {
            self.back.get_or_insert_with(Box::default).build(part.back);
        }
    }
}
