//! Batched 3-vectors.
//!
//! A `Vec3Batch` holds one vector per ray. Every operation is elementwise and
//! returns a new batch, so a whole frame of rays moves through the tracer
//! without per-ray branching. Partial results (the rays that hit a given
//! primitive, say) are compressed with [`Vec3Batch::extract`] and scattered
//! back into the full frame with [`Vec3Batch::place`].

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use glam::DVec3;

/// A batch of N 3-vectors.
///
/// The x, y and z sequences always share the same length because each entry
/// is stored as one `DVec3`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vec3Batch {
    items: Vec<DVec3>,
}

impl Vec3Batch {
    /// Create a batch from a list of vectors.
    pub fn new(items: Vec<DVec3>) -> Self {
        Self { items }
    }

    /// Create a batch with `len` copies of `v`.
    pub fn splat(v: DVec3, len: usize) -> Self {
        Self {
            items: vec![v; len],
        }
    }

    /// Create a batch of `len` zero vectors.
    pub fn zeros(len: usize) -> Self {
        Self::splat(DVec3::ZERO, len)
    }

    /// Number of vectors in the batch.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the batch holds no vectors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Vector at index `i`.
    #[inline]
    pub fn get(&self, i: usize) -> DVec3 {
        self.items[i]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DVec3> {
        self.items.iter()
    }

    /// Apply `f` to every vector.
    pub fn map(&self, f: impl Fn(DVec3) -> DVec3) -> Self {
        Self {
            items: self.items.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two equal-length batches entry by entry.
    pub fn zip_map(&self, other: &Self, f: impl Fn(DVec3, DVec3) -> DVec3) -> Self {
        assert_eq!(self.len(), other.len(), "batch lengths differ");
        Self {
            items: self
                .items
                .iter()
                .zip(&other.items)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Per-entry dot product.
    pub fn dot(&self, other: &Self) -> Vec<f64> {
        assert_eq!(self.len(), other.len(), "batch lengths differ");
        self.items
            .iter()
            .zip(&other.items)
            .map(|(a, b)| a.dot(*b))
            .collect()
    }

    /// Per-entry cross product.
    pub fn cross(&self, other: &Self) -> Self {
        self.zip_map(other, |a, b| a.cross(b))
    }

    pub fn magnitude_squared(&self) -> Vec<f64> {
        self.items.iter().map(|v| v.length_squared()).collect()
    }

    pub fn magnitude(&self) -> Vec<f64> {
        self.items.iter().map(|v| v.length()).collect()
    }

    /// Normalize every entry. Zero-length entries are left unscaled.
    pub fn normalized(&self) -> Self {
        self.map(normalize)
    }

    /// Scale each entry by its own factor.
    pub fn scale(&self, factors: &[f64]) -> Self {
        assert_eq!(self.len(), factors.len(), "factor count differs from batch length");
        Self {
            items: self
                .items
                .iter()
                .zip(factors)
                .map(|(&v, &s)| v * s)
                .collect(),
        }
    }

    /// Reflect every entry about the matching normal.
    pub fn reflect(&self, normals: &Self) -> Self {
        self.zip_map(normals, reflect)
    }

    /// Refract every entry through the matching normal.
    ///
    /// See [`refract`] for the per-entry rule, including the Snell ratio.
    pub fn refract(&self, normals: &Self, n1: f64, n2: f64) -> Self {
        self.zip_map(normals, |v, n| refract(v, n, n1, n2))
    }

    /// Keep only the entries selected by `mask`.
    pub fn extract(&self, mask: &[bool]) -> Self {
        Self {
            items: extract(mask, &self.items),
        }
    }

    /// Scatter a compressed batch back to the positions selected by `mask`,
    /// filling every other position with zero.
    pub fn place(&self, mask: &[bool]) -> Self {
        Self {
            items: place(mask, &self.items),
        }
    }
}

impl FromIterator<DVec3> for Vec3Batch {
    fn from_iter<I: IntoIterator<Item = DVec3>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Add<&Vec3Batch> for &Vec3Batch {
    type Output = Vec3Batch;

    fn add(self, rhs: &Vec3Batch) -> Vec3Batch {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl Add for Vec3Batch {
    type Output = Vec3Batch;

    fn add(self, rhs: Vec3Batch) -> Vec3Batch {
        &self + &rhs
    }
}

impl AddAssign<&Vec3Batch> for Vec3Batch {
    fn add_assign(&mut self, rhs: &Vec3Batch) {
        assert_eq!(self.len(), rhs.len(), "batch lengths differ");
        for (a, b) in self.items.iter_mut().zip(&rhs.items) {
            *a += *b;
        }
    }
}

impl Sub<&Vec3Batch> for &Vec3Batch {
    type Output = Vec3Batch;

    fn sub(self, rhs: &Vec3Batch) -> Vec3Batch {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl Sub for Vec3Batch {
    type Output = Vec3Batch;

    fn sub(self, rhs: Vec3Batch) -> Vec3Batch {
        &self - &rhs
    }
}

impl Mul<f64> for &Vec3Batch {
    type Output = Vec3Batch;

    fn mul(self, rhs: f64) -> Vec3Batch {
        self.map(|v| v * rhs)
    }
}

impl Mul<f64> for Vec3Batch {
    type Output = Vec3Batch;

    fn mul(self, rhs: f64) -> Vec3Batch {
        &self * rhs
    }
}

impl Neg for &Vec3Batch {
    type Output = Vec3Batch;

    fn neg(self) -> Vec3Batch {
        self.map(|v| -v)
    }
}

impl Neg for Vec3Batch {
    type Output = Vec3Batch;

    fn neg(self) -> Vec3Batch {
        -&self
    }
}

/// Normalize a vector, leaving zero-length vectors unchanged.
#[inline]
pub fn normalize(v: DVec3) -> DVec3 {
    let magnitude = v.length();
    if magnitude == 0.0 {
        v
    } else {
        v / magnitude
    }
}

/// Mirror `v` about `n`: normalize(2(n·v)n − v).
///
/// `v` points away from the surface, as does the result.
#[inline]
pub fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    normalize(n * (2.0 * v.dot(n)) - v)
}

/// Refract the incoming direction `v` through a surface with normal `n`
/// separating media of index `n1` (the side `n` points into) and `n2`.
///
/// A ray travelling against the normal enters the surface; one travelling
/// along it exits, so the normal is flipped and the ratio inverted. Total
/// internal reflection clamps the discriminant to zero, and the reflected
/// direction is returned in that case.
///
/// The entering side uses the physical Snell ratio `n1 / n2`; the exiting
/// side uses `n2 / n1`.
pub fn refract(v: DVec3, n: DVec3, n1: f64, n2: f64) -> DVec3 {
    let (normal, ratio) = if v.dot(n) < 0.0 {
        (n, n1 / n2)
    } else {
        (-n, n2 / n1)
    };

    let w = -v;
    let d = w.dot(normal);
    let det = (1.0 - ratio * ratio * (1.0 - d * d)).max(0.0);

    if det == 0.0 {
        return reflect(w, n);
    }

    normalize((w - normal * d) * -ratio - normal * det.sqrt())
}

/// Keep the values selected by `mask`.
pub fn extract<T: Copy>(mask: &[bool], values: &[T]) -> Vec<T> {
    assert_eq!(mask.len(), values.len(), "mask length differs from values");
    mask.iter()
        .zip(values)
        .filter_map(|(&keep, &value)| keep.then_some(value))
        .collect()
}

/// Scatter compressed `values` to the positions selected by `mask`; other
/// positions get `T::default()`.
pub fn place<T: Copy + Default>(mask: &[bool], values: &[T]) -> Vec<T> {
    assert_eq!(
        mask.iter().filter(|&&keep| keep).count(),
        values.len(),
        "mask selects a different number of entries than supplied"
    );
    let mut values = values.iter();
    mask.iter()
        .map(|&keep| {
            if keep {
                values.next().copied().unwrap_or_default()
            } else {
                T::default()
            }
        })
        .collect()
}
