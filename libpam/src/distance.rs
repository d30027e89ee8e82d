use ndarray::{ArrayBase, Data, Ix1};

/// A dissimilarity between two objects of type `T`.
///
/// Implementations must return finite, non-negative values and `0` for
/// identical objects. Values breaking this contract are rejected when the
/// distance matrix is built.
pub trait Distance<T: ?Sized> {
    fn distance(&self, a: &T, b: &T) -> f64;
}

impl<T: ?Sized, F: Fn(&T, &T) -> f64> Distance<T> for F {
    fn distance(&self, a: &T, b: &T) -> f64 {
        self(a, b)
    }
}

pub trait Scalar: Copy + 'static {
    fn to_f64(self) -> f64;
}

macro_rules! impl_scalar {
    ($($t:ty),*) => {
        $(
            impl Scalar for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_scalar!(f32, f64, u8, u16, u32, i32, i64);

/// Anything that can be viewed as a sequence of coordinates.
pub trait Point {
    fn coords(&self) -> impl Iterator<Item = f64> + '_;
}

impl<A: Scalar> Point for [A] {
    fn coords(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|x| x.to_f64())
    }
}

impl<A: Scalar> Point for Vec<A> {
    fn coords(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|x| x.to_f64())
    }
}

impl<A: Scalar, const N: usize> Point for [A; N] {
    fn coords(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|x| x.to_f64())
    }
}

impl<A: Scalar, S: Data<Elem = A>> Point for ArrayBase<S, Ix1> {
    fn coords(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|x| x.to_f64())
    }
}

fn paired<'a, P: Point + ?Sized>(a: &'a P, b: &'a P) -> impl Iterator<Item = (f64, f64)> + 'a {
    let (mut a, mut b) = (a.coords(), b.coords());
    std::iter::from_fn(move || match (a.next(), b.next()) {
        (Some(x), Some(y)) => Some((x, y)),
        (None, None) => None,
        _ => panic!("points have different dimensions"),
    })
}

/// Sum of absolute coordinate differences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

impl<P: Point + ?Sized> Distance<P> for Manhattan {
    fn distance(&self, a: &P, b: &P) -> f64 {
        paired(a, b).map(|(x, y)| (x - y).abs()).sum()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Euclidean;

impl<P: Point + ?Sized> Distance<P> for Euclidean {
    fn distance(&self, a: &P, b: &P) -> f64 {
        SquaredEuclidean.distance(a, b).sqrt()
    }
}

/// Squared euclidean distance. Not a metric, but PAM does not need the
/// triangle inequality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SquaredEuclidean;

impl<P: Point + ?Sized> Distance<P> for SquaredEuclidean {
    fn distance(&self, a: &P, b: &P) -> f64 {
        paired(a, b).map(|(x, y)| (x - y) * (x - y)).sum()
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn test_manhattan() {
        assert_eq!(Manhattan.distance(&[1i64, 0, 3], &[0, 3, 2]), 5.0);
        assert_eq!(Manhattan.distance(&vec![6u8, 1, 3], &vec![6u8, 1, 3]), 0.0);
    }

    #[test]
    fn test_euclidean_on_rows() {
        let data = array![[0.0f32, 0.0], [3.0, 4.0]];
        assert_abs_diff_eq!(Euclidean.distance(&data.row(0), &data.row(1)), 5.0);
        assert_abs_diff_eq!(SquaredEuclidean.distance(&data.row(0), &data.row(1)), 25.0);
    }

    #[test]
    fn test_closure_is_a_distance() {
        let hamming = |a: &str, b: &str| a.chars().zip(b.chars()).filter(|(x, y)| x != y).count() as f64;
        assert_eq!(hamming.distance("karolin", "kathrin"), 3.0);
    }

    #[test]
    #[should_panic]
    fn test_dimension_mismatch() {
        Manhattan.distance(&[1.0f64, 2.0][..], &[1.0f64][..]);
    }
}
