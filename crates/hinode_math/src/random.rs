//! Filling containers with random values.

use crate::{
    container::{Container, NumericContainer},
    num::Scalar,
};
use rand::{Rng, distr::uniform::SampleUniform};

/// Creates a value of type `V` whose elements are drawn uniformly from the
/// inclusive range `min..=max`.
///
/// # Panics
/// If `min` exceeds `max`.
pub fn random_container<T, V, R, const ROWS: usize, const COLS: usize>(
    rng: &mut R,
    min: T,
    max: T,
) -> V
where
    T: Scalar + SampleUniform,
    V: NumericContainer<T, ROWS, COLS>,
    R: Rng + ?Sized,
{
    let mut value = V::from_container(Container::zeros());
    randomize(rng, &mut value, min, max);
    value
}

/// Overwrites every element of `value` with a value drawn uniformly from
/// `min..=max`.
///
/// # Panics
/// If `min` exceeds `max`.
pub fn randomize<T, V, R, const ROWS: usize, const COLS: usize>(
    rng: &mut R,
    value: &mut V,
    min: T,
    max: T,
) where
    T: Scalar + SampleUniform,
    V: NumericContainer<T, ROWS, COLS>,
    R: Rng + ?Sized,
{
    assert!(min <= max, "invalid random range: {min} > {max}");
    value
        .as_container_mut()
        .map(|_, _, _| rng.random_range(min..=max));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{matrix::Matrix4x4, vector::Vector3};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn random_elements_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let m: Matrix4x4<f32> = random_container(&mut rng, -2.0, 3.0);
            assert!(m.iter().all(|value| (-2.0..=3.0).contains(&value)));
        }
    }

    #[test]
    fn integer_elements_cover_inclusive_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..100 {
            let v: Vector3<i32> = random_container(&mut rng, 0, 2);
            for component in v.as_array() {
                seen[*component as usize] = true;
            }
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn degenerate_range_gives_constant_value() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut v = Vector3::new(1.0_f64, 2.0, 3.0);
        randomize(&mut rng, &mut v, 5.0, 5.0);
        assert_eq!(v, Vector3::same(5.0));
    }

    #[test]
    fn same_seed_gives_same_values() {
        let a: Matrix4x4<f64> = random_container(&mut StdRng::seed_from_u64(1), 0.0, 1.0);
        let b: Matrix4x4<f64> = random_container(&mut StdRng::seed_from_u64(1), 0.0, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic]
    fn inverted_range_panics() {
        let mut rng = StdRng::seed_from_u64(0);
        let _: Vector3<f32> = random_container(&mut rng, 1.0, 0.0);
    }
}
