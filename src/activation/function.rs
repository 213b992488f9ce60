//! Squashing functions and the vectorized-apply helper — spec.md section 4.6.

/// A node activation function: raw summed input in, squashed output out.
///
/// Plain `fn` pointers rather than `Box<dyn Fn>`: every engine in a given
/// run uses one of a handful of fixed functions, so there is no need to pay
/// for dynamic dispatch or heap-box a closure per node.
pub type ActivationFn = fn(f32) -> f32;

/// Steepened logistic sigmoid, output range `(0, 1)`. The steepening
/// constant (4.924273) is the standard NEAT value that makes the sigmoid's
/// slope at the origin equal 1, matching the un-steepened function's slope
/// at that point.
pub fn sigmoid_steep(x: f32) -> f32 {
    1.0 / (1.0 + (-4.924_273 * x).exp())
}

/// Hyperbolic tangent, output range `(-1, 1)`.
pub fn bipolar_tanh(x: f32) -> f32 {
    x.tanh()
}

/// Applies `f` to every element of `values` in place.
///
/// With the `rayon` feature enabled this runs as a data-parallel
/// [`rayon::prelude::ParallelIterator`] pass; without it, a plain iterator.
/// Either way the operation is elementwise and order-independent, so the two
/// give bit-identical results (section 8's vectorized-equivalence invariant).
pub fn apply_in_place(values: &mut [f32], f: ActivationFn) {
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        values.par_iter_mut().for_each(|v| *v = f(*v));
    }
    #[cfg(not(feature = "rayon"))]
    {
        values.iter_mut().for_each(|v| *v = f(*v));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_bounded_and_centered() {
        assert!((sigmoid_steep(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid_steep(-100.0) > 0.0);
        assert!(sigmoid_steep(100.0) < 1.0);
    }

    #[test]
    fn tanh_is_bounded_and_centered() {
        assert_eq!(bipolar_tanh(0.0), 0.0);
        assert!(bipolar_tanh(100.0) < 1.0);
        assert!(bipolar_tanh(-100.0) > -1.0);
    }

    #[test]
    fn apply_in_place_matches_scalar_application() {
        let mut values = vec![-1.0, 0.0, 1.0, 2.5];
        let expected: Vec<f32> = values.iter().map(|&v| sigmoid_steep(v)).collect();
        apply_in_place(&mut values, sigmoid_steep);
        assert_eq!(values, expected);
    }
}
