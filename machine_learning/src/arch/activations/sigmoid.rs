/// Logistic function, its output is a probability in `(0, 1)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sigmoid;

impl Sigmoid {
    /// Evaluates the exponential on a non positive argument only, so it never overflows.
    pub fn f(&self, z: f32) -> f32 {
        let e = (-z.abs()).exp();
        if z >= 0. { 1. / (1. + e) } else { e / (1. + e) }
    }

    pub fn df(&self, z: f32) -> f32 {
        let s = self.f(z);
        s * (1. - s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_around_zero() {
        for z in [0.5, 2., 7.] {
            assert!((Sigmoid.f(z) + Sigmoid.f(-z) - 1.).abs() < 1e-6);
        }
    }

    #[test]
    fn output_is_a_probability() {
        assert_eq!(Sigmoid.f(0.), 0.5);
        assert!((0. ..=1.).contains(&Sigmoid.f(-1000.)));
        assert!((0. ..=1.).contains(&Sigmoid.f(1000.)));
        assert!(Sigmoid.df(-1000.).is_finite());
    }
}
