use super::{Relu, Sigmoid};

/// The element-wise activation applied at the end of a dense layer.
#[derive(Clone, Debug)]
pub enum ActFn {
    Relu(Relu),
    Sigmoid(Sigmoid),
}

impl ActFn {
    pub fn relu() -> Self {
        Self::Relu(Relu)
    }

    pub fn sigmoid() -> Self {
        Self::Sigmoid(Sigmoid)
    }

    pub fn f(&self, x: f32) -> f32 {
        match self {
            Self::Relu(a) => a.f(x),
            Self::Sigmoid(a) => a.f(x),
        }
    }

    pub fn df(&self, x: f32) -> f32 {
        match self {
            Self::Relu(a) => a.df(x),
            Self::Sigmoid(a) => a.df(x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relu_clips_negatives() {
        let relu = ActFn::relu();

        assert_eq!(relu.f(-3.0), 0.0);
        assert_eq!(relu.f(2.5), 2.5);
        assert_eq!(relu.df(-3.0), 0.0);
        assert_eq!(relu.df(2.5), 1.0);
    }

    #[test]
    fn sigmoid_is_centered_and_bounded() {
        let sigmoid = ActFn::sigmoid();

        assert_eq!(sigmoid.f(0.0), 0.5);
        assert!((sigmoid.df(0.0) - 0.25).abs() < 1e-6);
        assert!(sigmoid.f(100.0) <= 1.0);
        assert!(sigmoid.f(-100.0) >= 0.0);
        assert!(sigmoid.df(-100.0).is_finite());
    }
}
