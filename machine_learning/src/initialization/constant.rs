use super::{ParamGen, param_gen::take};

/// Repeats a single value, e.g. zeroed biases or unit batch norm scales.
pub struct ConstParamGen {
    value: f32,
    remaining: usize,
}

impl ConstParamGen {
    /// Creates a new `ConstParamGen`.
    ///
    /// # Arguments
    /// * `value` - The value to repeat.
    /// * `limit` - How many times to repeat it.
    pub fn new(value: f32, limit: usize) -> Self {
        Self {
            value,
            remaining: limit,
        }
    }

    pub fn zeros(limit: usize) -> Self {
        Self::new(0., limit)
    }

    pub fn ones(limit: usize) -> Self {
        Self::new(1., limit)
    }
}

impl ParamGen for ConstParamGen {
    fn remaining(&self) -> usize {
        self.remaining
    }

    fn sample(&mut self, n: usize) -> Option<Vec<f32>> {
        take(&mut self.remaining, n).map(|n| vec![self.value; n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_until_exhausted() {
        let mut ones = ConstParamGen::ones(4);

        assert_eq!(ones.sample(3), Some(vec![1.; 3]));
        assert_eq!(ones.remaining(), 1);
        assert_eq!(ones.sample(3), Some(vec![1.]));
        assert_eq!(ones.sample(1), None);
    }

    #[test]
    fn zero_limit_is_exhausted() {
        assert_eq!(ConstParamGen::zeros(0).sample(1), None);
    }
}
