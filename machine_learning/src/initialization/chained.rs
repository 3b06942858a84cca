use super::ParamGen;

/// Samples from a list of generators in order, moving on to the next one whenever the current
/// one runs out.
///
/// A model builds one of these out of its layers' generators, so a single call fills its whole
/// parameter buffer.
pub struct ChainedParamGen {
    param_gens: Vec<Box<dyn ParamGen>>,
    curr: usize,
}

impl ChainedParamGen {
    pub fn new(param_gens: Vec<Box<dyn ParamGen>>) -> Self {
        Self {
            param_gens,
            curr: 0,
        }
    }
}

impl ParamGen for ChainedParamGen {
    fn remaining(&self) -> usize {
        self.param_gens[self.curr..]
            .iter()
            .map(|param_gen| param_gen.remaining())
            .sum()
    }

    fn sample(&mut self, n: usize) -> Option<Vec<f32>> {
        if self.remaining() == 0 {
            return None;
        }

        let mut sample = Vec::with_capacity(n);

        while sample.len() < n {
            let Some(param_gen) = self.param_gens.get_mut(self.curr) else {
                break;
            };

            match param_gen.sample(n - sample.len()) {
                Some(values) => sample.extend(values),
                None => self.curr += 1,
            }
        }

        Some(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::{super::ConstParamGen, *};

    #[test]
    fn nothing_to_chain() {
        let mut param_gen = ChainedParamGen::new(vec![]);

        assert_eq!(param_gen.remaining(), 0);
        assert!(param_gen.sample(1).is_none());
    }

    #[test]
    fn crosses_generator_boundaries() {
        let param_gens: Vec<Box<dyn ParamGen>> = vec![
            Box::new(ConstParamGen::zeros(3)),
            Box::new(ConstParamGen::zeros(0)),
            Box::new(ConstParamGen::ones(4)),
        ];
        let mut param_gen = ChainedParamGen::new(param_gens);
        assert_eq!(param_gen.remaining(), 7);

        assert_eq!(param_gen.sample(5).unwrap(), [0., 0., 0., 1., 1.]);
        assert_eq!(param_gen.sample(5).unwrap(), [1., 1.]);
        assert!(param_gen.sample(1).is_none());
    }
}
