/// Produces the initial values of a model's parameters, up to a fixed amount of them.
pub trait ParamGen {
    /// Returns how many values are left before the generator is exhausted.
    fn remaining(&self) -> usize;

    /// Samples at most `n` values.
    ///
    /// # Returns
    /// The sampled values, or `None` once the generator is exhausted.
    fn sample(&mut self, n: usize) -> Option<Vec<f32>>;
}

/// Takes up to `n` values out of a generator's budget.
///
/// # Returns
/// The amount actually granted, or `None` if the budget is spent.
pub(super) fn take(remaining: &mut usize, n: usize) -> Option<usize> {
    if *remaining == 0 {
        return None;
    }

    let n = n.min(*remaining);
    *remaining -= n;
    Some(n)
}
