use rand::Rng;

///Consumes a collection and yields its elements in uniformly random order.
///Backs both distractor drawing (without replacement) and deck shuffling.
///Generic over the generator so sessions can be driven by a seeded one
///in tests.
pub trait IntoIterShuffled<'rng, R>
where
    Self: IntoIterator,
    R: Rng,
{
    fn into_iter_shuffled(self, rng: &'rng mut R) -> ShuffleIter<'rng, Self::Item, R>;
}

pub struct ShuffleIter<'rng, T, R> {
    values: Vec<T>,
    rng: &'rng mut R,
}

impl<T, R: Rng> Iterator for ShuffleIter<'_, T, R> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.values.len() {
            0 => None,
            1 => Some(self.values.swap_remove(0)),
            r => Some(self.values.swap_remove(self.rng.gen_range(0..r))),
        }
    }
}

impl<'rng, T, R: Rng> IntoIterShuffled<'rng, R> for Vec<T> {
    fn into_iter_shuffled(self, rng: &'rng mut R) -> ShuffleIter<'rng, Self::Item, R> {
        ShuffleIter { values: self, rng }
    }
}
