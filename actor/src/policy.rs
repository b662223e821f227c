//! Move selection policies for the actor

use anyhow::Result;
use engine_core::Node;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Something that picks the next position of a game.
pub trait Policy<N: Node> {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Pick a successor of the non-terminal position `node`.
    fn select_move(&mut self, node: &N) -> Result<N>;

    /// Forget any state gathered during the previous game.
    fn new_game(&mut self) {}
}

/// Policy that picks a successor uniformly at random.
#[derive(Debug)]
pub struct RandomPolicy {
    rng: ChaCha20Rng,
}

impl RandomPolicy {
    /// Seeded from `seed`, or from entropy if unset.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        Self { rng }
    }
}

impl<N: Node> Policy<N> for RandomPolicy {
    fn name(&self) -> &'static str {
        "random"
    }

    fn select_move(&mut self, node: &N) -> Result<N> {
        Ok(node.random_child(&mut self.rng)?)
    }
}
