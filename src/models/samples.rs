//! Built-in sample messages.

use rand::seq::SliceRandom;

/// Sample messages offered below the input field, in display order.
pub const SAMPLE_MESSAGES: &[&str] = &[
    "Happy Easter!",
    "Hoppy Easter to you and yours!",
    "Wishing you a basket full of joy",
    "Some bunny loves you",
    "Have an egg-cellent day!",
    "Spring has sprung, enjoy every moment",
    "May your Easter be filled with sunshine",
    "Hop into happiness this Easter",
    "Sending you warm Easter hugs",
    "He is risen! Happy Easter",
    "Chocolate eggs and good company",
    "Peace, love and jelly beans",
];

/// All sample messages.
pub fn samples() -> &'static [&'static str] {
    SAMPLE_MESSAGES
}

/// Sample at `index`, if any.
pub fn sample(index: usize) -> Option<&'static str> {
    SAMPLE_MESSAGES.get(index).copied()
}

/// Index of a randomly chosen sample.
pub fn random_sample_index() -> usize {
    let mut rng = rand::thread_rng();
    let indices: Vec<usize> = (0..SAMPLE_MESSAGES.len()).collect();
    indices.choose(&mut rng).copied().unwrap_or(0)
}
