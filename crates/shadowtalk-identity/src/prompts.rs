use rand::Rng;
use rand::seq::IndexedRandom;

/// Placeholder prompts shown above the post box.
pub const PROMPTS: [&str; 5] = [
    "What is one dilemma you have been overthinking lately?",
    "Describe a situation where you felt misunderstood.",
    "What tough choice are you afraid to make?",
    "What is something you wish you could tell someone anonymously?",
    "What's a small worry that feels big in your head right now?",
];

pub fn random_prompt<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PROMPTS.choose(rng).copied().unwrap_or(PROMPTS[0])
}

/// Pick a prompt different from `current`.
pub fn next_prompt<R: Rng + ?Sized>(rng: &mut R, current: &str) -> &'static str {
    let others: Vec<&'static str> = PROMPTS.iter().copied().filter(|p| *p != current).collect();
    others.choose(rng).copied().unwrap_or(PROMPTS[0])
}
