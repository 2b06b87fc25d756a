// Resume Analysis Engine
// Implements: text normalization, section extraction, professionalism scoring.
// All regex patterns live in LazyLock statics and compile once.

pub mod handlers;
pub mod normalize;
pub mod readability;
pub mod scoring;
pub mod sections;
