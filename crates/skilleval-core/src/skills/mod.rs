pub mod generate;
pub mod prompts;
pub mod registry;

pub use generate::{generate_skill_tests, parse_generated_tests};
pub use registry::static_tests;
